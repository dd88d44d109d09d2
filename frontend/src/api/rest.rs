//! PostgREST-style client for the managed backend.
//!
//! The backend exposes each table as a REST resource with column filters
//! (`schedule_date=gte.2024-05-01`), embedded joins in `select`, and
//! `Prefer: return=representation` on writes. Calls are blocking and run on
//! worker threads, never on the UI thread.

use super::{ApiError, ScheduleApi, Session};
use chrono::NaiveDate;
use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use shared::{FinanceCategory, NewSchedule, ScheduleCategory, ScheduleRecord};

/// Embedded-join select used by every schedule read: the record plus the
/// `{name, color}` / `{name, type}` category projections.
const SCHEDULE_SELECT: &str =
    "*,schedule_category:schedule_categories(name,color),finance_category:finance_categories(name,type)";

/// First and last day (inclusive) of a calendar month as ISO date strings.
pub fn month_range(year: i32, month: u32) -> Option<(String, String)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last = next_first.pred_opt()?;
    Some((first.to_string(), last.to_string()))
}

pub struct RestScheduleApi {
    base_url: String,
    api_key: String,
    session: Option<Session>,
    http: Client,
}

impl RestScheduleApi {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            session: None,
            http: Client::new(),
        }
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    fn url(&self, table: &str) -> String {
        format!("{}/{}", self.base_url, table)
    }

    /// Mutations must have an authenticated user; fail fast before any
    /// request goes out.
    fn require_session(&self) -> Result<&Session, ApiError> {
        self.session.as_ref().ok_or(ApiError::AuthRequired)
    }

    fn get(&self, table: &str, query: &[(&str, &str)]) -> Result<Response, ApiError> {
        let mut request = self
            .http
            .get(self.url(table))
            .header("apikey", &self.api_key)
            .query(query);
        if let Some(session) = &self.session {
            request = request.bearer_auth(&session.access_token);
        }
        request
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))
    }

    /// Map non-success statuses onto the error taxonomy, keeping the
    /// backend's message text for `Backend` errors.
    fn ok_response(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::AuthRequired);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound);
        }
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ApiError::Backend(format!(
                "{} {}",
                status.as_u16(),
                body.trim()
            )));
        }
        Ok(response)
    }

    fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        Self::ok_response(response)?
            .json::<T>()
            .map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn check_status(response: Response) -> Result<(), ApiError> {
        Self::ok_response(response).map(|_| ())
    }

    fn list_categories<T: DeserializeOwned>(&self, table: &str) -> Result<Vec<T>, ApiError> {
        let response = self.get(table, &[("select", "*"), ("order", "sort_order.asc")])?;
        Self::read_json(response)
    }
}

impl ScheduleApi for RestScheduleApi {
    fn fetch_month(&self, year: i32, month: u32) -> Result<Vec<ScheduleRecord>, ApiError> {
        let (start, end) = month_range(year, month)
            .ok_or_else(|| ApiError::Backend(format!("invalid month {}-{}", year, month)))?;
        debug!("🌐 GET schedules {} ~ {}", start, end);

        let gte = format!("gte.{}", start);
        let lte = format!("lte.{}", end);
        let response = self.get(
            "schedules",
            &[
                ("select", SCHEDULE_SELECT),
                ("schedule_date", gte.as_str()),
                ("schedule_date", lte.as_str()),
                ("order", "schedule_date.asc,schedule_time.asc"),
            ],
        )?;
        Self::read_json(response)
    }

    fn fetch_schedule(&self, id: &str) -> Result<ScheduleRecord, ApiError> {
        let id_filter = format!("eq.{}", id);
        let response = self.get(
            "schedules",
            &[("select", SCHEDULE_SELECT), ("id", id_filter.as_str())],
        )?;
        let mut records: Vec<ScheduleRecord> = Self::read_json(response)?;
        records.pop().ok_or(ApiError::NotFound)
    }

    fn create_schedule(&self, new: &NewSchedule) -> Result<ScheduleRecord, ApiError> {
        let session = self.require_session()?;
        let payload = new.to_payload(&session.user_id);

        let response = self
            .http
            .post(self.url("schedules"))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&session.access_token)
            .query(&[("select", SCHEDULE_SELECT)])
            .json(&payload)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut records: Vec<ScheduleRecord> = Self::read_json(response)?;
        records
            .pop()
            .ok_or_else(|| ApiError::Decode("empty insert representation".to_string()))
    }

    fn update_schedule(&self, id: &str, fields: &NewSchedule) -> Result<ScheduleRecord, ApiError> {
        let session = self.require_session()?;
        let payload = fields.to_payload(&session.user_id);
        let id_filter = format!("eq.{}", id);

        let response = self
            .http
            .patch(self.url("schedules"))
            .header("apikey", &self.api_key)
            .header("Prefer", "return=representation")
            .bearer_auth(&session.access_token)
            .query(&[("select", SCHEDULE_SELECT), ("id", id_filter.as_str())])
            .json(&payload)
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let mut records: Vec<ScheduleRecord> = Self::read_json(response)?;
        records.pop().ok_or(ApiError::NotFound)
    }

    fn delete_schedule(&self, id: &str) -> Result<(), ApiError> {
        let session = self.require_session()?;
        let id_filter = format!("eq.{}", id);

        let response = self
            .http
            .delete(self.url("schedules"))
            .header("apikey", &self.api_key)
            .bearer_auth(&session.access_token)
            .query(&[("id", id_filter.as_str())])
            .send()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::check_status(response)
    }

    fn list_schedule_categories(&self) -> Result<Vec<ScheduleCategory>, ApiError> {
        self.list_categories("schedule_categories")
    }

    fn list_finance_categories(&self) -> Result<Vec<FinanceCategory>, ApiError> {
        self.list_categories("finance_categories")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_range_inclusive_bounds() {
        assert_eq!(
            month_range(2024, 5),
            Some(("2024-05-01".to_string(), "2024-05-31".to_string()))
        );
        assert_eq!(
            month_range(2024, 2),
            Some(("2024-02-01".to_string(), "2024-02-29".to_string()))
        );
        assert_eq!(
            month_range(2023, 2),
            Some(("2023-02-01".to_string(), "2023-02-28".to_string()))
        );
    }

    #[test]
    fn test_month_range_december_rolls_year() {
        assert_eq!(
            month_range(2024, 12),
            Some(("2024-12-01".to_string(), "2024-12-31".to_string()))
        );
    }

    #[test]
    fn test_month_range_rejects_invalid_month() {
        assert_eq!(month_range(2024, 0), None);
        assert_eq!(month_range(2024, 13), None);
    }

    #[test]
    fn test_mutations_fail_fast_without_session() {
        let api = RestScheduleApi::new("http://localhost:54321/rest/v1", "anon-key");
        let form = NewSchedule {
            title: "회의".to_string(),
            schedule_date: "2024-05-15".to_string(),
            ..NewSchedule::default()
        };

        // No request is issued: the error comes back before any I/O
        assert_eq!(api.create_schedule(&form), Err(ApiError::AuthRequired));
        assert_eq!(api.update_schedule("s-1", &form), Err(ApiError::AuthRequired));
        assert_eq!(api.delete_schedule("s-1"), Err(ApiError::AuthRequired));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let api = RestScheduleApi::new("http://localhost:54321/rest/v1/", "anon-key");
        assert_eq!(api.url("schedules"), "http://localhost:54321/rest/v1/schedules");
    }
}
