//! # Schedule Store Module
//!
//! Single source of truth for the schedules visible in the currently
//! selected (year, month), plus the calendar-event list derived from them.
//!
//! ## Responsibilities:
//! - Month-scoped cache of fetched records (date asc, time asc)
//! - Local mutation on create/update/delete confirmations
//! - Re-derivation of `events` whenever the collection or mode changes
//! - Discarding fetch responses that a later fetch has superseded
//!
//! ## Fetch ordering:
//! Backend requests are not cancellable once issued, so overlapping month
//! fetches can resolve out of order. Every fetch gets an epoch from
//! `begin_fetch`; `apply_fetch` drops any response whose epoch is not the
//! latest issued. The view therefore always ends on the last month the user
//! asked for, regardless of resolution order.

use crate::api::ApiError;
use chrono::Datelike;
use log::{info, warn};
use shared::{project_event, sort_records, CalendarEvent, DisplayMode, ScheduleRecord};

/// Handle for one in-flight month fetch. Carries the requested month so the
/// store can commit it only if the response is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    epoch: u64,
    pub year: i32,
    pub month: u32,
}

#[derive(Debug)]
pub struct ScheduleStore {
    schedules: Vec<ScheduleRecord>,
    events: Vec<CalendarEvent>,
    pub current_year: i32,
    pub current_month: u32,
    pub loading: bool,
    pub error: Option<String>,
    display_mode: DisplayMode,
    epoch: u64,
}

impl ScheduleStore {
    pub fn new(year: i32, month: u32) -> Self {
        Self {
            schedules: Vec::new(),
            events: Vec::new(),
            current_year: year,
            current_month: month,
            loading: false,
            error: None,
            display_mode: DisplayMode::Schedule,
            epoch: 0,
        }
    }

    pub fn schedules(&self) -> &[ScheduleRecord] {
        &self.schedules
    }

    /// The derived event list; recomputed internally, never mutated.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        if self.display_mode != mode {
            self.display_mode = mode;
            self.recompute_events();
        }
    }

    /// Pure month-pointer update; callers that want data must also fetch.
    pub fn set_current_date(&mut self, year: i32, month: u32) {
        self.current_year = year;
        self.current_month = month;
    }

    /// Start a month fetch: marks loading, clears the error, and issues a
    /// ticket superseding every earlier in-flight fetch.
    pub fn begin_fetch(&mut self, year: i32, month: u32) -> FetchTicket {
        self.loading = true;
        self.error = None;
        self.epoch += 1;
        info!("📅 Fetching schedules for {}-{:02} (epoch {})", year, month, self.epoch);
        FetchTicket {
            epoch: self.epoch,
            year,
            month,
        }
    }

    /// Commit a fetch result. Stale tickets are dropped whole; failures keep
    /// the previous records available alongside the error message.
    pub fn apply_fetch(&mut self, ticket: &FetchTicket, result: Result<Vec<ScheduleRecord>, ApiError>) {
        if ticket.epoch != self.epoch {
            warn!(
                "📅 Dropping stale fetch result for {}-{:02} (epoch {} < {})",
                ticket.year, ticket.month, ticket.epoch, self.epoch
            );
            return;
        }

        self.loading = false;
        match result {
            Ok(mut records) => {
                // The backend orders these already; re-sorting keeps the
                // invariant independent of who served the response.
                sort_records(&mut records);
                self.schedules = records;
                self.current_year = ticket.year;
                self.current_month = ticket.month;
                self.recompute_events();
                info!(
                    "📅 Loaded {} schedules for {}-{:02}",
                    self.schedules.len(),
                    ticket.year,
                    ticket.month
                );
            }
            Err(e) => {
                self.error = Some(e.to_string());
                warn!("❌ Month fetch failed: {}", e);
            }
        }
    }

    /// Insert a confirmed record if it belongs to the loaded month;
    /// records for other months have no cache to land in.
    pub fn add_schedule(&mut self, record: ScheduleRecord) {
        if !self.is_in_current_month(&record) {
            info!(
                "📅 Skipping add of {} dated {} (outside {}-{:02})",
                record.schedule.id, record.schedule.schedule_date, self.current_year, self.current_month
            );
            return;
        }
        self.schedules.push(record);
        sort_records(&mut self.schedules);
        self.recompute_events();
    }

    /// Replace a record after an edit, handling date moves across the
    /// month boundary in both directions.
    pub fn update_schedule(&mut self, record: ScheduleRecord) {
        let in_current_month = self.is_in_current_month(&record);
        let existing = self
            .schedules
            .iter()
            .position(|s| s.schedule.id == record.schedule.id);

        match (existing, in_current_month) {
            (Some(index), true) => {
                self.schedules[index] = record;
                sort_records(&mut self.schedules);
            }
            (Some(index), false) => {
                // Date moved to another month: drop it from this view
                self.schedules.remove(index);
            }
            (None, true) => {
                // Edit moved the record into the visible month
                self.schedules.push(record);
                sort_records(&mut self.schedules);
            }
            (None, false) => return,
        }
        self.recompute_events();
    }

    /// Remove by id. Removing an absent id is a no-op, not an error.
    pub fn remove_schedule(&mut self, id: &str) {
        let before = self.schedules.len();
        self.schedules.retain(|s| s.schedule.id != id);
        if self.schedules.len() != before {
            self.recompute_events();
        }
    }

    fn is_in_current_month(&self, record: &ScheduleRecord) -> bool {
        match record.date() {
            Some(date) => date.year() == self.current_year && date.month() == self.current_month,
            None => {
                warn!("⚠️ Unparseable schedule_date: {}", record.schedule.schedule_date);
                false
            }
        }
    }

    fn recompute_events(&mut self) {
        self.events = self
            .schedules
            .iter()
            .filter_map(|r| project_event(r, self.display_mode))
            .collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CategoryRef, FinanceType, Schedule};

    fn record(id: &str, date: &str, time: Option<&str>) -> ScheduleRecord {
        ScheduleRecord {
            schedule: Schedule {
                id: id.to_string(),
                user_id: "u-1".to_string(),
                title: format!("일정 {}", id),
                schedule_date: date.to_string(),
                schedule_time: time.map(|t| format!("{}:00", t)),
                schedule_category_id: None,
                has_finance: false,
                finance_type: None,
                amount: None,
                finance_category_id: None,
                is_receivable: false,
                memo: None,
                recurring_group_id: None,
                created_at: String::new(),
                updated_at: String::new(),
            },
            schedule_category: Some(CategoryRef {
                name: "업무".to_string(),
                color: "#6366F1".to_string(),
            }),
            finance_category: None,
        }
    }

    fn loaded_store(records: Vec<ScheduleRecord>) -> ScheduleStore {
        let mut store = ScheduleStore::new(2024, 5);
        let ticket = store.begin_fetch(2024, 5);
        store.apply_fetch(&ticket, Ok(records));
        store
    }

    #[test]
    fn test_fetch_success_replaces_and_derives() {
        let store = loaded_store(vec![
            record("s-1", "2024-05-02", Some("09:00")),
            record("s-2", "2024-05-01", None),
        ]);

        assert!(!store.loading);
        assert_eq!(store.error, None);
        assert_eq!(store.schedules().len(), 2);
        assert_eq!(store.events().len(), 2);
        assert_eq!(store.schedules()[0].schedule.id, "s-2");
    }

    #[test]
    fn test_fetch_failure_keeps_previous_schedules() {
        let mut store = loaded_store(vec![record("s-1", "2024-05-02", None)]);

        let ticket = store.begin_fetch(2024, 6);
        store.apply_fetch(&ticket, Err(ApiError::Network("timeout".to_string())));

        assert!(!store.loading);
        assert!(store.error.is_some());
        // Stale-but-available: the May data survives the failed June fetch
        assert_eq!(store.schedules().len(), 1);
        assert_eq!(store.current_month, 5);
    }

    #[test]
    fn test_out_of_order_responses_end_on_latest_request() {
        let mut store = ScheduleStore::new(2024, 5);

        let first = store.begin_fetch(2024, 5);
        let second = store.begin_fetch(2024, 6);

        // The later request resolves first...
        store.apply_fetch(&second, Ok(vec![record("jun-1", "2024-06-10", None)]));
        // ...and the slow earlier one must not revert the view
        store.apply_fetch(&first, Ok(vec![record("may-1", "2024-05-10", None)]));

        assert_eq!(store.current_month, 6);
        assert_eq!(store.schedules().len(), 1);
        assert_eq!(store.schedules()[0].schedule.id, "jun-1");
    }

    #[test]
    fn test_stale_error_does_not_clobber_fresh_data() {
        let mut store = ScheduleStore::new(2024, 5);

        let first = store.begin_fetch(2024, 5);
        let second = store.begin_fetch(2024, 6);

        store.apply_fetch(&second, Ok(vec![record("jun-1", "2024-06-10", None)]));
        store.apply_fetch(&first, Err(ApiError::Network("slow".to_string())));

        assert_eq!(store.error, None);
        assert_eq!(store.current_month, 6);
    }

    #[test]
    fn test_add_keeps_sort_order() {
        let mut store = loaded_store(vec![
            record("s-1", "2024-05-01", Some("23:00")),
            record("s-3", "2024-05-20", Some("10:00")),
        ]);

        store.add_schedule(record("s-2", "2024-05-10", None));

        let ids: Vec<&str> = store.schedules().iter().map(|r| r.schedule.id.as_str()).collect();
        assert_eq!(ids, vec!["s-1", "s-2", "s-3"]);
        assert_eq!(store.events().len(), 3);
    }

    #[test]
    fn test_add_outside_month_is_noop() {
        let mut store = loaded_store(vec![record("s-1", "2024-05-02", None)]);
        let before = store.schedules().to_vec();

        store.add_schedule(record("s-2", "2024-06-01", None));

        assert_eq!(store.schedules(), before.as_slice());
    }

    #[test]
    fn test_sort_untimed_before_timed_on_same_day() {
        let store = loaded_store(vec![
            record("a", "2024-05-02", None),
            record("b", "2024-05-02", Some("09:00")),
            record("c", "2024-05-01", Some("23:00")),
        ]);

        let keys: Vec<(String, String)> = store
            .schedules()
            .iter()
            .map(|r| (r.schedule.schedule_date.clone(), r.sort_time()))
            .collect();
        assert_eq!(
            keys,
            vec![
                ("2024-05-01".to_string(), "23:00".to_string()),
                ("2024-05-02".to_string(), "00:00".to_string()),
                ("2024-05-02".to_string(), "09:00".to_string()),
            ]
        );
    }

    #[test]
    fn test_update_in_place_resorts() {
        let mut store = loaded_store(vec![
            record("s-1", "2024-05-02", Some("09:00")),
            record("s-2", "2024-05-10", Some("10:00")),
        ]);

        store.update_schedule(record("s-1", "2024-05-20", Some("09:00")));

        let ids: Vec<&str> = store.schedules().iter().map(|r| r.schedule.id.as_str()).collect();
        assert_eq!(ids, vec!["s-2", "s-1"]);
    }

    #[test]
    fn test_update_moving_out_of_month_removes() {
        let mut store = loaded_store(vec![record("s-1", "2024-05-02", None)]);

        store.update_schedule(record("s-1", "2024-06-02", None));

        assert!(store.schedules().is_empty());
        assert!(store.events().is_empty());
    }

    #[test]
    fn test_update_moving_into_month_inserts() {
        let mut store = loaded_store(vec![record("s-1", "2024-05-02", None)]);

        // Not previously in view; its edited date lands in the loaded month
        store.update_schedule(record("s-9", "2024-05-15", Some("08:00")));

        assert_eq!(store.schedules().len(), 2);
        assert_eq!(store.schedules()[1].schedule.id, "s-9");
    }

    #[test]
    fn test_update_unrelated_month_is_noop() {
        let mut store = loaded_store(vec![record("s-1", "2024-05-02", None)]);

        store.update_schedule(record("s-9", "2024-07-15", None));

        assert_eq!(store.schedules().len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut store = loaded_store(vec![record("s-1", "2024-05-02", None)]);

        store.remove_schedule("s-1");
        assert!(store.schedules().is_empty());

        // Second removal of the same id must be a silent no-op
        store.remove_schedule("s-1");
        assert!(store.schedules().is_empty());
        assert_eq!(store.error, None);
    }

    #[test]
    fn test_mode_switch_recomputes_event_titles() {
        let mut financed = record("s-1", "2024-05-02", Some("12:00"));
        financed.schedule.has_finance = true;
        financed.schedule.finance_type = Some(FinanceType::Expense);
        financed.schedule.amount = Some(12_000);
        let mut store = loaded_store(vec![financed]);

        assert_eq!(store.events()[0].title, "12:00 일정 s-1 -12,000원");

        store.set_display_mode(DisplayMode::FinanceOnly);
        assert_eq!(store.events()[0].title, "12:00 -12,000원");
        assert_eq!(store.events()[0].color, shared::EXPENSE_RED);
    }
}
