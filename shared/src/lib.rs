use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod projection;

pub use projection::{
    day_records, display_color, finance_visible, format_amount, format_event_title,
    matches_query, project_event, sort_key, sort_records, visible_records, CalendarEvent,
    DisplayMode, DEFAULT_CATEGORY_COLOR, EXPENSE_RED, INCOME_GREEN,
};

/// Kind of money attached to a schedule entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinanceType {
    Income,
    Expense,
    Savings,
}

impl FinanceType {
    /// Sign used when rendering the amount: `+` for income, `-` for
    /// expense and savings.
    pub fn sign(&self) -> char {
        match self {
            FinanceType::Income => '+',
            FinanceType::Expense | FinanceType::Savings => '-',
        }
    }

    /// User-facing label.
    pub fn label(&self) -> &'static str {
        match self {
            FinanceType::Income => "수입",
            FinanceType::Expense => "지출",
            FinanceType::Savings => "저축",
        }
    }

    pub fn all() -> [FinanceType; 3] {
        [FinanceType::Income, FinanceType::Expense, FinanceType::Savings]
    }
}

/// User-scoped schedule category (label + display color + ordering).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCategory {
    pub id: String,
    pub user_id: String,
    pub name: String,
    /// Display color as a `#RRGGBB` hex string
    pub color: String,
    pub sort_order: i32,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// User-scoped finance category; `kind` restricts which schedules it can
/// attach to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceCategory {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FinanceType,
    pub sort_order: i32,
    pub created_at: String,
    pub updated_at: String,
}

/// One calendar entry, optionally carrying a monetary amount.
///
/// Finance fields other than `has_finance` are `None`/false unless the flag
/// is set; the client nulls them out on submit. The backend does not enforce
/// this invariant server-side (known gap, preserved as observed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// Plain calendar date, zero-padded ISO `YYYY-MM-DD`; no time zone
    /// semantics attached.
    pub schedule_date: String,
    /// Time of day as `HH:MM:SS`; absent means all-day-like and sorts
    /// before timed entries.
    pub schedule_time: Option<String>,
    pub schedule_category_id: Option<String>,
    pub has_finance: bool,
    pub finance_type: Option<FinanceType>,
    /// Non-negative amount in won
    pub amount: Option<i64>,
    pub finance_category_id: Option<String>,
    /// Money owed but not yet collected
    pub is_receivable: bool,
    pub memo: Option<String>,
    /// Present on the wire but never interpreted (recurrence is not
    /// expanded anywhere)
    pub recurring_group_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Joined schedule-category projection embedded in a fetched record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRef {
    pub name: String,
    pub color: String,
}

/// Joined finance-category projection embedded in a fetched record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceCategoryRef {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: FinanceType,
}

/// A schedule joined with its category refs; the unit the client caches
/// and renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecord {
    #[serde(flatten)]
    pub schedule: Schedule,
    pub schedule_category: Option<CategoryRef>,
    pub finance_category: Option<FinanceCategoryRef>,
}

impl ScheduleRecord {
    /// Parse the record's calendar date. `None` for malformed input.
    pub fn date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.schedule.schedule_date, "%Y-%m-%d").ok()
    }

    /// `HH:MM` prefix of the time of day, if any.
    pub fn time_hhmm(&self) -> Option<&str> {
        self.schedule
            .schedule_time
            .as_deref()
            .filter(|t| t.len() >= 5)
            .map(|t| &t[..5])
    }

    /// Time key used for ordering: `HH:MM`, with an absent time treated
    /// as `00:00`.
    pub fn sort_time(&self) -> String {
        self.time_hhmm().unwrap_or("00:00").to_string()
    }

    pub fn category_name(&self) -> Option<&str> {
        self.schedule_category.as_ref().map(|c| c.name.as_str())
    }

    /// Amount that should be displayed, i.e. finance flag set and a
    /// positive amount present.
    pub fn display_amount(&self) -> Option<i64> {
        if self.schedule.has_finance {
            self.schedule.amount.filter(|a| *a > 0)
        } else {
            None
        }
    }
}

/// Form payload for creating or replacing a schedule. Mutable fields only;
/// id, owner, and timestamps are backend-assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewSchedule {
    pub title: String,
    pub schedule_date: String,
    /// `HH:MM` as entered; normalized to `HH:MM:SS` on the wire
    pub schedule_time: Option<String>,
    pub schedule_category_id: Option<String>,
    pub has_finance: bool,
    pub finance_type: Option<FinanceType>,
    pub amount: Option<i64>,
    pub finance_category_id: Option<String>,
    pub is_receivable: bool,
    pub memo: Option<String>,
}

/// Wire body for schedule inserts/replaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulePayload {
    pub user_id: String,
    pub title: String,
    pub schedule_date: String,
    pub schedule_time: Option<String>,
    pub schedule_category_id: Option<String>,
    pub has_finance: bool,
    pub finance_type: Option<FinanceType>,
    pub amount: Option<i64>,
    pub finance_category_id: Option<String>,
    pub is_receivable: bool,
    pub memo: Option<String>,
}

impl NewSchedule {
    /// Normalize the form payload into its wire shape: a present time gains
    /// a `:00` seconds suffix, and every finance field is nulled out when
    /// the finance flag is off.
    pub fn to_payload(&self, user_id: &str) -> SchedulePayload {
        let schedule_time = self
            .schedule_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(|t| if t.len() == 5 { format!("{}:00", t) } else { t.to_string() });

        let (finance_type, amount, finance_category_id, is_receivable) = if self.has_finance {
            (
                self.finance_type,
                self.amount,
                self.finance_category_id.clone().filter(|id| !id.is_empty()),
                self.is_receivable,
            )
        } else {
            (None, None, None, false)
        };

        SchedulePayload {
            user_id: user_id.to_string(),
            title: self.title.clone(),
            schedule_date: self.schedule_date.clone(),
            schedule_time,
            schedule_category_id: self.schedule_category_id.clone().filter(|id| !id.is_empty()),
            has_finance: self.has_finance,
            finance_type,
            amount,
            finance_category_id,
            is_receivable,
            memo: self.memo.clone().filter(|m| !m.trim().is_empty()),
        }
    }

    /// Client-side validation, run before any request is issued.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push(ValidationError::EmptyTitle);
        }
        if NaiveDate::parse_from_str(&self.schedule_date, "%Y-%m-%d").is_err() {
            errors.push(ValidationError::InvalidDate(self.schedule_date.clone()));
        }
        if self.has_finance {
            if self.finance_type.is_none() {
                errors.push(ValidationError::MissingFinanceType);
            }
            match self.amount {
                None => errors.push(ValidationError::MissingAmount),
                Some(a) if a < 0 => errors.push(ValidationError::NegativeAmount(a)),
                Some(_) => {}
            }
        }

        errors
    }
}

/// Validation errors surfaced inline on the schedule form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    EmptyTitle,
    InvalidDate(String),
    MissingFinanceType,
    MissingAmount,
    NegativeAmount(i64),
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyTitle => write!(f, "제목을 입력하세요."),
            ValidationError::InvalidDate(d) => write!(f, "잘못된 날짜입니다: {}", d),
            ValidationError::MissingFinanceType => write!(f, "금액 유형을 선택하세요."),
            ValidationError::MissingAmount => write!(f, "금액을 입력하세요."),
            ValidationError::NegativeAmount(_) => write!(f, "금액은 0 이상이어야 합니다."),
        }
    }
}

impl std::error::Error for ValidationError {}
