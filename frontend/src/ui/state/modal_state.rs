//! # Modal State Module
//!
//! State for the overlays layered over the calendar: the create/edit form,
//! the schedule detail view, and the settings panel.
//!
//! ## Responsibilities:
//! - Which overlay is currently active (at most one)
//! - Schedule form fields, submission state, and inline errors
//! - Detail view record/loading/not-found state

use chrono::NaiveDate;
use shared::{FinanceType, NewSchedule, ScheduleRecord};

/// Overlays rendered above the calendar; at most one is open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    ScheduleForm,
    ScheduleDetail,
    Settings,
}

/// Whether the form creates a new record or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(String),
}

/// Editable schedule form fields plus submission state.
#[derive(Debug, Clone)]
pub struct ScheduleFormState {
    pub mode: FormMode,
    pub title: String,
    pub date: NaiveDate,
    /// Time is optional; when enabled the hour/minute spinners apply
    pub has_time: bool,
    pub hour: u32,
    pub minute: u32,
    pub schedule_category_id: Option<String>,
    pub has_finance: bool,
    pub finance_type: Option<FinanceType>,
    pub amount_input: String,
    pub finance_category_id: Option<String>,
    pub is_receivable: bool,
    pub memo: String,
    pub submitting: bool,
    pub error: Option<String>,
}

impl ScheduleFormState {
    /// Blank create form for the given day.
    pub fn for_create(date: NaiveDate, default_category: Option<String>) -> Self {
        Self {
            mode: FormMode::Create,
            title: String::new(),
            date,
            has_time: false,
            hour: 9,
            minute: 0,
            schedule_category_id: default_category,
            has_finance: false,
            finance_type: None,
            amount_input: String::new(),
            finance_category_id: None,
            is_receivable: false,
            memo: String::new(),
            submitting: false,
            error: None,
        }
    }

    /// Edit form prefilled from an existing record (full replace on save).
    pub fn for_edit(record: &ScheduleRecord) -> Self {
        let (has_time, hour, minute) = match record.time_hhmm() {
            Some(t) => {
                let hour = t[..2].parse().unwrap_or(0);
                let minute = t[3..5].parse().unwrap_or(0);
                (true, hour, minute)
            }
            None => (false, 9, 0),
        };

        Self {
            mode: FormMode::Edit(record.schedule.id.clone()),
            title: record.schedule.title.clone(),
            date: record.date().unwrap_or_else(|| chrono::Local::now().date_naive()),
            has_time,
            hour,
            minute,
            schedule_category_id: record.schedule.schedule_category_id.clone(),
            has_finance: record.schedule.has_finance,
            finance_type: record.schedule.finance_type,
            amount_input: record
                .schedule
                .amount
                .map(|a| a.to_string())
                .unwrap_or_default(),
            finance_category_id: record.schedule.finance_category_id.clone(),
            is_receivable: record.schedule.is_receivable,
            memo: record.schedule.memo.clone().unwrap_or_default(),
            submitting: false,
            error: None,
        }
    }

    /// Un-checking the finance box clears every dependent field, exactly as
    /// toggling the checkbox does on the original form.
    pub fn set_has_finance(&mut self, has_finance: bool) {
        self.has_finance = has_finance;
        if !has_finance {
            self.finance_type = None;
            self.amount_input.clear();
            self.finance_category_id = None;
            self.is_receivable = false;
        }
    }

    /// Changing the finance type invalidates the chosen finance category
    /// (categories are kind-scoped).
    pub fn set_finance_type(&mut self, finance_type: FinanceType) {
        if self.finance_type != Some(finance_type) {
            self.finance_type = Some(finance_type);
            self.finance_category_id = None;
        }
    }

    /// Assemble the request payload. Field-level problems come back as a
    /// message for the inline error slot; nothing is sent in that case.
    pub fn to_new_schedule(&self) -> Result<NewSchedule, String> {
        let amount = if self.has_finance {
            let raw = self.amount_input.trim();
            if raw.is_empty() {
                None
            } else {
                Some(
                    raw.replace(',', "")
                        .parse::<i64>()
                        .map_err(|_| format!("금액을 숫자로 입력하세요: {}", raw))?,
                )
            }
        } else {
            None
        };

        let new = NewSchedule {
            title: self.title.trim().to_string(),
            schedule_date: self.date.format("%Y-%m-%d").to_string(),
            schedule_time: self
                .has_time
                .then(|| format!("{:02}:{:02}", self.hour, self.minute)),
            schedule_category_id: self.schedule_category_id.clone(),
            has_finance: self.has_finance,
            finance_type: self.finance_type,
            amount,
            finance_category_id: self.finance_category_id.clone(),
            is_receivable: self.is_receivable,
            memo: (!self.memo.trim().is_empty()).then(|| self.memo.trim().to_string()),
        };

        let errors = new.validate();
        if let Some(first) = errors.first() {
            return Err(first.to_string());
        }
        Ok(new)
    }
}

/// Detail view state for one schedule id.
#[derive(Debug, Clone)]
pub struct DetailState {
    pub schedule_id: String,
    pub record: Option<ScheduleRecord>,
    pub loading: bool,
    /// Deleted/nonexistent id: rendered as its own state, not as a
    /// transient fetch error
    pub not_found: bool,
    pub error: Option<String>,
    pub deleting: bool,
    pub confirm_delete: bool,
}

impl DetailState {
    pub fn loading_for(schedule_id: String) -> Self {
        Self {
            schedule_id,
            record: None,
            loading: true,
            not_found: false,
            error: None,
            deleting: false,
            confirm_delete: false,
        }
    }
}

/// All overlay state grouped together.
#[derive(Debug, Default)]
pub struct ModalState {
    pub active: Option<Overlay>,
    pub form: Option<ScheduleFormState>,
    pub detail: Option<DetailState>,
}

impl ModalState {
    pub fn open_form(&mut self, form: ScheduleFormState) {
        self.form = Some(form);
        self.active = Some(Overlay::ScheduleForm);
    }

    pub fn open_detail(&mut self, detail: DetailState) {
        self.detail = Some(detail);
        self.active = Some(Overlay::ScheduleDetail);
    }

    pub fn open_settings(&mut self) {
        self.active = Some(Overlay::Settings);
    }

    pub fn close(&mut self) {
        self.active = None;
        self.form = None;
        self.detail = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ScheduleFormState {
        let mut f = ScheduleFormState::for_create(
            NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
            Some("cat-1".to_string()),
        );
        f.title = "회의".to_string();
        f
    }

    #[test]
    fn test_create_form_builds_payload_with_time() {
        let mut f = form();
        f.has_time = true;
        f.hour = 14;
        f.minute = 5;

        let new = f.to_new_schedule().unwrap();
        assert_eq!(new.schedule_date, "2024-05-15");
        assert_eq!(new.schedule_time.as_deref(), Some("14:05"));
    }

    #[test]
    fn test_unchecking_finance_clears_dependents() {
        let mut f = form();
        f.set_has_finance(true);
        f.set_finance_type(FinanceType::Expense);
        f.amount_input = "50000".to_string();
        f.finance_category_id = Some("fin-1".to_string());
        f.is_receivable = true;

        f.set_has_finance(false);
        assert_eq!(f.finance_type, None);
        assert!(f.amount_input.is_empty());
        assert_eq!(f.finance_category_id, None);
        assert!(!f.is_receivable);
    }

    #[test]
    fn test_changing_finance_type_resets_category() {
        let mut f = form();
        f.set_has_finance(true);
        f.set_finance_type(FinanceType::Expense);
        f.finance_category_id = Some("fin-expense".to_string());

        f.set_finance_type(FinanceType::Income);
        assert_eq!(f.finance_category_id, None);

        // Re-selecting the same type keeps the category
        f.finance_category_id = Some("fin-income".to_string());
        f.set_finance_type(FinanceType::Income);
        assert_eq!(f.finance_category_id.as_deref(), Some("fin-income"));
    }

    #[test]
    fn test_amount_parsing_accepts_grouped_digits() {
        let mut f = form();
        f.set_has_finance(true);
        f.set_finance_type(FinanceType::Expense);
        f.amount_input = "50,000".to_string();

        let new = f.to_new_schedule().unwrap();
        assert_eq!(new.amount, Some(50_000));
    }

    #[test]
    fn test_validation_failure_sends_nothing() {
        let mut f = form();
        f.title = "  ".to_string();
        assert!(f.to_new_schedule().is_err());

        let mut f = form();
        f.set_has_finance(true);
        // Finance enabled but type/amount missing
        assert!(f.to_new_schedule().is_err());
    }

    #[test]
    fn test_garbage_amount_is_rejected() {
        let mut f = form();
        f.set_has_finance(true);
        f.set_finance_type(FinanceType::Income);
        f.amount_input = "오만원".to_string();
        assert!(f.to_new_schedule().is_err());
    }
}
