//! Derivation of display-ready calendar events from raw schedule records.
//!
//! The grid and the day-agenda list render from the same raw collection, so
//! the title/color/filter logic lives here exactly once and both sides call
//! it. Events are recomputed from the record collection on every relevant
//! state change and are never persisted.

use crate::{FinanceType, ScheduleRecord};
use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Fallback color for records without a joined category.
pub const DEFAULT_CATEGORY_COLOR: &str = "#6366F1";
/// Income override in finance-only mode.
pub const INCOME_GREEN: &str = "#22C55E";
/// Expense/savings override in finance-only mode.
pub const EXPENSE_RED: &str = "#EF4444";

/// What the calendar is emphasizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisplayMode {
    /// Normal schedule view: titles with category colors.
    Schedule,
    /// Finance-only view: amounts emphasized, income/expense coloring.
    FinanceOnly,
}

/// A schedule record projected into a calendar-displayable shape.
///
/// `start`/`end` exist purely for grid layout: `end` is always one hour
/// after `start` and does not reflect any real duration.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: String,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub color: String,
    pub amount: Option<i64>,
    pub finance_type: Option<FinanceType>,
}

/// Format a non-negative amount with thousands separators (ko-KR grouping).
pub fn format_amount(amount: i64) -> String {
    let digits = amount.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0 {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

fn amount_suffix(record: &ScheduleRecord) -> Option<String> {
    let amount = record.display_amount()?;
    let sign = record
        .schedule
        .finance_type
        .map(|t| t.sign())
        .unwrap_or('-');
    Some(format!("{}{}원", sign, format_amount(amount)))
}

/// Display title for an event: `"HH:MM 제목 +1,000원"` with the time and
/// amount parts present only when the record carries them. In finance-only
/// mode financial records collapse to `"HH:MM +1,000원"`.
pub fn format_event_title(record: &ScheduleRecord, mode: DisplayMode) -> String {
    let time = record.time_hhmm();

    if mode == DisplayMode::FinanceOnly {
        if let Some(suffix) = amount_suffix(record) {
            return match time {
                Some(t) => format!("{} {}", t, suffix),
                None => suffix,
            };
        }
    }

    let mut title = match time {
        Some(t) => format!("{} {}", t, record.schedule.title),
        None => record.schedule.title.clone(),
    };
    if let Some(suffix) = amount_suffix(record) {
        title.push(' ');
        title.push_str(&suffix);
    }
    title
}

/// Display color for a record: its category color (default indigo), or the
/// income/expense override when the finance-only mode is active.
pub fn display_color(record: &ScheduleRecord, mode: DisplayMode) -> String {
    if mode == DisplayMode::FinanceOnly && record.schedule.has_finance {
        return match record.schedule.finance_type {
            Some(FinanceType::Income) => INCOME_GREEN.to_string(),
            _ => EXPENSE_RED.to_string(),
        };
    }
    record
        .schedule_category
        .as_ref()
        .map(|c| c.color.clone())
        .unwrap_or_else(|| DEFAULT_CATEGORY_COLOR.to_string())
}

/// Project one record into a calendar event. `None` when the record's date
/// does not parse (nothing sensible can be placed on the grid).
pub fn project_event(record: &ScheduleRecord, mode: DisplayMode) -> Option<CalendarEvent> {
    let date = record.date()?;
    let time = record
        .time_hhmm()
        .and_then(|t| NaiveTime::parse_from_str(t, "%H:%M").ok())
        .unwrap_or_else(|| NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    let start = date.and_time(time);

    Some(CalendarEvent {
        id: record.schedule.id.clone(),
        title: format_event_title(record, mode),
        start,
        end: start + Duration::hours(1),
        color: display_color(record, mode),
        amount: record.schedule.amount,
        finance_type: record.schedule.finance_type,
    })
}

/// Free-text search over title, memo, and joined category name.
/// A blank query matches everything.
pub fn matches_query(record: &ScheduleRecord, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    record.schedule.title.to_lowercase().contains(&query)
        || record
            .schedule
            .memo
            .as_deref()
            .is_some_and(|m| m.to_lowercase().contains(&query))
        || record
            .category_name()
            .is_some_and(|n| n.to_lowercase().contains(&query))
}

/// Finance-only visibility: finance flag set and a positive amount present.
pub fn finance_visible(record: &ScheduleRecord) -> bool {
    record.display_amount().is_some()
}

/// Ordering key: date string first (lexicographic is chronological for
/// zero-padded ISO dates), then time with `00:00` standing in for absent.
pub fn sort_key(record: &ScheduleRecord) -> (String, String) {
    (record.schedule.schedule_date.clone(), record.sort_time())
}

/// Sort a record collection in place by the shared ordering key.
pub fn sort_records(records: &mut [ScheduleRecord]) {
    records.sort_by_key(sort_key);
}

/// The grid's pipeline: search filter, then finance filter, then sort.
pub fn visible_records(
    records: &[ScheduleRecord],
    query: &str,
    mode: DisplayMode,
) -> Vec<ScheduleRecord> {
    let mut filtered: Vec<ScheduleRecord> = records
        .iter()
        .filter(|r| matches_query(r, query))
        .filter(|r| mode != DisplayMode::FinanceOnly || finance_visible(r))
        .cloned()
        .collect();
    sort_records(&mut filtered);
    filtered
}

/// The day-agenda's pipeline: same predicates as the grid, restricted to one
/// date, time-ordered.
pub fn day_records(
    records: &[ScheduleRecord],
    date: &str,
    query: &str,
    mode: DisplayMode,
) -> Vec<ScheduleRecord> {
    let mut filtered: Vec<ScheduleRecord> = records
        .iter()
        .filter(|r| r.schedule.schedule_date == date)
        .filter(|r| matches_query(r, query))
        .filter(|r| mode != DisplayMode::FinanceOnly || finance_visible(r))
        .cloned()
        .collect();
    filtered.sort_by_key(|r| r.sort_time());
    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CategoryRef, FinanceCategoryRef, Schedule};

    fn record(
        id: &str,
        date: &str,
        time: Option<&str>,
        title: &str,
        finance: Option<(FinanceType, i64)>,
    ) -> ScheduleRecord {
        ScheduleRecord {
            schedule: Schedule {
                id: id.to_string(),
                user_id: "u-1".to_string(),
                title: title.to_string(),
                schedule_date: date.to_string(),
                schedule_time: time.map(|t| format!("{}:00", t)),
                schedule_category_id: Some("cat-1".to_string()),
                has_finance: finance.is_some(),
                finance_type: finance.map(|(t, _)| t),
                amount: finance.map(|(_, a)| a),
                finance_category_id: None,
                is_receivable: false,
                memo: None,
                recurring_group_id: None,
                created_at: String::new(),
                updated_at: String::new(),
            },
            schedule_category: Some(CategoryRef {
                name: "업무".to_string(),
                color: "#8B5CF6".to_string(),
            }),
            finance_category: finance.map(|(t, _)| FinanceCategoryRef {
                name: "경비".to_string(),
                kind: t,
            }),
        }
    }

    #[test]
    fn test_format_amount_grouping() {
        assert_eq!(format_amount(0), "0");
        assert_eq!(format_amount(950), "950");
        assert_eq!(format_amount(50_000), "50,000");
        assert_eq!(format_amount(1_234_567), "1,234,567");
    }

    #[test]
    fn test_title_without_finance_has_no_amount_suffix() {
        let r = record("s-1", "2024-05-10", Some("09:00"), "출근", None);
        let title = format_event_title(&r, DisplayMode::Schedule);
        assert_eq!(title, "09:00 출근");
        assert!(!title.contains('원'));
    }

    #[test]
    fn test_title_signs_per_finance_type() {
        let income = record("s-1", "2024-05-10", None, "입금", Some((FinanceType::Income, 1000)));
        let expense = record("s-2", "2024-05-10", None, "지출", Some((FinanceType::Expense, 1000)));
        let savings = record("s-3", "2024-05-10", None, "적금", Some((FinanceType::Savings, 1000)));

        assert_eq!(format_event_title(&income, DisplayMode::Schedule), "입금 +1,000원");
        assert_eq!(format_event_title(&expense, DisplayMode::Schedule), "지출 -1,000원");
        assert_eq!(format_event_title(&savings, DisplayMode::Schedule), "적금 -1,000원");
    }

    #[test]
    fn test_finance_only_title_drops_schedule_title() {
        let r = record("s-1", "2024-05-10", Some("12:30"), "점심", Some((FinanceType::Expense, 12_000)));
        assert_eq!(
            format_event_title(&r, DisplayMode::FinanceOnly),
            "12:30 -12,000원"
        );

        // Without a time the title is just the signed amount
        let r = record("s-2", "2024-05-10", None, "점심", Some((FinanceType::Expense, 12_000)));
        assert_eq!(format_event_title(&r, DisplayMode::FinanceOnly), "-12,000원");
    }

    #[test]
    fn test_finance_only_falls_back_for_plain_schedules() {
        // Non-financial records keep their normal title even in finance mode
        let r = record("s-1", "2024-05-10", Some("09:00"), "출근", None);
        assert_eq!(format_event_title(&r, DisplayMode::FinanceOnly), "09:00 출근");
    }

    #[test]
    fn test_color_override_only_in_finance_mode() {
        let income = record("s-1", "2024-05-10", None, "입금", Some((FinanceType::Income, 1000)));
        let savings = record("s-2", "2024-05-10", None, "적금", Some((FinanceType::Savings, 1000)));
        let plain = record("s-3", "2024-05-10", None, "출근", None);

        assert_eq!(display_color(&income, DisplayMode::Schedule), "#8B5CF6");
        assert_eq!(display_color(&income, DisplayMode::FinanceOnly), INCOME_GREEN);
        assert_eq!(display_color(&savings, DisplayMode::FinanceOnly), EXPENSE_RED);
        assert_eq!(display_color(&plain, DisplayMode::FinanceOnly), "#8B5CF6");
    }

    #[test]
    fn test_default_color_without_category() {
        let mut r = record("s-1", "2024-05-10", None, "출근", None);
        r.schedule_category = None;
        assert_eq!(display_color(&r, DisplayMode::Schedule), DEFAULT_CATEGORY_COLOR);
    }

    #[test]
    fn test_projection_window_is_one_hour() {
        let r = record("s-1", "2024-05-15", Some("14:00"), "Meeting", Some((FinanceType::Expense, 50_000)));
        let event = project_event(&r, DisplayMode::Schedule).unwrap();

        assert_eq!(event.title, "14:00 Meeting -50,000원");
        assert_eq!(event.color, "#8B5CF6");
        assert_eq!(event.start.format("%Y-%m-%d %H:%M").to_string(), "2024-05-15 14:00");
        assert_eq!(event.end - event.start, Duration::hours(1));
    }

    #[test]
    fn test_projection_missing_time_is_midnight() {
        let r = record("s-1", "2024-05-15", None, "휴무", None);
        let event = project_event(&r, DisplayMode::Schedule).unwrap();
        assert_eq!(event.start.format("%H:%M").to_string(), "00:00");
    }

    #[test]
    fn test_projection_rejects_malformed_date() {
        let r = record("s-1", "not-a-date", None, "x", None);
        assert!(project_event(&r, DisplayMode::Schedule).is_none());
    }

    #[test]
    fn test_query_matches_title_memo_and_category() {
        let mut r = record("s-1", "2024-05-10", None, "프로젝트 회의", None);
        r.schedule.memo = Some("강남역 스타벅스".to_string());

        assert!(matches_query(&r, "회의"));
        assert!(matches_query(&r, "스타벅스"));
        assert!(matches_query(&r, "업무")); // category name
        assert!(matches_query(&r, ""));
        assert!(matches_query(&r, "   "));
        assert!(!matches_query(&r, "병원"));
    }

    #[test]
    fn test_visible_records_pipeline_order() {
        let records = vec![
            record("s-1", "2024-05-02", None, "무제", None),
            record("s-2", "2024-05-02", Some("09:00"), "아침 미팅", None),
            record("s-3", "2024-05-01", Some("23:00"), "야근", None),
        ];

        let visible = visible_records(&records, "", DisplayMode::Schedule);
        let ids: Vec<&str> = visible.iter().map(|r| r.schedule.id.as_str()).collect();
        assert_eq!(ids, vec!["s-3", "s-1", "s-2"]);
    }

    #[test]
    fn test_finance_only_filters_unfinanced_records() {
        let records = vec![
            record("s-1", "2024-05-02", None, "회의", None),
            record("s-2", "2024-05-02", None, "입금", Some((FinanceType::Income, 1000))),
        ];
        let visible = visible_records(&records, "", DisplayMode::FinanceOnly);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].schedule.id, "s-2");
    }

    #[test]
    fn test_day_records_restricted_and_time_sorted() {
        let records = vec![
            record("s-1", "2024-05-10", Some("18:00"), "저녁", None),
            record("s-2", "2024-05-10", None, "종일", None),
            record("s-3", "2024-05-11", Some("09:00"), "다음날", None),
        ];
        let day = day_records(&records, "2024-05-10", "", DisplayMode::Schedule);
        let ids: Vec<&str> = day.iter().map(|r| r.schedule.id.as_str()).collect();
        assert_eq!(ids, vec!["s-2", "s-1"]);
    }
}
