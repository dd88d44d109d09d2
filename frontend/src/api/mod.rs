//! # API Module
//!
//! This module is the boundary to the external managed backend. Persistent
//! storage, query execution, and authentication all live on the other side
//! of this seam; the client only carries thin typed wrappers.
//!
//! ## Responsibilities:
//! - The `ScheduleApi` trait every data-touching part of the app talks to
//! - The active-user `Session` threaded explicitly into requests
//! - The `ApiError` taxonomy the UI maps onto user-facing states
//!
//! ## Purpose:
//! Keeping the backend behind a trait lets tests drive the store and UI with
//! an in-memory fake instead of a live service, and keeps the ambient
//! "current session" an explicit value rather than a hidden global.

pub mod rest;

pub use rest::RestScheduleApi;

use shared::{FinanceCategory, NewSchedule, ScheduleCategory, ScheduleRecord};
use thiserror::Error;

/// Authenticated-user context, obtained from the external auth provider and
/// passed explicitly into every client that mutates data.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user_id: String,
    pub access_token: String,
}

/// Errors surfaced by backend calls.
///
/// `NotFound` is deliberately distinct from `Backend`: a detail view for a
/// deleted id renders a "not found" state, not a transient-failure message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    #[error("로그인이 필요합니다.")]
    AuthRequired,
    #[error("네트워크 오류가 발생했습니다: {0}")]
    Network(String),
    #[error("요청이 거부되었습니다: {0}")]
    Backend(String),
    #[error("일정을 찾을 수 없습니다.")]
    NotFound,
    #[error("응답을 해석할 수 없습니다: {0}")]
    Decode(String),
}

/// Operations the external backend exposes to this client.
///
/// Implementations must be callable from worker threads; the UI never blocks
/// on these directly.
pub trait ScheduleApi: Send + Sync {
    /// All records whose date falls within the calendar month, ordered
    /// date asc then time asc, joined with category name/color and
    /// finance-category name/kind.
    fn fetch_month(&self, year: i32, month: u32) -> Result<Vec<ScheduleRecord>, ApiError>;

    /// One joined record by id. Missing ids are `ApiError::NotFound`.
    fn fetch_schedule(&self, id: &str) -> Result<ScheduleRecord, ApiError>;

    /// Insert a record; the backend assigns id and timestamps and returns
    /// the full joined record.
    fn create_schedule(&self, new: &NewSchedule) -> Result<ScheduleRecord, ApiError>;

    /// Full replace of a record's mutable fields; returns the joined record.
    fn update_schedule(&self, id: &str, fields: &NewSchedule) -> Result<ScheduleRecord, ApiError>;

    /// Delete by id; no content returned.
    fn delete_schedule(&self, id: &str) -> Result<(), ApiError>;

    /// Schedule categories for the session user, sort_order ascending.
    fn list_schedule_categories(&self) -> Result<Vec<ScheduleCategory>, ApiError>;

    /// Finance categories for the session user, sort_order ascending.
    fn list_finance_categories(&self) -> Result<Vec<FinanceCategory>, ApiError>;
}
