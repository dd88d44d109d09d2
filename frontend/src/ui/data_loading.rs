//! # Data Loading Module
//!
//! Bridges the UI to the backend boundary. Requests run on worker threads
//! (backend calls are blocking and must never stall the frame loop) and
//! report back over an mpsc channel drained at the top of each frame.
//!
//! ## Data Flow:
//! 1. UI triggers a request (navigation, pull-to-refresh, form submit)
//! 2. A worker thread performs the call against `ScheduleApi`
//! 3. The result arrives as a `BackendEvent` on the channel
//! 4. `process_backend_events` folds it into store/modal/ui state
//!
//! In-flight requests are never cancelled; superseded month responses are
//! detected by their `FetchTicket` and dropped by the store.

use std::sync::Arc;
use std::thread;

use log::{info, warn};
use shared::{FinanceCategory, ScheduleCategory, ScheduleRecord};

use crate::api::ApiError;
use crate::store::FetchTicket;
use crate::ui::app_state::BizflowApp;
use crate::ui::state::Overlay;

/// One completed backend call.
#[derive(Debug)]
pub enum BackendEvent {
    MonthLoaded {
        ticket: FetchTicket,
        result: Result<Vec<ScheduleRecord>, ApiError>,
    },
    CategoriesLoaded {
        result: Result<(Vec<ScheduleCategory>, Vec<FinanceCategory>), ApiError>,
    },
    ScheduleCreated {
        result: Result<ScheduleRecord, ApiError>,
    },
    ScheduleUpdated {
        result: Result<ScheduleRecord, ApiError>,
    },
    ScheduleDeleted {
        id: String,
        result: Result<(), ApiError>,
    },
    DetailLoaded {
        id: String,
        result: Result<ScheduleRecord, ApiError>,
    },
}

impl BizflowApp {
    /// Fetch one month's schedules into the store.
    pub fn fetch_month(&mut self, year: i32, month: u32) {
        let ticket = self.store.begin_fetch(year, month);
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = api.fetch_month(ticket.year, ticket.month);
            let _ = tx.send(BackendEvent::MonthLoaded { ticket, result });
        });
    }

    /// Re-fetch whatever month is on screen (retry button, pull-to-refresh).
    pub fn refresh_current_month(&mut self) {
        let (year, month) = (self.store.current_year, self.store.current_month);
        info!("🔄 Refreshing {}-{:02}", year, month);
        self.fetch_month(year, month);
    }

    /// Load both category lists (sort_order ascending) once at startup.
    pub fn load_categories(&mut self) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = api
                .list_schedule_categories()
                .and_then(|schedule| api.list_finance_categories().map(|finance| (schedule, finance)));
            let _ = tx.send(BackendEvent::CategoriesLoaded { result });
        });
    }

    /// Validate and submit the open schedule form. Validation failures stay
    /// inline; no request is issued for them.
    pub fn submit_form(&mut self) {
        let Some(form) = self.modal.form.as_mut() else {
            return;
        };
        let new = match form.to_new_schedule() {
            Ok(new) => new,
            Err(message) => {
                form.error = Some(message);
                return;
            }
        };
        form.error = None;
        form.submitting = true;
        let mode = form.mode.clone();

        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || match mode {
            crate::ui::state::FormMode::Create => {
                let result = api.create_schedule(&new);
                let _ = tx.send(BackendEvent::ScheduleCreated { result });
            }
            crate::ui::state::FormMode::Edit(id) => {
                let result = api.update_schedule(&id, &new);
                let _ = tx.send(BackendEvent::ScheduleUpdated { result });
            }
        });
    }

    /// Delete a schedule by id (detail view action).
    pub fn request_delete(&mut self, id: String) {
        if let Some(detail) = self.modal.detail.as_mut() {
            detail.deleting = true;
            detail.error = None;
        }
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = api.delete_schedule(&id);
            let _ = tx.send(BackendEvent::ScheduleDeleted { id, result });
        });
    }

    /// Load a single record for the detail view.
    pub fn request_detail(&mut self, id: String) {
        let api = Arc::clone(&self.api);
        let tx = self.events_tx.clone();
        thread::spawn(move || {
            let result = api.fetch_schedule(&id);
            let _ = tx.send(BackendEvent::DetailLoaded { id, result });
        });
    }

    /// Drain every completed backend call into app state.
    pub fn process_backend_events(&mut self) {
        loop {
            let event = match self.events_rx.try_recv() {
                Ok(event) => event,
                Err(_) => break,
            };
            self.handle_backend_event(event);
        }
    }

    fn handle_backend_event(&mut self, event: BackendEvent) {
        match event {
            BackendEvent::MonthLoaded { ticket, result } => {
                self.store.apply_fetch(&ticket, result);
            }

            BackendEvent::CategoriesLoaded { result } => match result {
                Ok((schedule, finance)) => {
                    info!(
                        "🏷️ Loaded {} schedule / {} finance categories",
                        schedule.len(),
                        finance.len()
                    );
                    self.schedule_categories = schedule;
                    self.finance_categories = finance;
                    self.ui.loading = false;
                }
                Err(e) => {
                    warn!("❌ Category load failed: {}", e);
                    self.ui.loading = false;
                    self.ui.set_error(e.to_string());
                }
            },

            BackendEvent::ScheduleCreated { result } => match result {
                Ok(record) => {
                    self.store.add_schedule(record);
                    self.modal.close();
                    self.ui.set_success("일정이 등록되었습니다.".to_string());
                }
                Err(e) => {
                    if let Some(form) = self.modal.form.as_mut() {
                        form.submitting = false;
                        form.error = Some(e.to_string());
                    }
                }
            },

            BackendEvent::ScheduleUpdated { result } => match result {
                Ok(record) => {
                    self.store.update_schedule(record.clone());
                    // If the edit was opened from a detail view, fall back
                    // to it with the fresh record
                    if let Some(detail) = self.modal.detail.as_mut() {
                        if detail.schedule_id == record.schedule.id {
                            detail.record = Some(record);
                            self.modal.form = None;
                            self.modal.active = Some(Overlay::ScheduleDetail);
                            self.ui.set_success("일정이 수정되었습니다.".to_string());
                            return;
                        }
                    }
                    self.modal.close();
                    self.ui.set_success("일정이 수정되었습니다.".to_string());
                }
                Err(e) => {
                    if let Some(form) = self.modal.form.as_mut() {
                        form.submitting = false;
                        form.error = Some(e.to_string());
                    }
                }
            },

            BackendEvent::ScheduleDeleted { id, result } => match result {
                Ok(()) => {
                    self.store.remove_schedule(&id);
                    self.modal.close();
                    self.ui.set_success("일정이 삭제되었습니다.".to_string());
                }
                Err(e) => {
                    if let Some(detail) = self.modal.detail.as_mut() {
                        detail.deleting = false;
                        detail.error = Some(e.to_string());
                    }
                }
            },

            BackendEvent::DetailLoaded { id, result } => {
                let Some(detail) = self.modal.detail.as_mut() else {
                    return;
                };
                if detail.schedule_id != id {
                    // The user already navigated to a different record
                    return;
                }
                detail.loading = false;
                match result {
                    Ok(record) => detail.record = Some(record),
                    Err(ApiError::NotFound) => detail.not_found = true,
                    Err(e) => detail.error = Some(e.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ScheduleApi;
    use crate::settings::SettingsStore;
    use crate::ui::state::DetailState;
    use shared::{NewSchedule, Schedule};

    /// Backend double: canned month data, everything else unimplemented.
    struct FakeApi {
        records: Vec<ScheduleRecord>,
    }

    impl ScheduleApi for FakeApi {
        fn fetch_month(&self, _year: i32, _month: u32) -> Result<Vec<ScheduleRecord>, ApiError> {
            Ok(self.records.clone())
        }
        fn fetch_schedule(&self, _id: &str) -> Result<ScheduleRecord, ApiError> {
            Err(ApiError::NotFound)
        }
        fn create_schedule(&self, _new: &NewSchedule) -> Result<ScheduleRecord, ApiError> {
            Err(ApiError::AuthRequired)
        }
        fn update_schedule(&self, _id: &str, _f: &NewSchedule) -> Result<ScheduleRecord, ApiError> {
            Err(ApiError::AuthRequired)
        }
        fn delete_schedule(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }
        fn list_schedule_categories(&self) -> Result<Vec<ScheduleCategory>, ApiError> {
            Ok(Vec::new())
        }
        fn list_finance_categories(&self) -> Result<Vec<FinanceCategory>, ApiError> {
            Ok(Vec::new())
        }
    }

    fn record(id: &str, date: &str) -> ScheduleRecord {
        ScheduleRecord {
            schedule: Schedule {
                id: id.to_string(),
                user_id: "u-1".to_string(),
                title: "일정".to_string(),
                schedule_date: date.to_string(),
                schedule_time: None,
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
            schedule_category: None,
            finance_category: None,
        }
    }

    fn app_with(records: Vec<ScheduleRecord>) -> (BizflowApp, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let settings = SettingsStore::load(dir.path().join("settings.json"));
        let api = Arc::new(FakeApi { records });
        (BizflowApp::new(api, settings), dir)
    }

    #[test]
    fn test_created_record_lands_in_store_and_closes_form() {
        let (mut app, _dir) = app_with(Vec::new());
        let date = format!(
            "{}-{:02}-10",
            app.store.current_year, app.store.current_month
        );
        app.open_create_form(chrono::Local::now().date_naive());

        app.handle_backend_event(BackendEvent::ScheduleCreated {
            result: Ok(record("s-1", &date)),
        });

        assert_eq!(app.store.schedules().len(), 1);
        assert!(app.modal.active.is_none());
        assert!(app.ui.success_message.is_some());
    }

    #[test]
    fn test_create_failure_stays_on_form() {
        let (mut app, _dir) = app_with(Vec::new());
        app.open_create_form(chrono::Local::now().date_naive());

        app.handle_backend_event(BackendEvent::ScheduleCreated {
            result: Err(ApiError::Backend("check constraint".to_string())),
        });

        let form = app.modal.form.as_ref().unwrap();
        assert!(!form.submitting);
        assert!(form.error.is_some());
        // Local state untouched: no optimistic apply to roll back
        assert!(app.store.schedules().is_empty());
    }

    #[test]
    fn test_delete_removes_and_closes_detail() {
        let (mut app, _dir) = app_with(Vec::new());
        let ticket = app.store.begin_fetch(2024, 5);
        app.store.apply_fetch(&ticket, Ok(vec![record("s-1", "2024-05-10")]));
        app.modal.open_detail(DetailState::loading_for("s-1".to_string()));

        app.handle_backend_event(BackendEvent::ScheduleDeleted {
            id: "s-1".to_string(),
            result: Ok(()),
        });

        assert!(app.store.schedules().is_empty());
        assert!(app.modal.active.is_none());
    }

    #[test]
    fn test_detail_not_found_is_distinct_state() {
        let (mut app, _dir) = app_with(Vec::new());
        app.modal.open_detail(DetailState::loading_for("gone".to_string()));

        app.handle_backend_event(BackendEvent::DetailLoaded {
            id: "gone".to_string(),
            result: Err(ApiError::NotFound),
        });

        let detail = app.modal.detail.as_ref().unwrap();
        assert!(detail.not_found);
        assert_eq!(detail.error, None);
    }

    #[test]
    fn test_stale_detail_response_ignored() {
        let (mut app, _dir) = app_with(Vec::new());
        app.modal.open_detail(DetailState::loading_for("s-2".to_string()));

        // Response for a record the user already navigated away from
        app.handle_backend_event(BackendEvent::DetailLoaded {
            id: "s-1".to_string(),
            result: Ok(record("s-1", "2024-05-10")),
        });

        let detail = app.modal.detail.as_ref().unwrap();
        assert!(detail.loading);
        assert_eq!(detail.record, None);
    }

    #[test]
    fn test_fetch_month_round_trip_through_channel() {
        let (mut app, _dir) = app_with(vec![record("s-1", "2024-05-10")]);

        app.fetch_month(2024, 5);
        // The worker thread reports over the channel; wait for it
        let event = app
            .events_rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("worker result");
        app.handle_backend_event(event);

        assert_eq!(app.store.schedules().len(), 1);
        assert!(!app.store.loading);
    }
}
