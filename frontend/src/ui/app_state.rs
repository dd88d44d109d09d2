//! # Core Application State
//!
//! The main application struct composing the schedule store, gesture
//! arbiter, settings, backend handle, and per-screen UI state.
//!
//! ## Responsibilities:
//! - Owning the single instances of store/arbiter/settings
//! - Routing classified gestures to store actions or overlays
//! - Month navigation

use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate};
use log::info;
use shared::{FinanceCategory, ScheduleCategory, ScheduleRecord};

use crate::api::ScheduleApi;
use crate::gesture::{GestureAction, GestureArbiter, GestureConfig};
use crate::settings::SettingsStore;
use crate::store::ScheduleStore;
use crate::ui::data_loading::BackendEvent;
use crate::ui::state::{
    CalendarViewState, DetailState, ModalState, ScheduleFormState, UiState,
};
use crate::ui::state::calendar_state::shift_month;

pub struct BizflowApp {
    /// External backend boundary
    pub api: Arc<dyn ScheduleApi>,
    /// Month-scoped schedule cache + derived events
    pub store: ScheduleStore,
    /// Single owner of gesture classification state
    pub gesture: GestureArbiter,
    /// Theme/accent, write-through persisted
    pub settings: SettingsStore,

    pub calendar: CalendarViewState,
    pub ui: UiState,
    pub modal: ModalState,

    pub schedule_categories: Vec<ScheduleCategory>,
    pub finance_categories: Vec<FinanceCategory>,

    /// Worker threads report back over this channel
    pub(crate) events_tx: Sender<BackendEvent>,
    pub(crate) events_rx: Receiver<BackendEvent>,
    /// Initial load kicked off on the first frame
    pub(crate) started: bool,
}

impl BizflowApp {
    pub fn new(api: Arc<dyn ScheduleApi>, settings: SettingsStore) -> Self {
        let today = chrono::Local::now().date_naive();
        let (events_tx, events_rx) = channel();

        Self {
            api,
            store: ScheduleStore::new(today.year(), today.month()),
            gesture: GestureArbiter::new(GestureConfig::default()),
            settings,
            calendar: CalendarViewState::new(today),
            ui: UiState::new(),
            modal: ModalState::default(),
            schedule_categories: Vec::new(),
            finance_categories: Vec::new(),
            events_tx,
            events_rx,
            started: false,
        }
    }

    /// Apply one classified gesture.
    pub fn dispatch_gesture(&mut self, action: GestureAction) {
        match action {
            GestureAction::Select(date) => {
                info!("📅 Selected day: {}", date);
                self.calendar.selected_day = date;
            }
            GestureAction::CreateNew(date) => {
                info!("📅 Create requested for: {}", date);
                self.calendar.selected_day = date;
                self.open_create_form(date);
            }
            GestureAction::NavigateMonth(delta) => self.navigate_months(delta),
            GestureAction::Refresh => self.refresh_current_month(),
        }
    }

    /// Move the visible month by a delta and fetch it.
    pub fn navigate_months(&mut self, delta: i32) {
        let (year, month) = shift_month(self.store.current_year, self.store.current_month, delta);
        self.navigate_to(year, month);
    }

    /// Jump to a specific month and fetch it (no-op when already there).
    pub fn navigate_to(&mut self, year: i32, month: u32) {
        if year == self.store.current_year && month == self.store.current_month {
            return;
        }
        self.store.set_current_date(year, month);
        self.fetch_month(year, month);
    }

    pub fn open_create_form(&mut self, date: NaiveDate) {
        let default_category = self.schedule_categories.first().map(|c| c.id.clone());
        self.modal
            .open_form(ScheduleFormState::for_create(date, default_category));
    }

    pub fn open_edit_form(&mut self, record: &ScheduleRecord) {
        self.modal.open_form(ScheduleFormState::for_edit(record));
    }

    pub fn open_detail(&mut self, schedule_id: String) {
        self.modal
            .open_detail(DetailState::loading_for(schedule_id.clone()));
        self.request_detail(schedule_id);
    }
}
