//! State modules for the calendar UI, split by concern.

pub mod calendar_state;
pub mod modal_state;
pub mod ui_state;

pub use calendar_state::CalendarViewState;
pub use modal_state::{DetailState, FormMode, ModalState, Overlay, ScheduleFormState};
pub use ui_state::UiState;
