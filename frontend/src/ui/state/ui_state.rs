//! # UI State Module
//!
//! General user-feedback state that is not specific to any one component.
//!
//! ## Responsibilities:
//! - Startup loading flag (categories + first month fetch)
//! - Transient error/success messages shown under the toolbar

#[derive(Debug, Default)]
pub struct UiState {
    /// Whether the app is still performing its initial load
    pub loading: bool,

    /// Error message to display to the user
    pub error_message: Option<String>,

    /// Success message to display to the user
    pub success_message: Option<String>,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            loading: true, // Startup begins with a loading screen
            error_message: None,
            success_message: None,
        }
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    pub fn set_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    pub fn set_success(&mut self, message: String) {
        self.success_message = Some(message);
    }
}
