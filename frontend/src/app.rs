//! # App Module
//!
//! Re-exports the application entry type so `main` can stay thin.

pub use crate::ui::app_state::BizflowApp;
