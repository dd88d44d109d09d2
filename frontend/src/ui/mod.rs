//! # UI Module
//!
//! Central import point for the egui user interface: application state,
//! the main update loop, data loading, and all component renderers.

pub mod app_coordinator;
pub mod app_state;
pub mod components;
pub mod data_loading;
pub mod fonts;
pub mod state;

pub use app_state::*;
