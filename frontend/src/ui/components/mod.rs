//! UI component renderers. Each component is an `impl` block on
//! `BizflowApp` so it can read and mutate the state it owns.

pub mod agenda;
pub mod calendar_grid;
pub mod schedule_detail;
pub mod schedule_form;
pub mod settings_panel;
pub mod theme;
pub mod toolbar;
