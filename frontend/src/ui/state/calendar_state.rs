//! # Calendar View State Module
//!
//! State owned by the calendar screen that is not part of the schedule
//! cache itself: day selection, search, and the year/month picker.
//!
//! ## Responsibilities:
//! - Currently selected day (drives the day-agenda list)
//! - Free-text search query and whether the search bar is open
//! - Year/month picker popup state
//! - The grid geometry of the last rendered frame (for pointer hit tests)

use crate::ui::components::calendar_grid::GridGeometry;
use chrono::{Datelike, NaiveDate};

#[derive(Debug)]
pub struct CalendarViewState {
    /// Day whose agenda list is shown next to the grid
    pub selected_day: NaiveDate,
    /// Free-text filter over title/memo/category name
    pub search_query: String,
    /// Whether the toolbar is in search mode
    pub search_open: bool,
    /// Year/month picker popup
    pub picker_open: bool,
    pub picker_year: i32,
    pub picker_month: u32,
    /// Geometry of the month grid as last rendered; lets the raw pointer
    /// stream resolve a release position back to a day cell
    pub grid_geometry: Option<GridGeometry>,
}

impl CalendarViewState {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            selected_day: today,
            search_query: String::new(),
            search_open: false,
            picker_open: false,
            picker_year: today.year(),
            picker_month: today.month(),
            grid_geometry: None,
        }
    }

    /// Sync the picker dropdown to the month actually on screen.
    pub fn open_picker(&mut self, year: i32, month: u32) {
        self.picker_open = true;
        self.picker_year = year;
        self.picker_month = month;
    }

    pub fn close_search(&mut self) {
        self.search_open = false;
        self.search_query.clear();
    }
}

/// Shift a (year, month) pair by a month delta, rolling years as needed.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year as i64 * 12 + (month as i64 - 1) + delta as i64;
    let new_year = total.div_euclid(12) as i32;
    let new_month = (total.rem_euclid(12) + 1) as u32;
    (new_year, new_month)
}
