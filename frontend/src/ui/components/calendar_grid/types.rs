//! Grid layout math and the per-cell display structures.

use chrono::{Datelike, Duration, NaiveDate};
use eframe::egui;

/// Whether a cell belongs to the displayed month or pads the grid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayCellKind {
    CurrentMonth,
    FillerDay,
}

/// One event chip inside a day cell, already projected to display form.
#[derive(Debug, Clone)]
pub struct EventChip {
    pub title: String,
    pub color: egui::Color32,
}

/// Date of the grid's top-left cell and the number of week rows needed to
/// cover the month (Sunday-first).
pub fn month_grid(year: i32, month: u32) -> Option<(NaiveDate, usize)> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = first.weekday().num_days_from_sunday() as i64;
    let first_cell = first - Duration::days(offset);

    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let days_in_month = (next_first - first).num_days();
    let rows = ((offset + days_in_month) as usize).div_ceil(7);

    Some((first_cell, rows))
}

/// Where the grid landed on screen this frame. The container's raw pointer
/// stream uses this to resolve a release position back to a day cell, so
/// the same physical tap reaches the arbiter from both event sources.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub rect: egui::Rect,
    pub first_cell: NaiveDate,
    pub rows: usize,
}

impl GridGeometry {
    pub fn cell_size(&self) -> egui::Vec2 {
        egui::vec2(
            self.rect.width() / 7.0,
            self.rect.height() / self.rows as f32,
        )
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> egui::Rect {
        let size = self.cell_size();
        egui::Rect::from_min_size(
            egui::pos2(
                self.rect.left() + col as f32 * size.x,
                self.rect.top() + row as f32 * size.y,
            ),
            size,
        )
    }

    pub fn date_of(&self, row: usize, col: usize) -> NaiveDate {
        self.first_cell + Duration::days((row * 7 + col) as i64)
    }

    /// Day cell under a screen position, if any.
    pub fn date_at(&self, pos: egui::Pos2) -> Option<NaiveDate> {
        if !self.rect.contains(pos) {
            return None;
        }
        let size = self.cell_size();
        let col = (((pos.x - self.rect.left()) / size.x) as usize).min(6);
        let row = (((pos.y - self.rect.top()) / size.y) as usize).min(self.rows - 1);
        Some(self.date_of(row, col))
    }
}
