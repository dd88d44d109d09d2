//! # Calendar Grid Rendering
//!
//! Draws the month grid: weekday header, day cells with filler days, and
//! event chips. Chips come from the same filter/sort/projection pipeline
//! the agenda list uses, so the two views can never disagree about what is
//! visible.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use eframe::egui;
use shared::{display_color, format_event_title, visible_records};

use super::styling;
use super::types::{month_grid, DayCellKind, EventChip, GridGeometry};
use crate::ui::app_state::BizflowApp;
use crate::ui::components::theme::color_from_hex;

impl BizflowApp {
    /// Render the month grid and feed cell clicks into the gesture arbiter.
    pub fn render_calendar_grid(&mut self, ui: &mut egui::Ui) {
        let year = self.store.current_year;
        let month = self.store.current_month;
        let Some((first_cell, rows)) = month_grid(year, month) else {
            return;
        };

        // One shared pipeline for everything the grid shows
        let mode = self.store.display_mode();
        let visible = visible_records(self.store.schedules(), &self.calendar.search_query, mode);
        let mut chips_by_date: HashMap<NaiveDate, Vec<EventChip>> = HashMap::new();
        for record in &visible {
            let Some(date) = record.date() else { continue };
            chips_by_date.entry(date).or_default().push(EventChip {
                title: format_event_title(record, mode),
                color: color_from_hex(&display_color(record, mode)),
            });
        }

        let dark_mode = ui.visuals().dark_mode;
        let accent = color_from_hex(self.settings.accent().hex());
        let today = chrono::Local::now().date_naive();

        // Weekday header
        let width = ui.available_width();
        let (header_rect, _) = ui.allocate_exact_size(
            egui::vec2(width, styling::HEADER_HEIGHT),
            egui::Sense::hover(),
        );
        let col_width = width / 7.0;
        for (col, label) in styling::WEEKDAY_LABELS.iter().enumerate() {
            let pos = egui::pos2(
                header_rect.left() + col as f32 * col_width + col_width / 2.0,
                header_rect.center().y,
            );
            ui.painter().text(
                pos,
                egui::Align2::CENTER_CENTER,
                *label,
                egui::FontId::new(13.0, egui::FontFamily::Proportional),
                styling::weekday_color(col, dark_mode),
            );
        }

        // Day cells
        let grid_height = rows as f32 * styling::CELL_HEIGHT;
        let (grid_rect, _) =
            ui.allocate_exact_size(egui::vec2(width, grid_height), egui::Sense::hover());
        let geometry = GridGeometry {
            rect: grid_rect,
            first_cell,
            rows,
        };
        self.calendar.grid_geometry = Some(geometry);

        let mut tapped: Option<NaiveDate> = None;

        for row in 0..rows {
            for col in 0..7 {
                let date = geometry.date_of(row, col);
                let cell_rect = geometry.cell_rect(row, col).shrink(1.0);
                let kind = if date.month() == month && date.year() == year {
                    DayCellKind::CurrentMonth
                } else {
                    DayCellKind::FillerDay
                };
                let is_today = date == today;
                let is_selected = date == self.calendar.selected_day;

                let response = ui.interact(
                    cell_rect,
                    ui.id().with(("calendar_day", row, col)),
                    egui::Sense::click(),
                );

                let mut background = styling::cell_background(kind, is_today, dark_mode);
                if response.hovered() {
                    background = background.gamma_multiply(1.5);
                }
                ui.painter()
                    .rect_filled(cell_rect, egui::Rounding::same(3.0), background);
                ui.painter().rect_stroke(
                    cell_rect,
                    egui::Rounding::same(3.0),
                    styling::cell_border(is_selected, accent, dark_mode),
                );

                // Day number, upper left
                ui.painter().text(
                    cell_rect.min + egui::vec2(5.0, 3.0),
                    egui::Align2::LEFT_TOP,
                    date.day().to_string(),
                    egui::FontId::new(13.0, egui::FontFamily::Proportional),
                    styling::day_number_color(kind, col, dark_mode),
                );

                // Event chips, stacked below the day number
                if let Some(chips) = chips_by_date.get(&date) {
                    let budget = styling::chip_char_budget(cell_rect.width());
                    let mut chip_y = cell_rect.top() + 20.0;
                    for chip in chips.iter().take(styling::MAX_CHIPS) {
                        let chip_rect = egui::Rect::from_min_size(
                            egui::pos2(cell_rect.left() + 3.0, chip_y),
                            egui::vec2(cell_rect.width() - 6.0, styling::CHIP_HEIGHT),
                        );
                        ui.painter().rect_filled(
                            chip_rect,
                            egui::Rounding::same(3.0),
                            chip.color.gamma_multiply(0.9),
                        );
                        ui.painter().text(
                            chip_rect.left_center() + egui::vec2(3.0, 0.0),
                            egui::Align2::LEFT_CENTER,
                            styling::truncate_label(&chip.title, budget),
                            egui::FontId::new(10.0, egui::FontFamily::Proportional),
                            egui::Color32::WHITE,
                        );
                        chip_y += styling::CHIP_HEIGHT + 2.0;
                    }
                    if chips.len() > styling::MAX_CHIPS {
                        ui.painter().text(
                            egui::pos2(cell_rect.left() + 5.0, chip_y),
                            egui::Align2::LEFT_TOP,
                            format!("+{}개", chips.len() - styling::MAX_CHIPS),
                            egui::FontId::new(10.0, egui::FontFamily::Proportional),
                            egui::Color32::from_gray(if dark_mode { 160 } else { 110 }),
                        );
                    }
                }

                if response.clicked() {
                    tapped = Some(date);
                }
            }
        }

        // Grid-level click source; the container's pointer stream is the
        // second source and the arbiter de-duplicates between them
        if let Some(date) = tapped {
            let now_ms = ui.input(|i| i.time) * 1000.0;
            if let Some(action) = self.gesture.tap(date, now_ms) {
                self.dispatch_gesture(action);
            }
        }
    }
}
