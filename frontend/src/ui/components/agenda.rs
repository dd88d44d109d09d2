//! # Day Agenda List
//!
//! The schedule list for the selected day, shown under the month grid. It
//! is computed from the raw record collection with the exact same search
//! and finance predicates the grid uses, so the two can never show
//! different subsets.

use chrono::{Datelike, NaiveDate, Weekday};
use eframe::egui;
use shared::{day_records, display_color, format_amount, FinanceType};

use crate::ui::app_state::BizflowApp;
use crate::ui::components::theme::color_from_hex;

fn korean_weekday(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "일요일",
        Weekday::Mon => "월요일",
        Weekday::Tue => "화요일",
        Weekday::Wed => "수요일",
        Weekday::Thu => "목요일",
        Weekday::Fri => "금요일",
        Weekday::Sat => "토요일",
    }
}

impl BizflowApp {
    pub fn render_day_agenda(&mut self, ui: &mut egui::Ui) {
        let date = self.calendar.selected_day;
        let date_str = date.format("%Y-%m-%d").to_string();
        let mode = self.store.display_mode();
        let items = day_records(
            self.store.schedules(),
            &date_str,
            &self.calendar.search_query,
            mode,
        );

        let mut open_detail: Option<String> = None;
        let mut create_new = false;

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(format!(
                    "{}월 {}일 ({})",
                    date.month(),
                    date.day(),
                    korean_weekday(date)
                ))
                .font(egui::FontId::new(15.0, egui::FontFamily::Proportional))
                .strong(),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(format!("{}건", items.len()));
            });
        });
        ui.separator();

        egui::ScrollArea::vertical()
            .id_source("day_agenda")
            .max_height(ui.available_height())
            .show(ui, |ui| {
                if items.is_empty() {
                    ui.add_space(8.0);
                    ui.vertical_centered(|ui| {
                        if ui.button("+ 등록하기").clicked() {
                            create_new = true;
                        }
                    });
                    return;
                }

                for record in &items {
                    let bar_color = color_from_hex(&display_color(record, mode));
                    let row = ui
                        .horizontal(|ui| {
                            // Category color bar
                            let (bar_rect, _) = ui.allocate_exact_size(
                                egui::vec2(4.0, 30.0),
                                egui::Sense::hover(),
                            );
                            ui.painter().rect_filled(
                                bar_rect,
                                egui::Rounding::same(2.0),
                                bar_color,
                            );

                            ui.label(
                                egui::RichText::new(
                                    record.time_hhmm().unwrap_or("종일").to_string(),
                                )
                                .font(egui::FontId::new(12.0, egui::FontFamily::Monospace))
                                .weak(),
                            );

                            ui.label(&record.schedule.title);

                            if let Some(amount) = record.display_amount() {
                                let (sign, color) = match record.schedule.finance_type {
                                    Some(FinanceType::Income) => ('+', shared::INCOME_GREEN),
                                    _ => ('-', shared::EXPENSE_RED),
                                };
                                ui.with_layout(
                                    egui::Layout::right_to_left(egui::Align::Center),
                                    |ui| {
                                        ui.colored_label(
                                            color_from_hex(color),
                                            format!("{}{}원", sign, format_amount(amount)),
                                        );
                                    },
                                );
                            }
                        })
                        .response;

                    if row.interact(egui::Sense::click()).clicked() {
                        open_detail = Some(record.schedule.id.clone());
                    }
                    ui.separator();
                }
            });

        if let Some(id) = open_detail {
            self.open_detail(id);
        }
        if create_new {
            self.open_create_form(date);
        }
    }
}
