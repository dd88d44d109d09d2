//! # Calendar Toolbar
//!
//! Month label with a year/month picker, the schedule/finance mode switch,
//! search toggle, add button, and the settings entry point. Collapses into
//! a single search field while search is open, mirroring the two toolbar
//! modes of the original.

use eframe::egui;
use shared::DisplayMode;

use crate::ui::app_state::BizflowApp;

impl BizflowApp {
    pub fn render_toolbar(&mut self, ui: &mut egui::Ui) {
        if self.calendar.search_open {
            self.render_search_bar(ui);
            return;
        }

        ui.horizontal(|ui| {
            // Left: current month + picker toggle
            let label = format!(
                "{}년 {}월 ▾",
                self.store.current_year, self.store.current_month
            );
            let month_button = egui::Button::new(
                egui::RichText::new(label)
                    .font(egui::FontId::new(17.0, egui::FontFamily::Proportional))
                    .strong(),
            )
            .frame(false);
            if ui.add(month_button).clicked() {
                if self.calendar.picker_open {
                    self.calendar.picker_open = false;
                } else {
                    self.calendar
                        .open_picker(self.store.current_year, self.store.current_month);
                }
            }
            ui.label(
                egui::RichText::new(format!("{}건", self.store.events().len())).weak(),
            );

            // Right: settings, add, search, mode switch
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⚙").on_hover_text("설정").clicked() {
                    self.modal.open_settings();
                }
                if ui.button("➕").on_hover_text("일정 등록").clicked() {
                    let date = self.calendar.selected_day;
                    self.open_create_form(date);
                }
                if ui.button("🔍").on_hover_text("검색").clicked() {
                    self.calendar.search_open = true;
                }

                ui.add_space(8.0);

                let finance_active = self.store.display_mode() == DisplayMode::FinanceOnly;
                if ui
                    .selectable_label(finance_active, "💰 가계부")
                    .on_hover_text("가계부 보기")
                    .clicked()
                {
                    self.store.set_display_mode(DisplayMode::FinanceOnly);
                }
                if ui
                    .selectable_label(!finance_active, "📅 일정")
                    .on_hover_text("일정 보기")
                    .clicked()
                {
                    self.store.set_display_mode(DisplayMode::Schedule);
                }
            });
        });

        if self.calendar.picker_open {
            self.render_month_picker(ui.ctx().clone());
        }
    }

    fn render_search_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("🔍");
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.calendar.search_query)
                    .hint_text("일정 검색...")
                    .desired_width(ui.available_width() - 40.0),
            );
            response.request_focus();
            if ui.button("✖").clicked() {
                self.calendar.close_search();
            }
        });
    }

    fn render_month_picker(&mut self, ctx: egui::Context) {
        use chrono::Datelike;
        let current_year = chrono::Local::now().date_naive().year();
        let mut go = false;
        let mut close = false;

        egui::Window::new("월 이동")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_TOP, egui::vec2(0.0, 60.0))
            .show(&ctx, |ui| {
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_source("picker_year")
                        .selected_text(format!("{}년", self.calendar.picker_year))
                        .show_ui(ui, |ui| {
                            for year in (current_year - 5)..(current_year + 5) {
                                ui.selectable_value(
                                    &mut self.calendar.picker_year,
                                    year,
                                    format!("{}년", year),
                                );
                            }
                        });
                    egui::ComboBox::from_id_source("picker_month")
                        .selected_text(format!("{}월", self.calendar.picker_month))
                        .show_ui(ui, |ui| {
                            for month in 1..=12u32 {
                                ui.selectable_value(
                                    &mut self.calendar.picker_month,
                                    month,
                                    format!("{}월", month),
                                );
                            }
                        });
                });
                ui.horizontal(|ui| {
                    if ui.button("이동").clicked() {
                        go = true;
                    }
                    if ui.button("취소").clicked() {
                        close = true;
                    }
                });
            });

        if go {
            let (year, month) = (self.calendar.picker_year, self.calendar.picker_month);
            self.calendar.picker_open = false;
            self.navigate_to(year, month);
        } else if close {
            self.calendar.picker_open = false;
        }
    }

    /// Inline feedback row: fetch errors with a retry button, mutation
    /// success/error messages with a dismiss control.
    pub fn render_messages(&mut self, ui: &mut egui::Ui) {
        let mut retry = false;
        if let Some(error) = self.store.error.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 60, 60), format!("❌ {}", error));
                if ui.button("다시 시도").clicked() {
                    retry = true;
                }
            });
        }
        if retry {
            self.refresh_current_month();
        }

        let mut dismiss = false;
        if let Some(error) = self.ui.error_message.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(220, 60, 60), format!("❌ {}", error));
                if ui.small_button("✖").clicked() {
                    dismiss = true;
                }
            });
        }
        if let Some(success) = self.ui.success_message.clone() {
            ui.horizontal(|ui| {
                ui.colored_label(egui::Color32::from_rgb(60, 160, 90), format!("✅ {}", success));
                if ui.small_button("✖").clicked() {
                    dismiss = true;
                }
            });
        }
        if dismiss {
            self.ui.clear_messages();
        }
    }
}
