//! # Settings Panel
//!
//! Theme and accent selection. Every change writes through to the settings
//! file immediately; there is no separate save step.

use eframe::egui;

use crate::settings::{Accent, ThemeMode};
use crate::ui::app_state::BizflowApp;

impl BizflowApp {
    pub fn render_settings_panel(&mut self, ctx: &egui::Context) {
        let mut close = false;

        egui::Window::new("설정")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_min_width(260.0);

                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([16.0, 10.0])
                    .show(ui, |ui| {
                        ui.label("다크 모드");
                        let mut theme = self.settings.theme();
                        egui::ComboBox::from_id_source("settings_theme")
                            .selected_text(theme.label())
                            .show_ui(ui, |ui| {
                                for option in ThemeMode::all() {
                                    ui.selectable_value(&mut theme, option, option.label());
                                }
                            });
                        self.settings.set_theme(theme);
                        ui.end_row();

                        ui.label("포인트 컬러");
                        let mut accent = self.settings.accent();
                        egui::ComboBox::from_id_source("settings_accent")
                            .selected_text(accent.label())
                            .show_ui(ui, |ui| {
                                for option in Accent::all() {
                                    ui.selectable_value(&mut accent, option, option.label());
                                }
                            });
                        self.settings.set_accent(accent);
                        ui.end_row();
                    });

                ui.add_space(10.0);
                if ui.button("닫기").clicked() {
                    close = true;
                }
            });

        if close {
            self.modal.close();
        }
    }
}
