//! # App Coordinator Module
//!
//! The main `eframe::App` update loop:
//! 1. Fold completed backend calls into state
//! 2. Apply the persisted theme/accent
//! 3. Kick off the initial load on the first frame
//! 4. Render toolbar, messages, month grid, and day agenda
//! 5. Feed the raw pointer stream to the gesture arbiter
//! 6. Render whichever overlay is active

use eframe::egui;

use crate::ui::app_state::BizflowApp;
use crate::ui::components::theme;
use crate::ui::fonts;
use crate::ui::state::Overlay;

impl eframe::App for BizflowApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_backend_events();
        theme::apply_theme(ctx, self.settings.settings());

        if !self.started {
            self.started = true;
            fonts::install_korean_fallback(ctx);
            self.load_categories();
            self.refresh_current_month();
        }

        // Worker threads cannot wake the UI; poll while anything is in flight
        if self.store.loading || self.ui.loading {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.ui.loading {
                self.render_loading_screen(ui);
                return;
            }

            self.render_toolbar(ui);
            self.render_messages(ui);
            ui.add_space(6.0);

            self.render_calendar_grid(ui);
            if self.store.loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("로딩 중...");
                });
            }
            ui.add_space(8.0);

            self.render_day_agenda(ui);
        });

        // Raw pointer stream is the second gesture source; modal overlays
        // own the input while they are up
        if self.modal.active.is_none() {
            self.handle_pointer_gestures(ctx);
        }

        self.render_modals(ctx);
    }
}

impl BizflowApp {
    fn render_loading_screen(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(120.0);
            ui.spinner();
            ui.label("로딩 중...");
        });
    }

    fn render_modals(&mut self, ctx: &egui::Context) {
        match self.modal.active {
            Some(Overlay::ScheduleForm) => self.render_schedule_form(ctx),
            Some(Overlay::ScheduleDetail) => self.render_schedule_detail(ctx),
            Some(Overlay::Settings) => self.render_settings_panel(ctx),
            None => {}
        }
    }
}
