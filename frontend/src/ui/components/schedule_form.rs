//! # Schedule Form
//!
//! Create/edit modal. Validation runs before submission and failures stay
//! inline; the form only closes once the backend confirms the mutation.

use eframe::egui;
use egui_extras::DatePickerButton;
use shared::FinanceType;

use crate::ui::app_state::BizflowApp;
use crate::ui::state::{FormMode, Overlay};

impl BizflowApp {
    pub fn render_schedule_form(&mut self, ctx: &egui::Context) {
        let Some(mut form) = self.modal.form.take() else {
            return;
        };

        let mut submit = false;
        let mut cancel = false;
        let is_create = form.mode == FormMode::Create;
        let title = if is_create { "일정 등록" } else { "일정 수정" };

        egui::Window::new(title)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_min_width(360.0);

                if let Some(error) = &form.error {
                    ui.colored_label(egui::Color32::from_rgb(220, 60, 60), format!("❌ {}", error));
                    ui.add_space(4.0);
                }

                egui::Grid::new("schedule_form_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("제목 *");
                        ui.add(
                            egui::TextEdit::singleline(&mut form.title)
                                .hint_text("일정 제목을 입력하세요"),
                        );
                        ui.end_row();

                        ui.label("날짜 *");
                        ui.add(DatePickerButton::new(&mut form.date).id_source("form_date"));
                        ui.end_row();

                        ui.label("시간");
                        ui.horizontal(|ui| {
                            ui.checkbox(&mut form.has_time, "지정");
                            if form.has_time {
                                egui::ComboBox::from_id_source("form_hour")
                                    .selected_text(format!("{:02}시", form.hour))
                                    .width(60.0)
                                    .show_ui(ui, |ui| {
                                        for hour in 0..24u32 {
                                            ui.selectable_value(
                                                &mut form.hour,
                                                hour,
                                                format!("{:02}시", hour),
                                            );
                                        }
                                    });
                                egui::ComboBox::from_id_source("form_minute")
                                    .selected_text(format!("{:02}분", form.minute))
                                    .width(60.0)
                                    .show_ui(ui, |ui| {
                                        for minute in (0..60u32).step_by(5) {
                                            ui.selectable_value(
                                                &mut form.minute,
                                                minute,
                                                format!("{:02}분", minute),
                                            );
                                        }
                                    });
                            }
                        });
                        ui.end_row();

                        ui.label("카테고리");
                        let selected_name = form
                            .schedule_category_id
                            .as_ref()
                            .and_then(|id| {
                                self.schedule_categories
                                    .iter()
                                    .find(|c| &c.id == id)
                                    .map(|c| c.name.clone())
                            })
                            .unwrap_or_else(|| "선택하세요".to_string());
                        egui::ComboBox::from_id_source("form_schedule_category")
                            .selected_text(selected_name)
                            .show_ui(ui, |ui| {
                                for category in &self.schedule_categories {
                                    ui.selectable_value(
                                        &mut form.schedule_category_id,
                                        Some(category.id.clone()),
                                        &category.name,
                                    );
                                }
                            });
                        ui.end_row();
                    });

                ui.add_space(4.0);
                let mut has_finance = form.has_finance;
                if ui.checkbox(&mut has_finance, "금액 정보 추가").changed() {
                    form.set_has_finance(has_finance);
                }

                if form.has_finance {
                    egui::Grid::new("schedule_form_finance_grid")
                        .num_columns(2)
                        .spacing([12.0, 8.0])
                        .show(ui, |ui| {
                            ui.label("유형 *");
                            ui.horizontal(|ui| {
                                for finance_type in FinanceType::all() {
                                    if ui
                                        .selectable_label(
                                            form.finance_type == Some(finance_type),
                                            finance_type.label(),
                                        )
                                        .clicked()
                                    {
                                        form.set_finance_type(finance_type);
                                    }
                                }
                            });
                            ui.end_row();

                            ui.label("금액 *");
                            ui.add(
                                egui::TextEdit::singleline(&mut form.amount_input).hint_text("0"),
                            );
                            ui.end_row();

                            ui.label("미수");
                            ui.checkbox(&mut form.is_receivable, "");
                            ui.end_row();

                            // Finance categories are scoped to the chosen kind
                            if let Some(finance_type) = form.finance_type {
                                let options: Vec<_> = self
                                    .finance_categories
                                    .iter()
                                    .filter(|c| c.kind == finance_type)
                                    .collect();
                                if !options.is_empty() {
                                    ui.label("금액 카테고리");
                                    let selected_name = form
                                        .finance_category_id
                                        .as_ref()
                                        .and_then(|id| {
                                            options
                                                .iter()
                                                .find(|c| &c.id == id)
                                                .map(|c| c.name.clone())
                                        })
                                        .unwrap_or_else(|| "선택하세요".to_string());
                                    egui::ComboBox::from_id_source("form_finance_category")
                                        .selected_text(selected_name)
                                        .show_ui(ui, |ui| {
                                            for category in options {
                                                ui.selectable_value(
                                                    &mut form.finance_category_id,
                                                    Some(category.id.clone()),
                                                    &category.name,
                                                );
                                            }
                                        });
                                    ui.end_row();
                                }
                            }
                        });
                }

                ui.add_space(4.0);
                ui.label("메모");
                ui.add(
                    egui::TextEdit::multiline(&mut form.memo)
                        .hint_text("메모를 입력하세요")
                        .desired_rows(3),
                );

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    let submit_label = if form.submitting {
                        "저장 중..."
                    } else if is_create {
                        "등록하기"
                    } else {
                        "수정하기"
                    };
                    if ui
                        .add_enabled(!form.submitting, egui::Button::new(submit_label))
                        .clicked()
                    {
                        submit = true;
                    }
                    if ui.button("취소").clicked() {
                        cancel = true;
                    }
                    if form.submitting {
                        ui.spinner();
                    }
                });
            });

        self.modal.form = Some(form);
        if submit {
            self.submit_form();
        } else if cancel {
            self.cancel_form();
        }
    }

    /// Leave the form: back to the detail view when the edit came from
    /// there, otherwise back to the calendar.
    fn cancel_form(&mut self) {
        self.modal.form = None;
        if self.modal.detail.is_some() {
            self.modal.active = Some(Overlay::ScheduleDetail);
        } else {
            self.modal.close();
        }
    }
}
