//! # Schedule Detail
//!
//! Read view for one record: title with category badge, date/time rows,
//! finance card with the signed formatted amount, memo, and edit/delete
//! actions. A deleted or nonexistent id renders a dedicated not-found
//! state instead of a transient error.

use chrono::{Datelike, NaiveDate};
use eframe::egui;
use shared::{format_amount, FinanceType, ScheduleRecord};

use crate::ui::app_state::BizflowApp;
use crate::ui::components::theme::color_from_hex;

enum DetailAction {
    None,
    Close,
    Edit(Box<ScheduleRecord>),
    AskDelete,
    CancelDelete,
    ConfirmDelete(String),
}

impl BizflowApp {
    pub fn render_schedule_detail(&mut self, ctx: &egui::Context) {
        let Some(detail) = self.modal.detail.clone() else {
            return;
        };

        let mut action = DetailAction::None;

        egui::Window::new("일정 상세")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.set_min_width(340.0);

                if detail.loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(20.0);
                        ui.spinner();
                        ui.add_space(20.0);
                    });
                    return;
                }

                if detail.not_found {
                    ui.vertical_centered(|ui| {
                        ui.add_space(12.0);
                        ui.label("일정을 찾을 수 없습니다.");
                        ui.add_space(12.0);
                        if ui.button("닫기").clicked() {
                            action = DetailAction::Close;
                        }
                    });
                    return;
                }

                if let Some(error) = &detail.error {
                    ui.colored_label(egui::Color32::from_rgb(220, 60, 60), format!("❌ {}", error));
                }

                let Some(record) = &detail.record else {
                    if ui.button("닫기").clicked() {
                        action = DetailAction::Close;
                    }
                    return;
                };

                // Category badge + title
                ui.horizontal(|ui| {
                    let (name, color) = match &record.schedule_category {
                        Some(category) => (category.name.as_str(), category.color.as_str()),
                        None => ("미분류", shared::DEFAULT_CATEGORY_COLOR),
                    };
                    egui::Frame::none()
                        .fill(color_from_hex(color))
                        .rounding(egui::Rounding::same(4.0))
                        .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                        .show(ui, |ui| {
                            ui.colored_label(egui::Color32::WHITE, name);
                        });
                    ui.label(
                        egui::RichText::new(&record.schedule.title)
                            .font(egui::FontId::new(18.0, egui::FontFamily::Proportional))
                            .strong(),
                    );
                });
                ui.separator();

                egui::Grid::new("detail_info_grid")
                    .num_columns(2)
                    .spacing([16.0, 6.0])
                    .show(ui, |ui| {
                        ui.label("📅 날짜");
                        ui.label(format_detail_date(record));
                        ui.end_row();

                        if let Some(time) = record.time_hhmm() {
                            ui.label("🕐 시간");
                            ui.label(time);
                            ui.end_row();
                        }
                    });

                // Finance card
                if let Some(amount) = record.display_amount() {
                    ui.add_space(6.0);
                    let finance_type = record.schedule.finance_type;
                    let (sign, color) = match finance_type {
                        Some(FinanceType::Income) => ('+', shared::INCOME_GREEN),
                        _ => ('-', shared::EXPENSE_RED),
                    };
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.horizontal(|ui| {
                            ui.label("💰");
                            if let Some(finance_type) = finance_type {
                                ui.label(finance_type.label());
                            }
                            if record.schedule.is_receivable {
                                ui.label(egui::RichText::new("미수").weak());
                            }
                            ui.with_layout(
                                egui::Layout::right_to_left(egui::Align::Center),
                                |ui| {
                                    ui.colored_label(
                                        color_from_hex(color),
                                        egui::RichText::new(format!(
                                            "{}{}원",
                                            sign,
                                            format_amount(amount)
                                        ))
                                        .strong(),
                                    );
                                },
                            );
                        });
                        if let Some(finance_category) = &record.finance_category {
                            ui.label(egui::RichText::new(&finance_category.name).weak());
                        }
                    });
                }

                // Memo
                if let Some(memo) = &record.schedule.memo {
                    ui.add_space(6.0);
                    egui::Frame::group(ui.style()).show(ui, |ui| {
                        ui.label(egui::RichText::new("📝 메모").weak());
                        ui.label(memo);
                    });
                }

                ui.add_space(10.0);
                if detail.confirm_delete {
                    ui.horizontal(|ui| {
                        ui.label("이 일정을 삭제하시겠습니까?");
                        if ui
                            .add_enabled(!detail.deleting, egui::Button::new("삭제"))
                            .clicked()
                        {
                            action = DetailAction::ConfirmDelete(record.schedule.id.clone());
                        }
                        if ui.button("취소").clicked() {
                            action = DetailAction::CancelDelete;
                        }
                        if detail.deleting {
                            ui.spinner();
                        }
                    });
                } else {
                    ui.horizontal(|ui| {
                        if ui.button("✏ 수정").clicked() {
                            action = DetailAction::Edit(Box::new(record.clone()));
                        }
                        if ui.button("🗑 삭제").clicked() {
                            action = DetailAction::AskDelete;
                        }
                        if ui.button("닫기").clicked() {
                            action = DetailAction::Close;
                        }
                    });
                }
            });

        match action {
            DetailAction::None => {}
            DetailAction::Close => self.modal.close(),
            DetailAction::Edit(record) => self.open_edit_form(&record),
            DetailAction::AskDelete => {
                if let Some(detail) = self.modal.detail.as_mut() {
                    detail.confirm_delete = true;
                }
            }
            DetailAction::CancelDelete => {
                if let Some(detail) = self.modal.detail.as_mut() {
                    detail.confirm_delete = false;
                }
            }
            DetailAction::ConfirmDelete(id) => self.request_delete(id),
        }
    }
}

/// `yyyy년 M월 d일 (요일)` in the detail card.
fn format_detail_date(record: &ScheduleRecord) -> String {
    match record.date() {
        Some(date) => format!(
            "{}년 {}월 {}일 ({})",
            date.year(),
            date.month(),
            date.day(),
            weekday_short(date)
        ),
        None => record.schedule.schedule_date.clone(),
    }
}

fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Sun => "일",
        chrono::Weekday::Mon => "월",
        chrono::Weekday::Tue => "화",
        chrono::Weekday::Wed => "수",
        chrono::Weekday::Thu => "목",
        chrono::Weekday::Fri => "금",
        chrono::Weekday::Sat => "토",
    }
}
