//! Shared sizing and color rules for the month grid.

use super::types::DayCellKind;
use eframe::egui;

/// Height of the weekday header row.
pub const HEADER_HEIGHT: f32 = 24.0;

/// Height of one week row.
pub const CELL_HEIGHT: f32 = 86.0;

/// Height of one event chip inside a cell.
pub const CHIP_HEIGHT: f32 = 16.0;

/// Chips shown per cell before the `+N개` overflow marker.
pub const MAX_CHIPS: usize = 3;

/// Sunday-first weekday labels.
pub const WEEKDAY_LABELS: [&str; 7] = ["일", "월", "화", "수", "목", "금", "토"];

/// Sundays red, Saturdays blue, weekdays neutral.
pub fn weekday_color(col: usize, dark_mode: bool) -> egui::Color32 {
    match col {
        0 => egui::Color32::from_rgb(225, 70, 70),
        6 => egui::Color32::from_rgb(80, 120, 230),
        _ if dark_mode => egui::Color32::from_gray(200),
        _ => egui::Color32::from_gray(70),
    }
}

pub fn cell_background(kind: DayCellKind, is_today: bool, dark_mode: bool) -> egui::Color32 {
    if is_today {
        return if dark_mode {
            egui::Color32::from_rgba_unmultiplied(90, 85, 40, 60)
        } else {
            egui::Color32::from_rgba_unmultiplied(255, 248, 220, 140)
        };
    }
    match (kind, dark_mode) {
        (DayCellKind::CurrentMonth, false) => egui::Color32::from_rgba_unmultiplied(255, 255, 255, 60),
        (DayCellKind::CurrentMonth, true) => egui::Color32::from_rgba_unmultiplied(255, 255, 255, 8),
        (DayCellKind::FillerDay, false) => egui::Color32::from_rgba_unmultiplied(150, 150, 150, 40),
        (DayCellKind::FillerDay, true) => egui::Color32::from_rgba_unmultiplied(0, 0, 0, 60),
    }
}

pub fn cell_border(is_selected: bool, accent: egui::Color32, dark_mode: bool) -> egui::Stroke {
    if is_selected {
        egui::Stroke::new(2.0, accent)
    } else if dark_mode {
        egui::Stroke::new(0.5, egui::Color32::from_gray(70))
    } else {
        egui::Stroke::new(0.5, egui::Color32::from_gray(190))
    }
}

pub fn day_number_color(kind: DayCellKind, col: usize, dark_mode: bool) -> egui::Color32 {
    match kind {
        DayCellKind::CurrentMonth => weekday_color(col, dark_mode),
        DayCellKind::FillerDay => egui::Color32::from_gray(if dark_mode { 110 } else { 160 }),
    }
}

/// Rough character budget for a chip label at the given cell width; chip
/// text is painted directly so it has to be pre-truncated.
pub fn chip_char_budget(cell_width: f32) -> usize {
    ((cell_width - 10.0) / 11.0).max(2.0) as usize
}

/// Truncate a label to the character budget, appending an ellipsis.
pub fn truncate_label(text: &str, budget: usize) -> String {
    if text.chars().count() <= budget {
        return text.to_string();
    }
    let mut out: String = text.chars().take(budget.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_label_respects_char_boundaries() {
        assert_eq!(truncate_label("회의", 5), "회의");
        assert_eq!(truncate_label("아주 긴 일정 제목입니다", 5), "아주 긴…");
    }
}
