//! # Theme Module
//!
//! Applies the persisted theme/accent settings to egui's visuals once per
//! frame, and owns hex-color parsing for category and accent colors.

use crate::settings::{Settings, ThemeMode};
use eframe::egui;

/// Parse `#RRGGBB` into a Color32; malformed input falls back to gray so a
/// bad category color never breaks rendering.
pub fn color_from_hex(hex: &str) -> egui::Color32 {
    let raw = hex.trim().trim_start_matches('#');
    if raw.len() != 6 {
        return egui::Color32::GRAY;
    }
    match (
        u8::from_str_radix(&raw[0..2], 16),
        u8::from_str_radix(&raw[2..4], 16),
        u8::from_str_radix(&raw[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => egui::Color32::from_rgb(r, g, b),
        _ => egui::Color32::GRAY,
    }
}

/// Apply theme + accent to the context. `System` leaves whatever visuals
/// the platform integration picked and only recolors the accents.
pub fn apply_theme(ctx: &egui::Context, settings: Settings) {
    let mut visuals = match settings.theme {
        ThemeMode::Light => egui::Visuals::light(),
        ThemeMode::Dark => egui::Visuals::dark(),
        ThemeMode::System => ctx.style().visuals.clone(),
    };

    let accent = color_from_hex(settings.accent.hex());
    visuals.selection.bg_fill = accent;
    visuals.selection.stroke = egui::Stroke::new(1.0, accent);
    visuals.hyperlink_color = accent;

    ctx.set_visuals(visuals);
}
