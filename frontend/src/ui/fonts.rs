//! Korean-capable font setup.
//!
//! The bundled egui fonts carry no CJK glyphs, so titles and labels would
//! render as boxes. This scans a few well-known system font locations and
//! installs the first match as the proportional fallback; when nothing is
//! found the default fonts stay untouched.

use eframe::egui;
use log::{info, warn};

const CANDIDATE_FONTS: &[&str] = &[
    // Linux (Nanum / Noto)
    "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    // macOS
    "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    // Windows
    "C:\\Windows\\Fonts\\malgun.ttf",
];

/// Install a Korean-capable system font as fallback, if one exists.
pub fn install_korean_fallback(ctx: &egui::Context) {
    let Some((path, bytes)) = CANDIDATE_FONTS
        .iter()
        .find_map(|path| std::fs::read(path).ok().map(|bytes| (*path, bytes)))
    else {
        warn!("🔤 No Korean system font found; falling back to bundled fonts");
        return;
    };

    info!("🔤 Using Korean font fallback: {}", path);

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert("korean".to_string(), egui::FontData::from_owned(bytes));
    if let Some(family) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
        family.push("korean".to_string());
    }
    if let Some(family) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
        family.push("korean".to_string());
    }
    ctx.set_fonts(fonts);
}
