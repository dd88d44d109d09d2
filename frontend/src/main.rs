use std::sync::Arc;

use eframe::egui;
use log::{info, warn};

mod api;
mod app;
mod gesture;
mod settings;
mod store;
mod ui;

use api::{RestScheduleApi, ScheduleApi, Session};
use app::BizflowApp;
use settings::SettingsStore;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    info!("Starting bizflow calendar");

    // Backend endpoint + credentials come from the environment; the auth
    // provider that issues them is outside this app
    let base_url = std::env::var("BIZFLOW_API_URL")
        .unwrap_or_else(|_| "http://localhost:54321/rest/v1".to_string());
    let api_key = std::env::var("BIZFLOW_API_KEY").unwrap_or_default();
    let mut rest = RestScheduleApi::new(base_url, api_key);
    match (
        std::env::var("BIZFLOW_USER_ID"),
        std::env::var("BIZFLOW_ACCESS_TOKEN"),
    ) {
        (Ok(user_id), Ok(access_token)) => {
            rest = rest.with_session(Session {
                user_id,
                access_token,
            });
        }
        _ => warn!("🔒 No session in environment; mutations will require login"),
    }
    let api: Arc<dyn ScheduleApi> = Arc::new(rest);

    let settings_path = SettingsStore::default_path()
        .unwrap_or_else(|| std::path::PathBuf::from("bizflow-settings.json"));
    let settings = SettingsStore::load(settings_path);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 800.0])
            .with_min_inner_size([800.0, 600.0])
            .with_title("bizflow 캘린더")
            .with_resizable(true),
        ..Default::default()
    };

    info!("Launching egui window");
    eframe::run_native(
        "bizflow",
        options,
        Box::new(|_cc| Ok(Box::new(BizflowApp::new(api, settings)))),
    )
}
