// Hide the console window in release builds on Windows.
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod listener;
mod settings;
mod spammer;
mod state;

use std::sync::Arc;

use eframe::egui;
use tracing::info;

use app::TurboKeyApp;
use spammer::SpamJob;
use state::SharedState;

fn main() -> eframe::Result<()> {
    setup_tracing();

    let state = Arc::new(SharedState::new());
    listener::spawn(state.clone());
    let worker = SpamJob::spawn(state.clone());
    info!("input listener and spam worker started");

    let mut viewport = egui::ViewportBuilder::default()
        .with_decorations(false)
        .with_always_on_top()
        .with_inner_size(egui::vec2(280.0, 430.0))
        .with_resizable(false);
    if let Some(icon) = load_window_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let app_state = state.clone();
    let result = eframe::run_native(
        "TurboKey",
        options,
        Box::new(move |cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Box::new(TurboKeyApp::new(app_state))
        }),
    );

    state.begin_shutdown();
    worker.join();
    info!("exiting");
    result
}

fn setup_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

// The window icon is optional; a missing or undecodable icon.png is ignored.
fn load_window_icon() -> Option<egui::IconData> {
    let bytes = std::fs::read("icon.png").ok()?;
    let image = image::load_from_memory(&bytes).ok()?.into_rgba8();
    let (width, height) = image.dimensions();
    Some(egui::IconData {
        rgba: image.into_raw(),
        width,
        height,
    })
}
