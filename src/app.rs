use std::sync::Arc;
use std::time::Duration;

use egui::{Color32, RichText, ViewportCommand};

use crate::settings::Settings;
use crate::state::SharedState;

const BACKGROUND: Color32 = Color32::from_rgb(0x11, 0x11, 0x11);
const STATUS_ON: Color32 = Color32::from_rgb(0x55, 0xff, 0x55);
const STATUS_OFF: Color32 = Color32::from_rgb(0xff, 0x55, 0x55);
const DESTRUCT_FILL: Color32 = Color32::from_rgb(0x55, 0x11, 0x11);

pub struct TurboKeyApp {
    state: Arc<SharedState>,
    activation_input: String,
    spam_key_input: String,
    delay_input: String,
    hotkey_input: String,
}

impl TurboKeyApp {
    pub fn new(state: Arc<SharedState>) -> Self {
        let app = Self {
            state,
            activation_input: "Left, Right".to_string(),
            spam_key_input: "y".to_string(),
            delay_input: "30".to_string(),
            hotkey_input: "F6".to_string(),
        };
        app.publish_settings();
        app
    }

    /// Re-parse the text fields into a fresh snapshot for the worker threads.
    fn publish_settings(&self) {
        self.state.set_settings(Settings::parse(
            &self.activation_input,
            &self.spam_key_input,
            &self.delay_input,
            &self.hotkey_input,
        ));
    }
}

impl eframe::App for TurboKeyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.attach_ctx(ctx);

        if self.state.take_minimize_request() {
            ctx.send_viewport_cmd(ViewportCommand::Minimized(true));
        }
        if self.state.should_exit() {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }

        // Alt + primary drag anywhere in the body moves the frameless window.
        let start_drag = ctx.input(|i| i.modifiers.alt && i.pointer.primary_pressed());
        if start_drag {
            ctx.send_viewport_cmd(ViewportCommand::StartDrag);
        }

        let frame = egui::Frame::none().fill(BACKGROUND).inner_margin(12.0);
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("TurboKey");
                ui.add_space(8.0);

                let mut changed = false;

                ui.label("Activation buttons (comma-separated):");
                changed |= ui.text_edit_singleline(&mut self.activation_input).changed();
                ui.add_space(6.0);

                ui.label("Key to spam:");
                changed |= ui.text_edit_singleline(&mut self.spam_key_input).changed();
                ui.add_space(6.0);

                ui.label("Delay (ms):");
                changed |= ui.text_edit_singleline(&mut self.delay_input).changed();
                ui.add_space(6.0);

                ui.label("Toggle hotkey:");
                changed |= ui.text_edit_singleline(&mut self.hotkey_input).changed();

                if changed {
                    self.publish_settings();
                }

                ui.add_space(10.0);
                if self.state.is_enabled() {
                    ui.colored_label(STATUS_ON, "Status: ON");
                } else {
                    ui.colored_label(STATUS_OFF, "Status: OFF");
                }

                ui.add_space(6.0);
                if ui.button("Toggle").clicked() {
                    self.state.toggle_enabled();
                }

                ui.add_space(10.0);
                let destruct = egui::Button::new(
                    RichText::new("SELF DESTRUCT").color(STATUS_OFF).strong(),
                )
                .fill(DESTRUCT_FILL);
                if ui.add(destruct).clicked() {
                    self.state.begin_shutdown();
                    ctx.send_viewport_cmd(ViewportCommand::Close);
                }

                ui.add_space(10.0);
                ui.small("Move: Alt+Left-Drag");
                ui.small("Minimize: Ctrl+M   Quit: Ctrl+Q");
                ui.small("Toggle: custom hotkey");
            });
        });

        // Keep the status label fresh even when the flip came from the global
        // hotkey while the pointer is elsewhere.
        ctx.request_repaint_after(Duration::from_millis(100));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.begin_shutdown();
    }
}
