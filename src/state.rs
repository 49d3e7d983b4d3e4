use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use tracing::debug;

use crate::settings::{MouseButton, Requirement, Settings};

/// All state shared between the rdev listener thread, the spam worker and the
/// egui thread. Listener callbacks write, the worker and UI read; everything
/// goes through atomics or parking_lot mutexes.
pub struct SharedState {
    enabled: AtomicBool,
    shutdown: AtomicBool,
    minimize_requested: AtomicBool,
    held_keys: Mutex<HashSet<String>>,
    held_buttons: [AtomicBool; 3],
    settings: Mutex<Settings>,
    egui_ctx: Mutex<Option<egui::Context>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
            shutdown: AtomicBool::new(false),
            minimize_requested: AtomicBool::new(false),
            held_keys: Mutex::new(HashSet::new()),
            held_buttons: [
                AtomicBool::new(false),
                AtomicBool::new(false),
                AtomicBool::new(false),
            ],
            settings: Mutex::new(Settings::default()),
            egui_ctx: Mutex::new(None),
        }
    }

    // --- enabled flag ---

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    pub fn toggle_enabled(&self) {
        let was = self.enabled.fetch_xor(true, Ordering::SeqCst);
        debug!(enabled = !was, "toggled");
        self.repaint();
    }

    // --- held keys / buttons ---

    pub fn press_key(&self, name: &str) {
        self.held_keys.lock().insert(name.to_string());
    }

    pub fn release_key(&self, name: &str) {
        self.held_keys.lock().remove(name);
    }

    pub fn key_held(&self, name: &str) -> bool {
        self.held_keys.lock().contains(name)
    }

    /// True when any held key name starts with `prefix` ("ctrl" matches both
    /// "ctrl" and "ctrl_r").
    pub fn modifier_held(&self, prefix: &str) -> bool {
        self.held_keys.lock().iter().any(|k| k.starts_with(prefix))
    }

    pub fn set_button(&self, button: MouseButton, pressed: bool) {
        self.held_buttons[button as usize].store(pressed, Ordering::SeqCst);
    }

    pub fn button_held(&self, button: MouseButton) -> bool {
        self.held_buttons[button as usize].load(Ordering::SeqCst)
    }

    /// Activation gate for the spam loop: every listed requirement must be
    /// concurrently held. An entry absent from the held state counts as not
    /// held; an empty list is trivially satisfied.
    pub fn requirements_met(&self, required: &[Requirement]) -> bool {
        required.iter().all(|req| match req {
            Requirement::Button(button) => self.button_held(*button),
            Requirement::Key(name) => self.key_held(name),
        })
    }

    // --- settings snapshot ---

    pub fn set_settings(&self, settings: Settings) {
        *self.settings.lock() = settings;
    }

    pub fn settings(&self) -> Settings {
        self.settings.lock().clone()
    }

    pub fn hotkey_matches(&self, key_name: &str) -> bool {
        self.settings.lock().hotkey == key_name
    }

    // --- window plumbing ---

    pub fn attach_ctx(&self, ctx: &egui::Context) {
        let mut slot = self.egui_ctx.lock();
        if slot.is_none() {
            *slot = Some(ctx.clone());
        }
    }

    pub fn request_minimize(&self) {
        self.minimize_requested.store(true, Ordering::SeqCst);
        self.repaint();
    }

    pub fn take_minimize_request(&self) -> bool {
        self.minimize_requested.swap(false, Ordering::SeqCst)
    }

    // --- shutdown ---

    pub fn begin_shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
        self.repaint();
    }

    pub fn should_exit(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    fn repaint(&self) {
        if let Some(ctx) = self.egui_ctx.lock().as_ref() {
            ctx.request_repaint();
        }
    }
}
