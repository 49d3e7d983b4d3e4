use std::sync::Arc;
use std::thread;
use std::time::Duration;

use enigo::{Enigo, Key, KeyboardControllable};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::info;

use crate::state::SharedState;

// Poll intervals for the two idle cases: feature disabled, and enabled but
// activation not satisfied.
const DISABLED_POLL: Duration = Duration::from_millis(10);
const IDLE_POLL: Duration = Duration::from_millis(5);

static ENIGO: Lazy<Mutex<Enigo>> = Lazy::new(|| Mutex::new(Enigo::new()));

/// Background worker that emits the spam key while the activation buttons are
/// held. Cooperatively stopped via the shared shutdown flag.
pub struct SpamJob {
    handle: thread::JoinHandle<()>,
}

impl SpamJob {
    pub fn spawn(state: Arc<SharedState>) -> Self {
        let handle = thread::spawn(move || run(&state));
        Self { handle }
    }

    pub fn join(self) {
        let _ = self.handle.join();
    }
}

fn run(state: &SharedState) {
    loop {
        if state.should_exit() {
            break;
        }
        if !state.is_enabled() {
            thread::sleep(DISABLED_POLL);
            continue;
        }

        let settings = state.settings();
        if let Some(key) = settings.spam_key {
            if state.requirements_met(&settings.required) {
                tap(key);
                thread::sleep(settings.delay());
                continue;
            }
        }
        thread::sleep(IDLE_POLL);
    }
    info!("spam worker stopped");
}

// Best-effort emission: enigo's keyboard calls have no failure channel, a
// rejected injection is absorbed by the OS layer.
fn tap(key: char) {
    let mut enigo = ENIGO.lock();
    enigo.key_down(Key::Layout(key));
    enigo.key_up(Key::Layout(key));
}
