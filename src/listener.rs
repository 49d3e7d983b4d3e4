use std::sync::Arc;
use std::thread;

use rdev::{listen, Button, Event, EventType, Key};
use tracing::error;

use crate::settings::MouseButton;
use crate::state::SharedState;

/// Start the global input listener on its own thread. `rdev::listen` blocks
/// for the process lifetime and has no stop API; the thread is reaped when
/// main returns.
pub fn spawn(state: Arc<SharedState>) {
    thread::spawn(move || {
        if let Err(err) = listen(move |event| handle_event(&state, &event)) {
            error!(?err, "global input listener failed; hotkeys unavailable");
        }
    });
}

fn handle_event(state: &SharedState, event: &Event) {
    match event.event_type {
        EventType::ButtonPress(button) => {
            if let Some(button) = map_button(button) {
                state.set_button(button, true);
            }
        }
        EventType::ButtonRelease(button) => {
            if let Some(button) = map_button(button) {
                state.set_button(button, false);
            }
        }
        EventType::KeyPress(key) => {
            let name = key_name(key);
            state.press_key(&name);

            if state.hotkey_matches(&name) {
                state.toggle_enabled();
            }
            if name == "m" && state.modifier_held("ctrl") {
                state.request_minimize();
            }
            if name == "q" && state.modifier_held("ctrl") {
                state.begin_shutdown();
            }
        }
        EventType::KeyRelease(key) => {
            state.release_key(&key_name(key));
        }
        _ => {}
    }
}

fn map_button(button: Button) -> Option<MouseButton> {
    match button {
        Button::Left => Some(MouseButton::Left),
        Button::Right => Some(MouseButton::Right),
        Button::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

/// Normalize an rdev key to a stable lowercase name. The mapping is driven by
/// the layout-independent key code, not the typed character, so press and
/// release of the same physical key always agree and the held set cannot leak
/// entries.
fn key_name(key: Key) -> String {
    let name = match key {
        Key::KeyA => "a",
        Key::KeyB => "b",
        Key::KeyC => "c",
        Key::KeyD => "d",
        Key::KeyE => "e",
        Key::KeyF => "f",
        Key::KeyG => "g",
        Key::KeyH => "h",
        Key::KeyI => "i",
        Key::KeyJ => "j",
        Key::KeyK => "k",
        Key::KeyL => "l",
        Key::KeyM => "m",
        Key::KeyN => "n",
        Key::KeyO => "o",
        Key::KeyP => "p",
        Key::KeyQ => "q",
        Key::KeyR => "r",
        Key::KeyS => "s",
        Key::KeyT => "t",
        Key::KeyU => "u",
        Key::KeyV => "v",
        Key::KeyW => "w",
        Key::KeyX => "x",
        Key::KeyY => "y",
        Key::KeyZ => "z",
        Key::Num0 | Key::Kp0 => "0",
        Key::Num1 | Key::Kp1 => "1",
        Key::Num2 | Key::Kp2 => "2",
        Key::Num3 | Key::Kp3 => "3",
        Key::Num4 | Key::Kp4 => "4",
        Key::Num5 | Key::Kp5 => "5",
        Key::Num6 | Key::Kp6 => "6",
        Key::Num7 | Key::Kp7 => "7",
        Key::Num8 | Key::Kp8 => "8",
        Key::Num9 | Key::Kp9 => "9",
        Key::F1 => "f1",
        Key::F2 => "f2",
        Key::F3 => "f3",
        Key::F4 => "f4",
        Key::F5 => "f5",
        Key::F6 => "f6",
        Key::F7 => "f7",
        Key::F8 => "f8",
        Key::F9 => "f9",
        Key::F10 => "f10",
        Key::F11 => "f11",
        Key::F12 => "f12",
        Key::ControlLeft => "ctrl",
        Key::ControlRight => "ctrl_r",
        Key::ShiftLeft => "shift",
        Key::ShiftRight => "shift_r",
        Key::Alt => "alt",
        Key::AltGr => "alt_gr",
        Key::MetaLeft => "meta",
        Key::MetaRight => "meta_r",
        Key::Space => "space",
        Key::Return | Key::KpReturn => "enter",
        Key::Escape => "esc",
        Key::Tab => "tab",
        Key::Backspace => "backspace",
        Key::CapsLock => "caps_lock",
        Key::Delete | Key::KpDelete => "delete",
        Key::Insert => "insert",
        Key::Home => "home",
        Key::End => "end",
        Key::PageUp => "page_up",
        Key::PageDown => "page_down",
        Key::UpArrow => "up",
        Key::DownArrow => "down",
        Key::LeftArrow => "left",
        Key::RightArrow => "right",
        Key::Minus | Key::KpMinus => "-",
        Key::Equal => "=",
        Key::KpPlus => "+",
        Key::KpMultiply => "*",
        Key::KpDivide | Key::Slash => "/",
        Key::LeftBracket => "[",
        Key::RightBracket => "]",
        Key::SemiColon => ";",
        Key::Quote => "'",
        Key::BackQuote => "`",
        Key::BackSlash | Key::IntlBackslash => "\\",
        Key::Comma => ",",
        Key::Dot => ".",
        Key::PrintScreen => "print_screen",
        Key::ScrollLock => "scroll_lock",
        Key::Pause => "pause",
        Key::NumLock => "num_lock",
        other => return format!("{:?}", other).to_lowercase(),
    };
    name.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn key_press(key: Key) -> Event {
        Event {
            event_type: EventType::KeyPress(key),
            time: SystemTime::now(),
            name: None,
        }
    }

    fn key_release(key: Key) -> Event {
        Event {
            event_type: EventType::KeyRelease(key),
            time: SystemTime::now(),
            name: None,
        }
    }

    fn button_event(button: Button, pressed: bool) -> Event {
        Event {
            event_type: if pressed {
                EventType::ButtonPress(button)
            } else {
                EventType::ButtonRelease(button)
            },
            time: SystemTime::now(),
            name: None,
        }
    }

    #[test]
    fn test_key_name_mapping() {
        assert_eq!(key_name(Key::KeyA), "a");
        assert_eq!(key_name(Key::Num3), "3");
        assert_eq!(key_name(Key::Kp3), "3");
        assert_eq!(key_name(Key::F6), "f6");
        assert_eq!(key_name(Key::Space), "space");
        assert_eq!(key_name(Key::ControlLeft), "ctrl");
        assert_eq!(key_name(Key::ControlRight), "ctrl_r");
        assert_eq!(key_name(Key::Unknown(255)), "unknown(255)");
    }

    #[test]
    fn test_press_release_updates_held_set() {
        let state = SharedState::new();
        handle_event(&state, &key_press(Key::KeyA));
        assert!(state.key_held("a"));
        handle_event(&state, &key_release(Key::KeyA));
        assert!(!state.key_held("a"));
    }

    #[test]
    fn test_buttons_update_held_state() {
        let state = SharedState::new();
        handle_event(&state, &button_event(Button::Left, true));
        assert!(state.button_held(MouseButton::Left));
        assert!(!state.button_held(MouseButton::Right));
        handle_event(&state, &button_event(Button::Left, false));
        assert!(!state.button_held(MouseButton::Left));
    }

    #[test]
    fn test_hotkey_flips_enabled_once_per_press() {
        let state = SharedState::new();
        assert!(state.is_enabled());

        handle_event(&state, &key_press(Key::F6));
        assert!(!state.is_enabled());

        // Release must not flip again.
        handle_event(&state, &key_release(Key::F6));
        assert!(!state.is_enabled());

        handle_event(&state, &key_press(Key::F6));
        assert!(state.is_enabled());
    }

    #[test]
    fn test_custom_hotkey_is_case_insensitive() {
        let state = SharedState::new();
        state.set_settings(crate::settings::Settings::parse("", "y", "30", "DELETE"));

        handle_event(&state, &key_press(Key::Delete));
        assert!(!state.is_enabled());
        // The old default no longer toggles.
        handle_event(&state, &key_press(Key::F6));
        assert!(!state.is_enabled());
    }

    #[test]
    fn test_ctrl_m_latches_minimize() {
        let state = SharedState::new();
        handle_event(&state, &key_press(Key::KeyM));
        assert!(!state.take_minimize_request());

        handle_event(&state, &key_press(Key::ControlLeft));
        handle_event(&state, &key_press(Key::KeyM));
        assert!(state.take_minimize_request());
    }

    #[test]
    fn test_ctrl_q_signals_shutdown() {
        let state = SharedState::new();
        handle_event(&state, &key_press(Key::KeyQ));
        assert!(!state.should_exit());

        handle_event(&state, &key_press(Key::ControlRight));
        handle_event(&state, &key_press(Key::KeyQ));
        assert!(state.should_exit());
    }
}
