use std::time::Duration;

pub const DEFAULT_DELAY_MS: u64 = 30;
pub const DEFAULT_HOTKEY: &str = "f6";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Left = 0,
    Right = 1,
    Middle = 2,
}

impl MouseButton {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "left" => Some(MouseButton::Left),
            "right" => Some(MouseButton::Right),
            "middle" => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// One entry of the activation list: a mouse button or a named keyboard key.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Requirement {
    Button(MouseButton),
    Key(String),
}

/// Snapshot of everything the spam loop and listener need from the UI.
/// Republished as a whole on every field edit, so readers never observe a
/// half-updated configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub required: Vec<Requirement>,
    pub spam_key: Option<char>,
    pub delay_ms: u64,
    pub hotkey: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            required: vec![
                Requirement::Button(MouseButton::Left),
                Requirement::Button(MouseButton::Right),
            ],
            spam_key: Some('y'),
            delay_ms: DEFAULT_DELAY_MS,
            hotkey: DEFAULT_HOTKEY.to_string(),
        }
    }
}

impl Settings {
    /// Build a snapshot from the raw text-field contents. Never fails; each
    /// field falls back to its default on bad input.
    pub fn parse(activation: &str, spam_key: &str, delay: &str, hotkey: &str) -> Self {
        Self {
            required: parse_requirements(activation),
            spam_key: spam_key.trim().chars().next(),
            delay_ms: parse_delay(delay),
            hotkey: parse_hotkey(hotkey),
        }
    }

    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

fn parse_requirements(raw: &str) -> Vec<Requirement> {
    raw.split(',')
        .map(|token| token.trim().to_lowercase())
        .filter(|token| !token.is_empty())
        .map(|token| match MouseButton::from_token(&token) {
            Some(button) => Requirement::Button(button),
            None => Requirement::Key(token),
        })
        .collect()
}

fn parse_delay(raw: &str) -> u64 {
    match raw.trim().parse::<i64>() {
        Ok(ms) if ms >= 1 => ms as u64,
        _ => DEFAULT_DELAY_MS,
    }
}

fn parse_hotkey(raw: &str) -> String {
    let hotkey = raw.trim().to_lowercase();
    if hotkey.is_empty() {
        DEFAULT_HOTKEY.to_string()
    } else {
        hotkey
    }
}
