use serde::Serialize;

use crate::color::{self, ColorId, RESET_KEY};
use crate::presentation::StatusView;

const MIN_STATUS_WORDS: u32 = 1;

/// Per-player status label settings as persisted in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSettings {
    brackets: bool,
    before_name: bool,
    status: String,
    color: String,
    status_words: u32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            brackets: false,
            before_name: false,
            status: String::new(),
            color: String::from(RESET_KEY),
            status_words: MIN_STATUS_WORDS,
        }
    }
}

impl PlayerSettings {
    /// Whether the status is wrapped in square brackets.
    pub fn brackets(&self) -> bool {
        self.brackets
    }

    pub fn set_brackets(&mut self, value: bool) {
        self.brackets = value;
    }

    /// Whether the status is rendered before the display name.
    pub fn before_name(&self) -> bool {
        self.before_name
    }

    pub fn set_before_name(&mut self, value: bool) {
        self.before_name = value;
    }

    /// Current status text; empty means no status.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Raw color key as typed by the player.
    pub fn color(&self) -> &str {
        &self.color
    }

    /// Replace status text and color key together.
    pub fn set_status(&mut self, status: String, color: String) {
        self.status = status;
        self.color = normalize_color_key(color);
    }

    /// Drop status text and color back to their defaults.
    pub fn clear_status(&mut self) {
        self.status.clear();
        self.color = String::from(RESET_KEY);
    }

    /// Number of words that make up the status phrase.
    pub fn status_words(&self) -> u32 {
        self.status_words
    }

    /// Update the word count, clamping anything below one.
    pub fn set_status_words(&mut self, value: i64) {
        self.status_words = clamp_status_words(value);
    }

    /// Resolve the raw color key and project a render-ready view.
    pub fn view(&self) -> StatusView {
        StatusView {
            status: self.status.clone(),
            color: self.resolved_color(),
            brackets: self.brackets,
            before_name: self.before_name,
        }
    }

    pub fn resolved_color(&self) -> ColorId {
        color::resolve(Some(&self.color))
    }

    /// Read a stored record, filling absent or invalid fields with defaults.
    ///
    /// Returns the record and whether anything had to be corrected.
    pub fn from_json(value: &serde_json::Value) -> (Self, bool) {
        let mut settings = PlayerSettings::default();
        if !value.is_object() {
            return (settings, true);
        }

        let mut migrated = false;

        match read_bool_field(value, "brackets") {
            Some(brackets) => settings.brackets = brackets,
            None => migrated = true,
        }

        match read_bool_field(value, "beforeName") {
            Some(before_name) => settings.before_name = before_name,
            None => migrated = true,
        }

        match read_string_field(value, "status") {
            Some(status) => settings.status = status,
            None => migrated = true,
        }

        match read_string_field(value, "color").filter(|c| !c.is_empty()) {
            Some(color) => settings.color = color,
            None => migrated = true,
        }

        match read_count_field(value, "statusWords") {
            Some((words, exact)) if words >= i64::from(MIN_STATUS_WORDS) => {
                settings.status_words = clamp_status_words(words);
                migrated |= !exact;
            },
            _ => migrated = true,
        }

        (settings, migrated)
    }

    /// Return a copy with every invariant restored.
    pub fn normalized(&self) -> Self {
        Self {
            brackets: self.brackets,
            before_name: self.before_name,
            status: self.status.clone(),
            color: normalize_color_key(self.color.clone()),
            status_words: self.status_words.max(MIN_STATUS_WORDS),
        }
    }
}

/// Clamp a requested word count into the valid range.
pub fn clamp_status_words(value: i64) -> u32 {
    u32::try_from(value.max(i64::from(MIN_STATUS_WORDS))).unwrap_or(u32::MAX)
}

fn normalize_color_key(color: String) -> String {
    if color.trim().is_empty() {
        String::from(RESET_KEY)
    } else {
        color
    }
}

fn read_string_field(value: &serde_json::Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string)
}

/// Whole-number field; fractional values are truncated and reported as
/// inexact so the record gets rewritten.
fn read_count_field(
    value: &serde_json::Value,
    key: &str,
) -> Option<(i64, bool)> {
    let field = value.get(key)?;
    if let Some(count) = field.as_i64() {
        return Some((count, true));
    }
    field
        .as_f64()
        .filter(|count| count.is_finite())
        .map(|count| (count.trunc() as i64, false))
}

fn read_bool_field(value: &serde_json::Value, key: &str) -> Option<bool> {
    value.get(key).and_then(serde_json::Value::as_bool)
}
