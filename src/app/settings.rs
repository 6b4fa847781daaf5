//! Field-level state for the ranking-weights form.
//!
//! The settings panel edits the eight-field [`RankingWeights`] record. Numeric
//! fields are edited through plain text buffers; boolean fields toggle in
//! place. Nothing is persisted until the user saves, at which point
//! [`SettingsForm::collect`] turns the buffers back into a full record with
//! field-specific fallbacks for buffers that no longer parse.

use crate::domain::RankingWeights;

/// Number of editable fields, in display order.
pub const FIELD_COUNT: usize = 8;

/// Labels for the form rows, indexed by field position.
pub const FIELD_LABELS: [&str; FIELD_COUNT] = [
    "Half-life (days)",
    "Frequency bonus",
    "Prefer apps",
    "Penalize hidden",
    "Depth penalty",
    "Exact match bonus",
    "Prefix match penalty",
    "Contains match penalty",
];

const HALF_LIFE: usize = 0;
const FREQUENCY_BONUS: usize = 1;
const PREFER_APPS: usize = 2;
const PENALIZE_HIDDEN: usize = 3;
const DEPTH_PENALTY: usize = 4;
const EXACT_BONUS: usize = 5;
const PREFIX_PENALTY: usize = 6;
const CONTAINS_PENALTY: usize = 7;

/// Editable state of the ranking-weights form.
///
/// Numeric values live in text buffers while the panel is open; they are
/// parsed only when the record is collected for saving. `saving` is set
/// while a save request is in flight and blocks repeat submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// Index of the focused field, `0..FIELD_COUNT`.
    pub focused: usize,

    /// A save request is in flight; further saves are ignored until the
    /// response arrives.
    pub saving: bool,

    pub half_life_days: String,
    pub frequency_bonus: String,
    pub prefer_apps: bool,
    pub penalize_hidden: bool,
    pub depth_penalty: String,
    pub exact_bonus: String,
    pub prefix_penalty: String,
    pub contains_penalty: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self::from_weights(&RankingWeights::default())
    }
}

impl SettingsForm {
    /// Builds a form pre-filled from a weights record.
    #[must_use]
    pub fn from_weights(weights: &RankingWeights) -> Self {
        Self {
            focused: 0,
            saving: false,
            half_life_days: weights.half_life_days.to_string(),
            frequency_bonus: weights.frequency_bonus.to_string(),
            prefer_apps: weights.prefer_apps,
            penalize_hidden: weights.penalize_hidden,
            depth_penalty: weights.depth_penalty.to_string(),
            exact_bonus: weights.exact_bonus.to_string(),
            prefix_penalty: weights.prefix_penalty.to_string(),
            contains_penalty: weights.contains_penalty.to_string(),
        }
    }

    /// Refills the field buffers from a weights record.
    ///
    /// Focus and the in-flight save flag are kept as they are, so a weights
    /// push arriving mid-edit does not yank the cursor around.
    pub fn load(&mut self, weights: &RankingWeights) {
        self.half_life_days = weights.half_life_days.to_string();
        self.frequency_bonus = weights.frequency_bonus.to_string();
        self.prefer_apps = weights.prefer_apps;
        self.penalize_hidden = weights.penalize_hidden;
        self.depth_penalty = weights.depth_penalty.to_string();
        self.exact_bonus = weights.exact_bonus.to_string();
        self.prefix_penalty = weights.prefix_penalty.to_string();
        self.contains_penalty = weights.contains_penalty.to_string();
    }

    /// Collects the full record from the field buffers.
    ///
    /// A numeric buffer that fails to parse falls back to `0`, except the
    /// half-life which falls back to its default of `7` days.
    #[must_use]
    pub fn collect(&self) -> RankingWeights {
        RankingWeights {
            half_life_days: self.half_life_days.trim().parse().unwrap_or(7),
            frequency_bonus: self.frequency_bonus.trim().parse().unwrap_or(0),
            prefer_apps: self.prefer_apps,
            penalize_hidden: self.penalize_hidden,
            depth_penalty: self.depth_penalty.trim().parse().unwrap_or(0),
            exact_bonus: self.exact_bonus.trim().parse().unwrap_or(0),
            prefix_penalty: self.prefix_penalty.trim().parse().unwrap_or(0),
            contains_penalty: self.contains_penalty.trim().parse().unwrap_or(0),
        }
    }

    /// Moves focus to the next field, wrapping past the last one.
    pub fn focus_next(&mut self) {
        self.focused = (self.focused + 1) % FIELD_COUNT;
    }

    /// Moves focus to the previous field, wrapping past the first one.
    pub fn focus_prev(&mut self) {
        self.focused = if self.focused == 0 {
            FIELD_COUNT - 1
        } else {
            self.focused - 1
        };
    }

    /// Whether the field at `index` is a boolean toggle.
    #[must_use]
    pub fn is_toggle(index: usize) -> bool {
        matches!(index, PREFER_APPS | PENALIZE_HIDDEN)
    }

    /// Flips the focused field if it is a toggle; no-op on numeric fields.
    pub fn toggle(&mut self) {
        match self.focused {
            PREFER_APPS => self.prefer_apps = !self.prefer_apps,
            PENALIZE_HIDDEN => self.penalize_hidden = !self.penalize_hidden,
            _ => {}
        }
    }

    /// Appends a character to the focused numeric buffer.
    ///
    /// Accepts digits anywhere and a minus sign only as the first character;
    /// everything else is dropped. No-op on toggle fields.
    pub fn insert_char(&mut self, c: char) {
        let Some(buffer) = self.buffer_mut(self.focused) else {
            return;
        };
        if c.is_ascii_digit() || (c == '-' && buffer.is_empty()) {
            buffer.push(c);
        }
    }

    /// Removes the last character of the focused numeric buffer.
    pub fn backspace(&mut self) {
        if let Some(buffer) = self.buffer_mut(self.focused) {
            buffer.pop();
        }
    }

    /// Display text for the field at `index`: the raw buffer for numeric
    /// fields, `yes`/`no` for toggles.
    #[must_use]
    pub fn field_text(&self, index: usize) -> String {
        match index {
            HALF_LIFE => self.half_life_days.clone(),
            FREQUENCY_BONUS => self.frequency_bonus.clone(),
            PREFER_APPS => bool_text(self.prefer_apps),
            PENALIZE_HIDDEN => bool_text(self.penalize_hidden),
            DEPTH_PENALTY => self.depth_penalty.clone(),
            EXACT_BONUS => self.exact_bonus.clone(),
            PREFIX_PENALTY => self.prefix_penalty.clone(),
            CONTAINS_PENALTY => self.contains_penalty.clone(),
            _ => String::new(),
        }
    }

    fn buffer_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            HALF_LIFE => Some(&mut self.half_life_days),
            FREQUENCY_BONUS => Some(&mut self.frequency_bonus),
            DEPTH_PENALTY => Some(&mut self.depth_penalty),
            EXACT_BONUS => Some(&mut self.exact_bonus),
            PREFIX_PENALTY => Some(&mut self.prefix_penalty),
            CONTAINS_PENALTY => Some(&mut self.contains_penalty),
            _ => None,
        }
    }
}

fn bool_text(value: bool) -> String {
    if value { "yes".to_string() } else { "no".to_string() }
}
