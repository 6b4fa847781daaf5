//! Launch verbs and the modifier mapping that selects them.

use serde::{Deserialize, Serialize};

/// Snapshot of the modifier keys at the moment a commit gesture happened.
///
/// `ctrl` also covers the Super/Cmd key so the same chord works across
/// platforms and terminal emulators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

/// What to do with the selected hit when the user commits.
///
/// Serialized onto the wire in lowercase (`"open"`, `"terminal"`,
/// `"folder"`, `"copy"`), matching the execute request contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchAction {
    /// Open with the default handler (or launch the app for `.desktop` hits).
    Open,
    /// Open a terminal pane at the hit's directory.
    Terminal,
    /// Reveal the hit's directory in the file manager.
    Folder,
    /// Copy the hit's path to the clipboard.
    Copy,
}

impl LaunchAction {
    /// Maps a modifier snapshot to a verb.
    ///
    /// Checked in priority order: Ctrl/Super wins over Shift, Shift over
    /// Alt, and an unmodified commit opens. Combinations therefore resolve
    /// deterministically (Ctrl+Shift+Enter is `Terminal`).
    ///
    /// # Examples
    ///
    /// ```
    /// use zlauncher::domain::{LaunchAction, Modifiers};
    ///
    /// let chord = Modifiers { ctrl: true, shift: true, alt: false };
    /// assert_eq!(LaunchAction::from_modifiers(chord), LaunchAction::Terminal);
    /// assert_eq!(LaunchAction::from_modifiers(Modifiers::default()), LaunchAction::Open);
    /// ```
    #[must_use]
    pub fn from_modifiers(mods: Modifiers) -> Self {
        if mods.ctrl {
            Self::Terminal
        } else if mods.shift {
            Self::Folder
        } else if mods.alt {
            Self::Copy
        } else {
            Self::Open
        }
    }

    /// Short label used in the help panel and hint bar.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Terminal => "terminal here",
            Self::Folder => "show folder",
            Self::Copy => "copy path",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod from_modifiers {
        use super::*;

        fn mods(ctrl: bool, shift: bool, alt: bool) -> Modifiers {
            Modifiers { ctrl, shift, alt }
        }

        #[test]
        fn plain_commit_opens() {
            assert_eq!(LaunchAction::from_modifiers(mods(false, false, false)), LaunchAction::Open);
        }

        #[test]
        fn ctrl_opens_terminal() {
            assert_eq!(LaunchAction::from_modifiers(mods(true, false, false)), LaunchAction::Terminal);
        }

        #[test]
        fn shift_shows_folder() {
            assert_eq!(LaunchAction::from_modifiers(mods(false, true, false)), LaunchAction::Folder);
        }

        #[test]
        fn alt_copies_path() {
            assert_eq!(LaunchAction::from_modifiers(mods(false, false, true)), LaunchAction::Copy);
        }

        #[test]
        fn ctrl_beats_shift_and_alt() {
            // Arrange: all three modifiers held at once
            let chord = mods(true, true, true);

            // Act & Assert
            assert_eq!(LaunchAction::from_modifiers(chord), LaunchAction::Terminal);
        }

        #[test]
        fn shift_beats_alt() {
            assert_eq!(LaunchAction::from_modifiers(mods(false, true, true)), LaunchAction::Folder);
        }
    }

    mod wire_format {
        use super::*;

        #[test]
        fn serializes_lowercase_verbs() {
            assert_eq!(serde_json::to_string(&LaunchAction::Open).unwrap(), r#""open""#);
            assert_eq!(serde_json::to_string(&LaunchAction::Terminal).unwrap(), r#""terminal""#);
            assert_eq!(serde_json::to_string(&LaunchAction::Folder).unwrap(), r#""folder""#);
            assert_eq!(serde_json::to_string(&LaunchAction::Copy).unwrap(), r#""copy""#);
        }
    }
}
