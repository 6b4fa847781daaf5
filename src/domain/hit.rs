//! Search hit domain model.
//!
//! This module defines the core `SearchHit` type representing one entry the
//! ranking worker returned for the current query: an application launcher,
//! a file, or a directory. Hits are plain data; ranking already happened on
//! the worker side, so the UI only stores, selects, and displays them.

use serde::{Deserialize, Serialize};

/// One ranked entry in a result set.
///
/// Hits arrive from the worker already sorted best-first. The UI treats
/// them as opaque rows: it never re-sorts or re-filters a set, only
/// replaces it wholesale when the next response arrives.
///
/// # Fields
///
/// - `name`: Display name (for `.desktop` entries, the `Name=` value)
/// - `path`: Absolute filesystem path of the entry
/// - `is_dir`: Whether the entry is a directory (drives the indicator
///   column and the `folder`/`terminal` target resolution)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub is_dir: bool,
}

impl SearchHit {
    /// Creates a new hit with the given name and path.
    ///
    /// # Examples
    ///
    /// ```
    /// use zlauncher::domain::SearchHit;
    ///
    /// let hit = SearchHit::new("notes.md".to_string(), "/home/user/notes.md".to_string(), false);
    /// assert_eq!(hit.name, "notes.md");
    /// assert!(!hit.is_dir);
    /// ```
    #[must_use]
    pub fn new(name: String, path: String, is_dir: bool) -> Self {
        Self { name, path, is_dir }
    }

    /// Returns the directory this hit "lives in" for directory-oriented verbs.
    ///
    /// Directories resolve to themselves, files to their parent, and
    /// pathological paths with no parent fall back to `"."`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zlauncher::domain::SearchHit;
    ///
    /// let file = SearchHit::new("a.txt".into(), "/tmp/dir/a.txt".into(), false);
    /// assert_eq!(file.directory(), "/tmp/dir");
    ///
    /// let dir = SearchHit::new("dir".into(), "/tmp/dir".into(), true);
    /// assert_eq!(dir.directory(), "/tmp/dir");
    /// ```
    #[must_use]
    pub fn directory(&self) -> String {
        if self.is_dir {
            return self.path.clone();
        }
        std::path::Path::new(&self.path)
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_else(|| ".".to_string())
    }

    /// Whether this hit is an application launcher entry.
    #[must_use]
    pub fn is_app(&self) -> bool {
        self.path.ends_with(".desktop")
    }
}
