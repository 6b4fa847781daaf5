//! Domain layer for the zlauncher plugin.
//!
//! This module contains the core domain types and business logic for the plugin,
//! independent of Zellij-specific APIs or infrastructure concerns. It follows
//! domain-driven design principles by keeping business rules isolated from external
//! dependencies.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`hit`]: Search hit model returned by the ranking worker
//! - [`action`]: Launch verbs and the modifier chords that select them
//! - [`weights`]: The tunable ranking weights record
//!
//! # Examples
//!
//! ```
//! use zlauncher::domain::{Result, SearchHit};
//!
//! fn top_hit() -> Result<SearchHit> {
//!     Ok(SearchHit::new(
//!         "notes.md".to_string(),
//!         "/home/user/notes.md".to_string(),
//!         false,
//!     ))
//! }
//! # top_hit().unwrap();
//! ```

pub mod action;
pub mod error;
pub mod hit;
pub mod weights;

pub use action::{LaunchAction, Modifiers};
pub use error::{LauncherError, Result};
pub use hit::SearchHit;
pub use weights::RankingWeights;
