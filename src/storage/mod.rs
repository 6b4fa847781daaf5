//! Storage layer for launch history and ranking weights.
//!
//! This module provides the storage abstraction for persisting usage history
//! (which feeds frecency ranking) and the user-tunable ranking weights record.
//! It uses JSON file storage with atomic writes.
//!
//! # Modules
//!
//! - `backend`: Storage trait abstraction for backend implementations
//! - `json`: JSON file-based storage implementation
//! - `frecency`: Exponential-decay math for launch counts
//! - `models`: Storage record types separate from domain models

pub mod backend;
pub mod frecency;
pub mod json;
pub mod models;

pub use backend::Storage;
pub use frecency::{bump, effective_count};
pub use json::JsonStorage;
pub use models::{UsageData, UsageEntry};
