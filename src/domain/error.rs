//! Error types for the zlauncher plugin.
//!
//! This module defines the centralized error type [`LauncherError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.

use thiserror::Error;

/// The main error type for zlauncher plugin operations.
///
/// This enum consolidates all error conditions that can occur during plugin execution,
/// from storage operations to I/O failures and theme loading. Variants either carry
/// a description string or wrap the underlying error using `#[from]`.
///
/// # Examples
///
/// ```
/// use zlauncher::domain::LauncherError;
///
/// fn read_usage_data() -> Result<(), LauncherError> {
///     Err(LauncherError::Storage("usage file is unreadable".to_string()))
/// }
/// ```
#[derive(Debug, Error)]
pub enum LauncherError {
    /// Storage operation failed.
    ///
    /// Occurs when reading from or writing to the usage or weights files fails.
    /// The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    ///
    /// Occurs when the plugin cannot parse the configured color theme.
    /// The string contains a description of what went wrong.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    ///
    /// Occurs when a message to or from the search worker cannot be serialized
    /// or deserialized. The string contains details about the failure.
    #[error("Worker communication error: {0}")]
    Worker(String),
}

/// A specialized `Result` type for zlauncher operations.
///
/// This is a type alias for `std::result::Result<T, LauncherError>` that simplifies
/// function signatures throughout the codebase.
///
/// # Examples
///
/// ```
/// use zlauncher::domain::Result;
///
/// fn record_launch() -> Result<()> {
///     Ok(())
/// }
/// # record_launch().unwrap();
/// ```
pub type Result<T> = std::result::Result<T, LauncherError>;
