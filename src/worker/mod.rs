//! Background worker for search and storage operations.
//!
//! This module implements the worker that handles all filesystem I/O — the
//! candidate scan, usage history, and the weights record — off the plugin's
//! render path. It uses Zellij's worker API for communication and includes
//! distributed tracing support for observability.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `scan`: Filesystem walk collecting candidates for a query
//! - `rank`: Scoring, deduplication, and ordering of candidates
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;
pub mod rank;
pub mod scan;

pub use handler::LauncherWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
pub use scan::ScanScope;
