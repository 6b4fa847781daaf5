//! OpenTelemetry-based observability with file-based trace export.
//!
//! The plugin runs inside Zellij's WASM sandbox, so spans cannot leave over
//! the network. Instead a custom exporter serializes them as OTLP JSON lines
//! into a rotating file under the data directory, one batch per line, where
//! standard OTLP tooling can replay them:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → zlauncher-otlp.json
//! ```
//!
//! Both the plugin pane and the background worker initialize the same
//! pipeline and write to the same file; the trace context carried on worker
//! messages stitches their spans into one trace.
//!
//! # Configuration
//!
//! The span filter comes from the `trace_level` plugin option and defaults
//! to `info`.
//!
//! ```rust
//! use zlauncher::observability::init_tracing;
//! use zlauncher::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```
//!
//! # Modules
//!
//! - [`init`]: subscriber setup
//! - [`tracer`]: tracer provider with the file exporter
//! - [`span_formatter`]: OTLP JSON serialization
//! - [`file_writer`]: rotating file writer

mod file_writer;
mod span_formatter;
mod tracer;
mod init;

pub use init::init_tracing;
