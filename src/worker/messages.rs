//! Worker message types for plugin/worker communication.
//!
//! This module defines the request and response protocol between the plugin
//! pane and the background worker that handles scanning, ranking, and storage.
//! The transport is fire-and-forget JSON with no correlation IDs; search
//! responses echo the request's sequence number so the UI can discard stale
//! sets. The module also implements distributed tracing context propagation
//! across the plugin/worker boundary.

use crate::domain::action::LaunchAction;
use crate::domain::hit::SearchHit;
use crate::domain::weights::RankingWeights;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-boundary span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry to maintain
/// trace continuity when passing messages to the worker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across the boundary.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Extracts the OpenTelemetry trace ID and span ID from the active span.
    /// Returns `None` if the current span context is invalid or not sampled.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();

        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            let trace_id_str = format!("{:032x}", span_context.trace_id());
            let parent_span_id_str = format!("{:016x}", span_context.span_id());

            tracing::debug!(
                trace_id = %trace_id_str,
                parent_span_id = %parent_span_id_str,
                "capturing trace context"
            );

            Some(Self {
                trace_id: trace_id_str,
                parent_span_id: parent_span_id_str,
            })
        } else {
            tracing::debug!("span context is not valid");
            None
        }
    }
}

/// Macro to generate builder methods for `WorkerMessage` variants.
///
/// Generates convenience constructors that automatically attach the current
/// trace context to each message variant.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    configure(Configure { roots: Vec<String>, depth: usize, max_results: usize }),
    search(Search { query: String, seq: u64 }),
    execute(Execute { path: String, action: LaunchAction }),
    load_weights(LoadWeights {}),
    save_weights(SaveWeights { weights: RankingWeights }),
}

/// Requests sent from the plugin pane to the worker.
///
/// Tagged on the wire with a `type` field (`"search"`, `"execute"`, ...).
/// All requests are fire-and-forget: nothing on the plugin side blocks on a
/// reply, and failures surface only as pushed [`WorkerResponse::Error`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerMessage {
    /// Tell the worker its scan scope. Sent once after permissions are
    /// granted; plugin configuration cannot reach a worker any other way.
    Configure {
        /// Root directories to scan, already tilde-expanded.
        roots: Vec<String>,

        /// Maximum directory depth below each root.
        depth: usize,

        /// Cap on hits per response.
        max_results: usize,

        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Scan and rank candidates for a query.
    Search {
        /// The query text, untrimmed.
        query: String,

        /// Monotonic sequence number; echoed on the response so the UI can
        /// drop sets that a newer query has already superseded.
        seq: u64,

        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// A hit was committed: record the launch in usage history.
    Execute {
        /// Path of the committed hit.
        path: String,

        /// Which verb the user chose.
        action: LaunchAction,

        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Read the ranking weights record for the settings panel.
    LoadWeights {
        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },

    /// Persist the full ranking weights record.
    SaveWeights {
        /// The record to store; always complete, never partial.
        weights: RankingWeights,

        /// Trace context for linking spans across the boundary.
        #[serde(skip_serializing_if = "Option::is_none")]
        trace_context: Option<TraceContext>,
    },
}

/// Responses pushed from the worker back to the plugin pane.
///
/// Tagged on the wire with a `type` field. There is no transport-level
/// correlation; `Results` carries the echoed `seq` and everything else is
/// matched by kind alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WorkerResponse {
    /// A ranked result set for the query with sequence number `seq`.
    Results {
        /// Echo of the request's sequence number.
        seq: u64,

        /// Hits, best first, already capped.
        hits: Vec<SearchHit>,
    },

    /// A launch was folded into the usage history.
    AccessRecorded {
        /// Path whose history was bumped.
        path: String,
    },

    /// The ranking weights record, as stored (missing fields filled with
    /// defaults).
    Weights {
        /// The loaded record.
        weights: RankingWeights,
    },

    /// The weights record was persisted.
    WeightsSaved {},

    /// An operation failed.
    Error {
        /// Which operation failed (`"search"`, `"save_weights"`, ...).
        operation: String,

        /// Human-readable error message.
        message: String,
    },
}
