//! Background worker for scanning, ranking, and storage.
//!
//! This module implements the Zellij worker interface, handling every
//! filesystem-touching operation off the render path: walking the scan
//! roots, scoring candidates, bumping usage history, and reading/writing
//! the ranking weights record. It includes distributed tracing support for
//! cross-boundary observability.

use crate::domain::action::LaunchAction;
use crate::domain::error::{LauncherError, Result};
use crate::domain::weights::RankingWeights;
use crate::infrastructure::paths;
use crate::storage::backend::Storage;
use crate::storage::JsonStorage;
use crate::worker::scan::{self, ScanScope};
use crate::worker::{rank, WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker state for handling search and storage operations.
///
/// This struct runs in a separate instance spawned by Zellij and processes
/// messages sent from the plugin pane. The storage backend is initialized
/// lazily on first message receipt; the scan scope arrives in a `configure`
/// message shortly after load.
#[derive(Serialize, Deserialize, Default)]
pub struct LauncherWorker {
    /// Storage backend, initialized lazily on first use.
    #[serde(skip)]
    storage: Option<Box<dyn Storage>>,

    /// Cached weights record; invalidated by saves, filled by loads.
    #[serde(skip)]
    weights: Option<RankingWeights>,

    /// Where and how deep to scan.
    scope: ScanScope,
}

impl LauncherWorker {
    /// Creates a worker with storage rooted at the given data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be initialized.
    pub fn at(data_dir: PathBuf) -> Result<Self> {
        let storage: Box<dyn Storage> = Box::new(JsonStorage::new(data_dir)?);
        Ok(Self {
            storage: Some(storage),
            weights: None,
            scope: ScanScope::default(),
        })
    }

    /// Creates a worker over the standard plugin data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be initialized.
    pub fn new() -> Result<Self> {
        Self::at(paths::get_data_dir())
    }

    /// Returns a mutable reference to the storage backend, failing if not initialized.
    fn get_storage(&mut self) -> Result<&mut Box<dyn Storage>> {
        self.storage
            .as_mut()
            .ok_or_else(|| LauncherError::Worker("Storage not initialized".to_string()))
    }

    /// Returns the current weights, loading them on first use.
    ///
    /// A failed load logs an advisory warning and falls back to defaults;
    /// search must keep working without a readable weights file.
    fn current_weights(&mut self) -> RankingWeights {
        if let Some(weights) = &self.weights {
            return weights.clone();
        }

        let loaded = match self.get_storage().and_then(|storage| storage.load_weights()) {
            Ok(weights) => weights,
            Err(e) => {
                tracing::warn!(error = %e, "failed to load ranking weights, using defaults");
                RankingWeights::default()
            }
        };

        self.weights = Some(loaded.clone());
        loaded
    }

    /// Helper for handling storage operation results with consistent logging.
    ///
    /// This function standardizes error handling and success logging across
    /// the storage-backed operations in the worker.
    fn handle_db_result<T, F>(operation: &str, result: Result<T>, on_success: F) -> WorkerResponse
    where
        F: FnOnce(T) -> WorkerResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "storage operation successful");
                on_success(value)
            }
            Err(e) => {
                tracing::debug!(operation = operation, error = %e, "storage operation failed");
                WorkerResponse::Error {
                    operation: operation.to_string(),
                    message: format!("{operation}: {e}"),
                }
            }
        }
    }

    /// Handles the `configure` message by replacing the scan scope.
    fn handle_configure(&mut self, roots: Vec<String>, depth: usize, max_results: usize) {
        tracing::debug!(?roots, depth, max_results, "scan scope configured");
        self.scope = ScanScope {
            roots,
            depth,
            max_results,
        };
    }

    /// Handles the `search` message.
    ///
    /// Scans the scope for candidates, ranks them with the current weights
    /// and usage history, and echoes the request's sequence number so the
    /// UI can discard this set if a newer query superseded it.
    fn handle_search(&mut self, query: String, seq: u64) -> WorkerResponse {
        let weights = self.current_weights();
        let cap = self.scope.max_results;
        let now_ms = chrono::Utc::now().timestamp_millis();

        let candidates = scan::scan_candidates(&self.scope, &query);
        tracing::debug!(seq, candidates = candidates.len(), "scan finished");

        Self::handle_db_result(
            "search",
            self.get_storage().and_then(|storage| storage.usage_snapshot()),
            |usage| {
                let hits = rank::rank_hits(candidates, &query, &weights, &usage, now_ms, cap);

                tracing::debug!(seq, hit_count = hits.len(), "search ranked");
                WorkerResponse::Results { seq, hits }
            },
        )
    }

    /// Handles the `execute` message by folding the launch into usage history.
    ///
    /// The verb itself runs on the plugin side through host facilities; the
    /// worker's share of a commit is the frecency bump.
    fn handle_execute(&mut self, path: String, action: LaunchAction) -> WorkerResponse {
        let half_life_days = self.current_weights().half_life_days;
        let now_ms = chrono::Utc::now().timestamp_millis();

        Self::handle_db_result(
            "execute",
            self.get_storage()
                .and_then(|storage| storage.record_access(&path, now_ms, half_life_days)),
            |new_count| {
                tracing::debug!(path = %path, ?action, new_count, "launch recorded");
                WorkerResponse::AccessRecorded { path }
            },
        )
    }

    /// Handles the `load_weights` message.
    fn handle_load_weights(&mut self) -> WorkerResponse {
        match self.get_storage().and_then(|storage| storage.load_weights()) {
            Ok(weights) => {
                self.weights = Some(weights.clone());
                tracing::debug!("weights loaded for settings panel");
                WorkerResponse::Weights { weights }
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to load weights");
                WorkerResponse::Error {
                    operation: "load_weights".to_string(),
                    message: format!("load_weights: {e}"),
                }
            }
        }
    }

    /// Handles the `save_weights` message.
    ///
    /// On success the cache is refreshed, so the very next search already
    /// ranks with the record the user just committed.
    fn handle_save_weights(&mut self, weights: RankingWeights) -> WorkerResponse {
        match self
            .get_storage()
            .and_then(|storage| storage.save_weights(&weights))
        {
            Ok(()) => {
                self.weights = Some(weights);
                tracing::debug!("weights saved");
                WorkerResponse::WeightsSaved {}
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to save weights");
                WorkerResponse::Error {
                    operation: "save_weights".to_string(),
                    message: format!("save_weights: {e}"),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current context.
    ///
    /// This function reconstructs the OpenTelemetry context from the serialized
    /// trace information in the message, allowing spans created in the worker
    /// to be linked to their parent spans in the plugin pane.
    ///
    /// Returns a context guard that must be held for the duration of the operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_context = match message {
            WorkerMessage::Configure { trace_context, .. }
            | WorkerMessage::Search { trace_context, .. }
            | WorkerMessage::Execute { trace_context, .. }
            | WorkerMessage::LoadWeights { trace_context, .. }
            | WorkerMessage::SaveWeights { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the response to push, if any.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant. Automatically attaches trace
    /// context and creates a tracing span for the operation. `configure` is
    /// the one silent message; everything else pushes a response.
    pub fn handle_message(&mut self, message: WorkerMessage) -> Option<WorkerResponse> {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::Configure {
                roots,
                depth,
                max_results,
                ..
            } => {
                self.handle_configure(roots, depth, max_results);
                None
            }

            WorkerMessage::Search { query, seq, .. } => Some(self.handle_search(query, seq)),

            WorkerMessage::Execute { path, action, .. } => Some(self.handle_execute(path, action)),

            WorkerMessage::LoadWeights { .. } => Some(self.handle_load_weights()),

            WorkerMessage::SaveWeights { weights, .. } => Some(self.handle_save_weights(weights)),
        }
    }
}

/// Initializes tracing for the worker instance.
///
/// Sets up the same tracing configuration as the plugin pane, ensuring spans
/// from both sides are written to the same file.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
///
/// Used to ensure tracing is only set up once per worker lifetime.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for LauncherWorker {
    /// Handles incoming messages from the plugin pane.
    ///
    /// This is the Zellij worker interface entry point. It:
    /// 1. Initializes tracing on first message (once per worker lifetime)
    /// 2. Lazy-initializes the storage backend if needed
    /// 3. Deserializes the message payload
    /// 4. Processes the message via `handle_message`
    /// 5. Serializes and pushes the response back to the plugin pane
    ///
    /// # Arguments
    ///
    /// * `message` - Message name used for routing the response
    /// * `payload` - JSON-serialized `WorkerMessage`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        if self.storage.is_none() {
            match Self::new() {
                Ok(worker) => {
                    self.storage = worker.storage;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to initialize storage");
                    let error_response = WorkerResponse::Error {
                        operation: "init".to_string(),
                        message: format!("Failed to initialize storage: {e}"),
                    };
                    if let Ok(payload) = serde_json::to_string(&error_response) {
                        post_message_to_plugin(PluginMessage {
                            name: message,
                            payload,
                            worker_name: None,
                        });
                    }
                    return;
                }
            }
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let Some(response) = self.handle_message(worker_message) else {
            return;
        };

        match serde_json::to_string(&response) {
            Ok(payload) => {
                let plugin_message = PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                };
                post_message_to_plugin(plugin_message);
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn worker_over(data_dir: &Path, scan_root: &Path) -> LauncherWorker {
        let mut worker = LauncherWorker::at(data_dir.to_path_buf()).unwrap();
        worker.handle_configure(
            vec![scan_root.to_string_lossy().into_owned()],
            4,
            64,
        );
        worker
    }

    mod search {
        use super::*;

        #[test]
        fn echoes_the_sequence_number() {
            // Arrange
            let data = tempfile::tempdir().unwrap();
            let tree = tempfile::tempdir().unwrap();
            fs::write(tree.path().join("notes.md"), "").unwrap();
            let mut worker = worker_over(data.path(), tree.path());

            // Act
            let response = worker
                .handle_message(WorkerMessage::search("notes".to_string(), 17))
                .unwrap();

            // Assert
            match response {
                WorkerResponse::Results { seq, hits } => {
                    assert_eq!(seq, 17);
                    assert_eq!(hits.len(), 1);
                    assert_eq!(hits[0].name, "notes.md");
                }
                other => panic!("unexpected response: {other:?}"),
            }
        }

        #[test]
        fn no_matches_is_an_empty_set_not_an_error() {
            let data = tempfile::tempdir().unwrap();
            let tree = tempfile::tempdir().unwrap();
            let mut worker = worker_over(data.path(), tree.path());

            let response = worker
                .handle_message(WorkerMessage::search("zzz-nothing".to_string(), 1))
                .unwrap();

            assert_eq!(response, WorkerResponse::Results { seq: 1, hits: vec![] });
        }
    }

    mod execute {
        use super::*;

        #[test]
        fn recorded_launches_lift_later_searches() {
            // Arrange: two identically named files in sibling dirs
            let data = tempfile::tempdir().unwrap();
            let tree = tempfile::tempdir().unwrap();
            fs::create_dir(tree.path().join("a")).unwrap();
            fs::create_dir(tree.path().join("b")).unwrap();
            fs::write(tree.path().join("a").join("todo.md"), "").unwrap();
            fs::write(tree.path().join("b").join("todo.md"), "").unwrap();
            let mut worker = worker_over(data.path(), tree.path());
            let b_path = tree
                .path()
                .join("b")
                .join("todo.md")
                .to_string_lossy()
                .into_owned();

            // Act: launch the b copy a few times, then search again
            for _ in 0..3 {
                let response = worker
                    .handle_message(WorkerMessage::execute(
                        b_path.clone(),
                        crate::domain::LaunchAction::Open,
                    ))
                    .unwrap();
                assert!(matches!(response, WorkerResponse::AccessRecorded { .. }));
            }
            let response = worker
                .handle_message(WorkerMessage::search("todo".to_string(), 2))
                .unwrap();

            // Assert: the launched copy outranks its twin and wins the dedupe
            match response {
                WorkerResponse::Results { hits, .. } => {
                    assert_eq!(hits[0].path, b_path);
                }
                other => panic!("unexpected response: {other:?}"),
            }
        }
    }

    mod weights {
        use super::*;

        #[test]
        fn load_returns_defaults_before_any_save() {
            let data = tempfile::tempdir().unwrap();
            let tree = tempfile::tempdir().unwrap();
            let mut worker = worker_over(data.path(), tree.path());

            let response = worker.handle_message(WorkerMessage::load_weights()).unwrap();

            assert_eq!(
                response,
                WorkerResponse::Weights { weights: RankingWeights::default() }
            );
        }

        #[test]
        fn save_then_load_round_trips() {
            // Arrange
            let data = tempfile::tempdir().unwrap();
            let tree = tempfile::tempdir().unwrap();
            let mut worker = worker_over(data.path(), tree.path());
            let mut weights = RankingWeights::default();
            weights.frequency_bonus = 750;
            weights.penalize_hidden = false;

            // Act
            let saved = worker
                .handle_message(WorkerMessage::save_weights(weights.clone()))
                .unwrap();
            let loaded = worker.handle_message(WorkerMessage::load_weights()).unwrap();

            // Assert
            assert_eq!(saved, WorkerResponse::WeightsSaved {});
            assert_eq!(loaded, WorkerResponse::Weights { weights });
        }
    }

    mod configure {
        use super::*;

        #[test]
        fn configure_is_silent_and_redirects_the_scan() {
            // Arrange: worker initially scoped to an empty dir
            let data = tempfile::tempdir().unwrap();
            let empty = tempfile::tempdir().unwrap();
            let full = tempfile::tempdir().unwrap();
            fs::write(full.path().join("notes.md"), "").unwrap();
            let mut worker = worker_over(data.path(), empty.path());

            // Act
            let configure_response = worker.handle_message(WorkerMessage::configure(
                vec![full.path().to_string_lossy().into_owned()],
                4,
                64,
            ));
            let search_response = worker
                .handle_message(WorkerMessage::search("notes".to_string(), 3))
                .unwrap();

            // Assert
            assert!(configure_response.is_none());
            match search_response {
                WorkerResponse::Results { hits, .. } => assert_eq!(hits.len(), 1),
                other => panic!("unexpected response: {other:?}"),
            }
        }
    }
}
