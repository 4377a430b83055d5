//! Telemetry metric name constants.
//!
//! Centralised metric names for mimir operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `mimir_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `command` — command invoked (e.g. "tokenize", "compare")
//! - `status` — outcome: "ok" or the error kind (e.g. "validation")
//! - `capability` — capability slot (e.g. "parser", "classifier")

/// Total commands dispatched.
///
/// Labels: `command`, `status`.
pub const REQUESTS_TOTAL: &str = "mimir_requests_total";

/// Command duration in seconds.
///
/// Labels: `command`.
pub const REQUEST_DURATION_SECONDS: &str = "mimir_request_duration_seconds";

/// Total model files loaded at startup.
///
/// Labels: `capability`.
pub const MODELS_LOADED_TOTAL: &str = "mimir_models_loaded_total";
