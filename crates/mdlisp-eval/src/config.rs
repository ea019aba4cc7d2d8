//! Evaluator limits.

use serde::{Deserialize, Serialize};

/// Limits that turn runaway programs into `ResourceExhausted` errors.
///
/// Deserializable so a host can pass it as JSON; missing fields keep
/// their defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Total evaluation steps allowed for one run. The default, `u64::MAX`,
    /// leaves runs unmetered.
    pub gas_limit: u64,
    /// Maximum number of nested closure calls. Frames live on the heap, so
    /// any value is safe to set.
    pub max_call_depth: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            gas_limit: u64::MAX,
            max_call_depth: 10_000,
        }
    }
}
