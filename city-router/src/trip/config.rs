//! Trip configuration.

use std::time::Duration;

use tracing::warn;

use crate::search::Algorithm;

/// Environment variable selecting the algorithm.
pub const ALGORITHM_VAR: &str = "ROUTE_ALGORITHM";

/// Environment variable holding the delay between steps in milliseconds.
pub const STEP_DELAY_VAR: &str = "ROUTE_STEP_MS";

/// How a trip is searched and paced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripConfig {
    /// Search algorithm used for every leg.
    pub algorithm: Algorithm,

    /// Pause between steps (milliseconds). Zero runs as fast as possible.
    pub step_delay_ms: u64,
}

impl TripConfig {
    /// Create a new configuration.
    pub fn new(algorithm: Algorithm, step_delay_ms: u64) -> Self {
        Self {
            algorithm,
            step_delay_ms,
        }
    }

    /// Returns the step delay as a Duration.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Defaults overridden by `ROUTE_ALGORITHM` and `ROUTE_STEP_MS`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup(ALGORITHM_VAR) {
            match raw.parse() {
                Ok(algorithm) => config.algorithm = algorithm,
                Err(e) => warn!(var = ALGORITHM_VAR, value = %raw, error = %e, "Ignoring setting"),
            }
        }

        if let Some(raw) = lookup(STEP_DELAY_VAR) {
            match raw.trim().parse() {
                Ok(ms) => config.step_delay_ms = ms,
                Err(e) => warn!(var = STEP_DELAY_VAR, value = %raw, error = %e, "Ignoring setting"),
            }
        }

        config
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            algorithm: Algorithm::Dijkstra,
            step_delay_ms: 50,
        }
    }
}
