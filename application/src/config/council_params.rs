//! Council parameters: timeouts and generation settings.
//!
//! [`CouncilParams`] groups the static parameters shared by every invoker of
//! a deliberation. They are fixed at startup and never change per request.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Timeouts and generation parameters for one council.
///
/// Each provider class has its own timeout. The fan-out never waits longer
/// than the largest branch timeout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouncilParams {
    /// Timeout for each specialist call.
    pub specialist_timeout: Duration,
    /// Timeout for the search call.
    pub search_timeout: Duration,
    /// Timeout for a synthesis provider that does not set its own.
    pub synthesis_timeout: Duration,
    /// Maximum output length requested from reasoning providers.
    pub max_new_tokens: u32,
    /// Sampling temperature requested from reasoning providers.
    pub temperature: f32,
}

impl Default for CouncilParams {
    fn default() -> Self {
        Self {
            specialist_timeout: Duration::from_secs(30),
            search_timeout: Duration::from_secs(20),
            synthesis_timeout: Duration::from_secs(45),
            max_new_tokens: 512,
            temperature: 0.7,
        }
    }
}

impl CouncilParams {
    // ==================== Builder Methods ====================

    pub fn with_specialist_timeout(mut self, timeout: Duration) -> Self {
        self.specialist_timeout = timeout;
        self
    }

    pub fn with_search_timeout(mut self, timeout: Duration) -> Self {
        self.search_timeout = timeout;
        self
    }

    pub fn with_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.synthesis_timeout = timeout;
        self
    }

    pub fn with_max_new_tokens(mut self, max: u32) -> Self {
        self.max_new_tokens = max;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Upper bound on how long the fan-out phase can take.
    pub fn fan_out_bound(&self) -> Duration {
        self.specialist_timeout.max(self.search_timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = CouncilParams::default();
        assert_eq!(params.specialist_timeout, Duration::from_secs(30));
        assert_eq!(params.search_timeout, Duration::from_secs(20));
        assert_eq!(params.synthesis_timeout, Duration::from_secs(45));
    }

    #[test]
    fn test_fan_out_bound_is_max_branch_timeout() {
        let params = CouncilParams::default()
            .with_specialist_timeout(Duration::from_secs(5))
            .with_search_timeout(Duration::from_secs(9));
        assert_eq!(params.fan_out_bound(), Duration::from_secs(9));
    }
}
