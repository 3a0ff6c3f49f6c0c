//! Operational response types.

use serde::{Deserialize, Serialize};

/// `/health` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status.
    pub status: String,
    /// Version.
    pub version: String,
    /// Configured upstream feed URL.
    pub upstream: String,
    /// Seconds since the router was built.
    pub uptime_secs: u64,
}
