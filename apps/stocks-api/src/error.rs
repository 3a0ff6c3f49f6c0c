//! Error codes for the stocks API.
//!
//! Every request failure is classified into one [`ErrorCode`], which fixes
//! the HTTP status, the stable reason string sent in the response body, and
//! the `outcome` label recorded in metrics.
//!
//! # HTTP Status Codes
//!
//! | Code | Status | Usage |
//! |------|--------|-------|
//! | `UNSUPPORTED_FORMAT` | 404 | Unknown resource or suffix |
//! | `UPSTREAM_UNAVAILABLE` | 503 | Feed unreachable, timed out, non-2xx |
//! | `UPSTREAM_DATA_INVALID` | 502 | Feed fetched but could not be parsed |
//! | `INTERNAL_ERROR` | 500 | Rendering failure |

use serde::{Deserialize, Serialize};

/// Error codes for the stocks API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Requested representation is not served.
    UnsupportedFormat,
    /// Upstream feed could not be retrieved.
    UpstreamUnavailable,
    /// Upstream feed was retrieved but is not usable.
    UpstreamDataInvalid,
    /// Unexpected server-side failure.
    InternalError,
}

impl ErrorCode {
    /// HTTP status code for this error.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::UnsupportedFormat => 404,
            Self::UpstreamUnavailable => 503,
            Self::UpstreamDataInvalid => 502,
            Self::InternalError => 500,
        }
    }

    /// Stable reason string.
    #[must_use]
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            Self::UpstreamUnavailable => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamDataInvalid => "UPSTREAM_DATA_INVALID",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Metrics `outcome` label.
    #[must_use]
    pub const fn outcome(&self) -> &'static str {
        match self {
            Self::UnsupportedFormat => "unsupported_format",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamDataInvalid => "upstream_invalid",
            Self::InternalError => "internal",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.reason())
    }
}
