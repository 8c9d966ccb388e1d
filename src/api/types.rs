//! API error body.

use serde::Serialize;

/// Error response body for non-2xx statuses: `{"detail": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Human-readable error message.
    pub detail: String,
}
