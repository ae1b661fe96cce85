//! Payment capture status.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Status reported by PayPal for an order capture.
///
/// Only [`CaptureStatus::Completed`] means funds were settled. Every other
/// value (including a missing status) is a terminal failure for the bridge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CaptureStatus {
    Completed,
    /// Any status other than `COMPLETED`, kept verbatim for diagnostics.
    Other(String),
}

impl CaptureStatus {
    /// Interpret a raw status string. Matching is exact (`COMPLETED`).
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        if raw == "COMPLETED" {
            Self::Completed
        } else {
            Self::Other(raw.to_string())
        }
    }

    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Completed => "COMPLETED",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for CaptureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for CaptureStatus {
    fn from(raw: String) -> Self {
        Self::from_raw(&raw)
    }
}

impl From<CaptureStatus> for String {
    fn from(status: CaptureStatus) -> Self {
        match status {
            CaptureStatus::Completed => "COMPLETED".to_string(),
            CaptureStatus::Other(raw) => raw,
        }
    }
}
