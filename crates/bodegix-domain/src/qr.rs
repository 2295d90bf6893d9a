//! QR access session status types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Stored lifecycle state of a QR session.
///
/// `Used` and `Expired` are terminal: a session never re-enters `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QrStatus {
    Pending,
    Used,
    Expired,
}

impl QrStatus {
    /// Wire and column value.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Used => "used",
            Self::Expired => "expired",
        }
    }

    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for QrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown qr status: {0}")]
pub struct UnknownQrStatus(pub String);

impl FromStr for QrStatus {
    type Err = UnknownQrStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "used" => Ok(Self::Used),
            "expired" => Ok(Self::Expired),
            other => Err(UnknownQrStatus(other.to_owned())),
        }
    }
}

/// Status reported to polling clients. `Unknown` covers codes that were never
/// issued (or are not visible to the caller).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Pending,
    Used,
    Expired,
    Unknown,
}

impl SessionStatus {
    /// Polling stops once a terminal status is observed.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Used | Self::Expired)
    }
}

impl From<QrStatus> for SessionStatus {
    fn from(status: QrStatus) -> Self {
        match status {
            QrStatus::Pending => Self::Pending,
            QrStatus::Used => Self::Used,
            QrStatus::Expired => Self::Expired,
        }
    }
}
