use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Access service domain error variants.
///
/// Every validation failure maps to its own variant so readers can tell them
/// apart; none of them may be treated as a grant.
#[derive(Debug, thiserror::Error)]
pub enum AccessServiceError {
    #[error("locker not found")]
    LockerNotFound,
    #[error("unknown code")]
    UnknownCode,
    #[error("code already used")]
    AlreadyUsed,
    #[error("code expired")]
    Expired,
    #[error("forbidden")]
    Forbidden,
    #[error("ttl must be between 1 and {max} seconds")]
    InvalidTtl { max: u32 },
    #[error("code already exists")]
    CodeConflict,
    #[error("could not generate a unique code")]
    CodeGenerationExhausted,
    #[error("unlock failed")]
    UnlockFailed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AccessServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::LockerNotFound => "LOCKER_NOT_FOUND",
            Self::UnknownCode => "UNKNOWN_CODE",
            Self::AlreadyUsed => "ALREADY_USED",
            Self::Expired => "EXPIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidTtl { .. } => "INVALID_TTL",
            Self::CodeConflict => "CODE_CONFLICT",
            Self::CodeGenerationExhausted => "CODE_GENERATION_EXHAUSTED",
            Self::UnlockFailed => "UNLOCK_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AccessServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::LockerNotFound | Self::UnknownCode => StatusCode::NOT_FOUND,
            Self::AlreadyUsed | Self::CodeConflict => StatusCode::CONFLICT,
            Self::Expired => StatusCode::GONE,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::InvalidTtl { .. } => StatusCode::BAD_REQUEST,
            Self::CodeGenerationExhausted => StatusCode::SERVICE_UNAVAILABLE,
            Self::UnlockFailed => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only. TraceLayer records method/uri/status for every request and
        // scan refusals are logged by the scan use case.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
