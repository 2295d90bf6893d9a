use std::fmt::Display;

use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness only.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// Map a readiness check result to the `GET /readyz` status.
/// Services run their own check (database ping, etc.) and pass the result here.
pub fn readiness<E: Display>(check: Result<(), E>) -> StatusCode {
    match check {
        Ok(()) => StatusCode::OK,
        Err(e) => {
            ::tracing::warn!(error = %e, "readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
