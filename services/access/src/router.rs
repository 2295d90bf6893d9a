use axum::{
    Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use bodegix_core::health::{healthz, readiness};
use bodegix_core::middleware::{propagate_request_id_layer, request_id_layer};

use crate::domain::repository::QrSessionStore;
use crate::handlers::{
    qr_session::{create_qr_session, get_qr_session_status},
    scan::scan_qr_code,
};
use crate::state::AppState;

async fn readyz(State(state): State<AppState>) -> StatusCode {
    readiness(state.sessions.ping().await)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // QR sessions (mobile app)
        .route("/qr-sessions", post(create_qr_session))
        .route("/qr-sessions/{code}/status", get(get_qr_session_status))
        // Reader
        .route("/qr/scan", post(scan_qr_code))
        .layer(propagate_request_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
