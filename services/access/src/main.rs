use sea_orm::Database;
use tracing::info;

use bodegix_access::config::{AccessConfig, SessionStoreKind};
use bodegix_access::infra::actuator::Actuator;
use bodegix_access::infra::backend::{EventBackend, LockerBackend, SessionBackend};
use bodegix_access::infra::db::{DbAccessEventLog, DbLockerDirectory, DbQrSessionStore};
use bodegix_access::infra::memory::InMemoryQrSessionStore;
use bodegix_access::router::build_router;
use bodegix_access::state::AppState;
use bodegix_auth_types::identity::JwtSecret;
use bodegix_core::config::Config;
use bodegix_core::tracing::{LogFormat, init_tracing};

#[tokio::main]
async fn main() {
    init_tracing(LogFormat::Json, "info");

    let config = AccessConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let sessions = match config.qr_session_store {
        SessionStoreKind::Postgres => SessionBackend::Db(DbQrSessionStore { db: db.clone() }),
        SessionStoreKind::Memory => {
            tracing::warn!("qr sessions kept in process memory; they do not survive restarts");
            SessionBackend::Memory(InMemoryQrSessionStore::default())
        }
    };

    let state = AppState {
        sessions,
        lockers: LockerBackend::Db(DbLockerDirectory { db: db.clone() }),
        events: EventBackend::Db(DbAccessEventLog { db }),
        actuator: Actuator::from_url(config.unlock_url()),
        jwt_secret: JwtSecret::new(config.jwt_secret.as_str()),
        policy: config.policy(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.access_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("access service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
