use bodegix_access::domain::repository::QrSessionStore;
use bodegix_access::infra::memory::InMemoryQrSessionStore;
use bodegix_access::usecase::status::QrSessionStatusUseCase;
use bodegix_access::usecase::validate::ValidateQrSessionUseCase;
use bodegix_domain::qr::{QrStatus, SessionStatus};

use crate::helpers::{OTHER_TENANT, TENANT, lapsed_session, pending_session, reader, store_with};

const CODE: &str = "0123456789abcdef0123456789abcdef";

#[tokio::test]
async fn should_follow_session_through_redemption() {
    let store = store_with(&[pending_session(CODE, 15)]).await;
    let status = QrSessionStatusUseCase {
        sessions: store.clone(),
    };

    assert_eq!(
        status.execute(CODE, Some(TENANT)).await.unwrap(),
        SessionStatus::Pending
    );

    ValidateQrSessionUseCase { sessions: store }
        .execute(CODE, reader(TENANT))
        .await
        .unwrap();

    assert_eq!(
        status.execute(CODE, Some(TENANT)).await.unwrap(),
        SessionStatus::Used
    );
}

#[tokio::test]
async fn should_report_lapsed_session_as_expired_without_writing() {
    let store = store_with(&[lapsed_session(CODE)]).await;
    let status = QrSessionStatusUseCase {
        sessions: store.clone(),
    };

    assert_eq!(
        status.execute(CODE, Some(TENANT)).await.unwrap(),
        SessionStatus::Expired
    );
    assert_eq!(
        store.get(CODE).await.unwrap().unwrap().status,
        QrStatus::Pending
    );
}

#[tokio::test]
async fn should_report_unknown_for_missing_code() {
    let status = QrSessionStatusUseCase {
        sessions: InMemoryQrSessionStore::default(),
    };

    assert_eq!(
        status.execute(CODE, Some(TENANT)).await.unwrap(),
        SessionStatus::Unknown
    );
}

#[tokio::test]
async fn should_hide_sessions_of_other_tenants() {
    let store = store_with(&[pending_session(CODE, 15)]).await;
    let status = QrSessionStatusUseCase { sessions: store };

    assert_eq!(
        status.execute(CODE, Some(OTHER_TENANT)).await.unwrap(),
        SessionStatus::Unknown
    );
    assert_eq!(
        status.execute(CODE, None).await.unwrap(),
        SessionStatus::Unknown
    );
}
