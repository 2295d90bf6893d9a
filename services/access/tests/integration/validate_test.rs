use std::sync::Arc;
use std::time::Duration;

use bodegix_access::domain::repository::QrSessionStore;
use bodegix_access::domain::types::{QrPolicy, ReaderScope};
use bodegix_access::error::AccessServiceError;
use bodegix_access::infra::memory::{InMemoryLockerDirectory, InMemoryQrSessionStore};
use bodegix_access::usecase::issue::{IssueQrSessionInput, IssueQrSessionUseCase};
use bodegix_access::usecase::validate::ValidateQrSessionUseCase;
use bodegix_domain::id::LockerId;
use bodegix_domain::qr::QrStatus;

use crate::helpers::{
    LOCKER, OTHER_TENANT, OWNER, TENANT, assigned_locker, lapsed_session, pending_session,
    reader, store_with,
};

const CODE: &str = "0123456789abcdef0123456789abcdef";

#[tokio::test]
async fn should_redeem_code_exactly_once() {
    let store = store_with(&[pending_session(CODE, 15)]).await;
    let usecase = ValidateQrSessionUseCase {
        sessions: store.clone(),
    };

    let scope = usecase.execute(CODE, reader(TENANT)).await.unwrap();
    assert_eq!(scope.locker_id, LOCKER);
    assert_eq!(scope.tenant_id, TENANT);
    assert_eq!(scope.user_id, OWNER);

    let second = usecase.execute(CODE, reader(TENANT)).await;
    assert!(
        matches!(second, Err(AccessServiceError::AlreadyUsed)),
        "expected AlreadyUsed, got {second:?}"
    );

    let stored = store.get(CODE).await.unwrap().unwrap();
    assert_eq!(stored.status, QrStatus::Used);
    assert!(stored.used_at.is_some());
}

#[tokio::test]
async fn should_normalize_scanned_code() {
    let store = store_with(&[pending_session(CODE, 15)]).await;
    let usecase = ValidateQrSessionUseCase { sessions: store };

    let upper = format!("  {}\n", CODE.to_ascii_uppercase());
    assert!(usecase.execute(&upper, reader(TENANT)).await.is_ok());
}

#[tokio::test]
async fn should_report_unknown_code() {
    let usecase = ValidateQrSessionUseCase {
        sessions: InMemoryQrSessionStore::default(),
    };

    let result = usecase.execute("ffffffffffffffffffffffffffffffff", reader(TENANT)).await;
    assert!(matches!(result, Err(AccessServiceError::UnknownCode)));
}

#[tokio::test]
async fn should_expire_lapsed_session_and_persist_it() {
    let store = store_with(&[lapsed_session(CODE)]).await;
    let usecase = ValidateQrSessionUseCase {
        sessions: store.clone(),
    };

    let result = usecase.execute(CODE, reader(TENANT)).await;
    assert!(matches!(result, Err(AccessServiceError::Expired)));
    assert_eq!(
        store.get(CODE).await.unwrap().unwrap().status,
        QrStatus::Expired
    );

    // Stays expired; never becomes usable again.
    let again = usecase.execute(CODE, reader(TENANT)).await;
    assert!(matches!(again, Err(AccessServiceError::Expired)));
}

#[tokio::test]
async fn should_expire_after_ttl_elapses() {
    let store = InMemoryQrSessionStore::default();
    let issue = IssueQrSessionUseCase {
        lockers: InMemoryLockerDirectory::new([assigned_locker()]),
        sessions: store.clone(),
        policy: QrPolicy::default(),
    };
    let issued = issue
        .execute(IssueQrSessionInput {
            user_id: OWNER,
            caller_tenant: Some(TENANT),
            locker_id: LOCKER,
            requested_tenant: None,
            ttl_seconds: Some(1),
            as_url: false,
        })
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_secs(2)).await;

    let usecase = ValidateQrSessionUseCase { sessions: store };
    let result = usecase.execute(&issued.code, reader(TENANT)).await;
    assert!(
        matches!(result, Err(AccessServiceError::Expired)),
        "expected Expired, got {result:?}"
    );
}

#[tokio::test]
async fn should_refuse_other_tenant_without_consuming_code() {
    let store = store_with(&[pending_session(CODE, 15)]).await;
    let usecase = ValidateQrSessionUseCase {
        sessions: store.clone(),
    };

    let result = usecase.execute(CODE, reader(OTHER_TENANT)).await;
    assert!(matches!(result, Err(AccessServiceError::Forbidden)));
    assert_eq!(
        store.get(CODE).await.unwrap().unwrap().status,
        QrStatus::Pending
    );

    // The rightful reader can still redeem it.
    assert!(usecase.execute(CODE, reader(TENANT)).await.is_ok());
}

#[tokio::test]
async fn should_refuse_reader_mounted_on_another_locker() {
    let store = store_with(&[pending_session(CODE, 15)]).await;
    let usecase = ValidateQrSessionUseCase {
        sessions: store.clone(),
    };

    let elsewhere = ReaderScope {
        tenant_id: Some(TENANT),
        locker_id: Some(LockerId(8)),
    };
    let result = usecase.execute(CODE, elsewhere).await;
    assert!(matches!(result, Err(AccessServiceError::Forbidden)));

    let here = ReaderScope {
        tenant_id: Some(TENANT),
        locker_id: Some(LOCKER),
    };
    assert!(usecase.execute(CODE, here).await.is_ok());
}

#[tokio::test]
async fn should_refuse_reader_without_tenant() {
    let store = store_with(&[pending_session(CODE, 15)]).await;
    let usecase = ValidateQrSessionUseCase { sessions: store };

    let anonymous = ReaderScope {
        tenant_id: None,
        locker_id: None,
    };
    let result = usecase.execute(CODE, anonymous).await;
    assert!(matches!(result, Err(AccessServiceError::Forbidden)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn should_grant_exactly_one_of_concurrent_validations() {
    let store = store_with(&[pending_session(CODE, 60)]).await;
    let usecase = Arc::new(ValidateQrSessionUseCase {
        sessions: store.clone(),
    });

    let tasks: Vec<_> = (0..1000)
        .map(|_| {
            let usecase = Arc::clone(&usecase);
            tokio::spawn(async move { usecase.execute(CODE, reader(TENANT)).await })
        })
        .collect();
    let results = futures::future::join_all(tasks).await;

    let mut granted = 0;
    for result in results {
        match result.unwrap() {
            Ok(_) => granted += 1,
            Err(AccessServiceError::AlreadyUsed) => {}
            Err(e) => panic!("unexpected error: {e:?}"),
        }
    }
    assert_eq!(granted, 1);
    assert_eq!(
        store.get(CODE).await.unwrap().unwrap().status,
        QrStatus::Used
    );
}

// Locker 7, tenant 3: issue, redeem once, then replay.
#[tokio::test]
async fn should_walk_through_issue_redeem_replay() {
    let store = InMemoryQrSessionStore::default();
    let issue = IssueQrSessionUseCase {
        lockers: InMemoryLockerDirectory::new([assigned_locker()]),
        sessions: store.clone(),
        policy: QrPolicy::default(),
    };
    let issued = issue
        .execute(IssueQrSessionInput {
            user_id: OWNER,
            caller_tenant: Some(TENANT),
            locker_id: LockerId(7),
            requested_tenant: None,
            ttl_seconds: None,
            as_url: false,
        })
        .await
        .unwrap();
    assert_eq!(issued.ttl_seconds, 15);

    let validate = ValidateQrSessionUseCase { sessions: store };
    let scope = validate.execute(&issued.code, reader(TENANT)).await.unwrap();
    assert_eq!(scope.locker_id, LockerId(7));

    let replay = validate.execute(&issued.code, reader(TENANT)).await;
    assert!(matches!(replay, Err(AccessServiceError::AlreadyUsed)));
}
