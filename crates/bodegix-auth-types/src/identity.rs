//! Bearer-credential identity extractor.

use std::sync::Arc;

use axum::extract::{FromRef, FromRequestParts};
use axum_extra::headers::{Authorization, HeaderMapExt, authorization::Bearer};
use http::StatusCode;
use http::request::Parts;

use bodegix_domain::id::{RoleId, TenantId, UserId};

use crate::token::{TokenInfo, validate_access_token};

/// HMAC secret used to verify bearer tokens. Expose it from the service state
/// with `FromRef` so the [`Identity`] extractor can reach it.
#[derive(Clone)]
pub struct JwtSecret(pub Arc<str>);

impl JwtSecret {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self(secret.into())
    }
}

/// Verified caller identity taken from `Authorization: Bearer <jwt>`.
///
/// Returns 401 if the header is absent or the token fails validation.
/// Tenant and locker scoping (403) is enforced by use cases after extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub tenant_id: Option<TenantId>,
    pub role_id: RoleId,
}

impl From<TokenInfo> for Identity {
    fn from(info: TokenInfo) -> Self {
        Self {
            user_id: info.user_id,
            tenant_id: info.tenant_id,
            role_id: info.role_id,
        }
    }
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
    JwtSecret: FromRef<S>,
{
    type Rejection = StatusCode;

    // Validate synchronously and hand back a 'static future; borrowing `parts`
    // inside an `async fn` here trips over axum-core's `impl Future + Send` signature.
    fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let secret = JwtSecret::from_ref(state);
        let result = match parts.headers.typed_get::<Authorization<Bearer>>() {
            Some(auth) => validate_access_token(auth.token(), &secret.0)
                .map(Identity::from)
                .map_err(|e| {
                    tracing::debug!(error = %e, "rejected bearer token");
                    StatusCode::UNAUTHORIZED
                }),
            None => Err(StatusCode::UNAUTHORIZED),
        };

        async move { result }
    }
}
