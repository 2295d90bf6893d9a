//! JWT bearer-token validation.

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
#[cfg(any(feature = "USE_ONLY_IN_TESTS", test))]
use serde::Serialize;

use bodegix_domain::id::{RoleId, TenantId, UserId};

/// Verified caller context extracted from a bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenInfo {
    pub user_id: UserId,
    /// `None` for platform-level accounts that do not belong to a tenant.
    pub tenant_id: Option<TenantId>,
    pub role_id: RoleId,
    pub exp: u64,
}

/// Errors returned by [`validate_access_token`].
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error("token expired")]
    Expired,
    #[error("malformed token")]
    Malformed,
}

/// JWT claims payload as signed by the product's login flow.
///
/// | Field | JWT claim | Meaning |
/// |-------|-----------|---------|
/// | `id` | `id` | user ID |
/// | `rol_id` | `rol_id` | role ID |
/// | `empresa_id` | `empresa_id` | tenant ID, `null` for platform accounts |
/// | `exp` | `exp` | seconds since epoch |
///
/// [`Serialize`] requires the **`USE_ONLY_IN_TESTS`** cargo feature.
#[derive(Debug, Deserialize)]
#[cfg_attr(any(feature = "USE_ONLY_IN_TESTS", test), derive(Serialize))]
pub struct JwtClaims {
    pub id: i32,
    #[serde(default)]
    pub email: Option<String>,
    pub rol_id: i32,
    #[serde(default)]
    pub empresa_id: Option<i32>,
    pub exp: u64,
}

/// HS256, `exp` required and checked with the default 60s leeway.
fn decode_jwt(token: &str, secret: &str) -> Result<JwtClaims, AuthError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp"]);

    let data = decode::<JwtClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidSignature
        | jsonwebtoken::errors::ErrorKind::InvalidEcdsaKey
        | jsonwebtoken::errors::ErrorKind::InvalidRsaKey(_) => AuthError::InvalidSignature,
        _ => AuthError::Malformed,
    })?;

    Ok(data.claims)
}

/// Validate a bearer token, returning the caller's identity.
pub fn validate_access_token(token: &str, secret: &str) -> Result<TokenInfo, AuthError> {
    let claims = decode_jwt(token, secret)?;
    Ok(TokenInfo {
        user_id: UserId(claims.id),
        tenant_id: claims.empresa_id.map(TenantId),
        role_id: RoleId(claims.rol_id),
        exp: claims.exp,
    })
}
