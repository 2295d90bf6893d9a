//! Mock auth helpers for integration tests.
//!
//! Services verify `Authorization: Bearer <jwt>` themselves. `MockAuth` signs
//! tokens with the same claim layout as the login flow so tests can act as
//! any user, tenant or reader.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{EncodingKey, Header, encode};

use bodegix_auth_types::token::JwtClaims;
use bodegix_domain::id::{RoleId, TenantId, UserId};

/// Secret the test routers are built with.
pub const TEST_JWT_SECRET: &str = "bodegix-test-secret";

/// Role of the plain locker customer in the product's role table.
pub const CUSTOMER_ROLE: RoleId = RoleId(3);

/// Configurable identity encoded into test bearer tokens.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: UserId,
    pub tenant_id: Option<TenantId>,
    pub role_id: RoleId,
}

impl MockAuth {
    pub fn new(user_id: i32, tenant_id: Option<i32>) -> Self {
        Self {
            user_id: UserId(user_id),
            tenant_id: tenant_id.map(TenantId),
            role_id: CUSTOMER_ROLE,
        }
    }

    /// Sign a token valid for one hour.
    pub fn bearer_token(&self, secret: &str) -> String {
        let exp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock before epoch")
            .as_secs()
            + 3600;
        self.token_with_exp(secret, exp)
    }

    /// Sign a token with an explicit `exp`, e.g. one already in the past.
    pub fn token_with_exp(&self, secret: &str, exp: u64) -> String {
        let claims = JwtClaims {
            id: self.user_id.0,
            email: None,
            rol_id: self.role_id.0,
            empresa_id: self.tenant_id.map(|t| t.0),
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .expect("failed to sign test token")
    }
}
