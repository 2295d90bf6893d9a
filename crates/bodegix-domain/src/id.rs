//! Newtype wrappers for domain identifiers.
//!
//! Master data (tenants, lockers, users, roles) uses integer primary keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }
    };
}

integer_id!(
    /// Identifies a physical locker.
    LockerId
);

integer_id!(
    /// Identifies a tenant (the business owning lockers and users, "empresa" in the product).
    TenantId
);

integer_id!(
    /// Identifies a user account.
    UserId
);

integer_id!(
    /// Identifies a role assigned to a user.
    RoleId
);
