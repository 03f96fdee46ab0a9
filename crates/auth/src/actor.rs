use serde::{Deserialize, Serialize};

use anvil_core::UserId;

use crate::{Permission, Role};

/// The authenticated caller of an operation.
///
/// Construction is decoupled from transport: the API layer derives actors
/// from request headers, tests build them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: UserId,
    pub role: Role,
    /// Explicit grants. When empty, the actor falls back to the default
    /// permission template for its role.
    pub permissions: Vec<Permission>,
}

impl Actor {
    pub fn new(id: UserId, role: Role) -> Self {
        Self {
            id,
            role,
            permissions: Vec::new(),
        }
    }

    pub fn with_permissions(mut self, permissions: Vec<Permission>) -> Self {
        self.permissions = permissions;
        self
    }
}
