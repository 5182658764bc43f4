//! User model.

use serde::{Deserialize, Serialize};

/// The user whose working time is calculated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Tenant the user belongs to, used to resolve settings overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant: Option<String>,
}

impl User {
    /// Creates a user without a tenant.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tenant: None,
        }
    }

    /// Creates a user belonging to the given tenant.
    pub fn with_tenant(id: impl Into<String>, tenant: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            tenant: Some(tenant.into()),
        }
    }
}
