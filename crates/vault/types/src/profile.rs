//! User profiles: aggregate counters maintained by the ledger

use crate::Principal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Aggregate view of one principal's activity, keyed by identity.
///
/// Created lazily on first profile request and updated atomically with
/// every accepted ledger mutation that changes idea counts or visibility.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub principal: Principal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub total_ideas: u64,
    /// Ideas currently observable by non-owners (public or revealed).
    pub public_ideas: u64,
    pub reputation: u64,
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(principal: Principal) -> Self {
        Self {
            principal,
            username: None,
            email: None,
            total_ideas: 0,
            public_ideas: 0,
            reputation: 0,
            created_at: Utc::now(),
        }
    }
}

/// Vault-wide counters served by `get_stats`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultStats {
    pub total_ideas: u64,
    pub public_ideas: u64,
    /// Distinct principals that own ideas or hold a profile.
    pub total_users: u64,
}
