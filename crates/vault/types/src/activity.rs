//! Activity journal types
//!
//! The journal is the vault's lightweight accountability record: every
//! accepted mutation appends one event. Events are never rewritten.

use crate::{IdeaId, Principal};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of mutation an activity event records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityKind {
    Submitted,
    Updated,
    Revealed,
    Signed,
    Finalized,
    ProfileCreated,
}

/// One append-only journal entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEvent {
    /// The principal that triggered the event.
    pub principal: Principal,
    /// The idea the event concerns, absent for profile events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idea_id: Option<IdeaId>,
    pub kind: ActivityKind,
    pub at: DateTime<Utc>,
}

impl ActivityEvent {
    pub fn new(principal: Principal, idea_id: Option<IdeaId>, kind: ActivityKind) -> Self {
        Self {
            principal,
            idea_id,
            kind,
            at: Utc::now(),
        }
    }
}
