//! Trait boundaries between the ledger, the feed engine, and extensions

use crate::{IdeaId, Principal};

/// Resolves co-ownership for mutation authorization.
///
/// The ledger consults this when a caller other than the creator attempts
/// an update. The collaboration extension implements it; deployments
/// without collaboration use [`NoCoOwnership`].
pub trait CoOwnership: Send + Sync {
    fn is_co_owner(&self, idea: &IdeaId, principal: &Principal) -> bool;
}

/// Gates which publicly-visible ideas may appear in feeds.
///
/// Collaborative ideas are withheld until their signature threshold is
/// met; every other idea is eligible as soon as it is publicly visible.
pub trait FeedGate: Send + Sync {
    fn is_feed_eligible(&self, idea: &IdeaId) -> bool;
}

/// Default resolver: no co-owners, every idea feed-eligible.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoCoOwnership;

impl CoOwnership for NoCoOwnership {
    fn is_co_owner(&self, _idea: &IdeaId, _principal: &Principal) -> bool {
        false
    }
}

impl FeedGate for NoCoOwnership {
    fn is_feed_eligible(&self, _idea: &IdeaId) -> bool {
        true
    }
}
