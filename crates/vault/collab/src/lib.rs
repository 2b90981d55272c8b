//! ProofMint Collaboration Extension
//!
//! Optional multi-principal co-authorship layered on the same ledger.
//! A collaborative idea carries a signature set: the listed co-owners
//! sign one by one, and once the running count reaches the threshold
//! the idea is finalized and becomes eligible for the public feed.
//!
//! The registry implements the [`CoOwnership`] and [`FeedGate`] seams,
//! so the ledger authorizes co-owner updates and the feed engine
//! withholds unfinalized collaborative ideas without either knowing
//! this extension exists.

#![deny(unsafe_code)]

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use vault_types::{CoOwnership, FeedGate, IdeaId, Principal, VaultError, VaultResult};

/// Result of adding one signature.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignOutcome {
    /// Signature accepted, threshold not yet met.
    Accepted { signatures: u32, required: u32 },
    /// Signature accepted and the threshold is now satisfied.
    Finalized { signatures: u32 },
}

/// Validated signature requirements for a collaborative idea.
///
/// Built before the idea is submitted so that an invalid threshold is
/// rejected without touching the ledger. The creator joins the co-owner
/// list automatically; building the policy does not sign for anyone,
/// the creator included.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignaturePolicy {
    co_owners: Vec<Principal>,
    threshold: u32,
}

impl SignaturePolicy {
    pub fn new(
        creator: &Principal,
        co_owners: Vec<Principal>,
        threshold: u32,
    ) -> VaultResult<Self> {
        let mut deduped: Vec<Principal> = Vec::with_capacity(co_owners.len() + 1);
        deduped.push(creator.clone());
        for owner in co_owners {
            if !deduped.contains(&owner) {
                deduped.push(owner);
            }
        }

        if threshold == 0 {
            return Err(VaultError::InvalidInput(
                "threshold must be at least 1".into(),
            ));
        }
        if threshold as usize > deduped.len() {
            return Err(VaultError::InvalidInput(format!(
                "threshold {threshold} exceeds the {} listed co-owners",
                deduped.len()
            )));
        }

        Ok(Self {
            co_owners: deduped,
            threshold,
        })
    }
}

/// The signature requirements attached to one collaborative idea.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignatureSet {
    pub co_owners: Vec<Principal>,
    pub threshold: u32,
    pub signatures: Vec<Principal>,
    pub finalized: bool,
    pub created_at: DateTime<Utc>,
}

impl SignatureSet {
    fn count(&self) -> u32 {
        self.signatures.len() as u32
    }
}

/// Registry of signature sets, keyed by idea id.
pub struct CollabRegistry {
    inner: RwLock<HashMap<IdeaId, SignatureSet>>,
}

impl CollabRegistry {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }

    /// Attach a validated signature policy to a freshly created idea.
    ///
    /// The policy is validated before the idea exists (see
    /// [`SignaturePolicy::new`]), so registration itself cannot leave a
    /// submitted idea without its signature set.
    pub fn register(&self, idea: &IdeaId, policy: SignaturePolicy) -> VaultResult<()> {
        let mut sets = self.inner.write().map_err(|_| VaultError::LockError)?;
        let threshold = policy.threshold;
        sets.insert(
            idea.clone(),
            SignatureSet {
                co_owners: policy.co_owners,
                threshold,
                signatures: Vec::new(),
                finalized: false,
                created_at: Utc::now(),
            },
        );

        info!(idea = %idea, threshold, "collaborative signature set registered");
        Ok(())
    }

    /// Record one co-owner signature.
    pub fn sign(&self, caller: &Principal, idea: &IdeaId) -> VaultResult<SignOutcome> {
        let mut sets = self.inner.write().map_err(|_| VaultError::LockError)?;
        let set = sets
            .get_mut(idea)
            .ok_or_else(|| VaultError::NotFound(idea.to_string()))?;

        if !set.co_owners.contains(caller) {
            warn!(idea = %idea, caller = %caller, "signature rejected: not a co-owner");
            return Err(VaultError::Forbidden);
        }
        if set.signatures.contains(caller) {
            return Err(VaultError::AlreadySigned);
        }

        set.signatures.push(caller.clone());
        let signatures = set.count();

        if !set.finalized && signatures >= set.threshold {
            set.finalized = true;
            info!(idea = %idea, signatures, "collaborative idea finalized");
            return Ok(SignOutcome::Finalized { signatures });
        }

        Ok(SignOutcome::Accepted {
            signatures,
            required: set.threshold,
        })
    }

    /// Running signature count for a collaborative idea.
    pub fn signature_count(&self, idea: &IdeaId) -> VaultResult<u32> {
        let sets = self.inner.read().map_err(|_| VaultError::LockError)?;
        sets.get(idea)
            .map(SignatureSet::count)
            .ok_or_else(|| VaultError::NotFound(idea.to_string()))
    }

    /// Whether the idea has met its threshold. Non-collaborative ideas
    /// are trivially finalized.
    pub fn is_finalized(&self, idea: &IdeaId) -> bool {
        self.inner
            .read()
            .map(|sets| sets.get(idea).map_or(true, |set| set.finalized))
            .unwrap_or(false)
    }
}

impl Default for CollabRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CoOwnership for CollabRegistry {
    fn is_co_owner(&self, idea: &IdeaId, principal: &Principal) -> bool {
        self.inner
            .read()
            .map(|sets| {
                sets.get(idea)
                    .is_some_and(|set| set.co_owners.contains(principal))
            })
            .unwrap_or(false)
    }
}

impl FeedGate for CollabRegistry {
    fn is_feed_eligible(&self, idea: &IdeaId) -> bool {
        self.is_finalized(idea)
    }
}
