//! The in-memory idea store and its mutation gate

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use chrono::Utc;
use tracing::{debug, info, warn};
use vault_proof::{proof_hash, ProofSnapshot};
use vault_types::{
    ActivityEvent, ActivityKind, CoOwnership, Idea, IdeaId, IdeaInput, IdeaStatus, NoCoOwnership,
    Principal, UserProfile, VaultError, VaultResult, VaultStats,
};

use crate::visibility::view_for;

/// Reputation awarded per accepted submission.
const REPUTATION_PER_IDEA: u64 = 10;
/// Extra reputation when an idea becomes publicly visible.
const REPUTATION_PER_DISCLOSURE: u64 = 5;

/// The authoritative idea ledger.
///
/// One `RwLock` guards the whole vault state, so profile counters, the
/// journal, and idea records can never disagree: a mutation either
/// commits all of its effects or none of them.
pub struct IdeaLedger {
    co_owners: Arc<dyn CoOwnership>,
    inner: RwLock<VaultState>,
}

#[derive(Default)]
struct VaultState {
    ideas: HashMap<IdeaId, Idea>,
    by_creator: HashMap<Principal, Vec<IdeaId>>,
    profiles: HashMap<Principal, UserProfile>,
    journal: Vec<ActivityEvent>,
}

impl IdeaLedger {
    /// Create a ledger with no co-ownership resolver.
    pub fn new() -> Self {
        Self::with_co_ownership(Arc::new(NoCoOwnership))
    }

    /// Create a ledger that consults the given resolver for update
    /// authorization beyond the creator.
    pub fn with_co_ownership(co_owners: Arc<dyn CoOwnership>) -> Self {
        Self {
            co_owners,
            inner: RwLock::new(VaultState::default()),
        }
    }

    /// Submit a new idea. Assigns the id, fixes the visibility state,
    /// stamps the server-side timestamp, and computes the version-1
    /// proof hash.
    pub fn submit(&self, creator: &Principal, input: IdeaInput) -> VaultResult<IdeaId> {
        input.validate()?;

        let mut idea = Idea {
            id: IdeaId::generate(),
            creator: creator.clone(),
            title: input.title.trim().to_string(),
            description: input.description.trim().to_string(),
            category: input.category.trim().to_string(),
            tags: input.tags,
            ipfs_hash: input.ipfs_hash,
            status: input.status,
            reveal_timestamp: input.reveal_timestamp,
            is_revealed: false,
            version: 1,
            timestamp: Utc::now(),
            proof_hash: String::new(),
            semantic: input.semantic,
        };
        idea.proof_hash = proof_hash(&ProofSnapshot::of(&idea))?;

        let id = idea.id.clone();
        let publicly_visible = idea.is_publicly_visible();

        let mut state = self.inner.write().map_err(|_| VaultError::LockError)?;
        state
            .by_creator
            .entry(creator.clone())
            .or_default()
            .push(id.clone());

        let profile = state
            .profiles
            .entry(creator.clone())
            .or_insert_with(|| UserProfile::new(creator.clone()));
        profile.total_ideas += 1;
        profile.reputation += REPUTATION_PER_IDEA;
        if publicly_visible {
            profile.public_ideas += 1;
            profile.reputation += REPUTATION_PER_DISCLOSURE;
        }

        state.ideas.insert(id.clone(), idea);
        state.journal.push(ActivityEvent::new(
            creator.clone(),
            Some(id.clone()),
            ActivityKind::Submitted,
        ));

        info!(idea = %id, creator = %creator, status = ?input.status, "idea submitted");
        Ok(id)
    }

    /// Replace the description and tags of an existing idea.
    ///
    /// Increments the version by exactly one and recomputes the proof
    /// hash; status and reveal state are preserved unchanged.
    pub fn update(
        &self,
        caller: &Principal,
        id: &IdeaId,
        new_description: &str,
        new_tags: Vec<String>,
    ) -> VaultResult<()> {
        let mut state = self.inner.write().map_err(|_| VaultError::LockError)?;
        let idea = state
            .ideas
            .get_mut(id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;

        if caller != &idea.creator && !self.co_owners.is_co_owner(id, caller) {
            warn!(idea = %id, caller = %caller, "update rejected: not an owner");
            return Err(VaultError::Forbidden);
        }
        if new_description.trim().is_empty() {
            return Err(VaultError::InvalidInput(
                "description must not be empty".into(),
            ));
        }

        idea.description = new_description.trim().to_string();
        idea.tags = new_tags;
        idea.version += 1;
        idea.proof_hash = proof_hash(&ProofSnapshot::of(idea))?;
        let version = idea.version;

        state.journal.push(ActivityEvent::new(
            caller.clone(),
            Some(id.clone()),
            ActivityKind::Updated,
        ));

        info!(idea = %id, caller = %caller, version, "idea updated");
        Ok(())
    }

    /// Disclose a `RevealLater` idea.
    ///
    /// Idempotent: a second reveal is a no-op success and never alters
    /// the advisory deadline, so callers can retry safely. The deadline
    /// itself never triggers anything; disclosure always takes this
    /// explicit call.
    pub fn reveal(&self, caller: &Principal, id: &IdeaId) -> VaultResult<()> {
        let mut state = self.inner.write().map_err(|_| VaultError::LockError)?;
        let idea = state
            .ideas
            .get_mut(id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;

        if caller != &idea.creator {
            warn!(idea = %id, caller = %caller, "reveal rejected: not the creator");
            return Err(VaultError::Forbidden);
        }
        match idea.status {
            IdeaStatus::RevealLater => {}
            other => {
                return Err(VaultError::InvalidState(format!(
                    "cannot reveal an idea with status {other:?}"
                )))
            }
        }
        if idea.is_revealed {
            debug!(idea = %id, "reveal repeated; already disclosed");
            return Ok(());
        }

        idea.is_revealed = true;
        let creator = idea.creator.clone();

        let profile = state
            .profiles
            .entry(creator.clone())
            .or_insert_with(|| UserProfile::new(creator.clone()));
        profile.public_ideas += 1;
        profile.reputation += REPUTATION_PER_DISCLOSURE;

        state.journal.push(ActivityEvent::new(
            caller.clone(),
            Some(id.clone()),
            ActivityKind::Revealed,
        ));

        info!(idea = %id, "idea revealed");
        Ok(())
    }

    /// Fetch one idea, filtered by what the caller may observe.
    pub fn get(&self, caller: &Principal, id: &IdeaId) -> VaultResult<Idea> {
        let state = self.inner.read().map_err(|_| VaultError::LockError)?;
        let idea = state
            .ideas
            .get(id)
            .ok_or_else(|| VaultError::NotFound(id.to_string()))?;
        Ok(view_for(idea, caller))
    }

    /// All ideas owned by the caller, full content, newest first.
    pub fn list_by_creator(&self, caller: &Principal) -> VaultResult<Vec<Idea>> {
        let state = self.inner.read().map_err(|_| VaultError::LockError)?;
        let mut ideas: Vec<Idea> = state
            .by_creator
            .get(caller)
            .into_iter()
            .flatten()
            .filter_map(|id| state.ideas.get(id))
            .cloned()
            .collect();
        ideas.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
        Ok(ideas)
    }

    /// All publicly visible ideas, full content, one consistent snapshot.
    pub fn publicly_visible(&self) -> VaultResult<Vec<Idea>> {
        let state = self.inner.read().map_err(|_| VaultError::LockError)?;
        Ok(state
            .ideas
            .values()
            .filter(|idea| idea.is_publicly_visible())
            .cloned()
            .collect())
    }

    /// Visibility is fixed at creation; the interface deliberately has
    /// no post-creation status change.
    pub fn change_status(
        &self,
        _caller: &Principal,
        _id: &IdeaId,
        _status: IdeaStatus,
    ) -> VaultResult<()> {
        Err(VaultError::Unsupported(
            "visibility is fixed at creation".into(),
        ))
    }

    /// Fetch the caller's profile, creating an empty one on first request.
    pub fn get_profile(&self, principal: &Principal) -> VaultResult<UserProfile> {
        let mut state = self.inner.write().map_err(|_| VaultError::LockError)?;
        Ok(state
            .profiles
            .entry(principal.clone())
            .or_insert_with(|| UserProfile::new(principal.clone()))
            .clone())
    }

    /// Create or update the caller's display profile.
    pub fn create_profile(
        &self,
        principal: &Principal,
        username: Option<String>,
        email: Option<String>,
    ) -> VaultResult<UserProfile> {
        let mut state = self.inner.write().map_err(|_| VaultError::LockError)?;
        let freshly_created = !state.profiles.contains_key(principal);

        let profile = state
            .profiles
            .entry(principal.clone())
            .or_insert_with(|| UserProfile::new(principal.clone()));
        profile.username = username;
        profile.email = email;
        let snapshot = profile.clone();

        if freshly_created {
            state.journal.push(ActivityEvent::new(
                principal.clone(),
                None,
                ActivityKind::ProfileCreated,
            ));
        }

        info!(principal = %principal, "profile saved");
        Ok(snapshot)
    }

    /// Vault-wide counters.
    pub fn stats(&self) -> VaultResult<VaultStats> {
        let state = self.inner.read().map_err(|_| VaultError::LockError)?;
        let users: HashSet<&Principal> = state
            .by_creator
            .keys()
            .chain(state.profiles.keys())
            .collect();
        Ok(VaultStats {
            total_ideas: state.ideas.len() as u64,
            public_ideas: state
                .ideas
                .values()
                .filter(|idea| idea.is_publicly_visible())
                .count() as u64,
            total_users: users.len() as u64,
        })
    }

    /// The caller's journal entries, newest first, capped at `limit`.
    pub fn recent_activity(
        &self,
        principal: &Principal,
        limit: usize,
    ) -> VaultResult<Vec<ActivityEvent>> {
        let state = self.inner.read().map_err(|_| VaultError::LockError)?;
        Ok(state
            .journal
            .iter()
            .rev()
            .filter(|event| &event.principal == principal)
            .take(limit)
            .cloned()
            .collect())
    }

    /// Append a journal entry on behalf of an extension (the
    /// collaboration registry records signatures through this).
    pub fn record_activity(
        &self,
        principal: &Principal,
        idea_id: Option<IdeaId>,
        kind: ActivityKind,
    ) -> VaultResult<()> {
        let mut state = self.inner.write().map_err(|_| VaultError::LockError)?;
        state
            .journal
            .push(ActivityEvent::new(principal.clone(), idea_id, kind));
        Ok(())
    }
}

impl Default for IdeaLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn alice() -> Principal {
        Principal::new("alice")
    }

    fn bob() -> Principal {
        Principal::new("bob")
    }

    fn public_input() -> IdeaInput {
        IdeaInput {
            title: "Solar Grid".into(),
            description: "P2P energy".into(),
            category: "Infrastructure".into(),
            tags: vec!["energy".into()],
            ipfs_hash: None,
            status: IdeaStatus::Public,
            reveal_timestamp: None,
            semantic: None,
        }
    }

    fn reveal_later_input() -> IdeaInput {
        IdeaInput {
            status: IdeaStatus::RevealLater,
            reveal_timestamp: Some(Utc::now() + Duration::hours(24)),
            ..public_input()
        }
    }

    #[test]
    fn submit_assigns_version_one_and_a_proof_hash() {
        let ledger = IdeaLedger::new();
        let id = ledger.submit(&alice(), public_input()).unwrap();

        let idea = ledger.get(&alice(), &id).unwrap();
        assert_eq!(idea.version, 1);
        assert!(!idea.proof_hash.is_empty());
        assert_eq!(idea.creator, alice());
    }

    #[test]
    fn submit_rejects_empty_required_fields() {
        let ledger = IdeaLedger::new();
        let mut payload = public_input();
        payload.description = "".into();
        assert!(matches!(
            ledger.submit(&alice(), payload),
            Err(VaultError::InvalidInput(_))
        ));
    }

    #[test]
    fn update_bumps_version_by_one_and_changes_the_hash() {
        let ledger = IdeaLedger::new();
        let id = ledger.submit(&alice(), public_input()).unwrap();
        let before = ledger.get(&alice(), &id).unwrap();

        ledger
            .update(&alice(), &id, "new desc", vec!["a".into(), "b".into()])
            .unwrap();

        let after = ledger.get(&alice(), &id).unwrap();
        assert_eq!(after.version, 2);
        assert_ne!(after.proof_hash, before.proof_hash);
        assert_eq!(after.status, before.status);
        assert_eq!(after.timestamp, before.timestamp);
    }

    #[test]
    fn update_by_non_owner_is_forbidden() {
        let ledger = IdeaLedger::new();
        let id = ledger.submit(&alice(), public_input()).unwrap();
        assert_eq!(
            ledger.update(&bob(), &id, "hijack", vec![]),
            Err(VaultError::Forbidden)
        );
        // The record is untouched.
        let idea = ledger.get(&alice(), &id).unwrap();
        assert_eq!(idea.version, 1);
        assert_eq!(idea.description, "P2P energy");
    }

    #[test]
    fn update_of_unknown_id_is_not_found() {
        let ledger = IdeaLedger::new();
        assert!(matches!(
            ledger.update(&alice(), &IdeaId::new("missing"), "x", vec![]),
            Err(VaultError::NotFound(_))
        ));
    }

    #[test]
    fn a_co_owner_may_update() {
        struct BobIsCoOwner;
        impl CoOwnership for BobIsCoOwner {
            fn is_co_owner(&self, _idea: &IdeaId, principal: &Principal) -> bool {
                principal == &Principal::new("bob")
            }
        }

        let ledger = IdeaLedger::with_co_ownership(Arc::new(BobIsCoOwner));
        let id = ledger.submit(&alice(), public_input()).unwrap();
        ledger.update(&bob(), &id, "joint revision", vec![]).unwrap();
        assert_eq!(ledger.get(&alice(), &id).unwrap().version, 2);
    }

    #[test]
    fn private_idea_is_redacted_for_non_owners() {
        let ledger = IdeaLedger::new();
        let mut payload = public_input();
        payload.status = IdeaStatus::Private;
        let id = ledger.submit(&alice(), payload).unwrap();

        let view = ledger.get(&bob(), &id).unwrap();
        assert!(view.description.is_empty());
        assert_eq!(view.title, "Solar Grid");
    }

    #[test]
    fn reveal_is_creator_only_and_idempotent() {
        let ledger = IdeaLedger::new();
        let id = ledger.submit(&alice(), reveal_later_input()).unwrap();

        assert_eq!(ledger.reveal(&bob(), &id), Err(VaultError::Forbidden));

        ledger.reveal(&alice(), &id).unwrap();
        let revealed = ledger.get(&bob(), &id).unwrap();
        assert!(revealed.is_revealed);
        assert_eq!(revealed.description, "P2P energy");

        // Second reveal: no-op success, deadline untouched.
        let deadline = revealed.reveal_timestamp;
        ledger.reveal(&alice(), &id).unwrap();
        let again = ledger.get(&bob(), &id).unwrap();
        assert_eq!(again.reveal_timestamp, deadline);

        // The public counter moved exactly once.
        let profile = ledger.get_profile(&alice()).unwrap();
        assert_eq!(profile.public_ideas, 1);
    }

    #[test]
    fn reveal_of_non_reveal_later_idea_is_invalid_state() {
        let ledger = IdeaLedger::new();
        let id = ledger.submit(&alice(), public_input()).unwrap();
        assert!(matches!(
            ledger.reveal(&alice(), &id),
            Err(VaultError::InvalidState(_))
        ));
    }

    #[test]
    fn change_status_is_unsupported() {
        let ledger = IdeaLedger::new();
        let id = ledger.submit(&alice(), public_input()).unwrap();
        assert!(matches!(
            ledger.change_status(&alice(), &id, IdeaStatus::Private),
            Err(VaultError::Unsupported(_))
        ));
    }

    #[test]
    fn profile_counters_track_submissions_and_disclosures() {
        let ledger = IdeaLedger::new();
        ledger.submit(&alice(), public_input()).unwrap();
        let id = ledger.submit(&alice(), reveal_later_input()).unwrap();

        let profile = ledger.get_profile(&alice()).unwrap();
        assert_eq!(profile.total_ideas, 2);
        assert_eq!(profile.public_ideas, 1);
        assert_eq!(
            profile.reputation,
            2 * REPUTATION_PER_IDEA + REPUTATION_PER_DISCLOSURE
        );

        ledger.reveal(&alice(), &id).unwrap();
        let profile = ledger.get_profile(&alice()).unwrap();
        assert_eq!(profile.public_ideas, 2);
    }

    #[test]
    fn stats_count_distinct_users_across_owners_and_profiles() {
        let ledger = IdeaLedger::new();
        ledger.submit(&alice(), public_input()).unwrap();
        let mut private = public_input();
        private.status = IdeaStatus::Private;
        ledger.submit(&bob(), private).unwrap();
        ledger.get_profile(&Principal::new("carol")).unwrap();

        let stats = ledger.stats().unwrap();
        assert_eq!(stats.total_ideas, 2);
        assert_eq!(stats.public_ideas, 1);
        assert_eq!(stats.total_users, 3);
    }

    #[test]
    fn journal_records_mutations_newest_first() {
        let ledger = IdeaLedger::new();
        let id = ledger.submit(&alice(), public_input()).unwrap();
        ledger.update(&alice(), &id, "second pass", vec![]).unwrap();

        let events = ledger.recent_activity(&alice(), 10).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].kind, ActivityKind::Updated);
        assert_eq!(events[1].kind, ActivityKind::Submitted);
    }

    #[test]
    fn list_by_creator_returns_full_content() {
        let ledger = IdeaLedger::new();
        let mut private = public_input();
        private.status = IdeaStatus::Private;
        ledger.submit(&alice(), private).unwrap();

        let ideas = ledger.list_by_creator(&alice()).unwrap();
        assert_eq!(ideas.len(), 1);
        assert_eq!(ideas[0].description, "P2P energy");
        assert!(ledger.list_by_creator(&bob()).unwrap().is_empty());
    }
}
