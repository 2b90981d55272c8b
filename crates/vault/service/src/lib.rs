//! ProofMint Vault Service - the unified operations facade
//!
//! Composes the ledger, proof registrar, feed engine, and collaboration
//! registry behind the service surface the platform bindings call.
//! Every mutating operation receives an opaque caller principal from
//! the identity layer; the service never authenticates it, only hands
//! it down for equality checks.

#![deny(unsafe_code)]

use std::sync::Arc;

use tracing::info;
use vault_collab::{CollabRegistry, SignOutcome, SignaturePolicy};
use vault_feed::{FeedEngine, FeedRequest};
use vault_ledger::IdeaLedger;
use vault_proof::{AttestationContext, ProofCertificate, ProofRecord, ProofRegistrar};
use vault_types::{
    ActivityEvent, ActivityKind, Idea, IdeaId, IdeaInput, Principal, UserProfile, VaultResult,
    VaultStats,
};

/// The vault service.
///
/// The collaboration registry doubles as the ledger's co-ownership
/// resolver and the feed engine's eligibility gate, so all three parts
/// observe the same signature state.
pub struct VaultService {
    ledger: Arc<IdeaLedger>,
    registrar: ProofRegistrar,
    feed: FeedEngine,
    collab: Arc<CollabRegistry>,
}

impl VaultService {
    /// Wire up a vault attesting under the given context.
    pub fn new(attestation: AttestationContext) -> Self {
        let collab = Arc::new(CollabRegistry::new());
        let ledger = Arc::new(IdeaLedger::with_co_ownership(collab.clone()));
        let feed = FeedEngine::with_gate(ledger.clone(), collab.clone());
        Self {
            ledger,
            registrar: ProofRegistrar::new(attestation),
            feed,
            collab,
        }
    }

    // ============ Idea Operations ============

    /// Submit a new idea; returns its assigned id.
    pub fn submit_idea(&self, caller: &Principal, input: IdeaInput) -> VaultResult<IdeaId> {
        self.ledger.submit(caller, input)
    }

    /// Replace an idea's description and tags, producing a new version.
    pub fn update_idea(
        &self,
        caller: &Principal,
        id: &IdeaId,
        description: &str,
        tags: Vec<String>,
    ) -> VaultResult<()> {
        self.ledger.update(caller, id, description, tags)
    }

    /// Disclose a `RevealLater` idea. Idempotent and safely retriable.
    pub fn reveal_idea(&self, caller: &Principal, id: &IdeaId) -> VaultResult<()> {
        self.ledger.reveal(caller, id)
    }

    /// Fetch one idea, filtered by what the caller may observe.
    pub fn get_idea(&self, caller: &Principal, id: &IdeaId) -> VaultResult<Idea> {
        self.ledger.get(caller, id)
    }

    /// All ideas owned by the caller, full content.
    pub fn get_user_ideas(&self, caller: &Principal) -> VaultResult<Vec<Idea>> {
        self.ledger.list_by_creator(caller)
    }

    // ============ Proof Operations ============

    /// Proof record for an idea's current version. Needs no content
    /// access: the proof hash survives visibility redaction.
    pub fn get_proof_record(&self, id: &IdeaId) -> VaultResult<ProofRecord> {
        let view = self.ledger.get(&Principal::anonymous(), id)?;
        Ok(self.registrar.record(&view))
    }

    /// Third-party verification: true iff the candidate hash matches
    /// the stored current-version hash. Unknown ids verify as false
    /// rather than erroring, so verifiers learn nothing extra.
    pub fn verify_idea(&self, id: &IdeaId, candidate_hash: &str) -> bool {
        match self.ledger.get(&Principal::anonymous(), id) {
            Ok(view) => self.registrar.verify(&view, candidate_hash),
            Err(_) => false,
        }
    }

    /// Exportable ownership certificate, built from the caller's
    /// visibility-filtered view: owners certify full content, everyone
    /// else certifies the public metadata.
    pub fn export_certificate(
        &self,
        caller: &Principal,
        id: &IdeaId,
    ) -> VaultResult<ProofCertificate> {
        let view = self.ledger.get(caller, id)?;
        Ok(self.registrar.certificate(&view, caller))
    }

    // ============ Feed & Query Operations ============

    /// One page of the public feed.
    pub fn get_public_feed(&self, request: &FeedRequest) -> VaultResult<Vec<Idea>> {
        self.feed.public_feed(request)
    }

    /// Case-insensitive search over publicly visible ideas.
    pub fn search(&self, query: &str, limit: Option<usize>) -> VaultResult<Vec<Idea>> {
        self.feed.search(query, limit)
    }

    /// Vault-wide counters.
    pub fn get_stats(&self) -> VaultResult<VaultStats> {
        self.feed.stats()
    }

    // ============ Profile Operations ============

    /// The caller's profile, created lazily on first request.
    pub fn get_user_profile(&self, caller: &Principal) -> VaultResult<UserProfile> {
        self.ledger.get_profile(caller)
    }

    /// Create or update the caller's display profile.
    pub fn create_user_profile(
        &self,
        caller: &Principal,
        username: Option<String>,
        email: Option<String>,
    ) -> VaultResult<UserProfile> {
        self.ledger.create_profile(caller, username, email)
    }

    /// The caller's recent journal entries, newest first.
    pub fn get_activity(&self, caller: &Principal, limit: usize) -> VaultResult<Vec<ActivityEvent>> {
        self.ledger.recent_activity(caller, limit)
    }

    // ============ Collaboration Operations ============

    /// Submit an idea under a multi-signature policy. The policy is
    /// validated before the ledger is touched, so a bad threshold never
    /// leaves a half-registered idea behind.
    pub fn create_collaborative_idea(
        &self,
        caller: &Principal,
        input: IdeaInput,
        co_owners: Vec<Principal>,
        threshold: u32,
    ) -> VaultResult<IdeaId> {
        let policy = SignaturePolicy::new(caller, co_owners, threshold)?;
        let id = self.ledger.submit(caller, input)?;
        self.collab.register(&id, policy)?;
        info!(idea = %id, threshold, "collaborative idea created");
        Ok(id)
    }

    /// Record one co-owner signature; finalization fires once the
    /// threshold is met.
    pub fn sign_collaborative_idea(
        &self,
        caller: &Principal,
        id: &IdeaId,
    ) -> VaultResult<SignOutcome> {
        let outcome = self.collab.sign(caller, id)?;
        self.ledger
            .record_activity(caller, Some(id.clone()), ActivityKind::Signed)?;
        if let SignOutcome::Finalized { .. } = outcome {
            self.ledger
                .record_activity(caller, Some(id.clone()), ActivityKind::Finalized)?;
        }
        Ok(outcome)
    }
}

impl Default for VaultService {
    fn default() -> Self {
        Self::new(AttestationContext::default())
    }
}
