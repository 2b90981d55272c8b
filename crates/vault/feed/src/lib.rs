//! ProofMint Feed & Query Engine
//!
//! Serves paginated, filterable read-only views over the idea ledger:
//! the public feed, free-text search, and vault statistics. Every query
//! takes one consistent ledger snapshot and never mutates anything.
//!
//! Only publicly visible ideas (`Public`, or `RevealLater` once
//! revealed) ever leave this engine, so there is no private content to
//! redact on this path. Collaborative ideas are additionally withheld
//! until their signature threshold is met, resolved through the
//! [`FeedGate`] seam.

#![deny(unsafe_code)]

use std::sync::Arc;

use tracing::debug;
use vault_ledger::IdeaLedger;
use vault_types::{FeedGate, Idea, NoCoOwnership, VaultResult, VaultStats};

/// Page size applied when the caller supplies none.
pub const DEFAULT_LIMIT: usize = 50;
/// Hard cap on page size, bounding response cost.
pub const MAX_LIMIT: usize = 100;

/// Parameters for one public-feed page.
#[derive(Clone, Debug, Default)]
pub struct FeedRequest {
    /// Page size; defaults to [`DEFAULT_LIMIT`], clamped to [`MAX_LIMIT`].
    pub limit: Option<usize>,
    /// Zero-based offset into the timestamp-descending ordering.
    pub cursor: Option<usize>,
    /// Logical AND: an idea must carry every listed tag (exact match).
    pub tags: Vec<String>,
}

/// Read-only query engine over the ledger.
pub struct FeedEngine {
    ledger: Arc<IdeaLedger>,
    gate: Arc<dyn FeedGate>,
}

impl FeedEngine {
    /// Engine with no collaborative gating.
    pub fn new(ledger: Arc<IdeaLedger>) -> Self {
        Self::with_gate(ledger, Arc::new(NoCoOwnership))
    }

    /// Engine that withholds ideas the gate rules ineligible.
    pub fn with_gate(ledger: Arc<IdeaLedger>, gate: Arc<dyn FeedGate>) -> Self {
        Self { ledger, gate }
    }

    /// One page of the public feed, most recent first.
    pub fn public_feed(&self, request: &FeedRequest) -> VaultResult<Vec<Idea>> {
        let limit = clamp_limit(request.limit);
        let cursor = request.cursor.unwrap_or(0);

        let mut ideas = self.eligible_ideas()?;
        ideas.retain(|idea| {
            request
                .tags
                .iter()
                .all(|wanted| idea.tags.iter().any(|tag| tag == wanted))
        });
        sort_newest_first(&mut ideas);

        debug!(total = ideas.len(), cursor, limit, "public feed page");
        Ok(ideas.into_iter().skip(cursor).take(limit).collect())
    }

    /// Case-insensitive substring search over title, description, and
    /// tags of publicly visible ideas. An empty query matches nothing.
    pub fn search(&self, query: &str, limit: Option<usize>) -> VaultResult<Vec<Idea>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let limit = clamp_limit(limit);

        let mut ideas = self.eligible_ideas()?;
        ideas.retain(|idea| {
            idea.title.to_lowercase().contains(&needle)
                || idea.description.to_lowercase().contains(&needle)
                || idea
                    .tags
                    .iter()
                    .any(|tag| tag.to_lowercase().contains(&needle))
        });
        sort_newest_first(&mut ideas);

        Ok(ideas.into_iter().take(limit).collect())
    }

    /// Vault-wide counters, delegated to the ledger snapshot.
    pub fn stats(&self) -> VaultResult<VaultStats> {
        self.ledger.stats()
    }

    fn eligible_ideas(&self) -> VaultResult<Vec<Idea>> {
        let mut ideas = self.ledger.publicly_visible()?;
        ideas.retain(|idea| self.gate.is_feed_eligible(&idea.id));
        Ok(ideas)
    }
}

fn clamp_limit(limit: Option<usize>) -> usize {
    limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
}

/// Timestamp descending, idea id as a deterministic tiebreak so
/// pagination is stable across calls.
fn sort_newest_first(ideas: &mut [Idea]) {
    ideas.sort_by(|a, b| b.timestamp.cmp(&a.timestamp).then(b.id.cmp(&a.id)));
}
