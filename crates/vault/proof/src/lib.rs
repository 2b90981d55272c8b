//! ProofMint Proof Registrar
//!
//! Derives the deterministic, content-addressable proof hash for each
//! idea version and serves proof records and exportable ownership
//! certificates. The hash is a pure function of the immutable identity
//! fields plus the content snapshot at one version, so any third party
//! holding the same snapshot can recompute it off-platform. That
//! recomputability is the timestamping guarantee the whole vault sells.

#![deny(unsafe_code)]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use vault_types::{Idea, Principal, VaultError, VaultResult};

/// Domain separator for proof hashing. Changing it invalidates every
/// previously issued hash, so it is versioned.
const PROOF_DOMAIN: &[u8] = b"proofmint-idea-proof-v1:";

/// The exact inputs the proof hash commits to.
///
/// Field order is fixed by the struct definition and `serde_json`
/// preserves it, so the encoding is canonical without extra machinery.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofSnapshot {
    pub creator: Principal,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tags: Vec<String>,
    pub version: u64,
}

impl ProofSnapshot {
    /// Capture the hash inputs of an idea at its current version.
    pub fn of(idea: &Idea) -> Self {
        Self {
            creator: idea.creator.clone(),
            title: idea.title.clone(),
            description: idea.description.clone(),
            category: idea.category.clone(),
            tags: idea.tags.clone(),
            version: idea.version,
        }
    }
}

/// Compute the hex-encoded proof hash for a snapshot.
///
/// blake3 over the domain separator plus the canonical JSON encoding.
/// Identical snapshots always yield identical digests.
pub fn proof_hash(snapshot: &ProofSnapshot) -> VaultResult<String> {
    let encoded = serde_json::to_vec(snapshot)
        .map_err(|error| VaultError::InvalidInput(format!("unencodable snapshot: {error}")))?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(PROOF_DOMAIN);
    hasher.update(&encoded);
    Ok(hasher.finalize().to_hex().to_string())
}

/// Chain-level attestation metadata stamped onto proof records.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttestationContext {
    pub network: String,
    pub canister_id: String,
    pub block_height: u64,
}

impl Default for AttestationContext {
    fn default() -> Self {
        Self {
            network: "Internet Computer".to_string(),
            canister_id: "idea-vault".to_string(),
            block_height: 0,
        }
    }
}

/// Read-only projection of an idea version plus attestation fields.
///
/// Produced on demand, never stored: everything in it is derivable from
/// the ledger record and the registrar's attestation context.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofRecord {
    pub idea_id: vault_types::IdeaId,
    pub version: u64,
    pub proof_hash: String,
    pub creator: Principal,
    pub timestamp: DateTime<Utc>,
    pub block_height: u64,
    pub network: String,
    pub canister_id: String,
    pub is_verified: bool,
}

/// Exportable ownership certificate for an idea.
///
/// Mirrors what a verifier needs to check authorship and timestamp
/// without trusting the vault: the visible idea snapshot, the proof
/// hash, and the attestation context it was served under.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofCertificate {
    pub certificate_type: String,
    pub idea: Idea,
    pub proof: ProofRecord,
    pub generated_by: Principal,
    pub generated_at: DateTime<Utc>,
}

/// Derives and serves proof hashes, records, and certificates.
pub struct ProofRegistrar {
    attestation: AttestationContext,
}

impl ProofRegistrar {
    pub fn new(attestation: AttestationContext) -> Self {
        Self { attestation }
    }

    /// Build the proof record for an idea's current version.
    pub fn record(&self, idea: &Idea) -> ProofRecord {
        ProofRecord {
            idea_id: idea.id.clone(),
            version: idea.version,
            proof_hash: idea.proof_hash.clone(),
            creator: idea.creator.clone(),
            timestamp: idea.timestamp,
            block_height: self.attestation.block_height,
            network: self.attestation.network.clone(),
            canister_id: self.attestation.canister_id.clone(),
            is_verified: true,
        }
    }

    /// True iff the candidate matches the stored current-version hash.
    ///
    /// Hex comparison is case-insensitive so externally recomputed
    /// digests verify regardless of formatting.
    pub fn verify(&self, idea: &Idea, candidate_hash: &str) -> bool {
        idea.proof_hash.eq_ignore_ascii_case(candidate_hash.trim())
    }

    /// Assemble an exportable certificate from a visibility-filtered view.
    pub fn certificate(&self, idea: &Idea, generated_by: &Principal) -> ProofCertificate {
        ProofCertificate {
            certificate_type: "Idea Ownership Certificate".to_string(),
            idea: idea.clone(),
            proof: self.record(idea),
            generated_by: generated_by.clone(),
            generated_at: Utc::now(),
        }
    }
}

impl Default for ProofRegistrar {
    fn default() -> Self {
        Self::new(AttestationContext::default())
    }
}
