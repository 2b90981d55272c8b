//! Idea records: content, visibility lifecycle, and submission input
//!
//! An idea is the unit of provenance. Once submitted it is never deleted;
//! content changes produce new versions and a recomputed proof hash so
//! that every historical attestation stays checkable.

use crate::{Principal, VaultError, VaultResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Disclosure lifecycle of an idea, fixed at creation.
///
/// `RevealLater` is the only state with a forward transition: an explicit
/// reveal flips `Idea::is_revealed` and nothing ever flips it back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdeaStatus {
    Private,
    Public,
    RevealLater,
}

/// Risk tier reported by the external similarity oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Similarity report attached at submission time.
///
/// Informational only: the vault persists it verbatim and never
/// recomputes or trusts it for access control.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticReport {
    /// Similarity score in the 0-100 range.
    pub score: u8,
    /// Risk tier derived from the score by the oracle.
    pub risk: RiskLevel,
    /// Human-readable note from the oracle, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// A provenance-tracked idea record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    /// Stable unique identifier, immutable.
    pub id: crate::IdeaId,
    /// Identity that created the idea; sole owner for mutation purposes
    /// unless the collaboration extension adds co-owners.
    pub creator: Principal,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Ordered, non-unique tag sequence.
    pub tags: Vec<String>,
    /// Optional external content reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_hash: Option<String>,
    pub status: IdeaStatus,
    /// Advisory disclosure deadline; present only for `RevealLater`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_timestamp: Option<DateTime<Utc>>,
    /// True only once a `RevealLater` idea has been disclosed.
    pub is_revealed: bool,
    /// Starts at 1, incremented on every accepted content mutation.
    pub version: u64,
    /// Creation time, assigned server-side, immutable.
    pub timestamp: DateTime<Utc>,
    /// Deterministic digest over the identity + content snapshot at the
    /// current version, hex encoded.
    pub proof_hash: String,
    /// Optional similarity report from the external oracle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticReport>,
}

impl Idea {
    /// Whether full content is currently observable by non-owners.
    pub fn is_publicly_visible(&self) -> bool {
        match self.status {
            IdeaStatus::Public => true,
            IdeaStatus::RevealLater => self.is_revealed,
            IdeaStatus::Private => false,
        }
    }
}

/// Caller-supplied creation payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaInput {
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipfs_hash: Option<String>,
    pub status: IdeaStatus,
    /// Required iff `status` is `RevealLater`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal_timestamp: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub semantic: Option<SemanticReport>,
}

impl IdeaInput {
    /// Validate the payload before it reaches the ledger.
    ///
    /// The status/deadline coupling is enforced at the door rather than
    /// normalized away, so a mismatched payload is rejected outright.
    pub fn validate(&self) -> VaultResult<()> {
        if self.title.trim().is_empty() {
            return Err(VaultError::InvalidInput("title must not be empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(VaultError::InvalidInput(
                "description must not be empty".into(),
            ));
        }
        match (self.status, self.reveal_timestamp) {
            (IdeaStatus::RevealLater, None) => Err(VaultError::InvalidInput(
                "RevealLater requires a reveal timestamp".into(),
            )),
            (IdeaStatus::Private | IdeaStatus::Public, Some(_)) => Err(VaultError::InvalidInput(
                "reveal timestamp is only valid for RevealLater".into(),
            )),
            _ => {
                if let Some(report) = &self.semantic {
                    if report.score > 100 {
                        return Err(VaultError::InvalidInput(
                            "semantic score must be in the 0-100 range".into(),
                        ));
                    }
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(status: IdeaStatus) -> IdeaInput {
        IdeaInput {
            title: "Solar Grid".into(),
            description: "P2P energy".into(),
            category: "Infrastructure".into(),
            tags: vec!["energy".into()],
            ipfs_hash: None,
            status,
            reveal_timestamp: None,
            semantic: None,
        }
    }

    #[test]
    fn valid_public_input_passes() {
        input(IdeaStatus::Public).validate().unwrap();
    }

    #[test]
    fn empty_title_is_rejected() {
        let mut payload = input(IdeaStatus::Public);
        payload.title = "   ".into();
        assert!(matches!(
            payload.validate(),
            Err(VaultError::InvalidInput(_))
        ));
    }

    #[test]
    fn reveal_later_requires_deadline() {
        let payload = input(IdeaStatus::RevealLater);
        assert!(matches!(
            payload.validate(),
            Err(VaultError::InvalidInput(_))
        ));
    }

    #[test]
    fn deadline_on_public_idea_is_rejected() {
        let mut payload = input(IdeaStatus::Public);
        payload.reveal_timestamp = Some(Utc::now());
        assert!(matches!(
            payload.validate(),
            Err(VaultError::InvalidInput(_))
        ));
    }

    #[test]
    fn oversized_semantic_score_is_rejected() {
        let mut payload = input(IdeaStatus::Public);
        payload.semantic = Some(SemanticReport {
            score: 101,
            risk: RiskLevel::High,
            message: None,
        });
        assert!(matches!(
            payload.validate(),
            Err(VaultError::InvalidInput(_))
        ));
    }

    #[test]
    fn risk_levels_serialize_in_oracle_wire_form() {
        assert_eq!(
            serde_json::to_string(&RiskLevel::Medium).unwrap(),
            "\"MEDIUM\""
        );
    }
}
