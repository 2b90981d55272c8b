//! Visibility filtering: what a given caller may observe of an idea
//!
//! Disclosure is monotonic. `Private` and `Public` are stable once set
//! at creation; `RevealLater` has exactly one forward transition (the
//! reveal) and nothing ever returns an idea to an undisclosed state.

use vault_types::{Idea, Principal};

/// Apply the visibility rule for one caller.
///
/// Owners always see everything they own. Non-owners see full content
/// only for publicly visible ideas; otherwise they get existence plus
/// metadata with the private body (description, tags, ipfs reference,
/// similarity report) blanked out. The proof hash stays visible so
/// third parties can verify authorship without content access.
pub fn view_for(idea: &Idea, caller: &Principal) -> Idea {
    if caller == &idea.creator || idea.is_publicly_visible() {
        return idea.clone();
    }

    let mut view = idea.clone();
    view.description = String::new();
    view.tags = Vec::new();
    view.ipfs_hash = None;
    view.semantic = None;
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use vault_types::{IdeaId, IdeaStatus};

    fn idea(status: IdeaStatus, revealed: bool) -> Idea {
        Idea {
            id: IdeaId::new("idea-1"),
            creator: Principal::new("alice"),
            title: "Solar Grid".into(),
            description: "P2P energy".into(),
            category: "Infrastructure".into(),
            tags: vec!["energy".into()],
            ipfs_hash: Some("Qm123".into()),
            status,
            reveal_timestamp: matches!(status, IdeaStatus::RevealLater).then(Utc::now),
            is_revealed: revealed,
            version: 1,
            timestamp: Utc::now(),
            proof_hash: "abc123".into(),
            semantic: None,
        }
    }

    #[test]
    fn owner_always_sees_full_content() {
        let record = idea(IdeaStatus::Private, false);
        let view = view_for(&record, &Principal::new("alice"));
        assert_eq!(view.description, "P2P energy");
        assert_eq!(view.ipfs_hash.as_deref(), Some("Qm123"));
    }

    #[test]
    fn non_owner_view_of_private_idea_is_metadata_only() {
        let record = idea(IdeaStatus::Private, false);
        let view = view_for(&record, &Principal::new("bob"));
        assert!(view.description.is_empty());
        assert!(view.tags.is_empty());
        assert!(view.ipfs_hash.is_none());
        // Metadata and the proof hash survive redaction.
        assert_eq!(view.title, "Solar Grid");
        assert_eq!(view.proof_hash, "abc123");
        assert_eq!(view.status, IdeaStatus::Private);
    }

    #[test]
    fn unrevealed_idea_is_redacted_for_non_owners() {
        let record = idea(IdeaStatus::RevealLater, false);
        let view = view_for(&record, &Principal::new("bob"));
        assert!(view.description.is_empty());
        assert!(view.reveal_timestamp.is_some());
    }

    #[test]
    fn revealed_idea_is_fully_visible_to_anyone() {
        let record = idea(IdeaStatus::RevealLater, true);
        let view = view_for(&record, &Principal::anonymous());
        assert_eq!(view.description, "P2P energy");
    }

    #[test]
    fn public_idea_is_fully_visible_to_anyone() {
        let record = idea(IdeaStatus::Public, false);
        let view = view_for(&record, &Principal::new("bob"));
        assert_eq!(view.description, "P2P energy");
    }
}
