//! ProofMint Vault Domain Types
//!
//! This crate defines the domain types shared by every vault component:
//! ideas and their disclosure lifecycle, user profiles, the activity
//! journal, and the common error enum.
//!
//! # Key Concepts
//!
//! - **Idea**: a provenance-tracked creative submission with content,
//!   ownership, visibility, and a deterministic proof hash.
//! - **Principal**: the opaque caller identity supplied by the platform.
//!   The vault never authenticates it; it only compares it for equality
//!   against stored owners and co-owners.
//! - **Visibility**: `Private`, `Public`, or `RevealLater` with a single
//!   irreversible forward transition (the reveal).
//!
//! This is a pure types crate with no runtime dependencies. All types
//! implement `Clone`, `Debug`, `Serialize`, `Deserialize`. IDs use the
//! newtype pattern.

#![deny(unsafe_code)]

mod activity;
mod errors;
mod idea;
mod profile;
mod seams;

pub use activity::*;
pub use errors::*;
pub use idea::*;
pub use profile::*;
pub use seams::*;

use serde::{Deserialize, Serialize};

/// Opaque, comparable caller identity resolved by the platform.
///
/// Only equality ever matters to the vault. The textual form is whatever
/// the identity layer hands over (a principal string on-chain, a test
/// label in unit tests).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal(pub String);

impl Principal {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The identity used for unauthenticated read paths.
    pub fn anonymous() -> Self {
        Self("anonymous".to_string())
    }
}

impl std::fmt::Display for Principal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Stable, unique idea identifier assigned at creation. Never reused.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct IdeaId(pub String);

impl IdeaId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl std::fmt::Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
