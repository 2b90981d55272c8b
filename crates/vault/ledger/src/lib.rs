//! ProofMint Idea Ledger
//!
//! The authoritative, append/version store of idea records. This crate
//! provides:
//! - the single mutation gate for `submit`, `update`, and `reveal`
//! - the visibility state machine and non-owner view filtering
//! - user profile counters, maintained atomically with idea writes
//! - the append-only activity journal
//!
//! Ideas are never deleted: the vault is a provenance ledger, and
//! deleting a record would break every proof issued against it.
//! All mutations serialize through one write lock, so there is never
//! more than one in-flight mutation per record and reads observe a
//! single consistent snapshot.

#![deny(unsafe_code)]

mod store;
mod visibility;

pub use store::IdeaLedger;
pub use visibility::view_for;
