//! # HAVEN Collaborators
//!
//! External components that consume the custody ledger through its narrow
//! public surface. None of these are part of the core's trust boundary —
//! they feed it score updates and read its staked-total views, nothing
//! more:
//!
//! - **Scoring** — mirrors staking activity into per-account scores and a
//!   bounded leaderboard, wired into the ledger as its `ScoreSink`.
//! - **Verifier** — a boolean proof-check capability shared by the
//!   confidentiality and relay layers.
//! - **Confidential** — opaque commitment storage with verifier-gated
//!   reveal. A binding stand-in, not encryption.
//! - **Relay** — cross-chain payment transfer records with verifier-gated
//!   release, collateralized against the ledger's staked totals.
//!
//! ## Design Principles
//!
//! 1. The core never calls back into these modules except through the
//!    injected `ScoreSink`; everything else flows collaborator → core.
//! 2. Terminal states stick: a commitment opens at most once and a
//!    transfer leaves `Pending` at most once.
//! 3. Every public type is serializable (serde) for wire transport and
//!    persistent storage.

pub mod confidential;
pub mod relay;
pub mod scoring;
pub mod verifier;
