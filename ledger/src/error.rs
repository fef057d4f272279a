//! # Error Taxonomy
//!
//! Every fallible ledger operation returns a [`LedgerError`]. The enum is
//! exhaustive over the failure modes of the lifecycle, governance, and
//! accrual paths, and each variant carries enough context to act on the
//! failure without re-querying the ledger.
//!
//! Errors fall into four categories (see [`ErrorCategory`]):
//!
//! - **Validation** — caller-correctable precondition failures. Fix the
//!   request and retry if you like; the core never retries for you.
//! - **Authorization** — wrong caller identity. Not retryable as-is.
//! - **Lifecycle** — the stake exists in a state that forbids the
//!   operation (closed, immature, missing).
//! - **Invariant** — the ledger's own bookkeeping is inconsistent. This is
//!   a bug, not a user error, and it is surfaced loudly on purpose.
//!
//! No variant here implies partial state: an operation that returns an
//! error has applied none of its effects.

use thiserror::Error;

use crate::stake::{Account, StakeId};

/// Coarse classification of a [`LedgerError`], used by callers (e.g. the
/// HTTP surface) to pick a response class without matching every variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Precondition failure the caller can correct.
    Validation,
    /// Caller identity does not authorize the operation.
    Authorization,
    /// The stake's current state forbids the operation.
    Lifecycle,
    /// Internal bookkeeping inconsistency — a bug, not a bad request.
    Invariant,
}

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// The ledger is paused; no new stakes are admitted.
    #[error("ledger is paused: new stakes are not being admitted")]
    Paused,

    /// The principal is outside the configured admission window.
    #[error("amount out of range: {amount} not in [{min}, {max}]")]
    AmountOutOfRange {
        /// The principal the caller tried to stake.
        amount: u64,
        /// Configured minimum stake.
        min: u64,
        /// Configured maximum stake.
        max: u64,
    },

    /// The lock duration is outside the allowed window.
    #[error("duration out of range: {days} days not in [{min}, {max}]")]
    DurationOutOfRange {
        /// The duration the caller requested, in days.
        days: u32,
        /// Minimum allowed duration in days.
        min: u32,
        /// Maximum allowed duration in days.
        max: u32,
    },

    /// Governance tried to set a rate above the hard cap.
    #[error("rate too high: {requested} bps exceeds cap of {max} bps")]
    RateTooHigh {
        /// The rate that was requested, in basis points.
        requested: u32,
        /// The hard cap, in basis points.
        max: u32,
    },

    /// The caller is not the configured administrator.
    #[error("not admin: {caller} may not change ledger parameters")]
    NotAdmin {
        /// The identity that made the call.
        caller: Account,
    },

    /// No stake exists with the given id.
    #[error("stake not found: {stake_id}")]
    NotFound {
        /// The id that was looked up.
        stake_id: StakeId,
    },

    /// The stake exists but belongs to a different account.
    #[error("not owner: stake {stake_id} does not belong to {caller}")]
    NotOwner {
        /// The stake in question.
        stake_id: StakeId,
        /// The identity that made the call.
        caller: Account,
    },

    /// The stake has already been closed. Terminal means terminal.
    #[error("stake {stake_id} is already closed")]
    AlreadyClosed {
        /// The stake in question.
        stake_id: StakeId,
    },

    /// The stake has not yet reached its committed duration.
    #[error(
        "stake {stake_id} not matured: {elapsed_secs}s elapsed of {required_secs}s required"
    )]
    NotMatured {
        /// The stake in question.
        stake_id: StakeId,
        /// Seconds elapsed since creation (floored at zero).
        elapsed_secs: u64,
        /// Seconds the lock requires.
        required_secs: u64,
    },

    /// Accrual bookkeeping is inconsistent: the gross reward computed for
    /// this instant is below what has already been claimed. This cannot
    /// arise from the documented operations and is never clamped away —
    /// it signals a broken non-decreasing-claims invariant.
    #[error(
        "negative reward on stake {stake_id}: gross accrued {gross} below claimed {claimed}"
    )]
    NegativeReward {
        /// The stake in question.
        stake_id: StakeId,
        /// Gross reward accrued as of this computation.
        gross: u64,
        /// Rewards already claimed on the stake.
        claimed: u64,
    },

    /// An arithmetic result does not fit the ledger's amount width.
    #[error("amount overflow: operation result exceeds the representable range")]
    AmountOverflow,
}

impl LedgerError {
    /// Returns the coarse category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            LedgerError::Paused
            | LedgerError::AmountOutOfRange { .. }
            | LedgerError::DurationOutOfRange { .. }
            | LedgerError::RateTooHigh { .. } => ErrorCategory::Validation,

            LedgerError::NotAdmin { .. } | LedgerError::NotOwner { .. } => {
                ErrorCategory::Authorization
            }

            LedgerError::NotFound { .. }
            | LedgerError::AlreadyClosed { .. }
            | LedgerError::NotMatured { .. } => ErrorCategory::Lifecycle,

            LedgerError::NegativeReward { .. } | LedgerError::AmountOverflow => {
                ErrorCategory::Invariant
            }
        }
    }
}
