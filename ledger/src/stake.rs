//! # Stake Records
//!
//! The central entity of the ledger. A [`Stake`] is one deposit: its
//! principal, its lock duration, the rate that was in effect when it was
//! created, and the rewards already paid out against it.
//!
//! ## State Machine
//!
//! ```text
//!    ┌──────────┐   close (matured)   ┌──────────┐
//!    │  Active  │────────────────────►│  Closed  │ ← terminal, no way back
//!    └──────────┘                     └──────────┘
//! ```
//!
//! There are exactly two states and one transition. Rewards can be claimed
//! any number of times while `Active` — before or after maturity — but the
//! principal only comes back out through `close`, and only once.
//!
//! ## Rate Lock-In
//!
//! `rate_bps` is copied from the governance parameters at creation and
//! never touched again. Governance rate changes apply to future stakes only.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SECONDS_PER_DAY;

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

/// An opaque account identity (address-like value).
///
/// The ledger never creates or destroys accounts; it only uses them as
/// mapping keys and for ownership checks. No format is assumed or parsed.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Account(String);

impl Account {
    /// Wraps an address-like string as an account identity.
    pub fn new(address: impl Into<String>) -> Self {
        Self(address.into())
    }

    /// Returns the underlying address string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Account {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Account {
    fn from(s: &str) -> Self {
        Account::new(s)
    }
}

// ---------------------------------------------------------------------------
// StakeId & StakeStatus
// ---------------------------------------------------------------------------

/// Stake identifier: one global monotonically increasing sequence shared
/// across all accounts, starting at 1.
pub type StakeId = u64;

/// Lifecycle status of a stake. `Closed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StakeStatus {
    /// Open: accrues rewards, counts toward staked totals.
    Active,
    /// Principal withdrawn, final rewards settled. No further operations.
    Closed,
}

impl StakeStatus {
    /// Returns `true` if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StakeStatus::Closed)
    }
}

impl std::fmt::Display for StakeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StakeStatus::Active => write!(f, "Active"),
            StakeStatus::Closed => write!(f, "Closed"),
        }
    }
}

// ---------------------------------------------------------------------------
// Stake
// ---------------------------------------------------------------------------

/// A single fixed-term deposit.
///
/// Invariants (enforced by the lifecycle controller, stated here so the
/// fields make sense):
///
/// - `amount > 0` while `Active`.
/// - `rate_bps` never changes after creation.
/// - `claimed_rewards` is monotonically non-decreasing and never exceeds
///   the gross reward the accrual engine computes for the same instant.
/// - `Active → Closed` happens exactly once.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Stake {
    /// Global sequence id, unique across all accounts.
    pub id: StakeId,

    /// The account that created the stake. Ownership checks compare
    /// against this on every mutating call.
    pub owner: Account,

    /// Principal in smallest units of the tracked asset.
    pub amount: u64,

    /// Wall-clock creation time, sampled once at operation entry.
    pub start_time: DateTime<Utc>,

    /// Committed lock length in whole days, in [30, 365].
    pub duration_days: u32,

    /// Yield rate in basis points, locked in at creation. Immutable for
    /// the life of the stake regardless of later governance changes.
    pub rate_bps: u32,

    /// Cumulative rewards already paid out. Monotonically non-decreasing.
    pub claimed_rewards: u64,

    /// Current lifecycle status.
    pub status: StakeStatus,
}

impl Stake {
    /// The lock length in seconds (days × 86_400, computed exactly once here).
    pub fn required_lock_secs(&self) -> u64 {
        self.duration_days as u64 * SECONDS_PER_DAY
    }

    /// The instant at which the principal unlocks.
    pub fn matures_at(&self) -> DateTime<Utc> {
        self.start_time + Duration::seconds(self.required_lock_secs() as i64)
    }

    /// Whether the stake has reached maturity as of `now`. Elapsed time
    /// exactly equal to the lock length counts as matured.
    pub fn is_matured(&self, now: DateTime<Utc>) -> bool {
        now >= self.matures_at()
    }

    /// Returns the read-only snapshot callers receive. The ledger never
    /// hands out references into its own book.
    pub fn view(&self) -> StakeView {
        StakeView {
            id: self.id,
            owner: self.owner.clone(),
            amount: self.amount,
            start_time: self.start_time,
            duration_days: self.duration_days,
            rate_bps: self.rate_bps,
            claimed_rewards: self.claimed_rewards,
            status: self.status,
        }
    }
}

/// Immutable snapshot of a stake, safe to hand to collaborators.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakeView {
    /// Global sequence id.
    pub id: StakeId,
    /// Owning account.
    pub owner: Account,
    /// Principal in smallest units.
    pub amount: u64,
    /// Creation timestamp.
    pub start_time: DateTime<Utc>,
    /// Committed lock length in whole days.
    pub duration_days: u32,
    /// Locked-in rate in basis points.
    pub rate_bps: u32,
    /// Cumulative rewards already paid out.
    pub claimed_rewards: u64,
    /// Lifecycle status as of the snapshot.
    pub status: StakeStatus,
}
