//! # Accrual Engine
//!
//! Pure reward math. Given a stake's principal, its locked-in rate, and the
//! elapsed time, compute what is owed. No side effects, no stored state —
//! the same inputs always produce the same output, which is what makes the
//! payout path auditable.
//!
//! ## The Integer Chain
//!
//! ```text
//! elapsed      = now - start_time                  (seconds, floored at 0)
//! time_factor  = elapsed * 10_000 / 31_536_000     (bps of a 365-day year)
//! gross        = amount * time_factor * rate_bps / 1_000_000
//! owed         = gross - claimed_rewards           (fails if negative)
//! ```
//!
//! Each division truncates toward zero. That truncation is the contract:
//! payouts round down, and a claim followed by a later claim can never pay
//! more in total than a single claim at the later instant would have.
//!
//! The whole multiplication chain runs in `u128` before any narrowing, so
//! principals up to the full `u64` range at the 50% rate cap cannot
//! overflow mid-chain.

use chrono::{DateTime, Utc};

use crate::config::{BPS_SCALE, RATE_NORMALIZER, SECONDS_PER_YEAR};
use crate::error::LedgerError;
use crate::stake::Stake;

/// Computes the gross reward accrued on a principal from `start` to `now`.
///
/// Clock runs backwards (`now < start`)? Elapsed is treated as zero — a
/// defensive floor, since time only moves forward in a well-formed
/// environment.
///
/// # Errors
///
/// Returns [`LedgerError::AmountOverflow`] if the final result does not fit
/// in `u64` (only reachable with extreme principals left accruing for many
/// years).
pub fn accrued_gross(
    amount: u64,
    rate_bps: u32,
    start: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<u64, LedgerError> {
    let elapsed_secs = (now - start).num_seconds().max(0) as u128;

    let time_factor = elapsed_secs * BPS_SCALE as u128 / SECONDS_PER_YEAR as u128;
    let gross = amount as u128 * time_factor * rate_bps as u128 / RATE_NORMALIZER as u128;

    u64::try_from(gross).map_err(|_| LedgerError::AmountOverflow)
}

/// Computes the reward currently owed on a stake: gross accrued as of `now`
/// minus what has already been claimed.
///
/// # Errors
///
/// Returns [`LedgerError::NegativeReward`] if `claimed_rewards` exceeds the
/// gross accrual — an invariant violation (a prior over-claim bug), never a
/// normal outcome, and deliberately not clamped to zero so it gets noticed.
pub fn reward_owed(stake: &Stake, now: DateTime<Utc>) -> Result<u64, LedgerError> {
    let gross = accrued_gross(stake.amount, stake.rate_bps, stake.start_time, now)?;

    gross
        .checked_sub(stake.claimed_rewards)
        .ok_or(LedgerError::NegativeReward {
            stake_id: stake.id,
            gross,
            claimed: stake.claimed_rewards,
        })
}
