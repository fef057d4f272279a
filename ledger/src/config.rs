//! # Ledger Configuration & Constants
//!
//! Every magic number in HAVEN lives here. If you're hardcoding a constant
//! somewhere else, you're doing it wrong and you owe the team coffee.
//!
//! The accrual constants in particular are consensus-critical: changing
//! `SECONDS_PER_YEAR` or the normalizer after launch silently reprices
//! every open stake, which is somewhere between "difficult to explain"
//! and "career-ending".

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::stake::Account;

// ---------------------------------------------------------------------------
// Accrual Parameters
// ---------------------------------------------------------------------------

/// Seconds in the accrual year: 365 days flat. No leap-year cleverness.
/// Proration runs against a fixed-length year, so two stakes opened a year
/// apart accrue identically.
pub const SECONDS_PER_YEAR: u64 = 31_536_000;

/// Seconds in a day. Durations are committed in whole days and converted
/// to seconds exactly once, at the maturity check.
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Basis-point scale. 10_000 bps = 100%. All rates in this crate are
/// integers on this scale — no floating point near money, ever.
pub const BPS_SCALE: u64 = 10_000;

/// Divisor that normalizes the two stacked basis-point factors in the
/// accrual chain (time factor × rate, each on the 10_000 scale, of which
/// one carries an extra ×100) back to a basis-point-of-principal result.
pub const RATE_NORMALIZER: u64 = 1_000_000;

// ---------------------------------------------------------------------------
// Governance Bounds
// ---------------------------------------------------------------------------

/// Hard cap on the yield rate: 5_000 bps = 50% APY. Governance can set any
/// rate up to this; anything above is rejected outright.
pub const MAX_RATE_BPS: u32 = 5_000;

/// Minimum lock duration in days.
pub const MIN_DURATION_DAYS: u32 = 30;

/// Maximum lock duration in days. One accrual year, not one calendar year.
pub const MAX_DURATION_DAYS: u32 = 365;

// ---------------------------------------------------------------------------
// LedgerConfig
// ---------------------------------------------------------------------------

/// The initialization record for a ledger instance.
///
/// All four fields are required — the core assumes no defaults. The same
/// bounds the governance gate enforces at runtime apply here, so a ledger
/// can never start in a state governance couldn't have reached.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// The administrator identity. Only this account may change parameters.
    pub admin: Account,
    /// Initial yield rate in basis points (≤ [`MAX_RATE_BPS`]).
    pub rate_bps: u32,
    /// Minimum stake principal accepted at creation.
    pub min_stake: u64,
    /// Maximum stake principal accepted at creation.
    pub max_stake: u64,
}

impl LedgerConfig {
    /// Validates the configuration against the same bounds governance
    /// enforces later.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::RateTooHigh`] if the initial rate exceeds the
    /// cap, or [`LedgerError::AmountOutOfRange`] if `min_stake > max_stake`
    /// (an admission window no deposit could ever satisfy).
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.rate_bps > MAX_RATE_BPS {
            return Err(LedgerError::RateTooHigh {
                requested: self.rate_bps,
                max: MAX_RATE_BPS,
            });
        }
        if self.min_stake > self.max_stake {
            return Err(LedgerError::AmountOutOfRange {
                amount: self.min_stake,
                min: self.min_stake,
                max: self.max_stake,
            });
        }
        Ok(())
    }
}
