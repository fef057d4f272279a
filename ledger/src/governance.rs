//! # Governance Gate
//!
//! The process-wide parameter record and its exclusive write path. Every
//! mutation goes through an admin-gated setter; every admission check reads
//! the same record. There is no other way in — fields are private so no
//! caller can route around the gate.
//!
//! Parameter changes never touch existing stakes: a stake keeps the rate it
//! was created with, and pausing only blocks *new* admissions. Close and
//! claim remain available on open stakes while paused — locking users away
//! from their matured principal is not a power governance has.

use serde::{Deserialize, Serialize};

use crate::config::{LedgerConfig, MAX_RATE_BPS};
use crate::error::LedgerError;
use crate::stake::Account;

// ---------------------------------------------------------------------------
// Params
// ---------------------------------------------------------------------------

/// Governance-owned ledger parameters.
///
/// Set at initialization from a validated [`LedgerConfig`], mutated only
/// through the admin-gated setters below, read by every admission check.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Params {
    admin: Account,
    rate_bps: u32,
    min_stake: u64,
    max_stake: u64,
    paused: bool,
}

/// Read-only snapshot of the current parameters, safe to expose over APIs.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParamsView {
    /// Administrator identity.
    pub admin: Account,
    /// Current yield rate in basis points.
    pub rate_bps: u32,
    /// Minimum stake principal.
    pub min_stake: u64,
    /// Maximum stake principal.
    pub max_stake: u64,
    /// Whether new admissions are paused.
    pub paused: bool,
}

impl Params {
    /// Builds the parameter record from a validated configuration.
    pub fn from_config(config: &LedgerConfig) -> Result<Self, LedgerError> {
        config.validate()?;
        Ok(Self {
            admin: config.admin.clone(),
            rate_bps: config.rate_bps,
            min_stake: config.min_stake,
            max_stake: config.max_stake,
            paused: false,
        })
    }

    /// Current yield rate in basis points, locked into new stakes at creation.
    pub fn rate_bps(&self) -> u32 {
        self.rate_bps
    }

    /// Minimum admissible principal.
    pub fn min_stake(&self) -> u64 {
        self.min_stake
    }

    /// Maximum admissible principal.
    pub fn max_stake(&self) -> u64 {
        self.max_stake
    }

    /// Whether new admissions are currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Read-only snapshot of all parameters.
    pub fn view(&self) -> ParamsView {
        ParamsView {
            admin: self.admin.clone(),
            rate_bps: self.rate_bps,
            min_stake: self.min_stake,
            max_stake: self.max_stake,
            paused: self.paused,
        }
    }

    /// Admission check for a new stake's principal.
    ///
    /// A zero principal is never admissible, even under a window whose
    /// `min_stake` is 0 — every admitted stake carries positive value.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Paused`] when the ledger is paused,
    /// [`LedgerError::AmountOutOfRange`] when the principal is zero or
    /// misses the configured window.
    pub fn check_admission(&self, amount: u64) -> Result<(), LedgerError> {
        if self.paused {
            return Err(LedgerError::Paused);
        }
        if amount == 0 || amount < self.min_stake || amount > self.max_stake {
            return Err(LedgerError::AmountOutOfRange {
                amount,
                min: self.min_stake.max(1),
                max: self.max_stake,
            });
        }
        Ok(())
    }

    fn require_admin(&self, caller: &Account) -> Result<(), LedgerError> {
        if caller != &self.admin {
            return Err(LedgerError::NotAdmin {
                caller: caller.clone(),
            });
        }
        Ok(())
    }

    /// Sets the global yield rate. Applies to stakes created afterwards only.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotAdmin`] for non-admin callers,
    /// [`LedgerError::RateTooHigh`] above the 5_000 bps cap. On error the
    /// prior rate is untouched.
    pub fn set_rate(&mut self, caller: &Account, new_rate_bps: u32) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        if new_rate_bps > MAX_RATE_BPS {
            return Err(LedgerError::RateTooHigh {
                requested: new_rate_bps,
                max: MAX_RATE_BPS,
            });
        }
        self.rate_bps = new_rate_bps;
        Ok(())
    }

    /// Sets the minimum admissible principal.
    pub fn set_min_stake(&mut self, caller: &Account, min: u64) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.min_stake = min;
        Ok(())
    }

    /// Sets the maximum admissible principal.
    pub fn set_max_stake(&mut self, caller: &Account, max: u64) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.max_stake = max;
        Ok(())
    }

    /// Pauses or resumes admission of new stakes.
    pub fn set_paused(&mut self, caller: &Account, paused: bool) -> Result<(), LedgerError> {
        self.require_admin(caller)?;
        self.paused = paused;
        Ok(())
    }
}
