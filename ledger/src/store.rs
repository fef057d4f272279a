//! # Ledger Book
//!
//! The storage contract of the ledger: stake records keyed by id, the
//! per-account staked totals, the global staked total, and the id sequence.
//! No behavior lives here beyond bookkeeping — admission rules, maturity
//! gates, and accrual all belong to the lifecycle controller, which is the
//! only component holding a mutable handle to this book.
//!
//! The book enforces one thing on its own: whenever a stake enters or
//! leaves the active set, the record, the id sequence, and both totals move
//! in the same call, all-or-nothing, with checked arithmetic. The invariant
//! "global total == sum of active principals == sum of per-account totals"
//! is maintained at this layer and merely *relied on* above.
//!
//! The whole book derives `Serialize`/`Deserialize` so a running ledger can
//! be snapshotted to disk as a single JSON blob and restored on restart.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LedgerError;
use crate::governance::Params;
use crate::stake::{Account, Stake, StakeId, StakeStatus};

/// The complete mutable state of one ledger instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerBook {
    /// Governance-owned parameters.
    pub(crate) params: Params,
    /// All stakes ever created, keyed by global id. Closed stakes remain
    /// for audit; they no longer contribute to totals.
    stakes: HashMap<StakeId, Stake>,
    /// Sum of active principals per account.
    account_totals: HashMap<Account, u64>,
    /// Sum of active principals across all accounts.
    total_staked: u64,
    /// Next id to hand out. Starts at 1, never reused.
    next_id: StakeId,
}

impl LedgerBook {
    /// Creates an empty book with the given parameters.
    pub fn new(params: Params) -> Self {
        Self {
            params,
            stakes: HashMap::new(),
            account_totals: HashMap::new(),
            total_staked: 0,
            next_id: 1,
        }
    }

    /// Admits a new stake: allocates the next id, inserts the `Active`
    /// record, and credits both totals — one bookkeeping step, applied
    /// fully or not at all.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AmountOverflow`] if either total would overflow; the
    /// id sequence does not advance in that case.
    pub fn admit(
        &mut self,
        owner: Account,
        amount: u64,
        start_time: DateTime<Utc>,
        duration_days: u32,
        rate_bps: u32,
    ) -> Result<StakeId, LedgerError> {
        let account_total = self.account_totals.get(&owner).copied().unwrap_or(0);
        let new_account_total = account_total
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        let new_global = self
            .total_staked
            .checked_add(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        let id = self.next_id;
        self.next_id += 1;

        self.stakes.insert(
            id,
            Stake {
                id,
                owner: owner.clone(),
                amount,
                start_time,
                duration_days,
                rate_bps,
                claimed_rewards: 0,
                status: StakeStatus::Active,
            },
        );
        self.account_totals.insert(owner, new_account_total);
        self.total_staked = new_global;
        Ok(id)
    }

    /// Debits both totals when a stake leaves the active set. Paired with
    /// the status flip by the controller inside one critical section.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AmountOverflow`] if either total would underflow —
    /// which would itself be a broken-invariant signal, never normal.
    pub fn release(&mut self, owner: &Account, amount: u64) -> Result<(), LedgerError> {
        let account_total = self.account_totals.get(owner).copied().unwrap_or(0);
        let new_account_total = account_total
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOverflow)?;
        let new_global = self
            .total_staked
            .checked_sub(amount)
            .ok_or(LedgerError::AmountOverflow)?;

        if new_account_total == 0 {
            self.account_totals.remove(owner);
        } else {
            self.account_totals.insert(owner.clone(), new_account_total);
        }
        self.total_staked = new_global;
        Ok(())
    }

    /// Looks up a stake by id.
    pub fn get(&self, id: StakeId) -> Option<&Stake> {
        self.stakes.get(&id)
    }

    /// Looks up a stake by id, mutably. Only the lifecycle controller
    /// calls this, inside its critical section.
    pub fn get_mut(&mut self, id: StakeId) -> Option<&mut Stake> {
        self.stakes.get_mut(&id)
    }

    /// Sum of active principals for one account. Accounts with nothing
    /// staked simply read as zero.
    pub fn total_staked_for(&self, account: &Account) -> u64 {
        self.account_totals.get(account).copied().unwrap_or(0)
    }

    /// Sum of active principals across all accounts.
    pub fn total_staked(&self) -> u64 {
        self.total_staked
    }

    /// Number of stake records in the book (active and closed).
    pub fn stake_count(&self) -> usize {
        self.stakes.len()
    }

    /// Number of stakes still in the active set.
    pub fn active_count(&self) -> usize {
        self.stakes
            .values()
            .filter(|s| !s.status.is_terminal())
            .count()
    }
}
