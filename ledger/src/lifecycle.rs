//! # Stake Lifecycle Controller
//!
//! The only component that mutates the [`LedgerBook`]. Implements the
//! lifecycle:
//!
//! 1. **Create** — admission checks (pause, amount window, duration
//!    window), then a new `Active` stake with the current rate locked in.
//! 2. **Claim** — pay out the reward delta accrued so far. Allowed any
//!    number of times while the stake is open, *before or after* maturity.
//! 3. **Close** — maturity-gated. Settles the final reward delta, returns
//!    the principal, flips the stake to `Closed`. Once.
//!
//! The claim/close asymmetry is deliberate: rewards flow freely while the
//! stake is open, principal only unlocks at maturity.
//!
//! ## Atomicity
//!
//! Every operation samples the clock once at entry, takes the book lock,
//! validates, and either applies its full effect or none. The lock covers
//! the stake record and both aggregate totals as one critical section, so
//! two racing `close` calls on the same id resolve to exactly one success.
//! The scoring notification fires after the lock is released — best
//! effort, logged on failure, never rolled back into the book.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use crate::accrual;
use crate::config::{LedgerConfig, MAX_DURATION_DAYS, MIN_DURATION_DAYS};
use crate::error::LedgerError;
use crate::governance::{Params, ParamsView};
use crate::notify::{NullSink, ScoreSink};
use crate::stake::{Account, StakeId, StakeStatus, StakeView};
use crate::store::LedgerBook;

// ---------------------------------------------------------------------------
// StakingLedger
// ---------------------------------------------------------------------------

/// The custody ledger: book behind a mutex, scoring sink behind a trait.
///
/// Clone-free by design — share it behind an `Arc`. All public operations
/// take `&self`; interior mutability lives in the mutex and nowhere else.
pub struct StakingLedger {
    book: Mutex<LedgerBook>,
    sink: Arc<dyn ScoreSink>,
}

impl StakingLedger {
    /// Creates a ledger from a validated configuration and a scoring sink.
    pub fn new(config: LedgerConfig, sink: Arc<dyn ScoreSink>) -> Result<Self, LedgerError> {
        let params = Params::from_config(&config)?;
        Ok(Self {
            book: Mutex::new(LedgerBook::new(params)),
            sink,
        })
    }

    /// Convenience constructor with no scoring collaborator wired up.
    pub fn with_null_sink(config: LedgerConfig) -> Result<Self, LedgerError> {
        Self::new(config, Arc::new(NullSink))
    }

    /// Rebuilds a ledger from a previously exported book snapshot.
    pub fn from_snapshot(book: LedgerBook, sink: Arc<dyn ScoreSink>) -> Self {
        Self {
            book: Mutex::new(book),
            sink,
        }
    }

    /// Clones the current book for persistence. Consistent as of the last
    /// completed operation — the lock guarantees no torn reads.
    pub fn export_snapshot(&self) -> LedgerBook {
        self.book.lock().clone()
    }

    // -----------------------------------------------------------------------
    // Lifecycle operations
    // -----------------------------------------------------------------------

    /// Creates a new stake for `account`. Returns the allocated stake id.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Paused`], [`LedgerError::AmountOutOfRange`], or
    /// [`LedgerError::DurationOutOfRange`] on precondition violations; no
    /// state changes in any failure case.
    pub fn create(
        &self,
        account: &Account,
        amount: u64,
        duration_days: u32,
    ) -> Result<StakeId, LedgerError> {
        self.create_at(account, amount, duration_days, Utc::now())
    }

    /// [`create`](Self::create) with an explicit timestamp. Used by tests
    /// and replay tooling; production callers let the ledger sample the
    /// clock.
    pub fn create_at(
        &self,
        account: &Account,
        amount: u64,
        duration_days: u32,
        now: DateTime<Utc>,
    ) -> Result<StakeId, LedgerError> {
        let id = {
            let mut book = self.book.lock();

            book.params.check_admission(amount)?;
            if !(MIN_DURATION_DAYS..=MAX_DURATION_DAYS).contains(&duration_days) {
                return Err(LedgerError::DurationOutOfRange {
                    days: duration_days,
                    min: MIN_DURATION_DAYS,
                    max: MAX_DURATION_DAYS,
                });
            }

            let rate_bps = book.params.rate_bps();
            book.admit(account.clone(), amount, now, duration_days, rate_bps)?
        };

        tracing::info!(%account, stake_id = id, amount, duration_days, "stake created");
        self.emit(account, score_points(amount));
        Ok(id)
    }

    /// Closes a matured stake. Returns `(principal, final_rewards)`.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`], [`LedgerError::NotOwner`],
    /// [`LedgerError::AlreadyClosed`], or [`LedgerError::NotMatured`]; the
    /// maturity gate passes when elapsed time is greater than *or exactly
    /// equal to* the committed duration in seconds.
    pub fn close(&self, account: &Account, stake_id: StakeId) -> Result<(u64, u64), LedgerError> {
        self.close_at(account, stake_id, Utc::now())
    }

    /// [`close`](Self::close) with an explicit timestamp.
    pub fn close_at(
        &self,
        account: &Account,
        stake_id: StakeId,
        now: DateTime<Utc>,
    ) -> Result<(u64, u64), LedgerError> {
        let (principal, rewards) = {
            let mut book = self.book.lock();

            let stake = book
                .get_mut(stake_id)
                .ok_or(LedgerError::NotFound { stake_id })?;
            if stake.owner != *account {
                return Err(LedgerError::NotOwner {
                    stake_id,
                    caller: account.clone(),
                });
            }
            if stake.status.is_terminal() {
                return Err(LedgerError::AlreadyClosed { stake_id });
            }
            if !stake.is_matured(now) {
                return Err(LedgerError::NotMatured {
                    stake_id,
                    elapsed_secs: (now - stake.start_time).num_seconds().max(0) as u64,
                    required_secs: stake.required_lock_secs(),
                });
            }

            let rewards = accrual::reward_owed(stake, now)?;
            let settled_claims = stake
                .claimed_rewards
                .checked_add(rewards)
                .ok_or(LedgerError::AmountOverflow)?;

            let owner = stake.owner.clone();
            let principal = stake.amount;
            stake.claimed_rewards = settled_claims;
            stake.status = StakeStatus::Closed;

            // Cannot underflow while the admit/release pairing holds; an
            // error here means the book was already inconsistent.
            book.release(&owner, principal)?;
            (principal, rewards)
        };

        tracing::info!(%account, stake_id, principal, rewards, "stake closed");
        self.emit(account, -score_points(principal));
        Ok((principal, rewards))
    }

    /// Claims the reward delta accrued so far without touching principal,
    /// status, or totals. Returns the delta paid out (possibly zero).
    ///
    /// There is no maturity check here — that is the intended asymmetry:
    /// rewards can be claimed repeatedly before the stake matures, only
    /// the principal waits.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`], [`LedgerError::NotOwner`], or
    /// [`LedgerError::AlreadyClosed`].
    pub fn claim_partial(&self, account: &Account, stake_id: StakeId) -> Result<u64, LedgerError> {
        self.claim_partial_at(account, stake_id, Utc::now())
    }

    /// [`claim_partial`](Self::claim_partial) with an explicit timestamp.
    pub fn claim_partial_at(
        &self,
        account: &Account,
        stake_id: StakeId,
        now: DateTime<Utc>,
    ) -> Result<u64, LedgerError> {
        let delta = {
            let mut book = self.book.lock();

            let stake = book
                .get_mut(stake_id)
                .ok_or(LedgerError::NotFound { stake_id })?;
            if stake.owner != *account {
                return Err(LedgerError::NotOwner {
                    stake_id,
                    caller: account.clone(),
                });
            }
            if stake.status.is_terminal() {
                return Err(LedgerError::AlreadyClosed { stake_id });
            }

            let delta = accrual::reward_owed(stake, now)?;
            stake.claimed_rewards = stake
                .claimed_rewards
                .checked_add(delta)
                .ok_or(LedgerError::AmountOverflow)?;
            delta
        };

        tracing::debug!(%account, stake_id, delta, "rewards claimed");
        if delta > 0 {
            self.emit(account, score_points(delta));
        }
        Ok(delta)
    }

    // -----------------------------------------------------------------------
    // Governance surface
    // -----------------------------------------------------------------------

    /// Sets the global yield rate. Admin only; existing stakes keep their
    /// locked-in rate.
    pub fn set_rate(&self, caller: &Account, rate_bps: u32) -> Result<(), LedgerError> {
        self.book.lock().params.set_rate(caller, rate_bps)?;
        tracing::info!(%caller, rate_bps, "rate updated");
        Ok(())
    }

    /// Sets the minimum admissible principal. Admin only.
    pub fn set_min_stake(&self, caller: &Account, min: u64) -> Result<(), LedgerError> {
        self.book.lock().params.set_min_stake(caller, min)?;
        tracing::info!(%caller, min, "minimum stake updated");
        Ok(())
    }

    /// Sets the maximum admissible principal. Admin only.
    pub fn set_max_stake(&self, caller: &Account, max: u64) -> Result<(), LedgerError> {
        self.book.lock().params.set_max_stake(caller, max)?;
        tracing::info!(%caller, max, "maximum stake updated");
        Ok(())
    }

    /// Pauses or resumes admission of new stakes. Admin only. Close and
    /// claim on open stakes are unaffected.
    pub fn set_paused(&self, caller: &Account, paused: bool) -> Result<(), LedgerError> {
        self.book.lock().params.set_paused(caller, paused)?;
        tracing::info!(%caller, paused, "pause flag updated");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Read surface
    // -----------------------------------------------------------------------

    /// Snapshot of a stake. Same existence/ownership rules as mutations.
    pub fn stake(&self, account: &Account, stake_id: StakeId) -> Result<StakeView, LedgerError> {
        let book = self.book.lock();
        let stake = book
            .get(stake_id)
            .ok_or(LedgerError::NotFound { stake_id })?;
        if stake.owner != *account {
            return Err(LedgerError::NotOwner {
                stake_id,
                caller: account.clone(),
            });
        }
        Ok(stake.view())
    }

    /// Sum of active principals for one account.
    pub fn total_staked(&self, account: &Account) -> u64 {
        self.book.lock().total_staked_for(account)
    }

    /// Sum of active principals across all accounts.
    pub fn total_staked_global(&self) -> u64 {
        self.book.lock().total_staked()
    }

    /// Number of stakes still open.
    pub fn active_stakes(&self) -> usize {
        self.book.lock().active_count()
    }

    /// Read-only snapshot of the governance parameters.
    pub fn params(&self) -> ParamsView {
        self.book.lock().params.view()
    }

    /// Best-effort delivery to the scoring sink. Failures are logged and
    /// dropped — the ledger mutation this follows has already committed.
    fn emit(&self, account: &Account, delta_points: i64) {
        if let Err(err) = self.sink.notify(account, delta_points) {
            tracing::warn!(%account, delta_points, error = %err, "score sink rejected update");
        }
    }
}

/// Converts an asset amount to a signed score delta. Amounts above
/// `i64::MAX` clamp to it, so the sink sees a saturated delta instead of
/// a wrapped one.
fn score_points(amount: u64) -> i64 {
    i64::try_from(amount).unwrap_or(i64::MAX)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NotifyError, RecordingSink};
    use chrono::{Duration, TimeZone};

    const ADMIN: &str = "hvn:admin";
    const ALICE: &str = "hvn:alice";
    const BOB: &str = "hvn:bob";

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
    }

    fn days(n: i64) -> Duration {
        Duration::days(n)
    }

    fn config() -> LedgerConfig {
        LedgerConfig {
            admin: Account::new(ADMIN),
            rate_bps: 300,
            min_stake: 100,
            max_stake: 1_000_000,
        }
    }

    fn ledger() -> StakingLedger {
        StakingLedger::with_null_sink(config()).unwrap()
    }

    fn alice() -> Account {
        Account::new(ALICE)
    }

    // -- create --

    #[test]
    fn create_returns_sequential_ids_from_one() {
        let l = ledger();
        assert_eq!(l.create_at(&alice(), 1_000, 30, t0()).unwrap(), 1);
        assert_eq!(l.create_at(&Account::new(BOB), 1_000, 60, t0()).unwrap(), 2);
        assert_eq!(l.create_at(&alice(), 1_000, 90, t0()).unwrap(), 3);
    }

    #[test]
    fn create_locks_in_current_rate() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        l.set_rate(&Account::new(ADMIN), 500).unwrap();

        let view = l.stake(&alice(), id).unwrap();
        assert_eq!(view.rate_bps, 300);
        // A stake created after the change carries the new rate.
        let id2 = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        assert_eq!(l.stake(&alice(), id2).unwrap().rate_bps, 500);
    }

    #[test]
    fn create_updates_totals() {
        let l = ledger();
        l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        l.create_at(&Account::new(BOB), 500, 30, t0()).unwrap();

        assert_eq!(l.total_staked(&alice()), 1_000);
        assert_eq!(l.total_staked(&Account::new(BOB)), 500);
        assert_eq!(l.total_staked_global(), 1_500);
    }

    #[test]
    fn create_rejects_out_of_window_amounts() {
        let l = ledger();
        assert!(matches!(
            l.create_at(&alice(), 99, 30, t0()),
            Err(LedgerError::AmountOutOfRange { amount: 99, .. })
        ));
        assert!(l.create_at(&alice(), 1_000_001, 30, t0()).is_err());
        assert_eq!(l.total_staked_global(), 0);
    }

    #[test]
    fn create_rejects_out_of_window_durations() {
        let l = ledger();
        assert!(matches!(
            l.create_at(&alice(), 1_000, 29, t0()),
            Err(LedgerError::DurationOutOfRange { days: 29, .. })
        ));
        assert!(l.create_at(&alice(), 1_000, 366, t0()).is_err());
        // Boundaries are inclusive.
        assert!(l.create_at(&alice(), 1_000, 30, t0()).is_ok());
        assert!(l.create_at(&alice(), 1_000, 365, t0()).is_ok());
    }

    #[test]
    fn create_rejected_while_paused() {
        let l = ledger();
        l.set_paused(&Account::new(ADMIN), true).unwrap();
        assert!(matches!(
            l.create_at(&alice(), 1_000, 30, t0()),
            Err(LedgerError::Paused)
        ));

        l.set_paused(&Account::new(ADMIN), false).unwrap();
        assert!(l.create_at(&alice(), 1_000, 30, t0()).is_ok());
    }

    // -- close --

    #[test]
    fn close_at_exact_maturity_succeeds() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();

        let (principal, rewards) = l.close_at(&alice(), id, t0() + days(30)).unwrap();
        assert_eq!(principal, 1_000);
        assert_eq!(rewards, 246);
        assert_eq!(l.total_staked_global(), 0);
        assert_eq!(l.total_staked(&alice()), 0);
    }

    #[test]
    fn close_before_maturity_rejected() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();

        let result = l.close_at(&alice(), id, t0() + days(30) - Duration::seconds(1));
        assert!(matches!(
            result,
            Err(LedgerError::NotMatured {
                elapsed_secs: 2_591_999,
                required_secs: 2_592_000,
                ..
            })
        ));
        // Nothing moved.
        assert_eq!(l.total_staked_global(), 1_000);
        assert_eq!(l.stake(&alice(), id).unwrap().status, StakeStatus::Active);
    }

    #[test]
    fn close_twice_rejected() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        l.close_at(&alice(), id, t0() + days(30)).unwrap();

        let result = l.close_at(&alice(), id, t0() + days(31));
        assert!(matches!(result, Err(LedgerError::AlreadyClosed { .. })));
        // Totals decremented exactly once.
        assert_eq!(l.total_staked_global(), 0);
    }

    #[test]
    fn close_unknown_stake_rejected() {
        let l = ledger();
        assert!(matches!(
            l.close_at(&alice(), 42, t0()),
            Err(LedgerError::NotFound { stake_id: 42 })
        ));
    }

    #[test]
    fn close_someone_elses_stake_rejected() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();

        let result = l.close_at(&Account::new(BOB), id, t0() + days(30));
        assert!(matches!(result, Err(LedgerError::NotOwner { .. })));
        assert_eq!(l.total_staked_global(), 1_000);
    }

    #[test]
    fn close_uses_locked_in_rate_not_current() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        l.set_rate(&Account::new(ADMIN), 5_000).unwrap();

        // Still the 300 bps outcome, not 5_000.
        let (_, rewards) = l.close_at(&alice(), id, t0() + days(30)).unwrap();
        assert_eq!(rewards, 246);
    }

    // -- claim_partial --

    #[test]
    fn claim_before_maturity_allowed() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();

        let delta = l.claim_partial_at(&alice(), id, t0() + days(15)).unwrap();
        assert_eq!(delta, 123);
        // Principal and totals untouched.
        assert_eq!(l.total_staked_global(), 1_000);
        let view = l.stake(&alice(), id).unwrap();
        assert_eq!(view.amount, 1_000);
        assert_eq!(view.claimed_rewards, 123);
        assert_eq!(view.status, StakeStatus::Active);
    }

    #[test]
    fn repeated_claims_are_monotone_and_telescoping() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();

        let first = l.claim_partial_at(&alice(), id, t0() + days(15)).unwrap();
        // Same instant again: nothing further owed.
        let again = l.claim_partial_at(&alice(), id, t0() + days(15)).unwrap();
        assert_eq!(again, 0);

        let (_, final_rewards) = l.close_at(&alice(), id, t0() + days(30)).unwrap();
        assert_eq!(first + final_rewards, 246);

        let view = l.stake(&alice(), id).unwrap();
        assert_eq!(view.claimed_rewards, 246);
    }

    #[test]
    fn claim_on_closed_stake_rejected() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        l.close_at(&alice(), id, t0() + days(30)).unwrap();

        let result = l.claim_partial_at(&alice(), id, t0() + days(31));
        assert!(matches!(result, Err(LedgerError::AlreadyClosed { .. })));
    }

    #[test]
    fn claim_ownership_checked() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        assert!(matches!(
            l.claim_partial_at(&Account::new(BOB), id, t0() + days(15)),
            Err(LedgerError::NotOwner { .. })
        ));
    }

    // -- governance through the controller --

    #[test]
    fn set_rate_over_cap_leaves_parameter_unchanged() {
        let l = ledger();
        let result = l.set_rate(&Account::new(ADMIN), 6_000);
        assert!(matches!(result, Err(LedgerError::RateTooHigh { .. })));
        assert_eq!(l.params().rate_bps, 300);
    }

    #[test]
    fn governance_requires_admin() {
        let l = ledger();
        assert!(matches!(
            l.set_rate(&alice(), 400),
            Err(LedgerError::NotAdmin { .. })
        ));
        assert!(l.set_paused(&alice(), true).is_err());
        assert!(!l.params().paused);
    }

    // -- notification --

    #[test]
    fn notifications_mirror_total_changes() {
        let sink = Arc::new(RecordingSink::new());
        let l = StakingLedger::new(config(), Arc::clone(&sink) as Arc<dyn ScoreSink>).unwrap();

        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        l.claim_partial_at(&alice(), id, t0() + days(15)).unwrap();
        l.close_at(&alice(), id, t0() + days(30)).unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[0], (alice(), 1_000));
        assert_eq!(calls[1], (alice(), 123));
        assert_eq!(calls[2], (alice(), -1_000));
    }

    #[test]
    fn failed_operations_notify_nothing() {
        let sink = Arc::new(RecordingSink::new());
        let l = StakingLedger::new(config(), Arc::clone(&sink) as Arc<dyn ScoreSink>).unwrap();

        let _ = l.create_at(&alice(), 1, 30, t0());
        let _ = l.close_at(&alice(), 99, t0());
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn oversized_principal_saturates_score_deltas() {
        let sink = Arc::new(RecordingSink::new());
        let l = StakingLedger::new(
            LedgerConfig {
                admin: Account::new(ADMIN),
                rate_bps: 300,
                min_stake: 100,
                max_stake: u64::MAX,
            },
            Arc::clone(&sink) as Arc<dyn ScoreSink>,
        )
        .unwrap();

        // A principal beyond i64::MAX clamps instead of wrapping negative.
        let id = l.create_at(&alice(), u64::MAX, 30, t0()).unwrap();
        l.close_at(&alice(), id, t0() + days(30)).unwrap();

        let calls = sink.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], (alice(), i64::MAX));
        assert_eq!(calls[1], (alice(), -i64::MAX));
    }

    struct FailingSink;

    impl ScoreSink for FailingSink {
        fn notify(&self, account: &Account, _delta_points: i64) -> Result<(), NotifyError> {
            Err(NotifyError {
                account: account.clone(),
                reason: "collaborator offline".into(),
            })
        }
    }

    #[test]
    fn sink_failure_does_not_roll_back_the_ledger() {
        let l = StakingLedger::new(config(), Arc::new(FailingSink)).unwrap();

        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        assert_eq!(l.total_staked_global(), 1_000);

        let (principal, _) = l.close_at(&alice(), id, t0() + days(30)).unwrap();
        assert_eq!(principal, 1_000);
        assert_eq!(l.total_staked_global(), 0);
    }

    // -- concurrency --

    #[test]
    fn racing_closes_resolve_to_one_winner() {
        let l = Arc::new(ledger());
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        let when = t0() + days(30);

        let handles: Vec<_> = (0..2)
            .map(|_| {
                let l = Arc::clone(&l);
                std::thread::spawn(move || l.close_at(&Account::new(ALICE), id, when))
            })
            .collect();

        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let successes = outcomes.iter().filter(|r| r.is_ok()).count();
        let already_closed = outcomes
            .iter()
            .filter(|r| matches!(r, Err(LedgerError::AlreadyClosed { .. })))
            .count();

        assert_eq!(successes, 1);
        assert_eq!(already_closed, 1);
        // Global total decremented exactly once.
        assert_eq!(l.total_staked_global(), 0);
    }

    // -- snapshot --

    #[test]
    fn snapshot_roundtrip_preserves_everything() {
        let l = ledger();
        let id = l.create_at(&alice(), 1_000, 30, t0()).unwrap();
        l.claim_partial_at(&alice(), id, t0() + days(15)).unwrap();

        let snapshot = l.export_snapshot();
        let json = serde_json::to_string(&snapshot).expect("serialize");
        let restored: LedgerBook = serde_json::from_str(&json).expect("deserialize");
        let l2 = StakingLedger::from_snapshot(restored, Arc::new(NullSink));

        assert_eq!(l2.total_staked_global(), 1_000);
        assert_eq!(l2.stake(&alice(), id).unwrap().claimed_rewards, 123);
        // Lifecycle continues where it left off.
        let (principal, rewards) = l2.close_at(&alice(), id, t0() + days(30)).unwrap();
        assert_eq!((principal, rewards), (1_000, 123));
    }
}
