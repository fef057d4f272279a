//! # Scoring Notification Port
//!
//! After any operation that changes an account's aggregate staked amount or
//! accrues score-relevant activity, the controller emits a best-effort
//! update to an external scoring collaborator. The collaborator is injected
//! as a [`ScoreSink`] trait object so the core can be tested with a no-op
//! or recording fake, without ever linking the real leaderboard system.
//!
//! Fire-and-forget is a hard rule: a sink failure is logged and dropped.
//! The ledger mutation it follows has already committed and stays
//! committed — the scoring layer is an observer, not a participant.

use thiserror::Error;

use crate::stake::Account;

/// Error surfaced by a scoring sink. The controller logs it; it never
/// propagates past the notification boundary.
#[derive(Debug, Error)]
#[error("score sink rejected update for {account}: {reason}")]
pub struct NotifyError {
    /// The account whose update was rejected.
    pub account: Account,
    /// Sink-provided description of the failure.
    pub reason: String,
}

/// Outbound port to the scoring collaborator.
///
/// `delta_points` is signed: positive when staked totals or claimed
/// rewards grow, negative when principal leaves the ledger. How the sink
/// interprets points is its business — the core only reports deltas.
pub trait ScoreSink: Send + Sync {
    /// Delivers one score update. Best effort; errors are logged by the
    /// caller and never acted upon.
    fn notify(&self, account: &Account, delta_points: i64) -> Result<(), NotifyError>;
}

/// A sink that does nothing. The default when no collaborator is wired up.
pub struct NullSink;

impl ScoreSink for NullSink {
    fn notify(&self, _account: &Account, _delta_points: i64) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// A sink that records every call. Test double for asserting what the
/// controller emitted (and that it emitted nothing on failed operations).
#[derive(Default)]
pub struct RecordingSink {
    calls: parking_lot::Mutex<Vec<(Account, i64)>>,
}

impl RecordingSink {
    /// Creates an empty recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all `(account, delta_points)` pairs received so far.
    pub fn calls(&self) -> Vec<(Account, i64)> {
        self.calls.lock().clone()
    }
}

impl ScoreSink for RecordingSink {
    fn notify(&self, account: &Account, delta_points: i64) -> Result<(), NotifyError> {
        self.calls.lock().push((account.clone(), delta_points));
        Ok(())
    }
}
