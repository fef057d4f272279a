//! # Scoring and Leaderboard
//!
//! The gamification layer: staking activity becomes points, points become
//! leaderboard positions. The ledger pushes signed deltas through its
//! [`ScoreSink`] port; this module is the production sink.
//!
//! Per-account scores saturate at the `u64` bounds — a withdrawal larger
//! than the accumulated score clamps to zero instead of wrapping. The
//! leaderboard is a size-capped sorted sequence: position is located by
//! binary search and the shift on insert is bounded by the cap, so a
//! popular ledger cannot grow an unbounded maintenance cost per update.

use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use haven_ledger::{Account, NotifyError, ScoreSink};

/// One leaderboard row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardEntry {
    /// The ranked account.
    pub account: Account,
    /// Its current score.
    pub score: u64,
}

#[derive(Serialize, Deserialize)]
struct BoardState {
    /// Every account ever scored, even those below the leaderboard cut.
    scores: HashMap<Account, u64>,
    /// Top accounts, sorted by score descending, at most `capacity` rows.
    leaderboard: Vec<BoardEntry>,
}

/// Per-account score tracking with a bounded leaderboard.
///
/// Interior mutability because the [`ScoreSink`] port takes `&self`; the
/// ledger calls in from whatever thread completed the operation.
pub struct ScoreBoard {
    state: Mutex<BoardState>,
    capacity: usize,
}

impl ScoreBoard {
    /// Creates a scoreboard whose leaderboard holds at most `capacity` rows.
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(BoardState {
                scores: HashMap::new(),
                leaderboard: Vec::with_capacity(capacity),
            }),
            capacity,
        }
    }

    /// Applies a signed delta to an account's score and repositions it on
    /// the leaderboard.
    pub fn apply(&self, account: &Account, delta_points: i64) {
        let mut state = self.state.lock();

        let current = state.scores.get(account).copied().unwrap_or(0);
        let updated = if delta_points >= 0 {
            current.saturating_add(delta_points as u64)
        } else {
            current.saturating_sub(delta_points.unsigned_abs())
        };
        state.scores.insert(account.clone(), updated);

        // Reposition: drop the stale row, binary-search the new slot.
        // Both the retain and the shift are bounded by the cap.
        state.leaderboard.retain(|e| e.account != *account);
        let at = state.leaderboard.partition_point(|e| e.score > updated);
        if at < self.capacity {
            state.leaderboard.insert(
                at,
                BoardEntry {
                    account: account.clone(),
                    score: updated,
                },
            );
            state.leaderboard.truncate(self.capacity);
        }
    }

    /// Current score for an account; unscored accounts read as zero.
    pub fn score(&self, account: &Account) -> u64 {
        self.state.lock().scores.get(account).copied().unwrap_or(0)
    }

    /// The top `n` leaderboard rows, best first.
    pub fn top(&self, n: usize) -> Vec<BoardEntry> {
        let state = self.state.lock();
        state.leaderboard.iter().take(n).cloned().collect()
    }

    /// Number of accounts currently on the leaderboard.
    pub fn leaderboard_len(&self) -> usize {
        self.state.lock().leaderboard.len()
    }
}

impl ScoreSink for ScoreBoard {
    fn notify(&self, account: &Account, delta_points: i64) -> Result<(), NotifyError> {
        self.apply(account, delta_points);
        Ok(())
    }
}
