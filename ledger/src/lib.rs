// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # HAVEN — Core Custody Ledger
//!
//! HAVEN is a fixed-term, interest-bearing custody ledger: a user locks a
//! quantity of the tracked asset for a chosen duration and later withdraws
//! principal plus accrued yield at the rate that was in effect when the
//! stake was created. The rate is locked in at deposit time — governance
//! can move the global rate all it wants, your stake keeps its deal.
//!
//! ## Architecture
//!
//! The crate is split into modules that mirror the actual concerns of a
//! custody ledger:
//!
//! - **config** — Constants and the initialization record. No magic numbers
//!   anywhere else.
//! - **error** — The full error taxonomy. One enum, four categories.
//! - **stake** — The stake record and its read-only snapshot view.
//! - **accrual** — Pure reward math. No side effects, no stored state.
//! - **governance** — Parameter record and the admin-gated write path.
//! - **store** — The ledger book: stakes, per-account totals, global total.
//! - **lifecycle** — The controller. The only component that mutates the book.
//! - **notify** — The outbound scoring port. Best-effort, never rolls us back.
//!
//! ## Design Philosophy
//!
//! 1. All monetary arithmetic is checked or widened — wrapping and money
//!    do not mix.
//! 2. State transitions are explicit enum variants, not boolean flags.
//! 3. Every operation either fully applies its effect or applies none.
//! 4. If it touches money, it has tests. Plural.

pub mod accrual;
pub mod config;
pub mod error;
pub mod governance;
pub mod lifecycle;
pub mod notify;
pub mod stake;
pub mod store;

pub use config::LedgerConfig;
pub use error::{ErrorCategory, LedgerError};
pub use lifecycle::StakingLedger;
pub use notify::{NotifyError, NullSink, RecordingSink, ScoreSink};
pub use stake::{Account, Stake, StakeId, StakeStatus, StakeView};
