//! # Cross-Chain Payment Relay
//!
//! Records outbound transfer intents and releases them against bridge
//! proofs. This is the relay's bookkeeping half only — no settlement, no
//! light clients, no message passing. A transfer is collateralized by the
//! initiator's staked total in the custody ledger, read through the core's
//! read-only view at initiation time.
//!
//! ```text
//!                 initiate            submit_proof (valid)
//!   (collateral ok) ──► Pending ────────────────────────► Released
//!                          │
//!                          │ submit_proof (invalid)
//!                          ▼
//!                       Rejected
//! ```
//!
//! Released and Rejected are terminal. Proof validity is delegated to the
//! injected [`ProofVerifier`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use haven_ledger::{Account, StakingLedger};

use crate::verifier::ProofVerifier;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from relay operations.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The referenced transfer does not exist.
    #[error("transfer not found: {0}")]
    TransferNotFound(String),

    /// The transfer already reached a terminal state.
    #[error("transfer {id} is {status}, not pending")]
    NotPending {
        /// The transfer id.
        id: String,
        /// Its current terminal status.
        status: RelayStatus,
    },

    /// The initiator's staked total does not cover the transfer.
    #[error("insufficient collateral: transfer of {requested} against {staked} staked")]
    InsufficientCollateral {
        /// The requested transfer amount.
        requested: u64,
        /// The initiator's staked total at initiation time.
        staked: u64,
    },
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Unique identifier for a relay transfer.
pub type TransferId = String;

/// Lifecycle state of a relay transfer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayStatus {
    /// Awaiting a bridge proof.
    Pending,
    /// Proof verified; the transfer is released to the destination chain.
    Released,
    /// Proof rejected; the transfer will never release.
    Rejected,
}

impl std::fmt::Display for RelayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelayStatus::Pending => write!(f, "pending"),
            RelayStatus::Released => write!(f, "released"),
            RelayStatus::Rejected => write!(f, "rejected"),
        }
    }
}

/// One recorded transfer intent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RelayTransfer {
    /// Unique transfer identifier.
    pub id: TransferId,
    /// The initiating account.
    pub account: Account,
    /// Amount to move, in the ledger's asset denomination.
    pub amount: u64,
    /// Destination chain identifier (e.g. "chain:osmo-1").
    pub dest_chain: String,
    /// Current lifecycle state.
    pub status: RelayStatus,
    /// When the transfer was initiated.
    pub created_at: DateTime<Utc>,
}

/// The relay's transfer book.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct PaymentRelay {
    transfers: HashMap<TransferId, RelayTransfer>,
}

impl PaymentRelay {
    /// Creates an empty relay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Initiates a transfer, collateralized by the account's current
    /// staked total in the ledger.
    ///
    /// # Errors
    ///
    /// [`RelayError::InsufficientCollateral`] when the staked total does
    /// not cover the amount.
    pub fn initiate(
        &mut self,
        ledger: &StakingLedger,
        account: Account,
        amount: u64,
        dest_chain: impl Into<String>,
    ) -> Result<TransferId, RelayError> {
        let staked = ledger.total_staked(&account);
        if amount > staked {
            return Err(RelayError::InsufficientCollateral {
                requested: amount,
                staked,
            });
        }

        let id = Uuid::new_v4().to_string();
        self.transfers.insert(
            id.clone(),
            RelayTransfer {
                id: id.clone(),
                account,
                amount,
                dest_chain: dest_chain.into(),
                status: RelayStatus::Pending,
                created_at: Utc::now(),
            },
        );
        Ok(id)
    }

    /// Presents a bridge proof for a pending transfer. A valid proof
    /// releases the transfer, an invalid one rejects it; either way the
    /// transfer leaves `Pending` exactly once.
    ///
    /// # Errors
    ///
    /// [`RelayError::TransferNotFound`] or [`RelayError::NotPending`].
    pub fn submit_proof(
        &mut self,
        id: &str,
        payload: &[u8],
        proof: &[u8],
        verifier: &dyn ProofVerifier,
    ) -> Result<RelayStatus, RelayError> {
        let transfer = self
            .transfers
            .get_mut(id)
            .ok_or_else(|| RelayError::TransferNotFound(id.to_string()))?;
        if transfer.status != RelayStatus::Pending {
            return Err(RelayError::NotPending {
                id: id.to_string(),
                status: transfer.status,
            });
        }

        transfer.status = if verifier.verify(payload, proof) {
            RelayStatus::Released
        } else {
            RelayStatus::Rejected
        };
        Ok(transfer.status)
    }

    /// Returns a transfer record, or `None`.
    pub fn get(&self, id: &str) -> Option<&RelayTransfer> {
        self.transfers.get(id)
    }

    /// Number of transfers still awaiting a proof.
    pub fn pending_count(&self) -> usize {
        self.transfers
            .values()
            .filter(|t| t.status == RelayStatus::Pending)
            .count()
    }
}
