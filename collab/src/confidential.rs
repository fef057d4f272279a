//! # Confidential Commitment Vault
//!
//! Stores opaque commitments to values without storing the values. A
//! commitment is `blake3(value ‖ nonce)` with a fresh random 32-byte nonce
//! generated at commit time; the nonce is returned to the committer and
//! never kept here, so the vault alone can reveal nothing.
//!
//! This is a *binding* stand-in, not encryption — anyone holding the value
//! and nonce can open the commitment, and the digest hides the value only
//! as well as the nonce stays secret. Opening goes through the injected
//! [`ProofVerifier`] so the binding check lives in one place.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use haven_ledger::Account;

use crate::verifier::ProofVerifier;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors from vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// The referenced commitment does not exist.
    #[error("commitment not found: {0}")]
    CommitmentNotFound(String),

    /// The commitment was already opened.
    #[error("commitment {0} already revealed")]
    AlreadyRevealed(String),

    /// The supplied value and nonce do not open the stored commitment.
    #[error("opening rejected for commitment {0}")]
    OpeningRejected(String),
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Unique identifier for a stored commitment.
pub type CommitmentId = String;

/// A stored commitment: the digest and its audit trail, never the value.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Commitment {
    /// Unique commitment identifier.
    pub id: CommitmentId,
    /// The committing account.
    pub owner: Account,
    /// Hex-encoded blake3 digest of `value ‖ nonce`.
    pub digest: String,
    /// When the commitment was stored.
    pub created_at: DateTime<Utc>,
    /// Whether the commitment has been opened.
    pub revealed: bool,
}

/// In-memory commitment store with verifier-gated reveal.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CommitmentVault {
    commitments: HashMap<CommitmentId, Commitment>,
}

impl CommitmentVault {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits to `value` for `owner`. Returns the commitment id and the
    /// freshly generated nonce — the caller must keep the nonce to open
    /// the commitment later; the vault does not.
    pub fn commit(&mut self, owner: Account, value: &[u8]) -> (CommitmentId, [u8; 32]) {
        let mut nonce = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut nonce);

        let mut preimage = Vec::with_capacity(value.len() + nonce.len());
        preimage.extend_from_slice(value);
        preimage.extend_from_slice(&nonce);
        let digest = blake3::hash(&preimage);

        let id = Uuid::new_v4().to_string();
        self.commitments.insert(
            id.clone(),
            Commitment {
                id: id.clone(),
                owner,
                digest: hex::encode(digest.as_bytes()),
                created_at: Utc::now(),
                revealed: false,
            },
        );
        (id, nonce)
    }

    /// Opens a commitment by presenting the value and nonce. The binding
    /// check is delegated to the verifier capability; a commitment opens
    /// at most once.
    ///
    /// # Errors
    ///
    /// [`VaultError::CommitmentNotFound`], [`VaultError::AlreadyRevealed`],
    /// or [`VaultError::OpeningRejected`] when the opening does not bind.
    pub fn reveal(
        &mut self,
        id: &str,
        value: &[u8],
        nonce: &[u8; 32],
        verifier: &dyn ProofVerifier,
    ) -> Result<(), VaultError> {
        let commitment = self
            .commitments
            .get(id)
            .ok_or_else(|| VaultError::CommitmentNotFound(id.to_string()))?;
        if commitment.revealed {
            return Err(VaultError::AlreadyRevealed(id.to_string()));
        }

        let digest =
            hex::decode(&commitment.digest).map_err(|_| VaultError::OpeningRejected(id.to_string()))?;
        let mut preimage = Vec::with_capacity(value.len() + nonce.len());
        preimage.extend_from_slice(value);
        preimage.extend_from_slice(nonce);

        if !verifier.verify(&preimage, &digest) {
            return Err(VaultError::OpeningRejected(id.to_string()));
        }

        // The binding held; mark the commitment as spent.
        if let Some(c) = self.commitments.get_mut(id) {
            c.revealed = true;
        }
        Ok(())
    }

    /// Returns a stored commitment, or `None`.
    pub fn get(&self, id: &str) -> Option<&Commitment> {
        self.commitments.get(id)
    }

    /// Number of stored commitments, revealed or not.
    pub fn len(&self) -> usize {
        self.commitments.len()
    }

    /// Whether the vault is empty.
    pub fn is_empty(&self) -> bool {
        self.commitments.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verifier::{AlwaysDeny, CommitmentVerifier};

    fn owner() -> Account {
        Account::new("hvn:alice")
    }

    #[test]
    fn commit_then_reveal_roundtrip() {
        let mut vault = CommitmentVault::new();
        let (id, nonce) = vault.commit(owner(), b"balance=42");

        assert!(!vault.get(&id).unwrap().revealed);
        vault
            .reveal(&id, b"balance=42", &nonce, &CommitmentVerifier)
            .unwrap();
        assert!(vault.get(&id).unwrap().revealed);
    }

    #[test]
    fn wrong_value_rejected() {
        let mut vault = CommitmentVault::new();
        let (id, nonce) = vault.commit(owner(), b"balance=42");

        let result = vault.reveal(&id, b"balance=43", &nonce, &CommitmentVerifier);
        assert!(matches!(result, Err(VaultError::OpeningRejected(_))));
        assert!(!vault.get(&id).unwrap().revealed);
    }

    #[test]
    fn wrong_nonce_rejected() {
        let mut vault = CommitmentVault::new();
        let (id, _) = vault.commit(owner(), b"balance=42");

        let result = vault.reveal(&id, b"balance=42", &[7u8; 32], &CommitmentVerifier);
        assert!(matches!(result, Err(VaultError::OpeningRejected(_))));
    }

    #[test]
    fn reveal_is_single_use() {
        let mut vault = CommitmentVault::new();
        let (id, nonce) = vault.commit(owner(), b"balance=42");

        vault
            .reveal(&id, b"balance=42", &nonce, &CommitmentVerifier)
            .unwrap();
        let again = vault.reveal(&id, b"balance=42", &nonce, &CommitmentVerifier);
        assert!(matches!(again, Err(VaultError::AlreadyRevealed(_))));
    }

    #[test]
    fn unknown_commitment_rejected() {
        let mut vault = CommitmentVault::new();
        let result = vault.reveal("no-such-id", b"x", &[0u8; 32], &CommitmentVerifier);
        assert!(matches!(result, Err(VaultError::CommitmentNotFound(_))));
    }

    #[test]
    fn verifier_capability_is_the_gate() {
        let mut vault = CommitmentVault::new();
        let (id, nonce) = vault.commit(owner(), b"balance=42");

        // A correct opening still fails under a denying verifier.
        let result = vault.reveal(&id, b"balance=42", &nonce, &AlwaysDeny);
        assert!(matches!(result, Err(VaultError::OpeningRejected(_))));
    }

    #[test]
    fn distinct_commits_to_the_same_value_differ() {
        let mut vault = CommitmentVault::new();
        let (id1, _) = vault.commit(owner(), b"balance=42");
        let (id2, _) = vault.commit(owner(), b"balance=42");

        assert_ne!(id1, id2);
        assert_ne!(vault.get(&id1).unwrap().digest, vault.get(&id2).unwrap().digest);
    }
}
