//! # Proof Verification Capability
//!
//! The confidentiality and relay layers both need to ask "does this proof
//! bind to this data?" without caring how the answer is produced. That
//! question is a single boolean contract, expressed here as the
//! [`ProofVerifier`] trait and injected wherever a proof is checked.
//!
//! The shipped [`CommitmentVerifier`] checks a blake3 digest binding:
//! `proof == blake3(data)`. It is a binding commitment, not a zero-
//! knowledge proof, and the trait boundary exists precisely so a real
//! proof system can replace it without touching any caller.

/// Boolean proof-check capability.
pub trait ProofVerifier: Send + Sync {
    /// Returns `true` iff `proof` is valid for `data`. Malformed input is
    /// an invalid proof, never a panic.
    fn verify(&self, data: &[u8], proof: &[u8]) -> bool;
}

/// Digest-binding verifier: a proof is the 32-byte blake3 hash of the data.
pub struct CommitmentVerifier;

impl ProofVerifier for CommitmentVerifier {
    fn verify(&self, data: &[u8], proof: &[u8]) -> bool {
        let Ok(expected) = <[u8; 32]>::try_from(proof) else {
            return false;
        };
        // Constant-time comparison via blake3's Hash equality.
        blake3::hash(data) == blake3::Hash::from_bytes(expected)
    }
}

/// A verifier that rejects everything. Guard double for tests that need
/// the failure path.
pub struct AlwaysDeny;

impl ProofVerifier for AlwaysDeny {
    fn verify(&self, _data: &[u8], _proof: &[u8]) -> bool {
        false
    }
}

/// A verifier that accepts everything. Only useful in tests.
pub struct AlwaysAllow;

impl ProofVerifier for AlwaysAllow {
    fn verify(&self, _data: &[u8], _proof: &[u8]) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_digest_accepted() {
        let data = b"haven commitment payload";
        let proof = blake3::hash(data);
        assert!(CommitmentVerifier.verify(data, proof.as_bytes()));
    }

    #[test]
    fn wrong_digest_rejected() {
        let proof = blake3::hash(b"something else");
        assert!(!CommitmentVerifier.verify(b"haven commitment payload", proof.as_bytes()));
    }

    #[test]
    fn malformed_proof_rejected_not_panicking() {
        assert!(!CommitmentVerifier.verify(b"data", b""));
        assert!(!CommitmentVerifier.verify(b"data", &[0u8; 31]));
        assert!(!CommitmentVerifier.verify(b"data", &[0u8; 64]));
    }

    #[test]
    fn doubles_behave_as_named() {
        assert!(!AlwaysDeny.verify(b"x", b"y"));
        assert!(AlwaysAllow.verify(b"x", b"y"));
    }
}
