//! Fiat-Shamir Transcript
//!
//! This module implements a transcript for the Fiat-Shamir transformation,
//! which converts interactive proofs into non-interactive ones.
//!
//! The transcript absorbs all public information (commitments, evaluations)
//! and produces challenges that are deterministic from the prover's messages.
//! Prover and verifier must absorb the same items in the same order.

use ark_ff::PrimeField;
use ark_serialize::CanonicalSerialize;
use sha2::{Digest, Sha256};

use crate::error::Result;
use crate::fft::Domain;

/// Domain separator used by setup, prove and verify
pub const TRANSCRIPT_LABEL: &[u8] = b"plonk-backend-v1";

/// A Fiat-Shamir transcript for generating challenges
#[derive(Clone, Debug)]
pub struct Transcript {
    hasher: Sha256,
}

impl Transcript {
    /// Create a new transcript with a domain separator
    pub fn new(domain_separator: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(domain_separator);
        Transcript { hasher }
    }

    /// Absorb raw bytes into the transcript
    pub fn absorb_bytes(&mut self, label: &str, data: &[u8]) {
        // Include label in the hash to prevent collisions
        self.hasher.update(label.as_bytes());
        self.hasher.update((data.len() as u64).to_le_bytes());
        self.hasher.update(data);
    }

    /// Absorb a u64 value
    pub fn absorb_u64(&mut self, label: &str, value: u64) {
        self.absorb_bytes(label, &value.to_le_bytes());
    }

    /// Absorb anything with a canonical encoding: field elements,
    /// curve points and commitments.
    pub fn absorb<T: CanonicalSerialize + ?Sized>(&mut self, label: &str, item: &T) -> Result<()> {
        let mut bytes = Vec::with_capacity(item.compressed_size());
        item.serialize_compressed(&mut bytes)?;
        self.absorb_bytes(label, &bytes);
        Ok(())
    }

    /// Squeeze a challenge from the transcript
    pub fn squeeze_challenge<F: PrimeField>(&mut self, label: &str) -> F {
        // Include the label in the squeeze
        self.hasher.update(label.as_bytes());

        // Finalize and re-initialize with the hash to continue the chain
        let hash = self.hasher.finalize_reset();
        self.hasher.update(hash);

        hash_to_field(&hash)
    }

    /// Squeeze a challenge that is not an element of the domain H.
    ///
    /// Evaluation points must avoid H so that Z_H(ζ) is invertible and no
    /// Lagrange denominator vanishes.
    pub fn squeeze_challenge_outside_domain<F: PrimeField>(
        &mut self,
        label: &str,
        domain: &Domain<F>,
    ) -> F {
        loop {
            let challenge = self.squeeze_challenge(label);
            if !domain.contains(&challenge) {
                return challenge;
            }
        }
    }
}

impl Default for Transcript {
    fn default() -> Self {
        Self::new(TRANSCRIPT_LABEL)
    }
}

/// Expand a 32-byte digest to 64 bytes and reduce modulo the field order.
///
/// Reducing twice the modulus width keeps the bias negligible for every
/// supported field, including the 377-bit BW6-761 scalar field.
fn hash_to_field<F: PrimeField>(hash: &[u8]) -> F {
    let mut wide = Vec::with_capacity(64);
    for counter in 0u8..2 {
        let mut hasher = Sha256::new();
        hasher.update(hash);
        hasher.update([counter]);
        wide.extend_from_slice(&hasher.finalize());
    }
    F::from_le_bytes_mod_order(&wide)
}
