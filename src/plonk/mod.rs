//! PLONK Protocol Implementation
//!
//! This module implements the PLONK proving system following the paper:
//! "PLONK: Permutations over Lagrange-bases for Oecumenical Noninteractive
//!  arguments of Knowledge" by Gabizon, Williamson, and Ciobotaru.
//!
//! Setup, prove and verify are generic over the scalar field and the
//! commitment scheme:
//!
//! ```text
//! ConstraintSystem + scheme ── setup ──> PublicData
//! PublicData + full witness ── prove ──> Proof
//! Proof + PublicData + public witness ── verify ──> Ok / Error
//! ```

pub mod permutation;
pub mod prover;
pub mod setup;
pub mod types;
pub mod verifier;

pub use permutation::{coset_shifts, Permutation};
pub use prover::{prove, prove_with_rng};
pub use setup::{domain_for, required_degree, setup, setup_with_label};
pub use types::*;
pub use verifier::verify;

use crate::commitment::CommitmentScheme;
use crate::error::Result;
use crate::field::ScalarField;
use crate::transcript::Transcript;

/// Fiat-Shamir challenges shared by prover and verifier
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Challenges<F> {
    pub beta: F,
    pub gamma: F,
    pub alpha: F,
    pub zeta: F,
}

/// Absorb what both sides know before the first round: the domain size,
/// the verifying key and the public inputs.
pub(crate) fn absorb_public<F, S>(
    transcript: &mut Transcript,
    pd: &PublicData<F, S>,
    public_inputs: &[F],
) -> Result<()>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    transcript.absorb_u64("n", pd.n() as u64);
    transcript.absorb_u64("nb_public", pd.nb_public as u64);
    for (label, c) in VERIFYING_KEY_LABELS.iter().zip(pd.vk.commitments()) {
        transcript.absorb(label, c)?;
    }
    for x in public_inputs {
        transcript.absorb("public_input", x)?;
    }
    Ok(())
}
