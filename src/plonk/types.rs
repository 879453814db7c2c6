//! PLONK Type Definitions
//!
//! Contains the data structures exchanged between setup, prover and verifier.
//! Their raw encodings live in [`crate::serialize`].

use crate::commitment::CommitmentScheme;
use crate::fft::Domain;
use crate::field::ScalarField;
use crate::polynomial::Polynomial;

/// Number of openings carried by a proof: fifteen at ζ and Z at ζω
pub const NB_OPENINGS: usize = 16;

/// Labels of the opened polynomials, in proof order
pub const OPENING_LABELS: [&str; NB_OPENINGS] = [
    "L", "R", "O", "Z", "qL", "qR", "qM", "qO", "qK", "S1", "S2", "S3", "H_lo", "H_mid", "H_hi",
    "Z(ζω)",
];

/// Labels of the verifying-key commitments, in their stable order
pub const VERIFYING_KEY_LABELS: [&str; 8] = ["qL", "qR", "qM", "qO", "qK", "S1", "S2", "S3"];

/// Commitments to the eight preprocessed polynomials.
///
/// This is the part of [`PublicData`] a verifier on another platform needs.
/// Fields are listed, absorbed and encoded in the order qL, qR, qM, qO, qK,
/// S1, S2, S3.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyingKey<F: ScalarField, S: CommitmentScheme<F>> {
    pub q_l: S::Commitment,
    pub q_r: S::Commitment,
    pub q_m: S::Commitment,
    pub q_o: S::Commitment,
    /// Constant selector
    pub q_k: S::Commitment,
    pub s1: S::Commitment,
    pub s2: S::Commitment,
    pub s3: S::Commitment,
}

impl<F: ScalarField, S: CommitmentScheme<F>> VerifyingKey<F, S> {
    /// The commitments in stable order
    pub fn commitments(&self) -> [&S::Commitment; 8] {
        [
            &self.q_l, &self.q_r, &self.q_m, &self.q_o, &self.q_k, &self.s1, &self.s2, &self.s3,
        ]
    }

    pub(crate) fn from_commitments(c: [S::Commitment; 8]) -> Self {
        let [q_l, q_r, q_m, q_o, q_k, s1, s2, s3] = c;
        VerifyingKey {
            q_l,
            q_r,
            q_m,
            q_o,
            q_k,
            s1,
            s2,
            s3,
        }
    }
}

/// Preprocessed circuit material, produced once by [`crate::plonk::setup`]
/// and shared read-only by every prove and verify call for that circuit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicData<F: ScalarField, S: CommitmentScheme<F>> {
    /// Evaluation domain H of size n
    pub domain: Domain<F>,
    /// Number of public inputs; public-input gates occupy rows 0..nb_public
    pub nb_public: usize,
    /// Coset shifts of the B and C wire columns
    pub k1: F,
    pub k2: F,
    /// Fiat-Shamir domain separator
    pub transcript_label: Vec<u8>,

    /// Selector polynomials in coefficient form
    pub q_l: Polynomial<F>,
    pub q_r: Polynomial<F>,
    pub q_m: Polynomial<F>,
    pub q_o: Polynomial<F>,
    pub q_k: Polynomial<F>,

    /// Permutation polynomials S_σ1, S_σ2, S_σ3 in coefficient form
    pub s1: Polynomial<F>,
    pub s2: Polynomial<F>,
    pub s3: Polynomial<F>,

    pub vk: VerifyingKey<F, S>,
    /// The scheme instance the commitments were made with
    pub scheme: S,
}

impl<F: ScalarField, S: CommitmentScheme<F>> PublicData<F, S> {
    /// Domain size n
    pub fn n(&self) -> usize {
        self.domain.size()
    }

    /// The preprocessed polynomials in verifying-key order
    pub fn polynomials(&self) -> [&Polynomial<F>; 8] {
        [
            &self.q_l, &self.q_r, &self.q_m, &self.q_o, &self.q_k, &self.s1, &self.s2, &self.s3,
        ]
    }
}

/// Claimed polynomial evaluations.
///
/// Everything except `z_omega` is evaluated at ζ; `z_omega` is Z(ζω).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProofEvaluations<F> {
    pub l: F,
    pub r: F,
    pub o: F,
    pub z: F,
    pub q_l: F,
    pub q_r: F,
    pub q_m: F,
    pub q_o: F,
    pub q_k: F,
    pub s1: F,
    pub s2: F,
    pub s3: F,
    pub h_lo: F,
    pub h_mid: F,
    pub h_hi: F,
    pub z_omega: F,
}

impl<F: Copy> ProofEvaluations<F> {
    /// All evaluations in [`OPENING_LABELS`] order
    pub fn to_array(&self) -> [F; NB_OPENINGS] {
        [
            self.l,
            self.r,
            self.o,
            self.z,
            self.q_l,
            self.q_r,
            self.q_m,
            self.q_o,
            self.q_k,
            self.s1,
            self.s2,
            self.s3,
            self.h_lo,
            self.h_mid,
            self.h_hi,
            self.z_omega,
        ]
    }

    pub fn from_array(e: [F; NB_OPENINGS]) -> Self {
        let [l, r, o, z, q_l, q_r, q_m, q_o, q_k, s1, s2, s3, h_lo, h_mid, h_hi, z_omega] = e;
        ProofEvaluations {
            l,
            r,
            o,
            z,
            q_l,
            q_r,
            q_m,
            q_o,
            q_k,
            s1,
            s2,
            s3,
            h_lo,
            h_mid,
            h_hi,
            z_omega,
        }
    }
}

/// PLONK proof: every commitment, evaluation and opening produced by the prover.
///
/// The shape is fixed, so the encoding carries no length prefixes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof<F: ScalarField, S: CommitmentScheme<F>> {
    // Round 1: wire polynomials
    pub l: S::Commitment,
    pub r: S::Commitment,
    pub o: S::Commitment,

    // Round 2: grand product
    pub z: S::Commitment,

    // Round 3: quotient split as H_lo + X^n H_mid + X^{2n} H_hi
    pub h: [S::Commitment; 3],

    // Round 4
    pub evaluations: ProofEvaluations<F>,

    // Round 5: openings in OPENING_LABELS order
    pub openings: [S::OpeningProof; NB_OPENINGS],
}

impl<F: ScalarField, S: CommitmentScheme<F>> Proof<F, S> {
    /// The commitment each opening refers to, in [`OPENING_LABELS`] order
    pub fn opened_commitments<'a>(&'a self, vk: &'a VerifyingKey<F, S>) -> [&'a S::Commitment; NB_OPENINGS] {
        [
            &self.l, &self.r, &self.o, &self.z, &vk.q_l, &vk.q_r, &vk.q_m, &vk.q_o, &vk.q_k,
            &vk.s1, &vk.s2, &vk.s3, &self.h[0], &self.h[1], &self.h[2], &self.z,
        ]
    }
}
