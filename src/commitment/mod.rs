//! Polynomial Commitment Schemes
//!
//! The protocol only needs three capabilities from a commitment scheme:
//! commit to a polynomial, open it at a point, and check an opening. They are
//! captured by [`CommitmentScheme`] and implemented by:
//! - [`kzg::Kzg`]: the pairing-based KZG scheme, cryptographically binding
//! - [`mock::InsecureMockScheme`]: empty commitments, always-accepting openings
//!
//! Only schemes implementing [`BindingScheme`] are accepted by the curve-keyed
//! entry points in [`crate::dispatch`].

pub mod kzg;
pub mod mock;

use std::fmt::Debug;

use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};

use crate::error::Result;
use crate::field::ScalarField;
use crate::polynomial::Polynomial;

pub use kzg::{Kzg, KzgCommitment, KzgOpening, Srs};
pub use mock::{InsecureMockScheme, MockCommitment, MockOpeningProof};

/// Commit / Open / VerifyOpening over polynomials with coefficients in `F`.
///
/// The scheme instance itself is part of the public data, so it must be
/// serializable and shareable across threads.
pub trait CommitmentScheme<F: ScalarField>:
    Clone + Debug + PartialEq + Send + Sync + CanonicalSerialize + CanonicalDeserialize
{
    type Commitment: Clone
        + Debug
        + PartialEq
        + Eq
        + Send
        + Sync
        + CanonicalSerialize
        + CanonicalDeserialize;

    type OpeningProof: Clone
        + Debug
        + PartialEq
        + Eq
        + Send
        + Sync
        + CanonicalSerialize
        + CanonicalDeserialize;

    /// Tag written into encoded artifacts
    const SCHEME_ID: u8;

    /// Human readable name for logs and errors
    const NAME: &'static str;

    /// Whether commitments are binding; true exactly for [`BindingScheme`]s
    const BINDING: bool;

    /// Largest polynomial degree this instance can commit to
    fn max_degree(&self) -> usize;

    /// Commit to a polynomial in coefficient form
    fn commit(&self, poly: &Polynomial<F>) -> Result<Self::Commitment>;

    /// Evaluate `poly` at `point` and prove the evaluation
    fn open(&self, poly: &Polynomial<F>, point: &F) -> Result<(F, Self::OpeningProof)>;

    /// Check that `commitment` opens to `evaluation` at `point`
    fn verify_opening(
        &self,
        commitment: &Self::Commitment,
        point: &F,
        evaluation: &F,
        proof: &Self::OpeningProof,
    ) -> bool;
}

/// Marker for schemes whose commitments are binding.
///
/// Implemented by [`Kzg`] and deliberately not by [`InsecureMockScheme`].
pub trait BindingScheme<F: ScalarField>: CommitmentScheme<F> {}
