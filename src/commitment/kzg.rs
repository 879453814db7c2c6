//! KZG (Kate-Zaverucha-Goldberg) Polynomial Commitment Scheme
//!
//! This module implements the KZG polynomial commitment scheme with:
//! - SRS generation from a locally sampled τ
//! - Polynomial commitment
//! - Opening proofs and their verification
//!
//! Reference: "Constant-Size Commitments to Polynomials and Their Applications"
//! (Kate, Zaverucha, Goldberg, 2010)

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup};
use ark_ff::{One, UniformRand};
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rayon::prelude::*;
use tracing::{debug, warn};

use super::{BindingScheme, CommitmentScheme};
use crate::curve::{msm, pairing_check};
use crate::error::{Error, Result};
use crate::field::ScalarField;
use crate::polynomial::Polynomial;

/// Largest SRS accepted when decoding untrusted bytes
pub const MAX_SRS_DEGREE: usize = 1 << 28;

/// Structured Reference String (SRS) for KZG
///
/// Contains powers of τ in both G1 and G2:
/// - G1: [1]₁, [τ]₁, [τ²]₁, ..., [τ^d]₁
/// - G2: [1]₂, [τ]₂
///
/// τ is the "toxic waste" that must be destroyed after setup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Srs<E: Pairing> {
    /// Maximum polynomial degree supported
    pub max_degree: usize,
    /// Powers of τ in G1: [τ^i]₁ for i = 0, 1, ..., max_degree
    pub g1_powers: Vec<E::G1Affine>,
    /// [1]₂ - Generator of G2
    pub g2_generator: E::G2Affine,
    /// [τ]₂ - τ times the G2 generator
    pub g2_tau: E::G2Affine,
}

impl<E: Pairing> Srs<E> {
    /// Generate an SRS with a single locally sampled τ.
    ///
    /// Whoever runs this learns τ and can forge openings. Suitable for tests
    /// and single-party deployments only.
    pub fn generate_insecure<R: Rng + ?Sized>(rng: &mut R, max_degree: usize) -> Self {
        let tau = E::ScalarField::rand(rng);
        Self::from_tau(&tau, max_degree)
    }

    /// Generate SRS from a known τ
    pub fn from_tau(tau: &E::ScalarField, max_degree: usize) -> Self {
        let g1 = E::G1Affine::generator();
        let g2 = E::G2Affine::generator();

        let mut tau_powers = Vec::with_capacity(max_degree + 1);
        let mut tau_power = E::ScalarField::one();
        for _ in 0..=max_degree {
            tau_powers.push(tau_power);
            tau_power *= tau;
        }

        // Compute [τ^i]₁ for i = 0, 1, ..., max_degree
        let projective: Vec<E::G1> = tau_powers.par_iter().map(|t| g1 * *t).collect();
        let g1_powers = E::G1::normalize_batch(&projective);

        // Compute [τ]₂
        let g2_tau = (g2 * *tau).into_affine();

        Srs {
            max_degree,
            g1_powers,
            g2_generator: g2,
            g2_tau,
        }
    }

    /// Verify that the SRS is well-formed using pairing checks
    /// e([τ^i]₁, [1]₂) = e([τ^{i-1}]₁, [τ]₂)
    pub fn verify(&self) -> bool {
        if self.g1_powers.len() != self.max_degree + 1 {
            return false;
        }
        if self.g1_powers[0] != E::G1Affine::generator() {
            return false;
        }
        if self.g1_powers.len() < 2 {
            return true;
        }

        // For efficiency, only check a few powers
        [1, 2, 5, self.max_degree]
            .into_iter()
            .filter(|i| *i < self.g1_powers.len())
            .all(|i| {
                pairing_check::<E>(
                    &self.g1_powers[i],
                    &self.g2_generator,
                    &self.g1_powers[i - 1],
                    &self.g2_tau,
                )
            })
    }
}

/// A polynomial commitment (a point in G1)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KzgCommitment<E: Pairing>(pub E::G1Affine);

/// An opening proof [q]₁ with q(X) = (f(X) - y) / (X - z)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KzgOpening<E: Pairing>(pub E::G1Affine);

/// The KZG scheme over the pairing `E`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Kzg<E: Pairing> {
    pub srs: Srs<E>,
}

impl<E: Pairing> Kzg<E> {
    pub fn new(srs: Srs<E>) -> Self {
        Kzg { srs }
    }

    /// Sample a fresh τ from `rng`. See [`Srs::generate_insecure`].
    pub fn setup_insecure<R: Rng + ?Sized>(rng: &mut R, max_degree: usize) -> Self {
        debug!(max_degree, "generating KZG SRS");
        Kzg::new(Srs::generate_insecure(rng, max_degree))
    }

    /// Deterministic SRS derived from a seed. Anyone knowing the seed knows τ.
    pub fn setup_from_seed(seed: u64, max_degree: usize) -> Self {
        warn!(seed, max_degree, "deriving KZG SRS from a public seed; not for production");
        let mut rng = ChaCha20Rng::seed_from_u64(seed);
        Self::setup_insecure(&mut rng, max_degree)
    }
}

impl<E: Pairing> CommitmentScheme<E::ScalarField> for Kzg<E>
where
    E::ScalarField: ScalarField,
{
    type Commitment = KzgCommitment<E>;
    type OpeningProof = KzgOpening<E>;

    const SCHEME_ID: u8 = 1;
    const NAME: &'static str = "kzg";
    const BINDING: bool = true;

    fn max_degree(&self) -> usize {
        self.srs.max_degree
    }

    /// Commit to a polynomial: [f]₁ = Σ f_i * [τ^i]₁
    fn commit(&self, poly: &Polynomial<E::ScalarField>) -> Result<KzgCommitment<E>> {
        if poly.coeffs.len() > self.srs.g1_powers.len() {
            return Err(Error::DegreeTooLarge {
                degree: poly.coeffs.len() - 1,
                max: self.srs.max_degree,
            });
        }

        let point = msm::<E>(&self.srs.g1_powers, &poly.coeffs);
        Ok(KzgCommitment(point.into_affine()))
    }

    fn open(
        &self,
        poly: &Polynomial<E::ScalarField>,
        point: &E::ScalarField,
    ) -> Result<(E::ScalarField, KzgOpening<E>)> {
        let y = poly.evaluate(point);

        // q(X) = (f(X) - y) / (X - z)
        let quotient = poly.div_by_linear(point);
        let proof = self.commit(&quotient)?;

        Ok((y, KzgOpening(proof.0)))
    }

    /// Verify an opening proof: e([f]₁ - y*[1]₁, [1]₂) = e([π]₁, [τ]₂ - z*[1]₂)
    ///
    /// This checks that f(τ) - y = π(τ) * (τ - z), i.e., f(z) = y.
    fn verify_opening(
        &self,
        commitment: &KzgCommitment<E>,
        point: &E::ScalarField,
        evaluation: &E::ScalarField,
        proof: &KzgOpening<E>,
    ) -> bool {
        let g1 = E::G1Affine::generator();
        let lhs = (commitment.0.into_group() - g1 * *evaluation).into_affine();
        let shifted_tau =
            (self.srs.g2_tau.into_group() - self.srs.g2_generator * *point).into_affine();

        pairing_check::<E>(&lhs, &self.srs.g2_generator, &proof.0, &shifted_tau)
    }
}

impl<E: Pairing> BindingScheme<E::ScalarField> for Kzg<E> where E::ScalarField: ScalarField {}

macro_rules! impl_g1_newtype_serialization {
    ($name:ident) => {
        impl<E: Pairing> CanonicalSerialize for $name<E> {
            fn serialize_with_mode<W: Write>(
                &self,
                writer: W,
                compress: Compress,
            ) -> std::result::Result<(), SerializationError> {
                self.0.serialize_with_mode(writer, compress)
            }

            fn serialized_size(&self, compress: Compress) -> usize {
                self.0.serialized_size(compress)
            }
        }

        impl<E: Pairing> Valid for $name<E> {
            fn check(&self) -> std::result::Result<(), SerializationError> {
                self.0.check()
            }
        }

        impl<E: Pairing> CanonicalDeserialize for $name<E> {
            fn deserialize_with_mode<R: Read>(
                reader: R,
                compress: Compress,
                validate: Validate,
            ) -> std::result::Result<Self, SerializationError> {
                E::G1Affine::deserialize_with_mode(reader, compress, validate).map($name)
            }
        }
    };
}

impl_g1_newtype_serialization!(KzgCommitment);
impl_g1_newtype_serialization!(KzgOpening);

impl<E: Pairing> CanonicalSerialize for Kzg<E> {
    fn serialize_with_mode<W: Write>(
        &self,
        mut writer: W,
        compress: Compress,
    ) -> std::result::Result<(), SerializationError> {
        (self.srs.max_degree as u64).serialize_with_mode(&mut writer, compress)?;
        for point in &self.srs.g1_powers {
            point.serialize_with_mode(&mut writer, compress)?;
        }
        self.srs.g2_generator.serialize_with_mode(&mut writer, compress)?;
        self.srs.g2_tau.serialize_with_mode(&mut writer, compress)
    }

    fn serialized_size(&self, compress: Compress) -> usize {
        8 + self
            .srs
            .g1_powers
            .iter()
            .map(|p| p.serialized_size(compress))
            .sum::<usize>()
            + self.srs.g2_generator.serialized_size(compress)
            + self.srs.g2_tau.serialized_size(compress)
    }
}

impl<E: Pairing> Valid for Kzg<E> {
    fn check(&self) -> std::result::Result<(), SerializationError> {
        if self.srs.g1_powers.len() != self.srs.max_degree + 1 {
            return Err(SerializationError::InvalidData);
        }
        Ok(())
    }
}

impl<E: Pairing> CanonicalDeserialize for Kzg<E> {
    fn deserialize_with_mode<R: Read>(
        mut reader: R,
        compress: Compress,
        validate: Validate,
    ) -> std::result::Result<Self, SerializationError> {
        let max_degree = u64::deserialize_with_mode(&mut reader, compress, validate)?;
        if max_degree > MAX_SRS_DEGREE as u64 {
            return Err(SerializationError::InvalidData);
        }
        let max_degree = max_degree as usize;

        // Grow as points arrive so a forged length cannot force a huge allocation
        let mut g1_powers = Vec::new();
        for _ in 0..=max_degree {
            g1_powers.push(E::G1Affine::deserialize_with_mode(
                &mut reader,
                compress,
                validate,
            )?);
        }
        let g2_generator = E::G2Affine::deserialize_with_mode(&mut reader, compress, validate)?;
        let g2_tau = E::G2Affine::deserialize_with_mode(&mut reader, compress, validate)?;

        Ok(Kzg::new(Srs {
            max_degree,
            g1_powers,
            g2_generator,
            g2_tau,
        }))
    }
}
