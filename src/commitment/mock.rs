//! Insecure mock commitment scheme.
//!
//! Commitments and opening proofs are empty and every opening is accepted, so
//! a proof produced with this scheme proves nothing. It exists to exercise the
//! setup/prove/verify control flow without paying for group operations.
//! It does not implement [`BindingScheme`](super::BindingScheme) and cannot be
//! selected through [`crate::dispatch`] or [`crate::config`].

use std::marker::PhantomData;

use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Compress, Read, SerializationError, Valid, Validate,
    Write,
};

use super::CommitmentScheme;
use crate::error::Result;
use crate::field::ScalarField;
use crate::polynomial::Polynomial;

/// Non-binding commitment scheme: NEVER use where soundness matters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InsecureMockScheme<F> {
    _field: PhantomData<F>,
}

impl<F> InsecureMockScheme<F> {
    pub fn new() -> Self {
        InsecureMockScheme {
            _field: PhantomData,
        }
    }
}

impl<F> Default for InsecureMockScheme<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sentinel commitment carrying no information
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MockCommitment;

/// Sentinel opening proof carrying no information
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MockOpeningProof;

impl<F: ScalarField> CommitmentScheme<F> for InsecureMockScheme<F> {
    type Commitment = MockCommitment;
    type OpeningProof = MockOpeningProof;

    const SCHEME_ID: u8 = 0xff;
    const NAME: &'static str = "insecure-mock";
    const BINDING: bool = false;

    fn max_degree(&self) -> usize {
        usize::MAX
    }

    fn commit(&self, _poly: &Polynomial<F>) -> Result<MockCommitment> {
        Ok(MockCommitment)
    }

    fn open(&self, poly: &Polynomial<F>, point: &F) -> Result<(F, MockOpeningProof)> {
        Ok((poly.evaluate(point), MockOpeningProof))
    }

    /// Always accepts.
    fn verify_opening(
        &self,
        _commitment: &MockCommitment,
        _point: &F,
        _evaluation: &F,
        _proof: &MockOpeningProof,
    ) -> bool {
        true
    }
}

// All three types encode to zero bytes.
macro_rules! impl_empty_serialization {
    ($name:ty, $value:expr $(, $generic:ident)?) => {
        impl$(<$generic: ScalarField>)? CanonicalSerialize for $name {
            fn serialize_with_mode<W: Write>(
                &self,
                _writer: W,
                _compress: Compress,
            ) -> std::result::Result<(), SerializationError> {
                Ok(())
            }

            fn serialized_size(&self, _compress: Compress) -> usize {
                0
            }
        }

        impl$(<$generic: ScalarField>)? Valid for $name {
            fn check(&self) -> std::result::Result<(), SerializationError> {
                Ok(())
            }
        }

        impl$(<$generic: ScalarField>)? CanonicalDeserialize for $name {
            fn deserialize_with_mode<R: Read>(
                _reader: R,
                _compress: Compress,
                _validate: Validate,
            ) -> std::result::Result<Self, SerializationError> {
                Ok($value)
            }
        }
    };
}

impl_empty_serialization!(MockCommitment, MockCommitment);
impl_empty_serialization!(MockOpeningProof, MockOpeningProof);
impl_empty_serialization!(InsecureMockScheme<F>, InsecureMockScheme::new(), F);

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bn254::Fr;

    #[test]
    fn test_mock_accepts_wrong_openings() {
        let scheme = InsecureMockScheme::<Fr>::new();
        let f = Polynomial::from_coeffs(vec![Fr::from_u64(1), Fr::from_u64(2)]);

        let commitment = scheme.commit(&f).unwrap();
        let (y, proof) = scheme.open(&f, &Fr::from_u64(3)).unwrap();
        assert_eq!(y, Fr::from_u64(7));

        // Any claimed value verifies
        assert!(scheme.verify_opening(&commitment, &Fr::from_u64(3), &y, &proof));
        assert!(scheme.verify_opening(
            &commitment,
            &Fr::from_u64(3),
            &Fr::from_u64(1000),
            &proof
        ));
    }

    #[test]
    fn test_mock_encodes_to_nothing() {
        let scheme = InsecureMockScheme::<Fr>::new();
        assert_eq!(scheme.compressed_size(), 0);
        assert_eq!(MockCommitment.compressed_size(), 0);

        let decoded = MockOpeningProof::deserialize_compressed(&[][..]).unwrap();
        assert_eq!(decoded, MockOpeningProof);
    }
}
