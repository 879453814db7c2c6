//! Scalar Field Capability Set
//!
//! Every supported curve contributes its scalar field through [`ScalarField`].
//! All polynomial coefficients, evaluations, selectors and witness values live
//! in one of these fields; the rest of the crate is generic over the choice.
//!
//! | Curve      | Scalar field bits | Two-adicity |
//! |------------|-------------------|-------------|
//! | BN254      | 254               | 28          |
//! | BLS12-381  | 255               | 32          |
//! | BLS12-377  | 253               | 47          |
//! | BW6-761    | 377               | 46          |

use ark_ff::{BigInteger, FftField, Field, PrimeField};
use ark_std::UniformRand;
use num_bigint::BigUint;

use crate::curve::CurveId;

/// A prime field with enough 2-adic structure for radix-2 FFTs, tagged with
/// the curve it belongs to.
pub trait ScalarField: PrimeField + FftField {
    /// The curve whose scalar field this is
    const CURVE: CurveId;

    /// Create a field element from a u64
    fn from_u64(val: u64) -> Self {
        Self::from(val)
    }

    /// Canonical little-endian encoding
    fn to_bytes(&self) -> Vec<u8> {
        self.into_bigint().to_bytes_le()
    }

    /// Parse a canonical little-endian encoding, rejecting values >= modulus
    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::deserialize_compressed(bytes).ok()
    }

    /// Big-endian hex string with `0x` prefix
    fn to_hex(&self) -> String {
        let mut bytes = self.to_bytes();
        bytes.reverse();
        format!("0x{}", hex::encode(bytes))
    }

    /// Parse from a big-endian hex string (the `0x` prefix is optional)
    fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix("0x").unwrap_or(s);
        let mut bytes = hex::decode(s).ok()?;
        let width = Self::zero().compressed_size();
        if bytes.len() > width {
            return None;
        }
        bytes.reverse();
        bytes.resize(width, 0);
        Self::from_bytes(&bytes)
    }

    /// Generate a random field element
    fn random<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        <Self as UniformRand>::rand(rng)
    }
}

impl ScalarField for ark_bn254::Fr {
    const CURVE: CurveId = CurveId::Bn254;
}

impl ScalarField for ark_bls12_381::Fr {
    const CURVE: CurveId = CurveId::Bls12_381;
}

impl ScalarField for ark_bls12_377::Fr {
    const CURVE: CurveId = CurveId::Bls12_377;
}

impl ScalarField for ark_bw6_761::Fr {
    const CURVE: CurveId = CurveId::Bw6_761;
}

/// Convert an unsigned integer into the field.
///
/// Returns `None` when the value is not below the field modulus, so that an
/// assignment is never silently reduced.
pub fn from_biguint<F: PrimeField>(value: &BigUint) -> Option<F> {
    let modulus: BigUint = F::MODULUS.into();
    if *value >= modulus {
        return None;
    }
    Some(F::from(value.clone()))
}

/// Compute the Lagrange basis polynomial L_i(x) evaluated at point x
/// L_i(x) = ω^i * (x^n - 1) / (n * (x - ω^i))
pub fn lagrange_basis_eval<F: Field>(i: usize, x: &F, omega: &F, n: usize) -> F {
    let omega_i = omega.pow([i as u64]);
    let denom = F::from(n as u64) * (*x - omega_i);

    match denom.inverse() {
        Some(denom_inv) => {
            let z_h_x = x.pow([n as u64]) - F::one();
            omega_i * z_h_x * denom_inv
        }
        // x = ω^i
        None => F::one(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ark_bls12_381::Fr;
    use ark_ff::{One, Zero};

    #[test]
    fn test_basic_arithmetic() {
        let a = Fr::from_u64(5);
        let b = Fr::from_u64(3);

        assert_eq!(a + b, Fr::from_u64(8));
        assert_eq!(a - b, Fr::from_u64(2));
        assert_eq!(a * b, Fr::from_u64(15));
        assert_eq!(a * a.inverse().unwrap(), Fr::one());
    }

    #[test]
    fn test_curve_tags() {
        assert_eq!(<ark_bn254::Fr as ScalarField>::CURVE, CurveId::Bn254);
        assert_eq!(<ark_bw6_761::Fr as ScalarField>::CURVE, CurveId::Bw6_761);
    }

    #[test]
    fn test_hex_roundtrip() {
        let a = Fr::from_u64(12345678901234567890);
        let hex = a.to_hex();
        assert!(hex.ends_with("ab54a98ceb1f0ad2"));
        assert_eq!(Fr::from_hex(&hex), Some(a));
        assert_eq!(Fr::from_hex("0x2a"), Some(Fr::from_u64(42)));
    }

    #[test]
    fn test_bytes_reject_modulus() {
        let modulus: BigUint = Fr::MODULUS.into();
        let mut bytes = modulus.to_bytes_le();
        bytes.resize(32, 0);
        assert!(Fr::from_bytes(&bytes).is_none());
        assert!(from_biguint::<Fr>(&modulus).is_none());
        assert_eq!(
            from_biguint::<Fr>(&(modulus - 1u32)),
            Some(-Fr::one())
        );
    }

    #[test]
    fn test_lagrange_basis() {
        let n = 8;
        let omega = Fr::get_root_of_unity(n as u64).unwrap();

        // L_i(ω^j) = δ_ij
        for i in 0..n {
            for j in 0..n {
                let x = omega.pow([j as u64]);
                let expected = if i == j { Fr::one() } else { Fr::zero() };
                assert_eq!(lagrange_basis_eval(i, &x, &omega, n), expected);
            }
        }

        // Σ L_i(x) = 1 for any x
        let x = Fr::from_u64(987654321);
        let sum: Fr = (0..n).map(|i| lagrange_basis_eval(i, &x, &omega, n)).sum();
        assert_eq!(sum, Fr::one());
    }
}
