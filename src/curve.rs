//! Curve Identifiers and Pairing Helpers
//!
//! This module names the supported pairing-friendly curves and provides the
//! few group operations the commitment layer needs, generic over any
//! arkworks [`Pairing`].
//!
//! # Supported curves
//! | Id | Name        | Arkworks crate    |
//! |----|-------------|-------------------|
//! | 1  | `bn254`     | `ark-bn254`       |
//! | 2  | `bls12-381` | `ark-bls12-381`   |
//! | 3  | `bls12-377` | `ark-bls12-377`   |
//! | 4  | `bw6-761`   | `ark-bw6-761`     |

use std::fmt;
use std::str::FromStr;

use ark_ec::{pairing::Pairing, AffineRepr, CurveGroup, VariableBaseMSM};
use ark_ff::One;
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Identifier of a supported curve instantiation.
///
/// The discriminant is the tag written into encoded artifacts and must stay
/// stable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CurveId {
    #[serde(rename = "bn254")]
    Bn254 = 1,
    #[serde(rename = "bls12-381")]
    Bls12_381 = 2,
    #[serde(rename = "bls12-377")]
    Bls12_377 = 3,
    #[serde(rename = "bw6-761")]
    Bw6_761 = 4,
}

impl CurveId {
    /// All supported curves, in tag order
    pub const ALL: [CurveId; 4] = [
        CurveId::Bn254,
        CurveId::Bls12_381,
        CurveId::Bls12_377,
        CurveId::Bw6_761,
    ];

    /// Byte tag used in encodings
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Canonical lowercase name
    pub fn name(self) -> &'static str {
        match self {
            CurveId::Bn254 => "bn254",
            CurveId::Bls12_381 => "bls12-381",
            CurveId::Bls12_377 => "bls12-377",
            CurveId::Bw6_761 => "bw6-761",
        }
    }
}

impl TryFrom<u8> for CurveId {
    type Error = Error;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        CurveId::ALL
            .into_iter()
            .find(|c| c.tag() == tag)
            .ok_or_else(|| Error::UnsupportedInstantiation(format!("unknown curve tag {}", tag)))
    }
}

impl FromStr for CurveId {
    type Err = Error;

    /// Accepts the canonical names plus the common aliases
    /// `bn256`, `bls381`, `bls377` and `bw761`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "bn254" | "bn256" => Ok(CurveId::Bn254),
            "bls12-381" | "bls381" => Ok(CurveId::Bls12_381),
            "bls12-377" | "bls377" => Ok(CurveId::Bls12_377),
            "bw6-761" | "bw761" => Ok(CurveId::Bw6_761),
            other => Err(Error::UnsupportedInstantiation(format!(
                "unknown curve `{}`",
                other
            ))),
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Multi-scalar multiplication (MSM): Σ scalars[i] * bases[i]
///
/// Extra bases beyond `scalars.len()` are ignored.
pub fn msm<E: Pairing>(bases: &[E::G1Affine], scalars: &[E::ScalarField]) -> E::G1 {
    let len = bases.len().min(scalars.len());
    <E::G1 as VariableBaseMSM>::msm_unchecked(&bases[..len], &scalars[..len])
}

/// Check if e(P1, Q1) = e(P2, Q2)
/// Equivalent to checking e(P1, Q1) * e(-P2, Q2) = 1
pub fn pairing_check<E: Pairing>(
    p1: &E::G1Affine,
    q1: &E::G2Affine,
    p2: &E::G1Affine,
    q2: &E::G2Affine,
) -> bool {
    let neg_p2 = (-p2.into_group()).into_affine();
    E::multi_pairing([*p1, neg_p2], [*q1, *q2]).0.is_one()
}
