//! PLONK zk-SNARK Backend
//!
//! An implementation of the PLONK protocol following the paper "PLONK:
//! Permutations over Lagrange-bases for Oecumenical Noninteractive arguments
//! of Knowledge" (Gabizon, Williamson, Ciobotaru, 2019), generic over the
//! scalar field of a pairing-friendly curve and over the polynomial
//! commitment scheme.
//!
//! # Modules
//! - `error`: Error taxonomy shared by every stage
//! - `field`: Scalar field capability set (BN254, BLS12-381, BLS12-377, BW6-761)
//! - `curve`: Curve identifiers, MSM and pairing checks
//! - `polynomial`: Polynomial arithmetic and evaluation
//! - `fft`: Fast Fourier Transform over multiplicative subgroups
//! - `transcript`: Fiat-Shamir transcript for non-interactive proofs
//! - `commitment`: KZG and an insecure mock behind one trait
//! - `circuit`: Constraint systems, assignments and witnesses
//! - `plonk`: Setup, prover and verifier
//! - `serialize`: Raw encodings of public data and proofs
//! - `dispatch`: Curve-keyed entry points over encoded artifacts
//! - `config`: Backend configuration
//!
//! # Example
//! ```ignore
//! let pd = plonk_backend::setup(&cs, Kzg::<Bn254>::setup_insecure(&mut rng, 64), &public)?;
//! let proof = plonk_backend::prove(&cs, &pd, &full)?;
//! plonk_backend::verify(&proof, &pd, &public)?;
//! ```

pub mod error;
pub mod field;
pub mod curve;
pub mod polynomial;
pub mod fft;
pub mod transcript;
pub mod commitment;
pub mod circuit;
pub mod plonk;
pub mod serialize;
pub mod dispatch;
pub mod config;

/// Re-export commonly used types
pub use error::{Error, Result};
pub use field::ScalarField;
pub use curve::CurveId;
pub use polynomial::Polynomial;
pub use commitment::{BindingScheme, CommitmentScheme, InsecureMockScheme, Kzg};
pub use circuit::{Assignment, ConstraintSystem, Variable, Witness};
pub use plonk::{prove, prove_with_rng, setup, verify, Proof, PublicData, VerifyingKey};
pub use dispatch::{prove_encoded, setup_encoded, verify_encoded, CircuitDefinition};
pub use config::BackendConfig;
