//! Curve-Keyed Entry Points
//!
//! The generic API in [`crate::plonk`] fixes the curve at compile time. The
//! functions here pick it at runtime, from a [`BackendConfig`] for setup and
//! from the artifact header afterwards, and always instantiate KZG. Inputs
//! and outputs are encoded artifacts and curve-agnostic [`Assignment`]s.
//!
//! | Curve       | Pairing                      |
//! |-------------|------------------------------|
//! | `bn254`     | `ark_bn254::Bn254`           |
//! | `bls12-381` | `ark_bls12_381::Bls12_381`   |
//! | `bls12-377` | `ark_bls12_377::Bls12_377`   |
//! | `bw6-761`   | `ark_bw6_761::BW6_761`       |

use ark_ec::pairing::Pairing;
use tracing::{info, info_span};

use crate::circuit::{Assignment, ConstraintSystem, Witness};
use crate::commitment::{BindingScheme, Kzg};
use crate::config::BackendConfig;
use crate::curve::CurveId;
use crate::error::Result;
use crate::field::ScalarField;
use crate::plonk::{domain_for, prove, required_degree, setup_with_label, verify, Proof, PublicData};
use crate::serialize::read_header;

/// A circuit that can be built over any supported scalar field
pub trait CircuitDefinition {
    fn define<F: ScalarField>(&self) -> Result<ConstraintSystem<F>>;
}

/// Run `$body` with `$E` bound to the pairing of `$curve`
macro_rules! with_curve {
    ($curve:expr, $E:ident => $body:expr) => {
        match $curve {
            CurveId::Bn254 => {
                type $E = ark_bn254::Bn254;
                $body
            }
            CurveId::Bls12_381 => {
                type $E = ark_bls12_381::Bls12_381;
                $body
            }
            CurveId::Bls12_377 => {
                type $E = ark_bls12_377::Bls12_377;
                $body
            }
            CurveId::Bw6_761 => {
                type $E = ark_bw6_761::BW6_761;
                $body
            }
        }
    };
}

/// Preprocess `circuit` on the configured curve and return encoded public
/// data
pub fn setup_encoded<C: CircuitDefinition>(
    config: &BackendConfig,
    circuit: &C,
    public_assignment: &Assignment,
) -> Result<Vec<u8>> {
    config.validate()?;
    let curve = config.curve_id()?;
    let _span = info_span!("setup_encoded", %curve).entered();

    with_curve!(curve, E => setup_kzg::<E, C>(config, circuit, public_assignment))
}

/// Prove against encoded public data. The curve is read from its header.
pub fn prove_encoded<C: CircuitDefinition>(
    circuit: &C,
    public_data: &[u8],
    assignment: &Assignment,
) -> Result<Vec<u8>> {
    let curve = read_header(public_data)?.curve;
    let _span = info_span!("prove_encoded", %curve).entered();

    with_curve!(curve, E => prove_with::< <E as Pairing>::ScalarField, Kzg<E>, C>(
        circuit,
        public_data,
        assignment
    ))
}

/// Verify an encoded proof against encoded public data
pub fn verify_encoded<C: CircuitDefinition>(
    circuit: &C,
    proof: &[u8],
    public_data: &[u8],
    public_assignment: &Assignment,
) -> Result<()> {
    let curve = read_header(public_data)?.curve;
    let _span = info_span!("verify_encoded", %curve).entered();

    with_curve!(curve, E => verify_with::< <E as Pairing>::ScalarField, Kzg<E>, C>(
        circuit,
        proof,
        public_data,
        public_assignment
    ))
}

fn setup_kzg<E, C>(
    config: &BackendConfig,
    circuit: &C,
    public_assignment: &Assignment,
) -> Result<Vec<u8>>
where
    E: Pairing,
    E::ScalarField: ScalarField,
    C: CircuitDefinition,
{
    let cs = circuit.define::<E::ScalarField>()?;
    let public_witness = Witness::from_public_assignment(&cs, public_assignment)?;

    let n = domain_for::<E::ScalarField>(cs.nb_gates())?.size();
    let max_degree = config.srs_degree.unwrap_or_else(|| required_degree(n));
    let scheme = match config.srs_seed {
        Some(seed) => Kzg::<E>::setup_from_seed(seed, max_degree),
        None => Kzg::<E>::setup_insecure(&mut rand::thread_rng(), max_degree),
    };

    let pd = setup_with_label(
        &cs,
        scheme,
        &public_witness,
        config.transcript_label.as_bytes(),
    )?;
    let bytes = pd.to_bytes()?;
    info!(n, max_degree, len = bytes.len(), "encoded public data");
    Ok(bytes)
}

fn prove_with<F, S, C>(circuit: &C, public_data: &[u8], assignment: &Assignment) -> Result<Vec<u8>>
where
    F: ScalarField,
    S: BindingScheme<F>,
    C: CircuitDefinition,
{
    let pd = PublicData::<F, S>::from_bytes(public_data)?;
    let cs = circuit.define::<F>()?;
    let witness = Witness::from_full_assignment(&cs, assignment)?;
    prove(&cs, &pd, &witness)?.to_bytes()
}

fn verify_with<F, S, C>(
    circuit: &C,
    proof: &[u8],
    public_data: &[u8],
    public_assignment: &Assignment,
) -> Result<()>
where
    F: ScalarField,
    S: BindingScheme<F>,
    C: CircuitDefinition,
{
    let pd = PublicData::<F, S>::from_bytes(public_data)?;
    let proof = Proof::<F, S>::from_bytes(proof)?;
    let cs = circuit.define::<F>()?;
    let public_witness = Witness::from_public_assignment(&cs, public_assignment)?;
    verify(&proof, &pd, &public_witness)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::serialize::{ArtifactKind, HEADER_LEN};

    struct Square;

    impl CircuitDefinition for Square {
        fn define<F: ScalarField>(&self) -> Result<ConstraintSystem<F>> {
            let mut cs = ConstraintSystem::new();
            let y = cs.public_input("y");
            let x = cs.secret_input("x");
            cs.mul(x, x, y);
            Ok(cs)
        }
    }

    fn config(curve: &str) -> BackendConfig {
        BackendConfig {
            curve: curve.to_string(),
            srs_seed: Some(3),
            ..Default::default()
        }
    }

    #[test]
    fn test_dispatch_round_trip() {
        let public = Assignment::new().public("y", 49u64);
        let full = Assignment::new().public("y", 49u64).secret("x", 7u64);

        let pd = setup_encoded(&config("bls12-381"), &Square, &public).unwrap();
        let header = read_header(&pd).unwrap();
        assert_eq!(header.kind, ArtifactKind::PublicData);
        assert_eq!(header.curve, CurveId::Bls12_381);

        let proof = prove_encoded(&Square, &pd, &full).unwrap();
        assert_eq!(read_header(&proof).unwrap().kind, ArtifactKind::Proof);
        assert_eq!(verify_encoded(&Square, &proof, &pd, &public), Ok(()));

        let wrong = Assignment::new().public("y", 50u64);
        assert!(matches!(
            verify_encoded(&Square, &proof, &pd, &wrong),
            Err(Error::CommitmentVerificationFailed(_))
        ));
    }

    #[test]
    fn test_dispatch_unknown_curve() {
        let public = Assignment::new().public("y", 49u64);
        assert!(matches!(
            setup_encoded(&config("pallas"), &Square, &public),
            Err(Error::UnsupportedInstantiation(_))
        ));

        let mut pd = setup_encoded(&config("bn254"), &Square, &public).unwrap();
        pd[6] = 0x42;
        let full = Assignment::new().public("y", 49u64).secret("x", 7u64);
        assert!(matches!(
            prove_encoded(&Square, &pd, &full),
            Err(Error::UnsupportedInstantiation(_))
        ));
    }

    #[test]
    fn test_dispatch_rejects_mixed_curves() {
        let public = Assignment::new().public("y", 49u64);
        let full = Assignment::new().public("y", 49u64).secret("x", 7u64);

        let pd_bn = setup_encoded(&config("bn254"), &Square, &public).unwrap();
        let pd_bls = setup_encoded(&config("bls12-377"), &Square, &public).unwrap();
        let proof = prove_encoded(&Square, &pd_bn, &full).unwrap();

        assert!(matches!(
            verify_encoded(&Square, &proof, &pd_bls, &public),
            Err(Error::UnsupportedInstantiation(_))
        ));
        assert!(matches!(
            verify_encoded(&Square, &proof[..HEADER_LEN], &pd_bn, &public),
            Err(Error::MalformedData(_))
        ));
    }

    #[test]
    fn test_dispatch_small_srs() {
        let public = Assignment::new().public("y", 49u64);
        let config = BackendConfig {
            srs_degree: Some(4),
            ..config("bn254")
        };
        assert_eq!(
            setup_encoded(&config, &Square, &public),
            Err(Error::DegreeTooLarge { degree: 9, max: 4 })
        );
    }
}
