mod common;

use ark_ec::pairing::Pairing;
use common::{cubic_full, cubic_public, init_tracing, Cubic};
use plonk_backend::{
    prove_encoded, prove_with_rng, setup, setup_encoded, verify, verify_encoded, Assignment,
    BackendConfig, CircuitDefinition, CurveId, Error, Kzg, ScalarField, Witness,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

// Setup, prove and verify x³ + x + 5 = 35 with KZG over `E`
fn cubic_on<E>()
where
    E: Pairing,
    E::ScalarField: ScalarField,
{
    init_tracing();
    let cs = Cubic.define::<E::ScalarField>().unwrap();
    let public = Witness::from_public_assignment(&cs, &cubic_public(35)).unwrap();
    let full = Witness::from_full_assignment(&cs, &cubic_full(35, 3)).unwrap();

    let mut rng = ChaCha20Rng::seed_from_u64(0xc0be);
    let pd = setup(&cs, Kzg::<E>::setup_insecure(&mut rng, 16), &public).unwrap();
    // One public-input gate and three declared gates
    assert_eq!(pd.n(), 4);

    let proof = prove_with_rng(&cs, &pd, &full, &mut rng).unwrap();
    assert_eq!(verify(&proof, &pd, &public), Ok(()));

    let wrong = Witness::from_public_assignment(&cs, &cubic_public(36)).unwrap();
    assert!(matches!(
        verify(&proof, &pd, &wrong),
        Err(Error::CommitmentVerificationFailed(_))
    ));
}

#[test]
fn test_cubic_bn254() {
    cubic_on::<ark_bn254::Bn254>();
}

#[test]
fn test_cubic_bls12_381() {
    cubic_on::<ark_bls12_381::Bls12_381>();
}

#[test]
fn test_cubic_bls12_377() {
    cubic_on::<ark_bls12_377::Bls12_377>();
}

#[test]
fn test_cubic_bw6_761() {
    cubic_on::<ark_bw6_761::BW6_761>();
}

#[test]
fn test_cubic_unsatisfied_witness() {
    let cs = Cubic.define::<ark_bn254::Fr>().unwrap();
    let public = Witness::from_public_assignment(&cs, &cubic_public(35)).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let pd = setup(&cs, Kzg::<ark_bn254::Bn254>::setup_insecure(&mut rng, 16), &public).unwrap();

    for (y, x) in [(35, 4), (36, 3), (0, 0)] {
        let full = Witness::from_full_assignment(&cs, &cubic_full(y, x)).unwrap();
        assert_eq!(
            prove_with_rng(&cs, &pd, &full, &mut rng),
            Err(Error::UnsatisfiedConstraints),
            "y = {}, x = {}",
            y,
            x
        );
    }
}

#[test]
fn test_cubic_dispatch_all_curves() {
    init_tracing();
    let full = Assignment::from_json(
        r#"[
            { "name": "y", "visibility": "public", "value": "35" },
            { "name": "x", "visibility": "secret", "value": "0x03" }
        ]"#,
    )
    .unwrap();
    let public = Assignment::from_json(r#"[{ "name": "y", "visibility": "public", "value": 35 }]"#)
        .unwrap();

    for curve in CurveId::ALL {
        let config = BackendConfig {
            curve: curve.name().to_string(),
            srs_seed: Some(u64::from(curve.tag())),
            ..Default::default()
        };
        let pd = setup_encoded(&config, &Cubic, &public).unwrap();
        let proof = prove_encoded(&Cubic, &pd, &full).unwrap();
        assert_eq!(verify_encoded(&Cubic, &proof, &pd, &public), Ok(()), "{}", curve);

        assert!(
            matches!(
                verify_encoded(&Cubic, &proof, &pd, &cubic_public(36)),
                Err(Error::CommitmentVerificationFailed(_))
            ),
            "{}",
            curve
        );
    }
}

#[test]
fn test_transcript_label_separates_proofs() {
    let public = cubic_public(35);
    let full = cubic_full(35, 3);
    let config = BackendConfig {
        srs_seed: Some(5),
        ..Default::default()
    };
    let relabelled = BackendConfig {
        transcript_label: "another-application".to_string(),
        ..config.clone()
    };

    let pd = setup_encoded(&config, &Cubic, &public).unwrap();
    let pd_other = setup_encoded(&relabelled, &Cubic, &public).unwrap();
    let proof = prove_encoded(&Cubic, &pd, &full).unwrap();

    assert_eq!(verify_encoded(&Cubic, &proof, &pd, &public), Ok(()));
    // Same SRS and circuit, different Fiat-Shamir challenges
    assert!(matches!(
        verify_encoded(&Cubic, &proof, &pd_other, &public),
        Err(Error::CommitmentVerificationFailed(_))
    ));
}
