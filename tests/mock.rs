mod common;

use ark_bn254::{Bn254, Fr};
use common::{cubic_full, cubic_public, init_tracing, Cubic};
use plonk_backend::commitment::{MockCommitment, MockOpeningProof};
use plonk_backend::serialize::HEADER_LEN;
use plonk_backend::{
    prove_with_rng, setup, verify, verify_encoded, CircuitDefinition, CommitmentScheme, Error,
    InsecureMockScheme, Kzg, Polynomial, Proof, PublicData, ScalarField, Witness,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

type Mock = InsecureMockScheme<Fr>;

#[test]
fn test_mock_openings_always_accept() {
    let mock = Mock::new();
    let poly = Polynomial::from_coeffs(vec![Fr::from_u64(1), Fr::from_u64(2)]);

    let (value, proof) = mock.open(&poly, &Fr::from_u64(3)).unwrap();
    assert_eq!(value, Fr::from_u64(7));
    assert_eq!(mock.commit(&poly).unwrap(), MockCommitment);

    for claimed in [value, Fr::from_u64(8), -Fr::from_u64(1)] {
        assert!(mock.verify_opening(&MockCommitment, &Fr::from_u64(3), &claimed, &proof));
    }
    assert!(mock.verify_opening(&MockCommitment, &Fr::from_u64(4), &value, &MockOpeningProof));
    assert!(!Mock::BINDING);
    assert!(Kzg::<Bn254>::BINDING);
}

#[test]
fn test_mock_pipeline() {
    init_tracing();
    let cs = Cubic.define::<Fr>().unwrap();
    let public = Witness::from_public_assignment(&cs, &cubic_public(35)).unwrap();
    let full = Witness::from_full_assignment(&cs, &cubic_full(35, 3)).unwrap();

    let pd = setup(&cs, Mock::new(), &public).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(0);
    let proof = prove_with_rng(&cs, &pd, &full, &mut rng).unwrap();
    assert_eq!(verify(&proof, &pd, &public), Ok(()));

    // Only the evaluations carry data
    let bytes = proof.to_bytes().unwrap();
    assert_eq!(bytes.len(), HEADER_LEN + 16 * 32);
    let back = Proof::<Fr, Mock>::from_bytes(&bytes).unwrap();
    assert_eq!(verify(&back, &pd, &public), Ok(()));

    // Unsatisfied witnesses are still caught by the prover
    let bad = Witness::from_full_assignment(&cs, &cubic_full(35, 4)).unwrap();
    assert_eq!(
        prove_with_rng(&cs, &pd, &bad, &mut rng),
        Err(Error::UnsatisfiedConstraints)
    );
}

#[test]
fn test_mock_proofs_carry_no_soundness() {
    let cs = Cubic.define::<Fr>().unwrap();
    let public = Witness::from_public_assignment(&cs, &cubic_public(35)).unwrap();
    let full = Witness::from_full_assignment(&cs, &cubic_full(35, 3)).unwrap();
    let pd = setup(&cs, Mock::new(), &public).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let proof = prove_with_rng(&cs, &pd, &full, &mut rng).unwrap();

    // Any evaluation change passes the openings and only trips the identity
    let mut tampered = proof.clone();
    tampered.evaluations.s1 += Fr::from_u64(1);
    assert_eq!(verify(&tampered, &pd, &public), Err(Error::IdentityCheckFailed));
}

#[test]
fn test_mock_artifacts_are_not_accepted_as_kzg() {
    let cs = Cubic.define::<Fr>().unwrap();
    let public = Witness::from_public_assignment(&cs, &cubic_public(35)).unwrap();
    let full = Witness::from_full_assignment(&cs, &cubic_full(35, 3)).unwrap();
    let pd = setup(&cs, Mock::new(), &public).unwrap();
    let mut rng = ChaCha20Rng::seed_from_u64(2);
    let proof = prove_with_rng(&cs, &pd, &full, &mut rng).unwrap();

    let pd_bytes = pd.to_bytes().unwrap();
    let proof_bytes = proof.to_bytes().unwrap();

    assert!(matches!(
        PublicData::<Fr, Kzg<Bn254>>::from_bytes(&pd_bytes),
        Err(Error::UnsupportedInstantiation(_))
    ));
    // The curve-keyed entry points only instantiate binding schemes
    assert!(matches!(
        verify_encoded(&Cubic, &proof_bytes, &pd_bytes, &cubic_public(35)),
        Err(Error::UnsupportedInstantiation(_))
    ));
}
