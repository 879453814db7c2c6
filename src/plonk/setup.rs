//! PLONK Setup
//!
//! Preprocessing (Section 8.1 of the PLONK paper): interpolate the selector and
//! permutation columns over H and commit to them. The result is circuit-specific
//! but witness-independent.

use rayon::prelude::*;
use tracing::{debug, info, info_span, warn};

use crate::circuit::{ConstraintSystem, Gate, Witness};
use crate::commitment::CommitmentScheme;
use crate::error::{Error, Result};
use crate::fft::Domain;
use crate::field::ScalarField;
use crate::plonk::permutation::{coset_shifts, Permutation};
use crate::plonk::types::{PublicData, VerifyingKey};
use crate::polynomial::Polynomial;
use crate::transcript::TRANSCRIPT_LABEL;

/// Smallest domain used for any circuit
pub const MIN_DOMAIN_SIZE: usize = 4;

/// Ratio between the quotient evaluation domain and H. The numerator has
/// degree at most 4n + 5, which fits below 8n for every n ≥ 4.
pub(crate) const QUOTIENT_BLOWUP: usize = 8;

/// Domain for a circuit with `nb_gates` gates (public-input gates included).
///
/// Fails with `DomainTooLarge` unless the field also has the larger domain
/// the prover evaluates the quotient on.
pub fn domain_for<F: ScalarField>(nb_gates: usize) -> Result<Domain<F>> {
    let domain = Domain::new(nb_gates.max(MIN_DOMAIN_SIZE))?;
    Domain::<F>::new(QUOTIENT_BLOWUP * domain.size())?;
    Ok(domain)
}

/// Largest degree committed during proving for a domain of size n: the last
/// quotient part H_hi.
pub fn required_degree(n: usize) -> usize {
    n + 5
}

/// Check that a public witness has exactly the expected shape
pub(crate) fn check_public_witness<F: ScalarField>(
    nb_public: usize,
    witness: &Witness<F>,
) -> Result<()> {
    if witness.nb_public != nb_public || witness.values.len() != nb_public {
        return Err(Error::AssignmentMismatch(format!(
            "expected a public witness of {} values, got {} ({} public)",
            nb_public,
            witness.values.len(),
            witness.nb_public
        )));
    }
    Ok(())
}

/// Preprocess `cs` with the default transcript label.
///
/// The public witness is only checked for shape. Its values are bound at
/// verification time through the public-input polynomial and the transcript.
pub fn setup<F, S>(
    cs: &ConstraintSystem<F>,
    scheme: S,
    public_witness: &Witness<F>,
) -> Result<PublicData<F, S>>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    setup_with_label(cs, scheme, public_witness, TRANSCRIPT_LABEL)
}

/// Preprocess `cs`, separating its transcripts with `label`
pub fn setup_with_label<F, S>(
    cs: &ConstraintSystem<F>,
    scheme: S,
    public_witness: &Witness<F>,
    label: &[u8],
) -> Result<PublicData<F, S>>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    let _span = info_span!("setup", curve = %F::CURVE, scheme = S::NAME).entered();

    cs.check()?;
    check_public_witness(cs.nb_public(), public_witness)?;

    let gates = cs.gates();
    let domain = domain_for::<F>(gates.len())?;
    let n = domain.size();

    let degree = required_degree(n);
    if degree > scheme.max_degree() {
        return Err(Error::DegreeTooLarge {
            degree,
            max: scheme.max_degree(),
        });
    }
    if !S::BINDING {
        warn!("setup with a non-binding commitment scheme; proofs will not be sound");
    }

    // Selector columns, padded with zero rows
    let column = |f: fn(&Gate<F>) -> F| {
        domain
            .evaluations(gates.iter().map(f).collect())
            .interpolate()
    };
    let q_l = column(|g| g.q_l);
    let q_r = column(|g| g.q_r);
    let q_m = column(|g| g.q_m);
    let q_o = column(|g| g.q_o);
    let q_k = column(|g| g.q_c);

    // Permutation columns
    let (k1, k2) = coset_shifts::<F>();
    let permutation = Permutation::compute(&gates, n);
    let [s1, s2, s3] = permutation
        .sigma_evals(&domain, k1, k2)
        .map(|evals| domain.ifft(&evals));
    debug!(
        nb_gates = gates.len(),
        n,
        cycles = permutation.cycles().len(),
        "interpolated preprocessed polynomials"
    );

    let polys: [&Polynomial<F>; 8] = [&q_l, &q_r, &q_m, &q_o, &q_k, &s1, &s2, &s3];
    let commitments = polys
        .par_iter()
        .map(|p| scheme.commit(p))
        .collect::<Result<Vec<_>>>()?;
    let commitments: [S::Commitment; 8] = commitments
        .try_into()
        .map_err(|_| Error::MalformedData("expected eight commitments".to_string()))?;

    info!(n, nb_public = cs.nb_public(), "setup complete");

    Ok(PublicData {
        domain,
        nb_public: cs.nb_public(),
        k1,
        k2,
        transcript_label: label.to_vec(),
        q_l,
        q_r,
        q_m,
        q_o,
        q_k,
        s1,
        s2,
        s3,
        vk: VerifyingKey::from_commitments(commitments),
        scheme,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::Assignment;
    use crate::commitment::{InsecureMockScheme, Kzg};
    use ark_bls12_381::{Bls12_381, Fr};
    use ark_ff::{Field, One, Zero};

    fn cubic() -> ConstraintSystem<Fr> {
        let mut cs = ConstraintSystem::new();
        let y = cs.public_input("y");
        let x = cs.secret_input("x");
        let x2 = cs.internal();
        let x3 = cs.internal();
        cs.mul(x, x, x2);
        cs.mul(x2, x, x3);
        cs.add_gate(
            x3,
            x,
            y,
            Fr::zero(),
            Fr::one(),
            Fr::one(),
            -Fr::one(),
            Fr::from_u64(5),
        );
        cs
    }

    fn public_witness(cs: &ConstraintSystem<Fr>, y: u64) -> Witness<Fr> {
        Witness::from_public_assignment(cs, &Assignment::new().public("y", y)).unwrap()
    }

    #[test]
    fn test_setup_interpolates_columns() {
        let cs = cubic();
        let pd = setup(&cs, InsecureMockScheme::new(), &public_witness(&cs, 35)).unwrap();

        assert_eq!(pd.n(), 4);
        assert_eq!(pd.nb_public, 1);

        let omega = pd.domain.omega;
        // Row 0 is the public-input gate, row 3 the addition with constant 5
        assert_eq!(pd.q_l.evaluate(&Fr::one()), Fr::one());
        assert_eq!(pd.q_m.evaluate(&omega), Fr::one());
        assert_eq!(pd.q_k.evaluate(&omega.pow([3])), Fr::from_u64(5));
        assert_eq!(pd.q_o.evaluate(&Fr::one()), Fr::zero());
    }

    #[test]
    fn test_setup_is_deterministic() {
        let cs = cubic();
        let scheme = Kzg::<Bls12_381>::setup_from_seed(7, 16);
        let a = setup(&cs, scheme.clone(), &public_witness(&cs, 35)).unwrap();
        // The public values do not enter the preprocessed material
        let b = setup(&cs, scheme, &public_witness(&cs, 36)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_setup_rejects_wrong_public_witness() {
        let cs = cubic();
        let empty = Witness {
            nb_public: 0,
            values: vec![],
        };
        assert!(matches!(
            setup(&cs, InsecureMockScheme::new(), &empty),
            Err(Error::AssignmentMismatch(_))
        ));

        // A full witness is not a public witness
        let full = Witness::from_full_assignment(
            &cs,
            &Assignment::new().public("y", 35u64).secret("x", 3u64),
        )
        .unwrap();
        assert!(matches!(
            setup(&cs, InsecureMockScheme::new(), &full),
            Err(Error::AssignmentMismatch(_))
        ));
    }

    #[test]
    fn test_setup_rejects_small_srs() {
        let cs = cubic();
        let scheme = Kzg::<Bls12_381>::setup_from_seed(7, 8);
        assert_eq!(
            setup(&cs, scheme, &public_witness(&cs, 35)),
            Err(Error::DegreeTooLarge { degree: 9, max: 8 })
        );
    }

    #[test]
    fn test_domain_leaves_room_for_quotient() {
        use ark_bn254::Fr as Bn254Fr;

        // BN254 has two-adicity 28: H of size 2^26 exists but its 8n coset does not
        assert_eq!(domain_for::<Bn254Fr>(1 << 25).map(|d| d.size()), Ok(1 << 25));
        assert_eq!(
            domain_for::<Bn254Fr>(1 << 26).map(|d| d.size()),
            Err(Error::DomainTooLarge(1 << 29))
        );
        assert_eq!(domain_for::<Fr>(3).map(|d| d.size()), Ok(MIN_DOMAIN_SIZE));
    }
}
