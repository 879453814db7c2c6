//! PLONK Prover
//!
//! Implements the 5-round PLONK prover following Section 8.3 of the paper.
//!
//! Round 1: Commit to the blinded wire polynomials L, R, O
//! Round 2: Commit to the permutation grand product Z
//! Round 3: Compute the quotient H and commit to its three parts
//! Round 4: Evaluate everything at the challenge ζ (Z also at ζω)
//! Round 5: Open every evaluation
//!
//! Instead of a linearization polynomial the proof carries all evaluations
//! and one opening per evaluation.

use ark_ff::batch_inversion;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info, info_span};

use crate::circuit::{ConstraintSystem, Gate, Witness};
use crate::commitment::CommitmentScheme;
use crate::error::{Error, Result};
use crate::fft::Domain;
use crate::field::ScalarField;
use crate::plonk::permutation::position_labels;
use crate::plonk::setup::{domain_for, QUOTIENT_BLOWUP};
use crate::plonk::types::*;
use crate::plonk::{absorb_public, Challenges};
use crate::polynomial::Polynomial;
use crate::transcript::Transcript;

/// Prove that `full_witness` satisfies `cs`, blinding with `rand::thread_rng`
pub fn prove<F, S>(
    cs: &ConstraintSystem<F>,
    public_data: &PublicData<F, S>,
    full_witness: &Witness<F>,
) -> Result<Proof<F, S>>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    prove_with_rng(cs, public_data, full_witness, &mut rand::thread_rng())
}

/// Prove with blinding factors drawn from `rng`
pub fn prove_with_rng<F, S, R>(
    cs: &ConstraintSystem<F>,
    public_data: &PublicData<F, S>,
    full_witness: &Witness<F>,
    rng: &mut R,
) -> Result<Proof<F, S>>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
    R: Rng + ?Sized,
{
    let _span = info_span!("prove", curve = %F::CURVE, scheme = S::NAME).entered();

    cs.check()?;
    let nb_inputs = cs.nb_public() + cs.nb_secret();
    if full_witness.nb_public != cs.nb_public() || full_witness.values.len() != nb_inputs {
        return Err(Error::AssignmentMismatch(format!(
            "expected a full witness of {} values ({} public), got {} ({} public)",
            nb_inputs,
            cs.nb_public(),
            full_witness.values.len(),
            full_witness.nb_public
        )));
    }

    let gates = cs.gates();
    let n = public_data.n();
    if public_data.nb_public != cs.nb_public() || domain_for::<F>(gates.len())?.size() != n {
        return Err(Error::AssignmentMismatch(
            "the constraint system does not match the public data".to_string(),
        ));
    }

    let values = cs.solve(&full_witness.values)?;

    // Wire columns, padded with zero rows
    let column = |wire: fn(&Gate<F>) -> usize| {
        let mut col: Vec<F> = gates.iter().map(|g| values[wire(g)]).collect();
        col.resize(n, F::zero());
        col
    };
    let wires = [column(|g| g.a), column(|g| g.b), column(|g| g.c)];

    let proof = Prover::new(public_data).prove(wires, full_witness.public(), rng)?;
    info!(n, "proof generated");
    Ok(proof)
}

/// Round 1 output
struct Round1<F: ScalarField, S: CommitmentScheme<F>> {
    wire_evals: [Vec<F>; 3],
    wire_polys: [Polynomial<F>; 3],
    commitments: [S::Commitment; 3],
}

/// Round 2 output
struct Round2<F: ScalarField, S: CommitmentScheme<F>> {
    z_poly: Polynomial<F>,
    z_comm: S::Commitment,
}

/// Round 3 output
struct Round3<F: ScalarField, S: CommitmentScheme<F>> {
    h_polys: [Polynomial<F>; 3],
    h_comms: [S::Commitment; 3],
}

/// The PLONK prover for one circuit
pub(crate) struct Prover<'a, F: ScalarField, S: CommitmentScheme<F>> {
    pd: &'a PublicData<F, S>,
    domain: Domain<F>,
}

impl<'a, F: ScalarField, S: CommitmentScheme<F>> Prover<'a, F, S> {
    pub(crate) fn new(pd: &'a PublicData<F, S>) -> Self {
        Prover {
            pd,
            domain: pd.domain,
        }
    }

    /// Run the five rounds on the wire columns a, b, c over H
    pub(crate) fn prove<R: Rng + ?Sized>(
        &self,
        wires: [Vec<F>; 3],
        public_inputs: &[F],
        rng: &mut R,
    ) -> Result<Proof<F, S>> {
        let mut transcript = Transcript::new(&self.pd.transcript_label);
        absorb_public(&mut transcript, self.pd, public_inputs)?;

        // Round 1: wire polynomials
        let round1 = self.round1(wires, &mut transcript, rng)?;
        let beta = transcript.squeeze_challenge("beta");
        let gamma = transcript.squeeze_challenge("gamma");

        // Round 2: permutation polynomial z(X)
        let round2 = self.round2(&round1, beta, gamma, &mut transcript, rng)?;
        let alpha = transcript.squeeze_challenge("alpha");

        // Round 3: quotient polynomial t(X)
        let challenges = Challenges {
            beta,
            gamma,
            alpha,
            zeta: F::zero(),
        };
        let round3 = self.round3(&round1, &round2, &challenges, public_inputs, &mut transcript, rng)?;
        let zeta = transcript.squeeze_challenge_outside_domain("zeta", &self.domain);

        // Rounds 4 and 5: evaluations and openings
        let (evaluations, openings) = self.open_all(&round1, &round2, &round3, zeta)?;

        let [l, r, o] = round1.commitments;
        Ok(Proof {
            l,
            r,
            o,
            z: round2.z_comm,
            h: round3.h_comms,
            evaluations,
            openings,
        })
    }

    /// Round 1: interpolate a, b, c and blind each with (b_1 X + b_2)·Z_H(X)
    fn round1<R: Rng + ?Sized>(
        &self,
        wire_evals: [Vec<F>; 3],
        transcript: &mut Transcript,
        rng: &mut R,
    ) -> Result<Round1<F, S>> {
        let n = self.domain.size();

        let wire_polys = wire_evals.clone().map(|evals| {
            let blinder = [F::random(rng), F::random(rng)];
            self.domain.ifft(&evals).add_vanishing_multiple(&blinder, n)
        });

        let commitments = commit_all::<F, S, 3>(&self.pd.scheme, &wire_polys)?;
        for (label, c) in ["L", "R", "O"].into_iter().zip(&commitments) {
            transcript.absorb(label, c)?;
        }
        debug!("round 1: committed to wire polynomials");

        Ok(Round1 {
            wire_evals,
            wire_polys,
            commitments,
        })
    }

    /// Round 2: the grand product
    ///
    /// z(ω^0) = 1
    /// z(ω^{i+1}) = z(ω^i) · Π_j (w_j + β·id_j(ω^i) + γ) / Π_j (w_j + β·σ_j(ω^i) + γ)
    fn round2<R: Rng + ?Sized>(
        &self,
        round1: &Round1<F, S>,
        beta: F,
        gamma: F,
        transcript: &mut Transcript,
        rng: &mut R,
    ) -> Result<Round2<F, S>> {
        let n = self.domain.size();
        let labels = position_labels(&self.domain, self.pd.k1, self.pd.k2);
        let sigmas = [&self.pd.s1, &self.pd.s2, &self.pd.s3].map(|s| self.domain.fft(s).evals);
        let [a, b, c] = &round1.wire_evals;

        let (numerators, mut denominators): (Vec<F>, Vec<F>) = (0..n)
            .into_par_iter()
            .map(|i| {
                let w = [a[i], b[i], c[i]];
                let mut num = F::one();
                let mut den = F::one();
                for j in 0..3 {
                    num *= w[j] + beta * labels[j * n + i] + gamma;
                    den *= w[j] + beta * sigmas[j][i] + gamma;
                }
                (num, den)
            })
            .unzip();
        batch_inversion(&mut denominators);

        let mut z_evals = Vec::with_capacity(n);
        let mut acc = F::one();
        for i in 0..n {
            z_evals.push(acc);
            acc *= numerators[i] * denominators[i];
        }
        // acc is now z(ω^n), which is 1 iff the copy constraints hold;
        // a violation surfaces as a nonzero remainder in round 3

        let blinder = [F::random(rng), F::random(rng), F::random(rng)];
        let z_poly = self.domain.ifft(&z_evals).add_vanishing_multiple(&blinder, n);
        let z_comm = self.pd.scheme.commit(&z_poly)?;
        transcript.absorb("Z", &z_comm)?;
        debug!("round 2: committed to the grand product");

        Ok(Round2 { z_poly, z_comm })
    }

    /// Round 3: compute t(X) = numerator(X) / Z_H(X) on a coset of a larger
    /// domain and split it into three parts.
    fn round3<R: Rng + ?Sized>(
        &self,
        round1: &Round1<F, S>,
        round2: &Round2<F, S>,
        ch: &Challenges<F>,
        public_inputs: &[F],
        transcript: &mut Transcript,
        rng: &mut R,
    ) -> Result<Round3<F, S>> {
        let n = self.domain.size();
        let pd = self.pd;
        let big = Domain::<F>::new(QUOTIENT_BLOWUP * n)?;
        let m = big.size();
        let shift = F::GENERATOR;

        let on_coset = |p: &Polynomial<F>| big.coset_fft(p, &shift);

        let [l, r, o] = &round1.wire_polys;
        let [a, b, c] = [l, r, o].map(on_coset);
        let z = on_coset(&round2.z_poly);
        let [q_l, q_r, q_m, q_o, q_k] = [&pd.q_l, &pd.q_r, &pd.q_m, &pd.q_o, &pd.q_k].map(on_coset);
        let [s1, s2, s3] = [&pd.s1, &pd.s2, &pd.s3].map(on_coset);

        // PI(X) = Σ -x_i L_i(X)
        let pi_evals: Vec<F> = public_inputs.iter().map(|x| -*x).collect();
        let pi = on_coset(&self.domain.evaluations(pi_evals).interpolate());

        // L_1(X): one at ω^0, zero elsewhere on H
        let mut l1_evals = vec![F::zero(); n];
        l1_evals[0] = F::one();
        let l1 = on_coset(&self.domain.ifft(&l1_evals));

        let xs: Vec<F> = big.elements().map(|w| shift * w).collect();
        let (k1, k2) = (pd.k1, pd.k2);
        let Challenges {
            beta, gamma, alpha, ..
        } = *ch;
        let alpha_sq = alpha.square();
        // z(ωX) on the coset is z shifted by m/n points
        let step = m / n;

        let numerator: Vec<F> = (0..m)
            .into_par_iter()
            .map(|i| {
                let x = xs[i];
                let gate = q_m[i] * a[i] * b[i]
                    + q_l[i] * a[i]
                    + q_r[i] * b[i]
                    + q_o[i] * c[i]
                    + q_k[i]
                    + pi[i];

                let id = (a[i] + beta * x + gamma)
                    * (b[i] + beta * k1 * x + gamma)
                    * (c[i] + beta * k2 * x + gamma);
                let perm = (a[i] + beta * s1[i] + gamma)
                    * (b[i] + beta * s2[i] + gamma)
                    * (c[i] + beta * s3[i] + gamma);
                let z_omega = z[(i + step) % m];

                gate + alpha * (z[i] * id - z_omega * perm)
                    + alpha_sq * l1[i] * (z[i] - F::one())
            })
            .collect();

        let numerator = big
            .coset_ifft(&numerator, &shift)
            .ok_or(Error::UnsatisfiedConstraints)?;
        let (t, remainder) = numerator.divide_by_vanishing(n);
        if !remainder.is_zero() {
            debug!(
                remainder_degree = remainder.degree(),
                "quotient division left a remainder"
            );
            return Err(Error::UnsatisfiedConstraints);
        }

        // t = t_lo + X^n t_mid + X^{2n} t_hi, with
        // t_lo' = t_lo + b10 X^n, t_mid' = t_mid - b10 + b11 X^n, t_hi' = t_hi - b11
        let [t_lo, t_mid, t_hi]: [Polynomial<F>; 3] = t
            .split(n, 3)
            .try_into()
            .map_err(|_| Error::UnsatisfiedConstraints)?;
        let b10 = F::random(rng);
        let b11 = F::random(rng);
        let h_polys = [
            &t_lo + &Polynomial::constant(b10).shift_by_xk(n),
            &(&t_mid - &Polynomial::constant(b10)) + &Polynomial::constant(b11).shift_by_xk(n),
            &t_hi - &Polynomial::constant(b11),
        ];

        let h_comms = commit_all::<F, S, 3>(&pd.scheme, &h_polys)?;
        for (label, c) in ["H_lo", "H_mid", "H_hi"].into_iter().zip(&h_comms) {
            transcript.absorb(label, c)?;
        }
        debug!(t_degree = t.degree(), "round 3: committed to the quotient");

        Ok(Round3 { h_polys, h_comms })
    }

    /// Rounds 4 and 5: evaluate at ζ (Z also at ζω) and open every evaluation
    fn open_all(
        &self,
        round1: &Round1<F, S>,
        round2: &Round2<F, S>,
        round3: &Round3<F, S>,
        zeta: F,
    ) -> Result<(ProofEvaluations<F>, [S::OpeningProof; NB_OPENINGS])> {
        let pd = self.pd;
        let [l, r, o] = &round1.wire_polys;
        let [h_lo, h_mid, h_hi] = &round3.h_polys;
        let zeta_omega = zeta * self.domain.omega;

        let targets: [(&Polynomial<F>, F); NB_OPENINGS] = [
            (l, zeta),
            (r, zeta),
            (o, zeta),
            (&round2.z_poly, zeta),
            (&pd.q_l, zeta),
            (&pd.q_r, zeta),
            (&pd.q_m, zeta),
            (&pd.q_o, zeta),
            (&pd.q_k, zeta),
            (&pd.s1, zeta),
            (&pd.s2, zeta),
            (&pd.s3, zeta),
            (h_lo, zeta),
            (h_mid, zeta),
            (h_hi, zeta),
            (&round2.z_poly, zeta_omega),
        ];

        let opened = targets
            .par_iter()
            .map(|(poly, point)| pd.scheme.open(poly, point))
            .collect::<Result<Vec<_>>>()?;
        let (evals, openings): (Vec<F>, Vec<S::OpeningProof>) = opened.into_iter().unzip();
        debug!("rounds 4-5: opened {} evaluations", evals.len());

        let evals: [F; NB_OPENINGS] = evals
            .try_into()
            .map_err(|_| Error::MalformedData("wrong number of evaluations".to_string()))?;
        let openings = openings
            .try_into()
            .map_err(|_| Error::MalformedData("wrong number of openings".to_string()))?;
        Ok((ProofEvaluations::from_array(evals), openings))
    }
}

/// Commit to a fixed number of polynomials in parallel
fn commit_all<F, S, const N: usize>(
    scheme: &S,
    polys: &[Polynomial<F>; N],
) -> Result<[S::Commitment; N]>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    let commitments = polys
        .par_iter()
        .map(|p| scheme.commit(p))
        .collect::<Result<Vec<_>>>()?;
    commitments
        .try_into()
        .map_err(|_| Error::MalformedData(format!("expected {} commitments", N)))
}
