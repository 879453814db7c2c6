//! PLONK Verifier
//!
//! Implements the PLONK verifier following Section 8.4 of the paper, adapted
//! to proofs that open every polynomial individually.
//!
//! The verifier:
//! 1. Checks the public witness shape
//! 2. Reconstructs the transcript to get β, γ, α, ζ
//! 3. Checks every opening through the commitment scheme
//! 4. Evaluates Z_H(ζ), L_1(ζ) and PI(ζ)
//! 5. Checks the gate and permutation identity at ζ

use tracing::{debug, info, info_span};

use crate::circuit::Witness;
use crate::commitment::CommitmentScheme;
use crate::error::{Error, Result};
use crate::field::ScalarField;
use crate::plonk::setup::check_public_witness;
use crate::plonk::types::*;
use crate::plonk::{absorb_public, Challenges};
use crate::transcript::Transcript;

/// Verify `proof` against the public data and the public witness.
///
/// Pure: the verdict depends only on the three arguments.
pub fn verify<F, S>(
    proof: &Proof<F, S>,
    public_data: &PublicData<F, S>,
    public_witness: &Witness<F>,
) -> Result<()>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    let _span = info_span!("verify", curve = %F::CURVE, scheme = S::NAME).entered();

    check_public_witness(public_data.nb_public, public_witness)?;
    let public_inputs = public_witness.public();

    let ch = replay_transcript(proof, public_data, public_inputs)?;
    debug!("transcript replayed");

    check_openings(proof, public_data, &ch)?;
    debug!("all openings verified");

    if !identity_holds(&proof.evaluations, public_data, public_inputs, &ch) {
        return Err(Error::IdentityCheckFailed);
    }

    info!("proof verified");
    Ok(())
}

/// Recompute the challenges from the proof's commitments
pub(crate) fn replay_transcript<F, S>(
    proof: &Proof<F, S>,
    pd: &PublicData<F, S>,
    public_inputs: &[F],
) -> Result<Challenges<F>>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    let mut transcript = Transcript::new(&pd.transcript_label);
    absorb_public(&mut transcript, pd, public_inputs)?;

    transcript.absorb("L", &proof.l)?;
    transcript.absorb("R", &proof.r)?;
    transcript.absorb("O", &proof.o)?;
    let beta = transcript.squeeze_challenge("beta");
    let gamma = transcript.squeeze_challenge("gamma");

    transcript.absorb("Z", &proof.z)?;
    let alpha = transcript.squeeze_challenge("alpha");

    for (label, c) in ["H_lo", "H_mid", "H_hi"].into_iter().zip(&proof.h) {
        transcript.absorb(label, c)?;
    }
    let zeta = transcript.squeeze_challenge_outside_domain("zeta", &pd.domain);

    Ok(Challenges {
        beta,
        gamma,
        alpha,
        zeta,
    })
}

/// Check each claimed evaluation against its commitment
fn check_openings<F, S>(proof: &Proof<F, S>, pd: &PublicData<F, S>, ch: &Challenges<F>) -> Result<()>
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    let zeta_omega = ch.zeta * pd.domain.omega;
    let commitments = proof.opened_commitments(&pd.vk);
    let evaluations = proof.evaluations.to_array();

    for i in 0..NB_OPENINGS {
        let point = if i + 1 == NB_OPENINGS {
            zeta_omega
        } else {
            ch.zeta
        };
        if !pd
            .scheme
            .verify_opening(commitments[i], &point, &evaluations[i], &proof.openings[i])
        {
            debug!(label = OPENING_LABELS[i], "opening rejected");
            return Err(Error::CommitmentVerificationFailed(OPENING_LABELS[i]));
        }
    }
    Ok(())
}

/// gate(ζ) + PI(ζ) + α·perm(ζ) + α²·L_1(ζ)·(Z(ζ) - 1) = H(ζ)·Z_H(ζ)
pub(crate) fn identity_holds<F, S>(
    e: &ProofEvaluations<F>,
    pd: &PublicData<F, S>,
    public_inputs: &[F],
    ch: &Challenges<F>,
) -> bool
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    let lhs = constraint_eval(e, pd, public_inputs, ch);
    let rhs = quotient_eval(e, pd.n(), &ch.zeta) * pd.domain.vanishing_eval(&ch.zeta);
    lhs == rhs
}

/// The left-hand side of the identity, from the claimed evaluations
pub(crate) fn constraint_eval<F, S>(
    e: &ProofEvaluations<F>,
    pd: &PublicData<F, S>,
    public_inputs: &[F],
    ch: &Challenges<F>,
) -> F
where
    F: ScalarField,
    S: CommitmentScheme<F>,
{
    let Challenges {
        beta,
        gamma,
        alpha,
        zeta,
    } = *ch;
    let domain = &pd.domain;

    // PI(ζ) = Σ -x_i L_i(ζ)
    let pi = public_inputs
        .iter()
        .enumerate()
        .fold(F::zero(), |acc, (i, x)| acc - *x * domain.lagrange_eval(i, &zeta));
    let l1 = domain.lagrange_eval(0, &zeta);

    let gate = e.q_m * e.l * e.r + e.q_l * e.l + e.q_r * e.r + e.q_o * e.o + e.q_k + pi;

    let id = (e.l + beta * zeta + gamma)
        * (e.r + beta * pd.k1 * zeta + gamma)
        * (e.o + beta * pd.k2 * zeta + gamma);
    let perm = (e.l + beta * e.s1 + gamma) * (e.r + beta * e.s2 + gamma) * (e.o + beta * e.s3 + gamma);

    gate + alpha * (e.z * id - e.z_omega * perm) + alpha.square() * l1 * (e.z - F::one())
}

/// H(ζ) = H_lo(ζ) + ζ^n H_mid(ζ) + ζ^{2n} H_hi(ζ)
pub(crate) fn quotient_eval<F: ScalarField>(e: &ProofEvaluations<F>, n: usize, zeta: &F) -> F {
    let zeta_n = zeta.pow([n as u64]);
    e.h_lo + zeta_n * e.h_mid + zeta_n.square() * e.h_hi
}
