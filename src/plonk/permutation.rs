//! Permutation Argument for PLONK
//!
//! This module computes the copy-constraint permutation σ* from the gates' wire
//! indices (Section 5 of the PLONK paper).
//!
//! Key concepts:
//! - Positions are indexed: a_i -> i, b_i -> n + i, c_i -> 2n + i
//! - Every position holding the same wire index lies on one cycle of σ*
//! - We use cosets H, k1*H, k2*H to give each position a distinct field label
//! - S_σ1, S_σ2, S_σ3 interpolate the labels of σ*(position)

use std::collections::BTreeMap;

use ark_ff::Field;

use crate::circuit::{Gate, Wire, WireType};
use crate::fft::Domain;
use crate::field::ScalarField;

/// Coset shifts (k1, k2) = (g, g²) for the multiplicative generator g.
///
/// g generates F*, so neither g nor g² lies in a proper subgroup H, and
/// H, gH, g²H are pairwise disjoint.
pub fn coset_shifts<F: ScalarField>() -> (F, F) {
    let g = F::GENERATOR;
    (g, g.square())
}

/// σ* over the 3n wire positions
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Permutation {
    /// Domain size
    pub n: usize,
    /// sigma[p] is the position following p on its cycle
    pub sigma: Vec<usize>,
}

impl Permutation {
    /// Compute the permutation of the gates padded to `n` rows.
    ///
    /// Padding rows and wire slots used only once map to themselves.
    pub fn compute<F: Field>(gates: &[Gate<F>], n: usize) -> Self {
        debug_assert!(gates.len() <= n);

        // Group positions by wire index; BTreeMap keeps the result deterministic
        let mut classes: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
        for (i, gate) in gates.iter().enumerate() {
            for (wire, wire_type) in [
                (gate.a, WireType::A),
                (gate.b, WireType::B),
                (gate.c, WireType::C),
            ] {
                classes
                    .entry(wire)
                    .or_default()
                    .push(Wire::new(i, wire_type).to_index(n));
            }
        }

        let mut sigma: Vec<usize> = (0..3 * n).collect();
        for members in classes.values() {
            // member[0] -> member[1] -> ... -> member[k] -> member[0]
            for (j, &current) in members.iter().enumerate() {
                sigma[current] = members[(j + 1) % members.len()];
            }
        }

        Permutation { n, sigma }
    }

    /// Follow the permutation: σ*(p)
    pub fn follow(&self, p: usize) -> usize {
        self.sigma[p]
    }

    /// Whether positions p and q lie on the same cycle
    pub fn connects(&self, p: usize, q: usize) -> bool {
        let mut current = p;
        loop {
            if current == q {
                return true;
            }
            current = self.follow(current);
            if current == p {
                return false;
            }
        }
    }

    /// Non-trivial cycles, each starting at its smallest position
    pub fn cycles(&self) -> Vec<Vec<Wire>> {
        let mut visited = vec![false; self.sigma.len()];
        let mut cycles = Vec::new();

        for start in 0..self.sigma.len() {
            if visited[start] || self.sigma[start] == start {
                continue;
            }
            let mut cycle = Vec::new();
            let mut current = start;
            while !visited[current] {
                visited[current] = true;
                cycle.push(Wire::from_index(current, self.n));
                current = self.follow(current);
            }
            cycles.push(cycle);
        }
        cycles
    }

    /// Evaluations of S_σ1, S_σ2, S_σ3 over H.
    ///
    /// Position a_i is labelled ω^i, b_i is k1·ω^i and c_i is k2·ω^i.
    pub fn sigma_evals<F: ScalarField>(&self, domain: &Domain<F>, k1: F, k2: F) -> [Vec<F>; 3] {
        let labels = position_labels(domain, k1, k2);
        let column = |t: usize| {
            self.sigma[t * self.n..(t + 1) * self.n]
                .iter()
                .map(|&p| labels[p])
                .collect::<Vec<F>>()
        };
        [column(0), column(1), column(2)]
    }
}

/// Field label of every position: [ω^i] ++ [k1·ω^i] ++ [k2·ω^i]
pub fn position_labels<F: ScalarField>(domain: &Domain<F>, k1: F, k2: F) -> Vec<F> {
    let powers: Vec<F> = domain.elements().collect();
    let mut labels = Vec::with_capacity(3 * powers.len());
    labels.extend(powers.iter().copied());
    labels.extend(powers.iter().map(|w| k1 * w));
    labels.extend(powers.iter().map(|w| k2 * w));
    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::ConstraintSystem;
    use ark_bn254::Fr;
    use ark_ff::{One, Zero};

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
            Fr::from(5u64),
        );
        cs
    }

    #[test]
    fn test_permutation_identity() {
        // Distinct wires everywhere: no copy constraints
        let gates: Vec<Gate<Fr>> = (0..3)
            .map(|i| Gate {
                q_m: Fr::zero(),
                q_l: Fr::zero(),
                q_r: Fr::zero(),
                q_o: Fr::zero(),
                q_c: Fr::zero(),
                a: 3 * i,
                b: 3 * i + 1,
                c: 3 * i + 2,
            })
            .collect();
        let perm = Permutation::compute(&gates, 4);

        for p in 0..12 {
            assert_eq!(perm.follow(p), p);
        }
        assert!(perm.cycles().is_empty());
    }

    #[test]
    fn test_permutation_with_copy_constraints() {
        let n = 4;
        let perm = Permutation::compute(&cubic().gates(), n);

        // x (wire 1) sits at a_1, b_1, b_2 and b_3
        let x_positions = [
            Wire::new(1, WireType::A),
            Wire::new(1, WireType::B),
            Wire::new(2, WireType::B),
            Wire::new(3, WireType::B),
        ];
        for w in &x_positions[1..] {
            assert!(perm.connects(x_positions[0].to_index(n), w.to_index(n)));
        }

        // y (wire 0) ties the public gate to the output of the last gate
        assert!(perm.connects(
            Wire::new(0, WireType::A).to_index(n),
            Wire::new(3, WireType::C).to_index(n)
        ));
        assert!(!perm.connects(
            Wire::new(0, WireType::A).to_index(n),
            Wire::new(1, WireType::A).to_index(n)
        ));

        // Wires 0..4 each form one cycle
        assert_eq!(perm.cycles().len(), 4);
    }

    #[test]
    fn test_permutation_is_bijection() {
        let perm = Permutation::compute(&cubic().gates(), 8);
        let mut seen = vec![false; 24];
        for p in 0..24 {
            assert!(!seen[perm.follow(p)]);
            seen[perm.follow(p)] = true;
        }
    }

    #[test]
    fn test_coset_generators() {
        let domain = Domain::<Fr>::new(1 << 10).unwrap();
        let (k1, k2) = coset_shifts::<Fr>();

        // k1, k2 and k1/k2 are outside H
        assert!(!domain.contains(&k1));
        assert!(!domain.contains(&k2));
        assert!(!domain.contains(&(k1 / k2)));
    }

    #[test]
    fn test_sigma_labels_distinct() {
        let domain = Domain::<Fr>::new(8).unwrap();
        let (k1, k2) = coset_shifts::<Fr>();
        let mut labels = position_labels(&domain, k1, k2);
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 24);

        let identity = Permutation::compute::<Fr>(&[], 8);
        let [s1, s2, s3] = identity.sigma_evals(&domain, k1, k2);
        assert_eq!(s1, domain.elements().collect::<Vec<_>>());
        assert_eq!(s2[1], k1 * domain.omega);
        assert_eq!(s3[0], k2);
    }
}
