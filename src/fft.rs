//! Fast Fourier Transform over Finite Fields
//!
//! This module implements FFT and IFFT for polynomial evaluation and interpolation
//! over multiplicative subgroups of the scalar field.
//!
//! Given a polynomial f(X) of degree < n, and the n-th root of unity ω:
//! - FFT computes [f(ω^0), f(ω^1), ..., f(ω^{n-1})]
//! - IFFT recovers the coefficients from evaluations
//!
//! Butterfly stages are split across threads with rayon. Every butterfly
//! touches a disjoint pair of slots, so the output does not depend on the
//! number of threads.

use ark_ff::FftField;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::field::lagrange_basis_eval;
use crate::polynomial::Polynomial;

/// Domain: multiplicative subgroup H = {ω^0, ω^1, ..., ω^{n-1}}
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Domain<F: FftField> {
    /// Size of the domain (power of 2)
    pub n: usize,
    /// Primitive n-th root of unity
    pub omega: F,
    /// ω^{-1}
    pub omega_inv: F,
    /// 1/n in the field
    pub n_inv: F,
}

impl<F: FftField> Domain<F> {
    /// Create the smallest domain holding at least `min_size` points
    pub fn new(min_size: usize) -> Result<Self> {
        let n = min_size.max(1).next_power_of_two();

        let omega = F::get_root_of_unity(n as u64).ok_or(Error::DomainTooLarge(n))?;
        let omega_inv = omega.inverse().ok_or(Error::DomainTooLarge(n))?;
        let n_inv = F::from(n as u64)
            .inverse()
            .ok_or(Error::DomainTooLarge(n))?;

        Ok(Domain {
            n,
            omega,
            omega_inv,
            n_inv,
        })
    }

    /// Number of points in the domain
    pub fn size(&self) -> usize {
        self.n
    }

    /// Get the i-th element of the domain: ω^i
    pub fn element(&self, i: usize) -> F {
        self.omega.pow([i as u64])
    }

    /// Get all elements of the domain as an iterator
    pub fn elements(&self) -> impl Iterator<Item = F> + '_ {
        DomainIterator {
            current: F::one(),
            omega: self.omega,
            remaining: self.n,
        }
    }

    /// Whether x is an n-th root of unity
    pub fn contains(&self, x: &F) -> bool {
        self.vanishing_eval(x).is_zero()
    }

    /// Evaluate the vanishing polynomial Z_H(X) = X^n - 1 at a point
    pub fn vanishing_eval(&self, x: &F) -> F {
        x.pow([self.n as u64]) - F::one()
    }

    /// Evaluate Lagrange basis L_i(X) at a point (0-indexed, L_0 is 1 at ω^0)
    pub fn lagrange_eval(&self, i: usize, x: &F) -> F {
        lagrange_basis_eval(i, x, &self.omega, self.n)
    }

    /// Wrap values as evaluations over this domain, padding with zeros
    pub fn evaluations(&self, mut values: Vec<F>) -> Evaluations<F> {
        debug_assert!(values.len() <= self.n);
        values.resize(self.n, F::zero());
        Evaluations {
            evals: values,
            domain: *self,
        }
    }

    /// FFT on this domain
    pub fn fft(&self, poly: &Polynomial<F>) -> Evaluations<F> {
        let mut values = poly.coeffs.clone();
        fold_into(&mut values, self.n);
        fft_in_place(&mut values, &self.omega);
        Evaluations {
            evals: values,
            domain: *self,
        }
    }

    /// IFFT on this domain
    pub fn ifft(&self, evals: &[F]) -> Polynomial<F> {
        let mut coeffs = evals.to_vec();
        coeffs.resize(self.n, F::zero());
        fft_in_place(&mut coeffs, &self.omega_inv);
        let n_inv = self.n_inv;
        coeffs.par_iter_mut().for_each(|c| *c *= n_inv);
        Polynomial::from_coeffs(coeffs)
    }

    /// Coset FFT: evaluate polynomial on k*H = {k*ω^0, k*ω^1, ..., k*ω^{n-1}}
    ///
    /// The polynomial must have fewer than n coefficients.
    pub fn coset_fft(&self, poly: &Polynomial<F>, k: &F) -> Vec<F> {
        // f(k*X) = c_0 + (c_1*k)*X + (c_2*k^2)*X^2 + ...
        let mut scaled = poly.coeffs.clone();
        debug_assert!(scaled.len() <= self.n);
        scaled.resize(self.n, F::zero());
        distribute_powers(&mut scaled, k);
        fft_in_place(&mut scaled, &self.omega);
        scaled
    }

    /// Inverse FFT on a coset: interpolate from evaluations on k*H
    pub fn coset_ifft(&self, evals: &[F], k: &F) -> Option<Polynomial<F>> {
        let k_inv = k.inverse()?;
        let mut poly = self.ifft(evals);
        distribute_powers(&mut poly.coeffs, &k_inv);
        Some(Polynomial::from_coeffs(poly.coeffs))
    }
}

/// Polynomial in evaluation form over a fixed domain
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Evaluations<F: FftField> {
    pub evals: Vec<F>,
    pub domain: Domain<F>,
}

impl<F: FftField> Evaluations<F> {
    /// Recover the coefficient form (degree < n)
    pub fn interpolate(&self) -> Polynomial<F> {
        self.domain.ifft(&self.evals)
    }
}

/// Fold coefficients beyond n back onto the low ones (X^n = 1 on H)
fn fold_into<F: FftField>(values: &mut Vec<F>, n: usize) {
    if values.len() > n {
        let tail = values.split_off(n);
        for (i, c) in tail.into_iter().enumerate() {
            values[i % n] += c;
        }
    }
    values.resize(n, F::zero());
}

/// c_i <- c_i * g^i
fn distribute_powers<F: FftField>(coeffs: &mut [F], g: &F) {
    let mut power = F::one();
    for c in coeffs.iter_mut() {
        *c *= power;
        power *= g;
    }
}

/// In-place FFT using Cooley-Tukey algorithm
pub fn fft_in_place<F: FftField>(values: &mut [F], omega: &F) {
    let n = values.len();
    if n <= 1 {
        return;
    }
    debug_assert!(n.is_power_of_two());

    // Bit-reverse permutation
    bit_reverse_permutation(values);

    // Iterative FFT
    let mut m = 1;
    while m < n {
        let omega_m = omega.pow([(n / (2 * m)) as u64]);
        let mut twiddles = Vec::with_capacity(m);
        let mut w = F::one();
        for _ in 0..m {
            twiddles.push(w);
            w *= omega_m;
        }

        values.par_chunks_mut(2 * m).for_each(|chunk| {
            let (lo, hi) = chunk.split_at_mut(m);
            for j in 0..m {
                let t = twiddles[j] * hi[j];
                let u = lo[j];
                lo[j] = u + t;
                hi[j] = u - t;
            }
        });
        m *= 2;
    }
}

/// Bit-reverse permutation for FFT
fn bit_reverse_permutation<T>(values: &mut [T]) {
    let n = values.len();
    let log_n = n.trailing_zeros();

    for i in 0..n {
        let j = bit_reverse(i, log_n);
        if i < j {
            values.swap(i, j);
        }
    }
}

/// Reverse the bits of an integer
fn bit_reverse(mut x: usize, bits: u32) -> usize {
    let mut result = 0;
    for _ in 0..bits {
        result = (result << 1) | (x & 1);
        x >>= 1;
    }
    result
}

/// Iterator over domain elements
struct DomainIterator<F> {
    current: F,
    omega: F,
    remaining: usize,
}

impl<F: FftField> Iterator for DomainIterator<F> {
    type Item = F;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            None
        } else {
            let result = self.current;
            self.current *= self.omega;
            self.remaining -= 1;
            Some(result)
        }
    }
}
