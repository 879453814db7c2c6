//! Polynomial Operations
//!
//! This module provides polynomial arithmetic over any scalar field.
//! Polynomials are represented in coefficient form: f(X) = c_0 + c_1*X + c_2*X^2 + ...
//! Evaluation form lives in [`crate::fft::Evaluations`]; the two never share a type.

use ark_ff::Field;
use std::ops::{Add, Mul, Neg, Sub};

/// A polynomial in coefficient form
/// coeffs[i] is the coefficient of X^i
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Polynomial<F: Field> {
    pub coeffs: Vec<F>,
}

impl<F: Field> Polynomial<F> {
    /// Create the zero polynomial
    pub fn zero() -> Self {
        Polynomial { coeffs: vec![] }
    }

    /// Create a constant polynomial
    pub fn constant(c: F) -> Self {
        Self::from_coeffs(vec![c])
    }

    /// Create from coefficient vector
    pub fn from_coeffs(coeffs: Vec<F>) -> Self {
        let mut poly = Polynomial { coeffs };
        poly.normalize();
        poly
    }

    /// Get the degree of the polynomial (-1 for zero polynomial)
    pub fn degree(&self) -> isize {
        self.coeffs.len() as isize - 1
    }

    /// Check if this is the zero polynomial
    pub fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|c| c.is_zero())
    }

    /// Remove leading zeros
    pub fn normalize(&mut self) {
        while let Some(c) = self.coeffs.last() {
            if c.is_zero() {
                self.coeffs.pop();
            } else {
                break;
            }
        }
    }

    /// Evaluate the polynomial at a point
    /// Uses Horner's method: f(x) = c_0 + x*(c_1 + x*(c_2 + ...))
    pub fn evaluate(&self, x: &F) -> F {
        let mut result = F::zero();
        for coeff in self.coeffs.iter().rev() {
            result = result * x + coeff;
        }
        result
    }

    /// Get coefficient of X^i
    pub fn coeff(&self, i: usize) -> F {
        self.coeffs.get(i).copied().unwrap_or_else(F::zero)
    }

    /// Scale all coefficients by a scalar
    pub fn scale(&self, scalar: &F) -> Self {
        Self::from_coeffs(self.coeffs.iter().map(|c| *c * scalar).collect())
    }

    /// Multiply by X^k
    pub fn shift_by_xk(&self, k: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut coeffs = vec![F::zero(); k];
        coeffs.extend_from_slice(&self.coeffs);
        Polynomial { coeffs }
    }

    /// Add `blinder(X) * (X^n - 1)`.
    ///
    /// The result agrees with `self` on every n-th root of unity.
    pub fn add_vanishing_multiple(&self, blinder: &[F], n: usize) -> Self {
        let mut coeffs = self.coeffs.clone();
        let len = coeffs.len().max(blinder.len() + n);
        coeffs.resize(len, F::zero());
        for (j, b) in blinder.iter().enumerate() {
            coeffs[j] -= b;
            coeffs[j + n] += b;
        }
        Self::from_coeffs(coeffs)
    }

    /// Divide by (X - a), returns quotient
    ///
    /// The remainder f(a) is discarded, so this yields (f(X) - f(a)) / (X - a).
    pub fn div_by_linear(&self, a: &F) -> Self {
        if self.coeffs.len() < 2 {
            return Self::zero();
        }

        // Synthetic division
        let n = self.coeffs.len();
        let mut quotient = vec![F::zero(); n - 1];

        let mut carry = F::zero();
        for i in (0..n - 1).rev() {
            quotient[i] = self.coeffs[i + 1] + carry;
            carry = quotient[i] * a;
        }

        Self::from_coeffs(quotient)
    }

    /// Divide by the vanishing polynomial X^n - 1.
    ///
    /// Returns (quotient, remainder) with self = quotient * (X^n - 1) + remainder
    /// and deg(remainder) < n.
    pub fn divide_by_vanishing(&self, n: usize) -> (Self, Self) {
        if self.coeffs.len() <= n {
            return (Self::zero(), self.clone());
        }

        let mut remainder = self.coeffs.clone();
        let mut quotient = vec![F::zero(); remainder.len() - n];

        // X^i = X^{i-n} (X^n - 1) + X^{i-n}
        for i in (n..remainder.len()).rev() {
            let lead = remainder[i];
            quotient[i - n] = lead;
            remainder[i - n] += lead;
        }
        remainder.truncate(n);

        (Self::from_coeffs(quotient), Self::from_coeffs(remainder))
    }

    /// Split into chunks of `size` coefficients; the last chunk takes the rest.
    pub fn split(&self, size: usize, parts: usize) -> Vec<Self> {
        (0..parts)
            .map(|p| {
                let start = (p * size).min(self.coeffs.len());
                let end = if p + 1 == parts {
                    self.coeffs.len()
                } else {
                    ((p + 1) * size).min(self.coeffs.len())
                };
                Self::from_coeffs(self.coeffs[start..end].to_vec())
            })
            .collect()
    }

    /// Create the vanishing polynomial Z_H(X) = X^n - 1
    pub fn vanishing(n: usize) -> Self {
        let mut coeffs = vec![F::zero(); n + 1];
        coeffs[0] = -F::one();
        coeffs[n] = F::one();
        Polynomial { coeffs }
    }
}

impl<F: Field> Add for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, rhs: &Polynomial<F>) -> Polynomial<F> {
        let (long, short) = if self.coeffs.len() >= rhs.coeffs.len() {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let mut result = long.coeffs.clone();
        for (r, c) in result.iter_mut().zip(&short.coeffs) {
            *r += c;
        }
        Polynomial::from_coeffs(result)
    }
}

impl<F: Field> Sub for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, rhs: &Polynomial<F>) -> Polynomial<F> {
        let mut result = self.coeffs.clone();
        if result.len() < rhs.coeffs.len() {
            result.resize(rhs.coeffs.len(), F::zero());
        }
        for (r, c) in result.iter_mut().zip(&rhs.coeffs) {
            *r -= c;
        }
        Polynomial::from_coeffs(result)
    }
}

impl<F: Field> Mul for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: &Polynomial<F>) -> Polynomial<F> {
        if self.is_zero() || rhs.is_zero() {
            return Polynomial::zero();
        }

        let mut result = vec![F::zero(); self.coeffs.len() + rhs.coeffs.len() - 1];
        for (i, a) in self.coeffs.iter().enumerate() {
            for (j, b) in rhs.coeffs.iter().enumerate() {
                result[i + j] += *a * b;
            }
        }
        Polynomial::from_coeffs(result)
    }
}

impl<F: Field> Add for Polynomial<F> {
    type Output = Polynomial<F>;

    fn add(self, rhs: Polynomial<F>) -> Polynomial<F> {
        &self + &rhs
    }
}

impl<F: Field> Sub for Polynomial<F> {
    type Output = Polynomial<F>;

    fn sub(self, rhs: Polynomial<F>) -> Polynomial<F> {
        &self - &rhs
    }
}

impl<F: Field> Mul<F> for &Polynomial<F> {
    type Output = Polynomial<F>;

    fn mul(self, rhs: F) -> Polynomial<F> {
        self.scale(&rhs)
    }
}

impl<F: Field> Neg for Polynomial<F> {
    type Output = Polynomial<F>;

    fn neg(self) -> Polynomial<F> {
        Polynomial {
            coeffs: self.coeffs.into_iter().map(|c| -c).collect(),
        }
    }
}
