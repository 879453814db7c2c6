//! Arithmetic Circuit Module
//!
//! This module defines the constraint system for PLONK circuits.
//! A circuit is composed of gates with the standard PLONK constraint:
//!
//!   q_M * a * b + q_L * a + q_R * b + q_O * c + q_C = 0
//!
//! where:
//! - a, b, c are wire values
//! - q_M, q_L, q_R, q_O, q_C are selector values
//!
//! Named assignments are turned into field-element [`Witness`]es against a
//! [`ConstraintSystem`] in the `witness` submodule.

pub mod constraint;
pub mod witness;

pub use constraint::{ConstraintSystem, Gate, Variable, Wire, WireType};
pub use witness::{AssignedValue, Assignment, Visibility, Witness};
