//! This module implements the error types returned by setup, prove and verify.

use thiserror::Error;

/// Errors that can arise anywhere in the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("the assignment does not match the constraint system: {0}")]
    AssignmentMismatch(String),

    #[error("the witness does not satisfy the constraint system (quotient division left a nonzero remainder)")]
    UnsatisfiedConstraints,

    #[error("wire {0} could not be solved from the assignment")]
    UnsolvedWire(usize),

    #[error("the opening proof for {0} did not verify")]
    CommitmentVerificationFailed(&'static str),

    #[error("the gate and permutation identity does not hold at the evaluation challenge")]
    IdentityCheckFailed,

    #[error("malformed data: {0}")]
    MalformedData(String),

    #[error("unsupported instantiation: {0}")]
    UnsupportedInstantiation(String),

    #[error("a domain of size {0} is not supported by this field")]
    DomainTooLarge(usize),

    #[error("polynomial of degree {degree} exceeds the commitment key bound {max}")]
    DegreeTooLarge { degree: usize, max: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<ark_serialize::SerializationError> for Error {
    fn from(e: ark_serialize::SerializationError) -> Self {
        Error::MalformedData(e.to_string())
    }
}

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, Error>;
