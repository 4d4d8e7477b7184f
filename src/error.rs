//! Unified error types.
//!
//! Cryptographic failures are opaque by design: a wrong key or tampered
//! ciphertext surfaces as `ArcaError::Crypto` with no indication of
//! whether padding, authentication, or length was the cause. No variant
//! ever carries key material or plaintext.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArcaError {
    /// Bad constructor argument: `alpha` out of range, `Domain::new` with
    /// `start >= end`, `next_power_of_2` of a non-positive number, etc.
    Parameter(String),

    /// A query violates a scheme's precondition (e.g. shorter than the
    /// linear-EMT block size).
    PreconditionViolation(String),

    /// A resolver was handed zero responses.
    EmptyResponse,

    /// Decryption or authentication failed. Deliberately opaque.
    Crypto,

    /// A serialised blob could not be parsed.
    DataModel(String),
}

impl fmt::Display for ArcaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parameter(msg) => write!(f, "parameter error: {msg}"),
            Self::PreconditionViolation(msg) => write!(f, "precondition violation: {msg}"),
            Self::EmptyResponse => write!(f, "responses cannot be empty"),
            Self::Crypto => write!(f, "cryptographic operation failed"),
            Self::DataModel(msg) => write!(f, "malformed data: {msg}"),
        }
    }
}

impl std::error::Error for ArcaError {}
