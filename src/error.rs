// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;

use num_bigint_dig::BigUint;

/// Errors that can occur during key generation and cryptographic operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The request is structurally invalid and will never succeed as given.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No candidate satisfied every constraint within the retry budget.
    ///
    /// Retrying with a larger budget (or a different bit length) may succeed.
    #[error("prime search exhausted after {attempts} attempts")]
    PrimeSearchExhausted { attempts: usize },

    /// No generator was drawn within the sampling budget.
    #[error("generator search exhausted after {attempts} attempts")]
    GeneratorSearchExhausted { attempts: usize },

    #[error("no modular inverse: operands are not coprime")]
    NoInverse,

    #[error("malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// The random number generator failed to produce output.
    #[error("entropy source failure: {0}")]
    Entropy(String),
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidParameter(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Error::MalformedCiphertext(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// A parameter that is valid but outside recommended hygiene bounds.
///
/// These never abort an operation. They are logged through `tracing` and
/// handed back to the caller inside [`Advised`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutOfRangeWarning {
    /// Public exponent outside the open interval (2^16, 2^256).
    PublicExponent { exponent: BigUint },

    /// Modulus size other than 2048 or 3072 bits.
    ModulusBits { bits: usize },
}

impl fmt::Display for OutOfRangeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutOfRangeWarning::PublicExponent { exponent } => write!(
                f,
                "public exponent should be an odd integer between 2^16 and 2^256, got {exponent}"
            ),
            OutOfRangeWarning::ModulusBits { bits } => {
                write!(f, "modulus bit length should be 2048 or 3072, got {bits}")
            }
        }
    }
}

/// A successfully produced value together with any advisories raised while
/// producing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advised<T> {
    value: T,
    warnings: Vec<OutOfRangeWarning>,
}

impl<T> Advised<T> {
    pub(crate) fn new(value: T, warnings: Vec<OutOfRangeWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    pub fn warnings(&self) -> &[OutOfRangeWarning] {
        &self.warnings
    }

    /// Discard the advisories and keep the value.
    pub fn into_inner(self) -> T {
        self.value
    }

    pub fn into_parts(self) -> (T, Vec<OutOfRangeWarning>) {
        (self.value, self.warnings)
    }
}
