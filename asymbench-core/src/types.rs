//! Algorithm, operation, and validated-input types.
//!
//! Following the "Newtype" pattern in Rust to ensure valid state by
//! construction where the value carries an invariant (`CoreCount`), and
//! plain enums where the domain is a closed set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// One asymmetric algorithm family benchmarked by a suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmFamily {
    Rsa,
    NistP256,
    NistP384,
    NistP521,
    Ed25519,
    X25519,
}

impl AlgorithmFamily {
    /// Identifier used in result records and export rows.
    pub fn label(&self) -> &'static str {
        match self {
            AlgorithmFamily::Rsa => "RSA",
            AlgorithmFamily::NistP256 => "NIST_P256",
            AlgorithmFamily::NistP384 => "NIST_P384",
            AlgorithmFamily::NistP521 => "NIST_P521",
            AlgorithmFamily::Ed25519 => "Ed25519",
            AlgorithmFamily::X25519 => "X25519",
        }
    }

    /// Fixed key size in bits, or `None` for RSA where the size varies.
    pub fn fixed_key_bits(&self) -> Option<u32> {
        match self {
            AlgorithmFamily::Rsa => None,
            AlgorithmFamily::NistP256 => Some(256),
            AlgorithmFamily::NistP384 => Some(384),
            AlgorithmFamily::NistP521 => Some(521),
            AlgorithmFamily::Ed25519 => Some(256),
            AlgorithmFamily::X25519 => Some(256),
        }
    }

    /// Canonical hash used when this family signs or encrypts.
    pub fn hash_spec(&self) -> HashSpec {
        match self {
            AlgorithmFamily::Rsa => HashSpec::Sha256,
            AlgorithmFamily::NistP256 => HashSpec::Sha256,
            AlgorithmFamily::NistP384 => HashSpec::Sha384,
            AlgorithmFamily::NistP521 => HashSpec::Sha512,
            AlgorithmFamily::Ed25519 | AlgorithmFamily::X25519 => HashSpec::None,
        }
    }

    /// The reporting group this family belongs to.
    pub fn group(&self) -> AlgorithmGroup {
        match self {
            AlgorithmFamily::Rsa => AlgorithmGroup::Rsa,
            AlgorithmFamily::NistP256 | AlgorithmFamily::NistP384 | AlgorithmFamily::NistP521 => {
                AlgorithmGroup::NistCurves
            }
            AlgorithmFamily::Ed25519 | AlgorithmFamily::X25519 => AlgorithmGroup::Curve25519,
        }
    }

    /// The three NIST curves in benchmark order.
    pub fn nist_curves() -> [AlgorithmFamily; 3] {
        [
            AlgorithmFamily::NistP256,
            AlgorithmFamily::NistP384,
            AlgorithmFamily::NistP521,
        ]
    }
}

impl fmt::Display for AlgorithmFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Grouping used by `run_all` and the CLI: one suite invocation per group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlgorithmGroup {
    Curve25519,
    NistCurves,
    Rsa,
}

impl AlgorithmGroup {
    /// Fixed execution order for `run_all`, kept deterministic so exported
    /// results diff cleanly between runs.
    pub fn all() -> [AlgorithmGroup; 3] {
        [
            AlgorithmGroup::Curve25519,
            AlgorithmGroup::NistCurves,
            AlgorithmGroup::Rsa,
        ]
    }
}

impl fmt::Display for AlgorithmGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlgorithmGroup::Curve25519 => write!(f, "Curve25519"),
            AlgorithmGroup::NistCurves => write!(f, "NIST curves"),
            AlgorithmGroup::Rsa => write!(f, "RSA"),
        }
    }
}

/// Kind of timed operation a result record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    KeyGeneration,
    Signing,
    Verification,
    KeyExchange,
    Encryption,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::KeyGeneration => write!(f, "Key Generation"),
            Operation::Signing => write!(f, "Signing"),
            Operation::Verification => write!(f, "Verification"),
            Operation::KeyExchange => write!(f, "Key Exchange"),
            Operation::Encryption => write!(f, "Encryption"),
        }
    }
}

/// Hash algorithm requested across the capability boundary.
/// `None` is used by families with a fixed internal hash (Ed25519) or no
/// hashing at all (X25519).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashSpec {
    None,
    Sha256,
    Sha384,
    Sha512,
}

impl fmt::Display for HashSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashSpec::None => write!(f, "none"),
            HashSpec::Sha256 => write!(f, "SHA-256"),
            HashSpec::Sha384 => write!(f, "SHA-384"),
            HashSpec::Sha512 => write!(f, "SHA-512"),
        }
    }
}

/// Validated CPU core request.
/// Must be in range 1..=available; the bound is checked against the probe's
/// logical core count at configuration time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreCount(u32);

impl CoreCount {
    /// Create a new CoreCount with bounds validation.
    pub fn new(requested: u32, available: u32) -> Result<Self, ConfigError> {
        if requested == 0 || requested > available {
            return Err(ConfigError::CoreCountOutOfRange {
                requested,
                available,
            });
        }
        Ok(Self(requested))
    }

    /// Get the inner core count.
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for CoreCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
