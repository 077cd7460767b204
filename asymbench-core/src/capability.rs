// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! The capability seam between the measurement core and the cryptographic
//! primitives.
//!
//! The core never touches key material directly: it holds opaque
//! `KeyPair` values produced by the capability, caches them per
//! (family, key size), and passes them back for signing, verification,
//! key exchange, and encryption. Correctness of the primitives is assumed;
//! failures cross this boundary as `CryptoError`.

use crate::error::CryptoError;
use crate::types::{AlgorithmFamily, HashSpec};

/// Algorithm-keyed cryptographic operations consumed by the benchmark
/// suites.
///
/// Implementations decide the concrete parameterization (padding, point
/// encodings) per family; the suite only selects the family, key size,
/// and canonical hash. Availability is probed once at construction and
/// reported through `supports` - unsupported families are skipped with a
/// warning, never an abort.
pub trait CryptoCapability {
    /// Opaque key material handle. Cloning must be cheap enough to hand
    /// copies to the cache (key structs, not key ceremonies).
    type KeyPair: Clone + Send + Sync;

    /// Whether this family is usable on the current platform.
    fn supports(&self, family: AlgorithmFamily) -> bool;

    /// Generate a fresh keypair. `key_size_bits` is only meaningful for
    /// RSA; fixed-size families ignore it.
    fn generate_keypair(
        &self,
        family: AlgorithmFamily,
        key_size_bits: u32,
    ) -> Result<Self::KeyPair, CryptoError>;

    /// Serialized public half, in the family's wire encoding (SEC1
    /// compressed point for NIST curves, raw 32 bytes for Curve25519).
    fn public_bytes(&self, pair: &Self::KeyPair) -> Vec<u8>;

    /// Sign `payload` with the pair's private half.
    fn sign(
        &self,
        pair: &Self::KeyPair,
        payload: &[u8],
        hash: HashSpec,
    ) -> Result<Vec<u8>, CryptoError>;

    /// Verify `signature` over `payload` with the pair's public half.
    /// A failed check is `CryptoError::VerificationFailed`.
    fn verify(
        &self,
        pair: &Self::KeyPair,
        payload: &[u8],
        signature: &[u8],
        hash: HashSpec,
    ) -> Result<(), CryptoError>;

    /// Derive a shared secret from the pair's private half and a peer
    /// public key in the family's wire encoding.
    fn derive_shared_secret(
        &self,
        pair: &Self::KeyPair,
        peer_public: &[u8],
    ) -> Result<Vec<u8>, CryptoError>;

    /// Public-key encryption of `payload` (RSA only).
    fn encrypt(&self, pair: &Self::KeyPair, payload: &[u8]) -> Result<Vec<u8>, CryptoError>;

    /// Private-key decryption of `ciphertext` (RSA only).
    fn decrypt(&self, pair: &Self::KeyPair, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>;
}
