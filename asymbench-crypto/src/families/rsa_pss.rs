// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! RSA operations: PSS-SHA256 signatures and OAEP-SHA256 encryption.
//!
//! Signing takes the already-hashed message (the suite hands RSA the
//! SHA-256 digest of its payload) and hashes once more inside the PSS
//! encoding, mirroring the scheme's sign(digest) usage.

use rand::thread_rng;
use rsa::{Oaep, Pss, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};

use asymbench_core::{AlgorithmFamily, CryptoError};

/// RSA private/public pair. The public half is derived once at
/// generation so encryption and verification need no recomputation.
#[derive(Clone)]
pub struct RsaKeyPair {
    pub private: RsaPrivateKey,
    pub public: RsaPublicKey,
}

pub fn generate(key_size_bits: u32) -> Result<RsaKeyPair, CryptoError> {
    let mut rng = thread_rng();
    let private = RsaPrivateKey::new(&mut rng, key_size_bits as usize).map_err(|e| {
        CryptoError::KeyGeneration {
            family: AlgorithmFamily::Rsa,
            key_size_bits,
            reason: e.to_string(),
        }
    })?;
    let public = RsaPublicKey::from(&private);
    Ok(RsaKeyPair { private, public })
}

pub fn public_bytes(pair: &RsaKeyPair) -> Vec<u8> {
    // Big-endian modulus bytes; enough to identify the key on the wire.
    rsa::traits::PublicKeyParts::n(&pair.public).to_bytes_be()
}

pub fn sign(pair: &RsaKeyPair, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut rng = thread_rng();
    let hashed = Sha256::digest(payload);
    pair.private
        .sign_with_rng(&mut rng, Pss::new::<Sha256>(), hashed.as_slice())
        .map_err(|e| CryptoError::Signing {
            reason: e.to_string(),
        })
}

pub fn verify(pair: &RsaKeyPair, payload: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
    let hashed = Sha256::digest(payload);
    pair.public
        .verify(Pss::new::<Sha256>(), hashed.as_slice(), signature)
        .map_err(|_| CryptoError::VerificationFailed)
}

pub fn encrypt(pair: &RsaKeyPair, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let mut rng = thread_rng();
    pair.public
        .encrypt(&mut rng, Oaep::new::<Sha256>(), payload)
        .map_err(|e| CryptoError::Encryption {
            reason: e.to_string(),
        })
}

pub fn decrypt(pair: &RsaKeyPair, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
    pair.private
        .decrypt(Oaep::new::<Sha256>(), ciphertext)
        .map_err(|e| CryptoError::Decryption {
            reason: e.to_string(),
        })
}
