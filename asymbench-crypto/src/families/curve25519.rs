// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Curve25519 operations: Ed25519 signatures and X25519 key agreement.
//!
//! Public keys travel as raw 32-byte values on both schemes.

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier};
use rand::rngs::OsRng;
use x25519_dalek::{PublicKey, StaticSecret};

use asymbench_core::CryptoError;

pub mod ed25519 {
    use super::*;

    pub fn generate() -> SigningKey {
        SigningKey::generate(&mut OsRng)
    }

    pub fn public_bytes(key: &SigningKey) -> Vec<u8> {
        key.verifying_key().to_bytes().to_vec()
    }

    pub fn sign(key: &SigningKey, payload: &[u8]) -> Vec<u8> {
        key.sign(payload).to_bytes().to_vec()
    }

    pub fn verify(key: &SigningKey, payload: &[u8], signature: &[u8]) -> Result<(), CryptoError> {
        let signature =
            Signature::from_slice(signature).map_err(|_| CryptoError::VerificationFailed)?;
        key.verifying_key()
            .verify(payload, &signature)
            .map_err(|_| CryptoError::VerificationFailed)
    }
}

pub mod x25519 {
    use super::*;

    pub fn generate() -> StaticSecret {
        StaticSecret::random_from_rng(OsRng)
    }

    pub fn public_bytes(secret: &StaticSecret) -> Vec<u8> {
        PublicKey::from(secret).as_bytes().to_vec()
    }

    pub fn derive(secret: &StaticSecret, peer_public: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let peer: [u8; 32] = peer_public
            .try_into()
            .map_err(|_| CryptoError::MalformedKey {
                reason: format!("X25519 peer key must be 32 bytes, got {}", peer_public.len()),
            })?;
        let shared = secret.diffie_hellman(&PublicKey::from(peer));
        Ok(shared.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ed25519_sign_verify_round_trip() {
        let key = ed25519::generate();
        let payload = b"benchmark payload";

        let signature = ed25519::sign(&key, payload);
        assert_eq!(signature.len(), 64);
        ed25519::verify(&key, payload, &signature).unwrap();
    }

    #[test]
    fn test_ed25519_wrong_payload_fails() {
        let key = ed25519::generate();
        let signature = ed25519::sign(&key, b"payload one");
        assert!(matches!(
            ed25519::verify(&key, b"payload two", &signature),
            Err(CryptoError::VerificationFailed)
        ));
    }

    #[test]
    fn test_ed25519_truncated_signature_fails() {
        let key = ed25519::generate();
        let signature = ed25519::sign(&key, b"payload");
        assert!(ed25519::verify(&key, b"payload", &signature[..32]).is_err());
    }

    #[test]
    fn test_x25519_both_sides_agree() {
        let alice = x25519::generate();
        let bob = x25519::generate();

        let alice_secret = x25519::derive(&alice, &x25519::public_bytes(&bob)).unwrap();
        let bob_secret = x25519::derive(&bob, &x25519::public_bytes(&alice)).unwrap();

        assert_eq!(alice_secret, bob_secret);
        assert_eq!(alice_secret.len(), 32);
    }

    #[test]
    fn test_x25519_bad_peer_length_rejected() {
        let secret = x25519::generate();
        assert!(matches!(
            x25519::derive(&secret, &[0u8; 16]),
            Err(CryptoError::MalformedKey { .. })
        ));
    }
}
