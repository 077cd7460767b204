// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! NIST P-curve operations: ECDSA signatures (DER-encoded, with each
//! curve's canonical digest) and ECDH over SEC1 compressed points.
//!
//! The three curve crates share the same RustCrypto API surface, so the
//! per-curve modules are stamped out by one macro.

macro_rules! nist_curve_ops {
    ($name:ident, $curve:ident, $label:literal) => {
        pub mod $name {
            use $curve::ecdh::diffie_hellman;
            use $curve::ecdsa::signature::{Signer, Verifier};
            use $curve::ecdsa::{Signature, SigningKey, VerifyingKey};
            use $curve::PublicKey;

            use asymbench_core::CryptoError;

            pub fn generate() -> SigningKey {
                SigningKey::random(&mut rand::thread_rng())
            }

            /// SEC1 compressed point, the original wire encoding peers
            /// exchange before deriving.
            pub fn public_bytes(key: &SigningKey) -> Vec<u8> {
                VerifyingKey::from(key)
                    .to_encoded_point(true)
                    .as_bytes()
                    .to_vec()
            }

            pub fn sign(key: &SigningKey, payload: &[u8]) -> Vec<u8> {
                let signature: Signature = key.sign(payload);
                signature.to_der().as_bytes().to_vec()
            }

            pub fn verify(
                key: &SigningKey,
                payload: &[u8],
                signature: &[u8],
            ) -> Result<(), CryptoError> {
                let signature =
                    Signature::from_der(signature).map_err(|_| CryptoError::VerificationFailed)?;
                VerifyingKey::from(key)
                    .verify(payload, &signature)
                    .map_err(|_| CryptoError::VerificationFailed)
            }

            pub fn derive(key: &SigningKey, peer_public: &[u8]) -> Result<Vec<u8>, CryptoError> {
                let peer = PublicKey::from_sec1_bytes(peer_public).map_err(|e| {
                    CryptoError::MalformedKey {
                        reason: format!("{}: {}", $label, e),
                    }
                })?;
                let shared = diffie_hellman(key.as_nonzero_scalar(), peer.as_affine());
                Ok(shared.raw_secret_bytes().as_slice().to_vec())
            }
        }
    };
}

nist_curve_ops!(p256_ops, p256, "NIST_P256");
nist_curve_ops!(p384_ops, p384, "NIST_P384");
nist_curve_ops!(p521_ops, p521, "NIST_P521");

#[cfg(test)]
mod tests {
    use super::*;
    use asymbench_core::CryptoError;

    #[test]
    fn test_p256_sign_verify_round_trip() {
        let key = p256_ops::generate();
        let payload = b"benchmark payload";

        let signature = p256_ops::sign(&key, payload);
        p256_ops::verify(&key, payload, &signature).unwrap();
    }

    #[test]
    fn test_p384_tampered_signature_fails() {
        let key = p384_ops::generate();
        let payload = b"benchmark payload";

        let mut signature = p384_ops::sign(&key, payload);
        let last = signature.len() - 1;
        signature[last] ^= 0x01;
        assert!(p384_ops::verify(&key, payload, &signature).is_err());
    }

    #[test]
    fn test_p521_sign_verify_round_trip() {
        let key = p521_ops::generate();
        let payload = b"benchmark payload";

        let signature = p521_ops::sign(&key, payload);
        p521_ops::verify(&key, payload, &signature).unwrap();
    }

    #[test]
    fn test_ecdh_both_sides_agree() {
        let alice = p256_ops::generate();
        let bob = p256_ops::generate();

        let alice_secret = p256_ops::derive(&alice, &p256_ops::public_bytes(&bob)).unwrap();
        let bob_secret = p256_ops::derive(&bob, &p256_ops::public_bytes(&alice)).unwrap();

        assert_eq!(alice_secret, bob_secret);
        assert_eq!(alice_secret.len(), 32);
    }

    #[test]
    fn test_compressed_point_sizes() {
        // One tag byte plus the x coordinate.
        assert_eq!(p256_ops::public_bytes(&p256_ops::generate()).len(), 33);
        assert_eq!(p384_ops::public_bytes(&p384_ops::generate()).len(), 49);
        assert_eq!(p521_ops::public_bytes(&p521_ops::generate()).len(), 67);
    }

    #[test]
    fn test_garbage_peer_key_rejected() {
        let key = p256_ops::generate();
        let result = p256_ops::derive(&key, &[0u8; 33]);
        assert!(matches!(result, Err(CryptoError::MalformedKey { .. })));
    }
}
