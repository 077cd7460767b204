// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! `CryptoCapability` implementation dispatching over the family adapters.
//!
//! Availability is probed once at construction by actually generating a
//! key per family; anything that fails is reported unavailable and the
//! suites skip it with a warning instead of aborting.

use std::collections::HashSet;

use tracing::{info, warn};

use asymbench_core::{AlgorithmFamily, CryptoCapability, CryptoError, HashSpec, Operation};

use crate::families::{curve25519, nist, rsa_pss};
use crate::keypair::KeyPair;

/// Smallest supported RSA size; enough to prove the primitive works.
const RSA_PROBE_BITS: u32 = 1024;

const ALL_FAMILIES: [AlgorithmFamily; 6] = [
    AlgorithmFamily::Rsa,
    AlgorithmFamily::NistP256,
    AlgorithmFamily::NistP384,
    AlgorithmFamily::NistP521,
    AlgorithmFamily::Ed25519,
    AlgorithmFamily::X25519,
];

pub struct CryptoProvider {
    available: HashSet<AlgorithmFamily>,
}

impl CryptoProvider {
    /// Probe every family once and remember what works.
    pub fn new() -> Self {
        let mut available = HashSet::new();
        for family in ALL_FAMILIES {
            if Self::probe(family) {
                info!(%family, "algorithm family available");
                available.insert(family);
            } else {
                warn!(%family, "algorithm family unavailable");
            }
        }
        Self { available }
    }

    fn probe(family: AlgorithmFamily) -> bool {
        match family {
            AlgorithmFamily::Rsa => rsa_pss::generate(RSA_PROBE_BITS).is_ok(),
            AlgorithmFamily::NistP256 => {
                let _ = nist::p256_ops::generate();
                true
            }
            AlgorithmFamily::NistP384 => {
                let _ = nist::p384_ops::generate();
                true
            }
            AlgorithmFamily::NistP521 => {
                let _ = nist::p521_ops::generate();
                true
            }
            AlgorithmFamily::Ed25519 => {
                let _ = curve25519::ed25519::generate();
                true
            }
            AlgorithmFamily::X25519 => {
                let _ = curve25519::x25519::generate();
                true
            }
        }
    }

    fn check_hash(pair: &KeyPair, requested: HashSpec) -> Result<(), CryptoError> {
        let family = pair.family();
        if family.hash_spec() == requested {
            Ok(())
        } else {
            Err(CryptoError::UnsupportedHash {
                family,
                requested: requested.to_string(),
            })
        }
    }

    fn unsupported(pair: &KeyPair, operation: Operation) -> CryptoError {
        CryptoError::UnsupportedOperation {
            family: pair.family(),
            operation,
        }
    }
}

impl Default for CryptoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoCapability for CryptoProvider {
    type KeyPair = KeyPair;

    fn supports(&self, family: AlgorithmFamily) -> bool {
        self.available.contains(&family)
    }

    fn generate_keypair(
        &self,
        family: AlgorithmFamily,
        key_size_bits: u32,
    ) -> Result<KeyPair, CryptoError> {
        match family {
            AlgorithmFamily::Rsa => Ok(KeyPair::Rsa(rsa_pss::generate(key_size_bits)?)),
            AlgorithmFamily::NistP256 => Ok(KeyPair::P256(nist::p256_ops::generate())),
            AlgorithmFamily::NistP384 => Ok(KeyPair::P384(nist::p384_ops::generate())),
            AlgorithmFamily::NistP521 => Ok(KeyPair::P521(nist::p521_ops::generate())),
            AlgorithmFamily::Ed25519 => Ok(KeyPair::Ed25519(curve25519::ed25519::generate())),
            AlgorithmFamily::X25519 => Ok(KeyPair::X25519(curve25519::x25519::generate())),
        }
    }

    fn public_bytes(&self, pair: &KeyPair) -> Vec<u8> {
        match pair {
            KeyPair::Rsa(p) => rsa_pss::public_bytes(p),
            KeyPair::P256(k) => nist::p256_ops::public_bytes(k),
            KeyPair::P384(k) => nist::p384_ops::public_bytes(k),
            KeyPair::P521(k) => nist::p521_ops::public_bytes(k),
            KeyPair::Ed25519(k) => curve25519::ed25519::public_bytes(k),
            KeyPair::X25519(s) => curve25519::x25519::public_bytes(s),
        }
    }

    fn sign(
        &self,
        pair: &KeyPair,
        payload: &[u8],
        hash: HashSpec,
    ) -> Result<Vec<u8>, CryptoError> {
        Self::check_hash(pair, hash)?;
        match pair {
            KeyPair::Rsa(p) => rsa_pss::sign(p, payload),
            KeyPair::P256(k) => Ok(nist::p256_ops::sign(k, payload)),
            KeyPair::P384(k) => Ok(nist::p384_ops::sign(k, payload)),
            KeyPair::P521(k) => Ok(nist::p521_ops::sign(k, payload)),
            KeyPair::Ed25519(k) => Ok(curve25519::ed25519::sign(k, payload)),
            KeyPair::X25519(_) => Err(Self::unsupported(pair, Operation::Signing)),
        }
    }

    fn verify(
        &self,
        pair: &KeyPair,
        payload: &[u8],
        signature: &[u8],
        hash: HashSpec,
    ) -> Result<(), CryptoError> {
        Self::check_hash(pair, hash)?;
        match pair {
            KeyPair::Rsa(p) => rsa_pss::verify(p, payload, signature),
            KeyPair::P256(k) => nist::p256_ops::verify(k, payload, signature),
            KeyPair::P384(k) => nist::p384_ops::verify(k, payload, signature),
            KeyPair::P521(k) => nist::p521_ops::verify(k, payload, signature),
            KeyPair::Ed25519(k) => curve25519::ed25519::verify(k, payload, signature),
            KeyPair::X25519(_) => Err(Self::unsupported(pair, Operation::Verification)),
        }
    }

    fn derive_shared_secret(
        &self,
        pair: &KeyPair,
        peer_public: &[u8],
    ) -> Result<Vec<u8>, CryptoError> {
        match pair {
            KeyPair::P256(k) => nist::p256_ops::derive(k, peer_public),
            KeyPair::P384(k) => nist::p384_ops::derive(k, peer_public),
            KeyPair::P521(k) => nist::p521_ops::derive(k, peer_public),
            KeyPair::X25519(s) => curve25519::x25519::derive(s, peer_public),
            KeyPair::Rsa(_) | KeyPair::Ed25519(_) => {
                Err(Self::unsupported(pair, Operation::KeyExchange))
            }
        }
    }

    fn encrypt(&self, pair: &KeyPair, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match pair {
            KeyPair::Rsa(p) => rsa_pss::encrypt(p, payload),
            _ => Err(Self::unsupported(pair, Operation::Encryption)),
        }
    }

    fn decrypt(&self, pair: &KeyPair, ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        match pair {
            KeyPair::Rsa(p) => rsa_pss::decrypt(p, ciphertext),
            _ => Err(Self::unsupported(pair, Operation::Encryption)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_families_available() {
        let provider = CryptoProvider::new();
        for family in ALL_FAMILIES {
            assert!(provider.supports(family), "{family} should be available");
        }
    }

    #[test]
    fn test_trait_sign_verify_ed25519() {
        let provider = CryptoProvider::new();
        let pair = provider
            .generate_keypair(AlgorithmFamily::Ed25519, 256)
            .unwrap();

        let signature = provider.sign(&pair, b"payload", HashSpec::None).unwrap();
        provider
            .verify(&pair, b"payload", &signature, HashSpec::None)
            .unwrap();
    }

    #[test]
    fn test_trait_sign_verify_p256() {
        let provider = CryptoProvider::new();
        let pair = provider
            .generate_keypair(AlgorithmFamily::NistP256, 256)
            .unwrap();

        let signature = provider.sign(&pair, b"payload", HashSpec::Sha256).unwrap();
        provider
            .verify(&pair, b"payload", &signature, HashSpec::Sha256)
            .unwrap();
    }

    #[test]
    fn test_hash_mismatch_rejected() {
        let provider = CryptoProvider::new();
        let pair = provider
            .generate_keypair(AlgorithmFamily::NistP384, 384)
            .unwrap();

        let result = provider.sign(&pair, b"payload", HashSpec::Sha256);
        assert!(matches!(result, Err(CryptoError::UnsupportedHash { .. })));
    }

    #[test]
    fn test_x25519_exchange_via_trait() {
        let provider = CryptoProvider::new();
        let local = provider
            .generate_keypair(AlgorithmFamily::X25519, 256)
            .unwrap();
        let peer = provider
            .generate_keypair(AlgorithmFamily::X25519, 256)
            .unwrap();

        let secret = provider
            .derive_shared_secret(&local, &provider.public_bytes(&peer))
            .unwrap();
        assert_eq!(secret.len(), 32);
    }

    #[test]
    fn test_unsupported_operations() {
        let provider = CryptoProvider::new();
        let x25519 = provider
            .generate_keypair(AlgorithmFamily::X25519, 256)
            .unwrap();
        let ed25519 = provider
            .generate_keypair(AlgorithmFamily::Ed25519, 256)
            .unwrap();

        assert!(matches!(
            provider.sign(&x25519, b"x", HashSpec::None),
            Err(CryptoError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            provider.derive_shared_secret(&ed25519, &[0; 32]),
            Err(CryptoError::UnsupportedOperation { .. })
        ));
        assert!(matches!(
            provider.encrypt(&ed25519, b"x"),
            Err(CryptoError::UnsupportedOperation { .. })
        ));
    }
}
