// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Opaque key material handed across the capability boundary.

use crate::families::rsa_pss::RsaKeyPair;
use asymbench_core::AlgorithmFamily;

/// Key material for one algorithm family. Cloning copies key structs,
/// never re-runs key generation, so cache round-trips stay cheap.
#[derive(Clone)]
pub enum KeyPair {
    Rsa(RsaKeyPair),
    P256(p256::ecdsa::SigningKey),
    P384(p384::ecdsa::SigningKey),
    P521(p521::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
    X25519(x25519_dalek::StaticSecret),
}

impl KeyPair {
    /// The family this key material belongs to.
    pub fn family(&self) -> AlgorithmFamily {
        match self {
            KeyPair::Rsa(_) => AlgorithmFamily::Rsa,
            KeyPair::P256(_) => AlgorithmFamily::NistP256,
            KeyPair::P384(_) => AlgorithmFamily::NistP384,
            KeyPair::P521(_) => AlgorithmFamily::NistP521,
            KeyPair::Ed25519(_) => AlgorithmFamily::Ed25519,
            KeyPair::X25519(_) => AlgorithmFamily::X25519,
        }
    }
}
