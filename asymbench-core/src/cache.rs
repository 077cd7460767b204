// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Per-family key material store enabling operation chaining.
//!
//! Later suite steps (sign, verify, exchange) reuse the keypair most
//! recently produced for a (family, key size), so a verification result
//! measures pure verification cost rather than generation-plus-
//! verification. Entries persist for the session lifetime: clearing the
//! result sequence does not touch this cache.

use dashmap::DashMap;

use crate::error::CryptoError;
use crate::types::AlgorithmFamily;

/// Cache key: algorithm family plus key size in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub family: AlgorithmFamily,
    pub key_size_bits: u32,
}

/// Most recent key material for one (family, key size), plus the last
/// signature and the exact message bytes it covers.
#[derive(Debug, Clone)]
pub struct KeyMaterial<K> {
    pub keypair: K,
    pub signature: Option<Vec<u8>>,
    pub digest: Option<Vec<u8>>,
}

/// Thread-safe key material cache. Mutated only by the single foreground
/// suite sequence by construction; the map makes that safe to relax later
/// if independent families are ever run in parallel.
pub struct KeyMaterialCache<K> {
    entries: DashMap<CacheKey, KeyMaterial<K>>,
}

impl<K: Clone> KeyMaterialCache<K> {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Overwrite the entry for this (family, size). Last-write-wins; any
    /// signature attached to the previous keypair is dropped with it,
    /// since it no longer matches the stored key.
    pub fn store_keypair(&self, family: AlgorithmFamily, key_size_bits: u32, keypair: K) {
        self.entries.insert(
            CacheKey {
                family,
                key_size_bits,
            },
            KeyMaterial {
                keypair,
                signature: None,
                digest: None,
            },
        );
    }

    /// Attach a signature and the message it covers to an existing entry.
    /// Without an entry there is no keypair the signature could belong
    /// to, so the call is a no-op.
    pub fn store_signature(
        &self,
        family: AlgorithmFamily,
        key_size_bits: u32,
        signature: Vec<u8>,
        digest: Vec<u8>,
    ) {
        if let Some(mut entry) = self.entries.get_mut(&CacheKey {
            family,
            key_size_bits,
        }) {
            entry.signature = Some(signature);
            entry.digest = Some(digest);
        }
    }

    /// Cached material for this (family, size), if any.
    pub fn get(&self, family: AlgorithmFamily, key_size_bits: u32) -> Option<KeyMaterial<K>> {
        self.entries
            .get(&CacheKey {
                family,
                key_size_bits,
            })
            .map(|entry| entry.value().clone())
    }

    /// Return the cached entry, or invoke `generate`, store the result,
    /// and return it.
    pub fn get_or_generate<F>(
        &self,
        family: AlgorithmFamily,
        key_size_bits: u32,
        generate: F,
    ) -> Result<KeyMaterial<K>, CryptoError>
    where
        F: FnOnce() -> Result<K, CryptoError>,
    {
        if let Some(material) = self.get(family, key_size_bits) {
            return Ok(material);
        }
        let keypair = generate()?;
        self.store_keypair(family, key_size_bits, keypair.clone());
        Ok(KeyMaterial {
            keypair,
            signature: None,
            digest: None,
        })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Clone> Default for KeyMaterialCache<K> {
    fn default() -> Self {
        Self::new()
    }
}
