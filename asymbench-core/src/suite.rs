// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Per-family benchmark suites.
//!
//! Each algorithm family runs a fixed step sequence, consulting the key
//! material cache so that later steps reuse what earlier steps produced.
//! Failure of one family's step is logged and does not abort the rest of
//! the batch; the only timeout short-circuit is that verification is
//! skipped when signing timed out for the same family.

use sha2::{Digest, Sha256};
use tracing::{error, info, warn};

use crate::cache::{KeyMaterial, KeyMaterialCache};
use crate::capability::CryptoCapability;
use crate::error::{BenchError, BenchResult, CryptoError};
use crate::result::{BenchmarkResult, OperationSpec};
use crate::runner::{Outcome, TimedOperationRunner};
use crate::types::{AlgorithmFamily, AlgorithmGroup, Operation};

/// SHA-256 output length, which fixes the OAEP overhead.
const OAEP_HASH_BYTES: usize = 32;

/// Largest plaintext an RSA key of `bits` can encrypt under OAEP-SHA256,
/// floored at one byte.
pub fn oaep_capacity(bits: u32) -> usize {
    (bits as usize / 8)
        .saturating_sub(2 * OAEP_HASH_BYTES + 2)
        .max(1)
}

/// Sequences the fixed operation chain for one algorithm group.
pub struct AlgorithmSuiteRunner<'a, C: CryptoCapability> {
    capability: &'a C,
    cache: &'a KeyMaterialCache<C::KeyPair>,
    runner: &'a TimedOperationRunner,
    payload: &'a [u8],
    rsa_key_sizes: &'a [u32],
}

impl<'a, C: CryptoCapability> AlgorithmSuiteRunner<'a, C> {
    pub fn new(
        capability: &'a C,
        cache: &'a KeyMaterialCache<C::KeyPair>,
        runner: &'a TimedOperationRunner,
        payload: &'a [u8],
        rsa_key_sizes: &'a [u32],
    ) -> Self {
        Self {
            capability,
            cache,
            runner,
            payload,
            rsa_key_sizes,
        }
    }

    /// Run one group's suites, returning every produced result in
    /// execution order.
    pub fn run_group(&self, group: AlgorithmGroup) -> Vec<BenchmarkResult> {
        info!(%group, "running benchmark suite");
        let mut results = Vec::new();
        match group {
            AlgorithmGroup::Curve25519 => self.run_curve25519(&mut results),
            AlgorithmGroup::NistCurves => self.run_nist_curves(&mut results),
            AlgorithmGroup::Rsa => self.run_rsa(&mut results),
        }
        info!(%group, results = results.len(), "suite finished");
        results
    }

    fn run_curve25519(&self, results: &mut Vec<BenchmarkResult>) {
        if self.available(AlgorithmFamily::Ed25519) {
            if let Err(e) = self.run_signature_chain(AlgorithmFamily::Ed25519, 256, results) {
                error!(error = %e, "Ed25519 suite aborted");
            }
        }
        if self.available(AlgorithmFamily::X25519) {
            if let Err(e) = self.run_exchange_chain(AlgorithmFamily::X25519, 256, results) {
                error!(error = %e, "X25519 suite aborted");
            }
        }
    }

    fn run_nist_curves(&self, results: &mut Vec<BenchmarkResult>) {
        for curve in AlgorithmFamily::nist_curves() {
            if !self.available(curve) {
                continue;
            }
            let Some(bits) = curve.fixed_key_bits() else {
                continue;
            };
            if let Err(e) = self.run_nist_curve(curve, bits, results) {
                error!(%curve, error = %e, "curve suite aborted");
            }
        }
    }

    fn run_nist_curve(
        &self,
        curve: AlgorithmFamily,
        bits: u32,
        results: &mut Vec<BenchmarkResult>,
    ) -> BenchResult<()> {
        self.run_signature_chain(curve, bits, results)?;
        // A timed-out signing skips verification only; the exchange uses
        // independent key material and still runs.
        let exchange = self.run_exchange(curve, bits)?;
        results.push(exchange.record);
        Ok(())
    }

    fn run_rsa(&self, results: &mut Vec<BenchmarkResult>) {
        if !self.available(AlgorithmFamily::Rsa) {
            return;
        }
        for &bits in self.rsa_key_sizes {
            if let Err(e) = self.run_rsa_size(bits, results) {
                error!(bits, error = %e, "RSA suite aborted for this key size");
            }
        }
    }

    fn run_rsa_size(&self, bits: u32, results: &mut Vec<BenchmarkResult>) -> BenchResult<()> {
        self.run_signature_chain(AlgorithmFamily::Rsa, bits, results)?;
        let encryption = self.run_rsa_encryption(bits)?;
        results.push(encryption.record);
        Ok(())
    }

    /// KeyGeneration -> Signing -> Verification, with verification
    /// skipped iff signing timed out.
    fn run_signature_chain(
        &self,
        family: AlgorithmFamily,
        bits: u32,
        results: &mut Vec<BenchmarkResult>,
    ) -> BenchResult<()> {
        let keygen = self.run_keygen(family, bits)?;
        results.push(keygen.record);

        let sign = self.run_sign(family, bits)?;
        let sign_timed_out = sign.timed_out;
        results.push(sign.record);

        if sign_timed_out {
            warn!(%family, bits, "signing timed out; skipping verification");
        } else {
            let verify = self.run_verify(family, bits)?;
            results.push(verify.record);
        }
        Ok(())
    }

    /// KeyGeneration -> KeyExchange (X25519).
    fn run_exchange_chain(
        &self,
        family: AlgorithmFamily,
        bits: u32,
        results: &mut Vec<BenchmarkResult>,
    ) -> BenchResult<()> {
        let keygen = self.run_keygen(family, bits)?;
        results.push(keygen.record);

        let exchange = self.run_exchange(family, bits)?;
        results.push(exchange.record);
        Ok(())
    }

    fn run_keygen(
        &self,
        family: AlgorithmFamily,
        bits: u32,
    ) -> BenchResult<Outcome<C::KeyPair>> {
        let spec = OperationSpec::new(family.label(), bits, Operation::KeyGeneration, 0);
        let outcome = self
            .runner
            .run(spec, || self.capability.generate_keypair(family, bits))?;

        // Key generation always refreshes the cache for this family/size.
        if let Some(pair) = &outcome.output {
            self.cache.store_keypair(family, bits, pair.clone());
        }
        Ok(outcome)
    }

    fn run_sign(&self, family: AlgorithmFamily, bits: u32) -> BenchResult<Outcome<Vec<u8>>> {
        let material = self.cached_material(family, bits, Operation::Signing)?;
        let message = self.sign_message(family);

        let spec = OperationSpec::new(family.label(), bits, Operation::Signing, message.len());
        let keypair = material.keypair;
        let outcome = self.runner.run(spec, || {
            self.capability.sign(&keypair, &message, family.hash_spec())
        })?;

        if let Some(signature) = &outcome.output {
            self.cache
                .store_signature(family, bits, signature.clone(), message);
        }
        Ok(outcome)
    }

    fn run_verify(&self, family: AlgorithmFamily, bits: u32) -> BenchResult<Outcome<()>> {
        let KeyMaterial {
            keypair,
            signature,
            digest,
        } = self.cached_material(family, bits, Operation::Verification)?;

        // Verification needs a signature to check; when none is cached it
        // is produced here, outside the timed region, so the measurement
        // stays pure verification cost.
        let (signature, message) = match (signature, digest) {
            (Some(signature), Some(message)) => (signature, message),
            _ => {
                let message = self.sign_message(family);
                let signature = self
                    .capability
                    .sign(&keypair, &message, family.hash_spec())
                    .map_err(|source| self.operation_failed(family, Operation::Verification, source))?;
                self.cache
                    .store_signature(family, bits, signature.clone(), message.clone());
                (signature, message)
            }
        };

        let spec = OperationSpec::new(family.label(), bits, Operation::Verification, message.len());
        self.runner.run(spec, || {
            self.capability
                .verify(&keypair, &message, &signature, family.hash_spec())
        })
    }

    fn run_exchange(&self, family: AlgorithmFamily, bits: u32) -> BenchResult<Outcome<Vec<u8>>> {
        let material = self.cached_material(family, bits, Operation::KeyExchange)?;

        // The peer side is setup, not measurement: the timed region is the
        // local derivation from the peer's serialized public key.
        let peer = self
            .capability
            .generate_keypair(family, bits)
            .map_err(|source| self.operation_failed(family, Operation::KeyExchange, source))?;
        let peer_public = self.capability.public_bytes(&peer);

        let algorithm = match family.group() {
            AlgorithmGroup::NistCurves => format!("{}_ECDH", family.label()),
            _ => family.label().to_string(),
        };
        let secret_len = bits as usize / 8;
        let spec = OperationSpec::new(algorithm, bits, Operation::KeyExchange, secret_len);

        let keypair = material.keypair;
        self.runner.run(spec, || {
            self.capability.derive_shared_secret(&keypair, &peer_public)
        })
    }

    /// Encrypt immediately followed by decrypt, both inside the single
    /// timed region, on a payload truncated to the OAEP capacity.
    fn run_rsa_encryption(&self, bits: u32) -> BenchResult<Outcome<Vec<u8>>> {
        let family = AlgorithmFamily::Rsa;
        let material = self.cached_material(family, bits, Operation::Encryption)?;

        let capacity = oaep_capacity(bits).min(self.payload.len());
        let plaintext = &self.payload[..capacity];

        let spec = OperationSpec::new(family.label(), bits, Operation::Encryption, plaintext.len());
        let keypair = material.keypair;
        self.runner.run(spec, || {
            let ciphertext = self.capability.encrypt(&keypair, plaintext)?;
            self.capability.decrypt(&keypair, &ciphertext)
        })
    }

    /// The message a family signs: RSA signs the SHA-256 digest of the
    /// session payload, everything else signs the payload itself.
    fn sign_message(&self, family: AlgorithmFamily) -> Vec<u8> {
        if family == AlgorithmFamily::Rsa {
            Sha256::digest(self.payload).to_vec()
        } else {
            self.payload.to_vec()
        }
    }

    fn cached_material(
        &self,
        family: AlgorithmFamily,
        bits: u32,
        operation: Operation,
    ) -> BenchResult<KeyMaterial<C::KeyPair>> {
        self.cache
            .get_or_generate(family, bits, || {
                self.capability.generate_keypair(family, bits)
            })
            .map_err(|source| self.operation_failed(family, operation, source))
    }

    fn operation_failed(
        &self,
        family: AlgorithmFamily,
        operation: Operation,
        source: CryptoError,
    ) -> BenchError {
        BenchError::OperationFailed {
            algorithm: family.label().to_string(),
            operation,
            source,
        }
    }

    fn available(&self, family: AlgorithmFamily) -> bool {
        if self.capability.supports(family) {
            true
        } else {
            warn!(%family, "algorithm family unavailable on this platform; skipping");
            false
        }
    }
}
