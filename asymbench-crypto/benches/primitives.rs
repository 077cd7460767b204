// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Criterion microbenchmarks for the primitive adapters, independent of
//! the resource-sampling harness. Useful for sanity-checking that the
//! harness overhead stays negligible next to the primitives themselves.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use asymbench_core::{AlgorithmFamily, CryptoCapability, HashSpec};
use asymbench_crypto::CryptoProvider;

fn bench_sign(c: &mut Criterion) {
    let provider = CryptoProvider::new();
    let payload = vec![0x5Au8; 1024];

    let mut group = c.benchmark_group("sign");
    for family in [AlgorithmFamily::Ed25519, AlgorithmFamily::NistP256] {
        let pair = provider
            .generate_keypair(family, 256)
            .expect("keygen for bench");
        let hash = family.hash_spec();

        group.bench_with_input(BenchmarkId::from_parameter(family), &pair, |b, pair| {
            b.iter(|| provider.sign(pair, &payload, hash).expect("sign"));
        });
    }
    group.finish();
}

fn bench_verify(c: &mut Criterion) {
    let provider = CryptoProvider::new();
    let payload = vec![0x5Au8; 1024];

    let mut group = c.benchmark_group("verify");
    for family in [AlgorithmFamily::Ed25519, AlgorithmFamily::NistP256] {
        let pair = provider
            .generate_keypair(family, 256)
            .expect("keygen for bench");
        let hash = family.hash_spec();
        let signature = provider.sign(&pair, &payload, hash).expect("sign");

        group.bench_with_input(BenchmarkId::from_parameter(family), &pair, |b, pair| {
            b.iter(|| {
                provider
                    .verify(pair, &payload, &signature, hash)
                    .expect("verify")
            });
        });
    }
    group.finish();
}

fn bench_exchange(c: &mut Criterion) {
    let provider = CryptoProvider::new();

    let mut group = c.benchmark_group("exchange");
    for family in [AlgorithmFamily::X25519, AlgorithmFamily::NistP256] {
        let local = provider
            .generate_keypair(family, 256)
            .expect("keygen for bench");
        let peer = provider
            .generate_keypair(family, 256)
            .expect("keygen for bench");
        let peer_public = provider.public_bytes(&peer);

        group.bench_with_input(BenchmarkId::from_parameter(family), &local, |b, local| {
            b.iter(|| {
                provider
                    .derive_shared_secret(local, &peer_public)
                    .expect("derive")
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sign, bench_verify, bench_exchange);
criterion_main!(benches);
