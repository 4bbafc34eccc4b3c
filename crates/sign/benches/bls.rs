//! Benchmarks for the augmented BLS scheme and key derivation.

use augbls_sign::bls::derive::{derive_child_sk, derive_child_sk_unhardened};
use augbls_sign::{AugSchemeMpl, PrivateKey, PublicKey, Signature};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Signer counts for aggregate verification
const SIGNER_COUNTS: &[usize] = &[1, 4, 16];

fn keys(count: usize) -> Vec<PrivateKey> {
    let mut rng = ChaCha20Rng::from_seed([42u8; 32]);
    (0..count)
        .map(|_| {
            let mut seed = [0u8; 32];
            rng.fill_bytes(&mut seed);
            AugSchemeMpl::key_gen(&seed).unwrap()
        })
        .collect()
}

fn bench_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls_keys");
    let sk = AugSchemeMpl::key_gen(&[7u8; 32]).unwrap();

    group.bench_function("key_gen", |b| {
        b.iter(|| AugSchemeMpl::key_gen(black_box(&[7u8; 32])).unwrap())
    });
    group.bench_function("public_key", |b| b.iter(|| black_box(&sk).public_key()));
    group.bench_function("derive_child_sk", |b| {
        b.iter(|| derive_child_sk(black_box(&sk), 0).unwrap())
    });
    group.bench_function("derive_child_sk_unhardened", |b| {
        b.iter(|| derive_child_sk_unhardened(black_box(&sk), 0))
    });

    group.finish();
}

fn bench_sign_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls_sign_verify");
    let sk = AugSchemeMpl::key_gen(&[7u8; 32]).unwrap();
    let pk = sk.public_key();
    let message = [0x5au8; 32];
    let sig = AugSchemeMpl::sign(&sk, &message).unwrap();
    let sig_bytes = sig.to_bytes();

    group.bench_function("sign", |b| {
        b.iter(|| AugSchemeMpl::sign(black_box(&sk), black_box(&message)).unwrap())
    });
    group.bench_function("verify", |b| {
        b.iter(|| AugSchemeMpl::verify(&pk, black_box(&message), black_box(&sig)))
    });
    group.bench_function("signature_decode", |b| {
        b.iter(|| Signature::from_bytes(black_box(&sig_bytes)).unwrap())
    });

    group.finish();
}

fn bench_aggregate(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls_aggregate");

    for &count in SIGNER_COUNTS {
        let sks = keys(count);
        let pks: Vec<PublicKey> = sks.iter().map(PrivateKey::public_key).collect();
        let messages: Vec<[u8; 4]> = (0..count as u32).map(u32::to_be_bytes).collect();
        let sigs: Vec<Signature> = sks
            .iter()
            .zip(&messages)
            .map(|(sk, m)| AugSchemeMpl::sign(sk, m).unwrap())
            .collect();
        let agg = AugSchemeMpl::aggregate_signatures(&sigs).unwrap();

        group.bench_with_input(BenchmarkId::new("aggregate", count), &sigs, |b, sigs| {
            b.iter(|| AugSchemeMpl::aggregate_signatures(black_box(sigs)).unwrap())
        });
        group.bench_with_input(
            BenchmarkId::new("aggregate_verify", count),
            &(pks, messages),
            |b, (pks, messages)| {
                b.iter(|| AugSchemeMpl::aggregate_verify(pks, messages, black_box(&agg)))
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_keys, bench_sign_verify, bench_aggregate);
criterion_main!(benches);
