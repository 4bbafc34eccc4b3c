// Benchmarks for the BLS12-381 curve, pairing and hash-to-curve

use augbls_algorithms::ec::bls12_381::{
    hash_to_g2, multi_miller_loop, pairing, G1Affine, G1Projective, G2Affine, G2Prepared,
    G2Projective, Scalar,
};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::{rngs::OsRng, RngCore};

fn random_scalar() -> Scalar {
    let mut bytes = [0u8; 64];
    OsRng.fill_bytes(&mut bytes);
    Scalar::from_bytes_wide(&bytes)
}

/// Group arithmetic
fn bench_groups(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381-groups");

    group.bench_function("g1_scalar_mul", |b| {
        b.iter_batched(
            random_scalar,
            |s| black_box(G1Projective::generator() * s),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("g2_scalar_mul", |b| {
        b.iter_batched(
            random_scalar,
            |s| black_box(G2Projective::generator() * s),
            BatchSize::SmallInput,
        )
    });

    let g1 = G1Affine::generator().to_compressed();
    group.bench_function("g1_decompress", |b| {
        b.iter(|| black_box(G1Affine::from_compressed(black_box(&g1))))
    });

    let g2 = G2Affine::generator().to_compressed();
    group.bench_function("g2_decompress", |b| {
        b.iter(|| black_box(G2Affine::from_compressed(black_box(&g2))))
    });

    group.finish();
}

/// Pairing and hash-to-curve
fn bench_pairing(c: &mut Criterion) {
    let mut group = c.benchmark_group("bls12_381-pairing");
    group.sample_size(20);

    let p = G1Affine::generator();
    let q = G2Affine::generator();
    group.bench_function("pairing", |b| b.iter(|| black_box(pairing(&p, &q))));

    let prepared = G2Prepared::from(q);
    group.bench_function("miller_loop", |b| {
        b.iter(|| black_box(multi_miller_loop(&[(&p, &prepared)])))
    });

    let ml = multi_miller_loop(&[(&p, &prepared)]);
    group.bench_function("final_exponentiation", |b| {
        b.iter(|| black_box(ml.final_exponentiation()))
    });

    group.bench_function("hash_to_g2", |b| {
        b.iter(|| black_box(hash_to_g2(b"benchmark message", b"BENCH-DST")))
    });

    group.finish();
}

criterion_group!(benches, bench_groups, bench_pairing);
criterion_main!(benches);
