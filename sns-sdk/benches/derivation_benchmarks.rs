//! Key derivation and record codec benchmarks
//!
//! The bump search runs once per derived key, so lookups that touch many
//! records are dominated by it.
//!
//! Run with: `cargo bench --bench derivation_benchmarks`

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sns_sdk::constants::NAME_PROGRAM_ID;
use sns_sdk::derivation::{find_program_address, get_record_v2_key, hash_name};
use sns_sdk::test_utils::{ethereum_pubkey, sign_ethereum_roa, test_ethereum_key};
use sns_sdk::{
    deserialize_record_v2_content, get_domain_key, serialize_record_v2_content,
    verify_ethereum_roa, Record,
};

/// Benchmark name hashing
fn bench_hash_name(c: &mut Criterion) {
    c.bench_function("hash_name", |b| {
        b.iter(|| black_box(hash_name(black_box("bonfida"))))
    });
}

/// Benchmark the bump seed search
fn bench_find_program_address(c: &mut Criterion) {
    let hashed = hash_name("bonfida");
    let seeds: [&[u8]; 3] = [&hashed, &[0u8; 32], &[0u8; 32]];
    c.bench_function("find_program_address", |b| {
        b.iter(|| black_box(find_program_address(black_box(&seeds), &NAME_PROGRAM_ID)))
    });
}

/// Benchmark domain, subdomain and record key derivation
fn bench_domain_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("domain_key");

    group.bench_function("root", |b| {
        b.iter(|| black_box(get_domain_key(black_box("bonfida.sol"), None)))
    });
    group.bench_function("subdomain", |b| {
        b.iter(|| black_box(get_domain_key(black_box("dex.bonfida.sol"), None)))
    });
    group.bench_function("record_v2", |b| {
        b.iter(|| black_box(get_record_v2_key(black_box("dex.bonfida"), Record::Url)))
    });

    group.finish();
}

/// Benchmark record content codecs
fn bench_record_codecs(c: &mut Criterion) {
    let mut group = c.benchmark_group("record_v2_codec");

    let cases = [
        (Record::Aaaa, "2001:db8:0:0:1:0:0:1"),
        (Record::Eth, "0x4bbeeb066ed09b7aed07bf39eee0460dfa261520"),
        (Record::Cname, "münchen.example"),
        (Record::Sol, "Crf8hzfthWGbGbLTVCiqRqV5MVnbpHB1L9KQMd6gsinb"),
    ];
    for (record, content) in cases {
        let bytes = serialize_record_v2_content(content, record).unwrap();
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(format!("{record}_encode"), |b| {
            b.iter(|| black_box(serialize_record_v2_content(black_box(content), record)))
        });
        group.bench_function(format!("{record}_decode"), |b| {
            b.iter(|| black_box(deserialize_record_v2_content(black_box(&bytes), record)))
        });
    }

    group.finish();
}

/// Benchmark secp256k1 key recovery for Ethereum right of association
fn bench_ethereum_roa(c: &mut Criterion) {
    let key = test_ethereum_key(7);
    let pubkey = ethereum_pubkey(&key);
    let signature = sign_ethereum_roa(&key, "bonfida", Record::Eth);

    c.bench_function("verify_ethereum_roa", |b| {
        b.iter(|| {
            black_box(verify_ethereum_roa(
                "bonfida",
                Record::Eth,
                black_box(&signature),
                &pubkey,
            ))
        })
    });
}

criterion_group!(
    benches,
    bench_hash_name,
    bench_find_program_address,
    bench_domain_keys,
    bench_record_codecs,
    bench_ethereum_roa,
);
criterion_main!(benches);
