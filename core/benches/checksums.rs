use criterion::{black_box, criterion_group, criterion_main, Criterion};
use depot_core::checksum;
use std::io::Write;

pub fn compute(c: &mut Criterion) {
    let mut small = tempfile::NamedTempFile::new().unwrap();
    small.write_all(&[7u8; 4 * 1024]).unwrap();

    let mut large = tempfile::NamedTempFile::new().unwrap();
    large.write_all(&vec![7u8; 8 * 1024 * 1024]).unwrap();

    c.bench_function("checksum::compute small file", |b| {
        b.iter(|| checksum::compute(black_box(small.path()), &["SHA-1", "MD5"]))
    });
    c.bench_function("checksum::compute large file", |b| {
        b.iter(|| checksum::compute(black_box(large.path()), &["SHA-1", "MD5"]))
    });
}

criterion_group!(benches, compute);
criterion_main!(benches);
