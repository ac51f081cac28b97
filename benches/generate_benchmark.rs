//! Benchmarks for lyrics2pptx deck generation.
//!
//! Run with: cargo bench
//!
//! These benchmarks cover segmentation, assembly, and package encoding at
//! various song lengths.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lyrics2pptx::{BackgroundSpec, DeckAssembler, StyleSpec};

/// Creates lyrics text with the given number of four-line verses.
fn create_lyrics(verse_count: usize) -> String {
    let mut text = String::from("Benchmark Song\n");
    for verse in 0..verse_count {
        for line in 0..4 {
            text.push_str(&format!("Verse {} line {} sung softly\n", verse + 1, line + 1));
        }
        text.push('\n');
    }
    text
}

/// Benchmark splitting text into blocks.
fn bench_segmentation(c: &mut Criterion) {
    let mut group = c.benchmark_group("segmentation");

    for verse_count in [4, 16, 64, 256].iter() {
        let text = create_lyrics(*verse_count);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::new("verses", verse_count), &text, |b, text| {
            b.iter(|| {
                let _ = lyrics2pptx::segment(black_box(text));
            });
        });
    }

    group.finish();
}

/// Benchmark building the styled deck model.
fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");
    let assembler = DeckAssembler::new(StyleSpec::default(), BackgroundSpec::default());

    for verse_count in [4, 16, 64].iter() {
        let lyrics = lyrics2pptx::segment(&create_lyrics(*verse_count)).unwrap();
        group.bench_with_input(
            BenchmarkId::new("verses", verse_count),
            &lyrics,
            |b, lyrics| {
                b.iter(|| {
                    let _ = assembler.assemble(black_box(lyrics));
                });
            },
        );
    }

    group.finish();
}

/// Benchmark encoding a deck as .pptx bytes.
fn bench_package_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("package_encoding");
    let assembler = DeckAssembler::new(StyleSpec::default(), BackgroundSpec::default());

    for verse_count in [4, 16, 64].iter() {
        let lyrics = lyrics2pptx::segment(&create_lyrics(*verse_count)).unwrap();
        let deck = assembler.assemble(&lyrics).unwrap();
        group.bench_with_input(
            BenchmarkId::new("verses", verse_count),
            &deck,
            |b, deck| {
                b.iter(|| {
                    let _ = lyrics2pptx::pptx::to_bytes(black_box(deck));
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_segmentation,
    bench_assembly,
    bench_package_encoding,
);
criterion_main!(benches);
