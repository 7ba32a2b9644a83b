//! Benchmarks for page rendering performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use synthetic page text rather than real PDFs.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use thesis_text::{
    wrap_text, MemorySink, MemorySource, Normalizer, SectionConfig, SectionConfigs,
    SegmentationPipeline, TocExtractor,
};

/// Creates extracted-looking text for one page with the given number of lines.
fn create_test_page(line_count: usize) -> String {
    (0..line_count)
        .map(|i| {
            format!(
                "Line {}  of   the  benchmark page ,with  © stray symbols ; and   spacing .",
                i + 1
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Creates a dot-leader table of contents with the given number of entries.
fn create_test_toc(entry_count: usize) -> String {
    (0..entry_count)
        .map(|i| format!("Section {} ........................ {}", i + 1, i * 3 + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Benchmark normalization at various page sizes.
fn bench_normalize(c: &mut Criterion) {
    let normalizer = Normalizer::default();
    let mut group = c.benchmark_group("normalize");

    for line_count in [10, 50, 200].iter() {
        let page = create_test_page(*line_count);

        group.bench_function(format!("{}_lines", line_count), |b| {
            b.iter(|| normalizer.normalize(black_box(&page)));
        });
    }

    group.finish();
}

/// Benchmark wrapping alone.
fn bench_wrap(c: &mut Criterion) {
    let text = "lorem ipsum dolor sit amet ".repeat(200);

    c.bench_function("wrap_text_80", |b| {
        b.iter(|| wrap_text(black_box(&text), 80));
    });
}

/// Benchmark table-of-contents extraction.
fn bench_toc(c: &mut Criterion) {
    let extractor = TocExtractor::new();
    let toc = create_test_toc(100);

    c.bench_function("toc_extract_100", |b| {
        b.iter(|| extractor.extract(black_box(&toc)));
    });
}

/// Benchmark a full in-memory run over a twelve-chapter thesis.
fn bench_pipeline(c: &mut Criterion) {
    let mut configs = SectionConfigs::new();
    let mut source = MemorySource::new();
    let mut sections = Vec::new();
    for n in 1..=12 {
        let id = format!("chapter_{}", n);
        configs.insert(id.clone(), SectionConfig::new(n * 20));
        source.insert(&id, (0..20).map(|_| create_test_page(40)));
        sections.push(id);
    }
    let pipeline = SegmentationPipeline::new(configs);

    c.bench_function("pipeline_12_chapters", |b| {
        b.iter(|| {
            let mut sink = MemorySink::new();
            pipeline.run(black_box(&sections), &source, &mut sink)
        });
    });
}

criterion_group!(benches, bench_normalize, bench_wrap, bench_toc, bench_pipeline);
criterion_main!(benches);
