use std::sync::Arc;

use burn_sentiment::pipelines::sentiment_analysis::{codec::normalize, Codec, Vocabulary};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn vocabulary() -> Vocabulary {
    Vocabulary::from_word_index((1..20_000).map(|rank| (format!("word{rank}"), rank)))
}

fn encode(c: &mut Criterion) {
    let codec = Codec::new(Arc::new(vocabulary()));

    let short = "This movie was (honestly) great, word12 and word7: \"superb\".";
    let long = (1..400)
        .map(|rank| format!("Word{rank}"))
        .collect::<Vec<_>>()
        .join(" ");

    c.bench_function("normalize", |b| b.iter(|| normalize(black_box(short))));
    c.bench_function("encode short review", |b| {
        b.iter(|| codec.encode_line(black_box(short)))
    });
    c.bench_function("encode long review", |b| {
        b.iter(|| codec.encode_line(black_box(&long)))
    });
}

fn build(c: &mut Criterion) {
    c.bench_function("build vocabulary", |b| b.iter(vocabulary));
}

criterion_group!(benches, encode, build);
criterion_main!(benches);
