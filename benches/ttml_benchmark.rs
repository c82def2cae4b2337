use std::hint::black_box;
use std::time::Duration;

use criterion::{Criterion, criterion_group, criterion_main};
use ttml_subtitles::{TtmlGenerationOptions, generate_ttml, parse_ttml};

const SAMPLE_TTML: &str = include_str!("../tests/test_data/example-in.ttml");

fn benchmark_parse_ttml(c: &mut Criterion) {
    let mut group = c.benchmark_group("TTML Parsing");

    group.measurement_time(Duration::from_secs(10));
    group.sample_size(200);

    group.bench_function("parse_frame_based_ttml", |b| {
        b.iter(|| {
            let subtitles = parse_ttml(black_box(SAMPLE_TTML.as_bytes())).expect("样本解析失败");

            black_box(subtitles);
        });
    });

    group.finish();
}

fn benchmark_generate_ttml(c: &mut Criterion) {
    let mut group = c.benchmark_group("TTML Generation");

    group.measurement_time(Duration::from_secs(10));

    let subtitles = parse_ttml(SAMPLE_TTML.as_bytes()).expect("样本解析失败");
    let options = TtmlGenerationOptions::default();

    group.bench_function("generate_formatted_ttml", |b| {
        b.iter(|| {
            let bytes =
                generate_ttml(black_box(&subtitles), black_box(&options)).expect("生成失败");

            black_box(bytes);
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_parse_ttml, benchmark_generate_ttml);

criterion_main!(benches);
