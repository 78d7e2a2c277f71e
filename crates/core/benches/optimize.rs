use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use cribro_core::{Document, Optimizer, strip_noise};

/// Synthetic article with chrome, headings, and distinct paragraphs.
fn synthetic_page(paragraphs: usize) -> String {
    let mut body = String::from("<nav><a href=\"/\">Home</a><a href=\"/about\">About</a></nav>");
    for i in 0..paragraphs {
        if i % 8 == 0 {
            body.push_str(&format!("<h2>Section heading {i}</h2>"));
        }
        body.push_str(&format!(
            "<p>Paragraph {i} covers sampling station st{i}n, sediment cores, recovery depth, \
             and the catalog entries filed for each instrument deployment during the survey.</p>"
        ));
    }
    body.push_str("<footer>All rights reserved</footer>");
    format!("<html><head><title>Survey notes</title></head><body>{body}</body></html>")
}

fn bench_strip_noise(c: &mut Criterion) {
    let html = synthetic_page(100);

    c.bench_function("strip_noise", |b| b.iter(|| strip_noise(black_box(&html))));
}

fn bench_parse(c: &mut Criterion) {
    let small = synthetic_page(20);
    let medium = synthetic_page(100);
    let large = synthetic_page(400);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "20p"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "100p"), &medium, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "400p"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_full_optimize(c: &mut Criterion) {
    let optimizer = Optimizer::new();
    let small = synthetic_page(20);
    let medium = synthetic_page(100);
    let large = synthetic_page(400);

    let mut group = c.benchmark_group("optimize");

    group.bench_with_input(BenchmarkId::new("small", "20p"), &small, |b, html| {
        b.iter(|| optimizer.optimize(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("medium", "100p"), &medium, |b, html| {
        b.iter(|| optimizer.optimize(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "400p"), &large, |b, html| {
        b.iter(|| optimizer.optimize(black_box(html)))
    });

    group.finish();
}

criterion_group!(benches, bench_strip_noise, bench_parse, bench_full_optimize);
criterion_main!(benches);
