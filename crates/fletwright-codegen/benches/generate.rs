//! Generation benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fletwright_codegen::{generate, generate_from_json};
use fletwright_core::{Element, ElementType};
use serde_json::json;

fn layout(count: usize) -> Vec<Element> {
    (0..count)
        .map(|i| {
            let element_type = ElementType::KNOWN[i % ElementType::KNOWN.len()];
            Element::with_defaults(format!("el-{}", i), element_type)
                .with_position((i * 12) as f64, (i * 30) as f64)
        })
        .collect()
}

fn generate_small(c: &mut Criterion) {
    let elements = layout(12);
    c.bench_function("generate_small", |b| b.iter(|| generate(black_box(&elements))));
}

fn generate_large(c: &mut Criterion) {
    let elements = layout(500);
    c.bench_function("generate_large", |b| b.iter(|| generate(black_box(&elements))));
}

fn generate_json_document(c: &mut Criterion) {
    let document = json!([
        {"id": "title", "type": "text", "content": "Sign up", "x": 20, "y": 20, "styles": {"fontSize": 24, "fontWeight": "bold"}},
        {"id": "agree", "type": "checkbox", "content": "I agree", "x": 20, "y": 80, "checked": true},
        {"id": "upload", "type": "filepicker", "x": 20, "y": 130, "allowedExtensions": "png, jpg"},
        {"id": "submit", "type": "button", "content": "Submit", "x": 20, "y": 190}
    ]);
    c.bench_function("generate_json_document", |b| {
        b.iter(|| generate_from_json(black_box(&document)))
    });
}

criterion_group!(benches, generate_small, generate_large, generate_json_document);
criterion_main!(benches);
