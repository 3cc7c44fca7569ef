use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use serde::{Deserialize, Serialize};
use serde_loose::{from_json_str, from_toml_str, normalize_json, parse_json, parse_toml, Interop, LineBreak};

#[derive(Serialize, Deserialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: u32) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            sku: format!("SKU{}", i),
            name: format!("Product {}", i),
            price: 9.99 + f64::from(i),
            quantity: i,
        })
        .collect()
}

/// Same data as `products`, written the loose way: bare keys, single quotes,
/// comments and trailing commas.
fn loose_products(size: u32) -> String {
    let mut out = String::from("[\n");
    for i in 0..size {
        out.push_str(&format!(
            "  {{ sku: 'SKU{i}', name: 'Product {i}', price: {price}, quantity: {i}, }}, // #{i}\n",
            price = 9.99 + f64::from(i),
        ));
    }
    out.push(']');
    out
}

fn toml_products(size: u32) -> String {
    let mut out = String::from("# inventory\n");
    for i in 0..size {
        out.push_str(&format!(
            "[[products]]\nsku = \"SKU{i}\"\nname = 'Product {i}'\nprice = {price}\nquantity = {i}\n\n",
            price = 9.99 + f64::from(i),
        ));
    }
    out
}

fn benchmark_parse_strict_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_strict_json");

    for size in [10, 100, 500].iter() {
        let json = serde_json::to_string(&products(*size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| parse_json(black_box(json), LineBreak::Lf, Interop::None))
        });
    }
    group.finish();
}

fn benchmark_parse_loose_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_loose_json");

    for size in [10, 100, 500].iter() {
        let json = loose_products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| parse_json(black_box(json), LineBreak::Lf, Interop::None))
        });
    }
    group.finish();
}

fn benchmark_parse_toml_tables(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_toml_table_arrays");

    for size in [10, 100, 500].iter() {
        let toml = toml_products(*size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &toml, |b, toml| {
            b.iter(|| parse_toml(black_box(toml), LineBreak::Lf, Interop::None))
        });
    }
    group.finish();
}

fn benchmark_typed(c: &mut Criterion) {
    #[derive(Deserialize)]
    struct Inventory {
        #[allow(dead_code)]
        products: Vec<Product>,
    }

    let json = loose_products(100);
    let toml = toml_products(100);

    c.bench_function("typed_loose_json_100", |b| {
        b.iter(|| from_json_str::<Vec<Product>>(black_box(&json)))
    });
    c.bench_function("typed_toml_100", |b| {
        b.iter(|| from_toml_str::<Inventory>(black_box(&toml)))
    });
}

fn benchmark_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("literals");

    let numbers = format!(
        "[{}]",
        (0..100)
            .map(|i| format!("0x{:x}, {}s64, {}.5e-3, 0x1.8p{}", i, i, i, i % 8))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let dates = format!(
        "[{}]",
        (0..100)
            .map(|i| format!("2024-01-{:02}T12:{:02}:00.123+09:00", i % 28 + 1, i % 60))
            .collect::<Vec<_>>()
            .join(", ")
    );
    let strings = format!(
        "[{}]",
        (0..100)
            .map(|i| format!(r#""line {}\né\x41" 'tail'"#, i))
            .collect::<Vec<_>>()
            .join(", ")
    );

    group.bench_function("numbers", |b| {
        b.iter(|| parse_json(black_box(&numbers), LineBreak::Lf, Interop::None))
    });
    group.bench_function("dates", |b| {
        b.iter(|| parse_json(black_box(&dates), LineBreak::Lf, Interop::None))
    });
    group.bench_function("strings", |b| {
        b.iter(|| parse_json(black_box(&strings), LineBreak::Lf, Interop::None))
    });
    group.finish();
}

fn benchmark_wide_objects(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_wide_object");
    group.sample_size(20);

    for size in [5_000, 10_000, 20_000].iter() {
        let json = format!(
            "{{{}}}",
            (0..*size)
                .map(|i| format!("k{i}: {{v: {i}}}"))
                .collect::<Vec<_>>()
                .join(", ")
        );
        group.bench_with_input(BenchmarkId::from_parameter(size), &json, |b, json| {
            b.iter(|| parse_json(black_box(json), LineBreak::Lf, Interop::None))
        });
    }
    group.finish();
}

fn benchmark_normalize(c: &mut Criterion) {
    let json = loose_products(100);

    c.bench_function("normalize_loose_json_100", |b| {
        b.iter(|| normalize_json(black_box(&json), false))
    });
}

criterion_group!(
    benches,
    benchmark_parse_strict_json,
    benchmark_parse_loose_json,
    benchmark_parse_toml_tables,
    benchmark_typed,
    benchmark_literals,
    benchmark_wide_objects,
    benchmark_normalize
);
criterion_main!(benches);
