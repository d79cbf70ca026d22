//! Overload resolution benchmarks.
//!
//! Measures resolution latency against catalogs with growing overload sets.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use qtype_catalog::{Catalog, Fixity, ParamDecl, ParamQualifier, Placeholder, SignatureDecl};
use qtype_resolver::{CallSite, Resolver};

/// `n` integer widths chained by implicit casts, each with its own `+`.
fn chain_catalog(n: usize) -> Catalog {
    let mut builder = Catalog::builder()
        .placeholder("anytype", Placeholder::AnyType)
        .abstract_type("std::anyint", &[])
        .scalar("std::str", &[]);
    for i in 0..n {
        let name = format!("std::int{i}");
        builder = builder.scalar(&name, &["std::anyint"]);
        if i > 0 {
            builder = builder.implicit_cast(&format!("std::int{}", i - 1), &name);
        }
        builder = builder.signature(
            SignatureDecl::infix("std::+", name.as_str())
                .arg("l", &name)
                .arg("r", &name),
        );
    }
    builder
        .signature(
            SignatureDecl::function("std::count", "std::int0")
                .param(ParamDecl::new("s", "anytype").with_qualifier(ParamQualifier::SetOf)),
        )
        .build()
        .unwrap()
}

fn bench_exact_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_exact");

    for n in [4, 16, 64] {
        let catalog = chain_catalog(n);
        let last = catalog.type_id(&format!("std::int{}", n - 1)).unwrap();
        let call = CallSite::new([last, last]);
        group.bench_with_input(BenchmarkId::new("overloads", n), &call, |b, call| {
            let resolver = Resolver::new(&catalog);
            b.iter(|| black_box(resolver.resolve("std::+", Fixity::Infix, black_box(call))));
        });
    }

    group.finish();
}

fn bench_implicit_cast(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve_cast");

    for n in [4, 16, 64] {
        let catalog = chain_catalog(n);
        let first = catalog.type_id("std::int0").unwrap();
        let last = catalog.type_id(&format!("std::int{}", n - 1)).unwrap();
        let call = CallSite::new([first, last]);
        group.bench_with_input(BenchmarkId::new("overloads", n), &call, |b, call| {
            let resolver = Resolver::new(&catalog);
            b.iter(|| black_box(resolver.resolve("std::+", Fixity::Infix, black_box(call))));
        });
    }

    group.finish();
}

fn bench_generic(c: &mut Criterion) {
    let catalog = chain_catalog(16);
    let str_ = catalog.type_id("std::str").unwrap();
    let call = CallSite::new([str_]);
    let resolver = Resolver::new(&catalog);

    c.bench_function("resolve_generic", |b| {
        b.iter(|| black_box(resolver.resolve("std::count", Fixity::Function, black_box(&call))));
    });
}

criterion_group!(
    resolve_benches,
    bench_exact_match,
    bench_implicit_cast,
    bench_generic
);
criterion_main!(resolve_benches);
