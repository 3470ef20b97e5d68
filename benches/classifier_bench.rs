//! Performance benchmarks for body classification and module checking

use criterion::{criterion_group, criterion_main, Criterion};
use puritycheck::diagnostics::NullSink;
use puritycheck::driver::Checker;
use puritycheck::ir::{Expr, FunctionDecl, Module};
use puritycheck::testkit::{
    block, call, const_int, declare, function, get, local_var, member_fn, module_of, pure_fn, ret,
    set, top_level_fn,
};
use puritycheck::{BodyClassifier, ClassificationTable, PurityConfig, PurityLevel};
use std::hint::black_box;

/// Body with `statements` statements mixing every construct kind
fn create_body(id: &str, statements: usize) -> Expr {
    let local = local_var("acc", id, true);
    let captured = local_var("shared", "bench.main", true);
    let mut body = vec![declare(&local, Some(const_int(0)))];
    for i in 0..statements {
        body.push(match i % 5 {
            0 => set(&local, call(pure_fn("square"), None, vec![const_int(i as i64)])),
            1 => get(&captured),
            2 => call(member_fn("plus", "kotlin.Int"), Some(get(&local)), vec![const_int(1)]),
            3 => call(top_level_fn("println"), None, vec![get(&local)]),
            _ => set(&captured, get(&local)),
        });
    }
    body.push(ret(get(&local)));
    block(body)
}

fn create_function(index: usize, statements: usize) -> FunctionDecl {
    let id = format!("bench.main.f{}", index);
    let body = create_body(&id, statements);
    function(&id).pure().body(body).build()
}

fn create_module(functions: usize) -> Module {
    module_of(
        "Bench.kt",
        "",
        (0..functions).map(|i| create_function(i, 50)).collect(),
    )
}

fn bench_classify_function(c: &mut Criterion) {
    let table = ClassificationTable::new();
    let classifier = BodyClassifier::new(&table);
    let decl = create_function(0, 500);

    c.bench_function("classify_500_statements", |b| {
        b.iter(|| classifier.classify(black_box(&decl), PurityLevel::Pure))
    });
}

fn bench_check_module(c: &mut Criterion) {
    let module = create_module(1000);
    let mut group = c.benchmark_group("check_module_1000_functions");

    for parallel in [false, true] {
        let config = PurityConfig {
            parallel,
            ..PurityConfig::default()
        };
        let checker = Checker::new(&config);
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter(|| checker.check_module(black_box(&module), &NullSink))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_classify_function, bench_check_module);
criterion_main!(benches);
