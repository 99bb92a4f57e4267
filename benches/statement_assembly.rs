use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sqlqb::{JoinCondition, QueryBuilder};

/// Build a query with `n` projections, `n` bound conditions and a join:
/// SELECT col0, ... FROM t INNER JOIN u USING (id) WHERE (col0 = %s) AND ...
fn build_query(n: usize) -> QueryBuilder {
    let mut qb = QueryBuilder::new();
    qb.relation("t").unwrap();
    qb.join("u", JoinCondition::using("id")).unwrap();
    for i in 0..n {
        qb.project([format!("col{i}")]);
        qb.and_bind(&format!("col{i} = %s"), i as i64).unwrap();
    }
    qb
}

fn bench_statement(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_assembly/statement");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_query(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.statement().unwrap()));
        });
    }

    group.finish();
}

fn bench_parameters(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_assembly/parameters");

    for n in [1, 5, 10, 50, 100] {
        let qb = build_query(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &qb, |b, qb| {
            b.iter(|| black_box(qb.parameters()));
        });
    }

    group.finish();
}

fn bench_build_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("statement_assembly/build_and_render");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let built = build_query(n).build().unwrap();
                black_box(built.into_parts());
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_statement,
    bench_parameters,
    bench_build_and_render
);
criterion_main!(benches);
