/*!
# Filter Benchmarks

Parsing and compiling filter trees, without a database.

## Usage

```bash
cargo bench --bench filter_benchmarks

# Run specific benchmark group
cargo bench --bench filter_benchmarks -- "Filter Compilation"

# Quick benchmark with fewer samples
cargo bench --bench filter_benchmarks -- --quick
```

HTML reports are generated in `target/criterion/report/index.html`.
*/

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use querycrate::{Filter, FilterGroup, ListQuery, Logic, compile_filter_group};
use sea_orm::{DatabaseBackend, QueryTrait, entity::prelude::*, sea_query::SqliteQueryBuilder};
use std::hint::black_box;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "benchmark_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub age: i32,
    pub joined_on: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

const NESTED_FILTER: &str = r#"{
    "logic": "and",
    "filters": [
        {"field": "age", "operator": "gt", "value": 21},
        {"field": "joined_on", "operator": "between", "value": ["2024-01-01", "2024-12-31"]}
    ],
    "groups": [{
        "logic": "or",
        "filters": [
            {"field": "first_name", "operator": "like", "value": "User"},
            {"field": "id", "operator": "in", "value": [1, 2, 3, 4, 5]}
        ],
        "groups": [{
            "logic": "and",
            "filters": [{"field": "age", "operator": "lte", "value": 65}]
        }]
    }]
}"#;

/// A tree `depth` groups deep, each level alternating logic with two leaves.
fn deep_tree(depth: usize) -> FilterGroup {
    (0..depth).fold(FilterGroup::default(), |inner, level| {
        let logic = if level % 2 == 0 { Logic::And } else { Logic::Or };
        FilterGroup::new(logic)
            .with_filter(Filter::new("age", "gte", 18))
            .with_filter(Filter::new("joined_on", "lt", "2024-06-01"))
            .with_group(inner)
    })
}

fn filter_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("Filter Compilation");

    group.bench_function("parse_nested", |b| {
        b.iter(|| FilterGroup::parse(black_box(NESTED_FILTER)));
    });

    let parsed = FilterGroup::parse(NESTED_FILTER).expect("benchmark filter parses");
    group.bench_function("compile_nested", |b| {
        b.iter(|| compile_filter_group(black_box(&parsed), DatabaseBackend::Sqlite));
    });

    for depth in [1, 4, 16] {
        let tree = deep_tree(depth);
        group.bench_with_input(BenchmarkId::new("compile_depth", depth), &tree, |b, tree| {
            b.iter(|| compile_filter_group(black_box(tree), DatabaseBackend::Postgres));
        });
    }

    group.finish();

    let mut group = c.benchmark_group("List Query");

    group.bench_function("from_params_and_render", |b| {
        b.iter(|| {
            let list = ListQuery::from_params_with_allowed_fields(
                black_box(NESTED_FILTER),
                black_box(r#"[{"field":"age","dir":"desc"},{"field":"first_name"}]"#),
                2,
                25,
                &["id", "first_name", "age", "joined_on"],
                &["first_name", "age"],
            )
            .expect("benchmark params are valid");
            list.apply(Entity::find(), DatabaseBackend::Sqlite)
                .into_query()
                .to_string(SqliteQueryBuilder)
        });
    });

    group.finish();
}

criterion_group!(benches, filter_benchmarks);
criterion_main!(benches);
