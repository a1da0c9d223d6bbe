//! Basic benchmarks for the `dynamic_array` crate.
#![allow(
    missing_docs,
    reason = "No need for API documentation in benchmark code"
)]

use std::hint::black_box;

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use dynamic_array::{DynamicArray, reserve};

criterion_group!(benches, entrypoint);
criterion_main!(benches);

type TestItem = usize;
const TEST_VALUE: TestItem = 1024;
const ITEM_COUNT: usize = 1000;

fn entrypoint(c: &mut Criterion) {
    let mut group = c.benchmark_group("da_basic");

    group.bench_function("build_empty", |b| {
        b.iter(|| drop(black_box(DynamicArray::<TestItem>::new())));
    });

    group.bench_function("push_back_from_empty", |b| {
        b.iter(|| {
            let mut array = DynamicArray::<TestItem>::new();

            for _ in 0..ITEM_COUNT {
                array.push_back(black_box(TEST_VALUE));
            }

            array
        });
    });

    group.bench_function("push_back_reserved", |b| {
        b.iter(|| {
            let mut array = DynamicArray::<TestItem>::with_reserve(reserve(ITEM_COUNT));

            for _ in 0..ITEM_COUNT {
                array.push_back(black_box(TEST_VALUE));
            }

            array
        });
    });

    group.bench_function("insert_front", |b| {
        b.iter_batched_ref(
            || DynamicArray::<TestItem>::with_len(ITEM_COUNT),
            |array| array.insert(0, black_box(TEST_VALUE)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("erase_front", |b| {
        b.iter_batched_ref(
            || DynamicArray::<TestItem>::with_len(ITEM_COUNT),
            |array| array.erase(black_box(0)),
            BatchSize::SmallInput,
        );
    });

    group.bench_function("clone", |b| {
        let array = DynamicArray::<TestItem>::with_len(ITEM_COUNT);

        b.iter(|| black_box(&array).clone());
    });

    group.finish();
}
