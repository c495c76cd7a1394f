//! Benchmarks for the property update loop.
//!
//! Run with: cargo bench -p propbind-core --bench update_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use propbind_core::{BindingOrder, InternalProperty, Observable, ObservableList, Property};
use std::hint::black_box;
use std::rc::Rc;

/// A root property with `fanout` guests bound under `order`.
fn make_star(
    fanout: usize,
    order: BindingOrder,
) -> (Rc<InternalProperty<u64>>, Vec<Rc<InternalProperty<u64>>>) {
    let root = InternalProperty::new(0u64);
    let guests: Vec<_> = (0..fanout).map(|_| InternalProperty::new(0u64)).collect();
    for guest in &guests {
        root.bind(guest.clone(), order).unwrap();
    }
    (root, guests)
}

fn bench_quiet_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update/quiet");

    for fanout in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(fanout as u64));
        let (root, _guests) = make_star(fanout, BindingOrder::BidirectionalDominant);
        group.bench_with_input(BenchmarkId::new("bindings", fanout), &(), |b, _| {
            b.iter(|| black_box(root.update()))
        });
    }

    group.finish();
}

fn bench_root_edit(c: &mut Criterion) {
    let mut group = c.benchmark_group("update/root_edit");

    for fanout in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(fanout as u64));
        let (root, _guests) = make_star(fanout, BindingOrder::Dominant);
        let mut tick = 0u64;
        group.bench_with_input(BenchmarkId::new("bindings", fanout), &(), |b, _| {
            b.iter(|| {
                tick += 1;
                root.set(tick).unwrap();
                black_box(root.update())
            })
        });
    }

    group.finish();
}

fn bench_listeners(c: &mut Criterion) {
    let mut group = c.benchmark_group("update/listeners");

    for count in [1usize, 16, 256] {
        group.throughput(Throughput::Elements(count as u64));
        let prop = InternalProperty::new(0u64);
        for _ in 0..count {
            prop.on_change(|_, _, new| {
                black_box(*new);
            });
        }
        let mut tick = 0u64;
        group.bench_with_input(BenchmarkId::new("notify", count), &(), |b, _| {
            b.iter(|| {
                tick += 1;
                prop.set(tick).unwrap();
                black_box(prop.update())
            })
        });
    }

    group.finish();
}

fn bench_list_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("collections/list_replace");

    for len in [16usize, 256, 4096] {
        group.throughput(Throughput::Elements(len as u64));
        let list: ObservableList<u32> = (0..len as u32).collect();
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("replace_all", len), &(), |b, _| {
            b.iter(|| {
                flip = !flip;
                let offset = u32::from(flip);
                list.replace_all((0..len as u32).map(|v| v + offset));
                black_box(list.update())
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_quiet_update,
    bench_root_edit,
    bench_listeners,
    bench_list_replace
);
criterion_main!(benches);
