use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use growvec::GrowVec;

fn bench_sequential_append(c: &mut Criterion) {
    let mut group = c.benchmark_group("sequential_append");

    for size in [10, 100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("lazy", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::<u64>::empty();
                for i in 0..size as u64 {
                    vec.append(black_box(i)).unwrap();
                }
                black_box(vec.len())
            });
        });
        group.bench_with_input(BenchmarkId::new("presized", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::<u64>::with_capacity(size).unwrap();
                for i in 0..size as u64 {
                    vec.append(black_box(i)).unwrap();
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_prepend(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepend");

    for size in [10, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("u64", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::<u64>::empty();
                for i in 0..size as u64 {
                    vec.prepend(black_box(i)).unwrap();
                }
                black_box(vec.len())
            });
        });
    }
    group.finish();
}

fn bench_random_access(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_access");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("at", size), size, |b, &size| {
            let mut vec = GrowVec::<u64>::empty();
            for i in 0..size as u64 {
                vec.append(i).unwrap();
            }

            b.iter(|| {
                for i in 0..size {
                    black_box(vec.at(i));
                }
            });
        });
    }
    group.finish();
}

fn bench_erase_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_front");

    for size in [100, 1000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("drain", size), size, |b, &size| {
            b.iter(|| {
                let mut vec = GrowVec::<u32>::with_capacity(size).unwrap();
                for i in 0..size as u32 {
                    vec.append(i).unwrap();
                }
                while !vec.is_empty() {
                    vec.erase(0);
                }
                black_box(vec.capacity())
            });
        });
    }
    group.finish();
}

fn bench_iterator_performance(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterator");

    for size in [100, 1000, 10_000].iter() {
        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::new("sum", size), size, |b, &size| {
            let mut vec = GrowVec::<u64>::empty();
            for i in 0..size as u64 {
                vec.append(i).unwrap();
            }

            b.iter(|| black_box(vec.iter().sum::<u64>()));
        });
    }
    group.finish();
}

fn bench_shrink_to_fit(c: &mut Criterion) {
    c.bench_function("shrink_to_fit_half_full", |b| {
        b.iter(|| {
            let mut vec = GrowVec::<u64>::with_capacity(2048).unwrap();
            for i in 0..1024 {
                vec.append(i).unwrap();
            }
            vec.shrink_to_fit().unwrap();
            black_box(vec.capacity())
        });
    });
}

criterion_group!(
    benches,
    bench_sequential_append,
    bench_prepend,
    bench_random_access,
    bench_erase_front,
    bench_iterator_performance,
    bench_shrink_to_fit
);
criterion_main!(benches);
