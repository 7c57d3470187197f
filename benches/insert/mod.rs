use criterion::{
    measurement::Measurement, BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput,
};
use ordtree::Map;

use crate::{random_map, Lfsr};

#[derive(Debug, Clone, Copy)]
struct BenchName {
    order: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.order), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_random(&mut g, n_values);
        bench_sorted(&mut g, n_values);
        bench_erase(&mut g, n_values);
    }
}

/// Measure the time needed to insert `n_values` number of randomly generated
/// keys into an empty map.
fn bench_random<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let bench_name = BenchName {
        order: "random",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _)); // Keys inserted per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || (Map::new(), Lfsr::default()),
            |(mut t, mut rand)| {
                for _i in 0..n_values {
                    t.insert(rand.next(), 42_usize);
                }
                t
            },
            BatchSize::PerIteration,
        );
    });
}

/// Insert `n_values` ascending keys, producing a tree that degenerates into
/// a chain.
fn bench_sorted<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let bench_name = BenchName {
        order: "sorted",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            Map::new,
            |mut t| {
                for i in 0..n_values {
                    t.insert(i, 42_usize);
                }
                t
            },
            BatchSize::PerIteration,
        );
    });
}

/// Erase every element of a map of `n_values` random keys through the
/// position of its first element.
fn bench_erase<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let (t, _) = random_map(n_values);

    let bench_name = BenchName {
        order: "erase_begin",
        n_values,
    };
    g.throughput(Throughput::Elements(n_values as _)); // Keys erased per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter_batched(
            || t.clone(),
            |mut t| {
                while !t.is_empty() {
                    let pos = t.begin();
                    assert!(t.erase(pos).unwrap().is_some());
                }
                t
            },
            BatchSize::PerIteration,
        );
    });
}
