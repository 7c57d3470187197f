use std::hint::black_box;

use criterion::{measurement::Measurement, BenchmarkGroup, BenchmarkId, Criterion, Throughput};
use ordtree::Map;

use crate::random_map;

/// The key the bound walks start from, roughly the middle of the key space.
const PIVOT: u16 = u16::MAX / 2;

#[derive(Debug)]
struct BenchName {
    bench_name: &'static str,
    n_values: usize,
}

impl From<BenchName> for BenchmarkId {
    fn from(v: BenchName) -> Self {
        Self::new(format!("{}/n_values", v.bench_name), v.n_values)
    }
}

pub(super) fn bench(c: &mut Criterion) {
    let mut g = c.benchmark_group("iter");

    for n_values in [1, 100, 1_000, 10_000] {
        bench_param(&mut g, n_values)
    }
}

fn bench_param<M>(g: &mut BenchmarkGroup<'_, M>, n_values: usize)
where
    M: Measurement,
{
    let (t, _) = random_map(n_values);

    bench_iter(n_values, g, &t);
    bench_positions(n_values, g, &t);
    bench_lower_bound(n_values, g, &t);
    bench_upper_bound(n_values, g, &t);
    bench_find(n_values, g, &t);
}

fn bench_iter<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &Map<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "iter",
    };

    g.throughput(Throughput::Elements(n_values as _));
    // Values per second
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            let iter = t.iter();
            for v in iter {
                black_box(v);
            }
        })
    });
}

/// Walk the map backwards by stepping a position from the end.
fn bench_positions<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &Map<u16, usize>)
where
    M: Measurement,
{
    let bench_name = BenchName {
        n_values,
        bench_name: "prev",
    };

    g.throughput(Throughput::Elements(n_values as _));
    g.bench_function(BenchmarkId::from(bench_name), |b| {
        b.iter(|| {
            let mut pos = t.end();
            while let Ok(p) = t.prev(pos) {
                if p.is_end() {
                    break;
                }
                black_box(t.pair_at(p).ok());
                pos = p;
            }
        })
    });
}

macro_rules! bound_bench {
    (
        $name:ident
    ) => {
        paste::paste! {
            /// Walk from the position returned by the named lookup of
            /// [`PIVOT`] to the end of the map.
            fn [<bench_ $name>]<M>(n_values: usize, g: &mut BenchmarkGroup<'_, M>, t: &Map<u16, usize>)
            where
                M: Measurement,
            {
                let bench_name = BenchName {
                    n_values,
                    bench_name: stringify!($name),
                };

                g.throughput(Throughput::Elements(n_values as _));
                // Values per second
                g.bench_function(BenchmarkId::from(bench_name), |b| {
                    b.iter(|| {
                        let from = t.$name(&PIVOT);
                        if let Ok(iter) = t.span(from, t.end()) {
                            for v in iter {
                                black_box(v);
                            }
                        }
                    })
                });
            }
        }
    }
}

bound_bench!(lower_bound);
bound_bench!(upper_bound);
bound_bench!(find);
