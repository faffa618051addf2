#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::hash::BuildHasherDefault;

use hll_estimator::HyperLogLog;
use hyperloglogplus::{HyperLogLog as HyperLogLogTrait, HyperLogLogPlus};
use tabled::{
    settings::{Settings, Style},
    Table, Tabled,
};
use wyhash::WyHash;

#[derive(Tabled)]
struct Record {
    cardinality: usize,
    hll_estimator: String,
    amadeus_streaming: String,
    probabilistic_collections: String,
    hyperloglog: String,
    hyperloglogplus: String,
}

fn measure_memory_usage<T>(
    cardinality: usize,
    create: impl Fn() -> T,
    insert: impl Fn(&mut T, &usize),
) -> String
where
    T: Sized,
{
    let _profiler = dhat::Profiler::builder().testing().build();
    let mut estimator = create();
    for i in 0..cardinality {
        insert(&mut estimator, &i);
    }
    let stats = dhat::HeapStats::get();
    format!(
        "{} / {} / {}",
        std::mem::size_of::<T>(),
        stats.total_bytes,
        stats.total_blocks
    )
}

// dhat allows a single profiler at a time, so all measurements live in one test.
#[test]
fn test_allocations() {
    // registers are allocated once at construction
    {
        let _profiler = dhat::Profiler::builder().testing().build();
        let estimator = HyperLogLog::<WyHash>::new(14).unwrap();
        let stats = dhat::HeapStats::get();
        assert_eq!(stats.total_blocks, 1);
        assert_eq!(stats.total_bytes, 1 << 14);
        drop(estimator);
    }

    // inserting and estimating never allocate
    {
        let mut estimator = HyperLogLog::<WyHash>::new(14).unwrap();
        let _profiler = dhat::Profiler::builder().testing().build();
        for i in 0..1_000_000usize {
            estimator.add(&i);
        }
        assert!(estimator.estimate() > 0.0);
        assert_eq!(estimator.register_count(), 1 << 14);
        let stats = dhat::HeapStats::get();
        assert_eq!(stats.total_blocks, 0);
        assert_eq!(stats.total_bytes, 0);
    }

    let results: Vec<Record> = std::iter::once(0)
        .chain((0..).map(|c| 1 << c))
        .take_while(|&c| c <= 1 << 16)
        .map(|cardinality| Record {
            cardinality,
            hll_estimator: measure_memory_usage(
                cardinality,
                || HyperLogLog::<WyHash>::new(12).unwrap(),
                |est, i| est.add(i),
            ),
            amadeus_streaming: measure_memory_usage(
                cardinality,
                || amadeus_streaming::HyperLogLog::new(0.01625),
                |est, i| est.push(i),
            ),
            probabilistic_collections: measure_memory_usage(
                cardinality,
                || probabilistic_collections::hyperloglog::HyperLogLog::<usize>::new(0.004),
                |est, i| est.insert(i),
            ),
            hyperloglog: measure_memory_usage(
                cardinality,
                || hyperloglog::HyperLogLog::new(0.004),
                |est, i| est.insert(i),
            ),
            hyperloglogplus: measure_memory_usage(
                cardinality,
                || {
                    HyperLogLogPlus::<usize, _>::new(12, BuildHasherDefault::<WyHash>::default())
                        .unwrap()
                },
                |est, i| est.insert(i),
            ),
        })
        .collect();

    let table_config = Settings::default().with(Style::markdown());
    let markdown = Table::new(results).with(table_config).to_string();
    println!("{}", markdown);
}
