#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use logcount::CardinalityEstimator;

/// Number of blocks and bytes allocated while running `f`
fn measure_allocations<T>(f: impl FnOnce() -> T) -> (T, u64, u64) {
    let before = dhat::HeapStats::get();
    let result = f();
    let after = dhat::HeapStats::get();
    (
        result,
        after.total_blocks - before.total_blocks,
        after.total_bytes - before.total_bytes,
    )
}

#[test]
fn test_allocations() {
    let _profiler = dhat::Profiler::builder().testing().build();

    for p in [4u8, 10, 12, 16] {
        let m = 1u64 << p;

        let (mut estimator, blocks, bytes) =
            measure_allocations(|| CardinalityEstimator::<wyhash::WyHash>::new(p).unwrap());
        dhat::assert_eq!(blocks, 1);
        dhat::assert_eq!(bytes, m);

        let (_, blocks, _) = measure_allocations(|| {
            for i in 0u64..10_000 {
                estimator.add(&i.to_le_bytes());
                estimator.insert(&i);
            }
            estimator.estimate()
        });
        dhat::assert_eq!(blocks, 0);

        let (merged, blocks, bytes) = measure_allocations(|| estimator.merge(&estimator).unwrap());
        dhat::assert_eq!(blocks, 1);
        dhat::assert_eq!(bytes, m);
        dhat::assert!(merged == estimator);

        let (data, blocks, bytes) = measure_allocations(|| estimator.serialize());
        dhat::assert_eq!(blocks, 1);
        dhat::assert_eq!(bytes, m + 1);
        dhat::assert_eq!(data.len() as u64, m + 1);
    }
}
