#![no_main]

use libfuzzer_sys::fuzz_target;
use logcount::CardinalityEstimator;

fuzz_target!(|data: &[u8]| {
    if let Ok(mut estimator) = CardinalityEstimator::<wyhash::WyHash>::deserialize(data) {
        assert_eq!(estimator.serialize(), data);
        estimator.add(b"1");
        assert!(estimator.estimate() > 0.0);
    }
    if let Ok(mut estimator) = serde_json::from_slice::<CardinalityEstimator>(data) {
        estimator.add(b"1");
        assert!(estimator.estimate() > 0.0);
    }
});
