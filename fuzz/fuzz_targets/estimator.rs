#![no_main]

use hll_estimator::{HyperLogLog, MAX_PRECISION, MIN_PRECISION};
use libfuzzer_sys::fuzz_target;
use wyhash::{wyhash, WyHash};

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let precision = MIN_PRECISION + data[0] % (MAX_PRECISION - MIN_PRECISION + 1);
    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut estimator1 = HyperLogLog::<WyHash>::new(precision).unwrap();
    for chunk in first_half.chunks(4) {
        let before = estimator1.registers().to_vec();
        estimator1.add(&chunk);
        assert!(estimator1
            .registers()
            .iter()
            .zip(before.iter())
            .all(|(now, before)| now >= before));
        assert!(estimator1.estimate() > 0.0);
    }

    let mut estimator2 = HyperLogLog::<WyHash>::new(precision).unwrap();
    for chunk in second_half.chunks(4) {
        estimator2.add(&chunk);
        assert!(estimator2.estimate().is_finite());
    }

    estimator1.merge(&estimator2).unwrap();
    assert_eq!(estimator1.register_count(), 1 << precision);
    assert!(estimator1.estimate().is_finite());
});
