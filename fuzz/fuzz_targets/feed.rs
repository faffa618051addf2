#![no_main]

use hll_estimator::{FieldFeed, HyperLogLog};
use libfuzzer_sys::fuzz_target;
use wyhash::WyHash;

fuzz_target!(|data: &[u8]| {
    let mut feed = FieldFeed::new(data, "remote_addr");
    let mut estimator = HyperLogLog::<WyHash>::default();
    for item in feed.by_ref().flatten() {
        assert!(!item.is_empty());
        estimator.add(&item);
    }
    let stats = feed.stats();
    assert!(stats.items + stats.skipped <= stats.records);
    assert!(estimator.estimate().is_finite());
});
