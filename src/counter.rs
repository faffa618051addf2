//! Distinct counters used to compare the HyperLogLog estimate against an exact count
//! computed over the same item sequence.

use std::time::{Duration, Instant};

use enum_dispatch::enum_dispatch;
use hashbrown::HashSet;

use crate::error::Result;
use crate::estimator::HyperLogLog;

/// Distinct counters supported by `compare`
#[derive(Debug)]
#[enum_dispatch]
pub enum Counter {
    Exact(ExactCounter),
    Approx(HyperLogLog),
}

/// Trait implemented by every distinct counter.
#[enum_dispatch(Counter)]
pub trait DistinctCounter {
    fn add_item(&mut self, item: &str);
    fn count(&self) -> f64;
    fn name(&self) -> &'static str;
}

impl Counter {
    /// Exact counter backed by a hash set
    pub fn exact() -> Self {
        ExactCounter::default().into()
    }

    /// HyperLogLog counter with `2^precision` registers
    pub fn approx(precision: u8) -> Result<Self> {
        let estimator: HyperLogLog = HyperLogLog::new(precision)?;
        Ok(estimator.into())
    }
}

/// Exact distinct counter, memory grows with the number of distinct items
#[derive(Debug, Default)]
pub struct ExactCounter {
    items: HashSet<String>,
}

impl DistinctCounter for ExactCounter {
    #[inline]
    fn add_item(&mut self, item: &str) {
        if !self.items.contains(item) {
            self.items.insert(item.to_owned());
        }
    }

    fn count(&self) -> f64 {
        self.items.len() as f64
    }

    fn name(&self) -> &'static str {
        "exact"
    }
}

impl DistinctCounter for HyperLogLog {
    #[inline]
    fn add_item(&mut self, item: &str) {
        self.add(item);
    }

    fn count(&self) -> f64 {
        self.estimate()
    }

    fn name(&self) -> &'static str {
        "hyperloglog"
    }
}

/// Result of running one counter over the item sequence
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
    pub name: &'static str,
    pub count: f64,
    pub elapsed: Duration,
}

/// Feed the same `items` to every counter and measure count and elapsed time of each
pub fn compare<S: AsRef<str>>(items: &[S], counters: Vec<Counter>) -> Vec<Measurement> {
    counters
        .into_iter()
        .map(|mut counter| {
            let start = Instant::now();
            for item in items {
                counter.add_item(item.as_ref());
            }
            let count = counter.count();
            Measurement {
                name: counter.name(),
                count,
                elapsed: start.elapsed(),
            }
        })
        .collect()
}
