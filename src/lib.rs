//! `hll-estimator` is a Rust crate designed to estimate the number of distinct elements in a stream or dataset
//! using a fixed amount of memory.
//!
//! The core is a HyperLogLog estimator with `2^precision` byte-sized registers and linear counting for small
//! cardinalities. Around it the crate provides a newline-delimited JSON feeder and an exact counter used to
//! compare the estimate against the true distinct count.
//!
//! ```
//! use hll_estimator::HyperLogLog;
//!
//! let mut estimator = HyperLogLog::<wyhash::WyHash>::new(14).unwrap();
//! for addr in ["10.0.0.1", "10.0.0.2", "10.0.0.1"] {
//!     estimator.add(addr);
//! }
//! assert!((estimator.estimate() - 2.0).abs() < 0.1);
//! ```
pub mod counter;
pub mod error;
pub mod estimator;
pub mod feed;

pub use counter::{compare, Counter, DistinctCounter, ExactCounter, Measurement};
pub use error::{EstimatorError, Result};
pub use estimator::{HyperLogLog, DEFAULT_PRECISION, MAX_PRECISION, MIN_PRECISION};
pub use feed::{FeedStats, FieldFeed};
