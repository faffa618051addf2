//! HyperLogLog estimator allows to estimate number of distinct elements
//! in the stream or dataset and is defined by the runtime `precision` parameter:
//! - `precision`: number of low hash bits used to select one of `M = 2^precision`
//!   registers, in `[MIN_PRECISION..=MAX_PRECISION]` range.
//!
//! # Data-structure design rationale
//!
//! ## Fixed memory footprint
//! Registers are allocated once at construction as a boxed `u8` slice of exactly `M`
//! elements. Inserting never allocates and never resizes the register array.
//!
//! For `precision = 14` the estimator uses 16384 bytes of registers regardless of
//! how many items were inserted.
//!
//! ## Accuracy
//! - For small cardinality range (raw estimate `<= 2.5 * M` with empty registers left)
//!   linear counting over the number of zero registers is used.
//! - For everything else the raw HyperLogLog harmonic mean estimate is returned.
//!   - Expected error:
//!     precision = 10: 1.04 / sqrt(2^10) = 3.25%
//!     precision = 12: 1.04 / sqrt(2^12) = 1.62%
//!     precision = 14: 1.04 / sqrt(2^14) = 0.81%
//!     precision = 18: 1.04 / sqrt(2^18) = 0.20%
//!
//! Original HyperLogLog paper:
//! https://algo.inria.fr/flajolet/Publications/FlFuGaMe07.pdf
//!
//! # Hash layout
//! Every item is hashed into a `u64`:
//! - 0..precision bits     - register index
//! - precision..64 bits    - remainder, its leading zeros plus one give the rank
//!
//! A zero remainder has no set bit within its `64 - precision` bits and is given
//! the maximum rank `64 - precision`.

use std::fmt::{Debug, Formatter};
use std::hash::{BuildHasher, BuildHasherDefault, Hash, Hasher};
use std::mem::{size_of, size_of_val};

use wyhash::WyHash;

use crate::error::{EstimatorError, Result};

/// Smallest supported number of register index bits
pub const MIN_PRECISION: u8 = 4;
/// Largest supported number of register index bits
pub const MAX_PRECISION: u8 = 18;
/// Precision used by `HyperLogLog::default()`
pub const DEFAULT_PRECISION: u8 = 14;

/// Width of the hash produced by `Hasher::finish`
const HASH_BITS: u32 = u64::BITS;
/// Raw estimates up to `SMALL_RANGE_FACTOR * M` are candidates for linear counting
const SMALL_RANGE_FACTOR: f64 = 2.5;

pub struct HyperLogLog<H: Hasher + Default = WyHash> {
    /// Number of hash bits used for register index
    precision: u8,
    /// `2^precision` register ranks
    registers: Box<[u8]>,
    /// Bias correction constant for the register count
    alpha: f64,
    /// Zero-sized build hasher
    build_hasher: BuildHasherDefault<H>,
}

impl<H: Hasher + Default> HyperLogLog<H> {
    /// Creates new instance of `HyperLogLog` with `2^precision` registers
    pub fn new(precision: u8) -> Result<Self> {
        if !(MIN_PRECISION..=MAX_PRECISION).contains(&precision) {
            return Err(EstimatorError::InvalidPrecision { precision });
        }
        Ok(Self::with_valid_precision(precision))
    }

    fn with_valid_precision(precision: u8) -> Self {
        let m = 1usize << precision;
        Self {
            precision,
            registers: vec![0u8; m].into_boxed_slice(),
            alpha: alpha(m),
            build_hasher: BuildHasherDefault::default(),
        }
    }

    /// Insert a hashable item into `HyperLogLog`
    #[inline]
    pub fn add<T: Hash + ?Sized>(&mut self, item: &T) {
        let mut hasher = self.build_hasher.build_hasher();
        item.hash(&mut hasher);
        let hash = hasher.finish();
        self.add_hash(hash);
    }

    /// Insert hash into `HyperLogLog`
    #[inline]
    pub fn add_hash(&mut self, hash: u64) {
        let (idx, new_rank) = self.decode_hash(hash);
        let register = &mut self.registers[idx];
        if new_rank > *register {
            *register = new_rank;
        }
    }

    /// Return register index and rank of the given hash
    #[inline]
    fn decode_hash(&self, hash: u64) -> (usize, u8) {
        let idx = (hash & (self.registers.len() as u64 - 1)) as usize;
        (idx, rank(hash >> self.precision, self.precision))
    }

    /// Return cardinality estimate
    pub fn estimate(&self) -> f64 {
        let m = self.registers.len() as f64;

        let mut sum = 0.0;
        let mut zeros = 0usize;
        for &r in self.registers.iter() {
            sum += inv_pow2(r);
            zeros += usize::from(r == 0);
        }

        let estimate = self.alpha * m * m / sum;
        if estimate <= SMALL_RANGE_FACTOR * m && zeros > 0 {
            // linear counting
            return m * (m / zeros as f64).ln();
        }
        estimate
    }

    /// Merge `rhs` into `self` by taking register-wise maximum
    pub fn merge(&mut self, rhs: &Self) -> Result<()> {
        if self.precision != rhs.precision {
            return Err(EstimatorError::PrecisionMismatch {
                lhs: self.precision,
                rhs: rhs.precision,
            });
        }
        self.registers
            .iter_mut()
            .zip(rhs.registers.iter())
            .for_each(|(lhs, &rhs)| *lhs = (*lhs).max(rhs));
        Ok(())
    }

    /// Return number of register index bits
    #[inline]
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Return number of registers
    #[inline]
    pub fn register_count(&self) -> usize {
        self.registers.len()
    }

    /// Return register ranks
    #[inline]
    pub fn registers(&self) -> &[u8] {
        &self.registers
    }

    /// Return memory size of `HyperLogLog`
    pub fn size_of(&self) -> usize {
        size_of::<Self>() + size_of_val(&*self.registers)
    }
}

impl<H: Hasher + Default> Default for HyperLogLog<H> {
    fn default() -> Self {
        Self::with_valid_precision(DEFAULT_PRECISION)
    }
}

impl<H: Hasher + Default> Clone for HyperLogLog<H> {
    fn clone(&self) -> Self {
        Self {
            precision: self.precision,
            registers: self.registers.clone(),
            alpha: self.alpha,
            build_hasher: BuildHasherDefault::default(),
        }
    }
}

impl<H: Hasher + Default> PartialEq for HyperLogLog<H> {
    fn eq(&self, rhs: &Self) -> bool {
        self.precision == rhs.precision && self.registers == rhs.registers
    }
}

impl<H: Hasher + Default> Debug for HyperLogLog<H> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ precision: {}, estimate: {:.0}, size: {} }}",
            self.precision,
            self.estimate(),
            self.size_of()
        )
    }
}

/// Position of the first set bit within the `64 - precision` bits of `remainder`,
/// counting from the most significant one.
#[inline]
fn rank(remainder: u64, precision: u8) -> u8 {
    let precision = u32::from(precision);
    if remainder == 0 {
        return (HASH_BITS - precision) as u8;
    }
    (remainder.leading_zeros() - precision + 1) as u8
}

/// Computes 2^-n by subtracting from the IEEE754 double exponent.
#[inline]
fn inv_pow2(n: u8) -> f64 {
    let base = f64::to_bits(1.0);
    f64::from_bits(base - (u64::from(n) << 52))
}

/// Parameter for bias correction, constants for 16/32/64 registers from Flajolet et al. (2007)
#[inline]
fn alpha(m: usize) -> f64 {
    match m {
        16 => 0.673,
        32 => 0.697,
        64 => 0.709,
        _ => 0.7213 / (1.0 + 1.079 / (m as f64)),
    }
}
