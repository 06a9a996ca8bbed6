//! Deterministic train/val/test partitioning.
//!
//! Items are shuffled with a generator that is re-seeded on every call, so the
//! same input sequence always lands in the same buckets regardless of how many
//! other partitions ran before it. Bucket sizes come from rounding the ratios,
//! with a small-sample correction that keeps val non-empty whenever possible.

use crate::error::{CoreError, CoreResult};

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use std::fmt;

/// Dataset split a media item is assigned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    Train,
    Val,
    Test,
}

impl Split {
    /// Every split, in the order items are emitted.
    pub const ALL: [Split; 3] = [Split::Train, Split::Val, Split::Test];

    /// Label used in directory names and the inventory.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Split::Train => "train",
            Split::Val => "val",
            Split::Test => "test",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Proportions of items sent to each split.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SplitRatios {
    pub train: f64,
    pub val: f64,
    pub test: f64,
}

impl SplitRatios {
    /// The 80/10/10 split used by default.
    pub const EIGHTY_TEN_TEN: Self = Self {
        train: 0.80,
        val: 0.10,
        test: 0.10,
    };

    /// Ratios must be non-negative and sum to 1.
    pub fn validate(&self) -> CoreResult<()> {
        let parts = [self.train, self.val, self.test];
        if parts.iter().any(|r| !r.is_finite() || *r < 0.0) {
            return Err(CoreError::Config(format!(
                "Split ratios must be non-negative numbers, got {self:?}"
            )));
        }
        let sum: f64 = parts.iter().sum();
        if (sum - 1.0).abs() >= 1e-6 {
            return Err(CoreError::Config(format!(
                "Split ratios must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

impl Default for SplitRatios {
    fn default() -> Self {
        Self::EIGHTY_TEN_TEN
    }
}

/// Items assigned to each split.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    pub train: Vec<T>,
    pub val: Vec<T>,
    pub test: Vec<T>,
}

impl<T> Partition<T> {
    /// Items of one split.
    #[must_use]
    pub fn get(&self, split: Split) -> &[T] {
        match split {
            Split::Train => &self.train,
            Split::Val => &self.val,
            Split::Test => &self.test,
        }
    }

    /// Total number of items across all splits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.train.len() + self.val.len() + self.test.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(split, item)` pairs in emission order: train, then val, then test.
    pub fn iter(&self) -> impl Iterator<Item = (Split, &T)> {
        Split::ALL
            .into_iter()
            .flat_map(move |split| self.get(split).iter().map(move |item| (split, item)))
    }
}

/// Rounds half to even, matching the rounding used when the split sizes were
/// first defined (`round(0.5) == 0`, `round(2.5) == 2`).
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
fn round_count(n: usize, ratio: f64) -> usize {
    (n as f64 * ratio).round_ties_even().max(0.0) as usize
}

/// Computes `(n_train, n_val, n_test)` for `n` items.
#[must_use]
pub fn split_counts(n: usize, ratios: &SplitRatios) -> (usize, usize, usize) {
    match n {
        0 => return (0, 0, 0),
        1 => return (1, 0, 0),
        2 => return (1, 1, 0),
        _ => {}
    }

    let mut n_train = round_count(n, ratios.train).min(n);
    let mut n_val = round_count(n, ratios.val);
    if n_train + n_val > n {
        n_val = n - n_train;
    }

    if n_train == 0 {
        n_train = 1;
    }
    if n_val == 0 && n - n_train >= 1 {
        n_val = 1;
    }

    // Give back any overshoot from val, keeping at least one val item when
    // val holds more than the shortfall.
    let overshoot = (n_train + n_val).saturating_sub(n);
    if overshoot > 0 && n_val > 0 {
        let take = if n_val > 1 {
            overshoot.min(n_val - 1)
        } else {
            overshoot.min(n_val)
        };
        n_val -= take;
    }

    let n_test = n.saturating_sub(n_train + n_val);
    (n_train, n_val, n_test)
}

/// Shuffles a copy of `items` with a generator seeded from `seed` and slices
/// it into train/val/test buckets.
///
/// # Examples
///
/// ```
/// use framesplit_core::splits::{partition, SplitRatios};
///
/// let items: Vec<u32> = (0..10).collect();
/// let parts = partition(&items, &SplitRatios::default(), 42);
/// assert_eq!((parts.train.len(), parts.val.len(), parts.test.len()), (8, 1, 1));
/// assert_eq!(parts, partition(&items, &SplitRatios::default(), 42));
/// ```
#[must_use]
pub fn partition<T: Clone>(items: &[T], ratios: &SplitRatios, seed: u64) -> Partition<T> {
    let n = items.len();
    let mut shuffled = items.to_vec();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let (n_train, n_val, _) = split_counts(n, ratios);
    let val_end = (n_train + n_val).min(n);

    let test = shuffled.split_off(val_end);
    let val = shuffled.split_off(n_train.min(val_end));
    Partition {
        train: shuffled,
        val,
        test,
    }
}
