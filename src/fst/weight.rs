//! Tropical semiring weights.
//!
//! A path's weight is the sum of its arc weights (`times`), and among
//! alternative paths the minimum wins (`plus`). Lower is preferred.

use std::cmp::Ordering;
use std::fmt;

/// Quantization step used when weights are compared for equality
/// (subset hashing, partition signatures, tie detection).
pub const WEIGHT_DELTA: f32 = 1.0 / 1024.0;

/// A weight in the tropical semiring over `f32`.
///
/// `Weight::ONE` (0.0) is the neutral element of [`times`](Weight::times)
/// and the most preferred weight; `Weight::ZERO` (+∞) is the neutral element
/// of [`plus`](Weight::plus) and marks "no path".
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serialization",
    derive(serde::Serialize, serde::Deserialize)
)]
pub struct Weight(f32);

impl Weight {
    /// Neutral element for `times`; the default arc weight.
    pub const ONE: Weight = Weight(0.0);
    /// Neutral element for `plus`; unreachable.
    pub const ZERO: Weight = Weight(f32::INFINITY);

    /// Create a weight, rejecting negative and NaN values.
    pub fn new(value: f32) -> Option<Self> {
        if value.is_nan() || value < 0.0 {
            None
        } else {
            Some(Weight(value))
        }
    }

    /// The raw cost.
    #[inline]
    pub fn value(self) -> f32 {
        self.0
    }

    /// Path extension: costs add.
    #[inline]
    pub fn times(self, other: Weight) -> Weight {
        Weight(self.0 + other.0)
    }

    /// Alternation: the cheaper path wins.
    #[inline]
    pub fn plus(self, other: Weight) -> Weight {
        if other.0 < self.0 {
            other
        } else {
            self
        }
    }

    /// Left division, `self - other`, clamped at zero.
    ///
    /// Residuals computed during determinization and pushing can dip a few
    /// ulps below zero; they are clamped so weights stay non-negative.
    #[inline]
    pub fn divide(self, other: Weight) -> Weight {
        if self.is_zero() {
            return Weight::ZERO;
        }
        Weight((self.0 - other.0).max(0.0))
    }

    /// True for the unreachable weight.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == f32::INFINITY
    }

    /// True for the free weight.
    #[inline]
    pub fn is_one(self) -> bool {
        self.0 == 0.0
    }

    /// Integer bucket used for hashing weights that should compare equal.
    #[inline]
    pub fn quantize(self) -> i64 {
        if self.is_zero() {
            i64::MAX
        } else {
            (self.0 / WEIGHT_DELTA).round() as i64
        }
    }

    /// Equality within [`WEIGHT_DELTA`].
    #[inline]
    pub fn approx_eq(self, other: Weight) -> bool {
        if self.is_zero() || other.is_zero() {
            return self.is_zero() && other.is_zero();
        }
        (self.0 - other.0).abs() <= WEIGHT_DELTA
    }
}

impl Default for Weight {
    fn default() -> Self {
        Weight::ONE
    }
}

impl Eq for Weight {}

impl PartialOrd for Weight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Weight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "Infinity")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
