//! `TimeInterval`: signed scaled nanoseconds, unit = 2^-16 ns (§4.2).
//!
//! Grounded on `statime::datastructures::common::time_interval::TimeInterval`,
//! which already wraps a `fixed::types::I48F16` for the same on-wire unit;
//! this module adds the saturating/clamping/rounding rules §4.2 specifies
//! that the teacher's plain wrapper does not need (statime never saturates
//! or rounds this value, it only serializes it).

use fixed::types::I48F16;

use crate::observability::fault_injection;

/// Offsets/path-delays whose absolute value would exceed this are clamped
/// and flagged as a validation failure (§4.2, FM-002/013). `2^46` scaled
/// units is approximately 1.07 s.
pub const MAX_ABS_SCALED: i64 = 1i64 << 46;

/// Saturation bound applied specifically to `Timestamp` subtraction (§4.2),
/// distinct from and looser than [`MAX_ABS_SCALED`].
pub const TIMESTAMP_DIFF_SATURATION: i64 = 1i64 << 62;

/// A signed, fixed-point time interval in units of 2^-16 nanoseconds.
///
/// All internal offset/mean-path-delay arithmetic happens in this domain;
/// [`TimeInterval::to_nanoseconds`] is for reporting only and must never
/// feed back into arithmetic (§4.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct TimeInterval(I48F16);

/// Whether an arithmetic operation saturated or clamped its result. Carried
/// alongside the value so callers can bump `ValidationsFailed` (§4.2, §4.5)
/// without the time module reaching into the counter table on every add.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampedResult {
    pub value: TimeInterval,
    pub clamped: bool,
}

impl TimeInterval {
    pub const ZERO: Self = Self(I48F16::ZERO);

    pub const fn from_raw(raw_scaled: i64) -> Self {
        Self(I48F16::from_bits(raw_scaled))
    }

    pub const fn raw(self) -> i64 {
        self.0.to_bits()
    }

    /// Construct from a whole count of nanoseconds (exact, no rounding).
    pub fn from_nanos(ns: i64) -> Self {
        Self::from_raw(ns << 16)
    }

    /// Saturating addition. Saturates at the full `i64` scaled range.
    pub fn saturating_add(self, other: Self) -> ClampedResult {
        let wide = self.raw() as i128 + other.raw() as i128;
        saturate_i128(wide, i64::MIN as i128, i64::MAX as i128)
    }

    /// Saturating subtraction. Saturates at the full `i64` scaled range.
    pub fn saturating_sub(self, other: Self) -> ClampedResult {
        let wide = self.raw() as i128 - other.raw() as i128;
        saturate_i128(wide, i64::MIN as i128, i64::MAX as i128)
    }

    /// Divide by two. Truncates toward zero by default; when the process-wide
    /// banker's-rounding flag is set, rounds half-to-even at the scaled LSB
    /// instead (§4.2).
    pub fn half(self) -> Self {
        if fault_injection::unbiased_rounding() {
            self.half_unbiased()
        } else {
            Self::from_raw(self.raw() / 2)
        }
    }

    fn half_unbiased(self) -> Self {
        let raw = self.raw() as i128;
        let q = raw.div_euclid(2);
        let r = raw.rem_euclid(2);
        let rounded = if r == 0 {
            q
        } else if q % 2 == 0 {
            q
        } else {
            q + 1
        };
        Self::from_raw(rounded as i64)
    }

    /// Clamp to `[-MAX_ABS_SCALED, MAX_ABS_SCALED]`, reporting whether the
    /// clamp changed the value (§4.2, FM-002/013).
    pub fn clamp_to_max_abs(self) -> ClampedResult {
        saturate_i128(
            self.raw() as i128,
            -(MAX_ABS_SCALED as i128),
            MAX_ABS_SCALED as i128,
        )
    }

    /// Convert to a floating-point nanosecond count for reporting. Never
    /// feed the result back into arithmetic (§4.2).
    pub fn to_nanoseconds(self) -> f64 {
        use az::Cast;
        self.0.cast()
    }
}

fn saturate_i128(wide: i128, min: i128, max: i128) -> ClampedResult {
    let clamped = wide < min || wide > max;
    let bounded = wide.clamp(min, max);
    ClampedResult {
        value: TimeInterval::from_raw(bounded as i64),
        clamped,
    }
}

impl From<i64> for TimeInterval {
    fn from(raw_scaled: i64) -> Self {
        Self::from_raw(raw_scaled)
    }
}
