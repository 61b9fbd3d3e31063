//! Process-wide fault-injection switches used by test harnesses.
//!
//! Per §9, exactly three globals survive in this design: the counter table
//! ([`super::counters`]), the forced-tie token pool and rounding flag here,
//! and (also here, for the same reason — a single atomic toggle an embedder
//! flips from test code) the synthetic offset-jitter amount. All consumption
//! is atomic so a multi-threaded test harness can arm these from outside the
//! single-threaded clock.

use core::sync::atomic::{AtomicI32, AtomicU32, Ordering};

/// Remaining number of BMCA comparisons to force to `Equal`.
static FORCED_TIE_TOKENS: AtomicU32 = AtomicU32::new(0);

/// Whether the most recent BMCA comparison was forced to `Equal` by the
/// token pool (as opposed to a genuine tie). Read by the health snapshot.
static LAST_COMPARISON_FORCED: core::sync::atomic::AtomicBool =
    core::sync::atomic::AtomicBool::new(false);

/// Arm `count` forced ties. The next `count` calls to
/// [`consume_forced_tie`] return `true`.
pub fn arm_forced_ties(count: u32) {
    FORCED_TIE_TOKENS.store(count, Ordering::SeqCst);
}

/// Atomically consume one forced-tie token, if any remain. Returns whether
/// this comparison should be forced to `Equal`.
pub fn consume_forced_tie() -> bool {
    let forced = FORCED_TIE_TOKENS
        .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
            if n > 0 {
                Some(n - 1)
            } else {
                None
            }
        })
        .is_ok();
    LAST_COMPARISON_FORCED.store(forced, Ordering::Relaxed);
    forced
}

/// Whether the latest BMCA comparison was a forced tie.
pub fn last_comparison_forced() -> bool {
    LAST_COMPARISON_FORCED.load(Ordering::Relaxed)
}

/// Process-wide banker's-rounding toggle for [`crate::time::TimeInterval`]
/// halving (§4.2). `false` (default) truncates toward zero.
static UNBIASED_ROUNDING: core::sync::atomic::AtomicBool =
    core::sync::atomic::AtomicBool::new(false);

pub fn set_unbiased_rounding(enabled: bool) {
    UNBIASED_ROUNDING.store(enabled, Ordering::SeqCst);
}

pub fn unbiased_rounding() -> bool {
    UNBIASED_ROUNDING.load(Ordering::Relaxed)
}

/// Synthetic offset jitter, in whole nanoseconds, added to every computed
/// offset by the sync pipeline (§4.5 "Fault-injection jitter"). Zero by
/// default, i.e. no jitter.
static OFFSET_JITTER_NS: AtomicI32 = AtomicI32::new(0);

pub fn set_offset_jitter_ns(jitter_ns: i32) {
    OFFSET_JITTER_NS.store(jitter_ns, Ordering::SeqCst);
}

pub fn offset_jitter_ns() -> i32 {
    OFFSET_JITTER_NS.load(Ordering::Relaxed)
}

/// Scratch slot used only so the jitter amount can be expressed directly in
/// scaled (2^-16 ns) units by callers that already have a scaled value on
/// hand, without recomputing the shift at each call site.
pub fn offset_jitter_scaled() -> i64 {
    (offset_jitter_ns() as i64) << 16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forced_tie_tokens_are_consumed_in_order() {
        arm_forced_ties(2);
        assert!(consume_forced_tie());
        assert!(last_comparison_forced());
        assert!(consume_forced_tie());
        assert!(!consume_forced_tie());
        assert!(!last_comparison_forced());
    }

    #[test]
    fn rounding_flag_round_trips() {
        set_unbiased_rounding(true);
        assert!(unbiased_rounding());
        set_unbiased_rounding(false);
        assert!(!unbiased_rounding());
    }
}
