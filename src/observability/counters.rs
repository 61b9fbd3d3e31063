//! Process-wide atomic counters.
//!
//! These are the only observability primitive the core touches directly: a
//! flat table of `AtomicU64`s indexed by [`CounterId`]. No string formatting
//! or I/O happens here or anywhere else in the core (see §4.8 of the design
//! notes); a structured logger or metrics exporter is expected to read the
//! table through [`snapshot`].

use core::sync::atomic::{AtomicU64, Ordering};

/// Identifies one counter in the process-wide counter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, num_enum::IntoPrimitive)]
#[repr(usize)]
pub enum CounterId {
    /// `BMCA.Selections` — every `select_best` invocation.
    BmcaSelections = 0,
    /// `BMCA.LocalWins` — the local clock won the comparison.
    BmcaLocalWins,
    /// `BMCA.ForeignWins` — a foreign master won the comparison.
    BmcaForeignWins,
    /// `BMCA.PassiveWins` — comparison ended in a tie (genuine or forced).
    BmcaPassiveWins,
    /// `BMCA.CandidateUpdates` — a foreign master's candidate entry changed
    /// during a scan.
    BmcaCandidateUpdates,
    /// Offset/MPD computations that completed and passed range validation.
    OffsetsComputed,
    /// Sync-cycle ordering or range checks that passed.
    ValidationsPassed,
    /// Sync-cycle ordering or range checks that failed (advisory).
    ValidationsFailed,
    /// Hardware or protocol faults reported by the HAL.
    HalFaults,
    /// Number of counter ids. Keep last.
    Count,
}

const COUNTER_COUNT: usize = CounterId::Count as usize;

static COUNTERS: [AtomicU64; COUNTER_COUNT] = {
    // AtomicU64::new is const, but array-init of a non-Copy-friendly const
    // requires spelling it out; COUNTER_COUNT is small and fixed.
    const ZERO: AtomicU64 = AtomicU64::new(0);
    [ZERO; COUNTER_COUNT]
};

/// Atomically add `delta` to the named counter.
pub fn counter_increment(id: CounterId, delta: u64) {
    COUNTERS[id as usize].fetch_add(delta, Ordering::Relaxed);
}

/// Read the current value of a single counter.
pub fn counter_get(id: CounterId) -> u64 {
    COUNTERS[id as usize].load(Ordering::Relaxed)
}

/// A point-in-time copy of every counter, for health snapshots and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CounterSnapshot {
    pub bmca_selections: u64,
    pub bmca_local_wins: u64,
    pub bmca_foreign_wins: u64,
    pub bmca_passive_wins: u64,
    pub bmca_candidate_updates: u64,
    pub offsets_computed: u64,
    pub validations_passed: u64,
    pub validations_failed: u64,
    pub hal_faults: u64,
}

pub fn snapshot() -> CounterSnapshot {
    CounterSnapshot {
        bmca_selections: counter_get(CounterId::BmcaSelections),
        bmca_local_wins: counter_get(CounterId::BmcaLocalWins),
        bmca_foreign_wins: counter_get(CounterId::BmcaForeignWins),
        bmca_passive_wins: counter_get(CounterId::BmcaPassiveWins),
        bmca_candidate_updates: counter_get(CounterId::BmcaCandidateUpdates),
        offsets_computed: counter_get(CounterId::OffsetsComputed),
        validations_passed: counter_get(CounterId::ValidationsPassed),
        validations_failed: counter_get(CounterId::ValidationsFailed),
        hal_faults: counter_get(CounterId::HalFaults),
    }
}

/// Reset every counter to zero. Test-only: production embedders never need
/// to rewind the process-wide table.
#[cfg(test)]
pub fn reset_for_test() {
    for c in COUNTERS.iter() {
        c.store(0, Ordering::Relaxed);
    }
}
