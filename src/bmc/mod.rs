//! The Best Master Clock Algorithm engine (C4, §4.4).
//!
//! Grounded on `statime::bmc::bmca`/`dataset_comparison`, simplified to the
//! flat lexicographic comparison and three-way recommendation the spec
//! defines (no boundary-clock topology tie-break).

mod priority_vector;

pub use priority_vector::PriorityVector;

use crate::{
    datastructures::datasets::ForeignMasterEntry,
    observability::{counter_increment, fault_injection, CounterId},
};
use core::cmp::Ordering;

/// What the port state machine should do after a BMCA run (§4.4, §4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recommendation {
    /// `RS_MASTER`: the local clock's vector won.
    Master,
    /// `RS_SLAVE`: a foreign master's vector won; it becomes the parent.
    Slave { winner: PriorityVector, winner_port: crate::datastructures::common::PortIdentity },
    /// `RS_PASSIVE`: comparison tied (genuinely or via forced-tie injection).
    Passive,
}

/// Compare `local` against every candidate in `entries`, returning the
/// index of the lexicographically smallest vector (§4.4 "Selection").
///
/// An empty `entries` returns `None` and bumps `ValidationsFailed` (the
/// conceptual "-1 sentinel"). Ties are broken by first occurrence.
pub fn select_best(entries: &[ForeignMasterEntry]) -> Option<usize> {
    counter_increment(CounterId::BmcaSelections, 1);

    if entries.is_empty() {
        counter_increment(CounterId::ValidationsFailed, 1);
        return None;
    }

    let mut best_index = 0;
    let mut best = PriorityVector::from_announce(&entries[0].announce_body);

    for (index, entry) in entries.iter().enumerate().skip(1) {
        let candidate = PriorityVector::from_announce(&entry.announce_body);
        if compare_with_fault_injection(&candidate, &best) == Ordering::Less {
            best = candidate;
            best_index = index;
            counter_increment(CounterId::BmcaCandidateUpdates, 1);
        }
    }

    Some(best_index)
}

/// Compare the local clock's vector against the best foreign candidate and
/// recommend a port state transition (§4.4 "Foreign-vs-local decision").
pub fn recommend(
    local: &PriorityVector,
    best_foreign: Option<(&PriorityVector, crate::datastructures::common::PortIdentity)>,
) -> Recommendation {
    let Some((foreign, foreign_port)) = best_foreign else {
        counter_increment(CounterId::BmcaLocalWins, 1);
        return Recommendation::Master;
    };

    match compare_with_fault_injection(local, foreign) {
        Ordering::Less => {
            counter_increment(CounterId::BmcaLocalWins, 1);
            Recommendation::Master
        }
        Ordering::Greater => {
            counter_increment(CounterId::BmcaForeignWins, 1);
            Recommendation::Slave {
                winner: *foreign,
                winner_port: foreign_port,
            }
        }
        Ordering::Equal => {
            counter_increment(CounterId::BmcaPassiveWins, 1);
            Recommendation::Passive
        }
    }
}

/// Wraps [`PriorityVector::compare`] with the forced-tie fault-injection
/// token pool (§4.4 "Forced-tie fault injection", §9).
fn compare_with_fault_injection(a: &PriorityVector, b: &PriorityVector) -> Ordering {
    if fault_injection::consume_forced_tie() {
        return Ordering::Equal;
    }
    a.compare(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        datastructures::common::{ClockAccuracy, ClockIdentity, ClockQuality, PortIdentity, TimeSource, WireTimestamp},
        datastructures::messages::AnnounceBody,
        observability::counters,
        time::Timestamp,
    };

    fn entry(priority_1: u8, identity: u8, port: u16) -> ForeignMasterEntry {
        ForeignMasterEntry {
            source_port_identity: PortIdentity {
                clock_identity: ClockIdentity([identity; 8]),
                port_number: port,
            },
            announce_body: AnnounceBody {
                origin_timestamp: WireTimestamp::new(0, 0),
                current_utc_offset: 37,
                grandmaster_priority_1: priority_1,
                grandmaster_clock_quality: ClockQuality {
                    clock_class: 248,
                    clock_accuracy: ClockAccuracy::UNKNOWN,
                    offset_scaled_log_variance: 0xffff,
                },
                grandmaster_priority_2: 128,
                grandmaster_identity: ClockIdentity([identity; 8]),
                steps_removed: 0,
                time_source: TimeSource::InternalOscillator,
            },
            sequence_id: 1,
            last_seen: Timestamp::new(0, 0),
        }
    }

    #[test]
    fn select_best_picks_lowest_priority_1() {
        let entries = [entry(200, 1, 1), entry(100, 2, 1), entry(150, 3, 1)];
        assert_eq!(select_best(&entries), Some(1));
    }

    #[test]
    fn select_best_on_empty_list_returns_none_and_bumps_counter() {
        counters::reset_for_test();
        assert_eq!(select_best(&[]), None);
        assert_eq!(counters::counter_get(CounterId::ValidationsFailed), 1);
    }

    #[test]
    fn select_best_breaks_ties_by_first_occurrence() {
        let entries = [entry(128, 9, 1), entry(128, 9, 2)];
        assert_eq!(select_best(&entries), Some(0));
    }

    #[test]
    fn recommend_master_when_no_foreign_candidate() {
        counters::reset_for_test();
        let local = PriorityVector {
            priority_1: 128,
            grandmaster_clock_class: 248,
            grandmaster_clock_accuracy: ClockAccuracy::UNKNOWN,
            grandmaster_offset_scaled_log_variance: 0xffff,
            priority_2: 128,
            steps_removed: 0,
            grandmaster_identity: ClockIdentity([1; 8]),
        };
        assert_eq!(recommend(&local, None), Recommendation::Master);
        assert_eq!(counters::counter_get(CounterId::BmcaLocalWins), 1);
    }

    #[test]
    fn recommend_slave_when_foreign_wins() {
        counters::reset_for_test();
        let local = PriorityVector {
            priority_1: 200,
            grandmaster_clock_class: 248,
            grandmaster_clock_accuracy: ClockAccuracy::UNKNOWN,
            grandmaster_offset_scaled_log_variance: 0xffff,
            priority_2: 128,
            steps_removed: 0,
            grandmaster_identity: ClockIdentity([1; 8]),
        };
        let foreign = PriorityVector {
            priority_1: 100,
            ..local
        };
        let foreign_port = PortIdentity {
            clock_identity: ClockIdentity([2; 8]),
            port_number: 1,
        };
        match recommend(&local, Some((&foreign, foreign_port))) {
            Recommendation::Slave { winner, winner_port } => {
                assert_eq!(winner, foreign);
                assert_eq!(winner_port, foreign_port);
            }
            other => panic!("expected Slave, got {other:?}"),
        }
        assert_eq!(counters::counter_get(CounterId::BmcaForeignWins), 1);
    }

    #[test]
    fn recommend_passive_on_exact_tie() {
        counters::reset_for_test();
        let local = PriorityVector {
            priority_1: 128,
            grandmaster_clock_class: 248,
            grandmaster_clock_accuracy: ClockAccuracy::UNKNOWN,
            grandmaster_offset_scaled_log_variance: 0xffff,
            priority_2: 128,
            steps_removed: 0,
            grandmaster_identity: ClockIdentity([1; 8]),
        };
        let foreign_port = PortIdentity {
            clock_identity: ClockIdentity([1; 8]),
            port_number: 1,
        };
        assert_eq!(
            recommend(&local, Some((&local, foreign_port))),
            Recommendation::Passive
        );
        assert_eq!(counters::counter_get(CounterId::BmcaPassiveWins), 1);
    }

    #[test]
    fn forced_tie_token_overrides_genuine_ordering() {
        counters::reset_for_test();
        let local = PriorityVector {
            priority_1: 200,
            grandmaster_clock_class: 248,
            grandmaster_clock_accuracy: ClockAccuracy::UNKNOWN,
            grandmaster_offset_scaled_log_variance: 0xffff,
            priority_2: 128,
            steps_removed: 0,
            grandmaster_identity: ClockIdentity([1; 8]),
        };
        let foreign = PriorityVector {
            priority_1: 100,
            ..local
        };
        let foreign_port = PortIdentity {
            clock_identity: ClockIdentity([2; 8]),
            port_number: 1,
        };
        fault_injection::arm_forced_ties(1);
        assert_eq!(
            recommend(&local, Some((&foreign, foreign_port))),
            Recommendation::Passive
        );
        assert!(fault_injection::last_comparison_forced());
    }
}
