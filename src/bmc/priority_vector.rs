use core::cmp::Ordering;

use crate::datastructures::{
    common::{ClockAccuracy, ClockIdentity},
    datasets::DefaultDS,
    messages::AnnounceBody,
};

/// A BMCA priority vector (§4.4): the tuple IEEE1588-2019 clause 9.3.2
/// compares lexicographically, smaller-is-better in every field.
///
/// Grounded on `statime::bmc::dataset_comparison::ComparisonDataset`, but
/// flattened to the plain lexicographic tuple the spec defines — no
/// topology tie-break, since `stepsRemoved` is already a field of the
/// tuple rather than a special-cased same-grandmaster branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityVector {
    pub priority_1: u8,
    pub grandmaster_clock_class: u8,
    pub grandmaster_clock_accuracy: ClockAccuracy,
    pub grandmaster_offset_scaled_log_variance: u16,
    pub priority_2: u8,
    pub steps_removed: u16,
    pub grandmaster_identity: ClockIdentity,
}

impl PriorityVector {
    /// The vector this clock presents for itself: `stepsRemoved == 0` and
    /// its own identity doubling as grandmaster identity (§4.4).
    pub fn from_default_ds(ds: &DefaultDS) -> Self {
        Self {
            priority_1: ds.priority_1,
            grandmaster_clock_class: ds.clock_quality.clock_class,
            grandmaster_clock_accuracy: ds.clock_quality.clock_accuracy,
            grandmaster_offset_scaled_log_variance: ds.clock_quality.offset_scaled_log_variance,
            priority_2: ds.priority_2,
            steps_removed: 0,
            grandmaster_identity: ds.clock_identity(),
        }
    }

    /// The vector carried by a foreign master's `Announce` body (§4.4).
    /// `stepsRemoved` is incremented by one hop, matching `currentDS`
    /// inheritance on a BMCA win (§4.4 scenario "Foreign wins BMCA").
    pub fn from_announce(body: &AnnounceBody) -> Self {
        Self {
            priority_1: body.grandmaster_priority_1,
            grandmaster_clock_class: body.grandmaster_clock_quality.clock_class,
            grandmaster_clock_accuracy: body.grandmaster_clock_quality.clock_accuracy,
            grandmaster_offset_scaled_log_variance: body
                .grandmaster_clock_quality
                .offset_scaled_log_variance,
            priority_2: body.grandmaster_priority_2,
            steps_removed: body.steps_removed,
            grandmaster_identity: body.grandmaster_identity,
        }
    }

    /// Lexicographic comparison in the field order of §4.4. `Less` means
    /// `self` is the better candidate.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.priority_1
            .cmp(&other.priority_1)
            .then_with(|| self.grandmaster_clock_class.cmp(&other.grandmaster_clock_class))
            .then_with(|| {
                self.grandmaster_clock_accuracy
                    .cmp_numeric(&other.grandmaster_clock_accuracy)
            })
            .then_with(|| {
                self.grandmaster_offset_scaled_log_variance
                    .cmp(&other.grandmaster_offset_scaled_log_variance)
            })
            .then_with(|| self.priority_2.cmp(&other.priority_2))
            .then_with(|| self.steps_removed.cmp(&other.steps_removed))
            .then_with(|| self.grandmaster_identity.cmp(&other.grandmaster_identity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(priority_1: u8, steps_removed: u16, identity: u8) -> PriorityVector {
        PriorityVector {
            priority_1,
            grandmaster_clock_class: 248,
            grandmaster_clock_accuracy: ClockAccuracy::UNKNOWN,
            grandmaster_offset_scaled_log_variance: 0xffff,
            priority_2: 128,
            steps_removed,
            grandmaster_identity: ClockIdentity([identity; 8]),
        }
    }

    #[test]
    fn lower_priority_1_wins() {
        let a = vector(100, 0, 1);
        let b = vector(128, 0, 2);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn steps_removed_is_dominant_topological_tiebreaker() {
        let a = vector(128, 1, 1);
        let b = vector(128, 5, 2);
        assert_eq!(a.compare(&b), Ordering::Less);
    }

    #[test]
    fn identical_vectors_compare_equal() {
        let a = vector(128, 2, 5);
        let b = vector(128, 2, 5);
        assert_eq!(a.compare(&b), Ordering::Equal);
    }
}
