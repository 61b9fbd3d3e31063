//! The transparent clock residence-time accumulator (§4.5 "Transparent
//! clock", C6).
//!
//! Grounded on `sync::compute`'s ordering-violation counting, but the
//! contract here is stricter: §4.7 requires a negative residence time to be
//! rejected and the message left unchanged, so [`TransparentClock::accumulate_residence_time`]
//! returns an error the caller must act on rather than silently no-opping.

use crate::{
    datastructures::datasets::DelayMechanism,
    error::{PtpError, PtpResult},
    observability::{self, counter_increment, CounterId, LogCode, LogLevel},
    time::TimeInterval,
};

/// One transparent-clock relay point on the Sync/Delay_Req path. Stateless
/// beyond which delay mechanism it relays for — residence time is folded
/// straight into the message's own `correctionField`, never stored (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransparentClock {
    pub delay_mechanism: DelayMechanism,
}

impl TransparentClock {
    pub fn new(delay_mechanism: DelayMechanism) -> Self {
        Self { delay_mechanism }
    }

    /// Add this node's residence time, `egress - ingress`, to
    /// `correction_field` (§4.5). `egress < ingress` is rejected outright
    /// (§4.7, §8): counted, logged, and returned as an error so the caller
    /// drops the frame instead of forwarding it with an unchanged
    /// `correctionField`.
    pub fn accumulate_residence_time(
        &self,
        correction_field: TimeInterval,
        ingress: crate::time::Timestamp,
        egress: crate::time::Timestamp,
    ) -> PtpResult<TimeInterval> {
        if egress < ingress {
            counter_increment(CounterId::ValidationsFailed, 1);
            observability::log(
                LogLevel::Warn,
                "transparent",
                LogCode::ResidenceTimeNegative,
                "egress before ingress",
            );
            return Err(PtpError::OrderingViolation);
        }

        counter_increment(CounterId::ValidationsPassed, 1);
        let residence = egress.saturating_diff(ingress);
        Ok(correction_field.saturating_add(residence).value)
    }

    /// End-to-end residence-time correction, additionally folding in a
    /// peer-to-peer link's already-measured `peer_mean_path_delay` (§4.5
    /// "P2P").
    pub fn accumulate_with_peer_delay(
        &self,
        correction_field: TimeInterval,
        ingress: crate::time::Timestamp,
        egress: crate::time::Timestamp,
        peer_mean_path_delay: TimeInterval,
    ) -> PtpResult<TimeInterval> {
        let with_residence = self.accumulate_residence_time(correction_field, ingress, egress)?;
        Ok(if matches!(self.delay_mechanism, DelayMechanism::PeerToPeer) {
            with_residence.saturating_add(peer_mean_path_delay).value
        } else {
            with_residence
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{observability::counters, time::Timestamp};

    #[test]
    fn adds_residence_time_to_correction_field() {
        counters::reset_for_test();
        let tc = TransparentClock::new(DelayMechanism::EndToEnd);
        let corrected = tc
            .accumulate_residence_time(
                TimeInterval::from_nanos(10),
                Timestamp::new(0, 1_000),
                Timestamp::new(0, 1_030),
            )
            .unwrap();
        assert_eq!(corrected, TimeInterval::from_nanos(40));
        assert_eq!(counters::counter_get(CounterId::ValidationsPassed), 1);
    }

    #[test]
    fn zero_residence_time_leaves_correction_field_unchanged() {
        counters::reset_for_test();
        let tc = TransparentClock::new(DelayMechanism::EndToEnd);
        let corrected = tc
            .accumulate_residence_time(
                TimeInterval::from_nanos(10),
                Timestamp::new(0, 1_000),
                Timestamp::new(0, 1_000),
            )
            .unwrap();
        assert_eq!(corrected, TimeInterval::from_nanos(10));
    }

    #[test]
    fn egress_before_ingress_is_rejected() {
        counters::reset_for_test();
        let tc = TransparentClock::new(DelayMechanism::EndToEnd);
        let result = tc.accumulate_residence_time(
            TimeInterval::from_nanos(10),
            Timestamp::new(0, 1_000),
            Timestamp::new(0, 900),
        );
        assert_eq!(result, Err(PtpError::OrderingViolation));
        assert_eq!(counters::counter_get(CounterId::ValidationsFailed), 1);
    }

    #[test]
    fn peer_to_peer_folds_in_peer_mean_path_delay() {
        let tc = TransparentClock::new(DelayMechanism::PeerToPeer);
        let corrected = tc
            .accumulate_with_peer_delay(
                TimeInterval::ZERO,
                Timestamp::new(0, 1_000),
                Timestamp::new(0, 1_020),
                TimeInterval::from_nanos(500),
            )
            .unwrap();
        assert_eq!(corrected, TimeInterval::from_nanos(520));
    }

    #[test]
    fn end_to_end_ignores_peer_mean_path_delay() {
        let tc = TransparentClock::new(DelayMechanism::EndToEnd);
        let corrected = tc
            .accumulate_with_peer_delay(
                TimeInterval::ZERO,
                Timestamp::new(0, 1_000),
                Timestamp::new(0, 1_020),
                TimeInterval::from_nanos(500),
            )
            .unwrap();
        assert_eq!(corrected, TimeInterval::from_nanos(20));
    }

    #[test]
    fn peer_to_peer_rejects_negative_residence_without_folding_peer_delay() {
        counters::reset_for_test();
        let tc = TransparentClock::new(DelayMechanism::PeerToPeer);
        let result = tc.accumulate_with_peer_delay(
            TimeInterval::ZERO,
            Timestamp::new(0, 1_000),
            Timestamp::new(0, 900),
            TimeInterval::from_nanos(500),
        );
        assert_eq!(result, Err(PtpError::OrderingViolation));
    }
}
