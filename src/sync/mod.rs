//! The synchronization pipeline (C5, §4.5): T1..T4 capture, the
//! offset/mean-path-delay formula, and the reference proportional servo.
//!
//! Grounded on `statime::port::sync`'s T1..T4 bookkeeping and
//! `statime::filters::basic::BasicFilter` for the servo shape, simplified
//! to the spec's single proportional-step rule (no frequency estimation).

mod peer_delay;
mod servo;

pub use peer_delay::PeerDelayCapture;
pub use servo::ProportionalServo;

use crate::{
    datastructures::common::{PortIdentity, TimeInterval},
    observability::{self, counter_increment, fault_injection, CounterId, LogCode},
    time::Timestamp,
};

/// The result of a completed capture cycle (§4.5 "Formula").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncResult {
    pub offset_from_master: TimeInterval,
    pub mean_path_delay: TimeInterval,
    /// Whether either value had to be clamped to `MAX_ABS_SCALED` (§4.5
    /// "Range clamp").
    pub clamped: bool,
    /// Whether this cycle saw `T2<T1` or `T4<T3` (§4.5 "Capture", FM-001).
    /// Advisory: the computation still proceeds, but this cycle does not
    /// count as clean for the Uncalibrated→Slave heuristic (§4.6, §8
    /// scenario 5).
    pub ordering_violation: bool,
}

/// Captures T1..T4 for one end-to-end sync cycle on a slave-role port.
///
/// `have_*` flags track which timestamps have arrived; [`SyncCapture::poll`]
/// only computes once all four are present, then clears every flag (§4.5
/// "Capture").
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncCapture {
    t1: Timestamp,
    t2: Timestamp,
    t3: Timestamp,
    t4: Timestamp,
    have_t1: bool,
    have_t2: bool,
    have_t3: bool,
    have_t4: bool,
    sync_correction: TimeInterval,
    delay_resp_correction: TimeInterval,
}

impl SyncCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// T1 from a one-step `Sync`, or from the matching `Follow_Up` of a
    /// two-step cycle. `correction_field` is the accumulated correction on
    /// the Sync (+ Follow_Up, for two-step) path (§4.5 "Formula").
    pub fn record_origin_timestamp(&mut self, t1: Timestamp, correction_field: TimeInterval) {
        self.t1 = t1;
        self.sync_correction = correction_field;
        self.have_t1 = true;
    }

    /// T2: local hardware ingress timestamp for `Sync`.
    pub fn record_sync_ingress(&mut self, t2: Timestamp) {
        self.t2 = t2;
        self.have_t2 = true;
    }

    /// T3: local hardware egress timestamp for `Delay_Req`.
    pub fn record_delay_req_egress(&mut self, t3: Timestamp) {
        self.t3 = t3;
        self.have_t3 = true;
    }

    /// T4 from `Delay_Resp`, after the caller has matched
    /// `requestingPortIdentity` against this port's own identity (§4.5
    /// "Capture": mismatches are silently dropped by the caller before this
    /// is invoked).
    pub fn record_delay_resp(
        &mut self,
        t4: Timestamp,
        requesting_port_identity: PortIdentity,
        own_port_identity: PortIdentity,
        correction_field: TimeInterval,
    ) {
        if requesting_port_identity != own_port_identity {
            return;
        }
        self.t4 = t4;
        self.delay_resp_correction = correction_field;
        self.have_t4 = true;
    }

    fn ready(&self) -> bool {
        self.have_t1 && self.have_t2 && self.have_t3 && self.have_t4
    }

    /// If all four timestamps have arrived, compute offset and mean path
    /// delay and reset the capture for the next cycle (§4.5 "Capture").
    /// Returns `None` while the cycle is still in progress.
    pub fn poll(&mut self) -> Option<SyncResult> {
        if !self.ready() {
            return None;
        }

        let result = compute(
            self.t1,
            self.t2,
            self.t3,
            self.t4,
            self.sync_correction,
            self.delay_resp_correction,
        );

        self.have_t1 = false;
        self.have_t2 = false;
        self.have_t3 = false;
        self.have_t4 = false;

        Some(result)
    }
}

/// Apply the §4.5 formula to a complete T1..T4 set.
///
/// `offsetFromMaster = ((T2-T1) - (T4-T3)) / 2`,
/// `meanPathDelay = ((T2-T1) + (T4-T3)) / 2`, with the respective
/// correction fields subtracted before halving, ordering validated (FM-001,
/// advisory only), and the result clamped to `MAX_ABS_SCALED` (FM-002/013).
fn compute(
    t1: Timestamp,
    t2: Timestamp,
    t3: Timestamp,
    t4: Timestamp,
    sync_correction: TimeInterval,
    delay_resp_correction: TimeInterval,
) -> SyncResult {
    let ordering_violation = t2 < t1 || t4 < t3;
    if ordering_violation {
        counter_increment(CounterId::ValidationsFailed, 1);
        observability::log(
            observability::LogLevel::Warn,
            "sync",
            LogCode::SyncOrderingViolation,
            "T2<T1 or T4<T3",
        );
    }

    let master_to_slave = t2.saturating_diff(t1).saturating_sub(sync_correction).value;
    let slave_to_master = t4.saturating_diff(t3).saturating_sub(delay_resp_correction).value;

    let sum = master_to_slave.saturating_add(slave_to_master).value;
    let diff = master_to_slave.saturating_sub(slave_to_master).value;

    let mut offset = diff.half();
    let mean_path_delay = sum.half();

    if fault_injection::offset_jitter_scaled() != 0 {
        offset = TimeInterval::from_raw(offset.raw().saturating_add(fault_injection::offset_jitter_scaled()));
    }

    let offset_clamp = offset.clamp_to_max_abs();
    let mpd_clamp = mean_path_delay.clamp_to_max_abs();
    let clamped = offset_clamp.clamped || mpd_clamp.clamped;

    if clamped {
        counter_increment(CounterId::ValidationsFailed, 1);
    } else {
        counter_increment(CounterId::ValidationsPassed, 1);
        counter_increment(CounterId::OffsetsComputed, 1);
    }

    SyncResult {
        offset_from_master: offset_clamp.value,
        mean_path_delay: mpd_clamp.value,
        clamped,
        ordering_violation,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{datastructures::common::ClockIdentity, observability::counters};

    fn port(n: u8) -> PortIdentity {
        PortIdentity {
            clock_identity: ClockIdentity([n; 8]),
            port_number: 1,
        }
    }

    #[test]
    fn poll_waits_until_all_four_timestamps_present() {
        let mut capture = SyncCapture::new();
        capture.record_origin_timestamp(Timestamp::new(0, 0), TimeInterval::ZERO);
        assert_eq!(capture.poll(), None);
        capture.record_sync_ingress(Timestamp::new(0, 100));
        capture.record_delay_req_egress(Timestamp::new(0, 200));
        assert_eq!(capture.poll(), None);
        capture.record_delay_resp(Timestamp::new(0, 300), port(1), port(1), TimeInterval::ZERO);
        assert!(capture.poll().is_some());
    }

    #[test]
    fn mismatched_requesting_port_identity_is_dropped() {
        let mut capture = SyncCapture::new();
        capture.record_origin_timestamp(Timestamp::new(0, 0), TimeInterval::ZERO);
        capture.record_sync_ingress(Timestamp::new(0, 100));
        capture.record_delay_req_egress(Timestamp::new(0, 200));
        capture.record_delay_resp(Timestamp::new(0, 300), port(2), port(1), TimeInterval::ZERO);
        assert_eq!(capture.poll(), None);
    }

    #[test]
    fn symmetric_path_yields_zero_offset() {
        counters::reset_for_test();
        // T2-T1 = 100ns, T4-T3 = 100ns -> offset 0, mpd 100ns
        let result = compute(
            Timestamp::new(0, 0),
            Timestamp::new(0, 100),
            Timestamp::new(0, 200),
            Timestamp::new(0, 300),
            TimeInterval::ZERO,
            TimeInterval::ZERO,
        );
        assert_eq!(result.offset_from_master, TimeInterval::ZERO);
        assert_eq!(result.mean_path_delay, TimeInterval::from_nanos(100));
        assert!(!result.clamped);
        assert_eq!(counters::counter_get(CounterId::OffsetsComputed), 1);
    }

    #[test]
    fn reverse_ordering_is_advisory_only_and_still_computes() {
        counters::reset_for_test();
        // T2 < T1: still computes, bumps ValidationsFailed instead of erroring.
        let result = compute(
            Timestamp::new(0, 100),
            Timestamp::new(0, 0),
            Timestamp::new(0, 200),
            Timestamp::new(0, 300),
            TimeInterval::ZERO,
            TimeInterval::ZERO,
        );
        assert!(!result.clamped);
        assert_eq!(counters::counter_get(CounterId::ValidationsFailed), 1);
    }

    #[test]
    fn huge_offset_is_clamped_and_counted() {
        counters::reset_for_test();
        let far = Timestamp::new(u64::MAX >> 16, 0);
        let result = compute(
            Timestamp::new(0, 0),
            far,
            Timestamp::new(0, 0),
            Timestamp::new(0, 0),
            TimeInterval::ZERO,
            TimeInterval::ZERO,
        );
        assert!(result.clamped);
        assert_eq!(counters::counter_get(CounterId::ValidationsFailed), 1);
    }
}
