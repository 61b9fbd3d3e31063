//! Peer-delay capture for a P2P-configured port (§4.5 "P2P"). Mirrors
//! `SyncCapture`'s T1..T4 bookkeeping, but for the two-party `Pdelay_Req` /
//! `Pdelay_Resp` / `Pdelay_Resp_Follow_Up` exchange rather than the
//! three-party E2E one; writes only `portDS.peerMeanPathDelay`, never
//! `currentDS.meanPathDelay` (§4.5 "P2P suppression").
//!
//! This path has no `statime` counterpart (it never implements a
//! peer-to-peer role); the formula shape follows `super::compute`'s halving
//! and clamping pattern.

use crate::{
    datastructures::common::{PortIdentity, TimeInterval},
    observability::{counter_increment, CounterId},
    time::Timestamp,
};

/// Captures T1..T4 for one peer-delay measurement cycle.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeerDelayCapture {
    t1: Timestamp,
    t2: Timestamp,
    t3: Timestamp,
    t4: Timestamp,
    have_t1: bool,
    have_t2: bool,
    have_t3: bool,
    have_t4: bool,
}

impl PeerDelayCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// T1: local hardware egress timestamp for `Pdelay_Req`.
    pub fn record_req_egress(&mut self, t1: Timestamp) {
        self.t1 = t1;
        self.have_t1 = true;
    }

    /// T4: local hardware ingress timestamp for `Pdelay_Resp`.
    pub fn record_resp_ingress(&mut self, t4: Timestamp) {
        self.t4 = t4;
        self.have_t4 = true;
    }

    /// T2 (`requestReceiptTimestamp`) from `Pdelay_Resp`, after the caller
    /// has matched `requestingPortIdentity` against this port's own
    /// identity.
    pub fn record_request_receipt(
        &mut self,
        t2: Timestamp,
        requesting_port_identity: PortIdentity,
        own_port_identity: PortIdentity,
    ) {
        if requesting_port_identity != own_port_identity {
            return;
        }
        self.t2 = t2;
        self.have_t2 = true;
    }

    /// T3 (`responseOriginTimestamp`) from the matching
    /// `Pdelay_Resp_Follow_Up`, same matching rule as T2.
    pub fn record_response_origin(
        &mut self,
        t3: Timestamp,
        requesting_port_identity: PortIdentity,
        own_port_identity: PortIdentity,
    ) {
        if requesting_port_identity != own_port_identity {
            return;
        }
        self.t3 = t3;
        self.have_t3 = true;
    }

    fn ready(&self) -> bool {
        self.have_t1 && self.have_t2 && self.have_t3 && self.have_t4
    }

    /// `peerMeanPathDelay = ((T4-T1) - (T3-T2)) / 2`. Returns `None` while
    /// the cycle is still in progress.
    pub fn poll(&mut self) -> Option<TimeInterval> {
        if !self.ready() {
            return None;
        }

        let round_trip = self.t4.saturating_diff(self.t1);
        let turnaround = self.t3.saturating_diff(self.t2);
        let mpd = round_trip.saturating_sub(turnaround).value.half();
        let clamp = mpd.clamp_to_max_abs();

        if clamp.clamped {
            counter_increment(CounterId::ValidationsFailed, 1);
        } else {
            counter_increment(CounterId::ValidationsPassed, 1);
        }

        self.have_t1 = false;
        self.have_t2 = false;
        self.have_t3 = false;
        self.have_t4 = false;

        Some(clamp.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastructures::common::ClockIdentity;

    fn port(n: u8) -> PortIdentity {
        PortIdentity {
            clock_identity: ClockIdentity([n; 8]),
            port_number: 1,
        }
    }

    #[test]
    fn poll_waits_until_all_four_timestamps_present() {
        let mut capture = PeerDelayCapture::new();
        capture.record_req_egress(Timestamp::new(0, 0));
        assert_eq!(capture.poll(), None);
        capture.record_request_receipt(Timestamp::new(0, 100), port(1), port(1));
        capture.record_response_origin(Timestamp::new(0, 200), port(1), port(1));
        assert_eq!(capture.poll(), None);
        capture.record_resp_ingress(Timestamp::new(0, 300));
        assert!(capture.poll().is_some());
    }

    #[test]
    fn mismatched_requesting_port_identity_is_dropped() {
        let mut capture = PeerDelayCapture::new();
        capture.record_req_egress(Timestamp::new(0, 0));
        capture.record_request_receipt(Timestamp::new(0, 100), port(2), port(1));
        capture.record_response_origin(Timestamp::new(0, 200), port(2), port(1));
        capture.record_resp_ingress(Timestamp::new(0, 300));
        assert_eq!(capture.poll(), None);
    }

    #[test]
    fn symmetric_link_yields_the_turnaround_gap() {
        // round trip T4-T1 = 300ns, turnaround T3-T2 = 100ns -> mpd 100ns
        let mut capture = PeerDelayCapture::new();
        capture.record_req_egress(Timestamp::new(0, 0));
        capture.record_request_receipt(Timestamp::new(0, 100), port(1), port(1));
        capture.record_response_origin(Timestamp::new(0, 200), port(1), port(1));
        capture.record_resp_ingress(Timestamp::new(0, 300));
        assert_eq!(capture.poll(), Some(TimeInterval::from_nanos(100)));
    }
}
