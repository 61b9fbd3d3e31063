//! A single PTP port: state machine, foreign-master tracking, and the
//! sync/delay-req timer cadence (C6, §4.6).
//!
//! Grounded on `statime::port::Port`'s role as the owner of per-port
//! transient state, paired with the explicit [`state_machine`] this
//! design calls for instead of statime's generic type-state encoding.

pub mod state_machine;

use state_machine::Event;

use crate::{
    bmc::{self, PriorityVector, Recommendation},
    config::PortConfig,
    datastructures::{
        common::{PortIdentity, TimeInterval},
        datasets::{CurrentDS, DefaultDS, DelayMechanism, ForeignMasterList, ParentDS, PortDS, PortState},
        messages::{
            AnnounceBody, DelayReqBody, DelayRespBody, FollowUpBody, PdelayReqBody, SyncBody,
        },
    },
    error::PtpResult,
    hal::Hal,
    observability::{self, health::HealthRecord, LogCode, LogLevel},
    sync::{PeerDelayCapture, ProportionalServo, SyncCapture},
    time::Timestamp,
};

/// The fixed qualification-timeout duration in `PreMaster` (§4.6 step 6).
const QUALIFICATION_TIMEOUT: TimeInterval = TimeInterval::from_raw(1_000_000_000i64 << 16);

/// Minimum successful offset computations required before the
/// `Uncalibrated` → `Slave` heuristic fires (§4.6).
const UNCALIBRATED_MIN_SUCCESSES: u32 = 3;

/// One PTP port: its `portDS`, bounded `foreignMasterList`, in-flight
/// T1..T4 capture, and the timers the scheduler's `tick` drives.
pub struct Port {
    pub port_ds: PortDS,
    foreign_masters: ForeignMasterList,
    capture: SyncCapture,
    peer_capture: PeerDelayCapture,
    servo: ProportionalServo,
    health: HealthRecord,

    time_since_announce: TimeInterval,
    time_since_sync: TimeInterval,
    time_since_delay_req: TimeInterval,
    time_since_pdelay_req: TimeInterval,
    time_since_parent_announce: TimeInterval,
    time_in_pre_master: TimeInterval,
    time_since_heartbeat: TimeInterval,

    /// Reset on entry to `Uncalibrated`; gates the heuristic transition to
    /// `Slave` (§4.6).
    successes_since_uncalibrated: u32,
    failures_since_uncalibrated: u32,

    sequence_id: u16,

    /// Override for the `stepsRemoved` field of this port's own outgoing
    /// `Announce` body, set by a boundary-clock orchestrator for every port
    /// other than the one currently in the slave role (§4.7). `None` means
    /// "use 0", the correct value for a standalone grandmaster-adjacent
    /// port.
    relay_steps_removed: Option<u16>,
}

impl Port {
    pub fn new(config: &PortConfig) -> Self {
        let mut port_ds = PortDS::new(config.port_identity, config.delay_mechanism);
        port_ds.log_min_delay_req_interval = config.log_min_delay_req_interval;
        port_ds.log_announce_interval = config.log_announce_interval;
        port_ds.log_sync_interval = config.log_sync_interval;
        port_ds.announce_receipt_timeout = config.announce_receipt_timeout;

        Self {
            port_ds,
            foreign_masters: ForeignMasterList::new(),
            capture: SyncCapture::new(),
            peer_capture: PeerDelayCapture::new(),
            servo: ProportionalServo::default(),
            health: HealthRecord::default(),
            time_since_announce: TimeInterval::ZERO,
            time_since_sync: TimeInterval::ZERO,
            time_since_delay_req: TimeInterval::ZERO,
            time_since_pdelay_req: TimeInterval::ZERO,
            time_since_parent_announce: TimeInterval::ZERO,
            time_in_pre_master: TimeInterval::ZERO,
            time_since_heartbeat: TimeInterval::ZERO,
            successes_since_uncalibrated: 0,
            failures_since_uncalibrated: 0,
            sequence_id: 0,
            relay_steps_removed: None,
        }
    }

    pub fn health(&self) -> HealthRecord {
        self.health
    }

    /// Set by a boundary-clock orchestrator on every port that is relaying
    /// another port's grandmaster rather than acting as one itself (§4.7).
    pub fn set_relay_steps_removed(&mut self, steps_removed: Option<u16>) {
        self.relay_steps_removed = steps_removed;
    }

    /// Force this port into the master role regardless of its own BMCA
    /// recommendation, used by a boundary clock to keep every port but the
    /// slave-role one in `Master` (§4.7). A no-op from states the
    /// transition table does not define `RS_MASTER` from (e.g. `Faulty`).
    pub fn force_master(&mut self, hal: &mut impl Hal) {
        self.apply(Event::RsMaster, hal);
        if self.port_ds.port_state == PortState::PreMaster {
            self.time_in_pre_master = QUALIFICATION_TIMEOUT;
        }
    }

    fn apply(&mut self, event: Event, hal: &mut impl Hal) {
        if let Some(next) = state_machine::transition(self.port_ds.port_state, event) {
            if next != self.port_ds.port_state {
                let old = self.port_ds.port_state;
                self.port_ds.port_state = next;
                if next == PortState::Uncalibrated {
                    self.successes_since_uncalibrated = 0;
                    self.failures_since_uncalibrated = 0;
                }
                if next == PortState::PreMaster {
                    self.time_in_pre_master = TimeInterval::ZERO;
                }
                hal.on_state_change(old, next);
            }
        }
    }

    /// Handle an incoming `Announce`, updating `foreignMasterList` (§4.3).
    pub fn handle_announce(
        &mut self,
        source_port_identity: PortIdentity,
        body: AnnounceBody,
        sequence_id: u16,
        now: Timestamp,
    ) -> PtpResult<()> {
        if source_port_identity == self.port_ds.port_identity {
            return Ok(());
        }
        if self
            .foreign_masters
            .upsert(source_port_identity, body, sequence_id, now)
            .is_err()
        {
            observability::log(
                LogLevel::Warn,
                "port",
                LogCode::ForeignMasterListFull,
                "foreignMasterList at capacity",
            );
        }
        self.time_since_parent_announce = TimeInterval::ZERO;
        Ok(())
    }

    pub fn handle_sync_origin_timestamp(&mut self, t1: Timestamp, correction_field: TimeInterval) {
        self.capture.record_origin_timestamp(t1, correction_field);
    }

    pub fn handle_sync_ingress(&mut self, t2: Timestamp) {
        self.capture.record_sync_ingress(t2);
    }

    pub fn handle_delay_req_egress(&mut self, t3: Timestamp) {
        self.capture.record_delay_req_egress(t3);
    }

    pub fn handle_delay_resp(
        &mut self,
        t4: Timestamp,
        requesting_port_identity: PortIdentity,
        correction_field: TimeInterval,
    ) {
        self.capture.record_delay_resp(
            t4,
            requesting_port_identity,
            self.port_ds.port_identity,
            correction_field,
        );
    }

    /// T1: local hardware egress timestamp for an outgoing `Pdelay_Req`
    /// (§4.5 "P2P").
    pub fn handle_pdelay_req_egress(&mut self, t1: Timestamp) {
        self.peer_capture.record_req_egress(t1);
    }

    /// T2 (`requestReceiptTimestamp`) from an incoming `Pdelay_Resp`.
    pub fn handle_pdelay_resp(
        &mut self,
        t2: Timestamp,
        requesting_port_identity: PortIdentity,
    ) {
        self.peer_capture
            .record_request_receipt(t2, requesting_port_identity, self.port_ds.port_identity);
    }

    /// T3 (`responseOriginTimestamp`) from the matching two-step
    /// `Pdelay_Resp_Follow_Up`.
    pub fn handle_pdelay_resp_follow_up(
        &mut self,
        t3: Timestamp,
        requesting_port_identity: PortIdentity,
    ) {
        self.peer_capture
            .record_response_origin(t3, requesting_port_identity, self.port_ds.port_identity);
    }

    /// T4: local hardware ingress timestamp for an incoming `Pdelay_Resp`.
    pub fn handle_pdelay_resp_ingress(&mut self, t4: Timestamp) {
        self.peer_capture.record_resp_ingress(t4);
    }

    /// Drain a completed peer-delay measurement into `portDS.peerMeanPathDelay`,
    /// the only legal path to that field (§4.5 "P2P").
    pub fn poll_peer_delay(&mut self) -> Option<TimeInterval> {
        let mpd = self.peer_capture.poll()?;
        self.port_ds.peer_mean_path_delay = mpd;
        Some(mpd)
    }

    /// Drain a completed capture cycle and feed `currentDS` + the servo, if
    /// P2P is not in effect for this port (§4.5 "P2P suppression").
    pub fn poll_sync(
        &mut self,
        current_ds: &mut CurrentDS,
        hal: &mut impl Hal,
    ) -> Option<crate::sync::SyncResult> {
        let result = self.capture.poll()?;

        if self.port_ds.delay_mechanism == crate::datastructures::datasets::DelayMechanism::EndToEnd {
            current_ds.record_sync_cycle(result.offset_from_master, result.mean_path_delay);
        }

        self.health.record_offset(result.offset_from_master);

        if result.clamped || result.ordering_violation {
            self.failures_since_uncalibrated += 1;
        } else {
            self.successes_since_uncalibrated += 1;
        }

        let step = self.servo.step_for(result.offset_from_master);
        let _ = hal.adjust_clock(step);

        Some(result)
    }

    /// Whether the Uncalibrated→Slave heuristic gate is satisfied (§4.6).
    fn uncalibrated_heuristic_satisfied(&self) -> bool {
        self.successes_since_uncalibrated >= UNCALIBRATED_MIN_SUCCESSES
            && self.failures_since_uncalibrated == 0
    }

    /// The scheduler's periodic callback (§4.6 "Timer discipline"). `step`
    /// is the elapsed time since the previous `tick`.
    #[allow(clippy::too_many_arguments)]
    pub fn tick(
        &mut self,
        now: Timestamp,
        step: TimeInterval,
        default_ds: &DefaultDS,
        current_ds: &mut CurrentDS,
        parent_ds: &mut ParentDS,
        hal: &mut impl Hal,
    ) {
        self.time_since_announce = self.time_since_announce.saturating_add(step).value;
        self.time_since_sync = self.time_since_sync.saturating_add(step).value;
        self.time_since_delay_req = self.time_since_delay_req.saturating_add(step).value;
        self.time_since_pdelay_req = self.time_since_pdelay_req.saturating_add(step).value;
        self.time_since_parent_announce = self.time_since_parent_announce.saturating_add(step).value;
        self.time_in_pre_master = self.time_in_pre_master.saturating_add(step).value;
        self.time_since_heartbeat = self.time_since_heartbeat.saturating_add(step).value;

        // A port a boundary-clock orchestrator has pinned into relaying
        // another port's grandmaster does not run its own election this
        // tick; the orchestrator already decided its role (§4.7).
        if self.relay_steps_removed.is_none() {
            self.run_bmca(now, default_ds, current_ds, parent_ds, hal);
        }

        if self.port_ds.port_state.is_master_like() {
            let interval = log_interval_seconds(self.port_ds.log_announce_interval);
            if self.time_since_announce >= interval {
                self.time_since_announce = TimeInterval::ZERO;
                let body = self.build_announce(default_ds, parent_ds);
                let _ = hal.send_announce(&body);
            }
        }

        if self.port_ds.port_state == PortState::Master {
            let interval = log_interval_seconds(self.port_ds.log_sync_interval);
            if self.time_since_sync >= interval {
                self.time_since_sync = TimeInterval::ZERO;
                self.sequence_id = self.sequence_id.wrapping_add(1);
                let ts = hal.get_timestamp();
                let _ = hal.send_sync(&SyncBody {
                    origin_timestamp: ts,
                });
                let _ = hal.send_follow_up(&FollowUpBody {
                    precise_origin_timestamp: ts,
                });
            }
        }

        if self.port_ds.port_state.is_slave_like()
            && self.port_ds.delay_mechanism == DelayMechanism::EndToEnd
        {
            let interval = log_interval_seconds(self.port_ds.log_min_delay_req_interval);
            if self.time_since_delay_req >= interval {
                self.time_since_delay_req = TimeInterval::ZERO;
                self.sequence_id = self.sequence_id.wrapping_add(1);
                let origin_ts = hal.get_timestamp();
                let _ = hal.send_delay_req(&DelayReqBody {
                    origin_timestamp: origin_ts,
                });
                let t3 = hal
                    .get_tx_timestamp(self.sequence_id)
                    .unwrap_or(origin_ts);
                self.capture.record_delay_req_egress(t3);
            }
        }

        // Peer-delay runs on its own cadence, independent of master/slave
        // role — a P2P port measures its link even while `Master` or
        // `Listening` (§4.5 "P2P").
        if self.port_ds.delay_mechanism == DelayMechanism::PeerToPeer {
            let interval = log_interval_seconds(self.port_ds.log_min_delay_req_interval);
            if self.time_since_pdelay_req >= interval {
                self.time_since_pdelay_req = TimeInterval::ZERO;
                self.sequence_id = self.sequence_id.wrapping_add(1);
                let origin_ts = hal.get_timestamp();
                let _ = hal.send_pdelay_req(&PdelayReqBody {
                    origin_timestamp: origin_ts,
                });
                let t1 = hal
                    .get_tx_timestamp(self.sequence_id)
                    .unwrap_or(origin_ts);
                self.peer_capture.record_req_egress(t1);
            }
        }

        if self.port_ds.port_state.is_slave_like() {
            let timeout = self.port_ds.announce_receipt_timeout_interval();
            if timeout != TimeInterval::ZERO && self.time_since_parent_announce >= timeout {
                self.apply(Event::AnnounceReceiptTimeout, hal);
            }
        }

        if self.port_ds.port_state == PortState::PreMaster
            && self.time_in_pre_master >= QUALIFICATION_TIMEOUT
        {
            self.apply(Event::QualificationTimeout, hal);
        }

        if self.time_since_heartbeat >= TimeInterval::from_nanos(1_000_000_000) {
            self.time_since_heartbeat = TimeInterval::ZERO;
            self.health.record_heartbeat();
        }
    }

    fn run_bmca(
        &mut self,
        now: Timestamp,
        default_ds: &DefaultDS,
        current_ds: &mut CurrentDS,
        parent_ds: &mut ParentDS,
        hal: &mut impl Hal,
    ) {
        let timeout = self.port_ds.announce_receipt_timeout_interval();
        if timeout != TimeInterval::ZERO {
            self.foreign_masters.purge_older_than(now, timeout);
        }

        let entries: arrayvec::ArrayVec<_, { crate::datastructures::datasets::MAX_FOREIGN_MASTERS }> =
            self.foreign_masters.iter().copied().collect();

        let best_index = bmc::select_best(&entries);
        self.health
            .record_bmca_selection(best_index.map(|i| i as i32));

        let local = PriorityVector::from_default_ds(default_ds);
        let best_foreign = best_index.map(|i| {
            (
                PriorityVector::from_announce(&entries[i].announce_body),
                entries[i].source_port_identity,
                entries[i].announce_body,
            )
        });

        let recommendation = bmc::recommend(
            &local,
            best_foreign.as_ref().map(|(v, p, _)| (v, *p)),
        );

        match recommendation {
            Recommendation::Master => {
                // `RS_MASTER` is defined from every state that needs it,
                // including `Slave --RS_MASTER--> PreMaster` (§4.6); states
                // without a defined transition no-op in `apply`.
                self.apply(Event::RsMaster, hal);
                if self.port_ds.port_state.is_master_like() {
                    current_ds.reset_as_master();
                    parent_ds.adopt_local(
                        self.port_ds.port_identity,
                        default_ds.clock_identity(),
                        default_ds.clock_quality,
                        default_ds.priority_1,
                        default_ds.priority_2,
                    );
                }
            }
            Recommendation::Slave { winner, winner_port } => {
                let was_non_slave = !self.port_ds.port_state.is_slave_like();
                self.apply(Event::RsSlave, hal);
                if was_non_slave {
                    current_ds.steps_removed = winner.steps_removed + 1;
                }
                if let Some((_, _, body)) = best_foreign {
                    parent_ds.adopt_foreign(
                        winner_port,
                        winner.grandmaster_identity,
                        body.grandmaster_clock_quality,
                        winner.priority_1,
                        winner.priority_2,
                    );
                }
            }
            Recommendation::Passive => {
                self.apply(Event::RsPassive, hal);
            }
        }

        if self.port_ds.port_state == PortState::Uncalibrated
            && self.uncalibrated_heuristic_satisfied()
        {
            self.port_ds.port_state = PortState::Slave;
            hal.on_state_change(PortState::Uncalibrated, PortState::Slave);
        }
    }

    fn build_announce(&self, _default_ds: &DefaultDS, parent_ds: &ParentDS) -> AnnounceBody {
        AnnounceBody {
            origin_timestamp: Timestamp::default(),
            current_utc_offset: 37,
            grandmaster_priority_1: parent_ds.grandmaster_priority_1,
            grandmaster_clock_quality: parent_ds.grandmaster_clock_quality,
            grandmaster_priority_2: parent_ds.grandmaster_priority_2,
            grandmaster_identity: parent_ds.grandmaster_identity,
            steps_removed: self.relay_steps_removed.unwrap_or(0),
            time_source: crate::datastructures::common::TimeSource::InternalOscillator,
        }
    }
}

/// `2^log_interval` seconds, expressed as a [`TimeInterval`] (§4.6). A
/// negative-infinity-style sentinel (very negative exponent) collapses to
/// zero so a misconfigured port never divides by zero downstream.
fn log_interval_seconds(log_interval: i8) -> TimeInterval {
    if log_interval >= 0 && log_interval < 63 {
        TimeInterval::from_nanos(1_000_000_000i64.saturating_mul(1i64 << log_interval))
    } else if log_interval < 0 && log_interval > -30 {
        TimeInterval::from_nanos(1_000_000_000i64 >> (-log_interval))
    } else {
        TimeInterval::ZERO
    }
}
