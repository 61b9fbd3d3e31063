use crate::datastructures::common::{ClockIdentity, ClockQuality, PortIdentity};

/// `parentDS` (§3).
///
/// Invariant: when the local clock is the best master,
/// `parent_port_identity.clock_identity == defaultDS.clock_identity` and
/// the `grandmaster_*` fields mirror `defaultDS` — enforced by
/// [`ParentDS::adopt_local`], which the BMCA engine calls on an `RS_MASTER`
/// recommendation (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentDS {
    pub parent_port_identity: PortIdentity,
    /// `parentDS.parentStats` — whether the observed variance/phase-change
    /// fields below are populated by a stats-aware parent.
    pub parent_stats: bool,
    pub observed_parent_offset_scaled_log_variance: u16,
    pub observed_parent_clock_phase_change_rate: i32,
    pub grandmaster_identity: ClockIdentity,
    pub grandmaster_clock_quality: ClockQuality,
    pub grandmaster_priority_1: u8,
    pub grandmaster_priority_2: u8,
}

impl ParentDS {
    /// Adopt the local clock as parent (this clock is the grandmaster).
    pub fn adopt_local(
        &mut self,
        local_port_identity: PortIdentity,
        clock_identity: ClockIdentity,
        clock_quality: ClockQuality,
        priority_1: u8,
        priority_2: u8,
    ) {
        self.parent_port_identity = local_port_identity;
        self.parent_stats = false;
        self.observed_parent_offset_scaled_log_variance = 0xffff;
        self.observed_parent_clock_phase_change_rate = 0;
        self.grandmaster_identity = clock_identity;
        self.grandmaster_clock_quality = clock_quality;
        self.grandmaster_priority_1 = priority_1;
        self.grandmaster_priority_2 = priority_2;
    }

    /// Adopt a foreign master, inheriting its grandmaster fields from its
    /// `Announce` body (§4.4, end-to-end scenario 2).
    pub fn adopt_foreign(
        &mut self,
        parent_port_identity: PortIdentity,
        grandmaster_identity: ClockIdentity,
        grandmaster_clock_quality: ClockQuality,
        grandmaster_priority_1: u8,
        grandmaster_priority_2: u8,
    ) {
        self.parent_port_identity = parent_port_identity;
        self.grandmaster_identity = grandmaster_identity;
        self.grandmaster_clock_quality = grandmaster_clock_quality;
        self.grandmaster_priority_1 = grandmaster_priority_1;
        self.grandmaster_priority_2 = grandmaster_priority_2;
    }
}

impl Default for ParentDS {
    fn default() -> Self {
        Self {
            parent_port_identity: PortIdentity::default(),
            parent_stats: false,
            observed_parent_offset_scaled_log_variance: 0xffff,
            observed_parent_clock_phase_change_rate: 0,
            grandmaster_identity: ClockIdentity::default(),
            grandmaster_clock_quality: ClockQuality::default(),
            grandmaster_priority_1: 255,
            grandmaster_priority_2: 255,
        }
    }
}
