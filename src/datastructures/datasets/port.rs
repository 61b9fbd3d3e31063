use crate::datastructures::common::{PortIdentity, TimeInterval};

/// `delayMechanism` (§3): which pipeline is allowed to mutate which mean
/// path delay field. E2E feeds `currentDS.meanPathDelay`; P2P feeds
/// `portDS.peerMeanPathDelay` and must never touch the other (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DelayMechanism {
    EndToEnd,
    PeerToPeer,
}

/// The nine port states of the IEEE1588-2019 port state machine (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortState {
    Initializing,
    Faulty,
    Disabled,
    Listening,
    PreMaster,
    Master,
    Passive,
    Uncalibrated,
    Slave,
}

impl PortState {
    /// States in which this port is acting as (or trying to become) a
    /// master, per §4.6.
    pub fn is_master_like(self) -> bool {
        matches!(self, Self::PreMaster | Self::Master)
    }

    /// States in which this port is synchronizing to a remote master, per
    /// §4.6.
    pub fn is_slave_like(self) -> bool {
        matches!(self, Self::Uncalibrated | Self::Slave)
    }
}

/// `portDS` (§3): per-port identity, state, and timing configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortDS {
    pub port_identity: PortIdentity,
    pub port_state: PortState,
    pub log_min_delay_req_interval: i8,
    pub log_announce_interval: i8,
    pub log_sync_interval: i8,
    pub announce_receipt_timeout: u8,
    /// `portDS.peerMeanPathDelay`, updated only by the peer-delay pipeline
    /// (§4.5). Untouched when `delay_mechanism` is `EndToEnd`.
    pub peer_mean_path_delay: TimeInterval,
    pub delay_mechanism: DelayMechanism,
    pub version_number: u8,
}

impl PortDS {
    pub fn new(port_identity: PortIdentity, delay_mechanism: DelayMechanism) -> Self {
        Self {
            port_identity,
            port_state: PortState::Initializing,
            log_min_delay_req_interval: 0,
            log_announce_interval: 1,
            log_sync_interval: 0,
            announce_receipt_timeout: 3,
            peer_mean_path_delay: TimeInterval::ZERO,
            delay_mechanism,
            version_number: 2,
        }
    }

    /// The window after which a foreign master's announce goes stale:
    /// `announceReceiptTimeout × 2^logAnnounceInterval` seconds (§4.3).
    pub fn announce_receipt_timeout_interval(&self) -> TimeInterval {
        let seconds_per_interval: i64 = if self.log_announce_interval >= 0 {
            1i64 << self.log_announce_interval
        } else {
            return TimeInterval::ZERO;
        };
        TimeInterval::from_nanos(
            self.announce_receipt_timeout as i64 * seconds_per_interval * 1_000_000_000,
        )
    }
}
