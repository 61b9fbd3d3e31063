//! Construction-time configuration (`SPEC_FULL.md` §A.3).
//!
//! Grounded on `statime::config::{InstanceConfig, PortConfig}`: plain
//! structs injected at construction, no file/TOML loading in the core
//! (§6.4 "Persisted state: None" — that belongs to the embedding daemon).

use crate::datastructures::{
    common::{ClockIdentity, ClockQuality, PortIdentity},
    datasets::DelayMechanism,
};

/// Construction-time configuration for one clock's `defaultDS` (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfig {
    pub clock_identity: ClockIdentity,
    pub number_ports: u16,
    pub clock_quality: ClockQuality,
    pub priority_1: u8,
    pub priority_2: u8,
    pub domain_number: u8,
    pub slave_only: bool,
}

/// Construction-time configuration for one port's `portDS` (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortConfig {
    pub port_identity: PortIdentity,
    pub delay_mechanism: DelayMechanism,
    pub log_min_delay_req_interval: i8,
    pub log_announce_interval: i8,
    pub announce_receipt_timeout: u8,
    pub log_sync_interval: i8,
    /// Ports that never run BMCA's `RS_MASTER`/`RS_GRAND_MASTER`
    /// recommendation; mirrors `defaultDS.slaveOnly` scoped to one port.
    pub master_only: bool,
}
