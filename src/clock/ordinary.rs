//! A single-port PTP clock: either the grandmaster-adjacent master of its
//! segment or synchronizing as a slave, never both at once (§4.7
//! "Ordinary clock").
//!
//! Grounded on `statime::OrdinaryClock`'s role as the thin owner gluing one
//! `Port` to its data sets and handing ingress frames to the shared
//! dispatch logic.

use crate::{
    clock::{dispatch, management::ManagementResponse},
    config::{ClockConfig, PortConfig},
    datastructures::{
        datasets::{CurrentDS, DefaultDS, ParentDS, TimePropertiesDS},
        messages::Header,
    },
    error::PtpResult,
    hal::Hal,
    port::Port,
    time::{TimeInterval, Timestamp},
};

pub struct OrdinaryClock {
    pub default_ds: DefaultDS,
    pub current_ds: CurrentDS,
    pub parent_ds: ParentDS,
    pub time_properties_ds: TimePropertiesDS,
    pub port: Port,
}

impl OrdinaryClock {
    pub fn new(
        clock_config: &ClockConfig,
        port_config: &PortConfig,
        time_properties_ds: TimePropertiesDS,
    ) -> Self {
        let default_ds = DefaultDS::new(
            clock_config.clock_identity,
            clock_config.number_ports,
            clock_config.clock_quality,
            clock_config.priority_1,
            clock_config.priority_2,
            clock_config.domain_number,
            clock_config.slave_only,
        );
        Self {
            default_ds,
            current_ds: CurrentDS::default(),
            parent_ds: ParentDS::default(),
            time_properties_ds,
            port: Port::new(port_config),
        }
    }

    /// Drive the port's timer cadence (§4.6 "Timer discipline").
    pub fn tick(&mut self, now: Timestamp, step: TimeInterval, hal: &mut impl Hal) {
        self.port.tick(
            now,
            step,
            &self.default_ds,
            &mut self.current_ds,
            &mut self.parent_ds,
            hal,
        );
    }

    /// Apply one decoded ingress frame (§4.1, §6.2).
    pub fn process_message(
        &mut self,
        header: &Header,
        buf: &[u8],
        ingress_ts: Timestamp,
        hal: &mut impl Hal,
    ) -> PtpResult<Option<ManagementResponse>> {
        dispatch::dispatch(
            &mut self.port,
            &self.default_ds,
            &mut self.current_ds,
            &mut self.parent_ds,
            header,
            buf,
            ingress_ts,
            hal,
        )
    }
}
