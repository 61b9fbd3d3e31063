//! A multi-port PTP clock relaying one upstream grandmaster across every
//! other port (§4.7 "Boundary clock").
//!
//! Grounded on `statime::PtpInstance`'s per-port slot array; the
//! per-tick relay-propagation step is this crate's own addition, since the
//! distilled spec names the behavior without naming an implementation
//! shape for it.

use arrayvec::ArrayVec;

use crate::{
    clock::{dispatch, management::ManagementResponse},
    config::{ClockConfig, PortConfig},
    datastructures::{
        datasets::{CurrentDS, DefaultDS, ParentDS, TimePropertiesDS},
        messages::Header,
    },
    error::{PtpError, PtpResult},
    hal::Hal,
    port::Port,
    time::{TimeInterval, Timestamp},
};

/// Upper bound on ports per boundary clock (§4.7, §5).
pub const MAX_PORTS: usize = 16;

struct PortSlot {
    port: Port,
    current_ds: CurrentDS,
    parent_ds: ParentDS,
}

pub struct BoundaryClock {
    pub default_ds: DefaultDS,
    pub time_properties_ds: TimePropertiesDS,
    ports: ArrayVec<PortSlot, MAX_PORTS>,
}

impl BoundaryClock {
    /// `port_configs.len()` must not exceed [`MAX_PORTS`]; excess entries
    /// are silently dropped since this is a construction-time invariant the
    /// embedder controls, not an ingress condition to report through
    /// `PtpResult`.
    pub fn new(
        clock_config: &ClockConfig,
        port_configs: &[PortConfig],
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
        let ports = port_configs
            .iter()
            .take(MAX_PORTS)
            .map(|config| PortSlot {
                port: Port::new(config),
                current_ds: CurrentDS::default(),
                parent_ds: ParentDS::default(),
            })
            .collect();
        Self {
            default_ds,
            time_properties_ds,
            ports,
        }
    }

    pub fn port_count(&self) -> usize {
        self.ports.len()
    }

    /// Drive every port's timer cadence, after re-pinning the relay role
    /// for this tick (§4.6, §4.7).
    pub fn tick(&mut self, now: Timestamp, step: TimeInterval, hal: &mut impl Hal) {
        self.propagate_relay_state(hal);
        for slot in self.ports.iter_mut() {
            slot.port.tick(
                now,
                step,
                &self.default_ds,
                &mut slot.current_ds,
                &mut slot.parent_ds,
                hal,
            );
        }
    }

    /// Apply one decoded ingress frame on `port_index` (§4.1, §6.2).
    pub fn process_message(
        &mut self,
        port_index: usize,
        header: &Header,
        buf: &[u8],
        ingress_ts: Timestamp,
        hal: &mut impl Hal,
    ) -> PtpResult<Option<ManagementResponse>> {
        let slot = self.ports.get_mut(port_index).ok_or(PtpError::InvalidPort)?;
        dispatch::dispatch(
            &mut slot.port,
            &self.default_ds,
            &mut slot.current_ds,
            &mut slot.parent_ds,
            header,
            buf,
            ingress_ts,
            hal,
        )
    }

    /// Pin every port but the one currently relaying upstream sync into the
    /// `Master` role, inheriting that port's `parentDS`/`stepsRemoved`
    /// (§4.7). With no port currently slave-like, every port reverts to
    /// running its own BMCA independently — this is the startup/isolated
    /// state, not a steady-state boundary clock.
    ///
    /// Propagation lags the slave port's own transition by up to one tick:
    /// this reads `currentDS`/`parentDS` as they stood at the *start* of
    /// this tick, before `Port::tick` runs for any port this same call.
    fn propagate_relay_state(&mut self, hal: &mut impl Hal) {
        let slave_index = self
            .ports
            .iter()
            .position(|slot| slot.port.port_ds.port_state.is_slave_like());

        let Some(slave_index) = slave_index else {
            for slot in self.ports.iter_mut() {
                slot.port.set_relay_steps_removed(None);
            }
            return;
        };

        let steps_removed = self.ports[slave_index].current_ds.steps_removed;
        let parent_ds = self.ports[slave_index].parent_ds;

        for (index, slot) in self.ports.iter_mut().enumerate() {
            if index == slave_index {
                slot.port.set_relay_steps_removed(None);
                continue;
            }
            slot.parent_ds = parent_ds;
            slot.current_ds.steps_removed = steps_removed;
            slot.port.set_relay_steps_removed(Some(steps_removed));
            slot.port.force_master(hal);
        }
    }
}
