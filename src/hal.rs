//! The HAL trait bundle the embedding runtime implements (§6.1).
//!
//! Grounded on `statime::port::Clock` / `statime::time::TimeSenderRunner`
//! equivalents: the core never does I/O or touches wall-clock time itself,
//! it only calls out through this trait. No default methods — every
//! embedder must decide its own transport and clock discipline.

use crate::{
    datastructures::messages::{
        AnnounceBody, DelayReqBody, DelayRespBody, FollowUpBody, PdelayReqBody, PdelayRespBody,
        PdelayRespFollowUpBody, SyncBody,
    },
    error::PtpResult,
    time::Timestamp,
};

/// Functions the protocol core calls out to; never called back into by the
/// core while one of these is executing (§6.1 "non-blocking").
pub trait Hal {
    fn send_announce(&mut self, body: &AnnounceBody) -> PtpResult<()>;
    fn send_sync(&mut self, body: &SyncBody) -> PtpResult<()>;
    fn send_follow_up(&mut self, body: &FollowUpBody) -> PtpResult<()>;
    fn send_delay_req(&mut self, body: &DelayReqBody) -> PtpResult<()>;
    fn send_delay_resp(&mut self, body: &DelayRespBody) -> PtpResult<()>;
    fn send_pdelay_req(&mut self, body: &PdelayReqBody) -> PtpResult<()>;
    fn send_pdelay_resp(&mut self, body: &PdelayRespBody) -> PtpResult<()>;
    fn send_pdelay_resp_follow_up(&mut self, body: &PdelayRespFollowUpBody) -> PtpResult<()>;

    /// Current time from the local clock. Sub-microsecond resolution is
    /// expected; this call must never fail (§6.1).
    fn get_timestamp(&mut self) -> Timestamp;

    /// Hardware TX timestamp for the egress identified by `sequence_id`.
    fn get_tx_timestamp(&mut self, sequence_id: u16) -> PtpResult<Timestamp>;

    /// Step the local clock by `delta_ns` (signed).
    fn adjust_clock(&mut self, delta_ns: i64) -> PtpResult<()>;

    /// Trim the local oscillator by `ppb` parts-per-billion.
    fn adjust_frequency(&mut self, ppb: f64) -> PtpResult<()>;

    /// Best-effort notification of a port state transition.
    fn on_state_change(
        &mut self,
        old: crate::datastructures::datasets::PortState,
        new: crate::datastructures::datasets::PortState,
    );

    /// Best-effort notification of a HAL-reported fault.
    fn on_fault(&mut self, reason: &str);
}
