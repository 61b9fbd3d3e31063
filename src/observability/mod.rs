//! Observability hooks (C8): atomic counters, health snapshots, and
//! structured log call-outs. Nothing in this module or its callers performs
//! string formatting beyond handing fields to the `log` facade — see
//! `SPEC_FULL.md` §A.2.

pub mod counters;
pub mod fault_injection;
pub mod health;

pub use counters::{counter_increment, CounterId};
pub use health::{HealthRecord, SelfTestReport};

/// Severity for the `log(level, tag, code, msg)` hook of §4.8. Mirrors
/// `log::Level` so embedders using the `log` facade can map directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Numeric codes for the handful of structured log call-outs the core
/// emits. Kept small and explicit rather than stringly-typed so a
/// downstream structured logger can index on `code` without parsing `msg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum LogCode {
    SyncOrderingViolation = 1,
    OffsetClamped = 2,
    ForeignMasterListFull = 3,
    BmcaEmptySelection = 4,
    PortFaultDetected = 5,
    ResidenceTimeNegative = 6,
}

/// Best-effort structured log call-out. Never blocks, never allocates;
/// forwards to the `log` crate the way `statime::filters::basic` does with
/// `log::debug!`/`log::info!`.
pub fn log(level: LogLevel, tag: &str, code: LogCode, msg: &str) {
    match level {
        LogLevel::Error => log::error!(target: "ptp_core", "[{tag}] ({:?}) {msg}", code),
        LogLevel::Warn => log::warn!(target: "ptp_core", "[{tag}] ({:?}) {msg}", code),
        LogLevel::Info => log::info!(target: "ptp_core", "[{tag}] ({:?}) {msg}", code),
        LogLevel::Debug => log::debug!(target: "ptp_core", "[{tag}] ({:?}) {msg}", code),
        LogLevel::Trace => log::trace!(target: "ptp_core", "[{tag}] ({:?}) {msg}", code),
    }
}
