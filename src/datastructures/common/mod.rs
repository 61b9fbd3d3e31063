//! Common data structures used throughout the protocol (grounded on
//! `statime::datastructures::common`).

mod clock_identity;
mod clock_quality;
mod leap_indicator;
mod port_identity;
mod time_interval_wire;
mod time_source;
mod tlv;
mod wire_timestamp;

pub use clock_identity::ClockIdentity;
pub use clock_quality::{ClockAccuracy, ClockQuality};
pub use leap_indicator::LeapIndicator;
pub use port_identity::PortIdentity;
pub use time_source::TimeSource;
pub use tlv::{RawTlv, TlvType};
pub use wire_timestamp::WireTimestamp;

pub use crate::time::TimeInterval;
