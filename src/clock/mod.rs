//! Clock orchestrators (C7, §4.7): the two ways a `Port` (or several) gets
//! assembled into something that runs the protocol end to end.
//!
//! Grounded on `statime::PtpInstance` for the overall "data sets + ports +
//! dispatch" shape, split here into [`OrdinaryClock`] (one port) and
//! [`BoundaryClock`] (several, with inter-port relay), plus the
//! [`TransparentClock`] relay point that never runs BMCA or owns a port at
//! all.

mod boundary;
mod dispatch;
mod ordinary;
pub mod management;
pub mod transparent;

pub use boundary::{BoundaryClock, MAX_PORTS};
pub use dispatch::dispatch;
pub use management::ManagementResponse;
pub use ordinary::OrdinaryClock;
pub use transparent::TransparentClock;
