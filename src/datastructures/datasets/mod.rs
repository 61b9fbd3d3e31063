//! The mutable data sets (C3, §3) and their bounded `foreignMasterList`.
//!
//! Grounded on `statime::datastructures::datasets`: one module per data
//! set, each a plain struct with typed accessors rather than a generic
//! key-value store, matching `statime::datastructures::datasets::current`
//! / `parent` / `time_properties`.

mod current;
mod default;
mod foreign_master;
mod parent;
mod port;
mod time_properties;

pub use current::CurrentDS;
pub use default::DefaultDS;
pub use foreign_master::{ForeignMasterEntry, ForeignMasterList, MAX_FOREIGN_MASTERS};
pub use parent::ParentDS;
pub use port::{DelayMechanism, PortDS, PortState};
pub use time_properties::TimePropertiesDS;
