//! Wire-format data structures (C1 codec) as defined by IEEE 1588-2019.
//!
//! Module layout mirrors `statime::datastructures`: `common` holds shared
//! primitive types, `datasets` holds the mutable data sets (C3), `messages`
//! holds the per-type message bodies and the common header codec.

pub mod common;
pub mod datasets;
pub mod messages;

use crate::error::PtpError;

/// Encode/decode contract every wire type in this crate implements.
/// Grounded on `statime::datastructures::WireFormat`, extended to return the
/// crate-wide [`PtpError`] instead of a codec-private error enum so that
/// `messages::decode_body`/`encode` can propagate it directly (§4.1).
pub(crate) trait WireFormat: Sized {
    /// The byte size on the wire of this object.
    fn wire_size(&self) -> usize;

    /// Serialize into `buffer`. `buffer` must be at least `wire_size()`
    /// bytes; returns [`PtpError::InvalidMessageSize`] otherwise (the codec
    /// layer maps this to `BufferTooSmall` at the `encode` entry point).
    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError>;

    /// Deserialize from `buffer`. Returns [`PtpError::InvalidMessageSize`]
    /// if `buffer` is shorter than the type's fixed wire size.
    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError>;
}
