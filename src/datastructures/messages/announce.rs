use super::MessageBody;
use crate::{
    datastructures::{
        common::{ClockIdentity, ClockQuality, WireTimestamp},
        WireFormat,
    },
    error::PtpError,
};

/// The `Announce` message body (§3): 30 bytes, carrying the sender's
/// priority vector fields (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnnounceBody {
    pub origin_timestamp: WireTimestamp,
    pub current_utc_offset: i16,
    pub grandmaster_priority_1: u8,
    pub grandmaster_clock_quality: ClockQuality,
    pub grandmaster_priority_2: u8,
    pub grandmaster_identity: ClockIdentity,
    pub steps_removed: u16,
    pub time_source: crate::datastructures::common::TimeSource,
}

impl MessageBody for AnnounceBody {
    const BODY_LEN: usize = 30;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        self.origin_timestamp.serialize(&mut buffer[0..10])?;
        buffer[10..12].copy_from_slice(&self.current_utc_offset.to_be_bytes());
        buffer[12] = 0; // reserved
        buffer[13] = self.grandmaster_priority_1;
        self.grandmaster_clock_quality.serialize(&mut buffer[14..18])?;
        buffer[18] = self.grandmaster_priority_2;
        self.grandmaster_identity.serialize(&mut buffer[19..27])?;
        buffer[27..29].copy_from_slice(&self.steps_removed.to_be_bytes());
        self.time_source.serialize(&mut buffer[29..30])?;
        Ok(())
    }

    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            origin_timestamp: WireTimestamp::deserialize(&buffer[0..10])?,
            current_utc_offset: i16::from_be_bytes([buffer[10], buffer[11]]),
            grandmaster_priority_1: buffer[13],
            grandmaster_clock_quality: ClockQuality::deserialize(&buffer[14..18])?,
            grandmaster_priority_2: buffer[18],
            grandmaster_identity: ClockIdentity::deserialize(&buffer[19..27])?,
            steps_removed: u16::from_be_bytes([buffer[27], buffer[28]]),
            time_source: crate::datastructures::common::TimeSource::deserialize(&buffer[29..30])?,
        })
    }
}
