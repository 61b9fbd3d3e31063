use super::MessageBody;
use crate::{
    datastructures::{common::WireTimestamp, WireFormat},
    error::PtpError,
};

/// `Follow_Up` body (§3): 10 bytes. `preciseOriginTimestamp` is T1 for a
/// two-step clock (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FollowUpBody {
    pub precise_origin_timestamp: WireTimestamp,
}

impl MessageBody for FollowUpBody {
    const BODY_LEN: usize = 10;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        self.precise_origin_timestamp.serialize(buffer)
    }

    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            precise_origin_timestamp: WireTimestamp::deserialize(buffer)?,
        })
    }
}
