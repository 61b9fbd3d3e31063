use super::MessageBody;
use crate::{
    datastructures::{common::WireTimestamp, WireFormat},
    error::PtpError,
};

/// `Delay_Req` body (§3): 10 bytes. `originTimestamp` is unused by the E2E
/// delay computation, which instead captures T3 as the local egress
/// timestamp of this message (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayReqBody {
    pub origin_timestamp: WireTimestamp,
}

impl MessageBody for DelayReqBody {
    const BODY_LEN: usize = 10;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        self.origin_timestamp.serialize(buffer)
    }

    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            origin_timestamp: WireTimestamp::deserialize(buffer)?,
        })
    }
}
