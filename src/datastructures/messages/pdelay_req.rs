use super::MessageBody;
use crate::{
    datastructures::{common::WireTimestamp, WireFormat},
    error::PtpError,
};

/// `Pdelay_Req` body (§3): 10 bytes. `originTimestamp` is unused by the
/// peer-delay computation, which instead captures T1 as the local egress
/// timestamp of this message (§4.5 "P2P").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdelayReqBody {
    pub origin_timestamp: WireTimestamp,
}

impl MessageBody for PdelayReqBody {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let body = PdelayReqBody {
            origin_timestamp: WireTimestamp::new(11, 12),
        };
        let mut buf = [0u8; PdelayReqBody::BODY_LEN];
        body.serialize_body(&mut buf).unwrap();
        assert_eq!(PdelayReqBody::deserialize_body(&buf).unwrap(), body);
    }
}
