use super::MessageBody;
use crate::{
    datastructures::{common::{PortIdentity, WireTimestamp}, WireFormat},
    error::PtpError,
};

/// `Pdelay_Resp_Follow_Up` body (§3): 20 bytes. `responseOriginTimestamp` is
/// T3, the responder's local egress timestamp for the `Pdelay_Resp` it just
/// sent (§4.5 "P2P", two-step).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdelayRespFollowUpBody {
    pub response_origin_timestamp: WireTimestamp,
    pub requesting_port_identity: PortIdentity,
}

impl MessageBody for PdelayRespFollowUpBody {
    const BODY_LEN: usize = 20;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        self.response_origin_timestamp.serialize(&mut buffer[0..10])?;
        self.requesting_port_identity.serialize(&mut buffer[10..20])?;
        Ok(())
    }

    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            response_origin_timestamp: WireTimestamp::deserialize(&buffer[0..10])?,
            requesting_port_identity: PortIdentity::deserialize(&buffer[10..20])?,
        })
    }
}
