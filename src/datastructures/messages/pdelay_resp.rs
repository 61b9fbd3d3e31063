use super::MessageBody;
use crate::{
    datastructures::{common::{PortIdentity, WireTimestamp}, WireFormat},
    error::PtpError,
};

/// `Pdelay_Resp` body (§3): 20 bytes. `requestReceiptTimestamp` is T2, the
/// responder's local ingress timestamp for the matching `Pdelay_Req`;
/// `requestingPortIdentity` is matched against the requester's own identity
/// before it accepts T2 (§4.5 "P2P").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PdelayRespBody {
    pub request_receipt_timestamp: WireTimestamp,
    pub requesting_port_identity: PortIdentity,
}

impl MessageBody for PdelayRespBody {
    const BODY_LEN: usize = 20;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        self.request_receipt_timestamp.serialize(&mut buffer[0..10])?;
        self.requesting_port_identity.serialize(&mut buffer[10..20])?;
        Ok(())
    }

    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            request_receipt_timestamp: WireTimestamp::deserialize(&buffer[0..10])?,
            requesting_port_identity: PortIdentity::deserialize(&buffer[10..20])?,
        })
    }
}
