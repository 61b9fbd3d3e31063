use super::MessageBody;
use crate::{
    datastructures::{common::{PortIdentity, WireTimestamp}, WireFormat},
    error::PtpError,
};

/// `Delay_Resp` body (§3): 20 bytes. `receiveTimestamp` is T4;
/// `requestingPortIdentity` is matched against the port's own identity
/// before the message is accepted (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRespBody {
    pub receive_timestamp: WireTimestamp,
    pub requesting_port_identity: PortIdentity,
}

impl MessageBody for DelayRespBody {
    const BODY_LEN: usize = 20;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        self.receive_timestamp.serialize(&mut buffer[0..10])?;
        self.requesting_port_identity.serialize(&mut buffer[10..20])?;
        Ok(())
    }

    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            receive_timestamp: WireTimestamp::deserialize(&buffer[0..10])?,
            requesting_port_identity: PortIdentity::deserialize(&buffer[10..20])?,
        })
    }
}
