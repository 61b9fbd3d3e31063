use super::ClockIdentity;
use crate::{datastructures::WireFormat, error::PtpError};

/// `ClockIdentity` + 16-bit `portNumber` (§3). Used as the key into
/// `foreignMasterList` and to match `Delay_Resp` against its requester.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct PortIdentity {
    pub clock_identity: ClockIdentity,
    pub port_number: u16,
}

impl WireFormat for PortIdentity {
    fn wire_size(&self) -> usize {
        10
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < 10 {
            return Err(PtpError::InvalidMessageSize);
        }
        self.clock_identity.serialize(&mut buffer[0..8])?;
        buffer[8..10].copy_from_slice(&self.port_number.to_be_bytes());
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < 10 {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            clock_identity: ClockIdentity::deserialize(&buffer[0..8])?,
            port_number: u16::from_be_bytes([buffer[8], buffer[9]]),
        })
    }
}
