use crate::{datastructures::WireFormat, error::PtpError};

/// The identity of a PTP node: an opaque 8-byte value, ordered by unsigned
/// big-endian integer interpretation (§3). A common approach is deriving it
/// from a MAC address (see [`ClockIdentity::from_mac_address`]), as in
/// *IEEE1588-2019 section 7.5.2.2.2*.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, PartialOrd, Ord, Hash)]
pub struct ClockIdentity(pub [u8; 8]);

impl ClockIdentity {
    /// Fill the first six bytes with a MAC address and the rest with zeroes.
    pub fn from_mac_address(addr: [u8; 6]) -> Self {
        let mut bytes = [0u8; 8];
        bytes[0..6].copy_from_slice(&addr);
        Self(bytes)
    }
}

impl WireFormat for ClockIdentity {
    fn wire_size(&self) -> usize {
        8
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < 8 {
            return Err(PtpError::InvalidMessageSize);
        }
        buffer[0..8].copy_from_slice(&self.0);
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError> {
        let slice = buffer.get(0..8).ok_or(PtpError::InvalidMessageSize)?;
        Ok(Self(slice.try_into().unwrap()))
    }
}

impl core::fmt::Display for ClockIdentity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, byte) in self.0.iter().enumerate() {
            if i != 0 {
                write!(f, ":")?;
            }
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
