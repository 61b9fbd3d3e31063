use crate::{datastructures::WireFormat, error::PtpError};

/// `timeSource` (§3, IEEE1588-2019 Table 7): the origin of a grandmaster's
/// time reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeSource {
    Atomic,
    Gnss,
    Terrestrial,
    Ptp,
    Ntp,
    HandSet,
    Other,
    InternalOscillator,
    /// A profile- or vendor-defined value outside the standard table.
    Other2(u8),
}

impl TimeSource {
    fn to_code(self) -> u8 {
        match self {
            Self::Atomic => 0x10,
            Self::Gnss => 0x20,
            Self::Terrestrial => 0x30,
            Self::Ptp => 0x40,
            Self::Ntp => 0x50,
            Self::HandSet => 0x60,
            Self::Other => 0x90,
            Self::InternalOscillator => 0xa0,
            Self::Other2(code) => code,
        }
    }

    fn from_code(code: u8) -> Self {
        match code {
            0x10 => Self::Atomic,
            0x20 => Self::Gnss,
            0x30 => Self::Terrestrial,
            0x40 => Self::Ptp,
            0x50 => Self::Ntp,
            0x60 => Self::HandSet,
            0x90 => Self::Other,
            0xa0 => Self::InternalOscillator,
            other => Self::Other2(other),
        }
    }
}

impl Default for TimeSource {
    fn default() -> Self {
        Self::InternalOscillator
    }
}

impl WireFormat for TimeSource {
    fn wire_size(&self) -> usize {
        1
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.is_empty() {
            return Err(PtpError::InvalidMessageSize);
        }
        buffer[0] = self.to_code();
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError> {
        let byte = *buffer.first().ok_or(PtpError::InvalidMessageSize)?;
        Ok(Self::from_code(byte))
    }
}
