use core::cmp::Ordering;

use crate::{datastructures::WireFormat, error::PtpError};

/// `grandmasterClockAccuracy` (IEEE1588-2019 Table 6). Values below
/// `0x20` are reserved; the PTP profile picks one of the named buckets
/// below, or `UNKNOWN` when the clock cannot estimate its own accuracy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockAccuracy(pub u8);

impl ClockAccuracy {
    pub const NS25: Self = Self(0x20);
    pub const NS100: Self = Self(0x21);
    pub const NS250: Self = Self(0x22);
    pub const US1: Self = Self(0x23);
    pub const US2_5: Self = Self(0x24);
    pub const US10: Self = Self(0x25);
    pub const US25: Self = Self(0x26);
    pub const US100: Self = Self(0x27);
    pub const US250: Self = Self(0x28);
    pub const MS1: Self = Self(0x29);
    pub const MS2_5: Self = Self(0x2a);
    pub const MS10: Self = Self(0x2b);
    pub const MS25: Self = Self(0x2c);
    pub const MS100: Self = Self(0x2d);
    pub const MS250: Self = Self(0x2e);
    pub const S1: Self = Self(0x2f);
    pub const S10: Self = Self(0x30);
    pub const GT10S: Self = Self(0x31);
    pub const UNKNOWN: Self = Self(0xfe);

    /// The BMCA dataset-comparison algorithm (§4.4 / IEEE Figure 34)
    /// compares `clockAccuracy` by its raw numeric value, not by the
    /// semantic precision it represents (the raw scale already happens to
    /// run from most to least precise, which is why a plain `Ord`
    /// comparison matches the spec's "numerical ordering" clause).
    pub fn cmp_numeric(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Default for ClockAccuracy {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl WireFormat for ClockAccuracy {
    fn wire_size(&self) -> usize {
        1
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.is_empty() {
            return Err(PtpError::InvalidMessageSize);
        }
        buffer[0] = self.0;
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError> {
        let byte = *buffer.first().ok_or(PtpError::InvalidMessageSize)?;
        Ok(Self(byte))
    }
}

/// `grandmasterClockQuality` (§3): class, accuracy, and observed log
/// variance of a (potential) grandmaster clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct ClockQuality {
    pub clock_class: u8,
    pub clock_accuracy: ClockAccuracy,
    pub offset_scaled_log_variance: u16,
}

impl WireFormat for ClockQuality {
    fn wire_size(&self) -> usize {
        4
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < 4 {
            return Err(PtpError::InvalidMessageSize);
        }
        buffer[0] = self.clock_class;
        buffer[1] = self.clock_accuracy.0;
        buffer[2..4].copy_from_slice(&self.offset_scaled_log_variance.to_be_bytes());
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < 4 {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            clock_class: buffer[0],
            clock_accuracy: ClockAccuracy(buffer[1]),
            offset_scaled_log_variance: u16::from_be_bytes([buffer[2], buffer[3]]),
        })
    }
}
