use crate::{datastructures::WireFormat, error::PtpError, time::Timestamp};

/// The on-wire PTP timestamp encoding used by message bodies
/// (`originTimestamp`, `preciseOriginTimestamp`, `receiveTimestamp`): 48-bit
/// seconds followed by 32-bit nanoseconds, both big-endian, 10 bytes total.
/// This is the wire codec for [`Timestamp`]; the type itself lives in
/// [`crate::time`] since its arithmetic (§4.2) is not a wire-format concern.
pub type WireTimestamp = Timestamp;

impl WireFormat for Timestamp {
    fn wire_size(&self) -> usize {
        10
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < 10 {
            return Err(PtpError::InvalidMessageSize);
        }
        // 48-bit seconds occupy the first 6 bytes of a big-endian u64.
        let seconds_be = self.seconds().to_be_bytes();
        buffer[0..6].copy_from_slice(&seconds_be[2..8]);
        buffer[6..10].copy_from_slice(&self.nanoseconds().to_be_bytes());
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < 10 {
            return Err(PtpError::InvalidMessageSize);
        }
        let mut seconds_be = [0u8; 8];
        seconds_be[2..8].copy_from_slice(&buffer[0..6]);
        let seconds = u64::from_be_bytes(seconds_be);
        let nanoseconds = u32::from_be_bytes(buffer[6..10].try_into().unwrap());
        Ok(Timestamp::new(seconds, nanoseconds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        let ts = Timestamp::new(1_169_232_218, 174_389_936);
        let mut buf = [0u8; 10];
        ts.serialize(&mut buf).unwrap();
        assert_eq!(Timestamp::deserialize(&buf).unwrap(), ts);
    }

    #[test]
    fn seconds_field_is_48_bits_big_endian() {
        let ts = Timestamp::new(0x0000_1234_5678, 0);
        let mut buf = [0u8; 10];
        ts.serialize(&mut buf).unwrap();
        assert_eq!(&buf[0..6], &[0x00, 0x00, 0x12, 0x34, 0x56, 0x78]);
    }
}
