use crate::{datastructures::WireFormat, error::PtpError, time::TimeInterval};

/// On-wire encoding of [`TimeInterval`] / `correctionField`: the raw signed
/// 64-bit scaled value, big-endian, 8 bytes (§3). Grounded on
/// `statime::datastructures::common::time_interval::TimeInterval`'s
/// `WireFormat` impl, which serializes the same `I48F16::to_bits()` value.
impl WireFormat for TimeInterval {
    fn wire_size(&self) -> usize {
        8
    }

    fn serialize(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < 8 {
            return Err(PtpError::InvalidMessageSize);
        }
        buffer[0..8].copy_from_slice(&self.raw().to_be_bytes());
        Ok(())
    }

    fn deserialize(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < 8 {
            return Err(PtpError::InvalidMessageSize);
        }
        let raw = i64::from_be_bytes(buffer[0..8].try_into().unwrap());
        Ok(TimeInterval::from_raw(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_round_trip() {
        let representations: [([u8; 8], i64); 3] = [
            ([0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x80, 0x00], 2i64 * 65536 + 32768),
            ([0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01], 1),
            ([0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00, 0x00], -65536),
        ];

        for (bytes, raw) in representations {
            let interval = TimeInterval::from_raw(raw);
            let mut buf = [0u8; 8];
            interval.serialize(&mut buf).unwrap();
            assert_eq!(buf, bytes);
            assert_eq!(TimeInterval::deserialize(&bytes).unwrap(), interval);
        }
    }
}
