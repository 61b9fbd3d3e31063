use super::MessageBody;
use crate::{
    datastructures::{common::WireTimestamp, WireFormat},
    error::PtpError,
};

/// `Sync` body (§3): 10 bytes. Carries `originTimestamp`, which is only
/// meaningful (as T1) for a one-step clock; a two-step clock zeroes it and
/// conveys T1 via the matching `Follow_Up` (§4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncBody {
    pub origin_timestamp: WireTimestamp,
}

impl MessageBody for SyncBody {
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
        let body = SyncBody {
            origin_timestamp: WireTimestamp::new(1, 2),
        };
        let mut buf = [0u8; SyncBody::BODY_LEN];
        body.serialize_body(&mut buf).unwrap();
        assert_eq!(SyncBody::deserialize_body(&buf).unwrap(), body);
    }
}
