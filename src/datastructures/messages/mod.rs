//! The common header codec and per-type message bodies (C1, §4.1/§6.2).
//!
//! Grounded on `statime::datastructures::messages`: a `MessageType` enum
//! keyed by the 4-bit wire code, a `Header` covering the fixed 34-byte
//! common header, and one module per body type following the
//! `content_size`/`serialize_content`/`deserialize_content` shape of
//! `statime::datastructures::messages::p_delay_req`.

mod announce;
mod delay_req;
mod delay_resp;
mod follow_up;
mod management;
mod pdelay_req;
mod pdelay_resp;
mod pdelay_resp_follow_up;
mod sync;

pub use announce::AnnounceBody;
pub use delay_req::DelayReqBody;
pub use delay_resp::DelayRespBody;
pub use follow_up::FollowUpBody;
pub use management::{ManagementAction, ManagementBody, ManagementId, MANAGEMENT_ERROR_NOT_SUPPORTED};
pub use pdelay_req::PdelayReqBody;
pub use pdelay_resp::PdelayRespBody;
pub use pdelay_resp_follow_up::PdelayRespFollowUpBody;
pub use sync::SyncBody;

use crate::{
    datastructures::common::{PortIdentity, TimeInterval},
    error::PtpError,
};

/// The common header size, fixed by the protocol (§4.1, §6.2).
pub const HEADER_LEN: usize = 34;

/// The 4-bit `messageType` field (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MessageType {
    Sync = 0x0,
    DelayReq = 0x1,
    PDelayReq = 0x2,
    PDelayResp = 0x3,
    FollowUp = 0x8,
    DelayResp = 0x9,
    PDelayRespFollowUp = 0xa,
    Announce = 0xb,
    Signaling = 0xc,
    Management = 0xd,
}

impl MessageType {
    pub fn from_nibble(nibble: u8) -> Result<Self, PtpError> {
        match nibble & 0x0f {
            0x0 => Ok(Self::Sync),
            0x1 => Ok(Self::DelayReq),
            0x2 => Ok(Self::PDelayReq),
            0x3 => Ok(Self::PDelayResp),
            0x8 => Ok(Self::FollowUp),
            0x9 => Ok(Self::DelayResp),
            0xa => Ok(Self::PDelayRespFollowUp),
            0xb => Ok(Self::Announce),
            0xc => Ok(Self::Signaling),
            0xd => Ok(Self::Management),
            _ => Err(PtpError::UnhandledMessageType),
        }
    }

    pub fn to_nibble(self) -> u8 {
        self as u8
    }
}

/// The 34-byte common header every PTP message starts with (§4.1, §6.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Upper nibble of byte 0. Preserved verbatim on pass-through (§4.1).
    pub transport_specific: u8,
    pub message_type: MessageType,
    /// Upper nibble of byte 1 (reserved). Preserved verbatim on pass-through.
    pub reserved_version_nibble: u8,
    pub version_ptp: u8,
    pub message_length: u16,
    pub domain_number: u8,
    pub flag_field: [u8; 2],
    pub correction_field: TimeInterval,
    pub source_port_identity: PortIdentity,
    pub sequence_id: u16,
    pub control_field: u8,
    pub log_message_interval: i8,
}

/// The only `versionPTP` value this implementation, as a PTPv2.1 engine,
/// accepts on ingress.
pub const SUPPORTED_VERSION_PTP: u8 = 2;

impl Header {
    /// Decode the common header from `buffer` (§4.1). Does not look at the
    /// body; body-length validation happens in [`decode_body`].
    pub fn decode(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < HEADER_LEN {
            return Err(PtpError::InvalidMessageSize);
        }

        let message_type = MessageType::from_nibble(buffer[0])?;
        let version_ptp = buffer[1] & 0x0f;
        if version_ptp != SUPPORTED_VERSION_PTP {
            return Err(PtpError::InvalidVersion);
        }
        let domain_number = buffer[4];
        if domain_number > 127 {
            return Err(PtpError::InvalidDomain);
        }

        let message_length = u16::from_be_bytes([buffer[2], buffer[3]]);
        if (message_length as usize) < HEADER_LEN || (message_length as usize) > buffer.len() {
            return Err(PtpError::InvalidMessageSize);
        }

        use crate::datastructures::WireFormat;
        let correction_field = TimeInterval::deserialize(&buffer[8..16])?;
        let source_port_identity = PortIdentity::deserialize(&buffer[20..30])?;

        Ok(Self {
            transport_specific: buffer[0] & 0xf0,
            message_type,
            reserved_version_nibble: buffer[1] & 0xf0,
            version_ptp,
            message_length,
            domain_number,
            flag_field: [buffer[6], buffer[7]],
            correction_field,
            source_port_identity,
            sequence_id: u16::from_be_bytes([buffer[30], buffer[31]]),
            control_field: buffer[32],
            log_message_interval: buffer[33] as i8,
        })
    }

    /// Encode the common header into `buffer[0..34]`.
    pub fn encode(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < HEADER_LEN {
            return Err(PtpError::InvalidMessageSize);
        }

        use crate::datastructures::WireFormat;
        buffer[0] = self.transport_specific | self.message_type.to_nibble();
        buffer[1] = self.reserved_version_nibble | (self.version_ptp & 0x0f);
        buffer[2..4].copy_from_slice(&self.message_length.to_be_bytes());
        buffer[4] = self.domain_number;
        buffer[5] = 0;
        buffer[6..8].copy_from_slice(&self.flag_field);
        self.correction_field.serialize(&mut buffer[8..16])?;
        buffer[16..20].fill(0);
        self.source_port_identity.serialize(&mut buffer[20..30])?;
        buffer[30..32].copy_from_slice(&self.sequence_id.to_be_bytes());
        buffer[32] = self.control_field;
        buffer[33] = self.log_message_interval as u8;
        Ok(())
    }
}

/// A fixed-size message body, excluding any TLV suffix (§4.1, §6.2).
pub trait MessageBody: Sized {
    /// The fixed body length on the wire, not counting TLVs.
    const BODY_LEN: usize;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError>;
    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError>;
}

/// Decode a message body from the bytes following the common header
/// (§4.1). `buffer` is the full frame; the body starts at [`HEADER_LEN`].
pub fn decode_body<T: MessageBody>(header: &Header, buffer: &[u8]) -> Result<T, PtpError> {
    let end = HEADER_LEN
        .checked_add(T::BODY_LEN)
        .ok_or(PtpError::InvalidMessageSize)?;
    if buffer.len() < end || (header.message_length as usize) < end {
        return Err(PtpError::InvalidMessageSize);
    }
    T::deserialize_body(&buffer[HEADER_LEN..end])
}

/// Encode a header followed by a body into `buffer`, returning the number
/// of bytes written (header + body, no TLV suffix). (§4.1)
pub fn encode<T: MessageBody>(
    header: &Header,
    body: &T,
    buffer: &mut [u8],
) -> Result<usize, PtpError> {
    let total = HEADER_LEN
        .checked_add(T::BODY_LEN)
        .ok_or(PtpError::InvalidMessageSize)?;
    if buffer.len() < total {
        return Err(PtpError::InvalidMessageSize);
    }
    header.encode(&mut buffer[0..HEADER_LEN])?;
    body.serialize_body(&mut buffer[HEADER_LEN..total])?;
    Ok(total)
}
