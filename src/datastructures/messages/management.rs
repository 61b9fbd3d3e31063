use super::MessageBody;
use crate::{
    datastructures::{common::PortIdentity, WireFormat},
    error::PtpError,
};

/// `actionField` of a Management message (§6.3). The core implements GET
/// only; everything else answers `NOT_SUPPORTED` (§4.8, `SPEC_FULL.md` §B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagementAction {
    Get,
    Set,
    Response,
    Command,
    Acknowledge,
    Unknown(u8),
}

impl ManagementAction {
    fn from_code(code: u8) -> Self {
        match code & 0x0f {
            0 => Self::Get,
            1 => Self::Set,
            2 => Self::Response,
            3 => Self::Command,
            4 => Self::Acknowledge,
            other => Self::Unknown(other),
        }
    }

    fn to_code(self) -> u8 {
        match self {
            Self::Get => 0,
            Self::Set => 1,
            Self::Response => 2,
            Self::Command => 3,
            Self::Acknowledge => 4,
            Self::Unknown(code) => code,
        }
    }
}

/// `managementId` values this crate answers with a real snapshot (§6.3,
/// `SPEC_FULL.md` §B — the four data sets named in `spec.md` §3). Real
/// IEEE1588-2019 Table 41 codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ManagementId {
    DefaultDataSet = 0x2000,
    CurrentDataSet = 0x2001,
    ParentDataSet = 0x2002,
    PortDataSet = 0x2004,
}

impl ManagementId {
    pub fn from_code(code: u16) -> Option<Self> {
        match code {
            0x2000 => Some(Self::DefaultDataSet),
            0x2001 => Some(Self::CurrentDataSet),
            0x2002 => Some(Self::ParentDataSet),
            0x2004 => Some(Self::PortDataSet),
            _ => None,
        }
    }
}

/// `NOT_SUPPORTED` per IEEE1588-2019 Table 71, used for every rejected
/// Management request (§6.3).
pub const MANAGEMENT_ERROR_NOT_SUPPORTED: u16 = 0x0000;

/// Fixed part of the Management message body, 13 bytes, followed by the
/// management TLV (§6.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagementBody {
    pub target_port_identity: PortIdentity,
    pub starting_boundary_hops: u8,
    pub boundary_hops: u8,
    pub action: ManagementAction,
}

impl MessageBody for ManagementBody {
    const BODY_LEN: usize = 13;

    fn serialize_body(&self, buffer: &mut [u8]) -> Result<(), PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        self.target_port_identity.serialize(&mut buffer[0..10])?;
        buffer[10] = self.starting_boundary_hops;
        buffer[11] = self.boundary_hops;
        buffer[12] = self.action.to_code();
        Ok(())
    }

    fn deserialize_body(buffer: &[u8]) -> Result<Self, PtpError> {
        if buffer.len() < Self::BODY_LEN {
            return Err(PtpError::InvalidMessageSize);
        }
        Ok(Self {
            target_port_identity: PortIdentity::deserialize(&buffer[0..10])?,
            starting_boundary_hops: buffer[10],
            boundary_hops: buffer[11],
            action: ManagementAction::from_code(buffer[12]),
        })
    }
}
