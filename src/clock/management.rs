//! Minimal Management GET dispatch (§6.3, `SPEC_FULL.md` §B).
//!
//! Grounded on `statime::datastructures::messages::management` for the TLV
//! shape; the snapshot encoding itself is this crate's own (IEEE1588-2019
//! Table 41's per-managementId binary layouts are not reproduced bit-exact,
//! since `spec.md` only asks for "copies the requested data-set snapshot
//! into a response TLV", not wire interop with a real management client).

use crate::datastructures::{
    common::{RawTlv, TlvType},
    datasets::{CurrentDS, DefaultDS, ParentDS, PortDS},
    messages::{ManagementAction, ManagementBody, ManagementId, MANAGEMENT_ERROR_NOT_SUPPORTED},
    WireFormat,
};

/// Large enough for the widest snapshot this crate answers (`parentDS`).
pub const MAX_RESPONSE_VALUE_LEN: usize = 32;

/// An owned Management response: either a real data-set snapshot
/// (`action = Response`) or a `NOT_SUPPORTED` rejection. Returned by value
/// since the core has no management-send HAL callback to push it through
/// itself (§6.1 names no such operation) — the caller frames and transmits
/// it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagementResponse {
    pub action: ManagementAction,
    pub tlv_type: TlvType,
    pub management_id: u16,
    value: [u8; MAX_RESPONSE_VALUE_LEN],
    value_len: usize,
}

impl ManagementResponse {
    pub fn value(&self) -> &[u8] {
        &self.value[..self.value_len]
    }

    fn not_supported(management_id: u16) -> Self {
        let mut value = [0u8; MAX_RESPONSE_VALUE_LEN];
        value[0..2].copy_from_slice(&MANAGEMENT_ERROR_NOT_SUPPORTED.to_be_bytes());
        value[2..4].copy_from_slice(&management_id.to_be_bytes());
        Self {
            action: ManagementAction::Response,
            tlv_type: TlvType::ManagementErrorStatus,
            management_id,
            value,
            value_len: 4,
        }
    }

    fn snapshot(management_id: u16, value: [u8; MAX_RESPONSE_VALUE_LEN], value_len: usize) -> Self {
        Self {
            action: ManagementAction::Response,
            tlv_type: TlvType::Management,
            management_id,
            value,
            value_len,
        }
    }
}

/// Answer one Management request against the four owning data sets. GET is
/// the only supported action; everything else — and any `managementId` this
/// crate does not snapshot — answers `NOT_SUPPORTED` (§6.3, `SPEC_FULL.md`
/// §B, Open Question 4).
pub fn handle_get(
    body: &ManagementBody,
    tlv: &RawTlv<'_>,
    default_ds: &DefaultDS,
    current_ds: &CurrentDS,
    parent_ds: &ParentDS,
    port_ds: &PortDS,
) -> ManagementResponse {
    let management_id_code = u16::from_be_bytes([
        tlv.value.first().copied().unwrap_or(0),
        tlv.value.get(1).copied().unwrap_or(0),
    ]);

    if !matches!(body.action, ManagementAction::Get) {
        return ManagementResponse::not_supported(management_id_code);
    }

    let Some(id) = ManagementId::from_code(management_id_code) else {
        return ManagementResponse::not_supported(management_id_code);
    };

    let mut value = [0u8; MAX_RESPONSE_VALUE_LEN];
    let len = match id {
        ManagementId::DefaultDataSet => write_default_ds(default_ds, &mut value),
        ManagementId::CurrentDataSet => write_current_ds(current_ds, &mut value),
        ManagementId::ParentDataSet => write_parent_ds(parent_ds, &mut value),
        ManagementId::PortDataSet => write_port_ds(port_ds, &mut value),
    };
    ManagementResponse::snapshot(management_id_code, value, len)
}

fn write_default_ds(ds: &DefaultDS, out: &mut [u8; MAX_RESPONSE_VALUE_LEN]) -> usize {
    out[0] = ds.two_step_flag as u8;
    let _ = ds.clock_identity().serialize(&mut out[1..9]);
    out[9..11].copy_from_slice(&ds.number_ports.to_be_bytes());
    out[11] = ds.priority_1;
    out[12] = ds.priority_2;
    out[13] = ds.domain_number;
    out[14] = ds.slave_only as u8;
    15
}

fn write_current_ds(ds: &CurrentDS, out: &mut [u8; MAX_RESPONSE_VALUE_LEN]) -> usize {
    out[0..2].copy_from_slice(&ds.steps_removed.to_be_bytes());
    let _ = ds.offset_from_master.serialize(&mut out[2..10]);
    let _ = ds.mean_path_delay.serialize(&mut out[10..18]);
    18
}

fn write_parent_ds(ds: &ParentDS, out: &mut [u8; MAX_RESPONSE_VALUE_LEN]) -> usize {
    let _ = ds.parent_port_identity.serialize(&mut out[0..10]);
    let _ = ds.grandmaster_identity.serialize(&mut out[10..18]);
    out[18] = ds.grandmaster_priority_1;
    out[19] = ds.grandmaster_priority_2;
    20
}

fn write_port_ds(ds: &PortDS, out: &mut [u8; MAX_RESPONSE_VALUE_LEN]) -> usize {
    let _ = ds.port_identity.serialize(&mut out[0..10]);
    out[10] = ds.port_state as u8;
    out[11] = ds.log_min_delay_req_interval as u8;
    out[12] = ds.log_announce_interval as u8;
    out[13] = ds.log_sync_interval as u8;
    out[14] = ds.announce_receipt_timeout;
    out[15] = ds.version_number;
    16
}
