//! Ingress message dispatch shared by [`super::OrdinaryClock`] and
//! [`super::BoundaryClock`] (§4.1, §6.2).
//!
//! Grounded on `statime::port::Port::handle_event`'s role as the single
//! entry point a transport layer feeds decoded frames into; this crate
//! splits that into `Header::decode` (already done by the caller, since a
//! boundary clock must read `source_port_identity` to pick a port before it
//! can even dispatch) plus this per-message match.

use crate::{
    clock::management::{self, ManagementResponse},
    datastructures::{
        common::RawTlv,
        datasets::{CurrentDS, DefaultDS, DelayMechanism, ParentDS},
        messages::{
            decode_body, AnnounceBody, DelayRespBody, FollowUpBody, Header, ManagementBody,
            MessageType, PdelayReqBody, PdelayRespBody, PdelayRespFollowUpBody, SyncBody,
            HEADER_LEN,
        },
    },
    error::{PtpError, PtpResult},
    hal::Hal,
    port::Port,
    time::Timestamp,
};

/// `twoStepFlag`, bit 1 of `flagField[0]` (§4.1, IEEE1588-2019 Table 37).
const TWO_STEP_FLAG_BIT: u8 = 0x02;

/// Decode and apply one ingress frame against `port`'s state and the data
/// sets it shares a clock with. Returns `Some(ManagementResponse)` only for
/// a `Management` GET; every other message type answers `None` on success.
#[allow(clippy::too_many_arguments)]
pub fn dispatch(
    port: &mut Port,
    default_ds: &DefaultDS,
    current_ds: &mut CurrentDS,
    parent_ds: &mut ParentDS,
    header: &Header,
    buf: &[u8],
    ingress_ts: Timestamp,
    hal: &mut impl Hal,
) -> PtpResult<Option<ManagementResponse>> {
    if header.domain_number != default_ds.domain_number {
        return Err(PtpError::InvalidDomain);
    }

    match header.message_type {
        MessageType::Announce => {
            let body: AnnounceBody = decode_body(header, buf)?;
            port.handle_announce(header.source_port_identity, body, header.sequence_id, ingress_ts)?;
            Ok(None)
        }

        MessageType::Sync => {
            let body: SyncBody = decode_body(header, buf)?;
            port.handle_sync_ingress(ingress_ts);
            if header.flag_field[0] & TWO_STEP_FLAG_BIT == 0 {
                port.handle_sync_origin_timestamp(body.origin_timestamp, header.correction_field);
            }
            let _ = port.poll_sync(current_ds, hal);
            Ok(None)
        }

        MessageType::FollowUp => {
            let body: FollowUpBody = decode_body(header, buf)?;
            port.handle_sync_origin_timestamp(body.precise_origin_timestamp, header.correction_field);
            let _ = port.poll_sync(current_ds, hal);
            Ok(None)
        }

        MessageType::DelayReq => {
            // An inbound request from a remote slave, not this port's own
            // outgoing request (that path is `Port::tick`'s T3 capture) —
            // answered immediately if this port is acting as a master
            // (§4.5 "Capture").
            if port.port_ds.port_state.is_master_like() {
                hal.send_delay_resp(&DelayRespBody {
                    receive_timestamp: ingress_ts,
                    requesting_port_identity: header.source_port_identity,
                })?;
            }
            Ok(None)
        }

        MessageType::DelayResp => {
            let body: DelayRespBody = decode_body(header, buf)?;
            port.handle_delay_resp(
                body.receive_timestamp,
                body.requesting_port_identity,
                header.correction_field,
            );
            let _ = port.poll_sync(current_ds, hal);
            Ok(None)
        }

        MessageType::Management => {
            let body: ManagementBody = decode_body(header, buf)?;
            let tlv_offset = HEADER_LEN + <ManagementBody as crate::datastructures::messages::MessageBody>::BODY_LEN;
            let tlv_bytes = buf.get(tlv_offset..).ok_or(PtpError::InvalidMessageSize)?;
            let tlv = RawTlv::parse(tlv_bytes)?;
            let response = management::handle_get(
                &body,
                &tlv,
                default_ds,
                current_ds,
                parent_ds,
                &port.port_ds,
            );
            Ok(Some(response))
        }

        MessageType::PDelayReq => {
            let body: PdelayReqBody = decode_body(header, buf)?;
            let _ = body; // originTimestamp unused; T1 is the requester's own egress capture
            if port.port_ds.delay_mechanism == DelayMechanism::PeerToPeer {
                hal.send_pdelay_resp(&PdelayRespBody {
                    request_receipt_timestamp: ingress_ts,
                    requesting_port_identity: header.source_port_identity,
                })?;
                let egress_ts = hal
                    .get_tx_timestamp(header.sequence_id)
                    .unwrap_or_else(|_| hal.get_timestamp());
                hal.send_pdelay_resp_follow_up(&PdelayRespFollowUpBody {
                    response_origin_timestamp: egress_ts,
                    requesting_port_identity: header.source_port_identity,
                })?;
            }
            Ok(None)
        }

        MessageType::PDelayResp => {
            let body: PdelayRespBody = decode_body(header, buf)?;
            port.handle_pdelay_resp(body.request_receipt_timestamp, body.requesting_port_identity);
            port.handle_pdelay_resp_ingress(ingress_ts);
            let _ = port.poll_peer_delay();
            Ok(None)
        }

        MessageType::PDelayRespFollowUp => {
            let body: PdelayRespFollowUpBody = decode_body(header, buf)?;
            port.handle_pdelay_resp_follow_up(
                body.response_origin_timestamp,
                body.requesting_port_identity,
            );
            let _ = port.poll_peer_delay();
            Ok(None)
        }

        MessageType::Signaling => Err(PtpError::UnhandledMessageType),
    }
}
