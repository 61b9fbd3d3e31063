//! The single tagged-variant result type every ingress entry point returns
//! (§7, design note in §9). Advisory errors ([`PtpError::OrderingViolation`],
//! [`PtpError::ClampApplied`]) are also produced as side counters by the
//! modules that detect them; they are returned here too so callers and tests
//! can observe them without re-deriving them from counter deltas, but they
//! never short-circuit processing — see each call site's doc comment.

/// Error kinds exposed by the protocol core (§7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "std", derive(thiserror::Error))]
pub enum PtpError {
    /// Buffer length mismatch on decode/dispatch.
    #[cfg_attr(feature = "std", error("invalid message size"))]
    InvalidMessageSize,
    /// Header's `versionPTP` nibble is not supported.
    #[cfg_attr(feature = "std", error("invalid PTP version"))]
    InvalidVersion,
    /// Header's `domainNumber` is not one this clock serves.
    #[cfg_attr(feature = "std", error("invalid domain"))]
    InvalidDomain,
    /// Boundary-clock dispatch addressed a port number that does not exist.
    #[cfg_attr(feature = "std", error("invalid port"))]
    InvalidPort,
    /// `messageType` code not recognized; caller drops the frame.
    #[cfg_attr(feature = "std", error("unhandled message type"))]
    UnhandledMessageType,
    /// `foreignMasterList` is at capacity.
    #[cfg_attr(feature = "std", error("resource unavailable"))]
    ResourceUnavailable,
    /// T2<T1 or T4<T3 (advisory in the sync/peer-delay capture; the
    /// computation proceeds anyway). The transparent clock reuses this
    /// variant for `egress < ingress`, where it is instead a hard reject —
    /// see [`crate::clock::TransparentClock::accumulate_residence_time`].
    #[cfg_attr(feature = "std", error("timestamp ordering violation"))]
    OrderingViolation,
    /// Offset/MPD saturated at `MAX_ABS_SCALED` (advisory).
    #[cfg_attr(feature = "std", error("clamp applied"))]
    ClampApplied,
    /// Propagated from a HAL callback; carries the embedder's error code.
    #[cfg_attr(feature = "std", error("HAL error: {0}"))]
    HalError(i32),
}

pub type PtpResult<T> = Result<T, PtpError>;
