//! The explicit nine-state port automaton (§4.6).
//!
//! The teacher's `statime::observability::port::PortState` already names
//! these nine states (its own runtime state machine is generic type-state
//! instead of an explicit table); this module pairs that enum with the
//! named `Event` set and transition table §4.6 spells out.

use crate::datastructures::datasets::PortState;

/// The thirteen named events that drive the port automaton (§4.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
    Powerup,
    Initialize,
    FaultDetected,
    FaultCleared,
    DesignatedEnabled,
    DesignatedDisabled,
    RsMaster,
    RsGrandMaster,
    RsSlave,
    RsPassive,
    AnnounceReceiptTimeout,
    SynchronizationFault,
    QualificationTimeout,
}

/// Apply `event` to `state`, returning the next state per the §4.6
/// transition table, or `None` if `event` has no defined effect in `state`
/// (the caller should treat this as a no-op, not an error).
pub fn transition(state: PortState, event: Event) -> Option<PortState> {
    use Event::*;
    use PortState::*;

    match (state, event) {
        (Initializing, Initialize) => Some(Listening),
        (Initializing, FaultDetected) => Some(Faulty),
        (Initializing, DesignatedDisabled) => Some(Disabled),

        (Faulty, FaultCleared) => Some(Initializing),

        (Disabled, DesignatedEnabled) => Some(Listening),

        (Listening, RsMaster) | (Listening, RsGrandMaster) => Some(PreMaster),
        (Listening, RsSlave) => Some(Uncalibrated),
        (Listening, RsPassive) => Some(Passive),
        (Listening, FaultDetected) => Some(Faulty),
        (Listening, DesignatedDisabled) => Some(Disabled),

        (PreMaster, QualificationTimeout) => Some(Master),
        (PreMaster, RsSlave) => Some(Uncalibrated),
        (PreMaster, RsPassive) => Some(Passive),

        (Master, RsSlave) => Some(Uncalibrated),
        (Master, RsPassive) => Some(Passive),

        (Passive, RsMaster) => Some(PreMaster),
        (Passive, RsSlave) => Some(Uncalibrated),

        // Uncalibrated -> Slave is a heuristic gate, not a plain event
        // transition; see `Port::evaluate_uncalibrated_heuristic` (§4.6).
        (Uncalibrated, RsPassive) => Some(Passive),
        (Uncalibrated, RsMaster) => Some(PreMaster),
        (Uncalibrated, SynchronizationFault) => Some(Listening),
        (Uncalibrated, AnnounceReceiptTimeout) => Some(Listening),

        (Slave, RsMaster) => Some(PreMaster),
        (Slave, RsPassive) => Some(Passive),
        (Slave, SynchronizationFault) => Some(Uncalibrated),
        (Slave, AnnounceReceiptTimeout) => Some(Listening),

        _ => None,
    }
}
