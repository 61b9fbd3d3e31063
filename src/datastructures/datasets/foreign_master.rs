//! `foreignMasterList` (§3, §4.3): bounded, keyed by `sourcePortIdentity`.
//!
//! Grounded on `statime::bmc::foreign_master::ForeignMasterList`, but
//! simplified: the spec stores only the latest qualified announce body and
//! sequence id per source, with no sliding qualification window, and
//! insertion beyond capacity is a hard `ResourceUnavailable` rather than a
//! silent no-op (§4.3).

use arrayvec::ArrayVec;

use crate::{
    datastructures::{common::PortIdentity, messages::AnnounceBody},
    error::PtpError,
    observability::{counter_increment, CounterId},
    time::Timestamp,
};

/// `foreignMasterList` is bounded to 16 entries per port (§3).
pub const MAX_FOREIGN_MASTERS: usize = 16;

/// One tracked foreign master: its last `Announce` body, sequence id, and
/// the local receive time used by [`ForeignMasterList::purge_older_than`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ForeignMasterEntry {
    pub source_port_identity: PortIdentity,
    pub announce_body: AnnounceBody,
    pub sequence_id: u16,
    pub last_seen: Timestamp,
}

/// A bounded, linearly-scanned table of foreign masters for one port.
#[derive(Debug, Clone)]
pub struct ForeignMasterList {
    entries: ArrayVec<ForeignMasterEntry, MAX_FOREIGN_MASTERS>,
}

impl ForeignMasterList {
    pub fn new() -> Self {
        Self {
            entries: ArrayVec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ForeignMasterEntry> {
        self.entries.iter()
    }

    /// Insert or refresh the entry keyed by `source_port_identity`. Insertion
    /// of a genuinely new source beyond capacity fails with
    /// `ResourceUnavailable` and bumps `ValidationsFailed`; the list is left
    /// unchanged (§4.3, §8 scenario "insertion #17").
    pub fn upsert(
        &mut self,
        source_port_identity: PortIdentity,
        announce_body: AnnounceBody,
        sequence_id: u16,
        now: Timestamp,
    ) -> Result<(), PtpError> {
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|e| e.source_port_identity == source_port_identity)
        {
            entry.announce_body = announce_body;
            entry.sequence_id = sequence_id;
            entry.last_seen = now;
            return Ok(());
        }

        self.entries
            .try_push(ForeignMasterEntry {
                source_port_identity,
                announce_body,
                sequence_id,
                last_seen: now,
            })
            .map_err(|_| {
                counter_increment(CounterId::ValidationsFailed, 1);
                PtpError::ResourceUnavailable
            })
    }

    /// Remove entries whose `last_seen` precedes `reference_time - window`
    /// (§4.3: `announceReceiptTimeout × 2^logAnnounceInterval`).
    pub fn purge_older_than(&mut self, reference_time: Timestamp, window: crate::time::TimeInterval) {
        self.entries.retain(|entry| {
            let age = reference_time.saturating_diff(entry.last_seen);
            age <= window
        });
    }
}

impl Default for ForeignMasterList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastructures::common::{ClockIdentity, ClockQuality, TimeSource, WireTimestamp};

    fn body(steps_removed: u16) -> AnnounceBody {
        AnnounceBody {
            origin_timestamp: WireTimestamp::new(0, 0),
            current_utc_offset: 37,
            grandmaster_priority_1: 128,
            grandmaster_clock_quality: ClockQuality::default(),
            grandmaster_priority_2: 128,
            grandmaster_identity: ClockIdentity([1; 8]),
            steps_removed,
            time_source: TimeSource::InternalOscillator,
        }
    }

    fn port(n: u16) -> PortIdentity {
        PortIdentity {
            clock_identity: ClockIdentity([n as u8; 8]),
            port_number: 1,
        }
    }

    #[test]
    fn upsert_refreshes_existing_entry_in_place() {
        let mut list = ForeignMasterList::new();
        list.upsert(port(1), body(1), 1, Timestamp::new(0, 0)).unwrap();
        list.upsert(port(1), body(2), 2, Timestamp::new(1, 0)).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().unwrap().sequence_id, 2);
    }

    #[test]
    fn seventeenth_distinct_insertion_fails_and_list_stays_at_sixteen() {
        let mut list = ForeignMasterList::new();
        for i in 0..16u8 {
            list.upsert(port(i as u16), body(1), 1, Timestamp::new(0, 0))
                .unwrap();
        }
        assert_eq!(list.len(), 16);
        let result = list.upsert(port(16), body(1), 1, Timestamp::new(0, 0));
        assert_eq!(result, Err(PtpError::ResourceUnavailable));
        assert_eq!(list.len(), 16);
    }

    #[test]
    fn purge_removes_stale_entries() {
        use crate::time::TimeInterval;
        let mut list = ForeignMasterList::new();
        list.upsert(port(1), body(1), 1, Timestamp::new(0, 0)).unwrap();
        list.upsert(port(2), body(1), 1, Timestamp::new(9, 0)).unwrap();
        list.purge_older_than(Timestamp::new(10, 0), TimeInterval::from_nanos(5_000_000_000));
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().unwrap().source_port_identity, port(2));
    }
}
