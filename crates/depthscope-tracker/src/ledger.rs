// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! History of the depth-stencil surfaces captured when the host cleared them.
//!
//! Every observed clear gets a sequence index from the interception layer. A
//! capture may first be recorded provisionally (`cleared == false`) and then
//! overwritten at the same index once the clear is confirmed. Captures made
//! after the last confirmed clear belong to a depth pass that never finished
//! and are pruned before any lookup.

use depthscope_core::{SurfaceDesc, SurfaceRef};
use std::collections::BTreeMap;

/// A depth-stencil surface captured at clear time.
#[derive(Debug, Clone)]
pub struct ClearedSurfaceRecord {
    /// The surface the host cleared.
    pub source: SurfaceRef,
    /// Descriptor of `source` as it was when captured.
    pub source_desc: SurfaceDesc,
    /// The backup copy made before the clear, if one was made.
    pub destination: Option<SurfaceRef>,
    /// Whether the clear was confirmed.
    pub cleared: bool,
}

/// Captured surfaces ordered by sequence index.
#[derive(Debug, Clone, Default)]
pub struct ClearanceLedger {
    records: BTreeMap<u32, ClearedSurfaceRecord>,
}

impl ClearanceLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the record at `index`, returning the record it replaced.
    pub fn record(
        &mut self,
        index: u32,
        record: ClearedSurfaceRecord,
    ) -> Option<ClearedSurfaceRecord> {
        self.records.insert(index, record)
    }

    /// Drops every unconfirmed record above the highest confirmed one.
    ///
    /// Records at or below the last confirmed clear are kept whatever their
    /// flag. A ledger with no confirmed clear ends up empty. Returns the number
    /// of records removed.
    pub fn prune_uncleared(&mut self) -> usize {
        let mut removed = 0;
        while let Some((_, record)) = self.records.last_key_value() {
            if record.cleared {
                break;
            }
            self.records.pop_last();
            removed += 1;
        }
        if removed > 0 {
            log::debug!("Pruned {removed} depth surface(s) captured after the last clear");
        }
        removed
    }

    /// Picks the backup surface to expose for the configured clearing number.
    ///
    /// Prunes first, then only considers records holding a backup copy.
    /// `0` selects the most recent one. Any other value selects the last one
    /// whose index does not exceed it, falling back to the most recent one when
    /// every candidate comes later.
    pub fn find_best(&mut self, clearing_number: u32) -> Option<SurfaceRef> {
        self.prune_uncleared();

        let mut at_or_below = None;
        let mut latest = None;
        for (index, destination) in self
            .records
            .iter()
            .filter_map(|(index, record)| record.destination.as_ref().map(|d| (*index, d)))
        {
            if clearing_number == 0 || index <= clearing_number {
                at_or_below = Some(destination);
            }
            latest = Some(destination);
        }

        at_or_below.or(latest).cloned()
    }

    /// Copies the records of `other` whose index is not present locally.
    /// Local records always win.
    pub fn merge(&mut self, other: &ClearanceLedger) {
        for (index, record) in &other.records {
            self.records
                .entry(*index)
                .or_insert_with(|| record.clone());
        }
    }

    /// The record at `index`, if any.
    pub fn get(&self, index: u32) -> Option<&ClearedSurfaceRecord> {
        self.records.get(&index)
    }

    /// Records in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &ClearedSurfaceRecord)> {
        self.records.iter().map(|(index, record)| (*index, record))
    }

    /// Sequence indices in ascending order.
    pub fn indices(&self) -> impl Iterator<Item = u32> + '_ {
        self.records.keys().copied()
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// `true` when the ledger holds no record.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Forgets every record, releasing the held shares.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::depth;
    use depthscope_core::SurfaceId;

    fn record(cleared: bool, destination: Option<SurfaceRef>) -> ClearedSurfaceRecord {
        let source = depth(1);
        ClearedSurfaceRecord {
            source_desc: source.desc(),
            source,
            destination,
            cleared,
        }
    }

    fn ledger_of(entries: &[(u32, bool)]) -> ClearanceLedger {
        let mut ledger = ClearanceLedger::new();
        for (index, cleared) in entries {
            ledger.record(*index, record(*cleared, Some(depth(100 + u64::from(*index)))));
        }
        ledger
    }

    fn best_id(ledger: &mut ClearanceLedger, clearing_number: u32) -> Option<SurfaceId> {
        ledger.find_best(clearing_number).map(|s| s.id())
    }

    #[test]
    fn prune_stops_at_last_confirmed_clear() {
        let mut ledger = ledger_of(&[(1, false), (2, false), (3, true), (4, false), (5, false)]);

        assert_eq!(ledger.prune_uncleared(), 2);
        assert_eq!(ledger.indices().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert!(!ledger.get(1).unwrap().cleared);
    }

    #[test]
    fn prune_empties_a_ledger_without_confirmed_clear() {
        let mut ledger = ledger_of(&[(1, false), (2, false)]);
        assert_eq!(ledger.prune_uncleared(), 2);
        assert!(ledger.is_empty());
    }

    #[test]
    fn prune_is_idempotent() {
        let mut ledger = ledger_of(&[(1, true), (2, false)]);
        assert_eq!(ledger.prune_uncleared(), 1);
        assert_eq!(ledger.prune_uncleared(), 0);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn find_best_by_clearing_number() {
        let mut ledger = ledger_of(&[(1, true), (3, true), (5, true)]);

        assert_eq!(best_id(&mut ledger, 0), Some(SurfaceId(105)));
        assert_eq!(best_id(&mut ledger, 3), Some(SurfaceId(103)));
        assert_eq!(best_id(&mut ledger, 2), Some(SurfaceId(101)));
        assert_eq!(best_id(&mut ledger, 99), Some(SurfaceId(105)));
    }

    #[test]
    fn find_best_falls_back_to_most_recent() {
        let mut ledger = ledger_of(&[(3, true), (5, true)]);
        assert_eq!(best_id(&mut ledger, 2), Some(SurfaceId(105)));
    }

    #[test]
    fn find_best_skips_records_without_backup() {
        let mut ledger = ledger_of(&[(1, true)]);
        ledger.record(2, record(true, None));

        assert_eq!(best_id(&mut ledger, 0), Some(SurfaceId(101)));
        assert_eq!(best_id(&mut ledger, 2), Some(SurfaceId(101)));
    }

    #[test]
    fn find_best_ignores_captures_after_last_clear() {
        let mut ledger = ledger_of(&[(1, true), (2, false)]);
        assert_eq!(best_id(&mut ledger, 0), Some(SurfaceId(101)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn find_best_on_empty_ledger() {
        let mut ledger = ClearanceLedger::new();
        assert!(ledger.find_best(0).is_none());
        assert!(ledger.find_best(4).is_none());
    }

    #[test]
    fn provisional_capture_is_overwritten() {
        let mut ledger = ClearanceLedger::new();
        assert!(ledger.record(4, record(false, None)).is_none());
        let previous = ledger.record(4, record(true, Some(depth(9))));

        assert!(previous.is_some_and(|p| !p.cleared));
        assert!(ledger.get(4).unwrap().cleared);
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn merge_keeps_local_records() {
        let mut local = ledger_of(&[(1, true), (2, true)]);
        let mut remote = ClearanceLedger::new();
        remote.record(2, record(false, Some(depth(900))));
        remote.record(3, record(true, Some(depth(903))));

        local.merge(&remote);

        assert_eq!(local.indices().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(
            local.get(2).unwrap().destination.as_ref().map(|d| d.id()),
            Some(SurfaceId(102))
        );
        assert!(local.get(2).unwrap().cleared);
    }
}
