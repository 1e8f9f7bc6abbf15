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

//! Registry of the depth-stencil surfaces bound during the current frame.

use depthscope_core::{DrawStats, SurfaceId, SurfaceRef};
use indexmap::IndexMap;

/// Statistics accumulated for one depth-stencil surface over the current frame.
#[derive(Debug, Clone)]
pub struct DepthSnapshot {
    /// The tracked surface. The share is dropped when the registry is cleared.
    pub surface: SurfaceRef,
    /// Draws issued while this surface was bound.
    pub stats: DrawStats,
}

impl DepthSnapshot {
    /// Creates a snapshot with zeroed counters.
    pub fn new(surface: SurfaceRef) -> Self {
        Self {
            surface,
            stats: DrawStats::default(),
        }
    }

    /// Identity of the tracked surface.
    pub fn id(&self) -> SurfaceId {
        self.surface.id()
    }
}

/// Depth-stencil snapshots keyed by surface identity.
///
/// Iteration follows first-registration order, which the snapshot selector
/// relies on to break ties.
#[derive(Debug, Clone, Default)]
pub struct DepthRegistry {
    snapshots: IndexMap<SurfaceId, DepthSnapshot>,
}

impl DepthRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `surface` if it is not known yet. Returns `true` on first sighting.
    pub fn register(&mut self, surface: &SurfaceRef) -> bool {
        let id = surface.id();
        if self.snapshots.contains_key(&id) {
            return false;
        }
        self.snapshots.insert(id, DepthSnapshot::new(surface.clone()));
        true
    }

    /// Whether a surface with this identity is registered.
    pub fn contains(&self, id: SurfaceId) -> bool {
        self.snapshots.contains_key(&id)
    }

    /// Accounts for one draw against a registered surface.
    /// Returns `false` without side effects when the surface is unknown.
    pub fn record_draw(&mut self, id: SurfaceId, vertices: u32) -> bool {
        match self.snapshots.get_mut(&id) {
            Some(snapshot) => {
                snapshot.stats.record_draw(vertices);
                true
            }
            None => false,
        }
    }

    /// Adds every snapshot of `other` into `self`, creating missing entries.
    pub fn merge(&mut self, other: &DepthRegistry) {
        for (id, snapshot) in &other.snapshots {
            let entry = self
                .snapshots
                .entry(*id)
                .or_insert_with(|| DepthSnapshot::new(snapshot.surface.clone()));
            entry.stats += &snapshot.stats;
        }
    }

    /// The snapshot of a surface, if registered.
    pub fn get(&self, id: SurfaceId) -> Option<&DepthSnapshot> {
        self.snapshots.get(&id)
    }

    /// Snapshots in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DepthSnapshot> {
        self.snapshots.values()
    }

    /// Number of registered surfaces.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// `true` when no surface is registered.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Forgets every surface, releasing the held shares.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::depth;
    use std::sync::Arc;

    #[test]
    fn register_once_per_identity() {
        let mut registry = DepthRegistry::new();
        let surface = depth(1);

        assert!(registry.register(&surface));
        assert!(!registry.register(&surface));
        assert!(!registry.register(&depth(1)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn record_draw_on_unknown_surface_is_ignored() {
        let mut registry = DepthRegistry::new();
        assert!(!registry.record_draw(SurfaceId(7), 100));
        assert!(registry.is_empty());
    }

    #[test]
    fn record_draw_updates_local_counters() {
        let mut registry = DepthRegistry::new();
        registry.register(&depth(1));
        registry.record_draw(SurfaceId(1), 30);
        registry.record_draw(SurfaceId(1), 12);

        let stats = registry.get(SurfaceId(1)).unwrap().stats;
        assert_eq!(stats.vertices, 42);
        assert_eq!(stats.drawcalls, 2);
    }

    #[test]
    fn merge_creates_missing_entries_and_adds_existing_ones() {
        let mut a = DepthRegistry::new();
        a.register(&depth(1));
        a.record_draw(SurfaceId(1), 10);

        let mut b = DepthRegistry::new();
        b.register(&depth(1));
        b.register(&depth(2));
        b.record_draw(SurfaceId(1), 5);
        b.record_draw(SurfaceId(2), 7);

        a.merge(&b);

        assert_eq!(a.get(SurfaceId(1)).unwrap().stats.vertices, 15);
        assert_eq!(a.get(SurfaceId(1)).unwrap().stats.drawcalls, 2);
        assert_eq!(a.get(SurfaceId(2)).unwrap().stats.vertices, 7);
        let order: Vec<_> = a.iter().map(DepthSnapshot::id).collect();
        assert_eq!(order, vec![SurfaceId(1), SurfaceId(2)]);
    }

    #[test]
    fn clear_releases_surface_shares() {
        let surface = depth(3);
        let mut registry = DepthRegistry::new();
        registry.register(&surface);
        assert_eq!(Arc::strong_count(&surface), 2);

        registry.clear();
        assert_eq!(Arc::strong_count(&surface), 1);
        assert!(registry.is_empty());
    }
}
