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

//! The per-context draw call tracker driven by the interception layer.

use crate::ledger::{ClearanceLedger, ClearedSurfaceRecord};
use crate::registry::{DepthRegistry, DepthSnapshot};
use crate::selector;
use depthscope_core::{
    DepthFormatSelector, DrawContext, DrawStats, FillMode, SelectionHeuristics, SurfaceId,
    SurfacePolicy, SurfaceRef, TrackerSettings,
};

/// Draw statistics and depth-stencil history for one rendering context over one frame.
///
/// Every entry point is a silent no-op when its input is filtered out: a
/// surface of the wrong format or usage, a draw with nothing bound, a query on
/// an empty history. Call [`reset`](Self::reset) at each frame boundary.
#[derive(Debug, Clone, Default)]
pub struct DrawCallTracker {
    global: DrawStats,
    registry: DepthRegistry,
    ledger: ClearanceLedger,
    policy: SurfacePolicy,
    heuristics: SelectionHeuristics,
}

impl DrawCallTracker {
    /// Creates an empty tracker with default filters and thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty tracker using the filters and thresholds of `settings`.
    pub fn with_settings(settings: &TrackerSettings) -> Self {
        Self {
            policy: settings.policy,
            heuristics: settings.heuristics,
            ..Self::default()
        }
    }

    /// Replaces the usage strictness applied at each tracking call site.
    pub fn with_policy(mut self, policy: SurfacePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The usage strictness applied at each tracking call site.
    pub fn policy(&self) -> SurfacePolicy {
        self.policy
    }

    /// Vertices drawn this frame, whatever was bound.
    pub fn total_vertices(&self) -> u32 {
        self.global.vertices
    }

    /// Draw calls issued this frame, whatever was bound.
    pub fn total_drawcalls(&self) -> u32 {
        self.global.drawcalls
    }

    /// Global counters.
    pub fn global_stats(&self) -> &DrawStats {
        &self.global
    }

    /// Per-surface counters.
    pub fn depth_buffer_counters(&self) -> &DepthRegistry {
        &self.registry
    }

    /// Surfaces captured at clear time.
    pub fn cleared_depth_surfaces(&self) -> &ClearanceLedger {
        &self.ledger
    }

    /// Whether the surface is registered for per-surface counting.
    pub fn check_depthstencil(&self, id: SurfaceId) -> bool {
        self.registry.contains(id)
    }

    /// Accounts for one draw submission.
    ///
    /// The global counters always move. The fill mode of `context` is forced
    /// according to `wireframe`. Per-surface counters move only when a
    /// registered depth-stencil is bound. While the host has
    /// `depthstencil_replacement` bound in place of `current_depthstencil`,
    /// the draw is accounted to `current_depthstencil`.
    pub fn on_draw<C: DrawContext + ?Sized>(
        &mut self,
        context: &mut C,
        depthstencil_replacement: Option<&SurfaceRef>,
        current_depthstencil: Option<&SurfaceRef>,
        vertices: u32,
        wireframe: bool,
    ) {
        self.global.record_draw(vertices);

        context.set_fill_mode(if wireframe {
            FillMode::Wireframe
        } else {
            FillMode::Solid
        });

        let Some(bound) = context.bound_depth_stencil() else {
            return;
        };

        let mut target = bound.id();
        if depthstencil_replacement.is_some_and(|replacement| replacement.id() == target) {
            match current_depthstencil {
                Some(current) => target = current.id(),
                None => return,
            }
        }

        self.registry.record_draw(target, vertices);
    }

    /// Registers a depth-stencil surface as it gets bound.
    pub fn track_rendertargets(&mut self, format: DepthFormatSelector, depthstencil: &SurfaceRef) {
        let desc = depthstencil.desc();
        if !format.accepts(desc.format) {
            log::trace!(
                "Ignoring depth-stencil {:?}: format {:?} is filtered out",
                depthstencil.id(),
                desc.format
            );
            return;
        }
        if !self.policy.on_bind.accepts(&desc) {
            log::trace!(
                "Ignoring depth-stencil {:?}: usage {:?} is filtered out",
                depthstencil.id(),
                desc.usage
            );
            return;
        }

        if self.registry.register(depthstencil) {
            log::debug!(
                "Tracking depth-stencil {:?} ({}x{}, {:?})",
                depthstencil.id(),
                desc.width,
                desc.height,
                desc.format
            );
        }
    }

    /// Records the surface cleared at sequence `index`, with its backup copy if one was made.
    ///
    /// A record already present at `index` is overwritten, so a provisional
    /// capture can be confirmed later.
    pub fn track_depth_surface(
        &mut self,
        format: DepthFormatSelector,
        index: u32,
        source: SurfaceRef,
        destination: Option<SurfaceRef>,
        cleared: bool,
    ) {
        let source_desc = source.desc();
        if !format.accepts(source_desc.format) || !self.policy.on_clear.accepts(&source_desc) {
            log::trace!(
                "Ignoring cleared surface {:?} at #{index}: {:?} / {:?} is filtered out",
                source.id(),
                source_desc.format,
                source_desc.usage
            );
            return;
        }

        self.ledger.record(
            index,
            ClearedSurfaceRecord {
                source,
                source_desc,
                destination,
                cleared,
            },
        );
    }

    /// Drops the captures made after the last confirmed clear.
    pub fn keep_cleared_depth_surfaces(&mut self) {
        self.ledger.prune_uncleared();
    }

    /// The registered depth-stencil that best matches a `width` x `height` output.
    pub fn find_best_snapshot(&self, width: u32, height: u32) -> Option<DepthSnapshot> {
        selector::find_best_snapshot(self.registry.iter(), width, height, &self.heuristics)
    }

    /// The backup copy to expose for `clearing_number`; `0` picks the most recent clear.
    pub fn find_best_cleared_depth_buffer_surface(
        &mut self,
        clearing_number: u32,
    ) -> Option<SurfaceRef> {
        self.ledger.find_best(clearing_number)
    }

    /// Folds the statistics and history of a sibling context into this tracker.
    ///
    /// Counters add up. Clear-time records of `other` only fill indices this
    /// tracker does not already hold.
    pub fn merge(&mut self, other: &DrawCallTracker) {
        self.global += &other.global;
        self.registry.merge(&other.registry);
        self.ledger.merge(&other.ledger);
    }

    /// Forgets everything recorded this frame and releases every surface share.
    pub fn reset(&mut self) {
        self.global = DrawStats::default();
        self.registry.clear();
        self.ledger.clear();
    }
}
