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

//! Service owning the per-context trackers and the frame cycle.

use std::sync::Arc;

use depthscope_core::{
    DrawContext, FrameDepthReport, ResourceMonitor, SelectionMode, SurfaceRef, TrackerSettings,
};
use depthscope_tracker::{DepthSnapshot, DrawCallTracker};
use indexmap::IndexMap;

use crate::monitoring::{DepthTrackerMonitor, MonitorRegistry};

/// Identifies a rendering context (an immediate device or a deferred command list).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(pub u64);

/// The outcome of presenting a frame.
#[derive(Debug, Clone)]
pub struct FrameSelection {
    /// Summary pushed to the monitors.
    pub report: FrameDepthReport,
    /// The best matching bound depth-stencil, whatever the selection mode.
    pub snapshot: Option<DepthSnapshot>,
    /// The surface to expose to effects according to the selection mode.
    pub selected: Option<SurfaceRef>,
}

/// Owns one [`DrawCallTracker`] per rendering context and turns them into a
/// single depth selection each time a frame is presented.
#[derive(Debug)]
pub struct DepthTrackingService {
    settings: TrackerSettings,
    contexts: IndexMap<ContextId, DrawCallTracker>,
    monitors: MonitorRegistry,
    depth_monitor: Arc<DepthTrackerMonitor>,
    frame_number: u64,
}

impl DepthTrackingService {
    /// Creates a service with its own [`DepthTrackerMonitor`] already registered.
    pub fn new(settings: TrackerSettings) -> Self {
        let monitors = MonitorRegistry::new();
        let depth_monitor = Arc::new(DepthTrackerMonitor::new("main"));
        monitors.register(depth_monitor.clone());

        Self {
            settings,
            contexts: IndexMap::new(),
            monitors,
            depth_monitor,
            frame_number: 0,
        }
    }

    /// The settings every context tracker is built from.
    pub fn settings(&self) -> &TrackerSettings {
        &self.settings
    }

    /// The number of the frame currently being recorded.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Number of contexts seen so far.
    pub fn context_count(&self) -> usize {
        self.contexts.len()
    }

    /// Returns the tracker of `context`, creating it on first use.
    pub fn tracker(&mut self, context: ContextId) -> &mut DrawCallTracker {
        let settings = &self.settings;
        self.contexts.entry(context).or_insert_with(|| {
            log::debug!("Tracking new rendering context {:?}", context);
            DrawCallTracker::with_settings(settings)
        })
    }

    /// Forwards a draw of `context` with the configured wireframe mode.
    pub fn on_draw<C: DrawContext + ?Sized>(
        &mut self,
        context: ContextId,
        device: &mut C,
        depthstencil_replacement: Option<&SurfaceRef>,
        current_depthstencil: Option<&SurfaceRef>,
        vertices: u32,
    ) {
        let wireframe = self.settings.wireframe;
        self.tracker(context).on_draw(
            device,
            depthstencil_replacement,
            current_depthstencil,
            vertices,
            wireframe,
        );
    }

    /// Forwards a depth-stencil bind of `context` with the configured format filter.
    pub fn track_rendertargets(&mut self, context: ContextId, depthstencil: &SurfaceRef) {
        let format = self.settings.depth_format;
        self.tracker(context).track_rendertargets(format, depthstencil);
    }

    /// Forwards a clear observed on `context` with the configured format filter.
    pub fn track_depth_surface(
        &mut self,
        context: ContextId,
        index: u32,
        source: SurfaceRef,
        destination: Option<SurfaceRef>,
        cleared: bool,
    ) {
        let format = self.settings.depth_format;
        self.tracker(context)
            .track_depth_surface(format, index, source, destination, cleared);
    }

    /// Adds an observer that receives every frame report.
    pub fn register_monitor(&self, monitor: Arc<dyn ResourceMonitor>) {
        self.monitors.register(monitor);
    }

    /// Returns a reference to the monitor registry.
    pub fn monitor_registry(&self) -> &MonitorRegistry {
        &self.monitors
    }

    /// The monitor the service registers for itself.
    pub fn depth_monitor(&self) -> &Arc<DepthTrackerMonitor> {
        &self.depth_monitor
    }

    /// Merges every context tracker, in the order the contexts first appeared.
    pub fn aggregate(&self) -> DrawCallTracker {
        let mut aggregate = DrawCallTracker::with_settings(&self.settings);
        for tracker in self.contexts.values() {
            aggregate.merge(tracker);
        }
        aggregate
    }

    /// Closes the current frame for a `width` x `height` output.
    ///
    /// Selects the depth buffer, publishes the frame report, then resets
    /// every context tracker so surface shares are released.
    pub fn present(&mut self, width: u32, height: u32) -> FrameSelection {
        let mut aggregate = self.aggregate();

        let snapshot = aggregate.find_best_snapshot(width, height);
        aggregate.keep_cleared_depth_surfaces();
        let selected = match self.settings.selection {
            SelectionMode::BestSnapshot => snapshot.as_ref().map(|s| s.surface.clone()),
            SelectionMode::BeforeClear => {
                aggregate.find_best_cleared_depth_buffer_surface(self.settings.clearing_number)
            }
        };

        let report = FrameDepthReport {
            frame_number: self.frame_number,
            total_vertices: aggregate.total_vertices(),
            total_drawcalls: aggregate.total_drawcalls(),
            tracked_surfaces: aggregate.depth_buffer_counters().len(),
            cleared_records: aggregate.cleared_depth_surfaces().len(),
            selection: self.settings.selection,
            selected_surface: selected.as_ref().map(|s| s.id()),
        };
        log::debug!(
            "Presented frame {} at {}x{}: {:?} selected among {} depth-stencils",
            report.frame_number,
            width,
            height,
            report.selected_surface,
            report.tracked_surfaces
        );

        self.monitors.publish(&report);
        self.monitors.update_all();

        for tracker in self.contexts.values_mut() {
            tracker.reset();
        }
        self.frame_number += 1;

        FrameSelection {
            report,
            snapshot,
            selected,
        }
    }
}

impl Default for DepthTrackingService {
    fn default() -> Self {
        Self::new(TrackerSettings::default())
    }
}
