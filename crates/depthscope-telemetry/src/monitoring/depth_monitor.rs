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

//! Depth tracking monitor.

use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};

use depthscope_core::{FrameDepthReport, ResourceMonitor};

#[derive(Debug, Default)]
struct MonitorState {
    last_report: Option<FrameDepthReport>,
    frames_observed: u64,
}

/// Keeps the latest [`FrameDepthReport`] for overlays and loggers.
///
/// Fed through [`ResourceMonitor::on_frame`] on every present, readable from
/// any thread.
#[derive(Debug)]
pub struct DepthTrackerMonitor {
    name: String,
    state: Mutex<MonitorState>,
}

impl DepthTrackerMonitor {
    /// Creates a monitor with no report yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: Mutex::new(MonitorState::default()),
        }
    }

    /// The report of the most recently presented frame.
    pub fn last_report(&self) -> Option<FrameDepthReport> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last_report
    }

    /// Frames reported since creation.
    pub fn frames_observed(&self) -> u64 {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .frames_observed
    }
}

impl ResourceMonitor for DepthTrackerMonitor {
    fn monitor_id(&self) -> Cow<'static, str> {
        Cow::Owned(format!("Depth_{}", self.name))
    }

    fn as_any(&self) -> &dyn std::any::Any {
        self
    }

    fn on_frame(&self, report: &FrameDepthReport) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.frames_observed += 1;
        state.last_report = Some(*report);
    }

    fn update(&self) {
        if let Some(report) = self.last_report() {
            log::trace!(
                "Frame {}: {} draws, {} vertices, {} depth-stencils, selected {:?}",
                report.frame_number,
                report.total_drawcalls,
                report.total_vertices,
                report.tracked_surfaces,
                report.selected_surface
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use depthscope_core::{SelectionMode, SurfaceId};

    fn report(frame_number: u64, selected: Option<u64>) -> FrameDepthReport {
        FrameDepthReport {
            frame_number,
            total_vertices: 300,
            total_drawcalls: 3,
            tracked_surfaces: 1,
            cleared_records: 0,
            selection: SelectionMode::BestSnapshot,
            selected_surface: selected.map(SurfaceId),
        }
    }

    #[test]
    fn keeps_latest_report() {
        let monitor = DepthTrackerMonitor::new("main");
        assert!(monitor.last_report().is_none());

        monitor.on_frame(&report(0, None));
        monitor.on_frame(&report(1, Some(5)));

        assert_eq!(monitor.last_report(), Some(report(1, Some(5))));
        assert_eq!(monitor.frames_observed(), 2);
    }

    #[test]
    fn monitor_id_includes_name() {
        let monitor = DepthTrackerMonitor::new("overlay");
        assert_eq!(monitor.monitor_id(), "Depth_overlay");
    }
}
