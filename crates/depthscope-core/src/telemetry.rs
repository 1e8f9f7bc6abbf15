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


//! The monitoring contract shared by the telemetry service and its consumers.

use std::borrow::Cow;
use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::settings::SelectionMode;
use crate::surface::SurfaceId;

/// What the tracker saw during one presented frame, across every context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameDepthReport {
    /// Monotonic frame counter, starting at 0.
    pub frame_number: u64,
    /// Vertices submitted by all draws of the frame.
    pub total_vertices: u32,
    /// Number of draw submissions of the frame.
    pub total_drawcalls: u32,
    /// Depth-stencils registered while bound.
    pub tracked_surfaces: usize,
    /// Clear-time records left after pruning.
    pub cleared_records: usize,
    /// The search that decided `selected_surface`.
    pub selection: SelectionMode,
    /// The surface exposed to effects, if any matched.
    pub selected_surface: Option<SurfaceId>,
}

impl FrameDepthReport {
    /// Renders the report as a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// A stateful observer refreshed once per presented frame.
///
/// Monitors live behind `Arc` and are read from other threads (overlays,
/// loggers), so implementations keep their state behind interior mutability.
pub trait ResourceMonitor: Send + Sync + Debug + 'static {
    /// Returns a unique, human-readable identifier for this monitor instance.
    fn monitor_id(&self) -> Cow<'static, str>;

    /// Allows downcasting to a concrete monitor type.
    fn as_any(&self) -> &dyn std::any::Any;

    /// Receives the report of a presented frame. Ignored by default.
    fn on_frame(&self, _report: &FrameDepthReport) {}

    /// Polls whatever the monitor observes. Called after `on_frame`; the
    /// default does nothing.
    fn update(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(selected: Option<u64>) -> FrameDepthReport {
        FrameDepthReport {
            frame_number: 7,
            total_vertices: 1200,
            total_drawcalls: 40,
            tracked_surfaces: 2,
            cleared_records: 1,
            selection: SelectionMode::BestSnapshot,
            selected_surface: selected.map(SurfaceId),
        }
    }

    #[test]
    fn json_uses_plain_surface_ids() {
        let value: serde_json::Value =
            serde_json::from_str(&report(Some(42)).to_json().unwrap()).unwrap();
        assert_eq!(value["frame_number"], 7);
        assert_eq!(value["selected_surface"], 42);
        assert_eq!(value["selection"], "BestSnapshot");
    }

    #[test]
    fn missing_selection_is_null() {
        let json = report(None).to_json().unwrap();
        assert!(json.contains("\"selected_surface\":null"));
        assert_eq!(serde_json::from_str::<FrameDepthReport>(&json).unwrap(), report(None));
    }
}
