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

//! Resolution-matching search for the main scene depth buffer.
//!
//! A frame usually draws into several depth buffers (shadow maps, reflections,
//! UI). The one whose size matches the output and that received the most draw
//! calls is almost always the scene depth.

use crate::registry::DepthSnapshot;
use depthscope_core::{SelectionHeuristics, SurfaceDesc};

/// Absorbs float rounding so that a difference of exactly the tolerance is accepted.
const ASPECT_SLACK: f64 = 1e-9;

fn scale_factor(target: u32, actual: u32) -> f64 {
    if target != actual {
        f64::from(target) / f64::from(actual)
    } else {
        1.0
    }
}

fn matches_resolution(
    desc: &SurfaceDesc,
    width: u32,
    height: u32,
    target_aspect: f64,
    heuristics: &SelectionHeuristics,
) -> bool {
    let Some(aspect) = desc.aspect_ratio() else {
        return false;
    };
    if (aspect - target_aspect).abs() > heuristics.aspect_tolerance + ASPECT_SLACK {
        return false;
    }

    let window = heuristics.min_scale..=heuristics.max_scale;
    window.contains(&scale_factor(width, desc.width))
        && window.contains(&scale_factor(height, desc.height))
}

/// Returns the snapshot with the most draw calls among those matching `width` x `height`.
///
/// Snapshots without draw calls or vertices are never selected. On equal draw
/// counts the candidate iterated last wins.
pub fn find_best_snapshot<'a>(
    snapshots: impl IntoIterator<Item = &'a DepthSnapshot>,
    width: u32,
    height: u32,
    heuristics: &SelectionHeuristics,
) -> Option<DepthSnapshot> {
    if width == 0 || height == 0 {
        log::trace!("Depth snapshot search skipped for empty target {width}x{height}");
        return None;
    }
    let target_aspect = f64::from(width) / f64::from(height);

    let mut best: Option<&DepthSnapshot> = None;
    for snapshot in snapshots {
        if snapshot.stats.drawcalls == 0 || snapshot.stats.vertices == 0 {
            continue;
        }

        let desc = snapshot.surface.desc();
        if !matches_resolution(&desc, width, height, target_aspect, heuristics) {
            log::trace!(
                "Depth surface {:?} ({}x{}) does not fit {}x{}",
                snapshot.id(),
                desc.width,
                desc.height,
                width,
                height
            );
            continue;
        }

        // Later candidates win ties. This mirrors the upstream tracker's
        // non-strict comparison and may not be intended there.
        match best {
            Some(current) if snapshot.stats.drawcalls < current.stats.drawcalls => {}
            _ => best = Some(snapshot),
        }
    }

    best.cloned()
}
