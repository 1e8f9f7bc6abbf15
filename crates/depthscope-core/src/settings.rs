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

//! User-facing settings for depth-buffer tracking and selection.

use crate::error::{Error, Result};
use crate::filter::{DepthFormatSelector, SurfacePolicy};
use serde::{Deserialize, Serialize};

/// Thresholds used when scoring a depth surface against the output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionHeuristics {
    /// Largest accepted difference between candidate and target aspect ratios.
    pub aspect_tolerance: f64,
    /// Smallest accepted `target / candidate` size factor, per axis.
    pub min_scale: f64,
    /// Largest accepted `target / candidate` size factor, per axis.
    pub max_scale: f64,
}

impl SelectionHeuristics {
    /// Checks that the thresholds describe a non-empty acceptance window.
    pub fn validate(&self) -> Result<()> {
        if self.aspect_tolerance.is_nan() || self.aspect_tolerance < 0.0 {
            return Err(Error::InvalidHeuristics(format!(
                "aspect_tolerance must be non-negative, got {}",
                self.aspect_tolerance
            )));
        }
        if self.min_scale.is_nan() || self.min_scale <= 0.0 {
            return Err(Error::InvalidHeuristics(format!(
                "min_scale must be positive, got {}",
                self.min_scale
            )));
        }
        if self.max_scale.is_nan() || self.max_scale < self.min_scale {
            return Err(Error::InvalidHeuristics(format!(
                "max_scale ({}) is below min_scale ({})",
                self.max_scale, self.min_scale
            )));
        }
        Ok(())
    }
}

impl Default for SelectionHeuristics {
    fn default() -> Self {
        Self {
            aspect_tolerance: 0.1,
            min_scale: 0.5,
            max_scale: 2.0,
        }
    }
}

/// Which search decides the depth buffer exposed to effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SelectionMode {
    /// The bound depth-stencil with the most draw calls at a matching resolution.
    #[default]
    BestSnapshot,
    /// The backup copy taken before a clear, chosen by `clearing_number`.
    BeforeClear,
}

/// A collection of settings controlling how depth surfaces are tracked and selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerSettings {
    /// Format a depth-stencil must have to be tracked.
    pub depth_format: DepthFormatSelector,
    /// Which clear to expose in [`SelectionMode::BeforeClear`]; `0` picks the most recent.
    pub clearing_number: u32,
    /// The search used to pick the exposed depth buffer.
    pub selection: SelectionMode,
    /// Usage strictness per tracking call site.
    pub policy: SurfacePolicy,
    /// If `true`, draws are forced to wireframe.
    pub wireframe: bool,
    /// Resolution matching thresholds.
    pub heuristics: SelectionHeuristics,
}

impl TrackerSettings {
    /// Parses settings from RON text. Missing fields take their defaults.
    pub fn from_ron(text: &str) -> Result<Self> {
        let settings: Self = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Writes settings as pretty RON text.
    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Checks every field that can hold an inconsistent value.
    pub fn validate(&self) -> Result<()> {
        self.heuristics.validate()
    }
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            depth_format: DepthFormatSelector::ANY,
            clearing_number: 0,
            selection: SelectionMode::BestSnapshot,
            policy: SurfacePolicy::default(),
            wireframe: false,
            heuristics: SelectionHeuristics::default(),
        }
    }
}
