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

//! # Depthscope Core
//!
//! Foundational crate containing the contracts and plain data shared by the
//! depth-buffer tracker and the telemetry service.
//!
//! The interception layer hands us surfaces and a draw context through the
//! [`DepthSurface`] and [`DrawContext`] traits. Everything else in this crate
//! is value types: identities, descriptors, counters, filters, settings and
//! the per-frame report handed to monitors.

#![warn(missing_docs)]

pub mod error;
pub mod filter;
pub mod settings;
pub mod stats;
pub mod surface;
pub mod telemetry;
pub mod utils;

pub use error::{Error, Result};
pub use filter::{DepthFormatSelector, SurfacePolicy, UsageFilter};
pub use settings::{SelectionHeuristics, SelectionMode, TrackerSettings};
pub use stats::DrawStats;
pub use surface::{
    DepthSurface, DrawContext, FillMode, SurfaceDesc, SurfaceFormat, SurfaceId, SurfaceRef,
    SurfaceUsage,
};
pub use telemetry::{FrameDepthReport, ResourceMonitor};
