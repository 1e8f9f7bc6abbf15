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

//! # Depthscope Telemetry
//!
//! Frame-level orchestration on top of [`depthscope_tracker`]: one tracker per
//! rendering context, merged into an aggregate view when the frame is
//! presented, with a per-frame report pushed to the registered monitors.

#![warn(missing_docs)]

pub mod config;
pub mod logging;
pub mod monitoring;
pub mod service;

pub use config::load_settings;
pub use depthscope_core::FrameDepthReport;
pub use logging::init_logging;
pub use monitoring::{DepthTrackerMonitor, MonitorRegistry};
pub use service::{ContextId, DepthTrackingService, FrameSelection};
