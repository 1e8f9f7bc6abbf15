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

//! # Depthscope Tracker
//!
//! Records draw statistics against the bound depth-stencil surface, keeps the
//! history of surfaces captured at clear time, and picks the depth buffer most
//! likely to hold the main scene.
//!
//! A [`DrawCallTracker`] is a plain value owned by one rendering context. It
//! does no locking: the interception layer drives it from the thread issuing
//! the graphics commands and merges per-context trackers explicitly.

#![warn(missing_docs)]

pub mod ledger;
pub mod registry;
pub mod selector;
pub mod tracker;

pub use ledger::{ClearanceLedger, ClearedSurfaceRecord};
pub use registry::{DepthRegistry, DepthSnapshot};
pub use selector::find_best_snapshot;
pub use tracker::DrawCallTracker;
