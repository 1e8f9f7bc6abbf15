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

//! Per-frame draw statistics.

use std::ops::AddAssign;

/// Counters accumulated over one frame, either globally or for one depth-stencil surface.
///
/// All counters saturate instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrawStats {
    /// Vertices submitted.
    pub vertices: u32,
    /// Draw calls submitted.
    pub drawcalls: u32,
    /// Buffer maps observed.
    pub mapped: u32,
    /// Vertex shader bindings observed.
    pub vs_uses: u32,
    /// Pixel shader bindings observed.
    pub ps_uses: u32,
}

impl DrawStats {
    /// Accounts for one draw call of `vertices` vertices.
    pub fn record_draw(&mut self, vertices: u32) {
        self.vertices = self.vertices.saturating_add(vertices);
        self.drawcalls = self.drawcalls.saturating_add(1);
    }

    /// `true` when no draw call was recorded.
    pub fn is_empty(&self) -> bool {
        self.drawcalls == 0
    }
}

impl AddAssign<&DrawStats> for DrawStats {
    fn add_assign(&mut self, other: &DrawStats) {
        self.vertices = self.vertices.saturating_add(other.vertices);
        self.drawcalls = self.drawcalls.saturating_add(other.drawcalls);
        self.mapped = self.mapped.saturating_add(other.mapped);
        self.vs_uses = self.vs_uses.saturating_add(other.vs_uses);
        self.ps_uses = self.ps_uses.saturating_add(other.ps_uses);
    }
}
