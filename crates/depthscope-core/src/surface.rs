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

//! Defines the surface contracts exposed by the interception layer.
//!
//! The tracker never creates or owns GPU memory. It only sees surfaces through
//! [`DepthSurface`], identified by a stable [`SurfaceId`] assigned by the
//! graphics runtime, and reads their descriptor live whenever it needs one.

use crate::depthscope_bitflags;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::sync::Arc;

/// A stable, opaque identity for a surface, assigned by the graphics runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(pub u64);

const fn fourcc(code: &[u8; 4]) -> u32 {
    (code[0] as u32)
        | ((code[1] as u32) << 8)
        | ((code[2] as u32) << 16)
        | ((code[3] as u32) << 24)
}

/// The texel format of a surface, restricted to the depth formats the tracker cares about.
///
/// Raw values follow the D3D9 format enumeration, with vendor formats encoded as FOURCC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceFormat {
    /// No format information (`D3DFMT_UNKNOWN`).
    Unknown,
    /// Vendor depth format readable as a texture (`INTZ`).
    Intz,
    /// 15-bit depth with a 1-bit stencil.
    D15S1,
    /// 24-bit depth with an 8-bit stencil.
    D24S8,
    /// 24-bit depth, 8 bits unused.
    D24X8,
    /// 24-bit depth with a 4-bit stencil.
    D24X4S4,
    /// 24-bit floating point depth with an 8-bit stencil.
    D24FS8,
    /// 16-bit depth.
    D16,
    /// Vendor 16-bit depth format readable as a texture (`DF16`).
    Df16,
    /// Vendor 24-bit depth format readable as a texture (`DF24`).
    Df24,
    /// Any other format, kept as its raw code.
    Other(u32),
}

impl SurfaceFormat {
    const RAW_INTZ: u32 = fourcc(b"INTZ");
    const RAW_DF16: u32 = fourcc(b"DF16");
    const RAW_DF24: u32 = fourcc(b"DF24");

    /// Decodes a raw runtime format code.
    pub const fn from_raw(raw: u32) -> Self {
        match raw {
            0 => SurfaceFormat::Unknown,
            73 => SurfaceFormat::D15S1,
            75 => SurfaceFormat::D24S8,
            77 => SurfaceFormat::D24X8,
            79 => SurfaceFormat::D24X4S4,
            80 => SurfaceFormat::D16,
            83 => SurfaceFormat::D24FS8,
            Self::RAW_INTZ => SurfaceFormat::Intz,
            Self::RAW_DF16 => SurfaceFormat::Df16,
            Self::RAW_DF24 => SurfaceFormat::Df24,
            other => SurfaceFormat::Other(other),
        }
    }

    /// Returns the raw runtime format code.
    pub const fn raw(self) -> u32 {
        match self {
            SurfaceFormat::Unknown => 0,
            SurfaceFormat::D15S1 => 73,
            SurfaceFormat::D24S8 => 75,
            SurfaceFormat::D24X8 => 77,
            SurfaceFormat::D24X4S4 => 79,
            SurfaceFormat::D16 => 80,
            SurfaceFormat::D24FS8 => 83,
            SurfaceFormat::Intz => Self::RAW_INTZ,
            SurfaceFormat::Df16 => Self::RAW_DF16,
            SurfaceFormat::Df24 => Self::RAW_DF24,
            SurfaceFormat::Other(raw) => raw,
        }
    }
}

depthscope_bitflags! {
    /// How a surface was created to be used, as reported by the runtime.
    pub struct SurfaceUsage: u32 {
        /// The surface is a color render target.
        const RENDER_TARGET = 0x0000_0001;
        /// The surface is a depth-stencil attachment.
        const DEPTH_STENCIL = 0x0000_0002;
        /// The surface lives in dynamic memory.
        const DYNAMIC = 0x0000_0200;
    }
}

/// A snapshot of a surface's properties at the time it was queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SurfaceDesc {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Texel format.
    pub format: SurfaceFormat,
    /// Creation usage flags.
    pub usage: SurfaceUsage,
}

impl SurfaceDesc {
    /// Width over height, or `None` for a degenerate surface.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.width == 0 || self.height == 0 {
            None
        } else {
            Some(f64::from(self.width) / f64::from(self.height))
        }
    }

    /// Whether the usage marks a genuine depth-stencil attachment and nothing else.
    pub fn is_depth_stencil_attachment(&self) -> bool {
        self.usage == SurfaceUsage::DEPTH_STENCIL
    }
}

/// A depth-stencil surface owned by the graphics runtime.
///
/// Implementors are cheap handles; the descriptor is read on every call so
/// that a resized or recreated surface is always seen as it currently is.
pub trait DepthSurface: Debug + Send + Sync {
    /// The stable identity of this surface.
    fn id(&self) -> SurfaceId;

    /// The current descriptor of this surface.
    fn desc(&self) -> SurfaceDesc;
}

/// A shared handle to a runtime surface.
pub type SurfaceRef = Arc<dyn DepthSurface>;

/// Rasterizer fill mode forced on the host device for each draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FillMode {
    /// Filled triangles.
    #[default]
    Solid,
    /// Triangle edges only.
    Wireframe,
}

/// The host device as seen from a draw notification.
pub trait DrawContext {
    /// The depth-stencil surface bound at the time of the draw, if any.
    fn bound_depth_stencil(&self) -> Option<SurfaceRef>;

    /// Forces the rasterizer fill mode for subsequent draws.
    fn set_fill_mode(&mut self, mode: FillMode);
}
