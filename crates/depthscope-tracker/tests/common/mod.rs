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

#![allow(dead_code)]

use depthscope_core::{
    DepthSurface, DrawContext, FillMode, SurfaceDesc, SurfaceFormat, SurfaceId, SurfaceRef,
    SurfaceUsage,
};
use std::sync::{Arc, Mutex};

/// A runtime surface whose descriptor can change under the tracker's feet.
#[derive(Debug)]
pub struct MockSurface {
    id: SurfaceId,
    desc: Mutex<SurfaceDesc>,
}

impl MockSurface {
    pub fn resize(&self, width: u32, height: u32) {
        let mut desc = self.desc.lock().unwrap();
        desc.width = width;
        desc.height = height;
    }
}

impl DepthSurface for MockSurface {
    fn id(&self) -> SurfaceId {
        self.id
    }

    fn desc(&self) -> SurfaceDesc {
        *self.desc.lock().unwrap()
    }
}

pub fn mock_surface(id: u64, width: u32, height: u32) -> Arc<MockSurface> {
    Arc::new(MockSurface {
        id: SurfaceId(id),
        desc: Mutex::new(SurfaceDesc {
            width,
            height,
            format: SurfaceFormat::D24S8,
            usage: SurfaceUsage::DEPTH_STENCIL,
        }),
    })
}

pub fn depth_surface(id: u64, width: u32, height: u32) -> SurfaceRef {
    mock_surface(id, width, height)
}

/// A host device with a single depth-stencil binding slot.
#[derive(Debug, Default)]
pub struct MockDevice {
    pub bound: Option<SurfaceRef>,
    pub fill_mode: FillMode,
}

impl MockDevice {
    pub fn bind(&mut self, surface: &SurfaceRef) {
        self.bound = Some(surface.clone());
    }

    pub fn unbind(&mut self) {
        self.bound = None;
    }
}

impl DrawContext for MockDevice {
    fn bound_depth_stencil(&self) -> Option<SurfaceRef> {
        self.bound.clone()
    }

    fn set_fill_mode(&mut self, mode: FillMode) {
        self.fill_mode = mode;
    }
}
