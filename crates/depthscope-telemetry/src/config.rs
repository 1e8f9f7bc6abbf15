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

//! Loading tracker settings files.

use anyhow::{Context, Result};
use depthscope_core::TrackerSettings;
use std::path::Path;

/// Loads and validates tracker settings from a RON file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<TrackerSettings> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read tracker settings from '{}'", path.display()))?;
    let settings = TrackerSettings::from_ron(&text)
        .with_context(|| format!("Invalid tracker settings in '{}'", path.display()))?;
    log::info!(
        "Loaded tracker settings from '{}' (format code {}, clearing number {})",
        path.display(),
        settings.depth_format.code(),
        settings.clearing_number
    );
    Ok(settings)
}
