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

//! Format and usage filters applied before a surface is tracked.

use crate::error::{Error, Result};
use crate::surface::{SurfaceDesc, SurfaceFormat};
use serde::{Deserialize, Serialize};

/// Allow-list entries, indexed by the user-facing format code.
const ALLOWED_FORMATS: [SurfaceFormat; 10] = [
    SurfaceFormat::Unknown,
    SurfaceFormat::Intz,
    SurfaceFormat::D15S1,
    SurfaceFormat::D24S8,
    SurfaceFormat::D24X8,
    SurfaceFormat::D24X4S4,
    SurfaceFormat::D24FS8,
    SurfaceFormat::D16,
    SurfaceFormat::Df16,
    SurfaceFormat::Df24,
];

/// Chooses which depth format a surface must have to be tracked.
///
/// Code `0` is the "don't care" sentinel accepting every format. Codes
/// `1..=9` each require one specific depth/stencil format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct DepthFormatSelector(u8);

impl DepthFormatSelector {
    /// Accept any format.
    pub const ANY: Self = Self(0);

    /// The highest valid format code.
    pub const MAX_CODE: u32 = ALLOWED_FORMATS.len() as u32 - 1;

    /// Builds a selector from a configuration code.
    pub fn from_code(code: u32) -> Result<Self> {
        if code <= Self::MAX_CODE {
            Ok(Self(code as u8))
        } else {
            Err(Error::UnknownFormatCode(code))
        }
    }

    /// Builds the selector requiring exactly `format`, if it is on the allow-list.
    pub fn for_format(format: SurfaceFormat) -> Option<Self> {
        ALLOWED_FORMATS
            .iter()
            .skip(1)
            .position(|allowed| *allowed == format)
            .map(|index| Self(index as u8 + 1))
    }

    /// The configuration code of this selector.
    pub fn code(self) -> u32 {
        u32::from(self.0)
    }

    /// The required format, or `None` for the "don't care" sentinel.
    pub fn required_format(self) -> Option<SurfaceFormat> {
        match ALLOWED_FORMATS[usize::from(self.0)] {
            SurfaceFormat::Unknown => None,
            format => Some(format),
        }
    }

    /// Whether a surface of `format` passes this selector.
    pub fn accepts(self, format: SurfaceFormat) -> bool {
        match self.required_format() {
            Some(required) => required == format,
            None => true,
        }
    }
}

impl TryFrom<u32> for DepthFormatSelector {
    type Error = Error;

    fn try_from(code: u32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl From<DepthFormatSelector> for u32 {
    fn from(selector: DepthFormatSelector) -> Self {
        selector.code()
    }
}

/// How strictly a surface's usage flags are checked at a tracking call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UsageFilter {
    /// Usage flags are not inspected.
    Relaxed,
    /// Usage must be exactly a depth-stencil attachment.
    Strict,
}

impl UsageFilter {
    /// Whether `desc` passes this filter.
    pub fn accepts(self, desc: &SurfaceDesc) -> bool {
        match self {
            UsageFilter::Relaxed => true,
            UsageFilter::Strict => desc.is_depth_stencil_attachment(),
        }
    }
}

/// Usage strictness per tracking call site.
///
/// Surfaces seen while bound for drawing and surfaces captured at clear time
/// are filtered independently. By default only the clear-time capture
/// requires a genuine depth-stencil usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SurfacePolicy {
    /// Filter applied by `track_rendertargets`.
    pub on_bind: UsageFilter,
    /// Filter applied by `track_depth_surface`.
    pub on_clear: UsageFilter,
}

impl Default for SurfacePolicy {
    fn default() -> Self {
        Self {
            on_bind: UsageFilter::Relaxed,
            on_clear: UsageFilter::Strict,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::SurfaceUsage;

    fn desc(format: SurfaceFormat, usage: SurfaceUsage) -> SurfaceDesc {
        SurfaceDesc {
            width: 800,
            height: 600,
            format,
            usage,
        }
    }

    #[test]
    fn sentinel_accepts_every_format() {
        let selector = DepthFormatSelector::ANY;
        assert_eq!(selector.required_format(), None);
        assert!(selector.accepts(SurfaceFormat::D24S8));
        assert!(selector.accepts(SurfaceFormat::Other(21)));
    }

    #[test]
    fn specific_code_requires_its_format() {
        let selector = DepthFormatSelector::from_code(3).unwrap();
        assert_eq!(selector.required_format(), Some(SurfaceFormat::D24S8));
        assert!(selector.accepts(SurfaceFormat::D24S8));
        assert!(!selector.accepts(SurfaceFormat::D16));
        assert!(!selector.accepts(SurfaceFormat::Unknown));
    }

    #[test]
    fn out_of_range_code_is_rejected() {
        assert_eq!(
            DepthFormatSelector::from_code(10),
            Err(Error::UnknownFormatCode(10))
        );
        assert!(DepthFormatSelector::try_from(9).is_ok());
    }

    #[test]
    fn selector_for_format_matches_code() {
        assert_eq!(
            DepthFormatSelector::for_format(SurfaceFormat::Intz),
            Some(DepthFormatSelector::from_code(1).unwrap())
        );
        assert_eq!(
            DepthFormatSelector::for_format(SurfaceFormat::Df24).map(|s| s.code()),
            Some(9)
        );
        assert_eq!(DepthFormatSelector::for_format(SurfaceFormat::Unknown), None);
        assert_eq!(DepthFormatSelector::for_format(SurfaceFormat::Other(1)), None);
    }

    #[test]
    fn usage_filters() {
        let depth = desc(SurfaceFormat::D24S8, SurfaceUsage::DEPTH_STENCIL);
        let color = desc(SurfaceFormat::D24S8, SurfaceUsage::RENDER_TARGET);

        assert!(UsageFilter::Relaxed.accepts(&color));
        assert!(UsageFilter::Strict.accepts(&depth));
        assert!(!UsageFilter::Strict.accepts(&color));
    }

    #[test]
    fn default_policy_is_strict_only_at_clear_time() {
        let policy = SurfacePolicy::default();
        assert_eq!(policy.on_bind, UsageFilter::Relaxed);
        assert_eq!(policy.on_clear, UsageFilter::Strict);
    }
}
