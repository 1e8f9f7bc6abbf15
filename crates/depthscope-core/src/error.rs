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

//! Error types for configuring the tracker.
//!
//! Routine filtering (wrong format, nothing bound, empty ledger) is never an
//! error. These variants only cover values that cannot be turned into a valid
//! configuration.

use thiserror::Error;

/// An error raised while building tracker configuration.
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The depth format code does not name an entry of the allow-list.
    #[error("Unknown depth format code {0} (expected 0..={max})", max = crate::filter::DepthFormatSelector::MAX_CODE)]
    UnknownFormatCode(u32),
    /// The selection thresholds are inconsistent.
    #[error("Invalid selection heuristics: {0}")]
    InvalidHeuristics(String),
    /// The configuration text could not be parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<ron::error::SpannedError> for Error {
    fn from(err: ron::error::SpannedError) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<ron::Error> for Error {
    fn from(err: ron::Error) -> Self {
        Error::Config(err.to_string())
    }
}

/// A specialized `Result` for configuration operations.
pub type Result<T> = std::result::Result<T, Error>;
