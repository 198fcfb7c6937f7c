// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types shared across the strip-geometry crates

use thiserror::Error;

/// Result type alias for model operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by configuration validation and the collaborator contracts
#[derive(Error, Debug)]
pub enum Error {
    /// Index outside the configured detector bounds
    #[error("{name} index {value} out of bounds (max {max})")]
    IndexOutOfBounds {
        name: &'static str,
        value: i64,
        max: i64,
    },

    /// Chamber dimensions that cannot describe a trapezoid
    #[error("malformed dimensions for chamber {chamber}: {message}")]
    BadDimensions { chamber: usize, message: String },

    /// Volume source failed to produce required data
    #[error("volume source error: {0}")]
    Volume(String),

    /// Constants source supplied unusable values
    #[error("constants source error: {0}")]
    Constants(String),
}

impl Error {
    /// Create an index-out-of-bounds error
    pub fn index(name: &'static str, value: usize, max: usize) -> Self {
        Error::IndexOutOfBounds {
            name,
            value: value as i64,
            max: max as i64,
        }
    }

    /// Create a bad-dimensions error
    pub fn bad_dimensions(chamber: usize, msg: impl Into<String>) -> Self {
        Error::BadDimensions {
            chamber,
            message: msg.into(),
        }
    }

    /// Create a volume source error
    pub fn volume(msg: impl Into<String>) -> Self {
        Error::Volume(msg.into())
    }

    /// Create a constants source error
    pub fn constants(msg: impl Into<String>) -> Self {
        Error::Constants(msg.into())
    }
}
