// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for road dictionary I/O

use thiserror::Error;

/// Result type alias for dictionary operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading or writing a road dictionary
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed record in a dictionary file
    #[error("malformed road record at line {line}: {message}")]
    Parse { line: usize, message: String },
}

impl Error {
    /// Create a parse error for the given 1-based line number
    pub fn parse(line: usize, msg: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: msg.into(),
        }
    }
}
