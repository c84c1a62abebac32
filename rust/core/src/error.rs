// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for parsing and layer decomposition

use thiserror::Error;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing a document or decomposing layers
#[derive(Error, Debug)]
pub enum Error {
    /// A type-1 line with too few tokens or non-numeric fields.
    /// Raised per line and handled by skipping; never aborts a document.
    #[error("malformed part line: {0}")]
    MalformedLine(String),

    /// The document produced zero valid part placements. Distinct from a
    /// successful parse so hosts can tell "nothing to show" apart from an
    /// upstream failure.
    #[error("document contains no buildable part placements")]
    NoBuildableContent,
}

impl Error {
    /// Shorthand for a malformed-line error
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedLine(reason.into())
    }
}
