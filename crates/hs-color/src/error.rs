// SPDX-License-Identifier: MIT

//! Error type for color parsing and construction.

use thiserror::Error;

/// Result alias for fallible color operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures raised by the color primitives.
///
/// Inputs are expected to be validated before they reach the engine, so
/// this only fires on programming errors or unchecked user data. It exists
/// so that a bad value stops the pipeline instead of turning into NaN.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A hex string or HSL triple that cannot describe a color.
    #[error("invalid color input '{input}': {reason}")]
    InvalidColorInput {
        /// The offending input, as given.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

impl Error {
    pub(crate) fn invalid(input: impl Into<String>, reason: &'static str) -> Self {
        Self::InvalidColorInput {
            input: input.into(),
            reason,
        }
    }
}
