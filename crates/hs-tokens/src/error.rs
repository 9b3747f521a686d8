//! Error type for the token engine.

use thiserror::Error;

/// Result alias used across `hs-tokens`.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures the engine reports instead of producing garbage output.
///
/// Convergence misses and unsatisfiable hue constraints are not errors;
/// they degrade and say so on the returned value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Malformed color input (bad hex, non-finite HSL).
    #[error(transparent)]
    Color(#[from] hs_color::Error),

    /// A numeric parameter that cannot be used (NaN, infinite).
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },

    /// A slot edit named a slot the cluster does not have.
    #[error("unknown slot '{0}'")]
    UnknownSlot(String),
}
