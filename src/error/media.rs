use thiserror::Error;

/// Axis of a conversion dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Errors raised while declaring media collections and conversions.
///
/// Resolution of validation rules never fails; malformed declarations are
/// rejected here, at registration time.
///
/// # Example
/// ```
/// use wzs_media::error::media::{Axis, RegistrationError};
///
/// let err = RegistrationError::ZeroDimension {
///     conversion: "thumb".into(),
///     axis: Axis::Width,
/// };
/// assert_eq!(err.to_string(), "conversion `thumb` declares a zero width");
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistrationError {
    #[error("{kind} name must not be empty")]
    EmptyName { kind: &'static str },

    #[error("conversion `{conversion}` declares a zero {axis}")]
    ZeroDimension { conversion: String, axis: Axis },

    #[error("media collection `{0}` is registered more than once")]
    DuplicateCollection(String),
}

/// Errors raised while loading [`MediaConfig`](crate::config::media::MediaConfig).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown conversion scope policy `{0}` (expected `override` or `merge`)")]
    UnknownScopePolicy(String),
}
