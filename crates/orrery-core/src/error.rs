use thiserror::Error;

/// Errors raised by the core when a caller breaks a precondition.
///
/// Picking misses and stale transition completions are not errors; they are
/// ordinary outcomes and never surface here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrreryError {
    #[error("no body named `{0}` in the registry")]
    UnknownBody(String),
    #[error("body `{name}` cannot be focused: {reason}")]
    InvalidBody { name: String, reason: &'static str },
    #[error("a body named `{0}` is already registered")]
    DuplicateBody(String),
    #[error("cannot frame a sphere of radius {0}: radius must be positive and finite")]
    InvalidRadius(f32),
    #[error("cannot frame a sphere at non-finite position {0}")]
    InvalidPosition(glam::Vec3),
}

pub type Result<T, E = OrreryError> = std::result::Result<T, E>;
