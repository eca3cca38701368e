//! Error taxonomy shared by every engine component.
//!
//! Each variant carries a stable integer status so embedders that speak in
//! plain status codes can round-trip through [`Error::code`] and
//! [`Error::from_code`]. `0` is reserved for success.

use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum Error {
    #[error("unknown error")]
    Unknown,
    /// Malformed input or an enum variant the callee does not accept.
    #[error("invalid argument")]
    InvalidArgument,
    #[error("allocation failed")]
    OutOfMemory,
    /// Index past the end of a collection.
    #[error("not found")]
    NotFound,
    #[error("not ready")]
    NotReady,
    /// An optional capability is absent.
    #[error("unsupported operation")]
    Unsupported,
    #[error("i/o failure")]
    Io,
    /// The object is in a lifecycle phase that forbids the call.
    #[error("invalid state")]
    State,
    /// A numeric value lies outside its required domain.
    #[error("value out of range")]
    Range,
    #[error("timed out")]
    Timeout,
    #[error("permission denied")]
    Permission,
    /// A second pointer arrived while another one is tracked.
    #[error("busy")]
    Busy,
    #[error("corrupt data")]
    Corrupt,
    #[error("arithmetic overflow")]
    Overflow,
    #[error("arithmetic underflow")]
    Underflow,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Status code for success.
pub const OK: i32 = 0;

impl Error {
    pub const fn code(self) -> i32 {
        match self {
            Error::Unknown => -1,
            Error::InvalidArgument => -2,
            Error::OutOfMemory => -3,
            Error::NotFound => -4,
            Error::NotReady => -5,
            Error::Unsupported => -6,
            Error::Io => -7,
            Error::State => -8,
            Error::Range => -9,
            Error::Timeout => -10,
            Error::Permission => -11,
            Error::Busy => -12,
            Error::Corrupt => -13,
            Error::Overflow => -14,
            Error::Underflow => -15,
        }
    }

    /// Maps a status code back to an error. `OK` and unrecognised codes
    /// yield `None`.
    pub const fn from_code(code: i32) -> Option<Error> {
        Some(match code {
            -1 => Error::Unknown,
            -2 => Error::InvalidArgument,
            -3 => Error::OutOfMemory,
            -4 => Error::NotFound,
            -5 => Error::NotReady,
            -6 => Error::Unsupported,
            -7 => Error::Io,
            -8 => Error::State,
            -9 => Error::Range,
            -10 => Error::Timeout,
            -11 => Error::Permission,
            -12 => Error::Busy,
            -13 => Error::Corrupt,
            -14 => Error::Overflow,
            -15 => Error::Underflow,
            _ => return None,
        })
    }
}

/// Collapses a result into the status code an embedder would see.
pub fn status<T>(result: &Result<T>) -> i32 {
    match result {
        Ok(_) => OK,
        Err(e) => e.code(),
    }
}
