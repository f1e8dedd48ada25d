//! C-compatible status codes.
//!
//! [`DgStatus`] is a `repr(i32)` enum returned by every `dg_*` function.
//! Each [`ErrorKind`] of the bridge maps onto exactly one status.

use crate::error::{BridgeError, ErrorKind};

/// C-compatible status code returned by all FFI functions.
///
/// `Ok` = 0, all errors are negative. Values are ABI-stable.
#[repr(i32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DgStatus {
    /// Success.
    Ok = 0,
    /// Handle is not a handle, or its object was destroyed.
    InvalidHandle = -1,
    /// Handle of the wrong kind, or an argument of the wrong type.
    TypeMismatch = -2,
    /// The native operation failed; see the last error message.
    RuntimeError = -3,
    /// A trace sink could not be opened or closed.
    IoError = -4,
    /// An argument is null, not UTF-8, or otherwise malformed.
    InvalidArgument = -5,
    /// Caller-provided buffer is too small; the required length was
    /// written to the length out-parameter.
    BufferTooSmall = -6,
    /// Internal error (e.g. poisoned mutex after a prior panic).
    InternalError = -7,
    /// A Rust panic was caught at the FFI boundary.
    Panicked = -128,
}

impl From<ErrorKind> for DgStatus {
    fn from(kind: ErrorKind) -> Self {
        match kind {
            ErrorKind::InvalidHandle => DgStatus::InvalidHandle,
            ErrorKind::TypeMismatch => DgStatus::TypeMismatch,
            ErrorKind::InvalidArgument => DgStatus::InvalidArgument,
            ErrorKind::Runtime => DgStatus::RuntimeError,
            ErrorKind::Io => DgStatus::IoError,
            ErrorKind::Internal => DgStatus::InternalError,
        }
    }
}

impl From<&BridgeError> for DgStatus {
    fn from(e: &BridgeError) -> Self {
        DgStatus::from(e.kind())
    }
}
