//! Error translation at the boundary.
//!
//! Every native failure is turned into a [`BridgeError`]: a kind that
//! decides which failure category the caller sees, and the native message
//! carried verbatim. C callers get the kind as a [`DgStatus`] and can read
//! the message back with [`dg_last_error_message`].

use std::any::Any;
use std::cell::RefCell;
use std::ffi::c_char;

use thiserror::Error;

use dyngraph_core::{CastError, EntityError, SignalError, TraceError};
use dyngraph_engine::ConfigError;

use crate::buffer::write_str;
use crate::status::DgStatus;

/// Failure category of a bridge call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Not a handle, or the object behind it was destroyed.
    InvalidHandle,
    /// A handle of the wrong kind or an argument of the wrong type.
    TypeMismatch,
    /// A null, non-UTF-8 or otherwise malformed argument.
    InvalidArgument,
    /// The native operation itself failed.
    Runtime,
    /// A trace sink could not be opened or closed.
    Io,
    /// The bridge is unusable (poisoned graph lock).
    Internal,
}

impl ErrorKind {
    /// Whether the caller is at fault (malformed call or bad handle)
    /// rather than the native operation.
    pub fn is_caller_error(self) -> bool {
        matches!(
            self,
            Self::InvalidHandle | Self::TypeMismatch | Self::InvalidArgument
        )
    }
}

/// A translated native failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct BridgeError {
    kind: ErrorKind,
    message: String,
}

impl BridgeError {
    /// An error of `kind` carrying `message`.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Failure category.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Message, unchanged from the native failure.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SignalError> for BridgeError {
    fn from(e: SignalError) -> Self {
        let kind = match e {
            SignalError::Stale { .. } => ErrorKind::InvalidHandle,
            _ => ErrorKind::Runtime,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<EntityError> for BridgeError {
    fn from(e: EntityError) -> Self {
        let kind = match e {
            EntityError::Stale { .. } | EntityError::Signal(SignalError::Stale { .. }) => {
                ErrorKind::InvalidHandle
            }
            _ => ErrorKind::Runtime,
        };
        Self::new(kind, e.to_string())
    }
}

impl From<CastError> for BridgeError {
    fn from(e: CastError) -> Self {
        Self::new(ErrorKind::Runtime, e.to_string())
    }
}

impl From<TraceError> for BridgeError {
    fn from(e: TraceError) -> Self {
        Self::new(ErrorKind::Io, e.to_string())
    }
}

impl From<ConfigError> for BridgeError {
    fn from(e: ConfigError) -> Self {
        Self::new(ErrorKind::Runtime, e.to_string())
    }
}

// ── last error (per thread) ────────────────────────────────────────

thread_local! {
    static LAST_ERROR: RefCell<String> = const { RefCell::new(String::new()) };
}

/// Message of the last failed call made on this thread.
pub fn last_error_message() -> String {
    LAST_ERROR.with(|cell| cell.borrow().clone())
}

fn set_last_error(message: String) {
    LAST_ERROR.with(|cell| *cell.borrow_mut() = message);
}

/// Record `err` as this thread's last error and return its status code.
pub(crate) fn fail(err: BridgeError) -> i32 {
    tracing::debug!(kind = ?err.kind, message = %err.message, "bridge call failed");
    let status = DgStatus::from(err.kind);
    set_last_error(err.message);
    status as i32
}

/// Record a caught panic and return [`DgStatus::Panicked`].
pub(crate) fn record_panic(payload: Box<dyn Any + Send>) -> i32 {
    let detail = if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_owned()
    };
    tracing::warn!(panic = %detail, "panic caught at FFI boundary");
    set_last_error(format!("panic: {detail}"));
    DgStatus::Panicked as i32
}

/// Copy the last error message of this thread into `buf`.
///
/// Writes the message length (without the terminator) to `len_out` when it
/// is non-null. Returns `DG_STATUS_BUFFER_TOO_SMALL` if `buf_cap` cannot
/// hold the message and its null terminator.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_last_error_message(buf: *mut c_char, buf_cap: usize, len_out: *mut usize) -> i32 {
    ffi_guard!({ write_str(&last_error_message(), buf, buf_cap, len_out) })
}
