//! Moving strings and values across the C boundary.

use std::ffi::{c_char, CStr};

use crate::error::{BridgeError, ErrorKind};
use crate::status::DgStatus;

/// Borrow a caller-provided C string argument.
///
/// Null pointers and non-UTF-8 contents are `InvalidArgument`.
#[allow(unsafe_code)]
pub(crate) fn str_arg<'a>(ptr: *const c_char, what: &str) -> Result<&'a str, BridgeError> {
    if ptr.is_null() {
        return Err(BridgeError::new(
            ErrorKind::InvalidArgument,
            format!("{what} is null"),
        ));
    }
    // SAFETY: caller guarantees ptr is a valid null-terminated C string
    // that outlives the call.
    unsafe { CStr::from_ptr(ptr) }.to_str().map_err(|_| {
        BridgeError::new(
            ErrorKind::InvalidArgument,
            format!("{what} is not valid UTF-8"),
        )
    })
}

/// Reject a null out-parameter before any native state changes.
pub(crate) fn require_out<T>(ptr: *mut T, what: &str) -> Result<(), BridgeError> {
    if ptr.is_null() {
        return Err(BridgeError::new(
            ErrorKind::InvalidArgument,
            format!("{what} is null"),
        ));
    }
    Ok(())
}

/// Write `s` plus a null terminator into `buf`.
///
/// The string length (without terminator) goes to `len_out` whenever it is
/// non-null, also on `BufferTooSmall`, so callers can size a retry. A null
/// `buf` with `buf_cap == 0` is a pure length query.
#[allow(unsafe_code)]
pub(crate) fn write_str(s: &str, buf: *mut c_char, buf_cap: usize, len_out: *mut usize) -> i32 {
    let bytes = s.as_bytes();
    if !len_out.is_null() {
        // SAFETY: len_out is valid per caller contract.
        unsafe { *len_out = bytes.len() };
    }
    if buf.is_null() || buf_cap < bytes.len() + 1 {
        return DgStatus::BufferTooSmall as i32;
    }
    // SAFETY: buf points to buf_cap valid bytes and buf_cap > bytes.len().
    unsafe {
        std::ptr::copy_nonoverlapping(bytes.as_ptr(), buf as *mut u8, bytes.len());
        *buf.add(bytes.len()) = 0;
    }
    DgStatus::Ok as i32
}

/// Join list entries with `\n` for transfer through [`write_str`].
pub(crate) fn join_lines(items: &[String]) -> String {
    items.join("\n")
}
