//! Trace control FFI.

use std::ffi::c_char;

use crate::bridge;
use crate::buffer::str_arg;
use crate::error::{fail, BridgeError, ErrorKind};
use crate::status::DgStatus;

/// Message of the caller error raised when the trace flag is not a
/// boolean.
pub const ENABLE_TRACE_USAGE: &str = "enableTrace takes as first argument True or False,\n           and as second argument a filename.";

/// Open (`flag == 1`) or close (`flag == 0`) the trace sink `filename`.
///
/// Any other flag is `DG_STATUS_TYPE_MISMATCH` and touches no file.
/// Open/close failures are `DG_STATUS_IO_ERROR`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_enable_trace(flag: i32, filename: *const c_char) -> i32 {
    ffi_guard!({
        let enable = match flag {
            0 => false,
            1 => true,
            _ => {
                return fail(BridgeError::new(
                    ErrorKind::TypeMismatch,
                    ENABLE_TRACE_USAGE,
                ))
            }
        };
        let filename = ffi_try!(str_arg(filename, "filename"));
        ffi_try!(bridge::enable_trace(enable, filename));
        DgStatus::Ok as i32
    })
}
