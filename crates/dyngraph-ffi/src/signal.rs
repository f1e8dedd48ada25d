//! Signal FFI: create, destroy, value access, recompute, plug.
//!
//! Values cross the boundary in caster text form (see
//! `dg_caster_type_names` for the accepted type names).

use std::ffi::c_char;

use dyngraph_core::Time;

use crate::bridge;
use crate::buffer::{join_lines, require_out, str_arg, write_str};
use crate::handle::DgHandle;
use crate::status::DgStatus;

/// Make `consumer` pull its value from `producer` on recompute.
///
/// Only the consumer is modified. Fails with `DG_STATUS_RUNTIME_ERROR` if
/// the graph refuses the connection (type mismatch, cycle, output
/// consumer); the refusal reason is the last error message.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_plug(producer: DgHandle, consumer: DgHandle) -> i32 {
    ffi_guard!({
        ffi_try!(bridge::plug(producer, consumer));
        DgStatus::Ok as i32
    })
}

/// Create a free signal. `type_name` may be null, meaning `"int"`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_create(
    name: *const c_char,
    type_name: *const c_char,
    handle_out: *mut DgHandle,
) -> i32 {
    ffi_guard!({
        ffi_try!(require_out(handle_out, "handle_out"));
        let name = ffi_try!(str_arg(name, "name"));
        let type_name = if type_name.is_null() {
            "int"
        } else {
            ffi_try!(str_arg(type_name, "type_name"))
        };
        let handle = ffi_try!(bridge::create_signal(name, type_name));
        // SAFETY: handle_out is non-null and valid per caller contract.
        unsafe { *handle_out = handle };
        DgStatus::Ok as i32
    })
}

/// Destroy a free signal. Entity signals die with their entity.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_destroy(signal: DgHandle) -> i32 {
    ffi_guard!({
        ffi_try!(bridge::destroy_signal(signal));
        DgStatus::Ok as i32
    })
}

/// Copy the full signal name into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_get_name(
    signal: DgHandle,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let name = ffi_try!(bridge::signal_name(signal));
        write_str(&name, buf, buf_cap, len_out)
    })
}

/// Write the time of the signal's last recompute to `time_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_get_time(signal: DgHandle, time_out: *mut Time) -> i32 {
    ffi_guard!({
        ffi_try!(require_out(time_out, "time_out"));
        let time = ffi_try!(bridge::signal_time(signal));
        // SAFETY: time_out is non-null and valid per caller contract.
        unsafe { *time_out = time };
        DgStatus::Ok as i32
    })
}

/// Copy the current value, in caster text form, into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_get_value(
    signal: DgHandle,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let value = ffi_try!(bridge::signal_value(signal));
        write_str(&value, buf, buf_cap, len_out)
    })
}

/// Parse `text` according to the signal's type and store it.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_set_value(signal: DgHandle, text: *const c_char) -> i32 {
    ffi_guard!({
        let text = ffi_try!(str_arg(text, "text"));
        ffi_try!(bridge::set_signal_value(signal, text));
        DgStatus::Ok as i32
    })
}

/// Recompute at `time` and copy the new value into `buf`.
///
/// The recompute happens even if `buf` turns out too small; the value can
/// then be read with [`dg_signal_get_value`].
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_recompute(
    signal: DgHandle,
    time: Time,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let value = ffi_try!(bridge::recompute(signal, time));
        write_str(&value, buf, buf_cap, len_out)
    })
}

/// Remove the signal's upstream link, keeping its last value.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_signal_unplug(signal: DgHandle) -> i32 {
    ffi_guard!({
        ffi_try!(bridge::unplug(signal));
        DgStatus::Ok as i32
    })
}

/// Copy the caster's type names, newline-separated, into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_caster_type_names(buf: *mut c_char, buf_cap: usize, len_out: *mut usize) -> i32 {
    ffi_guard!({
        let names = ffi_try!(bridge::signal_type_names());
        write_str(&join_lines(&names), buf, buf_cap, len_out)
    })
}
