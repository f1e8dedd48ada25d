//! Entity FFI: create, destroy, introspection, command execution.

use std::ffi::c_char;

use crate::bridge;
use crate::buffer::{join_lines, require_out, str_arg, write_str};
use crate::handle::DgHandle;
use crate::status::DgStatus;

/// Instantiate `class` under the unique name `name`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_create(
    class: *const c_char,
    name: *const c_char,
    handle_out: *mut DgHandle,
) -> i32 {
    ffi_guard!({
        ffi_try!(require_out(handle_out, "handle_out"));
        let class = ffi_try!(str_arg(class, "class"));
        let name = ffi_try!(str_arg(name, "name"));
        let handle = ffi_try!(bridge::create_entity(class, name));
        // SAFETY: handle_out is non-null and valid per caller contract.
        unsafe { *handle_out = handle };
        DgStatus::Ok as i32
    })
}

/// Destroy an entity. Its signal handles become invalid too.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_destroy(entity: DgHandle) -> i32 {
    ffi_guard!({
        ffi_try!(bridge::destroy_entity(entity));
        DgStatus::Ok as i32
    })
}

/// Copy the entity's instance name into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_get_name(
    entity: DgHandle,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let name = ffi_try!(bridge::entity_name(entity));
        write_str(&name, buf, buf_cap, len_out)
    })
}

/// Copy the entity's class name into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_get_class_name(
    entity: DgHandle,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let class = ffi_try!(bridge::entity_class_name(entity));
        write_str(&class, buf, buf_cap, len_out)
    })
}

/// Write the handle of the entity's signal `name` to `handle_out`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_get_signal(
    entity: DgHandle,
    name: *const c_char,
    handle_out: *mut DgHandle,
) -> i32 {
    ffi_guard!({
        ffi_try!(require_out(handle_out, "handle_out"));
        let name = ffi_try!(str_arg(name, "name"));
        let handle = ffi_try!(bridge::entity_signal(entity, name));
        // SAFETY: handle_out is non-null and valid per caller contract.
        unsafe { *handle_out = handle };
        DgStatus::Ok as i32
    })
}

/// Copy the entity's signal names, newline-separated, into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_list_signals(
    entity: DgHandle,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let names = ffi_try!(bridge::entity_signal_names(entity));
        write_str(&join_lines(&names), buf, buf_cap, len_out)
    })
}

/// Run the entity's command `command`.
///
/// `args` holds `n_args` arguments in caster text form (may be null when
/// `n_args == 0`). The result is copied into `buf` in caster text form;
/// commands without a result produce an empty string.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_execute_command(
    entity: DgHandle,
    command: *const c_char,
    args: *const *const c_char,
    n_args: usize,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let command = ffi_try!(str_arg(command, "command"));
        let texts = if n_args == 0 {
            Vec::new()
        } else {
            ffi_try!(require_out(args as *mut *const c_char, "args"));
            // SAFETY: args is non-null and points to n_args C string pointers.
            let ptrs = unsafe { std::slice::from_raw_parts(args, n_args) };
            ffi_try!(ptrs
                .iter()
                .enumerate()
                .map(|(i, ptr)| str_arg(*ptr, &format!("args[{i}]")))
                .collect::<Result<Vec<_>, _>>())
        };
        let result = ffi_try!(bridge::execute_command_text(entity, command, &texts));
        write_str(&result, buf, buf_cap, len_out)
    })
}

/// Copy the entity's command names, newline-separated, into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_list_commands(
    entity: DgHandle,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let names = ffi_try!(bridge::command_names(entity));
        write_str(&join_lines(&names), buf, buf_cap, len_out)
    })
}

/// Copy the docstring of the entity's command `command` into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_entity_get_command_docstring(
    entity: DgHandle,
    command: *const c_char,
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let command = ffi_try!(str_arg(command, "command"));
        let doc = ffi_try!(bridge::command_docstring(entity, command));
        write_str(&doc, buf, buf_cap, len_out)
    })
}

/// Copy the registered entity class names, newline-separated, into `buf`.
#[no_mangle]
#[allow(unsafe_code)]
pub extern "C" fn dg_factory_entity_classes(
    buf: *mut c_char,
    buf_cap: usize,
    len_out: *mut usize,
) -> i32 {
    ffi_guard!({
        let names = ffi_try!(bridge::entity_class_names());
        write_str(&join_lines(&names), buf, buf_cap, len_out)
    })
}
