//! Handle-based bridge between the dyngraph signal graph and foreign
//! callers.
//!
//! [`bridge`] is the safe Rust surface used by the Python module: tagged
//! handles are unboxed with a kind and liveness check, native failures
//! come back as [`BridgeError`]. The `dg_*` functions expose the same
//! surface as a C ABI returning [`DgStatus`] codes. This is the only crate
//! in the workspace that contains `unsafe` code.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

/// Run an FFI body, turning a panic into `DgStatus::Panicked`.
macro_rules! ffi_guard {
    ($body:block) => {
        match ::std::panic::catch_unwind(::std::panic::AssertUnwindSafe(|| -> i32 { $body })) {
            Ok(code) => code,
            Err(payload) => $crate::error::record_panic(payload),
        }
    };
}

/// Unwrap a bridge result inside an FFI body, or record the error and
/// return its status.
macro_rules! ffi_try {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) => return $crate::error::fail(err),
        }
    };
}

pub mod bridge;
mod buffer;
pub mod entity;
pub mod error;
pub mod handle;
pub mod signal;
pub mod status;
pub mod trace;

pub use error::{BridgeError, ErrorKind};
pub use handle::{DgHandle, HandleKind};
pub use status::DgStatus;
