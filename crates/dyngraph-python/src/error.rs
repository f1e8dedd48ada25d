//! BridgeError -> Python exception mapping.
//!
//! Caller errors (malformed arguments, bad handles) raise `TypeError`,
//! trace failures raise `IOError`, and every other native failure raises
//! the module's own `error` type, registered as `dynamic_graph.error`.

use pyo3::exceptions::{PyException, PyIOError, PyTypeError};
use pyo3::PyErr;

use dyngraph_ffi::{BridgeError, ErrorKind};

mod category {
    #![allow(non_camel_case_types)]

    pyo3::create_exception!(
        dynamic_graph,
        error,
        super::PyException,
        "Raised when a native graph operation fails."
    );
}

pub(crate) use category::error as DynamicGraphError;

/// Python exception family a bridge failure is raised as.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Category {
    Type,
    Runtime,
    Io,
}

pub(crate) fn category(kind: ErrorKind) -> Category {
    if kind.is_caller_error() {
        return Category::Type;
    }
    match kind {
        ErrorKind::Io => Category::Io,
        _ => Category::Runtime,
    }
}

/// Raise a bridge failure with its native message unchanged.
pub(crate) fn to_py_err(e: BridgeError) -> PyErr {
    let message = e.message().to_owned();
    match category(e.kind()) {
        Category::Type => PyTypeError::new_err(message),
        Category::Runtime => DynamicGraphError::new_err(message),
        Category::Io => PyIOError::new_err(message),
    }
}
