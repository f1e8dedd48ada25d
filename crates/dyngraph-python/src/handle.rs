//! Python-side box for [`DgHandle`].

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;

use dyngraph_ffi::{DgHandle, HandleKind};

/// Opaque reference to a native signal or entity.
///
/// Only the functions of this module create handles. A handle does not
/// keep its object alive; using it after the object is gone raises
/// `TypeError`.
#[pyclass(frozen, eq, hash, module = "dynamic_graph.wrap")]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct Handle {
    inner: DgHandle,
}

#[pymethods]
impl Handle {
    /// `"signal"` or `"entity"`.
    #[getter]
    fn kind(&self) -> &'static str {
        self.inner.kind().map(HandleKind::name).unwrap_or("invalid")
    }

    fn __repr__(&self) -> String {
        format!("<dyngraph handle {}>", self.inner)
    }
}

impl From<DgHandle> for Handle {
    fn from(inner: DgHandle) -> Self {
        Self { inner }
    }
}

/// Check that `obj` is a handle of kind `expected` and take its value.
///
/// Liveness is checked later, by the bridge, under the graph lock.
pub(crate) fn unbox(obj: &Bound<'_, PyAny>, expected: HandleKind) -> PyResult<DgHandle> {
    let handle = obj.cast::<Handle>().map_err(|_| {
        let found = obj
            .get_type()
            .name()
            .map(|n| n.to_string())
            .unwrap_or_else(|_| "object".to_owned());
        PyTypeError::new_err(format!(
            "expected {} handle, got {found}",
            expected.name()
        ))
    })?;
    let inner = handle.get().inner;
    match inner.kind() {
        Some(kind) if kind == expected => Ok(inner),
        Some(kind) => Err(PyTypeError::new_err(format!(
            "expected {} handle, got {} handle",
            expected.name(),
            kind.name()
        ))),
        None => Err(PyTypeError::new_err("not a dyngraph handle")),
    }
}
