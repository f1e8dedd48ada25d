//! Signal functions of the `wrap` module, plus `w_plug` and `enableTrace`.
//!
//! Native calls run inside `py.detach()` so the GIL is not held while the
//! graph lock is.

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::PyBool;

use dyngraph_ffi::bridge;
use dyngraph_ffi::trace::ENABLE_TRACE_USAGE;
use dyngraph_ffi::HandleKind;

use crate::error::to_py_err;
use crate::handle::{unbox, Handle};

/// Plug `producer` into `consumer`: recomputing the consumer pulls the
/// producer's value.
#[pyfunction]
pub(crate) fn w_plug(producer: &Bound<'_, PyAny>, consumer: &Bound<'_, PyAny>) -> PyResult<()> {
    let producer_h = unbox(producer, HandleKind::Signal)?;
    let consumer_h = unbox(consumer, HandleKind::Signal)?;
    producer
        .py()
        .detach(|| bridge::plug(producer_h, consumer_h))
        .map_err(to_py_err)
}

/// Open (`True`) or close (`False`) the trace file `filename`.
#[pyfunction]
#[pyo3(name = "enableTrace")]
pub(crate) fn enable_trace(flag: &Bound<'_, PyAny>, filename: &Bound<'_, PyAny>) -> PyResult<()> {
    if !flag.is_instance_of::<PyBool>() {
        return Err(PyTypeError::new_err(ENABLE_TRACE_USAGE));
    }
    let enable = flag.is_truthy()?;
    let filename: String = filename
        .extract()
        .map_err(|_| PyTypeError::new_err(ENABLE_TRACE_USAGE))?;
    flag.py()
        .detach(|| bridge::enable_trace(enable, &filename))
        .map_err(to_py_err)
}

/// Create a free signal holding the zero value of `type_name`.
#[pyfunction]
#[pyo3(signature = (name, type_name = "int"))]
pub(crate) fn create_signal_base(py: Python<'_>, name: &str, type_name: &str) -> PyResult<Handle> {
    py.detach(|| bridge::create_signal(name, type_name))
        .map(Handle::from)
        .map_err(to_py_err)
}

#[pyfunction]
pub(crate) fn signal_base_get_name(signal: &Bound<'_, PyAny>) -> PyResult<String> {
    let h = unbox(signal, HandleKind::Signal)?;
    signal.py().detach(|| bridge::signal_name(h)).map_err(to_py_err)
}

#[pyfunction]
pub(crate) fn signal_base_get_time(signal: &Bound<'_, PyAny>) -> PyResult<i64> {
    let h = unbox(signal, HandleKind::Signal)?;
    signal.py().detach(|| bridge::signal_time(h)).map_err(to_py_err)
}

/// Current value in caster text form.
#[pyfunction]
pub(crate) fn signal_base_get_value(signal: &Bound<'_, PyAny>) -> PyResult<String> {
    let h = unbox(signal, HandleKind::Signal)?;
    signal.py().detach(|| bridge::signal_value(h)).map_err(to_py_err)
}

/// Store `value`, given in caster text form.
#[pyfunction]
pub(crate) fn signal_base_set_value(signal: &Bound<'_, PyAny>, value: &str) -> PyResult<()> {
    let h = unbox(signal, HandleKind::Signal)?;
    signal
        .py()
        .detach(|| bridge::set_signal_value(h, value))
        .map_err(to_py_err)
}

/// Recompute at `time`; returns the new value in caster text form.
#[pyfunction]
pub(crate) fn signal_base_recompute(signal: &Bound<'_, PyAny>, time: i64) -> PyResult<String> {
    let h = unbox(signal, HandleKind::Signal)?;
    signal
        .py()
        .detach(|| bridge::recompute(h, time))
        .map_err(to_py_err)
}

#[pyfunction]
pub(crate) fn signal_base_unplug(signal: &Bound<'_, PyAny>) -> PyResult<()> {
    let h = unbox(signal, HandleKind::Signal)?;
    signal.py().detach(|| bridge::unplug(h)).map_err(to_py_err)
}

/// Type names accepted by `create_signal_base`.
#[pyfunction]
pub(crate) fn signal_caster_get_type_list(py: Python<'_>) -> PyResult<Vec<String>> {
    py.detach(bridge::signal_type_names).map_err(to_py_err)
}
