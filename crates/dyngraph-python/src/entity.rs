//! Entity and factory functions of the `wrap` module.

use pyo3::prelude::*;
use pyo3::types::PyTuple;

use dyngraph_ffi::bridge;
use dyngraph_ffi::HandleKind;

use crate::error::to_py_err;
use crate::handle::{unbox, Handle};
use crate::value::{from_py, to_py};

/// Instantiate the entity class `class_name` as `instance_name`.
#[pyfunction]
pub(crate) fn create_entity(py: Python<'_>, class_name: &str, instance_name: &str) -> PyResult<Handle> {
    py.detach(|| bridge::create_entity(class_name, instance_name))
        .map(Handle::from)
        .map_err(to_py_err)
}

#[pyfunction]
pub(crate) fn entity_get_name(entity: &Bound<'_, PyAny>) -> PyResult<String> {
    let h = unbox(entity, HandleKind::Entity)?;
    entity.py().detach(|| bridge::entity_name(h)).map_err(to_py_err)
}

#[pyfunction]
pub(crate) fn entity_get_class_name(entity: &Bound<'_, PyAny>) -> PyResult<String> {
    let h = unbox(entity, HandleKind::Entity)?;
    entity
        .py()
        .detach(|| bridge::entity_class_name(h))
        .map_err(to_py_err)
}

/// Handle of the entity's signal `name`.
#[pyfunction]
pub(crate) fn entity_get_signal(entity: &Bound<'_, PyAny>, name: &str) -> PyResult<Handle> {
    let h = unbox(entity, HandleKind::Entity)?;
    entity
        .py()
        .detach(|| bridge::entity_signal(h, name))
        .map(Handle::from)
        .map_err(to_py_err)
}

#[pyfunction]
pub(crate) fn entity_list_signals(entity: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    let h = unbox(entity, HandleKind::Entity)?;
    entity
        .py()
        .detach(|| bridge::entity_signal_names(h))
        .map_err(to_py_err)
}

/// Full signal names, one per line, with their upstream signal if plugged.
#[pyfunction]
pub(crate) fn entity_display_signals(entity: &Bound<'_, PyAny>) -> PyResult<String> {
    let h = unbox(entity, HandleKind::Entity)?;
    entity
        .py()
        .detach(|| bridge::entity_display_signals(h))
        .map_err(to_py_err)
}

/// Run the command `name` with the arguments in `args`.
#[pyfunction]
pub(crate) fn entity_execute_command<'py>(
    entity: &Bound<'py, PyAny>,
    name: &str,
    args: &Bound<'py, PyTuple>,
) -> PyResult<Bound<'py, PyAny>> {
    let h = unbox(entity, HandleKind::Entity)?;
    let values = args
        .iter()
        .map(|arg| from_py(&arg))
        .collect::<PyResult<Vec<_>>>()?;
    let py = entity.py();
    let result = py
        .detach(|| bridge::execute_command(h, name, &values))
        .map_err(to_py_err)?;
    to_py(py, &result)
}

#[pyfunction]
pub(crate) fn entity_list_commands(entity: &Bound<'_, PyAny>) -> PyResult<Vec<String>> {
    let h = unbox(entity, HandleKind::Entity)?;
    entity
        .py()
        .detach(|| bridge::command_names(h))
        .map_err(to_py_err)
}

#[pyfunction]
pub(crate) fn entity_get_command_docstring(entity: &Bound<'_, PyAny>, name: &str) -> PyResult<String> {
    let h = unbox(entity, HandleKind::Entity)?;
    entity
        .py()
        .detach(|| bridge::command_docstring(h, name))
        .map_err(to_py_err)
}

/// Names of the registered entity classes.
#[pyfunction]
pub(crate) fn factory_get_entity_class_list(py: Python<'_>) -> PyResult<Vec<String>> {
    py.detach(bridge::entity_class_names).map_err(to_py_err)
}
