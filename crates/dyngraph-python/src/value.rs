//! Conversion between Python objects and command [`Value`]s.

use pyo3::exceptions::PyTypeError;
use pyo3::prelude::*;
use pyo3::types::{PyBool, PyFloat, PyInt, PyList, PyString, PyTuple};
use pyo3::IntoPyObjectExt;

use dyngraph_core::Value;

fn is_sequence(obj: &Bound<'_, PyAny>) -> bool {
    obj.is_instance_of::<PyTuple>() || obj.is_instance_of::<PyList>()
}

fn floats(obj: &Bound<'_, PyAny>) -> PyResult<Vec<f64>> {
    obj.try_iter()?
        .map(|item| item?.extract::<f64>())
        .collect()
}

/// Convert a command argument.
///
/// `bool`, `int`, `float` and `str` map to the matching scalar; a flat
/// sequence of numbers is a vector, a sequence of equally long number
/// sequences is a matrix.
pub(crate) fn from_py(obj: &Bound<'_, PyAny>) -> PyResult<Value> {
    if obj.is_none() {
        return Ok(Value::None);
    }
    if obj.is_instance_of::<PyBool>() {
        return Ok(Value::Bool(obj.extract()?));
    }
    if obj.is_instance_of::<PyInt>() {
        return match obj.extract::<i64>() {
            Ok(i) => Ok(Value::Int(i)),
            Err(_) => Ok(Value::Unsigned(obj.extract()?)),
        };
    }
    if obj.is_instance_of::<PyFloat>() {
        return Ok(Value::Double(obj.extract()?));
    }
    if obj.is_instance_of::<PyString>() {
        return Ok(Value::String(obj.extract()?));
    }
    if is_sequence(obj) {
        let rows: Vec<Bound<'_, PyAny>> = obj.try_iter()?.collect::<PyResult<_>>()?;
        if rows.first().is_some_and(is_sequence) {
            let mut data = Vec::new();
            let mut cols = None;
            for row in &rows {
                let row = floats(row)?;
                if *cols.get_or_insert(row.len()) != row.len() {
                    return Err(PyTypeError::new_err("matrix rows differ in length"));
                }
                data.extend(row);
            }
            return Ok(Value::Matrix {
                rows: rows.len(),
                cols: cols.unwrap_or(0),
                data,
            });
        }
        return Ok(Value::Vector(floats(obj)?));
    }
    let found = obj.get_type().name()?;
    Err(PyTypeError::new_err(format!(
        "cannot pass a {found} to an entity command"
    )))
}

/// Convert a command result. Vectors and matrices become tuples.
pub(crate) fn to_py<'py>(py: Python<'py>, value: &Value) -> PyResult<Bound<'py, PyAny>> {
    match value {
        Value::None => Ok(py.None().into_bound(py)),
        Value::Bool(b) => (*b).into_bound_py_any(py),
        Value::Int(i) => (*i).into_bound_py_any(py),
        Value::Unsigned(u) => (*u).into_bound_py_any(py),
        Value::Double(d) => (*d).into_bound_py_any(py),
        Value::String(s) => s.as_str().into_bound_py_any(py),
        Value::Vector(v) => PyTuple::new(py, v.iter().copied())?.into_bound_py_any(py),
        Value::Matrix { rows, cols, data } => {
            let rows = if *cols == 0 {
                (0..*rows)
                    .map(|_| PyTuple::empty(py))
                    .collect::<Vec<_>>()
            } else {
                data.chunks(*cols)
                    .take(*rows)
                    .map(|row| PyTuple::new(py, row.iter().copied()))
                    .collect::<PyResult<Vec<_>>>()?
            };
            PyTuple::new(py, rows)?.into_bound_py_any(py)
        }
    }
}
