//! Python bindings for the dyngraph signal graph.
//!
//! The native extension is named `wrap` and is imported by the
//! `dynamic_graph` Python package. Signals and entities are passed around
//! as opaque `Handle` objects; every function unboxes its handles, calls
//! the bridge in `dyngraph-ffi` and raises on failure.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use pyo3::prelude::*;

mod entity;
mod error;
mod handle;
mod signal;
mod value;

/// The native `wrap` extension module.
#[pymodule]
fn wrap(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<handle::Handle>()?;
    m.add("error", m.py().get_type::<error::DynamicGraphError>())?;

    m.add_function(wrap_pyfunction!(signal::w_plug, m)?)?;
    m.add_function(wrap_pyfunction!(signal::enable_trace, m)?)?;

    m.add_function(wrap_pyfunction!(signal::create_signal_base, m)?)?;
    m.add_function(wrap_pyfunction!(signal::signal_base_get_name, m)?)?;
    m.add_function(wrap_pyfunction!(signal::signal_base_get_time, m)?)?;
    m.add_function(wrap_pyfunction!(signal::signal_base_get_value, m)?)?;
    m.add_function(wrap_pyfunction!(signal::signal_base_set_value, m)?)?;
    m.add_function(wrap_pyfunction!(signal::signal_base_recompute, m)?)?;
    m.add_function(wrap_pyfunction!(signal::signal_base_unplug, m)?)?;
    m.add_function(wrap_pyfunction!(signal::signal_caster_get_type_list, m)?)?;

    m.add_function(wrap_pyfunction!(entity::create_entity, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_get_name, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_get_class_name, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_get_signal, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_list_signals, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_display_signals, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_execute_command, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_list_commands, m)?)?;
    m.add_function(wrap_pyfunction!(entity::entity_get_command_docstring, m)?)?;
    m.add_function(wrap_pyfunction!(entity::factory_get_entity_class_list, m)?)?;

    Ok(())
}
