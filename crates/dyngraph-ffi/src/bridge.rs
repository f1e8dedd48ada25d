//! Safe bridge API over the process-wide graph.
//!
//! Every function here follows the same envelope: lock the graph, unbox
//! the handle arguments with their expected kind, run the native
//! operation, and translate its failure into a [`BridgeError`]. The C ABI
//! and the Python module are thin layers over these functions.

use std::sync::{LazyLock, Mutex};

use dyngraph_core::{Time, Value, ValueType};
use dyngraph_engine::{Graph, GraphConfig};

use crate::error::{BridgeError, ErrorKind};
use crate::handle::{unbox_entity, unbox_signal, DgHandle};

static GRAPH: LazyLock<Mutex<Graph>> = LazyLock::new(|| Mutex::new(build_graph()));

fn build_graph() -> Graph {
    match GraphConfig::from_env().and_then(Graph::new) {
        Ok(graph) => graph,
        Err(e) => {
            tracing::warn!(error = %e, "invalid dyngraph environment, using defaults");
            Graph::default()
        }
    }
}

/// Run `f` with exclusive access to the process-wide graph.
///
/// Embedders use this to register their own entity classes. Fails with
/// [`ErrorKind::Internal`] if an earlier call panicked while holding the
/// graph.
///
/// The lock is not reentrant: `f`, and any entity constructor or command
/// handler it runs, must not call back into this module, or the calling
/// thread deadlocks.
pub fn with_graph<T>(f: impl FnOnce(&mut Graph) -> Result<T, BridgeError>) -> Result<T, BridgeError> {
    let mut graph = GRAPH.lock().map_err(|_| {
        BridgeError::new(
            ErrorKind::Internal,
            "graph lock poisoned by an earlier panic",
        )
    })?;
    f(&mut graph)
}

// ── plug and trace ─────────────────────────────────────────────────

/// Make `consumer` pull its value from `producer` on recompute.
pub fn plug(producer: DgHandle, consumer: DgHandle) -> Result<(), BridgeError> {
    with_graph(|g| {
        let producer = unbox_signal(g, producer)?;
        let consumer = unbox_signal(g, consumer)?;
        g.plug(producer, consumer)?;
        Ok(())
    })
}

/// Open (`enable`) or close the trace sink `filename`.
pub fn enable_trace(enable: bool, filename: &str) -> Result<(), BridgeError> {
    with_graph(|g| {
        if enable {
            g.open_trace(filename)?;
        } else {
            g.close_trace(filename)?;
        }
        Ok(())
    })
}

// ── signals ────────────────────────────────────────────────────────

/// Create a free signal of the caster type `type_name`.
pub fn create_signal(name: &str, type_name: &str) -> Result<DgHandle, BridgeError> {
    with_graph(|g| {
        let value_type = g.caster().lookup(type_name)?;
        Ok(DgHandle::signal(g.create_signal(name, value_type)))
    })
}

/// Destroy a free signal.
pub fn destroy_signal(signal: DgHandle) -> Result<(), BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        g.destroy_signal(key)?;
        Ok(())
    })
}

/// Full name of a signal.
pub fn signal_name(signal: DgHandle) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        Ok(g.signal(key)?.name().to_owned())
    })
}

/// Declared value type of a signal.
pub fn signal_type(signal: DgHandle) -> Result<ValueType, BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        Ok(g.signal(key)?.value_type())
    })
}

/// Time of the signal's last recompute.
pub fn signal_time(signal: DgHandle) -> Result<Time, BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        Ok(g.signal_time(key)?)
    })
}

/// Current value in caster text form.
pub fn signal_value(signal: DgHandle) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        Ok(g.signal_text(key)?)
    })
}

/// Parse `text` with the caster and store it as the current value.
pub fn set_signal_value(signal: DgHandle, text: &str) -> Result<(), BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        g.set_signal_text(key, text)?;
        Ok(())
    })
}

/// Recompute at `time` and return the new value in caster text form.
pub fn recompute(signal: DgHandle, time: Time) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        let value = g.recompute(key, time)?;
        Ok(g.caster().display(&value))
    })
}

/// Remove the upstream link of a signal.
pub fn unplug(signal: DgHandle) -> Result<(), BridgeError> {
    with_graph(|g| {
        let key = unbox_signal(g, signal)?;
        g.unplug(key)?;
        Ok(())
    })
}

// ── entities ───────────────────────────────────────────────────────

/// Instantiate `class` under the unique name `name`.
pub fn create_entity(class: &str, name: &str) -> Result<DgHandle, BridgeError> {
    with_graph(|g| Ok(DgHandle::entity(g.create_entity(class, name)?)))
}

/// Destroy an entity and its signals.
pub fn destroy_entity(entity: DgHandle) -> Result<(), BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        g.destroy_entity(key)?;
        Ok(())
    })
}

/// Instance name of an entity.
pub fn entity_name(entity: DgHandle) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        Ok(g.entity(key)?.name().to_owned())
    })
}

/// Class name of an entity.
pub fn entity_class_name(entity: DgHandle) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        Ok(g.entity(key)?.class_name().to_owned())
    })
}

/// Handle of the entity's signal `name`.
pub fn entity_signal(entity: DgHandle, name: &str) -> Result<DgHandle, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        Ok(DgHandle::signal(g.entity_signal(key, name)?))
    })
}

/// Short names of the entity's signals.
pub fn entity_signal_names(entity: DgHandle) -> Result<Vec<String>, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        Ok(g.entity_signal_names(key)?)
    })
}

/// Full names of the entity's signals, one per line, the way a
/// `displaySignals` listing shows them.
pub fn entity_display_signals(entity: DgHandle) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        let mut lines = Vec::new();
        for short in g.entity_signal_names(key)? {
            let signal = g.signal(g.entity_signal(key, &short)?)?;
            let marker = match signal.upstream() {
                Some(up) => format!(" <- {}", g.signal(up)?.name()),
                None => String::new(),
            };
            lines.push(format!("{}{marker}", signal.name()));
        }
        Ok(lines.join("\n"))
    })
}

/// Run a command with typed arguments.
pub fn execute_command(
    entity: DgHandle,
    command: &str,
    args: &[Value],
) -> Result<Value, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        Ok(g.execute_command(key, command, args)?)
    })
}

/// Run a command with arguments in caster text form.
///
/// Each argument is parsed according to the command's declared parameter
/// type; surplus arguments are passed as strings so the arity check
/// reports them. The result comes back in caster text form (empty for
/// commands that return nothing).
pub fn execute_command_text(
    entity: DgHandle,
    command: &str,
    args: &[&str],
) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        let params: Vec<ValueType> = g
            .entity(key)?
            .command(command)
            .map(|c| c.params().to_vec())
            .unwrap_or_default();
        let values = args
            .iter()
            .enumerate()
            .map(|(i, text)| match params.get(i) {
                Some(ty) => g.caster().parse(*ty, text).map_err(BridgeError::from),
                None => Ok(Value::String((*text).to_owned())),
            })
            .collect::<Result<Vec<_>, _>>()?;
        let result = g.execute_command(key, command, &values)?;
        Ok(g.caster().display(&result))
    })
}

/// Names of the entity's commands.
pub fn command_names(entity: DgHandle) -> Result<Vec<String>, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        Ok(g.command_names(key)?)
    })
}

/// Docstring of the entity's command `command`.
pub fn command_docstring(entity: DgHandle, command: &str) -> Result<String, BridgeError> {
    with_graph(|g| {
        let key = unbox_entity(g, entity)?;
        Ok(g.command_docstring(key, command)?)
    })
}

// ── registries ─────────────────────────────────────────────────────

/// Registered entity class names.
pub fn entity_class_names() -> Result<Vec<String>, BridgeError> {
    with_graph(|g| Ok(g.factory().class_names()))
}

/// Signal type names known to the caster.
pub fn signal_type_names() -> Result<Vec<String>, BridgeError> {
    with_graph(|g| Ok(g.caster().type_names()))
}
