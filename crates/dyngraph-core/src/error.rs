//! Error types for the native signal graph, organised by subsystem:
//! signals (values, plugging, recompute), entities (factory, commands),
//! value casting, and trace sinks.
//!
//! The `Display` text of these errors is what scripting callers see
//! verbatim, so messages name the objects involved.

use thiserror::Error;

use crate::id::{EntityKey, SignalKey};
use crate::value::ValueType;

/// Errors from text <-> value conversion in the signal caster.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CastError {
    /// No value type is registered under this name.
    #[error("unknown signal type '{name}'")]
    UnknownType {
        /// The requested type name.
        name: String,
    },
    /// The text could not be parsed as a value of the given type.
    #[error("cannot read '{input}' as {ty}: {reason}")]
    Parse {
        /// Target type.
        ty: ValueType,
        /// The offending input text.
        input: String,
        /// What went wrong.
        reason: String,
    },
}

/// Errors from signal access, plugging and recomputation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SignalError {
    /// The key refers to a signal that has been destroyed.
    #[error("{key} refers to a destroyed signal")]
    Stale {
        /// The stale key.
        key: SignalKey,
    },
    /// A value of the wrong type was written to a signal.
    #[error("signal '{signal}' holds {expected} values, got {found}")]
    TypeMismatch {
        /// Full signal name.
        signal: String,
        /// The signal's declared type.
        expected: ValueType,
        /// Type name of the rejected value.
        found: &'static str,
    },
    /// Producer and consumer carry different value types.
    #[error("cannot plug '{producer}' ({producer_type}) into '{consumer}' ({consumer_type})")]
    IncompatiblePlug {
        /// Producer full name.
        producer: String,
        /// Producer value type.
        producer_type: ValueType,
        /// Consumer full name.
        consumer: String,
        /// Consumer value type.
        consumer_type: ValueType,
    },
    /// Outputs are computed by their entity and cannot take an upstream.
    #[error("signal '{consumer}' is an output and cannot be plugged")]
    PlugIntoOutput {
        /// Consumer full name.
        consumer: String,
    },
    /// A signal cannot be its own producer.
    #[error("signal '{signal}' cannot be plugged into itself")]
    PlugIntoSelf {
        /// Full signal name.
        signal: String,
    },
    /// The connection would close a dependency cycle.
    #[error("plugging '{producer}' into '{consumer}' would create a cycle")]
    Cycle {
        /// Producer full name.
        producer: String,
        /// Consumer full name.
        consumer: String,
    },
    /// `unplug` on a signal without an upstream.
    #[error("signal '{signal}' is not plugged")]
    NotPlugged {
        /// Full signal name.
        signal: String,
    },
    /// The upstream chain is deeper than the configured limit.
    #[error("recomputing '{signal}' exceeded the maximum depth of {limit}")]
    DepthExceeded {
        /// Signal at which the limit was hit.
        signal: String,
        /// Configured limit.
        limit: usize,
    },
    /// An output's compute function failed.
    #[error("computing '{signal}' failed: {reason}")]
    ComputeFailed {
        /// Full signal name.
        signal: String,
        /// Failure reported by the compute function.
        reason: String,
    },
    /// Entity-owned signals are destroyed with their entity only.
    #[error("signal '{signal}' is owned by an entity")]
    OwnedByEntity {
        /// Full signal name.
        signal: String,
    },
    /// Value text could not be cast.
    #[error(transparent)]
    Cast(#[from] CastError),
}

/// Errors from entity creation, lookup and command execution.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EntityError {
    /// The key refers to an entity that has been destroyed.
    #[error("{key} refers to a destroyed entity")]
    Stale {
        /// The stale key.
        key: EntityKey,
    },
    /// No class with this name is registered in the factory.
    #[error("no entity class named '{class}' is registered")]
    UnknownClass {
        /// Requested class name.
        class: String,
    },
    /// A class with this name is already registered.
    #[error("entity class '{class}' is already registered")]
    DuplicateClass {
        /// Class name.
        class: String,
    },
    /// Entity names are unique across the graph.
    #[error("an entity named '{name}' already exists")]
    DuplicateName {
        /// Instance name.
        name: String,
    },
    /// A constructor declared two signals with the same name.
    #[error("entity '{entity}' declares signal '{signal}' twice")]
    DuplicateSignal {
        /// Entity name.
        entity: String,
        /// Signal short name.
        signal: String,
    },
    /// A constructor declared two commands with the same name.
    #[error("entity '{entity}' declares command '{command}' twice")]
    DuplicateCommand {
        /// Entity name.
        entity: String,
        /// Command name.
        command: String,
    },
    /// An output depends on a signal its entity does not declare.
    #[error("output '{signal}' of entity '{entity}' depends on unknown signal '{dependency}'")]
    UnknownDependency {
        /// Entity name.
        entity: String,
        /// Output short name.
        signal: String,
        /// Missing dependency.
        dependency: String,
    },
    /// The entity has no signal with this name.
    #[error("entity '{entity}' has no signal '{signal}'")]
    UnknownSignal {
        /// Entity name.
        entity: String,
        /// Requested signal short name.
        signal: String,
    },
    /// The entity has no command with this name.
    #[error("entity '{entity}' has no command '{command}'")]
    UnknownCommand {
        /// Entity name.
        entity: String,
        /// Requested command name.
        command: String,
    },
    /// Wrong number of command arguments.
    #[error("command '{command}' takes {expected} argument(s), got {got}")]
    Arity {
        /// Command name.
        command: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied argument count.
        got: usize,
    },
    /// A command argument has the wrong type.
    #[error("argument {index} of command '{command}' must be {expected}, got {found}")]
    ArgumentType {
        /// Command name.
        command: String,
        /// Zero-based argument index.
        index: usize,
        /// Declared parameter type.
        expected: ValueType,
        /// Type name of the supplied argument.
        found: &'static str,
    },
    /// The command handler reported a failure.
    #[error("command '{command}' failed: {reason}")]
    CommandFailed {
        /// Command name.
        command: String,
        /// Handler's message.
        reason: String,
    },
    /// A signal operation issued on behalf of the entity failed.
    #[error(transparent)]
    Signal(#[from] SignalError),
    /// A value passed as text could not be cast.
    #[error(transparent)]
    Cast(#[from] CastError),
}

/// Errors from the process-wide trace sink registry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TraceError {
    /// A sink is already open under this filename.
    #[error("trace file '{filename}' is already open")]
    AlreadyOpen {
        /// Sink filename.
        filename: String,
    },
    /// No sink is open under this filename.
    #[error("trace file '{filename}' is not open")]
    NotOpen {
        /// Sink filename.
        filename: String,
    },
    /// The operating system refused the file operation.
    #[error("trace file '{filename}': {reason}")]
    Io {
        /// Sink filename.
        filename: String,
        /// OS error text.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cast_error_converts_into_signal_and_entity_errors() {
        let cast = CastError::UnknownType {
            name: "quaternion".into(),
        };
        let sig: SignalError = cast.clone().into();
        assert_eq!(sig.to_string(), "unknown signal type 'quaternion'");
        let ent: EntityError = cast.into();
        assert_eq!(ent.to_string(), "unknown signal type 'quaternion'");
    }

    #[test]
    fn plug_messages_name_both_ends() {
        let e = SignalError::IncompatiblePlug {
            producer: "p".into(),
            producer_type: ValueType::Double,
            consumer: "c".into(),
            consumer_type: ValueType::Int,
        };
        assert_eq!(e.to_string(), "cannot plug 'p' (double) into 'c' (int)");
    }

    #[test]
    fn stale_keys_are_named() {
        let e = SignalError::Stale {
            key: SignalKey::new(2, 1),
        };
        assert_eq!(e.to_string(), "signal#2v1 refers to a destroyed signal");
    }

    #[test]
    fn trace_errors_mention_the_filename() {
        let e = TraceError::NotOpen {
            filename: "neverOpened".into(),
        };
        assert!(e.to_string().contains("neverOpened"));
    }
}
