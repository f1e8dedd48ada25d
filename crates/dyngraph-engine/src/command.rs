//! Entity commands: typed, documented operations invokable by name.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use dyngraph_core::{EntityError, SignalError, SignalKey, Value, ValueType};

use crate::signal::Signal;
use crate::slot::SlotTable;

/// Body of a command. Receives the already type-checked arguments.
///
/// An `Err` is reported as [`EntityError::CommandFailed`] with the
/// message unchanged.
pub type CommandHandler =
    Arc<dyn Fn(&mut CommandContext<'_>, &[Value]) -> Result<Value, String> + Send + Sync>;

/// A named operation declared by an entity class.
#[derive(Clone)]
pub struct Command {
    params: Vec<ValueType>,
    docstring: String,
    handler: CommandHandler,
}

impl Command {
    /// A command taking `params` and running `handler`.
    pub fn new<F>(params: Vec<ValueType>, docstring: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&mut CommandContext<'_>, &[Value]) -> Result<Value, String> + Send + Sync + 'static,
    {
        Self {
            params,
            docstring: docstring.into(),
            handler: Arc::new(handler),
        }
    }

    /// A one-argument command writing its argument into the entity's
    /// signal `signal`.
    pub fn setter(signal: &str, value_type: ValueType, docstring: impl Into<String>) -> Self {
        let target = signal.to_owned();
        Self::new(vec![value_type], docstring, move |ctx, args| {
            ctx.set_signal_value(&target, args[0].clone())
                .map_err(|e| e.to_string())?;
            Ok(Value::None)
        })
    }

    /// A zero-argument command returning the current value of `signal`.
    pub fn getter(signal: &str, docstring: impl Into<String>) -> Self {
        let target = signal.to_owned();
        Self::new(Vec::new(), docstring, move |ctx, _| {
            ctx.signal_value(&target).map_err(|e| e.to_string())
        })
    }

    /// Declared parameter types.
    pub fn params(&self) -> &[ValueType] {
        &self.params
    }

    /// Documentation shown to scripting users.
    pub fn docstring(&self) -> &str {
        &self.docstring
    }

    /// Check arity and types, coercing arguments where allowed.
    pub(crate) fn check_args(&self, name: &str, args: &[Value]) -> Result<Vec<Value>, EntityError> {
        if args.len() != self.params.len() {
            return Err(EntityError::Arity {
                command: name.to_owned(),
                expected: self.params.len(),
                got: args.len(),
            });
        }
        self.params
            .iter()
            .zip(args)
            .enumerate()
            .map(|(index, (ty, arg))| {
                arg.coerce_to(*ty).ok_or_else(|| EntityError::ArgumentType {
                    command: name.to_owned(),
                    index,
                    expected: *ty,
                    found: arg.type_name(),
                })
            })
            .collect()
    }

    pub(crate) fn invoke(
        &self,
        name: &str,
        ctx: &mut CommandContext<'_>,
        args: &[Value],
    ) -> Result<Value, EntityError> {
        (self.handler)(ctx, args).map_err(|reason| EntityError::CommandFailed {
            command: name.to_owned(),
            reason,
        })
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("params", &self.params)
            .field("docstring", &self.docstring)
            .finish_non_exhaustive()
    }
}

/// What a running command can see: the signals of its own entity.
pub struct CommandContext<'a> {
    entity: &'a str,
    signals: &'a IndexMap<String, SignalKey>,
    table: &'a mut SlotTable<Signal>,
}

impl<'a> CommandContext<'a> {
    pub(crate) fn new(
        entity: &'a str,
        signals: &'a IndexMap<String, SignalKey>,
        table: &'a mut SlotTable<Signal>,
    ) -> Self {
        Self {
            entity,
            signals,
            table,
        }
    }

    /// Name of the entity the command runs on.
    pub fn entity_name(&self) -> &str {
        self.entity
    }

    fn key(&self, name: &str) -> Result<SignalKey, EntityError> {
        self.signals
            .get(name)
            .copied()
            .ok_or_else(|| EntityError::UnknownSignal {
                entity: self.entity.to_owned(),
                signal: name.to_owned(),
            })
    }

    /// Current value of the entity's signal `name`.
    pub fn signal_value(&self, name: &str) -> Result<Value, EntityError> {
        let key = self.key(name)?;
        self.table
            .get(key.slot(), key.generation())
            .map(|s| s.value().clone())
            .ok_or(EntityError::Signal(SignalError::Stale { key }))
    }

    /// Overwrite the value of the entity's signal `name`.
    pub fn set_signal_value(&mut self, name: &str, value: Value) -> Result<(), EntityError> {
        let key = self.key(name)?;
        let signal = self
            .table
            .get_mut(key.slot(), key.generation())
            .ok_or(SignalError::Stale { key })?;
        signal.assign(value)?;
        Ok(())
    }
}
