//! Entities and the builder entity constructors declare them through.

use std::collections::HashSet;
use std::sync::Arc;

use indexmap::IndexMap;

use dyngraph_core::{EntityError, SignalError, SignalKey, Time, Value, ValueType};

use crate::command::Command;
use crate::signal::ComputeFn;

/// A named node of the graph owning signals and commands.
#[derive(Debug)]
pub struct Entity {
    name: String,
    class_name: String,
    pub(crate) signals: IndexMap<String, SignalKey>,
    pub(crate) commands: IndexMap<String, Command>,
}

impl Entity {
    pub(crate) fn new(name: String, class_name: String) -> Self {
        Self {
            name,
            class_name,
            signals: IndexMap::new(),
            commands: IndexMap::new(),
        }
    }

    /// Instance name, unique across the graph.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the factory class the entity was created from.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Key of the signal with short name `name`.
    pub fn signal(&self, name: &str) -> Option<SignalKey> {
        self.signals.get(name).copied()
    }

    /// Short names of the entity's signals, in declaration order.
    pub fn signal_names(&self) -> Vec<String> {
        self.signals.keys().cloned().collect()
    }

    /// Command declared under `name`.
    pub fn command(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Command names, in declaration order.
    pub fn command_names(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }
}

pub(crate) enum SignalDecl {
    Input {
        name: String,
        value_type: ValueType,
        initial: Option<Value>,
    },
    Output {
        name: String,
        value_type: ValueType,
        deps: Vec<String>,
        compute: ComputeFn,
    },
}

impl SignalDecl {
    pub(crate) fn name(&self) -> &str {
        match self {
            Self::Input { name, .. } | Self::Output { name, .. } => name,
        }
    }
}

/// Collects the signals and commands of an entity under construction.
///
/// Entity class constructors receive one of these from the
/// [`Factory`](crate::factory::Factory). Declarations are validated when
/// the graph materialises the entity.
pub struct EntityBuilder {
    class_name: String,
    name: String,
    pub(crate) signals: Vec<SignalDecl>,
    pub(crate) commands: Vec<(String, Command)>,
}

impl EntityBuilder {
    pub(crate) fn new(class_name: &str, name: &str) -> Self {
        Self {
            class_name: class_name.to_owned(),
            name: name.to_owned(),
            signals: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Instance name of the entity being built.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class name of the entity being built.
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Declare an input signal.
    pub fn input(&mut self, name: &str, value_type: ValueType) -> &mut Self {
        self.signals.push(SignalDecl::Input {
            name: name.to_owned(),
            value_type,
            initial: None,
        });
        self
    }

    /// Declare an input signal starting at `initial` instead of the zero
    /// value of its type.
    pub fn input_with_default(
        &mut self,
        name: &str,
        value_type: ValueType,
        initial: Value,
    ) -> &mut Self {
        self.signals.push(SignalDecl::Input {
            name: name.to_owned(),
            value_type,
            initial: Some(initial),
        });
        self
    }

    /// Declare an output computed from other signals of this entity.
    pub fn output<F>(
        &mut self,
        name: &str,
        value_type: ValueType,
        deps: &[&str],
        f: F,
    ) -> &mut Self
    where
        F: Fn(&[Value], Time) -> Result<Value, String> + Send + Sync + 'static,
    {
        self.signals.push(SignalDecl::Output {
            name: name.to_owned(),
            value_type,
            deps: deps.iter().map(|d| (*d).to_owned()).collect(),
            compute: Arc::new(f),
        });
        self
    }

    /// Declare a command.
    pub fn command(&mut self, name: &str, command: Command) -> &mut Self {
        self.commands.push((name.to_owned(), command));
        self
    }

    /// Reject duplicate names and dependencies on undeclared signals.
    pub(crate) fn validate(&self) -> Result<(), EntityError> {
        let mut seen = HashSet::new();
        for decl in &self.signals {
            if !seen.insert(decl.name()) {
                return Err(EntityError::DuplicateSignal {
                    entity: self.name.clone(),
                    signal: decl.name().to_owned(),
                });
            }
        }
        for decl in &self.signals {
            if let SignalDecl::Input {
                name,
                value_type,
                initial: Some(initial),
            } = decl
            {
                if initial.value_type() != Some(*value_type) {
                    return Err(EntityError::Signal(SignalError::TypeMismatch {
                        signal: name.clone(),
                        expected: *value_type,
                        found: initial.type_name(),
                    }));
                }
            }
            if let SignalDecl::Output { name, deps, .. } = decl {
                if let Some(missing) = deps.iter().find(|d| !seen.contains(d.as_str())) {
                    return Err(EntityError::UnknownDependency {
                        entity: self.name.clone(),
                        signal: name.clone(),
                        dependency: missing.clone(),
                    });
                }
            }
        }
        let mut commands = HashSet::new();
        for (name, _) in &self.commands {
            if !commands.insert(name.as_str()) {
                return Err(EntityError::DuplicateCommand {
                    entity: self.name.clone(),
                    command: name.clone(),
                });
            }
        }
        Ok(())
    }
}
