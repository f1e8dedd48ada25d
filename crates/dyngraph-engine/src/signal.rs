//! Native signals: a typed value, the time of its last update, and where
//! the next recompute takes the value from.

use std::fmt;
use std::sync::Arc;

use smallvec::SmallVec;

use dyngraph_core::{EntityKey, SignalError, SignalKey, Time, Value, ValueType};

/// Function computing an output from its dependencies' values.
///
/// Receives the dependency values in declaration order and the time being
/// computed. An `Err` is reported as [`SignalError::ComputeFailed`].
pub type ComputeFn = Arc<dyn Fn(&[Value], Time) -> Result<Value, String> + Send + Sync>;

/// Role of a signal in the graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignalKind {
    /// Created on its own, not owned by an entity. Pluggable.
    Free,
    /// Entity input. Pluggable.
    Input,
    /// Entity output, computed from other signals of its entity.
    Output,
}

impl SignalKind {
    /// Whether the signal may receive an upstream connection.
    pub fn is_pluggable(self) -> bool {
        !matches!(self, Self::Output)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Free => "free",
            Self::Input => "input",
            Self::Output => "output",
        })
    }
}

#[derive(Clone)]
pub(crate) enum Source {
    /// Holds whatever was last assigned.
    Constant,
    /// Pulls the producer's value on recompute.
    Plugged(SignalKey),
    /// Applies `compute` to the values of `deps`.
    Computed {
        deps: SmallVec<[SignalKey; 4]>,
        compute: ComputeFn,
    },
}

/// A signal owned by the graph.
pub struct Signal {
    name: String,
    kind: SignalKind,
    value_type: ValueType,
    value: Value,
    time: Time,
    pub(crate) source: Source,
    owner: Option<EntityKey>,
}

impl Signal {
    pub(crate) fn new(
        name: String,
        kind: SignalKind,
        value_type: ValueType,
        source: Source,
        owner: Option<EntityKey>,
    ) -> Self {
        Self {
            name,
            kind,
            value_type,
            value: value_type.default_value(),
            time: 0,
            source,
            owner,
        }
    }

    /// Full signal name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Free, input or output.
    pub fn kind(&self) -> SignalKind {
        self.kind
    }

    /// Declared value type.
    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    /// Current value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Time of the last recompute.
    pub fn time(&self) -> Time {
        self.time
    }

    /// Owning entity, `None` for free signals.
    pub fn owner(&self) -> Option<EntityKey> {
        self.owner
    }

    /// Producer this signal is plugged into, if any.
    pub fn upstream(&self) -> Option<SignalKey> {
        match self.source {
            Source::Plugged(p) => Some(p),
            _ => None,
        }
    }

    /// Signals read on recompute: the producer or the dependencies.
    pub(crate) fn inputs(&self) -> SmallVec<[SignalKey; 4]> {
        match &self.source {
            Source::Constant => SmallVec::new(),
            Source::Plugged(p) => smallvec::smallvec![*p],
            Source::Computed { deps, .. } => deps.clone(),
        }
    }

    /// Store `value`, checking it against the declared type.
    pub(crate) fn assign(&mut self, value: Value) -> Result<(), SignalError> {
        if value.value_type() != Some(self.value_type) {
            return Err(SignalError::TypeMismatch {
                signal: self.name.clone(),
                expected: self.value_type,
                found: value.type_name(),
            });
        }
        self.value = value;
        Ok(())
    }

    pub(crate) fn stamp(&mut self, value: Value, time: Time) -> Result<(), SignalError> {
        self.assign(value)?;
        self.time = time;
        Ok(())
    }

    pub(crate) fn set_time(&mut self, time: Time) {
        self.time = time;
    }

    pub(crate) fn set_owner(&mut self, owner: EntityKey) {
        self.owner = Some(owner);
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("value", &self.value)
            .field("time", &self.time)
            .field("upstream", &self.upstream())
            .finish()
    }
}

/// Full name of an entity-owned signal:
/// `Class(instance)::input(type)::name`.
pub fn entity_signal_name(
    class: &str,
    entity: &str,
    kind: SignalKind,
    value_type: ValueType,
    short: &str,
) -> String {
    format!("{class}({entity})::{kind}({value_type})::{short}")
}
