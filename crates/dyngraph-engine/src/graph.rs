//! The native signal graph: owner of every signal and entity.
//!
//! Objects live in generational slot tables and are addressed by
//! [`SignalKey`] / [`EntityKey`]. Keys are non-owning: destroying an object
//! retires its key, and every later lookup through that key fails with a
//! `Stale` error instead of touching freed or reused storage.

use std::collections::HashSet;

use indexmap::IndexMap;
use smallvec::SmallVec;

use dyngraph_core::{EntityError, EntityKey, SignalError, SignalKey, Time, TraceError, Value, ValueType};

use crate::caster::SignalCaster;
use crate::command::CommandContext;
use crate::config::{ConfigError, GraphConfig};
use crate::entity::{Entity, SignalDecl};
use crate::factory::Factory;
use crate::signal::{entity_signal_name, ComputeFn, Signal, SignalKind, Source};
use crate::slot::SlotTable;
use crate::trace::TraceRegistry;

/// Signals, entities, the entity factory, the signal caster and the trace
/// sinks of one process.
pub struct Graph {
    config: GraphConfig,
    signals: SlotTable<Signal>,
    entities: SlotTable<Entity>,
    names: IndexMap<String, EntityKey>,
    factory: Factory,
    caster: SignalCaster,
    traces: TraceRegistry,
}

impl Graph {
    /// A graph whose factory knows the built-in classes.
    pub fn new(config: GraphConfig) -> Result<Self, ConfigError> {
        Self::with_factory(config, Factory::with_builtins())
    }

    /// A graph using `factory` for entity creation.
    pub fn with_factory(config: GraphConfig, factory: Factory) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::assemble(config, factory))
    }

    fn assemble(config: GraphConfig, factory: Factory) -> Self {
        let traces = TraceRegistry::new(config.trace_dir.clone(), config.trace_append);
        Self {
            config,
            signals: SlotTable::new(),
            entities: SlotTable::new(),
            names: IndexMap::new(),
            factory,
            caster: SignalCaster::new(),
            traces,
        }
    }

    /// The configuration the graph was built with.
    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// The entity class registry.
    pub fn factory(&self) -> &Factory {
        &self.factory
    }

    /// The entity class registry, for registering classes.
    pub fn factory_mut(&mut self) -> &mut Factory {
        &mut self.factory
    }

    /// The value type registry.
    pub fn caster(&self) -> &SignalCaster {
        &self.caster
    }

    /// The trace sinks.
    pub fn traces(&self) -> &TraceRegistry {
        &self.traces
    }

    // ── signals ────────────────────────────────────────────────────

    fn insert_signal(&mut self, signal: Signal) -> SignalKey {
        let (slot, generation) = self.signals.insert(signal);
        SignalKey::new(slot, generation)
    }

    /// Create a free signal holding the zero value of `value_type`.
    pub fn create_signal(&mut self, name: &str, value_type: ValueType) -> SignalKey {
        let key = self.insert_signal(Signal::new(
            name.to_owned(),
            SignalKind::Free,
            value_type,
            Source::Constant,
            None,
        ));
        tracing::debug!(signal = name, %key, "signal created");
        key
    }

    /// Destroy a free signal. Consumers plugged into it are unplugged and
    /// keep their last value.
    pub fn destroy_signal(&mut self, key: SignalKey) -> Result<(), SignalError> {
        let signal = self.signal(key)?;
        if signal.owner().is_some() {
            return Err(SignalError::OwnedByEntity {
                signal: signal.name().to_owned(),
            });
        }
        if let Some(removed) = self.signals.remove(key.slot(), key.generation()) {
            tracing::debug!(signal = removed.name(), %key, "signal destroyed");
        }
        self.unplug_consumers_of(&HashSet::from([key]));
        Ok(())
    }

    /// Whether `key` still refers to a live signal.
    pub fn contains_signal(&self, key: SignalKey) -> bool {
        self.signals.get(key.slot(), key.generation()).is_some()
    }

    /// Number of live signals.
    pub fn signal_count(&self) -> usize {
        self.signals.len()
    }

    /// The signal behind `key`.
    pub fn signal(&self, key: SignalKey) -> Result<&Signal, SignalError> {
        self.signals
            .get(key.slot(), key.generation())
            .ok_or(SignalError::Stale { key })
    }

    fn signal_mut(&mut self, key: SignalKey) -> Result<&mut Signal, SignalError> {
        self.signals
            .get_mut(key.slot(), key.generation())
            .ok_or(SignalError::Stale { key })
    }

    /// Time of the signal's last recompute.
    pub fn signal_time(&self, key: SignalKey) -> Result<Time, SignalError> {
        Ok(self.signal(key)?.time())
    }

    /// Current value of the signal, without recomputing.
    pub fn signal_value(&self, key: SignalKey) -> Result<&Value, SignalError> {
        Ok(self.signal(key)?.value())
    }

    /// Current value rendered by the caster.
    pub fn signal_text(&self, key: SignalKey) -> Result<String, SignalError> {
        Ok(self.caster.display(self.signal(key)?.value()))
    }

    /// Overwrite the current value. The upstream link, if any, is left in
    /// place and takes over again on the next recompute.
    pub fn set_signal_value(&mut self, key: SignalKey, value: Value) -> Result<(), SignalError> {
        self.signal_mut(key)?.assign(value)
    }

    /// Parse `text` with the caster according to the signal's type and
    /// store the result.
    pub fn set_signal_text(&mut self, key: SignalKey, text: &str) -> Result<(), SignalError> {
        let value_type = self.signal(key)?.value_type();
        let value = self.caster.parse(value_type, text)?;
        self.set_signal_value(key, value)
    }

    /// Recompute the signal at `time` and return its new value.
    ///
    /// Plugged signals pull their producer, outputs recompute their
    /// dependencies and apply their function, anything else keeps its
    /// value. Every signal visited is stamped with `time`.
    pub fn recompute(&mut self, key: SignalKey, time: Time) -> Result<Value, SignalError> {
        self.recompute_at(key, time, 0)
    }

    fn recompute_at(
        &mut self,
        key: SignalKey,
        time: Time,
        depth: usize,
    ) -> Result<Value, SignalError> {
        let limit = self.config.max_recompute_depth;
        let signal = self.signal(key)?;
        if depth > limit {
            return Err(SignalError::DepthExceeded {
                signal: signal.name().to_owned(),
                limit,
            });
        }
        let value = match signal.source.clone() {
            Source::Constant => {
                let signal = self.signal_mut(key)?;
                signal.set_time(time);
                return Ok(signal.value().clone());
            }
            Source::Plugged(producer) => self.recompute_at(producer, time, depth + 1)?,
            Source::Computed { deps, compute } => self.compute(key, &deps, &compute, time, depth)?,
        };
        self.signal_mut(key)?.stamp(value.clone(), time)?;
        Ok(value)
    }

    fn compute(
        &mut self,
        key: SignalKey,
        deps: &[SignalKey],
        compute: &ComputeFn,
        time: Time,
        depth: usize,
    ) -> Result<Value, SignalError> {
        let mut inputs: SmallVec<[Value; 4]> = SmallVec::with_capacity(deps.len());
        for dep in deps {
            inputs.push(self.recompute_at(*dep, time, depth + 1)?);
        }
        compute(inputs.as_slice(), time).map_err(|reason| SignalError::ComputeFailed {
            signal: self
                .signal(key)
                .map(|s| s.name().to_owned())
                .unwrap_or_else(|_| key.to_string()),
            reason,
        })
    }

    /// Make `consumer` pull its value from `producer` on recompute.
    ///
    /// Only the consumer is modified. An existing upstream of the consumer
    /// is replaced.
    pub fn plug(&mut self, producer: SignalKey, consumer: SignalKey) -> Result<(), SignalError> {
        let p = self.signal(producer)?;
        let c = self.signal(consumer)?;
        if producer == consumer {
            return Err(SignalError::PlugIntoSelf {
                signal: c.name().to_owned(),
            });
        }
        if !c.kind().is_pluggable() {
            return Err(SignalError::PlugIntoOutput {
                consumer: c.name().to_owned(),
            });
        }
        if p.value_type() != c.value_type() {
            return Err(SignalError::IncompatiblePlug {
                producer: p.name().to_owned(),
                producer_type: p.value_type(),
                consumer: c.name().to_owned(),
                consumer_type: c.value_type(),
            });
        }
        if self.reaches(producer, consumer) {
            return Err(SignalError::Cycle {
                producer: p.name().to_owned(),
                consumer: c.name().to_owned(),
            });
        }
        let (pname, cname) = (p.name().to_owned(), c.name().to_owned());
        self.signal_mut(consumer)?.source = Source::Plugged(producer);
        tracing::debug!(producer = %pname, consumer = %cname, "signal plugged");
        self.traces.write(format_args!("plug {pname} -> {cname}"));
        Ok(())
    }

    /// Remove the upstream link of `consumer`, keeping its last value.
    pub fn unplug(&mut self, consumer: SignalKey) -> Result<(), SignalError> {
        let signal = self.signal_mut(consumer)?;
        if signal.upstream().is_none() {
            return Err(SignalError::NotPlugged {
                signal: signal.name().to_owned(),
            });
        }
        signal.source = Source::Constant;
        let name = signal.name().to_owned();
        tracing::debug!(consumer = %name, "signal unplugged");
        self.traces.write(format_args!("unplug {name}"));
        Ok(())
    }

    /// Whether walking upstream from `from` reaches `target`.
    fn reaches(&self, from: SignalKey, target: SignalKey) -> bool {
        let mut stack = vec![from];
        let mut seen = HashSet::new();
        while let Some(key) = stack.pop() {
            if key == target {
                return true;
            }
            if !seen.insert(key) {
                continue;
            }
            if let Ok(signal) = self.signal(key) {
                stack.extend(signal.inputs());
            }
        }
        false
    }

    fn unplug_consumers_of(&mut self, removed: &HashSet<SignalKey>) {
        for (_, _, signal) in self.signals.iter_mut() {
            if let Source::Plugged(p) = signal.source {
                if removed.contains(&p) {
                    signal.source = Source::Constant;
                }
            }
        }
    }

    // ── entities ───────────────────────────────────────────────────

    /// Instantiate `class` under the unique name `name`.
    pub fn create_entity(&mut self, class: &str, name: &str) -> Result<EntityKey, EntityError> {
        if self.names.contains_key(name) {
            return Err(EntityError::DuplicateName {
                name: name.to_owned(),
            });
        }
        let builder = self.factory.build(class, name)?;

        // Build every signal before touching the tables so a failure
        // leaves the graph unchanged.
        let mut prepared = Vec::with_capacity(builder.signals.len());
        for decl in builder.signals {
            match decl {
                SignalDecl::Input {
                    name: short,
                    value_type,
                    initial,
                } => {
                    let full = entity_signal_name(class, name, SignalKind::Input, value_type, &short);
                    let mut signal =
                        Signal::new(full, SignalKind::Input, value_type, Source::Constant, None);
                    if let Some(v) = initial {
                        signal.assign(v)?;
                    }
                    prepared.push((short, signal, None));
                }
                SignalDecl::Output {
                    name: short,
                    value_type,
                    deps,
                    compute,
                } => {
                    let full =
                        entity_signal_name(class, name, SignalKind::Output, value_type, &short);
                    let signal =
                        Signal::new(full, SignalKind::Output, value_type, Source::Constant, None);
                    prepared.push((short, signal, Some((deps, compute))));
                }
            }
        }

        let (slot, generation) = self
            .entities
            .insert(Entity::new(name.to_owned(), class.to_owned()));
        let key = EntityKey::new(slot, generation);

        let mut signals = IndexMap::with_capacity(prepared.len());
        let mut computed = Vec::new();
        for (short, mut signal, compute) in prepared {
            signal.set_owner(key);
            let signal_key = self.insert_signal(signal);
            signals.insert(short, signal_key);
            if let Some(c) = compute {
                computed.push((signal_key, c));
            }
        }
        for (signal_key, (deps, compute)) in computed {
            let deps = deps.iter().filter_map(|d| signals.get(d).copied()).collect();
            if let Some(signal) = self.signals.get_mut(signal_key.slot(), signal_key.generation()) {
                signal.source = Source::Computed { deps, compute };
            }
        }

        if let Some(entity) = self.entities.get_mut(slot, generation) {
            entity.signals = signals;
            entity.commands = builder.commands.into_iter().collect();
        }
        self.names.insert(name.to_owned(), key);
        tracing::debug!(class, entity = name, %key, "entity created");
        self.traces.write(format_args!("create {class}({name})"));
        Ok(key)
    }

    /// Destroy an entity and its signals. Signals plugged into any of them
    /// are unplugged and keep their last value.
    pub fn destroy_entity(&mut self, key: EntityKey) -> Result<(), EntityError> {
        let entity = self
            .entities
            .remove(key.slot(), key.generation())
            .ok_or(EntityError::Stale { key })?;
        self.names.shift_remove(entity.name());
        let removed: HashSet<SignalKey> = entity.signals.values().copied().collect();
        for k in &removed {
            self.signals.remove(k.slot(), k.generation());
        }
        self.unplug_consumers_of(&removed);
        tracing::debug!(entity = entity.name(), %key, "entity destroyed");
        self.traces
            .write(format_args!("destroy {}({})", entity.class_name(), entity.name()));
        Ok(())
    }

    /// Whether `key` still refers to a live entity.
    pub fn contains_entity(&self, key: EntityKey) -> bool {
        self.entities.get(key.slot(), key.generation()).is_some()
    }

    /// The entity behind `key`.
    pub fn entity(&self, key: EntityKey) -> Result<&Entity, EntityError> {
        self.entities
            .get(key.slot(), key.generation())
            .ok_or(EntityError::Stale { key })
    }

    /// Key of the entity named `name`.
    pub fn entity_by_name(&self, name: &str) -> Option<EntityKey> {
        self.names.get(name).copied()
    }

    /// Names of all live entities, in creation order.
    pub fn entity_names(&self) -> Vec<String> {
        self.names.keys().cloned().collect()
    }

    /// Key of the entity's signal with short name `name`.
    pub fn entity_signal(&self, key: EntityKey, name: &str) -> Result<SignalKey, EntityError> {
        let entity = self.entity(key)?;
        entity.signal(name).ok_or_else(|| EntityError::UnknownSignal {
            entity: entity.name().to_owned(),
            signal: name.to_owned(),
        })
    }

    /// Short names of the entity's signals.
    pub fn entity_signal_names(&self, key: EntityKey) -> Result<Vec<String>, EntityError> {
        Ok(self.entity(key)?.signal_names())
    }

    /// Names of the entity's commands.
    pub fn command_names(&self, key: EntityKey) -> Result<Vec<String>, EntityError> {
        Ok(self.entity(key)?.command_names())
    }

    /// Docstring of the entity's command `command`.
    pub fn command_docstring(&self, key: EntityKey, command: &str) -> Result<String, EntityError> {
        let entity = self.entity(key)?;
        entity
            .command(command)
            .map(|c| c.docstring().to_owned())
            .ok_or_else(|| EntityError::UnknownCommand {
                entity: entity.name().to_owned(),
                command: command.to_owned(),
            })
    }

    /// Run the entity's command `command` with `args`.
    ///
    /// Arguments are checked against the command's parameter types
    /// (integers widen to doubles) before the handler runs.
    pub fn execute_command(
        &mut self,
        key: EntityKey,
        command: &str,
        args: &[Value],
    ) -> Result<Value, EntityError> {
        let entity = self
            .entities
            .get(key.slot(), key.generation())
            .ok_or(EntityError::Stale { key })?;
        let cmd = entity
            .command(command)
            .ok_or_else(|| EntityError::UnknownCommand {
                entity: entity.name().to_owned(),
                command: command.to_owned(),
            })?;
        let args = cmd.check_args(command, args)?;
        let mut ctx = CommandContext::new(entity.name(), &entity.signals, &mut self.signals);
        let result = cmd.invoke(command, &mut ctx, &args);
        match &result {
            Ok(_) => tracing::debug!(entity = entity.name(), command, "command executed"),
            Err(e) => tracing::debug!(entity = entity.name(), command, error = %e, "command failed"),
        }
        self.traces.write(format_args!(
            "command {}.{command} {}",
            entity.name(),
            if result.is_ok() { "ok" } else { "failed" }
        ));
        result
    }

    // ── trace sinks ────────────────────────────────────────────────

    /// Open the trace sink `filename`.
    pub fn open_trace(&mut self, filename: &str) -> Result<(), TraceError> {
        self.traces.open(filename)
    }

    /// Close the trace sink `filename`.
    pub fn close_trace(&mut self, filename: &str) -> Result<(), TraceError> {
        self.traces.close(filename)
    }
}

/// Default configuration and the built-in classes.
impl Default for Graph {
    fn default() -> Self {
        Self::assemble(GraphConfig::default(), Factory::with_builtins())
    }
}

impl std::fmt::Debug for Graph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("signals", &self.signals.len())
            .field("entities", &self.entity_names())
            .field("factory", &self.factory)
            .field("traces", &self.traces)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Command;

    fn graph() -> Graph {
        Graph::new(GraphConfig::default()).unwrap()
    }

    #[test]
    fn set_then_get_returns_the_value_just_set() {
        let mut g = graph();
        let s = g.create_signal("s", ValueType::Double);
        g.set_signal_text(s, "2.25").unwrap();
        assert_eq!(g.signal_text(s).unwrap(), "2.25");
        assert_eq!(g.signal_value(s).unwrap(), &Value::Double(2.25));
    }

    #[test]
    fn plugged_consumer_recomputes_to_producer_value() {
        let mut g = graph();
        let a = g.create_signal("a", ValueType::Int);
        let b = g.create_signal("b", ValueType::Int);
        g.set_signal_value(a, Value::Int(7)).unwrap();
        g.plug(a, b).unwrap();
        assert_eq!(g.recompute(b, 3).unwrap(), Value::Int(7));
        assert_eq!(g.signal_time(b).unwrap(), 3);
        assert_eq!(g.signal(b).unwrap().upstream(), Some(a));
        assert_eq!(g.signal(a).unwrap().upstream(), None);
    }

    #[test]
    fn set_value_bypasses_upstream_until_recompute() {
        let mut g = graph();
        let a = g.create_signal("a", ValueType::Int);
        let b = g.create_signal("b", ValueType::Int);
        g.set_signal_value(a, Value::Int(1)).unwrap();
        g.plug(a, b).unwrap();
        g.set_signal_value(b, Value::Int(99)).unwrap();
        assert_eq!(g.signal_value(b).unwrap(), &Value::Int(99));
        assert_eq!(g.recompute(b, 1).unwrap(), Value::Int(1));
    }

    #[test]
    fn plug_rejects_type_mismatch_self_and_outputs() {
        let mut g = graph();
        let i = g.create_signal("i", ValueType::Int);
        let d = g.create_signal("d", ValueType::Double);
        assert_eq!(
            g.plug(d, i).unwrap_err().to_string(),
            "cannot plug 'd' (double) into 'i' (int)"
        );
        assert!(matches!(g.plug(i, i), Err(SignalError::PlugIntoSelf { .. })));

        let e = g.create_entity("Adder", "add").unwrap();
        let sout = g.entity_signal(e, "sout").unwrap();
        assert!(matches!(
            g.plug(d, sout),
            Err(SignalError::PlugIntoOutput { .. })
        ));
        assert_eq!(g.signal(i).unwrap().upstream(), None);
    }

    #[test]
    fn plug_rejects_cycles() {
        let mut g = graph();
        let a = g.create_signal("a", ValueType::Int);
        let b = g.create_signal("b", ValueType::Int);
        let c = g.create_signal("c", ValueType::Int);
        g.plug(a, b).unwrap();
        g.plug(b, c).unwrap();
        let err = g.plug(c, a).unwrap_err();
        assert_eq!(
            err,
            SignalError::Cycle {
                producer: "c".into(),
                consumer: "a".into()
            }
        );
    }

    #[test]
    fn plugging_an_output_back_into_its_own_input_is_a_cycle() {
        let mut g = graph();
        let e = g.create_entity("Gain", "loop").unwrap();
        let sin = g.entity_signal(e, "sin").unwrap();
        let sout = g.entity_signal(e, "sout").unwrap();
        assert!(matches!(g.plug(sout, sin), Err(SignalError::Cycle { .. })));
    }

    #[test]
    fn unplug_keeps_last_value() {
        let mut g = graph();
        let a = g.create_signal("a", ValueType::Int);
        let b = g.create_signal("b", ValueType::Int);
        g.set_signal_value(a, Value::Int(5)).unwrap();
        g.plug(a, b).unwrap();
        g.recompute(b, 1).unwrap();
        g.unplug(b).unwrap();
        g.set_signal_value(a, Value::Int(6)).unwrap();
        assert_eq!(g.recompute(b, 2).unwrap(), Value::Int(5));
        assert!(matches!(g.unplug(b), Err(SignalError::NotPlugged { .. })));
    }

    #[test]
    fn outputs_compute_from_their_dependencies() {
        let mut g = graph();
        let e = g.create_entity("Adder", "sum").unwrap();
        let s1 = g.entity_signal(e, "sin1").unwrap();
        let s2 = g.entity_signal(e, "sin2").unwrap();
        let out = g.entity_signal(e, "sout").unwrap();
        g.set_signal_value(s1, Value::Double(1.5)).unwrap();
        g.set_signal_value(s2, Value::Double(2.0)).unwrap();
        assert_eq!(g.recompute(out, 10).unwrap(), Value::Double(3.5));
        assert_eq!(g.signal_time(s1).unwrap(), 10);
        assert_eq!(
            g.signal(out).unwrap().name(),
            "Adder(sum)::output(double)::sout"
        );
    }

    #[test]
    fn chain_across_entities() {
        let mut g = graph();
        let src = g.create_signal("src", ValueType::Double);
        let gain = g.create_entity("Gain", "g").unwrap();
        g.set_signal_value(src, Value::Double(4.0)).unwrap();
        g.plug(src, g.entity_signal(gain, "sin").unwrap()).unwrap();
        g.execute_command(gain, "setGain", &[Value::Int(3)]).unwrap();
        let out = g.entity_signal(gain, "sout").unwrap();
        assert_eq!(g.recompute(out, 1).unwrap(), Value::Double(12.0));
    }

    #[test]
    fn recompute_depth_is_bounded() {
        let mut g = Graph::new(GraphConfig {
            max_recompute_depth: 2,
            ..Default::default()
        })
        .unwrap();
        let keys: Vec<_> = (0..4)
            .map(|i| g.create_signal(&format!("s{i}"), ValueType::Int))
            .collect();
        for w in keys.windows(2) {
            g.plug(w[0], w[1]).unwrap();
        }
        assert!(g.recompute(keys[2], 0).is_ok());
        assert!(matches!(
            g.recompute(keys[3], 0),
            Err(SignalError::DepthExceeded { limit: 2, .. })
        ));
    }

    #[test]
    fn duplicate_entity_name_is_rejected() {
        let mut g = graph();
        g.create_entity("Adder", "twin").unwrap();
        assert_eq!(
            g.create_entity("Gain", "twin"),
            Err(EntityError::DuplicateName {
                name: "twin".into()
            })
        );
        assert!(matches!(
            g.create_entity("Nope", "n"),
            Err(EntityError::UnknownClass { .. })
        ));
        assert_eq!(g.entity_names(), vec!["twin"]);
    }

    #[test]
    fn destroyed_entity_keys_go_stale() {
        let mut g = graph();
        let e = g.create_entity("Gain", "doomed").unwrap();
        let sout = g.entity_signal(e, "sout").unwrap();
        let downstream = g.create_signal("down", ValueType::Double);
        g.plug(sout, downstream).unwrap();

        g.destroy_entity(e).unwrap();
        assert!(!g.contains_entity(e));
        assert!(!g.contains_signal(sout));
        assert_eq!(g.entity(e).unwrap_err(), EntityError::Stale { key: e });
        assert_eq!(
            g.signal_value(sout).unwrap_err(),
            SignalError::Stale { key: sout }
        );
        assert_eq!(g.signal(downstream).unwrap().upstream(), None);
        assert!(g.entity_by_name("doomed").is_none());
        assert_eq!(g.destroy_entity(e), Err(EntityError::Stale { key: e }));

        // The name can be reused and the old key stays dead.
        let again = g.create_entity("Gain", "doomed").unwrap();
        assert_ne!(again, e);
        assert!(g.entity(e).is_err());
    }

    #[test]
    fn entity_signals_cannot_be_destroyed_alone() {
        let mut g = graph();
        let e = g.create_entity("Adder", "a").unwrap();
        let s = g.entity_signal(e, "sin1").unwrap();
        assert!(matches!(
            g.destroy_signal(s),
            Err(SignalError::OwnedByEntity { .. })
        ));
        let free = g.create_signal("free", ValueType::Int);
        g.destroy_signal(free).unwrap();
        assert!(!g.contains_signal(free));
    }

    #[test]
    fn commands_are_listed_documented_and_checked() {
        let mut g = graph();
        let e = g.create_entity("Gain", "cmd").unwrap();
        assert_eq!(g.command_names(e).unwrap(), vec!["setGain", "getGain"]);
        assert!(g.command_docstring(e, "setGain").unwrap().starts_with("Set the gain."));
        assert!(matches!(
            g.command_docstring(e, "nope"),
            Err(EntityError::UnknownCommand { .. })
        ));
        assert_eq!(
            g.execute_command(e, "getGain", &[]).unwrap(),
            Value::Double(1.0)
        );
        assert!(matches!(
            g.execute_command(e, "setGain", &[]),
            Err(EntityError::Arity { .. })
        ));
        assert!(matches!(
            g.execute_command(e, "setGain", &[Value::String("x".into())]),
            Err(EntityError::ArgumentType { .. })
        ));
    }

    #[test]
    fn command_failure_is_reported_verbatim() {
        let mut factory = Factory::new();
        factory
            .register("Faulty", "", |b| {
                b.command(
                    "explode",
                    Command::new(vec![], "always fails", |_, _| Err("kaboom".into())),
                );
            })
            .unwrap();
        let mut g = Graph::with_factory(GraphConfig::default(), factory).unwrap();
        let e = g.create_entity("Faulty", "f").unwrap();
        let err = g.execute_command(e, "explode", &[]).unwrap_err();
        assert_eq!(
            err,
            EntityError::CommandFailed {
                command: "explode".into(),
                reason: "kaboom".into()
            }
        );
    }

    #[test]
    fn compute_failure_names_the_signal() {
        let mut factory = Factory::new();
        factory
            .register("Broken", "", |b| {
                b.output("out", ValueType::Int, &[], |_, _| Err("no data".into()));
            })
            .unwrap();
        let mut g = Graph::with_factory(GraphConfig::default(), factory).unwrap();
        let e = g.create_entity("Broken", "b").unwrap();
        let out = g.entity_signal(e, "out").unwrap();
        assert_eq!(
            g.recompute(out, 0).unwrap_err().to_string(),
            "computing 'Broken(b)::output(int)::out' failed: no data"
        );
    }

    #[test]
    fn unknown_entity_signal_is_an_error() {
        let mut g = graph();
        let e = g.create_entity("Adder", "lookup").unwrap();
        assert_eq!(
            g.entity_signal(e, "missing").unwrap_err().to_string(),
            "entity 'lookup' has no signal 'missing'"
        );
        assert_eq!(
            g.entity_signal_names(e).unwrap(),
            vec!["sin1", "sin2", "sout"]
        );
    }
}
