//! Native signal graph for dyngraph.
//!
//! Provides the [`Graph`] that owns every signal and entity, together with
//! the entity [`Factory`], the text [`SignalCaster`] and the debug
//! [`TraceRegistry`]. Signals form a directed acyclic dependency graph
//! evaluated by pull: recomputing a signal recomputes whatever it reads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builtin;
pub mod caster;
pub mod command;
pub mod config;
pub mod entity;
pub mod factory;
pub mod graph;
pub mod signal;
mod slot;
pub mod trace;

pub use caster::SignalCaster;
pub use command::{Command, CommandContext, CommandHandler};
pub use config::{ConfigError, GraphConfig};
pub use entity::{Entity, EntityBuilder};
pub use factory::{Constructor, Factory};
pub use graph::Graph;
pub use signal::{ComputeFn, Signal, SignalKind};
pub use trace::TraceRegistry;
