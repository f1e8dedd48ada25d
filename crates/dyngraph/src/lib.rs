//! dyngraph: a native signal graph with an opaque-handle bridge for
//! scripting hosts.
//!
//! This is the facade crate re-exporting the public API of the dyngraph
//! sub-crates. Embedders driving the graph from Rust want [`engine`];
//! binding authors want [`bridge`].
//!
//! # Quick start
//!
//! ```rust
//! use dyngraph::prelude::*;
//!
//! let mut graph = Graph::default();
//! let gain = graph.create_entity("Gain", "g").unwrap();
//! let sin = graph.entity_signal(gain, "sin").unwrap();
//! let sout = graph.entity_signal(gain, "sout").unwrap();
//!
//! let source = graph.create_signal("source", ValueType::Double);
//! graph.set_signal_value(source, Value::Double(2.0)).unwrap();
//! graph.plug(source, sin).unwrap();
//! graph
//!     .execute_command(gain, "setGain", &[Value::Double(3.0)])
//!     .unwrap();
//!
//! assert_eq!(graph.recompute(sout, 1).unwrap(), Value::Double(6.0));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `dyngraph-core` | Values, keys, error types |
//! | [`engine`] | `dyngraph-engine` | Graph, signals, entities, factory, traces |
//! | [`bridge`] | `dyngraph-ffi` | Handle-checked operations on the process graph |
//! | [`ffi`] | `dyngraph-ffi` | C ABI, handles, status codes |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Values, keys, and error types (`dyngraph-core`).
pub use dyngraph_core as types;

/// The native graph (`dyngraph-engine`).
///
/// [`engine::Graph`] owns signals, entities, the entity
/// [`engine::Factory`], and the trace sinks.
pub use dyngraph_engine as engine;

/// The handle bridge and C ABI (`dyngraph-ffi`).
pub use dyngraph_ffi as ffi;

/// Handle-checked operations on the process-wide graph.
///
/// Every call unboxes its handles against the live graph before touching
/// it, and reports failures as [`ffi::BridgeError`].
pub use dyngraph_ffi::bridge;

/// Common imports for typical dyngraph usage.
pub mod prelude {
    // Core types
    pub use dyngraph_core::{EntityKey, SignalKey, Time, Value, ValueType};

    // Errors
    pub use dyngraph_core::{CastError, EntityError, SignalError, TraceError};

    // Engine
    pub use dyngraph_engine::{Command, Factory, Graph, GraphConfig};

    // Bridge
    pub use dyngraph_ffi::{BridgeError, DgHandle, ErrorKind, HandleKind};
}
