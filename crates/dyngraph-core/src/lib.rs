//! Core types for the dyngraph signal graph.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! value model carried by signals, the generational keys that identify
//! native objects, and the per-subsystem error types shared by the engine
//! and the binding layers.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod value;

pub use error::{CastError, EntityError, SignalError, TraceError};
pub use id::{EntityKey, SignalKey, Time};
pub use value::{Value, ValueType};
