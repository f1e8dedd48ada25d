//! Test utilities for dyngraph development.
//!
//! Provides fixture entity classes ([`fixtures`]), a [`fixture_graph`]
//! with them registered, per-test scratch directories, and a logging
//! initializer that routes `tracing` output through the test harness.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use dyngraph_engine::{Graph, GraphConfig};
use tracing_subscriber::EnvFilter;

pub use fixtures::register_fixtures;

static SCRATCH: AtomicUsize = AtomicUsize::new(0);

/// Install a `RUST_LOG`-filtered subscriber writing through the test
/// harness. Safe to call from every test; only the first call wins.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A fresh, empty directory under the system temp dir.
///
/// The name embeds the process id and a counter so parallel tests never
/// share one.
pub fn scratch_dir(label: &str) -> PathBuf {
    let n = SCRATCH.fetch_add(1, Ordering::Relaxed);
    let dir = std::env::temp_dir().join(format!("dyngraph-{label}-{}-{n}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap_or_else(|e| panic!("scratch dir {}: {e}", dir.display()));
    dir
}

/// A graph with the built-in and fixture classes and default config.
pub fn fixture_graph() -> Graph {
    fixture_graph_with(GraphConfig::default())
}

/// A graph with the built-in and fixture classes.
pub fn fixture_graph_with(config: GraphConfig) -> Graph {
    let mut graph = Graph::new(config).unwrap_or_else(|e| panic!("invalid test config: {e}"));
    register_fixtures(graph.factory_mut());
    graph
}
