//! Benchmark graph profiles for dyngraph.
//!
//! - [`gain_chain`]: a line of `Gain` entities fed by one free signal
//! - [`adder_tree`]: a balanced binary tree of `Adder` entities

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use dyngraph_core::{EntityError, SignalKey, Value, ValueType};
use dyngraph_engine::Graph;

/// Source and sink of a built profile.
#[derive(Clone, Copy, Debug)]
pub struct Profile {
    /// Free signal feeding the graph.
    pub source: SignalKey,
    /// Output to recompute.
    pub sink: SignalKey,
}

/// Chain `len` `Gain` entities (gain 1.0) behind a double source set to
/// 1.0. Entity names are prefixed with `prefix`.
pub fn gain_chain(graph: &mut Graph, prefix: &str, len: usize) -> Result<Profile, EntityError> {
    let source = graph.create_signal(&format!("{prefix}-src"), ValueType::Double);
    graph.set_signal_value(source, Value::Double(1.0))?;
    let mut upstream = source;
    for i in 0..len {
        let gain = graph.create_entity("Gain", &format!("{prefix}-g{i}"))?;
        let sin = graph.entity_signal(gain, "sin")?;
        graph.plug(upstream, sin)?;
        upstream = graph.entity_signal(gain, "sout")?;
    }
    Ok(Profile {
        source,
        sink: upstream,
    })
}

/// Sum `2^depth` copies of one source through a tree of `Adder`s.
pub fn adder_tree(graph: &mut Graph, prefix: &str, depth: u32) -> Result<Profile, EntityError> {
    let source = graph.create_signal(&format!("{prefix}-src"), ValueType::Double);
    graph.set_signal_value(source, Value::Double(1.0))?;
    let mut level = vec![source; 1 << depth];
    let mut n = 0;
    while level.len() > 1 {
        let mut next = Vec::with_capacity(level.len() / 2);
        for pair in level.chunks(2) {
            let adder = graph.create_entity("Adder", &format!("{prefix}-a{n}"))?;
            n += 1;
            let sin1 = graph.entity_signal(adder, "sin1")?;
            let sin2 = graph.entity_signal(adder, "sin2")?;
            graph.plug(pair[0], sin1)?;
            graph.plug(pair[1], sin2)?;
            next.push(graph.entity_signal(adder, "sout")?);
        }
        level = next;
    }
    Ok(Profile {
        source,
        sink: level[0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gain_chain_passes_the_source_through() {
        let mut g = Graph::default();
        let p = gain_chain(&mut g, "t", 10).unwrap();
        assert_eq!(g.recompute(p.sink, 1).unwrap(), Value::Double(1.0));
    }

    #[test]
    fn adder_tree_counts_its_leaves() {
        let mut g = Graph::default();
        let p = adder_tree(&mut g, "t", 4).unwrap();
        assert_eq!(g.recompute(p.sink, 1).unwrap(), Value::Double(16.0));
    }
}
