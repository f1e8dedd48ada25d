//! Property tests: plugging keeps the graph acyclic and recompute
//! propagates the head of every chain.

use dyngraph_core::{SignalError, Value, ValueType};
use dyngraph_engine::{Graph, GraphConfig};
use proptest::prelude::*;

proptest! {
    #[test]
    fn chain_recompute_yields_the_head_value(len in 1usize..32, head in any::<i64>()) {
        let mut g = Graph::new(GraphConfig::default()).unwrap();
        let keys: Vec<_> = (0..len)
            .map(|i| g.create_signal(&format!("s{i}"), ValueType::Int))
            .collect();
        g.set_signal_value(keys[0], Value::Int(head)).unwrap();
        for w in keys.windows(2) {
            g.plug(w[0], w[1]).unwrap();
        }
        let tail = keys[len - 1];
        prop_assert_eq!(g.recompute(tail, 9).unwrap(), Value::Int(head));
        for k in &keys {
            prop_assert_eq!(g.signal_time(*k).unwrap(), 9);
        }
    }

    #[test]
    fn random_plugs_never_close_a_cycle(
        n in 2usize..12,
        edges in proptest::collection::vec((0usize..12, 0usize..12), 0..48),
    ) {
        let mut g = Graph::new(GraphConfig::default()).unwrap();
        let keys: Vec<_> = (0..n)
            .map(|i| g.create_signal(&format!("n{i}"), ValueType::Int))
            .collect();
        for (p, c) in edges {
            let (p, c) = (keys[p % n], keys[c % n]);
            match g.plug(p, c) {
                Ok(()) => {}
                Err(SignalError::Cycle { .. }) | Err(SignalError::PlugIntoSelf { .. }) => {}
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
        // Following upstream links from any node terminates within n steps.
        for start in &keys {
            let mut cur = *start;
            let mut steps = 0;
            while let Some(up) = g.signal(cur).unwrap().upstream() {
                cur = up;
                steps += 1;
                prop_assert!(steps < n);
            }
        }
        for k in &keys {
            prop_assert!(g.recompute(*k, 1).is_ok());
        }
    }
}
