//! Reusable entity class fixtures.
//!
//! - `Relay`: two int inputs `a` and `b`, and an output copying `b`. Also
//!   carries commands exercising mixed argument types.
//! - `Counter`: an output that changes on every recompute.
//! - `Faulty`: a command and an output that always fail.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use dyngraph_core::{Value, ValueType};
use dyngraph_engine::{Command, Factory};

/// Message returned by every failing `Faulty` operation.
pub const FAULTY_REASON: &str = "boom";

/// Register `Relay`, `Counter` and `Faulty` into `factory`.
///
/// Panics if any of them is already registered.
pub fn register_fixtures(factory: &mut Factory) {
    factory
        .register("Relay", "Two int inputs; sout copies b.", |b| {
            b.input("a", ValueType::Int)
                .input("b", ValueType::Int)
                .output("sout", ValueType::Int, &["b"], |v, _| Ok(v[0].clone()))
                .command(
                    "label",
                    Command::new(
                        vec![ValueType::String, ValueType::Int],
                        "Join a prefix and a number.\n",
                        |_, args| match args {
                            [Value::String(prefix), Value::Int(n)] => {
                                Ok(Value::String(format!("{prefix}{n}")))
                            }
                            _ => Err("unexpected arguments".into()),
                        },
                    ),
                )
                .command(
                    "whoami",
                    Command::new(Vec::new(), "Name of this entity.\n", |ctx, _| {
                        Ok(Value::String(ctx.entity_name().to_owned()))
                    }),
                );
        })
        .unwrap_or_else(|e| panic!("{e}"));

    factory
        .register("Counter", "Count recomputes of sout.", |b| {
            let count = Arc::new(AtomicI64::new(0));
            b.output("sout", ValueType::Int, &[], move |_, _| {
                Ok(Value::Int(count.fetch_add(1, Ordering::Relaxed) + 1))
            });
        })
        .unwrap_or_else(|e| panic!("{e}"));

    factory
        .register("Faulty", "Fails on purpose.", |b| {
            b.output("sout", ValueType::Double, &[], |_, _| Err(FAULTY_REASON.into()))
                .command(
                    "explode",
                    Command::new(Vec::new(), "Always fails.\n", |_, _| {
                        Err(FAULTY_REASON.into())
                    }),
                );
        })
        .unwrap_or_else(|e| panic!("{e}"));
}
