//! Entity classes every graph knows about.

use dyngraph_core::{EntityError, Value, ValueType};

use crate::command::Command;
use crate::factory::Factory;

fn doubles(values: &[Value]) -> Result<Vec<f64>, String> {
    values
        .iter()
        .map(|v| {
            v.as_double()
                .ok_or_else(|| format!("expected double, got {}", v.type_name()))
        })
        .collect()
}

/// Register `Adder` and `Gain` into `factory`.
pub fn register(factory: &mut Factory) -> Result<(), EntityError> {
    factory.register("Adder", "Output the sum of two double inputs.", |b| {
        b.input("sin1", ValueType::Double)
            .input("sin2", ValueType::Double)
            .output("sout", ValueType::Double, &["sin1", "sin2"], |v, _| {
                let x = doubles(v)?;
                Ok(Value::Double(x[0] + x[1]))
            });
    })?;

    factory.register("Gain", "Multiply a double input by a settable gain.", |b| {
        b.input("sin", ValueType::Double)
            .input_with_default("gain", ValueType::Double, Value::Double(1.0))
            .output("sout", ValueType::Double, &["sin", "gain"], |v, _| {
                let x = doubles(v)?;
                Ok(Value::Double(x[0] * x[1]))
            })
            .command(
                "setGain",
                Command::setter(
                    "gain",
                    ValueType::Double,
                    "Set the gain.\n\n  Input:\n    - a double.\n",
                ),
            )
            .command(
                "getGain",
                Command::getter("gain", "Return the current gain.\n"),
            );
    })?;

    Ok(())
}
