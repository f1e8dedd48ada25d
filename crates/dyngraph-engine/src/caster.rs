//! Signal caster: the registry of value type names and the text form of
//! every value type.
//!
//! Signal values cross the scripting boundary as text. The caster parses
//! that text according to a signal's declared type and renders values
//! back. Vectors use `[n](a,b,...)` and matrices `[r,c]((a,b),(c,d))`.

use indexmap::IndexMap;

use dyngraph_core::{CastError, Value, ValueType};

/// Registry of signal value types, keyed by type name.
#[derive(Clone, Debug)]
pub struct SignalCaster {
    types: IndexMap<String, ValueType>,
}

impl Default for SignalCaster {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalCaster {
    /// A caster knowing every built-in [`ValueType`].
    pub fn new() -> Self {
        let types = ValueType::ALL
            .iter()
            .map(|ty| (ty.name().to_owned(), *ty))
            .collect();
        Self { types }
    }

    /// Registered type names, in registration order.
    pub fn type_names(&self) -> Vec<String> {
        self.types.keys().cloned().collect()
    }

    /// Resolve a type name.
    pub fn lookup(&self, name: &str) -> Result<ValueType, CastError> {
        self.types
            .get(name)
            .copied()
            .ok_or_else(|| CastError::UnknownType {
                name: name.to_owned(),
            })
    }

    /// Parse `text` as a value of type `ty`.
    pub fn parse(&self, ty: ValueType, text: &str) -> Result<Value, CastError> {
        let fail = |reason: String| CastError::Parse {
            ty,
            input: text.to_owned(),
            reason,
        };
        let trimmed = text.trim();
        match ty {
            ValueType::Bool => match trimmed {
                "1" | "true" | "True" => Ok(Value::Bool(true)),
                "0" | "false" | "False" => Ok(Value::Bool(false)),
                _ => Err(fail("expected 0, 1, true or false".into())),
            },
            ValueType::Int => trimmed
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|e| fail(e.to_string())),
            ValueType::Unsigned => trimmed
                .parse::<u64>()
                .map(Value::Unsigned)
                .map_err(|e| fail(e.to_string())),
            ValueType::Double => trimmed
                .parse::<f64>()
                .map(Value::Double)
                .map_err(|e| fail(e.to_string())),
            ValueType::String => Ok(Value::String(text.to_owned())),
            ValueType::Vector => parse_vector(trimmed).map(Value::Vector).map_err(fail),
            ValueType::Matrix => parse_matrix(trimmed)
                .map(|(rows, cols, data)| Value::Matrix { rows, cols, data })
                .map_err(fail),
        }
    }

    /// Render a value in the text form accepted by [`parse`](Self::parse).
    pub fn display(&self, value: &Value) -> String {
        match value {
            Value::None => String::new(),
            Value::Bool(b) => (if *b { "1" } else { "0" }).to_owned(),
            Value::Int(i) => i.to_string(),
            Value::Unsigned(u) => u.to_string(),
            Value::Double(d) => d.to_string(),
            Value::String(s) => s.clone(),
            Value::Vector(v) => format!("[{}]({})", v.len(), join(v)),
            Value::Matrix { rows, cols, data } => {
                let body: Vec<String> = if *cols == 0 {
                    vec!["()".to_owned(); *rows]
                } else {
                    data.chunks(*cols)
                        .take(*rows)
                        .map(|row| format!("({})", join(row)))
                        .collect()
                };
                format!("[{rows},{cols}]({})", body.join(","))
            }
        }
    }
}

fn join(xs: &[f64]) -> String {
    xs.iter()
        .map(|x| x.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Split `[d1,d2,...]rest` into its dimensions and the remaining body.
fn split_header(input: &str) -> Result<(Vec<usize>, &str), String> {
    let rest = input
        .strip_prefix('[')
        .ok_or_else(|| "missing '[..]' size header".to_owned())?;
    let end = rest
        .find(']')
        .ok_or_else(|| "unterminated size header".to_owned())?;
    let dims = rest[..end]
        .split(',')
        .map(|d| {
            let d = d.trim();
            d.parse::<usize>()
                .map_err(|e| format!("bad dimension '{d}': {e}"))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok((dims, rest[end + 1..].trim()))
}

fn parse_tuple(input: &str) -> Result<Vec<f64>, String> {
    let inner = input
        .trim()
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| format!("expected '(...)', found '{input}'"))?
        .trim();
    if inner.is_empty() {
        return Ok(Vec::new());
    }
    inner
        .split(',')
        .map(|x| {
            let x = x.trim();
            x.parse::<f64>()
                .map_err(|e| format!("bad entry '{x}': {e}"))
        })
        .collect()
}

fn parse_vector(input: &str) -> Result<Vec<f64>, String> {
    let (dims, body) = split_header(input)?;
    let &[n] = dims.as_slice() else {
        return Err(format!("vector header needs 1 dimension, got {}", dims.len()));
    };
    let items = parse_tuple(body)?;
    if items.len() != n {
        return Err(format!("header announces {n} entries, found {}", items.len()));
    }
    Ok(items)
}

fn parse_matrix(input: &str) -> Result<(usize, usize, Vec<f64>), String> {
    let (dims, body) = split_header(input)?;
    let &[rows, cols] = dims.as_slice() else {
        return Err(format!("matrix header needs 2 dimensions, got {}", dims.len()));
    };
    let mut rest = body
        .strip_prefix('(')
        .and_then(|r| r.strip_suffix(')'))
        .ok_or_else(|| "expected '((..),(..))' body".to_owned())?
        .trim();
    if rows.checked_mul(cols).is_none() {
        return Err(format!("matrix header {rows}x{cols} is too large"));
    }
    let mut data = Vec::new();
    let mut seen_rows = 0;
    while !rest.is_empty() {
        let end = rest
            .find(')')
            .ok_or_else(|| "unterminated matrix row".to_owned())?;
        let row = parse_tuple(&rest[..=end])?;
        if row.len() != cols {
            return Err(format!(
                "row {seen_rows} has {} entries, expected {cols}",
                row.len()
            ));
        }
        data.extend(row);
        seen_rows += 1;
        rest = rest[end + 1..].trim_start();
        if let Some(r) = rest.strip_prefix(',') {
            rest = r.trim_start();
        }
    }
    if seen_rows != rows {
        return Err(format!("header announces {rows} rows, found {seen_rows}"));
    }
    Ok((rows, cols, data))
}
