//! Values carried by signals and exchanged with entity commands.

use std::fmt;

/// Declared type of a signal or command parameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueType {
    /// Boolean flag.
    Bool,
    /// Signed 64-bit integer.
    Int,
    /// Unsigned 64-bit integer.
    Unsigned,
    /// 64-bit float.
    Double,
    /// UTF-8 string.
    String,
    /// Dense vector of doubles.
    Vector,
    /// Dense row-major matrix of doubles.
    Matrix,
}

impl ValueType {
    /// Every value type, in registration order.
    pub const ALL: [ValueType; 7] = [
        ValueType::Bool,
        ValueType::Int,
        ValueType::Unsigned,
        ValueType::Double,
        ValueType::String,
        ValueType::Vector,
        ValueType::Matrix,
    ];

    /// Canonical type name, as used in signal names and by the caster.
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Unsigned => "unsigned",
            Self::Double => "double",
            Self::String => "string",
            Self::Vector => "Vector",
            Self::Matrix => "Matrix",
        }
    }

    /// Zero value a freshly created signal of this type holds.
    pub fn default_value(self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::Int => Value::Int(0),
            Self::Unsigned => Value::Unsigned(0),
            Self::Double => Value::Double(0.0),
            Self::String => Value::String(String::new()),
            Self::Vector => Value::Vector(Vec::new()),
            Self::Matrix => Value::Matrix {
                rows: 0,
                cols: 0,
                data: Vec::new(),
            },
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A dynamically typed signal or command value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// No value (result of a command that returns nothing).
    None,
    /// Boolean flag.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Unsigned integer.
    Unsigned(u64),
    /// Double-precision float.
    Double(f64),
    /// UTF-8 string.
    String(String),
    /// Dense vector.
    Vector(Vec<f64>),
    /// Dense row-major matrix. `data.len() == rows * cols`.
    Matrix {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
        /// Row-major entries.
        data: Vec<f64>,
    },
}

impl Value {
    /// Type of this value, or `None` for [`Value::None`].
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Self::None => None,
            Self::Bool(_) => Some(ValueType::Bool),
            Self::Int(_) => Some(ValueType::Int),
            Self::Unsigned(_) => Some(ValueType::Unsigned),
            Self::Double(_) => Some(ValueType::Double),
            Self::String(_) => Some(ValueType::String),
            Self::Vector(_) => Some(ValueType::Vector),
            Self::Matrix { .. } => Some(ValueType::Matrix),
        }
    }

    /// Human-readable type name, `"none"` for [`Value::None`].
    pub fn type_name(&self) -> &'static str {
        self.value_type().map_or("none", ValueType::name)
    }

    /// Convert this value to `target` when the conversion is lossless in
    /// intent: integers widen to doubles, non-negative ints become
    /// unsigned and small unsigned values become ints.
    ///
    /// Returns `None` when no such conversion exists.
    pub fn coerce_to(&self, target: ValueType) -> Option<Value> {
        if self.value_type() == Some(target) {
            return Some(self.clone());
        }
        match (self, target) {
            (Self::Int(i), ValueType::Double) => Some(Self::Double(*i as f64)),
            (Self::Unsigned(u), ValueType::Double) => Some(Self::Double(*u as f64)),
            (Self::Int(i), ValueType::Unsigned) => u64::try_from(*i).ok().map(Self::Unsigned),
            (Self::Unsigned(u), ValueType::Int) => i64::try_from(*u).ok().map(Self::Int),
            _ => None,
        }
    }

    /// The value as an `f64`, if it is a double.
    pub fn as_double(&self) -> Option<f64> {
        match self {
            Self::Double(d) => Some(*d),
            _ => None,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Self::Unsigned(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<f64>> for Value {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values_match_their_type() {
        for ty in ValueType::ALL {
            assert_eq!(ty.default_value().value_type(), Some(ty));
        }
    }

    #[test]
    fn integers_widen_to_double() {
        assert_eq!(
            Value::Int(-3).coerce_to(ValueType::Double),
            Some(Value::Double(-3.0))
        );
        assert_eq!(
            Value::Unsigned(5).coerce_to(ValueType::Double),
            Some(Value::Double(5.0))
        );
    }

    #[test]
    fn negative_int_is_not_unsigned() {
        assert_eq!(Value::Int(-1).coerce_to(ValueType::Unsigned), None);
        assert_eq!(
            Value::Int(9).coerce_to(ValueType::Unsigned),
            Some(Value::Unsigned(9))
        );
        assert_eq!(Value::Unsigned(u64::MAX).coerce_to(ValueType::Int), None);
    }

    #[test]
    fn double_does_not_narrow() {
        assert_eq!(Value::Double(1.0).coerce_to(ValueType::Int), None);
        assert_eq!(Value::Bool(true).coerce_to(ValueType::Int), None);
    }

    #[test]
    fn none_has_no_type() {
        assert_eq!(Value::None.value_type(), None);
        assert_eq!(Value::None.type_name(), "none");
    }
}
