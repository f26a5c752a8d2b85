use crate::types::ScalarType;
use serde::Serialize;
use std::fmt;

/// Constant payload of a literal expression
#[derive(Debug, Clone, Serialize)]
pub enum Value {
    Boolean(bool),
    Int32(i32),
    Int64(i64),
    Double(f64),
    String(String),
}

impl Value {
    /// Get the scalar type of this value
    pub fn scalar_type(&self) -> ScalarType {
        match self {
            Value::Boolean(_) => ScalarType::Boolean,
            Value::Int32(_) => ScalarType::Int32,
            Value::Int64(_) => ScalarType::Int64,
            Value::Double(_) => ScalarType::Double,
            Value::String(_) => ScalarType::String,
        }
    }
}

// Doubles compare by bit pattern, so a NaN literal equals itself
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Int32(a), Value::Int32(b)) => a == b,
            (Value::Int64(a), Value::Int64(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a.to_bits() == b.to_bits(),
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Int32(i) => write!(f, "{}", i),
            Value::Int64(i) => write!(f, "{}L", i),
            Value::Double(d) => write!(f, "{:?}", d),
            Value::String(s) => write!(f, "{:?}", s),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int32(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int64(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}
