//! Dynamic SQL values.

use crate::types::FieldType;
use serde::{Deserialize, Serialize};

/// A dynamically-typed SQL value.
///
/// Literals inside expression trees are stored as `Value`s and every literal
/// contributes exactly one bound parameter when compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,

    /// Boolean value
    Bool(bool),

    /// 32-bit signed integer
    Int(i32),

    /// 64-bit signed integer
    BigInt(i64),

    /// 64-bit floating point
    Double(f64),

    /// Arbitrary precision decimal (stored as string)
    Decimal(String),

    /// Text string
    Text(String),

    /// Binary data
    Bytes(Vec<u8>),

    /// JSON value
    Json(serde_json::Value),
}

impl Value {
    /// Check if this value is NULL.
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Parse this value as a JSON document.
    ///
    /// Text is parsed, `Json` is returned as-is and scalars map to their JSON
    /// counterparts.
    pub fn to_json(&self) -> Option<serde_json::Value> {
        match self {
            Value::Null => Some(serde_json::Value::Null),
            Value::Bool(b) => Some(serde_json::Value::Bool(*b)),
            Value::Int(v) => Some(serde_json::Value::from(*v)),
            Value::BigInt(v) => Some(serde_json::Value::from(*v)),
            Value::Double(v) => serde_json::Number::from_f64(*v).map(serde_json::Value::Number),
            Value::Text(s) => serde_json::from_str(s).ok(),
            Value::Json(v) => Some(v.clone()),
            Value::Decimal(_) | Value::Bytes(_) => None,
        }
    }

    /// The field type a literal of this kind resolves to when no output
    /// field is declared.
    pub fn inferred_field_type(&self) -> Option<FieldType> {
        match self {
            Value::Null => None,
            Value::Bool(_) => Some(FieldType::Boolean),
            Value::Int(_) => Some(FieldType::Integer),
            Value::BigInt(_) => Some(FieldType::BigInteger),
            Value::Double(_) => Some(FieldType::Float),
            Value::Decimal(_) => Some(FieldType::Decimal {
                max_digits: None,
                decimal_places: None,
            }),
            Value::Text(_) => Some(FieldType::Char { max_length: None }),
            Value::Bytes(_) => Some(FieldType::Binary),
            Value::Json(_) => Some(FieldType::Json),
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => |$v:ident| $body:expr),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from($v: $ty) -> Self {
                    $body
                }
            }
        )*
    };
}

impl_from!(
    bool => |v| Value::Bool(v),
    i32 => |v| Value::Int(v),
    i64 => |v| Value::BigInt(v),
    u32 => |v| Value::BigInt(i64::from(v)),
    f32 => |v| Value::Double(f64::from(v)),
    f64 => |v| Value::Double(v),
    String => |v| Value::Text(v),
    &str => |v| Value::Text(v.to_string()),
    Vec<u8> => |v| Value::Bytes(v),
    &[u8] => |v| Value::Bytes(v.to_vec()),
    serde_json::Value => |v| Value::Json(v),
);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}
