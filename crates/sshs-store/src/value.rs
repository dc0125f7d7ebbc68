// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Attribute values
//!
//! [`Value`] is the tagged union stored in every attribute. [`ExternalValue`]
//! is the flat, type-stable record used when a value has to cross an API
//! boundary (FFI shims, JSON, remote control protocols).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConvertError;

/// Type tag of an attribute value. Fixed for the lifetime of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    #[default]
    Bool,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    String,
}

impl ValueType {
    pub const ALL: [ValueType; 8] = [
        ValueType::Bool,
        ValueType::Byte,
        ValueType::Short,
        ValueType::Int,
        ValueType::Long,
        ValueType::Float,
        ValueType::Double,
        ValueType::String,
    ];

    /// Name used in XML documents and override arguments.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::Bool => "bool",
            ValueType::Byte => "byte",
            ValueType::Short => "short",
            ValueType::Int => "int",
            ValueType::Long => "long",
            ValueType::Float => "float",
            ValueType::Double => "double",
            ValueType::String => "string",
        }
    }

    /// Stable integer code for boundary representations (`bool` = 0 ... `string` = 7).
    pub fn code(self) -> i32 {
        match self {
            ValueType::Bool => 0,
            ValueType::Byte => 1,
            ValueType::Short => 2,
            ValueType::Int => 3,
            ValueType::Long => 4,
            ValueType::Float => 5,
            ValueType::Double => 6,
            ValueType::String => 7,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.code() == code)
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            ValueType::Byte | ValueType::Short | ValueType::Int | ValueType::Long
        )
    }

    pub fn is_floating(self) -> bool {
        matches!(self, ValueType::Float | ValueType::Double)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| ConvertError::UnknownType(s.to_string()))
    }
}

/// A typed attribute value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    String(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Bool(_) => ValueType::Bool,
            Value::Byte(_) => ValueType::Byte,
            Value::Short(_) => ValueType::Short,
            Value::Int(_) => ValueType::Int,
            Value::Long(_) => ValueType::Long,
            Value::Float(_) => ValueType::Float,
            Value::Double(_) => ValueType::Double,
            Value::String(_) => ValueType::String,
        }
    }

    /// Parse the textual form produced by `Display` back into a value of `value_type`.
    ///
    /// Booleans accept `true` as true and everything else as false.
    pub fn parse(value_type: ValueType, text: &str) -> Result<Value, ConvertError> {
        let invalid = |reason: String| ConvertError::InvalidValue {
            value_type,
            text: text.to_string(),
            reason,
        };

        let value = match value_type {
            ValueType::Bool => Value::Bool(text == "true"),
            ValueType::Byte => Value::Byte(text.trim().parse().map_err(|e| invalid(format!("{e}")))?),
            ValueType::Short => Value::Short(text.trim().parse().map_err(|e| invalid(format!("{e}")))?),
            ValueType::Int => Value::Int(text.trim().parse().map_err(|e| invalid(format!("{e}")))?),
            ValueType::Long => Value::Long(text.trim().parse().map_err(|e| invalid(format!("{e}")))?),
            ValueType::Float => Value::Float(text.trim().parse().map_err(|e| invalid(format!("{e}")))?),
            ValueType::Double => Value::Double(text.trim().parse().map_err(|e| invalid(format!("{e}")))?),
            ValueType::String => Value::String(text.to_string()),
        };

        Ok(value)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Byte(v) => Some(i64::from(*v)),
            Value::Short(v) => Some(i64::from(*v)),
            Value::Int(v) => Some(i64::from(*v)),
            Value::Long(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(f64::from(*v)),
            Value::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v),
            _ => None,
        }
    }
}

/// Renders the value the way it is persisted: `true`/`false` for booleans,
/// shortest round-trip decimal form for numbers, verbatim for strings.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(v) => f.write_str(if *v { "true" } else { "false" }),
            Value::Byte(v) => write!(f, "{v}"),
            Value::Short(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Long(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Double(v) => write!(f, "{v}"),
            Value::String(v) => f.write_str(v),
        }
    }
}

/// Rust types that map one-to-one onto a [`ValueType`].
///
/// Drives the generic `Node::get::<T>()` / `Node::put()` accessors.
pub trait AttributeKind: Sized {
    const VALUE_TYPE: ValueType;

    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! attribute_kind {
    ($ty:ty, $variant:ident, $tag:expr) => {
        impl AttributeKind for $ty {
            const VALUE_TYPE: ValueType = $tag;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::$variant(v)
            }
        }
    };
}

attribute_kind!(bool, Bool, ValueType::Bool);
attribute_kind!(i8, Byte, ValueType::Byte);
attribute_kind!(i16, Short, ValueType::Short);
attribute_kind!(i32, Int, ValueType::Int);
attribute_kind!(i64, Long, ValueType::Long);
attribute_kind!(f32, Float, ValueType::Float);
attribute_kind!(f64, Double, ValueType::Double);
attribute_kind!(String, String, ValueType::String);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

/// Flat boundary record: one field per kind, only the one named by
/// `value_type` is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalValue {
    pub value_type: ValueType,
    pub boolean: bool,
    pub ibyte: i8,
    pub ishort: i16,
    pub iint: i32,
    pub ilong: i64,
    pub ffloat: f32,
    pub ddouble: f64,
    pub string: String,
}

impl From<&Value> for ExternalValue {
    fn from(value: &Value) -> Self {
        let mut external = ExternalValue {
            value_type: value.value_type(),
            ..Default::default()
        };

        match value {
            Value::Bool(v) => external.boolean = *v,
            Value::Byte(v) => external.ibyte = *v,
            Value::Short(v) => external.ishort = *v,
            Value::Int(v) => external.iint = *v,
            Value::Long(v) => external.ilong = *v,
            Value::Float(v) => external.ffloat = *v,
            Value::Double(v) => external.ddouble = *v,
            Value::String(v) => external.string = v.clone(),
        }

        external
    }
}

impl From<Value> for ExternalValue {
    fn from(value: Value) -> Self {
        ExternalValue::from(&value)
    }
}

impl From<ExternalValue> for Value {
    fn from(external: ExternalValue) -> Self {
        match external.value_type {
            ValueType::Bool => Value::Bool(external.boolean),
            ValueType::Byte => Value::Byte(external.ibyte),
            ValueType::Short => Value::Short(external.ishort),
            ValueType::Int => Value::Int(external.iint),
            ValueType::Long => Value::Long(external.ilong),
            ValueType::Float => Value::Float(external.ffloat),
            ValueType::Double => Value::Double(external.ddouble),
            ValueType::String => Value::String(external.string),
        }
    }
}
