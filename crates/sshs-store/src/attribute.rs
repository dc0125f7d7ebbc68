// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Attribute metadata: flags, ranges and definition validation

use bitflags::bitflags;

use crate::error::ConfigurationError;
use crate::value::{Value, ValueType};

/// Largest string length bound accepted (`i32::MAX` bytes).
pub const STRING_LENGTH_LIMIT: i64 = i32::MAX as i64;

bitflags! {
    /// Attribute behaviour flags.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AttributeFlags: u32 {
        /// Writable only through `update_read_only_attribute`.
        const READ_ONLY = 1;
        /// Boolean "button": puts notify listeners but are never stored.
        const NOTIFY_ONLY = 2;
        /// Skipped by XML export.
        const NO_EXPORT = 4;
    }
}

impl AttributeFlags {
    pub const NORMAL: AttributeFlags = AttributeFlags::empty();
}

/// One end of an attribute range.
///
/// Integer and string attributes use `Integer` bounds (string bounds are
/// byte lengths); float and double attributes accept either kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeBound {
    Integer(i64),
    Floating(f64),
}

impl RangeBound {
    pub fn as_i64(self) -> Option<i64> {
        match self {
            RangeBound::Integer(v) => Some(v),
            RangeBound::Floating(_) => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            RangeBound::Integer(v) => v as f64,
            RangeBound::Floating(v) => v,
        }
    }
}

/// Inclusive `[min, max]` range, interpreted according to the value type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttributeRanges {
    pub min: RangeBound,
    pub max: RangeBound,
}

impl AttributeRanges {
    /// Booleans carry no meaningful range.
    pub const fn none() -> Self {
        Self {
            min: RangeBound::Integer(0),
            max: RangeBound::Integer(0),
        }
    }

    pub const fn integer(min: i64, max: i64) -> Self {
        Self {
            min: RangeBound::Integer(min),
            max: RangeBound::Integer(max),
        }
    }

    pub const fn floating(min: f64, max: f64) -> Self {
        Self {
            min: RangeBound::Floating(min),
            max: RangeBound::Floating(max),
        }
    }

    /// String length bounds in bytes.
    pub fn length(min: usize, max: usize) -> Self {
        let clamp = |v: usize| i64::try_from(v).unwrap_or(i64::MAX);
        Self::integer(clamp(min), clamp(max))
    }

    /// The most permissive range for a type, used for attributes that are
    /// created from external input without a prior declaration.
    pub fn widest(value_type: ValueType) -> Self {
        match value_type {
            ValueType::Bool => Self::none(),
            ValueType::Byte => Self::integer(i8::MIN.into(), i8::MAX.into()),
            ValueType::Short => Self::integer(i16::MIN.into(), i16::MAX.into()),
            ValueType::Int => Self::integer(i32::MIN.into(), i32::MAX.into()),
            ValueType::Long => Self::integer(i64::MIN, i64::MAX),
            ValueType::Float => Self::floating(-f64::from(f32::MAX), f64::from(f32::MAX)),
            ValueType::Double => Self::floating(-f64::MAX, f64::MAX),
            ValueType::String => Self::integer(0, STRING_LENGTH_LIMIT),
        }
    }
}

/// Check `value` against `ranges`.
///
/// Integers compare numerically, floats compare in their own precision,
/// strings compare their UTF-8 byte length. Booleans are always in range.
/// Bounds of the wrong kind for the value never match.
pub fn in_range(value: &Value, ranges: &AttributeRanges) -> bool {
    match value {
        Value::Bool(_) => true,
        Value::Byte(_) | Value::Short(_) | Value::Int(_) | Value::Long(_) => {
            match (value.as_i64(), ranges.min.as_i64(), ranges.max.as_i64()) {
                (Some(v), Some(min), Some(max)) => v >= min && v <= max,
                _ => false,
            }
        }
        Value::Float(v) => *v >= ranges.min.as_f64() as f32 && *v <= ranges.max.as_f64() as f32,
        Value::Double(v) => *v >= ranges.min.as_f64() && *v <= ranges.max.as_f64(),
        Value::String(s) => match (ranges.min.as_i64(), ranges.max.as_i64()) {
            (Some(min), Some(max)) => {
                let len = i64::try_from(s.len()).unwrap_or(i64::MAX);
                len >= min && len <= max
            }
            _ => false,
        },
    }
}

/// Validate an attribute definition before it touches a node.
///
/// Every failure here is a caller bug, hence [`ConfigurationError`].
pub(crate) fn validate_definition(
    key: &str,
    default_value: &Value,
    ranges: &AttributeRanges,
    flags: AttributeFlags,
) -> Result<(), ConfigurationError> {
    let value_type = default_value.value_type();

    match value_type {
        ValueType::Bool => {}
        ValueType::String => {
            for (bound, name) in [(ranges.min, "minimum"), (ranges.max, "maximum")] {
                let Some(limit) = bound.as_i64() else {
                    return Err(ConfigurationError::InvalidRange {
                        key: key.to_string(),
                        value_type,
                        reason: format!("{name} length bound must be an integer"),
                    });
                };
                if !(0..=STRING_LENGTH_LIMIT).contains(&limit) {
                    return Err(ConfigurationError::StringLengthLimit {
                        key: key.to_string(),
                        bound: name,
                        value: limit,
                    });
                }
            }
        }
        t if t.is_integer() => {
            if ranges.min.as_i64().is_none() || ranges.max.as_i64().is_none() {
                return Err(ConfigurationError::InvalidRange {
                    key: key.to_string(),
                    value_type,
                    reason: "integer attributes need integer bounds".to_string(),
                });
            }
        }
        _ => {
            if ranges.min.as_f64().is_nan() || ranges.max.as_f64().is_nan() {
                return Err(ConfigurationError::InvalidRange {
                    key: key.to_string(),
                    value_type,
                    reason: "bounds must not be NaN".to_string(),
                });
            }
        }
    }

    if value_type != ValueType::Bool && !bounds_ordered(ranges) {
        return Err(ConfigurationError::InvalidRange {
            key: key.to_string(),
            value_type,
            reason: format!("minimum {:?} exceeds maximum {:?}", ranges.min, ranges.max),
        });
    }

    if !in_range(default_value, ranges) {
        return Err(ConfigurationError::DefaultOutOfRange {
            key: key.to_string(),
            value_type,
            value: default_value.to_string(),
        });
    }

    if flags.contains(AttributeFlags::NOTIFY_ONLY) && value_type != ValueType::Bool {
        return Err(ConfigurationError::NotifyOnlyNotBool {
            key: key.to_string(),
            value_type,
        });
    }

    Ok(())
}

fn bounds_ordered(ranges: &AttributeRanges) -> bool {
    match (ranges.min, ranges.max) {
        (RangeBound::Integer(min), RangeBound::Integer(max)) => min <= max,
        (min, max) => min.as_f64() <= max.as_f64(),
    }
}

/// An attribute as owned by its node.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    value: Value,
    ranges: AttributeRanges,
    flags: AttributeFlags,
    description: String,
}

impl Attribute {
    pub(crate) fn new(
        value: Value,
        ranges: AttributeRanges,
        flags: AttributeFlags,
        description: &str,
    ) -> Self {
        Self {
            value,
            ranges,
            flags,
            description: description.to_string(),
        }
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn value_type(&self) -> ValueType {
        self.value.value_type()
    }

    pub fn ranges(&self) -> AttributeRanges {
        self.ranges
    }

    pub fn flags(&self) -> AttributeFlags {
        self.flags
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub(crate) fn set_value(&mut self, value: Value) {
        self.value = value;
    }

    /// Re-declaration: metadata always follows the newest definition.
    pub(crate) fn redefine(
        &mut self,
        ranges: AttributeRanges,
        flags: AttributeFlags,
        description: &str,
    ) {
        self.ranges = ranges;
        self.flags = flags;
        self.description = description.to_string();
    }
}
