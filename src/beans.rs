//! Core data types for the managed-bean log probe
//!
//! This module defines the fundamental data structures used throughout the
//! application for representing beans, attribute values, and the readings
//! extracted during a scan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp type for consistent time handling across the application
pub type Timestamp = DateTime<Utc>;

/// Canonical name of a managed bean
///
/// The canonical name is the fully qualified string identifier under which a
/// bean is registered, e.g. `app:type=queue,id="publish"`. Search rules match
/// against the entire canonical name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct BeanName(String);

impl BeanName {
    /// Create a bean name from its canonical string form
    pub fn new(canonical: impl Into<String>) -> Self {
        Self(canonical.into())
    }

    /// The canonical name as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BeanName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current value of a bean attribute
///
/// Attributes expose either text or primitive values; primitives are
/// rendered as strings when a reading is written to the log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AttributeValue {
    /// Signed integer value (counters, queue depths, ids)
    Integer(i64),
    /// Floating point value (rates, ratios)
    Float(f64),
    /// Boolean value (flags)
    Boolean(bool),
    /// Free-form text value
    Text(String),
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Integer(v) => write!(f, "{}", v),
            AttributeValue::Float(v) => write!(f, "{}", v),
            AttributeValue::Boolean(v) => write!(f, "{}", v),
            AttributeValue::Text(v) => f.write_str(v),
        }
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Integer(value)
    }
}

impl From<f64> for AttributeValue {
    fn from(value: f64) -> Self {
        AttributeValue::Float(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// One attribute value extracted from one bean during a scan
///
/// Readings are transient: produced by the selector, handed to the sink in
/// order, and never stored between ticks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttributeReading {
    /// Canonical name of the bean the value was read from
    pub bean: BeanName,
    /// Name of the attribute
    pub name: String,
    /// Value of the attribute at read time
    pub value: AttributeValue,
}

impl AttributeReading {
    /// Create a new reading
    pub fn new(bean: BeanName, name: impl Into<String>, value: AttributeValue) -> Self {
        Self {
            bean,
            name: name.into(),
            value,
        }
    }
}
