//! Data Model: raw input values and value kinds
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::OfferResult;
use crate::normalizer::{finite_or_zero, parse_number, round_half_up};

/// A raw value as supplied by the form, a spreadsheet import or JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Number(f64),
    Text(String),
    Flag(bool),
    Empty,
}

impl InputValue {
    /// The numeric reading of this value, if it has one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            InputValue::Number(n) if n.is_finite() => Some(*n),
            InputValue::Number(_) => None,
            InputValue::Text(s) => parse_number(s),
            InputValue::Flag(_) | InputValue::Empty => None,
        }
    }
}

impl From<f64> for InputValue {
    fn from(n: f64) -> Self {
        InputValue::Number(n)
    }
}

impl From<i64> for InputValue {
    fn from(n: i64) -> Self {
        InputValue::Number(n as f64)
    }
}

impl From<&str> for InputValue {
    fn from(s: &str) -> Self {
        InputValue::Text(s.to_string())
    }
}

impl From<String> for InputValue {
    fn from(s: String) -> Self {
        InputValue::Text(s)
    }
}

/// Raw inputs keyed by stable input id. Owned by the caller; the engine
/// only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputValues {
    values: BTreeMap<String, InputValue>,
}

impl InputValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<InputValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<InputValue> {
        self.values.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&InputValue> {
        self.values.get(key)
    }

    /// Numeric value for `key`; absent or unparseable input reads as `0`.
    pub fn number(&self, key: &str) -> f64 {
        self.supplied(key).unwrap_or(0.0)
    }

    /// Numeric value for `key` only when the user actually supplied one.
    pub fn supplied(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(InputValue::as_number)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &InputValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn from_json(json: &str) -> OfferResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl<K: Into<String>, V: Into<InputValue>> FromIterator<(K, V)> for InputValues {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = InputValues::new();
        for (k, v) in iter {
            values.set(k, v);
        }
        values
    }
}

/// What a derived number measures. Decides rounding at storage time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueKind {
    Currency,
    Area,
}

impl ValueKind {
    /// Prepare a computed value for the output map. Currency is rounded to
    /// whole units; areas keep their precision.
    pub fn store(self, value: f64) -> f64 {
        let value = finite_or_zero(value);
        match self {
            ValueKind::Currency => round_half_up(value),
            ValueKind::Area => value,
        }
    }
}
