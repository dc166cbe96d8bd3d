//! Derived value map: the engine's output
use offer_core::{FieldId, OfferResult, ENGINE_VERSION};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write;

/// One value per field active for the context, keyed by stable id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DerivedValueMap {
    values: BTreeMap<FieldId, f64>,
}

impl DerivedValueMap {
    pub fn get(&self, id: FieldId) -> Option<f64> {
        self.values.get(&id).copied()
    }

    pub fn contains(&self, id: FieldId) -> bool {
        self.values.contains_key(&id)
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.values.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, f64)> + '_ {
        self.values.iter().map(|(id, v)| (*id, *v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn to_json(&self) -> OfferResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Content hash over exact bit patterns. Equal maps hash equal; any
    /// change to a single value changes it.
    pub fn fingerprint(&self) -> String {
        let mut canonical = format!("offer-engine@{};", ENGINE_VERSION);
        for (id, value) in &self.values {
            let _ = write!(canonical, "{}={:016x};", id, value.to_bits());
        }
        format!("blake3:{}", blake3::hash(canonical.as_bytes()))
    }
}

impl From<BTreeMap<FieldId, f64>> for DerivedValueMap {
    fn from(values: BTreeMap<FieldId, f64>) -> Self {
        Self { values }
    }
}
