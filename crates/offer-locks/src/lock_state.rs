//! Lock state: the persisted part of the lock store
//!
//! `{fieldId -> {locked, overrideValue}}`, serialized as JSON for the
//! storage layer. Mutation goes through `LockStore`; the engine only reads.

use offer_core::{FieldId, OfferResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Override for one field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LockEntry {
    pub locked: bool,
    pub override_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LockState {
    entries: BTreeMap<FieldId, LockEntry>,
}

impl LockState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self, id: FieldId) -> bool {
        self.entries.get(&id).map(|e| e.locked).unwrap_or(false)
    }

    /// Override value, only while the field is locked
    pub fn override_value(&self, id: FieldId) -> Option<f64> {
        self.entries
            .get(&id)
            .filter(|e| e.locked)
            .map(|e| e.override_value)
    }

    pub fn entry(&self, id: FieldId) -> Option<&LockEntry> {
        self.entries.get(&id)
    }

    pub fn entries(&self) -> impl Iterator<Item = (FieldId, &LockEntry)> {
        self.entries.iter().map(|(id, e)| (*id, e))
    }

    pub fn locked_fields(&self) -> Vec<FieldId> {
        self.entries
            .iter()
            .filter(|(_, e)| e.locked)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn locked_count(&self) -> usize {
        self.entries.values().filter(|e| e.locked).count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> OfferResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> OfferResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub(crate) fn set(&mut self, id: FieldId, entry: LockEntry) {
        self.entries.insert(id, entry);
    }

    pub(crate) fn release(&mut self, id: FieldId) -> bool {
        match self.entries.get_mut(&id) {
            Some(entry) if entry.locked => {
                entry.locked = false;
                true
            }
            _ => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_only_while_locked() {
        let mut state = LockState::new();
        state.set(
            FieldId::Premium,
            LockEntry {
                locked: true,
                override_value: 0.0,
            },
        );
        assert!(state.is_locked(FieldId::Premium));
        assert_eq!(state.override_value(FieldId::Premium), Some(0.0));

        assert!(state.release(FieldId::Premium));
        assert!(!state.is_locked(FieldId::Premium));
        assert_eq!(state.override_value(FieldId::Premium), None);
        assert_eq!(state.entry(FieldId::Premium).unwrap().override_value, 0.0);

        assert!(!state.release(FieldId::Premium));
    }

    #[test]
    fn test_json_shape() {
        let mut state = LockState::new();
        state.set(
            FieldId::AgencyFee,
            LockEntry {
                locked: true,
                override_value: 50_000.0,
            },
        );

        let json = state.to_json().unwrap();
        assert_eq!(json, r#"{"agencyFee":{"locked":true,"overrideValue":50000.0}}"#);
        assert_eq!(LockState::from_json(&json).unwrap(), state);
    }

    #[test]
    fn test_from_json_rejects_unknown_fields() {
        assert!(LockState::from_json(r#"{"serviceCharge":{"locked":true,"overrideValue":1}}"#).is_err());
    }
}
