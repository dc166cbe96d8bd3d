//! Lock store
//!
//! Gatekeeper for manual overrides. Checks lockability against the field
//! registry, keeps the caller's `LockState`, and records a bounded history
//! of lock actions.

use chrono::{DateTime, Utc};
use offer_core::normalizer::finite_or_zero;
use offer_core::{FieldId, OfferError, OfferResult};
use offer_registry::FieldRegistry;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::lock_state::{LockEntry, LockState};

/// What happened to a lock
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockAction {
    Locked,
    Unlocked,
    Cleared,
    Restored,
}

/// History entry for a lock action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockEvent {
    pub at: DateTime<Utc>,
    pub action: LockAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<FieldId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
}

/// Lock statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockStats {
    pub active: usize,
    pub events: usize,
    pub by_action: HashMap<LockAction, usize>,
}

pub struct LockStore<'r> {
    registry: &'r FieldRegistry,
    state: LockState,
    history: Vec<LockEvent>,
    max_history: usize,
}

impl<'r> LockStore<'r> {
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self {
            registry,
            state: LockState::new(),
            history: Vec::new(),
            max_history: 500,
        }
    }

    /// Start from persisted state. Every entry must name a lockable field.
    pub fn with_state(registry: &'r FieldRegistry, state: LockState) -> OfferResult<Self> {
        let mut store = Self::new(registry);
        store.restore(state)?;
        Ok(store)
    }

    pub fn with_max_history(mut self, max: usize) -> Self {
        self.max_history = max;
        self
    }

    /// Override `id` with `value`. Non-finite values are stored as zero.
    pub fn lock(&mut self, id: FieldId, value: f64) -> OfferResult<()> {
        self.ensure_lockable(id)?;

        let value = finite_or_zero(value);
        self.state.set(
            id,
            LockEntry {
                locked: true,
                override_value: value,
            },
        );
        tracing::debug!(field = %id, value, "field locked");
        self.record(LockAction::Locked, Some(id), Some(value));
        Ok(())
    }

    pub fn lock_by_name(&mut self, name: &str, value: f64) -> OfferResult<()> {
        self.lock(name.parse()?, value)
    }

    /// Release `id`; returns whether it was locked. The last override
    /// value is kept so the field can be re-locked with it.
    pub fn unlock(&mut self, id: FieldId) -> OfferResult<bool> {
        self.ensure_lockable(id)?;

        let was_locked = self.state.release(id);
        if was_locked {
            tracing::debug!(field = %id, "field unlocked");
            self.record(LockAction::Unlocked, Some(id), None);
        }
        Ok(was_locked)
    }

    pub fn unlock_by_name(&mut self, name: &str) -> OfferResult<bool> {
        self.unlock(name.parse()?)
    }

    pub fn is_locked(&self, id: FieldId) -> bool {
        self.state.is_locked(id)
    }

    /// Drop every lock (form cleared, another offer or template loaded)
    pub fn clear(&mut self) {
        let dropped = self.state.locked_count();
        self.state.clear();
        tracing::info!(dropped, "lock state cleared");
        self.record(LockAction::Cleared, None, None);
    }

    /// Replace the current state with a persisted one. On error the
    /// current state is left untouched.
    pub fn restore(&mut self, state: LockState) -> OfferResult<()> {
        for (id, _) in state.entries() {
            self.ensure_lockable(id)?;
        }

        tracing::info!(locked = state.locked_count(), "lock state restored");
        self.state = state;
        self.record(LockAction::Restored, None, None);
        Ok(())
    }

    /// Current state, passed by reference into recalculation
    pub fn state(&self) -> &LockState {
        &self.state
    }

    pub fn into_state(self) -> LockState {
        self.state
    }

    pub fn history(&self) -> &[LockEvent] {
        &self.history
    }

    pub fn stats(&self) -> LockStats {
        let by_action = self
            .history
            .iter()
            .fold(HashMap::new(), |mut acc, e| {
                *acc.entry(e.action).or_insert(0) += 1;
                acc
            });

        LockStats {
            active: self.state.locked_count(),
            events: self.history.len(),
            by_action,
        }
    }

    fn ensure_lockable(&self, id: FieldId) -> OfferResult<()> {
        if self.registry.is_lockable(id)? {
            Ok(())
        } else {
            Err(OfferError::NotLockable(id))
        }
    }

    fn record(&mut self, action: LockAction, field: Option<FieldId>, value: Option<f64>) {
        self.history.push(LockEvent {
            at: Utc::now(),
            action,
            field,
            value,
        });

        if self.history.len() > self.max_history {
            self.history.drain(0..self.history.len() - self.max_history);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offer_registry::standard_registry;

    #[test]
    fn test_lock_and_unlock() {
        let mut store = LockStore::new(standard_registry());

        store.lock(FieldId::Premium, 0.0).unwrap();
        assert!(store.is_locked(FieldId::Premium));
        assert_eq!(store.state().override_value(FieldId::Premium), Some(0.0));

        assert!(store.unlock(FieldId::Premium).unwrap());
        assert!(!store.is_locked(FieldId::Premium));
        assert!(!store.unlock(FieldId::Premium).unwrap());
    }

    #[test]
    fn test_not_lockable() {
        let mut store = LockStore::new(standard_registry());

        assert_eq!(
            store.lock(FieldId::TotalInitialPayment, 1.0).unwrap_err(),
            OfferError::NotLockable(FieldId::TotalInitialPayment)
        );
        assert_eq!(
            store.unlock(FieldId::BuiltUpArea).unwrap_err(),
            OfferError::NotLockable(FieldId::BuiltUpArea)
        );
        assert!(store.state().is_empty());
    }

    #[test]
    fn test_lock_by_name() {
        let mut store = LockStore::new(standard_registry());

        store.lock_by_name("agencyFee", 45_000.0).unwrap();
        assert!(store.is_locked(FieldId::AgencyFee));

        assert!(matches!(
            store.lock_by_name("serviceCharge", 1.0),
            Err(OfferError::UnknownField(_))
        ));
        assert!(store.unlock_by_name("agencyFee").unwrap());
    }

    #[test]
    fn test_non_finite_override_degrades_to_zero() {
        let mut store = LockStore::new(standard_registry());
        store.lock(FieldId::AdgmFee, f64::NAN).unwrap();
        assert_eq!(store.state().override_value(FieldId::AdgmFee), Some(0.0));
    }

    #[test]
    fn test_relock_replaces_value() {
        let mut store = LockStore::new(standard_registry());
        store.lock(FieldId::Refund, 100.0).unwrap();
        store.lock(FieldId::Refund, 250.0).unwrap();
        assert_eq!(store.state().override_value(FieldId::Refund), Some(250.0));
        assert_eq!(store.state().locked_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut store = LockStore::new(standard_registry());
        store.lock(FieldId::Refund, 1.0).unwrap();
        store.lock(FieldId::Premium, 2.0).unwrap();

        store.clear();
        assert!(store.state().is_empty());
        assert!(!store.is_locked(FieldId::Refund));
    }

    #[test]
    fn test_persistence_roundtrip() {
        let mut store = LockStore::new(standard_registry());
        store.lock(FieldId::Premium, -25_000.0).unwrap();
        store.lock(FieldId::TotalArea, 1250.5).unwrap();
        store.lock(FieldId::AgencyFee, 1.0).unwrap();
        store.unlock(FieldId::AgencyFee).unwrap();

        let json = store.state().to_json().unwrap();
        let restored =
            LockStore::with_state(standard_registry(), LockState::from_json(&json).unwrap()).unwrap();

        assert_eq!(restored.state(), store.state());
        assert!(restored.is_locked(FieldId::Premium));
        assert!(!restored.is_locked(FieldId::AgencyFee));
        assert_eq!(restored.state().override_value(FieldId::TotalArea), Some(1250.5));
    }

    #[test]
    fn test_restore_rejects_non_lockable_entries() {
        let json = r#"{"totalInitialPayment":{"locked":true,"overrideValue":1}}"#;
        let state = LockState::from_json(json).unwrap();

        let mut store = LockStore::new(standard_registry());
        store.lock(FieldId::Premium, 5.0).unwrap();

        assert_eq!(
            store.restore(state).unwrap_err(),
            OfferError::NotLockable(FieldId::TotalInitialPayment)
        );
        assert!(store.is_locked(FieldId::Premium));
    }

    #[test]
    fn test_history_and_stats() {
        let mut store = LockStore::new(standard_registry()).with_max_history(3);
        for i in 0..5 {
            store.lock(FieldId::Premium, i as f64).unwrap();
        }
        store.unlock(FieldId::Premium).unwrap();

        assert_eq!(store.history().len(), 3);
        assert_eq!(store.history().last().unwrap().action, LockAction::Unlocked);

        let stats = store.stats();
        assert_eq!(stats.active, 0);
        assert_eq!(stats.events, 3);
        assert_eq!(stats.by_action.get(&LockAction::Locked), Some(&2));
    }
}
