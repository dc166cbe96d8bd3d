//! Offer Locks: manual per-field overrides
//!
//! A locked field keeps the user's value through every recalculation but
//! still feeds the formulas downstream of it.
//!
//! # Example
//!
//! ```
//! use offer_core::FieldId;
//! use offer_locks::{LockState, LockStore};
//! use offer_registry::standard_registry;
//!
//! let mut locks = LockStore::new(standard_registry());
//! locks.lock(FieldId::Premium, 0.0).unwrap();
//! assert!(locks.is_locked(FieldId::Premium));
//!
//! // Persist between sessions
//! let json = locks.state().to_json().unwrap();
//! let restored = LockStore::with_state(standard_registry(), LockState::from_json(&json).unwrap()).unwrap();
//! assert!(restored.is_locked(FieldId::Premium));
//! ```

pub mod lock_state;
pub mod store;

pub use lock_state::{LockEntry, LockState};
pub use store::{LockAction, LockEvent, LockStats, LockStore};
