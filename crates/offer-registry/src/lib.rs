//! Offer Registry: field catalog, formula variants and selection
//!
//! The registry is declarative: `formulas.rs` holds one row per
//! `(category, unit_type, field)` variant, `FieldRegistry` checks the table
//! once, and `FormulaSelector` picks the active row for a context.
//!
//! # Example
//!
//! ```
//! use offer_core::{CalculationContext, FieldId, UnitType};
//! use offer_registry::{standard_registry, FormulaSelector};
//!
//! let registry = standard_registry();
//! assert!(registry.is_lockable(FieldId::Premium).unwrap());
//!
//! let selector = FormulaSelector::new(registry);
//! let ctx = CalculationContext::ready(UnitType::Standard);
//! assert!(!selector.active_fields(&ctx).contains(&FieldId::Premium));
//! ```

pub mod field;
pub mod field_registry;
pub mod formulas;
pub mod selector;

pub use field::{ComputeFn, FieldDefinition, FieldSpec, Formula, FormulaScope};
pub use field_registry::{FieldRegistry, RegistryBuilder};
pub use selector::FormulaSelector;

use once_cell::sync::Lazy;

static STANDARD_REGISTRY: Lazy<FieldRegistry> =
    Lazy::new(|| FieldRegistry::standard().expect("standard formula table is well-formed"));

/// Process-wide registry built from the standard formula table
pub fn standard_registry() -> &'static FieldRegistry {
    &STANDARD_REGISTRY
}
