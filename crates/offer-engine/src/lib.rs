//! Offer Engine: derived-field recalculation for sales offers
//!
//! Given the raw inputs of an offer, the user's lock overrides and the
//! offer's category/unit type, the engine resolves every derived field in
//! dependency order and returns one value per active field.
//!
//! # Example
//!
//! ```
//! use offer_core::{keys, CalculationContext, FieldId, InputValues, UnitType};
//! use offer_engine::calculate;
//! use offer_locks::LockState;
//!
//! let inputs = InputValues::new()
//!     .with(keys::SELLING_PRICE, 3_500_000.0)
//!     .with(keys::ADMIN_FEES, 5_250.0);
//!
//! let values = calculate(&inputs, &LockState::new(), &CalculationContext::ready(UnitType::Standard)).unwrap();
//! assert_eq!(values.get(FieldId::TotalInitialPayment), Some(3_648_750.0));
//! ```

pub mod calculator;
pub mod derived;
pub mod engine;

pub use calculator::{OfferCalculator, OfferEvaluation, OfferSnapshot};
pub use derived::DerivedValueMap;
pub use engine::RecalculationEngine;

use offer_core::{CalculationContext, InputValues, OfferResult};
use offer_locks::LockState;
use offer_registry::standard_registry;

/// Recalculate with the standard registry and default fee schedule
pub fn calculate(
    inputs: &InputValues,
    locks: &LockState,
    ctx: &CalculationContext,
) -> OfferResult<DerivedValueMap> {
    RecalculationEngine::new(standard_registry()).recalculate(inputs, locks, ctx)
}

/// Recalculate and validate a full snapshot with standard settings
pub fn evaluate(snapshot: &OfferSnapshot) -> OfferResult<OfferEvaluation> {
    OfferCalculator::standard().evaluate(snapshot)
}
