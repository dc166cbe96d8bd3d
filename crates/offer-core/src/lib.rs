//! Offer Core: ids, inputs, context, fee schedule and the error model
//!
//! Shared vocabulary of the sales offer engine. Nothing here computes a
//! derived field; see `offer-registry` and `offer-engine` for that.

pub mod config;
pub mod context;
pub mod data_model;
pub mod error;
pub mod ids;
pub mod normalizer;

pub use config::{FeeSchedule, RegistrationDefaults};
pub use context::{CalculationContext, Category, UnitType};
pub use data_model::{InputValue, InputValues, ValueKind};
pub use error::{OfferError, OfferResult};
pub use ids::{keys, FieldId};

/// Engine version stamped into fingerprints
pub const ENGINE_VERSION: &str = "1.0.0";
