//! Unified Error Model
//!
//! Every variant here is a programming error: a wrong field id, a lock on a
//! field that cannot be overridden, or a registry that is missing a formula.
//! Malformed user numbers never reach this type; they degrade to zero.
use thiserror::Error;

use crate::context::{Category, UnitType};
use crate::ids::FieldId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OfferError {
    #[error("FIELD/UNKNOWN: {0}")]
    UnknownField(String),

    #[error("LOCK/NOT_LOCKABLE: {0}")]
    NotLockable(FieldId),

    #[error("SELECT/UNSUPPORTED: no formula for {field} in {category}/{unit_type}")]
    UnsupportedContext {
        category: Category,
        unit_type: UnitType,
        field: FieldId,
    },

    #[error("REGISTRY/CYCLE: {0}")]
    DependencyCycle(String),

    #[error("REGISTRY/INVALID: {0}")]
    InvalidRegistry(String),

    #[error("CONTEXT/{0}")]
    InvalidContext(String),

    #[error("CONFIG/{0}")]
    Config(String),

    #[error("SERIALIZE/{0}")]
    Serialize(String),
}

impl From<serde_json::Error> for OfferError {
    fn from(e: serde_json::Error) -> Self {
        OfferError::Serialize(e.to_string())
    }
}

impl From<serde_yaml::Error> for OfferError {
    fn from(e: serde_yaml::Error) -> Self {
        OfferError::Config(e.to_string())
    }
}

pub type OfferResult<T> = Result<T, OfferError>;
