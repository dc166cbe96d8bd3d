//! Stable identifiers for derived fields and raw inputs.
//!
//! Field ids serialize to the camelCase names the form layer and the
//! persisted lock state use (`totalArea`, `adgmFee`, ...).
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OfferError;

/// A field the engine can produce a value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    TotalArea,
    BuiltUpArea,
    Refund,
    BalanceResaleClause,
    Premium,
    AdgmFee,
    AgencyFee,
    AdgmTermination,
    AdgmElectronic,
    TotalInitialPayment,
}

impl FieldId {
    pub const ALL: [FieldId; 10] = [
        FieldId::TotalArea,
        FieldId::BuiltUpArea,
        FieldId::Refund,
        FieldId::BalanceResaleClause,
        FieldId::Premium,
        FieldId::AdgmFee,
        FieldId::AgencyFee,
        FieldId::AdgmTermination,
        FieldId::AdgmElectronic,
        FieldId::TotalInitialPayment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FieldId::TotalArea => "totalArea",
            FieldId::BuiltUpArea => "builtUpArea",
            FieldId::Refund => "refund",
            FieldId::BalanceResaleClause => "balanceResaleClause",
            FieldId::Premium => "premium",
            FieldId::AdgmFee => "adgmFee",
            FieldId::AgencyFee => "agencyFee",
            FieldId::AdgmTermination => "adgmTermination",
            FieldId::AdgmElectronic => "adgmElectronic",
            FieldId::TotalInitialPayment => "totalInitialPayment",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldId {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s.trim())
            .ok_or_else(|| OfferError::UnknownField(s.to_string()))
    }
}

/// Raw input keys supplied by the form layer.
pub mod keys {
    pub const ORIGINAL_PRICE: &str = "originalPrice";
    pub const SELLING_PRICE: &str = "sellingPrice";
    pub const INTERNAL_AREA: &str = "internalArea";
    pub const BALCONY_AREA: &str = "balconyArea";
    pub const PLOT_AREA: &str = "plotArea";
    pub const VILLA_INTERNAL_AREA: &str = "villaInternalArea";
    pub const VILLA_TERRACE_AREA: &str = "villaTerraceArea";
    pub const AMOUNT_PAID_AED: &str = "amountPaidAED";
    pub const AMOUNT_PAID_PERCENT: &str = "amountPaidPercent";
    pub const RESALE_CLAUSE_PERCENT: &str = "resaleClausePercent";
    pub const ADMIN_FEES: &str = "adminFees";
    pub const ADGM_TERMINATION: &str = "adgmTermination";
    pub const ADGM_ELECTRONIC: &str = "adgmElectronic";
}
