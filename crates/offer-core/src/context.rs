//! Calculation Context: category and unit type selecting the formula set
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::OfferError;

/// Property category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Unit still under construction, resold before handover
    #[default]
    #[serde(alias = "off-plan", alias = "offPlan")]
    Offplan,
    /// Completed, deliverable unit
    Ready,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Offplan => "offplan",
            Category::Ready => "ready",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded: String = s
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .collect::<String>()
            .to_lowercase();

        match folded.as_str() {
            "offplan" | "offplanresale" | "resale" => Ok(Category::Offplan),
            "ready" | "readyproperty" | "secondary" => Ok(Category::Ready),
            _ => Err(OfferError::InvalidContext(format!("unknown category '{}'", s))),
        }
    }
}

/// Unit type as far as the formulas care.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    /// Apartments, studios, penthouses
    #[default]
    Standard,
    /// Villas and townhouses
    Villa,
    /// Land plots
    Plot,
}

impl UnitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitType::Standard => "standard",
            UnitType::Villa => "villa",
            UnitType::Plot => "plot",
        }
    }

    /// Classify a free-text unit description ("3BR Townhouse", "Residential Plot").
    ///
    /// Anything that is not recognisably a villa/townhouse or a plot is a
    /// standard unit.
    pub fn classify(description: &str) -> Self {
        let lower = description.to_lowercase();
        if lower.contains("villa") || lower.contains("townhouse") || lower.contains("town house") {
            UnitType::Villa
        } else if lower.contains("plot") || lower.contains("land") {
            UnitType::Plot
        } else {
            UnitType::Standard
        }
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UnitType {
    type Err = OfferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "apartment" => Ok(UnitType::Standard),
            "villa" | "townhouse" => Ok(UnitType::Villa),
            "plot" | "land" => Ok(UnitType::Plot),
            _ => Err(OfferError::InvalidContext(format!("unknown unit type '{}'", s))),
        }
    }
}

/// Selects which formula variants are active. Supplied fresh on every
/// recalculation and never mutated by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationContext {
    pub category: Category,
    pub unit_type: UnitType,
}

impl CalculationContext {
    pub fn new(category: Category, unit_type: UnitType) -> Self {
        Self { category, unit_type }
    }

    pub fn offplan(unit_type: UnitType) -> Self {
        Self::new(Category::Offplan, unit_type)
    }

    pub fn ready(unit_type: UnitType) -> Self {
        Self::new(Category::Ready, unit_type)
    }

    pub fn with_unit_type(mut self, unit_type: UnitType) -> Self {
        self.unit_type = unit_type;
        self
    }
}

impl fmt::Display for CalculationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.category, self.unit_type)
    }
}
