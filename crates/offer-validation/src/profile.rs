//! Validation profiles
//!
//! Thresholds for the advisory checks. The default profile matches what the
//! offer form has always enforced; a profile can be loaded from YAML.

use offer_core::{Category, OfferResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationProfile {
    /// Profile name (e.g., "standard@1.0")
    pub name: String,

    // === Payment Plan ===

    /// Sum the milestone percentages must reach
    pub expected_plan_total: f64,

    /// Allowed distance from the expected total, in percentage points
    pub plan_tolerance: f64,

    /// Categories whose offers carry a payment plan to reconcile
    pub plan_categories: Vec<Category>,

    /// Scale spreadsheet fractions (0.1) to whole percentages (10)
    pub normalize_fractional_percentages: bool,
}

impl Default for ValidationProfile {
    fn default() -> Self {
        Self {
            name: "standard@1.0".to_string(),
            expected_plan_total: 100.0,
            plan_tolerance: 0.5,
            plan_categories: vec![Category::Offplan],
            normalize_fractional_percentages: true,
        }
    }
}

impl ValidationProfile {
    /// Profile that takes percentages exactly as given
    pub fn strict() -> Self {
        Self {
            name: "strict@1.0".to_string(),
            plan_tolerance: 0.01,
            normalize_fractional_percentages: false,
            ..Self::default()
        }
    }

    /// Load profile from YAML
    pub fn from_yaml(yaml: &str) -> OfferResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn checks_plan_for(&self, category: Category) -> bool {
        self.plan_categories.contains(&category)
    }
}
