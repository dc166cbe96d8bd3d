//! Fee schedule: rates and registration defaults read by the formulas
//!
//! Defaults reproduce the current Abu Dhabi resale schedule. A schedule can
//! be loaded from YAML; missing keys fall back to these defaults.

use serde::{Deserialize, Serialize};

use crate::context::Category;
use crate::error::OfferResult;

/// Fixed ADGM registration charges that the user may override.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegistrationDefaults {
    /// Termination of the original sale contract
    pub termination: f64,
    /// Electronic service charge
    pub electronic: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeSchedule {
    /// ADGM registration rate applied to the registered contract value
    pub adgm_rate: f64,

    /// Agency commission rate on the selling price, before VAT
    pub agency_rate: f64,

    /// VAT charged on the agency commission
    pub vat_rate: f64,

    /// Registration charges for off-plan resales
    pub offplan_registration: RegistrationDefaults,

    /// Registration charges for ready properties. There is no developer
    /// contract to terminate, so both default to zero.
    pub ready_registration: RegistrationDefaults,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            adgm_rate: 0.02,
            agency_rate: 0.02,
            vat_rate: 0.05,
            offplan_registration: RegistrationDefaults {
                termination: 505.0,
                electronic: 525.0,
            },
            ready_registration: RegistrationDefaults {
                termination: 0.0,
                electronic: 0.0,
            },
        }
    }
}

impl FeeSchedule {
    pub fn registration(&self, category: Category) -> &RegistrationDefaults {
        match category {
            Category::Offplan => &self.offplan_registration,
            Category::Ready => &self.ready_registration,
        }
    }

    /// Agency commission multiplier including VAT (0.02 * 1.05 by default)
    pub fn agency_multiplier(&self) -> f64 {
        self.agency_rate * (1.0 + self.vat_rate)
    }

    /// Load schedule from YAML
    pub fn from_yaml(yaml: &str) -> OfferResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn to_yaml(&self) -> OfferResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
