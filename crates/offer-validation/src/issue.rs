//! Validation issues and payment plan milestones
use offer_core::InputValue;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field id used for issues about the payment plan as a whole
pub const PAYMENT_PLAN_FIELD: &str = "paymentPlan";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueCode {
    /// Milestone percentages do not add up to the expected total
    PaymentPlanMismatch,
    /// Fractional percentages were scaled to whole percentages
    PercentagesNormalized,
}

impl fmt::Display for IssueCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueCode::PaymentPlanMismatch => f.write_str("PaymentPlanMismatch"),
            IssueCode::PercentagesNormalized => f.write_str("PercentagesNormalized"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Info,
    Warning,
}

/// Advisory finding. Never alters computed values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationIssue {
    pub code: IssueCode,
    pub severity: IssueSeverity,
    pub field_ids: Vec<String>,
    pub message: String,
    /// The number that failed the check, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub observed: Option<f64>,
}

impl ValidationIssue {
    pub fn warning(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            code,
            severity: IssueSeverity::Warning,
            field_ids: Vec::new(),
            message: message.into(),
            observed: None,
        }
    }

    pub fn info(code: IssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: IssueSeverity::Info,
            ..Self::warning(code, message)
        }
    }

    pub fn on_field(mut self, field: impl Into<String>) -> Self {
        self.field_ids.push(field.into());
        self
    }

    pub fn observed(mut self, value: f64) -> Self {
        self.observed = Some(value);
        self
    }
}

/// One row of the developer's payment plan. Only the percentage matters
/// to validation; it is read permissively like any other input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentMilestone {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub percentage: InputValue,
}

impl PaymentMilestone {
    pub fn new(percentage: impl Into<InputValue>) -> Self {
        Self {
            label: None,
            percentage: percentage.into(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Percentage as a number, `0` when blank or malformed
    pub fn percentage_value(&self) -> f64 {
        self.percentage.as_number().unwrap_or(0.0)
    }
}
