//! Offer Validation: advisory cross-field checks
//!
//! Findings are data, not errors. The caller shows them as warnings and
//! keeps working with the computed values.
//!
//! # Example
//!
//! ```
//! use offer_core::{CalculationContext, UnitType};
//! use offer_validation::{validate, IssueCode, PaymentMilestone};
//!
//! let plan: Vec<_> = [10.0, 10.0, 10.0, 65.0].into_iter().map(PaymentMilestone::new).collect();
//! let issues = validate(&CalculationContext::offplan(UnitType::Standard), &plan);
//!
//! assert_eq!(issues[0].code, IssueCode::PaymentPlanMismatch);
//! assert_eq!(issues[0].observed, Some(95.0));
//! ```

pub mod issue;
pub mod profile;
pub mod validator;

pub use issue::{
    IssueCode, IssueSeverity, PaymentMilestone, ValidationIssue, PAYMENT_PLAN_FIELD,
};
pub use profile::ValidationProfile;
pub use validator::Validator;

use offer_core::CalculationContext;

/// Validate with the default profile
pub fn validate(ctx: &CalculationContext, plan: &[PaymentMilestone]) -> Vec<ValidationIssue> {
    Validator::default().validate(ctx, plan)
}

/// Whether any finding is a warning rather than an informational note
pub fn has_warnings(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|i| i.severity == IssueSeverity::Warning)
}
