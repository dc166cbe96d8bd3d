//! Validator: cross-field consistency checks
//!
//! Runs beside recalculation and never blocks it. Every finding is returned
//! as data for the caller to display.

use offer_core::CalculationContext;

use crate::issue::{IssueCode, PaymentMilestone, ValidationIssue, PAYMENT_PLAN_FIELD};
use crate::profile::ValidationProfile;

#[derive(Debug, Clone, Default)]
pub struct Validator {
    profile: ValidationProfile,
}

impl Validator {
    pub fn new(profile: ValidationProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> &ValidationProfile {
        &self.profile
    }

    /// Check an offer's payment plan for `ctx`
    pub fn validate(
        &self,
        ctx: &CalculationContext,
        plan: &[PaymentMilestone],
    ) -> Vec<ValidationIssue> {
        let mut issues = Vec::new();

        if self.profile.checks_plan_for(ctx.category) {
            self.check_payment_plan(plan, &mut issues);
        }

        tracing::debug!(
            profile = %self.profile.name,
            context = %ctx,
            issues = issues.len(),
            "offer validated"
        );
        issues
    }

    /// Milestone percentages, scaled if the profile normalizes fractions.
    /// Returns the values and how many were scaled.
    ///
    /// Scaling applies only to a plan written entirely as fractions (every
    /// non-zero milestone strictly between 0 and 1), as a spreadsheet column
    /// formatted as percent delivers it. A single 0.5% milestone in an
    /// otherwise whole-percent plan is left alone.
    pub fn plan_percentages(&self, plan: &[PaymentMilestone]) -> (Vec<f64>, usize) {
        let values: Vec<f64> = plan.iter().map(PaymentMilestone::percentage_value).collect();

        let is_fraction = |p: f64| p > 0.0 && p < 1.0;
        let all_fractions = values.iter().any(|p| *p != 0.0)
            && values.iter().filter(|p| **p != 0.0).all(|p| is_fraction(*p));

        if !self.profile.normalize_fractional_percentages || !all_fractions {
            return (values, 0);
        }

        let scaled = values.iter().filter(|p| is_fraction(**p)).count();
        (values.into_iter().map(|p| p * 100.0).collect(), scaled)
    }

    fn check_payment_plan(&self, plan: &[PaymentMilestone], issues: &mut Vec<ValidationIssue>) {
        if plan.is_empty() {
            return;
        }

        let (percentages, scaled) = self.plan_percentages(plan);
        if scaled > 0 {
            issues.push(
                ValidationIssue::info(
                    IssueCode::PercentagesNormalized,
                    format!(
                        "{} payment plan percentage(s) read as fractions and scaled by 100",
                        scaled
                    ),
                )
                .on_field(PAYMENT_PLAN_FIELD),
            );
        }

        let total: f64 = percentages.iter().sum();
        let expected = self.profile.expected_plan_total;
        if (total - expected).abs() > self.profile.plan_tolerance {
            issues.push(
                ValidationIssue::warning(
                    IssueCode::PaymentPlanMismatch,
                    format!(
                        "Payment plan percentages add up to {:.2}% instead of {}%",
                        total, expected
                    ),
                )
                .on_field(PAYMENT_PLAN_FIELD)
                .observed(total),
            );
        }
    }
}
