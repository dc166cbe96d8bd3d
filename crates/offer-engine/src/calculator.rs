//! Offer calculator: recalculation and validation side by side
//!
//! Validation never blocks recalculation; both results come back together
//! for the preview and export layers.

use offer_core::{CalculationContext, FeeSchedule, InputValues, OfferResult};
use offer_locks::LockState;
use offer_registry::{standard_registry, FieldRegistry};
use offer_validation::{PaymentMilestone, ValidationIssue, ValidationProfile, Validator};
use serde::{Deserialize, Serialize};

use crate::derived::DerivedValueMap;
use crate::engine::RecalculationEngine;

/// Everything the form/session layer hands over for one offer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferSnapshot {
    pub context: CalculationContext,
    #[serde(default)]
    pub inputs: InputValues,
    #[serde(default)]
    pub locks: LockState,
    #[serde(default)]
    pub payment_plan: Vec<PaymentMilestone>,
}

impl OfferSnapshot {
    pub fn new(context: CalculationContext, inputs: InputValues) -> Self {
        Self {
            context,
            inputs,
            ..Self::default()
        }
    }

    pub fn with_locks(mut self, locks: LockState) -> Self {
        self.locks = locks;
        self
    }

    pub fn with_payment_plan(mut self, plan: Vec<PaymentMilestone>) -> Self {
        self.payment_plan = plan;
        self
    }

    pub fn from_json(json: &str) -> OfferResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Computed values plus advisory findings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferEvaluation {
    pub context: CalculationContext,
    pub values: DerivedValueMap,
    pub issues: Vec<ValidationIssue>,
    pub fingerprint: String,
}

impl OfferEvaluation {
    pub fn has_warnings(&self) -> bool {
        offer_validation::has_warnings(&self.issues)
    }
}

#[derive(Debug, Clone)]
pub struct OfferCalculator<'r> {
    engine: RecalculationEngine<'r>,
    validator: Validator,
}

impl OfferCalculator<'static> {
    /// Standard registry, default fee schedule, default validation profile
    pub fn standard() -> Self {
        Self::new(standard_registry())
    }
}

impl<'r> OfferCalculator<'r> {
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self {
            engine: RecalculationEngine::new(registry),
            validator: Validator::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: FeeSchedule) -> Self {
        self.engine = self.engine.with_schedule(schedule);
        self
    }

    pub fn with_profile(mut self, profile: ValidationProfile) -> Self {
        self.validator = Validator::new(profile);
        self
    }

    pub fn engine(&self) -> &RecalculationEngine<'r> {
        &self.engine
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn recalculate(
        &self,
        inputs: &InputValues,
        locks: &LockState,
        ctx: &CalculationContext,
    ) -> OfferResult<DerivedValueMap> {
        self.engine.recalculate(inputs, locks, ctx)
    }

    pub fn validate(
        &self,
        ctx: &CalculationContext,
        plan: &[PaymentMilestone],
    ) -> Vec<ValidationIssue> {
        self.validator.validate(ctx, plan)
    }

    pub fn evaluate(&self, snapshot: &OfferSnapshot) -> OfferResult<OfferEvaluation> {
        let issues = self.validate(&snapshot.context, &snapshot.payment_plan);
        let values = self.recalculate(&snapshot.inputs, &snapshot.locks, &snapshot.context)?;
        let fingerprint = values.fingerprint();

        Ok(OfferEvaluation {
            context: snapshot.context,
            values,
            issues,
            fingerprint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offer_core::keys::*;
    use offer_core::{FieldId, UnitType};
    use offer_validation::IssueCode;

    #[test]
    fn test_evaluate_keeps_values_when_plan_mismatches() {
        let inputs = InputValues::new()
            .with(SELLING_PRICE, 2_500_000.0)
            .with(ORIGINAL_PRICE, 2_118_940.0);
        let plan = [10.0, 10.0, 10.0, 65.0].into_iter().map(PaymentMilestone::new).collect();
        let snapshot = OfferSnapshot::new(CalculationContext::offplan(UnitType::Standard), inputs)
            .with_payment_plan(plan);

        let evaluation = OfferCalculator::standard().evaluate(&snapshot).unwrap();

        assert!(evaluation.has_warnings());
        assert_eq!(evaluation.issues[0].code, IssueCode::PaymentPlanMismatch);
        assert_eq!(evaluation.values.get(FieldId::Premium), Some(381_060.0));
        assert_eq!(evaluation.fingerprint, evaluation.values.fingerprint());
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "context": {"category": "ready", "unitType": "standard"},
            "inputs": {"sellingPrice": "AED 3,500,000", "adminFees": 5250}
        }"#;
        let snapshot = OfferSnapshot::from_json(json).unwrap();
        assert!(snapshot.locks.is_empty());
        assert!(snapshot.payment_plan.is_empty());

        let evaluation = OfferCalculator::standard().evaluate(&snapshot).unwrap();
        assert_eq!(evaluation.values.get(FieldId::TotalInitialPayment), Some(3_648_750.0));
        assert!(evaluation.issues.is_empty());
    }

    #[test]
    fn test_snapshot_cannot_pin_the_total() {
        let json = r#"{
            "context": {"category": "ready", "unitType": "standard"},
            "inputs": {"sellingPrice": 3500000, "adminFees": 5250},
            "locks": {"totalInitialPayment": {"locked": true, "overrideValue": 1}}
        }"#;
        let snapshot = OfferSnapshot::from_json(json).unwrap();
        assert!(snapshot.locks.is_locked(FieldId::TotalInitialPayment));

        let evaluation = OfferCalculator::standard().evaluate(&snapshot).unwrap();
        assert_eq!(evaluation.values.get(FieldId::TotalInitialPayment), Some(3_648_750.0));
    }
}
