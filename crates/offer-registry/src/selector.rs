//! Formula Set Selector
//!
//! Stateless lookup `(context, field) -> FieldDefinition`: the exact
//! `(category, unit_type)` row wins, else the category's `standard` row.
//! Nothing is cached between calls, so switching category or unit type
//! mid-session can never leave a stale selection behind.
use offer_core::{CalculationContext, FieldId, OfferError, OfferResult, UnitType};

use crate::field::FieldDefinition;
use crate::field_registry::FieldRegistry;

#[derive(Debug, Clone, Copy)]
pub struct FormulaSelector<'r> {
    registry: &'r FieldRegistry,
}

impl<'r> FormulaSelector<'r> {
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self { registry }
    }

    /// Active definition of `id` for `ctx`.
    ///
    /// `UnsupportedContext` means the registry is missing a row the active
    /// category needs; it is a configuration bug, not a user error.
    pub fn select(&self, ctx: &CalculationContext, id: FieldId) -> OfferResult<&'r FieldDefinition> {
        self.registry.spec(id)?;

        self.registry
            .definition(ctx.category, ctx.unit_type, id)
            .or_else(|| self.registry.definition(ctx.category, UnitType::Standard, id))
            .ok_or(OfferError::UnsupportedContext {
                category: ctx.category,
                unit_type: ctx.unit_type,
                field: id,
            })
    }

    /// Fields present in an offer for `ctx`, in dependency order
    pub fn active_fields(&self, ctx: &CalculationContext) -> Vec<FieldId> {
        self.registry
            .order()
            .iter()
            .copied()
            .filter(|id| {
                self.registry
                    .spec(*id)
                    .map(|spec| spec.is_active(ctx))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Active definitions for `ctx`, in evaluation order
    pub fn plan(&self, ctx: &CalculationContext) -> OfferResult<Vec<&'r FieldDefinition>> {
        self.active_fields(ctx)
            .into_iter()
            .map(|id| self.select(ctx, id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldSpec, Formula, FormulaScope};
    use offer_core::Category;

    fn registry() -> FieldRegistry {
        FieldRegistry::standard().unwrap()
    }

    #[test]
    fn test_exact_variant_preferred() {
        let registry = registry();
        let selector = FormulaSelector::new(&registry);

        let plot = selector
            .select(&CalculationContext::offplan(UnitType::Plot), FieldId::TotalArea)
            .unwrap();
        assert_eq!(plot.unit_type, UnitType::Plot);

        let standard = selector
            .select(&CalculationContext::offplan(UnitType::Standard), FieldId::TotalArea)
            .unwrap();
        assert_eq!(standard.unit_type, UnitType::Standard);
    }

    #[test]
    fn test_falls_back_to_standard_row() {
        let registry = registry();
        let selector = FormulaSelector::new(&registry);

        let refund = selector
            .select(&CalculationContext::offplan(UnitType::Villa), FieldId::Refund)
            .unwrap();
        assert_eq!(refund.category, Category::Offplan);
        assert_eq!(refund.unit_type, UnitType::Standard);
    }

    #[test]
    fn test_category_switches_total_formula() {
        let registry = registry();
        let selector = FormulaSelector::new(&registry);

        let offplan = selector
            .select(&CalculationContext::offplan(UnitType::Standard), FieldId::TotalInitialPayment)
            .unwrap();
        let ready = selector
            .select(&CalculationContext::ready(UnitType::Standard), FieldId::TotalInitialPayment)
            .unwrap();

        assert!(offplan.depends_on.contains(&FieldId::Premium));
        assert!(!ready.depends_on.contains(&FieldId::Premium));
        assert!(!ready.depends_on.contains(&FieldId::Refund));
    }

    #[test]
    fn test_primary_definition_is_not_context_aware() {
        let registry = registry();
        let selector = FormulaSelector::new(&registry);

        let primary = registry.get_field(FieldId::AdgmFee).unwrap();
        assert_eq!(primary.category, Category::Offplan);

        let ready = selector
            .select(&CalculationContext::ready(UnitType::Standard), FieldId::AdgmFee)
            .unwrap();
        assert_eq!(ready.category, Category::Ready);
        assert_ne!(ready.reads, primary.reads);
    }

    #[test]
    fn test_active_fields_by_context() {
        let registry = registry();
        let selector = FormulaSelector::new(&registry);

        let offplan = selector.active_fields(&CalculationContext::offplan(UnitType::Standard));
        assert!(offplan.contains(&FieldId::Premium));
        assert!(offplan.contains(&FieldId::TotalArea));
        assert!(!offplan.contains(&FieldId::BuiltUpArea));

        let ready = selector.active_fields(&CalculationContext::ready(UnitType::Standard));
        for gone in [FieldId::Refund, FieldId::BalanceResaleClause, FieldId::Premium] {
            assert!(!ready.contains(&gone), "{} should be inactive for ready units", gone);
        }

        let villa = selector.active_fields(&CalculationContext::ready(UnitType::Villa));
        assert!(villa.contains(&FieldId::BuiltUpArea));
        assert!(!villa.contains(&FieldId::TotalArea));
    }

    #[test]
    fn test_plan_covers_every_context() {
        let registry = registry();
        let selector = FormulaSelector::new(&registry);

        for category in [Category::Offplan, Category::Ready] {
            for unit_type in [UnitType::Standard, UnitType::Villa, UnitType::Plot] {
                let ctx = CalculationContext::new(category, unit_type);
                let plan = selector.plan(&ctx).unwrap();
                assert_eq!(plan.len(), selector.active_fields(&ctx).len());
                assert_eq!(plan.last().unwrap().id, FieldId::TotalInitialPayment);
            }
        }
    }

    #[test]
    fn test_missing_row_is_unsupported() {
        fn zero(_: &FormulaScope<'_>) -> f64 {
            0.0
        }

        let registry = FieldRegistry::builder()
            .field(FieldSpec::currency(FieldId::AgencyFee))
            .formula(Formula {
                field: FieldId::AgencyFee,
                category: Category::Offplan,
                unit_type: UnitType::Standard,
                depends_on: &[],
                reads: &[],
                compute: zero,
            })
            .build()
            .unwrap();
        let selector = FormulaSelector::new(&registry);

        let ctx = CalculationContext::ready(UnitType::Villa);
        assert_eq!(
            selector.select(&ctx, FieldId::AgencyFee).unwrap_err(),
            OfferError::UnsupportedContext {
                category: Category::Ready,
                unit_type: UnitType::Villa,
                field: FieldId::AgencyFee,
            }
        );
        assert!(selector.plan(&ctx).is_err());
    }
}
