//! Field catalog entries, formula variants and the scope formulas read from
use offer_core::{
    CalculationContext, Category, FeeSchedule, FieldId, InputValues, UnitType, ValueKind,
};
use std::collections::BTreeMap;
use std::fmt;

/// Formula body. Reads raw inputs, already-resolved upstream fields and the
/// fee schedule through the scope; never fails.
pub type ComputeFn = fn(&FormulaScope<'_>) -> f64;

/// Catalog entry: what a field is and where it applies.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub id: FieldId,
    pub kind: ValueKind,
    pub lockable: bool,
    /// Categories in which the field is part of the offer
    pub categories: &'static [Category],
    /// Unit types for which the field is part of the offer
    pub unit_types: &'static [UnitType],
}

impl FieldSpec {
    const ALL_CATEGORIES: &'static [Category] = &[Category::Offplan, Category::Ready];
    const ALL_UNITS: &'static [UnitType] = &[UnitType::Standard, UnitType::Villa, UnitType::Plot];

    pub const fn currency(id: FieldId) -> Self {
        Self {
            id,
            kind: ValueKind::Currency,
            lockable: false,
            categories: Self::ALL_CATEGORIES,
            unit_types: Self::ALL_UNITS,
        }
    }

    pub const fn area(id: FieldId) -> Self {
        Self {
            id,
            kind: ValueKind::Area,
            lockable: false,
            categories: Self::ALL_CATEGORIES,
            unit_types: Self::ALL_UNITS,
        }
    }

    pub const fn lockable(mut self) -> Self {
        self.lockable = true;
        self
    }

    pub const fn only_in(mut self, categories: &'static [Category]) -> Self {
        self.categories = categories;
        self
    }

    pub const fn for_units(mut self, unit_types: &'static [UnitType]) -> Self {
        self.unit_types = unit_types;
        self
    }

    /// Whether the field belongs to the active set for `ctx`
    pub fn is_active(&self, ctx: &CalculationContext) -> bool {
        self.categories.contains(&ctx.category) && self.unit_types.contains(&ctx.unit_type)
    }
}

/// One row of the formula table, keyed by `(category, unit_type, field)`.
#[derive(Clone, Copy)]
pub struct Formula {
    pub field: FieldId,
    pub category: Category,
    pub unit_type: UnitType,
    pub depends_on: &'static [FieldId],
    pub reads: &'static [&'static str],
    pub compute: ComputeFn,
}

impl fmt::Debug for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Formula")
            .field("field", &self.field)
            .field("category", &self.category)
            .field("unit_type", &self.unit_type)
            .field("depends_on", &self.depends_on)
            .finish_non_exhaustive()
    }
}

/// A registered formula variant together with its field's traits.
#[derive(Clone)]
pub struct FieldDefinition {
    pub id: FieldId,
    pub category: Category,
    pub unit_type: UnitType,
    pub kind: ValueKind,
    pub lockable: bool,
    /// Upstream derived fields; resolved before this one
    pub depends_on: &'static [FieldId],
    /// Raw input keys the formula reads
    pub reads: &'static [&'static str],
    compute: ComputeFn,
}

impl FieldDefinition {
    pub(crate) fn new(spec: &FieldSpec, formula: &Formula) -> Self {
        Self {
            id: formula.field,
            category: formula.category,
            unit_type: formula.unit_type,
            kind: spec.kind,
            lockable: spec.lockable,
            depends_on: formula.depends_on,
            reads: formula.reads,
            compute: formula.compute,
        }
    }

    /// Evaluate the formula. The result is unrounded; storage rules belong
    /// to the caller.
    pub fn compute(&self, scope: &FormulaScope<'_>) -> f64 {
        (self.compute)(scope)
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDefinition")
            .field("id", &self.id)
            .field("category", &self.category)
            .field("unit_type", &self.unit_type)
            .field("kind", &self.kind)
            .field("lockable", &self.lockable)
            .field("depends_on", &self.depends_on)
            .field("reads", &self.reads)
            .finish_non_exhaustive()
    }
}

/// Everything a formula may look at during one recalculation.
pub struct FormulaScope<'a> {
    inputs: &'a InputValues,
    resolved: &'a BTreeMap<FieldId, f64>,
    schedule: &'a FeeSchedule,
    context: &'a CalculationContext,
}

impl<'a> FormulaScope<'a> {
    pub fn new(
        inputs: &'a InputValues,
        resolved: &'a BTreeMap<FieldId, f64>,
        schedule: &'a FeeSchedule,
        context: &'a CalculationContext,
    ) -> Self {
        Self {
            inputs,
            resolved,
            schedule,
            context,
        }
    }

    /// Raw input, `0` when absent or malformed
    pub fn input(&self, key: &str) -> f64 {
        self.inputs.number(key)
    }

    /// Raw input only if the user supplied a number
    pub fn supplied(&self, key: &str) -> Option<f64> {
        self.inputs.supplied(key)
    }

    /// Upstream derived value, `0` when the field is not active
    pub fn value(&self, id: FieldId) -> f64 {
        self.resolved.get(&id).copied().unwrap_or(0.0)
    }

    pub fn schedule(&self) -> &FeeSchedule {
        self.schedule
    }

    pub fn context(&self) -> &CalculationContext {
        self.context
    }
}
