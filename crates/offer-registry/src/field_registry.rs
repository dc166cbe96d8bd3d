//! Field Registry
//!
//! Built once from a catalog of `FieldSpec`s and a table of `Formula`
//! variants, checked for consistency and for dependency cycles, read-only
//! afterwards.
use offer_core::{Category, FieldId, OfferError, OfferResult, UnitType};
use std::collections::{BTreeMap, BTreeSet};

use crate::field::{FieldDefinition, FieldSpec, Formula};
use crate::formulas::{FIELD_SPECS, FORMULAS};

type VariantKey = (Category, UnitType, FieldId);

#[derive(Debug, Clone)]
pub struct FieldRegistry {
    specs: BTreeMap<FieldId, FieldSpec>,
    definitions: BTreeMap<VariantKey, FieldDefinition>,
    /// First registered variant per field, returned by `get_field`
    primary: BTreeMap<FieldId, VariantKey>,
    /// Dependency order across every variant
    order: Vec<FieldId>,
}

impl FieldRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// The production formula set
    pub fn standard() -> OfferResult<Self> {
        FIELD_SPECS
            .iter()
            .cloned()
            .fold(Self::builder(), RegistryBuilder::field)
            .formulas(FORMULAS.iter().copied())
            .build()
    }

    /// Primary definition of a field: its first registered variant.
    ///
    /// Not context-aware. Fields such as `adgmFee` have a different formula
    /// per category; use `FormulaSelector::select` to get the row that
    /// applies to a given context.
    pub fn get_field(&self, id: FieldId) -> OfferResult<&FieldDefinition> {
        self.primary
            .get(&id)
            .and_then(|key| self.definitions.get(key))
            .ok_or_else(|| OfferError::UnknownField(id.to_string()))
    }

    /// Look a field up by its stable string id
    pub fn get_field_by_name(&self, name: &str) -> OfferResult<&FieldDefinition> {
        self.get_field(name.parse()?)
    }

    pub fn spec(&self, id: FieldId) -> OfferResult<&FieldSpec> {
        self.specs
            .get(&id)
            .ok_or_else(|| OfferError::UnknownField(id.to_string()))
    }

    pub fn is_lockable(&self, id: FieldId) -> OfferResult<bool> {
        Ok(self.spec(id)?.lockable)
    }

    pub fn lockable_fields(&self) -> Vec<FieldId> {
        self.specs
            .values()
            .filter(|s| s.lockable)
            .map(|s| s.id)
            .collect()
    }

    /// Exact variant lookup, no fallback
    pub fn definition(
        &self,
        category: Category,
        unit_type: UnitType,
        id: FieldId,
    ) -> Option<&FieldDefinition> {
        self.definitions.get(&(category, unit_type, id))
    }

    /// Every registered field in dependency order
    pub fn order(&self) -> &[FieldId] {
        &self.order
    }

    pub fn specs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.specs.values()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

/// Assembles a registry. Validation happens in `build`.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    specs: Vec<FieldSpec>,
    formulas: Vec<Formula>,
}

impl RegistryBuilder {
    pub fn field(mut self, spec: FieldSpec) -> Self {
        self.specs.push(spec);
        self
    }

    pub fn formula(mut self, formula: Formula) -> Self {
        self.formulas.push(formula);
        self
    }

    pub fn formulas(mut self, formulas: impl IntoIterator<Item = Formula>) -> Self {
        self.formulas.extend(formulas);
        self
    }

    pub fn build(self) -> OfferResult<FieldRegistry> {
        let mut specs = BTreeMap::new();
        for spec in self.specs {
            if specs.insert(spec.id, spec.clone()).is_some() {
                return Err(OfferError::InvalidRegistry(format!(
                    "field {} declared twice",
                    spec.id
                )));
            }
        }

        let mut definitions = BTreeMap::new();
        let mut primary = BTreeMap::new();
        for formula in &self.formulas {
            let spec = specs
                .get(&formula.field)
                .ok_or_else(|| OfferError::UnknownField(formula.field.to_string()))?;

            if let Some(dep) = formula.depends_on.iter().find(|d| !specs.contains_key(*d)) {
                return Err(OfferError::UnknownField(dep.to_string()));
            }

            let key = (formula.category, formula.unit_type, formula.field);
            if definitions
                .insert(key, FieldDefinition::new(spec, formula))
                .is_some()
            {
                return Err(OfferError::InvalidRegistry(format!(
                    "duplicate formula for {} in {}/{}",
                    formula.field, formula.category, formula.unit_type
                )));
            }
            primary.entry(formula.field).or_insert(key);
        }

        if let Some(orphan) = specs.keys().find(|id| !primary.contains_key(*id)) {
            return Err(OfferError::InvalidRegistry(format!(
                "field {} has no formula",
                orphan
            )));
        }

        let order = topological_order(&specs, &self.formulas)?;

        Ok(FieldRegistry {
            specs,
            definitions,
            primary,
            order,
        })
    }
}

/// Kahn's algorithm over the union of every variant's `depends_on`. Ties
/// resolve by `FieldId` order so the result is stable.
fn topological_order(
    specs: &BTreeMap<FieldId, FieldSpec>,
    formulas: &[Formula],
) -> OfferResult<Vec<FieldId>> {
    let mut upstream: BTreeMap<FieldId, BTreeSet<FieldId>> =
        specs.keys().map(|id| (*id, BTreeSet::new())).collect();
    for formula in formulas {
        if let Some(deps) = upstream.get_mut(&formula.field) {
            deps.extend(formula.depends_on.iter().copied());
        }
    }

    let mut order = Vec::with_capacity(upstream.len());
    let mut done: BTreeSet<FieldId> = BTreeSet::new();
    loop {
        let ready: Vec<FieldId> = upstream
            .iter()
            .filter(|(id, deps)| !done.contains(*id) && deps.is_subset(&done))
            .map(|(id, _)| *id)
            .collect();

        if ready.is_empty() {
            break;
        }
        for id in ready {
            done.insert(id);
            order.push(id);
        }
    }

    if order.len() != upstream.len() {
        let stuck: Vec<String> = upstream
            .keys()
            .filter(|id| !done.contains(*id))
            .map(|id| id.to_string())
            .collect();
        return Err(OfferError::DependencyCycle(stuck.join(" ⇄ ")));
    }

    Ok(order)
}
