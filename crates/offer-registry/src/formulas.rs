//! The standard formula set.
//!
//! `FIELD_SPECS` declares every derived field once; `FORMULAS` lists one row
//! per `(category, unit_type, field)` variant. A context without an exact
//! unit-type row falls back to the category's `standard` row.

use offer_core::keys::*;
use offer_core::{Category, FieldId, UnitType};

use crate::field::{FieldSpec, Formula, FormulaScope};

use offer_core::Category::{Offplan, Ready};
use offer_core::UnitType::{Plot, Standard, Villa};

pub static FIELD_SPECS: &[FieldSpec] = &[
    FieldSpec::area(FieldId::TotalArea).lockable().for_units(&[Standard, Plot]),
    FieldSpec::area(FieldId::BuiltUpArea).for_units(&[Villa]),
    FieldSpec::currency(FieldId::Refund).lockable().only_in(&[Offplan]),
    FieldSpec::currency(FieldId::BalanceResaleClause).lockable().only_in(&[Offplan]),
    FieldSpec::currency(FieldId::Premium).lockable().only_in(&[Offplan]),
    FieldSpec::currency(FieldId::AdgmFee).lockable(),
    FieldSpec::currency(FieldId::AgencyFee).lockable(),
    FieldSpec::currency(FieldId::AdgmTermination).lockable(),
    FieldSpec::currency(FieldId::AdgmElectronic).lockable(),
    FieldSpec::currency(FieldId::TotalInitialPayment),
];

const OFFPLAN_TOTAL_TERMS: &[FieldId] = &[
    FieldId::Refund,
    FieldId::BalanceResaleClause,
    FieldId::Premium,
    FieldId::AdgmFee,
    FieldId::AdgmTermination,
    FieldId::AdgmElectronic,
    FieldId::AgencyFee,
];

const READY_TOTAL_TERMS: &[FieldId] = &[
    FieldId::AdgmFee,
    FieldId::AdgmTermination,
    FieldId::AdgmElectronic,
    FieldId::AgencyFee,
];

const fn row(
    field: FieldId,
    category: Category,
    unit_type: UnitType,
    depends_on: &'static [FieldId],
    reads: &'static [&'static str],
    compute: fn(&FormulaScope<'_>) -> f64,
) -> Formula {
    Formula {
        field,
        category,
        unit_type,
        depends_on,
        reads,
        compute,
    }
}

pub static FORMULAS: &[Formula] = &[
    // areas
    row(FieldId::TotalArea, Offplan, Standard, &[], &[INTERNAL_AREA, BALCONY_AREA], total_area),
    row(FieldId::TotalArea, Ready, Standard, &[], &[INTERNAL_AREA, BALCONY_AREA], total_area),
    row(FieldId::TotalArea, Offplan, Plot, &[], &[PLOT_AREA], plot_area),
    row(FieldId::TotalArea, Ready, Plot, &[], &[PLOT_AREA], plot_area),
    row(FieldId::BuiltUpArea, Offplan, Villa, &[], &[VILLA_INTERNAL_AREA, VILLA_TERRACE_AREA], built_up_area),
    row(FieldId::BuiltUpArea, Ready, Villa, &[], &[VILLA_INTERNAL_AREA, VILLA_TERRACE_AREA], built_up_area),
    // resale mechanics
    row(FieldId::Refund, Offplan, Standard, &[], &[AMOUNT_PAID_AED, AMOUNT_PAID_PERCENT, ORIGINAL_PRICE], refund),
    row(
        FieldId::BalanceResaleClause,
        Offplan,
        Standard,
        &[],
        &[AMOUNT_PAID_PERCENT, RESALE_CLAUSE_PERCENT, ORIGINAL_PRICE],
        balance_resale_clause,
    ),
    row(FieldId::Premium, Offplan, Standard, &[], &[SELLING_PRICE, ORIGINAL_PRICE], premium),
    // fees
    row(FieldId::AdgmFee, Offplan, Standard, &[], &[ORIGINAL_PRICE], adgm_fee_on_original),
    row(FieldId::AdgmFee, Ready, Standard, &[], &[SELLING_PRICE], adgm_fee_on_selling),
    row(FieldId::AgencyFee, Offplan, Standard, &[], &[SELLING_PRICE], agency_fee),
    row(FieldId::AgencyFee, Ready, Standard, &[], &[SELLING_PRICE], agency_fee),
    row(FieldId::AdgmTermination, Offplan, Standard, &[], &[ADGM_TERMINATION], adgm_termination),
    row(FieldId::AdgmTermination, Ready, Standard, &[], &[ADGM_TERMINATION], adgm_termination),
    row(FieldId::AdgmElectronic, Offplan, Standard, &[], &[ADGM_ELECTRONIC], adgm_electronic),
    row(FieldId::AdgmElectronic, Ready, Standard, &[], &[ADGM_ELECTRONIC], adgm_electronic),
    // totals
    row(FieldId::TotalInitialPayment, Offplan, Standard, OFFPLAN_TOTAL_TERMS, &[ADMIN_FEES], offplan_total),
    row(FieldId::TotalInitialPayment, Ready, Standard, READY_TOTAL_TERMS, &[SELLING_PRICE, ADMIN_FEES], ready_total),
];

fn total_area(s: &FormulaScope<'_>) -> f64 {
    s.input(INTERNAL_AREA) + s.input(BALCONY_AREA)
}

fn plot_area(s: &FormulaScope<'_>) -> f64 {
    s.input(PLOT_AREA)
}

fn built_up_area(s: &FormulaScope<'_>) -> f64 {
    s.input(VILLA_INTERNAL_AREA) + s.input(VILLA_TERRACE_AREA)
}

fn refund(s: &FormulaScope<'_>) -> f64 {
    let paid = s.input(AMOUNT_PAID_AED);
    if paid > 0.0 {
        paid
    } else {
        s.input(ORIGINAL_PRICE) * (s.input(AMOUNT_PAID_PERCENT) / 100.0)
    }
}

fn balance_resale_clause(s: &FormulaScope<'_>) -> f64 {
    let paid = s.input(AMOUNT_PAID_PERCENT);
    let clause = s.input(RESALE_CLAUSE_PERCENT);
    if paid < clause {
        ((clause - paid) / 100.0 * s.input(ORIGINAL_PRICE)).max(0.0)
    } else {
        0.0
    }
}

/// Negative for a discount sale; never clamped.
fn premium(s: &FormulaScope<'_>) -> f64 {
    s.input(SELLING_PRICE) - s.input(ORIGINAL_PRICE)
}

/// Off-plan registration is charged on the registered contract value.
fn adgm_fee_on_original(s: &FormulaScope<'_>) -> f64 {
    s.input(ORIGINAL_PRICE) * s.schedule().adgm_rate
}

fn adgm_fee_on_selling(s: &FormulaScope<'_>) -> f64 {
    s.input(SELLING_PRICE) * s.schedule().adgm_rate
}

fn agency_fee(s: &FormulaScope<'_>) -> f64 {
    s.input(SELLING_PRICE) * s.schedule().agency_multiplier()
}

fn adgm_termination(s: &FormulaScope<'_>) -> f64 {
    s.supplied(ADGM_TERMINATION)
        .unwrap_or_else(|| s.schedule().registration(s.context().category).termination)
}

fn adgm_electronic(s: &FormulaScope<'_>) -> f64 {
    s.supplied(ADGM_ELECTRONIC)
        .unwrap_or_else(|| s.schedule().registration(s.context().category).electronic)
}

fn offplan_total(s: &FormulaScope<'_>) -> f64 {
    let terms: f64 = OFFPLAN_TOTAL_TERMS.iter().map(|id| s.value(*id)).sum();
    terms + s.input(ADMIN_FEES)
}

fn ready_total(s: &FormulaScope<'_>) -> f64 {
    let terms: f64 = READY_TOTAL_TERMS.iter().map(|id| s.value(*id)).sum();
    s.input(SELLING_PRICE) + s.input(ADMIN_FEES) + terms
}
