//! Criterion benchmarks for full recalculation.
//!
//! The form layer recalculates on every keystroke, so a full pass over
//! every active field has to stay well under a frame.
//!
//! Run with: cargo bench -p offer-engine --bench recalculate

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use offer_core::keys::*;
use offer_core::{CalculationContext, FieldId, InputValues, UnitType};
use offer_engine::{OfferCalculator, OfferSnapshot, RecalculationEngine};
use offer_locks::{LockState, LockStore};
use offer_registry::standard_registry;
use offer_validation::PaymentMilestone;

fn resale_inputs() -> InputValues {
    InputValues::new()
        .with(ORIGINAL_PRICE, "AED 2,118,940")
        .with(SELLING_PRICE, 2_500_000.0)
        .with(RESALE_CLAUSE_PERCENT, "40%")
        .with(AMOUNT_PAID_PERCENT, 40.0)
        .with(ADMIN_FEES, 5_250.0)
        .with(INTERNAL_AREA, "1,100.5 sq.ft")
        .with(BALCONY_AREA, 150.0)
}

// ---------------------------------------------------------------------------
// Benchmark: recalculate
// ---------------------------------------------------------------------------

fn bench_recalculate(c: &mut Criterion) {
    let mut group = c.benchmark_group("recalculate");

    let engine = RecalculationEngine::new(standard_registry());
    let inputs = resale_inputs();
    let unlocked = LockState::new();

    let mut store = LockStore::new(standard_registry());
    store.lock(FieldId::Premium, 0.0).unwrap();
    store.lock(FieldId::AgencyFee, 40_000.0).unwrap();
    let locked = store.into_state();

    for (name, ctx) in [
        ("offplan_standard", CalculationContext::offplan(UnitType::Standard)),
        ("ready_villa", CalculationContext::ready(UnitType::Villa)),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| black_box(engine.recalculate(black_box(&inputs), &unlocked, &ctx)));
        });
    }

    group.bench_function("offplan_locked", |b| {
        let ctx = CalculationContext::offplan(UnitType::Standard);
        b.iter(|| black_box(engine.recalculate(black_box(&inputs), &locked, &ctx)));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Benchmark: evaluate (recalculate + validate + fingerprint)
// ---------------------------------------------------------------------------

fn bench_evaluate(c: &mut Criterion) {
    let calculator = OfferCalculator::standard();
    let plan = [10.0, 10.0, 10.0, 70.0].into_iter().map(PaymentMilestone::new).collect();
    let snapshot = OfferSnapshot::new(CalculationContext::offplan(UnitType::Standard), resale_inputs())
        .with_payment_plan(plan);

    c.bench_function("evaluate_snapshot", |b| {
        b.iter(|| black_box(calculator.evaluate(black_box(&snapshot))));
    });
}

criterion_group!(benches, bench_recalculate, bench_evaluate);
criterion_main!(benches);
