//! Recalculation Engine: resolves every active field in dependency order
use offer_core::{CalculationContext, FeeSchedule, InputValues, OfferResult};
use offer_locks::LockState;
use offer_registry::{FieldRegistry, FormulaScope, FormulaSelector};
use std::collections::BTreeMap;

use crate::derived::DerivedValueMap;

/// Pure function of `(inputs, locks, context)`. Holds only immutable
/// configuration, so one engine can serve any number of offers.
#[derive(Debug, Clone)]
pub struct RecalculationEngine<'r> {
    registry: &'r FieldRegistry,
    schedule: FeeSchedule,
}

impl<'r> RecalculationEngine<'r> {
    pub fn new(registry: &'r FieldRegistry) -> Self {
        Self {
            registry,
            schedule: FeeSchedule::default(),
        }
    }

    pub fn with_schedule(mut self, schedule: FeeSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn registry(&self) -> &'r FieldRegistry {
        self.registry
    }

    pub fn schedule(&self) -> &FeeSchedule {
        &self.schedule
    }

    /// Recompute every field active for `ctx`.
    ///
    /// Locked fields take their override verbatim and still feed downstream
    /// formulas; a lock on a field that is not lockable is ignored. Computed currency is rounded half-up to whole units; areas
    /// are stored unrounded. Malformed inputs read as zero, so the only
    /// errors are registry misconfigurations.
    pub fn recalculate(
        &self,
        inputs: &InputValues,
        locks: &LockState,
        ctx: &CalculationContext,
    ) -> OfferResult<DerivedValueMap> {
        let span = tracing::debug_span!(
            "recalculate",
            context = %ctx,
            inputs = inputs.len(),
            locked = locks.locked_count()
        );
        let _enter = span.enter();

        let plan = FormulaSelector::new(self.registry).plan(ctx)?;
        let mut resolved: BTreeMap<_, f64> = BTreeMap::new();

        for definition in plan {
            let mut lock = locks.override_value(definition.id);
            if lock.is_some() && !definition.lockable {
                // persisted state may not have gone through LockStore
                tracing::warn!(field = %definition.id, "lock on non-lockable field ignored");
                lock = None;
            }

            let value = match lock {
                Some(locked) => {
                    tracing::trace!(field = %definition.id, value = locked, source = "lock");
                    locked
                }
                None => {
                    let raw = definition.compute(&FormulaScope::new(
                        inputs,
                        &resolved,
                        &self.schedule,
                        ctx,
                    ));
                    if !raw.is_finite() {
                        tracing::warn!(field = %definition.id, "non-finite result stored as zero");
                    }
                    let stored = definition.kind.store(raw);
                    tracing::trace!(field = %definition.id, value = stored, source = "formula");
                    stored
                }
            };
            resolved.insert(definition.id, value);
        }

        tracing::debug!(fields = resolved.len(), "recalculated");
        Ok(DerivedValueMap::from(resolved))
    }
}
