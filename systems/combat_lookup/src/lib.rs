#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that derives per-opponent combat result tables for one side.

use combat_calculator_core::{
    CombatEngine, CombatResultTable, CombatTables, StatModifier, UnitLibrary, UnitRecord,
};

/// Computes base and modded results of `subject` against every opponent.
///
/// Base entries pit the subject's level-scaled catalog stats against each
/// opponent's catalog stats. Modded entries apply `own` on top of the
/// subject's effective stats and `opposing_own` on top of each opponent's
/// effective stats, so every modifier selected on either side is reflected
/// whether it strengthens the attacker or the defender. Both tables are
/// rebuilt from scratch and are keyed by exactly the ids in `opponents`; an
/// absent subject yields two empty tables.
#[must_use]
pub fn compute_results(
    subject: Option<&UnitRecord>,
    opponents: &UnitLibrary,
    own: &StatModifier,
    opposing_own: &StatModifier,
    engine: &dyn CombatEngine,
) -> CombatTables {
    let Some(subject) = subject else {
        return CombatTables::default();
    };

    let modded_subject = own.apply(subject.effective);

    let base = CombatResultTable::from_entries(opponents.iter().map(|opponent| {
        (
            opponent.id.clone(),
            engine.evaluate(&subject.base, &opponent.base),
        )
    }));
    let modded = CombatResultTable::from_entries(opponents.iter().map(|opponent| {
        (
            opponent.id.clone(),
            engine.evaluate(&modded_subject, &opposing_own.apply(opponent.effective)),
        )
    }));

    CombatTables { base, modded }
}
