#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure duel math used to evaluate one unit attacking another.

use combat_calculator_core::{CombatEngine, CombatResult, UnitStats};

/// Smallest damage a hit can deal, regardless of armor.
pub const MIN_DAMAGE: u32 = 1;

/// Combat engine that resolves a one-on-one exchange of hits.
///
/// Every hit deals the subject's damage minus the opponent's armor, never less
/// than [`MIN_DAMAGE`]. The first hit lands immediately; each further hit
/// follows after the subject's attack interval.
#[derive(Clone, Copy, Debug, Default)]
pub struct DuelEngine;

impl DuelEngine {
    /// Creates a new duel engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl CombatEngine for DuelEngine {
    fn evaluate(&self, subject: &UnitStats, opponent: &UnitStats) -> CombatResult {
        let damage_per_hit = subject.damage.saturating_sub(opponent.armor).max(MIN_DAMAGE);
        let hits_to_kill = opponent.hit_points.div_ceil(damage_per_hit);
        let time_to_kill_ms =
            u64::from(hits_to_kill.saturating_sub(1)) * u64::from(subject.attack_interval_ms);

        CombatResult {
            damage_per_hit,
            hits_to_kill,
            time_to_kill_ms,
        }
    }
}
