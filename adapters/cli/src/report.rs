use std::fmt::{self, Write};

use combat_calculator_core::{Catalog, CombatResult, Side, UnitRecord};
use combat_calculator_world::{query, CombatState};

/// Renders the matchup report for both sides.
///
/// A side without a resolved combatant gets a single placeholder line.
pub(crate) fn render_report(
    out: &mut impl Write,
    state: &CombatState,
    catalog: &Catalog,
) -> fmt::Result {
    for side in Side::ALL {
        render_side(out, state, catalog, side)?;
    }
    Ok(())
}

fn render_side(
    out: &mut impl Write,
    state: &CombatState,
    catalog: &Catalog,
    side: Side,
) -> fmt::Result {
    let Some(matchup) = query::matchup(state, side) else {
        return if query::placeholder_needed(state, side) {
            writeln!(out, "Side {side}: select a unit to compare")
        } else {
            writeln!(out, "Side {side}: no unit selected")
        };
    };

    writeln!(out, "Side {side}: {}", Combatant(matchup.subject))?;
    let stats = matchup.subject.effective;
    writeln!(
        out,
        "  stats: hp {}, damage {}, armor {}, interval {} ms",
        stats.hit_points, stats.damage, stats.armor, stats.attack_interval_ms
    )?;

    let selected = query::mod_selection(state, side);
    let eligible: Vec<String> = query::eligible_mods(state, catalog, side)
        .into_iter()
        .map(|definition| {
            let marker = if selected.contains(&definition.id) { "*" } else { "" };
            format!("{}{marker}", definition.id)
        })
        .collect();
    if !eligible.is_empty() {
        writeln!(out, "  mods: {}", eligible.join(", "))?;
    }

    if let (Some(opponent), Some(base), Some(modded)) =
        (matchup.opponent, matchup.base, matchup.modded)
    {
        writeln!(
            out,
            "  vs {}: base {} | modded {}",
            Combatant(opponent),
            Outcome(base),
            Outcome(modded)
        )?;
    }

    let modded = query::modded_results(state, side);
    for (opponent, base) in query::base_results(state, side).iter() {
        match modded.get(opponent) {
            Some(modded) => writeln!(
                out,
                "    {opponent:<14} base {} | modded {}",
                Outcome(base),
                Outcome(modded)
            )?,
            None => writeln!(out, "    {opponent:<14} base {}", Outcome(base))?,
        }
    }
    Ok(())
}

struct Combatant<'a>(&'a UnitRecord);

impl fmt::Display for Combatant<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}] level {}", self.0.name, self.0.id, self.0.level)
    }
}

struct Outcome<'a>(&'a CombatResult);

impl fmt::Display for Outcome<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} dmg/hit, {} hits, {} ms",
            self.0.damage_per_hit, self.0.hits_to_kill, self.0.time_to_kill_ms
        )
    }
}
