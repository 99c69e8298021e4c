#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative selection state for the combat calculator.
//!
//! Each side owns a unit selection, a modifier selection and an optional level
//! override. Everything else held here is derived: a side's unit library
//! depends on the *opposing* side's modifiers, and a side's result tables
//! depend on its own unit, library and modifiers plus the opposing library.
//! Derivation happens inside [`apply`], so no stale derived data is ever
//! observable between transitions.

use combat_calculator_core::{
    Catalog, CombatEngine, CombatTables, Command, Event, Facing, Level, LevelRejection,
    ModSelection, Selections, Side, UnitId, UnitLibrary, UnitRecord,
};
use combat_calculator_system_combat_lookup::compute_results;

/// Read-only collaborators consulted while deriving state.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Unit and modifier definitions.
    pub catalog: &'a Catalog,
    /// Combat math evaluated for every subject/opponent pair.
    pub engine: &'a dyn CombatEngine,
}

impl<'a> Collaborators<'a> {
    /// Bundles a catalog and a combat engine.
    #[must_use]
    pub fn new(catalog: &'a Catalog, engine: &'a dyn CombatEngine) -> Self {
        Self { catalog, engine }
    }
}

/// Represents the authoritative combat calculator state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CombatState {
    sides: [SideState; 2],
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct SideState {
    unit: Option<UnitId>,
    mods: ModSelection,
    level: Option<Level>,
    library: UnitLibrary,
    tables: CombatTables,
}

impl CombatState {
    /// Creates a fully derived state seeded from `seed`.
    ///
    /// The seed is sanitized against the catalog first, so unknown units and
    /// modifiers read as "no selection" and levels are clamped into range.
    #[must_use]
    pub fn new(seed: &Selections, collaborators: &Collaborators<'_>) -> Self {
        let seed = seed.sanitize(collaborators.catalog);
        let mut state = Self {
            sides: Default::default(),
        };
        let mut recompute = Recompute::default();
        for side in Side::ALL {
            let selection = seed.side(side);
            let slot = state.side_mut(side);
            slot.unit = selection.unit.clone();
            slot.mods = selection.mods.clone();
            slot.level = selection.level;
            recompute.library(side);
        }

        let mut events = Vec::new();
        state.rebuild(recompute, collaborators, &mut events);
        tracing::debug!(derived = events.len(), "seeded combat state");
        state
    }

    fn side(&self, side: Side) -> &SideState {
        &self.sides[side.index()]
    }

    fn side_mut(&mut self, side: Side) -> &mut SideState {
        &mut self.sides[side.index()]
    }

    fn rebuild(
        &mut self,
        recompute: Recompute,
        collaborators: &Collaborators<'_>,
        out_events: &mut Vec<Event>,
    ) {
        let catalog = collaborators.catalog;

        for side in Side::ALL {
            if recompute.libraries[side.index()] {
                let library =
                    derive_library(catalog, self.side(side), &self.side(side.opposite()).mods);
                self.side_mut(side).library = library;
                out_events.push(Event::LibraryRebuilt { side });
            }
        }

        for side in Side::ALL {
            if recompute.tables[side.index()] {
                let own_state = self.side(side);
                let subject = own_state
                    .unit
                    .as_ref()
                    .and_then(|unit| own_state.library.get(unit));
                let opposing = self.side(side.opposite());
                let own = catalog.combined_modifier(&own_state.mods, Facing::Own);
                let opposing_own = catalog.combined_modifier(&opposing.mods, Facing::Own);
                let tables = compute_results(
                    subject,
                    &opposing.library,
                    &own,
                    &opposing_own,
                    collaborators.engine,
                );
                self.side_mut(side).tables = tables;
                out_events.push(Event::ResultsRecomputed { side });
            }
        }
    }
}

/// Derived data invalidated by a transition.
///
/// Dependency edges: a library depends on the opposing side's modifiers and on
/// its own side's unit and level override; tables depend on their own side's
/// unit, library and modifiers and on the opposing library and modifiers. A
/// dirty library therefore dirties the tables of both sides.
#[derive(Clone, Copy, Debug, Default)]
struct Recompute {
    libraries: [bool; 2],
    tables: [bool; 2],
}

impl Recompute {
    fn library(&mut self, side: Side) {
        self.libraries[side.index()] = true;
        self.tables = [true; 2];
    }

    fn tables(&mut self, side: Side) {
        self.tables[side.index()] = true;
    }
}

/// Applies the provided command to the state, re-deriving dependent data.
///
/// Unknown unit and modifier ids are treated as "no selection". Commands that
/// would not change the selection are no-ops and emit no events. A level
/// request naming a unit other than the one occupying the side is ignored and
/// reported via [`Event::LevelRejected`]; accepted levels are clamped into the
/// unit's `1..=max_level` range.
pub fn apply(
    state: &mut CombatState,
    collaborators: &Collaborators<'_>,
    command: Command,
    out_events: &mut Vec<Event>,
) {
    let catalog = collaborators.catalog;
    let mut recompute = Recompute::default();

    match command {
        Command::SelectUnit { side, unit } => {
            let unit = unit.filter(|id| catalog.unit(id).is_some());
            let current = state.side_mut(side);
            if current.unit == unit {
                return;
            }

            // An override belongs to the unit it was set for.
            if current.level.take().is_some() {
                recompute.library(side);
            }
            current.unit = unit.clone();
            recompute.tables(side);
            out_events.push(Event::UnitSelected { side, unit });
        }
        Command::SetModSelection { side, mods } => {
            let mods = mods.known_to(catalog);
            let current = state.side_mut(side);
            if current.mods == mods {
                return;
            }

            current.mods = mods.clone();
            recompute.library(side.opposite());
            recompute.tables(side);
            out_events.push(Event::ModsApplied { side, mods });
        }
        Command::SetLevel { side, unit, level } => {
            let current = state.side_mut(side);
            let definition = match current.unit.as_ref() {
                Some(selected) if *selected == unit => catalog.unit(selected),
                _ => None,
            };
            let Some(definition) = definition else {
                tracing::debug!(%side, %unit, "ignoring level for unit no longer on side");
                out_events.push(Event::LevelRejected {
                    side,
                    unit,
                    reason: LevelRejection::StaleUnit,
                });
                return;
            };

            let level = definition.clamp_level(level);
            if current.level == Some(level) {
                return;
            }

            current.level = Some(level);
            recompute.library(side);
            out_events.push(Event::LevelChanged { side, unit, level });
        }
    }

    state.rebuild(recompute, collaborators, out_events);
    tracing::debug!(events = out_events.len(), "applied combat command");
}

/// Pure form of [`apply`] returning the successor state and emitted events.
#[must_use]
pub fn transition(
    state: &CombatState,
    collaborators: &Collaborators<'_>,
    command: Command,
) -> (CombatState, Vec<Event>) {
    let mut next = state.clone();
    let mut events = Vec::new();
    apply(&mut next, collaborators, command, &mut events);
    (next, events)
}

fn derive_library(catalog: &Catalog, own: &SideState, opposing_mods: &ModSelection) -> UnitLibrary {
    let pressure = catalog.combined_modifier(opposing_mods, Facing::Opponent);
    UnitLibrary::from_records(catalog.units().map(|definition| {
        let level = match (own.unit.as_ref(), own.level) {
            (Some(unit), Some(level)) if *unit == definition.id => definition.clamp_level(level),
            _ => definition.default_level,
        };
        let base = definition.stats_at(level);
        UnitRecord {
            id: definition.id.clone(),
            name: definition.name.clone(),
            level,
            base,
            effective: pressure.apply(base),
        }
    }))
}

/// Query functions that provide read-only access to the combat state.
pub mod query {
    use super::CombatState;
    use combat_calculator_core::{
        Catalog, CombatResult, CombatResultTable, Level, ModSelection, ModifierDefinition,
        Selections, Side, SideSelection, UnitId, UnitLibrary, UnitRecord,
    };

    /// Unit currently selected on the side.
    #[must_use]
    pub fn unit_selection(state: &CombatState, side: Side) -> Option<&UnitId> {
        state.side(side).unit.as_ref()
    }

    /// Modifiers currently applied on the side.
    #[must_use]
    pub fn mod_selection(state: &CombatState, side: Side) -> &ModSelection {
        &state.side(side).mods
    }

    /// Level override recorded for the side's unit, if any.
    #[must_use]
    pub fn level_override(state: &CombatState, side: Side) -> Option<Level> {
        state.side(side).level
    }

    /// Unit library of the side, derived from the opposing side's modifiers.
    #[must_use]
    pub fn library(state: &CombatState, side: Side) -> &UnitLibrary {
        &state.side(side).library
    }

    /// Results of the side's unit against every opposing unit, ignoring modifiers.
    #[must_use]
    pub fn base_results(state: &CombatState, side: Side) -> &CombatResultTable {
        &state.side(side).tables.base
    }

    /// Results of the side's unit against every opposing unit, with modifiers.
    #[must_use]
    pub fn modded_results(state: &CombatState, side: Side) -> &CombatResultTable {
        &state.side(side).tables.modded
    }

    /// Record of the unit occupying the side, or `None` when unresolved.
    #[must_use]
    pub fn selected_unit(state: &CombatState, side: Side) -> Option<&UnitRecord> {
        let own = state.side(side);
        own.unit.as_ref().and_then(|unit| own.library.get(unit))
    }

    /// Captures the selections of both sides, e.g. for URL encoding.
    #[must_use]
    pub fn selections(state: &CombatState) -> Selections {
        let capture = |side: Side| {
            let own = state.side(side);
            SideSelection {
                unit: own.unit.clone(),
                mods: own.mods.clone(),
                level: own.level,
            }
        };
        Selections {
            a: capture(Side::A),
            b: capture(Side::B),
        }
    }

    /// Head-to-head view of a side's unit against the opposing selection.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Matchup<'a> {
        /// Unit occupying the side.
        pub subject: &'a UnitRecord,
        /// Unit occupying the opposing side, if resolved.
        pub opponent: Option<&'a UnitRecord>,
        /// Base result against the opponent, if one is selected.
        pub base: Option<&'a CombatResult>,
        /// Modded result against the opponent, if one is selected.
        pub modded: Option<&'a CombatResult>,
    }

    /// Builds the matchup for the side, or `None` when it has no combatant.
    #[must_use]
    pub fn matchup(state: &CombatState, side: Side) -> Option<Matchup<'_>> {
        let subject = selected_unit(state, side)?;
        let opponent_id = unit_selection(state, side.opposite());
        Some(Matchup {
            subject,
            opponent: selected_unit(state, side.opposite()),
            base: opponent_id.and_then(|id| base_results(state, side).get(id)),
            modded: opponent_id.and_then(|id| modded_results(state, side).get(id)),
        })
    }

    /// Modifiers the side's selected unit may wear.
    #[must_use]
    pub fn eligible_mods<'c>(
        state: &CombatState,
        catalog: &'c Catalog,
        side: Side,
    ) -> Vec<&'c ModifierDefinition> {
        unit_selection(state, side).map_or_else(Vec::new, |unit| catalog.eligible_mods(unit))
    }

    /// Reports whether the side should show a placeholder in place of a report.
    #[must_use]
    pub fn placeholder_needed(state: &CombatState, side: Side) -> bool {
        selected_unit(state, side).is_none() && selected_unit(state, side.opposite()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use combat_calculator_core::{
        ModId, ModifierDefinition, SideSelection, StatModifier, UnitDefinition, UnitStats,
    };
    use combat_calculator_system_duel::DuelEngine;

    fn unit(id: &str, hit_points: u32, damage: u32, armor: u32) -> UnitDefinition {
        UnitDefinition {
            id: UnitId::new(id),
            name: id.to_owned(),
            default_level: Level::MIN,
            max_level: Level::new(10).expect("non-zero"),
            stats: UnitStats {
                hit_points,
                damage,
                armor,
                attack_interval_ms: 1000,
            },
            per_level: UnitStats {
                hit_points: 10,
                damage: 1,
                armor: 0,
                attack_interval_ms: 0,
            },
            mods: vec![ModId::new("m_armorPierce")],
        }
    }

    fn catalog() -> Catalog {
        Catalog::new(
            [
                unit("u_infantry", 100, 12, 2),
                unit("u_tank", 400, 40, 10),
                unit("u_scout", 60, 8, 0),
            ],
            [
                ModifierDefinition {
                    id: ModId::new("m_armorPierce"),
                    name: "Armor Piercing".to_owned(),
                    own: StatModifier {
                        damage: 2,
                        ..StatModifier::NONE
                    },
                    opponent: StatModifier {
                        armor: -3,
                        ..StatModifier::NONE
                    },
                },
                ModifierDefinition {
                    id: ModId::new("m_fieldRations"),
                    name: "Field Rations".to_owned(),
                    own: StatModifier {
                        hit_points: 25,
                        ..StatModifier::NONE
                    },
                    opponent: StatModifier::NONE,
                },
            ],
        )
    }

    fn seeded(catalog: &Catalog, a: Option<&str>, b: Option<&str>) -> CombatState {
        let seed = Selections {
            a: SideSelection {
                unit: a.map(UnitId::new),
                ..SideSelection::default()
            },
            b: SideSelection {
                unit: b.map(UnitId::new),
                ..SideSelection::default()
            },
        };
        CombatState::new(&seed, &Collaborators::new(catalog, &DuelEngine))
    }

    fn pierce() -> ModSelection {
        [ModId::new("m_armorPierce")].into_iter().collect()
    }

    fn level(value: u32) -> Level {
        Level::new(value).expect("non-zero")
    }

    #[test]
    fn seeded_state_derives_every_table() {
        let catalog = catalog();
        let state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));

        for side in Side::ALL {
            let opposing: Vec<_> = query::library(&state, side.opposite()).ids().collect();
            assert_eq!(opposing.len(), 3);
            assert_eq!(query::base_results(&state, side).keys().collect::<Vec<_>>(), opposing);
            assert_eq!(
                query::modded_results(&state, side).keys().collect::<Vec<_>>(),
                opposing
            );
        }
    }

    #[test]
    fn empty_side_has_empty_tables() {
        let catalog = catalog();
        let state = seeded(&catalog, None, Some("u_tank"));

        assert!(query::base_results(&state, Side::A).is_empty());
        assert!(query::modded_results(&state, Side::A).is_empty());
        assert_eq!(query::library(&state, Side::A).len(), 3);
        assert!(query::placeholder_needed(&state, Side::A));
        assert!(!query::placeholder_needed(&state, Side::B));
    }

    #[test]
    fn selecting_unit_only_rebuilds_own_tables() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let mut state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));
        let mut events = Vec::new();

        apply(
            &mut state,
            &collaborators,
            Command::SelectUnit {
                side: Side::A,
                unit: Some(UnitId::new("u_scout")),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::UnitSelected {
                    side: Side::A,
                    unit: Some(UnitId::new("u_scout")),
                },
                Event::ResultsRecomputed { side: Side::A },
            ]
        );
        assert_eq!(
            query::unit_selection(&state, Side::A),
            Some(&UnitId::new("u_scout"))
        );
    }

    #[test]
    fn unknown_unit_reads_as_no_selection() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let mut state = seeded(&catalog, Some("u_infantry"), None);
        let mut events = Vec::new();

        apply(
            &mut state,
            &collaborators,
            Command::SelectUnit {
                side: Side::A,
                unit: Some(UnitId::new("u_doesnotexist")),
            },
            &mut events,
        );

        assert_eq!(query::unit_selection(&state, Side::A), None);
        assert!(query::base_results(&state, Side::A).is_empty());
    }

    #[test]
    fn mods_rebuild_opposing_library_and_both_tables() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let mut state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));
        let mut events = Vec::new();

        apply(
            &mut state,
            &collaborators,
            Command::SetModSelection {
                side: Side::A,
                mods: pierce(),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![
                Event::ModsApplied {
                    side: Side::A,
                    mods: pierce(),
                },
                Event::LibraryRebuilt { side: Side::B },
                Event::ResultsRecomputed { side: Side::A },
                Event::ResultsRecomputed { side: Side::B },
            ]
        );

        let tank = query::library(&state, Side::B)
            .get(&UnitId::new("u_tank"))
            .expect("tank in library");
        assert_eq!(tank.base.armor, 10);
        assert_eq!(tank.effective.armor, 7);
        let infantry = query::library(&state, Side::A)
            .get(&UnitId::new("u_infantry"))
            .expect("infantry in library");
        assert_eq!(infantry.base, infantry.effective);
    }

    #[test]
    fn mods_change_modded_but_not_base_results() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));
        let tank = UnitId::new("u_tank");

        let (next, _) = transition(
            &state,
            &collaborators,
            Command::SetModSelection {
                side: Side::A,
                mods: pierce(),
            },
        );

        assert_eq!(
            query::base_results(&next, Side::A).get(&tank),
            query::base_results(&state, Side::A).get(&tank)
        );
        let before = query::modded_results(&state, Side::A)
            .get(&tank)
            .expect("modded entry");
        let after = query::modded_results(&next, Side::A)
            .get(&tank)
            .expect("modded entry");
        assert_eq!(before.damage_per_hit, 2);
        assert_eq!(after.damage_per_hit, 7);
    }

    #[test]
    fn defensive_mods_change_opposing_modded_results() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));
        let infantry = UnitId::new("u_infantry");

        let (next, _) = transition(
            &state,
            &collaborators,
            Command::SetModSelection {
                side: Side::A,
                mods: [ModId::new("m_fieldRations")].into_iter().collect(),
            },
        );

        assert_eq!(query::library(&next, Side::A), query::library(&state, Side::A));
        assert_eq!(query::base_results(&next, Side::B), query::base_results(&state, Side::B));
        let before = query::modded_results(&state, Side::B)
            .get(&infantry)
            .expect("modded entry");
        let after = query::modded_results(&next, Side::B)
            .get(&infantry)
            .expect("modded entry");
        assert_eq!(before.hits_to_kill, 3);
        assert_eq!(after.hits_to_kill, 4);
    }

    #[test]
    fn removing_mods_restores_previous_tables() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));

        let (modded, _) = transition(
            &state,
            &collaborators,
            Command::SetModSelection {
                side: Side::A,
                mods: pierce(),
            },
        );
        let (restored, _) = transition(
            &modded,
            &collaborators,
            Command::SetModSelection {
                side: Side::A,
                mods: ModSelection::new(),
            },
        );

        assert_eq!(restored, state);
    }

    #[test]
    fn level_applies_to_current_unit_and_rebuilds_everything() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let mut state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));
        let mut events = Vec::new();

        apply(
            &mut state,
            &collaborators,
            Command::SetLevel {
                side: Side::A,
                unit: UnitId::new("u_infantry"),
                level: level(5),
            },
            &mut events,
        );

        assert_eq!(query::level_override(&state, Side::A), Some(level(5)));
        let record = query::selected_unit(&state, Side::A).expect("infantry resolved");
        assert_eq!(record.level, level(5));
        assert_eq!(record.base.hit_points, 140);
        assert_eq!(
            events,
            vec![
                Event::LevelChanged {
                    side: Side::A,
                    unit: UnitId::new("u_infantry"),
                    level: level(5),
                },
                Event::LibraryRebuilt { side: Side::A },
                Event::ResultsRecomputed { side: Side::A },
                Event::ResultsRecomputed { side: Side::B },
            ]
        );
    }

    #[test]
    fn stale_level_is_rejected_without_changes() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let mut state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));
        let before = state.clone();
        let mut events = Vec::new();

        apply(
            &mut state,
            &collaborators,
            Command::SetLevel {
                side: Side::A,
                unit: UnitId::new("u_tank"),
                level: level(5),
            },
            &mut events,
        );

        assert_eq!(state, before);
        assert_eq!(
            events,
            vec![Event::LevelRejected {
                side: Side::A,
                unit: UnitId::new("u_tank"),
                reason: LevelRejection::StaleUnit,
            }]
        );
    }

    #[test]
    fn levels_above_maximum_are_clamped() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let state = seeded(&catalog, Some("u_infantry"), None);

        let (next, _) = transition(
            &state,
            &collaborators,
            Command::SetLevel {
                side: Side::A,
                unit: UnitId::new("u_infantry"),
                level: level(250),
            },
        );

        assert_eq!(query::level_override(&next, Side::A), Some(level(10)));
    }

    #[test]
    fn switching_units_drops_level_override() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));

        let (levelled, _) = transition(
            &state,
            &collaborators,
            Command::SetLevel {
                side: Side::A,
                unit: UnitId::new("u_infantry"),
                level: level(4),
            },
        );
        let (switched, events) = transition(
            &levelled,
            &collaborators,
            Command::SelectUnit {
                side: Side::A,
                unit: Some(UnitId::new("u_scout")),
            },
        );

        assert_eq!(query::level_override(&switched, Side::A), None);
        assert!(events.contains(&Event::LibraryRebuilt { side: Side::A }));
        let infantry = query::library(&switched, Side::A)
            .get(&UnitId::new("u_infantry"))
            .expect("infantry in library");
        assert_eq!(infantry.level, Level::MIN);
    }

    #[test]
    fn repeated_commands_are_idempotent() {
        let catalog = catalog();
        let collaborators = Collaborators::new(&catalog, &DuelEngine);
        let state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));
        let commands = [
            Command::SelectUnit {
                side: Side::B,
                unit: Some(UnitId::new("u_scout")),
            },
            Command::SetModSelection {
                side: Side::B,
                mods: pierce(),
            },
            Command::SetLevel {
                side: Side::A,
                unit: UnitId::new("u_infantry"),
                level: level(3),
            },
        ];

        for command in commands {
            let (once, _) = transition(&state, &collaborators, command.clone());
            let (twice, events) = transition(&once, &collaborators, command);
            assert_eq!(once, twice);
            assert!(events.is_empty(), "repeated command must not emit events");
        }
    }

    #[test]
    fn matchup_reports_results_against_opposing_selection() {
        let catalog = catalog();
        let state = seeded(&catalog, Some("u_infantry"), Some("u_tank"));

        let matchup = query::matchup(&state, Side::A).expect("attacker resolved");
        assert_eq!(matchup.subject.id, UnitId::new("u_infantry"));
        assert_eq!(
            matchup.opponent.map(|record| &record.id),
            Some(&UnitId::new("u_tank"))
        );
        assert_eq!(
            matchup.base,
            query::base_results(&state, Side::A).get(&UnitId::new("u_tank"))
        );

        let lonely = seeded(&catalog, Some("u_infantry"), None);
        let matchup = query::matchup(&lonely, Side::A).expect("attacker resolved");
        assert!(matchup.opponent.is_none());
        assert!(matchup.base.is_none());
        assert!(query::matchup(&lonely, Side::B).is_none());
    }

    #[test]
    fn eligible_mods_follow_selected_unit() {
        let catalog = catalog();
        let state = seeded(&catalog, Some("u_infantry"), None);

        assert_eq!(query::eligible_mods(&state, &catalog, Side::A).len(), 1);
        assert!(query::eligible_mods(&state, &catalog, Side::B).is_empty());
    }
}
