#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the combat calculator.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative selection state, and pure systems. Adapters submit
//! [`Command`] values describing desired selection changes, the world executes
//! those commands via its `apply` entry point, and then reports [`Event`]
//! values describing what changed and which derived data was rebuilt. Derived
//! data is exposed through the read-only [`UnitLibrary`] and
//! [`CombatResultTable`] views.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
    str::FromStr,
};

use serde::Deserialize;
use thiserror::Error;

/// One of the two symmetric combat participants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    /// Attacker-origin side, shown on the left.
    A,
    /// Defender-origin side, shown on the right.
    B,
}

impl Side {
    /// Both sides in canonical order.
    pub const ALL: [Side; 2] = [Side::A, Side::B];

    /// Returns the side facing this one.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Zero-based index of the side, suitable for per-side arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::A => 0,
            Self::B => 1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::B => write!(f, "B"),
        }
    }
}

/// Identifier naming a unit definition within the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct UnitId(String);

impl UnitId {
    /// Creates a unit identifier from the provided string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Identifier naming a single modifier within the catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(transparent)]
pub struct ModId(String);

impl ModId {
    /// Creates a modifier identifier from the provided string.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Borrows the textual form of the identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// Strictly positive unit level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Level(u32);

impl Level {
    /// Lowest level any unit can have.
    pub const MIN: Level = Level(1);

    /// Creates a level, rejecting zero.
    #[must_use]
    pub const fn new(value: u32) -> Option<Self> {
        if value == 0 {
            None
        } else {
            Some(Self(value))
        }
    }

    /// Retrieves the numeric level.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Combat-relevant statistics of a unit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct UnitStats {
    /// Damage the unit can absorb before it is destroyed.
    pub hit_points: u32,
    /// Raw damage dealt by a single hit before armor.
    pub damage: u32,
    /// Flat damage reduction applied to every incoming hit.
    pub armor: u32,
    /// Time between two consecutive hits, in milliseconds.
    pub attack_interval_ms: u32,
}

impl UnitStats {
    /// Adds `growth` once for every level above the first.
    #[must_use]
    pub fn scaled(self, growth: UnitStats, level: Level) -> Self {
        let steps = level.get() - 1;
        Self {
            hit_points: self
                .hit_points
                .saturating_add(growth.hit_points.saturating_mul(steps)),
            damage: self.damage.saturating_add(growth.damage.saturating_mul(steps)),
            armor: self.armor.saturating_add(growth.armor.saturating_mul(steps)),
            attack_interval_ms: self
                .attack_interval_ms
                .saturating_add(growth.attack_interval_ms.saturating_mul(steps)),
        }
    }
}

/// Signed adjustment applied to [`UnitStats`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(default)]
pub struct StatModifier {
    /// Change applied to hit points.
    pub hit_points: i32,
    /// Change applied to damage per hit.
    pub damage: i32,
    /// Change applied to armor.
    pub armor: i32,
    /// Change applied to the attack interval, in milliseconds.
    pub attack_interval_ms: i32,
}

impl StatModifier {
    /// Modifier that leaves every stat untouched.
    pub const NONE: StatModifier = StatModifier {
        hit_points: 0,
        damage: 0,
        armor: 0,
        attack_interval_ms: 0,
    };

    /// Sums two modifiers component-wise.
    #[must_use]
    pub fn combine(self, other: StatModifier) -> Self {
        Self {
            hit_points: self.hit_points.saturating_add(other.hit_points),
            damage: self.damage.saturating_add(other.damage),
            armor: self.armor.saturating_add(other.armor),
            attack_interval_ms: self
                .attack_interval_ms
                .saturating_add(other.attack_interval_ms),
        }
    }

    /// Applies the modifier to `stats`.
    ///
    /// Damage and armor saturate at zero. Hit points and the attack interval
    /// never drop below one so that derived combat math stays defined.
    #[must_use]
    pub fn apply(&self, stats: UnitStats) -> UnitStats {
        UnitStats {
            hit_points: offset(stats.hit_points, self.hit_points).max(1),
            damage: offset(stats.damage, self.damage),
            armor: offset(stats.armor, self.armor),
            attack_interval_ms: offset(stats.attack_interval_ms, self.attack_interval_ms).max(1),
        }
    }
}

fn offset(value: u32, delta: i32) -> u32 {
    value.saturating_add_signed(delta)
}

/// Which way a modifier points relative to the unit wearing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Facing {
    /// Effects applied to the wearer itself.
    Own,
    /// Effects applied to every unit on the opposing side.
    Opponent,
}

/// Static definition of a unit as shipped in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitDefinition {
    /// Identifier of the unit.
    pub id: UnitId,
    /// Human readable name.
    pub name: String,
    /// Level used when no override is present.
    pub default_level: Level,
    /// Highest level the unit can reach.
    pub max_level: Level,
    /// Statistics at level one.
    pub stats: UnitStats,
    /// Statistics gained per level above one.
    pub per_level: UnitStats,
    /// Modifiers this unit may wear.
    pub mods: Vec<ModId>,
}

impl UnitDefinition {
    /// Statistics of the unit at `level`.
    #[must_use]
    pub fn stats_at(&self, level: Level) -> UnitStats {
        self.stats.scaled(self.per_level, level)
    }

    /// Clamps `level` into `1..=max_level`.
    #[must_use]
    pub fn clamp_level(&self, level: Level) -> Level {
        level.min(self.max_level)
    }

    /// Reports whether the unit may wear the provided modifier.
    #[must_use]
    pub fn accepts(&self, modifier: &ModId) -> bool {
        self.mods.contains(modifier)
    }
}

/// Static definition of a modifier as shipped in the catalog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModifierDefinition {
    /// Identifier of the modifier.
    pub id: ModId,
    /// Human readable name.
    pub name: String,
    /// Adjustment applied to the wearer in modded results, attacking and defending.
    pub own: StatModifier,
    /// Adjustment applied to the opposing side's library.
    pub opponent: StatModifier,
}

impl ModifierDefinition {
    /// Returns the adjustment facing the requested direction.
    #[must_use]
    pub const fn facing(&self, facing: Facing) -> StatModifier {
        match facing {
            Facing::Own => self.own,
            Facing::Opponent => self.opponent,
        }
    }
}

/// Read-only lookup from identifiers to unit and modifier definitions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    units: BTreeMap<UnitId, UnitDefinition>,
    modifiers: BTreeMap<ModId, ModifierDefinition>,
}

impl Catalog {
    /// Builds a catalog from definitions. Later duplicates replace earlier ones.
    #[must_use]
    pub fn new(
        units: impl IntoIterator<Item = UnitDefinition>,
        modifiers: impl IntoIterator<Item = ModifierDefinition>,
    ) -> Self {
        Self {
            units: units.into_iter().map(|unit| (unit.id.clone(), unit)).collect(),
            modifiers: modifiers
                .into_iter()
                .map(|modifier| (modifier.id.clone(), modifier))
                .collect(),
        }
    }

    /// Looks up a unit definition.
    #[must_use]
    pub fn unit(&self, id: &UnitId) -> Option<&UnitDefinition> {
        self.units.get(id)
    }

    /// Iterates over every unit definition in identifier order.
    pub fn units(&self) -> impl Iterator<Item = &UnitDefinition> {
        self.units.values()
    }

    /// Looks up a modifier definition.
    #[must_use]
    pub fn modifier(&self, id: &ModId) -> Option<&ModifierDefinition> {
        self.modifiers.get(id)
    }

    /// Iterates over every modifier definition in identifier order.
    pub fn modifiers(&self) -> impl Iterator<Item = &ModifierDefinition> {
        self.modifiers.values()
    }

    /// Modifier definitions the provided unit may wear, in catalog order.
    #[must_use]
    pub fn eligible_mods(&self, unit: &UnitId) -> Vec<&ModifierDefinition> {
        let Some(definition) = self.unit(unit) else {
            return Vec::new();
        };
        self.modifiers
            .values()
            .filter(|modifier| definition.accepts(&modifier.id))
            .collect()
    }

    /// Sums the adjustments of every known modifier in `mods` facing `facing`.
    #[must_use]
    pub fn combined_modifier(&self, mods: &ModSelection, facing: Facing) -> StatModifier {
        mods.iter()
            .filter_map(|id| self.modifier(id))
            .fold(StatModifier::NONE, |total, modifier| {
                total.combine(modifier.facing(facing))
            })
    }
}

/// Ordered set of modifiers applied on one side.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ModSelection {
    mods: BTreeSet<ModId>,
}

impl ModSelection {
    /// Creates an empty selection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reports whether no modifier is selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mods.is_empty()
    }

    /// Number of selected modifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mods.len()
    }

    /// Reports whether the modifier is selected.
    #[must_use]
    pub fn contains(&self, id: &ModId) -> bool {
        self.mods.contains(id)
    }

    /// Iterates over the selected modifiers in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &ModId> {
        self.mods.iter()
    }

    /// Keeps only the modifiers known to the catalog.
    #[must_use]
    pub fn known_to(&self, catalog: &Catalog) -> Self {
        self.mods
            .iter()
            .filter(|id| catalog.modifier(id).is_some())
            .cloned()
            .collect()
    }
}

impl FromIterator<ModId> for ModSelection {
    fn from_iter<I: IntoIterator<Item = ModId>>(iter: I) -> Self {
        Self {
            mods: iter.into_iter().collect(),
        }
    }
}

/// Everything a single side has chosen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SideSelection {
    /// Unit occupying the side, if any.
    pub unit: Option<UnitId>,
    /// Modifiers applied on the side.
    pub mods: ModSelection,
    /// Level chosen for the selected unit instead of its catalog default.
    pub level: Option<Level>,
}

/// Selections for both sides; the seed of the state machine and the image of
/// the URL codec.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selections {
    /// Selection made on side A.
    pub a: SideSelection,
    /// Selection made on side B.
    pub b: SideSelection,
}

impl Selections {
    /// Borrows the selection of the requested side.
    #[must_use]
    pub const fn side(&self, side: Side) -> &SideSelection {
        match side {
            Side::A => &self.a,
            Side::B => &self.b,
        }
    }

    /// Mutably borrows the selection of the requested side.
    pub fn side_mut(&mut self, side: Side) -> &mut SideSelection {
        match side {
            Side::A => &mut self.a,
            Side::B => &mut self.b,
        }
    }

    /// Reduces the selections to values the catalog can honour.
    ///
    /// Unknown units and modifiers are dropped, a level without a unit is
    /// dropped, and levels are clamped into the unit's range.
    #[must_use]
    pub fn sanitize(&self, catalog: &Catalog) -> Self {
        let mut sanitized = Self::default();
        for side in Side::ALL {
            let raw = self.side(side);
            let definition = raw.unit.as_ref().and_then(|id| catalog.unit(id));
            *sanitized.side_mut(side) = SideSelection {
                unit: definition.map(|definition| definition.id.clone()),
                mods: raw.mods.known_to(catalog),
                level: definition
                    .zip(raw.level)
                    .map(|(definition, level)| definition.clamp_level(level)),
            };
        }
        sanitized
    }
}

/// A unit as it appears in one side's library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitRecord {
    /// Identifier of the unit.
    pub id: UnitId,
    /// Human readable name.
    pub name: String,
    /// Level the record was derived at.
    pub level: Level,
    /// Level-scaled catalog statistics without any modifier.
    pub base: UnitStats,
    /// Statistics after the opposing side's modifiers were applied.
    pub effective: UnitStats,
}

/// Per-side mapping from unit identifiers to derived unit records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UnitLibrary {
    records: BTreeMap<UnitId, UnitRecord>,
}

impl UnitLibrary {
    /// Creates a library from the provided records.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = UnitRecord>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.id.clone(), record))
                .collect(),
        }
    }

    /// Looks up a unit record.
    #[must_use]
    pub fn get(&self, id: &UnitId) -> Option<&UnitRecord> {
        self.records.get(id)
    }

    /// Iterates over the records in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = &UnitRecord> {
        self.records.values()
    }

    /// Iterates over the contained unit identifiers in order.
    pub fn ids(&self) -> impl Iterator<Item = &UnitId> {
        self.records.keys()
    }

    /// Number of records in the library.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Reports whether the library holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Outcome of one unit attacking another, produced by a [`CombatEngine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CombatResult {
    /// Damage dealt by every hit after armor.
    pub damage_per_hit: u32,
    /// Hits required to destroy the opponent.
    pub hits_to_kill: u32,
    /// Time until the killing hit lands, in milliseconds.
    pub time_to_kill_ms: u64,
}

/// Pure combat math evaluated for a single subject/opponent pair.
pub trait CombatEngine {
    /// Computes the outcome of `subject` attacking `opponent`.
    fn evaluate(&self, subject: &UnitStats, opponent: &UnitStats) -> CombatResult;
}

/// Mapping from opponent identifiers to computed combat results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatResultTable {
    entries: BTreeMap<UnitId, CombatResult>,
}

impl CombatResultTable {
    /// Creates a table from `(opponent, result)` pairs.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (UnitId, CombatResult)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Looks up the result against the provided opponent.
    #[must_use]
    pub fn get(&self, opponent: &UnitId) -> Option<&CombatResult> {
        self.entries.get(opponent)
    }

    /// Iterates over `(opponent, result)` pairs in identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&UnitId, &CombatResult)> {
        self.entries.iter()
    }

    /// Iterates over the opponent identifiers in order.
    pub fn keys(&self) -> impl Iterator<Item = &UnitId> {
        self.entries.keys()
    }

    /// Number of entries in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Reports whether the table holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Base and modded result tables held for one side.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CombatTables {
    /// Results ignoring every applied modifier.
    pub base: CombatResultTable,
    /// Results with the currently applied modifiers.
    pub modded: CombatResultTable,
}

/// Commands that express all permissible selection changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the unit occupying a side.
    SelectUnit {
        /// Side whose unit changes.
        side: Side,
        /// Newly selected unit, or `None` to clear the side.
        unit: Option<UnitId>,
    },
    /// Replaces the modifiers applied on a side.
    SetModSelection {
        /// Side whose modifiers change.
        side: Side,
        /// Newly applied modifiers.
        mods: ModSelection,
    },
    /// Overrides the level of the unit currently occupying a side.
    SetLevel {
        /// Side whose unit is levelled.
        side: Side,
        /// Unit the dispatcher believes occupies the side.
        unit: UnitId,
        /// Requested level.
        level: Level,
    },
}

/// Events reported by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the unit occupying a side changed.
    UnitSelected {
        /// Side whose unit changed.
        side: Side,
        /// Unit now occupying the side.
        unit: Option<UnitId>,
    },
    /// Confirms that the modifiers applied on a side changed.
    ModsApplied {
        /// Side whose modifiers changed.
        side: Side,
        /// Modifiers now applied.
        mods: ModSelection,
    },
    /// Confirms that a side's level override changed.
    LevelChanged {
        /// Side whose level changed.
        side: Side,
        /// Unit the override belongs to.
        unit: UnitId,
        /// Level after clamping into the unit's range.
        level: Level,
    },
    /// Reports that a level request was ignored.
    LevelRejected {
        /// Side targeted by the request.
        side: Side,
        /// Unit named in the request.
        unit: UnitId,
        /// Specific reason the request was ignored.
        reason: LevelRejection,
    },
    /// Announces that a side's unit library was rebuilt.
    LibraryRebuilt {
        /// Side whose library was rebuilt.
        side: Side,
    },
    /// Announces that a side's base and modded tables were rebuilt.
    ResultsRecomputed {
        /// Side whose tables were rebuilt.
        side: Side,
    },
}

/// Reasons a level request may be ignored by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LevelRejection {
    /// The named unit no longer occupies the side.
    StaleUnit,
}

/// Named actions accepted at the dispatch boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionKind {
    /// `selectUnitA` / `selectUnitB`.
    SelectUnit(Side),
    /// `setModSelectionA` / `setModSelectionB`.
    SetModSelection(Side),
    /// `setAttackerLevel` (side A) / `setDefenderLevel` (side B).
    SetLevel(Side),
}

impl ActionKind {
    /// Canonical name of the action.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SelectUnit(Side::A) => "selectUnitA",
            Self::SelectUnit(Side::B) => "selectUnitB",
            Self::SetModSelection(Side::A) => "setModSelectionA",
            Self::SetModSelection(Side::B) => "setModSelectionB",
            Self::SetLevel(Side::A) => "setAttackerLevel",
            Self::SetLevel(Side::B) => "setDefenderLevel",
        }
    }
}

impl FromStr for ActionKind {
    type Err = ActionError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "selectUnitA" => Ok(Self::SelectUnit(Side::A)),
            "selectUnitB" => Ok(Self::SelectUnit(Side::B)),
            "setModSelectionA" => Ok(Self::SetModSelection(Side::A)),
            "setModSelectionB" => Ok(Self::SetModSelection(Side::B)),
            "setAttackerLevel" => Ok(Self::SetLevel(Side::A)),
            "setDefenderLevel" => Ok(Self::SetLevel(Side::B)),
            other => Err(ActionError::UnknownAction(other.to_owned())),
        }
    }
}

/// Errors raised while turning named actions into commands.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ActionError {
    /// The action name is not part of the action set.
    #[error("unknown action type `{0}`")]
    UnknownAction(String),
    /// The payload could not be interpreted for the action.
    #[error("invalid payload `{payload}` for action `{action}`")]
    InvalidPayload {
        /// Name of the action the payload was meant for.
        action: &'static str,
        /// Payload as supplied.
        payload: String,
    },
}
