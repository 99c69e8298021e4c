#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Two-way mapping between the selection state and URL query parameters.
//!
//! The codec itself is pure in both directions: [`decode`] turns a flat
//! parameter mapping into [`Selections`] and [`encode`] does the inverse.
//! Pushing the result into an address bar is left to an [`AddressBar`]
//! implementation driven by [`UrlSync`], which writes at most once per
//! transition.

use std::collections::{btree_map::Entry, BTreeMap};

use combat_calculator_core::{Catalog, Level, ModId, ModSelection, Selections, Side, UnitId};
use combat_calculator_world::{query, Collaborators, CombatState};

/// Query key holding the unit selected on side A.
pub const UNIT_A_KEY: &str = "a";
/// Query key holding the unit selected on side B.
pub const UNIT_B_KEY: &str = "b";
/// Query key holding the modifiers applied on side A.
pub const MODS_A_KEY: &str = "mods";
/// Query key holding the modifiers applied on side B.
pub const MODS_B_KEY: &str = "mods2";
/// Query key holding the level override of side A's unit.
pub const LEVEL_A_KEY: &str = "la";
/// Query key holding the level override of side B's unit.
pub const LEVEL_B_KEY: &str = "lb";

struct SideKeys {
    unit: &'static str,
    mods: &'static str,
    level: &'static str,
}

impl SideKeys {
    const fn of(side: Side) -> Self {
        match side {
            Side::A => Self {
                unit: UNIT_A_KEY,
                mods: MODS_A_KEY,
                level: LEVEL_A_KEY,
            },
            Side::B => Self {
                unit: UNIT_B_KEY,
                mods: MODS_B_KEY,
                level: LEVEL_B_KEY,
            },
        }
    }
}

/// Value stored under a single query key.
///
/// Equality compares the carried values, so a `Single` equals a one-element
/// `List` holding the same string.
#[derive(Clone, Debug)]
pub enum ParamValue {
    /// Key appeared once.
    Single(String),
    /// Key carries an ordered sequence of values.
    List(Vec<String>),
}

impl ParamValue {
    /// Values carried by the parameter in order.
    #[must_use]
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::List(values) => values.as_slice(),
        }
    }
}

impl PartialEq for ParamValue {
    fn eq(&self, other: &Self) -> bool {
        self.values() == other.values()
    }
}

impl Eq for ParamValue {}

/// Flat mapping from query keys to values, ordered by key.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams {
    entries: BTreeMap<String, ParamValue>,
}

impl QueryParams {
    /// Creates an empty mapping.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the query portion of a URL.
    ///
    /// Accepts a bare query (`a=x&b=y`), one with a leading `?`, or a full
    /// URL. Only URLs and `?`-prefixed input are cut at a `?`; a bare query
    /// keeps literal `?` characters in its values. Fragments are ignored and
    /// repeated keys become lists.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let query = if let Some(query) = input.strip_prefix('?') {
            query
        } else if input.contains("://") || input.starts_with('/') {
            input.split_once('?').map_or("", |(_, query)| query)
        } else {
            input
        };
        let query = query.split_once('#').map_or(query, |(query, _)| query);

        let mut params = Self::new();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            params.append(key.into_owned(), value.into_owned());
        }
        params
    }

    /// Adds a value under `key`, turning repeated keys into lists.
    pub fn append(&mut self, key: String, value: String) {
        match self.entries.entry(key) {
            Entry::Vacant(slot) => {
                let _ = slot.insert(ParamValue::Single(value));
            }
            Entry::Occupied(mut slot) => {
                let current = slot.get_mut();
                let previous = std::mem::replace(current, ParamValue::List(Vec::new()));
                *current = match previous {
                    ParamValue::Single(first) => ParamValue::List(vec![first, value]),
                    ParamValue::List(mut values) => {
                        values.push(value);
                        ParamValue::List(values)
                    }
                };
            }
        }
    }

    /// Stores `value` under `key`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: ParamValue) {
        let _ = self.entries.insert(key.into(), value);
    }

    /// Looks up the value stored under `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.entries.get(key)
    }

    /// Iterates over the entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Reports whether no key is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the mapping as a query string without the leading `?`.
    ///
    /// Lists are written as repeated keys in order.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let _ = serializer.extend_pairs(self.entries.iter().flat_map(|(key, value)| {
            value
                .values()
                .iter()
                .map(move |value| (key.as_str(), value.as_str()))
        }));
        serializer.finish()
    }
}

/// Decodes selections from query parameters.
///
/// Malformed values and ids unknown to the catalog read as absent; decoding
/// never fails.
#[must_use]
pub fn decode(params: &QueryParams, catalog: &Catalog) -> Selections {
    let mut raw = Selections::default();
    for side in Side::ALL {
        let keys = SideKeys::of(side);
        let selection = raw.side_mut(side);
        selection.unit = decode_unit(params, keys.unit);
        selection.mods = decode_mods(params, keys.mods);
        selection.level = decode_level(params, keys.level);
    }

    let sanitized = raw.sanitize(catalog);
    if sanitized != raw {
        tracing::debug!(?raw, ?sanitized, "dropped query values the catalog cannot honour");
    }
    sanitized
}

fn decode_unit(params: &QueryParams, key: &str) -> Option<UnitId> {
    let values = params.get(key)?.values();
    match values {
        [value] if !value.is_empty() => Some(UnitId::new(value.as_str())),
        _ => {
            tracing::debug!(key, ?values, "ignoring malformed unit parameter");
            None
        }
    }
}

fn decode_mods(params: &QueryParams, key: &str) -> ModSelection {
    params
        .get(key)
        .map(|value| {
            value
                .values()
                .iter()
                .filter(|id| !id.is_empty())
                .map(|id| ModId::new(id.as_str()))
                .collect()
        })
        .unwrap_or_default()
}

fn decode_level(params: &QueryParams, key: &str) -> Option<Level> {
    let values = params.get(key)?.values();
    let level = match values {
        [value] => value.trim().parse::<u32>().ok().and_then(Level::new),
        _ => None,
    };
    if level.is_none() {
        tracing::debug!(key, ?values, "ignoring malformed level parameter");
    }
    level
}

/// Encodes selections as query parameters.
///
/// Units are written as one-element lists, modifiers as ordered lists and
/// levels as decimal strings. Empty fields are omitted.
#[must_use]
pub fn encode(selections: &Selections) -> QueryParams {
    let mut params = QueryParams::new();
    for side in Side::ALL {
        let keys = SideKeys::of(side);
        let selection = selections.side(side);
        if let Some(unit) = &selection.unit {
            params.insert(keys.unit, ParamValue::List(vec![unit.to_string()]));
        }
        if !selection.mods.is_empty() {
            let mods = selection.mods.iter().map(ToString::to_string).collect();
            params.insert(keys.mods, ParamValue::List(mods));
        }
        if let Some(level) = selection.level {
            params.insert(keys.level, ParamValue::Single(level.to_string()));
        }
    }
    params
}

/// Builds the initial combat state from the query parameters present at startup.
#[must_use]
pub fn initial_state(params: &QueryParams, collaborators: &Collaborators<'_>) -> CombatState {
    CombatState::new(&decode(params, collaborators.catalog), collaborators)
}

/// Destination of canonical query parameters, e.g. a browser history entry.
pub trait AddressBar {
    /// Replaces the current query with `params`.
    fn replace(&mut self, params: &QueryParams);
}

/// Keeps an [`AddressBar`] in step with the combat state.
///
/// State flows to the URL only: after every transition [`UrlSync::publish`]
/// encodes the whole selection once and writes it only if it changed.
#[derive(Clone, Debug, Default)]
pub struct UrlSync {
    published: QueryParams,
}

impl UrlSync {
    /// Starts tracking from the parameters the state was seeded with.
    #[must_use]
    pub fn new(initial: QueryParams) -> Self {
        Self { published: initial }
    }

    /// Parameters most recently written, or the seed if nothing was written yet.
    #[must_use]
    pub fn published(&self) -> &QueryParams {
        &self.published
    }

    /// Writes the encoded state to `address_bar` if it differs from the last write.
    ///
    /// Returns whether a write happened.
    pub fn publish<A>(&mut self, state: &CombatState, address_bar: &mut A) -> bool
    where
        A: AddressBar + ?Sized,
    {
        let encoded = encode(&query::selections(state));
        if encoded == self.published {
            return false;
        }

        address_bar.replace(&encoded);
        tracing::debug!(query = %encoded.to_query_string(), "published combat url");
        self.published = encoded;
        true
    }
}
