use std::str::FromStr;

use combat_calculator_core::{ActionError, ActionKind, Command, Level, ModId, UnitId};

/// Separates the action name from its payload on the command line.
const PAYLOAD_DELIMITER: char = '=';
/// Separates the unit from the requested level in level payloads.
const LEVEL_DELIMITER: char = ':';
/// Separates modifier identifiers in modifier payloads.
const MOD_DELIMITER: char = ',';

/// Parses a `NAME=PAYLOAD` argument into a world command.
///
/// Unit actions take a unit id, where an empty payload clears the side.
/// Modifier actions take a comma-separated list and level actions take
/// `UNIT:LEVEL`.
pub(crate) fn parse_action(argument: &str) -> Result<Command, ActionError> {
    let (name, payload) = argument
        .split_once(PAYLOAD_DELIMITER)
        .unwrap_or((argument, ""));
    let kind = ActionKind::from_str(name.trim())?;
    let payload = payload.trim();

    let command = match kind {
        ActionKind::SelectUnit(side) => Command::SelectUnit {
            side,
            unit: (!payload.is_empty()).then(|| UnitId::new(payload)),
        },
        ActionKind::SetModSelection(side) => Command::SetModSelection {
            side,
            mods: payload
                .split(MOD_DELIMITER)
                .map(str::trim)
                .filter(|id| !id.is_empty())
                .map(ModId::new)
                .collect(),
        },
        ActionKind::SetLevel(side) => {
            let (unit, level) = parse_level_payload(payload).ok_or_else(|| {
                ActionError::InvalidPayload {
                    action: kind.name(),
                    payload: payload.to_owned(),
                }
            })?;
            Command::SetLevel { side, unit, level }
        }
    };
    Ok(command)
}

fn parse_level_payload(payload: &str) -> Option<(UnitId, Level)> {
    let (unit, level) = payload.split_once(LEVEL_DELIMITER)?;
    let unit = unit.trim();
    if unit.is_empty() {
        return None;
    }
    let level = level.trim().parse::<u32>().ok().and_then(Level::new)?;
    Some((UnitId::new(unit), level))
}
