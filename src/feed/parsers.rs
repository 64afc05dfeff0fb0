use anyhow::{bail, Result};
use log::debug;
use serde_json::Value;

use crate::domain::{ParticipantRow, Tournament};
use crate::errors::parse_context;

/// The tournament list must be a JSON array; anything else is fatal for the
/// run. Individual entries without an id are dropped.
pub fn parse_tournament_list(data: &Value) -> Result<Vec<Tournament>> {
    let Some(items) = data.as_array() else {
        bail!("{}: expected an array, got {}", parse_context("tournament list"), kind_of(data));
    };

    let tournaments = items
        .iter()
        .filter_map(|item| {
            let parsed = Tournament::from_value(item);
            if parsed.is_none() {
                debug!("Skipping tournament entry without id: {}", item);
            }
            parsed
        })
        .collect();

    Ok(tournaments)
}

/// Participant rows failing validation are skipped one by one.
pub fn parse_participant_rows(data: &Value) -> Result<Vec<ParticipantRow>> {
    let Some(items) = data.as_array() else {
        bail!("{}: expected an array, got {}", parse_context("participant list"), kind_of(data));
    };

    let rows: Vec<ParticipantRow> = items.iter().filter_map(ParticipantRow::from_value).collect();
    if rows.len() < items.len() {
        debug!("Discarded {} invalid participant rows", items.len() - rows.len());
    }

    Ok(rows)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
