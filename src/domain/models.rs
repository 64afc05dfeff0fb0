use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::identity::normalize_competitor_id;

pub const MIN_PLACEMENT: u8 = 1;
pub const MAX_PLACEMENT: u8 = 4;

/// Tournament announced by the feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tournament {
    pub id: String,
    pub name: Option<String>,
    pub start_window: Option<DateTime<Utc>>,
}

impl Tournament {
    /// Build a tournament from one element of the feed's tournament list.
    /// Returns `None` when the element has no usable id.
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = id_from_value(value.get("id")?)?;
        let name = value.get("name").and_then(Value::as_str).map(str::to_string);
        let start_window = value
            .get("startWindow")
            .and_then(Value::as_str)
            .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Some(Self {
            id,
            name,
            start_window,
        })
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("<unnamed>")
    }
}

/// One competitor's finish in one tournament
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantRow {
    pub competitor_id: String,
    pub party_id: String,
    pub placement: u8,
}

impl ParticipantRow {
    pub fn new(competitor_id: &str, party_id: &str, placement: u8) -> Self {
        Self {
            competitor_id: normalize_competitor_id(competitor_id),
            party_id: party_id.to_string(),
            placement,
        }
    }

    /// Validate one raw participant row. Rows with a missing id or a placement
    /// outside 1..=4 yield `None`.
    pub fn from_value(value: &Value) -> Option<Self> {
        let competitor_id = value.get("competitorId").and_then(id_from_value)?;
        let party_id = value.get("partyId").and_then(id_from_value)?;
        let placement = value.get("placement").and_then(placement_from_value)?;

        Some(Self::new(&competitor_id, &party_id, placement))
    }

    pub fn is_valid(&self) -> bool {
        !self.competitor_id.is_empty()
            && !self.party_id.is_empty()
            && is_scored_placement(self.placement)
    }
}

pub fn is_scored_placement(placement: u8) -> bool {
    (MIN_PLACEMENT..=MAX_PLACEMENT).contains(&placement)
}

fn id_from_value(value: &Value) -> Option<String> {
    let id = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

fn placement_from_value(value: &Value) -> Option<u8> {
    let placement = value.as_u64()?;
    let placement = u8::try_from(placement).ok()?;
    is_scored_placement(placement).then_some(placement)
}
