use std::fmt;
use std::str::FromStr;

use anyhow::bail;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Competitive tier derived from a tournament name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "diamond")]
    Diamond,
    #[serde(rename = "platinum")]
    Platinum,
    #[serde(rename = "goldLimited")]
    GoldLimited,
    #[serde(rename = "gold")]
    Gold,
    #[serde(rename = "silverEu1")]
    SilverEu1,
    #[serde(rename = "silverEu2")]
    SilverEu2,
    #[serde(rename = "silverNa1")]
    SilverNa1,
    #[serde(rename = "silverNa2")]
    SilverNa2,
    #[serde(rename = "silver")]
    Silver,
    #[serde(rename = "bronze")]
    Bronze,
    /// Recognized as a tournament but excluded from scoring and stat tracking
    Unknown,
}

impl Tier {
    pub const ALL: [Tier; 11] = [
        Tier::Diamond,
        Tier::Platinum,
        Tier::GoldLimited,
        Tier::Gold,
        Tier::SilverEu1,
        Tier::SilverEu2,
        Tier::SilverNa1,
        Tier::SilverNa2,
        Tier::Silver,
        Tier::Bronze,
        Tier::Unknown,
    ];

    /// Storage key, also the identifier used in exported stats
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Diamond => "diamond",
            Tier::Platinum => "platinum",
            Tier::GoldLimited => "goldLimited",
            Tier::Gold => "gold",
            Tier::SilverEu1 => "silverEu1",
            Tier::SilverEu2 => "silverEu2",
            Tier::SilverNa1 => "silverNa1",
            Tier::SilverNa2 => "silverNa2",
            Tier::Silver => "silver",
            Tier::Bronze => "bronze",
            Tier::Unknown => "Unknown",
        }
    }

    pub fn is_scored(&self) -> bool {
        *self != Tier::Unknown
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Tier::ALL.iter().find(|tier| tier.as_str() == s) {
            Some(tier) => Ok(*tier),
            None => bail!("Unrecognized tier key: {}", s),
        }
    }
}

/// Per-tier placement counter touched by a finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlacementField {
    First,
    Second,
    Third,
}

impl PlacementField {
    /// 4th place shares the bronze counter with 3rd.
    pub fn from_placement(placement: u8) -> Option<Self> {
        match placement {
            1 => Some(PlacementField::First),
            2 => Some(PlacementField::Second),
            3 | 4 => Some(PlacementField::Third),
            _ => None,
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            PlacementField::First => "first",
            PlacementField::Second => "second",
            PlacementField::Third => "third",
        }
    }
}

/// Points for 1st through 4th place
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsVector(pub [Decimal; 4]);

impl PointsVector {
    pub const ZERO: PointsVector = PointsVector([Decimal::ZERO; 4]);

    /// Points for a placement in 1..=4; anything else earns nothing.
    pub fn for_placement(&self, placement: u8) -> Decimal {
        match placement {
            1..=4 => self.0[usize::from(placement) - 1],
            _ => Decimal::ZERO,
        }
    }

    pub fn as_array(&self) -> [Decimal; 4] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_placement_field_mapping() {
        assert_eq!(PlacementField::from_placement(1), Some(PlacementField::First));
        assert_eq!(PlacementField::from_placement(2), Some(PlacementField::Second));
        assert_eq!(PlacementField::from_placement(3), Some(PlacementField::Third));
        assert_eq!(PlacementField::from_placement(4), Some(PlacementField::Third));
        assert_eq!(PlacementField::from_placement(0), None);
        assert_eq!(PlacementField::from_placement(5), None);
    }

    #[test]
    fn test_tier_keys_round_trip_through_from_str() {
        for tier in Tier::ALL {
            assert_eq!(tier.as_str().parse::<Tier>().unwrap(), tier);
        }
        assert!("Diamond".parse::<Tier>().is_err());
    }

    #[test]
    fn test_points_vector_out_of_range_placement() {
        let points = PointsVector([dec!(4), dec!(3), dec!(2), dec!(1)]);
        assert_eq!(points.for_placement(1), dec!(4));
        assert_eq!(points.for_placement(4), dec!(1));
        assert_eq!(points.for_placement(0), Decimal::ZERO);
        assert_eq!(points.for_placement(5), Decimal::ZERO);
    }
}
