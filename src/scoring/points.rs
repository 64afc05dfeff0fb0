use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::types::{PointsVector, Tier};

const DIAMOND: PointsVector = PointsVector([dec!(10), dec!(7), dec!(5), dec!(3)]);
const PLATINUM: PointsVector = PointsVector([dec!(6), dec!(4.5), dec!(3), dec!(1.5)]);
const GOLD_LIMITED: PointsVector = PointsVector([dec!(4.5), dec!(3.2), dec!(2.1), dec!(1)]);
const GOLD: PointsVector = PointsVector([dec!(4), dec!(2.8), dec!(1.8), dec!(0.8)]);
const SILVER_REGIONAL: PointsVector = PointsVector([dec!(2.5), dec!(1.6), dec!(1), dec!(0.5)]);
const SILVER: PointsVector = PointsVector([dec!(2), dec!(1.3), dec!(0.8), dec!(0.4)]);
const BRONZE: PointsVector = PointsVector([dec!(1), dec!(0.6), dec!(0.4), dec!(0.2)]);

/// Fixed points for 1st..4th place in each tier
pub fn points_for(tier: Tier) -> PointsVector {
    match tier {
        Tier::Diamond => DIAMOND,
        Tier::Platinum => PLATINUM,
        Tier::GoldLimited => GOLD_LIMITED,
        Tier::Gold => GOLD,
        Tier::SilverEu1 | Tier::SilverEu2 | Tier::SilverNa1 | Tier::SilverNa2 => SILVER_REGIONAL,
        Tier::Silver => SILVER,
        Tier::Bronze => BRONZE,
        Tier::Unknown => PointsVector::ZERO,
    }
}

pub fn points_for_placement(tier: Tier, placement: u8) -> Decimal {
    points_for(tier).for_placement(placement)
}
