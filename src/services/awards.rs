use std::collections::HashSet;

use log::{debug, info};
use rust_decimal::Decimal;

use crate::domain::{ClubRef, ParticipantRow, Tournament};
use crate::scoring::{self, PlacementField, PointsVector, Tier};
use crate::services::context::RunContext;
use crate::teams::{self, Team};

/// Credit for one competitor's finish
#[derive(Debug, Clone, PartialEq)]
pub struct IndividualAward {
    pub competitor_id: String,
    pub name: Option<String>,
    pub registered: bool,
    pub club_id: Option<i64>,
    pub placement: u8,
    /// `None` when the tier is not tracked
    pub field: Option<PlacementField>,
    pub points: Decimal,
}

/// Credit for a same-club team
#[derive(Debug, Clone, PartialEq)]
pub struct ClubAward {
    pub club: ClubRef,
    pub party_id: String,
    pub placement: u8,
    pub field: PlacementField,
    pub points: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PodiumEntry {
    pub position: usize,
    pub party_id: String,
    pub placement: u8,
    pub competitor_ids: Vec<String>,
}

/// Everything one tournament writes, computed before touching the store
#[derive(Debug, Clone)]
pub struct AwardPlan {
    pub tournament: Tournament,
    pub tier: Tier,
    pub season: i64,
    pub individual: Vec<IndividualAward>,
    pub clubs: Vec<ClubAward>,
    pub podium: Vec<PodiumEntry>,
}

impl AwardPlan {
    pub fn total_individual_points(&self) -> Decimal {
        self.individual.iter().map(|a| a.points).sum()
    }
}

pub fn plan_awards(tournament: &Tournament, rows: &[ParticipantRow], ctx: &RunContext) -> AwardPlan {
    let tier = scoring::classify(tournament.name.as_deref());
    let points = scoring::points_for(tier);
    let ordered = teams::order_by_placement(teams::group(rows, &ctx.roster));

    if !tier.is_scored() {
        info!(
            "Tournament {} ({}) has no recognized tier, recording without points",
            tournament.id,
            tournament.display_name()
        );
    }

    let individual = ordered
        .iter()
        .flat_map(|team| plan_individual(team, tier, &points))
        .collect();

    AwardPlan {
        tournament: tournament.clone(),
        tier,
        season: ctx.season,
        individual,
        clubs: plan_clubs(&ordered, tier, &points),
        podium: build_podium(&ordered),
    }
}

fn plan_individual(team: &Team, tier: Tier, points: &PointsVector) -> Vec<IndividualAward> {
    team.members
        .iter()
        .map(|member| IndividualAward {
            competitor_id: member.competitor_id.clone(),
            name: member.name.clone(),
            registered: member.registered,
            club_id: member.club.as_ref().map(|c| c.id),
            placement: member.placement,
            field: tier
                .is_scored()
                .then(|| PlacementField::from_placement(member.placement))
                .flatten(),
            points: points.for_placement(member.placement),
        })
        .collect()
}

/// Teams are visited in placement order so the first eligible team of a club
/// is the one credited.
fn plan_clubs(ordered: &[Team], tier: Tier, points: &PointsVector) -> Vec<ClubAward> {
    if !tier.is_scored() {
        return Vec::new();
    }

    let mut credited: HashSet<i64> = HashSet::new();
    let mut awards = Vec::new();

    for team in ordered {
        let eligibility = teams::evaluate(team);
        if let Some(name) = eligibility.club_name() {
            debug!("Party {} is a full {} team", team.party_id, name);
        }
        let Some(club) = eligibility.club.filter(|_| eligibility.team_eligible_for_club_award) else {
            continue;
        };

        if !credited.insert(club.id) {
            debug!(
                "Club {} already credited in this tournament, skipping party {}",
                club.name, team.party_id
            );
            continue;
        }

        let placement = team.placement();
        let Some(field) = PlacementField::from_placement(placement) else {
            continue;
        };

        awards.push(ClubAward {
            club,
            party_id: team.party_id.clone(),
            placement,
            field,
            points: points.for_placement(placement),
        });
    }

    awards
}

fn build_podium(ordered: &[Team]) -> Vec<PodiumEntry> {
    teams::top_four(ordered)
        .iter()
        .enumerate()
        .map(|(idx, team)| PodiumEntry {
            position: idx + 1,
            party_id: team.party_id.clone(),
            placement: team.placement(),
            competitor_ids: team.members.iter().map(|m| m.competitor_id.clone()).collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RosterEntry, RosterIndex};
    use rust_decimal_macros::dec;

    fn club(id: i64) -> ClubRef {
        ClubRef {
            id,
            name: format!("Club {id}"),
        }
    }

    fn context() -> RunContext {
        let mut roster = RosterIndex::new();
        for (id, club_id) in [("A1", 1), ("A2", 1), ("A3", 1), ("A4", 1), ("A5", 1), ("A6", 1), ("B1", 2)] {
            roster.insert(
                id,
                RosterEntry {
                    name: format!("Player {id}"),
                    club: Some(club(club_id)),
                },
            );
        }
        RunContext::new(4, roster)
    }

    fn tournament(name: &str) -> Tournament {
        Tournament {
            id: "t1".to_string(),
            name: Some(name.to_string()),
            start_window: None,
        }
    }

    fn rows(spec: &[(&str, &str, u8)]) -> Vec<ParticipantRow> {
        spec.iter()
            .map(|(competitor, party, placement)| ParticipantRow::new(competitor, party, *placement))
            .collect()
    }

    #[test]
    fn test_same_club_team_earns_club_award() {
        let rows = rows(&[
            ("X1", "p1", 1), ("X2", "p1", 1), ("X3", "p1", 1),
            ("A1", "p2", 2), ("A2", "p2", 2), ("A3", "p2", 2),
        ]);
        let plan = plan_awards(&tournament("EU Silver Cup 1"), &rows, &context());

        assert_eq!(plan.tier, Tier::SilverEu1);
        assert_eq!(plan.season, 4);
        assert_eq!(plan.individual.len(), 6);
        assert_eq!(plan.clubs.len(), 1);
        assert_eq!(plan.clubs[0].club.id, 1);
        assert_eq!(plan.clubs[0].points, dec!(1.6));
        assert_eq!(plan.clubs[0].field, PlacementField::Second);
        assert_eq!(plan.total_individual_points(), dec!(2.5) * dec!(3) + dec!(1.6) * dec!(3));
    }

    #[test]
    fn test_club_is_credited_once_per_tournament() {
        let rows = rows(&[
            ("A1", "p1", 1), ("A2", "p1", 1), ("A3", "p1", 1),
            ("A4", "p2", 2), ("A5", "p2", 2), ("A6", "p2", 2),
        ]);
        let plan = plan_awards(&tournament("Gold Cup"), &rows, &context());

        assert_eq!(plan.clubs.len(), 1);
        assert_eq!(plan.clubs[0].party_id, "p1");
        assert_eq!(plan.clubs[0].points, dec!(4));
        assert_eq!(plan.individual.len(), 6);
    }

    #[test]
    fn test_fourth_place_maps_to_third_counter() {
        let rows = rows(&[("A1", "p4", 4), ("A2", "p4", 4), ("A3", "p4", 4)]);
        let plan = plan_awards(&tournament("Bronze Weekly"), &rows, &context());

        assert!(plan.individual.iter().all(|a| a.field == Some(PlacementField::Third)));
        assert!(plan.individual.iter().all(|a| a.points == dec!(0.2)));
        assert_eq!(plan.clubs[0].field, PlacementField::Third);
    }

    #[test]
    fn test_unknown_tier_awards_nothing() {
        let rows = rows(&[("A1", "p1", 1), ("A2", "p1", 1), ("A3", "p1", 1)]);
        let plan = plan_awards(&tournament("Friday Scrims"), &rows, &context());

        assert_eq!(plan.tier, Tier::Unknown);
        assert_eq!(plan.individual.len(), 3);
        assert!(plan.individual.iter().all(|a| a.field.is_none() && a.points.is_zero()));
        assert!(plan.clubs.is_empty());
    }

    #[test]
    fn test_unregistered_members_get_individual_credit_only() {
        let rows = rows(&[("A1", "p1", 1), ("A2", "p1", 1), ("ghost", "p1", 1)]);
        let plan = plan_awards(&tournament("Diamond Finals"), &rows, &context());

        assert!(plan.clubs.is_empty());
        let ghost = plan.individual.iter().find(|a| a.competitor_id == "GHOST").unwrap();
        assert!(!ghost.registered);
        assert_eq!(ghost.points, dec!(10));
    }

    #[test]
    fn test_podium_lists_top_four_in_order() {
        let rows = rows(&[
            ("X5", "p5", 4), ("X4", "p4", 4), ("X3", "p3", 3), ("X2", "p2", 2), ("X1", "p1", 1),
        ]);
        let plan = plan_awards(&tournament("Platinum"), &rows, &context());

        let parties: Vec<&str> = plan.podium.iter().map(|p| p.party_id.as_str()).collect();
        assert_eq!(parties, vec!["p1", "p2", "p3", "p5"]);
        assert_eq!(plan.podium[3].position, 4);
        assert_eq!(plan.individual.len(), 5);
    }
}
