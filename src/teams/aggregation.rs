use std::collections::HashMap;

use log::debug;

use crate::domain::{ClubRef, ParticipantRow, RosterIndex};

pub const TOP_TEAMS: usize = 4;

/// Competitor within a team, resolved against the roster
#[derive(Debug, Clone, PartialEq)]
pub struct TeamMember {
    pub competitor_id: String,
    pub name: Option<String>,
    pub placement: u8,
    pub registered: bool,
    pub club: Option<ClubRef>,
}

impl TeamMember {
    fn resolve(row: &ParticipantRow, roster: &RosterIndex) -> Self {
        match roster.lookup(&row.competitor_id) {
            Some(entry) => Self {
                competitor_id: row.competitor_id.clone(),
                name: Some(entry.name.clone()),
                placement: row.placement,
                registered: true,
                club: entry.club.clone(),
            },
            None => Self {
                competitor_id: row.competitor_id.clone(),
                name: None,
                placement: row.placement,
                registered: false,
                club: None,
            },
        }
    }
}

/// Competitors entered together under one party id in one tournament
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub party_id: String,
    pub members: Vec<TeamMember>,
}

impl Team {
    fn new(party_id: &str) -> Self {
        Self {
            party_id: party_id.to_string(),
            members: Vec::new(),
        }
    }

    /// Best (lowest) placement among the members
    pub fn placement(&self) -> u8 {
        self.members
            .iter()
            .map(|m| m.placement)
            .min()
            .unwrap_or(u8::MAX)
    }

    pub fn competitor_ids(&self) -> Vec<&str> {
        self.members.iter().map(|m| m.competitor_id.as_str()).collect()
    }

    pub fn club_names(&self) -> Vec<Option<&str>> {
        self.members
            .iter()
            .map(|m| m.club.as_ref().map(|c| c.name.as_str()))
            .collect()
    }

    pub fn has_unregistered_members(&self) -> bool {
        self.members.iter().any(|m| !m.registered)
    }

    fn contains(&self, competitor_id: &str) -> bool {
        self.members.iter().any(|m| m.competitor_id == competitor_id)
    }
}

/// Teams of one tournament in the order their party ids were first seen
#[derive(Debug, Clone, Default)]
pub struct TeamSet {
    teams: Vec<Team>,
    by_party: HashMap<String, usize>,
}

impl TeamSet {
    pub fn get(&self, party_id: &str) -> Option<&Team> {
        self.by_party.get(party_id).map(|&idx| &self.teams[idx])
    }

    pub fn len(&self) -> usize {
        self.teams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    fn team_mut(&mut self, party_id: &str) -> &mut Team {
        let idx = match self.by_party.get(party_id) {
            Some(&idx) => idx,
            None => {
                self.teams.push(Team::new(party_id));
                self.by_party.insert(party_id.to_string(), self.teams.len() - 1);
                self.teams.len() - 1
            }
        };
        &mut self.teams[idx]
    }
}

/// Group participant rows into teams. Invalid rows are skipped; competitors
/// missing from the roster join their team as unregistered members.
pub fn group(rows: &[ParticipantRow], roster: &RosterIndex) -> TeamSet {
    let mut teams = TeamSet::default();

    for row in rows {
        if !row.is_valid() {
            debug!("Skipping invalid participant row: {:?}", row);
            continue;
        }

        let team = teams.team_mut(&row.party_id);
        if team.contains(&row.competitor_id) {
            debug!(
                "Skipping duplicate row for {} in party {}",
                row.competitor_id, row.party_id
            );
            continue;
        }
        team.members.push(TeamMember::resolve(row, roster));
    }

    teams
}

/// Teams ordered by best placement; ties keep first-seen order.
pub fn order_by_placement(teams: TeamSet) -> Vec<Team> {
    let mut ordered = teams.teams;
    ordered.sort_by_key(Team::placement);
    ordered
}

pub fn top_four(ordered: &[Team]) -> &[Team] {
    &ordered[..ordered.len().min(TOP_TEAMS)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RosterEntry;

    fn roster() -> RosterIndex {
        let club_a = ClubRef {
            id: 1,
            name: "Club A".to_string(),
        };
        [
            ("A1", Some(club_a.clone())),
            ("A2", Some(club_a.clone())),
            ("A3", Some(club_a)),
            ("FREE", None),
        ]
        .into_iter()
        .map(|(id, club)| {
            (
                id.to_string(),
                RosterEntry {
                    name: format!("Player {id}"),
                    club,
                },
            )
        })
        .collect()
    }

    #[test]
    fn test_group_and_order_four_teams() {
        let rows = vec![
            ParticipantRow::new("x1", "p3", 3),
            ParticipantRow::new("x2", "p1", 1),
            ParticipantRow::new("x3", "p4", 4),
            ParticipantRow::new("x4", "p2", 2),
            ParticipantRow::new("x5", "p1", 1),
        ];

        let teams = group(&rows, &roster());
        assert_eq!(teams.len(), 4);
        assert_eq!(teams.get("p1").map(|t| t.members.len()), Some(2));

        let ordered = order_by_placement(teams);
        let parties: Vec<&str> = ordered.iter().map(|t| t.party_id.as_str()).collect();
        assert_eq!(parties, vec!["p1", "p2", "p3", "p4"]);
        assert_eq!(ordered.iter().map(Team::placement).collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_team_placement_is_minimum_of_members() {
        let rows = vec![
            ParticipantRow::new("x1", "p", 3),
            ParticipantRow::new("x2", "p", 2),
            ParticipantRow::new("x3", "p", 4),
        ];
        let teams = group(&rows, &roster());
        assert_eq!(teams.get("p").map(Team::placement), Some(2));
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let rows = vec![
            ParticipantRow::new("x1", "late", 2),
            ParticipantRow::new("x2", "early", 2),
            ParticipantRow::new("x3", "winner", 1),
        ];
        let ordered = order_by_placement(group(&rows, &roster()));
        let parties: Vec<&str> = ordered.iter().map(|t| t.party_id.as_str()).collect();
        assert_eq!(parties, vec!["winner", "late", "early"]);
    }

    #[test]
    fn test_invalid_and_duplicate_rows_are_skipped() {
        let rows = vec![
            ParticipantRow::new("a1", "p", 1),
            ParticipantRow::new("A 1", "p", 1),
            ParticipantRow::new("", "p", 1),
            ParticipantRow::new("a2", "", 1),
            ParticipantRow::new("a3", "p", 7),
        ];
        let teams = group(&rows, &roster());
        assert_eq!(teams.len(), 1);
        assert_eq!(teams.get("p").map(Team::competitor_ids), Some(vec!["A1"]));
    }

    #[test]
    fn test_unregistered_members_are_kept() {
        let rows = vec![
            ParticipantRow::new("a1", "p", 1),
            ParticipantRow::new("ghost", "p", 1),
            ParticipantRow::new("free", "p", 1),
        ];
        let teams = group(&rows, &roster());
        let team = teams.get("p").unwrap();

        assert_eq!(team.members.len(), 3);
        assert!(team.has_unregistered_members());
        assert_eq!(team.club_names(), vec![Some("Club A"), None, None]);
        assert_eq!(team.members[1].name, None);
        assert!(team.members[2].registered);
    }

    #[test]
    fn test_top_four_bounds() {
        let rows: Vec<ParticipantRow> = (1..=4)
            .flat_map(|p| {
                [
                    ParticipantRow::new(&format!("a{p}"), &format!("p{p}"), p),
                    ParticipantRow::new(&format!("b{p}"), &format!("q{p}"), p),
                ]
            })
            .collect();
        let ordered = order_by_placement(group(&rows, &roster()));

        assert_eq!(ordered.len(), 8);
        assert_eq!(top_four(&ordered).len(), 4);
        assert!(top_four(&[]).is_empty());
    }
}
