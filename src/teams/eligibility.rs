use crate::domain::ClubRef;

use super::aggregation::Team;

pub const CLUB_TEAM_SIZE: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct Eligibility {
    pub team_eligible_for_club_award: bool,
    pub club: Option<ClubRef>,
}

impl Eligibility {
    fn ineligible() -> Self {
        Self {
            team_eligible_for_club_award: false,
            club: None,
        }
    }

    pub fn club_name(&self) -> Option<&str> {
        self.club.as_ref().map(|c| c.name.as_str())
    }
}

/// A team earns club credit only as exactly three registered members of the same club.
/// Individual awards do not depend on this.
pub fn evaluate(team: &Team) -> Eligibility {
    if team.members.len() != CLUB_TEAM_SIZE {
        return Eligibility::ineligible();
    }

    let mut clubs = team.members.iter().map(|m| m.club.as_ref().filter(|_| m.registered));
    let Some(Some(first)) = clubs.next() else {
        return Eligibility::ineligible();
    };

    if clubs.all(|club| club.is_some_and(|c| c.id == first.id)) {
        Eligibility {
            team_eligible_for_club_award: true,
            club: Some(first.clone()),
        }
    } else {
        Eligibility::ineligible()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::teams::aggregation::TeamMember;

    fn club(id: i64) -> ClubRef {
        ClubRef {
            id,
            name: format!("Club {id}"),
        }
    }

    fn member(id: &str, club: Option<ClubRef>, registered: bool) -> TeamMember {
        TeamMember {
            competitor_id: id.to_string(),
            name: registered.then(|| id.to_string()),
            placement: 1,
            registered,
            club,
        }
    }

    fn team(members: Vec<TeamMember>) -> Team {
        Team {
            party_id: "p".to_string(),
            members,
        }
    }

    #[test]
    fn test_three_same_club_members_are_eligible() {
        let result = evaluate(&team(vec![
            member("a", Some(club(1)), true),
            member("b", Some(club(1)), true),
            member("c", Some(club(1)), true),
        ]));

        assert!(result.team_eligible_for_club_award);
        assert_eq!(result.club_name(), Some("Club 1"));
    }

    #[test]
    fn test_unregistered_member_blocks_club_award() {
        let result = evaluate(&team(vec![
            member("a", Some(club(1)), true),
            member("b", Some(club(1)), true),
            member("c", None, false),
        ]));
        assert!(!result.team_eligible_for_club_award);
        assert_eq!(result.club, None);
    }

    #[test]
    fn test_clubless_or_mixed_teams_are_not_eligible() {
        let clubless = evaluate(&team(vec![
            member("a", None, true),
            member("b", Some(club(1)), true),
            member("c", Some(club(1)), true),
        ]));
        let mixed = evaluate(&team(vec![
            member("a", Some(club(1)), true),
            member("b", Some(club(2)), true),
            member("c", Some(club(1)), true),
        ]));

        assert!(!clubless.team_eligible_for_club_award);
        assert!(!mixed.team_eligible_for_club_award);
    }

    #[test]
    fn test_wrong_team_sizes_are_never_eligible() {
        let pair = evaluate(&team(vec![
            member("a", Some(club(1)), true),
            member("b", Some(club(1)), true),
        ]));
        let four = evaluate(&team(vec![
            member("a", Some(club(1)), true),
            member("b", Some(club(1)), true),
            member("c", Some(club(1)), true),
            member("d", Some(club(1)), true),
        ]));

        assert!(!pair.team_eligible_for_club_award);
        assert!(!four.team_eligible_for_club_award);
    }
}
