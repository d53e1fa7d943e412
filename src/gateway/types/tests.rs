//! Unit tests for gateway payload decoding

use super::*;
use serde_json::json;

#[cfg(test)]
mod decoding_tests {
    use super::*;

    fn player_json() -> Value {
        json!({
            "id": "9001",
            "jersey": "255",
            "fname": "Siya",
            "lname": "Kolisi",
            "position": "Flanker",
            "age": "31",
            "csr": "123456.7",
            "energy": 100,
            "form": "6",
            "leadership": "14",
            "experience": 12,
            "discipline": "9",
            "aggression": "11",
            "height": "188",
            "weight": "110",
            "nationality": "ZA",
            "dualnationality": "",
            "capped_for": "ZA",
            "salary": "45000",
            "stamina": "15",
            "handling": "14",
            "attack": 13,
            "defense": "17",
            "technique": "16",
            "strength": "18",
            "jumping": "12",
            "speed": "11",
            "agility": "10",
            "kicking": "3"
        })
    }

    #[test]
    fn test_player_decodes_string_numbers() {
        let player: Player = serde_json::from_value(player_json()).unwrap();

        assert_eq!(player.id, Some(PlayerId::new(9001)));
        assert_eq!(player.jersey, "255");
        assert_eq!(player.age, 31);
        assert_eq!(player.csr, Some(123456.7));
        assert_eq!(player.form, 6);
        assert_eq!(player.salary, 45000.0);
        assert_eq!(player.skills.stamina, 15);
        assert_eq!(player.skills.attack, 13);
        assert_eq!(player.skills.kicking, 3);
        assert_eq!(player.capped_for.as_deref(), Some("ZA"));
    }

    #[test]
    fn test_player_empty_dual_nationality_is_absent() {
        let player: Player = serde_json::from_value(player_json()).unwrap();
        assert_eq!(player.dualnationality, None);
    }

    #[test]
    fn test_youth_player_without_csr() {
        let mut raw = player_json();
        raw.as_object_mut().unwrap().remove("csr");
        raw["jersey"] = json!(7);

        let player: Player = serde_json::from_value(raw).unwrap();
        assert_eq!(player.csr, None);
        assert_eq!(player.jersey, "7");
    }

    #[test]
    fn test_team_decodes_optional_fields() {
        let team: Team = serde_json::from_value(json!({
            "id": "17",
            "name": "Harbour Gulls",
            "leagueid": "301",
            "country_iso": "NZ",
            "average_top15_csr": "250000.5",
            "ranking_points": 71.25,
            "national_rank": "3",
            "world_rank": "",
            "stadium_standing": "4000",
            "members": "2100"
        }))
        .unwrap();

        assert_eq!(team.id, TeamId::new(17));
        assert_eq!(team.league_id, Some(LeagueId::new(301)));
        assert_eq!(team.average_top15_csr, Some(250000.5));
        assert_eq!(team.national_rank, Some(3));
        assert_eq!(team.world_rank, None);
        assert_eq!(team.stadium_standing, Some(4000));
        assert_eq!(team.members, Some(2100));
        assert_eq!(team.regional_rank, None);
    }

    #[test]
    fn test_team_zero_league_is_absent() {
        let team: Team = serde_json::from_value(json!({"id": 1, "name": "A", "leagueid": 0})).unwrap();
        assert_eq!(team.league_id, None);
    }

    #[test]
    fn test_standing_renames() {
        let standing: Standing = serde_json::from_value(json!({
            "teamid": "44",
            "played": "10",
            "w": "7",
            "d": "1",
            "l": "2",
            "for": "260",
            "against": "180",
            "b1": "1",
            "b2": "4",
            "points": "35"
        }))
        .unwrap();

        assert_eq!(standing.team_id, TeamId::new(44));
        assert_eq!(standing.won, 7);
        assert_eq!(standing.points_for, 260);
        assert_eq!(standing.bonus_tries, 4);
        assert_eq!(standing.points, 35);
    }

    #[test]
    fn test_fixture_with_php_empty_summary() {
        let fixture: Fixture = serde_json::from_value(json!({
            "id": "5",
            "season": "12",
            "round": "3",
            "matchstart": "2024-05-04 15:00:00",
            "competition": "LeagueMatch",
            "hometeamid": "1",
            "guestteamid": 2,
            "matchSummary": [],
            "reporterSummary": null
        }))
        .unwrap();

        assert_eq!(fixture.id, FixtureId::new(5));
        assert!(fixture.match_summary.is_none());
        assert!(fixture.reporter_summary.is_none());
        assert_eq!(fixture.guest_team_id, TeamId::new(2));
    }

    #[test]
    fn test_fixture_with_summary() {
        let fixture: Fixture = serde_json::from_value(json!({
            "id": 6,
            "hometeamid": 1,
            "guestteamid": 2,
            "matchSummary": {
                "home": {"points": "21", "tries": {"player": [{"number": "2"}, {"number": 1}]}},
                "guest": {"points": 0, "tries": []},
                "attendance": {"standing": "100", "covered": 50}
            }
        }))
        .unwrap();

        let summary = fixture.match_summary.unwrap();
        assert_eq!(summary.home.points, 21.0);
        assert_eq!(summary.guest.points, 0.0);
        let attendance = summary.attendance.unwrap();
        assert_eq!(attendance.standing, 100);
        assert_eq!(attendance.covered, 50);
        assert_eq!(attendance.members, 0);
    }

    #[test]
    fn test_collection_values_from_keyed_object() {
        let teams: Vec<Team> = collection_values(json!({
            "10": {"id": 10, "name": "Ten"},
            "9": {"id": 9, "name": "Nine"},
            "2": {"id": 2, "name": "Two"}
        }));

        let ids: Vec<u64> = teams.iter().map(|t| t.id.as_u64()).collect();
        assert_eq!(ids, vec![2, 9, 10]);
    }

    #[test]
    fn test_collection_values_from_list_keeps_order() {
        let teams: Vec<Team> = collection_values(json!([
            {"id": 10, "name": "Ten"},
            {"id": 2, "name": "Two"}
        ]));

        assert_eq!(teams[0].id, TeamId::new(10));
        assert_eq!(teams[1].id, TeamId::new(2));
    }

    #[test]
    fn test_collection_values_skips_malformed_entries() {
        let teams: Vec<Team> = collection_values(json!({
            "1": {"id": "1", "name": "One"},
            "2": {"id": "2", "name": "Two"},
            "3": false,
            "4": {"name": "No Id"},
            "5": null
        }));

        let ids: Vec<u64> = teams.iter().map(|t| t.id.as_u64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_teams_payload_keeps_valid_entries() {
        let envelope: Envelope<TeamsPayload> = serde_json::from_value(json!({
            "data": {"status": "Ok", "teams": {
                "7": {"id": "7", "name": "Seven"},
                "8": false
            }}
        }))
        .unwrap();

        let teams = envelope.into_payload("/teams/7,8").unwrap().teams.unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(teams[0].name, "Seven");
    }

    #[test]
    fn test_envelope_ok_status() {
        let envelope: Envelope<TeamsPayload> = serde_json::from_value(json!({
            "data": {"status": "Ok", "teams": {"3": {"id": "3", "name": "Three"}}}
        }))
        .unwrap();

        let payload = envelope.into_payload("/teams/3").unwrap();
        assert_eq!(payload.teams.unwrap().len(), 1);
    }

    #[test]
    fn test_envelope_failure_status() {
        let envelope: Envelope<TeamsPayload> = serde_json::from_value(json!({
            "data": {"status": "Invalid access key"}
        }))
        .unwrap();

        match envelope.into_payload("/mydata/teams") {
            Err(BrError::Status { endpoint, status }) => {
                assert_eq!(endpoint, "/mydata/teams");
                assert_eq!(status, "Invalid access key");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[test]
    fn test_envelope_missing_payload_is_none() {
        let envelope: Envelope<PlayersPayload> =
            serde_json::from_value(json!({"data": {"status": "Ok"}})).unwrap();
        assert!(envelope.into_payload("/team/1/players").unwrap().players.is_none());
    }

    #[test]
    fn test_training_report_fields_beside_status() {
        let envelope: Envelope<TrainingReport> = serde_json::from_value(json!({
            "data": {
                "status": "Ok",
                "season": "12",
                "round": "4",
                "total_players": "38",
                "average_age": "24.6",
                "average_csr": "180000",
                "average_fitness": "91",
                "training_intensity": "High",
                "injuries": [
                    {"player_name": "J. Smith", "injury_type": "Hamstring", "weeks_out": "3"}
                ]
            }
        }))
        .unwrap();

        let report = envelope.into_payload("/trainingreport/1").unwrap();
        assert_eq!(report.season, 12);
        assert_eq!(report.total_players, 38);
        assert_eq!(report.average_age, Some(24.6));
        assert_eq!(report.training_intensity.as_deref(), Some("High"));
        assert_eq!(report.focus_area, None);
        assert_eq!(report.injuries.len(), 1);
        assert_eq!(report.injuries[0].weeks_out, 3);
    }

    #[test]
    fn test_staff_payload() {
        let envelope: Envelope<StaffPayload> = serde_json::from_value(json!({
            "data": {
                "status": "Ok",
                "staff": {
                    "trainers": [{"type": "fitness", "name": "Ann", "level": "5"}],
                    "coach": [{"name": "Bob", "level": 7}]
                }
            }
        }))
        .unwrap();

        let staff = envelope.into_payload("/team/1/staff").unwrap().staff.unwrap();
        assert_eq!(staff.trainers[0].kind, "fitness");
        assert_eq!(staff.trainers[0].level, 5);
        assert_eq!(staff.coach[0].name, "Bob");
        assert!(staff.youth_coach.is_empty());
    }

    #[test]
    fn test_skills_values_order() {
        let skills = Skills {
            stamina: 1,
            handling: 2,
            attack: 3,
            defense: 4,
            technique: 5,
            strength: 6,
            jumping: 7,
            speed: 8,
            agility: 9,
            kicking: 10,
        };
        assert_eq!(skills.values(), [1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(Skills::uniform(4).values(), [4; 10]);
    }
}
