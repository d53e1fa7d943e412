//! HTTP gateway tests against mocked API responses

use super::*;
use crate::core::ACCESS_KEY_HEADER;
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn key() -> AccessKey {
    AccessKey::new("member-key")
}

#[cfg(test)]
mod http_tests {
    use super::*;

    #[tokio::test]
    async fn test_teams_by_ids_joins_ids_and_sends_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/teams/3,7"))
            .and(header(ACCESS_KEY_HEADER, "member-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "status": "Ok",
                    "teams": {
                        "3": {"id": "3", "name": "Three Rivers"},
                        "7": {"id": "7", "name": "Seven Oaks"}
                    }
                }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let teams = gateway
            .teams_by_ids(&key(), &[TeamId::new(3), TeamId::new(7)])
            .await
            .expect("teams_by_ids should succeed against mock server");

        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].name, "Three Rivers");
        assert_eq!(teams[1].id, TeamId::new(7));
    }

    #[tokio::test]
    async fn test_teams_by_ids_empty_does_not_call() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let teams = gateway.teams_by_ids(&key(), &[]).await.unwrap();
        assert!(teams.is_empty());
    }

    #[tokio::test]
    async fn test_business_failure_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team/12/players"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"status": "Access denied"}
            })))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let err = gateway
            .team_players(&key(), TeamId::new(12))
            .await
            .unwrap_err();

        assert!(err.is_business());
        match err {
            BrError::Status { endpoint, status } => {
                assert_eq!(endpoint, "/team/12/players");
                assert_eq!(status, "Access denied");
            }
            other => panic!("Expected Status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_payload_is_no_data() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/mydata/teams"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"status": "Ok"}})),
            )
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let err = gateway.my_teams(&key()).await.unwrap_err();

        assert!(matches!(err, BrError::NoData { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_on_http_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixtures/5"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let err = gateway.fixtures(&key(), TeamId::new(5)).await.unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_malformed_body_is_transport_failure() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/team/5/youth"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let err = gateway.team_youth(&key(), TeamId::new(5)).await.unwrap_err();

        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_league_standings() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/league/301/standings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "status": "Ok",
                    "standings": [
                        {"teamid": "1", "played": "3", "w": "2", "d": "0", "l": "1", "points": "9"},
                        {"teamid": "2", "played": "3", "w": "1", "d": "0", "l": "2", "points": "5"}
                    ]
                }
            })))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let standings = gateway
            .league_standings(&key(), LeagueId::new(301))
            .await
            .unwrap();

        assert_eq!(standings.len(), 2);
        assert_eq!(standings[0].points, 9);
        assert_eq!(standings[1].team_id, TeamId::new(2));
    }

    #[tokio::test]
    async fn test_fixture_statistics_picks_entry() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixturestatistics/88"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "status": "Ok",
                    "fixtures": {"88": {"tackles": {"home": 120, "guest": 98}}}
                }
            })))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let stats = gateway
            .fixture_statistics(&key(), FixtureId::new(88))
            .await
            .unwrap();

        assert_eq!(stats["tackles"]["home"], 120);
    }

    #[tokio::test]
    async fn test_fixture_statistics_missing_entry() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/fixturestatistics/89"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"status": "Ok", "fixtures": {}}
            })))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let err = gateway
            .fixture_statistics(&key(), FixtureId::new(89))
            .await
            .unwrap_err();

        assert!(matches!(err, BrError::NoData { .. }));
    }

    #[tokio::test]
    async fn test_player_history_passthrough() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/player/41/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {"status": "Ok", "history": [{"event": "signed"}]}
            })))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let history = gateway
            .player_history(&key(), PlayerId::new(41))
            .await
            .unwrap();

        assert_eq!(history["history"][0]["event"], "signed");
        assert!(history.get("status").is_none());
    }

    #[tokio::test]
    async fn test_teams_by_ids_keeps_valid_entries_of_mixed_batch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/teams/1,2,3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "status": "Ok",
                    "teams": {
                        "1": {"id": "1", "name": "One"},
                        "2": {"id": "2", "name": "Two"},
                        "3": false
                    }
                }
            })))
            .mount(&mock_server)
            .await;

        let gateway = HttpGateway::with_base_url(&mock_server.uri()).unwrap();
        let teams = gateway
            .teams_by_ids(&key(), &[TeamId::new(1), TeamId::new(2), TeamId::new(3)])
            .await
            .unwrap();

        let names: Vec<&str> = teams.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["One", "Two"]);
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[TeamId::new(1), TeamId::new(22)]), "1,22");
        assert_eq!(join_ids(&[]), "");
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let gateway = HttpGateway::with_base_url("http://localhost:9/api/").unwrap();
        assert_eq!(gateway.base_url(), "http://localhost:9/api");
    }
}
