//! Tests for command context and helpers

use super::*;

#[cfg(test)]
mod command_tests {
    use super::*;
    use crate::{
        cli::types::LeagueId,
        gateway::{fake::FakeGateway, Player, Standing},
    };
    use std::time::Duration;

    const HOME: TeamId = TeamId(300);

    fn context(fake: &Arc<FakeGateway>) -> CommandContext {
        let config = GatewayConfig::default().with_coalescing_window(Duration::from_millis(300));
        CommandContext::with_gateway(fake.clone(), &config)
    }

    fn target(team: Option<TeamId>) -> TeamArgs {
        TeamArgs {
            access_key: Some(AccessKey::new("secret")),
            team,
        }
    }

    fn seeded() -> Arc<FakeGateway> {
        let fake = Arc::new(FakeGateway::new());
        let mut home = Team::new(HOME, "Coastal");
        home.league_id = Some(LeagueId::new(7));
        fake.add_my_team(home);
        fake.set_players(
            HOME,
            vec![Player {
                jersey: "1".to_string(),
                csr: Some(900.0),
                ..Player::default()
            }],
        );
        fake.set_standings(LeagueId::new(7), vec![Standing::new(HOME)]);
        fake
    }

    #[test]
    fn test_resolve_team_id_order() {
        let mine = vec![Team::new(TeamId::new(5), "Mine")];

        // explicit option wins over everything
        assert_eq!(
            resolve_team_id(Some(TeamId::new(9)), &mine).unwrap(),
            TeamId::new(9)
        );

        std::env::set_var(TEAM_ENV_VAR, "44");
        assert_eq!(resolve_team_id(None, &mine).unwrap(), TeamId::new(44));

        std::env::set_var(TEAM_ENV_VAR, "not_a_number");
        assert!(resolve_team_id(None, &mine).is_err());

        std::env::remove_var(TEAM_ENV_VAR);
        assert_eq!(resolve_team_id(None, &mine).unwrap(), TeamId::new(5));

        match resolve_team_id(None, &[]).unwrap_err() {
            BrError::NoTeamSelected => {}
            other => panic!("Expected NoTeamSelected, got {:?}", other),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_team_loads_selected_club() {
        let fake = seeded();
        let ctx = context(&fake);

        let snapshot = ctx.load_team(target(Some(HOME))).await.unwrap();
        assert_eq!(snapshot.team_id, Some(HOME));
        assert_eq!(snapshot.players.items().len(), 1);
        assert_eq!(snapshot.standings.items().len(), 1);
        assert_eq!(fake.call_count("my_teams"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_team_surfaces_players_failure() {
        let fake = seeded();
        fake.fail_endpoint("players");
        let ctx = context(&fake);

        let err = ctx.load_team(target(Some(HOME))).await.unwrap_err();
        assert!(err.to_string().contains("players for team 300"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_connect_without_key_fails() {
        std::env::remove_var(crate::core::config::ACCESS_KEY_ENV_VAR);
        let ctx = context(&seeded());
        let err = ctx.connect(None).await.unwrap_err();
        assert!(matches!(err, BrError::MissingAccessKey { .. }));
    }

    #[test]
    fn test_render_table_aligns_columns() {
        let mut table = Table::new("T", &["Name", "CSR"]);
        table.push(vec![Cell::text("Longer Name"), Cell::Number(12.5)]);
        table.push(vec![Cell::Empty, Cell::Number(3.0)]);

        let text = render_table(&table);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Name         CSR");
        assert_eq!(lines[1], "Longer Name  12.50");
        assert_eq!(lines[2], "             3");
    }

    #[test]
    fn test_maybe_export_without_dir_is_noop() {
        let book = ExportBook::single("x.xlsx", Table::new("X", &["A"]));
        assert!(maybe_export(&book, None).is_ok());
    }
}
