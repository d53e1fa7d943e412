//! Stadium sizing command

use crate::{
    cli::{SeatOverrides, TeamArgs},
    error::BrError,
    stats::stadium::{stadium_plan, SeatPlan, StadiumPlan},
    Result,
};

use super::CommandContext;

/// Current seating with any locally overridden areas applied.
pub fn apply_overrides(current: SeatPlan, overrides: &SeatOverrides) -> SeatPlan {
    SeatPlan {
        standing: overrides.standing.unwrap_or(current.standing),
        uncovered: overrides.uncovered.unwrap_or(current.uncovered),
        covered: overrides.covered.unwrap_or(current.covered),
        members: overrides.members_seats.unwrap_or(current.members),
        corporate: overrides.corporate.unwrap_or(current.corporate),
    }
}

pub fn render_plan(plan: &StadiumPlan) -> String {
    let small_gap = plan.small_shortfall();
    let large_gap = plan.large_shortfall();
    let mut out = format!(
        "{:<10} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
        "Area", "Current", "Small", "Needed", "Large", "Needed"
    );
    let rows = plan
        .current
        .areas()
        .into_iter()
        .zip(plan.small.areas())
        .zip(small_gap.areas())
        .zip(plan.large.areas())
        .zip(large_gap.areas());
    for ((((current, small), small_need), large), large_need) in rows {
        out.push_str(&format!(
            "{:<10} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
            current.0, current.1, small.1, small_need.1, large.1, large_need.1
        ));
    }
    out.push_str(&format!(
        "{:<10} {:>9} {:>9} {:>9} {:>9} {:>9}\n",
        "Total",
        plan.current.total(),
        plan.small.total(),
        small_gap.total(),
        plan.large.total(),
        large_gap.total()
    ));
    out
}

/// Handle the stadium command
pub async fn handle_stadium(
    ctx: &CommandContext,
    target: TeamArgs,
    members: Option<u32>,
    overrides: SeatOverrides,
    as_json: bool,
) -> Result<()> {
    let snapshot = ctx.load_team(target).await?;
    let team_id = snapshot.team_id.ok_or(BrError::NoTeamSelected)?;
    let directory = ctx.directory();
    directory.wait_idle().await;
    let team = directory.lookup(team_id);

    let current = team.as_ref().map(SeatPlan::from_team).unwrap_or_default();
    let current = apply_overrides(current, &overrides);
    let members = members
        .or_else(|| team.as_ref().and_then(|t| t.members))
        .unwrap_or(0);

    let Some(plan) = stadium_plan(members, current) else {
        println!("No membership figure for this club; pass --members to plan a stadium");
        return Ok(());
    };

    if as_json {
        let out = serde_json::json!({
            "plan": plan,
            "small_shortfall": plan.small_shortfall(),
            "large_shortfall": plan.large_shortfall(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("Stadium plan for {} members", plan.members);
        print!("{}", render_plan(&plan));
    }
    Ok(())
}
