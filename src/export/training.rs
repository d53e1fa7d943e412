//! Training report export.

use crate::{
    export::{Cell, ExportBook, Table},
    gateway::TrainingReport,
    stats::averages::round2,
};

pub const TRAINING_COLUMNS: &[&str] = &["Metric", "Value"];
pub const INJURY_COLUMNS: &[&str] = &["Player", "Injury", "Weeks Out"];

fn metric(label: &str, value: impl Into<Cell>) -> Vec<Cell> {
    vec![Cell::text(label), value.into()]
}

/// Report metrics on one sheet and the injury list on another.
pub fn training_book(report: &TrainingReport) -> ExportBook {
    let mut metrics = Table::new("Training", TRAINING_COLUMNS);
    metrics.push(metric("Season", report.season));
    metrics.push(metric("Round", report.round));
    metrics.push(metric("Total Players", report.total_players));
    metrics.push(metric("Average Age", report.average_age.map(round2)));
    metrics.push(metric("Average CSR", report.average_csr.map(round2)));
    metrics.push(metric("Average Fitness", report.average_fitness.map(round2)));
    metrics.push(metric("Training Intensity", report.training_intensity.clone()));
    metrics.push(metric("Focus Area", report.focus_area.clone()));
    metrics.push(metric("Morale", report.morale.clone()));
    metrics.push(metric("Notes", report.notes.clone()));

    let mut injuries = Table::new("Injuries", INJURY_COLUMNS);
    for injury in &report.injuries {
        injuries.push(vec![
            Cell::text(&injury.player_name),
            Cell::text(&injury.injury_type),
            injury.weeks_out.into(),
        ]);
    }

    ExportBook {
        file_name: "training.xlsx".to_string(),
        sheets: vec![metrics, injuries],
    }
}
