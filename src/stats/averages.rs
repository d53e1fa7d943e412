//! Squad averages over all players, the top 15 and the top 22.

use std::cmp::Ordering;

use serde::Serialize;

use crate::{gateway::Player, stats::rating::player_rating};

/// Size of a starting fifteen.
pub const TOP_15: usize = 15;
/// Size of a match-day squad.
pub const TOP_22: usize = 22;

/// Mean of every tracked attribute, rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Averages {
    pub age: f64,
    pub csr: f64,
    pub energy: f64,
    pub form: f64,
    pub stamina: f64,
    pub handling: f64,
    pub attack: f64,
    pub defense: f64,
    pub technique: f64,
    pub strength: f64,
    pub jumping: f64,
    pub speed: f64,
    pub agility: f64,
    pub kicking: f64,
    pub salary: f64,
}

impl Averages {
    /// Label/value pairs in display order.
    pub fn rows(&self) -> [(&'static str, f64); 15] {
        [
            ("Age", self.age),
            ("CSR", self.csr),
            ("Energy", self.energy),
            ("Form", self.form),
            ("Stamina", self.stamina),
            ("Handling", self.handling),
            ("Attack", self.attack),
            ("Defense", self.defense),
            ("Technique", self.technique),
            ("Strength", self.strength),
            ("Jumping", self.jumping),
            ("Speed", self.speed),
            ("Agility", self.agility),
            ("Kicking", self.kicking),
            ("Salary", self.salary),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TeamAverages {
    pub all: Averages,
    pub top15: Averages,
    pub top22: Averages,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Players by descending rating; equal ratings keep their input order.
pub fn ranked_by_rating(players: &[Player]) -> Vec<&Player> {
    let mut ranked: Vec<(&Player, f64)> = players.iter().map(|p| (p, player_rating(p))).collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    ranked.into_iter().map(|(p, _)| p).collect()
}

/// Averages of one group. An empty group averages to zero everywhere.
pub fn group_averages(group: &[&Player]) -> Averages {
    if group.is_empty() {
        return Averages::default();
    }

    let n = group.len() as f64;
    let mean = |f: &dyn Fn(&Player) -> f64| round2(group.iter().map(|p| f(*p)).sum::<f64>() / n);

    Averages {
        age: mean(&|p| f64::from(p.age)),
        csr: mean(&player_rating),
        energy: mean(&|p| f64::from(p.energy)),
        form: mean(&|p| f64::from(p.form)),
        stamina: mean(&|p| f64::from(p.skills.stamina)),
        handling: mean(&|p| f64::from(p.skills.handling)),
        attack: mean(&|p| f64::from(p.skills.attack)),
        defense: mean(&|p| f64::from(p.skills.defense)),
        technique: mean(&|p| f64::from(p.skills.technique)),
        strength: mean(&|p| f64::from(p.skills.strength)),
        jumping: mean(&|p| f64::from(p.skills.jumping)),
        speed: mean(&|p| f64::from(p.skills.speed)),
        agility: mean(&|p| f64::from(p.skills.agility)),
        kicking: mean(&|p| f64::from(p.skills.kicking)),
        salary: mean(&|p| p.salary),
    }
}

pub fn team_averages(players: &[Player]) -> TeamAverages {
    let ranked = ranked_by_rating(players);
    let all: Vec<&Player> = players.iter().collect();

    TeamAverages {
        all: group_averages(&all),
        top15: group_averages(&ranked[..ranked.len().min(TOP_15)]),
        top22: group_averages(&ranked[..ranked.len().min(TOP_22)]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::Skills;

    fn rated(csr: f64, age: u32) -> Player {
        Player {
            csr: Some(csr),
            age,
            ..Player::default()
        }
    }

    #[test]
    fn test_empty_group_is_all_zero() {
        let averages = team_averages(&[]);
        assert_eq!(averages, TeamAverages::default());
        for (_, value) in averages.top15.rows() {
            assert_eq!(value, 0.0);
            assert!(!value.is_nan());
        }
    }

    #[test]
    fn test_top_groups_take_highest_rated() {
        let players: Vec<Player> = (1..=30).map(|i| rated(f64::from(i) * 100.0, i)).collect();
        let averages = team_averages(&players);

        // top 15 are csr 1600..=3000, ages 16..=30
        assert_eq!(averages.top15.csr, 2300.0);
        assert_eq!(averages.top15.age, 23.0);
        // top 22 are csr 900..=3000
        assert_eq!(averages.top22.csr, 1950.0);
        assert_eq!(averages.all.csr, 1550.0);
    }

    #[test]
    fn test_small_squad_uses_everyone_for_top_groups() {
        let players = vec![rated(1000.0, 20), rated(2000.0, 30)];
        let averages = team_averages(&players);
        assert_eq!(averages.top15, averages.all);
        assert_eq!(averages.top22, averages.all);
    }

    #[test]
    fn test_rounds_to_two_decimals() {
        let players = vec![rated(1.0, 20), rated(1.0, 21), rated(1.0, 21)];
        let averages = team_averages(&players);
        assert_eq!(averages.all.age, 20.67);
    }

    #[test]
    fn test_youth_ratings_are_computed() {
        let youth = Player {
            csr: None,
            skills: Skills::uniform(2),
            ..Player::default()
        };
        let averages = team_averages(&[youth]);
        assert_eq!(averages.all.csr, 10.0);
        assert_eq!(averages.all.stamina, 2.0);
    }

    #[test]
    fn test_ranking_is_stable_on_ties() {
        let mut a = rated(500.0, 20);
        a.lname = "First".to_string();
        let mut b = rated(500.0, 21);
        b.lname = "Second".to_string();
        let players = vec![a, b];

        let ranked = ranked_by_rating(&players);
        assert_eq!(ranked[0].lname, "First");
        assert_eq!(ranked[1].lname, "Second");
    }
}
