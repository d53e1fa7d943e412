use crate::gateway::{Player, Skills};

/// Power applied to each skill in the rating formula.
pub const RATING_EXPONENT: f64 = 3.79;

/// CSR computed from the ten skills: sum of `(skill - 1) ^ 3.79`.
///
/// Skills below 1 contribute nothing rather than a NaN. The terms are summed
/// in the game's own order (speed before jumping) so results match its
/// floating point rounding.
pub fn skill_rating(skills: &Skills) -> f64 {
    [
        skills.stamina,
        skills.handling,
        skills.attack,
        skills.defense,
        skills.technique,
        skills.strength,
        skills.speed,
        skills.jumping,
        skills.agility,
        skills.kicking,
    ]
    .iter()
    .map(|&value| (f64::from(value) - 1.0).max(0.0).powf(RATING_EXPONENT))
    .sum()
}

/// Stored CSR when the gateway sends one, otherwise the computed rating.
pub fn player_rating(player: &Player) -> f64 {
    player
        .csr
        .unwrap_or_else(|| skill_rating(&player.skills))
}
