//! Ranked ladder model: tiers, divisions and the LP-equivalent scalar.

use serde::{Deserialize, Serialize};

/// Ladder tiers, lowest first. Master and above are apex tiers that sit on
/// top of the fixed division ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Tier {
    Iron,
    Bronze,
    Silver,
    Gold,
    Platinum,
    Emerald,
    Diamond,
    Master,
    Grandmaster,
    Challenger,
}

impl Tier {
    /// Position on the ladder, Iron = 0.
    pub fn ordinal(self) -> i64 {
        self as i64
    }
}

/// Divisions within a tier. IV is the entry division, I borders promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Division {
    I,
    II,
    III,
    IV,
}

impl Division {
    /// Divisions climbed since entering the tier (IV = 0, I = 3).
    pub fn promotion_steps(self) -> i64 {
        match self {
            Division::IV => 0,
            Division::III => 1,
            Division::II => 2,
            Division::I => 3,
        }
    }
}

/// A ranked standing in one queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rank {
    pub tier: Tier,
    pub division: Division,
    pub league_points: i32,
}

/// LP spanned by one division.
const LP_PER_DIVISION: i64 = 100;
/// Divisions per tier.
const DIVISIONS_PER_TIER: i64 = 4;

impl Rank {
    pub fn new(tier: Tier, division: Division, league_points: i32) -> Self {
        Self {
            tier,
            division,
            league_points,
        }
    }

    /// The floor of the ladder, used where a player has no measurable rank.
    pub fn lowest() -> Self {
        Self::new(Tier::Iron, Division::IV, 0)
    }

    /// Collapse tier, division and LP into a single comparable scalar.
    ///
    /// Silver I 50 LP -> 1150, Gold II 50 LP -> 1450; a climb between the
    /// two is worth 300 LP-equivalent.
    pub fn ladder_points(&self) -> i64 {
        self.tier.ordinal() * DIVISIONS_PER_TIER * LP_PER_DIVISION
            + self.division.promotion_steps() * LP_PER_DIVISION
            + i64::from(self.league_points)
    }
}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.ladder_points().cmp(&other.ladder_points())
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:?} {:?} {} LP",
            self.tier, self.division, self.league_points
        )
    }
}
