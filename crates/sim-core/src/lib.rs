#![deny(warnings)]

//! Core domain models and invariants for the batting simulation.
//!
//! This crate defines serializable types shared across the engine with
//! validation helpers to guarantee basic roster invariants.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Number of batters in a lineup.
pub const LINEUP_SIZE: usize = 9;

/// Innings per game. Every game plays all of them; ties stand.
pub const INNINGS_PER_GAME: usize = 9;

/// Default number of games in a simulated season.
pub const DEFAULT_SEASON_GAMES: u32 = 143;

/// Cumulative batting counting stats.
///
/// Extra-base hits (`doubles`, `triples`, `home_runs`) are a subset of
/// `hits`, never additive to it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattingLine {
    /// Official at-bats (plate appearances minus walks, HBP, and sac flies).
    pub at_bats: u32,
    /// All hits, including extra-base hits.
    pub hits: u32,
    /// Two-base hits.
    pub doubles: u32,
    /// Three-base hits.
    pub triples: u32,
    /// Home runs.
    pub home_runs: u32,
    /// Bases on balls.
    pub walks: u32,
    /// Times hit by a pitch.
    pub hit_by_pitch: u32,
    /// Sacrifice flies (outs that score the runner from third).
    pub sacrifice_flies: u32,
}

impl BattingLine {
    /// Hits that were not doubles, triples, or home runs. Saturates rather
    /// than underflowing on a line that violates the hits invariant.
    pub fn singles(&self) -> u32 {
        self.hits
            .saturating_sub(self.doubles + self.triples + self.home_runs)
    }

    /// Plate appearances: at-bats plus walks, hit-by-pitch, and sac flies.
    pub fn plate_appearances(&self) -> u32 {
        self.at_bats + self.walks + self.hit_by_pitch + self.sacrifice_flies
    }

    /// Field-wise accumulate.
    pub fn add(&mut self, other: &BattingLine) {
        self.at_bats += other.at_bats;
        self.hits += other.hits;
        self.doubles += other.doubles;
        self.triples += other.triples;
        self.home_runs += other.home_runs;
        self.walks += other.walks;
        self.hit_by_pitch += other.hit_by_pitch;
        self.sacrifice_flies += other.sacrifice_flies;
    }
}

/// One batter in a lineup. A batter belongs to exactly one roster and owns
/// its cumulative stat record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Batter {
    /// Stable identifier supplied by the roster collaborator.
    pub id: String,
    /// Display name (non-empty).
    pub name: String,
    /// Lineup slot in 1..=9; slot N bats at index N-1.
    pub slot: u8,
    /// Season-to-date counting stats feeding the at-bat resolver.
    pub stats: BattingLine,
}

/// Discrete result of one plate appearance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AtBatOutcome {
    Walk,
    HitByPitch,
    Single,
    Double,
    Triple,
    HomeRun,
    SacrificeFly,
    Out,
}

impl AtBatOutcome {
    /// Human-readable label for display layers.
    pub fn label(&self) -> &'static str {
        match self {
            AtBatOutcome::Walk => "walk",
            AtBatOutcome::HitByPitch => "hit by pitch",
            AtBatOutcome::Single => "single",
            AtBatOutcome::Double => "double",
            AtBatOutcome::Triple => "triple",
            AtBatOutcome::HomeRun => "home run",
            AtBatOutcome::SacrificeFly => "sacrifice fly",
            AtBatOutcome::Out => "out",
        }
    }

    /// True for any base hit.
    pub fn is_hit(&self) -> bool {
        matches!(
            self,
            AtBatOutcome::Single
                | AtBatOutcome::Double
                | AtBatOutcome::Triple
                | AtBatOutcome::HomeRun
        )
    }

    /// True when the play records an out.
    pub fn is_out(&self) -> bool {
        matches!(self, AtBatOutcome::SacrificeFly | AtBatOutcome::Out)
    }
}

/// Which half of the inning is being played. Away bats the top, home the
/// bottom. Display/tracing only; the simulation math is identical.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Half {
    Top,
    Bottom,
}

/// Base occupancy. Reset to empty at the start of every half-inning; never
/// persists across innings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseState {
    pub first: bool,
    pub second: bool,
    pub third: bool,
}

impl BaseState {
    /// All bases empty.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of occupied bases.
    pub fn runners(&self) -> u32 {
        u32::from(self.first) + u32::from(self.second) + u32::from(self.third)
    }
}

/// Per-batter, per-game accumulator: counting stats plus runs and RBIs.
/// Created zeroed at game start and merged field-wise.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStatLine {
    pub batting: BattingLine,
    /// Runs scored by this batter (credited on his own home runs).
    pub runs: u32,
    /// Runs batted in.
    pub rbis: u32,
}

impl GameStatLine {
    /// Field-wise accumulate.
    pub fn add(&mut self, other: &GameStatLine) {
        self.batting.add(&other.batting);
        self.runs += other.runs;
        self.rbis += other.rbis;
    }

    /// Whether this line counts as having played: at least one official
    /// at-bat. A walk-only or sac-fly-only appearance does not qualify.
    pub fn played(&self) -> bool {
        self.batting.at_bats > 0
    }
}

/// Result of one half-inning.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningResult {
    /// Runs scored this half-inning.
    pub runs: u32,
    /// Per-batter deltas, parallel to the lineup.
    pub lines: Vec<GameStatLine>,
    /// Lineup index that leads off this team's next half-inning. The order
    /// is strictly cyclic and never resets between innings.
    pub next_batter_index: usize,
}

/// One team's side of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGameResult {
    pub name: String,
    pub score: u32,
    /// Runs per inning; sums to `score`.
    pub innings: [u32; INNINGS_PER_GAME],
    /// Game totals per batter, parallel to the lineup.
    pub lines: Vec<GameStatLine>,
}

/// A completed 9-inning game. Immutable once produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    pub home: TeamGameResult,
    pub away: TeamGameResult,
}

impl GameResult {
    /// Final score as (home, away).
    pub fn final_score(&self) -> (u32, u32) {
        (self.home.score, self.away.score)
    }
}

/// Season accumulator for one batter, with derived rates recomputed from
/// cumulative totals after every game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonBattingLine {
    pub batting: BattingLine,
    pub runs: u32,
    pub rbis: u32,
    /// Games with at least one official at-bat.
    pub games: u32,
    pub plate_appearances: u32,
    pub on_base_pct: f64,
    pub slugging_pct: f64,
}

/// One team's season record and batting totals.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamSeasonResult {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    /// Season totals per batter, parallel to the lineup.
    pub batting: Vec<SeasonBattingLine>,
}

/// A completed season: records, batting totals, and every game in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonResult {
    pub home: TeamSeasonResult,
    pub away: TeamSeasonResult,
    pub games: Vec<GameResult>,
}

/// Season run parameters.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Number of games to simulate.
    pub games: u32,
    /// Seed for the deterministic RNG.
    pub rng_seed: u64,
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            games: DEFAULT_SEASON_GAMES,
            rng_seed: 42,
        }
    }
}

/// Validation errors for roster invariants.
#[derive(Debug, Error, PartialEq)]
pub enum RosterError {
    /// A lineup must contain exactly [`LINEUP_SIZE`] batters.
    #[error("lineup must have exactly 9 batters, got {0}")]
    WrongLineupSize(usize),
    /// Lineups are supplied in batting order: index i carries slot i+1.
    /// This also rules out duplicate and out-of-range slots.
    #[error("batter at index {index} must carry slot {expected}, got {slot}")]
    SlotMismatch { index: usize, expected: u8, slot: u8 },
    /// Display names must be non-empty.
    #[error("batter in slot {slot} has a blank name")]
    BlankName { slot: u8 },
    /// Doubles + triples + home runs may not exceed hits.
    #[error("extra-base hits exceed hits for {name}")]
    ExtraBaseHitsExceedHits { name: String },
}

/// Validate a single batter's name and stat line.
pub fn validate_batter(batter: &Batter) -> Result<(), RosterError> {
    if batter.name.trim().is_empty() {
        return Err(RosterError::BlankName { slot: batter.slot });
    }
    let stats = &batter.stats;
    if stats.hits < stats.doubles + stats.triples + stats.home_runs {
        return Err(RosterError::ExtraBaseHitsExceedHits {
            name: batter.name.clone(),
        });
    }
    Ok(())
}

/// Validate a full lineup: size, batting order, names, and stat lines.
/// Counting stats are unsigned, so non-negativity holds by construction.
pub fn validate_roster(batters: &[Batter]) -> Result<(), RosterError> {
    if batters.len() != LINEUP_SIZE {
        return Err(RosterError::WrongLineupSize(batters.len()));
    }
    for (index, batter) in batters.iter().enumerate() {
        let expected = (index + 1) as u8;
        if batter.slot != expected {
            return Err(RosterError::SlotMismatch {
                index,
                expected,
                slot: batter.slot,
            });
        }
        validate_batter(batter)?;
    }
    Ok(())
}
