#![deny(warnings)]

//! Inning, game, and season simulators.
//!
//! Drives the at-bat resolver against a base-occupancy state machine:
//! half-innings run to exactly three outs, games run all nine innings
//! (ties stand), seasons chain games while batter stats compound.

use std::cmp::Ordering;

use rand::Rng;
use sim_core::{
    validate_roster, AtBatOutcome, BaseState, Batter, GameResult, GameStatLine, Half,
    InningResult, RosterError, SeasonBattingLine, SeasonResult, TeamGameResult,
    TeamSeasonResult, INNINGS_PER_GAME,
};
use sim_rates::{on_base_pct, resolve_at_bat, slugging_pct};
use tracing::{debug, info, trace};

/// Effect of one plate appearance on the bases.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Advance {
    /// Runs scored on the play, all credited to the batter as RBIs.
    pub runs: u32,
    /// Whether the play recorded an out.
    pub is_out: bool,
}

/// Apply one at-bat outcome to the current base occupancy.
///
/// Walks and hit-by-pitch force lead runners only while the bases behind
/// them are occupied. On a single the runners on second and third score and
/// the runner on first takes third. Doubles and triples clear the bases.
/// A sacrifice fly scores the runner from third and nothing else. Runner
/// identity is not tracked, so the table is expressed over occupancy flags.
pub fn advance_runners(bases: &mut BaseState, outcome: AtBatOutcome) -> Advance {
    let mut runs = 0;
    match outcome {
        AtBatOutcome::Walk | AtBatOutcome::HitByPitch => {
            if bases.first {
                if bases.second {
                    if bases.third {
                        runs += 1;
                    }
                    bases.third = true;
                }
                bases.second = true;
            }
            bases.first = true;
            Advance { runs, is_out: false }
        }
        AtBatOutcome::Single => {
            if bases.third {
                runs += 1;
            }
            if bases.second {
                runs += 1;
            }
            bases.third = bases.first;
            bases.second = false;
            bases.first = true;
            Advance { runs, is_out: false }
        }
        AtBatOutcome::Double => {
            runs += bases.runners();
            *bases = BaseState {
                first: false,
                second: true,
                third: false,
            };
            Advance { runs, is_out: false }
        }
        AtBatOutcome::Triple => {
            runs += bases.runners();
            *bases = BaseState {
                first: false,
                second: false,
                third: true,
            };
            Advance { runs, is_out: false }
        }
        AtBatOutcome::HomeRun => {
            runs += bases.runners() + 1;
            *bases = BaseState::empty();
            Advance { runs, is_out: false }
        }
        AtBatOutcome::SacrificeFly => {
            if bases.third {
                runs += 1;
                bases.third = false;
            }
            Advance { runs, is_out: true }
        }
        AtBatOutcome::Out => Advance {
            runs: 0,
            is_out: true,
        },
    }
}

/// Record one plate appearance in a batter's game line. Walks, HBP, and
/// sacrifice flies are not at-bats; every run on the play is an RBI for the
/// batter, and a home run also credits the batter's own run.
fn record_outcome(line: &mut GameStatLine, outcome: AtBatOutcome, runs: u32) {
    let batting = &mut line.batting;
    match outcome {
        AtBatOutcome::Walk => batting.walks += 1,
        AtBatOutcome::HitByPitch => batting.hit_by_pitch += 1,
        AtBatOutcome::Single => {
            batting.at_bats += 1;
            batting.hits += 1;
        }
        AtBatOutcome::Double => {
            batting.at_bats += 1;
            batting.hits += 1;
            batting.doubles += 1;
        }
        AtBatOutcome::Triple => {
            batting.at_bats += 1;
            batting.hits += 1;
            batting.triples += 1;
        }
        AtBatOutcome::HomeRun => {
            batting.at_bats += 1;
            batting.hits += 1;
            batting.home_runs += 1;
            line.runs += 1;
        }
        AtBatOutcome::SacrificeFly => batting.sacrifice_flies += 1,
        AtBatOutcome::Out => batting.at_bats += 1,
    }
    line.rbis += runs;
}

/// Simulate one half-inning for a validated lineup.
///
/// The loop ends the instant the third out is recorded; the out-causing
/// batter's stats are still recorded. `next_batter_index` continues the
/// strictly cyclic batting order into this team's next half-inning.
pub fn simulate_inning(
    batters: &[Batter],
    half: Half,
    start_index: usize,
    rng: &mut impl Rng,
) -> Result<InningResult, RosterError> {
    validate_roster(batters)?;
    Ok(run_half_inning(batters, half, start_index, rng))
}

fn run_half_inning(
    batters: &[Batter],
    half: Half,
    start_index: usize,
    rng: &mut impl Rng,
) -> InningResult {
    let mut lines = vec![GameStatLine::default(); batters.len()];
    let mut bases = BaseState::empty();
    let mut runs = 0u32;
    let mut outs = 0u32;
    let mut index = start_index % batters.len();

    while outs < 3 {
        let outcome = resolve_at_bat(&batters[index].stats, rng);
        let advance = advance_runners(&mut bases, outcome);
        record_outcome(&mut lines[index], outcome, advance.runs);
        runs += advance.runs;
        if advance.is_out {
            outs += 1;
        }
        index = (index + 1) % batters.len();
    }
    trace!(?half, runs, next_batter = index, "half-inning complete");
    InningResult {
        runs,
        lines,
        next_batter_index: index,
    }
}

/// Simulate a full nine-inning game.
///
/// The away team bats the top of each inning, the home team the bottom,
/// each half picking up that team's own rolling batter index. All nine
/// innings are always played; there is no walk-off early end and a tie
/// stands.
pub fn simulate_game(
    home: &[Batter],
    away: &[Batter],
    home_name: &str,
    away_name: &str,
    rng: &mut impl Rng,
) -> Result<GameResult, RosterError> {
    validate_roster(home)?;
    validate_roster(away)?;
    Ok(run_game(home, away, home_name, away_name, rng))
}

fn run_game(
    home: &[Batter],
    away: &[Batter],
    home_name: &str,
    away_name: &str,
    rng: &mut impl Rng,
) -> GameResult {
    let mut home_team = empty_team(home_name, home.len());
    let mut away_team = empty_team(away_name, away.len());
    let mut home_index = 0usize;
    let mut away_index = 0usize;

    for inning in 0..INNINGS_PER_GAME {
        let top = run_half_inning(away, Half::Top, away_index, rng);
        away_team.score += top.runs;
        away_team.innings[inning] = top.runs;
        away_index = top.next_batter_index;
        merge_lines(&mut away_team.lines, &top.lines);

        let bottom = run_half_inning(home, Half::Bottom, home_index, rng);
        home_team.score += bottom.runs;
        home_team.innings[inning] = bottom.runs;
        home_index = bottom.next_batter_index;
        merge_lines(&mut home_team.lines, &bottom.lines);
    }

    GameResult {
        home: home_team,
        away: away_team,
    }
}

fn empty_team(name: &str, lineup_len: usize) -> TeamGameResult {
    TeamGameResult {
        name: name.to_string(),
        score: 0,
        innings: [0; INNINGS_PER_GAME],
        lines: vec![GameStatLine::default(); lineup_len],
    }
}

fn merge_lines(totals: &mut [GameStatLine], deltas: &[GameStatLine]) {
    for (total, delta) in totals.iter_mut().zip(deltas) {
        total.add(delta);
    }
}

/// Fold one game line into a batter's season accumulator, recomputing
/// plate appearances and the derived rates from the cumulative totals
/// (a true recomputation, not an average of per-game rates). The games
/// counter moves only for games with at least one official at-bat.
pub fn absorb_game_line(season: &mut SeasonBattingLine, game: &GameStatLine) {
    season.batting.add(&game.batting);
    season.runs += game.runs;
    season.rbis += game.rbis;
    if game.played() {
        season.games += 1;
    }
    season.plate_appearances = season.batting.plate_appearances();
    season.on_base_pct = on_base_pct(&season.batting);
    season.slugging_pct = slugging_pct(&season.batting);
}

/// Simulate a season of `games` back-to-back games.
///
/// The rosters handed in are cloned into live stat records that compound
/// with every simulated game, so the resolver sees each batter's OPS drift
/// with his own simulated performance. The season report lines start from
/// zero and cover only the simulated games.
pub fn simulate_season(
    home: &[Batter],
    away: &[Batter],
    home_name: &str,
    away_name: &str,
    games: u32,
    rng: &mut impl Rng,
) -> Result<SeasonResult, RosterError> {
    validate_roster(home)?;
    validate_roster(away)?;

    let mut live_home = home.to_vec();
    let mut live_away = away.to_vec();

    let mut season = SeasonResult {
        home: empty_season_team(home_name, home.len()),
        away: empty_season_team(away_name, away.len()),
        games: Vec::with_capacity(games as usize),
    };

    for number in 1..=games {
        let game = run_game(&live_home, &live_away, home_name, away_name, rng);
        debug!(
            game = number,
            home_score = game.home.score,
            away_score = game.away.score,
            "game complete"
        );

        match game.home.score.cmp(&game.away.score) {
            Ordering::Greater => {
                season.home.wins += 1;
                season.away.losses += 1;
            }
            Ordering::Less => {
                season.away.wins += 1;
                season.home.losses += 1;
            }
            Ordering::Equal => {
                season.home.ties += 1;
                season.away.ties += 1;
            }
        }

        for (batter, line) in live_home.iter_mut().zip(&game.home.lines) {
            batter.stats.add(&line.batting);
        }
        for (batter, line) in live_away.iter_mut().zip(&game.away.lines) {
            batter.stats.add(&line.batting);
        }
        for (season_line, line) in season.home.batting.iter_mut().zip(&game.home.lines) {
            absorb_game_line(season_line, line);
        }
        for (season_line, line) in season.away.batting.iter_mut().zip(&game.away.lines) {
            absorb_game_line(season_line, line);
        }

        season.games.push(game);
    }

    info!(
        games,
        home_wins = season.home.wins,
        away_wins = season.away.wins,
        ties = season.home.ties,
        "season complete"
    );
    Ok(season)
}

fn empty_season_team(name: &str, lineup_len: usize) -> TeamSeasonResult {
    TeamSeasonResult {
        name: name.to_string(),
        wins: 0,
        losses: 0,
        ties: 0,
        batting: vec![SeasonBattingLine::default(); lineup_len],
    }
}
