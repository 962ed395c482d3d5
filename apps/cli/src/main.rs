#![deny(warnings)]

//! Headless CLI: simulates a season between two lineups and prints the
//! standings and batting tables, or the full result as JSON.

use anyhow::{Context, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::Deserialize;
use sim_core::{Batter, BattingLine, SeasonConfig, SeasonResult, TeamSeasonResult};
use sim_engine::simulate_season;
use tracing::info;
use tracing_subscriber::EnvFilter;

struct CliArgs {
    games: u32,
    seed: u64,
    home_name: String,
    away_name: String,
    roster_path: Option<String>,
    json: bool,
}

fn parse_args() -> CliArgs {
    let defaults = SeasonConfig::default();
    let mut args = CliArgs {
        games: defaults.games,
        seed: defaults.rng_seed,
        home_name: "Home".to_string(),
        away_name: "Away".to_string(),
        roster_path: None,
        json: false,
    };
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--games" => {
                if let Some(n) = it.next().and_then(|s| s.parse().ok()) {
                    args.games = n;
                }
            }
            "--seed" => {
                if let Some(n) = it.next().and_then(|s| s.parse().ok()) {
                    args.seed = n;
                }
            }
            "--home" => {
                if let Some(name) = it.next() {
                    args.home_name = name;
                }
            }
            "--away" => {
                if let Some(name) = it.next() {
                    args.away_name = name;
                }
            }
            "--roster" => args.roster_path = it.next(),
            "--json" => args.json = true,
            _ => {}
        }
    }
    args
}

/// Roster file layout: both lineups in batting order.
#[derive(Deserialize)]
struct RosterFile {
    home: Vec<Batter>,
    away: Vec<Batter>,
}

fn load_rosters(path: &str) -> Result<(Vec<Batter>, Vec<Batter>)> {
    let text =
        std::fs::read_to_string(path).with_context(|| format!("reading roster file {path}"))?;
    let file: RosterFile =
        serde_json::from_str(&text).with_context(|| format!("parsing roster file {path}"))?;
    Ok((file.home, file.away))
}

fn demo_roster(prefix: &str, names: [&str; 9]) -> Vec<Batter> {
    // (AB, H, 2B, 3B, HR, BB, HBP, SF) — a spread of batting profiles.
    let profiles: [(u32, u32, u32, u32, u32, u32, u32, u32); 9] = [
        (520, 160, 30, 6, 4, 55, 3, 4),
        (495, 145, 25, 3, 12, 48, 5, 5),
        (510, 155, 32, 2, 28, 70, 4, 6),
        (480, 140, 28, 1, 35, 62, 6, 7),
        (500, 138, 26, 2, 18, 40, 3, 5),
        (470, 120, 22, 3, 10, 35, 2, 4),
        (455, 112, 18, 2, 8, 30, 4, 3),
        (430, 100, 15, 1, 5, 28, 2, 3),
        (410, 90, 12, 2, 2, 25, 1, 2),
    ];
    names
        .iter()
        .zip(profiles)
        .enumerate()
        .map(|(index, (name, p))| Batter {
            id: format!("{prefix}{}", index + 1),
            name: name.to_string(),
            slot: (index + 1) as u8,
            stats: BattingLine {
                at_bats: p.0,
                hits: p.1,
                doubles: p.2,
                triples: p.3,
                home_runs: p.4,
                walks: p.5,
                hit_by_pitch: p.6,
                sacrifice_flies: p.7,
            },
        })
        .collect()
}

fn demo_rosters() -> (Vec<Batter>, Vec<Batter>) {
    let home = demo_roster(
        "h",
        [
            "Sato", "Suzuki", "Takahashi", "Tanaka", "Ito", "Watanabe", "Yamamoto",
            "Nakamura", "Kobayashi",
        ],
    );
    let away = demo_roster(
        "a",
        [
            "Kato", "Yoshida", "Yamada", "Sasaki", "Matsumoto", "Inoue", "Kimura",
            "Hayashi", "Shimizu",
        ],
    );
    (home, away)
}

fn print_standings(season: &SeasonResult) {
    let games = season.games.len() as f64;
    for team in [&season.home, &season.away] {
        let rate = if games > 0.0 {
            team.wins as f64 / games * 100.0
        } else {
            0.0
        };
        println!(
            "{:<12} {:>3}-{:<3} | ties: {} | win rate: {:.1}%",
            team.name, team.wins, team.losses, team.ties, rate
        );
    }
}

fn print_batting(team: &TeamSeasonResult, lineup: &[Batter]) {
    println!("\n{} batting", team.name);
    println!(
        "{:<12} {:>4} {:>5} {:>5} {:>4} {:>5} {:>6} {:>6} {:>6}",
        "name", "G", "AB", "H", "HR", "RBI", "OBP", "SLG", "OPS"
    );
    for (batter, line) in lineup.iter().zip(&team.batting) {
        println!(
            "{:<12} {:>4} {:>5} {:>5} {:>4} {:>5} {:>6.3} {:>6.3} {:>6.3}",
            batter.name,
            line.games,
            line.batting.at_bats,
            line.batting.hits,
            line.batting.home_runs,
            line.rbis,
            line.on_base_pct,
            line.slugging_pct,
            line.on_base_pct + line.slugging_pct
        );
    }
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    info!(
        games = args.games,
        seed = args.seed,
        git_sha = env!("GIT_SHA"),
        "starting batting-sim"
    );

    let (home, away) = match &args.roster_path {
        Some(path) => load_rosters(path)?,
        None => demo_rosters(),
    };

    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let season = simulate_season(
        &home,
        &away,
        &args.home_name,
        &args.away_name,
        args.games,
        &mut rng,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&season)?);
        return Ok(());
    }

    print_standings(&season);
    print_batting(&season.home, &home);
    print_batting(&season.away, &away);

    Ok(())
}
