use std::path::PathBuf;

use adaship::{init_logging, take_turn, Admiral, AiPlayer, GameConfig, GameStatus, Player};
use anyhow::Context;
use clap::Parser;
use log::info;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;

/// Play a computer vs computer match and print a JSON summary.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, help = "Path to an adaship_config.ini style file")]
    config: Option<PathBuf>,
    #[arg(long, help = "Mines per board, overriding the config file")]
    mines: Option<usize>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            GameConfig::parse(&text)?
        }
        None => GameConfig::default(),
    };
    if let Some(mines) = cli.mines {
        config.mines = mines;
    }

    let mut rng = match cli.seed {
        Some(s) => SmallRng::seed_from_u64(s),
        None => SmallRng::from_rng(&mut rand::rng()),
    };

    let mut players = [AiPlayer::new(), AiPlayer::new()];
    let mut admirals = [Admiral::new(&config)?, Admiral::new(&config)?];
    for (player, admiral) in players.iter_mut().zip(admirals.iter_mut()) {
        player.place_ships(&mut rng, admiral)?;
        admiral.seed_mines(&mut rng, config.mines)?;
    }
    info!(
        "{}x{} board, {} ships, {} mines each",
        config.width,
        config.height,
        config.ships.len(),
        config.mines
    );

    let max_turns = 2 * config.width * config.height;
    let mut turns = 0;
    let mut current = 0;
    while turns < max_turns {
        turns += 1;
        let [first, second] = &mut admirals;
        let (attacker, defender) = if current == 0 {
            (first, second)
        } else {
            (second, first)
        };
        let report = take_turn(&mut players[current], &mut rng, attacker, defender)?;
        for id in report.sunk() {
            if let Some(ship) = defender.fleet().ship(id) {
                info!("player{} sank {}", current + 1, ship.name());
            }
        }
        if defender.is_defeated() {
            break;
        }
        current = 1 - current;
    }

    let winner = match (
        admirals[0].status(&admirals[1]),
        admirals[1].status(&admirals[0]),
    ) {
        (GameStatus::Won, _) => Some("player1"),
        (_, GameStatus::Won) => Some("player2"),
        _ => None,
    };

    let result = json!({
        "player1": {
            "status": format!("{:?}", admirals[0].status(&admirals[1])),
            "destroyed": admirals[0].fleet().destroyed_count(),
        },
        "player2": {
            "status": format!("{:?}", admirals[1].status(&admirals[0])),
            "destroyed": admirals[1].fleet().destroyed_count(),
        },
        "turns": turns,
        "winner": winner,
    });

    println!("{}", serde_json::to_string(&result)?);
    Ok(())
}
