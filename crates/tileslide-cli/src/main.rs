use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::Parser;
use log::debug;
use rand::rngs::StdRng;
use rand::SeedableRng;

use tileslide_core::{Game, Move, Status};

#[derive(Parser, Debug)]
#[command(name = "tileslide")]
struct Args {
    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut game = match args.seed {
        Some(seed) => Game::with_rng(StdRng::seed_from_u64(seed)),
        None => Game::with_rng(StdRng::from_entropy()),
    };
    game.start();

    let stdin = io::stdin();
    let mut out = io::stdout();
    render(&game, &mut out)?;

    for line in stdin.lock().lines() {
        let line = line?;
        let dir = match line.trim() {
            "l" | "left" => Move::Left,
            "r" | "right" => Move::Right,
            "u" | "up" => Move::Up,
            "d" | "down" => Move::Down,
            "n" | "new" => {
                game.restart();
                render(&game, &mut out)?;
                continue;
            }
            "q" | "quit" => break,
            _ => {
                writeln!(out, "commands: l/r/u/d to move, n for a new game, q to quit")?;
                continue;
            }
        };

        let report = game.make_move(dir);
        debug!(
            "move {:?}: effective={} merges={:?} spawned={:?}",
            dir, report.moved, report.merged, report.spawned
        );
        render(&game, &mut out)?;
    }

    Ok(())
}

fn render<W: Write>(game: &Game<StdRng>, out: &mut W) -> Result<()> {
    writeln!(out, "{}", game)?;
    writeln!(out, "score: {}", game.score())?;
    match game.status() {
        Status::Win => writeln!(out, "You made {}! 'n' starts a new game.", tileslide_core::WIN_VALUE)?,
        Status::Lose => writeln!(out, "No moves left. 'n' starts a new game.")?,
        Status::Idle | Status::Playing => {}
    }
    Ok(())
}
