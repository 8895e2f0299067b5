use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use sweeper_core::{Coord, Game, GameConfig, Origin};

mod layout;
mod moves;
mod render;

use moves::Move;

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum OriginArg {
    /// (0, 0) is the bottom-left cell, y grows upward
    BottomLeft,
    /// (0, 0) is the top-left cell, y grows downward
    TopLeft,
}

impl From<OriginArg> for Origin {
    fn from(origin: OriginArg) -> Self {
        match origin {
            OriginArg::BottomLeft => Origin::BottomLeft,
            OriginArg::TopLeft => Origin::TopLeft,
        }
    }
}

/// Play Minesweeper on a fixed mine layout, reading moves such as `r 0 1` or `f 2 2` from stdin
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Board width in cells
    #[arg(long, default_value_t = 9)]
    width: Coord,

    /// Board height in cells
    #[arg(long, default_value_t = 9)]
    height: Coord,

    /// JSON mine layout, one array per row starting at the top, non-zero entries are mines
    #[arg(short, long)]
    layout: Option<PathBuf>,

    /// Corner that holds coordinate (0, 0)
    #[arg(long, value_enum, default_value_t = OriginArg::BottomLeft)]
    origin: OriginArg,
}

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = GameConfig::with_origin((args.width, args.height), args.origin.into())
        .context("invalid board size")?;
    let mut game = Game::with_config(config)?;

    match &args.layout {
        Some(path) => {
            let rows = layout::load(path)?;
            if !game.set_mines(&rows) {
                bail!(
                    "layout in {} does not fit a {}x{} board",
                    path.display(),
                    args.width,
                    args.height
                );
            }
        }
        None => tracing::warn!("no mine layout given, every cell is safe"),
    }

    play(&mut game, io::stdin().lock(), io::stdout().lock())
}

/// Applies moves from `input` until the game ends, the player quits or input runs out.
fn play(game: &mut Game, input: impl BufRead, mut output: impl Write) -> Result<()> {
    writeln!(output, "{}", render::draw_board(game))?;

    for line in input.lines() {
        let line = line.context("could not read move")?;
        if line.trim().is_empty() {
            continue;
        }

        let next_move = match line.parse::<Move>() {
            Ok(next_move) => next_move,
            Err(err) => {
                writeln!(output, "{err:#}")?;
                continue;
            }
        };
        tracing::debug!(?next_move, "applying move");

        match next_move {
            Move::Quit => break,
            Move::Reveal(coords) => {
                game.reveal(coords);
            }
            Move::Flag(coords) => {
                game.flag(coords);
            }
            Move::Unflag(coords) => {
                game.unflag(coords);
            }
            Move::ToggleFlag(coords) => {
                game.toggle_flag(coords);
            }
        }

        writeln!(output, "{}\nstatus: {}", render::draw_board(game), game.status())?;
        if game.is_finished() {
            break;
        }
    }

    tracing::info!(status = %game.status(), "session finished");
    Ok(())
}
