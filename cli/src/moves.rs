use anyhow::{Context, Error, Result, bail};
use std::str::FromStr;
use sweeper_core::{Coord, Coord2};

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Move {
    Reveal(Coord2),
    Flag(Coord2),
    Unflag(Coord2),
    ToggleFlag(Coord2),
    Quit,
}

impl FromStr for Move {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            bail!("empty move");
        };

        if matches!(command, "q" | "quit") {
            return Ok(Self::Quit);
        }

        let make: fn(Coord2) -> Self = match command {
            "r" | "reveal" => Self::Reveal,
            "f" | "flag" => Self::Flag,
            "u" | "unflag" => Self::Unflag,
            "t" | "toggle" => Self::ToggleFlag,
            _ => bail!("unknown command {command:?}, expected r, f, u, t or q"),
        };

        let mut coord = |axis: &str| -> Result<Coord> {
            let word = words
                .next()
                .with_context(|| format!("missing {axis} coordinate"))?;
            word.parse()
                .with_context(|| format!("invalid {axis} coordinate {word:?}"))
        };
        let coords = (coord("x")?, coord("y")?);

        Ok(make(coords))
    }
}
