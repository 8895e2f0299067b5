use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A layout entry, either `true`/`false` or a number where non-zero marks a mine.
#[derive(Deserialize)]
#[serde(untagged)]
enum LayoutCell {
    Flag(bool),
    Number(u8),
}

impl LayoutCell {
    fn is_mine(&self) -> bool {
        match *self {
            Self::Flag(is_mine) => is_mine,
            Self::Number(value) => value != 0,
        }
    }
}

/// Parses a JSON matrix such as `[[0, 0, 1], [1, 0, 0]]`, first row being the top of the board.
pub fn parse(text: &str) -> Result<Vec<Vec<bool>>> {
    let cells: Vec<Vec<LayoutCell>> = serde_json::from_str(text).context("layout is not a JSON matrix")?;
    Ok(cells
        .iter()
        .map(|row| row.iter().map(LayoutCell::is_mine).collect())
        .collect())
}

pub fn load(path: &Path) -> Result<Vec<Vec<bool>>> {
    let text = fs::read_to_string(path).with_context(|| format!("could not read {}", path.display()))?;
    parse(&text).with_context(|| format!("invalid layout in {}", path.display()))
}
