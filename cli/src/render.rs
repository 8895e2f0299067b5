use sweeper_core::{Coord, DisplayValue, Game, to_coord};

/// Glyph for a rendered cell. Revealed cells without neighbors use `_` so they read differently from hidden ones.
fn glyph(game: &Game, coords: (Coord, Coord), value: DisplayValue) -> char {
    let revealed = game.cell_at(coords).is_ok_and(|cell| cell.is_revealed());
    match value {
        DisplayValue::Blank if revealed => '_',
        value => value.glyph(),
    }
}

/// Draws the board framed with `+-+` borders, one text row per board row, top row first.
pub fn draw_board(game: &Game) -> String {
    let snapshot = game.snapshot();
    let (_, height) = game.size();
    let origin = game.config().origin;
    let separator = format!("+{}", "-+".repeat(snapshot.ncols()));

    let mut lines = vec![separator.clone()];
    for (row, values) in snapshot.rows().into_iter().enumerate() {
        let y = origin.y_of_row(to_coord(row), height);
        let cells: String = values
            .iter()
            .enumerate()
            .map(|(x, &value)| format!("{}|", glyph(game, (to_coord(x), y), value)))
            .collect();
        lines.push(format!("|{cells}"));
        lines.push(separator.clone());
    }
    lines.join("\n")
}
