use alloc::collections::VecDeque;
use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// One game of Minesweeper, owned by a single player.
///
/// Move methods never fail: coordinates outside the board, already revealed cells and moves after the game has
/// ended are silently ignored and reported as `NoChange`. Use [`Game::can_reveal`] to check a move beforehand.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Game {
    config: GameConfig,
    grid: Grid,
    mine_layout: Option<MineLayout>,
    status: GameStatus,
    revealed_count: CellCount,
    flagged_count: CellCount,
    triggered_mine: Option<Coord2>,
}

impl Game {
    pub fn new(size: Coord2) -> Result<Self> {
        Self::with_config(GameConfig::new(size)?)
    }

    pub fn with_config(config: GameConfig) -> Result<Self> {
        let grid = Grid::new(config.size)?;
        log::debug!("new {}x{} game, origin {:?}", config.size.0, config.size.1, config.origin);

        Ok(Self {
            config,
            grid,
            mine_layout: None,
            status: GameStatus::default(),
            revealed_count: 0,
            flagged_count: 0,
            triggered_mine: None,
        })
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.grid.size()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count
    }

    /// Mines not yet accounted for by a flag, negative when the player over-flags.
    pub fn mines_left(&self) -> isize {
        let mines = self.mine_layout.as_ref().map_or(0, MineLayout::mine_count);
        (mines as isize) - (self.flagged_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Installs the mine layout given as a row-major matrix (`rows[0]` is the top of the board).
    ///
    /// Returns `false` and keeps the previous layout when the matrix does not match the board dimensions or a
    /// cell has already been revealed.
    pub fn set_mines<R: AsRef<[bool]>>(&mut self, rows: &[R]) -> bool {
        match MineLayout::from_rows(rows, self.config.origin) {
            Ok(layout) => self.set_mine_layout(layout),
            Err(err) => {
                log::warn!("mine layout rejected: {err}");
                false
            }
        }
    }

    pub fn set_mine_layout(&mut self, layout: MineLayout) -> bool {
        if layout.size() != self.size() {
            log::warn!(
                "mine layout rejected: {:?} does not match board {:?}",
                layout.size(),
                self.size()
            );
            return false;
        }

        // mines are fixed once the player has seen any cell
        if self.revealed_count > 0 || self.status.is_finished() {
            log::warn!("mine layout rejected: {} cells already revealed", self.revealed_count);
            return false;
        }

        self.grid.apply_mines(&layout);
        log::debug!("accepted layout with {} mines", layout.mine_count());
        self.mine_layout = Some(layout);
        true
    }

    /// The accepted layout as a row-major matrix, `None` if no layout was ever accepted.
    pub fn mines(&self) -> Option<Vec<Vec<bool>>> {
        self.mine_layout
            .as_ref()
            .map(|layout| layout.to_rows(self.config.origin))
    }

    pub fn mine_layout(&self) -> Option<&MineLayout> {
        self.mine_layout.as_ref()
    }

    pub fn cell_at(&self, coords: Coord2) -> Result<Cell> {
        self.grid.cell_at(coords)
    }

    /// Whether `coords` is on the board, still hidden and the game is running. Flags do not block a reveal.
    pub fn can_reveal(&self, coords: Coord2) -> bool {
        self.status.is_running() && self.grid.cell_at(coords).is_ok_and(|cell| !cell.is_revealed())
    }

    pub fn reveal(&mut self, coords: Coord2) -> RevealOutcome {
        if !self.can_reveal(coords) {
            return RevealOutcome::NoChange;
        }

        if self.grid[coords].is_flagged() {
            self.grid[coords].set_flagged(false);
            self.flagged_count -= 1;
        }

        if self.grid[coords].has_mine() {
            self.grid[coords].reveal(None);
            self.revealed_count += 1;
            self.triggered_mine = Some(coords);
        } else {
            let opened = self.flood_reveal(coords);
            log::trace!("reveal at {coords:?} opened {opened} cells");
        }

        self.refresh_status();
        match self.status {
            GameStatus::Running => RevealOutcome::Revealed,
            GameStatus::Lost => RevealOutcome::HitMine,
            GameStatus::Won => RevealOutcome::Won,
        }
    }

    pub fn flag(&mut self, coords: Coord2) -> MarkOutcome {
        self.set_flag(coords, true)
    }

    pub fn unflag(&mut self, coords: Coord2) -> MarkOutcome {
        self.set_flag(coords, false)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> MarkOutcome {
        match self.grid.cell_at(coords) {
            Ok(cell) => self.set_flag(coords, !cell.is_flagged()),
            Err(_) => MarkOutcome::NoChange,
        }
    }

    pub fn display_value(&self, coords: Coord2) -> Result<DisplayValue> {
        self.grid.cell_at(coords).map(Cell::display_value)
    }

    /// Display values as a `(height, width)` matrix, row 0 being the top of the board.
    pub fn snapshot(&self) -> Array2<DisplayValue> {
        let (width, height) = self.size();
        let origin = self.config.origin;

        Array2::from_shape_fn((usize::from(height), usize::from(width)), |(row, column)| {
            let coords = (to_coord(column), origin.y_of_row(to_coord(row), height));
            self.grid[coords].display_value()
        })
    }

    fn set_flag(&mut self, coords: Coord2, flagged: bool) -> MarkOutcome {
        if self.status.is_finished() {
            return MarkOutcome::NoChange;
        }

        let Ok(cell) = self.grid.cell_at(coords) else {
            return MarkOutcome::NoChange;
        };
        if cell.is_revealed() || cell.is_flagged() == flagged {
            return MarkOutcome::NoChange;
        }

        self.grid[coords].set_flagged(flagged);
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        MarkOutcome::Changed
    }

    /// Opens a safe cell and, through zero-count cells, every connected safe cell that is not flagged.
    ///
    /// The `revealed` flag doubles as the visited marker so each cell is opened at most once.
    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            if !self.grid[coords].is_cascade_target() {
                continue;
            }

            let adjacent_mines = self.grid.adjacent_mine_count(coords);
            self.grid[coords].reveal(Some(adjacent_mines));
            opened += 1;

            if adjacent_mines == 0 {
                to_visit.extend(
                    self.grid
                        .iter_neighbors(coords)
                        .filter(|&pos| self.grid[pos].is_cascade_target()),
                );
            }
        }

        self.revealed_count += opened;
        opened
    }

    fn refresh_status(&mut self) {
        if self.status.is_finished() {
            return;
        }

        self.status = GameStatus::evaluate(&self.grid);
        match self.status {
            GameStatus::Running => {}
            GameStatus::Lost => log::debug!("game lost at {:?}", self.triggered_mine),
            GameStatus::Won => log::debug!("game won after {} reveals", self.revealed_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn rows(matrix: &[&[u8]]) -> Vec<Vec<bool>> {
        matrix
            .iter()
            .map(|row| row.iter().map(|&cell| cell != 0).collect())
            .collect()
    }

    fn game_with_mines(size: Coord2, matrix: &[&[u8]]) -> Game {
        let mut game = Game::new(size).unwrap();
        assert!(game.set_mines(&rows(matrix)));
        game
    }

    const THREE_BY_THREE: &[&[u8]] = &[&[0, 0, 0], &[1, 1, 0], &[0, 1, 0]];
    const FOUR_BY_FOUR: &[&[u8]] = &[&[0, 0, 0, 0], &[1, 1, 0, 0], &[1, 1, 0, 0], &[0, 1, 0, 1]];

    #[test]
    fn new_game_is_blank_and_running() {
        for size in [(1, 1), (2, 1), (1, 2), (2, 2), (3, 3)] {
            let game = Game::new(size).unwrap();
            let snapshot = game.snapshot();

            assert_eq!(snapshot.dim(), (usize::from(size.1), usize::from(size.0)));
            assert!(snapshot.iter().all(|&value| value == DisplayValue::Blank));
            assert_eq!(game.status(), GameStatus::Running);
            assert_eq!(game.mines(), None);
        }
    }

    #[test]
    fn zero_sized_game_is_rejected() {
        assert_eq!(Game::new((0, 1)), Err(GameError::InvalidDimension));
        assert_eq!(Game::new((1, 0)), Err(GameError::InvalidDimension));
    }

    #[test]
    fn matching_layout_is_stored() {
        let game = game_with_mines((3, 3), THREE_BY_THREE);

        assert_eq!(game.mines(), Some(rows(THREE_BY_THREE)));
        assert_eq!(game.mines_left(), 3);
    }

    #[test]
    fn mismatched_layout_is_ignored() {
        let mut game = Game::new((3, 3)).unwrap();

        assert!(!game.set_mines(&rows(&[&[0, 0, 0], &[1, 1, 0]])));
        assert_eq!(game.mines(), None);

        assert!(game.set_mines(&rows(THREE_BY_THREE)));
        assert!(!game.set_mines(&rows(&[&[1, 1], &[1, 1], &[1, 1]])));
        assert_eq!(game.mines(), Some(rows(THREE_BY_THREE)));
    }

    #[test]
    fn revealed_cell_cannot_be_revealed_again() {
        let mut game = game_with_mines((3, 3), THREE_BY_THREE);

        assert!(game.can_reveal((0, 0)));
        assert_eq!(game.reveal((0, 0)), RevealOutcome::Revealed);
        assert!(!game.can_reveal((0, 0)));
        assert_eq!(game.reveal((0, 0)), RevealOutcome::NoChange);
        assert!(game.can_reveal((1, 0)));
    }

    #[test]
    fn stepping_on_cells_sets_status() {
        let cases = [
            ((0, 0), GameStatus::Running),
            ((1, 1), GameStatus::Lost),
            ((0, 1), GameStatus::Lost),
            ((0, 2), GameStatus::Running),
        ];

        for (coords, status) in cases {
            let mut game = game_with_mines((3, 3), THREE_BY_THREE);

            assert!(game.can_reveal(coords));
            game.reveal(coords);
            game.reveal(coords);
            assert!(!game.can_reveal(coords));
            assert_eq!(game.status(), status, "stepping on {coords:?}");
        }
    }

    #[test]
    fn revealed_cells_show_neighbor_counts() {
        let cases = [
            ((0, 0), DisplayValue::Count(3)),
            ((0, 3), DisplayValue::Count(2)),
            ((2, 1), DisplayValue::Count(4)),
            ((2, 3), DisplayValue::Count(1)),
            ((3, 3), DisplayValue::Blank),
        ];

        for (coords, value) in cases {
            let mut game = game_with_mines((4, 4), FOUR_BY_FOUR);

            game.reveal(coords);
            assert_eq!(game.display_value(coords), Ok(value), "count at {coords:?}");
            assert!(game.cell_at(coords).unwrap().is_revealed());
        }
    }

    #[test]
    fn top_left_origin_reads_rows_downward() {
        let config = GameConfig::with_origin((4, 4), Origin::TopLeft).unwrap();
        let mut game = Game::with_config(config).unwrap();
        assert!(game.set_mines(&rows(FOUR_BY_FOUR)));

        game.reveal((0, 0));

        assert_eq!(game.display_value((0, 0)), Ok(DisplayValue::Count(2)));
        assert_eq!(game.snapshot()[[0, 0]], DisplayValue::Count(2));
    }

    #[test]
    fn zero_cell_cascade_stops_at_numbered_cells() {
        let mut game = game_with_mines((4, 4), FOUR_BY_FOUR);

        game.reveal((3, 3));

        for coords in [(3, 3), (2, 3), (2, 2), (3, 2), (2, 1), (3, 1)] {
            assert!(game.cell_at(coords).unwrap().is_revealed(), "{coords:?}");
        }
        assert_eq!(game.cell_at((3, 2)).unwrap().neighbor_mine_count(), Some(0));
        assert!(!game.cell_at((3, 0)).unwrap().is_revealed());
        assert!(!game.cell_at((0, 0)).unwrap().is_revealed());
        assert_eq!(game.revealed_count(), 6);
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn flags_can_be_placed_and_removed() {
        let mut game = game_with_mines((4, 4), FOUR_BY_FOUR);

        for coords in [(1, 0), (1, 1)] {
            assert_eq!(game.flag(coords), MarkOutcome::Changed);
            assert_eq!(game.display_value(coords), Ok(DisplayValue::Mark));
        }

        let mut game = game_with_mines(
            (4, 4),
            &[&[0, 0, 0, 0], &[1, 1, 0, 0], &[1, 1, 0, 1], &[0, 1, 0, 1]],
        );
        for coords in [(1, 1), (1, 2)] {
            game.flag(coords);
            assert_eq!(game.display_value(coords), Ok(DisplayValue::Mark));
            assert_eq!(game.unflag(coords), MarkOutcome::Changed);
            assert_eq!(game.display_value(coords), Ok(DisplayValue::Blank));
        }
        assert_eq!(game.flagged_count(), 0);
    }

    #[test]
    fn flagging_revealed_cell_is_ignored() {
        let mut game = game_with_mines((3, 3), THREE_BY_THREE);
        game.reveal((0, 0));

        assert_eq!(game.flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(game.display_value((0, 0)), Ok(DisplayValue::Count(3)));
    }

    #[test]
    fn toggle_flag_flips_mark() {
        let mut game = Game::new((2, 2)).unwrap();

        assert_eq!(game.toggle_flag((1, 1)), MarkOutcome::Changed);
        assert!(game.cell_at((1, 1)).unwrap().is_flagged());
        assert_eq!(game.toggle_flag((1, 1)), MarkOutcome::Changed);
        assert!(!game.cell_at((1, 1)).unwrap().is_flagged());
        assert_eq!(game.toggle_flag((5, 5)), MarkOutcome::NoChange);
    }

    #[test]
    fn clearing_last_safe_cell_wins() {
        let mut game = game_with_mines((3, 3), THREE_BY_THREE);

        game.reveal((0, 0));
        game.flag((2, 2));
        game.reveal((0, 2));
        game.reveal((1, 2));
        game.reveal((2, 0));
        game.reveal((2, 1));
        assert_eq!(game.status(), GameStatus::Running);

        assert_eq!(game.reveal((2, 2)), RevealOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.flagged_count(), 0);
    }

    #[test]
    fn cascade_from_corner_wins_in_one_move() {
        let mut game = game_with_mines((3, 3), &[&[0, 0, 1], &[0, 0, 0], &[0, 0, 0]]);

        assert_eq!(game.reveal((0, 0)), RevealOutcome::Won);
        assert_eq!(game.status(), GameStatus::Won);
        assert_eq!(game.revealed_count(), 8);
        assert!(!game.cell_at((2, 2)).unwrap().is_revealed());
    }

    #[test]
    fn hitting_mine_reveals_nothing_else() {
        let mut game = game_with_mines((3, 3), &[&[0, 0, 0], &[0, 1, 0], &[0, 0, 0]]);

        assert_eq!(game.reveal((1, 1)), RevealOutcome::HitMine);
        assert_eq!(game.status(), GameStatus::Lost);
        assert_eq!(game.triggered_mine(), Some((1, 1)));
        assert_eq!(game.display_value((1, 1)), Ok(DisplayValue::MineHit));
        assert_eq!(game.revealed_count(), 1);
    }

    #[test]
    fn finished_game_ignores_moves() {
        let mut game = game_with_mines((3, 3), THREE_BY_THREE);
        game.reveal((1, 1));

        assert!(!game.can_reveal((0, 0)));
        assert_eq!(game.reveal((0, 0)), RevealOutcome::NoChange);
        assert_eq!(game.flag((0, 0)), MarkOutcome::NoChange);
        assert_eq!(game.display_value((0, 0)), Ok(DisplayValue::Blank));
        assert_eq!(game.status(), GameStatus::Lost);
    }

    #[test]
    fn cascade_leaves_flagged_cells_alone() {
        let mut game = Game::new((3, 3)).unwrap();
        game.flag((2, 2));

        assert_eq!(game.reveal((0, 0)), RevealOutcome::Revealed);
        assert_eq!(game.display_value((2, 2)), Ok(DisplayValue::Mark));
        assert_eq!(game.revealed_count(), 8);

        assert_eq!(game.reveal((2, 2)), RevealOutcome::Won);
    }

    #[test]
    fn out_of_bounds_moves_are_ignored() {
        let mut game = Game::new((2, 2)).unwrap();

        assert!(!game.can_reveal((2, 0)));
        assert_eq!(game.reveal((2, 0)), RevealOutcome::NoChange);
        assert_eq!(game.flag((0, 2)), MarkOutcome::NoChange);
        assert_eq!(game.unflag((9, 9)), MarkOutcome::NoChange);
        assert_eq!(game.display_value((2, 2)), Err(GameError::OutOfBounds));
        assert_eq!(game.cell_at((0, 2)), Err(GameError::OutOfBounds));
    }

    #[test]
    fn repeated_reveal_matches_single_reveal() {
        let mut once = game_with_mines((4, 4), FOUR_BY_FOUR);
        let mut twice = once.clone();

        once.reveal((3, 3));
        twice.reveal((3, 3));
        twice.reveal((3, 3));

        assert_eq!(once, twice);
    }

    #[test]
    fn snapshot_rows_start_at_top() {
        let mut game = game_with_mines((3, 2), &[&[1, 0, 0], &[0, 0, 0]]);
        game.flag((0, 1));
        game.reveal((2, 0));

        let snapshot = game.snapshot();

        use DisplayValue::*;
        assert_eq!(snapshot.row(0).to_vec(), vec![Mark, Count(1), Blank]);
        assert_eq!(snapshot.row(1).to_vec(), vec![Blank, Count(1), Blank]);
    }

    #[test]
    fn layout_is_fixed_once_a_cell_is_revealed() {
        let mut game = game_with_mines((2, 2), &[&[1, 1], &[0, 0]]);
        game.reveal((0, 0));
        assert_eq!(game.status(), GameStatus::Running);

        assert!(!game.set_mines(&rows(&[&[0, 1], &[1, 0]])));
        assert_eq!(game.mines(), Some(rows(&[&[1, 1], &[0, 0]])));
        assert_eq!(game.display_value((0, 0)), Ok(DisplayValue::Count(2)));
        assert_eq!(game.status(), GameStatus::Running);
    }

    #[test]
    fn finished_game_keeps_missing_layout() {
        let mut game = Game::new((3, 1)).unwrap();
        assert_eq!(game.reveal((0, 0)), RevealOutcome::Won);

        assert!(!game.set_mines(&rows(&[&[1, 0, 0]])));
        assert_eq!(game.mines(), None);
        assert_eq!(game.display_value((0, 0)), Ok(DisplayValue::Blank));
        assert_eq!(game.status(), GameStatus::Won);
    }

    #[test]
    fn layout_can_follow_flags() {
        let mut game = Game::new((2, 1)).unwrap();
        game.flag((1, 0));

        assert!(game.set_mines(&rows(&[&[0, 1]])));
        assert_eq!(game.mines_left(), 0);
        assert_eq!(game.reveal((0, 0)), RevealOutcome::Won);
    }

    #[test]
    fn game_state_survives_serialization() {
        let mut game = game_with_mines((4, 4), FOUR_BY_FOUR);
        game.flag((1, 1));
        game.reveal((3, 3));

        let json = serde_json::to_string(&game).unwrap();
        let restored: Game = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, game);
    }
}
