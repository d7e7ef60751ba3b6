use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ops;

/// Board edge length.
pub const SIZE: usize = 4;

/// Tile value that wins the game.
pub const WIN_VALUE: u32 = 2048;

/// The 4x4 grid of tile values, row-major; 0 marks an empty cell.
pub type Grid = [[u32; SIZE]; SIZE];

/// A direction to move/merge tiles.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

/// Session status. Win and Lose are terminal until the next `start`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Idle,
    Playing,
    Win,
    Lose,
}

/// A cell position on the grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

/// Transient report for a single move, owned by the caller.
///
/// Presentation code uses this for merge/spawn cues and then drops it;
/// the engine keeps no copy, so there is nothing for a renderer to
/// clear afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveReport {
    /// True iff the move changed at least one cell.
    pub moved: bool,
    /// Board coordinates where a merge happened, recorded at merge time.
    pub merged: Vec<Coord>,
    /// Where the post-move tile spawned, if the move was effective.
    pub spawned: Option<Coord>,
}

/// Rejection of a malformed caller-supplied starting grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid tile value {value} at row {row}, col {col}: cells must be 0 or a power of two >= 2")]
pub struct GridError {
    pub row: usize,
    pub col: usize,
    pub value: u32,
}

fn validate(grid: &Grid) -> Result<(), GridError> {
    for (row, cells) in grid.iter().enumerate() {
        for (col, &value) in cells.iter().enumerate() {
            if value != 0 && (value < 2 || !value.is_power_of_two()) {
                return Err(GridError { row, col, value });
            }
        }
    }
    Ok(())
}

/// The board engine: a state machine over a 4x4 grid of tile values.
///
/// All randomness goes through the injected RNG, so a seeded `StdRng`
/// makes a whole session reproducible.
#[derive(Debug, Clone)]
pub struct Game<R: Rng = StdRng> {
    grid: Grid,
    score: u32,
    status: Status,
    rng: R,
}

impl Game<StdRng> {
    /// New engine with an empty grid and a system-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// New engine over a caller-supplied starting grid.
    pub fn from_grid(grid: Grid) -> Result<Self, GridError> {
        Self::from_grid_with_rng(grid, StdRng::from_entropy())
    }
}

impl Default for Game<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> Game<R> {
    /// New engine with an empty grid and the given RNG.
    ///
    /// Deterministic example using a seeded RNG:
    /// ```
    /// use tileslide_core::Game;
    /// use rand::{SeedableRng, rngs::StdRng};
    /// let mut game = Game::with_rng(StdRng::seed_from_u64(123));
    /// game.start();
    /// assert_eq!(game.state().iter().flatten().filter(|&&v| v != 0).count(), 2);
    /// ```
    pub fn with_rng(rng: R) -> Self {
        Self {
            grid: [[0; SIZE]; SIZE],
            score: 0,
            status: Status::Idle,
            rng,
        }
    }

    /// New engine over a caller-supplied starting grid and RNG.
    ///
    /// Non-zero cells must be powers of two >= 2; anything else is
    /// rejected rather than silently carried into the session.
    pub fn from_grid_with_rng(grid: Grid, rng: R) -> Result<Self, GridError> {
        validate(&grid)?;
        Ok(Self {
            grid,
            score: 0,
            status: Status::Idle,
            rng,
        })
    }

    /// Current score: the highest tile value any merge has produced
    /// since the last `start`.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Snapshot of the grid. The copy is the caller's; mutating it
    /// cannot corrupt engine state.
    pub fn state(&self) -> Grid {
        self.grid
    }

    /// Current session status.
    pub fn status(&self) -> Status {
        self.status
    }

    /// Reset the grid and score, spawn two random tiles, start playing.
    pub fn start(&mut self) {
        self.grid = [[0; SIZE]; SIZE];
        self.score = 0;
        self.status = Status::Playing;
        self.spawn_tile();
        self.spawn_tile();
    }

    /// Alias of `start`; nothing of the prior session survives.
    pub fn restart(&mut self) {
        self.start();
    }

    /// Slide/merge tiles in `dir` without the random spawn.
    ///
    /// The pure half of `make_move`: score and win status still update,
    /// merges are still recorded, but no tile is added afterwards.
    pub fn shift(&mut self, dir: Move) -> MoveReport {
        if matches!(self.status, Status::Win | Status::Lose) {
            return MoveReport::default();
        }
        self.apply_shift(dir)
    }

    /// Slide/merge tiles in `dir`; iff the board changed, spawn one
    /// random tile and re-evaluate the terminal conditions.
    ///
    /// An ineffective move returns an empty report and leaves the
    /// board, score, and status untouched. Win takes precedence over a
    /// simultaneous dead board.
    pub fn make_move(&mut self, dir: Move) -> MoveReport {
        if matches!(self.status, Status::Win | Status::Lose) {
            return MoveReport::default();
        }
        let mut report = self.apply_shift(dir);
        if report.moved {
            report.spawned = self.spawn_tile();
            if self.status != Status::Win && !self.is_move_possible() {
                self.status = Status::Lose;
            }
        }
        report
    }

    pub fn move_left(&mut self) -> MoveReport {
        self.make_move(Move::Left)
    }

    pub fn move_right(&mut self) -> MoveReport {
        self.make_move(Move::Right)
    }

    pub fn move_up(&mut self) -> MoveReport {
        self.make_move(Move::Up)
    }

    pub fn move_down(&mut self) -> MoveReport {
        self.make_move(Move::Down)
    }

    /// True if any move in any direction would change the board: some
    /// cell is empty, or some adjacent pair holds equal values.
    pub fn is_move_possible(&self) -> bool {
        ops::any_move_possible(&self.grid)
    }

    fn apply_shift(&mut self, dir: Move) -> MoveReport {
        let outcome = ops::shift_grid(&self.grid, dir);
        if outcome.grid == self.grid {
            return MoveReport::default();
        }
        self.grid = outcome.grid;
        if outcome.max_merged > self.score {
            self.score = outcome.max_merged;
        }
        if self.score >= WIN_VALUE {
            self.status = Status::Win;
        }
        MoveReport {
            moved: true,
            merged: outcome.merged,
            spawned: None,
        }
    }

    /// Put a 2 (90%) or 4 (10%) into a uniformly chosen empty cell.
    /// A full board is a valid terminal condition, not an error.
    fn spawn_tile(&mut self) -> Option<Coord> {
        let empty = ops::empty_cells(&self.grid);
        if empty.is_empty() {
            return None;
        }
        let at = empty[self.rng.gen_range(0..empty.len())];
        self.grid[at.row][at.col] = if self.rng.gen_range(0..10) < 9 { 2 } else { 4 };
        Some(at)
    }
}

impl<R: Rng> fmt::Display for Game<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                writeln!(f, "-------------------------------")?;
            }
            let cells: Vec<String> = row.iter().map(format_cell).collect();
            writeln!(f, "{}", cells.join("|"))?;
        }
        Ok(())
    }
}

fn format_cell(val: &u32) -> String {
    match val {
        0 => String::from("       "),
        v => format!("{:^7}", v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_rejects_malformed_grid() {
        let mut grid = [[0; SIZE]; SIZE];
        grid[1][2] = 3;
        let err = Game::from_grid(grid).unwrap_err();
        assert_eq!(
            err,
            GridError {
                row: 1,
                col: 2,
                value: 3
            }
        );

        // 1 is a power of two but not a legal tile.
        grid[1][2] = 1;
        assert!(Game::from_grid(grid).is_err());

        grid[1][2] = 16;
        assert!(Game::from_grid(grid).is_ok());
    }

    #[test]
    fn it_starts_idle() {
        let game = Game::with_rng(StdRng::seed_from_u64(0));
        assert_eq!(game.status(), Status::Idle);
        assert_eq!(game.score(), 0);
        assert_eq!(game.state(), [[0; SIZE]; SIZE]);
    }

    #[test]
    fn it_formats_empty_cells_blank() {
        assert_eq!(format_cell(&0), "       ");
        assert_eq!(format_cell(&2048).trim(), "2048");
    }

    #[test]
    fn it_returns_a_snapshot() {
        let mut game = Game::with_rng(StdRng::seed_from_u64(7));
        game.start();
        let mut snapshot = game.state();
        snapshot[0][0] = 1024;
        assert_ne!(game.state()[0][0], 1024);
    }
}
