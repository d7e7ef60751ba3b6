//! Engine module: 4x4 merge-puzzle grid, the line reduction pipeline,
//! and the stateful `Game` wrapper. Public API stays small and ergonomic.
//!
//! - `Game` owns the grid, score, status, and the injected RNG.
//! - `state` holds the public types; `ops` the pure line/grid algorithms.

mod ops;
pub mod state;

pub use state::{Coord, Game, Grid, GridError, Move, MoveReport, Status, SIZE, WIN_VALUE};
