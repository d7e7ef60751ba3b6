pub mod engine;

pub use engine::{Coord, Game, Grid, GridError, Move, MoveReport, Status, SIZE, WIN_VALUE};
