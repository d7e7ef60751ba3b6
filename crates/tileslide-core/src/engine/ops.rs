use super::state::{Coord, Grid, Move, SIZE};

pub(crate) type Line = [u32; SIZE];

/// Outcome of sliding a whole grid in one direction, before any spawn.
pub(crate) struct ShiftOutcome {
    pub(crate) grid: Grid,
    pub(crate) merged: Vec<Coord>,
    pub(crate) max_merged: u32,
}

/// Board coordinate of the cell `offset` steps from the leading edge of
/// line `line` for a move in `dir`.
///
/// Horizontal moves index rows, vertical moves index columns; Right and
/// Down walk their line from the far end, so one mapping covers both
/// the reversal and the row/column transposition.
pub(crate) fn cell_coord(dir: Move, line: usize, offset: usize) -> Coord {
    match dir {
        Move::Left => Coord {
            row: line,
            col: offset,
        },
        Move::Right => Coord {
            row: line,
            col: SIZE - 1 - offset,
        },
        Move::Up => Coord {
            row: offset,
            col: line,
        },
        Move::Down => Coord {
            row: SIZE - 1 - offset,
            col: line,
        },
    }
}

/// Slide non-zero cells toward the leading edge, preserving order.
pub(crate) fn compress(line: Line) -> Line {
    let mut out = [0; SIZE];
    let mut idx = 0;
    for val in line {
        if val != 0 {
            out[idx] = val;
            idx += 1;
        }
    }
    out
}

/// Merge equal adjacent cells in a single pass from the leading edge.
///
/// Each cell merges at most once: the partner slot is zeroed, so the
/// doubled cell is never compared against the next cell in the same
/// pass. Returns the merge offsets and the largest value produced.
pub(crate) fn merge(line: &mut Line) -> (Vec<usize>, u32) {
    let mut merged_at = Vec::new();
    let mut max_produced = 0;
    for i in 0..SIZE - 1 {
        if line[i] != 0 && line[i] == line[i + 1] {
            line[i] *= 2;
            line[i + 1] = 0;
            merged_at.push(i);
            max_produced = max_produced.max(line[i]);
        }
    }
    (merged_at, max_produced)
}

/// The full per-line pipeline: compress, merge once, close the gaps.
///
/// Merge offsets are recorded at merge time, i.e. before the second
/// compress closes the gaps left by zeroed partners.
pub(crate) fn operate(line: Line) -> (Line, Vec<usize>, u32) {
    let mut compressed = compress(line);
    let (merged_at, max_produced) = merge(&mut compressed);
    (compress(compressed), merged_at, max_produced)
}

/// Apply `operate` to every line of the grid for a move in `dir`,
/// mapping merge offsets back to true board coordinates.
pub(crate) fn shift_grid(grid: &Grid, dir: Move) -> ShiftOutcome {
    let mut out = *grid;
    let mut merged = Vec::new();
    let mut max_merged = 0;
    for line in 0..SIZE {
        let mut buf: Line = [0; SIZE];
        for offset in 0..SIZE {
            let c = cell_coord(dir, line, offset);
            buf[offset] = grid[c.row][c.col];
        }
        let (new_line, merged_at, max_produced) = operate(buf);
        max_merged = max_merged.max(max_produced);
        for offset in merged_at {
            merged.push(cell_coord(dir, line, offset));
        }
        for (offset, &val) in new_line.iter().enumerate() {
            let c = cell_coord(dir, line, offset);
            out[c.row][c.col] = val;
        }
    }
    ShiftOutcome {
        grid: out,
        merged,
        max_merged,
    }
}

/// All empty-cell coordinates in row-major order.
pub(crate) fn empty_cells(grid: &Grid) -> Vec<Coord> {
    let mut empty = Vec::new();
    for (row, cells) in grid.iter().enumerate() {
        for (col, &val) in cells.iter().enumerate() {
            if val == 0 {
                empty.push(Coord { row, col });
            }
        }
    }
    empty
}

/// True if any cell is empty, or any horizontally or vertically
/// adjacent pair holds equal non-zero values.
pub(crate) fn any_move_possible(grid: &Grid) -> bool {
    for row in 0..SIZE {
        for col in 0..SIZE {
            if grid[row][col] == 0 {
                return true;
            }
            if col + 1 < SIZE && grid[row][col] == grid[row][col + 1] {
                return true;
            }
            if row + 1 < SIZE && grid[row][col] == grid[row + 1][col] {
                return true;
            }
        }
    }
    false
}
