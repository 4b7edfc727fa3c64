//! Wall topology produced by the generator
//!
//! Two independent matrices describe every interior wall:
//! - `vertical[r][c]` is the wall between `(r, c)` and `(r, c + 1)`, shape `rows x (cols - 1)`
//! - `horizontal[r][c]` is the wall between `(r, c)` and `(r + 1, c)`, shape `(rows - 1) x cols`
//!
//! `true` means the wall has been removed (passage open), `false` means the wall stands.

use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use super::grid::{Cell, Direction, Grid};
use crate::error::{MazeError, Result};

#[derive(Debug, Clone, Copy)]
enum WallSlot {
    Vertical(usize, usize),
    Horizontal(usize, usize),
}

/// Built only through [`WallTopology::closed`], so dimensions are always non-zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WallTopology {
    rows: usize,
    cols: usize,
    start: Cell,
    vertical: Grid<bool>,
    horizontal: Grid<bool>,
}

impl WallTopology {
    /// A fully walled grid with no passages
    pub fn closed(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(MazeError::InvalidDimensions { rows, cols });
        }
        Ok(Self {
            rows,
            cols,
            start: Cell::new(0, 0),
            vertical: Grid::filled(rows, cols - 1, false),
            horizontal: Grid::filled(rows - 1, cols, false),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    /// Cell the carving started from
    pub fn start(&self) -> Cell {
        self.start
    }

    pub(crate) fn set_start(&mut self, start: Cell) {
        self.start = start;
    }

    pub fn vertical_walls(&self) -> &Grid<bool> {
        &self.vertical
    }

    pub fn horizontal_walls(&self) -> &Grid<bool> {
        &self.horizontal
    }

    /// Matrix slot holding the wall on `dir` side of `cell`
    fn slot(&self, cell: Cell, dir: Direction) -> Option<WallSlot> {
        cell.step(dir, self.rows, self.cols)?;
        Some(match dir {
            Direction::Right => WallSlot::Vertical(cell.row, cell.col),
            Direction::Left => WallSlot::Vertical(cell.row, cell.col - 1),
            Direction::Down => WallSlot::Horizontal(cell.row, cell.col),
            Direction::Up => WallSlot::Horizontal(cell.row - 1, cell.col),
        })
    }

    /// Whether a passage leads out of `cell` toward `dir`
    pub fn is_open(&self, cell: Cell, dir: Direction) -> bool {
        let wall = match self.slot(cell, dir) {
            Some(WallSlot::Vertical(r, c)) => self.vertical.get(r, c),
            Some(WallSlot::Horizontal(r, c)) => self.horizontal.get(r, c),
            None => None,
        };
        wall.copied().unwrap_or(false)
    }

    /// Remove the wall on `dir` side of `cell`. Returns false for the outer edge.
    pub fn open(&mut self, cell: Cell, dir: Direction) -> bool {
        let wall = match self.slot(cell, dir) {
            Some(WallSlot::Vertical(r, c)) => self.vertical.get_mut(r, c),
            Some(WallSlot::Horizontal(r, c)) => self.horizontal.get_mut(r, c),
            None => None,
        };
        match wall {
            Some(wall) => {
                *wall = true;
                true
            }
            None => false,
        }
    }

    /// Total passages across both matrices
    pub fn open_passages(&self) -> usize {
        self.vertical.iter().filter(|(_, _, open)| **open).count()
            + self.horizontal.iter().filter(|(_, _, open)| **open).count()
    }

    /// Cells reachable from `cell` in one move
    pub fn passages_from(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        Direction::ALL.into_iter().filter_map(move |dir| {
            if self.is_open(cell, dir) {
                cell.step(dir, self.rows, self.cols)
            } else {
                None
            }
        })
    }

    /// Number of cells reachable from `(0, 0)` through open passages
    pub fn reachable_cells(&self) -> usize {
        let mut seen = Grid::filled(self.rows, self.cols, false);
        let mut queue = VecDeque::from([Cell::new(0, 0)]);
        seen[Cell::new(0, 0)] = true;
        let mut count = 0;

        while let Some(cell) = queue.pop_front() {
            count += 1;
            for next in self.passages_from(cell) {
                if !seen[next] {
                    seen[next] = true;
                    queue.push_back(next);
                }
            }
        }
        count
    }

    /// Connected with exactly `cells - 1` passages, hence also acyclic
    pub fn is_perfect(&self) -> bool {
        self.open_passages() + 1 == self.cell_count()
            && self.reachable_cells() == self.cell_count()
    }
}

impl fmt::Display for WallTopology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+{}", "---+".repeat(self.cols))?;
        for row in 0..self.rows {
            let mut cells = String::from("|");
            let mut floor = String::from("+");
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                cells.push_str("   ");
                cells.push(if self.is_open(cell, Direction::Right) { ' ' } else { '|' });
                floor.push_str(if self.is_open(cell, Direction::Down) { "   " } else { "---" });
                floor.push('+');
            }
            writeln!(f, "{cells}")?;
            writeln!(f, "{floor}")?;
        }
        Ok(())
    }
}
