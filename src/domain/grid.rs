/// Validated ASCII tile grid.
///
/// A `Grid` can only be built through `Grid::new`, so every holder may
/// assume at least one row and identical row lengths.

use thiserror::Error;

use super::tile::Tile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("grid has no rows")]
    Empty,
    #[error("grid rows have zero width")]
    ZeroWidth,
    #[error("row {row} has {found} columns, expected {expected}")]
    Ragged { row: usize, expected: usize, found: usize },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    cells: Vec<Vec<char>>,
    width: usize,
}

impl Grid {
    pub fn new<S: AsRef<str>>(rows: &[S]) -> Result<Self, GridError> {
        let cells: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let width = cells.first().ok_or(GridError::Empty)?.len();
        if width == 0 {
            return Err(GridError::ZeroWidth);
        }
        for (row, line) in cells.iter().enumerate() {
            if line.len() != width {
                return Err(GridError::Ragged { row, expected: width, found: line.len() });
            }
        }
        Ok(Grid { cells, width })
    }

    pub fn width(&self) -> usize { self.width }
    pub fn height(&self) -> usize { self.cells.len() }

    #[inline]
    pub fn char_at(&self, x: usize, y: usize) -> char {
        self.cells[y][x]
    }

    #[inline]
    pub fn tile_at(&self, x: usize, y: usize) -> Tile {
        Tile::from_char(self.char_at(x, y))
    }

    /// Iterate every cell as `(x, y, char)`, row by row.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, char)> + '_ {
        self.cells.iter().enumerate().flat_map(|(y, row)| {
            row.iter().enumerate().map(move |(x, &ch)| (x, y, ch))
        })
    }

    /// Overwrite one cell. Shape cannot change, so the grid stays valid.
    pub(crate) fn set_char(&mut self, x: usize, y: usize, ch: char) {
        if y < self.cells.len() && x < self.width {
            self.cells[y][x] = ch;
        }
    }
}
