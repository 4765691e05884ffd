use serde::{Deserialize, Serialize};

use crate::{OutOfBoundsError, PlacementError};

use super::piece::PieceKind;

/// A `(column, row)` board coordinate. Row 0 is the top row.
///
/// Coordinates are signed so that candidate placements left of or above the
/// grid can be represented and rejected.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("({col}, {row})")]
pub struct Position {
    pub col: i32,
    pub row: i32,
}

impl Position {
    #[must_use]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[must_use]
    pub const fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }
}

/// Occupancy of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, derive_more::IsVariant)]
pub enum Cell {
    #[default]
    Empty,
    /// Filled cell without a piece identity (pre-stacked garbage).
    Solid,
    /// Cell filled by a locked piece of the given kind.
    Piece(PieceKind),
}

impl Cell {
    #[must_use]
    pub const fn is_filled(self) -> bool {
        !matches!(self, Cell::Empty)
    }

    const fn as_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Solid => '#',
            Cell::Piece(kind) => kind.as_char(),
        }
    }

    const fn from_char(c: char) -> Option<Self> {
        match c {
            '.' => Some(Cell::Empty),
            '#' => Some(Cell::Solid),
            _ => match PieceKind::from_char(c) {
                Some(kind) => Some(Cell::Piece(kind)),
                None => None,
            },
        }
    }
}

const WIDTH: usize = 10;
const HEIGHT: usize = 20;
const SIZE: usize = WIDTH * HEIGHT;

/// The playfield: a 10×20 grid stored as a flat row-major array.
///
/// Cell `(col, row)` lives at index `row * WIDTH + col`. Every position always
/// holds a defined [`Cell`]. The board is only mutated by locking cells and by
/// clearing full rows.
///
/// # Example
///
/// ```
/// use blockfall_engine::Board;
///
/// let mut board = Board::from_ascii(
///     "
///     ###########
///     #.########
///     ",
/// );
/// assert_eq!(board.clear_full_rows(), 1);
/// assert_eq!(board.is_occupied(1, 19), Ok(false));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cells: [Cell; SIZE],
}

impl Default for Board {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl Board {
    pub const WIDTH: usize = WIDTH;
    pub const HEIGHT: usize = HEIGHT;

    pub const EMPTY: Self = Self {
        cells: [Cell::Empty; SIZE],
    };

    #[must_use]
    pub const fn new() -> Self {
        Self::EMPTY
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    #[must_use]
    pub const fn contains(pos: Position) -> bool {
        pos.col >= 0 && pos.col < WIDTH as i32 && pos.row >= 0 && pos.row < HEIGHT as i32
    }

    #[expect(clippy::cast_sign_loss)]
    fn index(pos: Position) -> Result<usize, OutOfBoundsError> {
        if !Self::contains(pos) {
            return Err(OutOfBoundsError(pos));
        }
        Ok(pos.row as usize * WIDTH + pos.col as usize)
    }

    pub fn cell(&self, pos: Position) -> Result<Cell, OutOfBoundsError> {
        Ok(self.cells[Self::index(pos)?])
    }

    /// Returns whether `(col, row)` is filled.
    pub fn is_occupied(&self, col: i32, row: i32) -> Result<bool, OutOfBoundsError> {
        Ok(self.cell(Position::new(col, row))?.is_filled())
    }

    /// Merges cells into the grid.
    ///
    /// Every cell is validated before any is written, so on error the board is
    /// unchanged.
    pub fn lock(&mut self, cells: &[(Position, Cell)]) -> Result<(), PlacementError> {
        for &(pos, _) in cells {
            if self.cell(pos)?.is_filled() {
                return Err(PlacementError::Occupied(pos));
            }
        }
        for &(pos, cell) in cells {
            self.cells[Self::index(pos)?] = cell;
        }
        Ok(())
    }

    /// Returns the number of filled rows removed.
    ///
    /// All full rows are removed in one pass: every remaining row moves down by
    /// the number of cleared rows beneath it, and the same number of empty rows
    /// appear at the top.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut count = 0;
        for row in (0..HEIGHT).rev() {
            if self.is_row_full(row) {
                count += 1;
                continue;
            }
            if count > 0 {
                let src = row * WIDTH;
                self.cells.copy_within(src..src + WIDTH, src + count * WIDTH);
            }
        }
        self.cells[..count * WIDTH].fill(Cell::Empty);
        count
    }

    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// # Panics
    ///
    /// Panics if `row >= Board::HEIGHT`.
    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.row(row).iter().all(|cell| cell.is_filled())
    }

    /// Cells of `row`, left to right.
    ///
    /// # Panics
    ///
    /// Panics if `row >= Board::HEIGHT`. Use [`Board::cell`] for checked
    /// access.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Cell; WIDTH] {
        self.cells[row * WIDTH..][..WIDTH].try_into().unwrap()
    }

    /// Returns an iterator over the rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell; WIDTH]> {
        (0..HEIGHT).map(|row| self.row(row))
    }

    /// Returns an iterator over every cell with its position, row-major.
    #[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn cells(&self) -> impl Iterator<Item = (Position, Cell)> + '_ {
        self.cells.iter().enumerate().map(|(i, &cell)| {
            let pos = Position::new((i % WIDTH) as i32, (i / WIDTH) as i32);
            (pos, cell)
        })
    }

    #[must_use]
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Creates a board from ASCII art, bottom-aligned.
    ///
    /// `.` is empty, `#` is [`Cell::Solid`] and a piece letter is a locked cell
    /// of that kind. Blank lines are skipped; the last line given is row 19.
    ///
    /// # Panics
    ///
    /// Panics if a row is not 10 cells wide or there are more than 20 rows.
    #[must_use]
    pub fn from_ascii(art: &str) -> Self {
        let lines: Vec<&str> = art
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        assert!(lines.len() <= HEIGHT, "at most {HEIGHT} rows, got {}", lines.len());

        let mut board = Self::EMPTY;
        let top = HEIGHT - lines.len();
        for (i, line) in lines.iter().enumerate() {
            let cells: Vec<Cell> = line.chars().filter_map(Cell::from_char).collect();
            assert_eq!(
                cells.len(),
                WIDTH,
                "each row must have exactly {WIDTH} cells, got {} at row {}",
                cells.len(),
                top + i
            );
            let start = (top + i) * WIDTH;
            board.cells[start..start + WIDTH].copy_from_slice(&cells);
        }
        board
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: one string per row, top to bottom (e.g. "..TTT.....")
        let rows: Vec<String> = self
            .rows()
            .map(|row| row.iter().map(|cell| cell.as_char()).collect())
            .collect();
        rows.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let rows = Vec::<String>::deserialize(deserializer)?;
        if rows.len() != HEIGHT {
            return Err(serde::de::Error::custom(format!(
                "expected {HEIGHT} rows, got {}",
                rows.len()
            )));
        }

        let mut board = Self::EMPTY;
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != WIDTH {
                return Err(serde::de::Error::custom(format!(
                    "expected {WIDTH} cells at row {y}, got '{row}'"
                )));
            }
            for (x, c) in row.chars().enumerate() {
                let cell = Cell::from_char(c).ok_or_else(|| {
                    serde::de::Error::custom(format!("invalid cell '{c}' at ({x}, {y})"))
                })?;
                board.cells[y * WIDTH + x] = cell;
            }
        }
        Ok(board)
    }
}
