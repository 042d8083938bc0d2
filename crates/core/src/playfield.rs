//! Playfield module - manages the locked-cell grid
//!
//! The playfield is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that locked there. Storage is a flat array for cache locality and zero
//! allocation. Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges
//! 0..19 (top to bottom). Rows above the field (y < 0) are not stored; they act as
//! an always-empty spawn buffer.

use arrayvec::ArrayVec;

use crate::pieces::Piece;
use crate::types::{cell_to_u8, Cell, PieceKind, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Total number of cells on the playfield
const PLAYFIELD_SIZE: usize = (PLAYFIELD_WIDTH as usize) * (PLAYFIELD_HEIGHT as usize);

const WIDTH: usize = PLAYFIELD_WIDTH as usize;
const HEIGHT: usize = PLAYFIELD_HEIGHT as usize;

/// Numeric grid handed to the presentation layer
pub type U8Grid = [[u8; WIDTH]; HEIGHT];

/// Row indices removed by one clear, ascending
pub type ClearedRows = ArrayVec<usize, HEIGHT>;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Playfield {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; PLAYFIELD_SIZE],
}

impl Playfield {
    /// Create a new empty playfield
    pub fn new() -> Self {
        Self {
            cells: [None; PLAYFIELD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= PLAYFIELD_WIDTH as i8 || y < 0 || y >= PLAYFIELD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * WIDTH + (x as usize))
    }

    pub fn width(&self) -> u8 {
        PLAYFIELD_WIDTH
    }

    pub fn height(&self) -> u8 {
        PLAYFIELD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Whether a single mino at (x, y) would collide
    ///
    /// Columns outside 0..10 and rows at or below the floor collide. Rows above the
    /// field (y < 0) are free, which lets pieces spawn partly off-grid.
    pub fn blocks_cell(&self, x: i8, y: i8) -> bool {
        if x < 0 || x >= PLAYFIELD_WIDTH as i8 || y >= PLAYFIELD_HEIGHT as i8 {
            return true;
        }
        if y < 0 {
            return false;
        }
        self.is_occupied(x, y)
    }

    /// Check whether any occupied cell of `piece` collides with bounds or locked cells
    pub fn collides(&self, piece: &Piece) -> bool {
        piece.cells().any(|(x, y, _)| self.blocks_cell(x, y))
    }

    /// Write the piece's cells into the grid
    ///
    /// Returns false when part of the piece is still above the field. Those cells
    /// cannot be stored, so the caller must treat the lock as a top-out.
    pub fn lock(&mut self, piece: &Piece) -> bool {
        let mut inside = true;
        for (x, y, kind) in piece.cells() {
            inside &= self.set(x, y, Some(kind));
        }
        inside
    }

    fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }
        self.row(y).iter().all(|cell| cell.is_some())
    }

    /// Check if a row has no filled cell
    pub fn is_row_empty(&self, y: usize) -> bool {
        if y >= HEIGHT {
            return true;
        }
        self.row(y).iter().all(|cell| cell.is_none())
    }

    /// Remove a row, shift all rows above it down by one and insert an empty row on top
    /// Returns false if `y` is out of bounds
    pub fn remove_row(&mut self, y: usize) -> bool {
        if y >= HEIGHT {
            return false;
        }

        self.cells.copy_within(0..y * WIDTH, WIDTH);
        for cell in &mut self.cells[..WIDTH] {
            *cell = None;
        }

        true
    }

    /// Find and remove full rows, returning the removed indices in ascending order
    ///
    /// Scans from the floor upward and stops at the first fully empty row: with
    /// gravity-only locking nothing can rest above an empty row. Rows are removed
    /// top-most first so the indices of the remaining collected rows stay valid.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut rows = ClearedRows::new();

        for y in (0..HEIGHT).rev() {
            if self.is_row_empty(y) {
                break;
            }
            if !self.is_row_full(y) {
                continue;
            }
            rows.insert(0, y);
        }

        for &y in &rows {
            self.remove_row(y);
        }

        rows
    }

    /// Copy the grid into a numeric matrix (0 = empty, 1-7 = color)
    pub fn write_u8_grid(&self, out: &mut U8Grid) {
        for (y, dst) in out.iter_mut().enumerate() {
            for (value, cell) in dst.iter_mut().zip(self.row(y)) {
                *value = cell_to_u8(*cell);
            }
        }
    }

    /// Paint a piece onto a numeric grid without touching the playfield
    ///
    /// Only cells inside the grid are painted.
    pub fn overlay(out: &mut U8Grid, piece: &Piece) {
        for (x, y, kind) in piece.cells() {
            if let Some(idx) = Self::index(x, y) {
                out[idx / WIDTH][idx % WIDTH] = kind.color_index();
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Clear the entire playfield
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = None;
        }
    }

    /// Fill a whole row with one kind (puzzle setups, tests, benches)
    pub fn fill_row(&mut self, y: i8, kind: PieceKind) {
        for x in 0..PLAYFIELD_WIDTH as i8 {
            self.set(x, y, Some(kind));
        }
    }
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pieces::Piece;

    #[test]
    fn test_index_calculation() {
        assert_eq!(Playfield::index(0, 0), Some(0));
        assert_eq!(Playfield::index(9, 0), Some(9));
        assert_eq!(Playfield::index(0, 1), Some(10));
        assert_eq!(Playfield::index(9, 19), Some(199));
        assert_eq!(Playfield::index(-1, 0), None);
        assert_eq!(Playfield::index(10, 0), None);
        assert_eq!(Playfield::index(0, 20), None);
    }

    #[test]
    fn test_blocks_cell_asymmetry() {
        let field = Playfield::new();
        // Above the field is free
        assert!(!field.blocks_cell(4, -1));
        assert!(!field.blocks_cell(0, -3));
        // Sides and floor are not
        assert!(field.blocks_cell(-1, 5));
        assert!(field.blocks_cell(10, 5));
        assert!(field.blocks_cell(4, 20));
        // Sides stay solid above the field too
        assert!(field.blocks_cell(-1, -1));
    }

    #[test]
    fn test_collides_with_locked_cell() {
        let mut field = Playfield::new();
        let piece = Piece::spawn(PieceKind::T).shifted(0, 5);
        assert!(!field.collides(&piece));

        // T occupies (3..=5, 5) and (4, 6) after the shift
        field.set(4, 6, Some(PieceKind::I));
        assert!(field.collides(&piece));
    }

    #[test]
    fn test_clear_full_rows_stops_at_empty_row() {
        let mut field = Playfield::new();
        // A full row floating above an empty gap is never reached
        field.fill_row(10, PieceKind::I);
        field.set(0, 19, Some(PieceKind::J));

        let cleared = field.clear_full_rows();
        assert!(cleared.is_empty());
        assert!(field.is_row_full(10));
    }

    #[test]
    fn test_clear_full_rows_ascending_order() {
        let mut field = Playfield::new();
        field.fill_row(19, PieceKind::I);
        field.set(0, 18, Some(PieceKind::T));
        field.fill_row(17, PieceKind::L);
        field.set(5, 16, Some(PieceKind::Z));

        let cleared = field.clear_full_rows();
        assert_eq!(cleared.as_slice(), &[17, 19]);

        // Partial rows shifted down by the number of cleared rows beneath them
        assert_eq!(field.get(0, 19), Some(Some(PieceKind::T)));
        assert_eq!(field.get(5, 18), Some(Some(PieceKind::Z)));
        assert!(field.is_row_empty(17));
        assert!(field.is_row_empty(0));
    }

    #[test]
    fn test_overlay_skips_spawn_buffer() {
        let mut grid = [[0u8; WIDTH]; HEIGHT];
        let mut piece = Piece::spawn(PieceKind::I);
        piece.rotate(true);
        // Vertical I at y = -1 has one mino above the field
        Playfield::overlay(&mut grid, &piece);

        let painted: usize = grid.iter().flatten().filter(|&&v| v == 1).count();
        assert_eq!(painted, 3);
    }

    #[test]
    fn test_write_u8_grid_uses_color_indices() {
        let mut field = Playfield::new();
        field.set(3, 4, Some(PieceKind::S));
        field.set(9, 19, Some(PieceKind::O));

        let mut grid = [[7u8; WIDTH]; HEIGHT];
        field.write_u8_grid(&mut grid);
        assert_eq!(grid[4][3], 5);
        assert_eq!(grid[19][9], 4);
        assert_eq!(grid.iter().flatten().filter(|&&v| v != 0).count(), 2);
    }

    #[test]
    fn test_lock_reports_cells_above_field() {
        let mut field = Playfield::new();
        let mut piece = Piece::spawn(PieceKind::I);
        piece.rotate(true);

        // Vertical I at y = -1: three minos land, one is still above row 0
        assert!(!field.lock(&piece));
        for y in 0..3 {
            assert!(field.is_occupied(5, y));
        }

        let mut field = Playfield::new();
        assert!(field.lock(&piece.shifted(0, 1)));
        assert_eq!(field.cells().iter().filter(|c| c.is_some()).count(), 4);
    }
}
