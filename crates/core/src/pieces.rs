//! Pieces module - block matrices and in-place ring rotation
//!
//! Every piece is a square matrix (3x3 for J/L/S/T/Z, 4x4 for I/O) positioned by
//! its top-left corner in playfield coordinates. Rotation permutes the matrix
//! in place, ring by ring, so rotating four times in the same direction is the
//! identity and a clockwise turn is undone exactly by a counter-clockwise one.

use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::types::{cell_to_u8, Cell, PieceKind, MAX_MATRIX_SIZE, PLAYFIELD_WIDTH, SPAWN_Y};

/// Square block matrix of edge `size` (3 or 4)
///
/// Cells outside `size x size` are always empty and never read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Blocks {
    size: u8,
    cells: [[Cell; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE],
}

impl Blocks {
    /// Build a matrix from numeric rows (0 = empty, 1-7 = color index)
    ///
    /// Unknown indices are treated as empty. Rows must be square and at most 4 wide.
    pub fn from_rows<const N: usize>(rows: [[u8; N]; N]) -> Self {
        assert!(N <= MAX_MATRIX_SIZE, "block matrix too large: {}", N);
        let mut cells = [[None; MAX_MATRIX_SIZE]; MAX_MATRIX_SIZE];
        for (y, row) in rows.iter().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                cells[y][x] = PieceKind::from_color_index(v);
            }
        }
        Self {
            size: N as u8,
            cells,
        }
    }

    /// Edge length of the matrix
    pub fn size(&self) -> usize {
        self.size as usize
    }

    /// Cell at local offset (x, y), `None` outside the matrix
    pub fn get(&self, x: usize, y: usize) -> Cell {
        if x >= self.size() || y >= self.size() {
            return None;
        }
        self.cells[y][x]
    }

    /// Iterate occupied cells as (local_x, local_y, kind)
    pub fn occupied(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        let n = self.size();
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| self.cells[y][x].map(|kind| (x as i8, y as i8, kind)))
        })
    }

    /// Numeric rows (for tests and debugging)
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        let n = self.size();
        (0..n)
            .map(|y| (0..n).map(|x| cell_to_u8(self.cells[y][x])).collect())
            .collect()
    }
}

impl Serialize for Blocks {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let n = self.size();
        let mut seq = serializer.serialize_seq(Some(n))?;
        for row in &self.cells[..n] {
            let mut out = [0u8; MAX_MATRIX_SIZE];
            for (dst, cell) in out.iter_mut().zip(row.iter()) {
                *dst = cell_to_u8(*cell);
            }
            seq.serialize_element(&out[..n])?;
        }
        seq.end()
    }
}

/// Canonical rotation-0 matrix for a piece kind
pub fn canonical_blocks(kind: PieceKind) -> Blocks {
    match kind {
        PieceKind::I => Blocks::from_rows([
            [0, 0, 0, 0],
            [1, 1, 1, 1],
            [0, 0, 0, 0],
            [0, 0, 0, 0],
        ]),
        PieceKind::J => Blocks::from_rows([
            [0, 0, 0],
            [2, 2, 2],
            [0, 0, 2],
        ]),
        PieceKind::L => Blocks::from_rows([
            [0, 0, 0],
            [3, 3, 3],
            [3, 0, 0],
        ]),
        PieceKind::O => Blocks::from_rows([
            [0, 0, 0, 0],
            [0, 4, 4, 0],
            [0, 4, 4, 0],
            [0, 0, 0, 0],
        ]),
        PieceKind::S => Blocks::from_rows([
            [0, 0, 0],
            [0, 5, 5],
            [5, 5, 0],
        ]),
        PieceKind::T => Blocks::from_rows([
            [0, 0, 0],
            [6, 6, 6],
            [0, 6, 0],
        ]),
        PieceKind::Z => Blocks::from_rows([
            [0, 0, 0],
            [7, 7, 0],
            [0, 7, 7],
        ]),
    }
}

/// Rotate a square matrix 90° in place
///
/// Walks each concentric ring and swaps the four cells of every orbit
/// `(i,j) -> (j,m-i) -> (m-i,m-j) -> (m-j,i)` where `m = size - 1`.
/// The outer loop covers `size / 2` rings; the inner loop visits each orbit once.
pub fn rotate_blocks(blocks: &mut Blocks, clockwise: bool) {
    let n = blocks.size();
    if n == 0 {
        return;
    }
    let m = n - 1;
    let b = &mut blocks.cells;

    for i in 0..n / 2 {
        for j in i..m - i {
            let temp = b[i][j];

            if clockwise {
                b[i][j] = b[m - j][i];
                b[m - j][i] = b[m - i][m - j];
                b[m - i][m - j] = b[j][m - i];
                b[j][m - i] = temp;
            } else {
                b[i][j] = b[j][m - i];
                b[j][m - i] = b[m - i][m - j];
                b[m - i][m - j] = b[m - j][i];
                b[m - j][i] = temp;
            }
        }
    }
}

/// A piece: block matrix plus top-left offset into the playfield
///
/// `y` may be negative while the piece is still partly above the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub blocks: Blocks,
    pub x: i8,
    pub y: i8,
}

impl Piece {
    /// Create a piece at its spawn position: horizontally centered, one row above the field
    pub fn spawn(kind: PieceKind) -> Self {
        let blocks = canonical_blocks(kind);
        let x = (PLAYFIELD_WIDTH as i8 - blocks.size() as i8) / 2;
        Self {
            kind,
            blocks,
            x,
            y: SPAWN_Y,
        }
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Rotate the matrix in place (position unchanged)
    pub fn rotate(&mut self, clockwise: bool) {
        rotate_blocks(&mut self.blocks, clockwise);
    }

    /// Absolute playfield coordinates of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8, PieceKind)> + '_ {
        self.blocks
            .occupied()
            .map(move |(bx, by, kind)| (self.x + bx, self.y + by, kind))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_sizes() {
        assert_eq!(canonical_blocks(PieceKind::I).size(), 4);
        assert_eq!(canonical_blocks(PieceKind::O).size(), 4);
        for kind in [PieceKind::J, PieceKind::L, PieceKind::S, PieceKind::T, PieceKind::Z] {
            assert_eq!(canonical_blocks(kind).size(), 3, "{:?}", kind);
        }
    }

    #[test]
    fn canonical_blocks_use_own_color() {
        for kind in PieceKind::ALL {
            let blocks = canonical_blocks(kind);
            let occupied: Vec<_> = blocks.occupied().collect();
            assert_eq!(occupied.len(), 4, "{:?} should have four minos", kind);
            assert!(occupied.iter().all(|&(_, _, k)| k == kind));
        }
    }

    #[test]
    fn spawn_position_is_centered_above_field() {
        for kind in PieceKind::ALL {
            let piece = Piece::spawn(kind);
            assert_eq!(piece.x, 3);
            assert_eq!(piece.y, -1);
        }
    }

    #[test]
    fn rotate_t_clockwise() {
        let mut blocks = canonical_blocks(PieceKind::T);
        rotate_blocks(&mut blocks, true);
        assert_eq!(
            blocks.to_rows(),
            vec![vec![0, 6, 0], vec![6, 6, 0], vec![0, 6, 0]]
        );
    }

    #[test]
    fn rotate_t_counter_clockwise() {
        let mut blocks = canonical_blocks(PieceKind::T);
        rotate_blocks(&mut blocks, false);
        assert_eq!(
            blocks.to_rows(),
            vec![vec![0, 6, 0], vec![0, 6, 6], vec![0, 6, 0]]
        );
    }

    #[test]
    fn rotate_i_clockwise_is_vertical() {
        let mut blocks = canonical_blocks(PieceKind::I);
        rotate_blocks(&mut blocks, true);
        assert_eq!(
            blocks.to_rows(),
            vec![
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
                vec![0, 0, 1, 0],
            ]
        );
    }

    #[test]
    fn o_piece_is_rotation_invariant() {
        let original = canonical_blocks(PieceKind::O);
        let mut blocks = original;
        rotate_blocks(&mut blocks, true);
        assert_eq!(blocks, original);
    }

    #[test]
    fn piece_cells_are_offset_by_position() {
        let piece = Piece::spawn(PieceKind::T).shifted(1, 5);
        let cells: Vec<_> = piece.cells().map(|(x, y, _)| (x, y)).collect();
        assert_eq!(cells, vec![(4, 5), (5, 5), (6, 5), (5, 6)]);
    }
}
