//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no external dependencies, so they can be used
//! by the rules engine, the JSON adapter, and any presentation layer alike.
//!
//! # Playfield Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn row**: -1 (pieces spawn one row above the visible field)
//!
//! # Scoring
//!
//! | Lines | Base points |
//! |-------|-------------|
//! | 1 | 40 |
//! | 2 | 100 |
//! | 3 | 300 |
//! | 4 | 1200 |
//!
//! Base points are multiplied by `level + 1`, where `level = lines / 10`.
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, PieceKind, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
//!
//! let piece = PieceKind::T;
//! assert_eq!(piece.color_index(), 6);
//! assert_eq!(PieceKind::from_color_index(6), Some(piece));
//!
//! let action = GameAction::from_str("moveLeft").unwrap();
//! assert_eq!(action, GameAction::MoveLeft);
//!
//! assert_eq!(PLAYFIELD_WIDTH, 10);
//! assert_eq!(PLAYFIELD_HEIGHT, 20);
//! ```

/// Playfield width in cells (10 columns)
pub const PLAYFIELD_WIDTH: u8 = 10;

/// Playfield height in cells (20 rows)
pub const PLAYFIELD_HEIGHT: u8 = 20;

/// Row a freshly created piece's matrix is placed at (one above the field)
pub const SPAWN_Y: i8 = -1;

/// Largest block matrix edge (I and O use 4x4, the rest 3x3)
pub const MAX_MATRIX_SIZE: usize = 4;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table (Classic Nintendo scoring)
///
/// Indexed by the number of rows cleared in a single lock. Index 0 is unused.
/// Points are multiplied by (level + 1).
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven piece kinds
///
/// Each kind carries a fixed color index written into the playfield when locked:
/// I=1, J=2, L=3, O=4, S=5, T=6, Z=7. Zero is reserved for empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// Every kind, ordered by color index.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Color index written into the playfield (1-7)
    pub fn color_index(&self) -> u8 {
        match self {
            PieceKind::I => 1,
            PieceKind::J => 2,
            PieceKind::L => 3,
            PieceKind::O => 4,
            PieceKind::S => 5,
            PieceKind::T => 6,
            PieceKind::Z => 7,
        }
    }

    /// Inverse of [`PieceKind::color_index`]
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_index(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_color_index(0), None);
    /// assert_eq!(PieceKind::from_color_index(8), None);
    /// ```
    pub fn from_color_index(index: u8) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }
}

/// A cell on the playfield or inside a piece matrix
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;

/// Numeric form of a cell as exposed to the presentation layer (0 = empty, 1-7 = color)
#[inline]
pub fn cell_to_u8(cell: Cell) -> u8 {
    cell.map_or(0, |kind| kind.color_index())
}

/// Commands the external driver can issue against a game
///
/// One command is applied at a time; each maps to a single engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left (reverted on collision)
    MoveLeft,
    /// Move piece one cell right (reverted on collision)
    MoveRight,
    /// Gravity tick / soft drop; locks the piece when it cannot fall further
    MoveDown,
    /// Rotate piece 90° clockwise (reverted on collision)
    Rotate,
    /// Start over with an empty playfield
    Reset,
}

impl GameAction {
    /// Parse action from string (case-insensitive camelCase names)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveDown"), Some(GameAction::MoveDown));
    /// assert_eq!(GameAction::from_str("ROTATE"), Some(GameAction::Rotate));
    /// assert_eq!(GameAction::from_str("hardDrop"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "movedown" => Some(GameAction::MoveDown),
            "rotate" => Some(GameAction::Rotate),
            "reset" => Some(GameAction::Reset),
            _ => None,
        }
    }

    /// Convert to camelCase string for the adapter protocol
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::MoveDown => "moveDown",
            GameAction::Rotate => "rotate",
            GameAction::Reset => "reset",
        }
    }
}
