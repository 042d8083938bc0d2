use serde::Serialize;

use crate::pieces::{Blocks, Piece};
use crate::playfield::U8Grid;
use crate::types::{PieceKind, PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Externally visible part of a piece: matrix and position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PieceSnapshot {
    pub blocks: Blocks,
    pub x: i8,
    pub y: i8,
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            blocks: value.blocks,
            x: value.x,
            y: value.y,
        }
    }
}

/// Read-only view handed to the presentation layer
///
/// Owned and `Copy`: mutating a snapshot never reaches the engine. The playfield
/// already has the active piece painted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub is_game_over: bool,
    pub next_piece: PieceSnapshot,
    pub playfield: U8Grid,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            score: 0,
            level: 0,
            lines: 0,
            is_game_over: false,
            next_piece: Piece::spawn(PieceKind::I).into(),
            playfield: [[0u8; PLAYFIELD_WIDTH as usize]; PLAYFIELD_HEIGHT as usize],
        }
    }
}
