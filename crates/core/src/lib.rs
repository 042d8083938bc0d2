//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the whole rules engine of the falling-block game. It has
//! **no dependencies** on rendering, input, timing or I/O:
//!
//! - **Deterministic**: Same seed produces the same piece sequence
//! - **Total**: Illegal moves are silently reverted, never reported as errors
//! - **Zero-allocation**: Playfield, pieces and snapshots are fixed-size arrays
//!
//! # Module Structure
//!
//! - [`playfield`]: 10x20 grid with collision testing, locking and line clearing
//! - [`pieces`]: Block matrices for the seven kinds and in-place ring rotation
//! - [`rng`]: Seedable uniform piece selection
//! - [`scoring`]: Classic line-clear points and level derivation
//! - [`game`]: The state machine driving all of the above
//! - [`snapshot`]: Owned read-only view for the presentation layer
//!
//! # Game Rules
//!
//! - Pieces spawn horizontally centered with their matrix one row above the field
//! - Moves and rotations that collide are reverted; there are no wall kicks
//! - When a piece cannot fall further it locks, full rows clear, and the next piece spawns
//! - A blocked spawn, or a lock with any block still above row 0, ends the game (top-out)
//! - Score: 40/100/300/1200 × (level + 1), level = lines / 10
//!
//! # Example
//!
//! ```
//! use blockfall_core::Game;
//! use blockfall_types::GameAction;
//!
//! let mut game = Game::new(12345);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::MoveDown);
//!
//! let state = game.snapshot();
//! assert_eq!(state.score, 0);
//! assert!(!state.is_game_over);
//! ```
//!
//! # Timing
//!
//! The engine has no clock. The driver calls
//! [`Game::move_piece_down`](game::Game::move_piece_down) once per gravity tick and the
//! other commands once per input event, one call at a time.

pub mod game;
pub mod pieces;
pub mod playfield;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use game::{Game, LockEvent};
pub use pieces::{canonical_blocks, rotate_blocks, Blocks, Piece};
pub use playfield::{ClearedRows, Playfield, U8Grid};
pub use rng::PieceRng;
pub use scoring::{level_for_lines, line_clear_points};
pub use snapshot::{GameSnapshot, PieceSnapshot};
