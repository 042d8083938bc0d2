//! Adapter module - drive a game through line-delimited JSON
//!
//! The rules engine has no input, timing or rendering of its own. This crate is a
//! thin external driver: it reads one JSON command per line, applies it to a
//! [`Game`](blockfall_core::Game), and answers with JSON lines on the output stream.
//! The binary wires it to stdin/stdout; tests wire it to in-memory buffers.
//!
//! # Message Types
//!
//! ## Driver → Game
//!
//! - **command**: Apply a list of actions in order (`moveLeft`, `moveRight`,
//!   `moveDown`, `rotate`, `reset`)
//! - **observe**: Request a state snapshot
//!
//! ## Game → Driver
//!
//! - **ack**: Command applied
//! - **observation**: The game snapshot (`score`, `level`, `lines`, `isGameOver`,
//!   `nextPiece`, `playfield`) plus the last lock event, if any
//! - **error**: Rejected line, with code and message
//!
//! # Environment Variables
//!
//! - `BLOCKFALL_SEED`: Piece RNG seed (default: random)
//! - `BLOCKFALL_LOG_PATH`: Append all wire traffic to this file
//!
//! # Example Protocol Flow
//!
//! ```text
//! Driver -> Game: {"type":"command","seq":1,"actions":["moveLeft","rotate","moveDown"]}
//! Game -> Driver: {"type":"ack","seq":1,"ts":1700000000000,"status":"ok"}
//! Game -> Driver: {"type":"observation","seq":2,"ts":1700000000000,"score":0,"level":0,"lines":0,"isGameOver":false,"nextPiece":{...},"playfield":[[0,...],...]}
//! ```
//!
//! # Testing
//!
//! ```bash
//! echo '{"type":"observe","seq":1}' | BLOCKFALL_SEED=7 cargo run
//! ```

pub mod driver;
pub mod protocol;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use driver::{run, DriverConfig, Session};
pub use protocol::*;
