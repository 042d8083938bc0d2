//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core,adapter,types}`. The rules
//! engine lives in `blockfall-core`; the line-delimited JSON driver in
//! `blockfall-adapter`.

pub use blockfall_adapter as adapter;
pub use blockfall_core as core;
pub use blockfall_types as types;
