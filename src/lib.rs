//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core,input,term,types}` so
//! the binary, the integration tests and the benches share one import path.
//! The game rules live in `blockfall-core`; this crate adds runtime settings.

pub mod settings;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_term as term;
pub use blockfall_types as types;

pub use settings::Settings;
