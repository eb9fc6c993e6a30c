//! Command implementations for the orderdoc CLI
//!
//! Each command module reads its inputs, delegates to the library crates and
//! writes the result.

pub mod export;
pub mod merge;
pub mod render;
pub mod totals;
