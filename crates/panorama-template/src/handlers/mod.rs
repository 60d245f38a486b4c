/*
 * mod.rs
 * Copyright (c) 2025 Posit, PBC
 */

//! Handlers for the built-in tag keywords.

mod each;
mod endeach;
mod variable;

pub use each::{Block, EachHandler, extract_block};
pub use endeach::EndeachHandler;
pub use variable::VariableHandler;
