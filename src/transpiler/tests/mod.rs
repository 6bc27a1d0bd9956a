//! Transpiler test modules.
//!
//! - `core`: rendering shape, cascades and literal coercion
//! - `dialects`: date/time/boolean literals and identifier folding per engine

mod core;
