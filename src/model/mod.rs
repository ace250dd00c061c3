//! Intermediate representation for normalized MLBOMs.
//!
//! This module defines the read-only, format-agnostic view over a parsed
//! bill of materials that the report assembler walks. Optional data is always
//! an explicit `Option`, so a field that is absent from the source can never be
//! confused with a field that is present but empty.

mod metadata;
mod mlbom;
mod model_card;

pub use metadata::*;
pub use mlbom::*;
pub use model_card::*;
