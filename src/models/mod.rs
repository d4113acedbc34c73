//! Data models for quilt blocks, units and palettes.
//!
//! This module contains the core data structures used throughout the crate.
//! Models are independent of rendering and of the command line.

pub mod block;
pub mod palette;
pub mod position;
pub mod rgb;
pub mod unit;

// Re-export all model types
pub use block::{Block, EditError};
pub use palette::{resolve_color, FabricRole, Palette, PaletteOverrides};
pub use position::{GridPosition, Span};
pub use rgb::RgbColor;
pub use unit::{
    FlipAxis, GeeseDirection, HstVariant, PatchRoles, Unit, UnitConfig, UnitKind, UnitType,
};
