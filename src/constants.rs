//! Application-wide constants.
//!
//! This module defines constants used throughout the library and the CLI,
//! including grid limits and the fallback color for unresolved fabric roles.

use crate::models::RgbColor;
use std::ops::RangeInclusive;

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "QuiltKit";

/// Grid sizes (cells per side) a block may use.
pub const SUPPORTED_GRID_SIZES: RangeInclusive<u8> = 2..=8;

/// Grid size used for new blocks when nothing else is configured.
pub const DEFAULT_GRID_SIZE: u8 = 4;

/// Pixel size of one grid cell used when nothing else is configured.
pub const DEFAULT_CELL_SIZE: f64 = 60.0;

/// Schema version written into saved block documents.
pub const BLOCK_FORMAT_VERSION: u32 = 1;

/// Color drawn for fabric roles that resolve to nothing (mid-gray, #808080).
///
/// Rendering degrades to this color instead of failing; strict validation
/// reports the dangling role separately.
pub const FALLBACK_COLOR: RgbColor = RgbColor::new(0x80, 0x80, 0x80);

/// Returns true if `grid_size` is one of the supported board sizes.
#[must_use]
pub fn is_supported_grid_size(grid_size: u8) -> bool {
    SUPPORTED_GRID_SIZES.contains(&grid_size)
}
