//! Service layer for file I/O and rendering preparation.
//!
//! Services sit between the pure core and the command line: they read and
//! write block documents and turn blocks into drawable geometry.

pub mod blocks;
pub mod render;

// Re-export commonly used types and functions
pub use blocks::{BlockService, DocumentFormat};
pub use render::{render_block, DrawablePatch};
