//! CLI command handlers for QuiltKit.
//!
//! Headless, scriptable access to block creation, validation, geometry and
//! placement checks for automation and CI.

pub mod common;
pub mod geometry;
pub mod migrate;
pub mod new_block;
pub mod place;
pub mod units;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use geometry::GeometryArgs;
pub use migrate::MigrateArgs;
pub use new_block::NewArgs;
pub use place::PlaceArgs;
pub use units::UnitsArgs;
pub use validate::ValidateArgs;
