//! QuiltKit Library
//!
//! Core of a quilt block editor: unit geometry, the unit registry, grid
//! placement rules and fabric palettes, plus loading, validating and
//! rendering of block documents.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod geometry;
pub mod models;
pub mod placement;
pub mod services;
pub mod units;
pub mod validation;
