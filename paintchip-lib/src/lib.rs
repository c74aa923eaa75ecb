//! Paint color metadata library
//!
//! Looks up paint colors in a remote catalog by color code and derives a
//! consistent set of color-space coordinates (RGB, HSL, HSV, LAB, LCH) for
//! each. Lookups go through a precomputed bulk table first, then a
//! persistent cache, then the network.

pub mod cache;
pub mod color;
pub mod download;
pub mod error;
pub mod lookup;
pub mod metadata;
pub mod metric;
pub mod model;

mod client;

pub use client::*;
pub use metadata::MetadataService;
pub use metadata::calculate_metadata;
