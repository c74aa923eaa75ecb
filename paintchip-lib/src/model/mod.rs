//! Data model types

mod catalog;
mod metadata;

pub use catalog::*;
pub use metadata::*;
