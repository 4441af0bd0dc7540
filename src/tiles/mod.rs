//! Tile source descriptors and background tile downloading.

pub mod loader;
pub mod source;
