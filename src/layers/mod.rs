//! Renderable map layers: tile basemaps and vector overlays.

pub mod group;
pub mod tile;
pub mod vector;
