//! GeoJSON model, dataset loaders and earthquake styling.

pub mod geojson;
pub mod loader;
pub mod quake;
