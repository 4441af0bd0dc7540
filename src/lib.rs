//! # quakemap
//!
//! An interactive map of global earthquake activity and tectonic plate
//! boundaries, rendered as a Leaflet-style slippy map with egui.
//!
//! The library provides the map host (tile basemaps, viewport, overlay
//! layers, controls, popups) and the data pipeline that turns two public
//! GeoJSON feeds into styled layers. The `quakemap-app` binary wires it all
//! into an eframe window.

pub mod core;
pub mod data;
pub mod layers;
pub mod tiles;
pub mod ui;

// Re-export public API
pub use crate::core::{
    geo::{LatLng, LatLngBounds, Point, TileCoord},
    map::Map,
    viewport::Viewport,
};

pub use crate::data::{
    geojson::{Feature, FeatureCollection, Geometry, Position},
    loader::{spawn_fetch, DatasetEvent, DatasetKind},
    quake::Earthquake,
};

pub use crate::layers::{group::LayerGroup, tile::TileLayer, vector::OverlayFeature};

pub use crate::ui::{popup::Popup, widget::MapWidget};

/// User-Agent sent with every HTTP request; public tile servers reject
/// anonymous clients.
pub(crate) const USER_AGENT: &str = "quakemap/0.1";

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image decode error: {0}")]
    Image(#[from] image::ImageError),

    #[error("malformed dataset: {0}")]
    Data(String),
}
