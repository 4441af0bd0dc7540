//! One-shot dataset downloads and the conversion of raw GeoJSON into
//! renderable overlay features.

use crate::data::geojson::{FeatureCollection, Geometry, Position};
use crate::data::quake::{style_for_quake, Earthquake};
use crate::layers::vector::{LineStyle, OverlayFeature};
use crate::Result;
use crossbeam_channel::Sender;
use egui::Color32;
use once_cell::sync::Lazy;
use reqwest::Client;

/// USGS feed of all earthquakes from the past seven days, refreshed every
/// minute on the server side.
pub const EARTHQUAKE_FEED_URL: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/all_week.geojson";

/// Hugo Ahlenius' GeoJSON rendition of the PB2002 tectonic plate model
pub const PLATE_BOUNDARIES_URL: &str =
    "https://raw.githubusercontent.com/fraxen/tectonicplates/master/GeoJSON/PB2002_boundaries.json";

/// Line style shared by every plate boundary segment
pub const PLATE_STYLE: LineStyle = LineStyle {
    color: Color32::GOLD,
    width: 1.0,
};

static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent(crate::USER_AGENT)
        .build()
        .expect("failed to build reqwest client")
});

/// The two datasets the map loads at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetKind {
    Earthquakes,
    PlateBoundaries,
}

impl DatasetKind {
    pub fn url(&self) -> &'static str {
        match self {
            DatasetKind::Earthquakes => EARTHQUAKE_FEED_URL,
            DatasetKind::PlateBoundaries => PLATE_BOUNDARIES_URL,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DatasetKind::Earthquakes => "earthquakes",
            DatasetKind::PlateBoundaries => "plate boundaries",
        }
    }
}

/// Outcome of one dataset fetch, delivered to the UI thread over a channel
pub struct DatasetEvent {
    pub kind: DatasetKind,
    pub result: Result<FeatureCollection>,
}

/// Downloads and parses one feed. A single attempt, no retry: a dataset
/// that fails to load simply leaves its layer empty.
pub async fn fetch_feature_collection(kind: DatasetKind) -> Result<FeatureCollection> {
    let collection = HTTP_CLIENT
        .get(kind.url())
        .send()
        .await?
        .error_for_status()?
        .json::<FeatureCollection>()
        .await?;
    Ok(collection)
}

/// Spawns the fetch for `kind` on the tokio runtime and reports the outcome
/// through `tx`. Never blocks and never panics on failure.
pub fn spawn_fetch(kind: DatasetKind, tx: Sender<DatasetEvent>) {
    tokio::spawn(async move {
        log::info!("fetching {} from {}", kind.name(), kind.url());
        let result = fetch_feature_collection(kind).await;
        match &result {
            Ok(collection) => {
                log::info!("loaded {} features of {}", collection.features.len(), kind.name())
            }
            Err(e) => log::warn!("failed to load {}: {}", kind.name(), e),
        }
        let _ = tx.send(DatasetEvent { kind, result });
    });
}

/// Converts the earthquake feed into styled circle markers. Features without
/// a usable epicenter are skipped; everything else is styled from its depth
/// and magnitude and carries its popup text.
pub fn quake_features(collection: &FeatureCollection) -> Vec<OverlayFeature> {
    collection
        .features
        .iter()
        .filter_map(Earthquake::from_feature)
        .map(|quake| OverlayFeature::Circle {
            position: quake.lat_lng(),
            style: style_for_quake(&quake),
            popup: Some(quake.popup_text()),
        })
        .collect()
}

/// Converts the plate boundary feed into polylines. Line strings map one to
/// one; multi-geometries and polygon rings flatten into one polyline per
/// part. Degenerate parts with fewer than two positions are dropped.
pub fn plate_features(collection: &FeatureCollection) -> Vec<OverlayFeature> {
    let mut features = Vec::new();
    for feature in &collection.features {
        match &feature.geometry {
            Some(Geometry::LineString { coordinates }) => {
                push_line(&mut features, coordinates);
            }
            Some(Geometry::MultiLineString { coordinates }) => {
                for line in coordinates {
                    push_line(&mut features, line);
                }
            }
            Some(Geometry::Polygon { coordinates }) => {
                for ring in coordinates {
                    push_line(&mut features, ring);
                }
            }
            Some(Geometry::MultiPolygon { coordinates }) => {
                for polygon in coordinates {
                    for ring in polygon {
                        push_line(&mut features, ring);
                    }
                }
            }
            _ => {}
        }
    }
    features
}

fn push_line(features: &mut Vec<OverlayFeature>, positions: &[Position]) {
    let points: Vec<_> = positions.iter().filter_map(Position::lat_lng).collect();
    if points.len() >= 2 {
        features.push(OverlayFeature::Line {
            points,
            style: PLATE_STYLE,
        });
    }
}
