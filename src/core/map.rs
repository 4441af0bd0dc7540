use crate::core::geo::{LatLng, Point};
use crate::core::viewport::Viewport;
use crate::data::loader::{plate_features, quake_features, DatasetEvent, DatasetKind};
use crate::layers::group::LayerGroup;
use crate::tiles::source::TileSource;
use crate::ui::popup::Popup;

/// The complete state of one earthquake map: viewport, basemap selection,
/// the two overlay groups and the currently open popup.
///
/// All state lives here rather than in globals, so several maps can coexist
/// in one process and tests can drive a map without a UI.
pub struct Map {
    viewport: Viewport,
    basemaps: Vec<TileSource>,
    active_basemap: usize,
    pub plates: LayerGroup,
    pub quakes: LayerGroup,
    pub popup: Option<Popup>,
}

impl Map {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        Self {
            viewport: Viewport::new(center, zoom, size),
            basemaps: TileSource::basemaps(),
            active_basemap: 0,
            plates: LayerGroup::new("Tectonic Plates"),
            quakes: LayerGroup::new("Earthquake Data"),
            popup: None,
        }
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.viewport
    }

    pub fn basemaps(&self) -> &[TileSource] {
        &self.basemaps
    }

    pub fn active_basemap(&self) -> usize {
        self.active_basemap
    }

    /// Switches the basemap; indices outside the registry are ignored
    pub fn set_active_basemap(&mut self, index: usize) {
        if index < self.basemaps.len() {
            self.active_basemap = index;
        }
    }

    pub fn active_source(&self) -> &TileSource {
        &self.basemaps[self.active_basemap]
    }

    /// Applies one finished dataset fetch. A successful fetch populates the
    /// matching overlay group; a failed one is logged and leaves the group
    /// empty, without affecting the other overlay.
    pub fn apply_dataset(&mut self, event: DatasetEvent) {
        match (event.kind, event.result) {
            (DatasetKind::Earthquakes, Ok(collection)) => {
                self.quakes.set_features(quake_features(&collection));
            }
            (DatasetKind::PlateBoundaries, Ok(collection)) => {
                self.plates.set_features(plate_features(&collection));
            }
            (kind, Err(e)) => {
                log::warn!("{} dataset unavailable: {}", kind.name(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::FeatureCollection;
    use crate::MapError;

    fn test_map() -> Map {
        Map::new(LatLng::new(38.8026, -116.4194), 3.0, Point::new(1200.0, 800.0))
    }

    fn quake_collection() -> FeatureCollection {
        serde_json::from_str(
            r#"
            {
                "features": [
                    {
                        "properties": {"mag": 5.2, "place": "central Nevada"},
                        "geometry": {"type": "Point", "coordinates": [-116.4, 38.8, 8.0]}
                    }
                ]
            }
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_basemap_switching() {
        let mut map = test_map();
        assert_eq!(map.active_source().name, "OpenStreetMap");

        map.set_active_basemap(3);
        assert_eq!(map.active_source().name, "USGS US Imagery");

        // Out-of-range indices are ignored
        map.set_active_basemap(42);
        assert_eq!(map.active_basemap(), 3);
    }

    #[test]
    fn test_dataset_success_populates_its_group() {
        let mut map = test_map();
        map.apply_dataset(DatasetEvent {
            kind: DatasetKind::Earthquakes,
            result: Ok(quake_collection()),
        });

        assert_eq!(map.quakes.len(), 1);
        assert!(map.plates.is_empty());
    }

    #[test]
    fn test_dataset_failure_leaves_other_overlay_intact() {
        let mut map = test_map();
        map.apply_dataset(DatasetEvent {
            kind: DatasetKind::Earthquakes,
            result: Ok(quake_collection()),
        });
        map.apply_dataset(DatasetEvent {
            kind: DatasetKind::PlateBoundaries,
            result: Err(MapError::Data("truncated response".to_string())),
        });

        assert_eq!(map.quakes.len(), 1);
        assert!(map.plates.is_empty());
        assert!(map.plates.visible);
        assert!(map.quakes.visible);
    }
}
