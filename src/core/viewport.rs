use crate::core::geo::{LatLng, LatLngBounds, Point, MAX_LATITUDE};
use serde::{Deserialize, Serialize};

/// Pixel size of one map tile.
const TILE_SIZE: f64 = 256.0;

/// The current view of the map: center, zoom and screen dimensions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// The center of the map view in geographical coordinates
    pub center: LatLng,
    /// The current zoom level
    pub zoom: f64,
    /// The size of the viewport in pixels
    pub size: Point,
    /// The minimum allowed zoom level
    pub min_zoom: f64,
    /// The maximum allowed zoom level
    pub max_zoom: f64,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: f64, size: Point) -> Self {
        let mut viewport = Self {
            center: LatLng::default(),
            zoom: 0.0,
            size,
            min_zoom: 0.0,
            max_zoom: 19.0,
        };
        viewport.set_center(center);
        viewport.set_zoom(zoom);
        viewport
    }

    /// Sets the center, clamped to the projectable world
    pub fn set_center(&mut self, center: LatLng) {
        self.center = LatLng::new(
            center.lat.clamp(-MAX_LATITUDE, MAX_LATITUDE),
            center.lng.clamp(-180.0, 180.0),
        );
    }

    /// Sets the zoom level, clamped to the valid range
    pub fn set_zoom(&mut self, zoom: f64) {
        self.zoom = zoom.clamp(self.min_zoom, self.max_zoom);
    }

    /// Sets the zoom limits and re-clamps the current zoom
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.zoom = self.zoom.clamp(min_zoom, max_zoom);
    }

    pub fn set_size(&mut self, size: Point) {
        self.size = size;
    }

    /// Projects a LatLng to world pixel coordinates at the given zoom level
    /// (Web Mercator, EPSG:3857).
    pub fn project(&self, lat_lng: &LatLng, zoom: Option<f64>) -> Point {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);
        let lat_rad = LatLng::clamp_lat(lat_lng.lat).to_radians();

        let x = (lat_lng.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - lat_rad.tan().asinh() / std::f64::consts::PI) / 2.0 * scale;

        Point::new(x, y)
    }

    /// Unprojects world pixel coordinates back to a LatLng at the given zoom
    pub fn unproject(&self, pixel: &Point, zoom: Option<f64>) -> LatLng {
        let z = zoom.unwrap_or(self.zoom);
        let scale = TILE_SIZE * 2_f64.powf(z);

        let lng = pixel.x / scale * 360.0 - 180.0;
        let lat = (std::f64::consts::PI * (1.0 - 2.0 * pixel.y / scale))
            .sinh()
            .atan()
            .to_degrees();

        LatLng::new(lat, lng)
    }

    /// Converts a geographical coordinate to screen pixel coordinates
    /// relative to the viewport's top-left corner.
    pub fn lat_lng_to_pixel(&self, lat_lng: &LatLng) -> Point {
        let world = self.project(lat_lng, None);
        let center = self.project(&self.center, None);
        Point::new(
            world.x - center.x + self.size.x / 2.0,
            world.y - center.y + self.size.y / 2.0,
        )
    }

    /// Converts screen pixel coordinates back to a geographical coordinate
    pub fn pixel_to_lat_lng(&self, pixel: &Point) -> LatLng {
        let center = self.project(&self.center, None);
        let world = Point::new(
            pixel.x - self.size.x / 2.0 + center.x,
            pixel.y - self.size.y / 2.0 + center.y,
        );
        self.unproject(&world, None)
    }

    /// Pans the viewport by a screen-space drag delta: the content follows
    /// the pointer, so the center moves against the delta.
    pub fn pan(&mut self, delta: Point) {
        let new_center = self.pixel_to_lat_lng(&Point::new(
            self.size.x / 2.0 - delta.x,
            self.size.y / 2.0 - delta.y,
        ));
        self.set_center(new_center);
    }

    /// Zooms to the given level. With a focus point, the geographic position
    /// under that screen point stays put.
    pub fn zoom_to(&mut self, zoom: f64, focus: Option<Point>) {
        let new_zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        match focus {
            Some(focus) => {
                let anchor = self.pixel_to_lat_lng(&focus);
                self.zoom = new_zoom;
                // Place the center so that `anchor` projects back to `focus`
                let anchor_world = self.project(&anchor, None);
                let center_world = Point::new(
                    anchor_world.x - (focus.x - self.size.x / 2.0),
                    anchor_world.y - (focus.y - self.size.y / 2.0),
                );
                let new_center = self.unproject(&center_world, None);
                self.set_center(new_center);
            }
            None => {
                self.zoom = new_zoom;
            }
        }
    }

    /// The current viewport extent in geographical coordinates
    pub fn bounds(&self) -> LatLngBounds {
        let nw = self.pixel_to_lat_lng(&Point::new(0.0, 0.0));
        let se = self.pixel_to_lat_lng(&Point::new(self.size.x, self.size.y));
        LatLngBounds::new(LatLng::new(se.lat, nw.lng), LatLng::new(nw.lat, se.lng))
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(LatLng::default(), 0.0, Point::new(800.0, 600.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_creation() {
        let viewport = Viewport::new(
            LatLng::new(38.8026, -116.4194),
            3.0,
            Point::new(800.0, 600.0),
        );

        assert_eq!(viewport.zoom, 3.0);
        assert_eq!(viewport.center.lat, 38.8026);
        assert_eq!(viewport.size.x, 800.0);
    }

    #[test]
    fn test_center_roundtrip() {
        let viewport = Viewport::new(LatLng::new(0.0, 0.0), 1.0, Point::new(512.0, 512.0));

        let center = viewport.pixel_to_lat_lng(&Point::new(256.0, 256.0));
        assert!((center.lat).abs() < 0.01);
        assert!((center.lng).abs() < 0.01);

        let pixel = viewport.lat_lng_to_pixel(&LatLng::new(0.0, 0.0));
        assert!((pixel.x - 256.0).abs() < 0.01);
        assert!((pixel.y - 256.0).abs() < 0.01);
    }

    #[test]
    fn test_project_unproject_inverse() {
        let viewport = Viewport::default();
        let original = LatLng::new(35.0, 140.0);
        let world = viewport.project(&original, Some(5.0));
        let back = viewport.unproject(&world, Some(5.0));

        assert!((back.lat - original.lat).abs() < 1e-9);
        assert!((back.lng - original.lng).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_limits() {
        let mut viewport = Viewport::default();
        viewport.set_zoom_limits(2.0, 15.0);

        viewport.set_zoom(1.0);
        assert_eq!(viewport.zoom, 2.0);

        viewport.set_zoom(20.0);
        assert_eq!(viewport.zoom, 15.0);
    }

    #[test]
    fn test_pan_moves_center_against_drag() {
        let mut viewport = Viewport::new(LatLng::new(0.0, 0.0), 3.0, Point::new(512.0, 512.0));

        // Dragging east should move the center west
        viewport.pan(Point::new(50.0, 0.0));
        assert!(viewport.center.lng < 0.0);
        assert!((viewport.center.lat).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_to_keeps_focus_stationary() {
        let mut viewport = Viewport::new(LatLng::new(20.0, 10.0), 4.0, Point::new(800.0, 600.0));

        let focus = Point::new(200.0, 150.0);
        let anchor = viewport.pixel_to_lat_lng(&focus);

        viewport.zoom_to(5.0, Some(focus));

        let after = viewport.pixel_to_lat_lng(&focus);
        assert!((after.lat - anchor.lat).abs() < 1e-6);
        assert!((after.lng - anchor.lng).abs() < 1e-6);
    }

    #[test]
    fn test_bounds_contains_center() {
        let viewport = Viewport::new(LatLng::new(38.0, -116.0), 3.0, Point::new(800.0, 600.0));
        assert!(viewport.bounds().contains(&viewport.center));
    }
}
