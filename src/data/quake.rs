//! Typed earthquake features and the depth/magnitude stylers.
//!
//! Marker color and radius are pure functions of one event's depth and
//! magnitude; nothing here looks at any other feature.

use crate::core::geo::LatLng;
use crate::data::geojson::{Feature, Geometry};
use crate::layers::vector::PointStyle;
use egui::Color32;

/// Marker colors for the six depth bands, shallow to deep.
pub const BAND_COLORS: [Color32; 6] = [
    Color32::from_rgb(0x00, 0x80, 0x00), // green
    Color32::from_rgb(0xca, 0xfc, 0x03),
    Color32::from_rgb(0xfc, 0xad, 0x03),
    Color32::from_rgb(0xfc, 0x84, 0x03),
    Color32::from_rgb(0xfc, 0x49, 0x03),
    Color32::from_rgb(0xff, 0x00, 0x00), // red
];

/// One earthquake event, with named fields instead of the feed's positional
/// `[lon, lat, depth]` convention.
#[derive(Debug, Clone, PartialEq)]
pub struct Earthquake {
    pub longitude: f64,
    pub latitude: f64,
    /// Depth in kilometers; negative for events above the reference surface
    pub depth_km: f64,
    pub magnitude: f64,
    pub place: Option<String>,
}

impl Earthquake {
    /// Builds an earthquake from a GeoJSON point feature.
    ///
    /// Missing magnitude reads as 0 and a missing or non-finite depth as 0,
    /// so a single malformed feature never fails the whole batch. Returns
    /// `None` only when there is no usable epicenter at all.
    pub fn from_feature(feature: &Feature) -> Option<Self> {
        let coordinates = match feature.geometry.as_ref()? {
            Geometry::Point { coordinates } => coordinates,
            _ => return None,
        };

        Some(Self {
            longitude: coordinates.lng()?,
            latitude: coordinates.lat()?,
            depth_km: coordinates.depth().filter(|d| d.is_finite()).unwrap_or(0.0),
            magnitude: feature.property_f64("mag").unwrap_or(0.0),
            place: feature.property_str("place").map(str::to_owned),
        })
    }

    pub fn lat_lng(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Popup body shown when the marker is clicked
    pub fn popup_text(&self) -> String {
        format!(
            "Magnitude: {}\nDepth: {} km\nLocation: {}",
            self.magnitude,
            self.depth_km,
            self.place.as_deref().unwrap_or("unknown"),
        )
    }
}

/// Depth-to-color threshold ladder, evaluated top-down with exclusive lower
/// bounds: a depth of exactly 90 falls into the 70-90 band, not 90+.
/// A non-finite depth falls through to the shallowest band.
pub fn depth_to_color(depth_km: f64) -> Color32 {
    if depth_km > 90.0 {
        BAND_COLORS[5]
    } else if depth_km > 70.0 {
        BAND_COLORS[4]
    } else if depth_km > 50.0 {
        BAND_COLORS[3]
    } else if depth_km > 30.0 {
        BAND_COLORS[2]
    } else if depth_km > 10.0 {
        BAND_COLORS[1]
    } else {
        BAND_COLORS[0]
    }
}

/// Marker radius in pixels. A magnitude of exactly 0 still gets a visible
/// 1px marker; everything else scales linearly and is deliberately left
/// unclamped.
pub fn magnitude_to_radius(magnitude: f64) -> f64 {
    if magnitude == 0.0 {
        1.0
    } else {
        magnitude * 5.0
    }
}

/// Complete marker style for one event: fill from depth, radius from
/// magnitude, thin black outline, half-opaque fill.
pub fn style_for_quake(quake: &Earthquake) -> PointStyle {
    PointStyle {
        fill_color: depth_to_color(quake.depth_km),
        stroke_color: Color32::BLACK,
        stroke_width: 0.5,
        radius: magnitude_to_radius(quake.magnitude) as f32,
        fill_opacity: 0.5,
    }
}

/// One row of the depth legend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepthBand {
    pub lower: f64,
    /// `None` for the open-ended deepest band
    pub upper: Option<f64>,
    pub color: Color32,
}

impl DepthBand {
    pub fn label(&self) -> String {
        match self.upper {
            Some(upper) => format!("{}km - {}km", self.lower, upper),
            None => format!("{}+", self.lower),
        }
    }
}

/// The fixed legend table, shallow to deep. Band colors line up with
/// `depth_to_color` by construction.
pub fn depth_bands() -> [DepthBand; 6] {
    const EDGES: [f64; 6] = [-10.0, 10.0, 30.0, 50.0, 70.0, 90.0];

    let mut bands = [DepthBand {
        lower: 0.0,
        upper: None,
        color: Color32::BLACK,
    }; 6];

    for (i, band) in bands.iter_mut().enumerate() {
        *band = DepthBand {
            lower: EDGES[i],
            upper: EDGES.get(i + 1).copied(),
            color: BAND_COLORS[i],
        };
    }
    bands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::geojson::Position;

    fn point_feature(lng: f64, lat: f64, depth: Option<f64>) -> Feature {
        let mut coords = vec![lng, lat];
        if let Some(depth) = depth {
            coords.push(depth);
        }
        Feature {
            id: None,
            geometry: Some(Geometry::Point {
                coordinates: Position(coords),
            }),
            properties: None,
        }
    }

    #[test]
    fn test_depth_bands_are_exclusive_on_the_lower_side() {
        // Each threshold value belongs to the band strictly below it
        assert_eq!(depth_to_color(10.0), BAND_COLORS[0]);
        assert_eq!(depth_to_color(30.0), BAND_COLORS[1]);
        assert_eq!(depth_to_color(50.0), BAND_COLORS[2]);
        assert_eq!(depth_to_color(70.0), BAND_COLORS[3]);
        assert_eq!(depth_to_color(90.0), BAND_COLORS[4]);
        assert_eq!(depth_to_color(91.0), BAND_COLORS[5]);
    }

    #[test]
    fn test_depth_color_extremes() {
        assert_eq!(depth_to_color(-10.0), BAND_COLORS[0]);
        assert_eq!(depth_to_color(700.0), BAND_COLORS[5]);
        // Non-finite depth routes to the shallowest band
        assert_eq!(depth_to_color(f64::NAN), BAND_COLORS[0]);
    }

    #[test]
    fn test_zero_magnitude_still_visible() {
        assert_eq!(magnitude_to_radius(0.0), 1.0);
    }

    #[test]
    fn test_radius_scales_linearly_without_clamping() {
        assert_eq!(magnitude_to_radius(6.1), 30.5);
        assert_eq!(magnitude_to_radius(0.2), 1.0);
        // Negative magnitudes pass through unclamped
        assert_eq!(magnitude_to_radius(-1.0), -5.0);
    }

    #[test]
    fn test_style_composition() {
        let quake = Earthquake {
            longitude: 140.0,
            latitude: 35.0,
            depth_km: 95.0,
            magnitude: 6.1,
            place: Some("off the coast of Honshu".to_string()),
        };

        let style = style_for_quake(&quake);
        assert_eq!(style.fill_color, BAND_COLORS[5]);
        assert_eq!(style.radius, 30.5);
        assert_eq!(style.stroke_color, Color32::BLACK);
        assert_eq!(style.stroke_width, 0.5);
        assert_eq!(style.fill_opacity, 0.5);
    }

    #[test]
    fn test_from_feature_defaults() {
        let feature = point_feature(-120.0, 38.0, None);
        let quake = Earthquake::from_feature(&feature).unwrap();
        assert_eq!(quake.magnitude, 0.0);
        assert_eq!(quake.depth_km, 0.0);
        assert_eq!(quake.place, None);
        assert!(quake.popup_text().contains("Location: unknown"));
    }

    #[test]
    fn test_from_feature_rejects_non_points() {
        let feature = Feature {
            id: None,
            geometry: Some(Geometry::LineString {
                coordinates: vec![Position::new(0.0, 0.0), Position::new(1.0, 1.0)],
            }),
            properties: None,
        };
        assert_eq!(Earthquake::from_feature(&feature), None);
    }

    #[test]
    fn test_legend_band_table() {
        let bands = depth_bands();
        assert_eq!(bands.len(), 6);

        // Colors in styler order, shallow to deep
        for (band, color) in bands.iter().zip(BAND_COLORS) {
            assert_eq!(band.color, color);
        }

        assert_eq!(bands[0].label(), "-10km - 10km");
        assert_eq!(bands[4].label(), "70km - 90km");
        assert_eq!(bands[5].label(), "90+");

        // Every closed band's upper bound is the next band's lower bound
        for pair in bands.windows(2) {
            assert_eq!(pair[0].upper, Some(pair[1].lower));
        }
    }

    #[test]
    fn test_legend_matches_styler_at_band_centers() {
        for band in depth_bands() {
            let probe = match band.upper {
                Some(upper) => (band.lower + upper) / 2.0,
                None => band.lower + 1.0,
            };
            assert_eq!(depth_to_color(probe), band.color);
        }
    }

    #[test]
    fn test_popup_text_format() {
        let feature = point_feature(140.0, 35.0, Some(95.0));
        let mut quake = Earthquake::from_feature(&feature).unwrap();
        quake.magnitude = 6.1;
        quake.place = Some("off the coast of Honshu".to_string());

        assert_eq!(
            quake.popup_text(),
            "Magnitude: 6.1\nDepth: 95 km\nLocation: off the coast of Honshu"
        );
    }
}
