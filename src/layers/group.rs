use crate::core::viewport::Viewport;
use crate::layers::vector::OverlayFeature;
use egui::{Painter, Pos2};

/// A named, independently toggleable collection of rendered features drawn
/// above the basemap.
///
/// A group starts empty and is populated exactly once when its dataset
/// arrives; it is never cleared or refreshed afterwards.
#[derive(Debug, Clone)]
pub struct LayerGroup {
    pub name: String,
    pub visible: bool,
    features: Vec<OverlayFeature>,
}

impl LayerGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            visible: true,
            features: Vec::new(),
        }
    }

    pub fn set_features(&mut self, features: Vec<OverlayFeature>) {
        self.features = features;
    }

    pub fn features(&self) -> &[OverlayFeature] {
        &self.features
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Paints every feature in insertion order; hidden groups paint nothing
    pub fn render(&self, painter: &Painter, viewport: &Viewport, origin: Pos2) {
        if !self.visible {
            return;
        }
        for feature in &self.features {
            feature.render(painter, viewport, origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;
    use crate::layers::vector::PointStyle;

    #[test]
    fn test_group_starts_empty_and_visible() {
        let group = LayerGroup::new("Earthquake Data");
        assert_eq!(group.name, "Earthquake Data");
        assert!(group.visible);
        assert!(group.is_empty());
    }

    #[test]
    fn test_populate_once() {
        let mut group = LayerGroup::new("Earthquake Data");
        group.set_features(vec![OverlayFeature::Circle {
            position: LatLng::new(38.0, -120.0),
            style: PointStyle::default(),
            popup: None,
        }]);
        assert_eq!(group.len(), 1);
        assert!(!group.is_empty());
    }
}
