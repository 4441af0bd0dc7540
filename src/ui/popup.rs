use crate::core::geo::LatLng;
use crate::core::viewport::Viewport;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

const PADDING: f32 = 8.0;

/// Vertical gap between the marker and the popup box
const MARKER_OFFSET: f32 = 14.0;

/// A single open popup, anchored to a geographical position so it tracks
/// the marker while the map pans and zooms. At most one popup is open at a
/// time; opening another replaces it.
#[derive(Debug, Clone, PartialEq)]
pub struct Popup {
    pub position: LatLng,
    pub content: String,
}

impl Popup {
    pub fn new(position: LatLng, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
        }
    }

    /// Draws the popup box above its anchor. Returns true when the box was
    /// clicked, which the caller treats as a request to close it.
    pub fn render(
        &self,
        ui: &mut egui::Ui,
        painter: &Painter,
        viewport: &Viewport,
        origin: Pos2,
    ) -> bool {
        let anchor_px = viewport.lat_lng_to_pixel(&self.position);
        let anchor = origin + Vec2::new(anchor_px.x as f32, anchor_px.y as f32);

        let font = FontId::proportional(12.0);
        let text_size = ui.fonts(|fonts| {
            fonts
                .layout_no_wrap(self.content.clone(), font.clone(), Color32::BLACK)
                .size()
        });

        let rect = Rect::from_center_size(
            anchor - Vec2::new(0.0, MARKER_OFFSET + text_size.y / 2.0 + PADDING),
            text_size + Vec2::splat(PADDING * 2.0),
        );

        painter.rect_filled(rect, Rounding::same(4.0), Color32::from_rgb(250, 250, 250));
        painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(1.0, Color32::DARK_GRAY));
        painter.text(
            rect.min + Vec2::splat(PADDING),
            Align2::LEFT_TOP,
            &self.content,
            font,
            Color32::BLACK,
        );

        ui.allocate_rect(rect, Sense::click()).clicked()
    }
}
