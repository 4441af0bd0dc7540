use crate::core::geo::Point;
use crate::core::map::Map;
use crate::layers::tile::TileLayer;
use crate::ui::controls::LayerControl;
use crate::ui::legend::Legend;
use crate::ui::popup::Popup;
use egui::{Align2, Color32, FontId, Pos2, Rect, Response, Sense, Ui, Vec2};
use std::time::Duration;

/// Zoom change per scroll event or double click
const ZOOM_STEP: f64 = 1.0;

/// The interactive map widget: basemap tiles, the two overlays, the popup
/// and the floating controls, composited in one frame.
///
/// Owns one tile layer per basemap so each keeps its texture cache when the
/// user switches back and forth.
pub struct MapWidget {
    pub map: Map,
    tile_layers: Vec<TileLayer>,
}

impl MapWidget {
    pub fn new(map: Map) -> Self {
        let tile_layers = map.basemaps().iter().cloned().map(TileLayer::new).collect();
        Self { map, tile_layers }
    }

    pub fn show(&mut self, ui: &mut Ui) {
        let (rect, response) =
            ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());

        {
            let source = self.map.active_source();
            let (min_zoom, max_zoom) = (source.min_zoom as f64, source.max_zoom as f64);
            let viewport = self.map.viewport_mut();
            viewport.set_size(Point::new(rect.width() as f64, rect.height() as f64));
            viewport.set_zoom_limits(min_zoom, max_zoom);
        }

        self.handle_input(ui, &response, rect);

        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, Color32::from_gray(221));

        let active = self.map.active_basemap();
        let tile_layer = &mut self.tile_layers[active];
        tile_layer.update(ui.ctx(), self.map.viewport());
        tile_layer.render(&painter, self.map.viewport(), rect);
        if tile_layer.has_pending() {
            ui.ctx().request_repaint_after(Duration::from_millis(100));
        }

        self.map.plates.render(&painter, self.map.viewport(), rect.min);
        self.map.quakes.render(&painter, self.map.viewport(), rect.min);

        let close_popup = match &self.map.popup {
            Some(popup) => popup.render(ui, &painter, self.map.viewport(), rect.min),
            None => false,
        };
        if close_popup {
            self.map.popup = None;
        }

        let attribution = self.map.active_source().attribution.clone();
        painter.text(
            rect.left_bottom() + Vec2::new(6.0, -4.0),
            Align2::LEFT_BOTTOM,
            attribution,
            FontId::proportional(10.0),
            Color32::from_gray(80),
        );

        LayerControl::show(ui.ctx(), &mut self.map);
        Legend::show(ui.ctx());
    }

    fn handle_input(&mut self, ui: &Ui, response: &Response, rect: Rect) {
        if response.dragged() {
            let delta = response.drag_delta();
            self.map
                .viewport_mut()
                .pan(Point::new(delta.x as f64, delta.y as f64));
        }

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll != 0.0 {
                let step = if scroll > 0.0 { ZOOM_STEP } else { -ZOOM_STEP };
                let focus = response.hover_pos().map(|pos| to_local(pos, rect));
                let zoom = self.map.viewport().zoom + step;
                self.map.viewport_mut().zoom_to(zoom, focus);
            }
        }

        if response.double_clicked() {
            let focus = response.interact_pointer_pos().map(|pos| to_local(pos, rect));
            let zoom = self.map.viewport().zoom + ZOOM_STEP;
            self.map.viewport_mut().zoom_to(zoom, focus);
        }

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                self.handle_click(pointer, rect);
            }
        }
    }

    /// A click either closes the open popup or opens one for the topmost
    /// marker under the pointer. Clicks on empty map close without opening.
    fn handle_click(&mut self, pointer: Pos2, rect: Rect) {
        if self.map.popup.is_some() {
            self.map.popup = None;
            return;
        }

        let mut hit = None;
        if self.map.quakes.visible {
            // Last-drawn marker wins, matching the paint order
            for feature in self.map.quakes.features().iter().rev() {
                if feature.hit_test(self.map.viewport(), rect.min, pointer) {
                    if let (Some(position), Some(content)) =
                        (feature.position(), feature.popup())
                    {
                        hit = Some(Popup::new(position, content));
                    }
                    break;
                }
            }
        }
        self.map.popup = hit;
    }
}

fn to_local(pos: Pos2, rect: Rect) -> Point {
    Point::new((pos.x - rect.min.x) as f64, (pos.y - rect.min.y) as f64)
}
