use crate::core::map::Map;
use egui::{Align2, Vec2};

/// The layer control in the top-right corner: an exclusive basemap picker
/// and one independent visibility checkbox per overlay.
pub struct LayerControl;

impl LayerControl {
    pub fn show(ctx: &egui::Context, map: &mut Map) {
        egui::Area::new(egui::Id::new("layer_control"))
            .anchor(Align2::RIGHT_TOP, Vec2::new(-10.0, 10.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    let mut active = map.active_basemap();
                    for (index, source) in map.basemaps().iter().enumerate() {
                        ui.radio_value(&mut active, index, &source.name);
                    }
                    map.set_active_basemap(active);

                    ui.separator();

                    let plates_name = map.plates.name.clone();
                    ui.checkbox(&mut map.plates.visible, plates_name);
                    let quakes_name = map.quakes.name.clone();
                    ui.checkbox(&mut map.quakes.visible, quakes_name);
                });
            });
    }
}
