use crate::data::quake::depth_bands;
use egui::{Align2, Rounding, Sense, Vec2};

const SWATCH_SIZE: f32 = 14.0;

/// The static depth legend, anchored to the bottom-right corner of the
/// window. One swatch-and-label row per depth band, shallow to deep, using
/// the exact marker colors.
pub struct Legend;

impl Legend {
    pub fn show(ctx: &egui::Context) {
        egui::Area::new(egui::Id::new("depth_legend"))
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-10.0, -10.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label("Depth");
                    for band in depth_bands() {
                        ui.horizontal(|ui| {
                            let (rect, _) = ui.allocate_exact_size(
                                Vec2::splat(SWATCH_SIZE),
                                Sense::hover(),
                            );
                            ui.painter().rect_filled(rect, Rounding::same(2.0), band.color);
                            ui.label(band.label());
                        });
                    }
                });
            });
    }
}
