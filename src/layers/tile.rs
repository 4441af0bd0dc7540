use crate::core::geo::{Point, TileCoord};
use crate::core::viewport::Viewport;
use crate::tiles::loader::{TileImage, TileLoader};
use crate::tiles::source::TileSource;
use crossbeam_channel::{unbounded, Receiver};
use egui::{Color32, Painter, Pos2, Rect, TextureHandle, TextureOptions, Vec2};
use fxhash::FxHashSet;
use lru::LruCache;
use std::num::NonZeroUsize;

const TILE_SIZE: f64 = 256.0;

/// Number of decoded tile textures kept per layer.
const TILE_CACHE_CAPACITY: usize = 512;

/// One slippy tile layer bound to a single tile source.
///
/// Downloads happen on background threads; completed tiles are uploaded as
/// egui textures and kept in an LRU cache, so switching basemaps back and
/// forth does not refetch recently seen tiles.
pub struct TileLayer {
    source: TileSource,
    loader: TileLoader,
    rx: Receiver<TileImage>,
    cache: LruCache<TileCoord, TextureHandle>,
    pending: FxHashSet<TileCoord>,
}

impl TileLayer {
    pub fn new(source: TileSource) -> Self {
        let (tx, rx) = unbounded();
        Self {
            source,
            loader: TileLoader::new(tx),
            rx,
            cache: LruCache::new(
                NonZeroUsize::new(TILE_CACHE_CAPACITY).expect("cache capacity is non-zero"),
            ),
            pending: FxHashSet::default(),
        }
    }

    pub fn source(&self) -> &TileSource {
        &self.source
    }

    /// True while any requested tile has not arrived yet
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// The integer tile zoom for the current viewport zoom, clamped to what
    /// this source serves.
    fn tile_zoom(&self, viewport: &Viewport) -> u8 {
        (viewport.zoom.round() as i64)
            .clamp(self.source.min_zoom as i64, self.source.max_zoom as i64) as u8
    }

    /// Enumerates the tiles covering the viewport at zoom `z`, clamped to
    /// the valid tile range.
    fn visible_tiles(&self, viewport: &Viewport, z: u8) -> Vec<TileCoord> {
        let scale = 2_f64.powf(viewport.zoom - z as f64);
        let center = viewport.project(&viewport.center, Some(z as f64));
        let half = Point::new(
            viewport.size.x / 2.0 / scale,
            viewport.size.y / 2.0 / scale,
        );

        let min_x = ((center.x - half.x) / TILE_SIZE).floor() as i64;
        let max_x = ((center.x + half.x) / TILE_SIZE).floor() as i64;
        let min_y = ((center.y - half.y) / TILE_SIZE).floor() as i64;
        let max_y = ((center.y + half.y) / TILE_SIZE).floor() as i64;

        let max_index = (1_i64 << z) - 1;
        let mut tiles = Vec::new();
        for y in min_y.max(0)..=max_y.min(max_index) {
            for x in min_x.max(0)..=max_x.min(max_index) {
                tiles.push(TileCoord::new(x as u32, y as u32, z));
            }
        }
        tiles
    }

    /// Drains finished downloads into the texture cache and requests any
    /// visible tile that is neither cached nor already in flight.
    pub fn update(&mut self, ctx: &egui::Context, viewport: &Viewport) {
        for tile in self.rx.try_iter() {
            self.pending.remove(&tile.coord);
            let name = format!(
                "{}:{}/{}/{}",
                self.source.name, tile.coord.z, tile.coord.x, tile.coord.y
            );
            let handle = ctx.load_texture(name, tile.image, TextureOptions::LINEAR);
            self.cache.put(tile.coord, handle);
        }

        let z = self.tile_zoom(viewport);
        for coord in self.visible_tiles(viewport, z) {
            if self.cache.get(&coord).is_some() || self.pending.contains(&coord) {
                continue;
            }
            self.pending.insert(coord);
            self.loader.start_download(&self.source, coord);
        }
    }

    /// Paints every cached visible tile into `rect`. Missing tiles leave the
    /// background showing until their download lands.
    pub fn render(&mut self, painter: &Painter, viewport: &Viewport, rect: Rect) {
        let z = self.tile_zoom(viewport);
        let scale = 2_f64.powf(viewport.zoom - z as f64);
        let center = viewport.project(&viewport.center, Some(z as f64));
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));

        for coord in self.visible_tiles(viewport, z) {
            let Some(texture) = self.cache.get(&coord) else {
                continue;
            };

            let min_x = rect.min.x as f64
                + viewport.size.x / 2.0
                + (coord.x as f64 * TILE_SIZE - center.x) * scale;
            let min_y = rect.min.y as f64
                + viewport.size.y / 2.0
                + (coord.y as f64 * TILE_SIZE - center.y) * scale;
            let side = (TILE_SIZE * scale) as f32;

            let tile_rect = Rect::from_min_size(
                Pos2::new(min_x as f32, min_y as f32),
                Vec2::splat(side),
            );
            painter.image(texture.id(), tile_rect, uv, Color32::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geo::LatLng;

    fn layer() -> TileLayer {
        TileLayer::new(TileSource::basemaps().remove(0))
    }

    #[test]
    fn test_tile_zoom_clamps_to_source_range() {
        let layer = layer();
        let mut viewport = Viewport::new(LatLng::default(), 3.0, Point::new(800.0, 600.0));
        assert_eq!(layer.tile_zoom(&viewport), 3);

        viewport.zoom = 0.0;
        assert_eq!(layer.tile_zoom(&viewport), 0);

        // OpenStreetMap serves up to z19
        viewport.set_zoom_limits(0.0, 22.0);
        viewport.zoom = 22.0;
        assert_eq!(layer.tile_zoom(&viewport), 19);
    }

    #[test]
    fn test_visible_tiles_cover_the_viewport() {
        let layer = layer();
        let viewport = Viewport::new(LatLng::new(38.8026, -116.4194), 3.0, Point::new(800.0, 600.0));
        let tiles = layer.visible_tiles(&viewport, 3);

        assert!(!tiles.is_empty());
        // 800x600 px at 256px tiles: at most 5x4 plus partial overlap
        assert!(tiles.len() <= 20);
        for tile in &tiles {
            assert!(tile.is_valid());
        }

        let center_tile = TileCoord::from_lat_lng(&viewport.center, 3);
        assert!(tiles.contains(&center_tile));
    }

    #[test]
    fn test_visible_tiles_clamped_at_world_edge() {
        let layer = layer();
        let viewport = Viewport::new(LatLng::new(84.0, -179.0), 2.0, Point::new(1200.0, 800.0));
        for tile in layer.visible_tiles(&viewport, 2) {
            assert!(tile.is_valid());
        }
    }
}
