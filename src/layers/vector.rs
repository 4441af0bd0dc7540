use crate::core::geo::LatLng;
use crate::core::viewport::Viewport;
use egui::{Color32, Painter, Pos2, Stroke, Vec2};

/// Minimum screen radius used when hit-testing small markers.
const MIN_HIT_RADIUS: f32 = 6.0;

/// Style for circle markers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointStyle {
    pub fill_color: Color32,
    pub stroke_color: Color32,
    pub stroke_width: f32,
    /// Radius in screen pixels
    pub radius: f32,
    /// Fill opacity (0.0 to 1.0)
    pub fill_opacity: f32,
}

impl Default for PointStyle {
    fn default() -> Self {
        Self {
            fill_color: Color32::from_rgb(0x33, 0x88, 0xff),
            stroke_color: Color32::WHITE,
            stroke_width: 2.0,
            radius: 5.0,
            fill_opacity: 1.0,
        }
    }
}

/// Style for polylines
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: Color32,
    pub width: f32,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: Color32::from_rgb(0x33, 0x88, 0xff),
            width: 2.0,
        }
    }
}

/// One renderable overlay feature.
#[derive(Debug, Clone, PartialEq)]
pub enum OverlayFeature {
    /// A circle marker, optionally carrying popup text
    Circle {
        position: LatLng,
        style: PointStyle,
        popup: Option<String>,
    },
    /// A fixed-style polyline
    Line {
        points: Vec<LatLng>,
        style: LineStyle,
    },
}

impl OverlayFeature {
    /// Paints the feature into the map rect whose top-left corner is
    /// `origin`. Markers with a non-positive radius do not paint.
    pub fn render(&self, painter: &Painter, viewport: &Viewport, origin: Pos2) {
        match self {
            OverlayFeature::Circle {
                position, style, ..
            } => {
                if style.radius <= 0.0 {
                    return;
                }
                let center = screen_pos(viewport, position, origin);
                let fill = with_opacity(style.fill_color, style.fill_opacity);
                painter.circle(
                    center,
                    style.radius,
                    fill,
                    Stroke::new(style.stroke_width, style.stroke_color),
                );
            }
            OverlayFeature::Line { points, style } => {
                if points.len() < 2 {
                    return;
                }
                let screen_points: Vec<Pos2> = points
                    .iter()
                    .map(|p| screen_pos(viewport, p, origin))
                    .collect();
                painter.add(egui::Shape::line(
                    screen_points,
                    Stroke::new(style.width, style.color),
                ));
            }
        }
    }

    /// Screen-space hit test for popup interaction; only markers are
    /// clickable.
    pub fn hit_test(&self, viewport: &Viewport, origin: Pos2, pointer: Pos2) -> bool {
        match self {
            OverlayFeature::Circle {
                position, style, ..
            } => {
                let center = screen_pos(viewport, position, origin);
                center.distance(pointer) <= style.radius.max(MIN_HIT_RADIUS)
            }
            OverlayFeature::Line { .. } => false,
        }
    }

    /// Popup text, for markers that carry one
    pub fn popup(&self) -> Option<&str> {
        match self {
            OverlayFeature::Circle { popup, .. } => popup.as_deref(),
            OverlayFeature::Line { .. } => None,
        }
    }

    pub fn position(&self) -> Option<LatLng> {
        match self {
            OverlayFeature::Circle { position, .. } => Some(*position),
            OverlayFeature::Line { .. } => None,
        }
    }
}

fn screen_pos(viewport: &Viewport, lat_lng: &LatLng, origin: Pos2) -> Pos2 {
    let pixel = viewport.lat_lng_to_pixel(lat_lng);
    origin + Vec2::new(pixel.x as f32, pixel.y as f32)
}

fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    let alpha = (255.0 * opacity.clamp(0.0, 1.0)) as u8;
    Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), alpha)
}
