//! egui widgets: the map widget itself plus its floating controls.

pub mod controls;
pub mod legend;
pub mod popup;
pub mod widget;
