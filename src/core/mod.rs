//! Geographic primitives, the viewport and the map context.

pub mod geo;
pub mod map;
pub mod viewport;
