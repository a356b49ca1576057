pub mod geometry;
pub mod style;
pub mod types;

pub use geometry::{
    GeometryParseError, MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, ScreenBounds, ScreenPoint, SelectionRect,
    WindowGeometry,
};
pub use style::{Color, ColorParseError, DisplayStyle};
pub use types::*;
