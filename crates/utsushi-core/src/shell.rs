use utsushi_types::{ScreenBounds, SelectionRect, WindowGeometry};

use crate::render::RichText;
use crate::surface::CursorHint;

/// Windows the controller drives. Every method runs on the UI thread.
pub trait Shell {
    /// Show the dimmed full-screen overlay that takes pointer input
    fn show_selection_overlay(&mut self, screen: ScreenBounds);

    /// Redraw the live selection outline, or clear it
    fn update_selection_outline(&mut self, rect: Option<SelectionRect>);

    fn hide_selection_overlay(&mut self);

    /// Create the borderless result window at `geometry`
    fn open_result_window(&mut self, geometry: WindowGeometry);

    fn move_result_window(&mut self, geometry: WindowGeometry);

    fn set_result_cursor(&mut self, cursor: CursorHint);

    fn render_result_text(&mut self, text: &RichText);

    fn close_result_window(&mut self);
}
