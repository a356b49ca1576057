use utsushi_types::{ScreenBounds, SelectionRect, WindowGeometry};

/// Space left between the selection and the result window
pub const WINDOW_GAP: i32 = 10;

/// Place the result window for `selection`.
///
/// A remembered geometry always wins. Otherwise the window goes below the
/// selection, flips above it when it would run off the bottom of the screen,
/// and is centered on screen when neither fits.
pub fn plan(
    selection: SelectionRect,
    screen: ScreenBounds,
    prior: Option<WindowGeometry>,
    default_size: (i32, i32),
) -> WindowGeometry {
    if let Some(prior) = prior {
        return prior;
    }

    let (width, height) = default_size;
    let mut x = selection.x1;
    let mut y = selection.y2 + WINDOW_GAP;

    if y + height > screen.height {
        y = selection.y1 - height - WINDOW_GAP;
        if y < 0 {
            x = (screen.width - width) / 2;
            y = (screen.height - height) / 2;
        }
    }

    WindowGeometry::new(x, y, width, height)
}
