use slint::{CloseRequestResponse, ComponentHandle, PhysicalPosition, PhysicalSize, Weak};
use utsushi_core::{CursorHint, RichText, Shell, UiPoster};
use utsushi_types::{
    AppEvent, Color, ScreenBounds, ScreenPoint, SelectionInput, SelectionRect, SurfaceInput,
    WindowGeometry,
};

use crate::{ResultWindow, SelectionOverlay};

/// Slint-backed windows. Widget callbacks never touch state directly:
/// they convert pointers to screen coordinates and post an [`AppEvent`].
pub struct SlintShell {
    overlay: SelectionOverlay,
    result: ResultWindow,
}

impl SlintShell {
    pub fn new(poster: UiPoster) -> Result<Self, slint::PlatformError> {
        let overlay = SelectionOverlay::new()?;
        let result = ResultWindow::new()?;

        wire_overlay(&overlay, &poster);
        wire_result(&result, &poster);

        Ok(Self { overlay, result })
    }
}

fn wire_overlay(overlay: &SelectionOverlay, poster: &UiPoster) {
    let weak = overlay.as_weak();
    overlay.on_pointer_down(forward_pointer(weak.clone(), poster.clone(), |p| {
        AppEvent::Selection(SelectionInput::PointerDown(p))
    }));
    overlay.on_pointer_move(forward_pointer(weak.clone(), poster.clone(), |p| {
        AppEvent::Selection(SelectionInput::PointerMove(p))
    }));
    overlay.on_pointer_up(forward_pointer(weak, poster.clone(), |p| {
        AppEvent::Selection(SelectionInput::PointerUp(p))
    }));

    let tx = poster.clone();
    overlay.on_escape(move || {
        tx.post(AppEvent::Selection(SelectionInput::Escape));
    });

    let tx = poster.clone();
    overlay.window().on_close_requested(move || {
        tx.post(AppEvent::Selection(SelectionInput::Escape));
        CloseRequestResponse::KeepWindowShown
    });
}

fn wire_result(result: &ResultWindow, poster: &UiPoster) {
    let weak = result.as_weak();
    result.on_pointer_down(forward_pointer(weak.clone(), poster.clone(), |p| {
        AppEvent::Surface(SurfaceInput::PointerDown(p))
    }));
    result.on_pointer_move(forward_pointer(weak, poster.clone(), |p| {
        AppEvent::Surface(SurfaceInput::PointerMove(p))
    }));

    let tx = poster.clone();
    result.on_pointer_up(move || {
        tx.post(AppEvent::Surface(SurfaceInput::PointerUp));
    });

    let tx = poster.clone();
    result.on_close_clicked(move || {
        tx.post(AppEvent::Surface(SurfaceInput::CloseClicked));
    });

    // Closing from the window manager goes through the same path so geometry is saved
    let tx = poster.clone();
    result.window().on_close_requested(move || {
        tx.post(AppEvent::Surface(SurfaceInput::CloseClicked));
        CloseRequestResponse::KeepWindowShown
    });
}

fn forward_pointer<C>(
    weak: Weak<C>,
    poster: UiPoster,
    wrap: fn(ScreenPoint) -> AppEvent,
) -> impl Fn(f32, f32) + 'static
where
    C: ComponentHandle + 'static,
{
    move |x, y| {
        let Some(component) = weak.upgrade() else {
            return;
        };
        let window = component.window();
        let point = to_screen(window.position(), window.scale_factor(), x, y);
        poster.post(wrap(point));
    }
}

/// Window-local logical coordinates to physical screen pixels
fn to_screen(origin: PhysicalPosition, scale: f32, x: f32, y: f32) -> ScreenPoint {
    ScreenPoint::new(
        origin.x + (x * scale).round() as i32,
        origin.y + (y * scale).round() as i32,
    )
}

/// Screen rectangle to overlay-local logical `(x, y, width, height)`
fn outline_in_overlay(rect: SelectionRect, origin: PhysicalPosition, scale: f32) -> (f32, f32, f32, f32) {
    (
        (rect.x1 - origin.x) as f32 / scale,
        (rect.y1 - origin.y) as f32 / scale,
        rect.width() as f32 / scale,
        rect.height() as f32 / scale,
    )
}

/// Matches `cursor-kind` in `ResultWindow`
fn cursor_kind(cursor: CursorHint) -> i32 {
    match cursor {
        CursorHint::Default => 0,
        CursorHint::Move => 1,
        CursorHint::ResizeHorizontal => 2,
        CursorHint::ResizeVertical => 3,
        CursorHint::ResizeDiagonal => 4,
    }
}

fn to_slint_color(color: Color) -> slint::Color {
    slint::Color::from_rgb_u8(color.r, color.g, color.b)
}

fn place(window: &slint::Window, x: i32, y: i32, width: i32, height: i32) {
    window.set_position(PhysicalPosition::new(x, y));
    window.set_size(PhysicalSize::new(width.max(1) as u32, height.max(1) as u32));
}

impl Shell for SlintShell {
    fn show_selection_overlay(&mut self, screen: ScreenBounds) {
        self.overlay.set_outline_visible(false);
        if let Err(e) = self.overlay.show() {
            tracing::error!("[SLINT] Failed to show selection overlay: {}", e);
            return;
        }
        place(self.overlay.window(), screen.x, screen.y, screen.width, screen.height);
        tracing::debug!("[SLINT] Selection overlay shown");
    }

    fn update_selection_outline(&mut self, rect: Option<SelectionRect>) {
        let Some(rect) = rect else {
            self.overlay.set_outline_visible(false);
            return;
        };

        let window = self.overlay.window();
        let (x, y, width, height) = outline_in_overlay(rect, window.position(), window.scale_factor());
        self.overlay.set_outline_x(x);
        self.overlay.set_outline_y(y);
        self.overlay.set_outline_width(width);
        self.overlay.set_outline_height(height);
        self.overlay.set_outline_visible(true);
    }

    fn hide_selection_overlay(&mut self) {
        self.overlay.set_outline_visible(false);
        if let Err(e) = self.overlay.hide() {
            tracing::warn!("[SLINT] Failed to hide selection overlay: {}", e);
        }
    }

    fn open_result_window(&mut self, geometry: WindowGeometry) {
        self.result.set_cursor_kind(0);
        if let Err(e) = self.result.show() {
            tracing::error!("[SLINT] Failed to show result window: {}", e);
            return;
        }
        self.move_result_window(geometry);
        tracing::debug!("[SLINT] Result window opened at {}", geometry);
    }

    fn move_result_window(&mut self, geometry: WindowGeometry) {
        place(
            self.result.window(),
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
        );
    }

    fn set_result_cursor(&mut self, cursor: CursorHint) {
        self.result.set_cursor_kind(cursor_kind(cursor));
    }

    fn render_result_text(&mut self, text: &RichText) {
        let style = &text.style;
        self.result.set_panel_background(to_slint_color(style.background));
        self.result.set_text_color(to_slint_color(style.foreground));
        self.result.set_text_font(style.font_family.as_str().into());
        self.result.set_text_size(style.font_size as f32);
        self.result.set_panel_opacity(style.opacity);
        self.result.set_body(text.body.as_str().into());
    }

    fn close_result_window(&mut self) {
        if let Err(e) = self.result.hide() {
            tracing::warn!("[SLINT] Failed to hide result window: {}", e);
        }
        tracing::debug!("[SLINT] Result window closed");
    }
}
