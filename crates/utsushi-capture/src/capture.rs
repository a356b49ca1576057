use utsushi_types::{ScreenBounds, SelectionRect};
use xcap::Monitor;
use xcap::image::{RgbaImage, imageops};

#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to enumerate monitors: {0}")]
    Monitors(#[source] xcap::XCapError),

    #[error("no monitor found")]
    NoMonitor,

    #[error("failed to capture screen: {0}")]
    Grab(#[source] xcap::XCapError),

    #[error("selection {0} lies outside every monitor")]
    OutOfBounds(SelectionRect),
}

/// Grabs a screen region. Blocking; never call it on the UI thread.
pub trait ScreenCapturer: Send + Sync {
    fn capture(&self, rect: SelectionRect) -> Result<RgbaImage, CaptureError>;
}

/// Capture backed by `xcap`
#[derive(Debug, Default, Clone, Copy)]
pub struct XcapCapturer;

impl ScreenCapturer for XcapCapturer {
    fn capture(&self, rect: SelectionRect) -> Result<RgbaImage, CaptureError> {
        capture_screen_region(rect)
    }
}

/// Bounds of all monitors together
pub fn virtual_screen() -> Result<ScreenBounds, CaptureError> {
    let monitors = Monitor::all().map_err(CaptureError::Monitors)?;

    let bounds = monitors
        .iter()
        .map(|m| {
            ScreenBounds::new(m.x(), m.y(), m.width() as i32, m.height() as i32)
        })
        .reduce(|a, b| {
            let x = a.x.min(b.x);
            let y = a.y.min(b.y);
            let right = (a.x + a.width).max(b.x + b.width);
            let bottom = (a.y + a.height).max(b.y + b.height);
            ScreenBounds::new(x, y, right - x, bottom - y)
        })
        .ok_or(CaptureError::NoMonitor)?;

    Ok(bounds)
}

/// Capture `rect` from the monitor that contains its top-left corner
fn capture_screen_region(rect: SelectionRect) -> Result<RgbaImage, CaptureError> {
    let monitors = Monitor::all().map_err(CaptureError::Monitors)?;

    let monitor = monitors
        .iter()
        .find(|m| {
            rect.x1 >= m.x()
                && rect.y1 >= m.y()
                && rect.x1 < m.x() + m.width() as i32
                && rect.y1 < m.y() + m.height() as i32
        })
        .or(monitors.first())
        .ok_or(CaptureError::NoMonitor)?;

    let image = monitor.capture_image().map_err(CaptureError::Grab)?;

    let bounds = ScreenBounds::new(
        monitor.x(),
        monitor.y(),
        image.width() as i32,
        image.height() as i32,
    );
    let (x, y, width, height) = crop_box(rect, bounds).ok_or(CaptureError::OutOfBounds(rect))?;

    tracing::debug!("Captured {}x{} at ({}, {})", width, height, x, y);
    Ok(imageops::crop_imm(&image, x, y, width, height).to_image())
}

/// Intersect `rect` with a monitor, in monitor-local pixels
fn crop_box(rect: SelectionRect, monitor: ScreenBounds) -> Option<(u32, u32, u32, u32)> {
    let x1 = rect.x1.max(monitor.x);
    let y1 = rect.y1.max(monitor.y);
    let x2 = rect.x2.min(monitor.x + monitor.width);
    let y2 = rect.y2.min(monitor.y + monitor.height);

    if x2 <= x1 || y2 <= y1 {
        return None;
    }

    Some((
        (x1 - monitor.x) as u32,
        (y1 - monitor.y) as u32,
        (x2 - x1) as u32,
        (y2 - y1) as u32,
    ))
}
