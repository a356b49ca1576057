mod capture;
mod encode;
mod hotkey;

pub use capture::{CaptureError, ScreenCapturer, XcapCapturer, virtual_screen};
pub use encode::{EncodeError, encode_png, encode_png_base64};
pub use hotkey::{HotkeyBindings, HotkeyError, parse_hotkey};
pub use xcap::image::RgbaImage;
