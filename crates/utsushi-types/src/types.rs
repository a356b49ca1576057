use serde::{Deserialize, Serialize};

use crate::geometry::ScreenPoint;

/// Everything that may be posted to the UI loop
#[derive(Debug, Clone)]
pub enum AppEvent {
    Hotkey(HotkeyAction),
    Selection(SelectionInput),
    Surface(SurfaceInput),
    TranslationReady(PipelineResult),
    Shutdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HotkeyAction {
    /// Start a region selection, or cancel the one in progress
    ToggleSelection,
    /// Capture and translate the current selection
    Capture,
}

/// Pointer and key input from the selection overlay, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionInput {
    PointerDown(ScreenPoint),
    PointerMove(ScreenPoint),
    PointerUp(ScreenPoint),
    Escape,
}

/// Pointer input from the result window, in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceInput {
    PointerDown(ScreenPoint),
    PointerMove(ScreenPoint),
    PointerUp,
    CloseClicked,
}

/// Outcome of one capture-translate run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Success(String),
    ApiError { status: u16, body: String },
    ApiEmptyResponse,
    NetworkError(String),
    EncodeError(String),
    CaptureError(String),
}

impl PipelineResult {
    pub fn is_success(&self) -> bool {
        matches!(self, PipelineResult::Success(_))
    }

    /// Text shown in the result window for this outcome
    pub fn display_text(&self) -> String {
        match self {
            PipelineResult::Success(text) => text.clone(),
            PipelineResult::ApiError { status, .. } => format!("API error: {}", status),
            PipelineResult::ApiEmptyResponse => {
                "Translation failed: the API returned an empty response.".to_string()
            }
            PipelineResult::NetworkError(message) => format!("Network error: {}", message),
            PipelineResult::EncodeError(_) => {
                "Error: failed to encode the captured image.".to_string()
            }
            PipelineResult::CaptureError(message) => format!("Capture failed: {}", message),
        }
    }
}
