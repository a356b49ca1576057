//! Controller behaviour against a recording shell

use std::cell::{Cell, RefCell};
use std::ops::ControlFlow;
use std::path::PathBuf;
use std::rc::Rc;

use utsushi_config::ConfigDocument;
use utsushi_core::{CursorHint, RichText, Shell};
use utsushi_types::{
    AppEvent, HotkeyAction, PipelineResult, ScreenBounds, ScreenPoint, SelectionInput,
    SelectionRect, SurfaceInput, WindowGeometry,
};

use crate::controller::AppController;
use crate::pipeline::CaptureScheduler;

const SCREEN: ScreenBounds = ScreenBounds::new(0, 0, 800, 600);

#[derive(Debug, Clone, PartialEq)]
enum ShellCall {
    ShowOverlay(ScreenBounds),
    Outline(Option<SelectionRect>),
    HideOverlay,
    Open(WindowGeometry),
    Move(WindowGeometry),
    Cursor(CursorHint),
    Text(String),
    Close,
}

#[derive(Clone, Default)]
struct FakeShell {
    calls: Rc<RefCell<Vec<ShellCall>>>,
}

impl Shell for FakeShell {
    fn show_selection_overlay(&mut self, screen: ScreenBounds) {
        self.calls.borrow_mut().push(ShellCall::ShowOverlay(screen));
    }

    fn update_selection_outline(&mut self, rect: Option<SelectionRect>) {
        self.calls.borrow_mut().push(ShellCall::Outline(rect));
    }

    fn hide_selection_overlay(&mut self) {
        self.calls.borrow_mut().push(ShellCall::HideOverlay);
    }

    fn open_result_window(&mut self, geometry: WindowGeometry) {
        self.calls.borrow_mut().push(ShellCall::Open(geometry));
    }

    fn move_result_window(&mut self, geometry: WindowGeometry) {
        self.calls.borrow_mut().push(ShellCall::Move(geometry));
    }

    fn set_result_cursor(&mut self, cursor: CursorHint) {
        self.calls.borrow_mut().push(ShellCall::Cursor(cursor));
    }

    fn render_result_text(&mut self, text: &RichText) {
        self.calls.borrow_mut().push(ShellCall::Text(text.body.clone()));
    }

    fn close_result_window(&mut self) {
        self.calls.borrow_mut().push(ShellCall::Close);
    }
}

#[derive(Clone)]
struct FakeScheduler {
    scheduled: Rc<RefCell<Vec<SelectionRect>>>,
    accept: Rc<Cell<bool>>,
}

impl CaptureScheduler for FakeScheduler {
    fn schedule(&self, rect: SelectionRect) -> bool {
        if !self.accept.get() {
            return false;
        }
        self.scheduled.borrow_mut().push(rect);
        true
    }
}

struct Harness {
    controller: AppController<FakeShell, FakeScheduler>,
    calls: Rc<RefCell<Vec<ShellCall>>>,
    scheduled: Rc<RefCell<Vec<SelectionRect>>>,
    accept: Rc<Cell<bool>>,
    path: PathBuf,
}

impl Harness {
    fn new() -> Self {
        let path = std::env::temp_dir().join(format!("utsushi-app-{}.json", uuid::Uuid::new_v4()));
        Self::with_config(path)
    }

    fn with_config(path: PathBuf) -> Self {
        let shell = FakeShell::default();
        let calls = shell.calls.clone();
        let scheduler = FakeScheduler {
            scheduled: Rc::default(),
            accept: Rc::new(Cell::new(true)),
        };
        let scheduled = scheduler.scheduled.clone();
        let accept = scheduler.accept.clone();

        let controller = AppController::new(shell, scheduler, ConfigDocument::load(&path), SCREEN);
        Self {
            controller,
            calls,
            scheduled,
            accept,
            path,
        }
    }

    fn send(&mut self, event: AppEvent) -> ControlFlow<()> {
        self.controller.handle(event)
    }

    fn select(&mut self, from: (i32, i32), to: (i32, i32)) {
        self.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));
        self.send(AppEvent::Selection(SelectionInput::PointerDown(p(from.0, from.1))));
        self.send(AppEvent::Selection(SelectionInput::PointerMove(p(to.0, to.1))));
        self.send(AppEvent::Selection(SelectionInput::PointerUp(p(to.0, to.1))));
    }

    fn drag_window(&mut self, from: (i32, i32), steps: &[(i32, i32)]) {
        self.send(AppEvent::Surface(SurfaceInput::PointerDown(p(from.0, from.1))));
        for &(x, y) in steps {
            self.send(AppEvent::Surface(SurfaceInput::PointerMove(p(x, y))));
        }
        self.send(AppEvent::Surface(SurfaceInput::PointerUp));
    }

    fn calls(&self) -> Vec<ShellCall> {
        self.calls.borrow().clone()
    }

    fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    fn last_text(&self) -> Option<String> {
        self.calls.borrow().iter().rev().find_map(|call| match call {
            ShellCall::Text(text) => Some(text.clone()),
            _ => None,
        })
    }
}

impl Drop for Harness {
    fn drop(&mut self) {
        std::fs::remove_file(&self.path).ok();
    }
}

fn p(x: i32, y: i32) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

#[test]
fn test_select_resize_close_persists_geometry() {
    let mut h = Harness::new();

    h.select((100, 100), (300, 200));
    assert_eq!(
        h.controller.selection_rect(),
        Some(SelectionRect { x1: 100, y1: 100, x2: 300, y2: 200 })
    );

    let placed = WindowGeometry::new(100, 210, 400, 200);
    assert_eq!(h.controller.result_geometry(), Some(placed));
    assert!(h.calls().contains(&ShellCall::Open(placed)));
    assert_eq!(
        h.last_text().as_deref(),
        Some("Selection set. Press ctrl+alt+x to translate.")
    );

    // Grab the bottom-right corner and pull it by (+50, +30)
    h.drag_window((495, 405), &[(520, 420), (545, 435)]);
    assert_eq!(
        h.controller.result_geometry(),
        Some(WindowGeometry::new(100, 210, 450, 230))
    );
    assert!(h.calls().contains(&ShellCall::Cursor(CursorHint::ResizeDiagonal)));
    assert_eq!(h.calls().last(), Some(&ShellCall::Cursor(CursorHint::Default)));

    h.send(AppEvent::Surface(SurfaceInput::CloseClicked));
    assert_eq!(h.controller.result_geometry(), None);
    assert_eq!(h.calls().last(), Some(&ShellCall::Close));

    let reloaded = ConfigDocument::load(&h.path);
    assert_eq!(
        reloaded.config().result_window_geometry.as_deref(),
        Some("450x230+100+210")
    );
}

#[test]
fn test_moving_window_follows_pointer() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.clear_calls();

    h.drag_window((200, 250), &[(210, 240), (230, 260)]);
    let moved = WindowGeometry::new(130, 220, 400, 200);
    assert_eq!(h.controller.result_geometry(), Some(moved));
    assert_eq!(
        h.calls(),
        vec![
            ShellCall::Cursor(CursorHint::Move),
            ShellCall::Move(WindowGeometry::new(110, 200, 400, 200)),
            ShellCall::Move(moved),
            ShellCall::Cursor(CursorHint::Default),
        ]
    );
}

#[test]
fn test_remembered_geometry_wins_on_next_selection() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.drag_window((495, 405), &[(545, 435)]);
    h.send(AppEvent::Surface(SurfaceInput::CloseClicked));

    h.select((500, 20), (700, 80));
    assert_eq!(
        h.controller.result_geometry(),
        Some(WindowGeometry::new(100, 210, 450, 230))
    );
}

#[test]
fn test_remembered_geometry_survives_restart() {
    let path = std::env::temp_dir().join(format!("utsushi-app-{}.json", uuid::Uuid::new_v4()));
    std::fs::write(&path, r#"{ "result_window_geometry": "300x120+-50+40" }"#).unwrap();

    let mut h = Harness::with_config(path);
    h.select((100, 100), (300, 200));
    assert_eq!(
        h.controller.result_geometry(),
        Some(WindowGeometry::new(-50, 40, 300, 120))
    );
}

#[test]
fn test_starting_selection_closes_open_window() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.clear_calls();

    h.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));
    assert_eq!(h.controller.result_geometry(), None);

    let calls = h.calls();
    let close = calls.iter().position(|c| *c == ShellCall::Close).unwrap();
    let show = calls
        .iter()
        .position(|c| *c == ShellCall::ShowOverlay(SCREEN))
        .unwrap();
    assert!(close < show, "{calls:?}");

    let reloaded = ConfigDocument::load(&h.path);
    assert_eq!(
        reloaded.config().result_window_geometry.as_deref(),
        Some("400x200+100+210")
    );
}

#[test]
fn test_toggle_twice_cancels_without_window() {
    let mut h = Harness::new();
    h.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));
    h.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));

    assert_eq!(h.controller.selection_rect(), None);
    assert_eq!(h.controller.result_geometry(), None);
    assert_eq!(h.calls().last(), Some(&ShellCall::HideOverlay));
    assert!(!h.calls().iter().any(|c| matches!(c, ShellCall::Open(_))));
}

#[test]
fn test_small_drag_clears_selection() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.select((400, 400), (404, 500));

    assert_eq!(h.controller.selection_rect(), None);
    assert_eq!(h.controller.result_geometry(), None);
}

#[test]
fn test_escape_cancels_selection() {
    let mut h = Harness::new();
    h.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));
    h.send(AppEvent::Selection(SelectionInput::PointerDown(p(10, 10))));
    h.send(AppEvent::Selection(SelectionInput::Escape));

    assert_eq!(h.controller.selection_rect(), None);
    assert_eq!(h.calls().last(), Some(&ShellCall::HideOverlay));
}

#[test]
fn test_outline_tracks_drag() {
    let mut h = Harness::new();
    h.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));
    h.send(AppEvent::Selection(SelectionInput::PointerDown(p(300, 300))));
    h.send(AppEvent::Selection(SelectionInput::PointerMove(p(250, 350))));

    assert_eq!(
        h.calls().last(),
        Some(&ShellCall::Outline(Some(SelectionRect { x1: 250, y1: 300, x2: 300, y2: 350 })))
    );
}

#[test]
fn test_capture_without_selection_is_ignored() {
    let mut h = Harness::new();
    h.send(AppEvent::Hotkey(HotkeyAction::Capture));

    assert!(h.scheduled.borrow().is_empty());
    assert!(h.calls().is_empty());
}

#[test]
fn test_capture_schedules_selected_region() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.send(AppEvent::Hotkey(HotkeyAction::Capture));

    assert_eq!(
        *h.scheduled.borrow(),
        vec![SelectionRect { x1: 100, y1: 100, x2: 300, y2: 200 }]
    );
    assert_eq!(
        h.last_text().as_deref(),
        Some("Capturing and sending to the translator...")
    );
}

#[test]
fn test_capture_ignored_while_selecting() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));

    // Start over; the previous region is still remembered
    h.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));
    h.clear_calls();

    h.send(AppEvent::Hotkey(HotkeyAction::Capture));
    assert!(h.scheduled.borrow().is_empty());
    assert!(h.calls().is_empty());

    h.send(AppEvent::Selection(SelectionInput::PointerDown(p(400, 300))));
    h.send(AppEvent::Selection(SelectionInput::PointerUp(p(500, 380))));
    h.send(AppEvent::Hotkey(HotkeyAction::Capture));
    assert_eq!(
        *h.scheduled.borrow(),
        vec![SelectionRect { x1: 400, y1: 300, x2: 500, y2: 380 }]
    );
}

#[test]
fn test_capture_refused_while_busy_keeps_text() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.accept.set(false);
    h.clear_calls();

    h.send(AppEvent::Hotkey(HotkeyAction::Capture));
    assert!(h.calls().is_empty());
}

#[test]
fn test_translation_is_rendered_as_plain_text() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));

    h.send(AppEvent::TranslationReady(PipelineResult::Success(
        "**Bonjour** le monde".to_string(),
    )));
    assert_eq!(h.last_text().as_deref(), Some("Bonjour le monde"));
}

#[test]
fn test_pipeline_errors_show_diagnostics() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));

    h.send(AppEvent::TranslationReady(PipelineResult::ApiError {
        status: 500,
        body: "boom".to_string(),
    }));
    assert_eq!(h.last_text().as_deref(), Some("API error: 500"));

    h.send(AppEvent::TranslationReady(PipelineResult::ApiEmptyResponse));
    assert_eq!(
        h.last_text().as_deref(),
        Some("Translation failed: the API returned an empty response.")
    );

    h.send(AppEvent::TranslationReady(PipelineResult::EncodeError(
        "image is empty".to_string(),
    )));
    assert_eq!(
        h.last_text().as_deref(),
        Some("Error: failed to encode the captured image.")
    );
}

#[test]
fn test_late_translation_without_window_is_dropped() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.send(AppEvent::Hotkey(HotkeyAction::Capture));
    h.send(AppEvent::Surface(SurfaceInput::CloseClicked));
    h.clear_calls();

    h.send(AppEvent::TranslationReady(PipelineResult::Success("Bonjour".to_string())));
    assert!(h.calls().is_empty());
}

#[test]
fn test_late_translation_lands_in_current_window() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));
    h.send(AppEvent::Hotkey(HotkeyAction::Capture));
    h.select((400, 300), (600, 350));

    h.send(AppEvent::TranslationReady(PipelineResult::Success("Bonjour".to_string())));
    assert_eq!(h.last_text().as_deref(), Some("Bonjour"));
}

#[test]
fn test_surface_input_without_window_is_ignored() {
    let mut h = Harness::new();
    h.drag_window((10, 10), &[(20, 20)]);
    h.send(AppEvent::Surface(SurfaceInput::CloseClicked));
    assert!(h.calls().is_empty());
}

#[test]
fn test_shutdown_persists_and_stops() {
    let mut h = Harness::new();
    h.select((100, 100), (300, 200));

    assert_eq!(h.send(AppEvent::Shutdown), ControlFlow::Break(()));
    assert_eq!(h.controller.result_geometry(), None);
    assert_eq!(
        ConfigDocument::load(&h.path).config().result_window_geometry.as_deref(),
        Some("400x200+100+210")
    );
}

#[test]
fn test_shutdown_hides_active_overlay() {
    let mut h = Harness::new();
    h.send(AppEvent::Hotkey(HotkeyAction::ToggleSelection));

    assert!(h.send(AppEvent::Shutdown).is_break());
    assert!(h.calls().contains(&ShellCall::HideOverlay));
}
