use std::ops::ControlFlow;

use utsushi_config::ConfigDocument;
use utsushi_core::planner::plan;
use utsushi_core::{
    ResultSurface, RichText, SelectionController, SelectionOutcome, SelectionStep,
    SelectionToggle, Shell,
};
use utsushi_types::{
    AppEvent, DisplayStyle, HotkeyAction, PipelineResult, ScreenBounds, SelectionInput,
    SelectionRect, SurfaceInput, WindowGeometry,
};

use crate::pipeline::CaptureScheduler;

const CAPTURING_TEXT: &str = "Capturing and sending to the translator...";

/// Owns the selection and the result window. Runs on the UI loop only;
/// every other thread reaches it by posting an [`AppEvent`].
pub struct AppController<S: Shell, C: CaptureScheduler> {
    shell: S,
    scheduler: C,
    config: ConfigDocument,
    style: DisplayStyle,
    default_size: (i32, i32),
    screen: ScreenBounds,
    selection: SelectionController,
    selection_rect: Option<SelectionRect>,
    surface: Option<ResultSurface>,
}

impl<S: Shell, C: CaptureScheduler> AppController<S, C> {
    pub fn new(shell: S, scheduler: C, config: ConfigDocument, screen: ScreenBounds) -> Self {
        let display = &config.config().display;
        let style = display.style();
        let default_size = display.default_size();

        Self {
            shell,
            scheduler,
            config,
            style,
            default_size,
            screen,
            selection: SelectionController::new(),
            selection_rect: None,
            surface: None,
        }
    }

    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection_rect
    }

    pub fn result_geometry(&self) -> Option<WindowGeometry> {
        self.surface.as_ref().map(ResultSurface::geometry)
    }

    /// Handle one event; breaks once the app should quit
    pub fn handle(&mut self, event: AppEvent) -> ControlFlow<()> {
        match event {
            AppEvent::Hotkey(HotkeyAction::ToggleSelection) => self.toggle_selection(),
            AppEvent::Hotkey(HotkeyAction::Capture) => self.capture(),
            AppEvent::Selection(input) => self.selection_input(input),
            AppEvent::Surface(input) => self.surface_input(input),
            AppEvent::TranslationReady(result) => self.deliver(result),
            AppEvent::Shutdown => {
                self.shutdown();
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    fn toggle_selection(&mut self) {
        match self.selection.toggle() {
            SelectionToggle::Started => {
                self.close_result_window();
                self.shell.update_selection_outline(None);
                self.shell.show_selection_overlay(self.screen);
                tracing::info!("[SELECT] Drag to select a region, Escape to cancel");
            }
            SelectionToggle::Cancelled => {
                self.shell.hide_selection_overlay();
                self.selection_rect = None;
                tracing::info!("[SELECT] Selection cancelled");
            }
        }
    }

    fn selection_input(&mut self, input: SelectionInput) {
        match self.selection.handle(input) {
            SelectionStep::Ignored => {}
            SelectionStep::Outline(rect) => self.shell.update_selection_outline(Some(rect)),
            SelectionStep::Finished(outcome) => {
                self.shell.hide_selection_overlay();
                match outcome {
                    SelectionOutcome::Committed(rect) => self.commit_selection(rect),
                    SelectionOutcome::Cancelled => {
                        self.selection_rect = None;
                        tracing::info!("[SELECT] Selection cancelled");
                    }
                }
            }
        }
    }

    fn commit_selection(&mut self, rect: SelectionRect) {
        self.selection_rect = Some(rect);
        self.close_result_window();

        let prior = self.config.config().window_geometry();
        let geometry = plan(rect, self.screen, prior, self.default_size);

        self.surface = Some(ResultSurface::new(geometry));
        self.shell.open_result_window(geometry);

        let capture_key = self.config.config().hotkeys.capture.clone();
        self.render(&format!("Selection set. Press `{}` to translate.", capture_key));
        tracing::info!(
            "[SELECT] Region selected: {}. Press '{}' to capture and translate.",
            rect,
            capture_key
        );
    }

    fn capture(&mut self) {
        if self.selection.is_active() {
            tracing::info!("[CAPTURE] Finish or cancel the selection before capturing");
            return;
        }

        let Some(rect) = self.selection_rect else {
            tracing::warn!(
                "[CAPTURE] No region selected. Press '{}' to select one first.",
                self.config.config().hotkeys.select
            );
            return;
        };

        if self.scheduler.schedule(rect) {
            self.render(CAPTURING_TEXT);
        }
    }

    fn surface_input(&mut self, input: SurfaceInput) {
        if let SurfaceInput::CloseClicked = input {
            self.close_result_window();
            return;
        }

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        match input {
            SurfaceInput::PointerDown(point) => {
                let cursor = surface.pointer_down(point);
                self.shell.set_result_cursor(cursor);
            }
            SurfaceInput::PointerMove(point) => {
                if surface.pointer_move(point) {
                    self.shell.move_result_window(surface.geometry());
                }
            }
            SurfaceInput::PointerUp => {
                let cursor = surface.pointer_up();
                self.shell.set_result_cursor(cursor);
            }
            SurfaceInput::CloseClicked => {}
        }
    }

    /// Results always land in whichever window is open at delivery time
    fn deliver(&mut self, result: PipelineResult) {
        if self.surface.is_none() {
            tracing::debug!("[PIPELINE] No result window open, dropping {:?}", result);
            return;
        }
        let text = result.display_text();
        if !result.is_success() {
            tracing::warn!("[PIPELINE] Showing diagnostic: {}", text);
        }
        self.render(&text);
    }

    fn render(&mut self, markdown: &str) {
        if self.surface.is_some() {
            let text = RichText::render(markdown, &self.style);
            self.shell.render_result_text(&text);
        }
    }

    /// Persist the current geometry, then close the window
    fn close_result_window(&mut self) {
        let Some(surface) = self.surface.take() else {
            return;
        };

        let geometry = surface.geometry();
        if let Err(e) = self.config.remember_geometry(geometry) {
            tracing::error!("Failed to save window geometry: {}", e);
        }
        self.shell.close_result_window();
        tracing::debug!("Result window closed at {}", geometry);
    }

    fn shutdown(&mut self) {
        if self.selection.is_active() {
            self.selection.toggle();
            self.shell.hide_selection_overlay();
        }
        self.close_result_window();
        tracing::info!("Shutting down");
    }
}
