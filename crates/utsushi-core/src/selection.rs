use utsushi_types::{ScreenPoint, SelectionInput, SelectionRect};

/// A drag must exceed this on both axes to count as a selection
pub const MIN_SELECTION_SIZE: i32 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionPhase {
    #[default]
    Inactive,
    /// Overlay is up; `anchor` is set while the pointer is held down
    Active { anchor: Option<ScreenPoint> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    Committed(SelectionRect),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionToggle {
    Started,
    Cancelled,
}

/// What the overlay should do after an input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    Ignored,
    /// Redraw the live outline
    Outline(SelectionRect),
    /// Tear the overlay down
    Finished(SelectionOutcome),
}

/// Drag-to-select state machine behind the full-screen overlay
#[derive(Debug, Default)]
pub struct SelectionController {
    phase: SelectionPhase,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        matches!(self.phase, SelectionPhase::Active { .. })
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, SelectionPhase::Active { anchor: Some(_) })
    }

    /// Select hotkey: start when inactive, cancel when already active
    pub fn toggle(&mut self) -> SelectionToggle {
        if self.is_active() {
            self.phase = SelectionPhase::Inactive;
            SelectionToggle::Cancelled
        } else {
            self.phase = SelectionPhase::Active { anchor: None };
            SelectionToggle::Started
        }
    }

    pub fn handle(&mut self, input: SelectionInput) -> SelectionStep {
        match input {
            SelectionInput::PointerDown(point) => self.pointer_down(point),
            SelectionInput::PointerMove(point) => self.pointer_move(point),
            SelectionInput::PointerUp(point) => self.pointer_up(point),
            SelectionInput::Escape => self.escape(),
        }
    }

    fn pointer_down(&mut self, point: ScreenPoint) -> SelectionStep {
        if !self.is_active() {
            return SelectionStep::Ignored;
        }
        self.phase = SelectionPhase::Active {
            anchor: Some(point),
        };
        SelectionStep::Outline(SelectionRect::from_corners(point, point))
    }

    fn pointer_move(&mut self, point: ScreenPoint) -> SelectionStep {
        match self.phase {
            SelectionPhase::Active {
                anchor: Some(anchor),
            } => SelectionStep::Outline(SelectionRect::from_corners(anchor, point)),
            _ => SelectionStep::Ignored,
        }
    }

    fn pointer_up(&mut self, point: ScreenPoint) -> SelectionStep {
        let SelectionPhase::Active {
            anchor: Some(anchor),
        } = self.phase
        else {
            return SelectionStep::Ignored;
        };

        self.phase = SelectionPhase::Inactive;
        let rect = SelectionRect::from_corners(anchor, point);

        if rect.width() > MIN_SELECTION_SIZE && rect.height() > MIN_SELECTION_SIZE {
            SelectionStep::Finished(SelectionOutcome::Committed(rect))
        } else {
            tracing::info!("[SELECT] Selection {} too small, discarded", rect);
            SelectionStep::Finished(SelectionOutcome::Cancelled)
        }
    }

    fn escape(&mut self) -> SelectionStep {
        if !self.is_active() {
            return SelectionStep::Ignored;
        }
        self.phase = SelectionPhase::Inactive;
        SelectionStep::Finished(SelectionOutcome::Cancelled)
    }
}
