use utsushi_types::{MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH, ScreenPoint, WindowGeometry};

/// Width of the grab zone along the right and bottom edges
pub const RESIZE_BORDER: i32 = 10;

/// Part of the window a pointer-down landed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Move,
    ResizeRight,
    ResizeBottom,
    ResizeCorner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionMode {
    #[default]
    Idle,
    Moving,
    ResizingRight,
    ResizingBottom,
    ResizingCorner,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorHint {
    #[default]
    Default,
    Move,
    ResizeHorizontal,
    ResizeVertical,
    ResizeDiagonal,
}

impl From<Region> for InteractionMode {
    fn from(region: Region) -> Self {
        match region {
            Region::Move => InteractionMode::Moving,
            Region::ResizeRight => InteractionMode::ResizingRight,
            Region::ResizeBottom => InteractionMode::ResizingBottom,
            Region::ResizeCorner => InteractionMode::ResizingCorner,
        }
    }
}

impl InteractionMode {
    pub fn cursor(self) -> CursorHint {
        match self {
            InteractionMode::Idle => CursorHint::Default,
            InteractionMode::Moving => CursorHint::Move,
            InteractionMode::ResizingRight => CursorHint::ResizeHorizontal,
            InteractionMode::ResizingBottom => CursorHint::ResizeVertical,
            InteractionMode::ResizingCorner => CursorHint::ResizeDiagonal,
        }
    }

    fn resizes_width(self) -> bool {
        matches!(
            self,
            InteractionMode::ResizingRight | InteractionMode::ResizingCorner
        )
    }

    fn resizes_height(self) -> bool {
        matches!(
            self,
            InteractionMode::ResizingBottom | InteractionMode::ResizingCorner
        )
    }
}

/// Classify a window-local pointer position. The corner wins over either edge.
pub fn classify_region(local: ScreenPoint, size: (i32, i32), border: i32) -> Region {
    let (width, height) = size;
    let near_right = local.x > width - border;
    let near_bottom = local.y > height - border;

    match (near_right, near_bottom) {
        (true, true) => Region::ResizeCorner,
        (true, false) => Region::ResizeRight,
        (false, true) => Region::ResizeBottom,
        (false, false) => Region::Move,
    }
}

/// Geometry and drag state of the floating result window.
///
/// Pointer samples are screen coordinates. Each move applies the delta from
/// the previous sample, then re-latches that sample, so rounding never
/// accumulates over a long drag.
#[derive(Debug, Clone)]
pub struct ResultSurface {
    geometry: WindowGeometry,
    mode: InteractionMode,
    last_pointer: ScreenPoint,
}

impl ResultSurface {
    pub fn new(geometry: WindowGeometry) -> Self {
        Self {
            geometry,
            mode: InteractionMode::Idle,
            last_pointer: ScreenPoint::default(),
        }
    }

    pub fn geometry(&self) -> WindowGeometry {
        self.geometry
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    /// Latch the interaction mode for a new drag
    pub fn pointer_down(&mut self, pointer: ScreenPoint) -> CursorHint {
        let local = ScreenPoint::new(pointer.x - self.geometry.x, pointer.y - self.geometry.y);
        let region = classify_region(
            local,
            (self.geometry.width, self.geometry.height),
            RESIZE_BORDER,
        );

        self.mode = region.into();
        self.last_pointer = pointer;
        self.mode.cursor()
    }

    /// Apply one pointer step; returns whether the geometry changed
    pub fn pointer_move(&mut self, pointer: ScreenPoint) -> bool {
        let dx = pointer.x - self.last_pointer.x;
        let dy = pointer.y - self.last_pointer.y;
        let before = self.geometry;

        match self.mode {
            InteractionMode::Idle => return false,
            InteractionMode::Moving => {
                self.geometry.x += dx;
                self.geometry.y += dy;
                self.last_pointer = pointer;
            }
            mode => {
                if mode.resizes_width() {
                    let width = self.geometry.width + dx;
                    if width >= MIN_WINDOW_WIDTH {
                        self.geometry.width = width;
                        self.last_pointer.x = pointer.x;
                    }
                }
                if mode.resizes_height() {
                    let height = self.geometry.height + dy;
                    if height >= MIN_WINDOW_HEIGHT {
                        self.geometry.height = height;
                        self.last_pointer.y = pointer.y;
                    }
                }
            }
        }

        self.geometry != before
    }

    /// End the drag and hand back the default cursor
    pub fn pointer_up(&mut self) -> CursorHint {
        self.mode = InteractionMode::Idle;
        CursorHint::Default
    }
}
