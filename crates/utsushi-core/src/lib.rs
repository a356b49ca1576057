pub mod dispatch;
pub mod planner;
pub mod render;
pub mod selection;
pub mod shell;
pub mod surface;

pub use dispatch::{UiPoster, ui_channel};
pub use render::RichText;
pub use selection::{SelectionController, SelectionOutcome, SelectionStep, SelectionToggle};
pub use shell::Shell;
pub use surface::{CursorHint, InteractionMode, ResultSurface};
