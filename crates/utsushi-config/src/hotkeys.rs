use serde::{Deserialize, Serialize};

fn default_select() -> String {
    "ctrl+alt+q".to_string()
}

fn default_capture() -> String {
    "ctrl+alt+x".to_string()
}

/// Global key combinations, e.g. `ctrl+alt+q` or `<ctrl>+<alt>+q`
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HotkeyConfig {
    /// Start or cancel a region selection
    #[serde(default = "default_select")]
    pub select: String,
    /// Capture and translate the current selection
    #[serde(default = "default_capture")]
    pub capture: String,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            select: default_select(),
            capture: default_capture(),
        }
    }
}
