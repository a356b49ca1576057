use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use utsushi_types::HotkeyAction;

#[derive(Debug, thiserror::Error)]
pub enum HotkeyError {
    #[error("invalid hotkey '{binding}': {reason}")]
    Parse { binding: String, reason: String },

    #[error("failed to create hotkey manager: {0}")]
    Manager(#[source] global_hotkey::Error),

    #[error("failed to register hotkey '{binding}': {source}")]
    Register {
        binding: String,
        source: global_hotkey::Error,
    },
}

/// Parse `ctrl+alt+q` or the bracketed `<ctrl>+<alt>+q` form
pub fn parse_hotkey(binding: &str) -> Result<HotKey, HotkeyError> {
    let normalized: String = binding
        .split('+')
        .map(|part| part.trim().trim_start_matches('<').trim_end_matches('>'))
        .collect::<Vec<_>>()
        .join("+");

    normalized.parse().map_err(|e: global_hotkey::hotkey::HotKeyParseError| HotkeyError::Parse {
        binding: binding.to_string(),
        reason: e.to_string(),
    })
}

/// The two registered global hotkeys. Unregistered on drop.
pub struct HotkeyBindings {
    manager: GlobalHotKeyManager,
    hotkeys: Vec<HotKey>,
}

impl HotkeyBindings {
    /// Register both bindings and route presses to `on_action`.
    ///
    /// `on_action` runs on whatever thread the platform delivers hotkeys on;
    /// it must hand the action over to the UI loop rather than act on it.
    /// Create this on the main thread, before the UI event loop starts.
    pub fn register<F>(select: &str, capture: &str, on_action: F) -> Result<Self, HotkeyError>
    where
        F: Fn(HotkeyAction) + Send + Sync + 'static,
    {
        let select_key = parse_hotkey(select)?;
        let capture_key = parse_hotkey(capture)?;

        let manager = GlobalHotKeyManager::new().map_err(HotkeyError::Manager)?;
        for (binding, hotkey) in [(select, select_key), (capture, capture_key)] {
            manager
                .register(hotkey)
                .map_err(|source| HotkeyError::Register {
                    binding: binding.to_string(),
                    source,
                })?;
        }

        let select_id = select_key.id();
        let capture_id = capture_key.id();
        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            if event.state != HotKeyState::Pressed {
                return;
            }
            let action = if event.id == select_id {
                HotkeyAction::ToggleSelection
            } else if event.id == capture_id {
                HotkeyAction::Capture
            } else {
                tracing::debug!("Unknown hotkey id {}", event.id);
                return;
            };
            tracing::debug!("Hotkey pressed: {:?}", action);
            on_action(action);
        }));

        Ok(Self {
            manager,
            hotkeys: vec![select_key, capture_key],
        })
    }
}

impl Drop for HotkeyBindings {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
        if let Err(e) = self.manager.unregister_all(&self.hotkeys) {
            tracing::warn!("Failed to unregister hotkeys: {}", e);
        }
    }
}
