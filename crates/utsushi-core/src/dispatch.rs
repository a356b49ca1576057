use kanal::{AsyncReceiver, Sender};
use utsushi_types::AppEvent;

/// Create the channel every UI-bound event travels through
pub fn ui_channel() -> (UiPoster, AsyncReceiver<AppEvent>) {
    let (tx, rx) = kanal::unbounded();
    (UiPoster { tx }, rx.to_async())
}

/// Posts events onto the UI loop from any thread.
///
/// Events are handled in the order they were posted.
#[derive(Clone)]
pub struct UiPoster {
    tx: Sender<AppEvent>,
}

impl UiPoster {
    /// Returns false once the UI loop has gone away
    pub fn post(&self, event: AppEvent) -> bool {
        match self.tx.send(event) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("UI loop closed, dropping event: {}", e);
                false
            }
        }
    }
}
