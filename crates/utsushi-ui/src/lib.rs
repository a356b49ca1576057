use std::ops::ControlFlow;

use kanal::AsyncReceiver;
use utsushi_types::AppEvent;

mod shell;

pub use shell::SlintShell;

slint::include_modules!();

/// Drain `rx` on the slint event loop until `handler` breaks or every sender is gone.
///
/// The app starts with no window visible, so the loop runs until it is
/// explicitly quit rather than until the last window closes. Create the
/// windows (e.g. [`SlintShell::new`]) before calling this so the backend exists.
pub fn run_event_loop<H>(rx: AsyncReceiver<AppEvent>, mut handler: H) -> anyhow::Result<()>
where
    H: FnMut(AppEvent) -> ControlFlow<()> + 'static,
{
    slint::spawn_local(async move {
        while let Ok(event) = rx.recv().await {
            if handler(event).is_break() {
                break;
            }
        }
        tracing::debug!("[SLINT] Event loop drained, quitting");
        slint::quit_event_loop().ok();
    })?;

    slint::run_event_loop_until_quit()?;
    Ok(())
}
