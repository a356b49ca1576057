use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use utsushi_capture::{HotkeyBindings, XcapCapturer, virtual_screen};
use utsushi_config::ConfigDocument;
use utsushi_config::hotkeys::HotkeyConfig;
use utsushi_core::ui_channel;
use utsushi_translator::{ChatCompletionsTranslator, VisionTranslator};
use utsushi_types::AppEvent;
use utsushi_ui::SlintShell;

use self::controller::AppController;
use self::pipeline::CaptureTranslatePipeline;

pub mod controller;
pub mod pipeline;

#[cfg(test)]
mod tests;

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ConfigDocument::load(ConfigDocument::default_path());
    let hotkeys = config.config().hotkeys.clone();

    // The main thread belongs to slint; background work runs here
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("utsushi-worker")
        .build()
        .context("failed to start the async runtime")?;

    let screen = virtual_screen().context("failed to read the monitor layout")?;
    tracing::info!("Virtual screen {}x{} at ({}, {})", screen.width, screen.height, screen.x, screen.y);

    let api = config.api();
    if api.api_key.is_empty() {
        tracing::warn!("No API key configured; set api.api_key or UTSUSHI_API_KEY");
    }
    let translator = ChatCompletionsTranslator::new(&api).context("failed to build the HTTP client")?;
    let metadata = translator.metadata();
    tracing::info!("Translator: {} ({})", metadata.name, metadata.model);

    let (poster, rx) = ui_channel();

    let pipeline = CaptureTranslatePipeline::new(
        runtime.handle().clone(),
        Arc::new(XcapCapturer),
        Arc::new(translator),
        poster.clone(),
    );

    let shell = SlintShell::new(poster.clone()).context("failed to create the windows")?;

    let hotkey_poster = poster.clone();
    let _bindings = HotkeyBindings::register(&hotkeys.select, &hotkeys.capture, move |action| {
        hotkey_poster.post(AppEvent::Hotkey(action));
    })
    .context("failed to register global hotkeys")?;

    let shutdown_poster = poster.clone();
    runtime.spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Shutdown requested");
                shutdown_poster.post(AppEvent::Shutdown);
            }
            Err(e) => tracing::error!("Failed to listen for ctrl+c: {}", e),
        }
    });

    print_banner(&hotkeys);

    let mut controller = AppController::new(shell, pipeline, config, screen);
    utsushi_ui::run_event_loop(rx, move |event| controller.handle(event))?;

    runtime.shutdown_background();
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(atty::is(atty::Stream::Stdout))
        .with_target(false)
        .init();
}

fn print_banner(hotkeys: &HotkeyConfig) {
    println!("-------------------------------------------------");
    println!("utsushi is running");
    println!("  - Press [{}] to select a screen region.", hotkeys.select);
    println!("  - Press [{}] to capture and translate it.", hotkeys.capture);
    println!("  - Press ctrl+c here to quit.");
    println!("-------------------------------------------------");
}
