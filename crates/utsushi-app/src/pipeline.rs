use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::runtime::Handle;
use utsushi_capture::{ScreenCapturer, encode_png_base64};
use utsushi_core::UiPoster;
use utsushi_translator::VisionTranslator;
use utsushi_types::{AppEvent, PipelineResult, SelectionRect};

/// Starts capture-translate runs for a committed selection
pub trait CaptureScheduler {
    /// Returns false when the request was not started
    fn schedule(&self, rect: SelectionRect) -> bool;
}

/// Capture → encode → translate → post the result back to the UI loop.
///
/// At most one run is outstanding at a time.
pub struct CaptureTranslatePipeline {
    runtime: Handle,
    capturer: Arc<dyn ScreenCapturer>,
    translator: Arc<dyn VisionTranslator>,
    poster: UiPoster,
    busy: Arc<AtomicBool>,
}

impl CaptureTranslatePipeline {
    pub fn new(
        runtime: Handle,
        capturer: Arc<dyn ScreenCapturer>,
        translator: Arc<dyn VisionTranslator>,
        poster: UiPoster,
    ) -> Self {
        Self {
            runtime,
            capturer,
            translator,
            poster,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }
}

impl CaptureScheduler for CaptureTranslatePipeline {
    fn schedule(&self, rect: SelectionRect) -> bool {
        if self.busy.swap(true, Ordering::SeqCst) {
            tracing::info!("[PIPELINE] A capture is already in progress, ignoring request");
            return false;
        }
        let guard = BusyGuard(self.busy.clone());

        let capturer = self.capturer.clone();
        let translator = self.translator.clone();
        let poster = self.poster.clone();

        tracing::info!("[PIPELINE] Capturing {}", rect);
        self.runtime.spawn(async move {
            let guard = guard;
            let result = run(rect, capturer, translator).await;

            match &result {
                PipelineResult::Success(text) => {
                    tracing::info!("[PIPELINE] Translation received ({} chars)", text.len())
                }
                PipelineResult::ApiError { status, body } => {
                    tracing::error!("[PIPELINE] API returned {}: {}", status, body)
                }
                other => tracing::error!("[PIPELINE] {:?}", other),
            }

            // Free the pipeline before the UI can react to the result
            drop(guard);
            poster.post(AppEvent::TranslationReady(result));
        });

        true
    }
}

/// Clears the busy flag when the run ends, including by panic
struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

async fn run(
    rect: SelectionRect,
    capturer: Arc<dyn ScreenCapturer>,
    translator: Arc<dyn VisionTranslator>,
) -> PipelineResult {
    let encoded = tokio::task::spawn_blocking(move || {
        let image = capturer
            .capture(rect)
            .map_err(|e| PipelineResult::CaptureError(e.to_string()))?;
        encode_png_base64(&image).map_err(|e| PipelineResult::EncodeError(e.to_string()))
    })
    .await;

    let png_base64 = match encoded {
        Ok(Ok(data)) => data,
        Ok(Err(result)) => return result,
        Err(e) => return PipelineResult::CaptureError(format!("capture worker failed: {}", e)),
    };
    tracing::debug!("[PIPELINE] Encoded {} base64 bytes", png_base64.len());

    match translator.translate_image(&png_base64).await {
        Ok(text) => PipelineResult::Success(text),
        Err(e) => e.into(),
    }
}
