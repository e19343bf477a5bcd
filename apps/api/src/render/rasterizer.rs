//! Rasterizer: turns the HTML report into one tall bitmap.
//!
//! Default: `ChromeRasterizer` (headless Chromium via chromiumoxide, full-page PNG).
//! `AppState` holds an `Arc<dyn Rasterizer>`; tests inject an in-memory bitmap.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use image::{DynamicImage, ImageFormat};
use tracing::{debug, info, warn};

use crate::render::ExportError;

/// CSS width the report is laid out at before capture.
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1024;
const VIEWPORT_HEIGHT: u32 = 1400;
/// Time given to inline and remote images to settle after the content loads.
const SETTLE_DELAY: Duration = Duration::from_millis(500);

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, html: &str) -> Result<DynamicImage, ExportError>;
}

pub struct ChromeRasterizer {
    executable: Option<PathBuf>,
    viewport_width: u32,
}

impl ChromeRasterizer {
    pub fn new(executable: Option<PathBuf>) -> Self {
        Self {
            executable,
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, ExportError> {
        let mut builder = BrowserConfig::builder()
            .new_headless_mode()
            .window_size(self.viewport_width, VIEWPORT_HEIGHT)
            .args(vec![
                "--disable-gpu",
                "--no-sandbox",
                "--disable-dev-shm-usage",
                "--hide-scrollbars",
            ]);
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        builder.build().map_err(ExportError::Rasterize)
    }
}

#[async_trait]
impl Rasterizer for ChromeRasterizer {
    async fn rasterize(&self, html: &str) -> Result<DynamicImage, ExportError> {
        info!("Launching headless browser for report capture");
        let (mut browser, mut handler) = Browser::launch(self.browser_config()?)
            .await
            .map_err(|e| ExportError::Rasterize(format!("browser launch failed: {e}")))?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let captured = capture_full_page(&browser, html).await;

        if let Err(e) = browser.close().await {
            warn!("Failed to close headless browser: {e}");
        }
        events.abort();

        let png = captured?;
        debug!("Captured {} bytes of PNG", png.len());
        Ok(image::load_from_memory_with_format(&png, ImageFormat::Png)?)
    }
}

async fn capture_full_page(browser: &Browser, html: &str) -> Result<Vec<u8>, ExportError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| ExportError::Rasterize(format!("page creation failed: {e}")))?;

    page.set_content(html)
        .await
        .map_err(|e| ExportError::Rasterize(format!("loading report failed: {e}")))?;
    tokio::time::sleep(SETTLE_DELAY).await;

    let params = ScreenshotParams::builder()
        .format(CaptureScreenshotFormat::Png)
        .full_page(true)
        .build();
    page.screenshot(params)
        .await
        .map_err(|e| ExportError::Rasterize(format!("screenshot failed: {e}")))
}
