//! Scoped browser session.
//!
//! [`BrowserSession`] owns the Chromium process for exactly one run: launch
//! with a throwaway profile, open the page, and close. The runner's
//! acquire/release envelope guarantees [`BrowserSession::close`] is reached
//! on both the success and the error path, and the handle's drop path tears
//! the child process down if a panic gets there first.

// ============================================================================
// Imports
// ============================================================================

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::handler::viewport::Viewport;
use futures_util::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::VerifyConfig;
use crate::error::{Error, Result};
use crate::page::CdpPage;

// ============================================================================
// BrowserSession
// ============================================================================

/// Exclusively owned browser process plus its CDP event-handler task and
/// temp profile directory.
#[derive(Debug)]
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    /// Fresh per launch so no cookies or cache persist between runs.
    /// Removed from disk when the session is dropped.
    _profile_dir: TempDir,
}

impl BrowserSession {
    /// Launches a headless Chromium instance with a throwaway profile.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Launch`] if the browser cannot be configured or
    /// started.
    pub async fn launch(config: &VerifyConfig) -> Result<Self> {
        let profile_dir = TempDir::new()?;
        let (width, height) = config.viewport;

        let browser_config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(width, height)
            .viewport(Viewport {
                width,
                height,
                device_scale_factor: Some(1.0),
                ..Default::default()
            })
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-extensions")
            // The game renders into a WebGL canvas, which the old headless
            // mode cannot composite. with_head() keeps chromiumoxide from
            // adding --headless so --headless=new wins.
            .with_head()
            .arg("--headless=new")
            // Via the builder method, not .arg(), so chromiumoxide does not
            // substitute its own default profile path.
            .user_data_dir(profile_dir.path())
            .build()
            .map_err(Error::launch)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| Error::launch(e.to_string()))?;

        // Drain CDP events for the life of the session. The driver requires
        // the handler stream to be polled for any command to make progress.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler stream ended");
                    break;
                }
            }
        });

        info!("browser session launched");
        Ok(Self {
            browser,
            handler_task,
            _profile_dir: profile_dir,
        })
    }

    /// Opens a new page in this session.
    pub async fn open_page(&self) -> Result<CdpPage> {
        let page = self.browser.new_page("about:blank").await?;
        Ok(CdpPage::new(page))
    }

    /// Closes the browser and stops the event-handler task.
    ///
    /// Consumes the session so it cannot be released twice. The temp profile
    /// directory is removed when the session is dropped.
    pub async fn close(mut self) -> Result<()> {
        debug!("closing browser session");
        let result = self.browser.close().await;
        self.handler_task.abort();

        match result {
            Ok(_) => {
                info!("browser session closed");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "browser close reported an error");
                Err(e.into())
            }
        }
    }
}
