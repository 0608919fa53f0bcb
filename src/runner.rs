//! The verification sequence.
//!
//! [`VerificationRunner`] executes a fixed linear sequence against the game
//! page: navigate, wait for the canvas, click the Play button at a
//! fractional offset into the canvas box, blind-wait for the scene
//! transition, press the journal key, blind-wait for the panel, capture a
//! screenshot. One conditional branch exists: the click is skipped when the
//! canvas bounding box is unavailable or zero-sized.
//!
//! Step errors are not caught or classified here; they propagate to the
//! caller. The only error-safety measure is the acquire/release envelope in
//! [`VerificationRunner::execute`], which closes the browser session on
//! every exit path.

// ============================================================================
// Imports
// ============================================================================

use tokio::time::sleep;
use tracing::info;

use crate::config::VerifyConfig;
use crate::error::Result;
use crate::page::GamePage;
use crate::session::BrowserSession;

// ============================================================================
// VerificationRunner
// ============================================================================

/// Drives one verification run against the game.
#[derive(Debug, Clone)]
pub struct VerificationRunner {
    config: VerifyConfig,
}

impl VerificationRunner {
    /// Creates a runner for the given configuration.
    #[inline]
    #[must_use]
    pub fn new(config: VerifyConfig) -> Self {
        Self { config }
    }

    /// Returns the run configuration.
    #[inline]
    #[must_use]
    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Acquires a browser session, runs the sequence, and releases the
    /// session on both the success and the error path.
    ///
    /// # Errors
    ///
    /// Propagates the first step error; a step error takes precedence over
    /// a close error in the returned result.
    pub async fn execute(&self) -> Result<()> {
        self.config.validate()?;

        let session = BrowserSession::launch(&self.config).await?;
        let result = match session.open_page().await {
            Ok(page) => self.run(&page).await,
            Err(e) => Err(e),
        };
        let closed = session.close().await;
        result.and(closed)
    }

    /// Runs the fixed interaction sequence against an open page.
    pub async fn run<P: GamePage>(&self, page: &P) -> Result<()> {
        page.navigate(&self.config.target_url).await?;

        page.wait_for_visible(&self.config.canvas_selector, self.config.wait_timeout)
            .await?;

        match page.bounding_box(&self.config.canvas_selector).await? {
            Some(bounds) if !bounds.is_empty() => {
                let (fx, fy) = self.config.click_fraction;
                let point = bounds.point_at(fx, fy);
                info!(x = point.x, y = point.y, "clicking Play button");
                page.click(point).await?;
            }
            _ => {
                info!("canvas bounding box unavailable, skipping click");
            }
        }

        info!(
            ms = self.config.scene_settle.as_millis() as u64,
            "waiting for scene transition"
        );
        sleep(self.config.scene_settle).await;

        info!(key = %self.config.journal_key.key(), "opening journal");
        page.press(self.config.journal_key).await?;

        info!(
            ms = self.config.journal_settle.as_millis() as u64,
            "waiting for journal panel"
        );
        sleep(self.config.journal_settle).await;

        let png = page.screenshot().await?;
        self.write_screenshot(&png).await?;

        Ok(())
    }

    /// Writes the captured PNG to the configured path, overwriting any
    /// existing file. The parent directory is created if missing.
    async fn write_screenshot(&self, png: &[u8]) -> Result<()> {
        let path = &self.config.screenshot_path;
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, png).await?;
        info!(path = %path.display(), bytes = png.len(), "screenshot written");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tempfile::TempDir;
    use tokio::time::Instant;

    use crate::error::Error;
    use crate::geometry::{BoundingBox, Point};
    use crate::keys::Key;

    /// One recorded primitive invocation.
    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Navigate(String),
        WaitForVisible(String),
        BoundingBox(String),
        Click(Point),
        Press(Key),
        Screenshot,
    }

    /// Scripted page double: records the primitive call sequence and fails
    /// or answers according to its knobs.
    #[derive(Default)]
    struct ScriptedPage {
        calls: Mutex<Vec<Call>>,
        fail_navigate: bool,
        fail_wait: bool,
        bounds: Option<BoundingBox>,
        screenshot_bytes: Vec<u8>,
        pressed_at: Mutex<Option<Instant>>,
        screenshot_at: Mutex<Option<Instant>>,
    }

    impl ScriptedPage {
        fn with_bounds(bounds: BoundingBox) -> Self {
            Self {
                bounds: Some(bounds),
                screenshot_bytes: b"png".to_vec(),
                ..Default::default()
            }
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl GamePage for ScriptedPage {
        async fn navigate(&self, url: &str) -> Result<()> {
            self.record(Call::Navigate(url.to_string()));
            if self.fail_navigate {
                return Err(Error::navigation(url, "connection refused"));
            }
            Ok(())
        }

        async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
            self.record(Call::WaitForVisible(selector.to_string()));
            if self.fail_wait {
                return Err(Error::wait_timeout(selector, timeout.as_millis() as u64));
            }
            Ok(())
        }

        async fn bounding_box(&self, selector: &str) -> Result<Option<BoundingBox>> {
            self.record(Call::BoundingBox(selector.to_string()));
            Ok(self.bounds)
        }

        async fn click(&self, point: Point) -> Result<()> {
            self.record(Call::Click(point));
            Ok(())
        }

        async fn press(&self, key: Key) -> Result<()> {
            self.record(Call::Press(key));
            *self.pressed_at.lock().unwrap() = Some(Instant::now());
            Ok(())
        }

        async fn screenshot(&self) -> Result<Vec<u8>> {
            self.record(Call::Screenshot);
            *self.screenshot_at.lock().unwrap() = Some(Instant::now());
            Ok(self.screenshot_bytes.clone())
        }
    }

    /// Default constants, with the screenshot redirected into a temp dir.
    fn test_config(dir: &TempDir) -> VerifyConfig {
        VerifyConfig::default().with_screenshot_path(dir.path().join("verification.png"))
    }

    #[tokio::test]
    async fn test_navigation_failure_stops_sequence() {
        let dir = TempDir::new().unwrap();
        let page = ScriptedPage {
            fail_navigate: true,
            ..Default::default()
        };
        let runner = VerificationRunner::new(test_config(&dir));

        let err = runner.run(&page).await.unwrap_err();
        assert!(err.is_navigation());
        assert_eq!(
            page.calls(),
            vec![Call::Navigate("http://localhost:8080/".to_string())]
        );
    }

    #[tokio::test]
    async fn test_wait_timeout_skips_click() {
        let dir = TempDir::new().unwrap();
        let page = ScriptedPage {
            fail_wait: true,
            ..Default::default()
        };
        let runner = VerificationRunner::new(test_config(&dir));

        let err = runner.run(&page).await.unwrap_err();
        assert!(err.is_timeout());
        assert_eq!(
            page.calls(),
            vec![
                Call::Navigate("http://localhost:8080/".to_string()),
                Call::WaitForVisible("canvas".to_string()),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_click_point_from_bounds() {
        let dir = TempDir::new().unwrap();
        let page = ScriptedPage::with_bounds(BoundingBox::new(10.0, 20.0, 100.0, 200.0));
        let runner = VerificationRunner::new(test_config(&dir));

        runner.run(&page).await.unwrap();

        assert!(
            page.calls()
                .contains(&Call::Click(Point::new(95.0, 130.0)))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_bounds_skips_click() {
        let dir = TempDir::new().unwrap();
        let page = ScriptedPage {
            bounds: None,
            ..Default::default()
        };
        let runner = VerificationRunner::new(test_config(&dir));

        runner.run(&page).await.unwrap();

        let calls = page.calls();
        assert!(!calls.iter().any(|c| matches!(c, Call::Click(_))));
        assert!(calls.contains(&Call::Press(Key::Char('J'))));
        assert!(calls.contains(&Call::Screenshot));
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_sized_bounds_skips_click() {
        let dir = TempDir::new().unwrap();
        let page = ScriptedPage {
            bounds: Some(BoundingBox::new(0.0, 0.0, 0.0, 0.0)),
            ..Default::default()
        };
        let runner = VerificationRunner::new(test_config(&dir));

        runner.run(&page).await.unwrap();
        assert!(!page.calls().iter().any(|c| matches!(c, Call::Click(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_happy_path_sequence_and_pauses() {
        let dir = TempDir::new().unwrap();
        let page = ScriptedPage::with_bounds(BoundingBox::new(0.0, 0.0, 1280.0, 720.0));
        let runner = VerificationRunner::new(test_config(&dir));

        let start = Instant::now();
        runner.run(&page).await.unwrap();

        assert_eq!(
            page.calls(),
            vec![
                Call::Navigate("http://localhost:8080/".to_string()),
                Call::WaitForVisible("canvas".to_string()),
                Call::BoundingBox("canvas".to_string()),
                Call::Click(Point::new(1088.0, 396.0)),
                Call::Press(Key::Char('J')),
                Call::Screenshot,
            ]
        );

        // 5000 ms before the key press, 2000 ms more before the capture.
        let pressed_at = page.pressed_at.lock().unwrap().unwrap();
        let screenshot_at = page.screenshot_at.lock().unwrap().unwrap();
        assert_eq!(pressed_at - start, Duration::from_millis(5000));
        assert_eq!(screenshot_at - start, Duration::from_millis(7000));

        assert!(runner.config().screenshot_path.exists());
    }

    #[tokio::test]
    async fn test_second_run_overwrites_screenshot() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir)
            .with_scene_settle(Duration::ZERO)
            .with_journal_settle(Duration::ZERO);
        let runner = VerificationRunner::new(config);

        let first = ScriptedPage {
            bounds: Some(BoundingBox::new(0.0, 0.0, 100.0, 100.0)),
            screenshot_bytes: b"first".to_vec(),
            ..Default::default()
        };
        let second = ScriptedPage {
            bounds: Some(BoundingBox::new(0.0, 0.0, 100.0, 100.0)),
            screenshot_bytes: b"second".to_vec(),
            ..Default::default()
        };

        runner.run(&first).await.unwrap();
        runner.run(&second).await.unwrap();

        assert_eq!(first.calls(), second.calls());
        let written = std::fs::read(&runner.config().screenshot_path).unwrap();
        assert_eq!(written, b"second");
    }
}
