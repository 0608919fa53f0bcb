//! Run configuration for the verification sequence.
//!
//! Every value the runner consumes is a fixed constant: the target address,
//! the canvas selector, the fractional click offsets, the settle durations,
//! the journal key, and the screenshot path. The binary always runs
//! [`VerifyConfig::default()`]; the `with_*` setters exist for library
//! consumers and tests.
//!
//! # Example
//!
//! ```ignore
//! use canvas_verify::VerifyConfig;
//!
//! let config = VerifyConfig::default()
//!     .with_target_url("http://localhost:3000/")
//!     .with_viewport(1920, 1080);
//!
//! config.validate()?;
//! ```

// ============================================================================
// Imports
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::{Error, Result};
use crate::keys::Key;

// ============================================================================
// Constants
// ============================================================================

/// Address the game is served on. The runner does not start this server.
pub const TARGET_URL: &str = "http://localhost:8080/";

/// Selector for the element the game renders into.
pub const CANVAS_SELECTOR: &str = "canvas";

/// Horizontal click offset as a fraction of canvas width (the Play button).
pub const CLICK_FRACTION_X: f64 = 0.85;

/// Vertical click offset as a fraction of canvas height (the Play button).
pub const CLICK_FRACTION_Y: f64 = 0.55;

/// How long the scene transition is given to complete after the click.
pub const SCENE_SETTLE: Duration = Duration::from_millis(5000);

/// How long the journal panel is given to open after the key press.
pub const JOURNAL_SETTLE: Duration = Duration::from_millis(2000);

/// Key that opens the in-game journal.
pub const JOURNAL_KEY: Key = Key::Char('J');

/// Where the captured screenshot is written, relative to the working
/// directory. An existing file is overwritten.
pub const SCREENSHOT_PATH: &str = "screenshots/verification.png";

/// Default viewport dimensions in pixels.
pub const VIEWPORT: (u32, u32) = (1280, 720);

/// How long to wait for the canvas to become visible before giving up.
pub const WAIT_TIMEOUT: Duration = Duration::from_millis(30_000);

// ============================================================================
// VerifyConfig
// ============================================================================

/// Fixed constants for one verification run.
///
/// There is no CLI or environment surface; [`Default`] yields the values
/// the binary always runs with.
#[derive(Debug, Clone, PartialEq)]
pub struct VerifyConfig {
    /// Address to navigate to.
    pub target_url: String,

    /// Selector for the game canvas.
    pub canvas_selector: String,

    /// Fractional click offsets into the canvas bounding box.
    pub click_fraction: (f64, f64),

    /// Pause after the click, for the scene transition.
    pub scene_settle: Duration,

    /// Pause after the key press, for the journal panel.
    pub journal_settle: Duration,

    /// Key dispatched to open the journal.
    pub journal_key: Key,

    /// Output path for the captured screenshot.
    pub screenshot_path: PathBuf,

    /// Browser viewport dimensions in pixels (width, height).
    pub viewport: (u32, u32),

    /// Budget for the canvas-visibility wait.
    pub wait_timeout: Duration,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            target_url: TARGET_URL.to_string(),
            canvas_selector: CANVAS_SELECTOR.to_string(),
            click_fraction: (CLICK_FRACTION_X, CLICK_FRACTION_Y),
            scene_settle: SCENE_SETTLE,
            journal_settle: JOURNAL_SETTLE,
            journal_key: JOURNAL_KEY,
            screenshot_path: PathBuf::from(SCREENSHOT_PATH),
            viewport: VIEWPORT,
            wait_timeout: WAIT_TIMEOUT,
        }
    }
}

// ============================================================================
// Builder Methods
// ============================================================================

impl VerifyConfig {
    /// Creates a configuration with the default constants.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the target address.
    #[inline]
    #[must_use]
    pub fn with_target_url(mut self, url: impl Into<String>) -> Self {
        self.target_url = url.into();
        self
    }

    /// Sets the canvas selector.
    #[inline]
    #[must_use]
    pub fn with_canvas_selector(mut self, selector: impl Into<String>) -> Self {
        self.canvas_selector = selector.into();
        self
    }

    /// Sets the fractional click offsets.
    #[inline]
    #[must_use]
    pub fn with_click_fraction(mut self, fx: f64, fy: f64) -> Self {
        self.click_fraction = (fx, fy);
        self
    }

    /// Sets the post-click settle duration.
    #[inline]
    #[must_use]
    pub fn with_scene_settle(mut self, settle: Duration) -> Self {
        self.scene_settle = settle;
        self
    }

    /// Sets the post-keypress settle duration.
    #[inline]
    #[must_use]
    pub fn with_journal_settle(mut self, settle: Duration) -> Self {
        self.journal_settle = settle;
        self
    }

    /// Sets the journal key.
    #[inline]
    #[must_use]
    pub fn with_journal_key(mut self, key: Key) -> Self {
        self.journal_key = key;
        self
    }

    /// Sets the screenshot output path.
    #[inline]
    #[must_use]
    pub fn with_screenshot_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.screenshot_path = path.into();
        self
    }

    /// Sets viewport dimensions in pixels.
    #[inline]
    #[must_use]
    pub fn with_viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport = (width, height);
        self
    }

    /// Sets the canvas-visibility wait budget.
    #[inline]
    #[must_use]
    pub fn with_wait_timeout(mut self, timeout: Duration) -> Self {
        self.wait_timeout = timeout;
        self
    }
}

// ============================================================================
// Validation
// ============================================================================

impl VerifyConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the target address does not parse as an
    /// HTTP URL, a click fraction lies outside `[0, 1]`, the selector is
    /// empty, or the viewport has a zero dimension.
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.target_url)
            .map_err(|e| Error::config(format!("invalid target URL {}: {e}", self.target_url)))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::config(format!(
                "target URL must be http(s), got scheme {}",
                url.scheme()
            )));
        }

        if self.canvas_selector.is_empty() {
            return Err(Error::config("canvas selector must not be empty"));
        }

        let (fx, fy) = self.click_fraction;
        if !(0.0..=1.0).contains(&fx) || !(0.0..=1.0).contains(&fy) {
            return Err(Error::config(format!(
                "click fractions must lie in [0, 1], got ({fx}, {fy})"
            )));
        }

        let (width, height) = self.viewport;
        if width == 0 || height == 0 {
            return Err(Error::config("viewport dimensions must be greater than zero"));
        }

        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = VerifyConfig::default();
        assert_eq!(config.target_url, "http://localhost:8080/");
        assert_eq!(config.canvas_selector, "canvas");
        assert_eq!(config.click_fraction, (0.85, 0.55));
        assert_eq!(config.scene_settle, Duration::from_millis(5000));
        assert_eq!(config.journal_settle, Duration::from_millis(2000));
        assert_eq!(config.journal_key, Key::Char('J'));
        assert_eq!(
            config.screenshot_path,
            PathBuf::from("screenshots/verification.png")
        );
        assert_eq!(config.viewport, (1280, 720));
    }

    #[test]
    fn test_default_validates() {
        assert!(VerifyConfig::default().validate().is_ok());
    }

    #[test]
    fn test_builder_chain() {
        let config = VerifyConfig::new()
            .with_target_url("http://localhost:3000/")
            .with_viewport(1920, 1080)
            .with_click_fraction(0.5, 0.5);

        assert_eq!(config.target_url, "http://localhost:3000/");
        assert_eq!(config.viewport, (1920, 1080));
        assert_eq!(config.click_fraction, (0.5, 0.5));
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = VerifyConfig::new().with_target_url("not a url");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_http_scheme() {
        let config = VerifyConfig::new().with_target_url("ftp://localhost:8080/");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_fraction() {
        let config = VerifyConfig::new().with_click_fraction(1.5, 0.5);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_selector() {
        let config = VerifyConfig::new().with_canvas_selector("");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_viewport() {
        let config = VerifyConfig::new().with_viewport(0, 720);
        assert!(config.validate().is_err());
    }
}
