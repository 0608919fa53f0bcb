//! Page driver seam.
//!
//! [`GamePage`] exposes exactly the primitives the runner consumes:
//! navigate, wait for a visible element, read a bounding box, dispatch a
//! mouse click, dispatch a key press, capture a screenshot. [`CdpPage`] is
//! the production implementation over the Chrome DevTools Protocol; tests
//! substitute a scripted double behind the same trait.

// ============================================================================
// Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::Page;
use chromiumoxide::cdp::browser_protocol::input::{
    DispatchKeyEventParams, DispatchKeyEventType, DispatchMouseEventParams,
    DispatchMouseEventType, MouseButton,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use tokio::time::{Instant, sleep};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::geometry::{BoundingBox, Point};
use crate::keys::Key;

// ============================================================================
// Constants
// ============================================================================

/// Interval between visibility probes while waiting for an element.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Pause between the mouse-move, press, and release events of one click.
/// Canvas engines track hover state from the move before they accept the
/// press.
const CLICK_EVENT_GAP: Duration = Duration::from_millis(50);

// ============================================================================
// GamePage Trait
// ============================================================================

/// The browser primitives the verification sequence is written against.
///
/// Every method suspends until the underlying driver reports completion.
#[async_trait]
pub trait GamePage {
    /// Navigates to the given address.
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Waits until an element matching `selector` is visible: attached,
    /// non-zero box, and not hidden via `display` or `visibility`.
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<()>;

    /// Reads the bounding box of the first element matching `selector`.
    ///
    /// Returns `None` if no such element is attached.
    async fn bounding_box(&self, selector: &str) -> Result<Option<BoundingBox>>;

    /// Dispatches a left-button mouse click at an absolute viewport point.
    async fn click(&self, point: Point) -> Result<()>;

    /// Dispatches a key-down/key-up pair for the given key.
    async fn press(&self, key: Key) -> Result<()>;

    /// Captures a viewport screenshot and returns the PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>>;
}

// ============================================================================
// CdpPage
// ============================================================================

/// Production [`GamePage`] over a Chrome DevTools Protocol page.
#[derive(Debug)]
pub struct CdpPage {
    page: Page,
}

impl CdpPage {
    /// Wraps an open CDP page.
    #[inline]
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// Probes whether an element matching `selector` is currently visible.
    async fn is_visible(&self, selector: &str) -> Result<bool> {
        let js = format!(
            r#"
            (function() {{
                const el = document.querySelector('{selector}');
                if (!el) return false;
                const style = window.getComputedStyle(el);
                if (style.display === 'none' || style.visibility === 'hidden') return false;
                const rect = el.getBoundingClientRect();
                return rect.width > 0 && rect.height > 0;
            }})()
            "#,
            selector = selector.replace('\'', "\\'"),
        );

        let result = self
            .page
            .evaluate(js)
            .await
            .map_err(|e| Error::evaluate(e.to_string()))?;

        result
            .into_value::<bool>()
            .map_err(|e| Error::evaluate(e.to_string()))
    }
}

#[async_trait]
impl GamePage for CdpPage {
    async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "navigating");
        self.page
            .goto(url)
            .await
            .map_err(|e| Error::navigation(url, e.to_string()))?;
        Ok(())
    }

    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> Result<()> {
        debug!(selector, timeout_ms = timeout.as_millis() as u64, "waiting for visible element");
        let deadline = Instant::now() + timeout;

        loop {
            if self.is_visible(selector).await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::wait_timeout(selector, timeout.as_millis() as u64));
            }
            sleep(POLL_INTERVAL).await;
        }
    }

    async fn bounding_box(&self, selector: &str) -> Result<Option<BoundingBox>> {
        let js = format!(
            r#"
            (function() {{
                const el = document.querySelector('{selector}');
                if (!el) return null;
                const rect = el.getBoundingClientRect();
                return {{ x: rect.x, y: rect.y, width: rect.width, height: rect.height }};
            }})()
            "#,
            selector = selector.replace('\'', "\\'"),
        );

        let result = self
            .page
            .evaluate(js)
            .await
            .map_err(|e| Error::evaluate(e.to_string()))?;

        result
            .into_value::<Option<BoundingBox>>()
            .map_err(|e| Error::evaluate(e.to_string()))
    }

    async fn click(&self, point: Point) -> Result<()> {
        debug!(x = point.x, y = point.y, "dispatching click");

        // Move first so the engine registers hover at the target.
        self.page
            .execute(
                DispatchMouseEventParams::builder()
                    .r#type(DispatchMouseEventType::MouseMoved)
                    .x(point.x)
                    .y(point.y)
                    .build()
                    .map_err(Error::input)?,
            )
            .await
            .map_err(|e| Error::input(format!("mouse move failed: {e}")))?;

        sleep(CLICK_EVENT_GAP).await;

        self.page
            .execute(
                DispatchMouseEventParams::builder()
                    .r#type(DispatchMouseEventType::MousePressed)
                    .x(point.x)
                    .y(point.y)
                    .button(MouseButton::Left)
                    .click_count(1)
                    .build()
                    .map_err(Error::input)?,
            )
            .await
            .map_err(|e| Error::input(format!("mouse press failed: {e}")))?;

        sleep(CLICK_EVENT_GAP).await;

        self.page
            .execute(
                DispatchMouseEventParams::builder()
                    .r#type(DispatchMouseEventType::MouseReleased)
                    .x(point.x)
                    .y(point.y)
                    .button(MouseButton::Left)
                    .click_count(1)
                    .build()
                    .map_err(Error::input)?,
            )
            .await
            .map_err(|e| Error::input(format!("mouse release failed: {e}")))?;

        Ok(())
    }

    async fn press(&self, key: Key) -> Result<()> {
        debug!(key = %key.key(), "dispatching key press");

        let key_code = i64::from(key.key_code());
        let mut down = DispatchKeyEventParams::builder()
            .r#type(DispatchKeyEventType::KeyDown)
            .key(key.key())
            .code(key.code())
            .windows_virtual_key_code(key_code)
            .native_virtual_key_code(key_code);

        // Printable keys carry a text payload so the engine sees character
        // input, not just a raw key transition.
        if let Some(text) = key.text() {
            down = down.text(text);
        }

        self.page
            .execute(down.build().map_err(Error::input)?)
            .await
            .map_err(|e| Error::input(format!("key down failed: {e}")))?;

        self.page
            .execute(
                DispatchKeyEventParams::builder()
                    .r#type(DispatchKeyEventType::KeyUp)
                    .key(key.key())
                    .code(key.code())
                    .windows_virtual_key_code(key_code)
                    .native_virtual_key_code(key_code)
                    .build()
                    .map_err(Error::input)?,
            )
            .await
            .map_err(|e| Error::input(format!("key up failed: {e}")))?;

        Ok(())
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        trace!("capturing viewport screenshot");
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(false)
                    .build(),
            )
            .await
            .map_err(|e| Error::screenshot(e.to_string()))
    }
}
