//! Canvas Verify - Headless browser verification runner.
//!
//! This library drives a headless Chromium instance through a fixed
//! interaction sequence against a locally served canvas game and captures
//! one screenshot for manual visual inspection.
//!
//! # Sequence
//!
//! The runner performs one linear pass with a single conditional branch:
//!
//! 1. Navigate to the local game address
//! 2. Wait for the `canvas` element to become visible
//! 3. Read the canvas bounding box; if available and non-empty, click at
//!    85% of its width and 55% of its height (the Play button)
//! 4. Blind-wait 5000 ms for the scene transition
//! 5. Press "J" to open the in-game journal
//! 6. Blind-wait 2000 ms for the journal panel
//! 7. Capture a viewport screenshot to `screenshots/verification.png`
//!
//! The browser session is released on every exit path; step errors
//! propagate uncaught to the caller.
//!
//! # Quick Start
//!
//! ```no_run
//! use canvas_verify::{Result, VerificationRunner, VerifyConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let runner = VerificationRunner::new(VerifyConfig::default());
//!     runner.execute().await
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Fixed run constants as [`VerifyConfig`] |
//! | [`error`] | Error types and [`Result`] alias |
//! | [`geometry`] | [`Point`], [`BoundingBox`], click-point math |
//! | [`keys`] | Typed keyboard keys for synthetic events |
//! | [`page`] | [`GamePage`] driver seam and the CDP implementation |
//! | [`runner`] | The fixed sequence and its acquire/release envelope |
//! | [`session`] | Scoped browser-process ownership |

// ============================================================================
// Modules
// ============================================================================

/// Fixed run constants.
///
/// All values the runner consumes, with [`VerifyConfig::default()`] being
/// what the binary always runs.
pub mod config;

/// Error types and result aliases.
///
/// All fallible operations return [`Result<T>`] which uses [`Error`].
pub mod error;

/// Viewport geometry for click targeting.
pub mod geometry;

/// Keyboard key definitions.
pub mod keys;

/// Page driver seam: the [`GamePage`] trait and [`CdpPage`].
pub mod page;

/// The verification sequence.
pub mod runner;

/// Scoped browser session.
pub mod session;

// ============================================================================
// Re-exports
// ============================================================================

// Configuration
pub use config::VerifyConfig;

// Error types
pub use error::{Error, Result};

// Geometry
pub use geometry::{BoundingBox, Point};

// Keys
pub use keys::Key;

// Driver seam
pub use page::{CdpPage, GamePage};

// Runner and session
pub use runner::VerificationRunner;
pub use session::BrowserSession;
