//! Error types for the verification runner.
//!
//! This module defines all error types used throughout the crate.
//!
//! # Usage
//!
//! All fallible operations return [`Result<T>`] which uses [`Error`]:
//!
//! ```ignore
//! use canvas_verify::{Result, Error};
//!
//! async fn example(page: &impl GamePage) -> Result<()> {
//!     page.navigate("http://localhost:8080/").await?;
//!     Ok(())
//! }
//! ```
//!
//! # Error Categories
//!
//! | Category | Variants |
//! |----------|----------|
//! | Configuration | [`Error::Config`] |
//! | Browser startup | [`Error::Launch`] |
//! | Navigation | [`Error::Navigation`] |
//! | Element wait | [`Error::WaitTimeout`] |
//! | Input dispatch | [`Error::Input`] |
//! | Script evaluation | [`Error::Evaluate`] |
//! | Capture | [`Error::Screenshot`] |
//! | External | [`Error::Io`], [`Error::Cdp`] |

// ============================================================================
// Imports
// ============================================================================

use std::io::Error as IoError;
use std::result::Result as StdResult;

use thiserror::Error;

// ============================================================================
// Result Alias
// ============================================================================

/// Result type alias using crate [`enum@Error`].
///
/// All fallible operations in this crate return this type.
pub type Result<T> = StdResult<T, Error>;

// ============================================================================
// Error Enum
// ============================================================================

/// Main error type for the crate.
///
/// Each variant includes relevant context for debugging. None of these are
/// caught by the runner itself; they propagate to `main`, which exits
/// non-zero.
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// Configuration error.
    ///
    /// Returned when a run configuration value is invalid.
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },

    // ========================================================================
    // Browser Startup Errors
    // ========================================================================
    /// Failed to launch the browser process.
    ///
    /// Returned when Chromium cannot be configured or started.
    #[error("Browser launch failed: {message}")]
    Launch {
        /// Description of the launch failure.
        message: String,
    },

    // ========================================================================
    // Navigation Errors
    // ========================================================================
    /// Navigation to the target address failed.
    ///
    /// Typically a connection refusal when no server is listening.
    #[error("Navigation to {url} failed: {message}")]
    Navigation {
        /// The address that was being loaded.
        url: String,
        /// Description of the navigation failure.
        message: String,
    },

    // ========================================================================
    // Element Wait Errors
    // ========================================================================
    /// An element never became visible within the wait budget.
    #[error("Timed out after {timeout_ms}ms waiting for visible element: {selector}")]
    WaitTimeout {
        /// CSS selector that was waited on.
        selector: String,
        /// Milliseconds waited before giving up.
        timeout_ms: u64,
    },

    // ========================================================================
    // Input Errors
    // ========================================================================
    /// A synthetic mouse or keyboard event could not be dispatched.
    #[error("Input dispatch failed: {message}")]
    Input {
        /// Description of the dispatch failure.
        message: String,
    },

    // ========================================================================
    // Evaluation Errors
    // ========================================================================
    /// In-page JavaScript evaluation failed.
    #[error("Script evaluation failed: {message}")]
    Evaluate {
        /// Description of the evaluation failure.
        message: String,
    },

    // ========================================================================
    // Capture Errors
    // ========================================================================
    /// Screenshot capture failed.
    #[error("Screenshot failed: {message}")]
    Screenshot {
        /// Description of the capture failure.
        message: String,
    },

    // ========================================================================
    // External Errors
    // ========================================================================
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] IoError),

    /// Chrome DevTools Protocol error.
    #[error("CDP error: {0}")]
    Cdp(String),
}

impl From<chromiumoxide::error::CdpError> for Error {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        Self::Cdp(err.to_string())
    }
}

// ============================================================================
// Error Constructors
// ============================================================================

impl Error {
    /// Creates a configuration error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a browser launch error.
    #[inline]
    pub fn launch(message: impl Into<String>) -> Self {
        Self::Launch {
            message: message.into(),
        }
    }

    /// Creates a navigation error.
    #[inline]
    pub fn navigation(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Navigation {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates an element wait timeout error.
    #[inline]
    pub fn wait_timeout(selector: impl Into<String>, timeout_ms: u64) -> Self {
        Self::WaitTimeout {
            selector: selector.into(),
            timeout_ms,
        }
    }

    /// Creates an input dispatch error.
    #[inline]
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Creates a script evaluation error.
    #[inline]
    pub fn evaluate(message: impl Into<String>) -> Self {
        Self::Evaluate {
            message: message.into(),
        }
    }

    /// Creates a screenshot error.
    #[inline]
    pub fn screenshot(message: impl Into<String>) -> Self {
        Self::Screenshot {
            message: message.into(),
        }
    }
}

// ============================================================================
// Error Predicates
// ============================================================================

impl Error {
    /// Returns `true` if this is a wait timeout error.
    #[inline]
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::WaitTimeout { .. })
    }

    /// Returns `true` if this is a navigation error.
    #[inline]
    #[must_use]
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::Navigation { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::ErrorKind;

    #[test]
    fn test_error_display() {
        let err = Error::navigation("http://localhost:8080/", "connection refused");
        assert_eq!(
            err.to_string(),
            "Navigation to http://localhost:8080/ failed: connection refused"
        );
    }

    #[test]
    fn test_wait_timeout_display() {
        let err = Error::wait_timeout("canvas", 30_000);
        assert_eq!(
            err.to_string(),
            "Timed out after 30000ms waiting for visible element: canvas"
        );
    }

    #[test]
    fn test_is_timeout() {
        let timeout_err = Error::wait_timeout("canvas", 5000);
        let other_err = Error::launch("no browser");

        assert!(timeout_err.is_timeout());
        assert!(!other_err.is_timeout());
    }

    #[test]
    fn test_is_navigation() {
        let nav_err = Error::navigation("http://localhost:8080/", "refused");
        let other_err = Error::config("bad url");

        assert!(nav_err.is_navigation());
        assert!(!other_err.is_navigation());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = IoError::new(ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
