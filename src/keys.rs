//! Keyboard key definitions and utilities.
//!
//! Provides key constants carrying the DOM `key` / `code` / `keyCode`
//! triple needed to dispatch synthetic keyboard events.
//!
//! # Example
//!
//! ```ignore
//! use canvas_verify::Key;
//!
//! // The journal shortcut
//! page.press(Key::Char('J')).await?;
//!
//! // Navigation keys
//! page.press(Key::Escape).await?;
//! ```

// ============================================================================
// Key Enum
// ============================================================================

/// A keyboard key that can be dispatched as a synthetic event.
///
/// [`Key::Char`] covers printable ASCII letters and digits, which is all
/// the game binds shortcuts to; the named variants cover the usual
/// navigation and control keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Enter/Return key
    Enter,
    /// Tab key
    Tab,
    /// Escape key
    Escape,
    /// Space bar
    Space,
    /// A printable ASCII letter or digit.
    Char(char),
}

impl Key {
    /// Returns the DOM `key` value for this key.
    #[must_use]
    pub fn key(&self) -> String {
        match self {
            Key::Enter => "Enter".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Space => " ".to_string(),
            Key::Char(c) => c.to_string(),
        }
    }

    /// Returns the DOM `code` value for this key.
    ///
    /// Letters map to `KeyX` regardless of case, digits to `DigitN`.
    #[must_use]
    pub fn code(&self) -> String {
        match self {
            Key::Enter => "Enter".to_string(),
            Key::Tab => "Tab".to_string(),
            Key::Escape => "Escape".to_string(),
            Key::Space => "Space".to_string(),
            Key::Char(c) if c.is_ascii_alphabetic() => {
                format!("Key{}", c.to_ascii_uppercase())
            }
            Key::Char(c) if c.is_ascii_digit() => format!("Digit{c}"),
            Key::Char(_) => "Unidentified".to_string(),
        }
    }

    /// Returns the legacy `keyCode` for this key.
    #[must_use]
    pub fn key_code(&self) -> u32 {
        match self {
            Key::Enter => 13,
            Key::Tab => 9,
            Key::Escape => 27,
            Key::Space => 32,
            Key::Char(c) => c.to_ascii_uppercase() as u32,
        }
    }

    /// Returns whether this key produces printable output.
    #[inline]
    #[must_use]
    pub fn is_printable(&self) -> bool {
        matches!(self, Key::Space | Key::Char(_))
    }

    /// Returns the text payload for the key-down event, if printable.
    ///
    /// Canvas engines read the `text` field to distinguish character input
    /// from control keys.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.is_printable().then(|| self.key())
    }
}

// ============================================================================
// Tests
// ============================================================================
