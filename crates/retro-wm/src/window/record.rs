//! Window identity and registration payload

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique window identifier
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    /// Wrap a caller-supplied id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Borrow the id as a string slice
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check if the id is empty (rejected by the registry)
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for WindowId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Opaque handle to a renderable icon.
///
/// The core never interprets it; the presentation layer resolves it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconHandle(String);

impl IconHandle {
    /// Create a handle from an asset key
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Asset key of the icon
    #[inline]
    pub fn key(&self) -> &str {
        &self.0
    }
}

/// Registration payload stored by the registry
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowRecord {
    /// Window id
    pub id: WindowId,
    /// Title shown on the taskbar button
    pub title: String,
    /// Icon shown next to the title
    pub icon: Option<IconHandle>,
    /// Whether the taskbar shows a button for this window
    pub has_button: bool,
}

impl WindowRecord {
    /// Create a record with a taskbar button and no icon
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: None,
            has_button: true,
        }
    }

    /// Attach an icon
    pub fn with_icon(mut self, icon: IconHandle) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Set whether the taskbar shows a button
    pub fn with_button(mut self, has_button: bool) -> Self {
        self.has_button = has_button;
        self
    }
}
