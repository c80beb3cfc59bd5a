//! Doc strings attached to steps.

use std::fmt;

/// Multi-line text block following a step, with its optional content type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocString {
    content: String,
    content_type: Option<String>,
}

impl DocString {
    /// Create a doc string without a content type.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            content_type: None,
        }
    }

    /// Attach the media type written after the opening delimiter.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Text between the delimiters.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Media type such as `json`, when one was given.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

impl AsRef<str> for DocString {
    fn as_ref(&self) -> &str {
        &self.content
    }
}

impl fmt::Display for DocString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.content)
    }
}
