//! Delimiter set declared by a mapping document

/// Default EDIFACT separators
pub const DEFAULT_SEGMENT: &str = "'";
pub const DEFAULT_FIELD: &str = "+";
pub const DEFAULT_COMPONENT: &str = ":";
pub const DEFAULT_FIELD_REPEAT: &str = "*";
pub const DEFAULT_ESCAPE: &str = "?";

/// Separators used by messages described by a mapping document.
///
/// Values are kept as strings because grammars may declare multi-character
/// terminators (e.g. a segment terminator followed by a newline). Empty
/// values mean "not declared".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimiters {
    /// Segment terminator (default `'`)
    pub segment: String,
    /// Component separator (default `:`)
    pub component: String,
    /// Field separator (default `+`)
    pub field: String,
    /// Field repetition separator (default `*`)
    pub field_repeat: String,
    /// Escape (release) character (default `?`)
    pub escape: String,
    /// Whether CR/LF characters between segments are ignored
    pub ignore_crlf: bool,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            segment: DEFAULT_SEGMENT.to_string(),
            component: DEFAULT_COMPONENT.to_string(),
            field: DEFAULT_FIELD.to_string(),
            field_repeat: DEFAULT_FIELD_REPEAT.to_string(),
            escape: DEFAULT_ESCAPE.to_string(),
            ignore_crlf: false,
        }
    }
}

impl Delimiters {
    /// Create a delimiter set with the three mandatory separators.
    ///
    /// Field-repeat and escape characters are left undeclared.
    #[must_use]
    pub fn new(
        segment: impl Into<String>,
        component: impl Into<String>,
        field: impl Into<String>,
    ) -> Self {
        Self {
            segment: segment.into(),
            component: component.into(),
            field: field.into(),
            field_repeat: String::new(),
            escape: String::new(),
            ignore_crlf: false,
        }
    }

    #[must_use]
    pub fn with_field_repeat(mut self, field_repeat: impl Into<String>) -> Self {
        self.field_repeat = field_repeat.into();
        self
    }

    #[must_use]
    pub fn with_escape(mut self, escape: impl Into<String>) -> Self {
        self.escape = escape.into();
        self
    }

    #[must_use]
    pub fn with_ignore_crlf(mut self, ignore_crlf: bool) -> Self {
        self.ignore_crlf = ignore_crlf;
        self
    }
}
