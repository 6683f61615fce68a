use ratatui::text::Line;

/// Either literal text or an embeddable styled line.
///
/// Placeholder, mask and label accept both forms. Literal text is drawn with
/// the widget's text styles; a node is drawn as-is and suppresses literal
/// text rendering for the cell that embeds it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Content {
    Text(String),
    Node(Line<'static>),
}

impl Content {
    pub fn text(text: impl Into<String>) -> Self {
        Content::Text(text.into())
    }

    pub fn node(line: impl Into<Line<'static>>) -> Self {
        Content::Node(line.into())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Content::Text(text) => Some(text.as_str()),
            Content::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Line<'static>> {
        match self {
            Content::Node(line) => Some(line),
            Content::Text(_) => None,
        }
    }
}

impl Default for Content {
    fn default() -> Self {
        Content::Text(String::new())
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl From<Line<'static>> for Content {
    fn from(value: Line<'static>) -> Self {
        Content::Node(value)
    }
}
