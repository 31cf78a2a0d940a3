/// Inline `display` style of an element.
///
/// `Unset` is the empty string: the element falls back to whatever the
/// stylesheet says, which for list items and rows means visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Display {
    #[default]
    Unset,
    None,
    Block,
    Flex,
}

impl Display {
    /// The CSS keyword written into the inline style.
    pub fn as_css(&self) -> &'static str {
        match self {
            Display::Unset => "",
            Display::None => "none",
            Display::Block => "block",
            Display::Flex => "flex",
        }
    }

    /// Parse an inline style value. Unknown keywords map to `Unset`.
    pub fn from_css(value: &str) -> Self {
        match value.trim() {
            "none" => Display::None,
            "block" => Display::Block,
            "flex" => Display::Flex,
            _ => Display::Unset,
        }
    }

    pub fn is_hidden(&self) -> bool {
        matches!(self, Display::None)
    }
}

impl std::fmt::Display for Display {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_css())
    }
}
