use serde::{Deserialize, Serialize};

/// RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Color {
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlignment {
    Left,
    Center,
    Right,
    Justify,
}

/// Presentation hints attached to a value
///
/// Spreadsheet-like sources can persist these; relational backends ignore
/// them. `Style::default()` means "no style".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub font_size: Option<u16>,
    pub foreground: Option<Color>,
    pub background: Option<Color>,
    pub alignment: Option<TextAlignment>,
}

impl Style {
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    pub fn font_size(mut self, points: u16) -> Self {
        self.font_size = Some(points);
        self
    }

    pub fn foreground(mut self, color: Color) -> Self {
        self.foreground = Some(color);
        self
    }

    pub fn background(mut self, color: Color) -> Self {
        self.background = Some(color);
        self
    }

    pub fn alignment(mut self, alignment: TextAlignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_empty() {
        assert!(Style::default().is_empty());
        assert!(!Style::default().bold().is_empty());
    }

    #[test]
    fn test_builder_accumulates() {
        let style = Style::default()
            .italic()
            .font_size(12)
            .foreground(Color::rgb(255, 0, 0))
            .alignment(TextAlignment::Right);
        assert!(style.italic);
        assert_eq!(style.font_size, Some(12));
        assert_eq!(style.foreground, Some(Color::rgb(255, 0, 0)));
        assert_eq!(style.alignment, Some(TextAlignment::Right));
    }
}
