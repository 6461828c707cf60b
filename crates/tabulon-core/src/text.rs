//! Positioned glyphs and script direction classification.

use crate::geometry::Rect;

/// Reading direction of a glyph, chunk, or line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Left-to-right (default).
    #[default]
    Ltr,
    /// Right-to-left (Arabic, Hebrew, Syriac, Thaana, N'Ko).
    Rtl,
}

/// Returns `true` for characters from right-to-left Unicode blocks:
/// Hebrew, Arabic, Syriac, Arabic Supplement, Thaana, N'Ko, and the
/// Hebrew/Arabic presentation forms.
pub fn is_rtl(c: char) -> bool {
    matches!(c,
        '\u{0590}'..='\u{05FF}'   // Hebrew
        | '\u{0600}'..='\u{06FF}' // Arabic
        | '\u{0700}'..='\u{074F}' // Syriac
        | '\u{0750}'..='\u{077F}' // Arabic Supplement
        | '\u{0780}'..='\u{07BF}' // Thaana
        | '\u{07C0}'..='\u{07FF}' // N'Ko
        | '\u{FB1D}'..='\u{FB4F}' // Hebrew presentation forms
        | '\u{FB50}'..='\u{FDFF}' // Arabic presentation forms A
        | '\u{FE70}'..='\u{FEFF}' // Arabic presentation forms B
    )
}

/// Direction of a text fragment: RTL if its first character is RTL.
pub fn direction_of(text: &str) -> Direction {
    if text.chars().next().is_some_and(is_rtl) {
        Direction::Rtl
    } else {
        Direction::Ltr
    }
}

/// A single positioned character on a page.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextElement {
    /// Bounding box in top-left page coordinates.
    pub rect: Rect,
    /// The character's text content.
    pub text: String,
    /// Font name as reported by the PDF.
    pub font_name: String,
    /// Font size in points.
    pub font_size: f64,
    /// Width of the font's space glyph at the current size.
    pub width_of_space: f64,
    /// Script direction, derived from Unicode block membership.
    pub direction: Direction,
}

impl TextElement {
    pub fn new(
        rect: Rect,
        text: impl Into<String>,
        font_name: impl Into<String>,
        font_size: f64,
        width_of_space: f64,
    ) -> Self {
        let text = text.into();
        let direction = direction_of(&text);
        Self {
            rect,
            text,
            font_name: font_name.into(),
            font_size,
            width_of_space,
            direction,
        }
    }

    pub fn top(&self) -> f64 {
        self.rect.top
    }

    pub fn left(&self) -> f64 {
        self.rect.left
    }

    pub fn bottom(&self) -> f64 {
        self.rect.bottom()
    }

    pub fn right(&self) -> f64 {
        self.rect.right()
    }

    pub fn width(&self) -> f64 {
        self.rect.width
    }

    pub fn height(&self) -> f64 {
        self.rect.height
    }

    /// Whether the element consists entirely of whitespace.
    pub fn is_whitespace(&self) -> bool {
        !self.text.is_empty() && self.text.chars().all(char::is_whitespace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn element(text: &str) -> TextElement {
        TextElement::new(Rect::new(0.0, 0.0, 5.0, 10.0), text, "Helvetica", 10.0, 2.5)
    }

    #[test]
    fn test_latin_is_ltr() {
        assert!(!is_rtl('A'));
        assert!(!is_rtl('z'));
        assert!(!is_rtl('0'));
        assert_eq!(element("A").direction, Direction::Ltr);
    }

    #[test]
    fn test_arabic_is_rtl() {
        assert!(is_rtl('\u{0623}')); // أ
        assert!(is_rtl('\u{0644}')); // ل
        assert_eq!(element("\u{0623}").direction, Direction::Rtl);
    }

    #[test]
    fn test_hebrew_is_rtl() {
        assert!(is_rtl('\u{05D0}')); // א
        assert_eq!(element("\u{05D0}").direction, Direction::Rtl);
    }

    #[test]
    fn test_syriac_thaana_nko_are_rtl() {
        assert!(is_rtl('\u{0710}'));
        assert!(is_rtl('\u{0780}'));
        assert!(is_rtl('\u{07C1}'));
    }

    #[test]
    fn test_presentation_forms_are_rtl() {
        assert!(is_rtl('\u{FB2A}')); // Hebrew presentation
        assert!(is_rtl('\u{FB51}')); // Arabic presentation A
        assert!(is_rtl('\u{FE71}')); // Arabic presentation B
    }

    #[test]
    fn test_direction_of_empty_is_ltr() {
        assert_eq!(direction_of(""), Direction::Ltr);
    }

    #[test]
    fn test_delegated_edges() {
        let el = TextElement::new(
            Rect::new(10.0, 20.0, 6.0, 12.0),
            "x",
            "Helvetica",
            12.0,
            3.0,
        );
        assert_eq!(el.top(), 10.0);
        assert_eq!(el.left(), 20.0);
        assert_eq!(el.bottom(), 22.0);
        assert_eq!(el.right(), 26.0);
        assert_eq!(el.width(), 6.0);
        assert_eq!(el.height(), 12.0);
    }

    #[test]
    fn test_is_whitespace() {
        assert!(element(" ").is_whitespace());
        assert!(element("\t").is_whitespace());
        assert!(!element("a").is_whitespace());
        assert!(!element("").is_whitespace());
    }
}
