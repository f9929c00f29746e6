use crate::game::GamePhase;

/// Logical drawing space the configured positions and speeds are expressed
/// in. The terminal renderer scales it to the actual area.
pub const LOGICAL_WIDTH: f32 = 800.0;
pub const LOGICAL_HEIGHT: f32 = 600.0;

/// Horizontal placement of a draw item in the logical space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HAlign {
    Centered,
    At(f32),
}

/// Semantic style tag; the renderer maps these to concrete colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleTag {
    Title,
    Instruction,
    Accent,
    Phrase,
    Input,
    Score,
    Overlay,
    Message,
    Win,
    Lose,
}

/// Nominal text size. A terminal cell grid cannot scale glyphs, so the
/// renderer degrades these to font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub text: String,
    pub x: HAlign,
    pub y: f32,
    pub style: StyleTag,
    pub size: FontSize,
}

impl DrawItem {
    pub fn centered(text: impl Into<String>, y: f32, style: StyleTag, size: FontSize) -> Self {
        Self {
            text: text.into(),
            x: HAlign::Centered,
            y,
            style,
            size,
        }
    }

    pub fn at(text: impl Into<String>, x: f32, y: f32, style: StyleTag, size: FontSize) -> Self {
        Self {
            text: text.into(),
            x: HAlign::At(x),
            y,
            style,
            size,
        }
    }
}

/// Everything the renderer needs for one tick. Assembled as a pure read of
/// the post-update state.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub phase: GamePhase,
    pub items: Vec<DrawItem>,
}

impl RenderFrame {
    pub fn contains_text(&self, needle: &str) -> bool {
        self.items.iter().any(|item| item.text.contains(needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_item() {
        let item = DrawItem::centered("PAUSED", 250.0, StyleTag::Overlay, FontSize::Large);

        assert_eq!(item.x, HAlign::Centered);
        assert_eq!(item.y, 250.0);
        assert_eq!(item.style, StyleTag::Overlay);
    }

    #[test]
    fn test_positioned_item() {
        let item = DrawItem::at("Score: 0 / 100", 10.0, 10.0, StyleTag::Score, FontSize::Medium);

        assert_eq!(item.x, HAlign::At(10.0));
        assert_eq!(item.size, FontSize::Medium);
    }

    #[test]
    fn test_contains_text() {
        let frame = RenderFrame {
            phase: GamePhase::Start,
            items: vec![DrawItem::centered(
                "typefall",
                100.0,
                StyleTag::Title,
                FontSize::Large,
            )],
        };

        assert!(frame.contains_text("typefall"));
        assert!(!frame.contains_text("PAUSED"));
    }
}
