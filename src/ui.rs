use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};
use unicode_width::UnicodeWidthStr;

use crate::render::{DrawItem, FontSize, HAlign, StyleTag, LOGICAL_HEIGHT, LOGICAL_WIDTH};
use crate::App;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let frame = self.game.render_frame();
        for item in &frame.items {
            draw_item(item, area, buf);
        }
    }
}

/// Scales a logical 800x600 coordinate onto the terminal cell grid.
fn scale(value: f32, logical_max: f32, cells: u16) -> u16 {
    if cells == 0 {
        return 0;
    }
    let scaled = (value / logical_max * cells as f32) as u16;
    scaled.min(cells - 1)
}

fn draw_item(item: &DrawItem, area: Rect, buf: &mut Buffer) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let row = area.y + scale(item.y, LOGICAL_HEIGHT, area.height);
    let text_width = item.text.width() as u16;
    let col = match item.x {
        HAlign::Centered => area.x + area.width.saturating_sub(text_width) / 2,
        HAlign::At(x) => area.x + scale(x, LOGICAL_WIDTH, area.width),
    };

    let max_width = area.right().saturating_sub(col) as usize;
    buf.set_stringn(col, row, &item.text, max_width, style_for(item));
}

fn style_for(item: &DrawItem) -> Style {
    let style = match item.style {
        StyleTag::Title => Style::default().fg(Color::Cyan),
        StyleTag::Instruction => Style::default().fg(Color::White),
        StyleTag::Accent => Style::default().fg(Color::Magenta),
        StyleTag::Phrase => Style::default().fg(Color::LightCyan),
        StyleTag::Input => Style::default().fg(Color::Magenta),
        StyleTag::Score => Style::default().fg(Color::Blue),
        StyleTag::Overlay => Style::default().fg(Color::Magenta),
        StyleTag::Message => Style::default().fg(Color::Magenta),
        StyleTag::Win => Style::default().fg(Color::LightCyan),
        StyleTag::Lose => Style::default().fg(Color::Red),
    };

    // a cell grid cannot scale glyphs, so nominal sizes degrade to weight
    match item.size {
        FontSize::Large => style.add_modifier(Modifier::BOLD),
        FontSize::Medium => style,
        FontSize::Small => style.add_modifier(Modifier::DIM),
    }
}
