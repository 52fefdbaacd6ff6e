use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

/// Single-line footer listing the key bindings of the current screen.
pub(crate) struct HintBar {
    hints: Vec<(&'static str, String)>,
}

impl HintBar {
    pub(crate) fn new(hints: Vec<(&'static str, String)>) -> Self {
        Self { hints }
    }

    pub(crate) fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || self.hints.is_empty() {
            return;
        }
        let mut spans: Vec<Span> = Vec::new();
        for (i, (key, label)) in self.hints.iter().enumerate() {
            if i > 0 {
                spans.push("   ".into());
            }
            spans.push(Span::from(*key).bold());
            spans.push(" ".into());
            spans.push(Span::from(label.clone()).dim());
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
