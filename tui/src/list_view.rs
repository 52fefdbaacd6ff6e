use fieldguide_core::SymptomEntry;
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::Constraint;
use ratatui::layout::Layout;
use ratatui::layout::Rect;
use ratatui::style::Stylize;
use ratatui::text::Line;
use ratatui::text::Span;
use ratatui::widgets::Paragraph;
use ratatui::widgets::Widget;

use crate::hint_bar::HintBar;
use crate::render::row_window::RowAdapter;
use crate::render::row_window::RowWindow;
use crate::state::AppState;

struct SymptomRows<'a> {
    entries: &'a [SymptomEntry],
}

impl RowAdapter for SymptomRows<'_> {
    fn row_count(&self) -> usize {
        self.entries.len()
    }

    fn row_height(&self, _index: usize, _width: u16) -> u16 {
        1
    }

    fn render_row(&self, index: usize, area: Rect, buf: &mut Buffer, selected: bool) {
        let line = Line::from(self.entries[index].display());
        let line = if selected { line.reversed() } else { line };
        Paragraph::new(line).render(area, buf);
    }
}

pub(crate) fn render(frame: &mut Frame, state: &AppState, window: &mut RowWindow) {
    let [title_area, search_area, list_area, hint_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let t = &state.catalog;
    let title = Line::from(vec![
        Span::from(t.resolve("title").to_string()).bold(),
        Span::from(format!("  [{}]", t.language())).dim(),
    ]);
    frame.render_widget(Paragraph::new(title), title_area);

    let search = Line::from(vec![
        Span::from(t.resolve("search").to_string()).dim(),
        Span::from(": "),
        Span::from(state.filter.clone()),
        Span::from("▏").dim(),
    ]);
    frame.render_widget(Paragraph::new(search), search_area);

    let entries = state.symptoms();
    let adapter = SymptomRows { entries: &entries };
    window.render(&adapter, state.list_selected, list_area, frame.buffer_mut());

    HintBar::new(vec![
        ("↑↓", "move".to_string()),
        ("⏎", "open".to_string()),
        ("esc", "quit".to_string()),
        ("^L", "language".to_string()),
    ])
    .render(hint_area, frame.buffer_mut());
}
