use std::collections::HashSet;

use fieldguide_core::Catalog;
use fieldguide_core::TierStep;
use fieldguide_core::TierView;
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
use crate::state::Screen;

/// One renderable line of the detail view, derived from the engine output
/// with translations already applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum DetailLine {
    Title(String),
    Subtitle(String),
    /// Tier section header; rendered with a leading blank line.
    Section(String),
    Step {
        tier: usize,
        step: usize,
        text: String,
        checked: bool,
    },
    Missing(String),
    Locked(String),
    Prompt(String),
    Acknowledged(String),
}

/// Flatten the tier views into display lines. Pure so the layout of the
/// detail view is testable without a terminal.
pub(crate) fn build_lines(
    symptom_id: &str,
    label: Option<&str>,
    views: &[TierView],
    checked: &HashSet<(usize, usize)>,
    resolved: bool,
    catalog: &Catalog,
) -> Vec<DetailLine> {
    let mut lines = vec![DetailLine::Title(symptom_id.to_string())];
    if let Some(label) = label {
        lines.push(DetailLine::Subtitle(label.to_string()));
    }
    for (tier_index, view) in views.iter().enumerate() {
        if !view.visible {
            continue;
        }
        lines.push(DetailLine::Section(
            catalog.resolve(view.title_key).to_string(),
        ));
        if view.locked {
            lines.push(DetailLine::Locked(catalog.resolve("locked").to_string()));
        } else {
            for (step_index, step) in view.steps.iter().enumerate() {
                match step {
                    TierStep::Check(text) => lines.push(DetailLine::Step {
                        tier: tier_index,
                        step: step_index,
                        text: text.clone(),
                        checked: checked.contains(&(tier_index, step_index)),
                    }),
                    TierStep::MissingSop => lines.push(DetailLine::Missing(
                        catalog.resolve("sop_missing").to_string(),
                    )),
                }
            }
        }
        if view.offer_resolution {
            if resolved {
                lines.push(DetailLine::Acknowledged(format!(
                    "{} — {}",
                    catalog.resolve("resolved"),
                    catalog.resolve("yes"),
                )));
            } else {
                lines.push(DetailLine::Prompt(format!(
                    "{}  [y] {}   [n] {}",
                    catalog.resolve("resolved"),
                    catalog.resolve("yes"),
                    catalog.resolve("no"),
                )));
            }
        }
    }
    lines
}

struct DetailRows<'a> {
    lines: &'a [DetailLine],
}

impl RowAdapter for DetailRows<'_> {
    fn row_count(&self) -> usize {
        self.lines.len()
    }

    fn row_height(&self, index: usize, _width: u16) -> u16 {
        match self.lines[index] {
            DetailLine::Section(_) => 2,
            _ => 1,
        }
    }

    fn render_row(&self, index: usize, area: Rect, buf: &mut Buffer, selected: bool) {
        let line = match &self.lines[index] {
            DetailLine::Title(id) => Line::from(id.clone()).bold().underlined(),
            DetailLine::Subtitle(label) => Line::from(label.clone()).italic(),
            DetailLine::Section(title) => Line::from(title.clone()).bold(),
            DetailLine::Step {
                text, checked: true, ..
            } => Line::from(vec![Span::from("[x] ").bold(), Span::from(text.clone()).dim()]),
            DetailLine::Step { text, .. } => {
                Line::from(vec![Span::from("[ ] "), Span::from(text.clone())])
            }
            DetailLine::Missing(text) => Line::from(text.clone()).italic().dim(),
            DetailLine::Locked(text) => Line::from(format!("[{text}]")).dim(),
            DetailLine::Prompt(text) => Line::from(text.clone()).cyan(),
            DetailLine::Acknowledged(text) => Line::from(text.clone()).green(),
        };
        let line = if selected { line.reversed() } else { line };
        // A section row carries a leading blank; draw its text on the last
        // of its rows so clipping at the bottom keeps the text.
        let y = area.bottom().saturating_sub(1);
        let text_area = Rect::new(area.x, y, area.width, 1);
        Paragraph::new(line).render(text_area, buf);
    }
}

pub(crate) fn render(frame: &mut Frame, state: &AppState, window: &mut RowWindow) {
    let Screen::Detail { symptom_id } = &state.screen else {
        return;
    };
    let [content_area, hint_area] =
        Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(frame.area());

    let views = state.tier_views();
    let lines = build_lines(
        symptom_id,
        state.detail_label(),
        &views,
        &state.checked,
        state.resolved_acknowledged,
        &state.catalog,
    );
    let selected_target = state.check_targets().get(state.step_selected).copied();
    let selected_line = selected_line_index(&lines, selected_target).unwrap_or(0);
    let adapter = DetailRows { lines: &lines };
    window.render(&adapter, selected_line, content_area, frame.buffer_mut());

    let t = &state.catalog;
    HintBar::new(vec![
        ("space", "toggle".to_string()),
        ("y", t.resolve("yes").to_string()),
        ("n", t.resolve("no").to_string()),
        ("esc", t.resolve("back").to_string()),
        ("q", "quit".to_string()),
    ])
    .render(hint_area, frame.buffer_mut());
}

fn selected_line_index(lines: &[DetailLine], target: Option<(usize, usize)>) -> Option<usize> {
    let (tier, step) = target?;
    lines.iter().position(|line| {
        matches!(line, DetailLine::Step { tier: t, step: s, .. } if *t == tier && *s == step)
    })
}
