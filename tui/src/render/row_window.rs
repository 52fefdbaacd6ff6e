use ratatui::buffer::Buffer;
use ratatui::layout::Rect;

/// Source of rows for a windowed list. Rows may span more than one terminal
/// line (detail section titles carry a leading blank).
pub(crate) trait RowAdapter {
    fn row_count(&self) -> usize;
    fn row_height(&self, index: usize, width: u16) -> u16;
    fn render_row(&self, index: usize, area: Rect, buf: &mut Buffer, selected: bool);
}

/// Scroll window over a [`RowAdapter`], keeping the selected row visible.
#[derive(Default)]
pub(crate) struct RowWindow {
    top: usize,
}

impl RowWindow {
    pub(crate) fn ensure_visible<A: RowAdapter>(
        &mut self,
        adapter: &A,
        selected: usize,
        area: Rect,
    ) {
        if area.height == 0 || adapter.row_count() == 0 {
            self.top = 0;
            return;
        }
        let max_index = adapter.row_count() - 1;
        let selected = selected.min(max_index);
        self.top = self.top.min(max_index);
        if selected < self.top {
            self.top = selected;
        }
        // Scroll down just far enough for the selected row to fit.
        while self.top < selected && !self.fits(adapter, selected, area) {
            self.top += 1;
        }
    }

    pub(crate) fn render<A: RowAdapter>(
        &mut self,
        adapter: &A,
        selected: usize,
        area: Rect,
        buf: &mut Buffer,
    ) {
        self.ensure_visible(adapter, selected, area);
        let mut y = area.y;
        let mut index = self.top;
        while index < adapter.row_count() && y < area.bottom() {
            let height = adapter.row_height(index, area.width).max(1);
            let draw_height = height.min(area.bottom().saturating_sub(y));
            let rect = Rect::new(area.x, y, area.width, draw_height);
            adapter.render_row(index, rect, buf, index == selected);
            y = y.saturating_add(draw_height);
            index += 1;
        }
    }

    /// Whether rows `top..=target` fit in the window at once.
    fn fits<A: RowAdapter>(&self, adapter: &A, target: usize, area: Rect) -> bool {
        let mut used = 0u16;
        for index in self.top..=target {
            used = used.saturating_add(adapter.row_height(index, area.width).max(1));
        }
        used <= area.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedRows(Vec<u16>);

    impl RowAdapter for FixedRows {
        fn row_count(&self) -> usize {
            self.0.len()
        }

        fn row_height(&self, index: usize, _width: u16) -> u16 {
            self.0[index]
        }

        fn render_row(&self, _index: usize, _area: Rect, _buf: &mut Buffer, _selected: bool) {}
    }

    #[test]
    fn selected_row_stays_visible() {
        let adapter = FixedRows(vec![1, 1, 1, 1, 1]);
        let mut window = RowWindow::default();
        let area = Rect::new(0, 0, 10, 3);
        window.ensure_visible(&adapter, 4, area);
        assert_eq!(window.top, 2);
        window.ensure_visible(&adapter, 0, area);
        assert_eq!(window.top, 0);
    }

    #[test]
    fn tall_rows_shrink_the_window() {
        let adapter = FixedRows(vec![2, 2, 2]);
        let mut window = RowWindow::default();
        let area = Rect::new(0, 0, 10, 4);
        window.ensure_visible(&adapter, 2, area);
        assert_eq!(window.top, 1);
    }

    #[test]
    fn empty_adapter_resets_to_top() {
        let adapter = FixedRows(Vec::new());
        let mut window = RowWindow { top: 7 };
        window.ensure_visible(&adapter, 0, Rect::new(0, 0, 10, 3));
        assert_eq!(window.top, 0);
    }
}
