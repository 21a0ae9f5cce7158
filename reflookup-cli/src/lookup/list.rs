use crossterm::event::KeyCode;

use super::results::ResultRow;

/// Rendered result rows plus highlight and scroll state
#[derive(Debug, Clone)]
pub struct ResultList {
    rows: Vec<ResultRow>,
    selected: Option<usize>,
    scroll_offset: usize,
    scroll_off: usize, // Rows from edge before scrolling
    wrap_around: bool,
    viewport_height: Option<usize>,
}

impl Default for ResultList {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultList {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selected: None,
            scroll_offset: 0,
            scroll_off: 1,
            wrap_around: true,
            viewport_height: None,
        }
    }

    pub fn rows(&self) -> &[ResultRow] {
        &self.rows
    }

    pub fn get(&self, index: usize) -> Option<&ResultRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Replace every row. The first row becomes highlighted.
    pub fn replace(&mut self, rows: Vec<ResultRow>) {
        self.selected = if rows.is_empty() { None } else { Some(0) };
        self.rows = rows;
        self.scroll_offset = 0;
    }

    pub fn clear(&mut self) {
        self.replace(Vec::new());
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_row(&self) -> Option<&ResultRow> {
        self.selected.and_then(|idx| self.rows.get(idx))
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn viewport_height(&self) -> Option<usize> {
        self.viewport_height
    }

    /// Set the viewport height (called by the host with the actual list area height)
    pub fn set_viewport_height(&mut self, height: usize) {
        self.viewport_height = Some(height);
        self.update_scroll(height);
    }

    /// Handle a navigation key, returns true if handled
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        if self.rows.is_empty() {
            return false;
        }
        let height = self.viewport_height.unwrap_or(self.rows.len()).max(1);
        let count = self.rows.len();

        match key {
            KeyCode::Up => {
                self.selected = Some(match self.selected {
                    Some(0) if self.wrap_around => count - 1,
                    Some(sel) => sel.saturating_sub(1),
                    None => 0,
                });
            }
            KeyCode::Down => {
                self.selected = Some(match self.selected {
                    Some(sel) if sel + 1 < count => sel + 1,
                    Some(_) if self.wrap_around => 0,
                    Some(sel) => sel,
                    None => 0,
                });
            }
            KeyCode::PageUp => {
                self.selected = Some(self.selected.map_or(0, |sel| sel.saturating_sub(height)));
            }
            KeyCode::PageDown => {
                self.selected = Some(self.selected.map_or(0, |sel| (sel + height).min(count - 1)));
            }
            KeyCode::Home => self.selected = Some(0),
            KeyCode::End => self.selected = Some(count - 1),
            _ => return false,
        }

        self.update_scroll(height);
        true
    }

    /// Keep the selection visible with `scroll_off` rows of context
    fn update_scroll(&mut self, visible_height: usize) {
        if let Some(sel) = self.selected {
            let min_scroll = sel.saturating_sub(visible_height.saturating_sub(self.scroll_off + 1));
            let max_scroll = sel.saturating_sub(self.scroll_off);

            if self.scroll_offset < min_scroll {
                self.scroll_offset = min_scroll;
            } else if self.scroll_offset > max_scroll {
                self.scroll_offset = max_scroll;
            }

            let max_offset = self.rows.len().saturating_sub(visible_height);
            self.scroll_offset = self.scroll_offset.min(max_offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> Vec<ResultRow> {
        (0..n)
            .map(|i| ResultRow::new(i.to_string(), format!("C{}", i), format!("Name {}", i)))
            .collect()
    }

    #[test]
    fn test_replace_highlights_first_row() {
        let mut list = ResultList::new();
        list.replace(rows(3));
        assert_eq!(list.selected(), Some(0));

        list.replace(Vec::new());
        assert_eq!(list.selected(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_navigation_wraps() {
        let mut list = ResultList::new();
        list.replace(rows(3));

        assert!(list.handle_key(KeyCode::Up));
        assert_eq!(list.selected(), Some(2));
        assert!(list.handle_key(KeyCode::Down));
        assert_eq!(list.selected(), Some(0));
        assert!(list.handle_key(KeyCode::End));
        assert_eq!(list.selected_row().map(|r| r.code.as_str()), Some("C2"));
        assert!(!list.handle_key(KeyCode::Char('x')));
    }

    #[test]
    fn test_empty_list_ignores_navigation() {
        let mut list = ResultList::new();
        assert!(!list.handle_key(KeyCode::Down));
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_scroll_follows_selection() {
        let mut list = ResultList::new();
        list.replace(rows(20));
        list.set_viewport_height(5);

        for _ in 0..6 {
            list.handle_key(KeyCode::Down);
        }
        assert_eq!(list.selected(), Some(6));
        // Selection stays one row above the bottom edge
        assert_eq!(list.scroll_offset(), 3);

        list.handle_key(KeyCode::Home);
        assert_eq!(list.scroll_offset(), 0);
    }
}
