//! Terminal rendering of the lookup modal
//!
//! `render_modal` draws the open modal over a dimmed overlay and reports where
//! everything landed, so the host can map pointer clicks back to messages.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};
use unicode_width::UnicodeWidthStr;

use crate::lookup::{LookupWidget, Msg};

/// Screen areas of the rendered modal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalLayout {
    pub dialog: Rect,
    pub search: Rect,
    pub list: Rect,
    /// Result row index -> the line it occupies
    pub rows: Vec<(usize, Rect)>,
}

impl ModalLayout {
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        let position = Position::new(column, row);
        self.rows
            .iter()
            .find(|(_, area)| area.contains(position))
            .map(|(index, _)| *index)
    }

    /// Map a left click to the widget message it stands for
    pub fn click(&self, column: u16, row: u16) -> Option<Msg> {
        if let Some(index) = self.row_at(column, row) {
            return Some(Msg::RowClicked(index));
        }
        if self.dialog.contains(Position::new(column, row)) {
            None
        } else {
            Some(Msg::OverlayClicked)
        }
    }
}

/// Draw the modal when it is open. Returns `None` while closed.
pub fn render_modal(frame: &mut Frame, area: Rect, widget: &LookupWidget) -> Option<ModalLayout> {
    if !widget.is_open() {
        return None;
    }

    // Overlay
    frame.render_widget(
        Block::default().style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)),
        area,
    );

    let dialog_width = 64.min(area.width.saturating_sub(4));
    let dialog_height = 18.min(area.height.saturating_sub(2));
    let dialog = centered_rect(dialog_width, dialog_height, area);
    frame.render_widget(Clear, dialog);

    let title = widget
        .session()
        .map(|s| format!(" Lookup {} ", s.url))
        .unwrap_or_else(|| " Lookup ".to_string());
    let block = Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search input
            Constraint::Min(1),    // Result rows
            Constraint::Length(1), // Help
        ])
        .split(inner);

    let search = render_search(frame, chunks[0], widget);
    let rows = render_rows(frame, chunks[1], widget);

    let help = Line::from(vec![
        Span::styled("Enter", Style::default().fg(Color::Yellow)),
        Span::raw(": select  "),
        Span::styled("↑↓", Style::default().fg(Color::Yellow)),
        Span::raw(": navigate  "),
        Span::styled("Esc", Style::default().fg(Color::Red)),
        Span::raw(": cancel"),
    ]);
    frame.render_widget(Paragraph::new(help).alignment(Alignment::Center), chunks[2]);

    Some(ModalLayout {
        dialog,
        search,
        list: chunks[1],
        rows,
    })
}

fn render_search(frame: &mut Frame, area: Rect, widget: &LookupWidget) -> Rect {
    let input = widget.search();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Code ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let style = if input.selected_all && !input.value.is_empty() {
        Style::default().fg(Color::Black).bg(Color::White)
    } else {
        Style::default().fg(Color::White)
    };
    frame.render_widget(Paragraph::new(input.value.as_str()).style(style), inner);

    let cursor = (input.value.width() as u16).min(inner.width.saturating_sub(1));
    frame.set_cursor_position(Position::new(inner.x + cursor, inner.y));
    inner
}

fn render_rows(frame: &mut Frame, area: Rect, widget: &LookupWidget) -> Vec<(usize, Rect)> {
    let results = widget.results();
    if results.is_empty() {
        let empty = Paragraph::new("No results")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return Vec::new();
    }

    let offset = results.scroll_offset();
    let selected = results.selected();
    let mut hits = Vec::new();

    for (line, (index, row)) in results
        .rows()
        .iter()
        .enumerate()
        .skip(offset)
        .take(area.height as usize)
        .enumerate()
    {
        let row_area = Rect::new(area.x, area.y + line as u16, area.width, 1);
        let (marker, style) = if selected == Some(index) {
            (
                "> ",
                Style::default()
                    .fg(Color::White)
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("  ", Style::default().fg(Color::White))
        };
        let text = Line::from(vec![Span::raw(marker), Span::raw(row.label.as_str())]).style(style);
        frame.render_widget(Paragraph::new(text), row_area);
        hits.push((index, row_area));
    }

    hits
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LookupConfig;
    use crate::lookup::{Command, FetchStrategy, ResultRow};
    use crate::page::{ATTR_LOOKUP_URL, Element, Page};
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn open_widget(rows: Vec<ResultRow>) -> (LookupWidget, Page) {
        let mut page = Page::new();
        let group = page.add_group();
        let control = page.insert_into(group, Element::open_control("/api/postcodes"));
        page.insert_into(
            group,
            Element::text_input("postcode_code")
                .with_value("30")
                .with_attr(ATTR_LOOKUP_URL, "/api/postcodes"),
        );
        page.insert_into(group, Element::hidden_input("postcode"));

        let mut widget = LookupWidget::new(LookupConfig::default(), FetchStrategy::Direct);
        let Command::Fetch(request) = widget.update(&mut page, Msg::OpenControlActivated(control)) else {
            panic!("expected the initial fetch");
        };
        widget.update(&mut page, Msg::ResultsLoaded { token: request.token, rows });
        (widget, page)
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let area = buffer.area;
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_closed_modal_draws_nothing() {
        let widget = LookupWidget::new(LookupConfig::default(), FetchStrategy::Direct);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = Some(ModalLayout::default());

        terminal
            .draw(|frame| layout = render_modal(frame, frame.area(), &widget))
            .unwrap();

        assert!(layout.is_none());
        assert!(buffer_text(terminal.backend().buffer()).trim().is_empty());
    }

    #[test]
    fn test_open_modal_shows_search_and_rows() {
        let (widget, _page) = open_widget(vec![
            ResultRow::new("1", "3000", "Rotterdam"),
            ResultRow::new("2", "3001", "Rotterdam-Noord"),
        ]);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = None;

        terminal
            .draw(|frame| layout = render_modal(frame, frame.area(), &widget))
            .unwrap();

        let layout = layout.unwrap();
        let text = buffer_text(terminal.backend().buffer());
        assert!(text.contains("Lookup /api/postcodes"));
        assert!(text.contains("> 3000 — Rotterdam"));
        assert!(text.contains("  3001 — Rotterdam-Noord"));
        assert_eq!(layout.rows.len(), 2);
        assert!(layout.search.y < layout.list.y);
    }

    #[test]
    fn test_clicks_map_to_messages() {
        let (widget, _page) = open_widget(vec![
            ResultRow::new("1", "3000", "Rotterdam"),
            ResultRow::new("2", "3001", "Rotterdam-Noord"),
        ]);
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = None;
        terminal
            .draw(|frame| layout = render_modal(frame, frame.area(), &widget))
            .unwrap();
        let layout = layout.unwrap();

        let (_, second) = layout.rows[1];
        assert_eq!(layout.click(second.x + 3, second.y), Some(Msg::RowClicked(1)));
        assert_eq!(layout.click(0, 0), Some(Msg::OverlayClicked));
        assert_eq!(layout.click(layout.search.x, layout.search.y), None);
    }

    #[test]
    fn test_empty_results_message() {
        let (widget, _page) = open_widget(Vec::new());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut layout = None;
        terminal
            .draw(|frame| layout = render_modal(frame, frame.area(), &widget))
            .unwrap();

        assert!(layout.unwrap().rows.is_empty());
        assert!(buffer_text(terminal.backend().buffer()).contains("No results"));
    }
}
