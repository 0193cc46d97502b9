//! Details view widget - raw query result as a two-column table

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::metrics::{render_keybindings, MetricsData};
use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::{Window, NO_DATA_MESSAGE};

/// Maximum content width (consistent with Metrics view)
const MAX_CONTENT_WIDTH: u16 = 120;

/// Table width: Column(24) + Value(20) = 44
const TABLE_WIDTH: u16 = 44;

/// Rows: six windows + record count + reference time
const ROW_COUNT: u16 = 8;

/// Details view widget
pub struct DetailsView<'a> {
    data: &'a MetricsData,
    theme: Theme,
    tab: Tab,
}

impl<'a> DetailsView<'a> {
    pub fn new(data: &'a MetricsData, theme: Theme) -> Self {
        Self {
            data,
            theme,
            tab: Tab::Details,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.tab = tab;
        self
    }

    /// Table rows as (column name, value)
    fn rows(&self) -> Vec<(String, String)> {
        let snapshot = &self.data.snapshot;
        let mut rows: Vec<(String, String)> = Window::all()
            .iter()
            .map(|w| (w.column().to_string(), format!("{:.1}", snapshot.distance(*w))))
            .collect();
        rows.push(("record_count".to_string(), snapshot.record_count.to_string()));
        rows.push((
            "computed_at".to_string(),
            snapshot.computed_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ));
        rows
    }
}

impl Widget for DetailsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Apply max width constraint and center the content
        let content_width = area.width.min(MAX_CONTENT_WIDTH);
        let x_offset = (area.width.saturating_sub(content_width)) / 2;
        let centered_area = Rect {
            x: area.x + x_offset,
            y: area.y,
            width: content_width,
            height: area.height,
        };

        let note_height = if self.data.shows_fallback() { 1 } else { 0 };

        let chunks = Layout::vertical([
            Constraint::Length(1),           // Top padding
            Constraint::Length(1),           // Tabs
            Constraint::Length(1),           // Separator
            Constraint::Length(note_height), // No-data note
            Constraint::Length(1),           // Header
            Constraint::Length(ROW_COUNT),   // Rows
            Constraint::Length(1),           // Separator
            Constraint::Length(1),           // Keybindings
            Constraint::Min(0),              // Remaining space
        ])
        .split(centered_area);

        TabBar::new(self.tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);

        if self.data.shows_fallback() {
            let note = self.data.warning.as_deref().unwrap_or(NO_DATA_MESSAGE);
            Paragraph::new(Line::from(Span::styled(
                note,
                Style::default().fg(self.theme.warning()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[3], buf);
        }

        self.render_header(chunks[4], buf);
        self.render_rows(chunks[5], buf);
        self.render_separator(chunks[6], buf);
        render_keybindings(chunks[7], buf, self.theme);
    }
}

impl DetailsView<'_> {
    /// Horizontal offset to center the table
    fn table_offset(&self, area_width: u16) -> u16 {
        area_width.saturating_sub(TABLE_WIDTH) / 2
    }

    fn render_separator(&self, area: Rect, buf: &mut Buffer) {
        // Squeezed chunks sit past the buffer's last row
        if area.height == 0 {
            return;
        }
        let line = "─".repeat(area.width as usize);
        buf.set_string(
            area.x,
            area.y,
            &line,
            Style::default().fg(self.theme.muted()),
        );
    }

    fn render_header(&self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 {
            return;
        }
        let offset = self.table_offset(area.width);
        let style = Style::default()
            .fg(self.theme.text())
            .add_modifier(Modifier::BOLD);
        let header = Line::from(vec![
            Span::styled(format!("{:<24}", "Column"), style),
            Span::styled(format!("{:>20}", "Value"), style),
        ]);
        buf.set_line(
            area.x + offset,
            area.y,
            &header,
            area.width.saturating_sub(offset),
        );
    }

    fn render_rows(&self, area: Rect, buf: &mut Buffer) {
        let offset = self.table_offset(area.width);

        for (i, (column, value)) in self.rows().into_iter().enumerate() {
            let y = area.y + i as u16;
            if y >= area.y + area.height {
                break;
            }

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<24}", column),
                    Style::default().fg(self.theme.date()),
                ),
                Span::styled(
                    format!("{:>20}", value),
                    Style::default().fg(self.theme.text()),
                ),
            ]);
            buf.set_line(area.x + offset, y, &line, area.width.saturating_sub(offset));
        }
    }
}
