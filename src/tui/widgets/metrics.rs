//! Metrics view widget - displays the six distance totals in a card grid

use chrono::NaiveDateTime;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use super::tabs::{Tab, TabBar};
use crate::tui::theme::Theme;
use crate::types::{MetricsSnapshot, Result, Window, NO_DATA_MESSAGE};

/// Dashboard title
pub const TITLE: &str = "Roadbook: Activities";

/// Maximum content width (keeps layout clean on wide terminals)
const MAX_CONTENT_WIDTH: u16 = 120;

/// Card dimensions
const CARD_WIDTH: u16 = 24;
const CARD_HEIGHT: u16 = 5;

/// Fixed number of columns for the 2x3 grid
const FIXED_COLS: usize = 3;

/// Calculate number of cards per row based on available width (max 3)
fn cards_per_row(width: u16) -> usize {
    let usable_width = width.saturating_sub(4); // padding
    let cards = (usable_width / (CARD_WIDTH + 2)) as usize; // +2 for spacing
    cards.clamp(1, FIXED_COLS)
}

/// Result of one load: the snapshot plus a warning when loading failed
#[derive(Debug, Clone)]
pub struct MetricsData {
    pub snapshot: MetricsSnapshot,
    pub warning: Option<String>,
}

impl MetricsData {
    /// A failed load becomes a warning over a zeroed snapshot taken at `now`
    pub fn from_result(result: Result<MetricsSnapshot>, now: NaiveDateTime) -> Self {
        match result {
            Ok(snapshot) => Self {
                snapshot,
                warning: None,
            },
            Err(e) => Self {
                snapshot: MetricsSnapshot::empty(now),
                warning: Some(format!("Could not load activity data: {}", e)),
            },
        }
    }

    /// Whether the fallback message replaces the numbers
    pub fn shows_fallback(&self) -> bool {
        !self.snapshot.has_data()
    }
}

/// Metrics view widget
pub struct MetricsView<'a> {
    data: &'a MetricsData,
    selected_tab: Tab,
    theme: Theme,
}

impl<'a> MetricsView<'a> {
    pub fn new(data: &'a MetricsData, theme: Theme) -> Self {
        Self {
            data,
            selected_tab: Tab::Metrics,
            theme,
        }
    }

    pub fn with_tab(mut self, tab: Tab) -> Self {
        self.selected_tab = tab;
        self
    }
}

impl Widget for MetricsView<'_> {
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

        let cols = cards_per_row(centered_area.width);
        let body_height = if self.data.shows_fallback() {
            1
        } else {
            let rows = Window::all().len().div_ceil(cols);
            (rows as u16) * (CARD_HEIGHT + 1) // +1 for spacing
        };
        let warning_height = if self.data.warning.is_some() { 1 } else { 0 };

        let chunks = Layout::vertical([
            Constraint::Length(1),              // Top padding
            Constraint::Length(1),              // Tabs
            Constraint::Length(1),              // Separator
            Constraint::Length(1),              // Title
            Constraint::Length(1),              // Reference time
            Constraint::Length(warning_height), // Warning
            Constraint::Length(1),              // Blank
            Constraint::Length(body_height),    // Card grid or fallback
            Constraint::Length(1),              // Separator
            Constraint::Length(1),              // Keybindings
            Constraint::Min(0),                 // Remaining space
        ])
        .split(centered_area);

        TabBar::new(self.selected_tab, self.theme).render(chunks[1], buf);
        self.render_separator(chunks[2], buf);
        self.render_title(chunks[3], chunks[4], buf);

        if let Some(warning) = &self.data.warning {
            Paragraph::new(Line::from(Span::styled(
                warning.as_str(),
                Style::default().fg(self.theme.warning()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[5], buf);
        }

        if self.data.shows_fallback() {
            Paragraph::new(Line::from(Span::styled(
                NO_DATA_MESSAGE,
                Style::default().fg(self.theme.muted()),
            )))
            .alignment(Alignment::Center)
            .render(chunks[7], buf);
        } else {
            self.render_card_grid(chunks[7], buf, cols);
        }

        self.render_separator(chunks[8], buf);
        render_keybindings(chunks[9], buf, self.theme);
    }
}

impl MetricsView<'_> {
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

    fn render_title(&self, title_area: Rect, time_area: Rect, buf: &mut Buffer) {
        Paragraph::new(Line::from(Span::styled(
            TITLE,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .render(title_area, buf);

        let as_of = format!(
            "as of {}",
            self.data.snapshot.computed_at.format("%Y-%m-%d %H:%M")
        );
        Paragraph::new(Line::from(Span::styled(
            as_of,
            Style::default().fg(self.theme.muted()),
        )))
        .alignment(Alignment::Center)
        .render(time_area, buf);
    }

    fn render_card_grid(&self, area: Rect, buf: &mut Buffer, cols: usize) {
        let cards = self.build_cards();

        let total_cards_width = (cols as u16) * CARD_WIDTH + ((cols - 1) as u16) * 2; // 2 = spacing
        let start_x = area.x + (area.width.saturating_sub(total_cards_width)) / 2;

        for (i, card) in cards.iter().enumerate() {
            let row = i / cols;
            let col = i % cols;

            let card_x = start_x + (col as u16) * (CARD_WIDTH + 2);
            let card_y = area.y + (row as u16) * (CARD_HEIGHT + 1);

            // Skip if card is outside area
            if card_y + CARD_HEIGHT > area.y + area.height {
                continue;
            }

            let card_area = Rect {
                x: card_x,
                y: card_y,
                width: CARD_WIDTH.min(area.width),
                height: CARD_HEIGHT,
            };

            render_card(card_area, buf, card);
        }
    }

    fn build_cards(&self) -> Vec<MetricCard> {
        let snapshot = &self.data.snapshot;
        Window::all()
            .iter()
            .map(|window| MetricCard {
                title: window.label(snapshot.computed_at),
                value: format!("{:.1} km", snapshot.distance(*window)),
                color: self.theme.window_color(*window),
            })
            .collect()
    }
}

fn render_card(area: Rect, buf: &mut Buffer, card: &MetricCard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(card.color));
    block.render(area, buf);

    // Title on the first line inside the border
    if area.height > 2 {
        let title_width = Line::from(card.title.as_str()).width() as u16;
        let title_x = area.x + (area.width.saturating_sub(title_width)) / 2;
        buf.set_string(
            title_x,
            area.y + 1,
            &card.title,
            Style::default().fg(card.color),
        );
    }

    // Value on the third line
    if area.height > 3 {
        let value_width = Line::from(card.value.as_str()).width() as u16;
        let value_x = area.x + (area.width.saturating_sub(value_width)) / 2;
        buf.set_string(
            value_x,
            area.y + 3,
            &card.value,
            Style::default()
                .fg(card.color)
                .add_modifier(Modifier::BOLD),
        );
    }
}

/// Keybinding hint line shared by both views
pub fn render_keybindings(area: Rect, buf: &mut Buffer, theme: Theme) {
    let bindings = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(theme.accent())),
        Span::styled(": Switch view", Style::default().fg(theme.muted())),
        Span::raw("  "),
        Span::styled("r", Style::default().fg(theme.accent())),
        Span::styled(": Refresh", Style::default().fg(theme.muted())),
        Span::raw("  "),
        Span::styled("?", Style::default().fg(theme.accent())),
        Span::styled(": Help", Style::default().fg(theme.muted())),
        Span::raw("  "),
        Span::styled("q", Style::default().fg(theme.accent())),
        Span::styled(": Quit", Style::default().fg(theme.muted())),
    ]))
    .alignment(Alignment::Center);

    bindings.render(area, buf);
}

/// Internal card representation
struct MetricCard {
    title: String,
    value: String,
    color: Color,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RoadbookError, WindowTotals};
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 15)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn loaded() -> MetricsData {
        let totals = WindowTotals {
            today: 5000.0,
            week: 8000.0,
            month: 8000.0,
            quarter: 8000.0,
            year: 100_000.0,
            total: 100_000.0,
        };
        MetricsData::from_result(Ok(MetricsSnapshot::from_meters(totals, 3, now())), now())
    }

    fn render_to_string(data: &MetricsData) -> String {
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        MetricsView::new(data, Theme::Dark).render(area, &mut buf);
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_builds_six_cards_in_window_order() {
        let data = loaded();
        let view = MetricsView::new(&data, Theme::Dark);
        let cards = view.build_cards();

        assert_eq!(cards.len(), 6);
        assert_eq!(cards[0].title, "Today");
        assert_eq!(cards[0].value, "5.0 km");
        assert_eq!(cards[1].value, "8.0 km");
        assert_eq!(cards[3].title, "Q4 2026");
        assert_eq!(cards[4].title, "Year 2026");
        assert_eq!(cards[5].value, "100.0 km");
    }

    #[test]
    fn test_render_shows_values() {
        let text = render_to_string(&loaded());
        assert!(text.contains(TITLE));
        assert!(text.contains("This Week"));
        assert!(text.contains("100.0 km"));
        assert!(!text.contains(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_render_error_shows_warning_and_fallback() {
        let err = RoadbookError::DataUnavailable("no such table: t_activities".into());
        let data = MetricsData::from_result(Err(err), now());
        let text = render_to_string(&data);

        assert!(data.shows_fallback());
        assert!(text.contains("Could not load activity data"));
        assert!(text.contains(NO_DATA_MESSAGE));
        assert!(!text.contains(" km"));
    }

    #[test]
    fn test_render_empty_snapshot_shows_fallback_only() {
        let data = MetricsData::from_result(Ok(MetricsSnapshot::empty(now())), now());
        let text = render_to_string(&data);

        assert!(data.warning.is_none());
        assert!(text.contains(NO_DATA_MESSAGE));
        assert!(!text.contains("Could not load"));
    }

    #[test]
    fn test_render_short_terminals() {
        let err = RoadbookError::DataUnavailable("disk I/O error".into());
        let failed = MetricsData::from_result(Err(err), now());
        for data in [loaded(), failed] {
            for width in [1, 100] {
                for height in 1..=10 {
                    let area = Rect::new(0, 0, width, height);
                    let mut buf = Buffer::empty(area);
                    MetricsView::new(&data, Theme::Dark).render(area, &mut buf);
                }
            }
        }
    }

    #[test]
    fn test_card_centers_by_display_width() {
        let card = MetricCard {
            title: "Σύνολο".to_string(),
            value: "1.0 km".to_string(),
            color: Color::Green,
        };
        let area = Rect::new(0, 0, CARD_WIDTH, CARD_HEIGHT);
        let mut buf = Buffer::empty(area);
        render_card(area, &mut buf, &card);

        // Six columns wide, twelve bytes long
        assert_eq!(buf[(9, 1)].symbol(), "Σ");
        assert_eq!(buf[(14, 1)].symbol(), "ο");
        assert_eq!(buf[(9, 3)].symbol(), "1");
    }

    #[test]
    fn test_cards_per_row_bounds() {
        assert_eq!(cards_per_row(10), 1);
        assert_eq!(cards_per_row(60), 2);
        assert_eq!(cards_per_row(120), 3);
    }
}
