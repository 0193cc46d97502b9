//! Loading screen shown while the roadbook is queried

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

use crate::tui::theme::Theme;

/// App branding
const APP_NAME: &str = "roadbook";
const TAGLINE: &str = "Distance totals from your activity log";

const SPINNER_CHAR: char = '⠋';
const MESSAGE: &str = "Querying activities...";

/// Loading screen widget
pub struct LoadingScreen {
    theme: Theme,
}

impl LoadingScreen {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }
}

impl Widget for LoadingScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 5 || area.width < 40 {
            return;
        }

        // 4 lines: name, tagline, empty, spinner
        let center_y = area.y + area.height / 2;

        let name_y = center_y.saturating_sub(2);
        let name_x = area.x + (area.width.saturating_sub(APP_NAME.len() as u16)) / 2;
        buf.set_string(
            name_x,
            name_y,
            APP_NAME,
            Style::default()
                .fg(self.theme.text())
                .add_modifier(Modifier::BOLD),
        );

        let tag_y = name_y + 1;
        let tag_x = area.x + (area.width.saturating_sub(TAGLINE.len() as u16)) / 2;
        buf.set_string(tag_x, tag_y, TAGLINE, Style::default().fg(self.theme.muted()));

        let spinner_text = format!("{} {}", SPINNER_CHAR, MESSAGE);
        let spinner_y = tag_y + 2;
        let spinner_x =
            area.x + (area.width.saturating_sub(spinner_text.chars().count() as u16)) / 2;
        buf.set_string(
            spinner_x,
            spinner_y,
            &spinner_text,
            Style::default().fg(self.theme.accent()),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loading_screen_renders_message() {
        let area = Rect::new(0, 0, 60, 12);
        let mut buf = Buffer::empty(area);
        LoadingScreen::new(Theme::Dark).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains(APP_NAME));
        assert!(text.contains(MESSAGE));
    }

    #[test]
    fn test_loading_screen_skips_tiny_area() {
        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        LoadingScreen::new(Theme::Dark).render(area, &mut buf);

        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.trim().is_empty());
    }
}
