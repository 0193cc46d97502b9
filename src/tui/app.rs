//! Application state and event loop

use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{buffer::Buffer, layout::Rect, widgets::Widget, DefaultTerminal, Frame};
use tracing::{info, warn};

use crate::config::Config;
use crate::services::{Aggregator, SnapshotCache};
use crate::tui::theme::Theme;

use super::widgets::{
    details::DetailsView,
    help::HelpPopup,
    loading::LoadingScreen,
    metrics::{MetricsData, MetricsView},
    tabs::Tab,
};

/// Application state
pub enum AppState {
    /// Waiting for the next draw to run the query
    Loading,
    /// Query finished (possibly with a warning)
    Ready { data: Box<MetricsData> },
}

/// Main application
pub struct App {
    state: AppState,
    should_quit: bool,
    current_tab: Tab,
    show_help: bool,
    theme: Theme,
    aggregator: Aggregator,
    cache: SnapshotCache,
}

impl App {
    /// Create a new app in loading state
    pub fn new(aggregator: Aggregator, theme: Theme) -> Self {
        Self {
            state: AppState::Loading,
            should_quit: false,
            current_tab: Tab::default(),
            show_help: false,
            theme,
            aggregator,
            cache: SnapshotCache::new(),
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                        self.should_quit = true;
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.should_quit = true;
                    }
                    KeyCode::Tab => {
                        self.current_tab = self.current_tab.next();
                    }
                    KeyCode::BackTab => {
                        self.current_tab = self.current_tab.prev();
                    }
                    KeyCode::Char(c @ '1'..='2') => {
                        if let Some(tab) = Tab::from_number(c as u8 - b'0') {
                            self.current_tab = tab;
                        }
                    }
                    KeyCode::Char('?') => {
                        self.show_help = !self.show_help;
                    }
                    KeyCode::Char('r') | KeyCode::Char('R') => {
                        self.request_refresh();
                    }
                    _ => {}
                }
            }
        }
    }

    /// Drop the cached snapshot and go back to loading
    fn request_refresh(&mut self) {
        if matches!(self.state, AppState::Loading) {
            return;
        }
        self.cache.invalidate(self.aggregator.db_path());
        self.state = AppState::Loading;
    }

    /// Whether a query is due
    pub fn needs_load(&self) -> bool {
        matches!(self.state, AppState::Loading)
    }

    /// Run the query against `now`; failures become a warning, never an exit
    pub fn load(&mut self, now: NaiveDateTime) {
        let result = self.cache.get_or_compute(&self.aggregator, now);
        if let Err(e) = &result {
            warn!(error = %e, "showing empty dashboard");
        }
        self.state = AppState::Ready {
            data: Box::new(MetricsData::from_result(result, now)),
        };
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Draw the application
    pub fn draw(&self, frame: &mut Frame) {
        frame.render_widget(self, frame.area());
    }
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match &self.state {
            AppState::Loading => {
                LoadingScreen::new(self.theme).render(area, buf);
            }
            AppState::Ready { data } => {
                match self.current_tab {
                    Tab::Metrics => {
                        MetricsView::new(data, self.theme)
                            .with_tab(self.current_tab)
                            .render(area, buf);
                    }
                    Tab::Details => {
                        DetailsView::new(data, self.theme)
                            .with_tab(self.current_tab)
                            .render(area, buf);
                    }
                }

                // Render help popup overlay if active
                if self.show_help {
                    let popup_area = HelpPopup::centered_area(area);
                    HelpPopup::new(self.theme).render(popup_area, buf);
                }
            }
        }
    }
}

/// Run the TUI application
pub fn run(config: Config) -> anyhow::Result<()> {
    // Theme detection has to happen before raw mode
    let theme = config.theme.resolve();
    info!(db = %config.db_path.display(), "starting dashboard");

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, App::new(Aggregator::new(config.db_path), theme));
    ratatui::restore();
    result
}

fn run_app(terminal: &mut DefaultTerminal, mut app: App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.draw(frame))?;

        if app.should_quit() {
            break;
        }

        // Loading screen is on screen; the query blocks until done
        if app.needs_load() {
            app.load(Local::now().naive_local());
            continue;
        }

        if event::poll(Duration::from_millis(250))? {
            app.handle_event(event::read()?);
        }
    }

    Ok(())
}
