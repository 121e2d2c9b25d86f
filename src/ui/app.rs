//! Main TUI application state and logic

use crate::interpreter::errors::RuntimeError;
use crate::memory::store::VariableStore;
use crate::snapshot::{History, HistoryBoundary};
use crate::ui::panes::{self, SourceScrollState, StepInfo};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Variables,
}

impl FocusedPane {
    /// Move focus to the other pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// Recorded run being browsed
    pub history: History,

    /// The source code that was executed
    pub source_code: String,

    /// Runtime error that ended the run, shown once the cursor reaches the end
    pub error: Option<RuntimeError>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    pub source_scroll: SourceScrollState,
    pub variables_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    pub fn new(history: History, source_code: String, error: Option<RuntimeError>) -> Self {
        let now = Instant::now();
        App {
            history,
            source_code,
            error,
            focused_pane: FocusedPane::Source,
            source_scroll: SourceScrollState::default(),
            variables_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: now,
            last_space_press: now.checked_sub(Duration::from_secs(1)).unwrap_or(now),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if self.is_playing && self.last_play_time.elapsed() >= Duration::from_secs(1) {
                if self.history.step_forward().is_ok() {
                    self.status_message = "Playing...".to_string();
                } else {
                    self.is_playing = false;
                    self.status_message = "Playback complete".to_string();
                    self.show_error_at_end();
                }
                self.last_play_time = Instant::now();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// The error is only relevant once the cursor sits on the last snapshot
    fn visible_error(&self) -> Option<&RuntimeError> {
        self.error.as_ref().filter(|_| self.history.is_at_end())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(frame.area());

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let empty = VariableStore::new();
        let (store, changed, description, current_line) = match self.history.current() {
            Some(snapshot) => (
                &snapshot.store,
                snapshot.changed.as_deref(),
                snapshot.description.as_str(),
                snapshot.source_location.line,
            ),
            None => (&empty, None, "", 0),
        };
        let error_line = self
            .visible_error()
            .and_then(RuntimeError::location)
            .map(|location| location.line);

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            current_line,
            error_line,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_variables_pane(
            frame,
            columns[1],
            store,
            changed,
            description,
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            StepInfo {
                current: self.history.position(),
                total: self.history.len(),
                is_playing: self.is_playing,
                failed: self.error.is_some(),
            },
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                match self.history.step_backward() {
                    Ok(()) => self.status_message = "Stepped backward".to_string(),
                    Err(boundary) => self.report_boundary(boundary),
                }
            }
            KeyCode::Right => {
                self.is_playing = false;
                match self.history.step_forward() {
                    Ok(()) => {
                        self.status_message = "Stepped forward".to_string();
                        self.show_error_at_end();
                    }
                    Err(boundary) => self.report_boundary(boundary),
                }
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Source => {
                    // Scrolling up makes the current line move down visually
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Variables => {
                    self.variables_scroll = self.variables_scroll.saturating_add(1);
                }
            },
            KeyCode::Char(' ') => {
                // 200ms debounce against key repeat
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        let now = Instant::now();
                        self.last_play_time =
                            now.checked_sub(Duration::from_secs(1)).unwrap_or(now);
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.history.jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.show_error_at_end();
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.history.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
            }
            _ => {}
        }
    }

    fn report_boundary(&mut self, boundary: HistoryBoundary) {
        self.status_message = match boundary {
            HistoryBoundary::AtStart => "Already at the first step".to_string(),
            HistoryBoundary::AtEnd => match &self.error {
                Some(e) => format!("Stopped: {}", e),
                None => "Already at the last step".to_string(),
            },
        };
    }

    fn show_error_at_end(&mut self) {
        if let Some(e) = self.visible_error() {
            self.status_message = format!("Stopped: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;
    use ratatui::backend::TestBackend;

    const SOURCE: &str = "PROGRAM Demo;\nBEGIN\n  a := 1;\n  b := a * 2\nEND.\n";

    fn app_for(source: &str) -> App {
        let recording = crate::record(source, 1024 * 1024).unwrap();
        App::new(recording.history, source.to_string(), recording.error)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(160, 12)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_navigation_keys() {
        let mut app = app_for(SOURCE);
        assert_eq!(app.history.len(), 3);

        press(&mut app, KeyCode::Left);
        assert_eq!(app.history.position(), 0);
        assert_eq!(app.status_message, "Already at the first step");

        press(&mut app, KeyCode::Right);
        assert_eq!(app.history.position(), 1);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.history.position(), 2);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.history.position(), 0);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_pane, FocusedPane::Variables);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[test]
    fn test_render_shows_step_and_bindings() {
        let mut app = app_for(SOURCE);
        press(&mut app, KeyCode::Enter);

        let text = screen(&mut app);
        assert!(text.contains("Source Code"));
        assert!(text.contains("Variables (2)"));
        assert!(text.contains("Step 3/3"));
        assert!(text.contains("b := (a * 2)"));
    }

    #[test]
    fn test_runtime_error_shown_at_end() {
        let mut app = app_for("PROGRAM P;\nBEGIN\n  a := 1;\n  b := a DIV 0\nEND.\n");
        assert!(app.error.is_some());
        assert_eq!(app.history.len(), 2);

        press(&mut app, KeyCode::Right);
        assert!(app.status_message.starts_with("Stopped: Division by zero"));

        let text = screen(&mut app);
        assert!(text.contains("ERROR"));
    }
}
