//! Demo runtime and event loop.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::stdout;
use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use autosuggest_widget::{Autocomplete, AutocompleteProps, EventOutcome, Item, Theme};
use log::{debug, info};
use ratatui::Frame;
use ratatui::crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
};
use ratatui::crossterm::execute;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};

use crate::logging::LogPane;

/// How the session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub accepted: bool,
    pub query: String,
    pub selection: Option<Item>,
}

/// Host state around a single autocomplete.
pub struct App {
    autocomplete: Autocomplete,
    selected: Rc<RefCell<Option<String>>>,
    logs: LogPane,
    theme: Theme,
}

impl App {
    pub fn new(props: AutocompleteProps, show_logs: bool) -> Self {
        let selected = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&selected);
        let theme = props.theme;
        let props = props
            .on_change(|_, value| debug!("query changed: {value:?}"))
            .on_select(move |_, key| {
                *sink.borrow_mut() = Some(key.to_string());
            });

        let mut autocomplete = Autocomplete::new(props);
        autocomplete.focus();

        Self {
            autocomplete,
            selected,
            logs: LogPane::new(show_logs),
            theme,
        }
    }

    /// Pump the terminal event loop until the user picks an item or quits.
    pub fn run(&mut self) -> Result<Outcome> {
        let mut terminal = ratatui::init();
        terminal.clear()?;
        execute!(stdout(), EnableMouseCapture, EnableFocusChange)?;

        let (event_tx, event_rx) = mpsc::channel();
        let event_loop_running = Arc::new(AtomicBool::new(true));
        let event_loop_flag = Arc::clone(&event_loop_running);

        let event_thread = thread::spawn(move || -> Result<()> {
            while event_loop_flag.load(Ordering::Relaxed) {
                if event::poll(Duration::from_millis(50))? {
                    let event = event::read()?;
                    if event_tx.send(event).is_err() {
                        break;
                    }
                }
            }
            Ok(())
        });

        let mut pending_events = VecDeque::new();
        let mut last_frame = Instant::now();

        let result: Result<Outcome> = 'event_loop: loop {
            loop {
                match event_rx.try_recv() {
                    Ok(event) => pending_events.push_back(event),
                    Err(mpsc::TryRecvError::Empty) => break,
                    Err(mpsc::TryRecvError::Disconnected) => {
                        break 'event_loop Err(anyhow!("input event channel disconnected"));
                    }
                }
            }

            let mut maybe_outcome = None;
            while let Some(event) = pending_events.pop_front() {
                if let Some(outcome) = self.handle_event(&event) {
                    maybe_outcome = Some(outcome);
                    break;
                }
            }

            if let Some(outcome) = maybe_outcome {
                break Ok(outcome);
            }

            let now = Instant::now();
            self.autocomplete.tick(now.duration_since(last_frame));
            last_frame = now;

            terminal.draw(|frame| self.draw(frame))?;

            thread::sleep(Duration::from_millis(16));
        };

        ratatui::restore();
        execute!(stdout(), DisableMouseCapture, DisableFocusChange)?;

        event_loop_running.store(false, Ordering::Relaxed);
        match event_thread.join() {
            Ok(join_result) => join_result?,
            Err(err) => std::panic::resume_unwind(err),
        }

        result
    }

    /// Route one terminal event. Returns the outcome once the session ends.
    pub fn handle_event(&mut self, event: &Event) -> Option<Outcome> {
        if let Event::Key(key) = event {
            if key.kind == KeyEventKind::Release {
                return None;
            }
            if is_ctrl(key, 'c') {
                return Some(self.finish(false));
            }
            if is_ctrl(key, 'l') {
                self.logs.toggle();
                return None;
            }
            if !self.autocomplete.is_focused() {
                return self.handle_blurred_key(*key);
            }
        }

        match self.autocomplete.handle_event(event) {
            EventOutcome::Selected(key) => {
                info!("selected {key}");
                Some(self.finish(true))
            }
            EventOutcome::Ignored
            | EventOutcome::Handled
            | EventOutcome::Changed => None,
        }
    }

    fn handle_blurred_key(&mut self, key: KeyEvent) -> Option<Outcome> {
        if self.logs.handle_key(key) {
            return None;
        }
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => Some(self.finish(false)),
            KeyCode::Tab | KeyCode::Enter | KeyCode::Char('i') => {
                self.autocomplete.focus();
                None
            }
            _ => None,
        }
    }

    fn finish(&self, accepted: bool) -> Outcome {
        let key = self.selected.borrow().clone();
        let selection = key.and_then(|key| {
            self.autocomplete
                .props()
                .items
                .iter()
                .find(|item| item.key == key)
                .cloned()
        });
        Outcome {
            accepted: accepted && selection.is_some(),
            query: self.autocomplete.value().to_string(),
            selection,
        }
    }

    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let log_height = if self.logs.is_visible() {
            Constraint::Percentage(40)
        } else {
            Constraint::Length(0)
        };
        let [header, body, logs] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(3), log_height]).areas(area);

        frame.render_widget(self.help_line(), header);
        let body = Rect {
            x: body.x + 1,
            width: body.width.saturating_sub(2),
            ..body
        };
        self.autocomplete.draw(frame, body);
        self.logs.render(frame, logs, self.theme.selected);
    }

    fn help_line(&self) -> Line<'static> {
        let hint = if self.autocomplete.is_focused() {
            " ↑/↓ highlight · Enter select · Esc blur · Ctrl+L logs · Ctrl+C quit"
        } else {
            " Tab focus · Esc/q quit · Ctrl+L logs"
        };
        Line::from(vec![
            Span::styled(" autosuggest", self.theme.selected),
            Span::styled(hint, self.theme.placeholder),
        ])
    }
}

fn is_ctrl(key: &KeyEvent, ch: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(ch)
}
