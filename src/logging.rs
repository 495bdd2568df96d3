//! Runtime logging routed into an in-terminal pane.
//!
//! Records from the widget and the demo are captured by `tui-logger` and can
//! be inspected in a [`LogPane`] without disturbing the alternate screen.

use anyhow::{Result, anyhow};
use log::LevelFilter;
use ratatui::Frame;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::Clear;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerSmartWidget, TuiWidgetEvent, TuiWidgetState};

/// Install the `tui-logger` backend.
pub fn initialize(level: LevelFilter) -> Result<()> {
    tui_logger::init_logger(level).map_err(|err| anyhow!("failed to install logger: {err:?}"))?;
    tui_logger::set_default_level(level);
    Ok(())
}

/// Togglable log viewer.
pub struct LogPane {
    widget: TuiWidgetState,
    visible: bool,
}

impl LogPane {
    pub fn new(visible: bool) -> Self {
        let widget = TuiWidgetState::new().set_default_display_level(LevelFilter::Debug);
        Self { widget, visible }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Forward navigation keys to the viewer. Returns `true` when consumed.
    pub fn handle_key(&self, key: KeyEvent) -> bool {
        if !self.visible || key.kind != KeyEventKind::Press {
            return false;
        }

        let event = match key.code {
            KeyCode::Char(' ') => Some(TuiWidgetEvent::SpaceKey),
            KeyCode::Char('h') | KeyCode::Char('H') => Some(TuiWidgetEvent::HideKey),
            KeyCode::Char('f') | KeyCode::Char('F') => Some(TuiWidgetEvent::FocusKey),
            KeyCode::Char('+') => Some(TuiWidgetEvent::PlusKey),
            KeyCode::Char('-') => Some(TuiWidgetEvent::MinusKey),
            KeyCode::Up => Some(TuiWidgetEvent::UpKey),
            KeyCode::Down => Some(TuiWidgetEvent::DownKey),
            KeyCode::Left => Some(TuiWidgetEvent::LeftKey),
            KeyCode::Right => Some(TuiWidgetEvent::RightKey),
            KeyCode::PageUp => Some(TuiWidgetEvent::PrevPageKey),
            KeyCode::PageDown => Some(TuiWidgetEvent::NextPageKey),
            _ => None,
        };

        match event {
            Some(event) => {
                self.widget.transition(event);
                true
            }
            None => false,
        }
    }

    pub fn render(&self, frame: &mut Frame, area: Rect, highlight: Style) {
        if !self.visible || area.is_empty() {
            return;
        }
        frame.render_widget(Clear, area);

        let widget = TuiLoggerSmartWidget::default()
            .title_log("Runtime log")
            .title_target("Targets")
            .highlight_style(highlight)
            .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
            .state(&self.widget);
        frame.render_widget(widget, area);
    }
}
