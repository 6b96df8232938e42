use std::time::Duration;
use tracing::trace;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crate::domain::{Message, TVConfig, ViewError};

pub struct Controller {
    event_poll_time: u64,
}

impl Controller {
    pub fn new(cfg: &TVConfig) -> Self {
        Self {
            event_poll_time: cfg.event_poll_time,
        }
    }

    pub fn handle_event(&self) -> Result<Option<Message>, ViewError> {
        if event::poll(Duration::from_millis(self.event_poll_time))?
            && let Event::Key(key) = event::read()?
            && key.kind == event::KeyEventKind::Press
        {
            return Ok(self.handle_key(key));
        }
        Ok(None)
    }

    fn handle_key(&self, key: event::KeyEvent) -> Option<Message> {
        let message = match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => Some(Message::Quit),
            (KeyCode::Char('q'), _) => Some(Message::Quit),
            (KeyCode::Up | KeyCode::Char('k'), _) => Some(Message::MoveUp),
            (KeyCode::Down | KeyCode::Char('j'), _) => Some(Message::MoveDown),
            (KeyCode::Home | KeyCode::Char('g'), _) => Some(Message::MoveBeginning),
            (KeyCode::End | KeyCode::Char('G'), _) => Some(Message::MoveEnd),
            (KeyCode::Enter | KeyCode::Right | KeyCode::Char('l'), _) => Some(Message::Enter),
            (KeyCode::Esc | KeyCode::Left | KeyCode::Char('h'), _) => Some(Message::Exit),
            (KeyCode::Char('?'), _) => Some(Message::Help),
            (KeyCode::Char('c'), _) => Some(Message::CopyRow),
            _ => None,
        };
        trace!("Mapped: {key:?} => {message:?}");
        message
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_navigation_keys() {
        let controller = Controller::new(&TVConfig::default());
        assert_eq!(controller.handle_key(key(KeyCode::Char('j'))), Some(Message::MoveDown));
        assert_eq!(controller.handle_key(key(KeyCode::Up)), Some(Message::MoveUp));
        assert_eq!(controller.handle_key(key(KeyCode::Enter)), Some(Message::Enter));
        assert_eq!(controller.handle_key(key(KeyCode::Esc)), Some(Message::Exit));
        assert_eq!(controller.handle_key(key(KeyCode::Char('?'))), Some(Message::Help));
        assert_eq!(controller.handle_key(key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn ctrl_c_quits_and_plain_c_copies() {
        let controller = Controller::new(&TVConfig::default());
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(controller.handle_key(ctrl_c), Some(Message::Quit));
        assert_eq!(controller.handle_key(key(KeyCode::Char('c'))), Some(Message::CopyRow));
        assert_eq!(controller.handle_key(key(KeyCode::Char('q'))), Some(Message::Quit));
    }
}
