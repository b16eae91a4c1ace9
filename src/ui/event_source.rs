use std::{sync::mpsc, time::Duration};

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{
    domain::{
        connection::ConnectionEvent,
        events::{AppEvent, KeyInput},
    },
    usecases::contracts::AppEventSource,
};

const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);
/// Connection events handed out in a row before the terminal gets a turn.
pub const CONNECTION_BURST_LIMIT: usize = 32;

#[derive(Default)]
pub struct CrosstermEventSource;

impl AppEventSource for CrosstermEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if !event::poll(EVENT_POLL_TIMEOUT)? {
            return Ok(Some(AppEvent::Tick));
        }

        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => Ok(map_key_event(key)),
            Event::Paste(text) => Ok(Some(AppEvent::Paste(text))),
            Event::Resize(..) => Ok(Some(AppEvent::Tick)),
            _ => Ok(None),
        }
    }
}

fn map_key_event(key: KeyEvent) -> Option<AppEvent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if key.code == KeyCode::Esc || (ctrl && key.code == KeyCode::Char('c')) {
        return Some(AppEvent::QuitRequested);
    }

    let name = match key.code {
        KeyCode::Char(ch) => ch.to_string(),
        KeyCode::Enter => "enter".to_owned(),
        KeyCode::Backspace => "backspace".to_owned(),
        KeyCode::Delete => "delete".to_owned(),
        KeyCode::Left => "left".to_owned(),
        KeyCode::Right => "right".to_owned(),
        KeyCode::Home => "home".to_owned(),
        KeyCode::End => "end".to_owned(),
        KeyCode::Up => "up".to_owned(),
        KeyCode::Down => "down".to_owned(),
        KeyCode::PageUp => "page_up".to_owned(),
        KeyCode::PageDown => "page_down".to_owned(),
        _ => return None,
    };

    Some(AppEvent::InputKey(KeyInput::new(name, ctrl)))
}

/// Merges connection events into the terminal event stream.
///
/// Pending connection events are drained before the terminal is polled, so
/// inbound messages are applied in arrival order and never wait behind the
/// poll timeout. After `CONNECTION_BURST_LIMIT` of them in a row the terminal
/// is polled once, so keys still get through a steady inbound stream.
pub struct ShellEventSource<S> {
    connection_events: mpsc::Receiver<ConnectionEvent>,
    terminal: S,
    connection_burst: usize,
}

impl<S> ShellEventSource<S>
where
    S: AppEventSource,
{
    pub fn new(connection_events: mpsc::Receiver<ConnectionEvent>, terminal: S) -> Self {
        Self {
            connection_events,
            terminal,
            connection_burst: 0,
        }
    }
}

impl<S> AppEventSource for ShellEventSource<S>
where
    S: AppEventSource,
{
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        if self.connection_burst < CONNECTION_BURST_LIMIT {
            if let Ok(event) = self.connection_events.try_recv() {
                self.connection_burst += 1;
                return Ok(Some(AppEvent::Connection(event)));
            }
        }

        self.connection_burst = 0;
        self.terminal.next_event()
    }
}

#[cfg(test)]
pub struct MockEventSource {
    queue: std::collections::VecDeque<AppEvent>,
}

#[cfg(test)]
impl MockEventSource {
    pub fn from(events: Vec<AppEvent>) -> Self {
        Self {
            queue: events.into(),
        }
    }
}

#[cfg(test)]
impl AppEventSource for MockEventSource {
    fn next_event(&mut self) -> Result<Option<AppEvent>> {
        Ok(self.queue.pop_front())
    }
}
