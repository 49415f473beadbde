use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::config::DEFAULT_COLUMNS;
use crate::runtime::{EventSource, Runner, Ticker, TyperEvent};
use crate::session::{Key, RoundResult, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    /// Input box focused, keys go to the session
    Typing,
    /// A round just ended and the input lost focus
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

/// The hosting screen: owns the session plus everything the session itself
/// doesn't care about (focus, the published result, layout)
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub state: AppState,
    pub result: Option<RoundResult>,
    pub columns: u16,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: AppState::Typing,
            result: None,
            columns: DEFAULT_COLUMNS,
        }
    }

    pub fn with_columns(mut self, columns: u16) -> Self {
        self.columns = columns.max(1);
        self
    }

    pub fn on_key(&mut self, key: KeyEvent) -> Control {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Control::Quit,
            KeyCode::Char('c') if ctrl => return Control::Quit,
            KeyCode::Tab => {
                self.restart();
                return Control::Continue;
            }
            _ => {}
        }

        match self.state {
            AppState::Results => {
                if key.code == KeyCode::Enter {
                    self.state = AppState::Typing;
                }
            }
            AppState::Typing => {
                let before = self.session.keystrokes();
                match key.code {
                    KeyCode::Char(_) if ctrl || key.modifiers.contains(KeyModifiers::ALT) => {
                        self.session.key_down(Key::Other)
                    }
                    KeyCode::Char(c) => self.session.type_char(c),
                    KeyCode::Backspace => self.session.backspace(),
                    _ => self.session.key_down(Key::Other),
                }
                if self.session.keystrokes() != before {
                    self.result = None;
                }
            }
        }

        Control::Continue
    }

    pub fn on_paste(&mut self, text: &str) {
        if self.state != AppState::Typing {
            return;
        }
        let before = self.session.keystrokes();
        self.session.paste(text);
        if self.session.keystrokes() != before {
            self.result = None;
        }
    }

    pub fn on_tick(&mut self) {
        if let Some(result) = self.session.tick() {
            self.result = Some(result);
            self.state = AppState::Results;
        }
    }

    /// Refresh: throw away the round and any shown result
    pub fn restart(&mut self) {
        self.session.restart();
        self.result = None;
        self.state = AppState::Typing;
    }

    pub fn handle_event(&mut self, event: &TyperEvent) -> Control {
        match event {
            TyperEvent::Key(key) => self.on_key(*key),
            TyperEvent::Paste(text) => {
                self.on_paste(text);
                Control::Continue
            }
            TyperEvent::Tick => {
                self.on_tick();
                Control::Continue
            }
            TyperEvent::Resize => Control::Continue,
        }
    }

    /// Pull one event from the runner and apply it. The tick interval is
    /// re-armed when the countdown starts so the first tick lands a full
    /// interval after the first key.
    pub fn step<E: EventSource, T: Ticker>(&mut self, runner: &mut Runner<E, T>) -> Control {
        let was_running = self.session.timer_running();
        let event = runner.step();
        let control = self.handle_event(&event);

        if !was_running && self.session.timer_running() {
            debug!("countdown armed");
            runner.rearm();
        }

        control
    }
}
