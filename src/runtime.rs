use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind};
use tracing::warn;

/// Unified event type consumed by the app runner
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TyperEvent {
    Key(KeyEvent),
    Paste(String),
    Resize,
    Tick,
}

/// Source of terminal events (keyboard, paste, resize)
pub trait EventSource: Send + 'static {
    /// Block for up to `timeout` waiting for an event.
    fn recv_timeout(&self, timeout: Duration) -> Result<TyperEvent, RecvTimeoutError>;
}

/// Production event source using crossterm
pub struct CrosstermEventSource {
    rx: Receiver<TyperEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let evt = match event::read() {
                // key release/repeat reports would double count on some terminals
                Ok(CtEvent::Key(key)) if key.kind == KeyEventKind::Press => TyperEvent::Key(key),
                Ok(CtEvent::Paste(text)) => TyperEvent::Paste(text),
                Ok(CtEvent::Resize(_, _)) => TyperEvent::Resize,
                Ok(_) => continue,
                Err(err) => {
                    warn!(%err, "terminal event reader stopped");
                    break;
                }
            };

            if tx.send(evt).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TyperEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Configurable ticker interface
pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

/// Fixed interval ticker
#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Test event source for unit tests
pub struct TestEventSource {
    rx: Receiver<TyperEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<TyperEvent>) -> Self {
        Self { rx }
    }
}

impl EventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<TyperEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Runner that advances the application one event/tick at a time.
///
/// Ticks follow a wall-clock deadline, so a steady stream of key events
/// doesn't stretch the countdown.
pub struct Runner<E: EventSource, T: Ticker> {
    event_source: E,
    ticker: T,
    next_tick: Instant,
}

impl<E: EventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        let next_tick = Instant::now() + ticker.interval();
        Self {
            event_source,
            ticker,
            next_tick,
        }
    }

    /// Restart the tick interval from now
    pub fn rearm(&mut self) {
        self.next_tick = Instant::now() + self.ticker.interval();
    }

    fn fire_tick(&mut self) -> TyperEvent {
        let now = Instant::now();
        self.next_tick += self.ticker.interval();
        if self.next_tick <= now {
            // fell more than a whole interval behind; don't burst
            self.next_tick = now + self.ticker.interval();
        }
        TyperEvent::Tick
    }

    /// Blocks until the next event or the tick deadline, whichever comes first
    pub fn step(&mut self) -> TyperEvent {
        let now = Instant::now();
        if now >= self.next_tick {
            return self.fire_tick();
        }

        let timeout = self.next_tick - now;
        match self.event_source.recv_timeout(timeout) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) => self.fire_tick(),
            Err(RecvTimeoutError::Disconnected) => {
                std::thread::sleep(self.next_tick.saturating_duration_since(Instant::now()));
                self.fire_tick()
            }
        }
    }
}
