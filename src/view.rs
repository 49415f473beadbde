use crate::session::Outcome;

/// One visible word in the window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordView {
    pub text: String,
    pub is_current: bool,
    pub outcome: Option<Outcome>,
}

/// Everything the presentation layer needs to draw a session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderView {
    pub words: Vec<WordView>,
    pub typed_text: String,
    pub remaining_seconds: u32,
    pub timer_running: bool,
}

impl RenderView {
    pub fn current_word(&self) -> Option<&WordView> {
        self.words.iter().find(|w| w.is_current)
    }

    /// True when the typed text can still become the current word
    pub fn typed_text_on_track(&self) -> bool {
        self.current_word()
            .map(|w| w.text.starts_with(self.typed_text.as_str()))
            .unwrap_or(true)
    }
}
