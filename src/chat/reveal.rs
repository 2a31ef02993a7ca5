//! Simulated live typing for an already-received response.
//!
//! `WordReveal` is a pure iterator over accumulated frames; pacing and
//! cancellation belong to whoever drives it (the CLI ticks it with a
//! `tokio` interval and can stop between frames). This is not provider
//! streaming, only a client-side reveal.
use std::time::Duration;

/// Delay between revealed tokens when live typing is on.
pub const REVEAL_TICK: Duration = Duration::from_millis(20);

pub struct WordReveal {
    tokens: Vec<String>,
    revealed: String,
    next: usize,
}

impl WordReveal {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(|s| s.to_string()).collect(),
            revealed: String::new(),
            next: 0,
        }
    }

    pub fn is_done(&self) -> bool {
        self.next >= self.tokens.len()
    }
}

impl Iterator for WordReveal {
    type Item = String;

    /// Each frame appends the next token plus a single trailing space
    /// to everything revealed so far.
    fn next(&mut self) -> Option<String> {
        let token = self.tokens.get(self.next)?;
        self.next += 1;
        self.revealed.push_str(token);
        self.revealed.push(' ');
        Some(self.revealed.clone())
    }
}
