//! Cancellable debounce timer.
//!
//! Time is passed in explicitly (milliseconds), so the browser feeds it
//! `Date.now()` and tests feed plain numbers. Every `poke` supersedes the
//! previous ticket; only the newest ticket settles, and only once its quiet
//! period has elapsed.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ticket {
    generation: u64,
    due_at: f64,
}

impl Ticket {
    pub fn due_at(&self) -> f64 {
        self.due_at
    }
}

/// Quiet period used for search input
pub const DEFAULT_DELAY_MS: u32 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct Debounce {
    delay_ms: u32,
    generation: u64,
    pending: Option<f64>,
}

impl Default for Debounce {
    fn default() -> Self {
        Self::new(DEFAULT_DELAY_MS)
    }
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self { delay_ms, generation: 0, pending: None }
    }

    pub fn delay_ms(&self) -> u32 {
        self.delay_ms
    }

    /// Restart the quiet period at `now`.
    pub fn poke(&mut self, now: f64) -> Ticket {
        self.generation += 1;
        let due_at = now + f64::from(self.delay_ms);
        self.pending = Some(due_at);
        Ticket { generation: self.generation, due_at }
    }

    pub fn cancel(&mut self) {
        self.generation += 1;
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True exactly once, for the newest ticket, at or after its due time.
    pub fn settle(&mut self, ticket: Ticket, now: f64) -> bool {
        let current = ticket.generation == self.generation && self.pending.is_some();
        if current && now >= ticket.due_at {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
