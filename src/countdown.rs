use std::time::{Duration, Instant};

/// Per-question countdown shown next to the question.
///
/// Purely visual: reaching zero changes the label and nothing else.
#[derive(Debug, Clone, Default)]
pub struct Countdown {
    deadline: Option<Instant>,
    total_secs: u64,
}

impl Countdown {
    pub fn new(total_secs: u64) -> Self {
        Self {
            deadline: None,
            total_secs,
        }
    }

    pub fn start(&mut self, now: Instant) {
        if self.total_secs > 0 {
            self.deadline = Some(now + Duration::from_secs(self.total_secs));
        }
    }

    pub fn stop(&mut self) {
        self.deadline = None;
    }

    pub fn is_running(&self) -> bool {
        self.deadline.is_some()
    }

    /// Whole seconds left, rounded up so a fresh countdown shows its full length.
    pub fn remaining_secs(&self, now: Instant) -> Option<u64> {
        let deadline = self.deadline?;
        let left = deadline.saturating_duration_since(now);
        let secs = left.as_secs() + u64::from(left.subsec_nanos() > 0);
        Some(secs)
    }

    pub fn label(&self, now: Instant) -> Option<String> {
        match self.remaining_secs(now)? {
            0 => Some("⌛ Time's up!".to_string()),
            1 => Some("⏳ Time left: 1 second".to_string()),
            n => Some(format!("⏳ Time left: {} seconds", n)),
        }
    }
}
