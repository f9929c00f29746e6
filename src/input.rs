use std::time::Duration;

/// What the player has typed so far toward the current target phrase.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputBuffer {
    text: String,
}

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, c: char) {
        self.text.push(c);
    }

    /// Removes the last character; no-op on an empty buffer.
    pub fn delete_last(&mut self) {
        self.text.pop();
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Press-and-hold deletion timers for the delete key: one deletion after the
/// initial delay, then one per repeat interval, driven by tick-accumulated
/// elapsed time rather than wall-clock callbacks.
#[derive(Debug, Clone)]
pub struct BackspaceRepeat {
    delay: Duration,
    interval: Duration,
    held: bool,
    elapsed: Duration,
    in_initial_delay: bool,
}

impl BackspaceRepeat {
    pub fn new(delay: Duration, interval: Duration) -> Self {
        Self {
            delay,
            interval,
            held: false,
            elapsed: Duration::ZERO,
            in_initial_delay: true,
        }
    }

    /// Arms the repeat state. The caller performs the immediate deletion for
    /// the key-down itself.
    pub fn key_down(&mut self) {
        self.held = true;
        self.elapsed = Duration::ZERO;
        self.in_initial_delay = true;
    }

    pub fn key_up(&mut self) {
        self.held = false;
        self.elapsed = Duration::ZERO;
        self.in_initial_delay = true;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Accumulates `delta` and reports whether one deletion is due this
    /// tick. At most one deletion per tick.
    pub fn tick(&mut self, delta: Duration) -> bool {
        if !self.held {
            return false;
        }

        self.elapsed += delta;

        if self.in_initial_delay {
            if self.elapsed >= self.delay {
                self.in_initial_delay = false;
                self.elapsed = Duration::ZERO;
                return true;
            }
        } else if self.elapsed >= self.interval {
            self.elapsed = Duration::ZERO;
            return true;
        }

        false
    }
}
