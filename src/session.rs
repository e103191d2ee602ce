use crate::exercises::{normalize, shuffled_order};
use std::error::Error;
use std::fmt;
use std::time::{Duration, Instant};

/// Length of one workout block
pub const SESSION_MS: u64 = 5 * 60 * 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    Idle,
    Running,
}

/// Raised by `start` when the list is empty after trimming and dedup
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmptyListError;

impl fmt::Display for EmptyListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Please enter at least one exercise.")
    }
}

impl Error for EmptyListError {}

/// Outcome of presenting the next exercise
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advance {
    Exercise { name: String, remaining: usize },
    Exhausted,
}

/// Outcome of one countdown probe
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Idle,
    Remaining(u64),
    Expired,
}

/// One workout block: a shuffled presentation order, a cursor into it, and a
/// wall-clock deadline. The session never reads a clock itself; every
/// time-dependent operation takes an explicit `now` so tests can drive it
/// with synthetic instants.
///
/// Exhaustion and expiry are independent: running out of exercises does not
/// stop the countdown, and the countdown can expire with exercises left.
#[derive(Debug)]
pub struct Session {
    order: Vec<String>,
    cursor: usize,
    current: Option<String>,
    deadline: Option<Instant>,
    phase: Phase,
}

impl Session {
    pub fn new() -> Self {
        Self {
            order: Vec::new(),
            cursor: 0,
            current: None,
            deadline: None,
            phase: Phase::Idle,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Exercise currently on display, if any
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Whether the advance control should be enabled
    pub fn can_advance(&self) -> bool {
        self.phase == Phase::Running && self.cursor < self.order.len()
    }

    /// All exercises in the block have been shown
    pub fn exhausted(&self) -> bool {
        self.phase == Phase::Running && self.cursor >= self.order.len()
    }

    /// Exercises not yet shown in this block
    pub fn remaining_in_block(&self) -> usize {
        self.order.len() - self.cursor
    }

    /// Milliseconds until the deadline, clamped at zero
    pub fn remaining_ms(&self, now: Instant) -> u64 {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(now).as_millis() as u64)
            .unwrap_or(0)
    }

    /// Begins a new block from raw list text. Normalizes and validates the
    /// list, materializes a shuffled order, arms the deadline, and presents
    /// the first exercise. Any previous session is overwritten
    /// unconditionally; an empty list fails without touching state.
    pub fn start(&mut self, raw: &str, now: Instant) -> Result<Advance, EmptyListError> {
        let list = normalize(raw);
        if list.is_empty() {
            return Err(EmptyListError);
        }

        self.order = shuffled_order(&list);
        self.cursor = 0;
        self.current = None;
        self.deadline = Some(now + Duration::from_millis(SESSION_MS));
        self.phase = Phase::Running;
        Ok(self.advance())
    }

    /// Presents the exercise at the cursor and moves the cursor forward.
    /// Once the block is exhausted this is an idempotent no-op that keeps
    /// signalling exhaustion; the timer keeps running either way.
    pub fn advance(&mut self) -> Advance {
        if self.cursor >= self.order.len() {
            return Advance::Exhausted;
        }

        let name = self.order[self.cursor].clone();
        self.cursor += 1;
        self.current = Some(name.clone());
        Advance::Exercise {
            name,
            remaining: self.order.len() - self.cursor,
        }
    }

    /// Periodic countdown probe. Pure in `now` and the deadline: remaining
    /// time is recomputed from the absolute deadline rather than decremented
    /// per tick, so variable tick intervals and device sleep cannot skew it.
    /// Expiry fires exactly once; it clears the session, so later probes see
    /// Idle.
    pub fn tick(&mut self, now: Instant) -> TickOutcome {
        if self.phase != Phase::Running {
            return TickOutcome::Idle;
        }

        let remaining = self.remaining_ms(now);
        if remaining == 0 {
            self.clear();
            return TickOutcome::Expired;
        }
        TickOutcome::Remaining(remaining)
    }

    /// User-initiated end of the block. Harmless when already Idle.
    pub fn reset(&mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        self.order.clear();
        self.cursor = 0;
        self.current = None;
        self.deadline = None;
        self.phase = Phase::Idle;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
