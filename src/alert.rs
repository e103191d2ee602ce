use std::io::Write;
use std::time::{Duration, Instant};

/// Expiry pulse pattern in milliseconds: on, off, on
pub const PULSE_PATTERN_MS: [u64; 3] = [200, 100, 200];

/// Number of "on" segments whose start edge has been reached at `elapsed_ms`
fn on_segments_started(elapsed_ms: u64) -> usize {
    let mut edge = 0;
    let mut started = 0;
    for (i, seg) in PULSE_PATTERN_MS.iter().enumerate() {
        if i % 2 == 0 && elapsed_ms >= edge {
            started += 1;
        }
        edge += seg;
    }
    started
}

/// Short attention pulse played when the countdown expires. Driven by ticks
/// like any other animation: the UI flashes during "on" segments and a
/// terminal bell marks the start of each one. Everything here is best
/// effort; callers ignore ring failures and unsupported terminals.
#[derive(Debug, Default)]
pub struct AlertPulse {
    started_at: Option<Instant>,
    rung: usize,
}

impl AlertPulse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, now: Instant) {
        self.started_at = Some(now);
        self.rung = 0;
    }

    pub fn is_active(&self) -> bool {
        self.started_at.is_some()
    }

    /// Advances the pulse; deactivates once the whole pattern has played.
    /// Returns true while still active.
    pub fn update(&mut self, now: Instant) -> bool {
        if let Some(started_at) = self.started_at {
            if now.duration_since(started_at) >= Self::total() {
                self.started_at = None;
            }
        }
        self.is_active()
    }

    /// True while `now` falls inside an "on" segment of the pattern
    pub fn is_on(&self, now: Instant) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        let elapsed = now.duration_since(started_at).as_millis() as u64;

        let mut edge = 0;
        for (i, seg) in PULSE_PATTERN_MS.iter().enumerate() {
            let next = edge + seg;
            if elapsed < next {
                return i % 2 == 0;
            }
            edge = next;
        }
        false
    }

    /// Rings the terminal bell once per "on" segment reached so far
    pub fn ring<W: Write>(&mut self, now: Instant, out: &mut W) -> std::io::Result<()> {
        let Some(started_at) = self.started_at else {
            return Ok(());
        };
        let elapsed = now.duration_since(started_at).as_millis() as u64;

        let due = on_segments_started(elapsed);
        while self.rung < due {
            out.write_all(b"\x07")?;
            self.rung += 1;
        }
        out.flush()
    }

    fn total() -> Duration {
        Duration::from_millis(PULSE_PATTERN_MS.iter().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_by_default() {
        let pulse = AlertPulse::new();
        assert!(!pulse.is_active());
        assert!(!pulse.is_on(Instant::now()));
    }

    #[test]
    fn test_on_off_segments_follow_the_pattern() {
        let t0 = Instant::now();
        let mut pulse = AlertPulse::new();
        pulse.start(t0);

        // 200ms on, 100ms off, 200ms on
        assert!(pulse.is_on(t0));
        assert!(pulse.is_on(t0 + Duration::from_millis(150)));
        assert!(!pulse.is_on(t0 + Duration::from_millis(250)));
        assert!(pulse.is_on(t0 + Duration::from_millis(350)));
        assert!(!pulse.is_on(t0 + Duration::from_millis(600)));
    }

    #[test]
    fn test_update_deactivates_after_full_pattern() {
        let t0 = Instant::now();
        let mut pulse = AlertPulse::new();
        pulse.start(t0);

        assert!(pulse.update(t0 + Duration::from_millis(499)));
        assert!(!pulse.update(t0 + Duration::from_millis(500)));
        assert!(!pulse.is_active());
    }

    #[test]
    fn test_ring_emits_one_bell_per_on_segment() {
        let t0 = Instant::now();
        let mut pulse = AlertPulse::new();
        pulse.start(t0);

        let mut out: Vec<u8> = vec![];
        pulse.ring(t0, &mut out).unwrap();
        assert_eq!(out, b"\x07");

        // Same segment: no extra bell
        pulse.ring(t0 + Duration::from_millis(100), &mut out).unwrap();
        assert_eq!(out, b"\x07");

        // Second on-segment begins at 300ms
        pulse.ring(t0 + Duration::from_millis(350), &mut out).unwrap();
        assert_eq!(out, b"\x07\x07");
    }

    #[test]
    fn test_ring_when_inactive_is_a_no_op() {
        let mut pulse = AlertPulse::new();
        let mut out: Vec<u8> = vec![];
        pulse.ring(Instant::now(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_restart_resets_bell_count() {
        let t0 = Instant::now();
        let mut pulse = AlertPulse::new();
        pulse.start(t0);

        let mut out: Vec<u8> = vec![];
        pulse.ring(t0 + Duration::from_millis(350), &mut out).unwrap();
        assert_eq!(out.len(), 2);

        let t1 = t0 + Duration::from_secs(10);
        pulse.start(t1);
        pulse.ring(t1, &mut out).unwrap();
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn test_on_segments_started_edges() {
        assert_eq!(on_segments_started(0), 1);
        assert_eq!(on_segments_started(299), 1);
        assert_eq!(on_segments_started(300), 2);
        assert_eq!(on_segments_started(10_000), 2);
    }
}
