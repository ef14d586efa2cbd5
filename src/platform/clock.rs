//! Frame time sources

/// Supplies the seconds elapsed since the previous frame
pub trait Clock {
    fn delta_seconds(&mut self) -> f32;
}

/// Constant frame delta (headless runs, tests)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub f32);

impl Clock for FixedClock {
    fn delta_seconds(&mut self) -> f32 {
        self.0
    }
}

/// Clock fed with host frame timestamps in milliseconds
/// (`requestAnimationFrame`). The first frame, and any frame without a
/// new stamp, reports 0.
#[derive(Debug, Default)]
pub struct TimestampClock {
    last: Option<f64>,
    now: Option<f64>,
}

impl TimestampClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stamp(&mut self, now_ms: f64) {
        self.now = Some(now_ms);
    }
}

impl Clock for TimestampClock {
    fn delta_seconds(&mut self) -> f32 {
        let Some(now) = self.now else {
            return 0.0;
        };
        let dt = self
            .last
            .map(|last| ((now - last) / 1000.0) as f32)
            .unwrap_or(0.0);
        self.last = Some(now);
        // Clock skew can run backwards
        dt.max(0.0)
    }
}

/// Wall clock; the first call returns 0
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default)]
pub struct SystemClock {
    last: Option<std::time::Instant>,
}

#[cfg(not(target_arch = "wasm32"))]
impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Clock for SystemClock {
    fn delta_seconds(&mut self) -> f32 {
        let now = std::time::Instant::now();
        let dt = self
            .last
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last = Some(now);
        dt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_clock() {
        let mut clock = TimestampClock::new();
        assert_eq!(clock.delta_seconds(), 0.0);

        clock.stamp(1000.0);
        assert_eq!(clock.delta_seconds(), 0.0);
        clock.stamp(1016.0);
        assert!((clock.delta_seconds() - 0.016).abs() < 1e-6);
        // Same stamp read twice: nothing elapsed
        assert_eq!(clock.delta_seconds(), 0.0);

        clock.stamp(900.0);
        assert_eq!(clock.delta_seconds(), 0.0);
        clock.stamp(950.0);
        assert!((clock.delta_seconds() - 0.05).abs() < 1e-6);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_system_clock_starts_at_zero() {
        let mut clock = SystemClock::new();
        assert_eq!(clock.delta_seconds(), 0.0);
        assert!(clock.delta_seconds() >= 0.0);
    }

    #[test]
    fn test_fixed_clock() {
        let mut clock = FixedClock(0.25);
        assert_eq!(clock.delta_seconds(), 0.25);
        assert_eq!(clock.delta_seconds(), 0.25);
    }
}
