//! Leading-edge throttle for noisy event streams.

use std::time::{Duration, Instant};

/// Lets the first call through, then drops calls until `cooldown` has
/// passed since the last accepted one.
#[derive(Debug, Clone)]
pub struct Throttle {
    cooldown: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last: None,
        }
    }

    /// Whether a call at `now` should run. Accepting it starts a cooldown.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.cooldown => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drops_calls_inside_cooldown() {
        let start = Instant::now();
        let mut throttle = Throttle::new(Duration::from_millis(100));

        assert!(throttle.ready(start));
        assert!(!throttle.ready(start + Duration::from_millis(10)));
        assert!(!throttle.ready(start + Duration::from_millis(99)));
        assert!(throttle.ready(start + Duration::from_millis(100)));
        assert!(!throttle.ready(start + Duration::from_millis(150)));
    }
}
