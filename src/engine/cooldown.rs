//! Frame-counted debounce timer

/// Countdown measured in processed frames.
///
/// `trigger` arms the timer at its full duration; each `tick` takes one frame
/// off until it rests at zero, at which point the guarded action may fire
/// again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cooldown {
    remaining: u32,
    duration: u32,
}

impl Cooldown {
    pub fn new(duration: u32) -> Self {
        Self {
            remaining: 0,
            duration,
        }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn trigger(&mut self) {
        self.remaining = self.duration;
    }

    pub fn is_ready(&self) -> bool {
        self.remaining == 0
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_cooldown_is_ready() {
        let cooldown = Cooldown::new(10);
        assert!(cooldown.is_ready());
        assert_eq!(cooldown.remaining(), 0);
        assert_eq!(cooldown.duration(), 10);
    }

    #[test]
    fn test_trigger_then_count_down() {
        let mut cooldown = Cooldown::new(3);
        cooldown.trigger();
        assert_eq!(cooldown.remaining(), 3);
        assert!(!cooldown.is_ready());

        cooldown.tick();
        assert_eq!(cooldown.remaining(), 2);
        cooldown.tick();
        cooldown.tick();
        assert!(cooldown.is_ready());
    }

    #[test]
    fn test_tick_never_goes_below_zero() {
        let mut cooldown = Cooldown::new(1);
        cooldown.tick();
        cooldown.tick();
        assert_eq!(cooldown.remaining(), 0);
    }
}
