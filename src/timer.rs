use {
    crate::definitions::timer::INTERVAL,
    num_traits::{PrimInt, Unsigned},
    std::time::Duration,
};

/// Represents a timer inside of the chip
/// infrastruture, it will count down to
/// zero from what ever number given, one
/// step per tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timer<T = u8>
where
    T: PrimInt + Unsigned,
{
    /// will store the value of the timer
    value: T,
}

impl<T> Timer<T>
where
    T: PrimInt + Unsigned,
{
    /// Will create a new timer with the given value.
    pub fn new(value: T) -> Self {
        Self { value }
    }

    /// Will set the value from which the timer shall count down from.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    /// Will get the value that the counter is currently at.
    pub fn get_value(&self) -> T {
        self.value
    }

    /// Counts down by one, a timer at zero stays at zero.
    pub fn tick(&mut self) {
        self.value = self.value.saturating_sub(T::one());
    }

    /// Checks if the timer is still counting.
    pub fn is_active(&self) -> bool {
        !self.value.is_zero()
    }
}

/// Converts the time reported by the host into ticks at a fixed rate.
///
/// Time that doesn't add up to a full tick is carried over into the next
/// call, so that no time is lost between frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Regulator {
    interval: Duration,
    pending: Duration,
}

impl Default for Regulator {
    fn default() -> Self {
        Self::new(INTERVAL)
    }
}

impl Regulator {
    pub fn new(interval: Duration) -> Self {
        assert!(!interval.is_zero(), "A regulator needs a non zero interval.");
        Self {
            interval,
            pending: Duration::ZERO,
        }
    }

    /// Will add the elapsed time and return the amount of ticks that are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.pending += elapsed;
        let mut ticks = 0;
        while self.pending >= self.interval {
            self.pending -= self.interval;
            ticks += 1;
        }
        ticks
    }

    pub fn pending(&self) -> Duration {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definitions::timer::HERTZ;

    #[test]
    fn test_timer() {
        let mut timer: Timer = Timer::new(2);
        assert!(timer.is_active());

        timer.tick();
        assert_eq!(timer.get_value(), 1);
        timer.tick();
        assert_eq!(timer.get_value(), 0);
        assert!(!timer.is_active());

        // saturates at zero
        timer.tick();
        assert_eq!(timer.get_value(), 0);
    }

    #[test]
    fn test_wide_timer() {
        let mut timer = Timer::new(0x100u16);
        timer.tick();
        assert_eq!(timer.get_value(), 0xFF);
    }

    #[test]
    fn test_regulator_one_second() {
        let mut regulator = Regulator::default();
        let ticks: u32 = (0..10)
            .map(|_| regulator.advance(Duration::from_millis(100)))
            .sum();
        // 60 ticks fit into a second, give or take the rounding of the interval
        assert!((HERTZ - 1..=HERTZ).contains(&ticks), "{} ticks", ticks);
    }

    #[test]
    fn test_regulator_carries_remainder() {
        let mut regulator = Regulator::new(Duration::from_millis(10));
        assert_eq!(regulator.advance(Duration::from_millis(4)), 0);
        assert_eq!(regulator.advance(Duration::from_millis(4)), 0);
        assert_eq!(regulator.advance(Duration::from_millis(4)), 1);
        assert_eq!(regulator.pending(), Duration::from_millis(2));
        assert_eq!(regulator.advance(Duration::from_millis(38)), 4);
        assert_eq!(regulator.pending(), Duration::ZERO);
    }
}
