//! Fixed-cadence timer shared by spawners and auto-typers.

/// Accumulates frame time and reports how many intervals have passed.
///
/// Overshoot carries into the next interval, so the cadence holds at low
/// frame rates. One call fires at most [`RepeatTimer::MAX_CATCH_UP`] times;
/// the rest of a very long frame is dropped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct RepeatTimer {
    elapsed: f32,
}

impl RepeatTimer {
    pub(crate) const MAX_CATCH_UP: u32 = 8;

    pub(crate) fn reset(&mut self) {
        self.elapsed = 0.0;
    }

    /// Adds `dt` and returns the number of whole intervals completed.
    /// A non-positive interval never fires.
    pub(crate) fn advance(&mut self, dt: f32, interval: f32) -> u32 {
        if interval <= 0.0 || dt <= 0.0 {
            return 0;
        }
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= interval && fired < Self::MAX_CATCH_UP {
            self.elapsed -= interval;
            fired += 1;
        }
        if self.elapsed >= interval {
            self.elapsed %= interval;
        }
        fired
    }
}
