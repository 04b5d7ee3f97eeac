use crate::config::consts;

/// Removes the DC offset of a raw sample stream by centring it between the
/// smallest and largest value seen so far.
#[derive(Debug)]
pub struct OffsetTracker {
    min: f32,
    max: f32,
}

impl OffsetTracker {
    pub fn new() -> Self {
        Self {
            min: consts::MAX,
            max: consts::MIN,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Takes `inp` into the running min/max, then returns it minus their midpoint.
    pub fn update(&mut self, inp: f32) -> f32 {
        if inp > self.max {
            self.max = inp;
        }
        if inp < self.min {
            self.min = inp;
        }
        inp - self.midpoint()
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    /// Peak-to-peak amplitude seen so far.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }
}

impl Default for OffsetTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_sample_is_centred() {
        let mut tracker = OffsetTracker::new();
        assert_eq!(tracker.update(2.), 0.);
        assert_eq!(tracker.min(), 2.);
        assert_eq!(tracker.max(), 2.);
        assert_eq!(tracker.span(), 0.);
    }

    #[test]
    fn uses_extremes_seen_so_far() {
        let mut tracker = OffsetTracker::new();
        let input = [2., 3., 1., 2.5, 0., 4., 2.];
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for x in input {
            min = min.min(x);
            max = max.max(x);
            assert_eq!(tracker.update(x), x - (min + max) / 2.);
        }
        assert_eq!(tracker.min(), 0.);
        assert_eq!(tracker.max(), 4.);
        assert_eq!(tracker.midpoint(), 2.);
        assert_eq!(tracker.span(), 4.);
    }

    #[test]
    fn online_not_global() {
        let mut tracker = OffsetTracker::new();
        tracker.update(1.);
        // only 1 and 3 known yet, the later -5 must not leak back
        assert_eq!(tracker.update(3.), 1.);
        assert_eq!(tracker.update(-5.), -4.);
    }

    #[test]
    fn reset_forgets_extremes() {
        let mut tracker = OffsetTracker::new();
        tracker.update(-10.);
        tracker.update(10.);
        tracker.reset();
        assert_eq!(tracker.min(), consts::MAX);
        assert_eq!(tracker.max(), consts::MIN);
        assert_eq!(tracker.update(0.5), 0.);
    }
}
