//! Record Module
//!
//! A stored value together with the time it was last touched.

// == Record ==
/// One stored value and its last-touched timestamp (Unix seconds).
#[derive(Debug, Clone)]
pub(crate) struct Record<V> {
    pub(crate) value: V,
    last_touched: i64,
}

impl<V> Record<V> {
    pub(crate) fn new(value: V, now: i64) -> Self {
        Self {
            value,
            last_touched: now,
        }
    }

    // == Touch ==
    /// Marks the record as used at `now`.
    ///
    /// The timestamp never moves backwards, even if the clock does.
    pub(crate) fn touch(&mut self, now: i64) {
        self.last_touched = self.last_touched.max(now);
    }

    // == Age ==
    /// Seconds elapsed since the last touch, clamped at zero.
    pub(crate) fn age(&self, now: i64) -> i64 {
        now.saturating_sub(self.last_touched).max(0)
    }

    #[cfg(test)]
    pub(crate) fn last_touched(&self) -> i64 {
        self.last_touched
    }
}
