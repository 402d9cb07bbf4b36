/// Coarse operation counter for the diagnostics mode
///
/// Passed by `&mut` into every stage that does measurable work. A disabled
/// counter ignores all increments, so callers never need to branch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OpCounter {
    enabled: bool,
    ops: u64,
}

impl OpCounter {
    pub fn enabled() -> Self {
        Self { enabled: true, ops: 0 }
    }

    pub fn disabled() -> Self {
        Self::default()
    }

    /// Fresh counter with the same enabled state
    pub fn fork(&self) -> Self {
        Self { enabled: self.enabled, ops: 0 }
    }

    #[inline]
    pub fn count(&mut self, n: usize) {
        if self.enabled {
            self.ops += n as u64;
        }
    }

    #[inline]
    pub fn tick(&mut self) {
        self.count(1);
    }

    pub fn merge(&mut self, other: OpCounter) {
        self.ops += other.ops;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn total(&self) -> u64 {
        self.ops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_counter_stays_zero() {
        let mut ops = OpCounter::disabled();
        ops.count(10);
        ops.tick();
        assert_eq!(ops.total(), 0);
    }

    #[test]
    fn test_fork_and_merge() {
        let mut total = OpCounter::enabled();
        total.count(3);

        let mut restart = total.fork();
        assert!(restart.is_enabled());
        assert_eq!(restart.total(), 0);
        restart.count(5);

        total.merge(restart);
        assert_eq!(total.total(), 8);
    }
}
