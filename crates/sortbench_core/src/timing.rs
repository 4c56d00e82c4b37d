//! Cycle counter abstraction used to time both sort paths.

/// A monotonic tick counter that can be started, paused and cleared.
///
/// On the target this is the free-running system timer; ticks are clock
/// cycles. Host implementations may count in other units as long as both
/// sort paths are timed by the same counter.
pub trait CycleCounter {
    /// Resets the accumulated count to zero.
    fn clear(&mut self);

    /// Starts or resumes counting.
    fn start(&mut self);

    /// Pauses counting. The current value is retained.
    fn stop(&mut self);

    /// Returns the accumulated count.
    fn read_ticks(&mut self) -> u64;
}

impl<C: CycleCounter + ?Sized> CycleCounter for &mut C {
    fn clear(&mut self) {
        (**self).clear()
    }

    fn start(&mut self) {
        (**self).start()
    }

    fn stop(&mut self) {
        (**self).stop()
    }

    fn read_ticks(&mut self) -> u64 {
        (**self).read_ticks()
    }
}
