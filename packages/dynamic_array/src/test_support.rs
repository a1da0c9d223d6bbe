//! Element types for tests that need to observe creation and destruction of values.

use std::cell::Cell;

thread_local! {
    static LIVE: Cell<usize> = const { Cell::new(0) };

    /// How many more values may be created before creation panics. `None` means unlimited.
    static BUDGET: Cell<Option<usize>> = const { Cell::new(None) };
}

/// A value that keeps a per-thread count of live instances and can be told to panic when created.
///
/// Every test runs on its own thread, so the counters of different tests do not interfere.
#[derive(Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct Tracked(pub(crate) u32);

impl Tracked {
    pub(crate) fn new(value: u32) -> Self {
        BUDGET.with(|budget| match budget.get() {
            Some(0) => panic!("Tracked creation budget exhausted"),
            Some(remaining) => budget.set(Some(remaining.checked_sub(1).expect("checked above"))),
            None => {}
        });

        LIVE.with(|live| live.set(live.get().checked_add(1).expect("test never creates that many")));

        Self(value)
    }

    /// Number of instances created on this thread and not yet dropped.
    pub(crate) fn live() -> usize {
        LIVE.with(Cell::get)
    }

    /// Allows `creations` more values to be created, after which creation panics.
    pub(crate) fn panic_after(creations: usize) {
        BUDGET.with(|budget| budget.set(Some(creations)));
    }

    pub(crate) fn reset_budget() {
        BUDGET.with(|budget| budget.set(None));
    }
}

impl Default for Tracked {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        Self::new(self.0)
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        LIVE.with(|live| live.set(live.get().checked_sub(1).expect("dropped more than created")));
    }
}
