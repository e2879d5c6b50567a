//! Init-once cell for process-wide subsystem bring-up
//!
//! Platforms keep one of these in a `static` and route
//! [`Platform::initialize`](crate::Platform::initialize) through
//! [`InitOnce::call`]. A failed attempt leaves the cell uninitialized so the
//! next driver constructor tries again.

use portable_atomic::{AtomicU8, Ordering};

const UNINIT: u8 = 0;
const RUNNING: u8 = 1;
const DONE: u8 = 2;

/// Runs an initializer at most once successfully
pub struct InitOnce {
    state: AtomicU8,
}

impl Default for InitOnce {
    fn default() -> Self {
        Self::new()
    }
}

impl InitOnce {
    /// Create an uninitialized cell
    pub const fn new() -> Self {
        Self {
            state: AtomicU8::new(UNINIT),
        }
    }

    /// Check whether an initializer has completed successfully
    pub fn is_initialized(&self) -> bool {
        self.state.load(Ordering::Acquire) == DONE
    }

    /// Run `init` unless a previous call already succeeded
    ///
    /// A caller that races with a running initializer spins until it
    /// finishes, then either returns `Ok` or retries the initializer itself
    /// if the first attempt failed.
    pub fn call<E>(&self, init: impl FnOnce() -> Result<(), E>) -> Result<(), E> {
        loop {
            match self
                .state
                .compare_exchange(UNINIT, RUNNING, Ordering::Acquire, Ordering::Acquire)
            {
                Ok(_) => {
                    return match init() {
                        Ok(()) => {
                            self.state.store(DONE, Ordering::Release);
                            Ok(())
                        }
                        Err(e) => {
                            self.state.store(UNINIT, Ordering::Release);
                            Err(e)
                        }
                    };
                }
                Err(DONE) => return Ok(()),
                Err(_) => core::hint::spin_loop(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_runs_once() {
        let once = InitOnce::new();
        let calls = Cell::new(0);

        for _ in 0..3 {
            let r: Result<(), ()> = once.call(|| {
                calls.set(calls.get() + 1);
                Ok(())
            });
            assert!(r.is_ok());
        }

        assert_eq!(calls.get(), 1);
        assert!(once.is_initialized());
    }

    #[test]
    fn test_failure_allows_retry() {
        let once = InitOnce::new();

        let r = once.call(|| Err("bus down"));
        assert_eq!(r, Err("bus down"));
        assert!(!once.is_initialized());

        let r: Result<(), &str> = once.call(|| Ok(()));
        assert!(r.is_ok());
        assert!(once.is_initialized());
    }

    #[test]
    fn test_static_cell() {
        static SUBSYSTEM: InitOnce = InitOnce::new();

        let r: Result<(), ()> = SUBSYSTEM.call(|| Ok(()));
        assert!(r.is_ok());
        assert!(SUBSYSTEM.is_initialized());
    }
}
