//! Shared state abstraction
//!
//! The configuration handler is reached from the SysEx receive path and, on
//! some boards, from interrupt context (e.g. a preset button). [`SharedState`]
//! hides the locking primitive so the gateway can be tested on host:
//!
//! - [`EmbassyState`] wraps Embassy's critical-section blocking mutex
//! - [`MockState`] wraps a `RefCell` for single-threaded tests

/// Locked access to a value
///
/// Each closure runs with the lock held; whatever it does to the value is
/// atomic with respect to every other user of the same state.
pub trait SharedState<T> {
    /// Access the value immutably
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R;

    /// Access the value mutably
    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R;
}

#[cfg(feature = "embassy")]
use embassy_sync::blocking_mutex::{raw::CriticalSectionRawMutex, Mutex};

/// Critical-section protected state for embedded targets
///
/// `new` is const so the handler can live in a `static`.
#[cfg(feature = "embassy")]
pub struct EmbassyState<T> {
    inner: Mutex<CriticalSectionRawMutex, core::cell::RefCell<T>>,
}

#[cfg(feature = "embassy")]
impl<T> EmbassyState<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(core::cell::RefCell::new(value)),
        }
    }
}

#[cfg(feature = "embassy")]
impl<T> SharedState<T> for EmbassyState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }
}

/// `RefCell` state for host tests
///
/// # Panics
///
/// Nested access that would alias a mutable borrow panics, which is how a
/// re-entrant request shows up in tests.
pub struct MockState<T> {
    inner: core::cell::RefCell<T>,
}

impl<T> MockState<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: core::cell::RefCell::new(value),
        }
    }

    /// Unwrap the inner value
    pub fn into_inner(self) -> T {
        self.inner.into_inner()
    }
}

impl<T> SharedState<T> for MockState<T> {
    fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.inner.borrow())
    }

    fn with_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        f(&mut self.inner.borrow_mut())
    }
}
