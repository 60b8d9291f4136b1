use super::Arena;
use core::cell::UnsafeCell;
use core::ops::{Deref, DerefMut};
use core::sync::atomic::{AtomicBool, Ordering};

/// An arena shared between threads. The arena itself does no locking; every
/// call goes through the guard.
pub type SharedArena<const C: usize, const M: usize> = SpinLock<Arena<C, M>>;

pub struct SpinLock<T> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

impl<T> SpinLock<T> {
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    pub fn lock(&self) -> Guard<'_, T> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            core::hint::spin_loop();
        }
        Guard { lock: self }
    }

    pub fn try_lock(&self) -> Option<Guard<'_, T>> {
        self.locked
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .ok()
            .map(|_| Guard { lock: self })
    }

    /// Drops the guard, and consequently unlocks the mutex.
    pub fn unlock(guard: Guard<'_, T>) {
        drop(guard);
    }

    pub fn into_inner(self) -> T {
        self.value.into_inner()
    }
}

unsafe impl<T> Sync for SpinLock<T> where T: Send {}

/// Exclusive access to the value inside a [`SpinLock`].
///
/// Sharing a guard between threads shares `&T`, so a guard is only `Sync`
/// when `T` is:
///
/// ```compile_fail
/// use core::cell::Cell;
/// use micro_arena::{Guard, SpinLock};
///
/// fn assert_sync<S: Sync>(_: &S) {}
///
/// let lock = SpinLock::new(Cell::new(0u64));
/// let guard: Guard<'_, Cell<u64>> = lock.lock();
/// assert_sync(&guard);
/// ```
pub struct Guard<'a, T> {
    lock: &'a SpinLock<T>,
}

unsafe impl<T> Sync for Guard<'_, T> where T: Sync {}

// Associated functions rather than methods, so they never shadow methods of
// `T` reached through `Deref`.
impl<T> Guard<'_, T> {
    pub fn get<'g>(guard: &'g Self) -> &'g T {
        // SAFETY: If we have a guard, then we have exclusively locked the lock
        unsafe { &*guard.lock.value.get() }
    }

    /// Returns a mutable reference to the underlying data.
    pub fn get_mut<'g>(guard: &'g mut Self) -> &'g mut T {
        // SAFETY: If we have a guard, then we have exclusively locked the lock,
        // and the `&mut` borrow keeps this the only live reference through it
        unsafe { &mut *guard.lock.value.get() }
    }
}

impl<T> Deref for Guard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        Guard::get(self)
    }
}

impl<T> DerefMut for Guard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        Guard::get_mut(self)
    }
}

impl<T> Drop for Guard<'_, T> {
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}
