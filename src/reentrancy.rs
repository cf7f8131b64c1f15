//! Debug-only guard against nested entry into an `AssocMap`.
//!
//! Chain walks call user code (`PartialEq` on keys). If that code reaches
//! back into the same map while a walk or an unlink is half done, it would
//! observe a chain in flux. Debug builds panic on the nested entry; release
//! builds compile the guard away.

#[cfg(debug_assertions)]
use core::cell::Cell;
#[cfg(not(debug_assertions))]
use core::marker::PhantomData;

/// Embedded in the map; `enter` marks a chain walk as in progress.
#[derive(Debug, Default)]
pub(crate) struct WalkGuard {
    #[cfg(debug_assertions)]
    walking: Cell<bool>,
}

impl WalkGuard {
    pub(crate) const fn new() -> Self {
        Self {
            #[cfg(debug_assertions)]
            walking: Cell::new(false),
        }
    }

    #[inline]
    pub(crate) fn enter(&self) -> Walking<'_> {
        #[cfg(debug_assertions)]
        {
            assert!(
                !self.walking.replace(true),
                "AssocMap re-entered while a chain walk was in progress"
            );
            Walking { guard: self }
        }

        #[cfg(not(debug_assertions))]
        {
            Walking { _pd: PhantomData }
        }
    }
}

/// Clears the in-progress mark when dropped.
pub(crate) struct Walking<'a> {
    #[cfg(debug_assertions)]
    guard: &'a WalkGuard,
    #[cfg(not(debug_assertions))]
    _pd: PhantomData<&'a ()>,
}

impl Drop for Walking<'_> {
    fn drop(&mut self) {
        #[cfg(debug_assertions)]
        self.guard.walking.set(false);
    }
}
