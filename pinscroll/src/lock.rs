use alloc::vec::Vec;
use core::fmt;

/// The page's native vertical scroll, as seen by the lock.
///
/// This is the only seam through which the controller touches global page state. A DOM binding
/// would implement it with `window.scrollY`, `position: fixed` on the body and `window.scrollTo`;
/// tests use [`MemoryBackend`].
pub trait ScrollBackend {
    /// The current native scroll offset. While frozen, this is the pinned visual offset.
    fn scroll_position(&self) -> u64;

    /// Whether native scrolling is currently suspended (by anyone).
    fn is_frozen(&self) -> bool;

    /// Suspends native scrolling and pins the page visually at `at`.
    fn freeze(&mut self, at: u64);

    /// Restores native scrolling capability.
    fn unfreeze(&mut self);

    /// Moves the page to `position` without animation.
    fn scroll_to(&mut self, position: u64);
}

impl<B: ScrollBackend + ?Sized> ScrollBackend for &mut B {
    fn scroll_position(&self) -> u64 {
        (**self).scroll_position()
    }

    fn is_frozen(&self) -> bool {
        (**self).is_frozen()
    }

    fn freeze(&mut self, at: u64) {
        (**self).freeze(at);
    }

    fn unfreeze(&mut self) {
        (**self).unfreeze();
    }

    fn scroll_to(&mut self, position: u64) {
        (**self).scroll_to(position);
    }
}

/// Exclusive, idempotent ownership of the page's native scroll.
///
/// Every successful [`acquire`](Self::acquire) is matched by a release: explicitly, or when the
/// lock is dropped.
pub struct ScrollLock<B: ScrollBackend> {
    backend: B,
    saved: Option<u64>,
    acquires: u64,
    releases: u64,
}

impl<B: ScrollBackend> ScrollLock<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            saved: None,
            acquires: 0,
            releases: 0,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    pub fn is_held(&self) -> bool {
        self.saved.is_some()
    }

    /// The native offset recorded by the current acquisition.
    pub fn saved_scroll_y(&self) -> Option<u64> {
        self.saved
    }

    pub fn acquire_count(&self) -> u64 {
        self.acquires
    }

    pub fn release_count(&self) -> u64 {
        self.releases
    }

    /// Records the current offset and freezes the page.
    ///
    /// Returns `true` when the lock is held after the call. A no-op while already held. Returns
    /// `false` without touching the page when another owner has already frozen it.
    pub fn acquire(&mut self) -> bool {
        if self.saved.is_some() {
            return true;
        }
        if self.backend.is_frozen() {
            pwarn!("ScrollLock::acquire: page already frozen by another owner");
            return false;
        }
        let at = self.backend.scroll_position();
        self.backend.freeze(at);
        self.saved = Some(at);
        self.acquires = self.acquires.saturating_add(1);
        pdebug!(saved_scroll_y = at, "ScrollLock::acquire");
        true
    }

    /// Unfreezes the page and restores the offset recorded at acquisition.
    ///
    /// Returns the offset the page was moved to, or `None` when the lock was not held.
    pub fn release(&mut self) -> Option<u64> {
        let saved = self.saved?;
        Some(self.finish_release(saved))
    }

    /// Unfreezes the page and moves it to `target` instead of the recorded offset.
    ///
    /// Used when the region is left through a boundary or a programmatic jump, so native
    /// scrolling continues from that exact point.
    pub fn release_to(&mut self, target: u64) -> Option<u64> {
        self.saved?;
        Some(self.finish_release(target))
    }

    fn finish_release(&mut self, target: u64) -> u64 {
        self.saved = None;
        self.backend.unfreeze();
        self.backend.scroll_to(target);
        self.releases = self.releases.saturating_add(1);
        pdebug!(target, "ScrollLock::release");
        target
    }
}

impl<B: ScrollBackend> Drop for ScrollLock<B> {
    fn drop(&mut self) {
        if self.saved.is_some() {
            pwarn!("ScrollLock dropped while held; releasing");
            self.release();
        }
    }
}

impl<B: ScrollBackend> fmt::Debug for ScrollLock<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollLock")
            .field("saved", &self.saved)
            .field("acquires", &self.acquires)
            .field("releases", &self.releases)
            .finish_non_exhaustive()
    }
}

/// An in-memory page used by tests, demos and headless hosts.
///
/// User scrolling is refused while frozen, like a page whose body is pinned in place.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryBackend {
    position: u64,
    frozen_at: Option<u64>,
    jumps: Vec<u64>,
}

impl MemoryBackend {
    pub fn new(position: u64) -> Self {
        Self {
            position,
            frozen_at: None,
            jumps: Vec::new(),
        }
    }

    /// Simulates a native user scroll. Returns `false` (and does nothing) while frozen.
    pub fn user_scroll_to(&mut self, position: u64) -> bool {
        if self.frozen_at.is_some() {
            return false;
        }
        self.position = position;
        true
    }

    /// Offsets passed to `scroll_to`, oldest first.
    pub fn jumps(&self) -> &[u64] {
        &self.jumps
    }
}

impl ScrollBackend for MemoryBackend {
    fn scroll_position(&self) -> u64 {
        self.frozen_at.unwrap_or(self.position)
    }

    fn is_frozen(&self) -> bool {
        self.frozen_at.is_some()
    }

    fn freeze(&mut self, at: u64) {
        self.frozen_at = Some(at);
    }

    fn unfreeze(&mut self) {
        self.frozen_at = None;
    }

    fn scroll_to(&mut self, position: u64) {
        self.position = position;
        self.jumps.push(position);
    }
}
