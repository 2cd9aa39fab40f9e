use alloc::vec::Vec;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    Pending,
    Loaded,
    /// Resolved without a usable intrinsic size; the last-known width is kept.
    Failed,
}

/// Bounded fan-in over the item images of a sequence.
///
/// Unloaded images report zero intrinsic width, so geometry is only worth computing once every
/// image has resolved. A failed image counts as resolved, so one broken asset never blocks
/// geometry.
#[derive(Clone, Debug, Default)]
pub struct ImageLoadTracker {
    widths: Vec<u32>,
    states: Vec<LoadState>,
    pending: usize,
}

impl ImageLoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the tracked set.
    ///
    /// `Some(width)` marks an image that is already complete (e.g. served from cache); `None`
    /// marks one still loading, with a provisional width of 0.
    pub fn reset(&mut self, items: &[Option<u32>]) {
        self.widths.clear();
        self.states.clear();
        self.pending = 0;
        for item in items {
            match item {
                Some(w) => {
                    self.widths.push(*w);
                    self.states.push(LoadState::Loaded);
                }
                None => {
                    self.widths.push(0);
                    self.states.push(LoadState::Pending);
                    self.pending += 1;
                }
            }
        }
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn is_settled(&self) -> bool {
        self.pending == 0
    }

    pub fn state(&self, index: usize) -> Option<LoadState> {
        self.states.get(index).copied()
    }

    /// Current widths (provisional 0 for pending images).
    pub fn widths(&self) -> &[u32] {
        &self.widths
    }

    /// Records a successful load.
    ///
    /// Returns `true` when geometry should be recomputed: this load settled the set, or it
    /// changed the width of an item in an already settled set.
    pub fn on_loaded(&mut self, index: usize, width: u32) -> bool {
        let Some(state) = self.states.get(index).copied() else {
            pwarn!(index, len = self.states.len(), "on_loaded: index out of range");
            return false;
        };
        let changed = self.widths[index] != width;
        self.widths[index] = width;
        self.states[index] = LoadState::Loaded;
        self.resolve(state, changed)
    }

    /// Records a failed load. The item keeps its last-known width.
    pub fn on_failed(&mut self, index: usize) -> bool {
        let Some(state) = self.states.get(index).copied() else {
            pwarn!(index, len = self.states.len(), "on_failed: index out of range");
            return false;
        };
        if state != LoadState::Pending {
            return false;
        }
        self.states[index] = LoadState::Failed;
        self.resolve(state, false)
    }

    fn resolve(&mut self, previous: LoadState, changed: bool) -> bool {
        if previous == LoadState::Pending {
            self.pending = self.pending.saturating_sub(1);
            ptrace!(pending = self.pending, "image resolved");
            return self.pending == 0;
        }
        changed && self.pending == 0
    }
}
