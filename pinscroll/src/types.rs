/// The current window extent, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Position and extent of the capture region in page coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContainerRect {
    pub top: u64,
    pub height: u64,
}

impl ContainerRect {
    pub fn new(top: u64, height: u64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> u64 {
        self.top.saturating_add(self.height)
    }
}

/// Where the capture region sits relative to the header line for a given native scroll offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Zone {
    /// The region's top is still below the header line.
    Before,
    /// The region's top reached the header line and its bottom has not passed it.
    Pinned,
    /// The region's bottom passed the header line.
    After,
}

/// Phase of the progress state machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Phase {
    /// Region not reached yet. Progress is forced to 0.
    #[default]
    Before,
    /// Region pinned, native scroll free. Progress sits on a boundary (or the lock was forced
    /// off while the region stayed pinned).
    PinnedUnlocked,
    /// Region pinned, native scroll suspended, progress strictly interior.
    PinnedLocked,
    /// Region scrolled past. Progress is forced to 1.
    After,
}

impl Phase {
    pub fn is_pinned(self) -> bool {
        matches!(self, Self::PinnedUnlocked | Self::PinnedLocked)
    }

    pub fn is_locked(self) -> bool {
        self == Self::PinnedLocked
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Boundary {
    Start,
    End,
}

/// What the host should do with a wheel event after the controller handled it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WheelDisposition {
    /// The controller consumed the delta; the host must prevent native scrolling.
    Intercept,
    /// The event must propagate to native scrolling untouched.
    PassThrough,
}

impl WheelDisposition {
    pub fn is_intercepted(self) -> bool {
        self == Self::Intercept
    }
}
