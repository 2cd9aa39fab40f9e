use crate::{ContainerRect, Viewport, Zone};

/// Total width of a horizontally laid out sequence.
///
/// `gap` is inserted between adjacent items only (no trailing gap after the last item).
pub fn content_width(item_widths: &[u32], gap: u32) -> u64 {
    let mut total = 0u64;
    for (i, &w) in item_widths.iter().enumerate() {
        total = total.saturating_add(w as u64);
        if gap > 0 && i + 1 < item_widths.len() {
            total = total.saturating_add(gap as u64);
        }
    }
    total
}

/// Measured dimensions of a capture region and its horizontal content.
///
/// This is a plain value: it has no memory of prior measurements, so recomputing with the same
/// inputs always yields an identical result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub container: ContainerRect,
    pub viewport: Viewport,
    /// Height reserved for a fixed page header; the pin line sits this far below the viewport top.
    pub header_offset: u32,
    pub item_count: usize,
    pub content_width: u64,
    /// Horizontal distance that must be traversed to reveal the full sequence.
    pub max_offset: u64,
}

impl Geometry {
    pub fn recompute(
        container: ContainerRect,
        item_widths: &[u32],
        item_gap: u32,
        viewport: Viewport,
        header_offset: u32,
    ) -> Self {
        let content_width = content_width(item_widths, item_gap);
        let max_offset = content_width.saturating_sub(viewport.width as u64);
        ptrace!(
            items = item_widths.len(),
            content_width,
            max_offset,
            viewport_width = viewport.width,
            "Geometry::recompute"
        );
        Self {
            container,
            viewport,
            header_offset,
            item_count: item_widths.len(),
            content_width,
            max_offset,
        }
    }

    /// Whether the region can capture scroll at all.
    ///
    /// Unavailable geometry (nothing measured yet, or nothing to traverse) turns the controller
    /// into a no-op that renders offset 0.
    pub fn is_available(&self) -> bool {
        self.item_count > 0 && self.container.height > 0 && self.max_offset > 0
    }

    /// Classifies a native scroll offset against the pin line.
    ///
    /// Pinned means `top <= header_offset && bottom > header_offset` in viewport coordinates.
    pub fn zone(&self, scroll_y: u64) -> Zone {
        let line = scroll_y.saturating_add(self.header_offset as u64);
        if line < self.container.top {
            Zone::Before
        } else if line < self.container.bottom() {
            Zone::Pinned
        } else {
            Zone::After
        }
    }

    /// Horizontal offset for a progress value; progress outside `[0, 1]` is clamped.
    ///
    /// Unavailable geometry always renders at 0.
    pub fn offset_for(&self, progress: f64) -> f64 {
        if !self.is_available() {
            return 0.0;
        }
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        p * self.max_offset as f64
    }
}
