use alloc::sync::Arc;

use pinscroll::{ConfigError, ProgressOptions, ProgressSnapshot};

use crate::Easing;

/// A callback fired after a handler call changed progress, phase or lock state.
pub type OnChangeCallback = Arc<dyn Fn(&ProgressSnapshot) + Send + Sync>;

/// Duration of eased transitions for discrete updates (geometry settling after image loads).
pub const DEFAULT_SMOOTH_DURATION_MS: u64 = 450;

/// Configuration for [`crate::Controller`].
///
/// Cheap to clone: the callback is stored in an `Arc`.
#[derive(Clone)]
pub struct ControllerOptions {
    pub progress: ProgressOptions,
    /// Duration of eased (`smooth`) offset transitions. 0 disables easing.
    pub smooth_duration_ms: u64,
    pub easing: Easing,
    pub on_change: Option<OnChangeCallback>,
}

impl ControllerOptions {
    pub fn new() -> Self {
        Self {
            progress: ProgressOptions::new(),
            smooth_duration_ms: DEFAULT_SMOOTH_DURATION_MS,
            easing: Easing::default(),
            on_change: None,
        }
    }

    pub fn with_progress(mut self, progress: ProgressOptions) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_header_offset(mut self, header_offset: u32) -> Self {
        self.progress.header_offset = header_offset;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.progress.sensitivity = sensitivity;
        self
    }

    pub fn with_item_gap(mut self, item_gap: u32) -> Self {
        self.progress.item_gap = item_gap;
        self
    }

    pub fn with_boundary_epsilon(mut self, boundary_epsilon: f64) -> Self {
        self.progress.boundary_epsilon = boundary_epsilon;
        self
    }

    pub fn with_smooth_duration_ms(mut self, smooth_duration_ms: u64) -> Self {
        self.smooth_duration_ms = smooth_duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_on_change(
        mut self,
        on_change: Option<impl Fn(&ProgressSnapshot) + Send + Sync + 'static>,
    ) -> Self {
        self.on_change = on_change.map(|f| Arc::new(f) as _);
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.progress.validate()
    }
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for ControllerOptions {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ControllerOptions")
            .field("progress", &self.progress)
            .field("smooth_duration_ms", &self.smooth_duration_ms)
            .field("easing", &self.easing)
            .finish_non_exhaustive()
    }
}
