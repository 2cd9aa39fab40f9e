use crate::ConfigError;

/// Progress units per wheel delta unit: ten ticks of `deltaY = 100` traverse the sequence.
pub const DEFAULT_SENSITIVITY: f64 = 0.001;

/// Progress within this distance of 0 or 1 snaps onto the boundary.
pub const DEFAULT_BOUNDARY_EPSILON: f64 = 1e-6;

/// Configuration for the geometry model and [`crate::ProgressMapper`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressOptions {
    /// Height of the fixed page header. The region pins when its top reaches this line.
    pub header_offset: u32,
    /// Converts wheel delta units to progress units. The mapping is linear.
    pub sensitivity: f64,
    /// Spacing between adjacent items, counted into the content width.
    pub item_gap: u32,
    /// Distance from 0 or 1 at which progress is considered to be on the boundary.
    pub boundary_epsilon: f64,
}

impl ProgressOptions {
    pub fn new() -> Self {
        Self {
            header_offset: 0,
            sensitivity: DEFAULT_SENSITIVITY,
            item_gap: 0,
            boundary_epsilon: DEFAULT_BOUNDARY_EPSILON,
        }
    }

    pub fn with_header_offset(mut self, header_offset: u32) -> Self {
        self.header_offset = header_offset;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f64) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_item_gap(mut self, item_gap: u32) -> Self {
        self.item_gap = item_gap;
        self
    }

    pub fn with_boundary_epsilon(mut self, boundary_epsilon: f64) -> Self {
        self.boundary_epsilon = boundary_epsilon;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        if !self.boundary_epsilon.is_finite()
            || self.boundary_epsilon < 0.0
            || self.boundary_epsilon >= 0.5
        {
            return Err(ConfigError::InvalidBoundaryEpsilon(self.boundary_epsilon));
        }
        Ok(())
    }
}

impl Default for ProgressOptions {
    fn default() -> Self {
        Self::new()
    }
}
