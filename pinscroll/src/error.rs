/// Rejected configuration values.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("sensitivity must be finite and greater than zero (got {0})")]
    InvalidSensitivity(f64),
    #[error("boundary epsilon must be finite and within [0, 0.5) (got {0})")]
    InvalidBoundaryEpsilon(f64),
}
