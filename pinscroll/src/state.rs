use crate::Phase;

/// An immutable copy of the authoritative progress state.
///
/// Renderers and change callbacks receive this instead of a reference into the controller, so
/// nothing outside the controller can mutate progress.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProgressSnapshot {
    pub progress: f64,
    pub phase: Phase,
    pub locked: bool,
    /// Native scroll offset captured when the lock was acquired (`None` while unlocked).
    pub saved_scroll_y: Option<u64>,
}
