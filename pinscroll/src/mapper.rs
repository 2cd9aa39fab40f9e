use crate::{Boundary, Phase, ProgressOptions, Zone};

/// What the lock must do to follow a phase change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LockAction {
    Hold,
    Acquire,
    Release,
}

/// A phase change reported by [`ProgressMapper`].
///
/// The mapper never touches the lock itself. The caller executes [`Transition::lock_action`]
/// in the same handler call that produced the transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

impl Transition {
    fn stay(phase: Phase) -> Self {
        Self {
            from: phase,
            to: phase,
        }
    }

    pub fn is_change(self) -> bool {
        self.from != self.to
    }

    pub fn lock_action(self) -> LockAction {
        match (self.from.is_locked(), self.to.is_locked()) {
            (false, true) => LockAction::Acquire,
            (true, false) => LockAction::Release,
            _ => LockAction::Hold,
        }
    }
}

/// The progress state machine.
///
/// Phases and their transitions:
///
/// | from             | event                                   | to               |
/// |------------------|-----------------------------------------|------------------|
/// | any              | zone `Before`                           | `Before` (p = 0) |
/// | any              | zone `After`                            | `After` (p = 1)  |
/// | any              | zone `Pinned`, p interior, capturable   | `PinnedLocked`   |
/// | any              | zone `Pinned`, otherwise                | `PinnedUnlocked` |
/// | `PinnedUnlocked` | [`engage`](Self::engage)                | `PinnedLocked`   |
/// | `PinnedLocked`   | [`advance`](Self::advance) onto 0 or 1  | `PinnedUnlocked` |
/// | `PinnedLocked`   | [`disengage`](Self::disengage)          | `PinnedUnlocked` |
///
/// `PinnedLocked` is never left without the caller seeing a [`LockAction::Release`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressMapper {
    progress: f64,
    phase: Phase,
    sensitivity: f64,
    boundary_epsilon: f64,
}

impl ProgressMapper {
    pub fn new(options: &ProgressOptions) -> Self {
        Self {
            progress: 0.0,
            phase: Phase::Before,
            sensitivity: options.sensitivity,
            boundary_epsilon: options.boundary_epsilon,
        }
    }

    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_locked(&self) -> bool {
        self.phase.is_locked()
    }

    pub fn sensitivity(&self) -> f64 {
        self.sensitivity
    }

    pub fn set_options(&mut self, options: &ProgressOptions) {
        self.sensitivity = options.sensitivity;
        self.boundary_epsilon = options.boundary_epsilon;
        self.progress = self.snap(self.progress);
    }

    pub fn boundary(&self) -> Option<Boundary> {
        if self.progress <= 0.0 {
            Some(Boundary::Start)
        } else if self.progress >= 1.0 {
            Some(Boundary::End)
        } else {
            None
        }
    }

    pub fn is_interior(&self) -> bool {
        self.boundary().is_none()
    }

    fn snap(&self, progress: f64) -> f64 {
        let p = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        if p <= self.boundary_epsilon {
            0.0
        } else if p >= 1.0 - self.boundary_epsilon {
            1.0
        } else {
            p
        }
    }

    fn enter(&mut self, to: Phase) -> Transition {
        let from = self.phase;
        self.phase = to;
        if from != to {
            ptrace!(?from, ?to, progress = self.progress, "ProgressMapper transition");
        }
        Transition { from, to }
    }

    /// Applies the zone derived from the native scroll offset.
    ///
    /// `capturable` is false when geometry is unavailable or the page is hidden; the mapper then
    /// never enters (and leaves) `PinnedLocked`.
    pub fn on_zone(&mut self, zone: Zone, capturable: bool) -> Transition {
        let to = match zone {
            Zone::Before => {
                self.progress = 0.0;
                Phase::Before
            }
            Zone::After => {
                self.progress = 1.0;
                Phase::After
            }
            Zone::Pinned if capturable && self.is_interior() => Phase::PinnedLocked,
            Zone::Pinned => Phase::PinnedUnlocked,
        };
        self.enter(to)
    }

    /// Whether a wheel delta should be taken over by the controller.
    ///
    /// While locked every event is owned. While pinned but unlocked, only a delta that moves
    /// progress away from its boundary (into the interior) is taken; an outward delta at a
    /// boundary propagates to native scrolling.
    pub fn wants_delta(&self, delta: f64) -> bool {
        match self.phase {
            Phase::PinnedLocked => true,
            Phase::PinnedUnlocked => {
                if !delta.is_finite() || delta == 0.0 {
                    return false;
                }
                match self.boundary() {
                    Some(Boundary::Start) => delta > 0.0,
                    Some(Boundary::End) => delta < 0.0,
                    None => true,
                }
            }
            Phase::Before | Phase::After => false,
        }
    }

    /// `PinnedUnlocked` → `PinnedLocked`. Any other phase is left unchanged.
    pub fn engage(&mut self) -> Transition {
        if self.phase != Phase::PinnedUnlocked {
            return Transition::stay(self.phase);
        }
        self.enter(Phase::PinnedLocked)
    }

    /// `PinnedLocked` → `PinnedUnlocked` without touching progress.
    ///
    /// Used for forced releases (page hidden, geometry lost, acquisition refused).
    pub fn disengage(&mut self) -> Transition {
        if self.phase != Phase::PinnedLocked {
            return Transition::stay(self.phase);
        }
        self.enter(Phase::PinnedUnlocked)
    }

    /// Applies a wheel delta while locked: `progress += delta * sensitivity`, clamped.
    ///
    /// Landing on a boundary moves to `PinnedUnlocked` in the same call, so the next outward
    /// tick is not swallowed.
    pub fn advance(&mut self, delta: f64) -> Transition {
        if self.phase != Phase::PinnedLocked || !delta.is_finite() {
            return Transition::stay(self.phase);
        }
        self.progress = self.snap(self.progress + delta * self.sensitivity);
        if self.is_interior() {
            return Transition::stay(self.phase);
        }
        self.enter(Phase::PinnedUnlocked)
    }

    /// Re-applies clamping and the forced values of `Before`/`After`.
    pub fn reclamp(&mut self) {
        self.progress = match self.phase {
            Phase::Before => 0.0,
            Phase::After => 1.0,
            Phase::PinnedUnlocked | Phase::PinnedLocked => self.snap(self.progress),
        };
    }
}
