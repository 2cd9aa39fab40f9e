use pinscroll::{Geometry, ProgressSnapshot};

use crate::{Easing, Tween};

/// One coalesced visual update for the host to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderFrame {
    /// Horizontal translation to apply to the sequence, in pixels (content moves left).
    pub offset: f64,
    pub snapshot: ProgressSnapshot,
    /// `true` while an eased transition is still running; request another frame.
    pub animating: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Pending {
    smooth: bool,
}

/// Turns progress snapshots into horizontal offsets, at most once per animation frame.
///
/// The host calls [`request_frame`](Self::request_frame) after feeding events; when it returns
/// `true`, the host schedules one animation-frame callback that calls
/// [`frame`](Self::frame).
#[derive(Clone, Debug)]
pub struct RenderSync {
    target: f64,
    rendered: f64,
    snapshot: ProgressSnapshot,
    pending: Option<Pending>,
    tween: Option<Tween>,
    frame_requested: bool,
    duration_ms: u64,
    easing: Easing,
}

impl RenderSync {
    pub fn new(duration_ms: u64, easing: Easing) -> Self {
        Self {
            target: 0.0,
            rendered: 0.0,
            snapshot: ProgressSnapshot::default(),
            pending: None,
            tween: None,
            frame_requested: false,
            duration_ms,
            easing,
        }
    }

    pub fn set_transition(&mut self, duration_ms: u64, easing: Easing) {
        self.duration_ms = duration_ms;
        self.easing = easing;
    }

    /// Records a new target offset `progress * max_offset`.
    ///
    /// Nothing is drawn until the next [`frame`](Self::frame); repeated calls in between
    /// collapse into one update carrying the latest snapshot and the latest `smooth` flag.
    pub fn apply(&mut self, snapshot: ProgressSnapshot, geometry: &Geometry, smooth: bool) {
        let target = geometry.offset_for(snapshot.progress);
        let settled = self.pending.is_none() && self.tween.is_none();
        if settled && snapshot == self.snapshot && target == self.rendered {
            return;
        }
        self.snapshot = snapshot;
        self.target = target;
        self.pending = Some(Pending { smooth });
    }

    /// The authoritative offset for the latest applied progress.
    pub fn target_offset(&self) -> f64 {
        self.target
    }

    /// The offset delivered by the most recent frame.
    pub fn rendered_offset(&self) -> f64 {
        self.rendered
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some() || self.tween.is_some()
    }

    /// Returns `true` once per outstanding update: the caller should schedule a frame.
    pub fn request_frame(&mut self) -> bool {
        if self.frame_requested || !self.has_pending() {
            return false;
        }
        self.frame_requested = true;
        true
    }

    /// Produces the visual update for this frame, if any.
    pub fn frame(&mut self, now_ms: u64) -> Option<RenderFrame> {
        self.frame_requested = false;

        if let Some(pending) = self.pending.take() {
            let wants_tween =
                pending.smooth && self.duration_ms > 0 && self.rendered != self.target;
            if !wants_tween {
                self.tween = None;
                self.rendered = self.target;
                return Some(self.emit(false));
            }
            match self.tween.as_mut() {
                Some(tween) => tween.retarget(now_ms, self.target, self.duration_ms),
                None => {
                    self.tween = Some(Tween::new(
                        self.rendered,
                        self.target,
                        now_ms,
                        self.duration_ms,
                        self.easing,
                    ));
                }
            }
        }

        let tween = self.tween?;
        self.rendered = tween.sample(now_ms);
        if tween.is_done(now_ms) {
            self.tween = None;
            self.rendered = self.target;
        }
        Some(self.emit(self.tween.is_some()))
    }

    fn emit(&self, animating: bool) -> RenderFrame {
        RenderFrame {
            offset: self.rendered,
            snapshot: self.snapshot,
            animating,
        }
    }
}
