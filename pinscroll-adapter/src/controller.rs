use pinscroll::{
    ConfigError, ContainerRect, Geometry, LockAction, Phase, ProgressMapper, ProgressSnapshot,
    ScrollBackend, ScrollLock, Transition, Viewport, WheelDisposition, Zone,
};

use crate::{ControllerOptions, ImageLoadTracker, RenderFrame, RenderSync};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Mounted,
    Unmounted,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ReleaseTo {
    /// Back to the offset recorded when the lock was acquired.
    Saved,
    /// To the last known native offset (boundary exit, programmatic scroll).
    Current,
}

/// A framework-neutral controller for one capture region.
///
/// This type does not hold any UI objects. Adapters drive it by calling:
/// - `mount` / `unmount` exactly once each
/// - `on_scroll`, `on_wheel`, `on_resize`, `on_visibility_change` when UI events occur
/// - `on_item_loaded` / `on_item_failed` as item images resolve
/// - `request_frame` after events, and `frame(now_ms)` from the scheduled animation frame
///
/// The controller is the only writer of progress and the only caller of the scroll lock. The
/// lock never outlives the mount: `unmount`, a hidden page, a lost geometry and leaving the pin
/// zone all release it, and dropping the controller releases it too.
pub struct Controller<B: ScrollBackend> {
    options: ControllerOptions,
    container: ContainerRect,
    viewport: Viewport,
    images: ImageLoadTracker,
    geometry: Geometry,
    mapper: ProgressMapper,
    lock: ScrollLock<B>,
    render: RenderSync,
    scroll_y: u64,
    visible: bool,
    lifecycle: Lifecycle,
    published: ProgressSnapshot,
}

impl<B: ScrollBackend> Controller<B> {
    pub fn new(options: ControllerOptions, backend: B) -> Result<Self, ConfigError> {
        options.validate()?;
        let mapper = ProgressMapper::new(&options.progress);
        let render = RenderSync::new(options.smooth_duration_ms, options.easing);
        let scroll_y = backend.scroll_position();
        Ok(Self {
            options,
            container: ContainerRect::default(),
            viewport: Viewport::default(),
            images: ImageLoadTracker::new(),
            geometry: Geometry::default(),
            mapper,
            lock: ScrollLock::new(backend),
            render,
            scroll_y,
            visible: true,
            lifecycle: Lifecycle::Created,
            published: ProgressSnapshot::default(),
        })
    }

    pub fn options(&self) -> &ControllerOptions {
        &self.options
    }

    /// Replaces the options. Geometry is recomputed when mounted.
    pub fn set_options(&mut self, options: ControllerOptions) -> Result<(), ConfigError> {
        options.validate()?;
        self.mapper.set_options(&options.progress);
        self.render.set_transition(options.smooth_duration_ms, options.easing);
        self.options = options;
        if self.is_mounted() {
            self.recompute_geometry(false);
        }
        Ok(())
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn progress(&self) -> f64 {
        self.mapper.progress()
    }

    pub fn phase(&self) -> Phase {
        self.mapper.phase()
    }

    /// Whether native page scroll is currently suspended by this controller.
    ///
    /// Hosts can use this to pause other scroll-linked effects on the page.
    pub fn is_locked(&self) -> bool {
        self.lock.is_held()
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn images(&self) -> &ImageLoadTracker {
        &self.images
    }

    pub fn scroll_lock(&self) -> &ScrollLock<B> {
        &self.lock
    }

    /// The last native scroll offset the controller knows about.
    pub fn scroll_y(&self) -> u64 {
        self.scroll_y
    }

    /// `progress * max_offset` for the current state, independent of frame timing.
    pub fn horizontal_offset(&self) -> f64 {
        self.geometry.offset_for(self.mapper.progress())
    }

    /// The offset delivered by the most recent frame.
    pub fn rendered_offset(&self) -> f64 {
        self.render.rendered_offset()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        ProgressSnapshot {
            progress: self.mapper.progress(),
            phase: self.mapper.phase(),
            locked: self.lock.is_held(),
            saved_scroll_y: self.lock.saved_scroll_y(),
        }
    }

    /// Starts handling events.
    ///
    /// `items` holds one entry per item: `Some(width)` for images that are already complete,
    /// `None` for images still loading.
    pub fn mount(&mut self, container: ContainerRect, viewport: Viewport, items: &[Option<u32>]) {
        match self.lifecycle {
            Lifecycle::Created => {}
            Lifecycle::Mounted => {
                pwarn!("Controller::mount called twice");
                return;
            }
            Lifecycle::Unmounted => {
                pwarn!("Controller::mount after unmount");
                return;
            }
        }
        self.lifecycle = Lifecycle::Mounted;
        self.container = container;
        self.viewport = viewport;
        self.images.reset(items);
        self.scroll_y = self.lock.backend().scroll_position();
        pdebug!(
            items = items.len(),
            pending = self.images.pending(),
            scroll_y = self.scroll_y,
            "Controller::mount"
        );
        self.recompute_geometry(false);
    }

    /// Stops handling events and releases the lock if it is still held.
    pub fn unmount(&mut self) {
        if self.lifecycle == Lifecycle::Unmounted {
            return;
        }
        let t = self.mapper.disengage();
        self.execute(t, ReleaseTo::Saved);
        self.lock.release();
        self.lifecycle = Lifecycle::Unmounted;
        pdebug!(progress = self.mapper.progress(), "Controller::unmount");
        self.publish(false);
    }

    /// Native scroll offset reported by the page.
    ///
    /// While locked, offsets inside the pin zone are ignored (the page is frozen); an offset
    /// outside it means the page was moved programmatically and forces a release there.
    ///
    /// While frozen, hosts must report the pinned visual offset here, the same value
    /// [`ScrollBackend::scroll_position`] returns. A host that freezes by fixing the body must
    /// not forward the `0` its document reports, or the lock is released to the top.
    pub fn on_scroll(&mut self, scroll_y: u64) {
        if !self.is_mounted() {
            return;
        }
        if self.mapper.is_locked() && self.geometry.zone(scroll_y) == Zone::Pinned {
            return;
        }
        self.scroll_y = scroll_y;
        self.sync_zone();
        self.publish(false);
    }

    /// A vertical wheel delta. The host must prevent native scrolling iff this returns
    /// [`WheelDisposition::Intercept`].
    pub fn on_wheel(&mut self, delta_y: f64) -> WheelDisposition {
        if !self.is_mounted() || !self.capturable() {
            return WheelDisposition::PassThrough;
        }
        if !self.mapper.is_locked() {
            self.refresh_scroll_position();
        }
        if !self.mapper.wants_delta(delta_y) {
            return WheelDisposition::PassThrough;
        }

        let t = self.mapper.engage();
        self.execute(t, ReleaseTo::Current);
        if !self.mapper.is_locked() {
            return WheelDisposition::PassThrough;
        }

        let t = self.mapper.advance(delta_y);
        self.execute(t, ReleaseTo::Current);
        ptrace!(
            delta_y,
            progress = self.mapper.progress(),
            locked = self.lock.is_held(),
            "Controller::on_wheel"
        );
        self.publish(false);
        WheelDisposition::Intercept
    }

    /// Window resize: geometry is recomputed and re-applied without easing; progress is kept as
    /// a fraction.
    pub fn on_resize(&mut self, viewport: Viewport, container: ContainerRect) {
        self.viewport = viewport;
        self.container = container;
        if self.is_mounted() {
            self.recompute_geometry(false);
        }
    }

    /// Page visibility change. Hiding the page releases the lock and restores the saved offset.
    pub fn on_visibility_change(&mut self, visible: bool) {
        self.visible = visible;
        if !self.is_mounted() {
            return;
        }
        if !visible {
            let t = self.mapper.disengage();
            self.execute(t, ReleaseTo::Saved);
        }
        self.publish(false);
    }

    /// Replaces the item set (see [`mount`](Self::mount) for the meaning of `items`).
    pub fn set_items(&mut self, items: &[Option<u32>]) {
        self.images.reset(items);
        if self.is_mounted() {
            self.recompute_geometry(true);
        }
    }

    pub fn on_item_loaded(&mut self, index: usize, width: u32) {
        if self.images.on_loaded(index, width) && self.is_mounted() {
            self.recompute_geometry(true);
        }
    }

    pub fn on_item_failed(&mut self, index: usize) {
        if self.images.on_failed(index) && self.is_mounted() {
            self.recompute_geometry(true);
        }
    }

    /// Returns `true` when the host should schedule an animation frame.
    pub fn request_frame(&mut self) -> bool {
        self.render.request_frame()
    }

    /// Produces this frame's visual update, if any.
    pub fn frame(&mut self, now_ms: u64) -> Option<RenderFrame> {
        self.render.frame(now_ms)
    }

    fn capturable(&self) -> bool {
        self.visible && self.geometry.is_available()
    }

    fn refresh_scroll_position(&mut self) {
        let position = self.lock.backend().scroll_position();
        if position == self.scroll_y {
            return;
        }
        self.scroll_y = position;
        self.sync_zone();
        self.publish(false);
    }

    fn recompute_geometry(&mut self, smooth: bool) {
        let widths: &[u32] = if self.images.is_settled() {
            self.images.widths()
        } else {
            &[]
        };
        self.geometry = Geometry::recompute(
            self.container,
            widths,
            self.options.progress.item_gap,
            self.viewport,
            self.options.progress.header_offset,
        );
        self.mapper.reclamp();
        self.sync_zone();
        self.publish(smooth);
    }

    fn sync_zone(&mut self) {
        // An unmeasured region has no meaningful zone; keep progress and only drop the lock.
        if !self.geometry.is_available() {
            let t = self.mapper.disengage();
            self.execute(t, ReleaseTo::Current);
            return;
        }
        let zone = self.geometry.zone(self.scroll_y);
        let t = self.mapper.on_zone(zone, self.capturable());
        self.execute(t, ReleaseTo::Current);
    }

    // Runs the lock action implied by a phase change, in the caller's handler turn.
    fn execute(&mut self, t: Transition, release_to: ReleaseTo) {
        match t.lock_action() {
            LockAction::Hold => {}
            LockAction::Acquire => {
                if self.lock.acquire() {
                    if let Some(saved) = self.lock.saved_scroll_y() {
                        self.scroll_y = saved;
                    }
                } else {
                    self.mapper.disengage();
                }
            }
            LockAction::Release => {
                let restored = match release_to {
                    ReleaseTo::Saved => self.lock.release(),
                    ReleaseTo::Current => self.lock.release_to(self.scroll_y),
                };
                if let Some(at) = restored {
                    self.scroll_y = at;
                }
            }
        }
    }

    fn publish(&mut self, smooth: bool) {
        let snapshot = self.snapshot();
        self.render.apply(snapshot, &self.geometry, smooth);
        if snapshot == self.published {
            return;
        }
        self.published = snapshot;
        if let Some(cb) = &self.options.on_change {
            cb(&snapshot);
        }
    }
}

impl<B: ScrollBackend> core::fmt::Debug for Controller<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Controller")
            .field("lifecycle", &self.lifecycle)
            .field("geometry", &self.geometry)
            .field("mapper", &self.mapper)
            .field("lock", &self.lock)
            .field("scroll_y", &self.scroll_y)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}
