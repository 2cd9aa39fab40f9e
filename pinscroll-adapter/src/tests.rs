use crate::*;
use pinscroll::*;

use proptest::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, Mutex};

// Region spans 2000..5000 with an 80px header: pinned for scroll_y in 1920..4920.
const TOP: u64 = 2000;
const HEIGHT: u64 = 3000;
const HEADER: u32 = 80;

#[derive(Clone, Debug, Default)]
struct SharedPage(Rc<RefCell<MemoryBackend>>);

impl SharedPage {
    fn new(position: u64) -> Self {
        Self(Rc::new(RefCell::new(MemoryBackend::new(position))))
    }

    fn user_scroll_to(&self, position: u64) -> bool {
        self.0.borrow_mut().user_scroll_to(position)
    }

    fn position(&self) -> u64 {
        self.0.borrow().scroll_position()
    }

    fn frozen(&self) -> bool {
        self.0.borrow().is_frozen()
    }

    fn jumps(&self) -> Vec<u64> {
        self.0.borrow().jumps().to_vec()
    }
}

impl ScrollBackend for SharedPage {
    fn scroll_position(&self) -> u64 {
        self.0.borrow().scroll_position()
    }

    fn is_frozen(&self) -> bool {
        self.0.borrow().is_frozen()
    }

    fn freeze(&mut self, at: u64) {
        self.0.borrow_mut().freeze(at);
    }

    fn unfreeze(&mut self) {
        self.0.borrow_mut().unfreeze();
    }

    fn scroll_to(&mut self, position: u64) {
        self.0.borrow_mut().scroll_to(position);
    }
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn container() -> ContainerRect {
    ContainerRect::new(TOP, HEIGHT)
}

fn viewport(width: u32) -> Viewport {
    Viewport::new(width, 800)
}

fn items(n: usize) -> Vec<Option<u32>> {
    vec![Some(400); n]
}

fn options() -> ControllerOptions {
    ControllerOptions::new()
        .with_header_offset(HEADER)
        .with_sensitivity(0.001)
}

fn mounted(page: &SharedPage) -> Controller<SharedPage> {
    let mut c = Controller::new(options(), page.clone()).unwrap();
    c.mount(container(), viewport(1000), &items(6));
    c
}

fn user_scroll(c: &mut Controller<SharedPage>, page: &SharedPage, to: u64) {
    assert!(page.user_scroll_to(to));
    c.on_scroll(to);
}

#[test]
fn six_items_render_midpoint() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    assert_eq!(c.geometry().max_offset, 1400);

    for _ in 0..5 {
        assert_eq!(c.on_wheel(100.0), WheelDisposition::Intercept);
    }
    assert!(approx(c.progress(), 0.5));
    let frame = c.frame(16).unwrap();
    assert!(approx(frame.offset, 700.0));
    assert!(!frame.animating);
}

#[test]
fn lock_at_2500_is_restored_exactly_on_unmount() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    assert_eq!(c.phase(), Phase::PinnedUnlocked);
    assert!(!c.is_locked());

    for _ in 0..3 {
        assert!(c.on_wheel(100.0).is_intercepted());
    }
    assert!(approx(c.progress(), 0.3));
    assert!(c.is_locked());
    assert_eq!(c.snapshot().saved_scroll_y, Some(2500));
    assert!(page.frozen());

    c.unmount();
    assert!(!c.is_locked());
    assert!(!page.frozen());
    assert_eq!(page.position(), 2500);
    assert_eq!(page.jumps(), vec![2500]);
}

#[test]
fn reaching_end_releases_in_the_same_call() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);

    for _ in 0..9 {
        c.on_wheel(100.0);
    }
    assert!(c.is_locked());

    // The tick that lands on 1 is still consumed, but the lock is gone when it returns.
    assert_eq!(c.on_wheel(100.0), WheelDisposition::Intercept);
    assert_eq!(c.progress(), 1.0);
    assert!(!c.is_locked());
    assert_eq!(c.phase(), Phase::PinnedUnlocked);
    assert_eq!(page.jumps(), vec![2500]);

    // The next outward tick goes to the page, and the page is free to move.
    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);
    user_scroll(&mut c, &page, 2600);
    assert_eq!(c.phase(), Phase::PinnedUnlocked);
    assert_eq!(c.progress(), 1.0);

    user_scroll(&mut c, &page, 4920);
    assert_eq!(c.phase(), Phase::After);
    assert_eq!(c.progress(), 1.0);
}

#[test]
fn reversing_at_end_relocks() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    for _ in 0..10 {
        c.on_wheel(100.0);
    }
    assert!(!c.is_locked());

    assert_eq!(c.on_wheel(-100.0), WheelDisposition::Intercept);
    assert!(c.is_locked());
    assert!(approx(c.progress(), 0.9));
}

#[test]
fn backward_at_start_passes_through_to_before() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    assert_eq!(c.on_wheel(-100.0), WheelDisposition::PassThrough);
    assert!(!c.is_locked());

    user_scroll(&mut c, &page, 1800);
    assert_eq!(c.phase(), Phase::Before);
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);
}

#[test]
fn resize_keeps_progress_as_fraction() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    c.on_wheel(400.0);
    let progress = c.progress();
    assert!(approx(progress, 0.4));
    assert!(approx(c.frame(16).unwrap().offset, 560.0));

    // 2400 - 400 = 2000
    c.on_resize(viewport(400), container());
    assert_eq!(c.geometry().max_offset, 2000);
    assert_eq!(c.progress(), progress);
    let frame = c.frame(32).unwrap();
    assert!(approx(frame.offset, 800.0));
    assert!(!frame.animating);
    assert!(c.is_locked());
}

#[test]
fn hiding_page_releases_and_restores() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    for _ in 0..3 {
        c.on_wheel(100.0);
    }

    c.on_visibility_change(false);
    assert!(!c.is_locked());
    assert!(!page.frozen());
    assert_eq!(page.position(), 2500);
    assert_eq!(c.phase(), Phase::PinnedUnlocked);
    assert!(approx(c.progress(), 0.3));
    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);

    // Echo of the restore while still hidden must not relock.
    c.on_scroll(2500);
    assert!(!c.is_locked());

    c.on_visibility_change(true);
    assert_eq!(c.on_wheel(100.0), WheelDisposition::Intercept);
    assert!(c.is_locked());
    assert!(approx(c.progress(), 0.4));
}

#[test]
fn programmatic_scroll_out_releases_at_target() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    for _ in 0..3 {
        c.on_wheel(100.0);
    }

    // Positions inside the pin zone are ignored while frozen.
    c.on_scroll(3000);
    assert!(c.is_locked());

    c.on_scroll(6000);
    assert!(!c.is_locked());
    assert_eq!(c.phase(), Phase::After);
    assert_eq!(c.progress(), 1.0);
    assert_eq!(page.position(), 6000);
    assert_eq!(page.jumps(), vec![6000]);
}

#[test]
fn unmount_ignores_later_events() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    c.on_wheel(100.0);
    c.unmount();
    c.unmount();

    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);
    c.on_scroll(3000);
    c.on_visibility_change(true);
    assert!(!c.is_locked());
    assert!(!c.is_mounted());
    assert_eq!(page.jumps(), vec![2500]);
}

#[test]
fn dropping_controller_releases_lock() {
    let page = SharedPage::new(2500);
    {
        let mut c = mounted(&page);
        c.on_wheel(250.0);
        assert!(page.frozen());
    }
    assert!(!page.frozen());
    assert_eq!(page.position(), 2500);
}

#[test]
fn geometry_waits_for_all_images() {
    let page = SharedPage::new(2500);
    let mut c = Controller::new(options(), page.clone()).unwrap();
    c.mount(container(), viewport(1000), &[None, None, None]);
    assert!(!c.geometry().is_available());
    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);

    c.on_item_loaded(0, 800);
    c.on_item_failed(2);
    assert!(!c.geometry().is_available());
    assert_eq!(c.images().pending(), 1);

    // The failed image resolves with width 0: 800 + 900 + 0 - 1000
    c.on_item_loaded(1, 900);
    assert_eq!(c.geometry().max_offset, 700);
    assert_eq!(c.images().state(2), Some(LoadState::Failed));
    assert_eq!(c.on_wheel(100.0), WheelDisposition::Intercept);
}

#[test]
fn losing_geometry_releases_lock() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    for _ in 0..3 {
        c.on_wheel(100.0);
    }

    // Content (2400) now fits the viewport: nothing to traverse.
    c.on_resize(viewport(3000), container());
    assert!(!c.geometry().is_available());
    assert!(!c.is_locked());
    assert!(!page.frozen());
    assert!(approx(c.progress(), 0.3));
    assert_eq!(c.horizontal_offset(), 0.0);
    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);
}

#[test]
fn zero_height_container_renders_nothing() {
    let page = SharedPage::new(2500);
    let mut c = Controller::new(options(), page.clone()).unwrap();
    c.mount(ContainerRect::new(TOP, 0), viewport(1000), &items(6));
    assert!(!c.geometry().is_available());
    assert_eq!(c.progress(), 0.0);
    assert_eq!(c.horizontal_offset(), 0.0);
    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);
    assert_eq!(c.frame(16).map_or(0.0, |f| f.offset), 0.0);

    // Measured later: the region pins at the current offset and captures.
    c.on_resize(viewport(1000), container());
    assert_eq!(c.phase(), Phase::PinnedUnlocked);
    assert_eq!(c.on_wheel(100.0), WheelDisposition::Intercept);
    assert!(approx(c.progress(), 0.1));
}

#[test]
fn unmeasured_container_keeps_progress_across_resize() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    for _ in 0..3 {
        c.on_wheel(100.0);
    }
    assert!(c.is_locked());

    c.on_resize(viewport(1000), ContainerRect::new(TOP, 0));
    assert!(!c.geometry().is_available());
    assert!(!c.is_locked());
    assert!(!page.frozen());
    assert_eq!(page.position(), 2500);
    assert_eq!(c.phase(), Phase::PinnedUnlocked);
    assert!(approx(c.progress(), 0.3));
    assert_eq!(c.horizontal_offset(), 0.0);

    c.on_resize(viewport(1000), container());
    assert!(approx(c.progress(), 0.3));
    assert_eq!(c.phase(), Phase::PinnedLocked);
    assert!(c.is_locked());
    assert!(approx(c.horizontal_offset(), 420.0));
}

#[test]
fn pinned_offset_echo_keeps_lock() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    c.on_wheel(100.0);
    assert!(c.is_locked());

    c.on_scroll(page.position());
    assert!(c.is_locked());
    assert!(page.frozen());
    assert_eq!(page.position(), 2500);
}

#[test]
fn mount_after_unmount_is_ignored() {
    let page = SharedPage::new(2500);
    let mut c = Controller::new(options(), page.clone()).unwrap();
    c.unmount();
    c.mount(container(), viewport(1000), &items(6));
    assert!(!c.is_mounted());
    assert_eq!(c.on_wheel(100.0), WheelDisposition::PassThrough);
    assert!(!page.frozen());
}

#[test]
fn frames_are_coalesced() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    assert!(c.request_frame());
    c.frame(0);
    assert!(!c.request_frame());

    for _ in 0..3 {
        c.on_wheel(100.0);
    }
    assert!(c.request_frame());
    assert!(!c.request_frame());

    let frame = c.frame(16).unwrap();
    assert!(approx(frame.offset, 420.0));
    assert!(frame.snapshot.locked);
    assert_eq!(c.frame(32), None);
    assert!(!c.request_frame());
}

#[test]
fn item_change_eases_to_new_offset() {
    let page = SharedPage::new(2500);
    let mut c = mounted(&page);
    c.on_wheel(500.0);
    c.frame(0);

    // 8 * 400 - 1000 = 2200
    c.set_items(&items(8));
    assert!(approx(c.horizontal_offset(), 1100.0));
    assert!(c.is_locked());

    let first = c.frame(100).unwrap();
    assert!(first.animating);
    assert!(approx(first.offset, 700.0));

    let mid = c.frame(300).unwrap();
    assert!(mid.offset > 700.0 && mid.offset < 1100.0);

    let last = c.frame(100 + DEFAULT_SMOOTH_DURATION_MS).unwrap();
    assert!(!last.animating);
    assert!(approx(last.offset, 1100.0));
    assert_eq!(c.frame(600), None);
}

#[test]
fn on_change_sees_lock_and_release() {
    let seen = Arc::new(Mutex::new(Vec::<ProgressSnapshot>::new()));
    let sink = Arc::clone(&seen);
    let opts = options().with_on_change(Some(move |s: &ProgressSnapshot| {
        sink.lock().unwrap().push(*s);
    }));

    let page = SharedPage::new(2500);
    let mut c = Controller::new(opts, page.clone()).unwrap();
    c.mount(container(), viewport(1000), &items(6));
    c.on_wheel(100.0);
    c.unmount();

    let seen = seen.lock().unwrap();
    assert!(
        seen.iter()
            .any(|s| s.locked && s.saved_scroll_y == Some(2500))
    );
    let last = seen.last().unwrap();
    assert!(!last.locked);
    assert_eq!(last.saved_scroll_y, None);
}

#[test]
fn second_controller_cannot_take_a_held_lock() {
    let page = SharedPage::new(2500);
    let mut a = mounted(&page);
    let mut b = mounted(&page);

    assert!(a.on_wheel(100.0).is_intercepted());
    assert_eq!(b.on_wheel(100.0), WheelDisposition::PassThrough);
    assert!(!b.is_locked());
    assert_eq!(b.progress(), 0.0);
    assert_eq!(b.phase(), Phase::PinnedUnlocked);

    drop(b);
    assert!(page.frozen());
    a.unmount();
    assert!(!page.frozen());
}

#[test]
fn mount_twice_is_ignored() {
    let page = SharedPage::new(0);
    let mut c = mounted(&page);
    c.mount(container(), viewport(1000), &items(2));
    assert_eq!(c.geometry().item_count, 6);
    assert_eq!(c.phase(), Phase::Before);
}

#[test]
fn invalid_options_are_rejected() {
    let page = SharedPage::new(0);
    let res = Controller::new(options().with_sensitivity(-1.0), page.clone());
    assert!(matches!(res, Err(ConfigError::InvalidSensitivity(_))));

    let mut c = mounted(&page);
    assert!(c.set_options(options().with_boundary_epsilon(f64::NAN)).is_err());
    assert!(c.set_options(options().with_item_gap(100)).is_ok());
    // 6 * 400 + 5 * 100 - 1000
    assert_eq!(c.geometry().max_offset, 1900);
}

#[test]
fn tween_reaches_target_exactly() {
    let t = Tween::new(700.0, 1100.0, 10, 100, Easing::EaseInOutCubic);
    assert_eq!(t.sample(10), 700.0);
    assert_eq!(t.sample(110), 1100.0);
    let mid = t.sample(60);
    assert!(approx(mid, 900.0));

    for easing in [
        Easing::Linear,
        Easing::SmoothStep,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
    ] {
        assert_eq!(easing.sample(0.0), 0.0);
        assert_eq!(easing.sample(1.0), 1.0);
    }
}

#[test]
fn tracker_ignores_unknown_and_repeated_resolutions() {
    let mut t = ImageLoadTracker::new();
    t.reset(&[None, Some(300)]);
    assert_eq!(t.pending(), 1);
    assert!(!t.on_loaded(5, 100));
    assert!(!t.on_failed(1));
    assert!(t.on_failed(0));
    assert!(!t.on_failed(0));
    assert!(t.is_settled());

    // A late size change in a settled set still warrants a recompute.
    assert!(t.on_loaded(0, 640));
    assert!(!t.on_loaded(0, 640));
    assert_eq!(t.widths(), &[640, 300]);
}

#[derive(Clone, Debug)]
enum HostEvent {
    Wheel(f64),
    UserScroll(u64),
    Resize(u32),
    Visibility(bool),
}

fn host_event() -> impl Strategy<Value = HostEvent> {
    prop_oneof![
        4 => (-300.0f64..300.0).prop_map(HostEvent::Wheel),
        2 => (0u64..8000).prop_map(HostEvent::UserScroll),
        1 => (200u32..4000).prop_map(HostEvent::Resize),
        1 => any::<bool>().prop_map(HostEvent::Visibility),
    ]
}

proptest! {
    #[test]
    fn lock_never_outlives_the_controller(
        start in 0u64..8000,
        events in proptest::collection::vec(host_event(), 0..120),
        drop_instead_of_unmount in any::<bool>(),
    ) {
        let page = SharedPage::new(start);
        let mut c = mounted(&page);
        for e in events {
            match e {
                HostEvent::Wheel(d) => {
                    c.on_wheel(d);
                }
                HostEvent::UserScroll(to) => {
                    if page.user_scroll_to(to) {
                        c.on_scroll(to);
                    }
                }
                HostEvent::Resize(w) => c.on_resize(viewport(w), container()),
                HostEvent::Visibility(v) => c.on_visibility_change(v),
            }
            prop_assert!((0.0..=1.0).contains(&c.progress()));
            prop_assert_eq!(c.is_locked(), page.frozen());
            if c.is_locked() {
                prop_assert_eq!(c.phase(), Phase::PinnedLocked);
                prop_assert!(c.is_visible());
            }
            let rel = c.scroll_lock().release_count();
            let acq = c.scroll_lock().acquire_count();
            prop_assert!(rel <= acq && acq - rel <= 1);
        }
        if drop_instead_of_unmount {
            drop(c);
        } else {
            c.unmount();
        }
        prop_assert!(!page.frozen());
    }

    #[test]
    fn resize_renders_fraction_of_new_max(ticks in 1usize..9, width in 200u32..2300) {
        let page = SharedPage::new(2500);
        let mut c = mounted(&page);
        for _ in 0..ticks {
            c.on_wheel(100.0);
        }
        let p = c.progress();
        c.on_resize(viewport(width), container());
        let expected = p * c.geometry().max_offset as f64;
        prop_assert_eq!(c.progress(), p);
        let frame = c.frame(0).unwrap();
        prop_assert_eq!(frame.offset, expected);
    }
}
