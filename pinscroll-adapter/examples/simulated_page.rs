use pinscroll::{ContainerRect, MemoryBackend, ScrollBackend, Viewport};
use pinscroll_adapter::{Controller, ControllerOptions};

fn main() {
    // Example: a host page driving the controller without any real UI.
    //
    // A DOM adapter would:
    // - implement `ScrollBackend` with window.scrollY / body position: fixed / window.scrollTo
    // - forward wheel events and call preventDefault() when `on_wheel` returns Intercept
    // - forward scroll, resize and visibilitychange events
    // - schedule requestAnimationFrame when `request_frame()` returns true
    let mut page = MemoryBackend::new(0);
    let options = ControllerOptions::new()
        .with_header_offset(80)
        .with_item_gap(24)
        .with_on_change(Some(|s: &pinscroll::ProgressSnapshot| {
            println!(
                "  change: phase={:?} progress={:.3} locked={}",
                s.phase, s.progress, s.locked
            );
        }));

    let mut c = match Controller::new(options, &mut page) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("invalid options: {err}");
            return;
        }
    };

    // Region at 1200px, 2400px tall; four images, the last one still loading.
    c.mount(
        ContainerRect::new(1200, 2400),
        Viewport::new(1280, 800),
        &[Some(640), Some(640), Some(640), None],
    );
    println!("pending images: {}", c.images().pending());
    c.on_item_loaded(3, 640);
    println!(
        "max_offset={} content_width={}",
        c.geometry().max_offset,
        c.geometry().content_width
    );

    // Scroll down natively until the region pins.
    for y in (0..=1200).step_by(400) {
        c.on_scroll(y);
    }

    let mut now_ms = 0u64;
    for tick in 0..14 {
        let disposition = c.on_wheel(100.0);
        if c.request_frame() {
            now_ms += 16;
            if let Some(frame) = c.frame(now_ms) {
                println!(
                    "tick={tick} {:?} offset={:.1} locked={}",
                    disposition, frame.offset, frame.snapshot.locked
                );
            }
        } else {
            println!("tick={tick} {disposition:?} (native scroll)");
        }
    }

    c.unmount();
    drop(c);
    println!(
        "after unmount: scroll={} frozen={}",
        page.scroll_position(),
        page.is_frozen()
    );
}
