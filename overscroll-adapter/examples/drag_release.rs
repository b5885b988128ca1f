use overscroll::BouncyConfig;
use overscroll_adapter::{BouncyList, LinearList};

fn main() -> Result<(), overscroll::Error> {
    // Example: pulling the end of a list past its last item and letting go.
    //
    // An adapter would:
    // - forward pointer events (down / move / fling / up) as they arrive
    // - call tick(now_ms) in a frame loop while is_animating()
    // - render the list at its current offset
    let list = LinearList::uniform(200, 48, 720).with_offset(200 * 48 - 720);
    let mut b = BouncyList::new(list, BouncyConfig::default())?;

    let mut now_ms = 0u64;
    b.on_touch_down(now_ms);
    for _ in 0..8 {
        now_ms += 16;
        let captured = b.on_touch_move(0, 30, now_ms);
        println!(
            "t={now_ms} captured={captured} tail_gap={} state={:?}",
            b.list().tail_overscroll(),
            b.state()
        );
    }
    b.on_touch_up(now_ms);

    while b.is_animating() {
        now_ms += 16;
        b.tick(now_ms);
        if now_ms % 80 == 0 {
            println!(
                "t={now_ms} tail_gap={} state={:?}",
                b.list().tail_overscroll(),
                b.state()
            );
        }
    }

    println!(
        "done: offset={} max_offset={}",
        b.list().offset(),
        b.list().max_offset()
    );
    Ok(())
}
