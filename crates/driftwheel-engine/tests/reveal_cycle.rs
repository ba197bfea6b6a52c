//! Reveal cycle tests on a paused clock.

use std::sync::Arc;

use config::{PlacementSettings, RevealSettings};
use driftwheel_engine::{
    EngineEvent, PlacementEngine, RevealCycle, SceneProvider, Viewport, channel, geom::Rect,
};
use rand::{SeedableRng, rngs::StdRng};
use tokio::time::{Duration, Instant};

/// A static page: wide viewport with a header strip to avoid.
struct FixedScene;

impl SceneProvider for FixedScene {
    fn viewport(&self) -> Viewport {
        Viewport {
            width: 1440.0,
            height: 900.0,
        }
    }

    fn exclusion_zones(&self) -> Vec<Rect> {
        vec![Rect::from_origin_size(0.0, 0.0, 1440.0, 80.0).expand(10.0)]
    }
}

fn cycle(elements: usize) -> (RevealCycle, driftwheel_engine::EventReceiver) {
    let (tx, rx) = channel();
    let cycle = RevealCycle::new(
        elements,
        PlacementEngine::new(PlacementSettings::default()),
        RevealSettings::default(),
        Arc::new(FixedScene),
        tx,
    );
    (cycle, rx)
}

#[tokio::test(start_paused = true)]
async fn reveals_overlap_and_hides_follow_linger() {
    let (cycle, mut rx) = cycle(5);
    let stop = cycle.stop_token();
    let start = Instant::now();
    cycle.spawn(StdRng::seed_from_u64(9));

    let mut reveals: Vec<(usize, Duration)> = Vec::new();
    let mut hides: Vec<(usize, Duration)> = Vec::new();
    while hides.len() < 2 {
        match rx.recv().await.unwrap() {
            EngineEvent::Reveal { element, float, .. } => {
                assert!(float.duration_s >= 3.0 && float.duration_s < 5.0);
                assert!(float.delay_s <= 0.0 && float.delay_s > -2.0);
                reveals.push((element, start.elapsed()));
            }
            EngineEvent::Hide { element } => hides.push((element, start.elapsed())),
            other => panic!("unexpected event {other:?}"),
        }
    }
    stop.cancel();

    // The first reveal waits out the initial delay.
    let first = reveals[0].1;
    assert!(first >= Duration::from_millis(1000) && first < Duration::from_millis(1005));

    // Consecutive reveals are spaced by the configured next-delay range,
    // which means each element is revealed while its predecessor is
    // still on screen.
    for pair in reveals.windows(2) {
        let gap = pair[1].1 - pair[0].1;
        assert!(gap >= Duration::from_millis(2000), "gap {gap:?}");
        assert!(gap < Duration::from_millis(3505), "gap {gap:?}");
    }

    // An element is hidden one linger after its successor appeared.
    for (element, hidden_at) in &hides {
        let revealed = reveals
            .iter()
            .position(|(e, _)| e == element)
            .expect("hidden element was revealed");
        let successor_at = reveals[revealed + 1].1;
        let linger = *hidden_at - successor_at;
        assert!(linger >= Duration::from_millis(4000), "linger {linger:?}");
        assert!(linger < Duration::from_millis(4005), "linger {linger:?}");
    }

    // Five distinct elements before the order repeats.
    let mut seen: Vec<usize> = reveals.iter().take(5).map(|(e, _)| *e).collect();
    seen.sort_unstable();
    seen.dedup();
    assert_eq!(seen.len(), 5.min(reveals.len()));
}

#[tokio::test(start_paused = true)]
async fn interaction_defers_hide_until_released() {
    let (cycle, mut rx) = cycle(5);
    let stop = cycle.stop_token();
    let flags = cycle.interaction_flags();
    cycle.spawn(StdRng::seed_from_u64(2));

    // Wait for the first two reveals; the first element's hide is now
    // scheduled one linger out.
    let first = loop {
        if let EngineEvent::Reveal { element, .. } = rx.recv().await.unwrap() {
            break element;
        }
    };
    loop {
        if let EngineEvent::Reveal { .. } = rx.recv().await.unwrap() {
            break;
        }
    }
    flags.set(first, true);

    // Well past the linger: the hide keeps re-checking instead of firing.
    tokio::time::sleep(Duration::from_millis(7000)).await;
    let mut pending = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        pending.push(ev);
    }
    assert!(
        !pending
            .iter()
            .any(|ev| matches!(ev, EngineEvent::Hide { element } if *element == first)),
        "hide fired while interacting: {pending:?}"
    );

    // Releasing the element lets the next re-check hide it.
    flags.set(first, false);
    tokio::time::sleep(Duration::from_millis(2000)).await;
    let mut after = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        after.push(ev);
    }
    stop.cancel();
    assert!(
        after
            .iter()
            .any(|ev| matches!(ev, EngineEvent::Hide { element } if *element == first)),
        "hide did not fire after release: {after:?}"
    );
}
