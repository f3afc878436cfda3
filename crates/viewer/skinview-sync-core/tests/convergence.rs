//! Properties over long update sequences, checked against the recording engine.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use skinview_sync::{AnimationName, AnimationReference, SkinViewerComponent, ViewerProps};
use skinview_test_fixtures::{registry, Call, FakeBehavior, FakeCanvas, RecordingEngine};

type Props = ViewerProps<String, FakeBehavior>;

fn pick<T: Clone>(rng: &mut StdRng, items: &[T]) -> T {
    items.choose(rng).cloned().expect("non-empty choices")
}

fn random_props(rng: &mut StdRng) -> Props {
    let textures = [None, Some("a.png"), Some("b.png")];
    let slim = [None, Some(true), Some(false)];
    let sides = [None, Some(64u32), Some(128)];
    let animations = [
        None,
        Some(AnimationReference::Named(AnimationName::Walk)),
        Some(AnimationReference::Named(AnimationName::Run)),
        Some(AnimationReference::Named(AnimationName::Idle)),
        Some(AnimationReference::Custom(FakeBehavior::new("wave"))),
    ];
    let speeds = [None, Some(1.0), Some(2.5), Some(0.1)];
    Props {
        width: pick(rng, &sides),
        height: pick(rng, &sides),
        skin: pick(rng, &textures).map(String::from),
        is_slim: pick(rng, &slim),
        cape: pick(rng, &textures).map(String::from),
        enable_zoom: rng.random_bool(0.5),
        enable_rotate: rng.random_bool(0.5),
        enable_pan: rng.random_bool(0.5),
        animation: pick(rng, &animations),
        animation_speed: pick(rng, &speeds),
        paused: rng.random_bool(0.5),
        style: None,
    }
}

fn complete(mut p: Props) -> Props {
    p.width.get_or_insert(96);
    p.height.get_or_insert(48);
    p
}

/// Observable viewer state: textures, size, flags, playback, attached behaviors.
fn observed(c: &mut SkinViewerComponent<RecordingEngine>) -> String {
    let controls = c.controls_mut().map(|k| (k.rotate, k.zoom, k.pan));
    let v = c.viewer().expect("mounted");
    let t = v.track();
    format!(
        "{:?} {:?} {:?} {:?} {} {} {:?}",
        v.skin, v.cape, v.size, controls, t.speed, t.paused, t.active
    )
}

#[test]
fn final_state_depends_only_on_latest_snapshot() {
    for seed in 1..=40u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut engine = RecordingEngine::new();
        let first = complete(random_props(&mut rng));
        let mut c = SkinViewerComponent::<RecordingEngine>::new(first, registry());
        c.mount(&mut engine, &FakeCanvas).unwrap();

        let mut last = None;
        for _ in 0..60 {
            let next = random_props(&mut rng);
            c.update(next.clone());
            let active = c.viewer().unwrap().track().active.len();
            assert!(active <= 1, "seed {seed}: {active} behaviors attached");
            last = Some(next);
        }
        let last = complete(last.expect("sequence is non-empty"));
        c.update(last.clone());

        let mut fresh_engine = RecordingEngine::new();
        let mut fresh = SkinViewerComponent::<RecordingEngine>::new(last, registry());
        fresh.mount(&mut fresh_engine, &FakeCanvas).unwrap();

        assert_eq!(observed(&mut c), observed(&mut fresh), "seed {seed}");
    }
}

#[test]
fn reset_always_precedes_the_next_add() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut engine = RecordingEngine::new();
    let mut c = SkinViewerComponent::<RecordingEngine>::new(Props::sized(10, 10), registry());
    c.mount(&mut engine, &FakeCanvas).unwrap();
    for _ in 0..500 {
        c.update(random_props(&mut rng));
    }

    let mut attached = 0;
    for call in engine.calls() {
        match call {
            Call::AddAnimation { .. } => {
                assert_eq!(attached, 0, "add while a behavior is attached");
                attached += 1;
            }
            Call::ResetAnimation => {
                assert_eq!(attached, 1, "reset while idle");
                attached = 0;
            }
            _ => {}
        }
    }
}

#[test]
fn repeated_identical_snapshots_issue_nothing() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut engine = RecordingEngine::new();
    let props = complete(random_props(&mut rng));
    let mut c = SkinViewerComponent::<RecordingEngine>::new(props.clone(), registry());
    c.mount(&mut engine, &FakeCanvas).unwrap();
    engine.take_calls();
    for _ in 0..10 {
        assert!(c.update(props.clone()).is_empty());
    }
    assert!(engine.calls().is_empty());
}

#[test]
fn nan_speed_does_not_refire_playback() {
    let mut engine = RecordingEngine::new();
    let props = Props {
        animation_speed: Some(f64::NAN),
        ..Props::sized(10, 10)
    };
    let mut c = SkinViewerComponent::<RecordingEngine>::new(props.clone(), registry());
    c.mount(&mut engine, &FakeCanvas).unwrap();
    engine.take_calls();
    assert!(c.update(props.clone()).is_empty());
    assert!(c.update(props).is_empty());
    assert!(engine.calls().is_empty());
}

#[test]
fn speed_reaches_the_engine_unrounded() {
    let mut engine = RecordingEngine::new();
    let props = Props {
        animation_speed: Some(0.1),
        ..Props::sized(10, 10)
    };
    let mut c = SkinViewerComponent::<RecordingEngine>::new(props, registry());
    c.mount(&mut engine, &FakeCanvas).unwrap();
    assert!(engine.calls().contains(&Call::SetSpeed { speed: 0.1 }));
    assert_eq!(c.viewer().unwrap().track().speed, 0.1);
}

#[test]
fn partial_dimensions_never_resize() {
    let mut engine = RecordingEngine::new();
    let mut c = SkinViewerComponent::<RecordingEngine>::new(Props::sized(10, 10), registry());
    c.mount(&mut engine, &FakeCanvas).unwrap();
    for (w, h) in [(Some(20), None), (None, Some(30)), (None, None), (Some(0), Some(5))] {
        c.update(Props {
            width: w,
            height: h,
            ..Props::default()
        });
    }
    assert_eq!(engine.count(|c| matches!(c, Call::Resize { .. })), 0);
}

#[test]
fn removing_skin_resets_and_never_loads() {
    let mut engine = RecordingEngine::new();
    let mut c = SkinViewerComponent::<RecordingEngine>::new(
        Props::sized(10, 10).with_skin("a.png".into()),
        registry(),
    );
    c.mount(&mut engine, &FakeCanvas).unwrap();
    engine.take_calls();
    c.update(Props {
        is_slim: Some(true),
        ..Props::sized(10, 10)
    });
    assert_eq!(engine.calls(), vec![Call::ResetSkin]);
}

#[test]
fn clearing_animation_detaches_exactly_once() {
    let mut engine = RecordingEngine::new();
    let mut c = SkinViewerComponent::<RecordingEngine>::new(
        Props::sized(10, 10).with_animation(AnimationName::Rotate),
        registry(),
    );
    c.mount(&mut engine, &FakeCanvas).unwrap();
    engine.take_calls();
    c.update(Props::sized(10, 10));
    c.update(Props::sized(10, 10));
    assert_eq!(engine.calls(), vec![Call::ResetAnimation]);
    assert!(c.viewer().unwrap().track().active.is_empty());
}

#[test]
fn config_speed_applies_when_props_leave_it_out() {
    let mut engine = RecordingEngine::new();
    let cfg = skinview_sync::Config {
        default_animation_speed: 1.5,
        ..Default::default()
    };
    let mut c =
        SkinViewerComponent::<RecordingEngine>::with_config(Props::sized(10, 10), registry(), cfg);
    c.mount(&mut engine, &FakeCanvas).unwrap();
    assert_eq!(c.viewer().unwrap().track().speed, 1.5);
}
