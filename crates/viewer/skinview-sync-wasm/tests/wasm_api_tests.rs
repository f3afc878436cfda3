#![cfg(target_arch = "wasm32")]
use js_sys::{Function, Reflect, JSON};
use skinview_sync_wasm::{abi_version, SkinViewer};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

/// Fake engine module recording every call into `module.calls`.
fn fake_module() -> JsValue {
    let make = Function::new_no_args(
        r#"
        const calls = [];
        class SkinViewer {
            constructor(opts) {
                calls.push(["construct", opts.width, opts.height]);
                this.animations = {
                    speed: 1,
                    paused: false,
                    add(a) { calls.push(["add", a.name]); },
                    reset() { calls.push(["reset"]); },
                };
                this.renderer = { forceContextLoss() { calls.push(["release"]); } };
            }
            loadSkin(s, m) { calls.push(["loadSkin", s, m]); }
            resetSkin() { calls.push(["resetSkin"]); }
            loadCape(s) { calls.push(["loadCape", s]); }
            resetCape() { calls.push(["resetCape"]); }
            setSize(w, h) { calls.push(["setSize", w, h]); }
        }
        return {
            calls,
            SkinViewer,
            createOrbitControls(v) { calls.push(["controls"]); return {}; },
            IdleAnimation: { name: "idle" },
            WalkingAnimation: { name: "walk" },
            RunningAnimation: { name: "run" },
            FlyingAnimation: { name: "fly" },
            RotatingAnimation: { name: "rotate" },
        };
        "#,
    );
    make.call0(&JsValue::UNDEFINED).unwrap()
}

fn js(src: &str) -> JsValue {
    JSON::parse(src).unwrap()
}

/// Drain recorded calls as a JSON string.
fn take_calls(module: &JsValue) -> String {
    let calls = Reflect::get(module, &JsValue::from_str("calls")).unwrap();
    let text = JSON::stringify(&calls).unwrap().as_string().unwrap();
    Reflect::set(&calls, &JsValue::from_str("length"), &JsValue::from(0)).unwrap();
    text
}

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn end_to_end_sequence() {
    let module = fake_module();
    let mut v = SkinViewer::new(
        module.clone(),
        js(r#"{"skin":"A.png","width":100,"height":200}"#),
        JsValue::UNDEFINED,
    )
    .unwrap();
    assert!(!v.is_ready());
    assert_eq!(take_calls(&module), "[]");

    v.mount(JsValue::NULL).unwrap();
    assert!(v.is_ready());
    assert_eq!(
        take_calls(&module),
        r#"[["construct",100,200],["controls"],["loadSkin","A.png","auto-detect"]]"#
    );

    v.update(js(
        r#"{"skin":"A.png","isSlim":true,"cape":"B.png","width":100,"height":200}"#,
    ))
    .unwrap();
    assert_eq!(
        take_calls(&module),
        r#"[["loadSkin","A.png","slim"],["loadCape","B.png"]]"#
    );

    v.update(js(
        r#"{"skin":"A.png","isSlim":true,"cape":"B.png","width":100,"height":200,"animation":"walk"}"#,
    ))
    .unwrap();
    assert_eq!(take_calls(&module), r#"[["add","walk"]]"#);

    v.update(js(
        r#"{"skin":"A.png","isSlim":true,"cape":"B.png","width":100,"height":200,"animation":"run"}"#,
    ))
    .unwrap();
    assert_eq!(take_calls(&module), r#"[["reset"],["add","run"]]"#);

    v.update(js(
        r#"{"skin":"A.png","isSlim":true,"cape":"B.png","width":100,"height":200}"#,
    ))
    .unwrap();
    assert_eq!(take_calls(&module), r#"[["reset"]]"#);

    v.unmount();
    v.unmount();
    assert_eq!(take_calls(&module), r#"[["release"]]"#);
    assert!(v.viewer().is_undefined());
}

#[wasm_bindgen_test]
fn flags_and_playback_land_on_js_objects() {
    let module = fake_module();
    let mut v = SkinViewer::new(
        module.clone(),
        js(r#"{"width":10,"height":10,"enablePan":true,"animationSpeed":2,"paused":1}"#),
        JsValue::UNDEFINED,
    )
    .unwrap();
    v.mount(JsValue::NULL).unwrap();
    let animations = Reflect::get(&v.viewer(), &JsValue::from_str("animations")).unwrap();
    let speed = Reflect::get(&animations, &JsValue::from_str("speed")).unwrap();
    let paused = Reflect::get(&animations, &JsValue::from_str("paused")).unwrap();
    assert_eq!(speed.as_f64(), Some(2.0));
    assert_eq!(paused.as_bool(), Some(true));
}

#[wasm_bindgen_test]
fn unknown_animation_name_throws() {
    let module = fake_module();
    let err = SkinViewer::new(
        module,
        js(r#"{"width":10,"height":10,"animation":"jump"}"#),
        JsValue::UNDEFINED,
    );
    assert!(err.is_err());
}

#[wasm_bindgen_test]
fn on_ready_receives_the_engine_viewer() {
    let module = fake_module();
    let props = js(r#"{"width":10,"height":10}"#);
    let seen = Function::new_with_args("v", "this.seen = v;");
    let holder = js_sys::Object::new();
    let bound = seen.bind(&holder);
    Reflect::set(&props, &JsValue::from_str("onReady"), &bound).unwrap();

    let mut v = SkinViewer::new(module, props, JsValue::UNDEFINED).unwrap();
    v.mount(JsValue::NULL).unwrap();
    let got = Reflect::get(&holder, &JsValue::from_str("seen")).unwrap();
    assert_eq!(got, v.viewer());
}

#[wasm_bindgen_test]
fn surface_style_merges_object_style() {
    let module = fake_module();
    let v = SkinViewer::new(
        module,
        js(r#"{"width":10,"height":20,"style":{"borderRadius":"4px"}}"#),
        JsValue::UNDEFINED,
    )
    .unwrap();
    assert_eq!(
        v.surface_style(),
        "width: 10px; height: 20px; border-radius: 4px;"
    );
}

#[wasm_bindgen_test]
fn numeric_style_values_are_pixels() {
    let module = fake_module();
    let v = SkinViewer::new(
        module,
        js(r#"{"width":10,"height":20,"style":{"marginTop":4,"opacity":0.5}}"#),
        JsValue::UNDEFINED,
    )
    .unwrap();
    assert_eq!(
        v.surface_style(),
        "width: 10px; height: 20px; margin-top: 4px; opacity: 0.5;"
    );
}

#[wasm_bindgen_test]
fn null_is_slim_selects_default_model() {
    let module = fake_module();
    let mut v = SkinViewer::new(
        module.clone(),
        js(r#"{"skin":"A.png","isSlim":null,"width":10,"height":10}"#),
        JsValue::UNDEFINED,
    )
    .unwrap();
    v.mount(JsValue::NULL).unwrap();
    assert_eq!(
        take_calls(&module),
        r#"[["construct",10,10],["controls"],["loadSkin","A.png","default"]]"#
    );
}

#[wasm_bindgen_test]
fn speed_is_passed_through_unrounded() {
    let module = fake_module();
    let mut v = SkinViewer::new(
        module,
        js(r#"{"width":10,"height":10,"animationSpeed":0.1}"#),
        JsValue::UNDEFINED,
    )
    .unwrap();
    v.mount(JsValue::NULL).unwrap();
    let animations = Reflect::get(&v.viewer(), &JsValue::from_str("animations")).unwrap();
    let speed = Reflect::get(&animations, &JsValue::from_str("speed")).unwrap();
    assert_eq!(speed.as_f64(), Some(0.1));
}

#[wasm_bindgen_test]
fn swallowed_engine_errors_reach_the_console_logger() {
    let module = fake_module();
    let _v = SkinViewer::new(module, JsValue::UNDEFINED, JsValue::UNDEFINED).unwrap();
    assert!(log::max_level() >= log::LevelFilter::Warn);
}
