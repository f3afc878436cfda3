//! `ViewerEngine` over a JavaScript engine module (skinview3d-shaped).
//!
//! The module object must expose `SkinViewer` (constructor taking
//! `{ canvas, width, height }`), `createOrbitControls(viewer)` and the animation
//! templates `IdleAnimation`, `WalkingAnimation`, `RunningAnimation`,
//! `FlyingAnimation`, `RotatingAnimation`.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

use skinview_sync::{
    AnimationName, AnimationRegistry, AnimationTrack, ControlsHandle, ModelVariant, SyncError,
    ViewerEngine, ViewerHandle,
};

/// Best-effort text for a thrown JS value.
pub(crate) fn describe(err: &JsValue) -> String {
    if let Some(s) = err.as_string() {
        return s;
    }
    if let Ok(msg) = Reflect::get(err, &JsValue::from_str("message")) {
        if let Some(s) = msg.as_string() {
            return s;
        }
    }
    format!("{err:?}")
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
}

fn call(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let f: Function = get(target, method)?.dyn_into()?;
    let argv: Array = args.iter().copied().collect();
    f.apply(target, &argv)
}

/// Fire-and-forget method call; the engine owns failures, we only log them.
fn invoke(target: &JsValue, method: &str, args: &[&JsValue]) {
    if let Err(e) = call(target, method, args) {
        log::warn!("{method} failed: {}", describe(&e));
    }
}

fn assign(target: &JsValue, key: &str, value: &JsValue) {
    if let Err(e) = Reflect::set(target, &JsValue::from_str(key), value) {
        log::warn!("setting {key} failed: {}", describe(&e));
    }
}

fn template_key(name: AnimationName) -> &'static str {
    match name {
        AnimationName::Idle => "IdleAnimation",
        AnimationName::Walk => "WalkingAnimation",
        AnimationName::Run => "RunningAnimation",
        AnimationName::Fly => "FlyingAnimation",
        AnimationName::Rotate => "RotatingAnimation",
    }
}

pub struct JsEngine {
    module: JsValue,
}

impl JsEngine {
    pub fn new(module: JsValue) -> Result<Self, SyncError> {
        if !module.is_object() {
            return Err(SyncError::engine("engine module must be an object"));
        }
        Ok(Self { module })
    }

    pub fn module(&self) -> &JsValue {
        &self.module
    }

    /// Build the name → template table from the module's exported templates.
    pub fn registry(&self) -> Result<AnimationRegistry<JsValue>, SyncError> {
        let mut templates = Vec::with_capacity(AnimationName::ALL.len());
        for name in AnimationName::ALL {
            let key = template_key(name);
            let t = get(&self.module, key).map_err(|e| SyncError::engine(describe(&e)))?;
            if t.is_undefined() || t.is_null() {
                return Err(SyncError::engine(format!("engine module lacks {key}")));
            }
            templates.push(t);
        }
        let [idle, walk, run, fly, rotate]: [JsValue; 5] = templates
            .try_into()
            .map_err(|_| SyncError::engine("animation template count mismatch"))?;
        Ok(AnimationRegistry::from_templates(idle, walk, run, fly, rotate))
    }
}

impl ViewerEngine for JsEngine {
    type Surface = JsValue;
    type Texture = JsValue;
    type Behavior = JsValue;
    type Viewer = JsViewer;
    type Track = JsTrack;
    type Controls = JsControls;

    fn create_viewer(
        &mut self,
        canvas: &JsValue,
        width: u32,
        height: u32,
    ) -> Result<JsViewer, SyncError> {
        let ctor: Function = get(&self.module, "SkinViewer")
            .and_then(|v| v.dyn_into())
            .map_err(|e| SyncError::engine(format!("SkinViewer constructor: {}", describe(&e))))?;

        let opts = Object::new();
        let set = |k: &str, v: JsValue| Reflect::set(&opts, &JsValue::from_str(k), &v);
        set("canvas", canvas.clone())
            .and_then(|_| set("width", JsValue::from(width)))
            .and_then(|_| set("height", JsValue::from(height)))
            .map_err(|e| SyncError::engine(describe(&e)))?;

        let inner = Reflect::construct(&ctor, &Array::of1(&opts))
            .map_err(|e| SyncError::engine(describe(&e)))?;
        let animations = get(&inner, "animations").unwrap_or(JsValue::UNDEFINED);
        Ok(JsViewer {
            inner,
            track: JsTrack { inner: animations },
        })
    }

    fn create_controls(&mut self, viewer: &mut JsViewer) -> JsControls {
        let inner = call(&self.module, "createOrbitControls", &[&viewer.inner]).unwrap_or_else(|e| {
            log::warn!("createOrbitControls failed: {}", describe(&e));
            JsValue::UNDEFINED
        });
        JsControls { inner }
    }
}

pub struct JsViewer {
    inner: JsValue,
    track: JsTrack,
}

impl JsViewer {
    /// The engine's viewer object, as handed to `onReady`.
    pub fn as_js(&self) -> &JsValue {
        &self.inner
    }
}

impl ViewerHandle for JsViewer {
    type Texture = JsValue;
    type Track = JsTrack;

    fn load_skin(&mut self, source: &JsValue, model: ModelVariant) {
        invoke(
            &self.inner,
            "loadSkin",
            &[source, &JsValue::from_str(model.as_str())],
        );
    }

    fn reset_skin(&mut self) {
        invoke(&self.inner, "resetSkin", &[]);
    }

    fn load_cape(&mut self, source: &JsValue) {
        invoke(&self.inner, "loadCape", &[source]);
    }

    fn reset_cape(&mut self) {
        invoke(&self.inner, "resetCape", &[]);
    }

    fn resize(&mut self, width: u32, height: u32) {
        invoke(
            &self.inner,
            "setSize",
            &[&JsValue::from(width), &JsValue::from(height)],
        );
    }

    fn force_release_context(&mut self) {
        match get(&self.inner, "renderer") {
            Ok(renderer) => invoke(&renderer, "forceContextLoss", &[]),
            Err(e) => log::warn!("viewer has no renderer: {}", describe(&e)),
        }
    }

    fn animations(&mut self) -> &mut JsTrack {
        &mut self.track
    }
}

pub struct JsTrack {
    inner: JsValue,
}

impl AnimationTrack for JsTrack {
    type Behavior = JsValue;

    fn add(&mut self, behavior: JsValue) {
        invoke(&self.inner, "add", &[&behavior]);
    }

    fn reset(&mut self) {
        invoke(&self.inner, "reset", &[]);
    }

    fn set_speed(&mut self, speed: f64) {
        assign(&self.inner, "speed", &JsValue::from_f64(speed));
    }

    fn set_paused(&mut self, paused: bool) {
        assign(&self.inner, "paused", &JsValue::from_bool(paused));
    }
}

pub struct JsControls {
    inner: JsValue,
}

impl ControlsHandle for JsControls {
    fn set_enable_rotate(&mut self, enabled: bool) {
        assign(&self.inner, "enableRotate", &JsValue::from_bool(enabled));
    }

    fn set_enable_zoom(&mut self, enabled: bool) {
        assign(&self.inner, "enableZoom", &JsValue::from_bool(enabled));
    }

    fn set_enable_pan(&mut self, enabled: bool) {
        assign(&self.inner, "enablePan", &JsValue::from_bool(enabled));
    }
}
