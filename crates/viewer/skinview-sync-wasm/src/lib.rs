use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use skinview_sync::{AnimationRegistry, Binding, Config, SkinViewerComponent, SyncError};

pub mod engine;
pub mod props;

pub use engine::{JsControls, JsEngine, JsTrack, JsViewer};
pub use props::{read_props, HostProps, JsProps};

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js_error(e: SyncError) -> JsError {
    JsError::new(&e.to_string())
}

fn bindings_to_js(fired: &[Binding]) -> Array {
    fired
        .iter()
        .map(|b| JsValue::from_str(&b.to_string()))
        .collect()
}

/// Route `log` records (swallowed engine exceptions included) to the browser console.
/// A logger the host installed first is left in place.
fn init_console_logging() {
    let _ = console_log::init_with_level(log::Level::Warn);
}

thread_local! {
    /// One template table per engine module, shared by every viewer built from it.
    static REGISTRIES: RefCell<Vec<(JsValue, Rc<AnimationRegistry<JsValue>>)>> =
        const { RefCell::new(Vec::new()) };
}

fn shared_registry(engine: &JsEngine) -> Result<Rc<AnimationRegistry<JsValue>>, SyncError> {
    REGISTRIES.with(|cell| {
        let mut cache = cell.borrow_mut();
        if let Some((_, reg)) = cache.iter().find(|(m, _)| m == engine.module()) {
            return Ok(reg.clone());
        }
        let reg = Rc::new(engine.registry()?);
        cache.push((engine.module().clone(), reg.clone()));
        Ok(reg)
    })
}

/// A skin viewer bound to one host element.
///
/// ```js
/// const v = new SkinViewer(skinview3d, { width: 300, height: 400, skin: "steve.png" });
/// v.mount(canvas);
/// v.update({ width: 300, height: 400, skin: "steve.png", animation: "walk" });
/// v.unmount();
/// ```
#[wasm_bindgen]
pub struct SkinViewer {
    engine: JsEngine,
    component: SkinViewerComponent<JsEngine>,
}

#[wasm_bindgen]
impl SkinViewer {
    /// `module` is the rendering engine module; `config` is an optional JSON config object
    /// (e.g. `{ default_animation_speed: 1.0 }`).
    #[wasm_bindgen(constructor)]
    pub fn new(module: JsValue, props: JsValue, config: JsValue) -> Result<SkinViewer, JsError> {
        console_error_panic_hook::set_once();
        init_console_logging();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        let engine = JsEngine::new(module).map_err(to_js_error)?;
        let registry = shared_registry(&engine).map_err(to_js_error)?;
        let HostProps { props, on_ready } = read_props(&props)?;

        let mut component = SkinViewerComponent::with_config(props, registry, cfg);
        if let Some(f) = on_ready {
            component = component.on_ready(move |viewer: &mut JsViewer| {
                if let Err(e) = f.call1(&JsValue::UNDEFINED, viewer.as_js()) {
                    log::warn!("onReady threw: {}", crate::engine::describe(&e));
                }
            });
        }

        Ok(SkinViewer { engine, component })
    }

    /// Create the engine viewer on `canvas`. Returns the names of the bindings applied.
    #[wasm_bindgen]
    pub fn mount(&mut self, canvas: JsValue) -> Result<Array, JsError> {
        let fired = self
            .component
            .mount(&mut self.engine, &canvas)
            .map_err(to_js_error)?;
        Ok(bindings_to_js(&fired))
    }

    /// Apply a new props snapshot. Returns the names of the bindings that fired.
    /// `onReady` in later snapshots is ignored.
    #[wasm_bindgen]
    pub fn update(&mut self, props: JsValue) -> Result<Array, JsError> {
        let HostProps { props, .. } = read_props(&props)?;
        Ok(bindings_to_js(&self.component.update(props)))
    }

    #[wasm_bindgen]
    pub fn unmount(&mut self) {
        self.component.unmount();
    }

    /// Inline CSS for the host container element.
    #[wasm_bindgen(js_name = surfaceStyle)]
    pub fn surface_style(&self) -> String {
        self.component.surface_style()
    }

    #[wasm_bindgen(js_name = isReady)]
    pub fn is_ready(&self) -> bool {
        self.component.is_ready()
    }

    /// The engine viewer object, or `undefined` before mount/after unmount.
    #[wasm_bindgen(getter)]
    pub fn viewer(&self) -> JsValue {
        self.component
            .viewer()
            .map(|v| v.as_js().clone())
            .unwrap_or(JsValue::UNDEFINED)
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
