//! Reading a host props object (camelCase keys) into a core snapshot.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsError, JsValue};

use skinview_sync::{AnimationReference, ViewerProps};

pub type JsProps = ViewerProps<JsValue, JsValue>;

fn field(obj: &JsValue, key: &str) -> Result<JsValue, JsError> {
    Reflect::get(obj, &JsValue::from_str(key))
        .map_err(|e| JsError::new(&format!("props.{key}: {}", crate::engine::describe(&e))))
}

fn absent(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn pixels(v: &JsValue, key: &str) -> Result<Option<u32>, JsError> {
    if absent(v) {
        return Ok(None);
    }
    match v.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(Some(n.round() as u32)),
        _ => Err(JsError::new(&format!("props.{key} must be a non-negative number"))),
    }
}

/// Texture sources follow JS truthiness: "" and null mean no texture.
fn texture(v: JsValue) -> Option<JsValue> {
    v.is_truthy().then_some(v)
}

/// Style properties that take a bare number; every other number is in pixels.
const UNITLESS: &[&str] = &[
    "animationIterationCount",
    "aspectRatio",
    "borderImageOutset",
    "borderImageSlice",
    "borderImageWidth",
    "columnCount",
    "columns",
    "fillOpacity",
    "flex",
    "flexGrow",
    "flexShrink",
    "floodOpacity",
    "fontWeight",
    "gridArea",
    "gridColumn",
    "gridColumnEnd",
    "gridColumnStart",
    "gridRow",
    "gridRowEnd",
    "gridRowStart",
    "lineClamp",
    "lineHeight",
    "opacity",
    "order",
    "orphans",
    "scale",
    "stopOpacity",
    "strokeDasharray",
    "strokeDashoffset",
    "strokeMiterlimit",
    "strokeOpacity",
    "strokeWidth",
    "tabSize",
    "widows",
    "zIndex",
    "zoom",
];

fn number_value(key: &str, n: f64) -> String {
    if n == 0.0 || key.starts_with("--") || UNITLESS.contains(&key) {
        n.to_string()
    } else {
        format!("{n}px")
    }
}

fn camel_to_kebab(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('-');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}

/// `style` may be CSS text or a `{ camelCaseProp: value }` object.
fn style(v: &JsValue) -> Option<String> {
    if absent(v) {
        return None;
    }
    if let Some(s) = v.as_string() {
        return Some(s);
    }
    let obj: &Object = v.dyn_ref()?;
    let mut decls = Vec::new();
    for entry in Object::entries(obj).iter() {
        let pair: Array = entry.unchecked_into();
        let (Some(k), value) = (pair.get(0).as_string(), pair.get(1)) else {
            continue;
        };
        let value = value
            .as_string()
            .or_else(|| value.as_f64().map(|n| number_value(&k, n)));
        if let Some(value) = value {
            decls.push(format!("{}: {value};", camel_to_kebab(&k)));
        }
    }
    Some(decls.join(" "))
}

/// Parsed props plus the `onReady` callback, which is not part of the snapshot.
pub struct HostProps {
    pub props: JsProps,
    pub on_ready: Option<Function>,
}

pub fn read_props(obj: &JsValue) -> Result<HostProps, JsError> {
    if absent(obj) {
        return Ok(HostProps {
            props: JsProps::default(),
            on_ready: None,
        });
    }
    if !obj.is_object() {
        return Err(JsError::new("props must be an object"));
    }

    // Only `undefined` means auto-detect; `null` picks the default model.
    let is_slim = field(obj, "isSlim")?;
    let animation = field(obj, "animation")?;
    let animation = if !animation.is_truthy() {
        None
    } else if let Some(name) = animation.as_string() {
        Some(AnimationReference::named(&name).map_err(|e| JsError::new(&e.to_string()))?)
    } else {
        Some(AnimationReference::Custom(animation))
    };
    let speed = field(obj, "animationSpeed")?;
    let on_ready = field(obj, "onReady")?.dyn_into::<Function>().ok();

    let props = JsProps {
        width: pixels(&field(obj, "width")?, "width")?,
        height: pixels(&field(obj, "height")?, "height")?,
        skin: texture(field(obj, "skin")?),
        is_slim: (!is_slim.is_undefined()).then(|| is_slim.is_truthy()),
        cape: texture(field(obj, "cape")?),
        enable_zoom: field(obj, "enableZoom")?.is_truthy(),
        enable_rotate: field(obj, "enableRotate")?.is_truthy(),
        enable_pan: field(obj, "enablePan")?.is_truthy(),
        animation,
        animation_speed: speed.as_f64(),
        paused: field(obj, "paused")?.is_truthy(),
        style: style(&field(obj, "style")?),
    };
    Ok(HostProps { props, on_ready })
}
