//! Capabilities consumed from the external rendering engine.
//!
//! The core never draws anything itself. Adapters implement these traits over a
//! concrete engine (a JS module, a Bevy scene, a recording fake in tests).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Skin geometry variant requested when loading a skin texture.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModelVariant {
    Default,
    Slim,
    /// Engine inspects the texture layout and picks the geometry.
    AutoDetect,
}

impl ModelVariant {
    /// Resolve the tri-state slim flag: `Some(true)` → slim, `Some(false)` → default,
    /// unspecified → auto-detect.
    pub fn from_slim_flag(is_slim: Option<bool>) -> Self {
        match is_slim {
            Some(true) => ModelVariant::Slim,
            Some(false) => ModelVariant::Default,
            None => ModelVariant::AutoDetect,
        }
    }

    /// Wire name understood by the engine.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelVariant::Default => "default",
            ModelVariant::Slim => "slim",
            ModelVariant::AutoDetect => "auto-detect",
        }
    }
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(ModelVariant::Default),
            "slim" => Ok(ModelVariant::Slim),
            "auto-detect" => Ok(ModelVariant::AutoDetect),
            other => Err(format!("unknown model variant '{other}'")),
        }
    }
}

/// Per-viewer subsystem holding zero or one active pose behavior.
pub trait AnimationTrack {
    type Behavior;

    /// Attach a behavior. Callers reset first; the track never holds two.
    fn add(&mut self, behavior: Self::Behavior);
    /// Detach the active behavior; the model returns to its rest pose.
    fn reset(&mut self);
    fn set_speed(&mut self, speed: f64);
    fn set_paused(&mut self, paused: bool);
}

/// One live render session bound to a host surface.
///
/// Texture loads are fire-and-forget: decode/fetch failures stay inside the engine.
pub trait ViewerHandle {
    type Texture;
    type Track: AnimationTrack;

    fn load_skin(&mut self, source: &Self::Texture, model: ModelVariant);
    /// Back to the engine's built-in default skin.
    fn reset_skin(&mut self);
    fn load_cape(&mut self, source: &Self::Texture);
    /// Remove the cape.
    fn reset_cape(&mut self);
    fn resize(&mut self, width: u32, height: u32);
    /// Release the underlying rendering context (GPU resources, surface listeners).
    fn force_release_context(&mut self);
    fn animations(&mut self) -> &mut Self::Track;
}

/// Camera-interaction controller paired with a viewer. Lives and dies with the
/// viewer's rendering context; it has no disposal of its own.
pub trait ControlsHandle {
    fn set_enable_rotate(&mut self, enabled: bool);
    fn set_enable_zoom(&mut self, enabled: bool);
    fn set_enable_pan(&mut self, enabled: bool);
}

/// Factory side of the engine: builds viewers and their controls.
pub trait ViewerEngine {
    /// Host render surface (canvas element, window, test stub).
    type Surface;
    /// Texture source accepted by skin/cape loads.
    type Texture: Clone + PartialEq;
    /// Animation behavior instance accepted by the track.
    type Behavior: Clone + PartialEq;
    type Viewer: ViewerHandle<
        Texture = Self::Texture,
        Track = Self::Track,
    >;
    type Track: AnimationTrack<Behavior = Self::Behavior>;
    type Controls: ControlsHandle;

    /// Construct a viewer bound to `surface` at the given size.
    fn create_viewer(
        &mut self,
        surface: &Self::Surface,
        width: u32,
        height: u32,
    ) -> Result<Self::Viewer, crate::SyncError>;

    /// Derive the camera controls for a freshly created viewer.
    fn create_controls(&mut self, viewer: &mut Self::Viewer) -> Self::Controls;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slim_flag_resolution_is_tri_state() {
        assert_eq!(ModelVariant::from_slim_flag(Some(true)), ModelVariant::Slim);
        assert_eq!(
            ModelVariant::from_slim_flag(Some(false)),
            ModelVariant::Default
        );
        assert_eq!(ModelVariant::from_slim_flag(None), ModelVariant::AutoDetect);
    }

    #[test]
    fn wire_names_match_engine_strings() {
        for v in [
            ModelVariant::Default,
            ModelVariant::Slim,
            ModelVariant::AutoDetect,
        ] {
            assert_eq!(v.as_str().parse::<ModelVariant>().unwrap(), v);
            assert_eq!(
                serde_json::to_value(v).unwrap(),
                serde_json::Value::String(v.to_string())
            );
        }
        assert!("wide".parse::<ModelVariant>().is_err());
    }
}
