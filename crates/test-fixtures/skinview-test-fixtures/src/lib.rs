use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub mod engine;

pub use engine::{
    registry, template, Call, CallLog, FakeBehavior, FakeCanvas, RecordingControls,
    RecordingEngine, RecordingTrack, RecordingViewer,
};

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    scenarios: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod scenarios {
    use super::*;
    use skinview_sync::{AnimationReference, ViewerProps};

    /// Props as written in scenario files (camelCase, like the host-facing options).
    #[derive(Debug, Clone, Default, Deserialize)]
    #[serde(rename_all = "camelCase", deny_unknown_fields)]
    pub struct PropsSpec {
        pub width: Option<u32>,
        pub height: Option<u32>,
        pub skin: Option<String>,
        pub is_slim: Option<bool>,
        pub cape: Option<String>,
        #[serde(default)]
        pub enable_zoom: bool,
        #[serde(default)]
        pub enable_rotate: bool,
        #[serde(default)]
        pub enable_pan: bool,
        pub animation: Option<AnimationSpec>,
        pub animation_speed: Option<f64>,
        #[serde(default)]
        pub paused: bool,
        pub style: Option<String>,
    }

    /// `"walk"` for a named animation, `{ "custom": "label" }` for a caller-supplied one.
    #[derive(Debug, Clone, Deserialize)]
    #[serde(untagged)]
    pub enum AnimationSpec {
        Named(String),
        Custom { custom: String },
    }

    impl PropsSpec {
        pub fn to_props(&self) -> Result<ViewerProps<String, FakeBehavior>> {
            let animation = match &self.animation {
                None => None,
                Some(AnimationSpec::Named(name)) => Some(AnimationReference::named(name)?),
                Some(AnimationSpec::Custom { custom }) => {
                    Some(AnimationReference::Custom(FakeBehavior::new(custom.clone())))
                }
            };
            Ok(ViewerProps {
                width: self.width,
                height: self.height,
                skin: self.skin.clone(),
                is_slim: self.is_slim,
                cape: self.cape.clone(),
                enable_zoom: self.enable_zoom,
                enable_rotate: self.enable_rotate,
                enable_pan: self.enable_pan,
                animation,
                animation_speed: self.animation_speed,
                paused: self.paused,
                style: self.style.clone(),
            })
        }
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(tag = "op", rename_all = "snake_case")]
    pub enum Step {
        /// Construct the component and create the viewer.
        Mount { props: PropsSpec, expect: Vec<Call> },
        Update { props: PropsSpec, expect: Vec<Call> },
        Unmount { expect: Vec<Call> },
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct Scenario {
        pub name: String,
        #[serde(default)]
        pub description: String,
        pub steps: Vec<Step>,
    }

    pub fn keys() -> Vec<String> {
        MANIFEST.scenarios.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.scenarios, "scenario", name)?;
        read_to_string(rel)
    }

    pub fn load(name: &str) -> Result<Scenario> {
        let rel = lookup(&MANIFEST.scenarios, "scenario", name)?;
        load_json(rel)
    }
}
