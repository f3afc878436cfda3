//! Recording stand-in for a rendering engine.
//!
//! Every capability call lands in a shared, ordered [`Call`] log so tests can assert
//! exact call sequences.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use skinview_sync::{
    AnimationRegistry, AnimationTrack, ControlsHandle, ModelVariant, SyncError, ViewerEngine,
    ViewerHandle,
};

/// Behavior instance used by the fake engine: just a label.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FakeBehavior(pub String);

impl FakeBehavior {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }
}

/// Stand-in render surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FakeCanvas;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum Call {
    CreateViewer { width: u32, height: u32 },
    CreateControls,
    LoadSkin { source: String, model: ModelVariant },
    ResetSkin,
    LoadCape { source: String },
    ResetCape,
    Resize { width: u32, height: u32 },
    ForceReleaseContext,
    AddAnimation { behavior: String },
    ResetAnimation,
    SetSpeed { speed: f64 },
    SetPaused { paused: bool },
    SetEnableRotate { enabled: bool },
    SetEnableZoom { enabled: bool },
    SetEnablePan { enabled: bool },
}

impl Call {
    /// Calls that reach the viewer after creation (everything but construction).
    pub fn is_viewer_call(&self) -> bool {
        !matches!(self, Call::CreateViewer { .. } | Call::CreateControls)
    }
}

pub type CallLog = Rc<RefCell<Vec<Call>>>;

fn record(log: &CallLog, call: Call) {
    log.borrow_mut().push(call);
}

#[derive(Debug, Default)]
pub struct RecordingEngine {
    log: CallLog,
    fail_with: Option<String>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `create_viewer` fail with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            log: CallLog::default(),
            fail_with: Some(reason.into()),
        }
    }

    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.log.borrow().clone()
    }

    /// Drain the log, returning what was recorded since the last drain.
    pub fn take_calls(&self) -> Vec<Call> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.log.borrow().iter().filter(|c| pred(c)).count()
    }
}

impl ViewerEngine for RecordingEngine {
    type Surface = FakeCanvas;
    type Texture = String;
    type Behavior = FakeBehavior;
    type Viewer = RecordingViewer;
    type Track = RecordingTrack;
    type Controls = RecordingControls;

    fn create_viewer(
        &mut self,
        _surface: &FakeCanvas,
        width: u32,
        height: u32,
    ) -> Result<RecordingViewer, SyncError> {
        if let Some(reason) = &self.fail_with {
            return Err(SyncError::engine(reason.clone()));
        }
        record(&self.log, Call::CreateViewer { width, height });
        Ok(RecordingViewer {
            log: self.log.clone(),
            track: RecordingTrack {
                log: self.log.clone(),
                active: Vec::new(),
                speed: 1.0,
                paused: false,
            },
            skin: None,
            cape: None,
            size: (width, height),
            released: false,
        })
    }

    fn create_controls(&mut self, _viewer: &mut RecordingViewer) -> RecordingControls {
        record(&self.log, Call::CreateControls);
        RecordingControls {
            log: self.log.clone(),
            rotate: true,
            zoom: true,
            pan: true,
        }
    }
}

/// Fake viewer that records calls and tracks the state they would produce.
#[derive(Debug)]
pub struct RecordingViewer {
    log: CallLog,
    track: RecordingTrack,
    pub skin: Option<(String, ModelVariant)>,
    pub cape: Option<String>,
    pub size: (u32, u32),
    pub released: bool,
}

impl RecordingViewer {
    pub fn track(&self) -> &RecordingTrack {
        &self.track
    }
}

impl ViewerHandle for RecordingViewer {
    type Texture = String;
    type Track = RecordingTrack;

    fn load_skin(&mut self, source: &String, model: ModelVariant) {
        record(
            &self.log,
            Call::LoadSkin {
                source: source.clone(),
                model,
            },
        );
        self.skin = Some((source.clone(), model));
    }

    fn reset_skin(&mut self) {
        record(&self.log, Call::ResetSkin);
        self.skin = None;
    }

    fn load_cape(&mut self, source: &String) {
        record(
            &self.log,
            Call::LoadCape {
                source: source.clone(),
            },
        );
        self.cape = Some(source.clone());
    }

    fn reset_cape(&mut self) {
        record(&self.log, Call::ResetCape);
        self.cape = None;
    }

    fn resize(&mut self, width: u32, height: u32) {
        record(&self.log, Call::Resize { width, height });
        self.size = (width, height);
    }

    fn force_release_context(&mut self) {
        record(&self.log, Call::ForceReleaseContext);
        self.released = true;
    }

    fn animations(&mut self) -> &mut RecordingTrack {
        &mut self.track
    }
}

#[derive(Debug)]
pub struct RecordingTrack {
    log: CallLog,
    /// Attached behaviors; more than one means an ordering bug upstream.
    pub active: Vec<FakeBehavior>,
    pub speed: f64,
    pub paused: bool,
}

impl AnimationTrack for RecordingTrack {
    type Behavior = FakeBehavior;

    fn add(&mut self, behavior: FakeBehavior) {
        record(
            &self.log,
            Call::AddAnimation {
                behavior: behavior.0.clone(),
            },
        );
        self.active.push(behavior);
    }

    fn reset(&mut self) {
        record(&self.log, Call::ResetAnimation);
        self.active.clear();
    }

    fn set_speed(&mut self, speed: f64) {
        record(&self.log, Call::SetSpeed { speed });
        self.speed = speed;
    }

    fn set_paused(&mut self, paused: bool) {
        record(&self.log, Call::SetPaused { paused });
        self.paused = paused;
    }
}

#[derive(Debug)]
pub struct RecordingControls {
    log: CallLog,
    pub rotate: bool,
    pub zoom: bool,
    pub pan: bool,
}

impl ControlsHandle for RecordingControls {
    fn set_enable_rotate(&mut self, enabled: bool) {
        record(&self.log, Call::SetEnableRotate { enabled });
        self.rotate = enabled;
    }

    fn set_enable_zoom(&mut self, enabled: bool) {
        record(&self.log, Call::SetEnableZoom { enabled });
        self.zoom = enabled;
    }

    fn set_enable_pan(&mut self, enabled: bool) {
        record(&self.log, Call::SetEnablePan { enabled });
        self.pan = enabled;
    }
}

/// Registry whose behaviors are labelled with the animation name.
pub fn registry() -> Rc<AnimationRegistry<FakeBehavior>> {
    Rc::new(AnimationRegistry::from_fn(|name| {
        FakeBehavior::new(name.as_str())
    }))
}

/// Template function form of [`registry`], for hosts that build their own table.
pub fn template(name: skinview_sync::AnimationName) -> FakeBehavior {
    FakeBehavior::new(name.as_str())
}

/// Parse a JSON array of calls, as used in scenario expectations.
pub fn calls_from_json(value: serde_json::Value) -> Result<Vec<Call>> {
    Ok(serde_json::from_value(value)?)
}
