//! Per-group prop bindings onto the live viewer.
//!
//! Each binding watches a narrow slice of the snapshot and issues its imperative
//! call only when that slice differs from the last snapshot applied while the viewer
//! existed. Viewer availability is itself watched: before creation nothing is
//! applied or recorded, and the first reconcile after creation fires every binding.

use std::fmt;

use crate::animation::AnimationRegistry;
use crate::config::Config;
use crate::engine::{AnimationTrack, ControlsHandle, ViewerEngine, ViewerHandle};
use crate::lifecycle::ViewerLifecycle;
use crate::props::ViewerProps;
use crate::selector::{AnimationSelector, SelectorState};

/// Independent input groups, in the order they are applied.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Binding {
    /// skin source + slim flag
    Skin,
    Cape,
    /// width + height
    Size,
    /// rotate/zoom/pan flags
    Controls,
    /// speed + paused
    Playback,
    Animation,
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Binding::Skin => "skin",
            Binding::Cape => "cape",
            Binding::Size => "size",
            Binding::Controls => "controls",
            Binding::Playback => "playback",
            Binding::Animation => "animation",
        };
        f.write_str(s)
    }
}

#[derive(Debug)]
pub struct PropSynchronizer<T, B> {
    applied: Option<ViewerProps<T, B>>,
    selector: AnimationSelector,
    default_speed: f64,
}

/// A slice counts as changed when there is no previous snapshot to compare against.
fn slice_changed<P>(prev: Option<&P>, differs: impl Fn(&P) -> bool) -> bool {
    prev.map_or(true, differs)
}

impl<T, B> PropSynchronizer<T, B>
where
    T: Clone + PartialEq,
    B: Clone + PartialEq,
{
    pub fn new(config: &Config) -> Self {
        Self {
            applied: None,
            selector: AnimationSelector::new(),
            default_speed: config.default_animation_speed,
        }
    }

    /// Last snapshot pushed to the viewer, if any.
    pub fn applied(&self) -> Option<&ViewerProps<T, B>> {
        self.applied.as_ref()
    }

    pub fn animation_state(&self) -> SelectorState {
        self.selector.state()
    }

    fn speed_of(&self, props: &ViewerProps<T, B>) -> f64 {
        props.animation_speed.unwrap_or(self.default_speed)
    }

    /// Apply `props` to the viewer owned by `lifecycle`.
    ///
    /// Returns the bindings that issued engine calls. A lifecycle that is not
    /// ready yields an empty list and leaves nothing recorded.
    pub fn reconcile<E>(
        &mut self,
        props: &ViewerProps<T, B>,
        lifecycle: &mut ViewerLifecycle<E>,
        registry: &AnimationRegistry<B>,
    ) -> Vec<Binding>
    where
        E: ViewerEngine<Texture = T, Behavior = B>,
    {
        let mut fired = Vec::new();
        let Some(created_at) = lifecycle.created_at() else {
            return fired;
        };

        let prev = self.applied.take();
        let first = prev.is_none();
        let prev = prev.as_ref();

        if let Some(viewer) = lifecycle.viewer_mut() {
            if slice_changed(prev, |p| p.skin != props.skin || p.is_slim != props.is_slim) {
                match &props.skin {
                    Some(src) => {
                        viewer.load_skin(src, props.model_variant());
                        fired.push(Binding::Skin);
                    }
                    // A new viewer already shows the default skin.
                    None if !first => {
                        viewer.reset_skin();
                        fired.push(Binding::Skin);
                    }
                    None => {}
                }
            }

            if slice_changed(prev, |p| p.cape != props.cape) {
                match &props.cape {
                    Some(src) => {
                        viewer.load_cape(src);
                        fired.push(Binding::Cape);
                    }
                    None if !first => {
                        viewer.reset_cape();
                        fired.push(Binding::Cape);
                    }
                    None => {}
                }
            }

            if slice_changed(prev, |p| p.width != props.width || p.height != props.height) {
                if let Some(size) = props.dimensions() {
                    if !(first && size == created_at) {
                        viewer.resize(size.width, size.height);
                        fired.push(Binding::Size);
                    }
                }
            }
        }

        if let Some(controls) = lifecycle.controls_mut() {
            if slice_changed(prev, |p| {
                p.enable_rotate != props.enable_rotate
                    || p.enable_zoom != props.enable_zoom
                    || p.enable_pan != props.enable_pan
            }) {
                controls.set_enable_rotate(props.enable_rotate);
                controls.set_enable_zoom(props.enable_zoom);
                controls.set_enable_pan(props.enable_pan);
                fired.push(Binding::Controls);
            }
        }

        let speed = self.speed_of(props);
        if let Some(viewer) = lifecycle.viewer_mut() {
            // Bitwise so a NaN speed compares equal to itself.
            if slice_changed(prev, |p| {
                self.speed_of(p).to_bits() != speed.to_bits() || p.paused != props.paused
            }) {
                let track = viewer.animations();
                track.set_speed(speed);
                track.set_paused(props.paused);
                fired.push(Binding::Playback);
            }

            if slice_changed(prev, |p| p.animation != props.animation) {
                let was_active = self.selector.state() == SelectorState::Active;
                self.selector
                    .select(viewer.animations(), props.animation.as_ref(), registry);
                if was_active || props.animation.is_some() {
                    fired.push(Binding::Animation);
                }
            }
        }

        for binding in &fired {
            log::debug!("binding fired: {binding}");
        }
        self.applied = Some(props.clone());
        fired
    }
}
