//! Host-facing composition: lifecycle + synchronizer + registry behind one component.

use std::fmt::Write as _;
use std::rc::Rc;

use crate::animation::AnimationRegistry;
use crate::config::Config;
use crate::engine::ViewerEngine;
use crate::error::SyncError;
use crate::lifecycle::{LifecycleState, ViewerLifecycle};
use crate::sync::{Binding, PropSynchronizer};
use crate::PropsFor;

type ReadyCallback<V> = Box<dyn FnOnce(&mut V)>;

/// One mounted skin viewer.
///
/// Drive it the way a host runtime drives a component: construct with the first
/// snapshot, `mount` once the render surface exists, `update` with every new
/// snapshot, `unmount` when the host element goes away.
pub struct SkinViewerComponent<E: ViewerEngine> {
    config: Config,
    props: PropsFor<E>,
    lifecycle: ViewerLifecycle<E>,
    sync: PropSynchronizer<E::Texture, E::Behavior>,
    registry: Rc<AnimationRegistry<E::Behavior>>,
    on_ready: Option<ReadyCallback<E::Viewer>>,
}

impl<E: ViewerEngine> SkinViewerComponent<E> {
    pub fn new(props: PropsFor<E>, registry: Rc<AnimationRegistry<E::Behavior>>) -> Self {
        Self::with_config(props, registry, Config::default())
    }

    pub fn with_config(
        props: PropsFor<E>,
        registry: Rc<AnimationRegistry<E::Behavior>>,
        config: Config,
    ) -> Self {
        Self {
            sync: PropSynchronizer::new(&config),
            config,
            props,
            lifecycle: ViewerLifecycle::new(),
            registry,
            on_ready: None,
        }
    }

    /// Called once, right after the viewer has been created.
    pub fn on_ready(mut self, f: impl FnOnce(&mut E::Viewer) + 'static) -> Self {
        self.on_ready = Some(Box::new(f));
        self
    }

    pub fn props(&self) -> &PropsFor<E> {
        &self.props
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> LifecycleState {
        self.lifecycle.state()
    }

    pub fn is_ready(&self) -> bool {
        self.lifecycle.is_ready()
    }

    pub fn viewer(&self) -> Option<&E::Viewer> {
        self.lifecycle.viewer()
    }

    pub fn viewer_mut(&mut self) -> Option<&mut E::Viewer> {
        self.lifecycle.viewer_mut()
    }

    pub fn controls_mut(&mut self) -> Option<&mut E::Controls> {
        self.lifecycle.controls_mut()
    }

    /// Inline CSS for the host element: pixel width/height, then caller style.
    pub fn surface_style(&self) -> String {
        let mut css = String::new();
        if let Some(w) = self.props.width {
            let _ = write!(css, "width: {w}px;");
        }
        if let Some(h) = self.props.height {
            if !css.is_empty() {
                css.push(' ');
            }
            let _ = write!(css, "height: {h}px;");
        }
        if let Some(extra) = self.props.style.as_deref().map(str::trim) {
            if !extra.is_empty() {
                if !css.is_empty() {
                    css.push(' ');
                }
                css.push_str(extra);
            }
        }
        css
    }

    /// Create the viewer on `surface` using the current width/height, then apply
    /// every binding. Returns the bindings that issued calls.
    ///
    /// A component that was unmounted before this runs stays inert.
    pub fn mount(
        &mut self,
        engine: &mut E,
        surface: &E::Surface,
    ) -> Result<Vec<Binding>, SyncError> {
        if self.lifecycle.state() == LifecycleState::Disposed {
            return Ok(Vec::new());
        }
        let size = self.props.dimensions().ok_or(SyncError::MissingDimensions {
            width: self.props.width,
            height: self.props.height,
        })?;

        if !self.lifecycle.create(engine, surface, size)? {
            return Ok(Vec::new());
        }

        if let Some(ready) = self.on_ready.take() {
            if let Some(viewer) = self.lifecycle.viewer_mut() {
                ready(viewer);
            }
        }

        Ok(self.reconcile())
    }

    /// Replace the snapshot and apply whatever changed.
    pub fn update(&mut self, props: PropsFor<E>) -> Vec<Binding> {
        self.props = props;
        self.reconcile()
    }

    fn reconcile(&mut self) -> Vec<Binding> {
        self.sync
            .reconcile(&self.props, &mut self.lifecycle, &self.registry)
    }

    /// Release the viewer's rendering context. Idempotent; no engine calls follow.
    pub fn unmount(&mut self) {
        self.on_ready = None;
        self.lifecycle.dispose();
    }
}

impl<E: ViewerEngine> Drop for SkinViewerComponent<E> {
    fn drop(&mut self) {
        if self.config.dispose_on_drop {
            self.lifecycle.dispose();
        }
    }
}
