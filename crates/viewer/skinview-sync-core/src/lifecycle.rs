//! Viewer lifecycle: create once, update many, dispose once.

use crate::engine::{ViewerEngine, ViewerHandle};
use crate::error::SyncError;
use crate::props::Dimensions;

/// Observable phase of a mounted instance's viewer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LifecycleState {
    /// Mounted, viewer not created yet. Bindings no-op.
    Pending,
    Ready,
    /// Unmounted. Nothing reaches the engine any more.
    Disposed,
}

enum Slot<E: ViewerEngine> {
    Pending,
    Ready {
        viewer: E::Viewer,
        controls: E::Controls,
        created_at: Dimensions,
    },
    Disposed,
}

/// Exclusive owner of one viewer and its controls for a mounted host instance.
pub struct ViewerLifecycle<E: ViewerEngine> {
    slot: Slot<E>,
}

impl<E: ViewerEngine> Default for ViewerLifecycle<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ViewerEngine> ViewerLifecycle<E> {
    pub fn new() -> Self {
        Self {
            slot: Slot::Pending,
        }
    }

    pub fn state(&self) -> LifecycleState {
        match self.slot {
            Slot::Pending => LifecycleState::Pending,
            Slot::Ready { .. } => LifecycleState::Ready,
            Slot::Disposed => LifecycleState::Disposed,
        }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        matches!(self.slot, Slot::Ready { .. })
    }

    /// Build the viewer and its controls.
    ///
    /// Returns `Ok(false)` without touching the engine when the instance was already
    /// disposed: a creation that resolves after unmount stays inert.
    pub fn create(
        &mut self,
        engine: &mut E,
        surface: &E::Surface,
        size: Dimensions,
    ) -> Result<bool, SyncError> {
        match self.slot {
            Slot::Pending => {}
            Slot::Ready { .. } => return Err(SyncError::AlreadyCreated),
            Slot::Disposed => {
                log::warn!("viewer creation after unmount ignored");
                return Ok(false);
            }
        }

        let mut viewer = engine.create_viewer(surface, size.width, size.height)?;
        let controls = engine.create_controls(&mut viewer);
        log::debug!("viewer created at {}x{}", size.width, size.height);
        self.slot = Slot::Ready {
            viewer,
            controls,
            created_at: size,
        };
        Ok(true)
    }

    pub fn viewer(&self) -> Option<&E::Viewer> {
        match &self.slot {
            Slot::Ready { viewer, .. } => Some(viewer),
            _ => None,
        }
    }

    pub fn viewer_mut(&mut self) -> Option<&mut E::Viewer> {
        match &mut self.slot {
            Slot::Ready { viewer, .. } => Some(viewer),
            _ => None,
        }
    }

    pub fn controls_mut(&mut self) -> Option<&mut E::Controls> {
        match &mut self.slot {
            Slot::Ready { controls, .. } => Some(controls),
            _ => None,
        }
    }

    /// Size the viewer was constructed with.
    pub fn created_at(&self) -> Option<Dimensions> {
        match &self.slot {
            Slot::Ready { created_at, .. } => Some(*created_at),
            _ => None,
        }
    }

    /// Release the rendering context. Exactly one release per created viewer;
    /// safe when creation never happened and when called repeatedly.
    pub fn dispose(&mut self) {
        match std::mem::replace(&mut self.slot, Slot::Disposed) {
            Slot::Ready { mut viewer, .. } => {
                // Controls go with the context.
                viewer.force_release_context();
                log::debug!("viewer context released");
            }
            Slot::Pending => log::debug!("disposed before viewer creation"),
            Slot::Disposed => {}
        }
    }
}
