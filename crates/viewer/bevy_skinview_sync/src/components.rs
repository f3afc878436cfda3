use bevy::prelude::*;
use skinview_sync::ViewerProps;

/// Declarative viewer options for one entity. Mutating it is what triggers reconciliation.
#[derive(Component, Debug, Clone, PartialEq, Deref, DerefMut)]
pub struct SkinViewerProps<T, B>(pub ViewerProps<T, B>)
where
    T: Send + Sync + 'static,
    B: Send + Sync + 'static;

/// Render surface the viewer is created on.
#[derive(Component, Debug, Clone)]
pub struct SkinViewerSurface<S: Send + Sync + 'static>(pub S);
