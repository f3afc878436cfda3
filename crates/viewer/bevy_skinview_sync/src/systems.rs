use bevy::log::{debug, warn};
use bevy::prelude::*;

use crate::components::{SkinViewerProps, SkinViewerSurface};
use crate::resources::{SkinViewers, ViewerReady};
use skinview_sync::{LifecycleState, SkinViewerComponent, ViewerEngine};

type PropsOf<E> = SkinViewerProps<<E as ViewerEngine>::Texture, <E as ViewerEngine>::Behavior>;

/// Reconciles every entity whose props (or surface) changed this frame.
///
/// New entities get a component; a component that is still pending is mounted as
/// soon as its entity has a surface and complete dimensions.
pub fn sync_viewers_system<E>(
    mut viewers: NonSendMut<SkinViewers<E>>,
    query: Query<(Entity, Ref<PropsOf<E>>, Option<Ref<SkinViewerSurface<E::Surface>>>)>,
    mut ready: EventWriter<ViewerReady>,
) where
    E: ViewerEngine + 'static,
    E::Texture: Send + Sync + 'static,
    E::Behavior: Send + Sync + 'static,
    E::Surface: Send + Sync + 'static,
{
    let SkinViewers {
        engine,
        registry,
        config,
        components,
    } = &mut *viewers;

    for (entity, props, surface) in &query {
        let surface_changed = surface.as_ref().is_some_and(|s| s.is_changed());
        if !props.is_changed() && !surface_changed {
            continue;
        }

        let component = components.entry(entity).or_insert_with(|| {
            SkinViewerComponent::with_config(props.0.clone(), registry.clone(), config.clone())
        });
        let fired = component.update(props.0.clone());
        if !fired.is_empty() {
            debug!("skin viewer {entity:?}: {fired:?}");
        }

        if component.state() != LifecycleState::Pending {
            continue;
        }
        let Some(surface) = surface else {
            continue;
        };
        match component.mount(engine, &surface.0) {
            Ok(fired) if component.is_ready() => {
                debug!("skin viewer {entity:?} created: {fired:?}");
                ready.send(ViewerReady { entity });
            }
            Ok(_) => {}
            Err(e) => warn!("skin viewer {entity:?} not created: {e}"),
        }
    }
}

/// Releases the viewer of every entity that lost its props (or was despawned).
pub fn unmount_viewers_system<E>(
    mut viewers: NonSendMut<SkinViewers<E>>,
    mut removed: RemovedComponents<PropsOf<E>>,
) where
    E: ViewerEngine + 'static,
    E::Texture: Send + Sync + 'static,
    E::Behavior: Send + Sync + 'static,
{
    for entity in removed.read() {
        if let Some(mut component) = viewers.components.remove(&entity) {
            component.unmount();
            debug!("skin viewer {entity:?} released");
        }
    }
}
