use bevy::prelude::*;
use skinview_sync::{AnimationName, AnimationRegistry, Config, ViewerEngine};

pub mod components;
pub mod resources;
pub mod systems;

pub use components::{SkinViewerProps, SkinViewerSurface};
pub use resources::{SkinViewers, ViewerReady};

/// Adds skin viewer reconciliation for engine `E` to an app.
///
/// Spawn an entity with [`SkinViewerProps`] and [`SkinViewerSurface`] to create a
/// viewer, mutate the props to update it, remove or despawn to release it.
pub struct SkinViewerPlugin<E: ViewerEngine> {
    make_engine: fn() -> E,
    template: fn(AnimationName) -> E::Behavior,
    config: Config,
}

impl<E: ViewerEngine> SkinViewerPlugin<E> {
    pub fn new(make_engine: fn() -> E, template: fn(AnimationName) -> E::Behavior) -> Self {
        Self {
            make_engine,
            template,
            config: Config::default(),
        }
    }

    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }
}

impl<E> Plugin for SkinViewerPlugin<E>
where
    E: ViewerEngine + 'static,
    E::Texture: Send + Sync + 'static,
    E::Behavior: Send + Sync + 'static,
    E::Surface: Send + Sync + 'static,
{
    fn build(&self, app: &mut App) {
        let registry = AnimationRegistry::from_fn(self.template);
        app.insert_non_send_resource(SkinViewers::new(
            (self.make_engine)(),
            registry,
            self.config.clone(),
        ))
        .add_event::<ViewerReady>()
        .add_systems(
            Update,
            (
                systems::sync_viewers_system::<E>,
                systems::unmount_viewers_system::<E>,
            )
                .chain(),
        );
    }
}
