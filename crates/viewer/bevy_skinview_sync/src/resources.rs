use std::collections::HashMap;
use std::rc::Rc;

use bevy::prelude::*;
use skinview_sync::{AnimationRegistry, Config, SkinViewerComponent, ViewerEngine};

/// Main-thread state: the engine, the shared animation table and one component per entity.
/// Inserted as a non-send resource because engine handles are not thread-safe.
pub struct SkinViewers<E: ViewerEngine> {
    pub engine: E,
    pub(crate) registry: Rc<AnimationRegistry<E::Behavior>>,
    pub(crate) config: Config,
    pub(crate) components: HashMap<Entity, SkinViewerComponent<E>>,
}

impl<E: ViewerEngine> SkinViewers<E> {
    pub fn new(engine: E, registry: AnimationRegistry<E::Behavior>, config: Config) -> Self {
        Self {
            engine,
            registry: Rc::new(registry),
            config,
            components: HashMap::new(),
        }
    }

    pub fn get(&self, entity: Entity) -> Option<&SkinViewerComponent<E>> {
        self.components.get(&entity)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}

/// Sent once per entity when its viewer has been created.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewerReady {
    pub entity: Entity,
}
