//! Skinview Sync Core (engine-agnostic)
//!
//! Keeps one long-lived, side-effecting skin viewer consistent with a stream of
//! declarative prop snapshots. The rendering engine is reached only through the
//! traits in [`engine`]; host adapters (web/Bevy) implement those traits and
//! drive a [`SkinViewerComponent`] from their own change notifications.

pub mod animation;
pub mod component;
pub mod config;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod props;
pub mod selector;
pub mod sync;

// Re-exports for consumers (adapters)
pub use animation::{AnimationName, AnimationReference, AnimationRegistry};
pub use component::SkinViewerComponent;
pub use config::Config;
pub use engine::{AnimationTrack, ControlsHandle, ModelVariant, ViewerEngine, ViewerHandle};
pub use error::SyncError;
pub use lifecycle::{LifecycleState, ViewerLifecycle};
pub use props::{Dimensions, ViewerProps};
pub use selector::{AnimationSelector, SelectorState};
pub use sync::{Binding, PropSynchronizer};

/// Props snapshot type for a given engine.
pub type PropsFor<E> = ViewerProps<<E as ViewerEngine>::Texture, <E as ViewerEngine>::Behavior>;
