//! Active animation selection.
//!
//! Idle ⇄ Active state machine over one animation track. A change of reference while
//! Active always goes through Idle: reset strictly before the next add, so the track
//! never holds two behaviors and no per-behavior state survives the switch.

use crate::animation::{AnimationReference, AnimationRegistry};
use crate::engine::AnimationTrack;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum SelectorState {
    #[default]
    Idle,
    Active,
}

#[derive(Debug, Default)]
pub struct AnimationSelector {
    state: SelectorState,
}

impl AnimationSelector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectorState {
        self.state
    }

    /// Make `reference` the active behavior on `track` (or none for `None`).
    pub fn select<Tr>(
        &mut self,
        track: &mut Tr,
        reference: Option<&AnimationReference<Tr::Behavior>>,
        registry: &AnimationRegistry<Tr::Behavior>,
    ) where
        Tr: AnimationTrack,
        Tr::Behavior: Clone,
    {
        if self.state == SelectorState::Active {
            track.reset();
            self.state = SelectorState::Idle;
        }

        if let Some(reference) = reference {
            track.add(reference.resolve(registry));
            self.state = SelectorState::Active;
        }
    }
}
