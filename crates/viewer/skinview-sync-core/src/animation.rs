//! Symbolic animation names, references and the name → behavior registry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SyncError;

/// Closed set of built-in animations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationName {
    Idle,
    Walk,
    Run,
    Fly,
    Rotate,
}

impl AnimationName {
    pub const ALL: [AnimationName; 5] = [
        AnimationName::Idle,
        AnimationName::Walk,
        AnimationName::Run,
        AnimationName::Fly,
        AnimationName::Rotate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationName::Idle => "idle",
            AnimationName::Walk => "walk",
            AnimationName::Run => "run",
            AnimationName::Fly => "fly",
            AnimationName::Rotate => "rotate",
        }
    }

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for AnimationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AnimationName {
    type Err = SyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AnimationName::ALL
            .into_iter()
            .find(|n| n.as_str() == s)
            .ok_or_else(|| SyncError::UnknownAnimation { name: s.to_string() })
    }
}

/// What the caller asks to play: a built-in by name, or its own behavior instance.
#[derive(Clone, Debug, PartialEq)]
pub enum AnimationReference<B> {
    Named(AnimationName),
    Custom(B),
}

impl<B> AnimationReference<B> {
    /// Parse a symbolic name; names outside the closed set are a contract error.
    pub fn named(name: &str) -> Result<Self, SyncError> {
        name.parse().map(AnimationReference::Named)
    }

    /// Resolve to a concrete behavior. Custom instances bypass the registry.
    pub fn resolve(&self, registry: &AnimationRegistry<B>) -> B
    where
        B: Clone,
    {
        match self {
            AnimationReference::Named(name) => registry.instantiate(*name),
            AnimationReference::Custom(behavior) => behavior.clone(),
        }
    }
}

impl<B> From<AnimationName> for AnimationReference<B> {
    fn from(name: AnimationName) -> Self {
        AnimationReference::Named(name)
    }
}

type Factory<B> = Box<dyn Fn() -> B>;

/// Read-only table from every [`AnimationName`] to a behavior factory.
///
/// Lookup is total over the enum. Share one registry between components with `Rc`;
/// per-viewer state lives in the instances the factories return, never in the table.
pub struct AnimationRegistry<B> {
    factories: [Factory<B>; 5],
}

impl<B: 'static> AnimationRegistry<B> {
    /// One factory per name; use for behaviors that carry mutable state.
    pub fn from_fn<F>(make: F) -> Self
    where
        F: Fn(AnimationName) -> B + Clone + 'static,
    {
        let factories = AnimationName::ALL.map(|name| {
            let make = make.clone();
            Box::new(move || make(name)) as Factory<B>
        });
        Self { factories }
    }

    /// Shared stateless templates, handed out by clone on every attach.
    pub fn from_templates(idle: B, walk: B, run: B, fly: B, rotate: B) -> Self
    where
        B: Clone,
    {
        let templates = [idle, walk, run, fly, rotate];
        let factories = templates.map(|t| Box::new(move || t.clone()) as Factory<B>);
        Self { factories }
    }
}

impl<B> AnimationRegistry<B> {
    pub fn instantiate(&self, name: AnimationName) -> B {
        (self.factories[name.index()])()
    }

    /// String lookup for hosts that receive names untyped.
    pub fn instantiate_named(&self, name: &str) -> Result<B, SyncError> {
        Ok(self.instantiate(name.parse()?))
    }
}

impl<B> fmt::Debug for AnimationRegistry<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimationRegistry")
            .field("names", &AnimationName::ALL)
            .finish()
    }
}
