//! Declarative input snapshot.
//!
//! One snapshot per render pass. The synchronizer only reads snapshots; it compares
//! the current one against the last applied one, group by group.

use crate::animation::AnimationReference;
use crate::engine::ModelVariant;

/// A width/height pair that is complete enough to resize or create a viewer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Both sides must be present and non-zero; partial dimensions are not a size.
    pub fn from_parts(width: Option<u32>, height: Option<u32>) -> Option<Self> {
        match (width, height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(Self::new(w, h)),
            _ => None,
        }
    }
}

/// Full set of recognized viewer options.
///
/// `T` is the engine's texture source type, `B` its behavior instance type.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerProps<T, B> {
    /// Pixels. Required for creation, optional afterwards.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub skin: Option<T>,
    /// `None` lets the engine auto-detect the model from the texture.
    pub is_slim: Option<bool>,
    pub cape: Option<T>,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
    pub enable_pan: bool,
    pub animation: Option<AnimationReference<B>>,
    /// `None` falls back to `Config::default_animation_speed`.
    pub animation_speed: Option<f64>,
    pub paused: bool,
    /// Extra CSS declarations for the host element, appended after width/height.
    pub style: Option<String>,
}

impl<T, B> Default for ViewerProps<T, B> {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            skin: None,
            is_slim: None,
            cape: None,
            enable_zoom: false,
            enable_rotate: false,
            enable_pan: false,
            animation: None,
            animation_speed: None,
            paused: false,
            style: None,
        }
    }
}

impl<T, B> ViewerProps<T, B> {
    /// Props with the two values creation needs.
    pub fn sized(width: u32, height: u32) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn with_skin(mut self, skin: T) -> Self {
        self.skin = Some(skin);
        self
    }

    pub fn with_cape(mut self, cape: T) -> Self {
        self.cape = Some(cape);
        self
    }

    pub fn with_animation(mut self, animation: impl Into<AnimationReference<B>>) -> Self {
        self.animation = Some(animation.into());
        self
    }

    pub fn dimensions(&self) -> Option<Dimensions> {
        Dimensions::from_parts(self.width, self.height)
    }

    pub fn model_variant(&self) -> ModelVariant {
        ModelVariant::from_slim_flag(self.is_slim)
    }
}
