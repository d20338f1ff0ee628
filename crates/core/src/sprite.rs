//! Sprites: named visual states, each a static surface or an animation.

use crate::animation::Animation;
use crate::compositor::blit_at;
use crate::surface::Surface;
use crate::traits::{Render, Update};
use crate::types::{Position, Size};

/// What a sprite state shows.
#[derive(Clone, Debug)]
pub enum StateContent {
    Static(Surface),
    Animated(Animation),
}

impl StateContent {
    pub fn size(&self) -> Size {
        match self {
            StateContent::Static(surface) => surface.size(),
            StateContent::Animated(animation) => animation.size(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct SpriteState {
    name: String,
    content: StateContent,
}

impl SpriteState {
    pub fn new(name: impl Into<String>, content: StateContent) -> Self {
        Self {
            name: name.into(),
            content,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &StateContent {
        &self.content
    }
}

/// A named, stateful visual entity.
///
/// Always has at least one state; the first one is current initially.
#[derive(Clone, Debug)]
pub struct Sprite {
    states: Vec<SpriteState>,
    current: usize,
}

impl Sprite {
    /// Returns `None` when `states` is empty or two states share a name.
    pub fn new(states: Vec<SpriteState>) -> Option<Self> {
        if states.is_empty() || duplicate_name(&states).is_some() {
            return None;
        }
        Some(Self { states, current: 0 })
    }

    /// Switch to the state called `name`.
    ///
    /// Unknown names leave the current state as it is.
    pub fn update_state(&mut self, name: &str) {
        if let Some(index) = self.states.iter().position(|s| s.name == name) {
            self.current = index;
        }
    }

    pub fn current_state(&self) -> &SpriteState {
        &self.states[self.current]
    }

    pub fn states(&self) -> &[SpriteState] {
        &self.states
    }

    /// The current state's animation, if it is animated.
    pub fn current_animation_mut(&mut self) -> Option<&mut Animation> {
        match &mut self.states[self.current].content {
            StateContent::Animated(animation) => Some(animation),
            StateContent::Static(_) => None,
        }
    }

    /// Smallest size that fits every state.
    pub fn size(&self) -> Size {
        self.states
            .iter()
            .fold(Size::default(), |acc, s| acc.max(s.content.size()))
    }

    pub fn render_at(&self, surface: &mut Surface, top_left: Position) {
        match &self.current_state().content {
            StateContent::Static(image) => blit_at(surface, image, top_left),
            StateContent::Animated(animation) => animation.render_at(surface, top_left),
        }
    }
}

impl Update for Sprite {
    fn update(&mut self, elapsed: f32) {
        if let Some(animation) = self.current_animation_mut() {
            animation.update(elapsed);
        }
    }
}

impl Render for Sprite {
    fn render(&self, surface: &mut Surface) {
        self.render_at(surface, Position::TOP_LEFT);
    }
}

/// The first name used by more than one state.
fn duplicate_name(states: &[SpriteState]) -> Option<&str> {
    states
        .iter()
        .enumerate()
        .find(|(i, state)| states[..*i].iter().any(|other| other.name == state.name))
        .map(|(_, state)| state.name())
}
