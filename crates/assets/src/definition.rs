//! JSON definitions for animations and sprites.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{
    Animation, Frame, PlaybackMode, Render, Sprite, SpriteState, StateContent, Surface, Update,
};
use crate::image_io;
use crate::types::Size;
use crate::LoadError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationDefinition {
    /// Playback mode name; anything but `LOOP` plays forward.
    #[serde(rename = "type", default)]
    pub mode: Option<String>,
    pub frames: Vec<FrameDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameDefinition {
    pub image: String,
    pub time: FrameTime,
}

/// Cumulative frame time in seconds, as a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrameTime {
    Seconds(f32),
    Text(String),
}

impl FrameTime {
    pub fn seconds(&self) -> Option<f32> {
        match self {
            FrameTime::Seconds(s) => Some(*s),
            FrameTime::Text(text) => text.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteDefinition {
    pub states: Vec<StateDefinition>,
}

/// One sprite state. `image` wins when both references are given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateDefinition {
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub animation: Option<String>,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::io(path, e))?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn relative(definition: &Path, reference: &str) -> PathBuf {
    definition
        .parent()
        .map(|dir| dir.join(reference))
        .unwrap_or_else(|| PathBuf::from(reference))
}

/// Load an animation definition and every frame image it references.
pub fn load_animation(path: &Path) -> Result<Animation, LoadError> {
    let definition: AnimationDefinition = read_json(path)?;
    let mode = definition
        .mode
        .as_deref()
        .map(PlaybackMode::parse)
        .unwrap_or_default();

    let mut frames = Vec::with_capacity(definition.frames.len());
    for frame in &definition.frames {
        let time = match frame.time.seconds() {
            Some(time) => time,
            None => {
                let text = match &frame.time {
                    FrameTime::Text(text) => text.clone(),
                    FrameTime::Seconds(s) => s.to_string(),
                };
                return Err(LoadError::InvalidTime(path.to_path_buf(), text));
            }
        };
        let surface = image_io::read(&relative(path, &frame.image))?;
        frames.push(Frame::new(surface, time));
    }

    let count = frames.len();
    let animation =
        Animation::new(frames, mode).ok_or_else(|| LoadError::NoFrames(path.to_path_buf()))?;
    debug!(path = %path.display(), frames = count, ?mode, "loaded animation");
    Ok(animation)
}

/// Load a sprite definition, its images and its animations.
pub fn load_sprite(path: &Path) -> Result<Sprite, LoadError> {
    let definition: SpriteDefinition = read_json(path)?;
    let names = &definition.states;
    if let Some((_, state)) = names
        .iter()
        .enumerate()
        .find(|(i, state)| names[..*i].iter().any(|other| other.name == state.name))
    {
        return Err(LoadError::DuplicateState {
            path: path.to_path_buf(),
            name: state.name.clone(),
        });
    }

    let mut states = Vec::with_capacity(definition.states.len());
    for state in definition.states {
        let content = match (&state.image, &state.animation) {
            (Some(image), _) => StateContent::Static(image_io::read(&relative(path, image))?),
            (None, Some(animation)) => {
                StateContent::Animated(load_animation(&relative(path, animation))?)
            }
            (None, None) => {
                return Err(LoadError::StateWithoutContent {
                    path: path.to_path_buf(),
                    name: state.name,
                })
            }
        };
        states.push(SpriteState::new(state.name, content));
    }

    let count = states.len();
    let sprite = Sprite::new(states).ok_or_else(|| LoadError::NoStates(path.to_path_buf()))?;
    debug!(path = %path.display(), states = count, "loaded sprite");
    Ok(sprite)
}

/// Anything the viewer can show.
#[derive(Clone, Debug)]
pub enum Asset {
    Image(Surface),
    Animation(Animation),
    Sprite(Sprite),
}

impl Asset {
    pub fn size(&self) -> Size {
        match self {
            Asset::Image(surface) => surface.size(),
            Asset::Animation(animation) => animation.size(),
            Asset::Sprite(sprite) => sprite.size(),
        }
    }
}

impl Update for Asset {
    fn update(&mut self, elapsed: f32) {
        match self {
            Asset::Image(_) => {}
            Asset::Animation(animation) => animation.update(elapsed),
            Asset::Sprite(sprite) => sprite.update(elapsed),
        }
    }
}

impl Render for Asset {
    fn render(&self, surface: &mut Surface) {
        match self {
            Asset::Image(image) => image.render(surface),
            Asset::Animation(animation) => animation.render(surface),
            Asset::Sprite(sprite) => sprite.render(surface),
        }
    }
}

/// Load whatever `path` holds.
///
/// A `.json` file with a `states` key is a sprite, any other `.json` file an
/// animation; everything else is read as a text image.
pub fn load_asset(path: &Path) -> Result<Asset, LoadError> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return image_io::read(path).map(Asset::Image);
    }

    let value: serde_json::Value = read_json(path)?;
    if value.get("states").is_some() {
        load_sprite(path).map(Asset::Sprite)
    } else {
        load_animation(path).map(Asset::Animation)
    }
}
