use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Per-direction walk cycle: image paths for each frame index plus the
/// frame bounds the animation runs between. LEFT and RIGHT share `side`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteSetDef {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub side: Vec<String>,
    /// Frame the walk cycle wraps back to.
    #[serde(default)]
    pub loop_frame: usize,
    /// Last frame of the walk cycle.
    #[serde(default)]
    pub end_frame: usize,
    /// Second idle frame, alternated with frame 0 while standing.
    #[serde(default)]
    pub stop_frame: usize,
}

/// Built-in player art.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Character {
    #[default]
    Male,
    Female,
}

impl Character {
    fn directory(self) -> &'static str {
        match self {
            Character::Male => "data/sprite/mc_male",
            Character::Female => "data/sprite/mc_female",
        }
    }
}

impl SpriteSetDef {
    /// Parse and validate a sprite set from JSON.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let def: SpriteSetDef = serde_json::from_str(json)?;
        def.validate()?;
        Ok(def)
    }

    /// Walk cycle for a built-in character: frames 1-4 walk, 5 is the
    /// stop pose. Frames repeat paths so indices map 1:1 to images.
    pub fn character(character: Character) -> Self {
        let dir = character.directory();
        let frames = |prefix: &str, stop: &str| -> Vec<String> {
            [
                prefix.to_string(),
                format!("{}1", prefix),
                prefix.to_string(),
                format!("{}2", prefix),
                prefix.to_string(),
                stop.to_string(),
            ]
            .iter()
            .map(|name| format!("{}/{}.png", dir, name))
            .collect()
        };
        Self {
            up: frames("u", "u"),
            down: frames("d", "d"),
            side: frames("s", "s3"),
            loop_frame: 1,
            end_frame: 4,
            stop_frame: 5,
        }
    }

    /// Every frame index the animation can reach must have an image.
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.loop_frame > self.end_frame {
            return Err(LoadError::SpriteSet(format!(
                "loop_frame {} is past end_frame {}",
                self.loop_frame, self.end_frame
            )));
        }
        let needed = self.end_frame.max(self.stop_frame) + 1;
        for (name, frames) in [("up", &self.up), ("down", &self.down), ("side", &self.side)] {
            if frames.len() < needed {
                return Err(LoadError::SpriteSet(format!(
                    "`{}` has {} frames, needs {}",
                    name,
                    frames.len(),
                    needed
                )));
            }
        }
        Ok(())
    }
}
