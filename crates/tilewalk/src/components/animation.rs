//! Directional frame animation for walking entities.
//!
//! Frame indices are shared across directions: `loop_frame..=end_frame` is
//! the walk cycle, frame 0 and `stop_frame` are the two idle poses.
//! LEFT and RIGHT share the side frames; LEFT draws them mirrored.

use crate::api::types::{Direction, TextureHandle};
use crate::assets::registry::TextureManager;
use crate::assets::sprites::SpriteSetDef;
use crate::error::LoadError;

/// Resolved textures of a sprite set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameSet {
    pub up: Vec<TextureHandle>,
    pub down: Vec<TextureHandle>,
    pub side: Vec<TextureHandle>,
    pub loop_frame: usize,
    pub end_frame: usize,
    pub stop_frame: usize,
}

impl FrameSet {
    /// One missing-texture frame per direction.
    pub fn placeholder(missing: TextureHandle) -> Self {
        Self {
            up: vec![missing],
            down: vec![missing],
            side: vec![missing],
            loop_frame: 0,
            end_frame: 0,
            stop_frame: 0,
        }
    }

    pub fn load(def: &SpriteSetDef, textures: &mut dyn TextureManager) -> Result<Self, LoadError> {
        def.validate()?;
        let mut resolve = |paths: &[String]| -> Vec<TextureHandle> {
            paths.iter().map(|path| textures.load_texture(path)).collect()
        };
        Ok(Self {
            up: resolve(&def.up[..]),
            down: resolve(&def.down[..]),
            side: resolve(&def.side[..]),
            loop_frame: def.loop_frame,
            end_frame: def.end_frame,
            stop_frame: def.stop_frame,
        })
    }

    /// Texture for a frame index facing a direction, plus whether to
    /// mirror it horizontally.
    pub fn frame(&self, facing: Direction, index: usize) -> (TextureHandle, bool) {
        let (frames, mirror) = match facing {
            Direction::Up => (&self.up, false),
            Direction::Down => (&self.down, false),
            Direction::Left => (&self.side, true),
            Direction::Right => (&self.side, false),
        };
        let texture = frames.get(index).copied().unwrap_or(TextureHandle::MISSING);
        (texture, mirror)
    }
}

/// Current frame and facing of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationComponent {
    pub frames: FrameSet,
    pub current: usize,
    pub facing: Direction,
}

impl AnimationComponent {
    pub fn new(frames: FrameSet) -> Self {
        Self {
            frames,
            current: 0,
            facing: Direction::Down,
        }
    }

    /// Face `direction` and step the walk cycle, wrapping past the end.
    pub fn advance(&mut self, direction: Direction) {
        self.facing = direction;
        self.current += 1;
        if self.current > self.frames.end_frame {
            self.current = self.frames.loop_frame;
        }
    }

    /// Idle step: any frame other than the stop pose goes to the stop
    /// pose, the stop pose goes back to frame 0. Standing still therefore
    /// alternates the two idle poses.
    pub fn stop(&mut self) {
        if self.current != self.frames.stop_frame {
            self.current = self.frames.stop_frame;
        } else {
            self.current = 0;
        }
    }

    /// Frame 0 or the stop pose: no walk cycle in progress.
    pub fn at_idle_boundary(&self) -> bool {
        self.current == 0 || self.current == self.frames.stop_frame
    }

    pub fn texture(&self) -> (TextureHandle, bool) {
        self.frames.frame(self.facing, self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::registry::TextureRegistry;
    use crate::assets::sprites::Character;

    fn walker_frames() -> FrameSet {
        let mut textures = TextureRegistry::new();
        FrameSet::load(&SpriteSetDef::character(Character::Male), &mut textures).unwrap()
    }

    #[test]
    fn walk_cycle_wraps_to_loop_frame() {
        let mut anim = AnimationComponent::new(walker_frames());
        let seen: Vec<usize> = (0..6)
            .map(|_| {
                anim.advance(Direction::Up);
                anim.current
            })
            .collect();
        assert_eq!(seen, vec![1, 2, 3, 4, 1, 2]);
        assert_eq!(anim.facing, Direction::Up);
    }

    #[test]
    fn frame_never_exceeds_end() {
        let mut anim = AnimationComponent::new(walker_frames());
        for _ in 0..50 {
            anim.advance(Direction::Left);
            assert!(anim.current <= anim.frames.end_frame);
        }
    }

    #[test]
    fn stop_alternates_between_idle_poses() {
        let mut anim = AnimationComponent::new(walker_frames());
        assert_eq!(anim.current, 0);
        let seen: Vec<usize> = (0..5)
            .map(|_| {
                anim.stop();
                anim.current
            })
            .collect();
        assert_eq!(seen, vec![5, 0, 5, 0, 5]);
    }

    #[test]
    fn stop_without_stop_pose_stays_on_zero() {
        let mut anim = AnimationComponent::new(FrameSet::placeholder(TextureHandle::MISSING));
        anim.stop();
        anim.stop();
        assert_eq!(anim.current, 0);
    }

    #[test]
    fn stop_from_walk_frame_goes_to_stop_pose() {
        let mut anim = AnimationComponent::new(walker_frames());
        anim.advance(Direction::Down);
        anim.advance(Direction::Down);
        assert!(!anim.at_idle_boundary());
        anim.stop();
        assert_eq!(anim.current, 5);
        assert!(anim.at_idle_boundary());
        anim.stop();
        assert_eq!(anim.current, 0);
    }

    #[test]
    fn left_mirrors_side_frames() {
        let mut anim = AnimationComponent::new(walker_frames());
        anim.facing = Direction::Left;
        let (left, left_flip) = anim.texture();
        anim.facing = Direction::Right;
        let (right, right_flip) = anim.texture();
        assert_eq!(left, right);
        assert!(left_flip);
        assert!(!right_flip);
    }

    #[test]
    fn placeholder_renders_missing() {
        let anim = AnimationComponent::new(FrameSet::placeholder(TextureHandle::MISSING));
        assert_eq!(anim.texture(), (TextureHandle::MISSING, false));
    }
}
