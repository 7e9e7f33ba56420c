//! Walker: moves a screen position toward a destination one pixel per
//! axis per step, at a fixed cadence independent of how often it is ticked.
//!
//! Movement and animation run on separate cadences. At most one step is
//! taken per tick: a delta spanning several step intervals still moves a
//! single pixel, which caps the apparent speed instead of teleporting.

use std::time::Duration;

use glam::IVec2;

use crate::api::config::GameConfig;
use crate::api::types::Direction;
use crate::core::time::{Cadence, TickClock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkState {
    /// Position equals destination.
    Idle,
    Moving,
}

/// Animation change requested by a walker step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationCue {
    /// Still moving: show the next walk frame facing this way.
    Advance(Direction),
    /// Arrived: cycle the idle poses.
    Stop,
}

/// Result of a tick on which a movement step was due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkStep {
    pub position: IVec2,
    pub facing: Direction,
    pub cue: Option<AnimationCue>,
}

#[derive(Debug, Clone)]
pub struct Walker {
    destination: IVec2,
    clock: TickClock,
    movement: Cadence,
    animation: Cadence,
}

impl Walker {
    pub fn new(destination: IVec2, step_interval: Duration, frame_interval: Duration) -> Self {
        Self {
            destination,
            clock: TickClock::new(),
            movement: Cadence::new(step_interval),
            animation: Cadence::new(frame_interval),
        }
    }

    pub fn from_config(destination: IVec2, config: &GameConfig) -> Self {
        Self::new(destination, config.step_interval(), config.frame_interval())
    }

    /// Retarget. Both cadences become due so the next tick responds.
    pub fn set_destination(&mut self, destination: IVec2) {
        self.destination = destination;
        self.movement.reset();
        self.animation.reset();
    }

    pub fn destination(&self) -> IVec2 {
        self.destination
    }

    pub fn elapsed(&self) -> Duration {
        self.clock.elapsed()
    }

    pub fn state(&self, position: IVec2) -> WalkState {
        if position == self.destination {
            WalkState::Idle
        } else {
            WalkState::Moving
        }
    }

    /// Advance the clock by `delta`. Returns the new position and any
    /// animation cue when a movement step was due, `None` otherwise.
    pub fn tick(&mut self, delta: Duration, position: IVec2) -> Option<WalkStep> {
        let now = self.clock.advance(delta);
        if !self.movement.is_due(now) {
            return None;
        }

        let mut sign = (self.destination - position).signum();
        let mut next = position + sign;

        // Snap any axis whose sign flipped or zeroed after the step.
        let after = (self.destination - next).signum();
        if after.x != sign.x {
            next.x = self.destination.x;
            sign.x = 0;
        }
        if after.y != sign.y {
            next.y = self.destination.y;
            sign.y = 0;
        }

        let remaining = (self.destination - next).abs();
        let facing = if remaining.x > remaining.y {
            if sign.x >= 0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if sign.y >= 0 {
            Direction::Down
        } else {
            Direction::Up
        };

        self.movement.reschedule(now);

        let cue = if self.animation.is_due(now) {
            self.animation.reschedule(now);
            if sign == IVec2::ZERO {
                Some(AnimationCue::Stop)
            } else {
                Some(AnimationCue::Advance(facing))
            }
        } else {
            None
        };

        Some(WalkStep {
            position: next,
            facing,
            cue,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: Duration = Duration::from_millis(15);
    const FRAME: Duration = Duration::from_millis(60);
    // Strictly longer than a step interval, so every tick qualifies.
    const QUALIFYING: Duration = Duration::from_millis(16);

    fn walk_to(destination: IVec2, from: IVec2) -> (Walker, IVec2) {
        let mut walker = Walker::new(from, STEP, FRAME);
        walker.set_destination(destination);
        (walker, from)
    }

    #[test]
    fn reaches_destination_in_exact_step_count() {
        let tile = 16;
        let dest = IVec2::new(5 * tile, 0);
        let (mut walker, mut pos) = walk_to(dest, IVec2::ZERO);

        for i in 0..(5 * tile) {
            assert_eq!(walker.state(pos), WalkState::Moving, "arrived early at tick {}", i);
            pos = walker.tick(QUALIFYING, pos).unwrap().position;
            assert!(pos.x <= dest.x);
        }
        assert_eq!(pos, dest);
        assert_eq!(walker.state(pos), WalkState::Idle);
    }

    #[test]
    fn stays_on_destination_after_arrival() {
        let dest = IVec2::new(-3, 2);
        let (mut walker, mut pos) = walk_to(dest, IVec2::ZERO);
        for _ in 0..20 {
            pos = walker.tick(QUALIFYING, pos).unwrap().position;
        }
        assert_eq!(pos, dest);
    }

    #[test]
    fn destination_equal_to_position_is_idle() {
        let here = IVec2::new(32, 48);
        let (mut walker, pos) = walk_to(here, here);
        assert_eq!(walker.state(pos), WalkState::Idle);
        let step = walker.tick(QUALIFYING, pos).unwrap();
        assert_eq!(step.position, here);
        assert_eq!(step.cue, Some(AnimationCue::Stop));
    }

    #[test]
    fn steps_are_throttled_by_interval() {
        let (mut walker, pos) = walk_to(IVec2::new(10, 0), IVec2::ZERO);
        let pos = walker.tick(Duration::from_millis(1), pos).unwrap().position;
        assert_eq!(pos, IVec2::new(1, 0));

        // Deadline is now 16ms; 15 more 1ms ticks reach it but do not pass it.
        for _ in 0..15 {
            assert!(walker.tick(Duration::from_millis(1), pos).is_none());
        }
        let pos = walker.tick(Duration::from_millis(1), pos).unwrap().position;
        assert_eq!(pos, IVec2::new(2, 0));
    }

    #[test]
    fn huge_delta_moves_one_pixel() {
        let (mut walker, pos) = walk_to(IVec2::new(100, 100), IVec2::ZERO);
        let step = walker.tick(Duration::from_secs(10), pos).unwrap();
        assert_eq!(step.position, IVec2::new(1, 1));
    }

    #[test]
    fn retarget_responds_immediately() {
        let (mut walker, pos) = walk_to(IVec2::new(10, 0), IVec2::ZERO);
        let pos = walker.tick(QUALIFYING, pos).unwrap().position;
        assert!(walker.tick(Duration::from_millis(1), pos).is_none());

        walker.set_destination(IVec2::new(0, 10));
        let step = walker.tick(Duration::from_millis(1), pos).unwrap();
        assert_eq!(step.position, IVec2::new(0, 1));
    }

    #[test]
    fn facing_follows_dominant_axis() {
        let cases = [
            (IVec2::new(32, 8), Direction::Right),
            (IVec2::new(-32, 8), Direction::Left),
            (IVec2::new(8, 32), Direction::Down),
            (IVec2::new(8, -32), Direction::Up),
        ];
        for (dest, expected) in cases {
            let (mut walker, pos) = walk_to(dest, IVec2::ZERO);
            assert_eq!(walker.tick(QUALIFYING, pos).unwrap().facing, expected, "{:?}", dest);
        }
    }

    #[test]
    fn perfect_diagonal_faces_vertically() {
        let (mut walker, pos) = walk_to(IVec2::new(32, 32), IVec2::ZERO);
        assert_eq!(walker.tick(QUALIFYING, pos).unwrap().facing, Direction::Down);

        let (mut walker, pos) = walk_to(IVec2::new(-32, -32), IVec2::ZERO);
        assert_eq!(walker.tick(QUALIFYING, pos).unwrap().facing, Direction::Up);
    }

    #[test]
    fn animation_runs_on_its_own_cadence() {
        let (mut walker, mut pos) = walk_to(IVec2::new(64, 0), IVec2::ZERO);
        let mut cues = Vec::new();
        for _ in 0..8 {
            let step = walker.tick(QUALIFYING, pos).unwrap();
            pos = step.position;
            cues.push(step.cue);
        }
        // Due at 16ms, then next after 76ms: ticks land on 16, 32, ..., 128.
        let advanced: Vec<usize> = cues
            .iter()
            .enumerate()
            .filter(|(_, cue)| cue.is_some())
            .map(|(i, _)| i)
            .collect();
        assert_eq!(advanced, vec![0, 4]);
        assert_eq!(cues[0], Some(AnimationCue::Advance(Direction::Right)));
    }

    #[test]
    fn arrival_step_cues_stop() {
        let (mut walker, pos) = walk_to(IVec2::new(1, 0), IVec2::ZERO);
        let step = walker.tick(QUALIFYING, pos).unwrap();
        assert_eq!(step.position, IVec2::new(1, 0));
        assert_eq!(step.cue, Some(AnimationCue::Stop));
    }
}
