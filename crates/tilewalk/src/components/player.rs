//! Player control: turns held directional buttons into one-tile moves.

use crate::api::config::GameConfig;
use crate::api::types::{Direction, PlayerSlot};
use crate::components::animation::FrameSet;
use crate::components::entity::Entity;
use crate::components::grid::{GridStore, BLOCKED};
use crate::input::buttons::InputSource;

/// Input-driven movement policy attached to an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayerControl {
    pub slot: PlayerSlot,
}

impl PlayerControl {
    pub fn new(slot: PlayerSlot) -> Self {
        Self { slot }
    }

    /// Issue moves for held directions. Only runs while the animation
    /// sits on an idle pose, so a new step never starts mid-walk.
    /// Each direction is checked against the position left by the
    /// previous one, so two held axes give two sequential single-axis
    /// moves. Returns the number of moves issued.
    pub fn apply(&self, entity: &mut Entity, grid: &GridStore, input: &dyn InputSource) -> usize {
        if !entity.animation.at_idle_boundary() {
            return 0;
        }

        let mut moves = 0;
        for direction in Direction::ALL {
            if !input.is_direction_pressed(self.slot, direction) {
                continue;
            }
            let offset = direction.offset();
            if entity.check_collision_at(grid, offset) < BLOCKED {
                let target = entity.grid_position() + offset;
                entity.set_grid_position(target, true);
                moves += 1;
            }
        }
        moves
    }
}

/// Build a player entity: walker attached, camera tracked, standing on
/// the grid's spawn cell.
pub fn player_entity(
    slot: PlayerSlot,
    frames: FrameSet,
    grid: &GridStore,
    config: &GameConfig,
) -> Entity {
    Entity::new(config)
        .with_tag(match slot {
            PlayerSlot::One => "player1",
            PlayerSlot::Two => "player2",
        })
        .with_frames(frames)
        .with_walker(config)
        .with_camera_tracking(true)
        .with_player(PlayerControl::new(slot))
        .at_grid(grid.spawn())
}
