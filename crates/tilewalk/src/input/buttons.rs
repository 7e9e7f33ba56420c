use crate::api::types::{Direction, PlayerSlot};

/// Read side of the input layer: which directional buttons each logical
/// player currently holds.
pub trait InputSource {
    fn is_direction_pressed(&self, player: PlayerSlot, direction: Direction) -> bool;
}

/// Button edge the host forwards from its raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    Pressed { player: PlayerSlot, direction: Direction },
    Released { player: PlayerSlot, direction: Direction },
}

/// Held-button state per player slot, one bit per direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonState {
    held: [u8; PlayerSlot::COUNT],
}

impl ButtonState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Pressed { player, direction } => self.press(player, direction),
            InputEvent::Released { player, direction } => self.release(player, direction),
        }
    }

    pub fn press(&mut self, player: PlayerSlot, direction: Direction) {
        self.held[player.index()] |= direction.mask();
    }

    pub fn release(&mut self, player: PlayerSlot, direction: Direction) {
        self.held[player.index()] &= !direction.mask();
    }

    /// Release everything, e.g. when the host loses focus.
    pub fn clear(&mut self) {
        self.held = [0; PlayerSlot::COUNT];
    }

    /// Builder form for tests and scripted input.
    pub fn with_pressed(mut self, player: PlayerSlot, direction: Direction) -> Self {
        self.press(player, direction);
        self
    }
}

impl InputSource for ButtonState {
    fn is_direction_pressed(&self, player: PlayerSlot, direction: Direction) -> bool {
        self.held[player.index()] & direction.mask() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_and_release() {
        let mut state = ButtonState::new();
        state.apply(InputEvent::Pressed { player: PlayerSlot::One, direction: Direction::Left });
        state.apply(InputEvent::Pressed { player: PlayerSlot::One, direction: Direction::Up });
        assert!(state.is_direction_pressed(PlayerSlot::One, Direction::Left));
        assert!(state.is_direction_pressed(PlayerSlot::One, Direction::Up));

        state.apply(InputEvent::Released { player: PlayerSlot::One, direction: Direction::Left });
        assert!(!state.is_direction_pressed(PlayerSlot::One, Direction::Left));
        assert!(state.is_direction_pressed(PlayerSlot::One, Direction::Up));
    }

    #[test]
    fn players_are_independent() {
        let state = ButtonState::new().with_pressed(PlayerSlot::Two, Direction::Down);
        assert!(state.is_direction_pressed(PlayerSlot::Two, Direction::Down));
        assert!(!state.is_direction_pressed(PlayerSlot::One, Direction::Down));
    }

    #[test]
    fn clear_releases_everything() {
        let mut state = ButtonState::new()
            .with_pressed(PlayerSlot::One, Direction::Right)
            .with_pressed(PlayerSlot::Two, Direction::Up);
        state.clear();
        for dir in Direction::ALL {
            assert!(!state.is_direction_pressed(PlayerSlot::One, dir));
            assert!(!state.is_direction_pressed(PlayerSlot::Two, dir));
        }
    }
}
