pub mod buttons;

pub use buttons::{ButtonState, InputEvent, InputSource};
