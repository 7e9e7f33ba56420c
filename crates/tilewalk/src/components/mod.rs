pub mod animation;
pub mod entity;
pub mod grid;
pub mod layer;
pub mod player;
pub mod walker;
