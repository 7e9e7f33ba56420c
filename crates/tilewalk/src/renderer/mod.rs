pub mod camera;
pub mod instance;
pub mod traits;

// Re-export key types for convenient access
pub use camera::{CameraFraming, Framing};
pub use instance::{DrawBuffer, DrawItem, PackedDrawItem};
pub use traits::Renderer;
