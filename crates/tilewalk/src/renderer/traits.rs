//! Renderer contract consumed by the simulation core.
//!
//! The core never draws anything itself. Each tick it submits draw items
//! (tiles first, then entities) and finally pushes the camera framing.
//! Submissions are write-only: nothing is read back.

use glam::IVec2;

use super::instance::DrawItem;

/// Low-level renderer backend.
///
/// # Example Implementation
///
/// ```ignore
/// struct CanvasRenderer {
///     queue: Vec<DrawItem>,
///     view: (IVec2, IVec2),
/// }
///
/// impl Renderer for CanvasRenderer {
///     fn submit_draw_item(&mut self, item: DrawItem) { self.queue.push(item); }
///     fn set_viewport_center(&mut self, center: IVec2) { self.view.0 = center; }
///     fn set_viewport_size(&mut self, size: IVec2) { self.view.1 = size; }
/// }
/// ```
pub trait Renderer {
    /// Queue one sprite for this frame.
    fn submit_draw_item(&mut self, item: DrawItem);

    /// Center the view on a pixel position.
    fn set_viewport_center(&mut self, center: IVec2);

    /// Set the visible area in pixels.
    fn set_viewport_size(&mut self, size: IVec2);
}
