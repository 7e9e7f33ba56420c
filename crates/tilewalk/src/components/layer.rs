/// Render layer: the z-order a draw item is submitted with.
///
/// Layers are drawn back-to-front: map tiles first, entities on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum RenderLayer {
    Terrain = 0,
    #[default]
    Objects = 1,
}

impl RenderLayer {
    /// Convert to u8 for the packed draw list.
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}
