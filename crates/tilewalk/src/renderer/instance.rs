use bytemuck::{Pod, Zeroable};
use glam::IVec2;

use super::traits::Renderer;
use crate::api::types::TextureHandle;
use crate::components::layer::RenderLayer;

/// One sprite submission: a texture at a pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawItem {
    pub texture: TextureHandle,
    /// Top-left corner in pixels.
    pub position: IVec2,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
    pub layer: RenderLayer,
}

impl DrawItem {
    /// Unflipped draw item.
    pub fn new(texture: TextureHandle, position: IVec2, layer: RenderLayer) -> Self {
        Self {
            texture,
            position,
            flip_horizontal: false,
            flip_vertical: false,
            layer,
        }
    }

    pub fn flipped_horizontally(mut self, flip: bool) -> Self {
        self.flip_horizontal = flip;
        self
    }

    /// Wire form for hosts that read the draw list through raw memory.
    pub fn pack(&self) -> PackedDrawItem {
        let mut flags = 0;
        if self.flip_horizontal {
            flags |= PackedDrawItem::FLIP_HORIZONTAL;
        }
        if self.flip_vertical {
            flags |= PackedDrawItem::FLIP_VERTICAL;
        }
        PackedDrawItem {
            texture: self.texture.0,
            x: self.position.x,
            y: self.position.y,
            flags,
            layer: self.layer.as_u8() as u32,
        }
    }
}

/// Packed draw item: 5 × 4 bytes = 20 bytes stride.
/// Must match the JavaScript reader in the web host.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct PackedDrawItem {
    pub texture: u32,
    pub x: i32,
    pub y: i32,
    /// Bit 0: flip horizontal, bit 1: flip vertical.
    pub flags: u32,
    pub layer: u32,
}

impl PackedDrawItem {
    pub const WORDS: usize = 5;
    pub const STRIDE_BYTES: usize = Self::WORDS * 4;
    pub const FLIP_HORIZONTAL: u32 = 1;
    pub const FLIP_VERTICAL: u32 = 1 << 1;
}

/// Recording renderer: keeps this frame's submissions in order together
/// with the last camera framing pushed to it.
#[derive(Debug, Clone, Default)]
pub struct DrawBuffer {
    items: Vec<DrawItem>,
    packed: Vec<PackedDrawItem>,
    viewport_center: IVec2,
    viewport_size: IVec2,
}

impl DrawBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            packed: Vec::with_capacity(capacity),
            viewport_center: IVec2::ZERO,
            viewport_size: IVec2::ZERO,
        }
    }

    /// Drop this frame's submissions. The camera framing is kept.
    pub fn clear(&mut self) {
        self.items.clear();
        self.packed.clear();
    }

    pub fn items(&self) -> &[DrawItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn viewport_center(&self) -> IVec2 {
        self.viewport_center
    }

    pub fn viewport_size(&self) -> IVec2 {
        self.viewport_size
    }

    /// Packed submissions, rebuilt alongside `items`.
    pub fn packed(&self) -> &[PackedDrawItem] {
        &self.packed
    }

    /// Raw pointer to the packed words for direct memory reads.
    pub fn packed_ptr(&self) -> *const u32 {
        bytemuck::cast_slice::<PackedDrawItem, u32>(&self.packed).as_ptr()
    }
}

impl Renderer for DrawBuffer {
    fn submit_draw_item(&mut self, item: DrawItem) {
        self.packed.push(item.pack());
        self.items.push(item);
    }

    fn set_viewport_center(&mut self, center: IVec2) {
        self.viewport_center = center;
    }

    fn set_viewport_size(&mut self, size: IVec2) {
        self.viewport_size = size;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_item_is_5_words() {
        assert_eq!(std::mem::size_of::<PackedDrawItem>(), PackedDrawItem::STRIDE_BYTES);
    }

    #[test]
    fn pack_encodes_flip_flags() {
        let item = DrawItem::new(TextureHandle(7), IVec2::new(-16, 32), RenderLayer::Objects)
            .flipped_horizontally(true);
        let packed = item.pack();
        assert_eq!(packed.texture, 7);
        assert_eq!((packed.x, packed.y), (-16, 32));
        assert_eq!(packed.flags, PackedDrawItem::FLIP_HORIZONTAL);
        assert_eq!(packed.layer, 1);
    }

    #[test]
    fn buffer_records_in_order_and_clears() {
        let mut buf = DrawBuffer::new();
        buf.submit_draw_item(DrawItem::new(TextureHandle(1), IVec2::ZERO, RenderLayer::Terrain));
        buf.submit_draw_item(DrawItem::new(TextureHandle(2), IVec2::ZERO, RenderLayer::Objects));
        buf.set_viewport_center(IVec2::new(5, 6));

        assert_eq!(buf.len(), 2);
        assert_eq!(buf.items()[0].texture, TextureHandle(1));
        assert_eq!(buf.packed().len(), 2);
        assert_eq!(buf.items()[1].layer, RenderLayer::Objects);

        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.packed().is_empty());
        assert_eq!(buf.viewport_center(), IVec2::new(5, 6));
    }
}
