use std::collections::HashMap;

use crate::api::types::TextureHandle;

/// Texture loading contract. Load failures are absorbed by the
/// implementation, which hands back the missing-texture placeholder.
pub trait TextureManager {
    /// Resolve an image path to a texture handle, loading it on first use.
    fn load_texture(&mut self, path: &str) -> TextureHandle;

    /// Placeholder shown for anything that failed to load or was never set.
    fn missing_texture(&self) -> TextureHandle {
        TextureHandle::MISSING
    }
}

/// In-memory texture registry: deduplicates by path and hands out
/// sequential handles. Handle 0 is reserved for the missing texture.
/// Hosts read `path()` to learn which image each handle stands for.
#[derive(Debug, Clone)]
pub struct TextureRegistry {
    handles: HashMap<String, TextureHandle>,
    paths: Vec<String>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self {
            handles: HashMap::new(),
            paths: vec![String::new()],
        }
    }

    /// Look up a loaded path without loading it.
    pub fn get(&self, path: &str) -> Option<TextureHandle> {
        self.handles.get(path).copied()
    }

    /// Image path behind a handle. The missing texture has no path.
    pub fn path(&self, handle: TextureHandle) -> Option<&str> {
        if handle.is_missing() {
            return None;
        }
        self.paths.get(handle.0 as usize).map(String::as_str)
    }

    /// Number of handles issued, including the missing texture.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.len() <= 1
    }
}

impl TextureManager for TextureRegistry {
    fn load_texture(&mut self, path: &str) -> TextureHandle {
        if path.is_empty() {
            return self.missing_texture();
        }
        if let Some(handle) = self.handles.get(path) {
            return *handle;
        }
        let handle = TextureHandle(self.paths.len() as u32);
        self.paths.push(path.to_string());
        self.handles.insert(path.to_string(), handle);
        handle
    }
}

impl Default for TextureRegistry {
    fn default() -> Self {
        Self::new()
    }
}
