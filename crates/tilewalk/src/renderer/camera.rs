use glam::{I64Vec2, IVec2};

use crate::api::config::GameConfig;

/// Camera placement computed for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Framing {
    /// Mean of all tracked centers, (0, 0) when nothing is tracked.
    pub center: IVec2,
    /// Visible area in pixels: base viewport × tile size × multiplier.
    pub size: IVec2,
    pub multiplier: i32,
}

/// Accumulates camera-tracked entity centers over one tick and derives
/// the camera center and an aspect-preserving viewport that spans them.
#[derive(Debug, Clone)]
pub struct CameraFraming {
    count: i64,
    sum: I64Vec2,
    min: IVec2,
    max: IVec2,
}

impl CameraFraming {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: I64Vec2::ZERO,
            min: IVec2::MAX,
            max: IVec2::MIN,
        }
    }

    /// Add one tracked center (pixels).
    pub fn track(&mut self, center: IVec2) {
        self.count += 1;
        self.sum += center.as_i64vec2();
        self.min = self.min.min(center);
        self.max = self.max.max(center);
    }

    pub fn tracked(&self) -> usize {
        self.count as usize
    }

    /// Bounding box spanned by the tracked centers.
    pub fn span(&self) -> IVec2 {
        if self.count == 0 {
            return IVec2::ZERO;
        }
        (self.max - self.min).abs()
    }

    pub fn center(&self) -> IVec2 {
        if self.count == 0 {
            return IVec2::ZERO;
        }
        (self.sum / self.count).as_ivec2()
    }

    /// Smallest multiplier, starting from the default, whose viewport
    /// covers the span on both axes.
    pub fn multiplier(&self, config: &GameConfig) -> i32 {
        let span = self.span();
        let step = (config.base_viewport * config.tile_size).max(IVec2::ONE);
        let mut multiplier = config.default_viewport_multiplier.max(1);
        while step.x * multiplier < span.x || step.y * multiplier < span.y {
            multiplier += 1;
        }
        multiplier
    }

    pub fn finish(&self, config: &GameConfig) -> Framing {
        let multiplier = self.multiplier(config);
        Framing {
            center: self.center(),
            size: config.viewport_size(multiplier),
            multiplier,
        }
    }
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_framing_is_origin_at_default_size() {
        let config = GameConfig::default();
        let framing = CameraFraming::new().finish(&config);
        assert_eq!(framing.center, IVec2::ZERO);
        assert_eq!(framing.multiplier, config.default_viewport_multiplier);
        assert_eq!(framing.size, config.default_viewport_size());
    }

    #[test]
    fn center_is_integer_mean() {
        let mut cam = CameraFraming::new();
        cam.track(IVec2::new(10, 20));
        cam.track(IVec2::new(15, 41));
        assert_eq!(cam.center(), IVec2::new(12, 30));
        assert_eq!(cam.tracked(), 2);
    }

    #[test]
    fn wide_span_grows_multiplier() {
        let config = GameConfig::default();
        let width = config.default_viewport_size().x;
        let mut cam = CameraFraming::new();
        cam.track(IVec2::new(0, 100));
        cam.track(IVec2::new(width + 1, 100));

        let framing = cam.finish(&config);
        assert!(framing.multiplier >= config.default_viewport_multiplier + 1);
        assert!(framing.size.x >= width + 1);
        // Aspect ratio is kept.
        assert_eq!(framing.size.x * 3, framing.size.y * 4);
    }

    #[test]
    fn span_inside_default_keeps_default() {
        let config = GameConfig::default();
        let mut cam = CameraFraming::new();
        cam.track(IVec2::new(0, 0));
        cam.track(config.default_viewport_size());
        assert_eq!(cam.multiplier(&config), config.default_viewport_multiplier);
    }

    #[test]
    fn tall_span_grows_multiplier() {
        let config = GameConfig::default();
        let height = config.default_viewport_size().y;
        let mut cam = CameraFraming::new();
        cam.track(IVec2::new(0, -height));
        cam.track(IVec2::new(0, height));
        let framing = cam.finish(&config);
        assert!(framing.size.y >= 2 * height);
    }
}
