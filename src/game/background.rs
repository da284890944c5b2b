//! Two parallax cloud layers scrolling at tier-dependent speeds.
//!
//! Each layer is two copies of a world-sized tile laid side by side. When a
//! tile has scrolled fully off the left edge it is moved behind its twin,
//! keeping any overshoot so the seam never jumps.

use bevy::prelude::*;

use super::difficulty::TierParams;

/// Which strip a layer is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayerKind {
    Near,
    Far,
}

/// Drawn behind items.
pub const NEAR_LAYER_DEPTH: f32 = 0.0;
/// Drawn over everything else.
pub const FAR_LAYER_DEPTH: f32 = 3.0;

#[derive(Clone, Debug, PartialEq)]
pub struct ParallaxLayer {
    pub kind: LayerKind,
    /// World units per tick.
    pub speed: i32,
    tile_size: Vec2,
    offsets: [f32; 2],
}

impl ParallaxLayer {
    pub fn new(kind: LayerKind, tile_size: Vec2, speed: i32) -> Self {
        let mut layer = Self {
            kind,
            speed,
            tile_size,
            offsets: [0.0; 2],
        };
        layer.rewind();
        layer
    }

    fn rewind(&mut self) {
        for (i, offset) in self.offsets.iter_mut().enumerate() {
            *offset = i as f32 * self.tile_size.x;
        }
    }

    pub fn update(&mut self) {
        let width = self.tile_size.x;
        let span = width * self.offsets.len() as f32;
        for offset in &mut self.offsets {
            *offset += self.speed as f32;
            if *offset <= -width {
                *offset += span;
            }
        }
    }

    /// World rectangles of both tiles.
    pub fn tiles(&self) -> impl Iterator<Item = Rect> + '_ {
        self.offsets.iter().map(|&x| Rect {
            min: Vec2::new(x, 0.0),
            max: Vec2::new(x + self.tile_size.x, self.tile_size.y),
        })
    }

    pub fn depth(&self) -> f32 {
        match self.kind {
            LayerKind::Near => NEAR_LAYER_DEPTH,
            LayerKind::Far => FAR_LAYER_DEPTH,
        }
    }
}

/// The near and far layers together.
#[derive(Clone, Debug, PartialEq)]
pub struct Parallax {
    pub near: ParallaxLayer,
    pub far: ParallaxLayer,
}

impl Parallax {
    pub fn new(tile_size: Vec2, params: TierParams) -> Self {
        Self {
            near: ParallaxLayer::new(LayerKind::Near, tile_size, params.near_layer_speed),
            far: ParallaxLayer::new(LayerKind::Far, tile_size, params.far_layer_speed),
        }
    }

    pub fn apply_tier(&mut self, params: TierParams) {
        self.near.speed = params.near_layer_speed;
        self.far.speed = params.far_layer_speed;
    }

    pub fn update(&mut self) {
        self.near.update();
        self.far.update();
    }

    pub fn reset(&mut self, params: TierParams) {
        self.apply_tier(params);
        self.near.rewind();
        self.far.rewind();
    }

    pub fn layers(&self) -> [&ParallaxLayer; 2] {
        [&self.near, &self.far]
    }
}
