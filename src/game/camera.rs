//! World-bounds-clamped viewport and the world <-> screen transform.
//!
//! Screen space is the 800x480 playfield with the origin in the top-left
//! corner and y pointing down, the same orientation as world space.

use bevy::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct GameCamera {
    world: Rect,
    viewport_size: Vec2,
    position: Vec2,
}

impl GameCamera {
    pub fn new(world: Rect, viewport_size: Vec2) -> Self {
        let mut camera = Self {
            world,
            viewport_size,
            position: Vec2::ZERO,
        };
        camera.reset();
        camera
    }

    #[cfg(test)]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn world(&self) -> Rect {
        self.world
    }

    #[cfg(test)]
    pub fn viewport_size(&self) -> Vec2 {
        self.viewport_size
    }

    /// Store a new position, clamped so the viewport never leaves the world.
    pub fn set_position(&mut self, position: Vec2) {
        let max = self.world.size() - self.viewport_size;
        self.position = Vec2::new(
            clamp_axis(position.x, self.world.min.x, max.x),
            clamp_axis(position.y, self.world.min.y, max.y),
        );
    }

    pub fn move_by(&mut self, offset: Vec2) {
        self.set_position(self.position + offset);
    }

    pub fn reset(&mut self) {
        self.set_position(Vec2::ZERO);
    }

    /// The visible window into the world.
    pub fn viewport(&self) -> Rect {
        Rect {
            min: self.position,
            max: self.position + self.viewport_size,
        }
    }

    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        point - self.position
    }

    pub fn rect_to_screen(&self, rect: Rect) -> Rect {
        Rect {
            min: self.world_to_screen(rect.min),
            max: self.world_to_screen(rect.max),
        }
    }

    /// Whether any part of `rect` falls inside the viewport.
    pub fn is_visible(&self, rect: Rect) -> bool {
        super::collision::overlaps(self.viewport(), rect)
    }
}

/// Clamp that tolerates an empty range by favouring the lower bound.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    value.min(max).max(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera() -> GameCamera {
        GameCamera::new(Rect::new(0.0, 0.0, 1600.0, 1440.0), Vec2::new(800.0, 480.0))
    }

    fn assert_clamped(camera: &GameCamera) {
        let p = camera.position();
        assert!((0.0..=800.0).contains(&p.x), "x out of range: {p}");
        assert!((0.0..=960.0).contains(&p.y), "y out of range: {p}");
    }

    #[test]
    fn test_set_position_clamps_any_input() {
        let mut camera = camera();
        let inputs = [
            Vec2::new(-1.0e9, -1.0e9),
            Vec2::new(1.0e9, 1.0e9),
            Vec2::new(-5.0, 400.0),
            Vec2::new(799.5, 961.0),
            Vec2::new(f32::MAX, f32::MIN),
            Vec2::new(300.0, 300.0),
        ];
        for input in inputs {
            camera.set_position(input);
            assert_clamped(&camera);
        }
        camera.set_position(Vec2::new(2000.0, -3.0));
        assert_eq!(camera.position(), Vec2::new(800.0, 0.0));
    }

    #[test]
    fn test_move_by_stays_clamped() {
        let mut camera = camera();
        for _ in 0..100 {
            camera.move_by(Vec2::new(0.0, 37.0));
            assert_clamped(&camera);
        }
        assert_eq!(camera.viewport().max.y, 1440.0);
    }

    #[test]
    fn test_world_smaller_than_viewport_pins_to_origin() {
        let mut camera = GameCamera::new(Rect::new(0.0, 0.0, 400.0, 200.0), Vec2::new(800.0, 480.0));
        camera.set_position(Vec2::new(50.0, 50.0));
        assert_eq!(camera.position(), Vec2::ZERO);
    }

    #[test]
    fn test_world_to_screen() {
        let mut camera = camera();
        camera.set_position(Vec2::new(100.0, 200.0));
        assert_eq!(camera.world_to_screen(Vec2::new(150.0, 260.0)), Vec2::new(50.0, 60.0));

        let rect = camera.rect_to_screen(Rect::new(100.0, 200.0, 150.0, 250.0));
        assert_eq!(rect, Rect::new(0.0, 0.0, 50.0, 50.0));
    }

    #[test]
    fn test_visibility_is_half_open() {
        let camera = camera();
        assert!(camera.is_visible(Rect::new(790.0, 10.0, 900.0, 20.0)));
        // Touching the right edge of the viewport is not visible.
        assert!(!camera.is_visible(Rect::new(800.0, 10.0, 900.0, 20.0)));
        assert!(!camera.is_visible(Rect::new(1600.0, 100.0, 1750.0, 149.0)));
    }
}
