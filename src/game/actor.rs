//! The common movable, drawable, collidable unit.
//!
//! Every moving thing in the world (the glider and every item) is an [`Actor`]
//! carrying a kind tag. Behaviour that differs per kind lives in small lookup
//! tables next to the kind (see `items::ItemKind`), not in the actor itself.

use bevy::prelude::*;

use super::items::ItemKind;

/// Seconds each animation frame stays on screen.
pub const DEFAULT_FRAME_DURATION: f32 = 0.1;

/// Default collision padding, shrinking the box on every side.
pub const DEFAULT_PADDING: Vec2 = Vec2::splat(8.0);

/// What an actor represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Reflect)]
pub enum ActorKind {
    Player,
    Item(ItemKind),
}

#[derive(Clone, Debug)]
pub struct Actor {
    pub kind: ActorKind,
    /// Top-left corner in world space.
    pub position: Vec2,
    /// World units per second.
    pub velocity: Vec2,
    frames: Vec<Rect>,
    current_frame: usize,
    frame_timer: f32,
    pub frame_duration: f32,
    pub collidable: bool,
    pub expired: bool,
    pub padding: Vec2,
    pub rotation: f32,
    pub tint: Color,
    pub depth: f32,
}

impl Actor {
    /// Build an actor whose animation is a horizontal strip of `frame_count`
    /// frames starting at `first_frame` on the sprite sheet.
    pub fn new(kind: ActorKind, position: Vec2, first_frame: Rect, frame_count: usize) -> Self {
        let width = first_frame.width();
        let frames = (0..frame_count.max(1))
            .map(|i| {
                let shift = Vec2::new(width * i as f32, 0.0);
                Rect {
                    min: first_frame.min + shift,
                    max: first_frame.max + shift,
                }
            })
            .collect();

        Self {
            kind,
            position,
            velocity: Vec2::ZERO,
            frames,
            current_frame: 0,
            frame_timer: 0.0,
            frame_duration: DEFAULT_FRAME_DURATION,
            collidable: true,
            expired: false,
            padding: DEFAULT_PADDING,
            rotation: 0.0,
            tint: Color::WHITE,
            depth: 0.0,
        }
    }

    pub fn with_padding(mut self, padding: Vec2) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_depth(mut self, depth: f32) -> Self {
        self.depth = depth;
        self
    }

    /// Advance the animation and integrate velocity. Expired actors are frozen.
    pub fn update(&mut self, dt: f32) {
        if self.expired {
            return;
        }

        self.frame_timer += dt;
        if self.frame_timer >= self.frame_duration {
            self.current_frame = (self.current_frame + 1) % self.frames.len();
            self.frame_timer = 0.0;
        }

        self.position += self.velocity * dt;
    }

    #[cfg(test)]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    #[cfg(test)]
    pub fn current_frame(&self) -> usize {
        self.current_frame
    }

    /// Jump to a frame; out-of-range values are clamped to the strip.
    #[cfg(test)]
    pub fn set_current_frame(&mut self, frame: usize) {
        self.current_frame = frame.min(self.frames.len() - 1);
    }

    /// Sprite-sheet rectangle of the frame currently shown.
    pub fn source_frame(&self) -> Rect {
        self.frames[self.current_frame]
    }

    /// Size of one frame, which is also the actor's footprint in the world.
    pub fn frame_size(&self) -> Vec2 {
        self.frames[0].size()
    }

    pub fn world_rect(&self) -> Rect {
        Rect {
            min: self.position,
            max: self.position + self.frame_size(),
        }
    }

    pub fn world_center(&self) -> Vec2 {
        self.position + self.frame_size() / 2.0
    }

    /// The padded box used for collisions. It may be inverted when the padding
    /// exceeds half the footprint, in which case it never intersects anything.
    pub fn bounding_box(&self) -> Rect {
        Rect {
            min: self.position + self.padding,
            max: self.position + self.frame_size() - self.padding,
        }
    }

    /// Point the sprite along `direction`; a zero vector levels it.
    pub fn rotate_to(&mut self, direction: Vec2) {
        self.rotation = direction.y.atan2(direction.x);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip(frame_count: usize) -> Actor {
        Actor::new(
            ActorKind::Player,
            Vec2::new(10.0, 20.0),
            Rect::new(0.0, 88.0, 150.0, 137.0),
            frame_count,
        )
    }

    #[test]
    fn test_frames_form_horizontal_strip() {
        let mut actor = strip(4);
        assert_eq!(actor.frame_count(), 4);
        actor.set_current_frame(2);
        assert_eq!(actor.source_frame(), Rect::new(300.0, 88.0, 450.0, 137.0));
    }

    #[test]
    fn test_zero_frames_still_has_one() {
        let actor = strip(0);
        assert_eq!(actor.frame_count(), 1);
        assert_eq!(actor.frame_size(), Vec2::new(150.0, 49.0));
    }

    #[test]
    fn test_animation_wraps_and_index_stays_in_range() {
        let mut actor = strip(2);
        for _ in 0..7 {
            actor.update(DEFAULT_FRAME_DURATION);
            assert!(actor.current_frame() < actor.frame_count());
        }
        // Seven frame advances over two frames ends on frame 1.
        assert_eq!(actor.current_frame(), 1);

        actor.set_current_frame(99);
        assert_eq!(actor.current_frame(), 1);
    }

    #[test]
    fn test_update_integrates_velocity() {
        let mut actor = strip(1);
        actor.velocity = Vec2::new(0.0, 25.0);
        actor.update(0.5);
        assert_eq!(actor.position, Vec2::new(10.0, 32.5));
    }

    #[test]
    fn test_expired_actor_is_frozen() {
        let mut actor = strip(4);
        actor.velocity = Vec2::new(5.0, 5.0);
        actor.expired = true;
        actor.update(1.0);
        assert_eq!(actor.position, Vec2::new(10.0, 20.0));
        assert_eq!(actor.current_frame(), 0);
    }

    #[test]
    fn test_bounding_box_applies_padding_on_both_sides() {
        let actor = strip(1).with_padding(Vec2::splat(4.0));
        let bounds = actor.bounding_box();
        assert_eq!(bounds.min, Vec2::new(14.0, 24.0));
        assert_eq!(bounds.max, Vec2::new(156.0, 65.0));
    }
}
