//! Padded axis-aligned box collisions between actors.

use bevy::prelude::*;

use super::actor::Actor;

/// Half-open box intersection: boxes that only share an edge do not overlap,
/// and inverted boxes never overlap anything.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x
        && b.min.x < a.max.x
        && a.min.y < b.max.y
        && b.min.y < a.max.y
        && a.min.x < a.max.x
        && a.min.y < a.max.y
        && b.min.x < b.max.x
        && b.min.y < b.max.y
}

/// Whether a point falls inside a touch zone, using the same half-open rule.
pub fn contains_point(zone: Rect, point: Vec2) -> bool {
    point.x >= zone.min.x && point.x < zone.max.x && point.y >= zone.min.y && point.y < zone.max.y
}

/// Whether two live, collidable actors' padded boxes intersect.
pub fn collides(a: &Actor, b: &Actor) -> bool {
    if a.expired || b.expired || !a.collidable || !b.collidable {
        return false;
    }
    overlaps(a.bounding_box(), b.bounding_box())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::actor::ActorKind;

    fn square(x: f32, y: f32) -> Actor {
        Actor::new(ActorKind::Player, Vec2::new(x, y), Rect::new(0.0, 0.0, 20.0, 20.0), 1)
            .with_padding(Vec2::ZERO)
    }

    #[test]
    fn test_overlapping_actors_collide() {
        assert!(collides(&square(0.0, 0.0), &square(10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        assert!(!collides(&square(0.0, 0.0), &square(20.0, 0.0)));
        assert!(!collides(&square(0.0, 0.0), &square(0.0, 20.0)));
    }

    #[test]
    fn test_padding_shrinks_boxes() {
        let a = square(0.0, 0.0).with_padding(Vec2::splat(4.0));
        let b = square(14.0, 0.0).with_padding(Vec2::splat(4.0));
        // a spans 4..16, b spans 18..30.
        assert!(!collides(&a, &b));
        assert!(collides(&square(0.0, 0.0), &square(14.0, 0.0)));
    }

    #[test]
    fn test_expired_or_non_collidable_never_collide() {
        let a = square(0.0, 0.0);
        let mut b = square(5.0, 5.0);
        b.collidable = false;
        assert!(!collides(&a, &b));

        let mut c = square(5.0, 5.0);
        c.expired = true;
        assert!(!collides(&a, &c));
        assert!(!collides(&c, &a));
    }

    #[test]
    fn test_inverted_box_never_overlaps() {
        let a = square(0.0, 0.0).with_padding(Vec2::splat(15.0));
        assert!(!collides(&a, &square(0.0, 0.0)));
    }

    #[test]
    fn test_contains_point_half_open() {
        let zone = Rect::new(607.0, 390.0, 692.0, 480.0);
        assert!(contains_point(zone, Vec2::new(607.0, 390.0)));
        assert!(contains_point(zone, Vec2::new(691.9, 479.0)));
        assert!(!contains_point(zone, Vec2::new(692.0, 400.0)));
        assert!(!contains_point(zone, Vec2::new(650.0, 480.0)));
    }
}
