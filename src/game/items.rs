//! Pickups and obstacles scrolling in from the right edge of the world.
//!
//! Items are drawn from a weighted table, spawned on a tier-dependent timer at
//! a random height inside the visible band, and resolved against the player
//! the first time they touch.

use bevy::prelude::*;
use rand::Rng;

use super::{
    actor::{Actor, ActorKind},
    camera::GameCamera,
    collision::collides,
    difficulty::TierParams,
    sound::SoundEvent,
};

/// Time on the spawn clock after a reset. It already exceeds every tier's
/// interval, so the first item arrives on the first tick.
pub const INITIAL_SPAWN_TIMER: f32 = 3.0;

/// Items draw between the near cloud layer and the player.
pub const ITEM_DEPTH: f32 = 1.0;

/// Clamp ranges for the top and bottom of the spawn band (grass line at 748).
const SPAWN_TOP_RANGE: (i32, i32) = (0, 747);
const SPAWN_BOTTOM_RANGE: (i32, i32) = (480, 748);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum ItemKind {
    SpeedUp,
    SpeedDown,
    Fuel,
    Obstacle,
}

/// Weighted spawn table: 3 speed-ups, 3 speed-downs, 1 fuel, 3 obstacles.
pub const SPAWN_TABLE: [ItemKind; 10] = [
    ItemKind::SpeedUp,
    ItemKind::SpeedUp,
    ItemKind::SpeedUp,
    ItemKind::SpeedDown,
    ItemKind::SpeedDown,
    ItemKind::SpeedDown,
    ItemKind::Fuel,
    ItemKind::Obstacle,
    ItemKind::Obstacle,
    ItemKind::Obstacle,
];

impl ItemKind {
    /// First animation frame on the sprite sheet.
    pub fn first_frame(self) -> Rect {
        let (x, y, w, h) = match self {
            ItemKind::SpeedUp => (0.0, 88.0, 150.0, 49.0),
            ItemKind::SpeedDown => (0.0, 139.0, 150.0, 49.0),
            ItemKind::Fuel => (0.0, 344.0, 50.0, 70.0),
            ItemKind::Obstacle => (0.0, 190.0, 103.0, 152.0),
        };
        Rect::new(x, y, x + w, y + h)
    }

    pub fn frame_count(self) -> usize {
        match self {
            ItemKind::Fuel => 1,
            ItemKind::SpeedUp | ItemKind::SpeedDown | ItemKind::Obstacle => 4,
        }
    }

    pub fn pickup_sound(self) -> SoundEvent {
        match self {
            ItemKind::SpeedUp => SoundEvent::SpeedUp,
            ItemKind::SpeedDown => SoundEvent::SpeedDown,
            ItemKind::Fuel => SoundEvent::FuelUp,
            ItemKind::Obstacle => SoundEvent::FuelDown,
        }
    }
}

/// Pick a kind from the weighted table.
pub fn pick_kind<R: Rng>(rng: &mut R) -> ItemKind {
    SPAWN_TABLE[rng.random_range(0..SPAWN_TABLE.len())]
}

/// Random spawn height inside the visible band, never below the grass.
pub fn spawn_height<R: Rng>(camera: &GameCamera, rng: &mut R) -> f32 {
    let viewport = camera.viewport();
    let top = (viewport.min.y as i32).clamp(SPAWN_TOP_RANGE.0, SPAWN_TOP_RANGE.1);
    let bottom = (viewport.max.y as i32).clamp(SPAWN_BOTTOM_RANGE.0, SPAWN_BOTTOM_RANGE.1);
    rng.random_range(top..=bottom.max(top)) as f32
}

#[derive(Clone, Debug)]
pub struct Item {
    pub kind: ItemKind,
    pub actor: Actor,
    /// World units per tick; negative scrolls left.
    pub speed: i32,
}

impl Item {
    pub fn new(kind: ItemKind, position: Vec2, speed: i32) -> Self {
        let actor = Actor::new(
            ActorKind::Item(kind),
            position,
            kind.first_frame(),
            kind.frame_count(),
        )
        .with_depth(ITEM_DEPTH);
        Self {
            kind,
            actor,
            speed,
        }
    }

    /// Scroll left by one tick and expire once fully past the world's left edge.
    pub fn update(&mut self, dt: f32) {
        if self.actor.expired {
            return;
        }
        if self.speed <= 0 {
            self.actor.position.x += self.speed as f32;
        }
        if self.actor.position.x < -self.actor.frame_size().x {
            self.actor.expired = true;
        }
        self.actor.update(dt);
    }
}

/// Owns the live items of one running game.
#[derive(Clone, Debug)]
pub struct ItemSpawner {
    items: Vec<Item>,
    spawn_timer: f32,
    /// Items spawned since the last reset, for logging.
    spawned: u64,
}

impl Default for ItemSpawner {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            spawn_timer: INITIAL_SPAWN_TIMER,
            spawned: 0,
        }
    }
}

impl ItemSpawner {
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn reset(&mut self) {
        self.items.clear();
        self.spawn_timer = INITIAL_SPAWN_TIMER;
        self.spawned = 0;
    }

    /// Run the spawn clock, move every item and drop the expired ones.
    /// Returns the kind of the item spawned this tick, if any.
    pub fn update<R: Rng>(
        &mut self,
        dt: f32,
        params: TierParams,
        camera: &GameCamera,
        rng: &mut R,
    ) -> Option<ItemKind> {
        self.spawn_timer += dt;

        let spawned = if self.spawn_timer > params.spawn_interval {
            // Reset, not decremented: a long frame can swallow an interval.
            self.spawn_timer = 0.0;
            let kind = pick_kind(rng);
            let position = Vec2::new(camera.world().max.x, spawn_height(camera, rng));
            self.spawn(kind, position, params.item_speed);
            Some(kind)
        } else {
            None
        };

        for item in &mut self.items {
            item.update(dt);
        }
        self.items.retain(|item| !item.actor.expired);

        spawned
    }

    pub fn spawn(&mut self, kind: ItemKind, position: Vec2, speed: i32) {
        self.spawned += 1;
        self.items.push(Item::new(kind, position, speed));
        debug!("Spawned {:?} #{} at {}", kind, self.spawned, position);
    }

    /// Snap every live item to a new speed.
    pub fn set_speed(&mut self, speed: i32) {
        for item in &mut self.items {
            item.speed = speed;
        }
    }

    /// Find items touching the player for the first time. Each one is made
    /// non-collidable so it triggers once; fuel cans are removed outright.
    pub fn take_pickups(&mut self, player: &Actor) -> Vec<ItemKind> {
        let mut picked = Vec::new();
        for item in &mut self.items {
            if collides(&item.actor, player) {
                item.actor.collidable = false;
                picked.push(item.kind);
            }
        }
        self.items
            .retain(|item| item.kind != ItemKind::Fuel || item.actor.collidable);
        picked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::difficulty::Tier;
    use rand::{SeedableRng, rngs::StdRng};

    fn camera() -> GameCamera {
        GameCamera::new(Rect::new(0.0, 0.0, 1600.0, 1440.0), Vec2::new(800.0, 480.0))
    }

    fn player_at(position: Vec2) -> Actor {
        Actor::new(ActorKind::Player, position, Rect::new(0.0, 0.0, 161.0, 86.0), 2)
            .with_padding(Vec2::splat(4.0))
    }

    #[test]
    fn test_spawn_distribution_matches_weights() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0usize; 4];
        for _ in 0..10_000 {
            let index = match pick_kind(&mut rng) {
                ItemKind::SpeedUp => 0,
                ItemKind::SpeedDown => 1,
                ItemKind::Fuel => 2,
                ItemKind::Obstacle => 3,
            };
            counts[index] += 1;
        }
        let expected = [3000, 3000, 1000, 3000];
        for (count, expected) in counts.iter().zip(expected) {
            assert!(
                count.abs_diff(expected) < 300,
                "counts {counts:?} too far from {expected}"
            );
        }
    }

    #[test]
    fn test_frame_counts_per_kind() {
        assert_eq!(ItemKind::SpeedUp.frame_count(), 4);
        assert_eq!(ItemKind::SpeedDown.frame_count(), 4);
        assert_eq!(ItemKind::Fuel.frame_count(), 1);
        assert_eq!(ItemKind::Obstacle.frame_count(), 4);
    }

    #[test]
    fn test_spawn_height_stays_in_visible_band() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut camera = camera();
        for y in [0.0, 250.0, 600.0, 960.0] {
            camera.set_position(Vec2::new(0.0, y));
            let top = (y as i32).clamp(0, 747) as f32;
            let bottom = ((y + 480.0) as i32).clamp(480, 748) as f32;
            for _ in 0..200 {
                let h = spawn_height(&camera, &mut rng);
                assert!(h >= top && h <= bottom, "{h} outside [{top}, {bottom}]");
            }
        }
    }

    #[test]
    fn test_first_tick_spawns_then_waits_for_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        let camera = camera();
        let params = Tier::Slow.params();
        let mut spawner = ItemSpawner::default();

        assert!(spawner.update(0.5, params, &camera, &mut rng).is_some());
        assert_eq!(spawner.items().len(), 1);
        assert_eq!(spawner.items()[0].actor.position.x, 1600.0 - 8.0);
        assert_eq!(spawner.items()[0].speed, -8);

        // Exactly reaching the interval is not enough.
        for _ in 0..4 {
            assert!(spawner.update(0.5, params, &camera, &mut rng).is_none());
        }
        assert!(spawner.update(0.5, params, &camera, &mut rng).is_some());
        assert_eq!(spawner.items().len(), 2);
    }

    #[test]
    fn test_items_expire_past_left_edge() {
        let mut spawner = ItemSpawner::default();
        spawner.spawn(ItemKind::SpeedUp, Vec2::new(-140.0, 100.0), -8);
        let mut rng = StdRng::seed_from_u64(0);
        let params = TierParams {
            spawn_interval: f32::MAX,
            ..Tier::Slow.params()
        };

        spawner.update(0.0, params, &camera(), &mut rng);
        assert_eq!(spawner.items().len(), 1);
        spawner.update(0.0, params, &camera(), &mut rng);
        assert!(spawner.items().is_empty());
    }

    #[test]
    fn test_set_speed_snaps_all_items() {
        let mut spawner = ItemSpawner::default();
        spawner.spawn(ItemKind::SpeedUp, Vec2::new(900.0, 100.0), -8);
        spawner.spawn(ItemKind::Obstacle, Vec2::new(1200.0, 100.0), -10);
        spawner.set_speed(-12);
        assert!(spawner.items().iter().all(|item| item.speed == -12));
    }

    #[test]
    fn test_pickup_triggers_once() {
        let mut spawner = ItemSpawner::default();
        spawner.spawn(ItemKind::Obstacle, Vec2::new(100.0, 200.0), -8);
        let player = player_at(Vec2::new(65.0, 200.0));

        assert_eq!(spawner.take_pickups(&player), vec![ItemKind::Obstacle]);
        assert!(spawner.take_pickups(&player).is_empty());
        // The obstacle stays around, just inert.
        assert_eq!(spawner.items().len(), 1);
    }

    #[test]
    fn test_fuel_is_removed_on_pickup() {
        let mut spawner = ItemSpawner::default();
        spawner.spawn(ItemKind::Fuel, Vec2::new(100.0, 220.0), -8);
        spawner.spawn(ItemKind::SpeedUp, Vec2::new(1000.0, 220.0), -8);
        let player = player_at(Vec2::new(65.0, 200.0));

        assert_eq!(spawner.take_pickups(&player), vec![ItemKind::Fuel]);
        assert_eq!(spawner.items().len(), 1);
        assert_eq!(spawner.items()[0].kind, ItemKind::SpeedUp);
    }

    #[test]
    fn test_reset_clears_items_and_rearms_timer() {
        let mut spawner = ItemSpawner::default();
        spawner.spawn(ItemKind::Fuel, Vec2::new(100.0, 220.0), -8);
        spawner.reset();
        assert!(spawner.items().is_empty());
        let mut rng = StdRng::seed_from_u64(0);
        assert!(
            spawner
                .update(0.01, Tier::Fastest.params(), &camera(), &mut rng)
                .is_some()
        );
    }
}
