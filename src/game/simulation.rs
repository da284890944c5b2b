//! The simulation context: every subsystem of one running game, ticked in a
//! fixed order. Nothing in here touches the ECS, so the whole game can be
//! driven from plain unit tests.

use bevy::prelude::*;
use rand::{SeedableRng, rngs::StdRng};

use super::{
    actor::{Actor, ActorKind},
    background::{LayerKind, Parallax, ParallaxLayer},
    camera::GameCamera,
    difficulty::DifficultyController,
    items::{ItemKind, ItemSpawner},
    player::{FUEL_STEP, PlayerController},
    sound::SoundEvent,
};
use crate::config::GliderConfig;

/// What a drawn rectangle shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpriteKind {
    Actor(ActorKind),
    Layer(LayerKind),
}

/// Everything a renderer needs to draw one sprite, in screen space.
#[derive(Clone, Debug, PartialEq)]
pub struct SpriteView {
    pub kind: SpriteKind,
    pub screen_center: Vec2,
    /// Source rectangle on the sprite sheet.
    pub source: Rect,
    pub size: Vec2,
    pub rotation: f32,
    pub tint: Color,
    pub depth: f32,
}

impl SpriteView {
    fn from_actor(actor: &Actor, camera: &GameCamera) -> Self {
        Self {
            kind: SpriteKind::Actor(actor.kind),
            screen_center: camera.world_to_screen(actor.world_center()),
            source: actor.source_frame(),
            size: actor.frame_size(),
            rotation: actor.rotation,
            tint: actor.tint,
            depth: actor.depth,
        }
    }

    fn from_tile(layer: &ParallaxLayer, tile: Rect, camera: &GameCamera) -> Self {
        let screen = camera.rect_to_screen(tile);
        Self {
            kind: SpriteKind::Layer(layer.kind),
            screen_center: screen.center(),
            source: Rect::from_corners(Vec2::ZERO, tile.size()),
            size: tile.size(),
            rotation: 0.0,
            tint: Color::WHITE,
            depth: layer.depth(),
        }
    }
}

/// Outcome of one tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub sounds: Vec<SoundEvent>,
    pub player_dead: bool,
}

pub struct Simulation {
    camera: GameCamera,
    difficulty: DifficultyController,
    parallax: Parallax,
    spawner: ItemSpawner,
    player: PlayerController,
    rng: StdRng,
}

impl Simulation {
    pub fn new(config: &GliderConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let difficulty = DifficultyController::default();
        Self {
            camera: GameCamera::new(config.world_rect(), config.viewport_size()),
            parallax: Parallax::new(config.world_rect().size(), difficulty.params()),
            difficulty,
            spawner: ItemSpawner::default(),
            player: PlayerController::new(config.thrust_clip_secs),
            rng,
        }
    }

    pub fn camera(&self) -> &GameCamera {
        &self.camera
    }

    #[cfg(test)]
    pub fn tier(&self) -> super::difficulty::Tier {
        self.difficulty.tier()
    }

    pub fn player(&self) -> &PlayerController {
        &self.player
    }

    pub fn spawner(&self) -> &ItemSpawner {
        &self.spawner
    }

    #[cfg(test)]
    pub fn parallax(&self) -> &Parallax {
        &self.parallax
    }

    /// Back to a fresh game: slow tier, no items, player at the spawn point.
    pub fn reset(&mut self) {
        self.camera.reset();
        self.difficulty.reset();
        self.parallax.reset(self.difficulty.params());
        self.spawner.reset();
        self.player.reset();
        info!("Simulation reset");
    }

    /// Advance one frame. `touch` is the active touch in screen space.
    pub fn tick(&mut self, dt: f32, touch: Option<Vec2>) -> TickReport {
        let mut sounds = Vec::new();

        let near_speed = self.parallax.near.speed;
        sounds.extend(self.player.update(dt, touch, &mut self.camera, near_speed));

        self.spawner
            .update(dt, self.difficulty.params(), &self.camera, &mut self.rng);
        self.parallax.update();

        for kind in self.spawner.take_pickups(self.player.actor()) {
            sounds.push(self.apply_pickup(kind));
        }

        TickReport {
            sounds,
            player_dead: self.player.is_dead(&self.camera),
        }
    }

    pub fn escalate(&mut self) {
        if self.difficulty.escalate() {
            self.propagate_tier();
        }
    }

    pub fn deescalate(&mut self) {
        if self.difficulty.deescalate() {
            self.propagate_tier();
        }
    }

    /// Live items and both layers snap to the current tier's speeds. The
    /// spawn interval is read from the tier on every tick.
    fn propagate_tier(&mut self) {
        let params = self.difficulty.params();
        self.spawner.set_speed(params.item_speed);
        self.parallax.apply_tier(params);
    }

    pub fn apply_pickup(&mut self, kind: ItemKind) -> SoundEvent {
        debug!("Picked up {:?}", kind);
        match kind {
            ItemKind::SpeedUp => self.escalate(),
            ItemKind::SpeedDown => self.deescalate(),
            ItemKind::Fuel => self.player.add_fuel(FUEL_STEP),
            ItemKind::Obstacle => self.player.hit_obstacle(),
        }
        kind.pickup_sound()
    }

    /// Visible parallax tiles and actors, back to front.
    pub fn sprites(&self) -> Vec<SpriteView> {
        let mut views = Vec::new();

        for layer in self.parallax.layers() {
            views.extend(
                layer
                    .tiles()
                    .filter(|tile| self.camera.is_visible(*tile))
                    .map(|tile| SpriteView::from_tile(layer, tile, &self.camera)),
            );
        }

        let actors = self
            .spawner
            .items()
            .iter()
            .map(|item| &item.actor)
            .chain(std::iter::once(self.player.actor()));
        views.extend(
            actors
                .filter(|actor| !actor.expired && self.camera.is_visible(actor.world_rect()))
                .map(|actor| SpriteView::from_actor(actor, &self.camera)),
        );

        views.sort_by(|a, b| a.depth.total_cmp(&b.depth));
        views
    }
}
