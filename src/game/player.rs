//! The glider: flight model, fuel, scoring and the death test.
//!
//! Each tick the touch point (in screen space) selects one flight mode:
//! - thrust up / thrust down when it lands on a thrust button and there is
//!   fuel for at least one tick of burn,
//! - free fall otherwise, with a small nudge towards a touch anywhere else.
//!
//! The camera follows the glider vertically at the speed of the chosen mode.

use bevy::prelude::*;

use super::{
    actor::{Actor, ActorKind},
    camera::GameCamera,
    collision::contains_point,
    sound::SoundEvent,
};

/// Where a new game starts.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(65.0, 200.0);

const PLAYER_FRAME: Rect = Rect {
    min: Vec2::ZERO,
    max: Vec2::new(161.0, 86.0),
};
const PLAYER_FRAME_COUNT: usize = 2;
const PLAYER_PADDING: Vec2 = Vec2::splat(4.0);

/// The glider draws above items, below the far cloud layer.
pub const PLAYER_DEPTH: f32 = 2.0;

/// Thrust speed in world units per second.
pub const THRUST_SPEED: f32 = 150.0;
pub const FUEL_BURN_PER_TICK: f32 = 0.1;
/// Vertical step towards a touch outside the thrust buttons.
pub const NUDGE_STEP: f32 = 4.0;

pub const START_FUEL: f32 = 50.0;
pub const MAX_FUEL: f32 = 100.0;
/// Fuel gained from a can or lost to an obstacle.
pub const FUEL_STEP: f32 = 10.0;

pub const FREE_FALL_RATE: f32 = 25.0;
/// Free-fall rate after hitting an obstacle on an almost empty tank.
pub const DOOM_FREE_FALL_RATE: f32 = 150.0;
const DOOM_FUEL_THRESHOLD: f32 = 1.0;

/// Below this the glider has fallen under the grass.
pub const DEATH_DEPTH: f32 = 940.0;
/// The camera has been dragged to the bottom of the world.
const DEATH_VIEWPORT_BOTTOM: f32 = 1400.0;

pub const DEFAULT_THRUST_CLIP_SECS: f32 = 0.5;

/// Thrust buttons in screen space.
pub const THRUST_UP_ZONE: Rect = Rect {
    min: Vec2::new(607.0, 390.0),
    max: Vec2::new(692.0, 480.0),
};
pub const THRUST_DOWN_ZONE: Rect = Rect {
    min: Vec2::new(704.0, 390.0),
    max: Vec2::new(789.0, 480.0),
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub enum FlightMode {
    #[default]
    FreeFall,
    ThrustUp,
    ThrustDown,
}

#[derive(Clone, Debug)]
pub struct PlayerController {
    actor: Actor,
    fuel: f32,
    score: u32,
    free_fall_rate: f32,
    thrust_sound_timer: f32,
    thrust_clip_secs: f32,
    flight: FlightMode,
}

impl PlayerController {
    pub fn new(thrust_clip_secs: f32) -> Self {
        let actor = Actor::new(ActorKind::Player, PLAYER_SPAWN, PLAYER_FRAME, PLAYER_FRAME_COUNT)
            .with_padding(PLAYER_PADDING)
            .with_depth(PLAYER_DEPTH);
        Self {
            actor,
            fuel: START_FUEL,
            score: 0,
            free_fall_rate: FREE_FALL_RATE,
            thrust_sound_timer: 0.0,
            thrust_clip_secs,
            flight: FlightMode::FreeFall,
        }
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn fuel(&self) -> f32 {
        self.fuel
    }

    pub fn fuel_fraction(&self) -> f32 {
        self.fuel / MAX_FUEL
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn free_fall_rate(&self) -> f32 {
        self.free_fall_rate
    }

    pub fn flight(&self) -> FlightMode {
        self.flight
    }

    pub fn add_fuel(&mut self, amount: f32) {
        self.fuel = (self.fuel + amount).min(MAX_FUEL);
    }

    pub fn remove_fuel(&mut self, amount: f32) {
        self.fuel = (self.fuel - amount).max(0.0);
    }

    /// Obstacle hit: a nearly empty tank sends the glider plummeting, and the
    /// tank loses a step of fuel either way.
    pub fn hit_obstacle(&mut self) {
        if self.fuel <= DOOM_FUEL_THRESHOLD {
            info!("Obstacle hit on an empty tank, free fall spikes");
            self.free_fall_rate = DOOM_FREE_FALL_RATE;
        }
        self.remove_fuel(FUEL_STEP);
    }

    /// One simulation tick. `touch` is the active touch in screen space.
    /// Returns a thrust cue when the thrust clip is due to play again.
    pub fn update(
        &mut self,
        dt: f32,
        touch: Option<Vec2>,
        camera: &mut GameCamera,
        near_layer_speed: i32,
    ) -> Option<SoundEvent> {
        let sound = self.handle_input(dt, touch, camera);
        self.clamp_to_viewport(camera);
        self.actor.update(dt);
        self.score = self.score.saturating_add(near_layer_speed.unsigned_abs());
        sound
    }

    pub fn is_dead(&self, camera: &GameCamera) -> bool {
        self.actor.position.y > DEATH_DEPTH || camera.viewport().max.y >= DEATH_VIEWPORT_BOTTOM
    }

    pub fn reset(&mut self) {
        self.actor.position = PLAYER_SPAWN;
        self.actor.velocity = Vec2::ZERO;
        self.actor.rotation = 0.0;
        self.fuel = START_FUEL;
        self.score = 0;
        self.free_fall_rate = FREE_FALL_RATE;
        self.thrust_sound_timer = 0.0;
        self.flight = FlightMode::FreeFall;
    }

    fn handle_input(
        &mut self,
        dt: f32,
        touch: Option<Vec2>,
        camera: &mut GameCamera,
    ) -> Option<SoundEvent> {
        let has_fuel = self.fuel >= FUEL_BURN_PER_TICK;
        let mut sound = None;

        self.flight = match touch {
            Some(point) if contains_point(THRUST_UP_ZONE, point) && has_fuel => {
                sound = self.thrust(-1.0, dt, camera);
                FlightMode::ThrustUp
            }
            Some(point) if contains_point(THRUST_DOWN_ZONE, point) && has_fuel => {
                sound = self.thrust(1.0, dt, camera);
                FlightMode::ThrustDown
            }
            Some(point)
                if !contains_point(THRUST_UP_ZONE, point)
                    && !contains_point(THRUST_DOWN_ZONE, point) =>
            {
                self.free_fall(dt, camera);
                self.nudge_towards(point.y, camera);
                FlightMode::FreeFall
            }
            _ => {
                self.free_fall(dt, camera);
                FlightMode::FreeFall
            }
        };

        self.thrust_sound_timer += dt;
        sound
    }

    /// `direction` is -1 for up, +1 for down.
    fn thrust(&mut self, direction: f32, dt: f32, camera: &mut GameCamera) -> Option<SoundEvent> {
        self.actor.rotate_to(Vec2::new(1.0, direction));
        self.actor.velocity = Vec2::new(0.0, direction * THRUST_SPEED);
        camera.move_by(Vec2::new(0.0, direction * THRUST_SPEED * dt));
        self.remove_fuel(FUEL_BURN_PER_TICK);

        if self.thrust_sound_timer >= self.thrust_clip_secs {
            self.thrust_sound_timer = 0.0;
            Some(SoundEvent::Thrust)
        } else {
            None
        }
    }

    fn free_fall(&mut self, dt: f32, camera: &mut GameCamera) {
        self.actor.rotate_to(Vec2::ZERO);
        self.actor.velocity = Vec2::new(0.0, self.free_fall_rate);
        camera.move_by(Vec2::new(0.0, self.free_fall_rate * dt));
    }

    /// One fixed step towards the touch, however far away it is.
    fn nudge_towards(&mut self, touch_y: f32, camera: &GameCamera) {
        let offset = camera.world_to_screen(self.actor.position).y - touch_y;
        if offset >= NUDGE_STEP {
            self.actor.position.y -= NUDGE_STEP;
        } else if -offset >= NUDGE_STEP {
            self.actor.position.y += NUDGE_STEP;
        }
    }

    fn clamp_to_viewport(&mut self, camera: &GameCamera) {
        let viewport = camera.viewport();
        let max = viewport.max - self.actor.frame_size();
        let position = self.actor.position;
        self.actor.position = Vec2::new(
            position.x.min(max.x).max(viewport.min.x),
            position.y.min(max.y).max(viewport.min.y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_4;

    const DT: f32 = 0.25;
    const UP: Vec2 = Vec2::new(650.0, 430.0);
    const DOWN: Vec2 = Vec2::new(740.0, 430.0);

    fn camera() -> GameCamera {
        GameCamera::new(Rect::new(0.0, 0.0, 1600.0, 1440.0), Vec2::new(800.0, 480.0))
    }

    fn player() -> PlayerController {
        PlayerController::new(DEFAULT_THRUST_CLIP_SECS)
    }

    #[test]
    fn test_new_player_defaults() {
        let player = player();
        assert_eq!(player.fuel(), 50.0);
        assert_eq!(player.score(), 0);
        assert_eq!(player.free_fall_rate(), 25.0);
        assert_eq!(player.actor().position, PLAYER_SPAWN);
    }

    #[test]
    fn test_no_touch_free_falls() {
        let mut player = player();
        let mut camera = camera();
        let sound = player.update(DT, None, &mut camera, -6);

        assert_eq!(sound, None);
        assert_eq!(player.flight(), FlightMode::FreeFall);
        assert_eq!(player.actor().velocity, Vec2::new(0.0, 25.0));
        assert_eq!(player.fuel(), 50.0);
        assert_eq!(camera.position().y, 25.0 * DT);
        assert_eq!(player.score(), 6);
    }

    #[test]
    fn test_thrust_up_burns_fuel_and_tilts() {
        let mut player = player();
        let mut camera = camera();
        camera.set_position(Vec2::new(0.0, 100.0));
        player.actor.position = Vec2::new(65.0, 300.0);

        player.update(DT, Some(UP), &mut camera, -6);

        assert_eq!(player.flight(), FlightMode::ThrustUp);
        assert_eq!(player.actor().velocity, Vec2::new(0.0, -150.0));
        assert!((player.fuel() - 49.9).abs() < 1e-4);
        assert!((player.actor().rotation + FRAC_PI_4).abs() < 1e-6);
        assert_eq!(camera.position().y, 100.0 - 150.0 * DT);
    }

    #[test]
    fn test_thrust_down_follows_camera_down() {
        let mut player = player();
        let mut camera = camera();
        player.update(DT, Some(DOWN), &mut camera, -6);

        assert_eq!(player.flight(), FlightMode::ThrustDown);
        assert_eq!(player.actor().velocity, Vec2::new(0.0, 150.0));
        assert!((player.actor().rotation - FRAC_PI_4).abs() < 1e-6);
        assert_eq!(camera.position().y, 150.0 * DT);
    }

    #[test]
    fn test_low_fuel_cannot_thrust() {
        let mut player = player();
        let mut camera = camera();
        player.fuel = 0.05;

        player.update(DT, Some(UP), &mut camera, -6);

        assert_eq!(player.flight(), FlightMode::FreeFall);
        assert_eq!(player.fuel(), 0.05);
        assert_eq!(player.actor().velocity, Vec2::new(0.0, 25.0));
    }

    #[test]
    fn test_empty_tank_on_thrust_button_does_not_nudge() {
        let mut player = player();
        let mut camera = camera();
        player.fuel = 0.0;
        player.update(0.0, Some(UP), &mut camera, -6);
        assert_eq!(player.actor().position, PLAYER_SPAWN);
    }

    #[test]
    fn test_touch_elsewhere_nudges_one_step() {
        let mut player = player();
        let mut camera = camera();

        player.update(0.0, Some(Vec2::new(300.0, 10.0)), &mut camera, -6);
        assert_eq!(player.actor().position.y, 196.0);

        player.update(0.0, Some(Vec2::new(300.0, 470.0)), &mut camera, -6);
        assert_eq!(player.actor().position.y, 200.0);

        // Closer than one step: stay put.
        player.update(0.0, Some(Vec2::new(300.0, 202.0)), &mut camera, -6);
        assert_eq!(player.actor().position.y, 200.0);
        assert_eq!(player.flight(), FlightMode::FreeFall);
    }

    #[test]
    fn test_position_clamped_to_viewport() {
        let mut player = player();
        let mut camera = camera();
        camera.set_position(Vec2::new(0.0, 300.0));
        player.actor.position = Vec2::new(-50.0, 100.0);

        player.update(0.0, None, &mut camera, -6);
        assert_eq!(player.actor().position, Vec2::new(0.0, 300.0));

        player.actor.position = Vec2::new(900.0, 900.0);
        player.update(0.0, None, &mut camera, -6);
        assert_eq!(player.actor().position, Vec2::new(800.0 - 161.0, 780.0 - 86.0));
    }

    #[test]
    fn test_thrust_sound_waits_for_clip() {
        let mut player = player();
        let mut camera = camera();
        let sounds: Vec<Option<SoundEvent>> = (0..5)
            .map(|_| player.update(DT, Some(DOWN), &mut camera, -6))
            .collect();
        assert_eq!(
            sounds,
            vec![None, None, Some(SoundEvent::Thrust), None, Some(SoundEvent::Thrust)]
        );
    }

    #[test]
    fn test_score_tracks_near_layer_speed() {
        let mut player = player();
        let mut camera = camera();
        player.update(DT, None, &mut camera, -6);
        player.update(DT, None, &mut camera, -12);
        assert_eq!(player.score(), 18);
    }

    #[test]
    fn test_fuel_never_leaves_range() {
        for start in [0.0, 0.05, 1.0, 9.5, 50.0, 90.0, 95.5, 100.0] {
            let mut player = player();
            player.fuel = start;
            for step in 0..40 {
                if (step / 3) % 2 == 0 {
                    player.add_fuel(FUEL_STEP);
                } else {
                    player.remove_fuel(FUEL_STEP);
                }
                assert!((0.0..=MAX_FUEL).contains(&player.fuel()), "{}", player.fuel());
            }
            for _ in 0..20 {
                player.remove_fuel(FUEL_STEP);
            }
            assert_eq!(player.fuel(), 0.0);
            for _ in 0..20 {
                player.add_fuel(FUEL_STEP);
            }
            assert_eq!(player.fuel(), MAX_FUEL);
        }
    }

    #[test]
    fn test_obstacle_on_empty_tank_spikes_free_fall() {
        let mut player = player();
        player.hit_obstacle();
        assert_eq!(player.fuel(), 40.0);
        assert_eq!(player.free_fall_rate(), FREE_FALL_RATE);

        player.fuel = 0.5;
        player.hit_obstacle();
        assert_eq!(player.fuel(), 0.0);
        assert_eq!(player.free_fall_rate(), DOOM_FREE_FALL_RATE);
    }

    #[test]
    fn test_death_boundaries() {
        let mut player = player();
        let mut camera = camera();

        player.actor.position.y = 940.0;
        camera.set_position(Vec2::new(0.0, 600.0));
        assert!(!player.is_dead(&camera));

        player.actor.position.y = 940.5;
        assert!(player.is_dead(&camera));

        player.actor.position.y = 200.0;
        camera.set_position(Vec2::new(0.0, 919.5));
        assert!(!player.is_dead(&camera));

        camera.set_position(Vec2::new(0.0, 920.0));
        assert!(player.is_dead(&camera));
    }

    #[test]
    fn test_reset_restores_start_state() {
        let mut player = player();
        let mut camera = camera();
        for _ in 0..10 {
            player.update(DT, Some(DOWN), &mut camera, -12);
        }
        player.hit_obstacle();
        player.fuel = 0.2;
        player.hit_obstacle();
        player.reset();

        assert_eq!(player.fuel(), START_FUEL);
        assert_eq!(player.score(), 0);
        assert_eq!(player.free_fall_rate(), FREE_FALL_RATE);
        assert_eq!(player.actor().position, PLAYER_SPAWN);
        assert_eq!(player.flight(), FlightMode::FreeFall);
    }
}
