//! The main game module for the glider.
//!
//! The rules live in plain Rust types that never touch the ECS:
//! - Actors, camera and collisions
//! - Difficulty tiers, item spawning and parallax scrolling
//! - The player's flight model
//! - The game-mode state machine, profile and leaderboard
//!
//! The Bevy side only feeds input in, mirrors the game mode into a state,
//! and draws what the simulation exposes.

pub mod actor;
pub mod background;
pub mod camera;
pub mod collision;
mod debug;
pub mod difficulty;
pub mod highscore;
mod input;
pub mod items;
pub mod leaderboard;
pub mod mode;
pub mod player;
mod render;
pub mod simulation;
pub mod sound;

use bevy::prelude::*;

use crate::config::GliderConfig;
use mode::{GameMode, GameModeController};
use sound::SoundEvent;

pub(super) fn plugin(app: &mut App) {
    app.init_state::<GameMode>();
    app.add_message::<SoundEvent>();
    app.register_type::<GameMode>();

    app.add_systems(Startup, spawn_controller);
    app.add_systems(
        Update,
        (input::handle_input, tick_controller, sync_game_mode)
            .chain()
            .in_set(GameSystems::Simulate),
    );
    app.configure_sets(Update, GameSystems::Simulate.before(GameSystems::Present));

    app.add_plugins((input::plugin, render::plugin, debug::plugin));
}

/// Ordering of the game's frame: simulate, then draw what was simulated.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSystems {
    Simulate,
    Present,
}

fn spawn_controller(mut commands: Commands, config: Res<GliderConfig>) {
    commands.insert_resource(GameModeController::from_config(&config));
    info!("Glider ready");
}

/// Run one frame of the controller and forward its sound cues.
fn tick_controller(
    time: Res<Time>,
    touch: Res<input::ActiveTouch>,
    mut controller: ResMut<GameModeController>,
    mut sounds: MessageWriter<SoundEvent>,
) {
    for sound in controller.update(time.delta_secs(), touch.0) {
        sounds.write(sound);
    }
}

/// Mirror the controller's mode into the Bevy state, and honour exit requests.
fn sync_game_mode(
    controller: Res<GameModeController>,
    state: Res<State<GameMode>>,
    mut next_mode: ResMut<NextState<GameMode>>,
    mut app_exit: MessageWriter<AppExit>,
) {
    if controller.mode() != *state.get() {
        next_mode.set(controller.mode());
    }
    if controller.exit_requested() {
        app_exit.write(AppExit::Success);
    }
}
