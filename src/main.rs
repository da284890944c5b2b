// Support configuring Bevy lints within code.
#![cfg_attr(bevy_lint, feature(register_tool), register_tool(bevy))]
// Disable console on Windows for non-dev builds.
#![cfg_attr(not(feature = "dev"), windows_subsystem = "windows")]

mod audio;
mod config;
mod game;
mod menus;
mod theme;

use bevy::{asset::AssetMetaCheck, prelude::*, window::WindowResolution};

use config::GliderConfig;

fn main() -> AppExit {
    App::new().add_plugins(AppPlugin).run()
}

pub struct AppPlugin;

impl Plugin for AppPlugin {
    fn build(&self, app: &mut App) {
        let config = GliderConfig::load();

        // Add Bevy plugins.
        app.add_plugins(
            DefaultPlugins
                .set(AssetPlugin {
                    // Wasm builds will check for meta files (that don't exist) if this isn't set.
                    // This causes errors and even panics on web build on itch.
                    // See https://github.com/bevyengine/bevy_github_ci_template/issues/48.
                    meta_check: AssetMetaCheck::Never,
                    ..default()
                })
                .set(WindowPlugin {
                    primary_window: Window {
                        title: "Rocket Glider".to_string(),
                        resolution: WindowResolution::new(
                            config.viewport_width as u32,
                            config.viewport_height as u32,
                        ),
                        // Touch regions are laid out for a fixed playfield.
                        resizable: false,
                        fit_canvas_to_parent: true,
                        ..default()
                    }
                    .into(),
                    ..default()
                }),
        );
        app.insert_resource(config);
        app.insert_resource(ClearColor(theme::palette::SKY));

        // Add other plugins.
        app.add_plugins((audio::plugin, game::plugin, menus::plugin));

        // Spawn the main camera.
        app.add_systems(Startup, spawn_camera);
    }
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn((Name::new("Camera"), Camera2d));
}
