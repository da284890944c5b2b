//! Debug overlay for collisions and touch regions.
//!
//! Toggle with the 'D' key. Shows:
//! - Padded collision boxes of the glider and every visible item, the glider
//!   in red once an obstacle has sent it plummeting
//! - The grass line and the depth past which the glider is lost
//! - Menu hit regions on the title screen

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{
    actor::{Actor, ActorKind},
    mode::{
        CONTACT_REGION, GameMode, GameModeController, HIGH_SCORES_REGION, HOW_TO_REGION,
        MY_SCORES_REGION, SOUND_REGION, START_REGION,
    },
    player::{DEATH_DEPTH, FREE_FALL_RATE},
    render::{draw_rect, to_camera},
};
use crate::config::GliderConfig;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugOverlayVisible>();

    app.add_systems(
        Update,
        toggle_debug.run_if(input_just_pressed(KeyCode::KeyD).and(not(naming))),
    );
    app.add_systems(
        Update,
        (
            draw_collision_boxes.run_if(in_state(GameMode::Playing)),
            draw_menu_regions.run_if(in_state(GameMode::TitleScreen)),
        )
            .run_if(debug_visible),
    );
}

/// World height of the grass line.
const GRASS_LINE: f32 = 748.0;

/// Resource to track if the debug overlay is visible.
#[derive(Resource, Default)]
pub struct DebugOverlayVisible(pub bool);

fn debug_visible(debug: Res<DebugOverlayVisible>) -> bool {
    debug.0
}

/// 'D' is a letter like any other while a name is being typed.
fn naming(controller: Option<Res<GameModeController>>) -> bool {
    controller.is_some_and(|c| c.name_entry().is_some())
}

fn toggle_debug(mut debug: ResMut<DebugOverlayVisible>) {
    debug.0 = !debug.0;
    let state = if debug.0 { "ON" } else { "OFF" };
    info!("Debug overlay: {}", state);
}

fn draw_collision_boxes(
    mut gizmos: Gizmos,
    config: Res<GliderConfig>,
    controller: Res<GameModeController>,
) {
    let sim = controller.simulation();
    let camera = sim.camera();
    let plummeting = sim.player().free_fall_rate() > FREE_FALL_RATE;

    let actors = sim
        .spawner()
        .items()
        .iter()
        .map(|item| &item.actor)
        .chain(std::iter::once(sim.player().actor()));
    for actor in actors.filter(|actor: &&Actor| camera.is_visible(actor.world_rect())) {
        let color = if actor.kind == ActorKind::Player && plummeting {
            css::RED.with_alpha(0.9)
        } else if actor.collidable {
            css::LIMEGREEN.with_alpha(0.8)
        } else {
            css::GRAY.with_alpha(0.5)
        };
        draw_rect(
            &mut gizmos,
            &config,
            camera.rect_to_screen(actor.bounding_box()),
            color.into(),
        );
    }

    for (depth, color) in [(GRASS_LINE, css::GOLD), (DEATH_DEPTH, css::INDIAN_RED)] {
        let y = camera.world_to_screen(Vec2::new(0.0, depth)).y;
        gizmos.line_2d(
            to_camera(&config, Vec2::new(0.0, y)),
            to_camera(&config, Vec2::new(config.viewport_width, y)),
            color,
        );
    }
}

fn draw_menu_regions(mut gizmos: Gizmos, config: Res<GliderConfig>) {
    for region in [
        START_REGION,
        HOW_TO_REGION,
        MY_SCORES_REGION,
        HIGH_SCORES_REGION,
        CONTACT_REGION,
        SOUND_REGION,
    ] {
        draw_rect(&mut gizmos, &config, region, css::AQUA.with_alpha(0.8).into());
    }
}
