//! Draws the simulation with gizmos, plus the in-game HUD.
//!
//! Sprites arrive in screen space (origin top-left, y down) and are mapped
//! into the centred, y-up space of the 2D camera here.

use bevy::prelude::*;

use super::{
    GameSystems,
    actor::ActorKind,
    background::LayerKind,
    items::ItemKind,
    mode::{GameMode, GameModeController},
    player::{FlightMode, THRUST_DOWN_ZONE, THRUST_UP_ZONE},
    simulation::{SpriteKind, SpriteView},
};
use crate::{config::GliderConfig, theme::palette};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_hud);
    app.add_systems(
        Update,
        (draw_world, draw_controls, update_hud)
            .in_set(GameSystems::Present)
            .run_if(world_visible),
    );
    app.add_systems(Update, hide_hud.run_if(not(world_visible)));
}

/// Fuel gauge, left edge of the screen.
const FUEL_GAUGE: Rect = Rect {
    min: Vec2::new(12.0, 120.0),
    max: Vec2::new(36.0, 360.0),
};

#[derive(Component)]
struct Hud;

#[derive(Component)]
struct ScoreLabel;

/// The world stays on screen, frozen, behind the pause and game-over dialogs.
fn world_visible(state: Res<State<GameMode>>) -> bool {
    matches!(
        state.get(),
        GameMode::Playing | GameMode::Paused | GameMode::GameOver
    )
}

/// Screen space to camera space.
pub(super) fn to_camera(config: &GliderConfig, point: Vec2) -> Vec2 {
    Vec2::new(
        point.x - config.viewport_width / 2.0,
        config.viewport_height / 2.0 - point.y,
    )
}

fn sprite_color(kind: SpriteKind) -> Color {
    match kind {
        SpriteKind::Actor(ActorKind::Player) => palette::GLIDER,
        SpriteKind::Actor(ActorKind::Item(ItemKind::SpeedUp)) => palette::SPEED_UP,
        SpriteKind::Actor(ActorKind::Item(ItemKind::SpeedDown)) => palette::SPEED_DOWN,
        SpriteKind::Actor(ActorKind::Item(ItemKind::Fuel)) => palette::FUEL,
        SpriteKind::Actor(ActorKind::Item(ItemKind::Obstacle)) => palette::OBSTACLE,
        SpriteKind::Layer(LayerKind::Near) => palette::NEAR_CLOUDS,
        SpriteKind::Layer(LayerKind::Far) => palette::FAR_CLOUDS,
    }
}

fn draw_sprite(gizmos: &mut Gizmos, config: &GliderConfig, view: &SpriteView) {
    // Screen space is y-down, so rotations flip sign.
    let isometry = Isometry2d::new(
        to_camera(config, view.screen_center),
        Rot2::radians(-view.rotation),
    );
    // A tinted sprite shows its tint instead of the kind colour.
    let color = if view.tint == Color::WHITE {
        sprite_color(view.kind)
    } else {
        view.tint
    };
    gizmos.rect_2d(isometry, view.size, color);
}

fn draw_world(
    mut gizmos: Gizmos,
    config: Res<GliderConfig>,
    controller: Res<GameModeController>,
) {
    for view in controller.simulation().sprites() {
        draw_sprite(&mut gizmos, &config, &view);
    }
}

pub(super) fn draw_rect(gizmos: &mut Gizmos, config: &GliderConfig, rect: Rect, color: Color) {
    gizmos.rect_2d(
        Isometry2d::from_translation(to_camera(config, rect.center())),
        rect.size(),
        color,
    );
}

/// The button that lights up for the glider's current flight, if any.
fn active_button(mode: GameMode, flight: FlightMode) -> Option<Rect> {
    match (mode, flight) {
        (GameMode::Playing, FlightMode::ThrustUp) => Some(THRUST_UP_ZONE),
        (GameMode::Playing, FlightMode::ThrustDown) => Some(THRUST_DOWN_ZONE),
        _ => None,
    }
}

/// Thrust buttons and the fuel gauge.
fn draw_controls(
    mut gizmos: Gizmos,
    config: Res<GliderConfig>,
    controller: Res<GameModeController>,
) {
    let hud = controller.hud();
    let active = active_button(hud.mode, controller.simulation().player().flight());
    for zone in [THRUST_UP_ZONE, THRUST_DOWN_ZONE] {
        let color = if active == Some(zone) {
            palette::CONTROL_ACTIVE
        } else {
            palette::CONTROL
        };
        draw_rect(&mut gizmos, &config, zone, color);
    }

    let fuel = hud.fuel_fraction.clamp(0.0, 1.0);
    draw_rect(&mut gizmos, &config, FUEL_GAUGE, palette::CONTROL);
    if fuel > 0.0 {
        let level = Rect {
            min: Vec2::new(
                FUEL_GAUGE.min.x,
                FUEL_GAUGE.max.y - FUEL_GAUGE.height() * fuel,
            ),
            max: FUEL_GAUGE.max,
        };
        draw_rect(&mut gizmos, &config, level, palette::FUEL);
    }
}

fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("HUD"),
        Hud,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(24.0),
            ..default()
        },
        Visibility::Hidden,
        GlobalZIndex(1),
        children![(
            Name::new("Score"),
            ScoreLabel,
            Text::new("0"),
            TextFont::from_font_size(28.0),
            TextColor(palette::HUD_TEXT),
        )],
    ));
}

fn update_hud(
    controller: Res<GameModeController>,
    mut hud: Single<&mut Visibility, With<Hud>>,
    mut label: Single<&mut Text, With<ScoreLabel>>,
) {
    **hud = Visibility::Inherited;
    let score = controller.hud().score.to_string();
    if label.0 != score {
        label.0 = score;
    }
}

fn hide_hud(mut hud: Single<&mut Visibility, With<Hud>>) {
    **hud = Visibility::Hidden;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_active_button_follows_flight_while_playing() {
        assert_eq!(
            active_button(GameMode::Playing, FlightMode::ThrustUp),
            Some(THRUST_UP_ZONE)
        );
        assert_eq!(
            active_button(GameMode::Playing, FlightMode::ThrustDown),
            Some(THRUST_DOWN_ZONE)
        );
        assert_eq!(active_button(GameMode::Playing, FlightMode::FreeFall), None);
        // Frozen behind a dialog, nothing is held.
        assert_eq!(active_button(GameMode::Paused, FlightMode::ThrustUp), None);
        assert_eq!(active_button(GameMode::GameOver, FlightMode::ThrustDown), None);
    }

    #[test]
    fn test_to_camera_centres_and_flips_y() {
        let config = GliderConfig::default();
        assert_eq!(to_camera(&config, Vec2::ZERO), Vec2::new(-400.0, 240.0));
        assert_eq!(to_camera(&config, Vec2::new(400.0, 240.0)), Vec2::ZERO);
        assert_eq!(to_camera(&config, Vec2::new(800.0, 480.0)), Vec2::new(400.0, -240.0));
    }
}
