//! The static text screens: how to play, and contact info.

use bevy::prelude::*;

use crate::{game::mode::GameMode, theme::widget};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameMode::HowTo), spawn_how_to);
    app.add_systems(OnEnter(GameMode::ContactInfo), spawn_contact_info);
}

fn spawn_how_to(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("How To Screen"),
        GlobalZIndex(2),
        DespawnOnExit(GameMode::HowTo),
        children![
            widget::header("How to Play"),
            widget::label("Hold the up or down button (or the arrow keys) to fire the rocket."),
            widget::label("Let go and the glider drifts down on its own."),
            widget::label("Touch anywhere else to steer gently toward that height."),
            widget::label("Green arrows speed the world up, orange ones slow it down."),
            widget::label("Fuel cans refill the tank. Rocks drain it."),
            widget::label("Fall below the grass and the flight is over."),
            widget::label("Esc: back"),
        ],
    ));
}

fn spawn_contact_info(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Contact Info Screen"),
        GlobalZIndex(2),
        DespawnOnExit(GameMode::ContactInfo),
        children![
            widget::header("Contact Info"),
            widget::label("Found a bug or have an idea for the glider?"),
            widget::label("Open an issue on the project's repository."),
            widget::label("Esc: back"),
        ],
    ));
}
