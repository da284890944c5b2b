//! The pause dialog.

use bevy::prelude::*;

use crate::{
    game::mode::{EXIT_NO_REGION, EXIT_YES_REGION, GameMode},
    theme::widget,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameMode::Paused), spawn_pause_menu);
}

fn spawn_pause_menu(mut commands: Commands) {
    commands.spawn((
        widget::dialog_root("Pause Menu"),
        GlobalZIndex(2),
        DespawnOnExit(GameMode::Paused),
        children![
            widget::header("Game Paused"),
            widget::label("Exit to the title screen?"),
            widget::region("Yes", EXIT_YES_REGION),
            widget::region("No", EXIT_NO_REGION),
        ],
    ));
}
