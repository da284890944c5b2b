//! The game over dialog, with the optional leaderboard name entry.

use bevy::prelude::*;

use crate::{
    game::mode::{GameMode, GameModeController, NAME_MAX_LEN, SUBMIT_NO_REGION, SUBMIT_YES_REGION},
    theme::widget,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameMode::GameOver), spawn_gameover_menu);
    app.add_systems(
        Update,
        update_name_entry.run_if(in_state(GameMode::GameOver)),
    );
}

#[derive(Component)]
struct NameEntryLine;

fn spawn_gameover_menu(mut commands: Commands, controller: Res<GameModeController>) {
    let score = controller.hud().score;

    commands.spawn((
        widget::dialog_root("Game Over Menu"),
        GlobalZIndex(2),
        DespawnOnExit(GameMode::GameOver),
        children![
            widget::header("Game Over"),
            widget::label(format!("Score: {score}")),
            widget::label("Submit your score online?"),
            (widget::label(""), NameEntryLine),
            widget::region("Yes", SUBMIT_YES_REGION),
            widget::region("No", SUBMIT_NO_REGION),
        ],
    ));
}

fn update_name_entry(
    controller: Res<GameModeController>,
    mut line: Single<&mut Text, With<NameEntryLine>>,
) {
    let wanted = match controller.name_entry() {
        Some(name) => format!(
            "Name: {name}_   (Enter to send, Esc to cancel, max {NAME_MAX_LEN})"
        ),
        None => String::new(),
    };
    if line.0 != wanted {
        line.0 = wanted;
    }
}
