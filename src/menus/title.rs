//! The title screen and its six buttons.

use bevy::prelude::*;

use crate::{
    game::mode::{
        CONTACT_REGION, GameMode, GameModeController, HIGH_SCORES_REGION, HOW_TO_REGION,
        MY_SCORES_REGION, SOUND_REGION, START_REGION,
    },
    theme::widget,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameMode::TitleScreen), spawn_title_menu);
    app.add_systems(
        Update,
        (update_sound_label, update_notice).run_if(in_state(GameMode::TitleScreen)),
    );
}

#[derive(Component)]
struct SoundLabel;

#[derive(Component)]
struct NoticeLine;

fn sound_text(enabled: bool) -> String {
    format!("Sound: {}", if enabled { "On" } else { "Off" })
}

fn spawn_title_menu(mut commands: Commands, controller: Option<Res<GameModeController>>) {
    let sound_on = controller.is_none_or(|c| c.sound_enabled());

    commands.spawn((
        widget::ui_root("Title Menu"),
        GlobalZIndex(2),
        DespawnOnExit(GameMode::TitleScreen),
        children![
            widget::header("Rocket Glider"),
            widget::label("Ride the wind. Mind the fuel."),
            (widget::notice(""), NoticeLine),
            widget::region("Start Game", START_REGION),
            widget::region("How to Play", HOW_TO_REGION),
            widget::region("My Scores", MY_SCORES_REGION),
            widget::region("High Scores", HIGH_SCORES_REGION),
            widget::region("Contact Info", CONTACT_REGION),
            (
                widget::region(sound_text(sound_on), SOUND_REGION),
                SoundLabel,
            ),
        ],
    ));
}

fn update_sound_label(
    controller: Res<GameModeController>,
    regions: Query<&Children, With<SoundLabel>>,
    mut texts: Query<&mut Text>,
) {
    if !controller.is_changed() {
        return;
    }
    let wanted = sound_text(controller.sound_enabled());
    for children in &regions {
        let mut iter = texts.iter_many_mut(children);
        while let Some(mut text) = iter.fetch_next() {
            if text.0 != wanted {
                text.0 = wanted.clone();
            }
        }
    }
}

/// A failed score submission is reported here after the dialog closes.
fn update_notice(
    controller: Res<GameModeController>,
    mut line: Single<&mut Text, With<NoticeLine>>,
) {
    let wanted = controller.notice().unwrap_or_default();
    if line.0 != wanted {
        line.0 = wanted.to_string();
    }
}
