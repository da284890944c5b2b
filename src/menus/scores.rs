//! The online top 10 and the player's own best scores.

use bevy::{
    ecs::spawn::{Spawn, SpawnIter},
    prelude::*,
};

use crate::{
    game::{
        leaderboard::{LEADERBOARD_ROWS, LeaderboardRow},
        mode::{GameMode, GameModeController},
    },
    theme::widget,
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameMode::HighScores), spawn_high_scores);
    app.add_systems(OnEnter(GameMode::MyScores), spawn_my_scores);
    app.add_systems(
        Update,
        update_high_scores.run_if(in_state(GameMode::HighScores)),
    );
}

/// One line of the online table.
#[derive(Component)]
struct LeaderboardLine(usize);

#[derive(Component)]
struct LeaderboardStatus;

fn row_text(row: &LeaderboardRow) -> String {
    format!("{:>3}   {:<16} {:>8}", row.rank, row.name, row.score)
}

fn spawn_high_scores(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("High Scores Screen"),
        GlobalZIndex(2),
        DespawnOnExit(GameMode::HighScores),
        Children::spawn((
            Spawn(widget::header("High Scores")),
            Spawn((widget::notice(""), LeaderboardStatus)),
            SpawnIter((0..LEADERBOARD_ROWS).map(|i| (widget::label(""), LeaderboardLine(i)))),
            Spawn(widget::label("Esc: back")),
        )),
    ));
}

fn update_high_scores(
    controller: Res<GameModeController>,
    mut lines: Query<(&LeaderboardLine, &mut Text), Without<LeaderboardStatus>>,
    mut status: Single<&mut Text, With<LeaderboardStatus>>,
) {
    let status_text = if controller.is_fetching() {
        "Loading...".to_string()
    } else {
        controller.notice().unwrap_or_default().to_string()
    };
    if status.0 != status_text {
        status.0 = status_text;
    }

    let table = controller.table();
    for (line, mut text) in &mut lines {
        let wanted = match table.rows().get(line.0) {
            Some(row) if table.is_loaded() => row_text(row),
            _ => String::new(),
        };
        if text.0 != wanted {
            text.0 = wanted;
        }
    }
}

fn spawn_my_scores(mut commands: Commands, controller: Res<GameModeController>) {
    let scores: Vec<String> = controller
        .profile()
        .score_history
        .iter()
        .enumerate()
        .map(|(i, score)| format!("{:>2}.   {:>8}", i + 1, score))
        .collect();
    let empty = scores.is_empty();

    commands.spawn((
        widget::ui_root("My Scores Screen"),
        GlobalZIndex(2),
        DespawnOnExit(GameMode::MyScores),
        Children::spawn((
            Spawn(widget::header("My Scores")),
            SpawnIter(scores.into_iter().map(widget::label)),
            SpawnIter(empty.then(|| widget::label("No flights yet.")).into_iter()),
            Spawn(widget::label("Esc: back")),
        )),
    ));
}
