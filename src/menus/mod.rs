//! The game's menus, one per game mode.
//!
//! Each menu spawns when its mode is entered and despawns when it is left.
//! Taps are resolved by the game-mode controller against fixed screen
//! regions; the menus only draw those regions.

mod gameover;
mod info;
mod pause;
mod scores;
mod title;

use bevy::prelude::*;

pub(super) fn plugin(app: &mut App) {
    app.add_plugins((
        gameover::plugin,
        info::plugin,
        pause::plugin,
        scores::plugin,
        title::plugin,
    ));
}
