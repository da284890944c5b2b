//! Plays the game's sound cues, unless the player turned sound off.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::game::{mode::GameModeController, sound::SoundEvent};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(Startup, load_sound_effects);
    app.add_systems(
        Update,
        play_sound_effects.after(crate::game::GameSystems::Simulate),
    );
}

/// An organizational marker component that should be added to a spawned [`AudioPlayer`] if it's in the
/// general "sound effect" category (e.g. footsteps, the sound of a magic spell, a door opening).
#[derive(Component, Reflect, Default)]
#[reflect(Component)]
pub struct SoundEffect;

/// A sound effect audio instance.
pub fn sound_effect(handle: Handle<AudioSource>) -> impl Bundle {
    (AudioPlayer(handle), PlaybackSettings::DESPAWN, SoundEffect)
}

#[derive(Resource, Default)]
struct SoundEffects(HashMap<SoundEvent, Handle<AudioSource>>);

fn load_sound_effects(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handles = SoundEvent::ALL
        .into_iter()
        .map(|event| (event, asset_server.load(event.asset_path())))
        .collect();
    commands.insert_resource(SoundEffects(handles));
}

fn play_sound_effects(
    mut commands: Commands,
    mut events: MessageReader<SoundEvent>,
    effects: Res<SoundEffects>,
    controller: Res<GameModeController>,
) {
    if !controller.sound_enabled() {
        events.clear();
        return;
    }
    for event in events.read() {
        if let Some(handle) = effects.0.get(event) {
            commands.spawn(sound_effect(handle.clone()));
        }
    }
}
