//! Discrete sound cues emitted by the simulation.
//!
//! The simulation never plays audio itself; it hands these to whoever is
//! listening (see `crate::audio`), which stays silent when sound is off.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq, Hash, Reflect)]
pub enum SoundEvent {
    SpeedUp,
    SpeedDown,
    FuelUp,
    FuelDown,
    Thrust,
}

impl SoundEvent {
    pub const ALL: [SoundEvent; 5] = [
        SoundEvent::SpeedUp,
        SoundEvent::SpeedDown,
        SoundEvent::FuelUp,
        SoundEvent::FuelDown,
        SoundEvent::Thrust,
    ];

    /// Asset path of the clip for this cue.
    pub fn asset_path(self) -> &'static str {
        match self {
            SoundEvent::SpeedUp => "audio/sound_effects/accelerate.ogg",
            SoundEvent::SpeedDown => "audio/sound_effects/decelerate.ogg",
            SoundEvent::FuelUp => "audio/sound_effects/fuel_up.ogg",
            SoundEvent::FuelDown => "audio/sound_effects/fuel_down.ogg",
            SoundEvent::Thrust => "audio/sound_effects/rocket_thrust.ogg",
        }
    }
}
