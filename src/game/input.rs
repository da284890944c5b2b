//! Pointer, touch and keyboard input, turned into controller inputs.
//!
//! The window is exactly the playfield, so logical window coordinates are
//! screen coordinates. The arrow keys (or W/S) press the thrust buttons.

use bevy::{
    input::{
        ButtonState,
        keyboard::{Key, KeyboardInput},
    },
    prelude::*,
    window::PrimaryWindow,
};

use super::{
    mode::{GameModeController, ModeInput},
    player::{THRUST_DOWN_ZONE, THRUST_UP_ZONE},
};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<ActiveTouch>();
}

/// The point held down this frame, in screen space.
#[derive(Resource, Debug, Default)]
pub struct ActiveTouch(pub Option<Vec2>);

pub(super) fn handle_input(
    window: Single<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    keys: Res<ButtonInput<KeyCode>>,
    mut typed: MessageReader<KeyboardInput>,
    mut controller: ResMut<GameModeController>,
    mut active: ResMut<ActiveTouch>,
) {
    if controller.name_entry().is_some() {
        for key in typed.read().filter(|key| key.state == ButtonState::Pressed) {
            match &key.logical_key {
                Key::Character(text) => {
                    for c in text.chars() {
                        controller.handle(ModeInput::NameChar(c));
                    }
                }
                Key::Space => controller.handle(ModeInput::NameChar(' ')),
                Key::Backspace => controller.handle(ModeInput::NameBackspace),
                Key::Enter => controller.handle(ModeInput::NameSubmit),
                _ => {}
            }
        }
    } else {
        typed.clear();
    }

    if keys.just_pressed(KeyCode::Escape) {
        controller.handle(ModeInput::Back);
    }

    let cursor = window.cursor_position();
    if mouse.just_pressed(MouseButton::Left)
        && let Some(point) = cursor
    {
        controller.handle(ModeInput::Tap(point));
    }
    for touch in touches.iter_just_pressed() {
        controller.handle(ModeInput::Tap(touch.position()));
    }

    active.0 = touches
        .iter()
        .next()
        .map(|touch| touch.position())
        .or_else(|| cursor.filter(|_| mouse.pressed(MouseButton::Left)))
        .or_else(|| keyboard_thrust(&keys));
}

fn keyboard_thrust(keys: &ButtonInput<KeyCode>) -> Option<Vec2> {
    if keys.any_pressed([KeyCode::ArrowUp, KeyCode::KeyW]) {
        Some(THRUST_UP_ZONE.center())
    } else if keys.any_pressed([KeyCode::ArrowDown, KeyCode::KeyS]) {
        Some(THRUST_DOWN_ZONE.center())
    } else {
        None
    }
}
