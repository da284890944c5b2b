//! Helper functions for creating common widgets.
//!
//! Menus take input through the game-mode controller's hit regions, so the
//! widgets here are display-only: a tap lands on the region, not the node.

use std::borrow::Cow;

use bevy::prelude::*;

use crate::theme::palette::*;

/// A root UI node that fills the window and centers its content.
pub fn ui_root(name: impl Into<Cow<'static, str>>) -> impl Bundle {
    (
        Name::new(name),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Start,
            flex_direction: FlexDirection::Column,
            padding: UiRect::top(Val::Px(24.0)),
            row_gap: Val::Px(6.0),
            ..default()
        },
        // Don't block picking events for other UI roots.
        Pickable::IGNORE,
    )
}

/// A simple header label. Bigger than [`label`].
pub fn header(text: impl Into<String>) -> impl Bundle {
    (
        Name::new("Header"),
        Text(text.into()),
        TextFont::from_font_size(40.0),
        TextColor(HEADER_TEXT),
    )
}

/// A simple text label.
pub fn label(text: impl Into<String>) -> impl Bundle {
    (
        Name::new("Label"),
        Text(text.into()),
        TextFont::from_font_size(22.0),
        TextColor(LABEL_TEXT),
    )
}

pub fn notice(text: impl Into<String>) -> impl Bundle {
    (
        Name::new("Notice"),
        Text(text.into()),
        TextFont::from_font_size(18.0),
        TextColor(NOTICE_TEXT),
    )
}

/// A labelled box drawn exactly over a screen-space hit region.
pub fn region(text: impl Into<String>, rect: Rect) -> impl Bundle {
    (
        Name::new("Region"),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(rect.min.x),
            top: Val::Px(rect.min.y),
            width: Val::Px(rect.width()),
            height: Val::Px(rect.height()),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Center,
            border: UiRect::all(Val::Px(2.0)),
            ..default()
        },
        BackgroundColor(REGION_BACKGROUND),
        BorderColor::all(REGION_BORDER),
        BorderRadius::all(Val::Px(8.0)),
        children![(
            Name::new("Region Text"),
            Text(text.into()),
            TextFont::from_font_size(24.0),
            TextColor(LABEL_TEXT),
            Pickable::IGNORE,
        )],
    )
}

/// A full-window dimmed panel for dialogs over the frozen game.
pub fn dialog_root(name: impl Into<Cow<'static, str>>) -> impl Bundle {
    (
        Name::new(name),
        Node {
            position_type: PositionType::Absolute,
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            align_items: AlignItems::Center,
            justify_content: JustifyContent::Start,
            flex_direction: FlexDirection::Column,
            padding: UiRect::top(Val::Px(80.0)),
            row_gap: Val::Px(10.0),
            ..default()
        },
        BackgroundColor(DIALOG_BACKGROUND),
        Pickable::IGNORE,
    )
}
