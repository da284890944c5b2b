use bevy::prelude::*;

/// Sky behind everything.
pub const SKY: Color = Color::srgb(0.53, 0.78, 0.95);

/// White text for menu labels over the sky
pub const LABEL_TEXT: Color = Color::srgb(0.97, 0.97, 1.0);

/// Dark text for headers
pub const HEADER_TEXT: Color = Color::srgb(0.08, 0.15, 0.3);

/// Ghost-white score in the corner
pub const HUD_TEXT: Color = Color::srgb(0.97, 0.97, 1.0);

/// Warnings such as a failed leaderboard request
pub const NOTICE_TEXT: Color = Color::srgb(0.85, 0.2, 0.2);

/// #1f3c73
pub const REGION_BACKGROUND: Color = Color::srgba(0.12, 0.235, 0.45, 0.85);
/// #f2f2f2
pub const REGION_BORDER: Color = Color::srgb(0.95, 0.95, 0.95);

/// Translucent panel behind dialogs
pub const DIALOG_BACKGROUND: Color = Color::srgba(0.05, 0.1, 0.2, 0.8);

pub const GLIDER: Color = Color::srgb(0.95, 0.95, 0.95);
pub const SPEED_UP: Color = Color::srgb(0.3, 0.85, 0.35);
pub const SPEED_DOWN: Color = Color::srgb(0.95, 0.6, 0.15);
pub const FUEL: Color = Color::srgb(0.95, 0.85, 0.2);
pub const OBSTACLE: Color = Color::srgb(0.85, 0.2, 0.2);
pub const NEAR_CLOUDS: Color = Color::srgba(1.0, 1.0, 1.0, 0.35);
pub const FAR_CLOUDS: Color = Color::srgba(1.0, 1.0, 1.0, 0.6);
pub const CONTROL: Color = Color::srgba(1.0, 1.0, 1.0, 0.7);
/// A thrust button while it is held
pub const CONTROL_ACTIVE: Color = Color::srgb(1.0, 0.55, 0.1);
