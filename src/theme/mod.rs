//! Reusable UI widgets & theming.

pub mod palette;
pub mod widget;
