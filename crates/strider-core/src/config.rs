//! Display configuration for the supported watch platforms.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

use crate::constants::{
    INSET_BOTTOM_PX, RECT_INSET_SIDE_PX, RECT_INSET_TOP_PX, ROUND_INSET_SIDE_PX,
    ROUND_INSET_TOP_PX,
};

/// Physical outline of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformShape {
    Rectangular,
    Round,
}

/// Content insets applied to the available area before layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insets {
    pub top: u32,
    pub side: u32,
    pub bottom: u32,
}

impl PlatformShape {
    pub const fn insets(self) -> Insets {
        match self {
            Self::Round => Insets {
                top: ROUND_INSET_TOP_PX,
                side: ROUND_INSET_SIDE_PX,
                bottom: INSET_BOTTOM_PX,
            },
            Self::Rectangular => Insets {
                top: RECT_INSET_TOP_PX,
                side: RECT_INSET_SIDE_PX,
                bottom: INSET_BOTTOM_PX,
            },
        }
    }
}

impl Insets {
    /// Shrink `area` by these insets, saturating at zero size.
    pub fn apply(&self, area: Rectangle) -> Rectangle {
        let width = area.size.width.saturating_sub(self.side * 2);
        let height = area
            .size
            .height
            .saturating_sub(self.top + self.bottom);
        Rectangle::new(
            area.top_left + Point::new(self.side as i32, self.top as i32),
            Size::new(width, height),
        )
    }
}

/// Screen geometry and capabilities of one watch platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub shape: PlatformShape,
    /// `false` for black-and-white panels
    pub color: bool,
    pub width: u32,
    pub height: u32,
}

impl DisplayConfig {
    pub const RECT_MONO: Self = Self {
        shape: PlatformShape::Rectangular,
        color: false,
        width: 144,
        height: 168,
    };

    pub const RECT_COLOR: Self = Self {
        shape: PlatformShape::Rectangular,
        color: true,
        width: 144,
        height: 168,
    };

    pub const ROUND_COLOR: Self = Self {
        shape: PlatformShape::Round,
        color: true,
        width: 180,
        height: 180,
    };

    pub const LARGE_RECT_COLOR: Self = Self {
        shape: PlatformShape::Rectangular,
        color: true,
        width: 200,
        height: 228,
    };

    /// Look up a preset by its short name (`rect-mono`, `rect`, `round`, `large`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "rect-mono" | "mono" => Some(Self::RECT_MONO),
            "rect" | "rect-color" => Some(Self::RECT_COLOR),
            "round" => Some(Self::ROUND_COLOR),
            "large" | "large-rect" => Some(Self::LARGE_RECT_COLOR),
            _ => None,
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// The whole screen, i.e. the available area when nothing obstructs it.
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size())
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self::RECT_COLOR
    }
}
