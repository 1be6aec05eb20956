//! Color definitions for the telemetry screens
//!
//! All colors are RGB565. To convert from 8-bit RGB: R>>3, G>>2, B>>3

use embedded_graphics::pixelcolor::Rgb565;

use crate::zone::Zone;

// ============================================================================
// Base Colors
// ============================================================================

/// Screen background
pub const BACKGROUND: Rgb565 = Rgb565::new(0, 0, 0);

/// Pure white - maximum brightness in RGB565
pub const WHITE: Rgb565 = Rgb565::new(31, 63, 31);

/// Light gray - for labels
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// Medium gray - for idle elements
pub const GRAY: Rgb565 = Rgb565::new(16, 32, 16);

/// Border/stroke color - used for the unfilled gauge track
pub const STROKE: Rgb565 = Rgb565::new(43 >> 3, 55 >> 2, 57 >> 3);

/// Near-black needle shadow
pub const SHADOW: Rgb565 = Rgb565::new(4 >> 3, 8 >> 2, 8 >> 3);

// ============================================================================
// Zone Colors
// ============================================================================

/// Inside the target band - bright teal-green
pub const ZONE_IN: Rgb565 = Rgb565::new(95 >> 3, 185 >> 2, 141 >> 3);

/// Close to the band - warm orange
pub const ZONE_NEAR: Rgb565 = Rgb565::new(200 >> 3, 145 >> 2, 85 >> 3);

/// Well outside the band - muted red
pub const ZONE_OUT: Rgb565 = Rgb565::new(190 >> 3, 95 >> 2, 95 >> 3);

/// Target band on the gauge track - darker green
pub const BAND: Rgb565 = Rgb565::new(76 >> 3, 154 >> 2, 113 >> 3);

// ============================================================================
// Palette
// ============================================================================

/// Colors used by one render pass.
///
/// Monochrome panels get a neutral, high-contrast palette where the zone is
/// carried by the needle position alone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Rgb565,
    pub text: Rgb565,
    pub label: Rgb565,
    pub track: Rgb565,
    pub band: Rgb565,
    pub tick: Rgb565,
    pub shadow: Rgb565,
    pub hub: Rgb565,
    /// Needle and underbar color while the metric has no sample
    pub idle: Rgb565,
    color: bool,
}

impl Palette {
    pub const COLOR: Self = Self {
        background: BACKGROUND,
        text: WHITE,
        label: LIGHT_GRAY,
        track: STROKE,
        band: BAND,
        tick: WHITE,
        shadow: SHADOW,
        hub: WHITE,
        idle: GRAY,
        color: true,
    };

    pub const MONO: Self = Self {
        background: BACKGROUND,
        text: WHITE,
        label: WHITE,
        track: GRAY,
        band: WHITE,
        tick: WHITE,
        shadow: BACKGROUND,
        hub: WHITE,
        idle: WHITE,
        color: false,
    };

    pub const fn for_display(color: bool) -> Self {
        if color { Self::COLOR } else { Self::MONO }
    }

    /// Needle/underbar color for a zone.
    pub const fn zone(&self, zone: Zone) -> Rgb565 {
        if !self.color {
            return WHITE;
        }
        match zone {
            Zone::In => ZONE_IN,
            Zone::Near => ZONE_NEAR,
            Zone::Out => ZONE_OUT,
        }
    }
}
