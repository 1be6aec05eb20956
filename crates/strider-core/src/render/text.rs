//! Font selection and centered text.

use embedded_graphics::mono_font::ascii::{FONT_5X8, FONT_6X10, FONT_7X13, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use embedded_layout::align::{Align, horizontal, vertical};
use profont::PROFONT_24_POINT;

use crate::layout::{FontSize, TextSlot};

impl FontSize {
    pub fn font(self) -> &'static MonoFont<'static> {
        match self {
            FontSize::Tiny => &FONT_5X8,
            FontSize::Small => &FONT_6X10,
            FontSize::Medium => &FONT_7X13,
            FontSize::Large => &FONT_10X20,
            FontSize::ExtraLarge => &PROFONT_24_POINT,
        }
    }
}

/// Rendered width of `text` in pixels.
pub fn text_width(text: &str, font: &MonoFont<'_>) -> u32 {
    let chars = text.chars().count() as u32;
    if chars == 0 {
        return 0;
    }
    chars * (font.character_size.width + font.character_spacing) - font.character_spacing
}

/// Largest size, no larger than `preferred`, at which `text` fits `width`.
///
/// Falls back to the smallest size when nothing fits.
pub fn fit_font(text: &str, width: u32, preferred: FontSize) -> FontSize {
    let mut size = preferred;
    while text_width(text, size.font()) > width {
        match size.smaller() {
            Some(smaller) => size = smaller,
            None => break,
        }
    }
    size
}

/// Draw `text` centered in `slot`.
pub fn draw_centered<D>(
    target: &mut D,
    text: &str,
    slot: &TextSlot,
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    if text.is_empty() || slot.bounds.is_zero_sized() {
        return Ok(());
    }

    let size = fit_font(text, slot.bounds.size.width, slot.font);
    let style = MonoTextStyle::new(size.font(), color);

    Text::with_baseline(text, Point::zero(), style, Baseline::Top)
        .align_to(&slot.bounds, horizontal::Center, vertical::Center)
        .draw(target)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        assert_eq!(text_width("", &FONT_6X10), 0);
        assert_eq!(text_width("151", &FONT_6X10), 18);
        assert_eq!(text_width("5:33", &FONT_10X20), 40);
    }

    #[test]
    fn test_fit_font_steps_down() {
        assert_eq!(fit_font("151", 100, FontSize::Large), FontSize::Large);
        // 12 chars: 120 px at 10x20, 84 px at 7x13
        assert_eq!(fit_font("42195.00 km!", 90, FontSize::Large), FontSize::Medium);
        assert_eq!(fit_font("far too long for this", 10, FontSize::Large), FontSize::Tiny);
    }

    #[test]
    fn test_sizes_are_ordered() {
        let sizes = [
            FontSize::Tiny,
            FontSize::Small,
            FontSize::Medium,
            FontSize::Large,
            FontSize::ExtraLarge,
        ];
        for pair in sizes.windows(2) {
            assert!(pair[0].font().character_size.height < pair[1].font().character_size.height);
        }
    }
}
