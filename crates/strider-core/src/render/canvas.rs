//! Drawing primitives.
//!
//! The engine never touches a display directly. Everything it draws goes
//! through [`Canvas`], which [`EgCanvas`] implements for any
//! `embedded-graphics` draw target. Tests substitute a recording canvas.
//!
//! Arc angles are clock angles: 0° at twelve o'clock, increasing clockwise.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Arc, Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment,
};
use micromath::F32;

use crate::layout::TextSlot;
use crate::render::text;

/// A thick arc, measured on the outer edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcSpec {
    pub center: Point,
    pub radius: u32,
    pub thickness: u32,
    /// Clock angle where the arc starts
    pub start_deg: f32,
    /// Clock angle where the arc ends, `>= start_deg`
    pub end_deg: f32,
}

pub trait Canvas {
    type Error;

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), Self::Error>;

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        width: u32,
        color: Rgb565,
    ) -> Result<(), Self::Error>;

    fn fill_arc(&mut self, arc: ArcSpec, color: Rgb565) -> Result<(), Self::Error>;

    /// Draw `text` centered in `slot`, shrinking the font if it does not fit.
    fn draw_text(&mut self, text: &str, slot: &TextSlot, color: Rgb565)
    -> Result<(), Self::Error>;
}

/// Point at `radius` from `center` along the clock angle `clock_deg`.
pub fn clock_point(center: Point, radius: f32, clock_deg: f32) -> Point {
    let rad = F32(clock_deg.to_radians());
    let dx = F32(radius * rad.sin().0).round().0 as i32;
    let dy = F32(radius * rad.cos().0).round().0 as i32;
    Point::new(center.x + dx, center.y - dy)
}

/// [`Canvas`] over an `embedded-graphics` draw target.
pub struct EgCanvas<'a, D> {
    target: &'a mut D,
}

impl<'a, D> EgCanvas<'a, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'a mut D) -> Self {
        Self { target }
    }
}

impl<D> Canvas for EgCanvas<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Error = D::Error;

    fn fill_rect(&mut self, rect: Rectangle, color: Rgb565) -> Result<(), D::Error> {
        rect.into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.target)
    }

    fn fill_circle(&mut self, center: Point, radius: u32, color: Rgb565) -> Result<(), D::Error> {
        Circle::with_center(center, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(color))
            .draw(self.target)
    }

    fn draw_line(
        &mut self,
        from: Point,
        to: Point,
        width: u32,
        color: Rgb565,
    ) -> Result<(), D::Error> {
        Line::new(from, to)
            .into_styled(PrimitiveStyle::with_stroke(color, width))
            .draw(self.target)
    }

    fn fill_arc(&mut self, arc: ArcSpec, color: Rgb565) -> Result<(), D::Error> {
        let sweep = arc.end_deg - arc.start_deg;
        if arc.thickness == 0 || arc.radius == 0 || sweep <= 0.0 {
            return Ok(());
        }

        let style = PrimitiveStyleBuilder::new()
            .stroke_color(color)
            .stroke_width(arc.thickness)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();

        // embedded-graphics measures from three o'clock
        Arc::with_center(
            arc.center,
            arc.radius * 2,
            Angle::from_degrees(arc.start_deg - 90.0),
            Angle::from_degrees(sweep),
        )
        .into_styled(style)
        .draw(self.target)
    }

    fn draw_text(&mut self, text: &str, slot: &TextSlot, color: Rgb565) -> Result<(), D::Error> {
        text::draw_centered(self.target, text, slot, color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_point_cardinal_directions() {
        let c = Point::new(50, 50);
        assert_eq!(clock_point(c, 10.0, 0.0), Point::new(50, 40));
        assert_eq!(clock_point(c, 10.0, 90.0), Point::new(60, 50));
        assert_eq!(clock_point(c, 10.0, 270.0), Point::new(40, 50));
        assert_eq!(clock_point(c, 10.0, 450.0), Point::new(60, 50));
        assert_eq!(clock_point(c, 10.0, 360.0), Point::new(50, 40));
    }
}
