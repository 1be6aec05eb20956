//! Radial target gauge and linear underbar.
//!
//! The gauge is the upper half of a ring with its hub at the bottom center
//! of the gauge rectangle. Position `t = 0` sits at nine o'clock, `t = 1` at
//! three o'clock, sweeping over twelve.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use micromath::F32;

use crate::colors::Palette;
use crate::constants::{
    GAUGE_MARGIN_PX, GAUGE_MIN_THICKNESS_PX, GAUGE_START_DEG, GAUGE_SWEEP_DEG, HUB_MIN_RADIUS_PX,
    NEEDLE_SHADOW_WIDTH_PX, NEEDLE_WIDTH_PX, TICK_WIDTH_PX,
};
use crate::render::{ArcSpec, Canvas, clock_point};
use crate::zone::ZoneEvaluation;

/// Ring geometry fitted into a gauge rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GaugeGeometry {
    pub center: Point,
    pub radius: u32,
    pub thickness: u32,
    pub hub_radius: u32,
}

impl GaugeGeometry {
    /// Fit the ring into `bounds`, or `None` if it is too small to draw.
    pub fn fit(bounds: Rectangle) -> Option<Self> {
        let width = bounds.size.width;
        let height = bounds.size.height;

        let by_width = (width / 2).saturating_sub(GAUGE_MARGIN_PX);
        // Leave room below the center for the hub
        let by_height = height.saturating_sub(GAUGE_MARGIN_PX) * 10 / 11;
        let radius = by_width.min(by_height);
        if radius < GAUGE_MIN_THICKNESS_PX * 2 {
            return None;
        }

        let hub_radius = (radius / 10).max(HUB_MIN_RADIUS_PX);
        let center = Point::new(
            bounds.top_left.x + (width / 2) as i32,
            bounds.top_left.y + (GAUGE_MARGIN_PX + radius) as i32,
        );

        Some(Self {
            center,
            radius,
            thickness: (radius / 6).max(GAUGE_MIN_THICKNESS_PX),
            hub_radius,
        })
    }

    /// Clock angle for gauge position `t`.
    pub fn angle_at(t: f32) -> f32 {
        GAUGE_START_DEG + GAUGE_SWEEP_DEG * t.clamp(0.0, 1.0)
    }

    /// Point at gauge position `t`, `radius` px from the center.
    pub fn point_at(&self, t: f32, radius: f32) -> Point {
        clock_point(self.center, radius, Self::angle_at(t))
    }

    fn arc(&self, from_t: f32, to_t: f32) -> ArcSpec {
        ArcSpec {
            center: self.center,
            radius: self.radius,
            thickness: self.thickness,
            start_deg: Self::angle_at(from_t),
            end_deg: Self::angle_at(to_t),
        }
    }
}

/// Color of the needle and underbar for `eval`.
pub fn needle_color(eval: &ZoneEvaluation, palette: &Palette) -> Rgb565 {
    eval.reading
        .map(|reading| palette.zone(reading.zone))
        .unwrap_or(palette.idle)
}

/// Draw the gauge for `eval` inside `bounds`.
pub fn draw_gauge<C: Canvas>(
    canvas: &mut C,
    bounds: Rectangle,
    eval: &ZoneEvaluation,
    palette: &Palette,
) -> Result<(), C::Error> {
    let Some(geometry) = GaugeGeometry::fit(bounds) else {
        return Ok(());
    };

    // Track and target band
    canvas.fill_arc(geometry.arc(0.0, 1.0), palette.track)?;
    let (band_lo, band_hi) = eval.band;
    if band_hi > band_lo {
        canvas.fill_arc(geometry.arc(band_lo, band_hi), palette.band)?;
    }

    // Band midpoint tick across the ring
    let outer = geometry.radius as f32;
    let inner = outer - geometry.thickness as f32 - 2.0;
    let mid = eval.band_mid();
    canvas.draw_line(
        geometry.point_at(mid, inner),
        geometry.point_at(mid, outer),
        TICK_WIDTH_PX,
        palette.tick,
    )?;

    // Needle: shadow first, then the zone-colored stroke
    let tip = geometry.point_at(eval.t, outer - geometry.thickness as f32 / 2.0);
    canvas.draw_line(geometry.center, tip, NEEDLE_SHADOW_WIDTH_PX, palette.shadow)?;
    canvas.draw_line(geometry.center, tip, NEEDLE_WIDTH_PX, needle_color(eval, palette))?;

    canvas.fill_circle(geometry.center, geometry.hub_radius, palette.hub)
}

/// Draw the linear underbar, filled to `t`.
pub fn draw_underbar<C: Canvas>(
    canvas: &mut C,
    bar: Rectangle,
    t: f32,
    color: Rgb565,
    palette: &Palette,
) -> Result<(), C::Error> {
    if bar.is_zero_sized() {
        return Ok(());
    }

    canvas.fill_rect(bar, palette.track)?;

    let filled = F32(bar.size.width as f32 * t.clamp(0.0, 1.0)).round().0 as u32;
    if filled > 0 {
        canvas.fill_rect(
            Rectangle::new(bar.top_left, Size::new(filled.min(bar.size.width), bar.size.height)),
            color,
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{ZONE_IN, ZONE_NEAR, ZONE_OUT};
    use crate::render::recording::{DrawOp, RecordingCanvas};
    use crate::zone::{TargetKind, TargetSpec};

    fn eval(current: Option<u32>) -> ZoneEvaluation {
        let target = TargetSpec {
            kind: TargetKind::Power,
            lo: 100,
            hi: 150,
        };
        ZoneEvaluation::evaluate(&target, current).unwrap()
    }

    fn gauge_rect() -> Rectangle {
        Rectangle::new(Point::new(6, 4), Size::new(132, 84))
    }

    #[test]
    fn test_geometry_fits_bounds() {
        let g = GaugeGeometry::fit(gauge_rect()).unwrap();
        // width limits to 64, height to (84 - 2) * 10 / 11 = 74
        assert_eq!(g.radius, 64);
        assert_eq!(g.center, Point::new(72, 70));
        assert_eq!(g.thickness, 10);
        assert_eq!(g.hub_radius, 6);

        // Ring top and hub bottom stay inside
        assert!(g.center.y - g.radius as i32 >= 4);
        assert!(g.center.y + g.hub_radius as i32 <= 4 + 84);
    }

    #[test]
    fn test_geometry_too_small() {
        assert_eq!(GaugeGeometry::fit(Rectangle::new(Point::zero(), Size::new(20, 10))), None);
        assert_eq!(GaugeGeometry::fit(Rectangle::zero()), None);
    }

    #[test]
    fn test_angles_span_over_twelve() {
        assert_eq!(GaugeGeometry::angle_at(0.0), 270.0);
        assert_eq!(GaugeGeometry::angle_at(0.5), 360.0);
        assert_eq!(GaugeGeometry::angle_at(1.0), 450.0);
        assert_eq!(GaugeGeometry::angle_at(3.0), 450.0);
    }

    #[test]
    fn test_draw_gauge_layers() {
        let mut canvas = RecordingCanvas::new();
        let palette = Palette::COLOR;
        draw_gauge(&mut canvas, gauge_rect(), &eval(Some(125)), &palette).unwrap();

        let arcs: alloc::vec::Vec<_> = canvas.arcs().collect();
        assert_eq!(arcs.len(), 2);
        assert_eq!((arcs[0].0.start_deg, arcs[0].0.end_deg), (270.0, 450.0));
        assert_eq!(arcs[0].1, palette.track);
        assert!(arcs[1].0.start_deg > 270.0 && arcs[1].0.end_deg < 450.0);
        assert_eq!(arcs[1].1, palette.band);

        let lines: alloc::vec::Vec<_> = canvas.lines().collect();
        assert_eq!(lines.len(), 3);
        // Needle shadow sits under the colored needle
        assert_eq!(lines[1].3, palette.shadow);
        assert_eq!(lines[2].3, ZONE_IN);
        assert!(lines[1].2 > lines[2].2);
        // t = 0.5 points straight up
        assert_eq!(lines[2].1.x, 72);
        assert!(lines[2].1.y < 70);

        assert!(matches!(canvas.ops.last(), Some(DrawOp::Circle { .. })));
    }

    #[test]
    fn test_needle_color_by_zone() {
        let palette = Palette::COLOR;
        assert_eq!(needle_color(&eval(Some(160)), &palette), ZONE_NEAR);
        assert_eq!(needle_color(&eval(Some(300)), &palette), ZONE_OUT);
        assert_eq!(needle_color(&eval(None), &palette), palette.idle);
    }

    #[test]
    fn test_needle_rests_at_start_without_sample() {
        let mut canvas = RecordingCanvas::new();
        draw_gauge(&mut canvas, gauge_rect(), &eval(None), &Palette::COLOR).unwrap();
        let needle = canvas.lines().last().unwrap();
        // Nine o'clock: level with the hub, left of it
        assert_eq!(needle.1.y, 70);
        assert!(needle.1.x < 72);
    }

    #[test]
    fn test_underbar_fill() {
        let mut canvas = RecordingCanvas::new();
        let bar = Rectangle::new(Point::new(6, 116), Size::new(132, 4));
        draw_underbar(&mut canvas, bar, 0.25, ZONE_IN, &Palette::COLOR).unwrap();

        let rects: alloc::vec::Vec<_> = canvas.rects().collect();
        assert_eq!(rects.len(), 2);
        assert_eq!(rects[0].0, bar);
        assert_eq!(rects[1].0.size, Size::new(33, 4));
        assert_eq!(rects[1].1, ZONE_IN);

        canvas.clear();
        draw_underbar(&mut canvas, bar, 0.0, ZONE_IN, &Palette::COLOR).unwrap();
        assert_eq!(canvas.rects().count(), 1);
    }
}
