//! Free-run and workout screens.

use core::fmt::Write;

use crate::colors::Palette;
use crate::format::{
    PLACEHOLDER, ValueText, format_integer, format_pace, format_pace_value_only, or_placeholder,
};
use crate::layout::{GridCellLayout, HeroLayout, WorkoutLayout};
use crate::metrics::{MetricCell, MetricId, MetricStore};
use crate::render::gauge::{draw_gauge, draw_underbar, needle_color};
use crate::render::Canvas;
use crate::settings::Units;
use crate::zone::{TargetKind, ZoneEvaluation};

pub fn draw_hero<C: Canvas>(
    canvas: &mut C,
    layout: &HeroLayout,
    label: &str,
    value: &str,
    palette: &Palette,
) -> Result<(), C::Error> {
    canvas.draw_text(label, &layout.label, palette.label)?;
    canvas.draw_text(value, &layout.value, palette.text)
}

pub fn draw_grid_cell<C: Canvas>(
    canvas: &mut C,
    layout: &GridCellLayout,
    cell: &MetricCell,
    palette: &Palette,
) -> Result<(), C::Error> {
    let value_color = if cell.present {
        palette.text
    } else {
        palette.idle
    };
    canvas.draw_text(cell.label, &layout.label, palette.label)?;
    canvas.draw_text(&cell.value, &layout.value, value_color)
}

/// Text shown on the workout screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutText {
    /// Large numeric value under the gauge
    pub readout: ValueText,
    /// Current value, target band, heart rate
    pub lines: [ValueText; 3],
}

impl WorkoutText {
    pub fn new(kind: TargetKind, eval: &ZoneEvaluation, metrics: &MetricStore, units: Units) -> Self {
        let current = kind.metric().and_then(|id| metrics.get(id));

        let (readout, current_line, band_line) = match kind {
            TargetKind::Pace => (
                or_placeholder(current, |v| format_pace_value_only(v as u16, units)),
                or_placeholder(current, |v| format_pace(v as u16, units)),
                pace_band(eval.low, eval.high, units),
            ),
            _ => (
                or_placeholder(current, format_integer),
                or_placeholder(current, |v| {
                    let mut text = ValueText::new();
                    write!(text, "{} W", v).ok();
                    text
                }),
                power_band(eval.low, eval.high),
            ),
        };

        let mut hr_line = ValueText::new();
        match metrics.get(MetricId::HeartRate) {
            Some(bpm) => write!(hr_line, "HR {}", bpm).ok(),
            None => write!(hr_line, "HR {}", PLACEHOLDER).ok(),
        };

        Self {
            readout,
            lines: [current_line, band_line, hr_line],
        }
    }
}

fn power_band(low: u16, high: u16) -> ValueText {
    let mut text = ValueText::new();
    write!(text, "{}-{} W", low, high).ok();
    text
}

/// Pace band with the faster pace (higher speed) first.
fn pace_band(low: u16, high: u16, units: Units) -> ValueText {
    let fast = format_pace_value_only(high, units);
    let slow = format_pace_value_only(low, units);
    let mut text = ValueText::new();
    write!(text, "{}-{}/{}", fast, slow, units.distance_suffix()).ok();
    text
}

pub fn draw_workout<C: Canvas>(
    canvas: &mut C,
    layout: &WorkoutLayout,
    eval: &ZoneEvaluation,
    text: &WorkoutText,
    palette: &Palette,
) -> Result<(), C::Error> {
    let color = needle_color(eval, palette);

    draw_gauge(canvas, layout.gauge, eval, palette)?;
    canvas.draw_text(&text.readout, &layout.readout, palette.text)?;
    draw_underbar(canvas, layout.bar, eval.t, color, palette)?;

    for (slot, line) in layout.lines.iter().zip(text.lines.iter()) {
        canvas.draw_text(line, slot, palette.text)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::TargetSpec;

    fn eval(kind: TargetKind, lo: u16, hi: u16, current: Option<u32>) -> ZoneEvaluation {
        ZoneEvaluation::evaluate(&TargetSpec { kind, lo, hi }, current).unwrap()
    }

    #[test]
    fn test_power_workout_text() {
        let mut metrics = MetricStore::new();
        metrics.set(MetricId::Power, 212);
        metrics.set(MetricId::HeartRate, 148);

        let e = eval(TargetKind::Power, 250, 200, metrics.get(MetricId::Power));
        let text = WorkoutText::new(TargetKind::Power, &e, &metrics, Units::Metric);
        assert_eq!(text.readout.as_str(), "212");
        assert_eq!(text.lines[0].as_str(), "212 W");
        assert_eq!(text.lines[1].as_str(), "200-250 W");
        assert_eq!(text.lines[2].as_str(), "HR 148");
    }

    #[test]
    fn test_pace_workout_text_lists_faster_first() {
        let mut metrics = MetricStore::new();
        metrics.set(MetricId::Pace, 300);

        let e = eval(TargetKind::Pace, 300, 400, metrics.get(MetricId::Pace));
        let text = WorkoutText::new(TargetKind::Pace, &e, &metrics, Units::Metric);
        assert_eq!(text.readout.as_str(), "5:33");
        assert_eq!(text.lines[0].as_str(), "5'33\"/km");
        assert_eq!(text.lines[1].as_str(), "4:10-5:33/km");
        assert_eq!(text.lines[2].as_str(), "HR -");
    }

    #[test]
    fn test_workout_text_without_samples() {
        let metrics = MetricStore::new();
        let e = eval(TargetKind::Power, 100, 150, None);
        let text = WorkoutText::new(TargetKind::Power, &e, &metrics, Units::Imperial);
        assert_eq!(text.readout.as_str(), PLACEHOLDER);
        assert_eq!(text.lines[0].as_str(), PLACEHOLDER);
        assert_eq!(text.lines[1].as_str(), "100-150 W");
    }
}
