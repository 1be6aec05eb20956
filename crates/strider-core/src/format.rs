//! Display formatting for raw metric encodings.
//!
//! Every function here is pure and total: a missing or unusable value always
//! renders as [`PLACEHOLDER`], never as an empty string.
//!
//! Pace arrives as speed in m/s × 100. Conversions to minutes per unit
//! distance are done in integer arithmetic so that the same input renders
//! identically on every target, with or without an FPU.

use core::fmt::Write;

use heapless::String;

use crate::settings::Units;

/// Literal shown for any value that is absent or cannot be displayed.
pub const PLACEHOLDER: &str = "-";

/// Meters per statute mile, scaled by 1000 (1609.344 m).
const MILLIMETERS_PER_MILE: u64 = 1_609_344;

/// Capacity of every formatted value string.
pub const VALUE_LEN: usize = 20;

/// A formatted, stack-allocated display string.
pub type ValueText = String<VALUE_LEN>;

fn placeholder() -> ValueText {
    let mut text = ValueText::new();
    text.push_str(PLACEHOLDER).ok();
    text
}

/// Format a cumulative distance in meters.
///
/// Metric output truncates to hundredths of a kilometer (`"1.23 km"`).
/// Imperial output rounds to the nearest hundredth of a mile (`"0.77 mi"`).
pub fn format_distance(meters: u32, units: Units) -> ValueText {
    let mut text = ValueText::new();
    match units {
        Units::Metric => {
            let whole = meters / 1000;
            let frac = (meters % 1000) / 10;
            write!(text, "{}.{:02} km", whole, frac).ok();
        }
        Units::Imperial => {
            let miles_x100 = (u64::from(meters) * 100_000 + MILLIMETERS_PER_MILE / 2)
                / MILLIMETERS_PER_MILE;
            write!(text, "{}.{:02} mi", miles_x100 / 100, miles_x100 % 100).ok();
        }
    }
    text
}

/// Minutes and seconds per unit distance for a speed in m/s × 100.
///
/// Returns `None` for speeds that are zero or too small to be meaningful.
/// Seconds are rounded to the nearest whole second; a rounded value of 60
/// carries into the minute.
pub fn pace_parts(speed_x100: u16, units: Units) -> Option<(u32, u32)> {
    if speed_x100 <= 1 {
        return None;
    }

    // seconds per unit = distance_mm / (speed_x100 * 10)
    let distance_mm: u64 = match units {
        Units::Metric => 1_000_000,
        Units::Imperial => MILLIMETERS_PER_MILE,
    };
    let divisor = u64::from(speed_x100) * 10;

    let mut minutes = distance_mm / (divisor * 60);
    let rounded_total = (distance_mm + divisor / 2) / divisor;
    let mut seconds = rounded_total.saturating_sub(minutes * 60);
    if seconds >= 60 {
        minutes += seconds / 60;
        seconds %= 60;
    }

    Some((minutes as u32, seconds as u32))
}

/// Pace with unit suffix, e.g. `5'33"/km`.
pub fn format_pace(speed_x100: u16, units: Units) -> ValueText {
    let Some((minutes, seconds)) = pace_parts(speed_x100, units) else {
        return placeholder();
    };

    let mut text = ValueText::new();
    write!(
        text,
        "{}'{:02}\"/{}",
        minutes,
        seconds,
        units.distance_suffix()
    )
    .ok();
    text
}

/// Numeric-only pace, e.g. `5:33`. The unit is shown separately in a label.
pub fn format_pace_value_only(speed_x100: u16, units: Units) -> ValueText {
    let Some((minutes, seconds)) = pace_parts(speed_x100, units) else {
        return placeholder();
    };

    let mut text = ValueText::new();
    write!(text, "{}:{:02}", minutes, seconds).ok();
    text
}

/// Plain integer, used for heart rate and power.
pub fn format_integer(value: u32) -> ValueText {
    let mut text = ValueText::new();
    write!(text, "{}", value).ok();
    text
}

/// Cadence with its `spm` suffix.
pub fn format_cadence(value: u32) -> ValueText {
    let mut text = ValueText::new();
    write!(text, "{} spm", value).ok();
    text
}

/// Formats `value` with `format` when present, [`PLACEHOLDER`] otherwise.
pub fn or_placeholder<T>(value: Option<T>, format: impl FnOnce(T) -> ValueText) -> ValueText {
    value.map(format).unwrap_or_else(placeholder)
}
