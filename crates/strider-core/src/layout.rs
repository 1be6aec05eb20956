//! Screen geometry.
//!
//! [`compute`] is a pure function of the view, the focus mode, the display
//! shape and the currently available area (which shrinks while the system
//! obstructs part of the screen). The grid also depends on the hero selection
//! and on which channels have data. Nothing here draws.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::config::PlatformShape;
use crate::constants::*;
use crate::metrics::{METRIC_COUNT, MetricId};
use crate::settings::{FocusMode, HeroMetric};
use crate::view::View;

/// Maximum number of grid cells (every metric except the hero).
pub const MAX_GRID_CELLS: usize = METRIC_COUNT - 1;

/// Text sizes, smallest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FontSize {
    Tiny,
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl FontSize {
    /// The next size down, if any.
    pub const fn smaller(self) -> Option<Self> {
        match self {
            Self::Tiny => None,
            Self::Small => Some(Self::Tiny),
            Self::Medium => Some(Self::Small),
            Self::Large => Some(Self::Medium),
            Self::ExtraLarge => Some(Self::Large),
        }
    }
}

/// Label font for a slot of `height` pixels.
pub fn label_font(height: u32, hero: bool) -> FontSize {
    match (hero, height) {
        (true, h) if h >= 22 => FontSize::Large,
        (_, h) if h >= 18 => FontSize::Medium,
        _ => FontSize::Small,
    }
}

/// Hero value font for a slot of `height` pixels.
pub fn hero_value_font(height: u32, focus: FocusMode) -> FontSize {
    let threshold = match focus {
        FocusMode::HeroOnly => 38,
        FocusMode::Grid => 56,
    };
    if height >= threshold {
        FontSize::ExtraLarge
    } else {
        FontSize::Large
    }
}

/// Grid value font for a slot of `height` pixels.
pub fn grid_value_font(height: u32) -> FontSize {
    match height {
        h if h >= 34 => FontSize::Large,
        h if h >= 26 => FontSize::Medium,
        h if h >= 20 => FontSize::Small,
        _ => FontSize::Tiny,
    }
}

// ---------------------------------------------------------------------------
// Frame types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSlot {
    pub bounds: Rectangle,
    pub font: FontSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeroLayout {
    pub bounds: Rectangle,
    pub label: TextSlot,
    pub value: TextSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCellLayout {
    pub id: MetricId,
    pub bounds: Rectangle,
    pub label: TextSlot,
    pub value: TextSlot,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkoutLayout {
    pub gauge: Rectangle,
    pub readout: TextSlot,
    pub bar: Rectangle,
    /// Current value, target band, heart rate
    pub lines: [TextSlot; WORKOUT_LINE_COUNT],
}

/// Rectangles for every element of one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutFrame {
    Workout(WorkoutLayout),
    HeroOnly(HeroLayout),
    Grid {
        hero: HeroLayout,
        cells: Vec<GridCellLayout, MAX_GRID_CELLS>,
    },
}

/// Everything the layout depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutInput {
    pub view: View,
    pub focus: FocusMode,
    pub shape: PlatformShape,
    /// Unobstructed part of the screen
    pub area: Rectangle,
    pub hero: HeroMetric,
    /// Channel presence indexed by [`MetricId::index`]
    pub presence: [bool; METRIC_COUNT],
}

/// Compute the frame for `input`.
pub fn compute(input: &LayoutInput) -> LayoutFrame {
    let content = input.shape.insets().apply(input.area);

    match (input.view, input.focus) {
        (View::Workout, _) => LayoutFrame::Workout(workout_layout(content)),
        (View::FreeRun, FocusMode::HeroOnly) => {
            LayoutFrame::HeroOnly(hero_layout(content, FocusMode::HeroOnly))
        }
        (View::FreeRun, FocusMode::Grid) => {
            let hero_h = (content.size.height * GRID_HERO_HEIGHT_PCT / 100)
                .max(GRID_HERO_MIN_HEIGHT_PX)
                .min(content.size.height);
            let hero = hero_layout(row(content, 0, hero_h), FocusMode::Grid);

            let grid = row(content, hero_h, content.size.height - hero_h);
            let ids = grid_metrics(input.hero, &input.presence);
            LayoutFrame::Grid {
                hero,
                cells: grid_cells(grid, &ids),
            }
        }
    }
}

/// Non-hero metrics shown in the grid, in channel order.
///
/// Falls back to the first two non-hero metrics of pace, distance and
/// cadence when no non-hero channel has data yet.
pub fn grid_metrics(hero: HeroMetric, presence: &[bool; METRIC_COUNT]) -> Vec<MetricId, MAX_GRID_CELLS> {
    let hero_id = hero.metric_id();
    let mut ids = Vec::new();

    for id in MetricId::ALL {
        if id != hero_id && presence[id.index()] {
            ids.push(id).ok();
        }
    }

    if ids.is_empty() {
        for id in [MetricId::Pace, MetricId::Distance, MetricId::Cadence]
            .into_iter()
            .filter(|&id| id != hero_id)
            .take(2)
        {
            ids.push(id).ok();
        }
    }

    ids
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Horizontal band of `outer` starting `offset` px from its top, clipped to it.
fn row(outer: Rectangle, offset: u32, height: u32) -> Rectangle {
    let offset = offset.min(outer.size.height);
    let height = height.min(outer.size.height - offset);
    Rectangle::new(
        outer.top_left + Point::new(0, offset as i32),
        Size::new(outer.size.width, height),
    )
}

fn hero_layout(bounds: Rectangle, focus: FocusMode) -> HeroLayout {
    let h = bounds.size.height;
    let label_h = (h * HERO_LABEL_HEIGHT_PCT / 100)
        .clamp(HERO_LABEL_MIN_HEIGHT_PX, HERO_LABEL_MAX_HEIGHT_PX)
        .min(h);
    let value_h = h - label_h;

    HeroLayout {
        bounds,
        label: TextSlot {
            bounds: row(bounds, 0, label_h),
            font: label_font(label_h, true),
        },
        value: TextSlot {
            bounds: row(bounds, label_h, value_h),
            font: hero_value_font(value_h, focus),
        },
    }
}

fn grid_cells(grid: Rectangle, ids: &[MetricId]) -> Vec<GridCellLayout, MAX_GRID_CELLS> {
    let mut cells = Vec::new();

    let rows_needed = ids.len().div_ceil(GRID_COLUMNS) as u32;
    let rows_fit = grid.size.height / GRID_CELL_MIN_HEIGHT_PX;
    let rows = rows_needed.min(rows_fit);
    if rows == 0 {
        return cells;
    }

    let count = ids.len().min(rows as usize * GRID_COLUMNS);
    let cell_h = grid.size.height / rows;
    let col_w = grid.size.width / GRID_COLUMNS as u32;

    for (i, &id) in ids.iter().take(count).enumerate() {
        let r = (i / GRID_COLUMNS) as u32;
        let c = (i % GRID_COLUMNS) as u32;
        // A lone cell in the last row spans the full width
        let alone = i + 1 == count && c == 0;
        let width = if alone { grid.size.width } else { col_w };

        let bounds = Rectangle::new(
            grid.top_left + Point::new((c * col_w) as i32, (r * cell_h) as i32),
            Size::new(width, cell_h),
        );
        let label_h = cell_h * GRID_LABEL_HEIGHT_PCT / 100;
        let value_h = cell_h - label_h;

        cells
            .push(GridCellLayout {
                id,
                bounds,
                label: TextSlot {
                    bounds: row(bounds, 0, label_h),
                    font: label_font(label_h, false),
                },
                value: TextSlot {
                    bounds: row(bounds, label_h, value_h),
                    font: grid_value_font(value_h),
                },
            })
            .ok();
    }

    cells
}

fn workout_layout(content: Rectangle) -> WorkoutLayout {
    let h = content.size.height;
    let stack = WORKOUT_READOUT_HEIGHT_PX
        + WORKOUT_BAR_GAP_PX * 2
        + WORKOUT_BAR_HEIGHT_PX
        + WORKOUT_LINE_HEIGHT_PX * WORKOUT_LINE_COUNT as u32;
    let gauge_h = (h * WORKOUT_GAUGE_HEIGHT_PCT / 100).min(h.saturating_sub(stack));

    let mut y = 0;
    let gauge = row(content, y, gauge_h);
    y += gauge_h;

    let readout = TextSlot {
        bounds: row(content, y, WORKOUT_READOUT_HEIGHT_PX),
        font: FontSize::Large,
    };
    y += WORKOUT_READOUT_HEIGHT_PX + WORKOUT_BAR_GAP_PX;

    let bar = row(content, y, WORKOUT_BAR_HEIGHT_PX);
    y += WORKOUT_BAR_HEIGHT_PX + WORKOUT_BAR_GAP_PX;

    let lines = core::array::from_fn(|i| TextSlot {
        bounds: row(content, y + i as u32 * WORKOUT_LINE_HEIGHT_PX, WORKOUT_LINE_HEIGHT_PX),
        font: FontSize::Small,
    });

    WorkoutLayout {
        gauge,
        readout,
        bar,
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DisplayConfig;

    fn input(view: View, focus: FocusMode, presence: [bool; METRIC_COUNT]) -> LayoutInput {
        LayoutInput {
            view,
            focus,
            shape: PlatformShape::Rectangular,
            area: DisplayConfig::RECT_COLOR.bounds(),
            hero: HeroMetric::HeartRate,
            presence,
        }
    }

    fn contains(outer: &Rectangle, inner: &Rectangle) -> bool {
        if inner.size.width == 0 || inner.size.height == 0 {
            return true;
        }
        match (outer.bottom_right(), inner.bottom_right()) {
            (Some(ob), Some(ib)) => {
                inner.top_left.x >= outer.top_left.x
                    && inner.top_left.y >= outer.top_left.y
                    && ib.x <= ob.x
                    && ib.y <= ob.y
            }
            _ => false,
        }
    }

    fn overlaps(a: &Rectangle, b: &Rectangle) -> bool {
        !a.intersection(b).is_zero_sized()
    }

    fn assert_grid_sound(frame: &LayoutFrame, area: Rectangle) {
        let LayoutFrame::Grid { hero, cells } = frame else {
            panic!("expected grid layout, got {:?}", frame);
        };
        assert!(contains(&area, &hero.bounds));
        for (i, a) in cells.iter().enumerate() {
            assert!(contains(&area, &a.bounds), "cell {:?} outside {:?}", a.bounds, area);
            assert!(!overlaps(&a.bounds, &hero.bounds));
            for b in cells.iter().skip(i + 1) {
                assert!(!overlaps(&a.bounds, &b.bounds), "{:?} overlaps {:?}", a.bounds, b.bounds);
            }
        }
    }

    #[test]
    fn test_layout_is_pure() {
        let i = input(View::FreeRun, FocusMode::Grid, [true; METRIC_COUNT]);
        assert_eq!(compute(&i), compute(&i));
    }

    #[test]
    fn test_grid_with_every_metric() {
        let i = input(View::FreeRun, FocusMode::Grid, [true; METRIC_COUNT]);
        let frame = compute(&i);
        assert_grid_sound(&frame, i.area);

        let LayoutFrame::Grid { hero, cells } = frame else {
            unreachable!();
        };
        // 42% of 160 px content
        assert_eq!(hero.bounds.size.height, 67);
        assert_eq!(hero.bounds.top_left, Point::new(6, 4));
        let ids: heapless::Vec<MetricId, 4> = cells.iter().map(|c| c.id).collect();
        assert_eq!(
            ids.as_slice(),
            &[MetricId::Pace, MetricId::Cadence, MetricId::Distance, MetricId::Power]
        );
        // 93 px of grid over two rows
        assert!(cells.iter().all(|c| c.bounds.size.height == 46));
        assert!(cells.iter().all(|c| c.bounds.size.height >= GRID_CELL_MIN_HEIGHT_PX));
    }

    #[test]
    fn test_grid_hero_floor() {
        let mut i = input(View::FreeRun, FocusMode::Grid, [true; METRIC_COUNT]);
        i.area = Rectangle::new(Point::zero(), Size::new(144, 100));
        let LayoutFrame::Grid { hero, .. } = compute(&i) else {
            unreachable!();
        };
        assert_eq!(hero.bounds.size.height, GRID_HERO_MIN_HEIGHT_PX);
    }

    #[test]
    fn test_grid_fallback_placeholders() {
        let i = input(View::FreeRun, FocusMode::Grid, [false; METRIC_COUNT]);
        let LayoutFrame::Grid { cells, .. } = compute(&i) else {
            unreachable!();
        };
        let ids: heapless::Vec<MetricId, 4> = cells.iter().map(|c| c.id).collect();
        assert_eq!(ids.as_slice(), &[MetricId::Pace, MetricId::Distance]);
    }

    #[test]
    fn test_grid_fallback_skips_hero() {
        let ids = grid_metrics(HeroMetric::Pace, &[false; METRIC_COUNT]);
        assert_eq!(ids.as_slice(), &[MetricId::Distance, MetricId::Cadence]);

        // Only the hero has data: still the fallback
        let mut presence = [false; METRIC_COUNT];
        presence[MetricId::Pace.index()] = true;
        let ids = grid_metrics(HeroMetric::Pace, &presence);
        assert_eq!(ids.as_slice(), &[MetricId::Distance, MetricId::Cadence]);
    }

    #[test]
    fn test_grid_lone_last_cell_spans_row() {
        let mut presence = [false; METRIC_COUNT];
        presence[MetricId::Pace.index()] = true;
        presence[MetricId::Cadence.index()] = true;
        presence[MetricId::Distance.index()] = true;
        let i = input(View::FreeRun, FocusMode::Grid, presence);
        let frame = compute(&i);
        assert_grid_sound(&frame, i.area);

        let LayoutFrame::Grid { cells, .. } = frame else {
            unreachable!();
        };
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[2].bounds.size.width, 132);
        assert_eq!(cells[0].bounds.size.width, 66);
    }

    #[test]
    fn test_grid_drops_rows_that_do_not_fit() {
        let mut i = input(View::FreeRun, FocusMode::Grid, [true; METRIC_COUNT]);
        // 90 - 8 = 82 px content, 52 px hero, 30 px grid: one row only
        i.area = Rectangle::new(Point::zero(), Size::new(144, 90));
        let frame = compute(&i);
        assert_grid_sound(&frame, i.area);
        let LayoutFrame::Grid { cells, .. } = frame else {
            unreachable!();
        };
        assert_eq!(cells.len(), 2);

        // Too short for any row
        i.area = Rectangle::new(Point::zero(), Size::new(144, 70));
        let frame = compute(&i);
        assert_grid_sound(&frame, i.area);
        let LayoutFrame::Grid { cells, .. } = frame else {
            unreachable!();
        };
        assert!(cells.is_empty());
    }

    #[test]
    fn test_grid_sound_across_areas_and_shapes() {
        for shape in [PlatformShape::Rectangular, PlatformShape::Round] {
            for height in (0..=240).step_by(7) {
                for presence in [[true; METRIC_COUNT], [false; METRIC_COUNT]] {
                    let mut i = input(View::FreeRun, FocusMode::Grid, presence);
                    i.shape = shape;
                    i.area = Rectangle::new(Point::zero(), Size::new(180, height));
                    assert_grid_sound(&compute(&i), i.area);
                }
            }
        }
    }

    #[test]
    fn test_hero_only_fills_content() {
        let i = input(View::FreeRun, FocusMode::HeroOnly, [true; METRIC_COUNT]);
        let LayoutFrame::HeroOnly(hero) = compute(&i) else {
            panic!("expected hero-only layout");
        };
        assert_eq!(hero.bounds, Rectangle::new(Point::new(6, 4), Size::new(132, 160)));
        assert_eq!(hero.label.font, FontSize::Large);
        assert_eq!(hero.value.font, FontSize::ExtraLarge);
    }

    #[test]
    fn test_workout_ignores_focus() {
        let grid = compute(&input(View::Workout, FocusMode::Grid, [true; METRIC_COUNT]));
        let hero = compute(&input(View::Workout, FocusMode::HeroOnly, [false; METRIC_COUNT]));
        assert_eq!(grid, hero);
        assert!(matches!(grid, LayoutFrame::Workout(_)));
    }

    #[test]
    fn test_workout_stack() {
        let i = input(View::Workout, FocusMode::Grid, [true; METRIC_COUNT]);
        let LayoutFrame::Workout(w) = compute(&i) else {
            unreachable!();
        };
        // 160 px content leaves 84 px for the gauge after the 76 px stack
        assert_eq!(w.gauge, Rectangle::new(Point::new(6, 4), Size::new(132, 84)));
        assert_eq!(w.readout.bounds.top_left.y, 88);
        assert_eq!(w.bar.top_left.y, 116);
        assert_eq!(w.lines[0].bounds.top_left.y, 122);
        assert_eq!(w.lines[2].bounds.top_left.y, 150);
        assert!(contains(&i.area, &w.lines[2].bounds));

        // Tall screen: 60% cap applies
        let mut tall = i;
        tall.area = DisplayConfig::LARGE_RECT_COLOR.bounds();
        let LayoutFrame::Workout(w) = compute(&tall) else {
            unreachable!();
        };
        assert_eq!(w.gauge.size.height, 220 * 60 / 100);
    }

    #[test]
    fn test_workout_clips_to_short_area() {
        let mut i = input(View::Workout, FocusMode::Grid, [true; METRIC_COUNT]);
        i.area = Rectangle::new(Point::zero(), Size::new(144, 60));
        let LayoutFrame::Workout(w) = compute(&i) else {
            unreachable!();
        };
        assert_eq!(w.gauge.size.height, 0);
        for slot in w.lines {
            assert!(contains(&i.area, &slot.bounds));
        }
    }

    #[test]
    fn test_font_steps() {
        assert_eq!(label_font(22, true), FontSize::Large);
        assert_eq!(label_font(21, true), FontSize::Medium);
        assert_eq!(label_font(22, false), FontSize::Medium);
        assert_eq!(label_font(17, false), FontSize::Small);
        assert_eq!(hero_value_font(38, FocusMode::HeroOnly), FontSize::ExtraLarge);
        assert_eq!(hero_value_font(55, FocusMode::Grid), FontSize::Large);
        assert_eq!(grid_value_font(34), FontSize::Large);
        assert_eq!(grid_value_font(26), FontSize::Medium);
        assert_eq!(grid_value_font(20), FontSize::Small);
        assert_eq!(grid_value_font(19), FontSize::Tiny);
    }
}
