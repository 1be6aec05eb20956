//! Layout, gauge and input tuning constants

// ============================================================================
// Screen Insets
// ============================================================================

/// Top inset on round displays in pixels
pub const ROUND_INSET_TOP_PX: u32 = 8;

/// Left/right inset on round displays in pixels
pub const ROUND_INSET_SIDE_PX: u32 = 10;

/// Top inset on rectangular displays in pixels
pub const RECT_INSET_TOP_PX: u32 = 4;

/// Left/right inset on rectangular displays in pixels
pub const RECT_INSET_SIDE_PX: u32 = 6;

/// Bottom inset on every display in pixels
pub const INSET_BOTTOM_PX: u32 = 4;

// ============================================================================
// Free-run Layout
// ============================================================================

/// Share of the content height given to the hero in grid focus
pub const GRID_HERO_HEIGHT_PCT: u32 = 42;

/// Minimum hero height in grid focus in pixels
pub const GRID_HERO_MIN_HEIGHT_PX: u32 = 52;

/// Number of columns in the metric grid
pub const GRID_COLUMNS: usize = 2;

/// Minimum height of a grid cell in pixels
pub const GRID_CELL_MIN_HEIGHT_PX: u32 = 26;

/// Share of a grid cell given to its label
pub const GRID_LABEL_HEIGHT_PCT: u32 = 40;

/// Hero label height as a share of the hero region
pub const HERO_LABEL_HEIGHT_PCT: u32 = 30;

/// Hero label height bounds in pixels
pub const HERO_LABEL_MIN_HEIGHT_PX: u32 = 12;
pub const HERO_LABEL_MAX_HEIGHT_PX: u32 = 24;

// ============================================================================
// Workout Layout
// ============================================================================

/// Share of the content height given to the gauge
pub const WORKOUT_GAUGE_HEIGHT_PCT: u32 = 60;

/// Height of the numeric readout under the gauge in pixels
pub const WORKOUT_READOUT_HEIGHT_PX: u32 = 26;

/// Height of the progress underbar in pixels
pub const WORKOUT_BAR_HEIGHT_PX: u32 = 4;

/// Vertical gap around the progress underbar in pixels
pub const WORKOUT_BAR_GAP_PX: u32 = 2;

/// Height of each workout text line in pixels
pub const WORKOUT_LINE_HEIGHT_PX: u32 = 14;

/// Number of workout text lines (current, band, heart rate)
pub const WORKOUT_LINE_COUNT: usize = 3;

// ============================================================================
// Gauge Geometry
// ============================================================================

/// Clock angle of the gauge's low end (0 at twelve o'clock, clockwise)
pub const GAUGE_START_DEG: f32 = 270.0;

/// Angular span of the gauge
pub const GAUGE_SWEEP_DEG: f32 = 180.0;

/// Gap between the gauge rectangle edge and the arc in pixels
pub const GAUGE_MARGIN_PX: u32 = 2;

/// Minimum arc stroke thickness in pixels
pub const GAUGE_MIN_THICKNESS_PX: u32 = 6;

/// Needle stroke widths in pixels
pub const NEEDLE_WIDTH_PX: u32 = 3;
pub const NEEDLE_SHADOW_WIDTH_PX: u32 = 5;

/// Minimum hub radius in pixels
pub const HUB_MIN_RADIUS_PX: u32 = 3;

/// Band midpoint tick width in pixels
pub const TICK_WIDTH_PX: u32 = 2;

/// Domain half-width around the band center, as a share of the center
pub const DOMAIN_HALF_SPAN_PCT: u32 = 50;

/// Distance from the band still considered "near", as a share of the center
pub const NEAR_ZONE_PCT: u32 = 10;

// ============================================================================
// Input
// ============================================================================

/// Hold time after which SELECT becomes a long press
pub const LONG_PRESS_MS: u64 = 500;
