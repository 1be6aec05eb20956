//! Workout targets and zone evaluation.
//!
//! A target is a band `[low, high]` on either the power or the pace channel.
//! The gauge maps a domain of half to one-and-a-half times the band center
//! onto `t ∈ [0, 1]`; the zone classifies the live value as inside, near or
//! outside the band. [`ZoneTracker`] turns successive samples into edge
//! events so haptics fire once per genuine crossing.

use core::fmt;

use log::debug;

use crate::constants::{DOMAIN_HALF_SPAN_PCT, NEAR_ZONE_PCT};
use crate::metrics::MetricId;

/// What the target band applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetKind {
    #[default]
    None,
    Power,
    Pace,
}

impl TargetKind {
    /// Decode the wire encoding. Unknown codes clear the target.
    pub fn from_wire(value: u32) -> Self {
        match value {
            0 => Self::None,
            1 => Self::Power,
            2 => Self::Pace,
            other => {
                debug!("Unknown target kind {}, treating as none", other);
                Self::None
            }
        }
    }

    /// Channel whose live value is compared to the band.
    pub const fn metric(self) -> Option<MetricId> {
        match self {
            Self::None => None,
            Self::Power => Some(MetricId::Power),
            Self::Pace => Some(MetricId::Pace),
        }
    }
}

/// Target band as received; `lo`/`hi` may arrive in either order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TargetSpec {
    pub kind: TargetKind,
    pub lo: u16,
    pub hi: u16,
}

impl TargetSpec {
    pub const fn is_active(&self) -> bool {
        !matches!(self.kind, TargetKind::None)
    }

    /// `(low, high)` with `low <= high`.
    pub fn normalized(&self) -> (u16, u16) {
        (self.lo.min(self.hi), self.lo.max(self.hi))
    }
}

// ---------------------------------------------------------------------------
// Domain
// ---------------------------------------------------------------------------

/// Value range mapped onto the full gauge sweep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaugeDomain {
    pub min: f32,
    pub max: f32,
}

impl GaugeDomain {
    /// Domain centered on the band, never empty.
    pub fn for_band(low: u16, high: u16) -> Self {
        let center = (f32::from(low) + f32::from(high)) / 2.0;
        let half = center * DOMAIN_HALF_SPAN_PCT as f32 / 100.0;
        let min = center - half;
        let mut max = center + half;
        if max <= min {
            max = min + 1.0;
        }
        Self { min, max }
    }

    /// Normalized position of `value`, clamped to `[0, 1]`.
    pub fn position(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }
}

// ---------------------------------------------------------------------------
// Zone classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    In,
    Near,
    Out,
}

/// Which side of the band a value outside it falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Below,
    Above,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneReading {
    pub zone: Zone,
    /// `None` while inside the band
    pub side: Option<Side>,
}

impl ZoneReading {
    /// Classify `current` against the normalized band `[low, high]`.
    pub fn classify(low: u16, high: u16, current: u32) -> Self {
        let (low32, high32) = (u32::from(low), u32::from(high));

        let (distance, side) = if current < low32 {
            (low32 - current, Side::Below)
        } else if current > high32 {
            (current - high32, Side::Above)
        } else {
            return Self {
                zone: Zone::In,
                side: None,
            };
        };

        // distance <= NEAR% of (low + high) / 2, kept in integers
        let near = u64::from(distance) * 200 <= u64::from(NEAR_ZONE_PCT) * u64::from(low32 + high32);
        Self {
            zone: if near { Zone::Near } else { Zone::Out },
            side: Some(side),
        }
    }

    pub const fn is_inside(&self) -> bool {
        matches!(self.zone, Zone::In)
    }

    /// Compliance text for the wearer.
    pub const fn compliance_text(&self) -> &'static str {
        match (self.zone, self.side) {
            (Zone::In, _) => "In Target",
            (Zone::Near, _) => "Close to Target",
            (Zone::Out, Some(Side::Above)) => "Above Target",
            (Zone::Out, _) => "Below Target",
        }
    }
}

impl fmt::Display for ZoneReading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.compliance_text())
    }
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Everything the gauge needs for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoneEvaluation {
    pub low: u16,
    pub high: u16,
    pub domain: GaugeDomain,
    /// Needle position; 0 while the metric has no sample
    pub t: f32,
    /// Band position on the gauge as `(t_low, t_high)`
    pub band: (f32, f32),
    /// `None` while the metric has no sample
    pub reading: Option<ZoneReading>,
}

impl ZoneEvaluation {
    /// Evaluate `target` against the live `current` value of its metric.
    ///
    /// Returns `None` when no target is set.
    pub fn evaluate(target: &TargetSpec, current: Option<u32>) -> Option<Self> {
        if !target.is_active() {
            return None;
        }

        let (low, high) = target.normalized();
        let domain = GaugeDomain::for_band(low, high);
        let band = (
            domain.position(f32::from(low)),
            domain.position(f32::from(high)),
        );

        let (t, reading) = match current {
            Some(value) => (
                domain.position(value as f32),
                Some(ZoneReading::classify(low, high, value)),
            ),
            None => (0.0, None),
        };

        Some(Self {
            low,
            high,
            domain,
            t,
            band,
            reading,
        })
    }

    /// Band midpoint on the gauge.
    pub fn band_mid(&self) -> f32 {
        (self.band.0 + self.band.1) / 2.0
    }
}

// ---------------------------------------------------------------------------
// Hysteresis
// ---------------------------------------------------------------------------

/// Edge produced when the live value crosses the band boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    Entered,
    Exited,
}

/// Remembers the previous band membership to detect crossings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZoneTracker {
    inside: bool,
}

impl ZoneTracker {
    pub const fn new() -> Self {
        Self { inside: false }
    }

    pub const fn was_inside(&self) -> bool {
        self.inside
    }

    /// Record a sample's membership and report an edge if it changed.
    pub fn observe(&mut self, inside: bool) -> Option<Crossing> {
        if inside == self.inside {
            return None;
        }
        self.inside = inside;
        Some(if inside {
            Crossing::Entered
        } else {
            Crossing::Exited
        })
    }

    pub fn reset(&mut self) {
        self.inside = false;
    }
}
