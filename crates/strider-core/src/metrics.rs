//! Latest-value store for the workout metric channels.
//!
//! Each channel keeps its last received value plus an explicit presence
//! flag. Presence is set by the first sample and never cleared for the
//! rest of the session.

use heapless::Vec;

use crate::format::{
    ValueText, format_cadence, format_distance, format_integer, format_pace_value_only,
    or_placeholder,
};
use crate::settings::{HeroMetric, Units};

/// Identifies one metric channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricId {
    HeartRate,
    Pace,
    Cadence,
    Distance,
    Power,
}

/// Number of metric channels.
pub const METRIC_COUNT: usize = 5;

impl MetricId {
    /// Every channel, in grid order.
    pub const ALL: [Self; METRIC_COUNT] = [
        Self::HeartRate,
        Self::Pace,
        Self::Cadence,
        Self::Distance,
        Self::Power,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::HeartRate => 0,
            Self::Pace => 1,
            Self::Cadence => 2,
            Self::Distance => 3,
            Self::Power => 4,
        }
    }

    /// Short label shown above a grid cell.
    pub const fn grid_label(self, units: Units) -> &'static str {
        match self {
            Self::HeartRate => "HR",
            Self::Pace => units.pace_label(),
            Self::Cadence => "CAD",
            Self::Distance => "DIST",
            Self::Power => "PWR",
        }
    }

    /// Format a raw channel value for display.
    pub fn format(self, raw: u32, units: Units) -> ValueText {
        match self {
            Self::HeartRate | Self::Power => format_integer(raw),
            Self::Pace => format_pace_value_only(raw as u16, units),
            Self::Cadence => format_cadence(raw),
            Self::Distance => format_distance(raw, units),
        }
    }
}

/// One metric channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricChannel {
    pub present: bool,
    pub value: u32,
}

impl MetricChannel {
    pub fn update(&mut self, value: u32) {
        self.value = value;
        self.present = true;
    }

    pub fn get(&self) -> Option<u32> {
        self.present.then_some(self.value)
    }
}

/// A grid cell record: what to draw for one metric.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricCell {
    pub id: MetricId,
    pub label: &'static str,
    pub value: ValueText,
    pub present: bool,
}

/// Last-known values of every channel.
#[derive(Debug, Clone, Default)]
pub struct MetricStore {
    channels: [MetricChannel; METRIC_COUNT],
}

impl MetricStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: MetricId, value: u32) {
        self.channels[id.index()].update(value);
    }

    pub fn get(&self, id: MetricId) -> Option<u32> {
        self.channels[id.index()].get()
    }

    pub fn channel(&self, id: MetricId) -> &MetricChannel {
        &self.channels[id.index()]
    }

    pub fn is_present(&self, id: MetricId) -> bool {
        self.channels[id.index()].present
    }

    /// Presence flags indexed by [`MetricId::index`].
    pub fn presence(&self) -> [bool; METRIC_COUNT] {
        let mut flags = [false; METRIC_COUNT];
        for (flag, channel) in flags.iter_mut().zip(self.channels.iter()) {
            *flag = channel.present;
        }
        flags
    }

    /// Display string for a channel, or the placeholder when it has no data.
    pub fn value_text(&self, id: MetricId, units: Units) -> ValueText {
        or_placeholder(self.get(id), |raw| id.format(raw, units))
    }

    pub fn cell(&self, id: MetricId, units: Units) -> MetricCell {
        MetricCell {
            id,
            label: id.grid_label(units),
            value: self.value_text(id, units),
            present: self.is_present(id),
        }
    }

    /// Cells for `ids`, in the given order.
    pub fn cells(&self, ids: &[MetricId], units: Units) -> Vec<MetricCell, METRIC_COUNT> {
        let mut cells = Vec::new();
        for &id in ids {
            // Ids past the channel count are dropped
            cells.push(self.cell(id, units)).ok();
        }
        cells
    }
}

// ---------------------------------------------------------------------------
// Hero dispatch
// ---------------------------------------------------------------------------

/// How the hero region shows one [`HeroMetric`].
#[derive(Clone, Copy)]
pub struct HeroEntry {
    pub metric: MetricId,
    pub label: fn(Units) -> &'static str,
    pub format: fn(u32, Units) -> ValueText,
}

fn heart_rate_label(_: Units) -> &'static str {
    "HEART RATE"
}

fn power_label(_: Units) -> &'static str {
    "POWER"
}

fn integer_value(raw: u32, _: Units) -> ValueText {
    format_integer(raw)
}

fn pace_value(raw: u32, units: Units) -> ValueText {
    format_pace_value_only(raw as u16, units)
}

const HERO_TABLE: [HeroEntry; 3] = [
    HeroEntry {
        metric: MetricId::HeartRate,
        label: heart_rate_label,
        format: integer_value,
    },
    HeroEntry {
        metric: MetricId::Pace,
        label: Units::pace_label,
        format: pace_value,
    },
    HeroEntry {
        metric: MetricId::Power,
        label: power_label,
        format: integer_value,
    },
];

impl HeroMetric {
    pub fn entry(self) -> &'static HeroEntry {
        &HERO_TABLE[self.code() as usize]
    }

    pub fn metric_id(self) -> MetricId {
        self.entry().metric
    }
}

/// Label and value text for the hero region.
pub fn hero_readout(store: &MetricStore, hero: HeroMetric, units: Units) -> (&'static str, ValueText) {
    let entry = hero.entry();
    let value = or_placeholder(store.get(entry.metric), |raw| (entry.format)(raw, units));
    ((entry.label)(units), value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::PLACEHOLDER;

    #[test]
    fn test_channels_start_absent() {
        let store = MetricStore::new();
        for id in MetricId::ALL {
            assert!(!store.is_present(id));
            assert_eq!(store.value_text(id, Units::Metric).as_str(), PLACEHOLDER);
        }
    }

    #[test]
    fn test_zero_is_a_real_sample() {
        let mut store = MetricStore::new();
        store.set(MetricId::Power, 0);
        assert!(store.is_present(MetricId::Power));
        assert_eq!(store.value_text(MetricId::Power, Units::Metric).as_str(), "0");
    }

    #[test]
    fn test_cells_follow_units() {
        let mut store = MetricStore::new();
        store.set(MetricId::Pace, 300);
        store.set(MetricId::Distance, 42_195);
        store.set(MetricId::Cadence, 172);

        let metric = store.cells(&[MetricId::Pace, MetricId::Distance, MetricId::Cadence], Units::Metric);
        assert_eq!(metric[0].label, "PACE / KM");
        assert_eq!(metric[0].value.as_str(), "5:33");
        assert_eq!(metric[1].value.as_str(), "42.19 km");
        assert_eq!(metric[2].value.as_str(), "172 spm");

        let imperial = store.cell(MetricId::Pace, Units::Imperial);
        assert_eq!(imperial.label, "PACE / MI");
        assert_eq!(imperial.value.as_str(), "8:56");
    }

    #[test]
    fn test_hero_dispatch() {
        let mut store = MetricStore::new();
        store.set(MetricId::HeartRate, 151);

        let (label, value) = hero_readout(&store, HeroMetric::HeartRate, Units::Metric);
        assert_eq!(label, "HEART RATE");
        assert_eq!(value.as_str(), "151");

        let (label, value) = hero_readout(&store, HeroMetric::Power, Units::Metric);
        assert_eq!(label, "POWER");
        assert_eq!(value.as_str(), PLACEHOLDER);

        let (label, _) = hero_readout(&store, HeroMetric::Pace, Units::Imperial);
        assert_eq!(label, "PACE / MI");
    }

    #[test]
    fn test_presence_flags() {
        let mut store = MetricStore::new();
        store.set(MetricId::Cadence, 90);
        let flags = store.presence();
        assert_eq!(flags, [false, false, true, false, false]);
    }
}
