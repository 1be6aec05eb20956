//! User settings and the integer key/value persistence they live in.
//!
//! The watch platform exposes persistence as "read/write an integer under a
//! key". [`SettingsStore`] is that contract; [`MemoryStore`] is an in-memory
//! implementation which can also snapshot itself to bytes so a host (the
//! simulator, tests) can carry it across simulated restarts.

extern crate alloc;

use alloc::vec::Vec as AllocVec;

use heapless::Vec;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use thiserror_no_std::Error;

/// Persistence keys. Deliberately disjoint from the inbound message keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum SettingKey {
    Units = 100,
    Hero = 101,
    Focus = 102,
}

impl SettingKey {
    pub const fn id(self) -> u32 {
        self as u32
    }
}

/// Unit system used for distance and pace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
}

impl Units {
    /// Decode the wire encoding: `1` is imperial, anything else metric.
    pub const fn from_wire(value: u32) -> Self {
        if value == 1 {
            Self::Imperial
        } else {
            Self::Metric
        }
    }

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Metric),
            1 => Some(Self::Imperial),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Metric => 0,
            Self::Imperial => 1,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Metric => Self::Imperial,
            Self::Imperial => Self::Metric,
        }
    }

    /// Short distance unit used in pace suffixes.
    pub const fn distance_suffix(self) -> &'static str {
        match self {
            Self::Metric => "km",
            Self::Imperial => "mi",
        }
    }

    /// Label shown above numeric-only pace values.
    pub const fn pace_label(self) -> &'static str {
        match self {
            Self::Metric => "PACE / KM",
            Self::Imperial => "PACE / MI",
        }
    }
}

/// Which metric is shown large at the top of the free-run screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeroMetric {
    #[default]
    HeartRate,
    Pace,
    Power,
}

impl HeroMetric {
    pub const ALL: [Self; 3] = [Self::HeartRate, Self::Pace, Self::Power];

    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::HeartRate),
            1 => Some(Self::Pace),
            2 => Some(Self::Power),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::HeartRate => 0,
            Self::Pace => 1,
            Self::Power => 2,
        }
    }

    /// Next hero in the HR -> Pace -> Power cycle.
    pub const fn next(self) -> Self {
        match self {
            Self::HeartRate => Self::Pace,
            Self::Pace => Self::Power,
            Self::Power => Self::HeartRate,
        }
    }

    /// Previous hero in the cycle.
    pub const fn previous(self) -> Self {
        match self {
            Self::HeartRate => Self::Power,
            Self::Pace => Self::HeartRate,
            Self::Power => Self::Pace,
        }
    }
}

/// Display density of the free-run screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FocusMode {
    #[default]
    Grid,
    HeroOnly,
}

impl FocusMode {
    pub const fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Grid),
            1 => Some(Self::HeroOnly),
            _ => None,
        }
    }

    pub const fn code(self) -> i32 {
        match self {
            Self::Grid => 0,
            Self::HeroOnly => 1,
        }
    }

    pub const fn toggled(self) -> Self {
        match self {
            Self::Grid => Self::HeroOnly,
            Self::HeroOnly => Self::Grid,
        }
    }
}

/// Persisted user preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserSettings {
    pub units: Units,
    pub hero: HeroMetric,
    pub focus: FocusMode,
}

impl UserSettings {
    /// Read every field from `store`, falling back to the default for any key
    /// that is absent or holds an unknown code.
    pub fn load<S: SettingsStore + ?Sized>(store: &S) -> Self {
        let defaults = Self::default();

        let units = read_field(store, SettingKey::Units, Units::from_code, defaults.units);
        let hero = read_field(store, SettingKey::Hero, HeroMetric::from_code, defaults.hero);
        let focus = read_field(store, SettingKey::Focus, FocusMode::from_code, defaults.focus);

        let settings = Self { units, hero, focus };
        info!("Loaded settings: {:?}", settings);
        settings
    }

    /// Write a single field back to `store`.
    ///
    /// Failures are logged and swallowed; the in-memory value stays
    /// authoritative for the rest of the session.
    pub fn persist<S: SettingsStore + ?Sized>(&self, store: &mut S, key: SettingKey) {
        let code = match key {
            SettingKey::Units => self.units.code(),
            SettingKey::Hero => self.hero.code(),
            SettingKey::Focus => self.focus.code(),
        };

        if let Err(e) = store.write_int(key.id(), code) {
            warn!("Failed to persist {:?}={}: {}", key, code, e);
        }
    }
}

fn read_field<S, T>(store: &S, key: SettingKey, decode: fn(i32) -> Option<T>, default: T) -> T
where
    S: SettingsStore + ?Sized,
{
    match store.read_int(key.id()) {
        Some(code) => decode(code).unwrap_or_else(|| {
            warn!("Ignoring unknown code {} for {:?}", code, key);
            default
        }),
        None => {
            debug!("No persisted value for {:?}, using default", key);
            default
        }
    }
}

/// Errors raised at the persistence boundary.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No room left for a new key
    #[error("Settings store is full (capacity: {capacity})")]
    Full {
        /// Maximum number of keys the store can hold
        capacity: usize,
    },

    /// The platform refused the write
    #[error("Write rejected for key {key}")]
    WriteRejected {
        /// Key that could not be written
        key: u32,
    },

    /// Snapshot could not be encoded or decoded
    #[error("Settings snapshot failed: {0:?}")]
    Snapshot(postcard::Error),
}

/// Integer key/value persistence provided by the platform.
pub trait SettingsStore {
    /// Read the integer stored under `key`, if any.
    fn read_int(&self, key: u32) -> Option<i32>;

    /// Store `value` under `key`, replacing any previous value.
    fn write_int(&mut self, key: u32, value: i32) -> Result<(), StoreError>;
}

/// Maximum number of keys a [`MemoryStore`] can hold.
pub const STORE_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct StoredInt {
    key: u32,
    value: i32,
}

/// In-memory [`SettingsStore`] with byte snapshots.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<StoredInt, STORE_CAPACITY>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a store previously saved with [`MemoryStore::to_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StoreError> {
        let entries = postcard::from_bytes(bytes).map_err(StoreError::Snapshot)?;
        Ok(Self { entries })
    }

    /// Encode every stored key as a compact byte snapshot.
    pub fn to_bytes(&self) -> Result<AllocVec<u8>, StoreError> {
        postcard::to_allocvec(&self.entries).map_err(StoreError::Snapshot)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SettingsStore for MemoryStore {
    fn read_int(&self, key: u32) -> Option<i32> {
        self.entries.iter().find(|e| e.key == key).map(|e| e.value)
    }

    fn write_int(&mut self, key: u32, value: i32) -> Result<(), StoreError> {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.key == key) {
            entry.value = value;
            return Ok(());
        }

        self.entries
            .push(StoredInt { key, value })
            .map_err(|_| StoreError::Full {
                capacity: STORE_CAPACITY,
            })
    }
}
