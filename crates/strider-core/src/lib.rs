//! Hardware-independent core of the strider watch display
//!
//! Receives live workout telemetry from the paired phone as keyed integer
//! messages, keeps the latest value of each metric, and renders either a
//! free-run metric screen or, when a power/pace target is set, a radial
//! target gauge with zone-crossing haptics.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on watch
//! targets and on desktop hosts (for the simulator and tests). The device
//! itself is reached only through [`render::Canvas`],
//! [`settings::SettingsStore`] and [`platform::Haptics`].

#![no_std]

extern crate alloc;

pub mod colors;
pub mod config;
pub mod constants;
pub mod engine;
pub mod format;
pub mod framebuffer;
pub mod input;
pub mod layout;
pub mod metrics;
pub mod platform;
pub mod protocol;
pub mod render;
pub mod settings;
pub mod view;
pub mod zone;

pub use engine::Engine;
