//! Device services the engine calls out to.
//!
//! Drawing goes through [`crate::render::Canvas`] and persistence through
//! [`crate::settings::SettingsStore`]; vibration is the remaining service.

/// Vibration motor.
pub trait Haptics {
    /// One short pulse: zone entered, hero or units changed.
    fn short_pulse(&mut self);

    /// Two pulses: zone left, focus toggled.
    fn double_pulse(&mut self);
}

/// Haptics for hosts without a motor.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHaptics;

impl Haptics for NoHaptics {
    fn short_pulse(&mut self) {}

    fn double_pulse(&mut self) {}
}

impl<H: Haptics + ?Sized> Haptics for &mut H {
    fn short_pulse(&mut self) {
        (**self).short_pulse();
    }

    fn double_pulse(&mut self) {
        (**self).double_pulse();
    }
}
