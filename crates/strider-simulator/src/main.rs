//! Desktop simulator for the strider watch display.
//!
//! Renders strider-core into an SDL2 window via `embedded-graphics-simulator`.
//! Synthetic telemetry is encoded into real dictionary frames and fed through
//! the same decoder the watch uses, so the whole pipeline runs without a
//! phone.
//!
//! # Key bindings
//!
//! | Key          | Action                                      |
//! |--------------|---------------------------------------------|
//! | Up / Down    | Next / previous hero metric                 |
//! | Enter, Space | SELECT (hold ≥ 500 ms for the long press)   |
//! | T            | Cycle target: none → power → pace → none    |
//! | O            | Toggle a screen obstruction at the bottom   |
//! | Q, Esc       | Quit                                        |
//!
//! # Environment
//!
//! * `STRIDER_PLATFORM`: `rect-mono`, `rect`, `round` or `large` (default `rect`)
//! * `STRIDER_SETTINGS`: settings snapshot file (default `strider-settings.bin`)
//! * `RUST_LOG`: log filter, e.g. `RUST_LOG=debug`

use std::path::PathBuf;
use std::time::{Duration, Instant};

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window, sdl2::Keycode,
};
use log::{error, info, warn};

use strider_core::Engine;
use strider_core::config::DisplayConfig;
use strider_core::framebuffer::FrameBuffer;
use strider_core::input::{Button, ClickRecognizer, Gesture};
use strider_core::platform::Haptics;
use strider_core::protocol::{Message, ProtocolError, TupleValue, keys};
use strider_core::render::EgCanvas;
use strider_core::settings::MemoryStore;

// ---------------------------------------------------------------------------
// Simulator constants
// ---------------------------------------------------------------------------

/// Pixel scale factor for the simulator window.
const WINDOW_SCALE: u32 = 3;

/// Target frame duration (~30 FPS).
const FRAME_DURATION: Duration = Duration::from_millis(33);

/// Interval between synthetic telemetry messages.
const TELEMETRY_INTERVAL: Duration = Duration::from_secs(1);

/// Height of the simulated system obstruction in pixels.
const OBSTRUCTION_HEIGHT_PX: u32 = 51;

const DEFAULT_SETTINGS_FILE: &str = "strider-settings.bin";

// ---------------------------------------------------------------------------
// Platform services
// ---------------------------------------------------------------------------

/// Haptics that only log.
struct LoggedHaptics;

impl Haptics for LoggedHaptics {
    fn short_pulse(&mut self) {
        info!("Haptics: short pulse");
    }

    fn double_pulse(&mut self) {
        info!("Haptics: double pulse");
    }
}

fn settings_path() -> PathBuf {
    std::env::var_os("STRIDER_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_FILE))
}

/// Load the settings snapshot, starting empty if it is missing or corrupt.
fn load_store(path: &PathBuf) -> MemoryStore {
    match std::fs::read(path) {
        Ok(bytes) => MemoryStore::from_bytes(&bytes).unwrap_or_else(|e| {
            warn!("Ignoring settings file {}: {}", path.display(), e);
            MemoryStore::new()
        }),
        Err(_) => {
            info!("No settings file at {}, using defaults", path.display());
            MemoryStore::new()
        }
    }
}

fn save_store(path: &PathBuf, store: &MemoryStore) {
    let result = store
        .to_bytes()
        .map_err(|e| e.to_string())
        .and_then(|bytes| std::fs::write(path, bytes).map_err(|e| e.to_string()));
    if let Err(e) = result {
        warn!("Failed to save settings to {}: {}", path.display(), e);
    }
}

fn platform_from_env() -> DisplayConfig {
    let Ok(name) = std::env::var("STRIDER_PLATFORM") else {
        return DisplayConfig::default();
    };
    DisplayConfig::from_name(&name).unwrap_or_else(|| {
        warn!("Unknown STRIDER_PLATFORM {:?}, using rect", name);
        DisplayConfig::default()
    })
}

// ---------------------------------------------------------------------------
// Mock telemetry
// ---------------------------------------------------------------------------

/// Generates synthetic run telemetry that varies over time.
struct MockTelemetry {
    elapsed_secs: f64,
    distance_m: f64,
}

impl MockTelemetry {
    fn new() -> Self {
        Self {
            elapsed_secs: 0.0,
            distance_m: 0.0,
        }
    }

    /// Advance the internal clock and build the next message.
    fn next_message(&mut self, dt_secs: f64) -> Result<Message, ProtocolError> {
        self.elapsed_secs += dt_secs;
        let t = self.elapsed_secs;

        // Speed: 2.6–3.4 m/s, i.e. roughly 4:54–6:24 per km
        let speed = 3.0 + 0.4 * (t / 40.0).sin();
        self.distance_m += speed * dt_secs;

        let heart_rate = 148.0 + 12.0 * (t / 90.0).sin() + 2.0 * (t / 7.0).cos();
        let cadence = 170.0 + 4.0 * (t / 25.0).sin();
        let power = 225.0 + 45.0 * (t / 30.0).sin() + 10.0 * (t / 11.0).cos();

        Message::new()
            .with(keys::HEART_RATE, TupleValue::U8(heart_rate as u8))?
            .with(keys::PACE, TupleValue::U16((speed * 100.0) as u16))?
            .with(keys::CADENCE, TupleValue::U16(cadence as u16))?
            .with(keys::DISTANCE, TupleValue::U32(self.distance_m as u32))?
            .with(keys::POWER, TupleValue::U16(power as u16))
    }
}

/// Targets cycled by the T key: none, power 200–250 W, pace 3.00–3.30 m/s.
const TARGETS: [(u8, u16, u16); 3] = [(0, 0, 0), (1, 200, 250), (2, 300, 330)];

fn target_message(index: usize) -> Result<Message, ProtocolError> {
    let (kind, lo, hi) = TARGETS[index % TARGETS.len()];
    Message::new()
        .with(keys::TARGET_KIND, TupleValue::U8(kind))?
        .with(keys::TARGET_LOW, TupleValue::U16(lo))?
        .with(keys::TARGET_HIGH, TupleValue::U16(hi))
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Map an SDL keycode to a watch button.
fn keycode_to_button(keycode: Keycode) -> Option<Button> {
    match keycode {
        Keycode::Up => Some(Button::Up),
        Keycode::Down => Some(Button::Down),
        Keycode::Return | Keycode::KpEnter | Keycode::Space => Some(Button::Select),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() {
    env_logger::init();

    let config = platform_from_env();
    info!("Starting strider simulator");
    info!(
        "Display: {:?} {}×{} color={} (scale {}×)",
        config.shape, config.width, config.height, config.color, WINDOW_SCALE
    );
    info!("Keys: ↑/↓=Hero  Enter=Units (hold: Focus)  T=Target  O=Obstruction  Q=Quit");

    let settings_file = settings_path();
    let store = load_store(&settings_file);
    let mut engine = Engine::new(config, store, LoggedHaptics);

    // SDL2 display and window
    let mut display = SimulatorDisplay::<Rgb565>::new(config.size());
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new("Strider Simulator", &output_settings);

    let mut framebuffer = FrameBuffer::new(config.size());
    let mut telemetry = MockTelemetry::new();
    let mut clicks = ClickRecognizer::new();
    let mut target_index = 0;
    let mut obstructed = false;

    let started = Instant::now();
    let mut last_sample = Instant::now();

    // The SDL window is lazily initialized on the first `update()` call.
    // We must call `update()` once before `events()` or it will panic.
    let _ = engine.render(&mut EgCanvas::new(&mut framebuffer));
    let _ = framebuffer.flush(&mut display);
    window.update(&display);

    // -----------------------------------------------------------------------
    // Main loop
    // -----------------------------------------------------------------------
    'running: loop {
        let frame_start = Instant::now();
        let now_ms = started.elapsed().as_millis() as u64;
        let mut gestures: Vec<Gesture> = Vec::new();

        // --- SDL events ---------------------------------------------------
        for event in window.events() {
            match event {
                SimulatorEvent::Quit => break 'running,

                SimulatorEvent::KeyDown {
                    keycode, repeat, ..
                } => {
                    if keycode == Keycode::Q || keycode == Keycode::Escape {
                        break 'running;
                    }
                    if repeat {
                        continue;
                    }

                    if let Some(button) = keycode_to_button(keycode) {
                        gestures.extend(clicks.press(button, now_ms));
                        continue;
                    }

                    let mut canvas = EgCanvas::new(&mut framebuffer);
                    let result = match keycode {
                        Keycode::T => {
                            target_index = (target_index + 1) % TARGETS.len();
                            match target_message(target_index) {
                                Ok(message) => engine.handle_message(&message, &mut canvas),
                                Err(e) => {
                                    error!("Failed to build target message: {}", e);
                                    Ok(())
                                }
                            }
                        }
                        Keycode::O => {
                            obstructed = !obstructed;
                            let full = config.bounds();
                            let area = if obstructed {
                                Rectangle::new(
                                    Point::zero(),
                                    Size::new(
                                        config.width,
                                        config.height.saturating_sub(OBSTRUCTION_HEIGHT_PX),
                                    ),
                                )
                            } else {
                                full
                            };
                            engine.set_available_area(area, &mut canvas)
                        }
                        _ => Ok(()),
                    };
                    if let Err(e) = result {
                        error!("Draw error: {:?}", e);
                    }
                }

                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(button) = keycode_to_button(keycode) {
                        gestures.extend(clicks.release(button, now_ms));
                    }
                }

                _ => {}
            }
        }

        gestures.extend(clicks.poll(now_ms));

        // --- Gestures -----------------------------------------------------
        for gesture in gestures {
            if let Err(e) = engine.handle_gesture(gesture, &mut EgCanvas::new(&mut framebuffer)) {
                error!("Draw error: {:?}", e);
            }
            save_store(&settings_file, engine.store());
        }

        // --- Mock telemetry -----------------------------------------------
        if last_sample.elapsed() >= TELEMETRY_INTERVAL {
            match telemetry.next_message(TELEMETRY_INTERVAL.as_secs_f64()) {
                Ok(message) => {
                    let frame = message.to_bytes();
                    let mut canvas = EgCanvas::new(&mut framebuffer);
                    if let Err(e) = engine.handle_bytes(&frame, &mut canvas) {
                        error!("Draw error: {:?}", e);
                    }
                }
                Err(e) => error!("Failed to build telemetry message: {}", e),
            }
            last_sample = Instant::now();
        }

        // --- Present ------------------------------------------------------
        let _ = framebuffer.flush(&mut display);
        window.update(&display);

        // --- Frame pacing -------------------------------------------------
        let elapsed = frame_start.elapsed();
        if elapsed < FRAME_DURATION {
            std::thread::sleep(FRAME_DURATION - elapsed);
        }
    }

    let (store, _) = engine.into_parts();
    save_store(&settings_file, &store);
    info!("Simulator exiting");
}
