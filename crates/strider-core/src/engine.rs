//! The engine: every piece of runtime state, and the handlers that mutate it.
//!
//! The event loop owns one [`Engine`] and feeds it inbound messages, button
//! gestures and obstruction changes, one at a time. Every handler finishes
//! by running the full render pipeline into the canvas it was given:
//!
//! 1. re-derive the layout from view, focus, shape and available area;
//! 2. clear the screen;
//! 3. draw the free-run or workout screen. On the workout screen the zone is
//!    evaluated and band crossings fire haptics.

use embedded_graphics::primitives::Rectangle;
use log::{debug, info, warn};

use crate::colors::Palette;
use crate::config::DisplayConfig;
use crate::input::Gesture;
use crate::layout::{self, LayoutFrame, LayoutInput};
use crate::metrics::{MetricStore, hero_readout};
use crate::platform::Haptics;
use crate::protocol::Message;
use crate::render::Canvas;
use crate::render::screen::{WorkoutText, draw_grid_cell, draw_hero, draw_workout};
use crate::settings::{SettingKey, SettingsStore, UserSettings};
use crate::view::{View, ViewState};
use crate::zone::{Crossing, TargetSpec, ZoneEvaluation};

pub struct Engine<S, H> {
    config: DisplayConfig,
    palette: Palette,
    store: S,
    haptics: H,
    settings: UserSettings,
    metrics: MetricStore,
    target: TargetSpec,
    view: ViewState,
    available: Rectangle,
}

impl<S, H> Engine<S, H>
where
    S: SettingsStore,
    H: Haptics,
{
    /// Create the engine, loading persisted settings from `store`.
    ///
    /// Starts in the free-run view with the whole screen available. Nothing
    /// is drawn until the first handler or [`Engine::render`] call.
    pub fn new(config: DisplayConfig, store: S, haptics: H) -> Self {
        let settings = UserSettings::load(&store);
        let target = TargetSpec::default();

        info!(
            "Engine started: {:?} {}x{}",
            config.shape, config.width, config.height
        );

        Self {
            config,
            palette: Palette::for_display(config.color),
            store,
            haptics,
            settings,
            metrics: MetricStore::new(),
            target,
            view: ViewState::new(&target),
            available: config.bounds(),
        }
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    /// Apply an inbound message, then render once.
    pub fn handle_message<C: Canvas>(
        &mut self,
        message: &Message,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        let applied = message.apply(&mut self.metrics, &mut self.target);
        debug!(
            "Message applied: {} metrics, target touched: {}",
            applied.metrics_updated, applied.target_touched
        );

        if let Some(units) = applied.units {
            if units != self.settings.units {
                info!("Units set by phone: {:?}", units);
            }
            self.settings.units = units;
            self.settings.persist(&mut self.store, SettingKey::Units);
        }

        if applied.target_touched {
            self.view.derive(&self.target);
        }

        self.render(canvas)
    }

    /// Decode a raw dictionary frame and handle it.
    ///
    /// Frames that fail to decode are logged and dropped without touching
    /// state or redrawing.
    pub fn handle_bytes<C: Canvas>(&mut self, bytes: &[u8], canvas: &mut C) -> Result<(), C::Error> {
        match Message::from_bytes(bytes) {
            Ok(message) => self.handle_message(&message, canvas),
            Err(e) => {
                warn!("Dropping inbound frame: {}", e);
                Ok(())
            }
        }
    }

    /// Apply a button gesture, then render.
    pub fn handle_gesture<C: Canvas>(
        &mut self,
        gesture: Gesture,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        let key = match gesture {
            Gesture::Up => {
                self.settings.hero = self.settings.hero.next();
                SettingKey::Hero
            }
            Gesture::Down => {
                self.settings.hero = self.settings.hero.previous();
                SettingKey::Hero
            }
            Gesture::Select => {
                self.settings.units = self.settings.units.toggled();
                SettingKey::Units
            }
            Gesture::SelectLong => {
                self.settings.focus = self.settings.focus.toggled();
                SettingKey::Focus
            }
        };

        info!("{:?} -> {:?}", gesture, self.settings);
        self.settings.persist(&mut self.store, key);

        match gesture {
            Gesture::SelectLong => self.haptics.double_pulse(),
            _ => self.haptics.short_pulse(),
        }

        self.render(canvas)
    }

    /// The unobstructed screen area changed, then render.
    pub fn set_available_area<C: Canvas>(
        &mut self,
        area: Rectangle,
        canvas: &mut C,
    ) -> Result<(), C::Error> {
        debug!("Available area: {:?}", area);
        self.available = area;
        self.render(canvas)
    }

    // -----------------------------------------------------------------------
    // Render pipeline
    // -----------------------------------------------------------------------

    /// Current layout frame.
    pub fn layout(&self) -> LayoutFrame {
        layout::compute(&LayoutInput {
            view: self.view.view,
            focus: self.settings.focus,
            shape: self.config.shape,
            area: self.available,
            hero: self.settings.hero,
            presence: self.metrics.presence(),
        })
    }

    /// Redraw the whole screen.
    pub fn render<C: Canvas>(&mut self, canvas: &mut C) -> Result<(), C::Error> {
        let frame = self.layout();
        let palette = self.palette;
        let units = self.settings.units;

        canvas.fill_rect(self.config.bounds(), palette.background)?;

        match frame {
            LayoutFrame::Workout(layout) => {
                let current = self.target.kind.metric().and_then(|id| self.metrics.get(id));
                let Some(eval) = ZoneEvaluation::evaluate(&self.target, current) else {
                    return Ok(());
                };
                self.track_zone(&eval);

                let text = WorkoutText::new(self.target.kind, &eval, &self.metrics, units);
                draw_workout(canvas, &layout, &eval, &text, &palette)
            }
            LayoutFrame::HeroOnly(hero) => {
                let (label, value) = hero_readout(&self.metrics, self.settings.hero, units);
                draw_hero(canvas, &hero, label, &value, &palette)
            }
            LayoutFrame::Grid { hero, cells } => {
                let (label, value) = hero_readout(&self.metrics, self.settings.hero, units);
                draw_hero(canvas, &hero, label, &value, &palette)?;
                for cell in &cells {
                    let record = self.metrics.cell(cell.id, units);
                    draw_grid_cell(canvas, cell, &record, &palette)?;
                }
                Ok(())
            }
        }
    }

    /// Fire haptics when the live value crosses the band boundary.
    fn track_zone(&mut self, eval: &ZoneEvaluation) {
        let Some(reading) = eval.reading else {
            return;
        };

        match self.view.zone.observe(reading.is_inside()) {
            Some(Crossing::Entered) => {
                info!("Entered target zone");
                self.haptics.short_pulse();
            }
            Some(Crossing::Exited) => {
                info!("Left target zone: {}", reading);
                self.haptics.double_pulse();
            }
            None => {}
        }
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn settings(&self) -> &UserSettings {
        &self.settings
    }

    pub fn metrics(&self) -> &MetricStore {
        &self.metrics
    }

    pub fn target(&self) -> &TargetSpec {
        &self.target
    }

    pub fn view(&self) -> View {
        self.view.view
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn available_area(&self) -> Rectangle {
        self.available
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// Tear down, returning the platform services.
    pub fn into_parts(self) -> (S, H) {
        (self.store, self.haptics)
    }
}
