//! Active view derived from the target.

use log::info;

use crate::zone::{TargetSpec, ZoneTracker};

/// Top-level screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    FreeRun,
    Workout,
}

impl View {
    /// The view a target dictates: any active target means a workout.
    pub const fn for_target(target: &TargetSpec) -> Self {
        if target.is_active() {
            Self::Workout
        } else {
            Self::FreeRun
        }
    }
}

/// Derived, non-persisted view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    pub view: View,
    /// Band membership as of the last rendered workout frame
    pub zone: ZoneTracker,
}

impl ViewState {
    pub fn new(target: &TargetSpec) -> Self {
        Self {
            view: View::for_target(target),
            zone: ZoneTracker::new(),
        }
    }

    /// Re-derive the view from `target`. Returns the new view if it changed.
    ///
    /// Leaving the workout view forgets band membership, so a later workout
    /// starts from "outside".
    pub fn derive(&mut self, target: &TargetSpec) -> Option<View> {
        let next = View::for_target(target);
        if next == self.view {
            return None;
        }

        info!("View {:?} -> {:?}", self.view, next);
        self.view = next;
        if next == View::FreeRun {
            self.zone.reset();
        }
        Some(next)
    }
}
